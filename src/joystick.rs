//! Analog joystick processing.
//!
//! Raw 10-bit axis readings are turned into four one-sided magnitudes
//! (left, right, down, up), each `0..=255`. Readings in the dead zone
//! around the rest position produce zero on that axis.
//!
//! | Raw value | Result |
//! |-----------|--------|
//! | `0..=500` | low side, `map(v, 500, 0, 0, 255)` |
//! | `501..=509` | neutral |
//! | `510..=1023` | high side, `map(v, 510, 1023, 0, 255)` |
//!
//! # Example
//!
//! ```rust
//! use explorer_tx::{JoystickReading, Orientation, RawAxes};
//!
//! let r = JoystickReading::from_raw(RawAxes { x: 0, y: 505 }, Orientation::Standard);
//! assert_eq!(r.left, 255);
//! assert_eq!(r.up, 0);
//! assert_eq!(r.down, 0);
//! ```

/// Largest 10-bit reading.
pub const RAW_MAX: u16 = 1023;
/// Highest reading on the low side.
pub const LOW_SIDE_MAX: u16 = 500;
/// Lowest reading on the high side.
pub const HIGH_SIDE_MIN: u16 = 510;

/// Which of the two sticks.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Stick {
    /// Driving stick, first in the data package.
    First,
    /// Auxiliary stick, second in the data package.
    Second,
}

/// How a stick is mounted.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Orientation {
    /// X axis is left/right, Y axis is up/down.
    #[default]
    Standard,
    /// Quarter turn: X axis is down/up, Y axis is left/right.
    Rotated,
}

/// Raw 10-bit readings of both axes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct RawAxes {
    /// Horizontal potentiometer.
    pub x: u16,
    /// Vertical potentiometer.
    pub y: u16,
}

impl RawAxes {
    /// Both axes at rest.
    pub const CENTER: RawAxes = RawAxes { x: 505, y: 505 };

    /// Converts 12-bit ADC readings to the 10-bit scale.
    #[inline]
    pub const fn from_12bit(x: u16, y: u16) -> Self {
        Self { x: x >> 2, y: y >> 2 }
    }
}

/// Deflection of one stick.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct JoystickReading {
    /// Leftward magnitude.
    pub left: u8,
    /// Rightward magnitude.
    pub right: u8,
    /// Backward magnitude.
    pub down: u8,
    /// Forward magnitude.
    pub up: u8,
}

/// Integer linear re-mapping with truncation towards zero.
///
/// `in_min == in_max` maps everything to `out_min`.
pub fn map_range(value: i32, in_min: i32, in_max: i32, out_min: i32, out_max: i32) -> i32 {
    if in_min == in_max {
        return out_min;
    }
    (value - in_min) * (out_max - out_min) / (in_max - in_min) + out_min
}

/// Splits one axis into (low side, high side) magnitudes.
pub fn split_axis(raw: u16) -> (u8, u8) {
    let v = i32::from(raw.min(RAW_MAX));
    if v <= i32::from(LOW_SIDE_MAX) {
        let m = map_range(v, LOW_SIDE_MAX.into(), 0, 0, 255);
        (m.clamp(0, 255) as u8, 0)
    } else if v >= i32::from(HIGH_SIDE_MIN) {
        let m = map_range(v, HIGH_SIDE_MIN.into(), RAW_MAX.into(), 0, 255);
        (0, m.clamp(0, 255) as u8)
    } else {
        (0, 0)
    }
}

impl JoystickReading {
    /// Stick at rest.
    pub const NEUTRAL: JoystickReading = JoystickReading {
        left: 0,
        right: 0,
        down: 0,
        up: 0,
    };

    /// Processes one pair of raw readings.
    pub fn from_raw(raw: RawAxes, orientation: Orientation) -> Self {
        let (x_low, x_high) = split_axis(raw.x);
        let (y_low, y_high) = split_axis(raw.y);
        match orientation {
            Orientation::Standard => Self {
                left: x_low,
                right: x_high,
                up: y_low,
                down: y_high,
            },
            Orientation::Rotated => Self {
                down: x_low,
                up: x_high,
                left: y_low,
                right: y_high,
            },
        }
    }

    /// Returns true if no direction is deflected.
    #[inline]
    pub fn is_neutral(&self) -> bool {
        *self == Self::NEUTRAL
    }

    /// Wire order: left, right, down, up.
    #[inline]
    pub const fn to_bytes(&self) -> [u8; 4] {
        [self.left, self.right, self.down, self.up]
    }
}
