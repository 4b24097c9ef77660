//! MPU-6050 tilt processing.
//!
//! The transmitter doubles as a tilt controller: tipping the unit past its
//! resting band produces left/right/down/up magnitudes like a joystick.
//!
//! 1. [`MpuRawData::from_be_bytes`] decodes the 14-byte register burst
//!    starting at `ACCEL_XOUT_H`.
//! 2. [`Calibration`] records the resting band of the X and Y axes over a
//!    number of samples and widens it by a margin.
//! 3. [`TiltReading::from_raw`] maps readings outside that band to
//!    `0..=255`, saturating at the configured [`TiltBounds`].

use crate::joystick::map_range;

/// Default I2C address (AD0 low).
pub const MPU6050_ADDR: u8 = 0x68;
/// Power management register; writing zero wakes the device.
pub const PWR_MGMT_1: u8 = 0x6B;
/// First data register.
pub const ACCEL_XOUT_H: u8 = 0x3B;
/// Length of the accel + temp + gyro register burst.
pub const RAW_FRAME_LEN: usize = 14;

/// Default number of resting samples taken by calibration.
pub const DEFAULT_CALIBRATION_SAMPLES: u16 = 255;
/// Default widening of the resting band.
pub const DEFAULT_CALIBRATION_MARGIN: i16 = 180;

/// Converts a raw temperature register to degrees Celsius.
#[inline]
pub fn temperature_c(raw: i16) -> f32 {
    f32::from(raw) / 340.0 + 36.53
}

/// One decoded register burst.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MpuRawData {
    /// Acceleration, X axis.
    pub x_acc: i16,
    /// Acceleration, Y axis.
    pub y_acc: i16,
    /// Acceleration, Z axis.
    pub z_acc: i16,
    /// Die temperature.
    pub temp: i16,
    /// Rotation rate, X axis.
    pub x_gyro: i16,
    /// Rotation rate, Y axis.
    pub y_gyro: i16,
    /// Rotation rate, Z axis.
    pub z_gyro: i16,
}

impl MpuRawData {
    /// Decodes seven big-endian words in register order.
    pub fn from_be_bytes(bytes: &[u8; RAW_FRAME_LEN]) -> Self {
        let word = |i: usize| i16::from_be_bytes([bytes[i], bytes[i + 1]]);
        Self {
            x_acc: word(0),
            y_acc: word(2),
            z_acc: word(4),
            temp: word(6),
            x_gyro: word(8),
            y_gyro: word(10),
            z_gyro: word(12),
        }
    }

    /// Die temperature in degrees Celsius.
    #[inline]
    pub fn temperature_c(&self) -> f32 {
        temperature_c(self.temp)
    }
}

/// Readings beyond these saturate at full magnitude.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TiltBounds {
    /// Full left / full down.
    pub lower: i16,
    /// Full right / full up.
    pub upper: i16,
}

impl Default for TiltBounds {
    fn default() -> Self {
        Self {
            lower: -12000,
            upper: 12000,
        }
    }
}

/// Resting band of the X and Y axes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Calibration {
    /// Lowest resting X.
    pub min_x: i16,
    /// Highest resting X.
    pub max_x: i16,
    /// Lowest resting Y.
    pub min_y: i16,
    /// Highest resting Y.
    pub max_y: i16,
    samples: u16,
}

impl Calibration {
    /// An empty calibration; the first sample sets both ends of the band.
    pub const fn new() -> Self {
        Self {
            min_x: i16::MAX,
            max_x: i16::MIN,
            min_y: i16::MAX,
            max_y: i16::MIN,
            samples: 0,
        }
    }

    /// Widens the band to include one resting sample.
    pub fn record(&mut self, raw: &MpuRawData) {
        self.min_x = self.min_x.min(raw.x_acc);
        self.max_x = self.max_x.max(raw.x_acc);
        self.min_y = self.min_y.min(raw.y_acc);
        self.max_y = self.max_y.max(raw.y_acc);
        self.samples = self.samples.saturating_add(1);
    }

    /// Number of samples recorded so far.
    #[inline]
    pub fn samples(&self) -> u16 {
        self.samples
    }

    /// Finishes calibration by widening the band by `margin` on each side.
    ///
    /// Without any samples the band is centered on zero.
    pub fn finish(mut self, margin: i16) -> Self {
        if self.samples == 0 {
            self.min_x = 0;
            self.max_x = 0;
            self.min_y = 0;
            self.max_y = 0;
        }
        self.min_x = self.min_x.saturating_sub(margin);
        self.max_x = self.max_x.saturating_add(margin);
        self.min_y = self.min_y.saturating_sub(margin);
        self.max_y = self.max_y.saturating_add(margin);
        self
    }
}

impl Default for Calibration {
    fn default() -> Self {
        Self::new()
    }
}

/// Tilt expressed like a joystick deflection, plus temperature.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TiltReading {
    /// Tipped left (X below the band).
    pub left: u8,
    /// Tipped right (X above the band).
    pub right: u8,
    /// Tipped back (Y below the band).
    pub down: u8,
    /// Tipped forward (Y above the band).
    pub up: u8,
    /// Whole degrees Celsius, saturated to `i8`.
    pub temp: i8,
}

/// Magnitude of `value` beyond `edge`, reaching 255 at `limit`.
fn beyond(value: i16, edge: i16, limit: i16) -> u8 {
    map_range(value.into(), edge.into(), limit.into(), 0, 255).clamp(0, 255) as u8
}

impl TiltReading {
    /// Maps one raw sample against a finished calibration.
    pub fn from_raw(raw: &MpuRawData, cal: &Calibration, bounds: &TiltBounds) -> Self {
        let (left, right) = if raw.x_acc < cal.min_x {
            (beyond(raw.x_acc, cal.min_x, bounds.lower), 0)
        } else if raw.x_acc > cal.max_x {
            (0, beyond(raw.x_acc, cal.max_x, bounds.upper))
        } else {
            (0, 0)
        };
        let (down, up) = if raw.y_acc < cal.min_y {
            (beyond(raw.y_acc, cal.min_y, bounds.lower), 0)
        } else if raw.y_acc > cal.max_y {
            (0, beyond(raw.y_acc, cal.max_y, bounds.upper))
        } else {
            (0, 0)
        };

        let temp = raw.temperature_c().clamp(i8::MIN as f32, i8::MAX as f32) as i8;

        Self {
            left,
            right,
            down,
            up,
            temp,
        }
    }

    /// Wire order: left, right, down, up, temperature.
    #[inline]
    pub const fn to_bytes(&self) -> [u8; 5] {
        [self.left, self.right, self.down, self.up, self.temp as u8]
    }
}
