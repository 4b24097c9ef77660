//! Radio payloads.
//!
//! The transmitter sends one [`DataPackage`] per transmit interval. It
//! carries both sticks, the tilt reading, and the menu command byte:
//!
//! | Offset | Bytes | Field |
//! |--------|-------|-------|
//! | 0 | 4 | first stick: left, right, down, up |
//! | 4 | 4 | second stick: left, right, down, up |
//! | 8 | 5 | tilt: left, right, down, up, temperature (`i8`) |
//! | 13 | 1 | `menu_select` ([`Command`] code) |
//!
//! The vehicle may answer with a [`VehicleStatus`], which feeds the
//! vehicle data view.
//!
//! # Example
//!
//! ```rust
//! use explorer_tx::{Command, DataPackage};
//!
//! let mut pkg = DataPackage::default();
//! pkg.latch(Command::LightsOn);
//! assert_eq!(pkg.to_bytes()[13], 4);
//!
//! // Sent once, then back to no command
//! pkg.mark_sent();
//! assert_eq!(pkg.menu_select, Command::None);
//! ```

use crate::accel::TiltReading;
use crate::commands::Command;
use crate::joystick::JoystickReading;

/// Encoded size of a [`DataPackage`].
pub const PACKAGE_LEN: usize = 14;
/// Encoded size of a [`VehicleStatus`].
pub const STATUS_LEN: usize = 3;

/// Everything the vehicle needs from the transmitter in one frame.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DataPackage {
    /// First stick.
    pub j1: JoystickReading,
    /// Second stick.
    pub j2: JoystickReading,
    /// Tilt and temperature.
    pub mpu: TiltReading,
    /// Pending menu command.
    pub menu_select: Command,
}

impl DataPackage {
    /// Latches a confirmed command until the next transmission.
    ///
    /// [`Command::None`] never overwrites a pending command. A second real
    /// command replaces the first; returns the one it replaced, if any.
    pub fn latch(&mut self, command: Command) -> Option<Command> {
        if !command.is_some() {
            return None;
        }
        let previous = self.menu_select;
        self.menu_select = command;
        previous.is_some().then_some(previous)
    }

    /// Clears the command once the frame carrying it has been sent.
    #[inline]
    pub fn mark_sent(&mut self) {
        self.menu_select = Command::None;
    }

    /// Encodes the frame in field order.
    pub fn to_bytes(&self) -> [u8; PACKAGE_LEN] {
        let mut out = [0u8; PACKAGE_LEN];
        out[0..4].copy_from_slice(&self.j1.to_bytes());
        out[4..8].copy_from_slice(&self.j2.to_bytes());
        out[8..13].copy_from_slice(&self.mpu.to_bytes());
        out[13] = self.menu_select.code();
        out
    }

    /// Decodes a frame. Returns `None` for an unknown command code.
    pub fn from_bytes(bytes: &[u8; PACKAGE_LEN]) -> Option<Self> {
        let stick = |o: usize| JoystickReading {
            left: bytes[o],
            right: bytes[o + 1],
            down: bytes[o + 2],
            up: bytes[o + 3],
        };
        Some(Self {
            j1: stick(0),
            j2: stick(4),
            mpu: TiltReading {
                left: bytes[8],
                right: bytes[9],
                down: bytes[10],
                up: bytes[11],
                temp: bytes[12] as i8,
            },
            menu_select: Command::from_code(bytes[13])?,
        })
    }
}

/// Report sent back by the vehicle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VehicleStatus {
    /// Whole degrees Celsius.
    pub temperature_c: i16,
    /// Battery level, `0..=100`.
    pub battery_pct: u8,
}

impl VehicleStatus {
    /// Decodes `[temp_hi, temp_lo, battery]`.
    ///
    /// Returns `None` for short frames or a battery level over 100.
    pub fn from_bytes(bytes: &[u8]) -> Option<Self> {
        let frame: &[u8; STATUS_LEN] = bytes.get(..STATUS_LEN)?.try_into().ok()?;
        let battery_pct = frame[2];
        if battery_pct > 100 {
            return None;
        }
        Some(Self {
            temperature_c: i16::from_be_bytes([frame[0], frame[1]]),
            battery_pct,
        })
    }

    /// Encodes as `[temp_hi, temp_lo, battery]`.
    pub fn to_bytes(&self) -> [u8; STATUS_LEN] {
        let [hi, lo] = self.temperature_c.to_be_bytes();
        [hi, lo, self.battery_pct]
    }
}
