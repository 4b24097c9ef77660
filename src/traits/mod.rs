//! Trait definitions for hardware abstraction.
//!
//! These let the transmitter logic run on the ESP32 or against desktop
//! mocks without change.
//!
//! # Submodules
//!
//! - `hardware`: Clock, confirm button, joysticks, accelerometer
//! - `display`: Menu display rendering
//! - `radio`: Link to the vehicle
//!
//! # Hardware Abstraction
//!
//! - [`Clock`]: Time source for `no_std` environments
//! - [`ConfirmButton`]: Encoder push button with bounded release wait
//! - [`JoystickInput`]: Raw analog stick readings
//! - [`Accelerometer`]: MPU-6050 register reads
//! - [`MenuDisplay`]: Two-row display with selector glyph
//! - [`Transmitter`]: Frame transmission and vehicle status

pub mod display;
pub mod hardware;
pub mod radio;

pub use display::*;
pub use hardware::*;
pub use radio::*;
