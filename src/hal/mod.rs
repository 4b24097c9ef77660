//! Hardware Abstraction Layer implementations.
//!
//! This module contains concrete implementations of the traits
//! defined in [`crate::traits`] for various platforms.
//!
//! # Available Implementations
//!
//! - `mock`: Test implementations for desktop development
//! - `mpu6050`: The tilt sensor over any blocking I2C bus
//! - `serial`: A [`MenuDisplay`](crate::traits::MenuDisplay) that logs frames
//! - `esp32`: ESP32-C3 SuperMini transmitter hardware (requires `esp32` feature)

pub mod mock;
pub mod mpu6050;
pub mod serial;

#[cfg(feature = "esp32")]
pub mod esp32;

pub use mock::*;
pub use mpu6050::Mpu6050;
pub use serial::SerialDisplay;

#[cfg(feature = "esp32")]
pub use esp32::*;
