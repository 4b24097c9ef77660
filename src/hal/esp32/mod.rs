//! ESP32-C3 SuperMini hardware abstraction layer for the transmitter.
//!
//! # Hardware Configuration
//!
//! - **MCU**: ESP32-C3 SuperMini (RISC-V 160MHz, 4MB Flash)
//! - **Sticks**: two analog thumb joysticks on ADC1
//! - **Tilt**: MPU-6050 on the shared I2C bus
//! - **Encoder**: KY-040 rotary encoder with push button
//! - **Display**: SSD1306 128x64 OLED on the shared I2C bus
//! - **Radio**: ESP-NOW over the onboard WiFi
//!
//! # Pin Assignments
//!
//! See the [`pins`] module for GPIO assignments matching the SuperMini layout.
//!
//! The MPU-6050 and the OLED share one `I2cDriver` through `shared-bus`;
//! the sensor uses the portable [`Mpu6050`](crate::hal::Mpu6050) driver.

mod button;
mod clock;
mod encoder;
mod joystick;

pub use button::Esp32Button;
pub use clock::Esp32Clock;
pub use encoder::Esp32Encoder;
pub use joystick::Esp32Joysticks;

#[cfg(feature = "display")]
mod display;
#[cfg(feature = "display")]
pub use display::{DisplayError, Esp32Display};

#[cfg(feature = "radio")]
mod radio;
#[cfg(feature = "radio")]
pub use radio::Esp32Radio;

/// Pin assignments for SuperMini ESP32-C3.
///
/// - Joysticks on the four ADC1 pins, GPIO0-3
/// - Rotary encoder on GPIO6, 7, 10
/// - I2C bus (display and MPU-6050) on GPIO8, 9
pub mod pins {
    // =========================================================================
    // Joysticks (ADC1)
    // =========================================================================

    /// First stick, X axis
    pub const J1_X: i32 = 0;

    /// First stick, Y axis
    pub const J1_Y: i32 = 1;

    /// Second stick, X axis
    pub const J2_X: i32 = 2;

    /// Second stick, Y axis
    pub const J2_Y: i32 = 3;

    // =========================================================================
    // Rotary Encoder (KY-040)
    // =========================================================================

    /// Encoder clock/A signal, falling edge interrupt
    pub const ENC_CLK: i32 = 6;

    /// Encoder data/B signal, sampled from the interrupt
    pub const ENC_DT: i32 = 7;

    /// Encoder push button (active low)
    pub const ENC_SW: i32 = 10;

    // =========================================================================
    // I2C Bus
    // =========================================================================

    /// I2C data line (also has onboard blue LED - will flicker during I2C)
    pub const I2C_SDA: i32 = 8;

    /// I2C clock line (also shared with BOOT button - only affects programming)
    pub const I2C_SCL: i32 = 9;

    /// Default I2C address for SSD1306 OLED
    pub const OLED_I2C_ADDR: u8 = 0x3C;

    /// Default I2C address for the MPU-6050 (AD0 low)
    pub const MPU_I2C_ADDR: u8 = 0x68;
}
