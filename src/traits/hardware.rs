//! Hardware abstraction traits for the transmitter's inputs.
//!
//! # Key Traits
//!
//! | Trait | Purpose |
//! |-------|---------|
//! | [`Clock`] | Monotonic millisecond time source |
//! | [`ConfirmButton`] | Encoder push button (active low) |
//! | [`JoystickInput`] | Two analog sticks |
//! | [`Accelerometer`] | MPU-6050 register burst |
//!
//! The rotary encoder itself has no trait: its interrupt feeds an
//! [`EncoderCapture`](crate::EncoderCapture) directly.
//!
//! # Implementation
//!
//! For testing and desktop development, use the mock implementations
//! from [`crate::hal::mock`]. For ESP32 hardware, use the
//! implementations from `hal::esp32` (requires `esp32` feature).
//!
//! # Example
//!
//! ```rust
//! use explorer_tx::traits::ConfirmButton;
//! use explorer_tx::hal::MockButton;
//!
//! let mut button = MockButton::new();
//! button.hold_for(2);
//! assert!(button.is_pressed());
//! assert!(button.wait_for_release(10));
//! assert!(!button.is_pressed());
//! ```

use crate::accel::MpuRawData;
use crate::joystick::{RawAxes, Stick};

/// Time source trait for `no_std` compatibility.
///
/// # Example
///
/// ```rust
/// use explorer_tx::traits::Clock;
/// use explorer_tx::hal::MockClock;
///
/// let mut clock = MockClock::new();
/// assert_eq!(clock.now_ms(), 0);
///
/// clock.advance(100);
/// assert_eq!(clock.now_ms(), 100);
/// ```
pub trait Clock {
    /// Returns current time in milliseconds since an arbitrary epoch.
    ///
    /// Must be monotonically increasing.
    fn now_ms(&self) -> u64;
}

/// The confirm push button on the encoder shaft.
///
/// Wired active low with a pull-up, so "pressed" means the line reads low.
/// Implementations report the logical state.
pub trait ConfirmButton {
    /// Returns true while the button is held down.
    fn is_pressed(&mut self) -> bool;

    /// Blocks until the button is released or the budget runs out.
    ///
    /// Returns true if the button was seen released. Interrupts stay
    /// enabled while waiting, so encoder edges keep being counted.
    ///
    /// The default implementation polls up to `timeout_ms` times without
    /// pausing between polls. Implementations with a delay source should
    /// override it to poll on a real millisecond schedule.
    fn wait_for_release(&mut self, timeout_ms: u32) -> bool {
        for _ in 0..timeout_ms {
            if !self.is_pressed() {
                return true;
            }
        }
        !self.is_pressed()
    }
}

/// The two analog sticks.
pub trait JoystickInput {
    /// Error type for ADC reads.
    type Error;

    /// Reads both axes of one stick on the 10-bit scale.
    fn read(&mut self, stick: Stick) -> Result<RawAxes, Self::Error>;
}

/// Motion sensor providing the raw MPU-6050 register burst.
pub trait Accelerometer {
    /// Error type for bus operations.
    type Error;

    /// Wakes the sensor. Called once before the first read.
    fn init(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }

    /// Reads accel, temperature and gyro registers.
    fn read_raw(&mut self) -> Result<MpuRawData, Self::Error>;
}

#[cfg(test)]
mod tests {
    use super::*;

    // =========================================================================
    // ConfirmButton Default Methods Tests
    // =========================================================================

    struct CountdownButton {
        held_polls: u32,
        polls: u32,
    }

    impl ConfirmButton for CountdownButton {
        fn is_pressed(&mut self) -> bool {
            self.polls += 1;
            if self.held_polls == 0 {
                false
            } else {
                self.held_polls -= 1;
                true
            }
        }
    }

    #[test]
    fn wait_for_release_returns_once_released() {
        let mut button = CountdownButton {
            held_polls: 3,
            polls: 0,
        };
        assert!(button.wait_for_release(100));
        assert_eq!(button.polls, 4);
    }

    #[test]
    fn wait_for_release_is_bounded() {
        let mut button = CountdownButton {
            held_polls: u32::MAX,
            polls: 0,
        };
        assert!(!button.wait_for_release(50));
        assert_eq!(button.polls, 51);
    }

    #[test]
    fn wait_for_release_with_zero_budget_checks_once() {
        let mut button = CountdownButton {
            held_polls: 0,
            polls: 0,
        };
        assert!(button.wait_for_release(0));
        assert_eq!(button.polls, 1);
    }

    // =========================================================================
    // Accelerometer Default Methods Tests
    // =========================================================================

    struct FixedMpu;

    impl Accelerometer for FixedMpu {
        type Error = ();

        fn read_raw(&mut self) -> Result<MpuRawData, ()> {
            Ok(MpuRawData::default())
        }
    }

    #[test]
    fn accelerometer_init_default_succeeds() {
        let mut mpu = FixedMpu;
        assert_eq!(mpu.init(), Ok(()));
        assert_eq!(mpu.read_raw(), Ok(MpuRawData::default()));
    }
}
