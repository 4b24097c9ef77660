//! Encoder push button on a GPIO input.
//!
//! Generic over the embedded-hal 1.0 traits so any pin driver with a
//! millisecond delay source can back it.

use crate::traits::ConfirmButton;
use embedded_hal::delay::DelayNs;
use embedded_hal::digital::InputPin;
use log::warn;

/// Active-low push button with a pull-up.
///
/// ```ignore
/// use esp_idf_hal::delay::FreeRtos;
/// use esp_idf_hal::gpio::{PinDriver, Pull};
/// use explorer_tx::hal::esp32::Esp32Button;
///
/// let mut sw = PinDriver::input(peripherals.pins.gpio10)?;
/// sw.set_pull(Pull::Up)?;
/// let button = Esp32Button::new(sw, FreeRtos);
/// ```
pub struct Esp32Button<P, D> {
    pin: P,
    delay: D,
}

impl<P, D> Esp32Button<P, D>
where
    P: InputPin,
    D: DelayNs,
{
    /// Wraps a configured input pin.
    pub fn new(pin: P, delay: D) -> Self {
        Self { pin, delay }
    }

    /// Releases the pin and delay source.
    pub fn into_inner(self) -> (P, D) {
        (self.pin, self.delay)
    }
}

impl<P, D> ConfirmButton for Esp32Button<P, D>
where
    P: InputPin,
    D: DelayNs,
{
    fn is_pressed(&mut self) -> bool {
        match self.pin.is_low() {
            Ok(low) => low,
            Err(e) => {
                warn!("button: read failed: {:?}", e);
                false
            }
        }
    }

    fn wait_for_release(&mut self, timeout_ms: u32) -> bool {
        for _ in 0..timeout_ms {
            if !self.is_pressed() {
                return true;
            }
            self.delay.delay_ms(1);
        }
        !self.is_pressed()
    }
}
