//! Interrupt-driven KY-040 rotary encoder for ESP32.
//!
//! The CLK line raises a falling-edge interrupt; the handler samples DT,
//! hands both to a static [`EncoderCapture`], which does the debouncing,
//! and re-enables the interrupt before returning.
//! The push button is read separately through [`Esp32Button`](super::Esp32Button).
//!
//! # Wiring
//!
//! - CLK (A) → GPIO6
//! - DT (B) → GPIO7
//! - VCC → 3.3V
//! - GND → GND

use super::clock::isr_now_ms;
use crate::encoder::EncoderCapture;
use esp_idf_hal::gpio::{Input, InputPin, InterruptType, OutputPin, PinDriver, Pull};
use esp_idf_hal::peripheral::Peripheral;
use esp_idf_hal::sys::EspError;
use log::info;

/// KY-040 rotary encoder feeding an [`EncoderCapture`] from its interrupt.
///
/// ESP-IDF disables a GPIO interrupt each time it fires. The handler turns
/// it back on itself, so detents keep counting while the main loop is
/// blocked (e.g. in the confirm button's release wait).
/// [`rearm`](Self::rearm) stays available for the main loop as well.
///
/// # Example
///
/// ```ignore
/// use explorer_tx::hal::esp32::Esp32Encoder;
/// use explorer_tx::EncoderCapture;
///
/// static ENCODER: EncoderCapture = EncoderCapture::new(5);
///
/// let peripherals = Peripherals::take()?;
/// let mut encoder = Esp32Encoder::new(
///     peripherals.pins.gpio6, // CLK
///     peripherals.pins.gpio7, // DT
///     &ENCODER,
/// )?;
///
/// loop {
///     encoder.rearm()?;
///     println!("position: {}", ENCODER.current_position());
/// }
/// ```
pub struct Esp32Encoder<'d, CLK, DT>
where
    CLK: InputPin + OutputPin,
    DT: InputPin + OutputPin,
{
    /// Clock (A) signal, interrupt source
    clk: PinDriver<'d, CLK, Input>,
    /// Data (B) signal, kept configured with its pull-up
    _dt: PinDriver<'d, DT, Input>,
}

impl<'d, CLK, DT> Esp32Encoder<'d, CLK, DT>
where
    CLK: InputPin + OutputPin,
    DT: InputPin + OutputPin,
{
    /// Configures both lines with pull-ups and subscribes the CLK interrupt.
    ///
    /// # Errors
    ///
    /// Returns an error if GPIO configuration or interrupt registration fails.
    pub fn new(
        clk_pin: impl Peripheral<P = CLK> + 'd,
        dt_pin: impl Peripheral<P = DT> + 'd,
        capture: &'static EncoderCapture,
    ) -> Result<Self, EspError> {
        let mut clk = PinDriver::input(clk_pin)?;
        clk.set_pull(Pull::Up)?;
        clk.set_interrupt_type(InterruptType::NegEdge)?;

        let mut dt = PinDriver::input(dt_pin)?;
        dt.set_pull(Pull::Up)?;
        let dt_gpio = dt.pin();
        let clk_gpio = clk.pin();

        // Runs in interrupt context: no allocation, no logging, no locks.
        unsafe {
            clk.subscribe(move || {
                let data_high = esp_idf_hal::sys::gpio_get_level(dt_gpio) != 0;
                capture.on_edge(data_high, isr_now_ms());
                esp_idf_hal::sys::gpio_intr_enable(clk_gpio);
            })?;
        }
        clk.enable_interrupt()?;

        info!(
            "encoder: CLK gpio{} DT gpio{}, debounce {}ms",
            clk_gpio,
            dt_gpio,
            capture.debounce_ms()
        );
        Ok(Self { clk, _dt: dt })
    }

    /// Re-enables the CLK interrupt in case the handler did not.
    #[inline]
    pub fn rearm(&mut self) -> Result<(), EspError> {
        self.clk.enable_interrupt()
    }
}
