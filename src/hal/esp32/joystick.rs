//! Two analog joysticks on ESP32 ADC1.
//!
//! # Wiring
//!
//! - J1 VRx → GPIO0, J1 VRy → GPIO1
//! - J2 VRx → GPIO2, J2 VRy → GPIO3
//! - VCC → 3.3V
//! - GND → GND
//!
//! The ADC reads 12 bits; values are scaled to the 10-bit range the stick
//! processing expects.

use crate::joystick::{RawAxes, Stick};
use crate::traits::JoystickInput;
use esp_idf_hal::adc::attenuation::DB_11;
use esp_idf_hal::adc::oneshot::config::AdcChannelConfig;
use esp_idf_hal::adc::oneshot::{AdcChannelDriver, AdcDriver};
use esp_idf_hal::adc::ADC1;
use esp_idf_hal::gpio::ADCPin;
use esp_idf_hal::peripheral::Peripheral;
use esp_idf_hal::sys::EspError;

type Channel<'d, P> = AdcChannelDriver<'d, P, &'d AdcDriver<'d, ADC1>>;

/// Both sticks, one oneshot ADC channel per axis.
///
/// # Example
///
/// ```ignore
/// use explorer_tx::hal::esp32::Esp32Joysticks;
/// use explorer_tx::traits::JoystickInput;
/// use explorer_tx::Stick;
///
/// let adc1 = AdcDriver::new(peripherals.adc1)?;
/// let mut sticks = Esp32Joysticks::new(
///     &adc1,
///     peripherals.pins.gpio0,
///     peripherals.pins.gpio1,
///     peripherals.pins.gpio2,
///     peripherals.pins.gpio3,
/// )?;
/// let raw = sticks.read(Stick::First)?;
/// ```
pub struct Esp32Joysticks<'d, X1, Y1, X2, Y2>
where
    X1: ADCPin<Adc = ADC1>,
    Y1: ADCPin<Adc = ADC1>,
    X2: ADCPin<Adc = ADC1>,
    Y2: ADCPin<Adc = ADC1>,
{
    j1_x: Channel<'d, X1>,
    j1_y: Channel<'d, Y1>,
    j2_x: Channel<'d, X2>,
    j2_y: Channel<'d, Y2>,
}

impl<'d, X1, Y1, X2, Y2> Esp32Joysticks<'d, X1, Y1, X2, Y2>
where
    X1: ADCPin<Adc = ADC1>,
    Y1: ADCPin<Adc = ADC1>,
    X2: ADCPin<Adc = ADC1>,
    Y2: ADCPin<Adc = ADC1>,
{
    /// Creates the four channels with full-scale (11dB) attenuation.
    ///
    /// # Errors
    ///
    /// Returns an error if any ADC channel fails to initialize.
    pub fn new(
        adc: &'d AdcDriver<'d, ADC1>,
        j1_x: impl Peripheral<P = X1> + 'd,
        j1_y: impl Peripheral<P = Y1> + 'd,
        j2_x: impl Peripheral<P = X2> + 'd,
        j2_y: impl Peripheral<P = Y2> + 'd,
    ) -> Result<Self, EspError> {
        let config = AdcChannelConfig {
            attenuation: DB_11,
            ..Default::default()
        };
        Ok(Self {
            j1_x: AdcChannelDriver::new(adc, j1_x, &config)?,
            j1_y: AdcChannelDriver::new(adc, j1_y, &config)?,
            j2_x: AdcChannelDriver::new(adc, j2_x, &config)?,
            j2_y: AdcChannelDriver::new(adc, j2_y, &config)?,
        })
    }
}

impl<X1, Y1, X2, Y2> JoystickInput for Esp32Joysticks<'_, X1, Y1, X2, Y2>
where
    X1: ADCPin<Adc = ADC1>,
    Y1: ADCPin<Adc = ADC1>,
    X2: ADCPin<Adc = ADC1>,
    Y2: ADCPin<Adc = ADC1>,
{
    type Error = EspError;

    fn read(&mut self, stick: Stick) -> Result<RawAxes, Self::Error> {
        let (x, y) = match stick {
            Stick::First => (self.j1_x.read()?, self.j1_y.read()?),
            Stick::Second => (self.j2_x.read()?, self.j2_y.read()?),
        };
        Ok(RawAxes::from_12bit(x, y))
    }
}
