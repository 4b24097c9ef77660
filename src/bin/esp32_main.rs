//! ESP32-C3 SuperMini transmitter for the exploration vehicle.
//!
//! This is the main entry point for the handheld unit. Each loop iteration:
//! - Samples both joysticks and the tilt sensor
//! - Runs the encoder-driven menu and redraws the display when needed
//! - Sends the data package to the vehicle over ESP-NOW every transmit interval
//!
//! The encoder's CLK interrupt feeds the static [`ENCODER`] capture and
//! re-enables itself; the loop re-arms it as well in case an edge was missed.
//! The MPU-6050 and the OLED share the I2C driver through `shared-bus`.
//!
//! # Build
//!
//! ```bash
//! # Transmitter with serial-console menu
//! cargo build --release --features radio
//!
//! # With the OLED
//! cargo build --release --features esp32-full
//! ```

use esp_idf_hal::adc::oneshot::AdcDriver;
use esp_idf_hal::delay::FreeRtos;
use esp_idf_hal::gpio::{PinDriver, Pull};
use esp_idf_hal::i2c::{I2cConfig, I2cDriver};
use esp_idf_hal::peripherals::Peripherals;
use esp_idf_hal::prelude::*;
use esp_idf_svc::eventloop::EspSystemEventLoop;
use esp_idf_svc::nvs::EspDefaultNvsPartition;
use explorer_tx::encoder::DEFAULT_DEBOUNCE_MS;
use explorer_tx::hal::esp32::{
    pins, Esp32Button, Esp32Clock, Esp32Encoder, Esp32Joysticks, Esp32Radio,
};
use explorer_tx::hal::Mpu6050;
use explorer_tx::traits::Clock;
use explorer_tx::{Config, EncoderCapture, MenuController, MenuTree, TxUnit};
use log::{error, info, warn};
use std::thread;
use std::time::Duration;

/// Position counter shared with the encoder interrupt.
static ENCODER: EncoderCapture = EncoderCapture::new(DEFAULT_DEBOUNCE_MS);

/// Consecutive tick errors logged before going quiet.
const MAX_LOGGED_ERRORS: u32 = 10;

fn main() -> anyhow::Result<()> {
    // Initialize ESP-IDF
    esp_idf_hal::sys::link_patches();
    esp_idf_svc::log::EspLogger::initialize_default();

    // =========================================================================
    // Configuration
    // =========================================================================
    let config = Config::default();
    info!("{} starting", config.device.name);

    let peripherals = Peripherals::take()?;
    let sysloop = EspSystemEventLoop::take()?;
    let nvs = EspDefaultNvsPartition::take()?;

    // =========================================================================
    // Encoder (KY-040 on GPIO6/7/10)
    // =========================================================================
    let mut encoder = Esp32Encoder::new(peripherals.pins.gpio6, peripherals.pins.gpio7, &ENCODER)?;

    let mut sw = PinDriver::input(peripherals.pins.gpio10)?;
    sw.set_pull(Pull::Up)?;
    let button = Esp32Button::new(sw, FreeRtos);
    info!("[OK] Encoder initialized (GPIO6/7/10)");

    // =========================================================================
    // Joysticks (ADC1 on GPIO0-3)
    // =========================================================================
    let adc1 = AdcDriver::new(peripherals.adc1)?;
    let joysticks = Esp32Joysticks::new(
        &adc1,
        peripherals.pins.gpio0,
        peripherals.pins.gpio1,
        peripherals.pins.gpio2,
        peripherals.pins.gpio3,
    )?;
    info!("[OK] Joysticks initialized (GPIO0-3 ADC)");

    // =========================================================================
    // I2C bus (MPU-6050, SSD1306 on GPIO8/9)
    // =========================================================================
    let i2c = I2cDriver::new(
        peripherals.i2c0,
        peripherals.pins.gpio8, // SDA
        peripherals.pins.gpio9, // SCL
        &I2cConfig::new().baudrate(400.kHz().into()),
    )?;
    let bus = shared_bus::new_std!(I2cDriver<'static> = i2c)
        .ok_or_else(|| anyhow::anyhow!("I2C bus manager already created"))?;
    let accel = Mpu6050::new(bus.acquire_i2c(), config.sensor.i2c_address);
    info!(
        "[OK] I2C bus up (GPIO8/9), MPU-6050 at {:#04x}, OLED at {:#04x}",
        config.sensor.i2c_address,
        pins::OLED_I2C_ADDR
    );

    #[cfg(feature = "display")]
    let display = explorer_tx::hal::esp32::Esp32Display::new(bus.acquire_i2c())
        .map_err(|e| anyhow::anyhow!("Display init failed: {:?}", e))?;

    #[cfg(not(feature = "display"))]
    let display = explorer_tx::hal::SerialDisplay::new();

    // =========================================================================
    // Radio (ESP-NOW)
    // =========================================================================
    let radio = Esp32Radio::new(peripherals.modem, sysloop, Some(nvs), &config.radio)?;
    info!("[OK] Radio initialized (channel {})", config.radio.channel);

    // =========================================================================
    // Assemble and start
    // =========================================================================
    let menu = MenuController::new(MenuTree::standard(), &ENCODER, button, config.menu.clone());
    let tick_interval = Duration::from_millis(u64::from(config.main_loop.tick_interval_ms));
    let mut unit = TxUnit::new(menu, joysticks, accel, display, radio, config);

    info!("Hold the unit level: calibrating tilt sensor...");
    unit.start()
        .map_err(|e| anyhow::anyhow!("Start failed: {}", e))?;

    // =========================================================================
    // Main Loop
    // =========================================================================
    let clock = Esp32Clock::new();
    let mut consecutive_errors: u32 = 0;

    loop {
        if let Err(e) = encoder.rearm() {
            warn!("encoder re-arm failed: {:?}", e);
        }

        match unit.tick(clock.now_ms()) {
            Ok(report) => {
                if report.command.is_some() {
                    info!("menu: {:?}", report.command);
                }
                consecutive_errors = 0;
            }
            Err(e) => {
                consecutive_errors = consecutive_errors.saturating_add(1);
                if consecutive_errors <= MAX_LOGGED_ERRORS {
                    error!("tick failed: {}", e);
                }
            }
        }

        // Sleep until next tick
        thread::sleep(tick_interval);
    }
}
