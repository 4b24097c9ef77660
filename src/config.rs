//! Shared configuration system for desktop and ESP32.
//!
//! Uses `heapless::String` for `no_std` compatibility while remaining
//! ergonomic to use on desktop with `std`.
//!
//! # Example
//!
//! ```rust
//! use explorer_tx::config::{Config, LoopConfig, MenuConfig};
//!
//! // Use defaults
//! let config = Config::default();
//!
//! // Or customize
//! let config = Config::default()
//!     .with_menu(MenuConfig::default().with_debounce_ms(8))
//!     .with_main_loop(LoopConfig::default().with_transmit_interval_ms(100));
//! ```

use heapless::String as HString;

use crate::accel::{TiltBounds, DEFAULT_CALIBRATION_MARGIN, DEFAULT_CALIBRATION_SAMPLES, MPU6050_ADDR};
use crate::encoder::DEFAULT_DEBOUNCE_MS;
use crate::joystick::Orientation;

/// Maximum length for short config strings (names, splash text)
pub const MAX_SHORT_STRING: usize = 32;

/// Type alias for short config strings
pub type ShortString = HString<MAX_SHORT_STRING>;

// ============================================================================
// Helper for creating heapless strings
// ============================================================================

/// Create a ShortString from a &str, truncating if too long
pub fn short_string(s: &str) -> ShortString {
    let mut hs = ShortString::new();
    let take = s.len().min(MAX_SHORT_STRING);
    // Find valid UTF-8 boundary
    let valid_end = s
        .char_indices()
        .take_while(|(i, c)| i + c.len_utf8() <= take)
        .last()
        .map(|(i, c)| i + c.len_utf8())
        .unwrap_or(0);
    let _ = hs.push_str(&s[..valid_end]);
    hs
}

// ============================================================================
// Main Config
// ============================================================================

/// Complete application configuration
#[derive(Clone, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Config {
    /// Menu navigation configuration
    pub menu: MenuConfig,
    /// Joystick configuration
    pub input: InputConfig,
    /// Tilt sensor configuration
    pub sensor: SensorConfig,
    /// Radio link configuration
    pub radio: RadioConfig,
    /// Main loop timing
    pub main_loop: LoopConfig,
    /// Device identification
    pub device: DeviceConfig,
}

impl Config {
    /// Set menu configuration
    pub fn with_menu(mut self, menu: MenuConfig) -> Self {
        self.menu = menu;
        self
    }

    /// Set joystick configuration
    pub fn with_input(mut self, input: InputConfig) -> Self {
        self.input = input;
        self
    }

    /// Set sensor configuration
    pub fn with_sensor(mut self, sensor: SensorConfig) -> Self {
        self.sensor = sensor;
        self
    }

    /// Set radio configuration
    pub fn with_radio(mut self, radio: RadioConfig) -> Self {
        self.radio = radio;
        self
    }

    /// Set main loop timing
    pub fn with_main_loop(mut self, main_loop: LoopConfig) -> Self {
        self.main_loop = main_loop;
        self
    }

    /// Set device configuration
    pub fn with_device(mut self, device: DeviceConfig) -> Self {
        self.device = device;
        self
    }
}

// ============================================================================
// Menu Config
// ============================================================================

/// Menu navigation configuration
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MenuConfig {
    /// Encoder debounce window in milliseconds, applied to the capture by
    /// [`MenuController::new`](crate::MenuController::new)
    pub debounce_ms: u32,
    /// Shift the encoder counter back when it runs past either end of a menu
    pub absorb_overshoot: bool,
    /// Longest wait for the confirm button to be released, in milliseconds
    pub release_timeout_ms: u32,
    /// How long a command acknowledgement stays on screen
    pub ack_display_ms: u32,
}

impl Default for MenuConfig {
    fn default() -> Self {
        Self {
            debounce_ms: DEFAULT_DEBOUNCE_MS,
            absorb_overshoot: true,
            release_timeout_ms: 2000,
            ack_display_ms: 1000,
        }
    }
}

impl MenuConfig {
    /// Set the debounce window
    pub fn with_debounce_ms(mut self, ms: u32) -> Self {
        self.debounce_ms = ms;
        self
    }

    /// Enable or disable overshoot absorption
    pub fn with_absorb_overshoot(mut self, absorb: bool) -> Self {
        self.absorb_overshoot = absorb;
        self
    }

    /// Set the release wait budget
    pub fn with_release_timeout_ms(mut self, ms: u32) -> Self {
        self.release_timeout_ms = ms;
        self
    }

    /// Set the acknowledgement display time
    pub fn with_ack_display_ms(mut self, ms: u32) -> Self {
        self.ack_display_ms = ms;
        self
    }
}

// ============================================================================
// Input Config
// ============================================================================

/// Joystick configuration
#[derive(Clone, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct InputConfig {
    /// Mounting of the first stick
    pub j1_orientation: Orientation,
    /// Mounting of the second stick
    pub j2_orientation: Orientation,
}

impl InputConfig {
    /// Set the first stick's orientation
    pub fn with_j1_orientation(mut self, orientation: Orientation) -> Self {
        self.j1_orientation = orientation;
        self
    }

    /// Set the second stick's orientation
    pub fn with_j2_orientation(mut self, orientation: Orientation) -> Self {
        self.j2_orientation = orientation;
        self
    }
}

// ============================================================================
// Sensor Config
// ============================================================================

/// Tilt sensor configuration
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SensorConfig {
    /// I2C address of the MPU-6050
    pub i2c_address: u8,
    /// Resting samples taken at startup
    pub calibration_samples: u16,
    /// Widening of the resting band on each side
    pub calibration_margin: i16,
    /// Readings that count as full tilt
    pub bounds: TiltBounds,
}

impl Default for SensorConfig {
    fn default() -> Self {
        Self {
            i2c_address: MPU6050_ADDR,
            calibration_samples: DEFAULT_CALIBRATION_SAMPLES,
            calibration_margin: DEFAULT_CALIBRATION_MARGIN,
            bounds: TiltBounds::default(),
        }
    }
}

impl SensorConfig {
    /// Set the I2C address
    pub fn with_i2c_address(mut self, address: u8) -> Self {
        self.i2c_address = address;
        self
    }

    /// Set the number of calibration samples
    pub fn with_calibration_samples(mut self, samples: u16) -> Self {
        self.calibration_samples = samples;
        self
    }

    /// Set the calibration margin (negative values are treated as zero)
    pub fn with_calibration_margin(mut self, margin: i16) -> Self {
        self.calibration_margin = margin.max(0);
        self
    }

    /// Set the saturation bounds
    pub fn with_bounds(mut self, lower: i16, upper: i16) -> Self {
        self.bounds = TiltBounds { lower, upper };
        self
    }
}

// ============================================================================
// Radio Config
// ============================================================================

/// Radio link configuration
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RadioConfig {
    /// MAC address of the vehicle (broadcast until paired)
    pub peer_mac: [u8; 6],
    /// WiFi channel shared with the vehicle
    pub channel: u8,
    /// Whether the radio is enabled
    pub enabled: bool,
}

impl Default for RadioConfig {
    fn default() -> Self {
        Self {
            peer_mac: [0xFF; 6],
            channel: 1,
            enabled: true,
        }
    }
}

impl RadioConfig {
    /// Set the vehicle's MAC address
    pub fn with_peer_mac(mut self, mac: [u8; 6]) -> Self {
        self.peer_mac = mac;
        self
    }

    /// Set the channel (clamped to 1..=13)
    pub fn with_channel(mut self, channel: u8) -> Self {
        self.channel = channel.clamp(1, 13);
        self
    }

    /// Enable or disable the radio
    pub fn with_enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    /// Check if the peer is the broadcast address
    pub fn is_broadcast(&self) -> bool {
        self.peer_mac == [0xFF; 6]
    }
}

// ============================================================================
// Loop Config
// ============================================================================

/// Main loop timing
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LoopConfig {
    /// Sleep between loop iterations in milliseconds
    pub tick_interval_ms: u32,
    /// Interval between radio frames in milliseconds
    pub transmit_interval_ms: u32,
}

impl Default for LoopConfig {
    fn default() -> Self {
        Self {
            tick_interval_ms: 5,
            transmit_interval_ms: 50,
        }
    }
}

impl LoopConfig {
    /// Set the tick interval
    pub fn with_tick_interval_ms(mut self, ms: u32) -> Self {
        self.tick_interval_ms = ms;
        self
    }

    /// Set the transmit interval (at least 1ms)
    pub fn with_transmit_interval_ms(mut self, ms: u32) -> Self {
        self.transmit_interval_ms = ms.max(1);
        self
    }
}

// ============================================================================
// Device Config
// ============================================================================

/// Device identification configuration
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DeviceConfig {
    /// Human-readable device name
    pub name: ShortString,
    /// First splash screen line
    pub splash_title: ShortString,
    /// Second splash screen line
    pub splash_subtitle: ShortString,
}

impl Default for DeviceConfig {
    fn default() -> Self {
        Self {
            name: short_string("explorer-tx"),
            splash_title: short_string("EXP. VEHICLE"),
            splash_subtitle: short_string("TRANSMITTER"),
        }
    }
}

impl DeviceConfig {
    /// Set the device name
    pub fn with_name(mut self, name: &str) -> Self {
        self.name = short_string(name);
        self
    }

    /// Set the splash screen text
    pub fn with_splash(mut self, title: &str, subtitle: &str) -> Self {
        self.splash_title = short_string(title);
        self.splash_subtitle = short_string(subtitle);
        self
    }
}

// ============================================================================
// Tests
// ============================================================================
