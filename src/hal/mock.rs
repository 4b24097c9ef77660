//! Mock implementations for testing without hardware.
//!
//! This module provides test doubles for all hardware traits, enabling
//! development and testing on desktop without physical hardware.
//!
//! # Available Mocks
//!
//! | Mock | Trait | Purpose |
//! |------|-------|---------|
//! | [`MockClock`] | [`Clock`] | Controllable time source |
//! | [`MockButton`] | [`ConfirmButton`] | Scripted press / hold / release |
//! | [`MockJoystick`] | [`JoystickInput`] | Settable raw axes per stick |
//! | [`MockAccelerometer`] | [`Accelerometer`] | Settable register burst |
//! | [`MockDisplay`] | [`MenuDisplay`] | Records renders and messages |
//! | [`MockRadio`] | [`Transmitter`] | Records frames, injects status |
//!
//! # Example
//!
//! ```rust
//! use explorer_tx::{EncoderCapture, MenuController, MenuNode, MenuTree, Telemetry};
//! use explorer_tx::config::MenuConfig;
//! use explorer_tx::hal::MockButton;
//!
//! let encoder = EncoderCapture::default();
//! let mut menu = MenuController::new(
//!     MenuTree::standard(),
//!     &encoder,
//!     MockButton::new(),
//!     MenuConfig::default(),
//! );
//!
//! // First poll draws the main menu
//! assert!(menu.poll(&Telemetry::default()).render.is_some());
//!
//! // Press on VEHICLE DATA
//! menu.button_mut().click();
//! menu.poll(&Telemetry::default());
//! assert_eq!(menu.node(), MenuNode::VehicleDataSubmenu);
//! ```
//!
//! [`Clock`]: crate::traits::Clock
//! [`ConfirmButton`]: crate::traits::ConfirmButton
//! [`JoystickInput`]: crate::traits::JoystickInput
//! [`Accelerometer`]: crate::traits::Accelerometer
//! [`MenuDisplay`]: crate::traits::MenuDisplay
//! [`Transmitter`]: crate::traits::Transmitter

extern crate alloc;
use alloc::string::String;
use alloc::vec::Vec;

use crate::accel::MpuRawData;
use crate::joystick::{RawAxes, Stick};
use crate::packet::VehicleStatus;
use crate::render::RenderInstruction;
use crate::traits::{Accelerometer, Clock, ConfirmButton, JoystickInput, MenuDisplay, Transmitter};

// ============================================================================
// Hardware Mocks
// ============================================================================

/// Mock clock for testing.
///
/// # Example
///
/// ```rust
/// use explorer_tx::hal::MockClock;
/// use explorer_tx::traits::Clock;
///
/// let mut clock = MockClock::new();
/// clock.set(1000);
/// clock.advance(500);
/// assert_eq!(clock.now_ms(), 1500);
/// ```
#[derive(Debug)]
pub struct MockClock {
    current_ms: u64,
}

impl MockClock {
    /// Creates a new mock clock starting at 0ms.
    pub fn new() -> Self {
        Self { current_ms: 0 }
    }

    /// Sets the current time in milliseconds.
    pub fn set(&mut self, ms: u64) {
        self.current_ms = ms;
    }

    /// Advances the clock by the given duration.
    pub fn advance(&mut self, ms: u64) {
        self.current_ms += ms;
    }
}

impl Default for MockClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for MockClock {
    fn now_ms(&self) -> u64 {
        self.current_ms
    }
}

/// Mock confirm button.
///
/// The button is held for a number of polls, then reads released. A
/// `click` is a press seen by exactly one poll.
///
/// # Example
///
/// ```rust
/// use explorer_tx::hal::MockButton;
/// use explorer_tx::traits::ConfirmButton;
///
/// let mut button = MockButton::new();
/// button.click();
/// assert!(button.is_pressed());
/// assert!(!button.is_pressed());
///
/// button.hold();
/// assert!(!button.wait_for_release(20)); // Stuck down
/// button.release();
/// assert!(button.wait_for_release(20));
/// ```
#[derive(Debug, Default)]
pub struct MockButton {
    /// Remaining polls that read pressed.
    pub held_polls: u32,
    /// Held down until released.
    pub stuck: bool,
    /// Total `is_pressed` calls.
    pub poll_count: usize,
    /// Total `wait_for_release` calls.
    pub wait_count: usize,
}

impl MockButton {
    /// Creates a released button.
    pub fn new() -> Self {
        Self::default()
    }

    /// Pressed for exactly the next poll.
    pub fn click(&mut self) {
        self.held_polls = 1;
    }

    /// Pressed for the next `polls` polls.
    pub fn hold_for(&mut self, polls: u32) {
        self.held_polls = polls;
    }

    /// Pressed until [`release`](Self::release).
    pub fn hold(&mut self) {
        self.stuck = true;
    }

    /// Releases a held button.
    pub fn release(&mut self) {
        self.stuck = false;
        self.held_polls = 0;
    }
}

impl ConfirmButton for MockButton {
    fn is_pressed(&mut self) -> bool {
        self.poll_count += 1;
        if self.stuck {
            return true;
        }
        if self.held_polls > 0 {
            self.held_polls -= 1;
            return true;
        }
        false
    }

    fn wait_for_release(&mut self, timeout_ms: u32) -> bool {
        self.wait_count += 1;
        for _ in 0..timeout_ms {
            if !self.is_pressed() {
                return true;
            }
        }
        !self.is_pressed()
    }
}

/// Mock joysticks with settable raw readings.
///
/// # Example
///
/// ```rust
/// use explorer_tx::hal::MockJoystick;
/// use explorer_tx::traits::JoystickInput;
/// use explorer_tx::{RawAxes, Stick};
///
/// let mut sticks = MockJoystick::new();
/// sticks.first = RawAxes { x: 0, y: 1023 };
/// assert_eq!(sticks.read(Stick::First).unwrap().x, 0);
/// assert_eq!(sticks.read(Stick::Second).unwrap(), RawAxes::CENTER);
/// ```
#[derive(Debug)]
pub struct MockJoystick {
    /// First stick readings.
    pub first: RawAxes,
    /// Second stick readings.
    pub second: RawAxes,
    /// When true, every read fails.
    pub fail: bool,
    /// Number of successful reads.
    pub read_count: usize,
}

impl MockJoystick {
    /// Creates sticks at rest.
    pub fn new() -> Self {
        Self {
            first: RawAxes::CENTER,
            second: RawAxes::CENTER,
            fail: false,
            read_count: 0,
        }
    }
}

impl Default for MockJoystick {
    fn default() -> Self {
        Self::new()
    }
}

impl JoystickInput for MockJoystick {
    type Error = ();

    fn read(&mut self, stick: Stick) -> Result<RawAxes, ()> {
        if self.fail {
            return Err(());
        }
        self.read_count += 1;
        Ok(match stick {
            Stick::First => self.first,
            Stick::Second => self.second,
        })
    }
}

/// Mock MPU-6050 returning a settable sample.
#[derive(Debug, Default)]
pub struct MockAccelerometer {
    /// Sample returned by every read.
    pub sample: MpuRawData,
    /// Whether init() was called.
    pub initialized: bool,
    /// When true, every read fails.
    pub fail: bool,
    /// Number of successful reads.
    pub read_count: usize,
}

impl MockAccelerometer {
    /// Creates a level, room-temperature sensor.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a sensor returning `sample`.
    pub fn with_sample(mut self, sample: MpuRawData) -> Self {
        self.sample = sample;
        self
    }
}

impl Accelerometer for MockAccelerometer {
    type Error = ();

    fn init(&mut self) -> Result<(), ()> {
        self.initialized = true;
        Ok(())
    }

    fn read_raw(&mut self) -> Result<MpuRawData, ()> {
        if self.fail {
            return Err(());
        }
        self.read_count += 1;
        Ok(self.sample)
    }
}

/// Mock display for testing.
///
/// # Example
///
/// ```rust
/// use explorer_tx::hal::MockDisplay;
/// use explorer_tx::traits::MenuDisplay;
///
/// let mut display = MockDisplay::new();
/// display.init().unwrap();
/// display.show_message("HELLO", None).unwrap();
/// assert_eq!(display.render_count, 0);
/// assert_eq!(display.last_message, Some(("HELLO".into(), None)));
/// ```
#[derive(Debug, Default)]
pub struct MockDisplay {
    /// The last instruction that was rendered.
    pub last_render: Option<RenderInstruction>,
    /// Number of times render() was called.
    pub render_count: usize,
    /// Last message shown via show_message().
    pub last_message: Option<(String, Option<String>)>,
    /// Every message shown, oldest first.
    pub messages: Vec<(String, Option<String>)>,
    /// Whether init() was called.
    pub initialized: bool,
    /// When true, every draw fails.
    pub fail: bool,
}

impl MockDisplay {
    /// Creates a new mock display.
    pub fn new() -> Self {
        Self::default()
    }
}

impl MenuDisplay for MockDisplay {
    type Error = ();

    fn init(&mut self) -> Result<(), ()> {
        self.initialized = true;
        Ok(())
    }

    fn clear(&mut self) -> Result<(), ()> {
        self.last_render = None;
        Ok(())
    }

    fn render(&mut self, instruction: &RenderInstruction) -> Result<(), ()> {
        if self.fail {
            return Err(());
        }
        self.last_render = Some(instruction.clone());
        self.render_count += 1;
        Ok(())
    }

    fn show_message(&mut self, line1: &str, line2: Option<&str>) -> Result<(), ()> {
        if self.fail {
            return Err(());
        }
        let message = (String::from(line1), line2.map(String::from));
        self.messages.push(message.clone());
        self.last_message = Some(message);
        Ok(())
    }
}

/// Mock radio link.
///
/// # Example
///
/// ```rust
/// use explorer_tx::hal::MockRadio;
/// use explorer_tx::traits::Transmitter;
///
/// let mut radio = MockRadio::new();
/// radio.transmit(&[1, 2, 3]).unwrap();
/// assert_eq!(radio.sent, vec![vec![1, 2, 3]]);
///
/// radio.fail = true;
/// assert!(radio.transmit(&[4]).is_err());
/// ```
#[derive(Debug, Default)]
pub struct MockRadio {
    /// Frames sent, oldest first.
    pub sent: Vec<Vec<u8>>,
    /// Status handed out by the next `take_status`.
    pub pending_status: Option<VehicleStatus>,
    /// When true, every transmission fails.
    pub fail: bool,
    /// Whether init() was called.
    pub initialized: bool,
}

impl MockRadio {
    /// Creates a new mock radio.
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues a status report from the vehicle.
    pub fn receive(&mut self, status: VehicleStatus) {
        self.pending_status = Some(status);
    }
}

impl Transmitter for MockRadio {
    type Error = ();

    fn init(&mut self) -> Result<(), ()> {
        self.initialized = true;
        Ok(())
    }

    fn transmit(&mut self, payload: &[u8]) -> Result<(), ()> {
        if self.fail {
            return Err(());
        }
        self.sent.push(payload.to_vec());
        Ok(())
    }

    fn take_status(&mut self) -> Option<VehicleStatus> {
        self.pending_status.take()
    }
}
