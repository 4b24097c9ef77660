//! # explorer-tx
//!
//! Transmitter unit firmware for a remote-controlled exploration vehicle:
//! two joysticks, a tilt sensor, and a rotary-encoder-driven menu on a
//! two-row display, all sent to the vehicle over radio.
//!
//! ## Features
//!
//! - **Debounced encoder capture**: interrupt-safe atomic counter
//! - **Data-driven menu**: the hierarchy and every confirm action live in a
//!   [`MenuTree`]; the state machine never branches on a specific node
//! - **Pure rendering**: menu state maps to a [`RenderInstruction`] that any
//!   two-row display can draw
//! - **Hardware abstraction**: traits for the button, sticks, tilt sensor,
//!   display and radio, with mocks for desktop testing
//!
//! ## Architecture
//!
//! - `encoder` - Debounced position counter shared with the interrupt
//! - `normalize` - Clamping raw positions into a node's index range
//! - `menu` - Menu nodes, items and the transition table
//! - `controller` - The menu state machine
//! - `render` - Display instructions and paging
//! - `joystick`, `accel`, `packet` - Stick and tilt processing, radio frames
//! - `unit` - The main loop tying everything together
//! - `traits` - Hardware abstractions
//! - `hal` - Concrete implementations (mock for testing, esp32 for hardware)
//!
//! ## Example
//!
//! ```rust
//! use explorer_tx::{
//!     Command, EncoderCapture, MenuController, MenuNode, MenuTree, Telemetry,
//!     config::MenuConfig,
//!     hal::MockButton,
//! };
//!
//! static ENCODER: EncoderCapture = EncoderCapture::new(5);
//!
//! let mut menu = MenuController::new(
//!     MenuTree::standard(),
//!     &ENCODER,
//!     MockButton::new(),
//!     MenuConfig::default(),
//! );
//!
//! // The interrupt handler reports one detent clockwise
//! ENCODER.on_edge(true, 0);
//!
//! let out = menu.poll(&Telemetry::default());
//! assert_eq!(out.render.unwrap().line2.as_str(), "OPERATION MODE");
//!
//! // Confirm: OPERATION MODE, then MANUAL
//! menu.button_mut().click();
//! menu.poll(&Telemetry::default());
//! menu.button_mut().click();
//! let out = menu.poll(&Telemetry::default());
//! assert_eq!(menu.node(), MenuNode::OperationMode);
//! assert_eq!(out.command, Command::SetOperationManual);
//! ```

#![cfg_attr(not(feature = "std"), no_std)]
#![warn(missing_docs)]

extern crate alloc;

/// Commands the menu sends to the vehicle.
pub mod commands;
/// Debounced rotary encoder capture.
pub mod encoder;
/// Hardware abstraction layer with mock implementations for testing.
pub mod hal;
/// Position-to-index clamping.
pub mod normalize;
/// Core traits for hardware abstraction.
pub mod traits;

/// Menu hierarchy and transition table.
pub mod menu;
/// The menu state machine.
pub mod controller;
/// Render instructions for the two-row display.
pub mod render;
/// Custom display glyphs.
pub mod glyph;

/// Joystick processing.
pub mod joystick;
/// Tilt sensor processing.
pub mod accel;
/// Radio payloads.
pub mod packet;
/// The transmitter main loop.
pub mod unit;

/// Shared configuration system for desktop and ESP32.
pub mod config;

// Re-exports for convenience
pub use accel::{Calibration, MpuRawData, TiltBounds, TiltReading};
pub use commands::Command;
pub use controller::{MenuController, MenuPoll};
pub use encoder::EncoderCapture;
pub use glyph::Glyph;
pub use joystick::{JoystickReading, Orientation, RawAxes, Stick};
pub use menu::{Action, DataView, MenuItem, MenuNode, MenuTree, NodeSpec, TreeError};
pub use normalize::{has_changed, normalize, IndexRange};
pub use packet::{DataPackage, VehicleStatus};
pub use render::{
    data_line, data_row, render, InlineGlyph, InlineGlyphs, Line, RenderInstruction, Row,
    SelectorGlyph, Telemetry,
};
pub use traits::{Accelerometer, Clock, ConfirmButton, JoystickInput, MenuDisplay, Transmitter};
pub use unit::{TickReport, TxUnit, UnitError, UnitStats};

// Config re-exports
pub use config::{
    Config, DeviceConfig, InputConfig, LoopConfig, MenuConfig, RadioConfig, SensorConfig,
};
