//! Display abstraction for the two-row menu.
//!
//! This module defines the [`MenuDisplay`] trait for drawing
//! [`RenderInstruction`]s and short messages on a character LCD, an OLED,
//! or a simulated display for testing.

use crate::render::RenderInstruction;

/// Display trait for the menu.
///
/// # Example
///
/// ```ignore
/// use explorer_tx::traits::MenuDisplay;
/// use explorer_tx::RenderInstruction;
///
/// struct MyDisplay { /* ... */ }
///
/// impl MenuDisplay for MyDisplay {
///     type Error = ();
///
///     fn init(&mut self) -> Result<(), ()> { Ok(()) }
///     fn clear(&mut self) -> Result<(), ()> { Ok(()) }
///     fn render(&mut self, instruction: &RenderInstruction) -> Result<(), ()> {
///         // Draw both lines and the selector glyph
///         Ok(())
///     }
///     fn show_message(&mut self, line1: &str, line2: Option<&str>) -> Result<(), ()> {
///         Ok(())
///     }
/// }
/// ```
pub trait MenuDisplay {
    /// Error type for display operations.
    type Error;

    /// Initializes the display hardware.
    ///
    /// Called once at startup, before anything is drawn.
    fn init(&mut self) -> Result<(), Self::Error>;

    /// Clears the display.
    fn clear(&mut self) -> Result<(), Self::Error>;

    /// Clears and redraws both rows plus the selector glyph.
    ///
    /// Must be idempotent: drawing the same instruction twice leaves the
    /// same picture.
    fn render(&mut self, instruction: &RenderInstruction) -> Result<(), Self::Error>;

    /// Shows a short message (splash screen, command acknowledgement).
    ///
    /// # Arguments
    ///
    /// * `line1` - First line of text
    /// * `line2` - Optional second line of text
    fn show_message(&mut self, line1: &str, line2: Option<&str>) -> Result<(), Self::Error>;
}
