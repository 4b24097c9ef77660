//! Console stand-in for the OLED.
//!
//! Used when the firmware is built without the `display` feature: every
//! frame is written to the log instead, so the menu can still be driven
//! from a serial monitor.

use crate::render::{RenderInstruction, Row};
use crate::traits::MenuDisplay;
use core::convert::Infallible;
use log::info;

/// Logs each frame at `info` level.
#[derive(Debug, Default)]
pub struct SerialDisplay {
    frames: u32,
}

impl SerialDisplay {
    /// Creates a new serial display.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of frames logged so far.
    pub fn frames(&self) -> u32 {
        self.frames
    }
}

impl MenuDisplay for SerialDisplay {
    type Error = Infallible;

    fn init(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }

    fn clear(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }

    fn render(&mut self, instruction: &RenderInstruction) -> Result<(), Self::Error> {
        self.frames = self.frames.wrapping_add(1);
        let marker = |row: Row| if instruction.selector_row == row { '>' } else { ' ' };
        info!(
            "[{}{}] [{}{}]",
            marker(Row::Top),
            instruction.line1,
            marker(Row::Bottom),
            instruction.line2
        );
        Ok(())
    }

    fn show_message(&mut self, line1: &str, line2: Option<&str>) -> Result<(), Self::Error> {
        self.frames = self.frames.wrapping_add(1);
        info!("[ {}] [ {}]", line1, line2.unwrap_or(""));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::{line, SelectorGlyph};

    #[test]
    fn counts_frames_and_messages() {
        let mut display = SerialDisplay::new();
        let instruction = RenderInstruction::text(
            line("VEHICLE DATA"),
            line("OPERATION MODE"),
            SelectorGlyph::SelectArrow,
            Row::Top,
        );
        assert_eq!(display.render(&instruction), Ok(()));
        assert_eq!(display.show_message("EXP. VEHICLE", None), Ok(()));
        assert_eq!(display.frames(), 2);
    }
}
