//! SSD1306 OLED display implementation for ESP32.
//!
//! Draws the menu's two text rows with the selector glyph in the left
//! column, the way a 16x2 character LCD would show them. Inline glyphs such
//! as the thermometer land in their reserved text cells.
//!
//! Generic over the blocking I2C bus, so it runs on a `shared-bus` proxy
//! next to the MPU-6050.
//!
//! # Wiring
//!
//! - SDA → GPIO8 (also has onboard LED)
//! - SCL → GPIO9 (also shared with BOOT button)
//! - VCC → 3.3V
//! - GND → GND

use crate::glyph::Glyph;
use crate::render::{InlineGlyph, RenderInstruction, Row};
use crate::traits::MenuDisplay;
use embedded_graphics::{
    mono_font::{ascii::FONT_6X10, MonoTextStyle},
    pixelcolor::BinaryColor,
    prelude::*,
    text::{Baseline, Text},
};
use embedded_hal_02::blocking::i2c;
use ssd1306::{mode::BufferedGraphicsMode, prelude::*, I2CDisplayInterface, Ssd1306};

/// SSD1306 display type alias for cleaner code.
type DisplayDriver<I2C> =
    Ssd1306<I2CInterface<I2C>, DisplaySize128x64, BufferedGraphicsMode<DisplaySize128x64>>;

/// Width of one character cell in pixels.
const CELL_WIDTH: i32 = 6;

/// Left edge of the text, one cell in from the selector column.
const TEXT_X: i32 = CELL_WIDTH;

/// Top edge of each row.
const ROW_TOP: [i32; 2] = [18, 34];

/// SSD1306 OLED for ESP32 showing the two-row menu.
///
/// # Display Layout
///
/// ```text
/// ┌────────────────────────────┐
/// │                            │
/// │ > VEHICLE DATA             │  Row::Top
/// │   OPERATION MODE           │  Row::Bottom
/// │                            │
/// └────────────────────────────┘
/// ```
pub struct Esp32Display<I2C> {
    display: DisplayDriver<I2C>,
}

impl<I2C: i2c::Write> Esp32Display<I2C> {
    /// Creates a new display instance.
    ///
    /// # Arguments
    ///
    /// * `i2c` - I2C bus (or shared-bus proxy) on GPIO8/9
    ///
    /// # Errors
    ///
    /// Returns an error if display initialization fails.
    pub fn new(i2c: I2C) -> Result<Self, DisplayError> {
        let interface = I2CDisplayInterface::new(i2c);
        let display = Ssd1306::new(interface, DisplaySize128x64, DisplayRotation::Rotate0)
            .into_buffered_graphics_mode();

        Ok(Self { display })
    }

    fn draw_row(&mut self, row: Row, text: &str) -> Result<(), DisplayError> {
        let style = MonoTextStyle::new(&FONT_6X10, BinaryColor::On);
        let top = ROW_TOP[usize::from(row.index())];
        Text::with_baseline(text, Point::new(TEXT_X, top), style, Baseline::Top)
            .draw(&mut self.display)?;
        Ok(())
    }

    /// Draws `glyph` in the cell whose left edge is `left`.
    fn draw_glyph(&mut self, glyph: Glyph, left: i32, row: Row) -> Result<(), DisplayError> {
        let top = ROW_TOP[usize::from(row.index())] + 1;
        let pixels = glyph
            .lit_pixels()
            .map(|(x, y)| Pixel(Point::new(left + x as i32, top + y as i32), BinaryColor::On));
        self.display.draw_iter(pixels)?;
        Ok(())
    }

    fn draw_inline(&mut self, cell: &InlineGlyph) -> Result<(), DisplayError> {
        let left = TEXT_X + i32::from(cell.column) * CELL_WIDTH;
        self.draw_glyph(cell.glyph, left, cell.row)
    }
}

impl<I2C: i2c::Write> MenuDisplay for Esp32Display<I2C> {
    type Error = DisplayError;

    fn init(&mut self) -> Result<(), Self::Error> {
        self.display.init()?;
        self.clear()
    }

    fn clear(&mut self) -> Result<(), Self::Error> {
        self.display.clear(BinaryColor::Off)?;
        self.display.flush()?;
        Ok(())
    }

    fn render(&mut self, instruction: &RenderInstruction) -> Result<(), Self::Error> {
        self.display.clear(BinaryColor::Off)?;

        self.draw_row(Row::Top, instruction.line1.as_str())?;
        self.draw_row(Row::Bottom, instruction.line2.as_str())?;
        self.draw_glyph(instruction.selector_glyph.glyph(), 0, instruction.selector_row)?;
        for cell in &instruction.glyphs {
            self.draw_inline(cell)?;
        }

        self.display.flush()?;
        Ok(())
    }

    fn show_message(&mut self, line1: &str, line2: Option<&str>) -> Result<(), Self::Error> {
        self.display.clear(BinaryColor::Off)?;

        self.draw_row(Row::Top, line1)?;
        if let Some(l2) = line2 {
            self.draw_row(Row::Bottom, l2)?;
        }

        self.display.flush()?;
        Ok(())
    }
}

/// Display error type.
#[derive(Debug)]
pub struct DisplayError;

impl From<display_interface::DisplayError> for DisplayError {
    fn from(_: display_interface::DisplayError) -> Self {
        DisplayError
    }
}
