//! 5x8 custom glyphs used by the menu and the data views.
//!
//! Each glyph is eight rows of five pixels, most significant of the low five
//! bits on the left. The slot number is the position the glyph takes in a
//! character LCD's CGRAM; pixel displays draw the bitmap directly.

/// Glyph width in pixels.
pub const GLYPH_WIDTH: u32 = 5;
/// Glyph height in pixels.
pub const GLYPH_HEIGHT: u32 = 8;

/// The custom glyphs known to the display.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Glyph {
    /// Right-pointing selector.
    SelectArrow,
    /// Return selector, shown on items that lead back.
    BackArrow,
    /// Temperature marker.
    Thermometer,
    /// Battery marker.
    Battery,
}

impl Glyph {
    /// Every glyph in slot order.
    pub const ALL: [Glyph; 4] = [
        Glyph::SelectArrow,
        Glyph::BackArrow,
        Glyph::Thermometer,
        Glyph::Battery,
    ];

    /// CGRAM slot for this glyph.
    #[inline]
    pub const fn slot(self) -> u8 {
        match self {
            Glyph::SelectArrow => 0,
            Glyph::BackArrow => 1,
            Glyph::Thermometer => 2,
            Glyph::Battery => 3,
        }
    }

    /// Row bitmap, top row first.
    pub const fn bitmap(self) -> [u8; 8] {
        match self {
            Glyph::SelectArrow => [
                0b00000, 0b00100, 0b00110, 0b11111, 0b00110, 0b00100, 0b00000, 0b00000,
            ],
            Glyph::BackArrow => [
                0b00000, 0b00101, 0b01101, 0b11111, 0b01100, 0b00100, 0b00000, 0b00000,
            ],
            Glyph::Thermometer => [
                0b00100, 0b01110, 0b00100, 0b00100, 0b00100, 0b00100, 0b00100, 0b00000,
            ],
            Glyph::Battery => [
                0b00110, 0b01111, 0b01001, 0b01111, 0b01111, 0b01111, 0b01111, 0b00000,
            ],
        }
    }

    /// Returns true if the pixel at (`x`, `y`) is lit.
    ///
    /// Coordinates outside the 5x8 cell are unlit.
    pub fn pixel(self, x: u32, y: u32) -> bool {
        if x >= GLYPH_WIDTH || y >= GLYPH_HEIGHT {
            return false;
        }
        let row = self.bitmap()[y as usize];
        row & (1 << (GLYPH_WIDTH - 1 - x)) != 0
    }

    /// Iterates the lit pixels as (x, y) pairs.
    pub fn lit_pixels(self) -> impl Iterator<Item = (u32, u32)> {
        (0..GLYPH_HEIGHT)
            .flat_map(move |y| (0..GLYPH_WIDTH).map(move |x| (x, y)))
            .filter(move |&(x, y)| self.pixel(x, y))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slots_are_unique_and_ordered() {
        for (i, g) in Glyph::ALL.iter().enumerate() {
            assert_eq!(g.slot() as usize, i);
        }
    }

    #[test]
    fn rows_use_five_bits() {
        for g in Glyph::ALL {
            for row in g.bitmap() {
                assert_eq!(row & !0b11111, 0, "{g:?}");
            }
        }
    }

    #[test]
    fn select_arrow_tip_and_shaft() {
        // Full-width shaft on row 3
        for x in 0..GLYPH_WIDTH {
            assert!(Glyph::SelectArrow.pixel(x, 3));
        }
        assert!(Glyph::SelectArrow.pixel(2, 1));
        assert!(!Glyph::SelectArrow.pixel(0, 1));
    }

    #[test]
    fn outside_cell_is_unlit() {
        assert!(!Glyph::Battery.pixel(5, 0));
        assert!(!Glyph::Battery.pixel(0, 8));
    }

    #[test]
    fn marker_pixel_counts() {
        // Bulb row plus a one-pixel stem
        assert_eq!(Glyph::Thermometer.lit_pixels().count(), 9);
        // Terminal, outline row, hollow row, then four solid rows
        assert_eq!(Glyph::Battery.lit_pixels().count(), 2 + 4 + 2 + 4 * 4);
    }

    #[test]
    fn lit_pixels_agree_with_pixel() {
        for g in Glyph::ALL {
            for (x, y) in g.lit_pixels() {
                assert!(g.pixel(x, y));
            }
        }
    }
}
