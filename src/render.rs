//! Turning menu state into display instructions.
//!
//! [`render`] is a pure function from (tree, node, index, telemetry) to a
//! [`RenderInstruction`]: two text lines, the selector glyph and the row it
//! sits on, plus any glyphs drawn inside the text. The display collaborator
//! clears and redraws from that alone.
//!
//! # Paging
//!
//! The display has two rows, so items are shown in pairs:
//!
//! | Index | Top row | Bottom row | Selector |
//! |-------|---------|------------|----------|
//! | even `i` | item `i` | item `i + 1` or blank | top |
//! | odd `i` | item `i - 1` | item `i` | bottom |
//!
//! Detail views show a telemetry line on top and their single BACK item
//! below it. The telemetry line leaves a blank cell before the temperature
//! and one before the battery level; the thermometer and battery glyphs go
//! there.
//!
//! # Example
//!
//! ```rust
//! use explorer_tx::{render, MenuNode, MenuTree, Row, SelectorGlyph, Telemetry};
//!
//! let tree = MenuTree::standard();
//! let out = render(&tree, MenuNode::Lights, 3, &Telemetry::default());
//! assert_eq!(out.line1.as_str(), "AUTO");
//! assert_eq!(out.line2.as_str(), "BACK");
//! assert_eq!(out.selector_row, Row::Bottom);
//! assert_eq!(out.selector_glyph, SelectorGlyph::BackArrow);
//! ```

use core::fmt::Write;

use heapless::{String as HString, Vec as HVec};

use crate::glyph::Glyph;
use crate::menu::{DataView, MenuNode, MenuTree};

/// Display width in characters.
pub const DISPLAY_COLS: usize = 16;

/// One display row of text.
pub type Line = HString<DISPLAY_COLS>;

/// Placeholder for a reading that has not arrived yet.
const UNKNOWN: &str = "--";

/// Builds a [`Line`], truncating to the display width.
pub fn line(text: &str) -> Line {
    let mut out = Line::new();
    for c in text.chars() {
        if out.push(c).is_err() {
            break;
        }
    }
    out
}

/// Marker drawn next to the selected item.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SelectorGlyph {
    /// The selected item does something or enters a node.
    SelectArrow,
    /// The selected item leads back to the parent.
    BackArrow,
}

impl SelectorGlyph {
    /// The bitmap used to draw this selector.
    #[inline]
    pub const fn glyph(self) -> Glyph {
        match self {
            SelectorGlyph::SelectArrow => Glyph::SelectArrow,
            SelectorGlyph::BackArrow => Glyph::BackArrow,
        }
    }
}

/// Display row.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Row {
    /// Row 0.
    Top,
    /// Row 1.
    Bottom,
}

impl Row {
    /// Zero-based row number.
    #[inline]
    pub const fn index(self) -> u8 {
        match self {
            Row::Top => 0,
            Row::Bottom => 1,
        }
    }
}

/// Most glyphs one instruction places inside its text.
pub const MAX_INLINE_GLYPHS: usize = 2;

/// A custom glyph drawn in a text cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct InlineGlyph {
    /// Row of the cell.
    pub row: Row,
    /// Zero-based character column within the row's text.
    pub column: u8,
    /// What to draw there.
    pub glyph: Glyph,
}

/// Glyphs placed inside the text of one instruction.
pub type InlineGlyphs = HVec<InlineGlyph, MAX_INLINE_GLYPHS>;

/// Everything the display needs to redraw the menu.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RenderInstruction {
    /// Top row text.
    pub line1: Line,
    /// Bottom row text.
    pub line2: Line,
    /// Which selector to draw.
    pub selector_glyph: SelectorGlyph,
    /// Row the selector sits on.
    pub selector_row: Row,
    /// Glyphs drawn over blank cells of the text.
    pub glyphs: InlineGlyphs,
}

impl RenderInstruction {
    /// Two plain text rows with the selector on `selector_row`.
    pub fn text(
        line1: Line,
        line2: Line,
        selector_glyph: SelectorGlyph,
        selector_row: Row,
    ) -> Self {
        Self {
            line1,
            line2,
            selector_glyph,
            selector_row,
            glyphs: InlineGlyphs::new(),
        }
    }
}

/// Readings shown by the data views.
///
/// Whole degrees Celsius and battery percent; `None` until known.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Telemetry {
    /// Transmitter temperature.
    pub tx_temperature_c: Option<i16>,
    /// Transmitter battery level.
    pub tx_battery_pct: Option<u8>,
    /// Vehicle temperature.
    pub vehicle_temperature_c: Option<i16>,
    /// Vehicle battery level.
    pub vehicle_battery_pct: Option<u8>,
}

impl Telemetry {
    /// Temperature and battery for one view.
    pub fn for_view(&self, view: DataView) -> (Option<i16>, Option<u8>) {
        match view {
            DataView::Transmitter => (self.tx_temperature_c, self.tx_battery_pct),
            DataView::Vehicle => (self.vehicle_temperature_c, self.vehicle_battery_pct),
        }
    }
}

/// Formats the telemetry line of a detail view, e.g. `TX  24C  87%`.
pub fn data_line(view: DataView, telemetry: &Telemetry) -> Line {
    data_row(view, telemetry, Row::Top).0
}

/// Telemetry line for `row` plus the thermometer and battery glyph cells.
///
/// A glyph is only placed when its cell fits on the row.
pub fn data_row(view: DataView, telemetry: &Telemetry, row: Row) -> (Line, InlineGlyphs) {
    let prefix = match view {
        DataView::Transmitter => "TX",
        DataView::Vehicle => "VEH",
    };
    let (temp, battery) = telemetry.for_view(view);

    let mut out = Line::new();
    let mut glyphs = InlineGlyphs::new();
    let _ = write!(out, "{prefix} ");

    reserve_cell(&mut out, &mut glyphs, row, Glyph::Thermometer);
    let _ = match temp {
        Some(t) => write!(out, "{t}C "),
        None => write!(out, "{UNKNOWN}C "),
    };

    reserve_cell(&mut out, &mut glyphs, row, Glyph::Battery);
    let _ = match battery {
        Some(b) => write!(out, "{b}%"),
        None => write!(out, "{UNKNOWN}%"),
    };
    (out, glyphs)
}

/// Appends a blank cell to `out` and records `glyph` over it.
fn reserve_cell(out: &mut Line, glyphs: &mut InlineGlyphs, row: Row, glyph: Glyph) {
    let column = out.len() as u8;
    if out.push(' ').is_ok() {
        let _ = glyphs.push(InlineGlyph { row, column, glyph });
    }
}

/// Produces the display instruction for `node` with `index` selected.
///
/// Pure and total: the index is clamped into the node's range first, and
/// identical arguments give identical instructions. A node without items
/// renders as two blank rows.
pub fn render(
    tree: &MenuTree<'_>,
    node: MenuNode,
    index: i32,
    telemetry: &Telemetry,
) -> RenderInstruction {
    let spec = tree.spec(node);
    let Some(selected) = spec.item(index) else {
        return RenderInstruction::text(
            Line::new(),
            Line::new(),
            SelectorGlyph::BackArrow,
            Row::Top,
        );
    };
    let index = spec.range().clamp(index) as usize;

    let selector_glyph = if selected.action.goes_back() {
        SelectorGlyph::BackArrow
    } else {
        SelectorGlyph::SelectArrow
    };

    if let MenuNode::VehicleDataDetail(view) = node {
        let (line1, glyphs) = data_row(view, telemetry, Row::Top);
        return RenderInstruction {
            line1,
            line2: line(selected.label),
            selector_glyph,
            selector_row: Row::Bottom,
            glyphs,
        };
    }

    let (top, bottom, selector_row) = if index % 2 == 0 {
        let next = spec.items.get(index + 1).map_or("", |item| item.label);
        (selected.label, next, Row::Top)
    } else {
        let previous = spec.items.get(index - 1).map_or("", |item| item.label);
        (previous, selected.label, Row::Bottom)
    };

    RenderInstruction::text(line(top), line(bottom), selector_glyph, selector_row)
}
