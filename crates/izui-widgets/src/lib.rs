#![forbid(unsafe_code)]

//! Widgets for the IzenDoc terminal UI kit.

pub mod multi_select;
pub mod pointer;

pub use multi_select::{
    AccessibleProps, HasPopup, MultiSelect, MultiSelectState, MultiSelectStyle, Role,
    SelectOption,
};
pub use pointer::{ListenerGuard, PointerHub};

use izui_core::geometry::Rect;
use izui_render::buffer::Buffer;
use izui_render::cell::Cell;
use izui_render::frame::Frame;
use izui_style::Style;
use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthStr;

/// A `Widget` is a renderable component.
pub trait Widget {
    /// Render the widget into the frame at the given area.
    fn render(&self, area: Rect, frame: &mut Frame);

    /// Whether this widget must always render.
    fn is_essential(&self) -> bool {
        false
    }
}

/// A `StatefulWidget` is a widget that renders based on mutable state.
pub trait StatefulWidget {
    type State;

    /// Render the widget into the frame with mutable state.
    fn render(&self, area: Rect, frame: &mut Frame, state: &mut Self::State);
}

/// Whether a widget acted on an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventResult {
    /// The widget handled the event; stop routing it.
    Consumed,
    /// The widget did not care; route it elsewhere.
    Ignored,
}

impl EventResult {
    /// True for [`EventResult::Consumed`].
    pub const fn is_consumed(self) -> bool {
        matches!(self, Self::Consumed)
    }
}

/// Apply a style to all cells in a rectangular area, keeping content.
pub(crate) fn set_style_area(buf: &mut Buffer, area: Rect, style: Style) {
    if style.is_empty() {
        return;
    }
    let area = area.intersection(&buf.current_scissor());
    for y in area.y..area.bottom() {
        for x in area.x..area.right() {
            if let Some(cell) = buf.get_mut(x, y) {
                style.apply_to(cell);
            }
        }
    }
}

/// Draw a text span into a buffer at the given position.
///
/// Returns the x position after the last drawn grapheme. Stops at `max_x`
/// (exclusive) and never splits a wide grapheme.
pub(crate) fn draw_text_span(
    buf: &mut Buffer,
    mut x: u16,
    y: u16,
    content: &str,
    style: Style,
    max_x: u16,
) -> u16 {
    for grapheme in content.graphemes(true) {
        if x >= max_x {
            break;
        }
        let w = UnicodeWidthStr::width(grapheme);
        if w == 0 {
            continue;
        }
        if x as usize + w > max_x as usize {
            break;
        }
        if let Some(c) = grapheme.chars().next() {
            let mut cell = Cell::from_char(c);
            style.apply_to(&mut cell);
            buf.set(x, y, cell);
        }
        x = x.saturating_add(w as u16);
    }
    x
}

/// A cell holding `ch` with `style` applied.
pub(crate) fn styled(ch: char, style: Style) -> Cell {
    let mut cell = Cell::from_char(ch);
    style.apply_to(&mut cell);
    cell
}

/// Shorten `text` to `max_width` cells, ending in `…` when cut.
pub(crate) fn truncate_to_width(text: &str, max_width: usize) -> String {
    if UnicodeWidthStr::width(text) <= max_width {
        return text.to_string();
    }
    if max_width == 0 {
        return String::new();
    }
    let mut out = String::new();
    let mut used = 0;
    for grapheme in text.graphemes(true) {
        let w = UnicodeWidthStr::width(grapheme);
        if used + w + 1 > max_width {
            break;
        }
        out.push_str(grapheme);
        used += w;
    }
    out.push('…');
    out
}
