#![forbid(unsafe_code)]

//! Drawing primitives for the buffer.
//!
//! Helpers on top of `Buffer::set()` so widgets can draw borders, text,
//! and filled regions without repeating cell loops. Everything goes through
//! `set()`, so the scissor stack is always honoured.

use crate::buffer::Buffer;
use crate::cell::{Cell, CellContent, PackedRgba};
use crate::char_width;
use izui_core::geometry::Rect;

/// Characters used to draw a border around a rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BorderChars {
    pub top_left: char,
    pub top_right: char,
    pub bottom_left: char,
    pub bottom_right: char,
    pub horizontal: char,
    pub vertical: char,
}

impl BorderChars {
    /// Simple box-drawing characters (U+250x).
    pub const SQUARE: Self = Self {
        top_left: '┌',
        top_right: '┐',
        bottom_left: '└',
        bottom_right: '┘',
        horizontal: '─',
        vertical: '│',
    };

    /// Rounded corners.
    pub const ROUNDED: Self = Self {
        top_left: '╭',
        top_right: '╮',
        bottom_left: '╰',
        bottom_right: '╯',
        horizontal: '─',
        vertical: '│',
    };

    /// ASCII-only border.
    pub const ASCII: Self = Self {
        top_left: '+',
        top_right: '+',
        bottom_left: '+',
        bottom_right: '+',
        horizontal: '-',
        vertical: '|',
    };
}

/// Extension trait for drawing on a Buffer.
pub trait Draw {
    /// Draw a horizontal line of cells.
    fn draw_horizontal_line(&mut self, x: u16, y: u16, width: u16, cell: Cell);

    /// Draw a vertical line of cells.
    fn draw_vertical_line(&mut self, x: u16, y: u16, height: u16, cell: Cell);

    /// Draw a filled rectangle.
    fn draw_rect_filled(&mut self, rect: Rect, cell: Cell);

    /// Print text at the given coordinates using the cell's colors/attrs.
    ///
    /// Stops at the buffer edge. Returns the x position after the last character.
    fn print_text(&mut self, x: u16, y: u16, text: &str, base_cell: Cell) -> u16;

    /// Print text with a right-side clipping boundary (`max_x` exclusive).
    ///
    /// Wide characters that would straddle `max_x` are not started.
    fn print_text_clipped(
        &mut self,
        x: u16,
        y: u16,
        text: &str,
        base_cell: Cell,
        max_x: u16,
    ) -> u16;

    /// Draw a border inside `rect` (edges + corners).
    fn draw_border(&mut self, rect: Rect, chars: BorderChars, base_cell: Cell);

    /// Draw a border and fill the interior.
    fn draw_box(&mut self, rect: Rect, chars: BorderChars, border_cell: Cell, fill_cell: Cell);

    /// Recolor an area without touching cell content.
    fn paint_area(&mut self, rect: Rect, fg: Option<PackedRgba>, bg: Option<PackedRgba>);
}

impl Draw for Buffer {
    fn draw_horizontal_line(&mut self, x: u16, y: u16, width: u16, cell: Cell) {
        for i in 0..width {
            self.set(x.saturating_add(i), y, cell);
        }
    }

    fn draw_vertical_line(&mut self, x: u16, y: u16, height: u16, cell: Cell) {
        for i in 0..height {
            self.set(x, y.saturating_add(i), cell);
        }
    }

    fn draw_rect_filled(&mut self, rect: Rect, cell: Cell) {
        self.fill(rect, cell);
    }

    fn print_text(&mut self, x: u16, y: u16, text: &str, base_cell: Cell) -> u16 {
        self.print_text_clipped(x, y, text, base_cell, self.width())
    }

    fn print_text_clipped(
        &mut self,
        x: u16,
        y: u16,
        text: &str,
        base_cell: Cell,
        max_x: u16,
    ) -> u16 {
        let mut cx = x;
        for c in text.chars() {
            let width = char_width(c) as u16;
            if width == 0 {
                continue;
            }
            if cx.saturating_add(width) > max_x {
                break;
            }

            let cell = Cell {
                content: CellContent::from_char(c),
                ..base_cell
            };
            self.set(cx, y, cell);
            cx = cx.saturating_add(width);
        }
        cx
    }

    fn draw_border(&mut self, rect: Rect, chars: BorderChars, base_cell: Cell) {
        if rect.is_empty() {
            return;
        }

        let make_cell = |c: char| -> Cell {
            Cell {
                content: CellContent::from_char(c),
                ..base_cell
            }
        };

        let h_cell = make_cell(chars.horizontal);
        let v_cell = make_cell(chars.vertical);

        self.draw_horizontal_line(rect.x, rect.top(), rect.width, h_cell);
        if rect.height > 1 {
            self.draw_horizontal_line(rect.x, rect.bottom() - 1, rect.width, h_cell);
        }
        if rect.height > 2 {
            self.draw_vertical_line(rect.left(), rect.top() + 1, rect.height - 2, v_cell);
            if rect.width > 1 {
                self.draw_vertical_line(rect.right() - 1, rect.top() + 1, rect.height - 2, v_cell);
            }
        }

        // Corners last so they win over edges.
        self.set(rect.left(), rect.top(), make_cell(chars.top_left));
        if rect.width > 1 {
            self.set(rect.right() - 1, rect.top(), make_cell(chars.top_right));
        }
        if rect.height > 1 {
            self.set(rect.left(), rect.bottom() - 1, make_cell(chars.bottom_left));
        }
        if rect.width > 1 && rect.height > 1 {
            self.set(
                rect.right() - 1,
                rect.bottom() - 1,
                make_cell(chars.bottom_right),
            );
        }
    }

    fn draw_box(&mut self, rect: Rect, chars: BorderChars, border_cell: Cell, fill_cell: Cell) {
        if rect.is_empty() {
            return;
        }
        if rect.width > 2 && rect.height > 2 {
            let inner = Rect::new(rect.x + 1, rect.y + 1, rect.width - 2, rect.height - 2);
            self.fill(inner, fill_cell);
        }
        self.draw_border(rect, chars, border_cell);
    }

    fn paint_area(&mut self, rect: Rect, fg: Option<PackedRgba>, bg: Option<PackedRgba>) {
        let clipped = rect.intersection(&self.current_scissor());
        for y in clipped.y..clipped.bottom() {
            for x in clipped.x..clipped.right() {
                if let Some(cell) = self.get_mut(x, y) {
                    if let Some(fg) = fg {
                        cell.fg = fg;
                    }
                    if let Some(bg) = bg {
                        cell.bg = bg;
                    }
                }
            }
        }
    }
}
