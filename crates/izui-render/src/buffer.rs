#![forbid(unsafe_code)]

//! Buffer grid storage.
//!
//! The `Buffer` is a 2D grid of [`Cell`]s representing the terminal display.
//! It provides cell access and a scissor (clipping) stack.
//!
//! # Layout
//!
//! Cells are stored in row-major order: `index = y * width + x`.
//!
//! # Invariants
//!
//! 1. `cells.len() == width * height`
//! 2. Width and height never change after creation
//! 3. Scissor stack intersection monotonically decreases on push
//! 4. Scissor stack always has at least one element

use crate::cell::Cell;
use izui_core::geometry::Rect;

/// A 2D grid of terminal cells.
///
/// # Example
///
/// ```
/// use izui_render::buffer::Buffer;
/// use izui_render::cell::Cell;
///
/// let mut buffer = Buffer::new(80, 24);
/// buffer.set(0, 0, Cell::from_char('H'));
/// buffer.set(1, 0, Cell::from_char('i'));
/// ```
#[derive(Debug, Clone)]
pub struct Buffer {
    width: u16,
    height: u16,
    cells: Vec<Cell>,
    scissor_stack: Vec<Rect>,
}

impl Buffer {
    /// Create a new buffer with the given dimensions.
    ///
    /// Zero dimensions are bumped to 1 so the grid is never empty.
    pub fn new(width: u16, height: u16) -> Self {
        let width = width.max(1);
        let height = height.max(1);
        let size = width as usize * height as usize;

        Self {
            width,
            height,
            cells: vec![Cell::default(); size],
            scissor_stack: vec![Rect::from_size(width, height)],
        }
    }

    /// Buffer width in cells.
    #[inline]
    pub const fn width(&self) -> u16 {
        self.width
    }

    /// Buffer height in cells.
    #[inline]
    pub const fn height(&self) -> u16 {
        self.height
    }

    /// Total number of cells.
    #[inline]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Always false for a constructed buffer.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Bounding rect of the entire buffer.
    #[inline]
    pub const fn bounds(&self) -> Rect {
        Rect::from_size(self.width, self.height)
    }

    #[inline]
    fn index(&self, x: u16, y: u16) -> Option<usize> {
        if x < self.width && y < self.height {
            Some(y as usize * self.width as usize + x as usize)
        } else {
            None
        }
    }

    /// Get a reference to the cell at (x, y).
    #[inline]
    pub fn get(&self, x: u16, y: u16) -> Option<&Cell> {
        self.index(x, y).map(|i| &self.cells[i])
    }

    /// Get a mutable reference to the cell at (x, y).
    ///
    /// Bypasses the scissor stack.
    #[inline]
    pub fn get_mut(&mut self, x: u16, y: u16) -> Option<&mut Cell> {
        self.index(x, y).map(|i| &mut self.cells[i])
    }

    /// Set the cell at (x, y).
    ///
    /// - Respects the current scissor region
    /// - Does nothing if coordinates are out of bounds
    /// - Wide characters write a CONTINUATION into the trailing cell; if the
    ///   trailing cell is clipped, nothing is written
    /// - Overwriting half of an existing wide character blanks the other half
    pub fn set(&mut self, x: u16, y: u16, cell: Cell) {
        let width = cell.content.width();
        let scissor = self.current_scissor();

        if self.index(x, y).is_none() || !scissor.contains(x, y) {
            return;
        }
        if width > 1 {
            let tail = x.saturating_add(1);
            if self.index(tail, y).is_none() || !scissor.contains(tail, y) {
                return;
            }
        }

        self.cleanup_overlap(x, y);
        if let Some(idx) = self.index(x, y) {
            self.cells[idx] = cell;
        }

        if width > 1 {
            let tail = x + 1;
            self.cleanup_overlap(tail, y);
            if let Some(idx) = self.index(tail, y) {
                self.cells[idx] = Cell {
                    bg: cell.bg,
                    ..Cell::CONTINUATION
                };
            }
        }
    }

    /// Blank the partner half of a wide character about to be overwritten.
    fn cleanup_overlap(&mut self, x: u16, y: u16) {
        let Some(idx) = self.index(x, y) else {
            return;
        };
        let existing = self.cells[idx];
        if existing.is_continuation() {
            if x > 0
                && let Some(head) = self.index(x - 1, y)
            {
                let bg = self.cells[head].bg;
                self.cells[head] = Cell::from_char(' ').with_bg(bg);
            }
        } else if existing.content.width() > 1
            && let Some(tail) = self.index(x.saturating_add(1), y)
            && self.cells[tail].is_continuation()
        {
            let bg = existing.bg;
            self.cells[tail] = Cell::from_char(' ').with_bg(bg);
        }
    }

    /// Set a cell without scissor or wide-character handling.
    #[inline]
    pub fn set_raw(&mut self, x: u16, y: u16, cell: Cell) {
        if let Some(idx) = self.index(x, y) {
            self.cells[idx] = cell;
        }
    }

    /// Fill a rectangular region with the given cell.
    ///
    /// Respects the scissor region.
    pub fn fill(&mut self, rect: Rect, cell: Cell) {
        let clipped = self.current_scissor().intersection(&rect);
        if clipped.is_empty() {
            return;
        }

        for y in clipped.y..clipped.bottom() {
            for x in clipped.x..clipped.right() {
                self.set(x, y, cell);
            }
        }
    }

    /// Clear all cells to the default.
    pub fn clear(&mut self) {
        self.cells.fill(Cell::default());
    }

    /// Get raw access to the cell slice.
    #[inline]
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Get the cells for a single row as a slice.
    ///
    /// # Panics
    ///
    /// Panics if `y >= height`.
    #[inline]
    pub fn row_cells(&self, y: u16) -> &[Cell] {
        let start = y as usize * self.width as usize;
        &self.cells[start..start + self.width as usize]
    }

    // ========== Scissor Stack ==========

    /// Push a scissor (clipping) region onto the stack.
    ///
    /// The effective scissor is the intersection of all pushed rects.
    pub fn push_scissor(&mut self, rect: Rect) {
        let current = self.current_scissor();
        let intersected = current.intersection(&rect);
        self.scissor_stack.push(intersected);
    }

    /// Pop a scissor region from the stack.
    ///
    /// Does nothing if only the base scissor remains.
    pub fn pop_scissor(&mut self) {
        if self.scissor_stack.len() > 1 {
            self.scissor_stack.pop();
        }
    }

    /// Get the current effective scissor region.
    #[inline]
    pub fn current_scissor(&self) -> Rect {
        self.scissor_stack
            .last()
            .copied()
            .unwrap_or_else(|| self.bounds())
    }

    /// Get the scissor stack depth.
    #[inline]
    pub fn scissor_depth(&self) -> usize {
        self.scissor_stack.len()
    }

    // ========== Compositing ==========

    /// Copy every drawn (non-empty) cell of `layer` on top of this buffer.
    ///
    /// Ignores the scissor stack; the layer is assumed to be screen-sized.
    pub fn overlay(&mut self, layer: &Buffer) {
        let h = self.height.min(layer.height);
        let w = self.width.min(layer.width);
        for y in 0..h {
            for x in 0..w {
                if let Some(cell) = layer.get(x, y)
                    && !cell.is_empty()
                {
                    self.set_raw(x, y, *cell);
                }
            }
        }
    }

    /// Check if two buffers have identical content.
    pub fn content_eq(&self, other: &Buffer) -> bool {
        self.width == other.width && self.height == other.height && self.cells == other.cells
    }
}

impl Default for Buffer {
    /// Create a 1x1 buffer (minimum size).
    fn default() -> Self {
        Self::new(1, 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn char_at(buf: &Buffer, x: u16, y: u16) -> Option<char> {
        buf.get(x, y).and_then(|c| c.content.as_char())
    }

    #[test]
    fn new_buffer_is_blank() {
        let buf = Buffer::new(4, 2);
        assert_eq!(buf.len(), 8);
        assert!(buf.cells().iter().all(Cell::is_empty));
    }

    #[test]
    fn zero_dimensions_are_bumped() {
        let buf = Buffer::new(0, 0);
        assert_eq!((buf.width(), buf.height()), (1, 1));
    }

    #[test]
    fn set_and_get() {
        let mut buf = Buffer::new(3, 3);
        buf.set(1, 2, Cell::from_char('x'));
        assert_eq!(char_at(&buf, 1, 2), Some('x'));
        assert!(buf.get(3, 0).is_none());
    }

    #[test]
    fn set_outside_scissor_is_ignored() {
        let mut buf = Buffer::new(5, 1);
        buf.push_scissor(Rect::new(0, 0, 2, 1));
        buf.set(3, 0, Cell::from_char('z'));
        assert!(buf.get(3, 0).unwrap().is_empty());
        buf.pop_scissor();
        buf.set(3, 0, Cell::from_char('z'));
        assert_eq!(char_at(&buf, 3, 0), Some('z'));
    }

    #[test]
    fn scissor_stack_intersects_and_keeps_base() {
        let mut buf = Buffer::new(10, 10);
        buf.push_scissor(Rect::new(0, 0, 6, 6));
        buf.push_scissor(Rect::new(4, 4, 6, 6));
        assert_eq!(buf.current_scissor(), Rect::new(4, 4, 2, 2));
        buf.pop_scissor();
        buf.pop_scissor();
        buf.pop_scissor();
        assert_eq!(buf.scissor_depth(), 1);
        assert_eq!(buf.current_scissor(), buf.bounds());
    }

    #[test]
    fn wide_char_writes_continuation() {
        let mut buf = Buffer::new(4, 1);
        buf.set(0, 0, Cell::from_char('界'));
        assert_eq!(char_at(&buf, 0, 0), Some('界'));
        assert!(buf.get(1, 0).unwrap().is_continuation());
    }

    #[test]
    fn wide_char_at_edge_is_dropped() {
        let mut buf = Buffer::new(2, 1);
        buf.set(1, 0, Cell::from_char('界'));
        assert!(buf.get(1, 0).unwrap().is_empty());
    }

    #[test]
    fn overwriting_continuation_blanks_head() {
        let mut buf = Buffer::new(4, 1);
        buf.set(0, 0, Cell::from_char('界'));
        buf.set(1, 0, Cell::from_char('a'));
        assert_eq!(char_at(&buf, 0, 0), Some(' '));
        assert_eq!(char_at(&buf, 1, 0), Some('a'));
    }

    #[test]
    fn fill_respects_rect() {
        let mut buf = Buffer::new(4, 4);
        buf.fill(Rect::new(1, 1, 2, 2), Cell::from_char('#'));
        assert_eq!(char_at(&buf, 1, 1), Some('#'));
        assert_eq!(char_at(&buf, 2, 2), Some('#'));
        assert!(buf.get(0, 0).unwrap().is_empty());
        assert!(buf.get(3, 3).unwrap().is_empty());
    }

    #[test]
    fn overlay_copies_only_drawn_cells() {
        let mut base = Buffer::new(3, 1);
        base.set(0, 0, Cell::from_char('a'));
        base.set(1, 0, Cell::from_char('b'));
        let mut layer = Buffer::new(3, 1);
        layer.set(1, 0, Cell::from_char('X'));
        base.overlay(&layer);
        assert_eq!(char_at(&base, 0, 0), Some('a'));
        assert_eq!(char_at(&base, 1, 0), Some('X'));
        assert!(base.get(2, 0).unwrap().is_empty());
    }
}
