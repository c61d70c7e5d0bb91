#![forbid(unsafe_code)]

//! Frame = Buffer + metadata for a render pass.
//!
//! The `Frame` bundles the cell grid ([`Buffer`]) with cursor state, an
//! optional hit grid for mouse interaction, and a lazily created portal
//! layer for overlays that must escape their parent's clipping.
//!
//! # Portal layer
//!
//! [`Frame::portal`] returns a full-screen child frame. Anything drawn there
//! ignores the scissor stack of the main buffer and is composited on top of
//! it by [`Frame::compose`]. Hit tests consult the portal first, so an open
//! overlay shadows whatever is beneath it.
//!
//! ```
//! use izui_render::frame::Frame;
//! use izui_render::cell::Cell;
//! use izui_core::geometry::Rect;
//!
//! let mut frame = Frame::new(10, 4);
//! frame.buffer.push_scissor(Rect::new(0, 0, 2, 1));
//! frame.portal().buffer.set(5, 3, Cell::from_char('P'));
//! frame.buffer.pop_scissor();
//! frame.compose();
//! assert_eq!(frame.buffer.get(5, 3).and_then(|c| c.content.as_char()), Some('P'));
//! ```

use crate::buffer::Buffer;
use crate::cell::{Cell, PackedRgba};
use crate::drawing::{BorderChars, Draw};
use izui_core::geometry::Rect;

/// Identifier for a clickable region in the hit grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct HitId(pub u32);

impl HitId {
    /// Create a new hit ID from a raw value.
    #[inline]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Get the raw ID value.
    #[inline]
    pub const fn id(self) -> u32 {
        self.0
    }
}

/// Opaque user data for hit callbacks.
pub type HitData = u64;

/// Regions within a widget for mouse interaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum HitRegion {
    /// No interactive region.
    #[default]
    None,
    /// Main content area.
    Content,
    /// Widget border area.
    Border,
    /// Scrollbar track or thumb.
    Scrollbar,
    /// Resize handle or drag target.
    Handle,
    /// Clickable button.
    Button,
    /// Hyperlink.
    Link,
    /// Custom region tag.
    Custom(u8),
}

/// A single hit cell in the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct HitCell {
    /// Widget that registered this cell, if any.
    pub widget_id: Option<HitId>,
    /// Region tag for the hit area.
    pub region: HitRegion,
    /// Extra data attached to this hit cell.
    pub data: HitData,
}

impl HitCell {
    /// Create a populated hit cell.
    #[inline]
    pub const fn new(widget_id: HitId, region: HitRegion, data: HitData) -> Self {
        Self {
            widget_id: Some(widget_id),
            region,
            data,
        }
    }

    /// Check if the cell is empty.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.widget_id.is_none()
    }
}

/// Hit testing grid for mouse interaction.
///
/// Maps screen positions to widget IDs. Later registrations overwrite
/// earlier ones.
#[derive(Debug, Clone)]
pub struct HitGrid {
    width: u16,
    height: u16,
    cells: Vec<HitCell>,
}

impl HitGrid {
    /// Create a new hit grid with the given dimensions.
    pub fn new(width: u16, height: u16) -> Self {
        let size = width as usize * height as usize;
        Self {
            width,
            height,
            cells: vec![HitCell::default(); size],
        }
    }

    #[inline]
    fn index(&self, x: u16, y: u16) -> Option<usize> {
        if x < self.width && y < self.height {
            Some(y as usize * self.width as usize + x as usize)
        } else {
            None
        }
    }

    /// Get the hit cell at (x, y).
    #[inline]
    pub fn get(&self, x: u16, y: u16) -> Option<&HitCell> {
        self.index(x, y).map(|i| &self.cells[i])
    }

    /// Register a clickable region with the given hit metadata.
    pub fn register(&mut self, rect: Rect, widget_id: HitId, region: HitRegion, data: HitData) {
        let x_end = (rect.x as usize + rect.width as usize).min(self.width as usize);
        let y_end = (rect.y as usize + rect.height as usize).min(self.height as usize);
        if rect.x as usize >= x_end || rect.y as usize >= y_end {
            return;
        }

        let hit_cell = HitCell::new(widget_id, region, data);
        for y in rect.y as usize..y_end {
            let row_start = y * self.width as usize;
            self.cells[row_start + rect.x as usize..row_start + x_end].fill(hit_cell);
        }
    }

    /// Hit test at the given position.
    pub fn hit_test(&self, x: u16, y: u16) -> Option<(HitId, HitRegion, HitData)> {
        self.get(x, y)
            .and_then(|cell| cell.widget_id.map(|id| (id, cell.region, cell.data)))
    }

    /// Clear all hit regions.
    pub fn clear(&mut self) {
        self.cells.fill(HitCell::default());
    }
}

/// The render target for one pass.
#[derive(Debug, Clone)]
pub struct Frame {
    /// The cell grid widgets draw into.
    pub buffer: Buffer,
    /// Optional hit grid; `None` disables hit registration.
    pub hit_grid: Option<HitGrid>,
    /// Cursor position requested by the focused widget.
    pub cursor_position: Option<(u16, u16)>,
    /// Whether the cursor should be shown.
    pub cursor_visible: bool,
    portal: Option<Box<Frame>>,
}

impl Frame {
    /// Create a frame without hit testing.
    pub fn new(width: u16, height: u16) -> Self {
        Self {
            buffer: Buffer::new(width, height),
            hit_grid: None,
            cursor_position: None,
            cursor_visible: true,
            portal: None,
        }
    }

    /// Create a frame with hit testing enabled.
    pub fn with_hit_grid(width: u16, height: u16) -> Self {
        let mut frame = Self::new(width, height);
        frame.hit_grid = Some(HitGrid::new(frame.width(), frame.height()));
        frame
    }

    /// Frame width.
    #[inline]
    pub fn width(&self) -> u16 {
        self.buffer.width()
    }

    /// Frame height.
    #[inline]
    pub fn height(&self) -> u16 {
        self.buffer.height()
    }

    /// Full-frame rect.
    #[inline]
    pub fn bounds(&self) -> Rect {
        self.buffer.bounds()
    }

    /// Reset cells, hits, cursor, and the portal for the next pass.
    pub fn clear(&mut self) {
        self.buffer.clear();
        if let Some(grid) = self.hit_grid.as_mut() {
            grid.clear();
        }
        self.cursor_position = None;
        self.portal = None;
    }

    /// Request the cursor at a position, or hide it with `None`.
    pub fn set_cursor(&mut self, position: Option<(u16, u16)>) {
        self.cursor_position = position;
    }

    /// Toggle cursor visibility.
    pub fn set_cursor_visible(&mut self, visible: bool) {
        self.cursor_visible = visible;
    }

    /// Register a hit region (if hit grid is enabled).
    ///
    /// The region is clipped to the current scissor. Returns `false` when
    /// hit testing is off.
    pub fn register_hit(&mut self, rect: Rect, id: HitId, region: HitRegion, data: HitData) -> bool {
        let scissor = self.buffer.current_scissor();
        if let Some(grid) = self.hit_grid.as_mut() {
            let clipped = rect.intersection(&scissor);
            if !clipped.is_empty() {
                grid.register(clipped, id, region, data);
            }
            true
        } else {
            false
        }
    }

    /// Hit test at the given position.
    ///
    /// Portal hits shadow the main layer.
    pub fn hit_test(&self, x: u16, y: u16) -> Option<(HitId, HitRegion, HitData)> {
        if let Some(hit) = self.portal.as_ref().and_then(|p| p.hit_test(x, y)) {
            return Some(hit);
        }
        self.hit_grid.as_ref().and_then(|grid| grid.hit_test(x, y))
    }

    /// The overlay layer, created on first use.
    ///
    /// The portal spans the whole frame and starts with a fresh scissor
    /// stack, so content drawn there is not clipped by the caller's area.
    pub fn portal(&mut self) -> &mut Frame {
        let (width, height) = (self.width(), self.height());
        let with_hits = self.hit_grid.is_some();
        self.portal.get_or_insert_with(|| {
            Box::new(if with_hits {
                Frame::with_hit_grid(width, height)
            } else {
                Frame::new(width, height)
            })
        })
    }

    /// Whether anything requested the portal this pass.
    #[inline]
    pub fn has_portal(&self) -> bool {
        self.portal.is_some()
    }

    /// Composite the portal onto the main buffer.
    ///
    /// Drawn portal cells replace main cells; the portal's cursor request
    /// wins if it made one. The portal's hit grid stays in place so
    /// hit tests keep seeing the overlay.
    pub fn compose(&mut self) {
        let Some(portal) = self.portal.as_mut() else {
            return;
        };
        #[cfg(feature = "tracing")]
        let _span = tracing::trace_span!("portal_compose").entered();
        portal.compose();
        self.buffer.overlay(&portal.buffer);
        if portal.cursor_position.is_some() {
            self.cursor_position = portal.cursor_position;
            self.cursor_visible = portal.cursor_visible;
        }
    }

    /// Compose and hand back the final buffer.
    pub fn into_buffer(mut self) -> Buffer {
        self.compose();
        self.buffer
    }
}

impl Draw for Frame {
    fn draw_horizontal_line(&mut self, x: u16, y: u16, width: u16, cell: Cell) {
        self.buffer.draw_horizontal_line(x, y, width, cell);
    }

    fn draw_vertical_line(&mut self, x: u16, y: u16, height: u16, cell: Cell) {
        self.buffer.draw_vertical_line(x, y, height, cell);
    }

    fn draw_rect_filled(&mut self, rect: Rect, cell: Cell) {
        self.buffer.draw_rect_filled(rect, cell);
    }

    fn print_text(&mut self, x: u16, y: u16, text: &str, base_cell: Cell) -> u16 {
        self.buffer.print_text(x, y, text, base_cell)
    }

    fn print_text_clipped(
        &mut self,
        x: u16,
        y: u16,
        text: &str,
        base_cell: Cell,
        max_x: u16,
    ) -> u16 {
        self.buffer.print_text_clipped(x, y, text, base_cell, max_x)
    }

    fn draw_border(&mut self, rect: Rect, chars: BorderChars, base_cell: Cell) {
        self.buffer.draw_border(rect, chars, base_cell);
    }

    fn draw_box(&mut self, rect: Rect, chars: BorderChars, border_cell: Cell, fill_cell: Cell) {
        self.buffer.draw_box(rect, chars, border_cell, fill_cell);
    }

    fn paint_area(&mut self, rect: Rect, fg: Option<PackedRgba>, bg: Option<PackedRgba>) {
        self.buffer.paint_area(rect, fg, bg);
    }
}
