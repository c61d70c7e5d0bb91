#![forbid(unsafe_code)]

//! Cell types: content, colors, and style attributes.
//!
//! A [`Cell`] is one terminal grid position. Content is a single Unicode
//! scalar; multi-codepoint clusters are reduced to their base character by
//! the text helpers before they reach the grid.
//!
//! # Invariants
//!
//! - `CellContent::EMPTY` marks a cell nothing has been drawn to
//! - `CellContent::CONTINUATION` fills the trailing cell of a wide character

use crate::char_width;

/// Character content of a cell.
///
/// Encoding:
/// - `EMPTY` (0x0): nothing drawn, width 0
/// - `CONTINUATION` (0x7FFF_FFFF): placeholder for wide character continuation
/// - anything else: a Unicode scalar value
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
#[repr(transparent)]
pub struct CellContent(u32);

impl CellContent {
    /// Empty cell content (no character).
    pub const EMPTY: Self = Self(0);

    /// Continuation marker for wide characters.
    ///
    /// Outside the valid Unicode scalar range, so it never collides with a char.
    pub const CONTINUATION: Self = Self(0x7FFF_FFFF);

    /// Create content from a single Unicode character.
    #[inline]
    pub const fn from_char(c: char) -> Self {
        Self(c as u32)
    }

    /// Check if this is a continuation cell (part of a wide character).
    #[inline]
    pub const fn is_continuation(self) -> bool {
        self.0 == Self::CONTINUATION.0
    }

    /// Check if this cell is empty.
    #[inline]
    pub const fn is_empty(self) -> bool {
        self.0 == Self::EMPTY.0
    }

    /// Extract the character.
    ///
    /// Returns `None` for empty and continuation cells.
    #[inline]
    pub fn as_char(self) -> Option<char> {
        if self.is_empty() || self.is_continuation() {
            None
        } else {
            char::from_u32(self.0)
        }
    }

    /// Display width of this content with Unicode width semantics.
    #[inline]
    pub fn width(self) -> usize {
        match self.as_char() {
            Some(c) => char_width(c),
            None => 0,
        }
    }

    /// Raw u32 value.
    #[inline]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl Default for CellContent {
    fn default() -> Self {
        Self::EMPTY
    }
}

impl core::fmt::Debug for CellContent {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        if self.is_empty() {
            f.write_str("Empty")
        } else if self.is_continuation() {
            f.write_str("Continuation")
        } else if let Some(c) = self.as_char() {
            write!(f, "Char({c:?})")
        } else {
            write!(f, "Invalid({:#x})", self.0)
        }
    }
}

/// A compact RGBA color.
///
/// Layout: `0xRRGGBBAA` (R in bits 31..24, A in bits 7..0).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
#[repr(transparent)]
pub struct PackedRgba(pub u32);

impl PackedRgba {
    /// Fully transparent (alpha = 0).
    pub const TRANSPARENT: Self = Self(0);
    /// Opaque black.
    pub const BLACK: Self = Self::rgb(0, 0, 0);
    /// Opaque white.
    pub const WHITE: Self = Self::rgb(255, 255, 255);

    /// Create an opaque RGB color (alpha = 255).
    #[inline]
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::rgba(r, g, b, 255)
    }

    /// Create an RGBA color with explicit alpha.
    #[inline]
    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self(((r as u32) << 24) | ((g as u32) << 16) | ((b as u32) << 8) | (a as u32))
    }

    /// Red channel.
    #[inline]
    pub const fn r(self) -> u8 {
        (self.0 >> 24) as u8
    }

    /// Green channel.
    #[inline]
    pub const fn g(self) -> u8 {
        (self.0 >> 16) as u8
    }

    /// Blue channel.
    #[inline]
    pub const fn b(self) -> u8 {
        (self.0 >> 8) as u8
    }

    /// Alpha channel.
    #[inline]
    pub const fn a(self) -> u8 {
        self.0 as u8
    }
}

bitflags::bitflags! {
    /// 8-bit cell style flags.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct StyleFlags: u8 {
        /// Bold / increased intensity.
        const BOLD          = 0b0000_0001;
        /// Dim / decreased intensity.
        const DIM           = 0b0000_0010;
        /// Italic text.
        const ITALIC        = 0b0000_0100;
        /// Underlined text.
        const UNDERLINE     = 0b0000_1000;
        /// Blinking text.
        const BLINK         = 0b0001_0000;
        /// Reverse video (swap fg/bg).
        const REVERSE       = 0b0010_0000;
        /// Strikethrough text.
        const STRIKETHROUGH = 0b0100_0000;
        /// Hidden / invisible text.
        const HIDDEN        = 0b1000_0000;
    }
}

/// Packed cell attributes (style flags in the low byte).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
#[repr(transparent)]
pub struct CellAttrs(u8);

impl CellAttrs {
    /// No attributes.
    pub const NONE: Self = Self(0);

    /// Create attributes from flags.
    #[inline]
    pub const fn new(flags: StyleFlags) -> Self {
        Self(flags.bits())
    }

    /// Extract the style flags.
    #[inline]
    pub const fn flags(self) -> StyleFlags {
        StyleFlags::from_bits_truncate(self.0)
    }

    /// Return a copy with the given flags added.
    #[inline]
    pub const fn with_flags(self, flags: StyleFlags) -> Self {
        Self(self.0 | flags.bits())
    }

    /// Check whether a specific flag is set.
    #[inline]
    pub const fn has_flag(self, flag: StyleFlags) -> bool {
        self.flags().contains(flag)
    }
}

/// A single terminal cell.
///
/// The default cell is empty with transparent background, white foreground,
/// and no style attributes.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Cell {
    /// Character content.
    pub content: CellContent,
    /// Foreground color.
    pub fg: PackedRgba,
    /// Background color.
    pub bg: PackedRgba,
    /// Style flags.
    pub attrs: CellAttrs,
}

impl Cell {
    /// A continuation cell (placeholder for wide characters).
    pub const CONTINUATION: Self = Self {
        content: CellContent::CONTINUATION,
        fg: PackedRgba::TRANSPARENT,
        bg: PackedRgba::TRANSPARENT,
        attrs: CellAttrs::NONE,
    };

    /// Create a new cell with the given content and default colors.
    #[inline]
    pub const fn new(content: CellContent) -> Self {
        Self {
            content,
            fg: PackedRgba::WHITE,
            bg: PackedRgba::TRANSPARENT,
            attrs: CellAttrs::NONE,
        }
    }

    /// Create a cell from a single character.
    #[inline]
    pub const fn from_char(c: char) -> Self {
        Self::new(CellContent::from_char(c))
    }

    /// Check if this is a continuation cell.
    #[inline]
    pub const fn is_continuation(&self) -> bool {
        self.content.is_continuation()
    }

    /// Check if this cell is empty.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.content.is_empty()
    }

    /// Set the cell content to a character, preserving other fields.
    #[inline]
    pub const fn with_char(mut self, c: char) -> Self {
        self.content = CellContent::from_char(c);
        self
    }

    /// Set the foreground color.
    #[inline]
    pub const fn with_fg(mut self, fg: PackedRgba) -> Self {
        self.fg = fg;
        self
    }

    /// Set the background color.
    #[inline]
    pub const fn with_bg(mut self, bg: PackedRgba) -> Self {
        self.bg = bg;
        self
    }

    /// Set the style attributes.
    #[inline]
    pub const fn with_attrs(mut self, attrs: CellAttrs) -> Self {
        self.attrs = attrs;
        self
    }
}

impl Default for Cell {
    fn default() -> Self {
        Self::new(CellContent::EMPTY)
    }
}

impl core::fmt::Debug for Cell {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Cell")
            .field("content", &self.content)
            .field("fg", &self.fg)
            .field("bg", &self.bg)
            .field("attrs", &self.attrs)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::{Cell, CellAttrs, CellContent, PackedRgba, StyleFlags};

    #[test]
    fn content_sentinels() {
        assert!(CellContent::EMPTY.is_empty());
        assert!(CellContent::CONTINUATION.is_continuation());
        assert_eq!(CellContent::EMPTY.as_char(), None);
        assert_eq!(CellContent::CONTINUATION.as_char(), None);
        assert_eq!(CellContent::from_char('x').as_char(), Some('x'));
    }

    #[test]
    fn content_width() {
        assert_eq!(CellContent::from_char('a').width(), 1);
        assert_eq!(CellContent::from_char('界').width(), 2);
        assert_eq!(CellContent::EMPTY.width(), 0);
    }

    #[test]
    fn rgba_channels_roundtrip() {
        let c = PackedRgba::rgba(1, 2, 3, 4);
        assert_eq!((c.r(), c.g(), c.b(), c.a()), (1, 2, 3, 4));
        assert_eq!(PackedRgba::rgb(9, 8, 7).a(), 255);
    }

    #[test]
    fn attrs_accumulate_flags() {
        let attrs = CellAttrs::new(StyleFlags::BOLD).with_flags(StyleFlags::UNDERLINE);
        assert!(attrs.has_flag(StyleFlags::BOLD));
        assert!(attrs.has_flag(StyleFlags::UNDERLINE));
        assert!(!attrs.has_flag(StyleFlags::DIM));
    }

    #[test]
    fn default_cell_is_empty() {
        let cell = Cell::default();
        assert!(cell.is_empty());
        assert_eq!(cell.fg, PackedRgba::WHITE);
        assert_eq!(cell.bg, PackedRgba::TRANSPARENT);
    }

    #[test]
    fn builders_set_fields() {
        let cell = Cell::from_char('A')
            .with_fg(PackedRgba::BLACK)
            .with_bg(PackedRgba::WHITE)
            .with_attrs(CellAttrs::new(StyleFlags::REVERSE));
        assert_eq!(cell.content.as_char(), Some('A'));
        assert_eq!(cell.fg, PackedRgba::BLACK);
        assert!(cell.attrs.has_flag(StyleFlags::REVERSE));
    }
}
