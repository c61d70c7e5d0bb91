#![forbid(unsafe_code)]

//! Style types for IzenDoc widgets.
//!
//! A [`Style`] is a sparse patch over a cell: only the fields that are set
//! are applied. [`Theme`] maps semantic slots to concrete colors.

pub mod theme;

pub use izui_render::cell::{PackedRgba, StyleFlags};
pub use theme::{Theme, ThemeMode};

use izui_render::cell::Cell;

/// A sparse cell style.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct Style {
    /// Foreground color, if set.
    pub fg: Option<PackedRgba>,
    /// Background color, if set.
    pub bg: Option<PackedRgba>,
    /// Attribute flags, if set. Applied additively.
    pub attrs: Option<StyleFlags>,
}

impl Style {
    /// An empty style.
    #[inline]
    pub const fn new() -> Self {
        Self {
            fg: None,
            bg: None,
            attrs: None,
        }
    }

    /// Set the foreground color.
    #[inline]
    #[must_use]
    pub const fn fg(mut self, color: PackedRgba) -> Self {
        self.fg = Some(color);
        self
    }

    /// Set the background color.
    #[inline]
    #[must_use]
    pub const fn bg(mut self, color: PackedRgba) -> Self {
        self.bg = Some(color);
        self
    }

    /// Add attribute flags.
    #[inline]
    #[must_use]
    pub fn add_modifier(mut self, flags: StyleFlags) -> Self {
        self.attrs = Some(self.attrs.unwrap_or_default() | flags);
        self
    }

    /// Shorthand for bold.
    #[inline]
    #[must_use]
    pub fn bold(self) -> Self {
        self.add_modifier(StyleFlags::BOLD)
    }

    /// Shorthand for dim.
    #[inline]
    #[must_use]
    pub fn dim(self) -> Self {
        self.add_modifier(StyleFlags::DIM)
    }

    /// Shorthand for reverse video.
    #[inline]
    #[must_use]
    pub fn reverse(self) -> Self {
        self.add_modifier(StyleFlags::REVERSE)
    }

    /// Shorthand for underline.
    #[inline]
    #[must_use]
    pub fn underline(self) -> Self {
        self.add_modifier(StyleFlags::UNDERLINE)
    }

    /// True if no field is set.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.fg.is_none() && self.bg.is_none() && self.attrs.is_none()
    }

    /// Layer `other` over `self`; fields set in `other` win, flags union.
    #[must_use]
    pub fn patch(self, other: Style) -> Self {
        Self {
            fg: other.fg.or(self.fg),
            bg: other.bg.or(self.bg),
            attrs: match (self.attrs, other.attrs) {
                (Some(a), Some(b)) => Some(a | b),
                (a, b) => b.or(a),
            },
        }
    }

    /// Apply the set fields to a cell, keeping its content.
    pub fn apply_to(&self, cell: &mut Cell) {
        if let Some(fg) = self.fg {
            cell.fg = fg;
        }
        if let Some(bg) = self.bg {
            cell.bg = bg;
        }
        if let Some(attrs) = self.attrs {
            cell.attrs = cell.attrs.with_flags(attrs);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_empty() {
        assert!(Style::default().is_empty());
        assert!(!Style::new().bold().is_empty());
    }

    #[test]
    fn patch_prefers_other() {
        let red = PackedRgba::rgb(255, 0, 0);
        let blue = PackedRgba::rgb(0, 0, 255);
        let base = Style::new().fg(red).bg(red).bold();
        let merged = base.patch(Style::new().fg(blue).underline());
        assert_eq!(merged.fg, Some(blue));
        assert_eq!(merged.bg, Some(red));
        assert_eq!(merged.attrs, Some(StyleFlags::BOLD | StyleFlags::UNDERLINE));
    }

    #[test]
    fn apply_keeps_content() {
        let mut cell = Cell::from_char('q');
        Style::new().bg(PackedRgba::BLACK).reverse().apply_to(&mut cell);
        assert_eq!(cell.content.as_char(), Some('q'));
        assert_eq!(cell.bg, PackedRgba::BLACK);
        assert!(cell.attrs.has_flag(StyleFlags::REVERSE));
    }

    #[test]
    fn empty_style_is_noop() {
        let before = Cell::from_char('a').with_fg(PackedRgba::rgb(1, 2, 3));
        let mut after = before;
        Style::default().apply_to(&mut after);
        assert_eq!(before, after);
    }
}
