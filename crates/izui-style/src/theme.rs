#![forbid(unsafe_code)]

//! Semantic color slots.
//!
//! ```
//! use izui_style::theme::{Theme, ThemeMode};
//!
//! let theme = Theme::for_mode(ThemeMode::Light);
//! assert_ne!(theme.text, theme.surface);
//! ```

use izui_render::cell::PackedRgba;
use std::env;

/// Light or dark terminal background.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub enum ThemeMode {
    #[default]
    Dark,
    Light,
}

impl ThemeMode {
    /// Detect the mode from the environment.
    ///
    /// `IZUI_THEME=light|dark` wins; otherwise `COLORFGBG` is consulted;
    /// otherwise dark.
    #[must_use]
    pub fn detect() -> Self {
        Self::from_env_values(
            env::var("IZUI_THEME").ok().as_deref(),
            env::var("COLORFGBG").ok().as_deref(),
        )
    }

    fn from_env_values(explicit: Option<&str>, colorfgbg: Option<&str>) -> Self {
        if let Some(mode) = explicit.and_then(Self::parse) {
            return mode;
        }
        // COLORFGBG is "fg;bg" with ANSI indices; 7 and 15 are light backgrounds.
        if let Some(colorfgbg) = colorfgbg
            && let Some(bg_part) = colorfgbg.split(';').next_back()
            && let Ok(bg) = bg_part.trim().parse::<u8>()
            && (bg == 7 || bg == 15)
        {
            return Self::Light;
        }
        Self::Dark
    }

    /// Parse `"light"` or `"dark"`, case-insensitively.
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "light" => Some(Self::Light),
            "dark" => Some(Self::Dark),
            _ => None,
        }
    }
}

/// Resolved semantic colors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Theme {
    /// Resting surface of controls.
    pub surface: PackedRgba,
    /// Background of floating panels.
    pub overlay: PackedRgba,
    /// Primary text.
    pub text: PackedRgba,
    /// Secondary text.
    pub text_muted: PackedRgba,
    /// Placeholders and hints.
    pub text_subtle: PackedRgba,
    /// Default border.
    pub border: PackedRgba,
    /// Border of the focused control.
    pub border_focused: PackedRgba,
    /// Highlight background.
    pub selection_bg: PackedRgba,
    /// Highlight foreground.
    pub selection_fg: PackedRgba,
    /// Accent for checkmarks and chips.
    pub accent: PackedRgba,
    /// Chip background.
    pub chip_bg: PackedRgba,
    /// Disabled text.
    pub disabled: PackedRgba,
}

impl Theme {
    /// Dark palette.
    pub const fn dark() -> Self {
        Self {
            surface: PackedRgba::rgb(30, 30, 36),
            overlay: PackedRgba::rgb(40, 40, 48),
            text: PackedRgba::rgb(230, 230, 235),
            text_muted: PackedRgba::rgb(170, 170, 180),
            text_subtle: PackedRgba::rgb(140, 140, 150),
            border: PackedRgba::rgb(90, 90, 105),
            border_focused: PackedRgba::rgb(110, 170, 255),
            selection_bg: PackedRgba::rgb(60, 90, 140),
            selection_fg: PackedRgba::rgb(255, 255, 255),
            accent: PackedRgba::rgb(120, 200, 140),
            chip_bg: PackedRgba::rgb(55, 60, 75),
            disabled: PackedRgba::rgb(100, 100, 110),
        }
    }

    /// Light palette.
    pub const fn light() -> Self {
        Self {
            surface: PackedRgba::rgb(250, 250, 252),
            overlay: PackedRgba::rgb(255, 255, 255),
            text: PackedRgba::rgb(25, 25, 30),
            text_muted: PackedRgba::rgb(80, 80, 90),
            text_subtle: PackedRgba::rgb(110, 110, 120),
            border: PackedRgba::rgb(180, 180, 190),
            border_focused: PackedRgba::rgb(30, 100, 210),
            selection_bg: PackedRgba::rgb(210, 225, 250),
            selection_fg: PackedRgba::rgb(10, 10, 20),
            accent: PackedRgba::rgb(20, 130, 60),
            chip_bg: PackedRgba::rgb(225, 230, 240),
            disabled: PackedRgba::rgb(160, 160, 168),
        }
    }

    /// Palette for a mode.
    pub const fn for_mode(mode: ThemeMode) -> Self {
        match mode {
            ThemeMode::Dark => Self::dark(),
            ThemeMode::Light => Self::light(),
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::dark()
    }
}
