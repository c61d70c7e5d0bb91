#![forbid(unsafe_code)]

use izui_style::{Style, Theme};

/// Visual styling for [`MultiSelect`](super::MultiSelect).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MultiSelectStyle {
    /// Trigger surface at rest.
    pub trigger: Style,
    /// Trigger border.
    pub border: Style,
    /// Trigger border while the trigger has keyboard focus.
    pub border_focused: Style,
    /// Visible label drawn in the trigger's top border.
    pub label: Style,
    /// Placeholder text.
    pub placeholder: Style,
    /// A selected-value chip.
    pub chip: Style,
    /// The `×` inside a chip.
    pub chip_remove: Style,
    /// "N selected" summary.
    pub count: Style,
    /// Clear-all control.
    pub clear: Style,
    /// Open/close arrow.
    pub arrow: Style,
    /// Whole trigger when disabled.
    pub disabled: Style,
    /// Panel background and border.
    pub panel: Style,
    /// Search row.
    pub search: Style,
    /// An option row.
    pub option: Style,
    /// The keyboard-focused option row.
    pub option_focused: Style,
    /// Checkbox of a selected option.
    pub check: Style,
    /// A disabled option row.
    pub option_disabled: Style,
    /// Empty-state and search-prompt hints.
    pub hint: Style,
}

impl MultiSelectStyle {
    /// Derive every slot from a theme.
    pub fn from_theme(theme: &Theme) -> Self {
        Self {
            trigger: Style::new().fg(theme.text).bg(theme.surface),
            border: Style::new().fg(theme.border),
            border_focused: Style::new().fg(theme.border_focused).bold(),
            label: Style::new().fg(theme.text_muted),
            placeholder: Style::new().fg(theme.text_subtle),
            chip: Style::new().fg(theme.text).bg(theme.chip_bg),
            chip_remove: Style::new().fg(theme.text_muted).bg(theme.chip_bg),
            count: Style::new().fg(theme.text),
            clear: Style::new().fg(theme.text_muted),
            arrow: Style::new().fg(theme.text_muted),
            disabled: Style::new().fg(theme.disabled).dim(),
            panel: Style::new().fg(theme.border).bg(theme.overlay),
            search: Style::new().fg(theme.text).bg(theme.overlay),
            option: Style::new().fg(theme.text).bg(theme.overlay),
            // Bold as well as color so focus reads without color.
            option_focused: Style::new()
                .fg(theme.selection_fg)
                .bg(theme.selection_bg)
                .bold(),
            check: Style::new().fg(theme.accent),
            option_disabled: Style::new().fg(theme.disabled).dim(),
            hint: Style::new().fg(theme.text_subtle),
        }
    }
}

impl Default for MultiSelectStyle {
    fn default() -> Self {
        // Dark palette contrast against overlay(40,40,48):
        // - text (230,230,235) ≈ 12:1 (AAA)
        // - subtle (140,140,150) ≈ 4.9:1 (AA)
        // - focused (255,255,255) on (60,90,140) ≈ 6.9:1 (AA)
        Self::from_theme(&Theme::dark())
    }
}
