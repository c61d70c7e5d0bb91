#![forbid(unsafe_code)]

//! Trigger surface: placeholder, chips, or count, plus clear and arrow.

use izui_core::geometry::{Rect, Sides};
use izui_render::drawing::{BorderChars, Draw};
use izui_render::frame::{Frame, HitRegion};
use izui_style::Style;
use unicode_width::UnicodeWidthStr;

use super::selection::{Summary, display_summary, selected_options};
use super::state::{Layout, UiInner};
use super::strings::Strings;
use super::MultiSelect;
use crate::{draw_text_span, styled, truncate_to_width};

/// Hit data for the clear-all control.
pub(crate) const HIT_CLEAR: u64 = u64::MAX;
/// Hit data for the trigger body.
pub(crate) const HIT_TRIGGER: u64 = u64::MAX - 1;

const ARROW_CLOSED: &str = "▾";
const ARROW_OPEN: &str = "▴";
const REMOVE_MARK: &str = "×";

pub(super) fn render_trigger(
    ms: &MultiSelect<'_>,
    area: Rect,
    frame: &mut Frame,
    ui: &UiInner,
    strings: &Strings<'_>,
    layout: &mut Layout,
) {
    let bordered = area.height >= 3 && area.width >= 4;
    let trigger = Rect::new(area.x, area.y, area.width, if bordered { 3 } else { 1 });
    layout.trigger = trigger;

    let base = if ms.disabled {
        ms.style.trigger.patch(ms.style.disabled)
    } else {
        ms.style.trigger
    };
    frame.buffer.fill(trigger, styled(' ', base));

    if bordered {
        let border_style = if ms.disabled {
            ms.style.border.patch(ms.style.disabled)
        } else if ui.trigger_focused {
            ms.style.border_focused
        } else {
            ms.style.border
        };
        frame.draw_border(trigger, BorderChars::ROUNDED, styled(' ', base.patch(border_style)));
        if let Some(label) = ms.label.as_deref() {
            let room = trigger.width.saturating_sub(4) as usize;
            if room > 2 {
                let text = format!(" {} ", truncate_to_width(label, room - 2));
                draw_text_span(
                    &mut frame.buffer,
                    trigger.x + 1,
                    trigger.y,
                    &text,
                    base.patch(ms.style.label),
                    trigger.right() - 1,
                );
            }
        }
    }

    let content = if bordered {
        trigger.inner(Sides::all(1))
    } else {
        trigger
    };
    let y = content.y;
    let left = content.x + 1;
    let right = content.right().saturating_sub(1);
    if right <= left {
        return;
    }

    // Arrow on the far right, clear-all just before it.
    let arrow_x = right - 1;
    let arrow = if ui.is_open { ARROW_OPEN } else { ARROW_CLOSED };
    draw_text_span(&mut frame.buffer, arrow_x, y, arrow, base.patch(ms.style.arrow), right);
    let mut content_right = arrow_x.saturating_sub(1);

    let show_clear = ms.clearable && !ms.disabled && !ms.selected.is_empty();
    if show_clear && content_right > left + 1 {
        let clear_x = content_right - 1;
        draw_text_span(
            &mut frame.buffer,
            clear_x,
            y,
            REMOVE_MARK,
            base.patch(ms.style.clear),
            content_right,
        );
        layout.clear = Some(Rect::new(clear_x, y, 1, 1));
        content_right = clear_x.saturating_sub(1);
    }

    let placeholder = ms
        .placeholder
        .clone()
        .unwrap_or_else(|| strings.placeholder());
    match display_summary(ms.selected, ms.max_displayed_chips, &placeholder, strings) {
        Summary::Placeholder(text) => {
            let fitted = truncate_to_width(&text, content_right.saturating_sub(left) as usize);
            draw_text_span(
                &mut frame.buffer,
                left,
                y,
                &fitted,
                base.patch(ms.style.placeholder),
                content_right,
            );
        }
        Summary::Count(text) => {
            let fitted = truncate_to_width(&text, content_right.saturating_sub(left) as usize);
            draw_text_span(
                &mut frame.buffer,
                left,
                y,
                &fitted,
                base.patch(ms.style.count),
                content_right,
            );
        }
        Summary::Chips => draw_chips(ms, frame, left, y, content_right, base, layout),
    }

    if let Some(id) = ms.hit_id {
        frame.register_hit(trigger, id, HitRegion::Content, HIT_TRIGGER);
        for (i, (rect, _)) in layout.chip_removes.iter().enumerate() {
            frame.register_hit(*rect, id, HitRegion::Button, i as u64);
        }
        if let Some(rect) = layout.clear {
            frame.register_hit(rect, id, HitRegion::Button, HIT_CLEAR);
        }
    }
}

/// Chips read `Label ×`, one space apart, truncated to fit.
fn draw_chips(
    ms: &MultiSelect<'_>,
    frame: &mut Frame,
    left: u16,
    y: u16,
    right: u16,
    base: Style,
    layout: &mut Layout,
) {
    let chip_style = base.patch(ms.style.chip);
    let remove_style = base.patch(ms.style.chip_remove);
    let removable = !ms.disabled;
    let suffix = if removable { 2 } else { 0 };

    let mut x = left;
    for option in selected_options(ms.options, ms.selected) {
        let room = right.saturating_sub(x) as usize;
        // Smallest useful chip: one glyph, an ellipsis, and the remove mark.
        if room < suffix + 2 {
            break;
        }
        let label = truncate_to_width(&option.label, room - suffix);
        x = draw_text_span(&mut frame.buffer, x, y, &label, chip_style, right);
        if removable {
            x = draw_text_span(&mut frame.buffer, x, y, " ", chip_style, right);
            let mark_x = x;
            x = draw_text_span(&mut frame.buffer, x, y, REMOVE_MARK, remove_style, right);
            if x > mark_x {
                layout
                    .chip_removes
                    .push((Rect::new(mark_x, y, 1, 1), option.value.clone()));
            }
        }
        x = x.saturating_add(1);
        if UnicodeWidthStr::width(label.as_str()) < UnicodeWidthStr::width(option.label.as_str()) {
            break;
        }
    }
}
