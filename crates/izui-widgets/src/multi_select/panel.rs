#![forbid(unsafe_code)]

//! Overlay panel, drawn into the frame's portal layer.
//!
//! The panel sits at the page position captured when it opened. Each render
//! converts that back to screen rows by subtracting the current page scroll,
//! so a page scrolled after opening moves the panel with the page rather than
//! re-anchoring it to the trigger.

use izui_core::geometry::Rect;
use izui_render::drawing::BorderChars;
use izui_render::frame::{Frame, HitRegion};

use super::state::{Layout, UiInner};
use super::strings::Strings;
use super::MultiSelect;
use crate::{draw_text_span, set_style_area, styled, truncate_to_width};

/// Hit region tag for option rows; hit data is the filtered index.
pub(crate) const OPTION_REGION: HitRegion = HitRegion::Custom(1);

const CHECKED: &str = "[x] ";
const UNCHECKED: &str = "[ ] ";
const FOCUS_MARK: &str = "›";
const SEARCH_MARK: &str = "> ";

/// What goes on one interior row of the panel.
enum RowKind<'t> {
    Search,
    Option { filtered_index: usize },
    Empty(&'t str),
}

pub(super) fn render_panel(
    ms: &MultiSelect<'_>,
    frame: &mut Frame,
    ui: &mut UiInner,
    filtered: &[usize],
    strings: &Strings<'_>,
    layout: &mut Layout,
) {
    let Some(position) = ui.panel_position else {
        return;
    };
    let (scroll_x, scroll_y) = ms.page_scroll;
    let screen_left = i32::from(position.left) - i32::from(scroll_x);
    let screen_top = i32::from(position.top) - i32::from(scroll_y);
    let width = position.width;

    let portal = frame.portal();
    let bounds = portal.bounds();
    if width < 4 || screen_left < 0 || screen_left >= i32::from(bounds.width) {
        return;
    }
    let left = screen_left as u16;
    let width = width.min(bounds.width - left);
    if width < 4 {
        return;
    }

    let visible = ms.visible_rows(filtered.len());
    let max_scroll = filtered.len().saturating_sub(visible);
    ui.list_scroll = ui.list_scroll.min(max_scroll);

    let empty_text = if ms.options.is_empty() {
        strings.no_options()
    } else {
        strings.no_matches()
    };
    let mut rows: Vec<RowKind<'_>> = Vec::with_capacity(visible + 1);
    if ms.searchable {
        rows.push(RowKind::Search);
    }
    if filtered.is_empty() {
        rows.push(RowKind::Empty(&empty_text));
    } else {
        rows.extend(
            (ui.list_scroll..ui.list_scroll + visible)
                .filter(|&i| i < filtered.len())
                .map(|filtered_index| RowKind::Option { filtered_index }),
        );
    }

    let panel_style = ms.style.panel;
    let fill = styled(' ', panel_style);
    let height = rows.len() + 2;
    let inner_left = left + 1;
    let inner_right = left + width - 1;
    let mut visible_rect: Option<Rect> = None;

    for k in 0..height {
        let y = screen_top + k as i32;
        if y < 0 || y >= i32::from(bounds.height) {
            continue;
        }
        let y = y as u16;
        let row_rect = Rect::new(left, y, width, 1);
        visible_rect = Some(visible_rect.map_or(row_rect, |r| r.union(&row_rect)));
        portal.buffer.fill(row_rect, fill);

        let chars = BorderChars::ROUNDED;
        if k == 0 || k == height - 1 {
            let (l, r) = if k == 0 {
                (chars.top_left, chars.top_right)
            } else {
                (chars.bottom_left, chars.bottom_right)
            };
            portal.buffer.set(left, y, fill.with_char(l));
            for x in inner_left..inner_right {
                portal.buffer.set(x, y, fill.with_char(chars.horizontal));
            }
            portal.buffer.set(inner_right, y, fill.with_char(r));
            continue;
        }
        portal.buffer.set(left, y, fill.with_char(chars.vertical));
        portal.buffer.set(inner_right, y, fill.with_char(chars.vertical));

        let inner = Rect::new(inner_left, y, inner_right - inner_left, 1);
        match &rows[k - 1] {
            RowKind::Search => {
                let search_style = ms.style.search;
                set_style_area(&mut portal.buffer, inner, search_style);
                let x = draw_text_span(
                    &mut portal.buffer,
                    inner.x,
                    y,
                    SEARCH_MARK,
                    search_style.patch(ms.style.hint),
                    inner.right(),
                );
                let end = if ui.search_term.is_empty() {
                    draw_text_span(
                        &mut portal.buffer,
                        x,
                        y,
                        &strings.search_prompt(),
                        search_style.patch(ms.style.hint),
                        inner.right(),
                    );
                    x
                } else {
                    draw_text_span(
                        &mut portal.buffer,
                        x,
                        y,
                        &ui.search_term,
                        search_style,
                        inner.right(),
                    )
                };
                if ui.trigger_focused && end < inner.right() {
                    portal.set_cursor(Some((end, y)));
                }
                layout.search = Some(inner);
            }
            RowKind::Empty(text) => {
                let fitted = truncate_to_width(text, inner.width.saturating_sub(1) as usize);
                draw_text_span(
                    &mut portal.buffer,
                    inner.x + 1,
                    y,
                    &fitted,
                    panel_style.patch(ms.style.hint),
                    inner.right(),
                );
            }
            RowKind::Option { filtered_index } => {
                let option = &ms.options[filtered[*filtered_index]];
                let focused = ui.focused == Some(*filtered_index);
                let checked = ms.selected.iter().any(|v| *v == option.value);

                let mut row_style = ms.style.option;
                if option.disabled {
                    row_style = row_style.patch(ms.style.option_disabled);
                }
                if focused {
                    row_style = row_style.patch(ms.style.option_focused);
                }
                set_style_area(&mut portal.buffer, inner, row_style);

                let mark = if focused { FOCUS_MARK } else { " " };
                let mut x = draw_text_span(&mut portal.buffer, inner.x, y, mark, row_style, inner.right());
                let check_style = if checked && !option.disabled {
                    row_style.patch(ms.style.check)
                } else {
                    row_style
                };
                let check = if checked { CHECKED } else { UNCHECKED };
                x = draw_text_span(&mut portal.buffer, x, y, check, check_style, inner.right());
                let label = truncate_to_width(&option.label, inner.right().saturating_sub(x) as usize);
                draw_text_span(&mut portal.buffer, x, y, &label, row_style, inner.right());

                layout.rows.push((inner, *filtered_index));
            }
        }
    }

    layout.panel = visible_rect;
    if let Some(id) = ms.hit_id {
        if let Some(rect) = visible_rect {
            portal.register_hit(rect, id, HitRegion::Content, 0);
        }
        for (row, index) in &layout.rows {
            portal.register_hit(*row, id, OPTION_REGION, *index as u64);
        }
    }
}
