#![forbid(unsafe_code)]

//! Rendered text of the multi-select in its main states.
//!
//! Stored snapshots live in `tests/snapshots/`; regenerate with
//!   BLESS=1 cargo test -p izui-widgets --test multi_select_snapshots

use izui_core::event::{Event, KeyCode};
use izui_core::geometry::Rect;
use izui_harness::{MatchMode, assert_buffer_text, assert_snapshot};
use izui_render::frame::Frame;
use izui_widgets::StatefulWidget;
use izui_widgets::multi_select::{MultiSelect, MultiSelectState, SelectOption};

fn abcd() -> Vec<SelectOption> {
    vec![
        SelectOption::new("A", "Alpha"),
        SelectOption::new("B", "Bravo"),
        SelectOption::new("C", "Charlie"),
        SelectOption::new("D", "Delta"),
    ]
}

fn values(v: &[&str]) -> Vec<String> {
    v.iter().map(|s| s.to_string()).collect()
}

fn render_closed(options: &[SelectOption], selected: &[String], width: u16) -> Frame {
    let mut frame = Frame::new(width, 3);
    let mut state = MultiSelectState::default();
    MultiSelect::new(options, selected, |_| {}).render(
        Rect::new(0, 0, width, 3),
        &mut frame,
        &mut state,
    );
    frame.compose();
    frame
}

#[test]
fn closed_trigger_shows_placeholder() {
    let frame = render_closed(&abcd(), &[], 24);
    assert_snapshot!("multi_select_placeholder", &frame.buffer, MatchMode::Exact);
}

#[test]
fn chip_row_follows_option_order() {
    let options = abcd();
    let frame = render_closed(&options[..3], &values(&["C", "A"]), 30);
    assert_snapshot!("multi_select_chips", &frame.buffer);
}

#[test]
fn count_summary_past_chip_limit() {
    let frame = render_closed(&abcd(), &values(&["A", "B", "C", "D"]), 24);
    assert_snapshot!("multi_select_count", &frame.buffer);
}

#[test]
fn open_searchable_panel() {
    let options = abcd();
    let options = &options[..3];
    let none: Vec<String> = Vec::new();
    let area = Rect::new(0, 0, 24, 3);
    let mut state = MultiSelectState::default();
    state.focus();

    let render = |state: &mut MultiSelectState| {
        let mut frame = Frame::new(24, 9);
        MultiSelect::new(options, &none, |_| {})
            .searchable(true)
            .render(area, &mut frame, state);
        frame.compose();
        frame
    };
    render(&mut state);
    MultiSelect::new(options, &none, |_| {})
        .searchable(true)
        .handle_event(&mut state, &Event::key(KeyCode::Enter));
    let frame = render(&mut state);

    assert_snapshot!("multi_select_open_search", &frame.buffer);
}

#[test]
fn single_row_trigger_inline() {
    let options = abcd();
    let mut frame = Frame::new(16, 1);
    let mut state = MultiSelectState::default();
    MultiSelect::new(&options, &[], |_| {}).render(
        Rect::new(0, 0, 16, 1),
        &mut frame,
        &mut state,
    );
    assert_buffer_text!(&frame.buffer, " Select...    ▾");
}
