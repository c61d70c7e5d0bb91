#![forbid(unsafe_code)]

//! End-to-end behaviour of the multi-select dropdown.
//!
//! Each test drives the widget with synthetic events, re-renders into a
//! composed frame, and inspects the text through `izui-harness`.

use izui_core::event::{Event, KeyCode, MouseButton, MouseEvent, MouseEventKind};
use izui_core::geometry::Rect;
use izui_harness::{buffer_to_text, contains_text, find_text, row_text};
use izui_render::frame::{Frame, HitId, HitRegion};
use izui_widgets::multi_select::{MultiSelect, MultiSelectState, PanelPosition, SelectOption};
use izui_widgets::pointer::PointerHub;
use izui_widgets::{EventResult, StatefulWidget};

const WIDGET: HitId = HitId::new(7);
const SCREEN_W: u16 = 40;
const SCREEN_H: u16 = 16;

fn abc() -> Vec<SelectOption> {
    vec![
        SelectOption::new("A", "Alpha"),
        SelectOption::new("B", "Bravo"),
        SelectOption::new("C", "Charlie"),
    ]
}

fn strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| v.to_string()).collect()
}

fn pointer_down(x: u16, y: u16) -> MouseEvent {
    MouseEvent::new(MouseEventKind::Down(MouseButton::Left), x, y)
}

/// Caller-side host for one dropdown: owns options and selection, applies
/// every `on_change`, and records the lists it received.
struct Host {
    options: Vec<SelectOption>,
    selected: Vec<String>,
    changes: Vec<Vec<String>>,
    searchable: bool,
    area: Rect,
    hub: PointerHub,
    state: MultiSelectState,
}

fn props<'a>(
    options: &'a [SelectOption],
    selected: &'a [String],
    searchable: bool,
    on_change: impl FnMut(Vec<String>) + 'a,
) -> MultiSelect<'a> {
    MultiSelect::new(options, selected, on_change)
        .searchable(searchable)
        .hit_id(WIDGET)
}

impl Host {
    fn new(options: Vec<SelectOption>) -> Self {
        let hub = PointerHub::new();
        let mut state = MultiSelectState::new(&hub);
        state.focus();
        let mut host = Self {
            options,
            selected: Vec::new(),
            changes: Vec::new(),
            searchable: false,
            area: Rect::new(0, 0, 30, 3),
            hub,
            state,
        };
        host.render();
        host
    }

    fn searchable(mut self) -> Self {
        self.searchable = true;
        self
    }

    fn with_selected(mut self, values: &[&str]) -> Self {
        self.selected = strings(values);
        self.render();
        self
    }

    fn render(&mut self) -> Frame {
        let mut frame = Frame::with_hit_grid(SCREEN_W, SCREEN_H);
        props(&self.options, &self.selected, self.searchable, |_| {}).render(
            self.area,
            &mut frame,
            &mut self.state,
        );
        frame.compose();
        frame
    }

    fn text(&mut self) -> String {
        buffer_to_text(&self.render().buffer)
    }

    fn send(&mut self, event: Event) -> EventResult {
        let mut change = None;
        let result = props(&self.options, &self.selected, self.searchable, |next| {
            change = Some(next)
        })
        .handle_event(&mut self.state, &event);
        if let Some(next) = change {
            self.changes.push(next.clone());
            self.selected = next;
        }
        result
    }

    fn key(&mut self, code: KeyCode) -> EventResult {
        self.send(Event::key(code))
    }

    fn type_text(&mut self, text: &str) {
        for c in text.chars() {
            self.key(KeyCode::Char(c));
        }
    }

    /// Forward a pointer-down the way an app loop does: hub first, then the widget.
    fn pointer(&mut self, x: u16, y: u16) -> EventResult {
        self.hub.dispatch(&pointer_down(x, y));
        self.send(Event::click(x, y))
    }
}

// ============================================================================
// Summary rendering
// ============================================================================

#[test]
fn placeholder_then_toggle_b_then_c() {
    let mut host = Host::new(abc());
    assert!(host.text().contains("Select..."));

    host.key(KeyCode::Enter);
    host.key(KeyCode::Down);
    host.key(KeyCode::Down);
    assert_eq!(host.state.focused_index(), Some(1));
    host.key(KeyCode::Enter);
    host.key(KeyCode::Down);
    host.key(KeyCode::Char(' '));

    assert_eq!(host.changes, vec![strings(&["B"]), strings(&["B", "C"])]);
    assert!(host.state.is_open());
}

#[test]
fn chips_follow_option_order() {
    let mut host = Host::new(abc());
    host.key(KeyCode::Enter);
    host.key(KeyCode::End);
    host.key(KeyCode::Enter);
    host.key(KeyCode::Home);
    host.key(KeyCode::Enter);
    assert_eq!(host.selected, strings(&["C", "A"]));

    let frame = host.render();
    let trigger_row = row_text(&frame.buffer, 1);
    assert!(
        trigger_row.contains("Alpha × Charlie ×"),
        "trigger row: {trigger_row:?}"
    );
}

#[test]
fn more_than_max_chips_shows_count() {
    let options = vec![
        SelectOption::new("A", "Alpha"),
        SelectOption::new("B", "Bravo"),
        SelectOption::new("C", "Charlie"),
        SelectOption::new("D", "Delta"),
    ];
    let mut host = Host::new(options).with_selected(&["A", "B", "C", "D"]);
    let text = host.text();
    assert!(text.contains("4 selected"), "{text}");
    assert!(!text.contains("Alpha"));
}

#[test]
fn unknown_values_still_count() {
    let mut host = Host::new(abc()).with_selected(&["A", "gone", "also-gone", "B"]);
    assert!(host.text().contains("4 selected"));
}

#[test]
fn localized_placeholder() {
    let options = abc();
    let mut state = MultiSelectState::default();
    let mut frame = Frame::new(SCREEN_W, SCREEN_H);
    MultiSelect::new(&options, &[], |_| {})
        .locale("es")
        .render(Rect::new(0, 0, 30, 3), &mut frame, &mut state);
    assert!(contains_text(&frame.buffer, "Seleccionar..."));
}

// ============================================================================
// Panel contents
// ============================================================================

#[test]
fn empty_options_say_so() {
    let mut host = Host::new(Vec::new());
    assert_eq!(host.key(KeyCode::Enter), EventResult::Consumed);
    let text = host.text();
    assert!(text.contains("No options available"), "{text}");
}

#[test]
fn search_without_matches_says_so() {
    let mut host = Host::new(abc()).searchable();
    host.key(KeyCode::Enter);
    host.type_text("zz");
    assert_eq!(host.state.search_term(), "zz");
    let text = host.text();
    assert!(text.contains("No matching options"), "{text}");
    assert!(!text.contains("Alpha"));
}

#[test]
fn search_filters_case_insensitively() {
    let mut host = Host::new(abc()).searchable();
    host.key(KeyCode::Enter);
    host.type_text("BR");
    let text = host.text();
    assert!(text.contains("Bravo"));
    assert!(!text.contains("Alpha"));
    assert!(!text.contains("Charlie"));

    host.key(KeyCode::Down);
    host.key(KeyCode::Enter);
    assert_eq!(host.selected, strings(&["B"]));
}

#[test]
fn checked_rows_show_checkbox() {
    let mut host = Host::new(abc()).with_selected(&["B"]);
    host.key(KeyCode::Enter);
    let frame = host.render();
    assert!(row_text(&frame.buffer, 4).contains("[ ] Alpha"));
    assert!(row_text(&frame.buffer, 5).contains("[x] Bravo"));
}

#[test]
fn long_lists_scroll_with_the_wheel() {
    let options: Vec<SelectOption> = (0..20)
        .map(|i| SelectOption::new(format!("v{i}"), format!("Option {i:02}")))
        .collect();
    let mut host = Host::new(options);
    host.key(KeyCode::Enter);
    let text = host.text();
    assert!(text.contains("Option 00"));
    assert!(!text.contains("Option 08"));

    let wheel = MouseEvent::new(MouseEventKind::ScrollDown, 5, 6);
    assert_eq!(host.send(Event::Mouse(wheel)), EventResult::Consumed);
    let text = host.text();
    assert!(!text.contains("Option 00"));
    assert!(text.contains("Option 08"));
}

// ============================================================================
// Keyboard
// ============================================================================

#[test]
fn arrows_wrap_both_ways() {
    let mut host = Host::new(abc());
    host.key(KeyCode::Enter);
    host.key(KeyCode::Up);
    assert_eq!(host.state.focused_index(), Some(2));
    host.key(KeyCode::Down);
    assert_eq!(host.state.focused_index(), Some(0));
    host.key(KeyCode::Up);
    assert_eq!(host.state.focused_index(), Some(2));
}

#[test]
fn escape_resets_search_and_focus() {
    let options = vec![
        SelectOption::new("1", "abc one"),
        SelectOption::new("2", "abc two"),
        SelectOption::new("3", "abc three"),
    ];
    let mut host = Host::new(options).searchable();
    host.key(KeyCode::Enter);
    host.type_text("abc");
    host.key(KeyCode::Down);
    host.key(KeyCode::Down);
    host.key(KeyCode::Down);
    assert_eq!(host.state.focused_index(), Some(2));

    assert_eq!(host.key(KeyCode::Escape), EventResult::Consumed);
    assert!(!host.state.is_open());
    assert!(host.state.is_focused());
    assert!(!host.state.is_listening());

    host.key(KeyCode::Enter);
    assert_eq!(host.state.search_term(), "");
    assert_eq!(host.state.focused_index(), None);
    assert!(host.text().contains("Search..."));
}

#[test]
fn closed_ignores_navigation_keys() {
    let mut host = Host::new(abc());
    for code in [KeyCode::Up, KeyCode::Home, KeyCode::End, KeyCode::Escape, KeyCode::Tab] {
        assert_eq!(host.key(code), EventResult::Ignored, "{code:?}");
    }
    assert!(!host.state.is_open());
}

// ============================================================================
// Pointer
// ============================================================================

#[test]
fn clicking_trigger_toggles_panel() {
    let mut host = Host::new(abc());
    host.state.blur();
    assert_eq!(host.pointer(5, 1), EventResult::Consumed);
    assert!(host.state.is_open());
    assert!(host.state.is_focused());
    host.render();
    host.pointer(5, 1);
    assert!(!host.state.is_open());
}

#[test]
fn chip_remove_keeps_open_state() {
    let mut host = Host::new(abc()).with_selected(&["A", "B"]);
    let frame = host.render();
    let (x, y) = find_text(&frame.buffer, "Alpha ×").expect("alpha chip");
    host.pointer(x + 6, y);
    assert_eq!(host.changes.last(), Some(&strings(&["B"])));
    assert!(!host.state.is_open());

    host.key(KeyCode::Enter);
    let frame = host.render();
    let (x, y) = find_text(&frame.buffer, "Bravo ×").expect("bravo chip");
    host.pointer(x + 6, y);
    assert_eq!(host.changes.last(), Some(&Vec::new()));
    assert!(host.state.is_open());
}

#[test]
fn clear_all_notifies_both_callbacks() {
    let mut host = Host::new(abc()).with_selected(&["A", "C"]);
    let frame = host.render();
    let clear_x = (0..SCREEN_W)
        .find(|&x| matches!(frame.hit_test(x, 1), Some((WIDGET, HitRegion::Button, u64::MAX))))
        .expect("clear-all hit region");

    let mut change = None;
    let mut cleared = 0;
    {
        let mut dropdown = MultiSelect::new(&host.options, &host.selected, |next| change = Some(next))
            .on_clear(|| cleared += 1);
        let result = dropdown.handle_event(&mut host.state, &Event::click(clear_x, 1));
        assert_eq!(result, EventResult::Consumed);
    }
    assert_eq!(change, Some(Vec::new()));
    assert_eq!(cleared, 1);
    assert!(!host.state.is_open());
}

#[test]
fn clicking_a_row_toggles_it() {
    let mut host = Host::new(abc());
    host.key(KeyCode::Enter);
    let frame = host.render();
    assert_eq!(
        frame.hit_test(5, 5),
        Some((WIDGET, HitRegion::Custom(1), 1))
    );
    assert_eq!(
        frame.hit_test(5, 1),
        Some((WIDGET, HitRegion::Content, u64::MAX - 1))
    );

    assert_eq!(host.pointer(5, 5), EventResult::Consumed);
    assert_eq!(host.selected, strings(&["B"]));
    assert_eq!(host.state.focused_index(), Some(1));
    assert!(host.state.is_open());
}

#[test]
fn disabled_rows_do_not_toggle_on_click() {
    let options = vec![
        SelectOption::new("A", "Alpha"),
        SelectOption::new("B", "Bravo").disabled(true),
    ];
    let mut host = Host::new(options);
    host.key(KeyCode::Enter);
    host.render();
    host.pointer(5, 5);
    assert!(host.changes.is_empty());
    assert_eq!(host.state.focused_index(), Some(1));
}

#[test]
fn outside_click_through_hub_closes() {
    let mut host = Host::new(abc());
    host.key(KeyCode::Enter);
    host.render();
    assert_eq!(host.hub.listener_count(), 1);

    // Inside the panel: stays open.
    assert_eq!(host.hub.dispatch(&pointer_down(5, 6)), 1);
    assert!(host.state.is_open());

    assert_eq!(host.hub.dispatch(&pointer_down(35, 14)), 1);
    assert!(!host.state.is_open());
    assert!(!host.state.is_listening());
    assert_eq!(host.hub.listener_count(), 0);
    assert!(host.state.is_focused());
    assert_eq!(host.state.search_term(), "");
}

#[test]
fn outside_click_via_widget_blurs() {
    let mut host = Host::new(abc());
    assert_eq!(host.pointer(35, 14), EventResult::Ignored);
    assert!(!host.state.is_focused());
}

#[test]
fn outside_click_through_widget_alone_closes() {
    let options = abc();
    let none: Vec<String> = Vec::new();
    let mut state = MultiSelectState::default();
    state.focus();
    let area = Rect::new(0, 0, 30, 3);
    let render = |state: &mut MultiSelectState| {
        let mut frame = Frame::new(SCREEN_W, SCREEN_H);
        MultiSelect::new(&options, &none, |_| {}).render(area, &mut frame, state);
        frame.compose();
    };

    render(&mut state);
    MultiSelect::new(&options, &none, |_| {}).handle_event(&mut state, &Event::key(KeyCode::Enter));
    render(&mut state);
    assert!(state.is_open());
    assert!(state.is_listening());

    let result =
        MultiSelect::new(&options, &none, |_| {}).handle_event(&mut state, &Event::click(35, 14));
    assert_eq!(result, EventResult::Ignored);
    assert!(!state.is_open());
    assert!(!state.is_listening());
    assert!(!state.is_focused());
}

#[test]
fn two_instances_keep_separate_listeners() {
    let options = abc();
    let none: Vec<String> = Vec::new();
    let hub = PointerHub::new();
    let mut left = MultiSelectState::new(&hub);
    let mut right = MultiSelectState::new(&hub);
    let left_area = Rect::new(0, 0, 18, 3);
    let right_area = Rect::new(20, 0, 18, 3);

    let render_both = |left: &mut MultiSelectState, right: &mut MultiSelectState| {
        let mut frame = Frame::new(SCREEN_W, SCREEN_H);
        MultiSelect::new(&options, &none, |_| {}).render(left_area, &mut frame, left);
        MultiSelect::new(&options, &none, |_| {}).render(right_area, &mut frame, right);
        frame.compose();
    };
    render_both(&mut left, &mut right);

    left.focus();
    MultiSelect::new(&options, &none, |_| {}).handle_event(&mut left, &Event::key(KeyCode::Enter));
    right.focus();
    MultiSelect::new(&options, &none, |_| {}).handle_event(&mut right, &Event::key(KeyCode::Enter));
    render_both(&mut left, &mut right);
    assert_eq!(hub.listener_count(), 2);

    // Inside the right trigger, outside the left dropdown.
    assert_eq!(hub.dispatch(&pointer_down(25, 1)), 2);
    assert!(!left.is_open());
    assert!(right.is_open());
    assert_eq!(hub.listener_count(), 1);

    drop(right);
    assert_eq!(hub.listener_count(), 0);
}

// ============================================================================
// Portal layer
// ============================================================================

#[test]
fn panel_escapes_the_callers_clip() {
    let mut host = Host::new(abc());
    host.key(KeyCode::Enter);

    let mut frame = Frame::new(SCREEN_W, SCREEN_H);
    frame.buffer.push_scissor(host.area);
    MultiSelect::new(&host.options, &host.selected, |_| {}).render(
        host.area,
        &mut frame,
        &mut host.state,
    );
    frame.buffer.pop_scissor();
    frame.compose();

    assert!(row_text(&frame.buffer, 4).contains("Alpha"));
    assert!(row_text(&frame.buffer, 6).contains("Charlie"));
}

#[test]
fn panel_position_is_snapshotted_and_follows_page_scroll() {
    let options = abc();
    let mut state = MultiSelectState::default();
    let area = Rect::new(2, 3, 24, 3);

    let mut frame = Frame::new(SCREEN_W, SCREEN_H);
    let mut dropdown = MultiSelect::new(&options, &[], |_| {});
    dropdown.render(area, &mut frame, &mut state);
    state.focus();
    dropdown.handle_event(&mut state, &Event::key(KeyCode::Down));
    assert_eq!(
        state.panel_position(),
        Some(PanelPosition {
            top: 6,
            left: 2,
            width: 24
        })
    );

    // The page scrolls by two rows after opening.
    let mut frame = Frame::new(SCREEN_W, SCREEN_H);
    MultiSelect::new(&options, &[], |_| {})
        .page_scroll(0, 2)
        .render(Rect::new(2, 1, 24, 3), &mut frame, &mut state);
    frame.compose();
    assert_eq!(find_text(&frame.buffer, "Alpha"), Some((8, 5)));
}

#[test]
fn disabling_while_open_releases_the_listener() {
    let mut host = Host::new(abc());
    host.key(KeyCode::Enter);
    assert_eq!(host.hub.listener_count(), 1);

    let mut frame = Frame::new(SCREEN_W, SCREEN_H);
    MultiSelect::new(&host.options, &host.selected, |_| {})
        .disabled(true)
        .render(host.area, &mut frame, &mut host.state);
    assert!(!host.state.is_open());
    assert!(!host.state.is_focused());
    assert_eq!(host.hub.listener_count(), 0);
    assert!(!frame.has_portal());
}

#[test]
fn zero_area_renders_nothing() {
    let options = abc();
    let mut state = MultiSelectState::default();
    let mut frame = Frame::new(10, 4);
    MultiSelect::new(&options, &[], |_| {}).render(Rect::new(0, 0, 0, 0), &mut frame, &mut state);
    assert_eq!(buffer_to_text(&frame.buffer).trim(), "");
}
