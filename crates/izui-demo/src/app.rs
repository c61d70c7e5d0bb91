#![forbid(unsafe_code)]

//! Demo application model: two call-log filters and the matching calls.

use izui_core::event::{Event, KeyCode, KeyEvent, MouseEvent, MouseEventKind};
use izui_core::geometry::Rect;
use izui_i18n::StringCatalog;
use izui_render::cell::Cell;
use izui_render::drawing::Draw;
use izui_render::frame::{Frame, HitId};
use izui_style::{Style, StyleFlags, Theme};
use izui_widgets::multi_select::{MultiSelect, MultiSelectState, MultiSelectStyle, SelectOption};
use izui_widgets::pointer::PointerHub;
use izui_widgets::{EventResult, StatefulWidget};

/// One row of the sample call log.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Call {
    pub time: &'static str,
    pub clinic: &'static str,
    pub status: &'static str,
    pub caller: &'static str,
}

const CALLS: &[Call] = &[
    Call { time: "08:02", clinic: "north", status: "answered", caller: "M. Alvarez" },
    Call { time: "08:15", clinic: "south", status: "missed", caller: "J. Okafor" },
    Call { time: "08:31", clinic: "east", status: "voicemail", caller: "R. Ivanova" },
    Call { time: "08:47", clinic: "north", status: "missed", caller: "T. Nguyen" },
    Call { time: "09:05", clinic: "west", status: "answered", caller: "L. Fischer" },
    Call { time: "09:12", clinic: "downtown", status: "transferred", caller: "A. Haddad" },
    Call { time: "09:40", clinic: "south", status: "answered", caller: "K. Tanaka" },
    Call { time: "10:03", clinic: "pediatrics", status: "voicemail", caller: "S. Moreau" },
    Call { time: "10:26", clinic: "east", status: "missed", caller: "D. Kowalski" },
    Call { time: "10:58", clinic: "downtown", status: "answered", caller: "P. Rossi" },
];

fn clinic_options() -> Vec<SelectOption> {
    vec![
        SelectOption::new("north", "Clinic North"),
        SelectOption::new("south", "Clinic South"),
        SelectOption::new("east", "Clinic East"),
        SelectOption::new("west", "Clinic West"),
        SelectOption::new("downtown", "Downtown Urgent Care"),
        SelectOption::new("pediatrics", "Pediatrics Annex"),
        SelectOption::new("closed", "Harbor Clinic (closed)").disabled(true),
    ]
}

fn status_options() -> Vec<SelectOption> {
    vec![
        SelectOption::new("answered", "Answered"),
        SelectOption::new("missed", "Missed"),
        SelectOption::new("voicemail", "Voicemail"),
        SelectOption::new("transferred", "Transferred"),
    ]
}

/// Which filter owns keyboard focus.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Clinics,
    Status,
}

impl Focus {
    fn other(self) -> Self {
        match self {
            Self::Clinics => Self::Status,
            Self::Status => Self::Clinics,
        }
    }
}

/// Fixed description of one filter dropdown.
struct FilterSpec {
    label: &'static str,
    id: &'static str,
    hit: HitId,
    options: Vec<SelectOption>,
    searchable: bool,
}

/// Settings shared by both filters.
struct Shared {
    catalog: StringCatalog,
    locale: String,
    max_chips: usize,
    style: MultiSelectStyle,
}

fn props<'a>(
    spec: &'a FilterSpec,
    selected: &'a [String],
    shared: &'a Shared,
    on_change: impl FnMut(Vec<String>) + 'a,
) -> MultiSelect<'a> {
    MultiSelect::new(&spec.options, selected, on_change)
        .label(spec.label)
        .id(spec.id)
        .described_by("call-log")
        .searchable(spec.searchable)
        .max_displayed_chips(shared.max_chips)
        .locale(&shared.locale)
        .catalog(&shared.catalog)
        .style(shared.style)
        .hit_id(spec.hit)
        .on_clear(move || tracing::info!(filter = spec.id, "filter cleared"))
}

/// One filter: its spec, the caller-owned selection, and its UI state.
struct Filter {
    spec: FilterSpec,
    selected: Vec<String>,
    state: MultiSelectState,
}

impl Filter {
    fn new(spec: FilterSpec, hub: &PointerHub) -> Self {
        Self {
            spec,
            selected: Vec::new(),
            state: MultiSelectState::new(hub),
        }
    }

    fn handle(&mut self, shared: &Shared, event: &Event) -> EventResult {
        let mut change = None;
        let result = props(&self.spec, &self.selected, shared, |next| change = Some(next))
            .handle_event(&mut self.state, event);
        if let Some(next) = change {
            tracing::info!(filter = self.spec.id, selected = ?next, "filter changed");
            self.selected = next;
        }
        result
    }

    fn render(&mut self, shared: &Shared, area: Rect, frame: &mut Frame) {
        props(&self.spec, &self.selected, shared, |_| {}).render(area, frame, &mut self.state);
    }

    fn matches(&self, value: &str) -> bool {
        self.selected.is_empty() || self.selected.iter().any(|v| v == value)
    }
}

/// Settings the app is built from.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub status_searchable: bool,
    pub max_chips: usize,
    pub locale: String,
    pub catalog: StringCatalog,
    pub theme: Theme,
}

/// The demo's whole model.
pub struct App {
    hub: PointerHub,
    clinics: Filter,
    statuses: Filter,
    shared: Shared,
    theme: Theme,
    focus: Focus,
    quit: bool,
}

impl App {
    pub fn new(config: AppConfig) -> Self {
        let hub = PointerHub::new();
        let clinics = Filter::new(
            FilterSpec {
                label: "Clinics",
                id: "clinic-filter",
                hit: HitId::new(1),
                options: clinic_options(),
                searchable: true,
            },
            &hub,
        );
        let statuses = Filter::new(
            FilterSpec {
                label: "Call status",
                id: "status-filter",
                hit: HitId::new(2),
                options: status_options(),
                searchable: config.status_searchable,
            },
            &hub,
        );
        let mut app = Self {
            hub,
            clinics,
            statuses,
            shared: Shared {
                catalog: config.catalog,
                locale: config.locale,
                max_chips: config.max_chips,
                style: MultiSelectStyle::from_theme(&config.theme),
            },
            theme: config.theme,
            focus: Focus::Clinics,
            quit: false,
        };
        app.clinics.state.focus();
        app
    }

    pub fn should_quit(&self) -> bool {
        self.quit
    }

    pub fn focus(&self) -> Focus {
        self.focus
    }

    /// The hub every mouse event is forwarded to.
    pub fn pointer_hub(&self) -> &PointerHub {
        &self.hub
    }

    pub fn selected_clinics(&self) -> &[String] {
        &self.clinics.selected
    }

    pub fn selected_statuses(&self) -> &[String] {
        &self.statuses.selected
    }

    fn filter_mut(&mut self, focus: Focus) -> &mut Filter {
        match focus {
            Focus::Clinics => &mut self.clinics,
            Focus::Status => &mut self.statuses,
        }
    }

    /// Calls that pass both filters.
    pub fn visible_calls(&self) -> impl Iterator<Item = &'static Call> + '_ {
        CALLS
            .iter()
            .filter(|call| self.clinics.matches(call.clinic) && self.statuses.matches(call.status))
    }

    pub fn handle(&mut self, event: &Event) {
        match event {
            Event::Key(key) => self.handle_key(key),
            Event::Mouse(mouse) => self.handle_mouse(mouse, event),
            Event::Paste(_) => {
                let focus = self.focus;
                let shared = &self.shared;
                let filter = match focus {
                    Focus::Clinics => &mut self.clinics,
                    Focus::Status => &mut self.statuses,
                };
                filter.handle(shared, event);
            }
            _ => {}
        }
    }

    fn handle_key(&mut self, key: &KeyEvent) {
        if !key.is_actionable() {
            return;
        }
        if key.ctrl() && key.is_char('c') {
            self.quit = true;
            return;
        }
        let focus = self.focus;
        let open = self.filter_mut(focus).state.is_open();
        match key.code {
            KeyCode::Tab | KeyCode::BackTab => {
                self.move_focus(focus.other());
                return;
            }
            KeyCode::Char('q') if !open && !key.ctrl() && !key.alt() => {
                self.quit = true;
                return;
            }
            _ => {}
        }
        let shared = &self.shared;
        let filter = match focus {
            Focus::Clinics => &mut self.clinics,
            Focus::Status => &mut self.statuses,
        };
        filter.handle(shared, &Event::Key(*key));
    }

    fn move_focus(&mut self, next: Focus) {
        let current = self.filter_mut(self.focus);
        current.state.close();
        current.state.blur();
        self.filter_mut(next).state.focus();
        self.focus = next;
        tracing::debug!(focus = ?next, "focus moved");
    }

    fn handle_mouse(&mut self, mouse: &MouseEvent, event: &Event) {
        if mouse.is_pointer_down() {
            self.hub.dispatch(mouse);
        }
        let shared = &self.shared;
        let clinics = self.clinics.handle(shared, event);
        let statuses = self.statuses.handle(shared, event);
        if matches!(mouse.kind, MouseEventKind::Down(_)) {
            if clinics.is_consumed() && self.clinics.state.is_focused() {
                self.focus = Focus::Clinics;
                self.statuses.state.blur();
            } else if statuses.is_consumed() && self.statuses.state.is_focused() {
                self.focus = Focus::Status;
                self.clinics.state.blur();
            }
        }
    }

    /// Screen areas of the two filter triggers.
    fn filter_areas(area: Rect) -> (Rect, Rect) {
        let half = area.width / 2;
        let left = Rect::new(area.x + 1, area.y + 3, half.saturating_sub(2), 3);
        let right = Rect::new(area.x + half + 1, area.y + 3, half.saturating_sub(2), 3);
        (left, right)
    }

    pub fn render(&mut self, frame: &mut Frame) {
        let area = frame.bounds();
        let theme = self.theme;
        let base = Cell::from_char(' ').with_fg(theme.text).with_bg(theme.surface);
        frame.buffer.fill(area, base);

        let mut title = base;
        Style::new().fg(theme.accent).add_modifier(StyleFlags::BOLD).apply_to(&mut title);
        frame.print_text_clipped(1, 0, "IzenDoc call log", title, area.right());
        frame.print_text_clipped(
            1,
            1,
            "Tab switch filter · Enter open · Esc close · q quit",
            base.with_fg(theme.text_subtle),
            area.right(),
        );

        let calls: Vec<&Call> = self.visible_calls().collect();
        let list_top = area.y + 7;
        let header = format!("{:<6} {:<12} {:<12} {}", "Time", "Clinic", "Status", "Caller");
        frame.print_text_clipped(1, list_top, &header, base.with_fg(theme.text_muted), area.right());
        for (i, call) in calls.iter().enumerate() {
            let y = list_top + 1 + i as u16;
            if y >= area.bottom() {
                break;
            }
            let line = format!(
                "{:<6} {:<12} {:<12} {}",
                call.time, call.clinic, call.status, call.caller
            );
            frame.print_text_clipped(1, y, &line, base, area.right());
        }
        if calls.is_empty() && list_top + 1 < area.bottom() {
            frame.print_text_clipped(
                1,
                list_top + 1,
                "No calls match the current filters",
                base.with_fg(theme.text_subtle),
                area.right(),
            );
        }

        let (left, right) = Self::filter_areas(area);
        let shared = &self.shared;
        self.clinics.render(shared, left, frame);
        self.statuses.render(shared, right, frame);
        frame.compose();
    }
}
