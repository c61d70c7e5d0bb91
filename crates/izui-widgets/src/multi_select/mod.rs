#![forbid(unsafe_code)]

//! Accessible multi-select dropdown.
//!
//! The widget is controlled: the caller owns the option list and the
//! selected values, builds a [`MultiSelect`] from them on every render, and
//! applies the lists reported through `on_change`. The widget only keeps
//! ephemeral UI state ([`MultiSelectState`]): open flag, search term,
//! keyboard focus, and the panel position captured when it opened.
//!
//! The panel is drawn into the frame's portal layer so it is never clipped
//! by the trigger's area, yet it still counts as "inside" for
//! outside-click dismissal.
//!
//! # Example
//!
//! ```
//! use izui_core::event::{Event, KeyCode};
//! use izui_core::geometry::Rect;
//! use izui_render::frame::Frame;
//! use izui_widgets::multi_select::{MultiSelect, MultiSelectState, SelectOption};
//! use izui_widgets::pointer::PointerHub;
//! use izui_widgets::StatefulWidget;
//!
//! let options = vec![
//!     SelectOption::new("north", "Clinic North"),
//!     SelectOption::new("south", "Clinic South"),
//! ];
//! let mut selected: Vec<String> = Vec::new();
//! let hub = PointerHub::new();
//! let mut state = MultiSelectState::new(&hub);
//! state.focus();
//!
//! let mut frame = Frame::new(40, 12);
//! let mut changes = Vec::new();
//! {
//!     let mut dropdown = MultiSelect::new(&options, &selected, |next| changes.push(next));
//!     dropdown.render(Rect::new(0, 0, 30, 3), &mut frame, &mut state);
//!     dropdown.handle_event(&mut state, &Event::key(KeyCode::Down));
//!     dropdown.handle_event(&mut state, &Event::key(KeyCode::Down));
//!     dropdown.handle_event(&mut state, &Event::key(KeyCode::Enter));
//! }
//! selected = changes.pop().unwrap_or_default();
//! assert_eq!(selected, vec!["north".to_string()]);
//! ```

mod panel;
pub mod router;
pub mod selection;
mod state;
pub mod strings;
mod style;
mod trigger;

pub use router::{Effect, RouteContext, RouterState, Transition, route_key};
pub use selection::{
    SelectOption, Summary, display_summary, filter_options, remove, selected_options, toggle,
};
pub use state::{MultiSelectState, PanelPosition};
pub use strings::{Strings, default_catalog};
pub use style::MultiSelectStyle;

use std::fmt;

use izui_core::event::{Event, KeyEvent, MouseButton, MouseEvent, MouseEventKind};
use izui_core::geometry::Rect;
use izui_i18n::StringCatalog;
use izui_render::frame::{Frame, HitId};

use crate::{EventResult, StatefulWidget};
use state::UiInner;

/// Chips shown before the trigger switches to "N selected".
pub const DEFAULT_MAX_DISPLAYED_CHIPS: usize = 3;
/// Option rows shown before the panel list scrolls.
pub const DEFAULT_MAX_VISIBLE_ROWS: usize = 8;

/// Role reported to assistive technology.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    ComboBox,
}

/// Kind of popup the control owns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HasPopup {
    Listbox,
}

/// Accessibility description of the trigger.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccessibleProps {
    pub role: Role,
    pub has_popup: HasPopup,
    pub expanded: bool,
    pub label: Option<String>,
    pub described_by: Option<String>,
    pub id: Option<String>,
    pub disabled: bool,
    /// False when disabled: the trigger leaves the focus order.
    pub focusable: bool,
    /// Accessible name of the clear-all control, when the last render showed it.
    pub clear_label: Option<String>,
    /// `(value, accessible name)` of each rendered chip's remove control.
    pub chip_remove_labels: Vec<(String, String)>,
}

/// One render's worth of multi-select props.
pub struct MultiSelect<'a> {
    pub(crate) options: &'a [SelectOption],
    pub(crate) selected: &'a [String],
    on_change: Box<dyn FnMut(Vec<String>) + 'a>,
    on_clear: Option<Box<dyn FnMut() + 'a>>,
    pub(crate) placeholder: Option<String>,
    pub(crate) disabled: bool,
    pub(crate) max_displayed_chips: usize,
    pub(crate) searchable: bool,
    pub(crate) clearable: bool,
    pub(crate) label: Option<String>,
    described_by: Option<String>,
    id: Option<String>,
    pub(crate) locale: &'a str,
    pub(crate) catalog: &'a StringCatalog,
    pub(crate) style: MultiSelectStyle,
    pub(crate) max_visible_rows: usize,
    pub(crate) page_scroll: (u16, u16),
    pub(crate) hit_id: Option<HitId>,
}

impl<'a> MultiSelect<'a> {
    /// Create props over the caller's options and selection.
    ///
    /// `on_change` receives the complete new selection on every change.
    pub fn new(
        options: &'a [SelectOption],
        selected: &'a [String],
        on_change: impl FnMut(Vec<String>) + 'a,
    ) -> Self {
        Self {
            options,
            selected,
            on_change: Box::new(on_change),
            on_clear: None,
            placeholder: None,
            disabled: false,
            max_displayed_chips: DEFAULT_MAX_DISPLAYED_CHIPS,
            searchable: false,
            clearable: true,
            label: None,
            described_by: None,
            id: None,
            locale: "en",
            catalog: default_catalog(),
            style: MultiSelectStyle::default(),
            max_visible_rows: DEFAULT_MAX_VISIBLE_ROWS,
            page_scroll: (0, 0),
            hit_id: None,
        }
    }

    /// Text shown when nothing is selected. Defaults to the localized "Select...".
    #[must_use]
    pub fn placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = Some(placeholder.into());
        self
    }

    #[must_use]
    pub fn disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    #[must_use]
    pub fn max_displayed_chips(mut self, max: usize) -> Self {
        self.max_displayed_chips = max;
        self
    }

    /// Show a search row and filter options as the user types.
    #[must_use]
    pub fn searchable(mut self, searchable: bool) -> Self {
        self.searchable = searchable;
        self
    }

    /// Show the clear-all control while something is selected.
    #[must_use]
    pub fn clearable(mut self, clearable: bool) -> Self {
        self.clearable = clearable;
        self
    }

    /// Called after `on_change(vec![])` when the user clears everything.
    #[must_use]
    pub fn on_clear(mut self, on_clear: impl FnMut() + 'a) -> Self {
        self.on_clear = Some(Box::new(on_clear));
        self
    }

    /// Accessible label; also drawn in the trigger's border when there is room.
    #[must_use]
    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Id of an element describing this control.
    #[must_use]
    pub fn described_by(mut self, id: impl Into<String>) -> Self {
        self.described_by = Some(id.into());
        self
    }

    /// Caller-supplied element id.
    #[must_use]
    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    #[must_use]
    pub fn locale(mut self, locale: &'a str) -> Self {
        self.locale = locale;
        self
    }

    /// Use a caller-supplied catalog instead of [`default_catalog`].
    #[must_use]
    pub fn catalog(mut self, catalog: &'a StringCatalog) -> Self {
        self.catalog = catalog;
        self
    }

    #[must_use]
    pub fn style(mut self, style: MultiSelectStyle) -> Self {
        self.style = style;
        self
    }

    #[must_use]
    pub fn max_visible_rows(mut self, rows: usize) -> Self {
        self.max_visible_rows = rows.max(1);
        self
    }

    /// Current scroll offset of the page hosting the widget.
    #[must_use]
    pub fn page_scroll(mut self, x: u16, y: u16) -> Self {
        self.page_scroll = (x, y);
        self
    }

    /// Register trigger, chip, clear, and option regions in the hit grid.
    #[must_use]
    pub fn hit_id(mut self, id: HitId) -> Self {
        self.hit_id = Some(id);
        self
    }

    pub(crate) fn strings(&self) -> Strings<'a> {
        Strings::new(self.catalog, self.locale)
    }

    pub(crate) fn filtered(&self, search_term: &str) -> Vec<usize> {
        filter_options(self.options, search_term, self.searchable)
    }

    /// Rows the panel list shows at once for `filtered_len` matches.
    pub(crate) fn visible_rows(&self, filtered_len: usize) -> usize {
        filtered_len.clamp(1, self.max_visible_rows.max(1))
    }

    /// Accessibility description for the current state.
    pub fn accessibility(&self, state: &MultiSelectState) -> AccessibleProps {
        let strings = self.strings();
        let ui = state.inner.borrow();
        let clear_label = ui.layout.clear.map(|_| strings.clear_all());
        let chip_remove_labels = ui
            .layout
            .chip_removes
            .iter()
            .filter_map(|(_, value)| {
                let option = self.options.iter().find(|o| &o.value == value)?;
                Some((value.clone(), strings.remove_chip(&option.label)))
            })
            .collect();
        AccessibleProps {
            role: Role::ComboBox,
            has_popup: HasPopup::Listbox,
            expanded: ui.is_open && !self.disabled,
            label: self.label.clone(),
            described_by: self.described_by.clone(),
            id: self.id.clone(),
            disabled: self.disabled,
            focusable: !self.disabled,
            clear_label,
            chip_remove_labels,
        }
    }

    /// Route one input event.
    pub fn handle_event(&mut self, state: &mut MultiSelectState, event: &Event) -> EventResult {
        if self.disabled {
            return EventResult::Ignored;
        }
        match event {
            Event::Key(key) => self.handle_key(state, key),
            Event::Mouse(mouse) => self.handle_mouse(state, mouse),
            Event::Paste(paste) => {
                let mut ui = state.inner.borrow_mut();
                if !(self.searchable && ui.is_open && ui.trigger_focused) {
                    return EventResult::Ignored;
                }
                let text: String = paste.text.chars().filter(|c| !c.is_control()).collect();
                if text.is_empty() {
                    return EventResult::Consumed;
                }
                ui.search_term.push_str(&text);
                ui.focused = None;
                ui.list_scroll = 0;
                EventResult::Consumed
            }
            _ => EventResult::Ignored,
        }
    }

    fn handle_key(&mut self, state: &mut MultiSelectState, key: &KeyEvent) -> EventResult {
        let (current, filtered) = {
            let mut ui = state.inner.borrow_mut();
            if !ui.trigger_focused {
                return EventResult::Ignored;
            }
            let filtered = self.filtered(&ui.search_term);
            ui.clamp_focus(filtered.len());
            (RouterState::from_parts(ui.is_open, ui.focused), filtered)
        };

        let ctx = RouteContext {
            len: filtered.len(),
            disabled: self.disabled,
            searchable: self.searchable,
        };
        let transition = route_key(current, key, ctx);
        izui_core::trace!(
            widget = "MultiSelect",
            from = ?current,
            to = ?transition.next,
            effect = ?transition.effect,
            "key routed"
        );

        match transition.effect {
            Effect::Open => self.open(state),
            Effect::Close => state.close(),
            Effect::Toggle(i) => {
                if let Some(&ix) = filtered.get(i) {
                    self.toggle_option(ix);
                }
            }
            Effect::SearchPush(c) => {
                let mut ui = state.inner.borrow_mut();
                ui.search_term.push(c);
                ui.focused = None;
                ui.list_scroll = 0;
            }
            Effect::SearchPop => {
                let mut ui = state.inner.borrow_mut();
                if ui.search_term.pop().is_some() {
                    ui.focused = None;
                    ui.list_scroll = 0;
                }
            }
            Effect::None => {
                let mut ui = state.inner.borrow_mut();
                if ui.is_open {
                    ui.focused = transition.next.focused();
                    ui.ensure_focus_visible(self.visible_rows(filtered.len()));
                }
            }
        }

        if transition.consumed {
            EventResult::Consumed
        } else {
            EventResult::Ignored
        }
    }

    fn handle_mouse(&mut self, state: &mut MultiSelectState, mouse: &MouseEvent) -> EventResult {
        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => self.handle_click(state, mouse.x, mouse.y),
            MouseEventKind::ScrollUp | MouseEventKind::ScrollDown => {
                let mut ui = state.inner.borrow_mut();
                let over_panel = ui.layout.panel.is_some_and(|p| p.contains(mouse.x, mouse.y));
                if !ui.is_open || !over_panel {
                    return EventResult::Ignored;
                }
                let len = self.filtered(&ui.search_term).len();
                let max_scroll = len.saturating_sub(self.visible_rows(len));
                ui.list_scroll = if mouse.kind == MouseEventKind::ScrollUp {
                    ui.list_scroll.saturating_sub(1)
                } else {
                    (ui.list_scroll + 1).min(max_scroll)
                };
                EventResult::Consumed
            }
            _ => EventResult::Ignored,
        }
    }

    fn handle_click(&mut self, state: &mut MultiSelectState, x: u16, y: u16) -> EventResult {
        let target = {
            let ui = state.inner.borrow();
            ClickTarget::locate(&ui, x, y)
        };

        match target {
            ClickTarget::ChipRemove(value) => {
                state.focus();
                izui_core::debug!(widget = "MultiSelect", value = %value, "chip removed");
                (self.on_change)(remove(self.selected, &value));
            }
            ClickTarget::Clear => {
                state.focus();
                izui_core::debug!(widget = "MultiSelect", "selection cleared");
                (self.on_change)(Vec::new());
                if let Some(on_clear) = self.on_clear.as_mut() {
                    on_clear();
                }
            }
            ClickTarget::Row(i) => {
                let filtered = {
                    let mut ui = state.inner.borrow_mut();
                    let filtered = self.filtered(&ui.search_term);
                    if i < filtered.len() {
                        ui.focused = Some(i);
                    }
                    filtered
                };
                if let Some(&ix) = filtered.get(i) {
                    self.toggle_option(ix);
                }
            }
            ClickTarget::Panel => {}
            ClickTarget::Trigger => {
                state.focus();
                if state.is_open() {
                    state.close();
                } else {
                    self.open(state);
                }
            }
            ClickTarget::Outside => {
                if state.is_open() {
                    state.close();
                }
                state.blur();
                return EventResult::Ignored;
            }
        }
        EventResult::Consumed
    }

    /// Snapshot the panel position from the last rendered trigger and open.
    fn open(&self, state: &mut MultiSelectState) {
        let trigger = state.inner.borrow().layout.trigger;
        let (scroll_x, scroll_y) = self.page_scroll;
        state.open_at(PanelPosition {
            top: trigger.bottom().saturating_add(scroll_y),
            left: trigger.x.saturating_add(scroll_x),
            width: trigger.width,
        });
    }

    /// Toggle `options[ix]` unless it is disabled.
    fn toggle_option(&mut self, ix: usize) {
        let Some(option) = self.options.get(ix) else {
            return;
        };
        if option.disabled {
            return;
        }
        izui_core::debug!(widget = "MultiSelect", value = %option.value, "option toggled");
        (self.on_change)(toggle(self.selected, &option.value));
    }
}

/// What a left click landed on, per the last render.
#[derive(Debug, Clone, PartialEq, Eq)]
enum ClickTarget {
    ChipRemove(String),
    Clear,
    Row(usize),
    Panel,
    Trigger,
    Outside,
}

impl ClickTarget {
    fn locate(ui: &UiInner, x: u16, y: u16) -> Self {
        let layout = &ui.layout;
        if let Some((_, value)) = layout.chip_removes.iter().find(|(r, _)| r.contains(x, y)) {
            return Self::ChipRemove(value.clone());
        }
        if layout.clear.is_some_and(|r| r.contains(x, y)) {
            return Self::Clear;
        }
        if ui.is_open {
            if let Some((_, i)) = layout.rows.iter().find(|(r, _)| r.contains(x, y)) {
                return Self::Row(*i);
            }
            if layout.panel.is_some_and(|p| p.contains(x, y)) {
                return Self::Panel;
            }
        }
        if layout.trigger.contains(x, y) {
            return Self::Trigger;
        }
        Self::Outside
    }
}

impl fmt::Debug for MultiSelect<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MultiSelect")
            .field("options", &self.options.len())
            .field("selected", &self.selected)
            .field("disabled", &self.disabled)
            .field("searchable", &self.searchable)
            .field("clearable", &self.clearable)
            .field("max_displayed_chips", &self.max_displayed_chips)
            .field("locale", &self.locale)
            .finish_non_exhaustive()
    }
}

impl StatefulWidget for MultiSelect<'_> {
    type State = MultiSelectState;

    fn render(&self, area: Rect, frame: &mut Frame, state: &mut Self::State) {
        #[cfg(feature = "tracing")]
        let _span = tracing::debug_span!(
            "widget_render",
            widget = "MultiSelect",
            x = area.x,
            y = area.y,
            w = area.width,
            h = area.height
        )
        .entered();

        let area = area.intersection(&frame.bounds());
        let mut stale_guard = None;
        {
            let mut ui = state.inner.borrow_mut();
            if self.disabled {
                ui.trigger_focused = false;
                if ui.is_open {
                    stale_guard = ui.close_panel();
                    ui.trigger_focused = false;
                }
            }
            if area.is_empty() {
                ui.layout = Default::default();
            } else {
                let filtered = self.filtered(&ui.search_term);
                ui.clamp_focus(filtered.len());
                let strings = self.strings();
                let mut layout = state::Layout::default();
                trigger::render_trigger(self, area, frame, &ui, &strings, &mut layout);
                if ui.is_open {
                    panel::render_panel(self, frame, &mut ui, &filtered, &strings, &mut layout);
                }
                ui.layout = layout;
            }
        }
        drop(stale_guard);
    }
}
