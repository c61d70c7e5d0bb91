#![forbid(unsafe_code)]

//! Component-owned UI state.
//!
//! The state lives behind `Rc<RefCell<..>>` so the outside-click listener
//! registered on the [`PointerHub`] can reach it. The listener only holds
//! a `Weak` handle, and the state owns the [`ListenerGuard`], so dropping
//! the state (unmount) deregisters the listener even while open.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use izui_core::event::MouseEvent;
use izui_core::geometry::Rect;

use crate::pointer::{ListenerGuard, PointerHub};

/// Page-space placement of the panel, captured when it opens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct PanelPosition {
    /// Page row of the panel's top edge (trigger bottom + vertical scroll).
    pub top: u16,
    /// Page column of the panel's left edge (trigger left + horizontal scroll).
    pub left: u16,
    /// Panel width in cells; equals the trigger width.
    pub width: u16,
}

/// Screen rects recorded by the last render, used for pointer routing.
#[derive(Debug, Clone, Default)]
pub(crate) struct Layout {
    pub trigger: Rect,
    pub clear: Option<Rect>,
    /// Remove control of each chip, with the value it removes.
    pub chip_removes: Vec<(Rect, String)>,
    pub panel: Option<Rect>,
    pub search: Option<Rect>,
    /// Visible option rows with their index into the filtered list.
    pub rows: Vec<(Rect, usize)>,
}

impl Layout {
    /// Inside the trigger or the panel.
    pub fn contains(&self, x: u16, y: u16) -> bool {
        self.trigger.contains(x, y) || self.panel.is_some_and(|p| p.contains(x, y))
    }
}

#[derive(Debug, Default)]
pub(crate) struct UiInner {
    pub is_open: bool,
    pub search_term: String,
    pub focused: Option<usize>,
    pub panel_position: Option<PanelPosition>,
    pub trigger_focused: bool,
    pub list_scroll: usize,
    pub layout: Layout,
    pub listener: Option<ListenerGuard>,
}

impl UiInner {
    /// Close the panel and reset transient state.
    ///
    /// Returns the listener guard so the caller can drop it after
    /// releasing its borrow of this state.
    #[must_use]
    pub fn close_panel(&mut self) -> Option<ListenerGuard> {
        if self.is_open {
            izui_core::debug!(widget = "MultiSelect", "panel closed");
        }
        self.is_open = false;
        self.search_term.clear();
        self.focused = None;
        self.list_scroll = 0;
        self.layout.panel = None;
        self.layout.search = None;
        self.layout.rows.clear();
        self.trigger_focused = true;
        self.listener.take()
    }

    /// Drop a focus index that no longer fits the filtered list.
    pub fn clamp_focus(&mut self, len: usize) {
        if self.focused.is_some_and(|i| i >= len) {
            self.focused = None;
        }
    }

    /// Scroll the option list so the focused row is visible.
    pub fn ensure_focus_visible(&mut self, visible_rows: usize) {
        let Some(focused) = self.focused else {
            return;
        };
        let visible_rows = visible_rows.max(1);
        if focused < self.list_scroll {
            self.list_scroll = focused;
        } else if focused >= self.list_scroll + visible_rows {
            self.list_scroll = focused + 1 - visible_rows;
        }
    }
}

/// State of one multi-select instance.
///
/// Create one per dropdown and keep it across renders. The hub it was
/// created with receives the outside-click listener while the panel is open.
#[derive(Debug)]
pub struct MultiSelectState {
    pub(crate) inner: Rc<RefCell<UiInner>>,
    hub: PointerHub,
}

impl Default for MultiSelectState {
    /// State attached to a private hub; outside clicks are never seen.
    fn default() -> Self {
        Self::new(&PointerHub::new())
    }
}

impl MultiSelectState {
    pub fn new(hub: &PointerHub) -> Self {
        Self {
            inner: Rc::new(RefCell::new(UiInner::default())),
            hub: hub.clone(),
        }
    }

    pub fn is_open(&self) -> bool {
        self.inner.borrow().is_open
    }

    pub fn search_term(&self) -> String {
        self.inner.borrow().search_term.clone()
    }

    /// Index into the filtered options of the keyboard-focused row.
    pub fn focused_index(&self) -> Option<usize> {
        self.inner.borrow().focused
    }

    /// Snapshot taken when the panel last opened.
    pub fn panel_position(&self) -> Option<PanelPosition> {
        self.inner.borrow().panel_position
    }

    /// Whether the trigger has keyboard focus.
    pub fn is_focused(&self) -> bool {
        self.inner.borrow().trigger_focused
    }

    /// Give the trigger keyboard focus.
    ///
    /// A disabled widget drops focus again on its next render.
    pub fn focus(&mut self) {
        self.inner.borrow_mut().trigger_focused = true;
    }

    /// Take keyboard focus away from the trigger.
    pub fn blur(&mut self) {
        self.inner.borrow_mut().trigger_focused = false;
    }

    /// Close the panel programmatically. Focus returns to the trigger.
    pub fn close(&mut self) {
        let guard = self.inner.borrow_mut().close_panel();
        drop(guard);
    }

    /// Whether an outside-click listener is currently registered.
    pub fn is_listening(&self) -> bool {
        self.inner.borrow().listener.is_some()
    }

    /// Open the panel at `position` and start listening for outside clicks.
    pub(crate) fn open_at(&mut self, position: PanelPosition) {
        let weak = Rc::downgrade(&self.inner);
        let guard = self
            .hub
            .listen(move |event| close_on_outside_click(&weak, event));

        let mut ui = self.inner.borrow_mut();
        ui.is_open = true;
        ui.search_term.clear();
        ui.focused = None;
        ui.list_scroll = 0;
        ui.panel_position = Some(position);
        ui.trigger_focused = true;
        // Replacing a guard here would mean a second listener; keep one.
        let previous = ui.listener.replace(guard);
        drop(ui);
        drop(previous);
        izui_core::debug!(
            widget = "MultiSelect",
            top = position.top,
            left = position.left,
            width = position.width,
            "panel opened"
        );
    }
}

fn close_on_outside_click(weak: &Weak<RefCell<UiInner>>, event: &MouseEvent) {
    if !event.is_pointer_down() {
        return;
    }
    let Some(inner) = weak.upgrade() else {
        return;
    };
    let guard = {
        let Ok(mut ui) = inner.try_borrow_mut() else {
            izui_core::trace!(x = event.x, y = event.y, "outside pointer-down skipped: state busy");
            return;
        };
        if !ui.is_open || ui.layout.contains(event.x, event.y) {
            return;
        }
        izui_core::trace!(x = event.x, y = event.y, "outside pointer-down");
        ui.close_panel()
    };
    drop(guard);
}
