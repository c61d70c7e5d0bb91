#![forbid(unsafe_code)]

//! Screen-wide pointer listeners.
//!
//! The host loop forwards every mouse event to a [`PointerHub`]. Widgets that
//! need to react to clicks anywhere on screen (dismissing an overlay on an
//! outside click, for instance) call [`PointerHub::listen`] and keep the
//! returned [`ListenerGuard`] for as long as they want to hear events.
//! Dropping the guard deregisters the listener.
//!
//! ```
//! use std::cell::Cell;
//! use std::rc::Rc;
//! use izui_core::event::{MouseButton, MouseEvent, MouseEventKind};
//! use izui_widgets::pointer::PointerHub;
//!
//! let hub = PointerHub::new();
//! let hits = Rc::new(Cell::new(0));
//! let seen = hits.clone();
//! let guard = hub.listen(move |_| seen.set(seen.get() + 1));
//!
//! let click = MouseEvent::new(MouseEventKind::Down(MouseButton::Left), 3, 4);
//! hub.dispatch(&click);
//! drop(guard);
//! hub.dispatch(&click);
//! assert_eq!(hits.get(), 1);
//! ```

use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};

use izui_core::event::MouseEvent;

type Listener = Rc<RefCell<dyn FnMut(&MouseEvent)>>;

#[derive(Default)]
struct HubInner {
    next_id: u64,
    listeners: Vec<(u64, Listener)>,
}

/// Registry of screen-wide pointer listeners.
///
/// Cloning a hub yields another handle to the same registry.
#[derive(Clone, Default)]
pub struct PointerHub {
    inner: Rc<RefCell<HubInner>>,
}

impl PointerHub {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `listener` until the returned guard is dropped.
    #[must_use = "dropping the guard deregisters the listener immediately"]
    pub fn listen(&self, listener: impl FnMut(&MouseEvent) + 'static) -> ListenerGuard {
        let mut inner = self.inner.borrow_mut();
        let id = inner.next_id;
        inner.next_id += 1;
        inner
            .listeners
            .push((id, Rc::new(RefCell::new(listener)) as Listener));
        izui_core::trace!(listener = id, total = inner.listeners.len(), "pointer listener added");
        ListenerGuard {
            hub: Rc::downgrade(&self.inner),
            id,
        }
    }

    /// Deliver `event` to every registered listener, in registration order.
    ///
    /// Listeners may add or drop registrations while being called; a
    /// listener removed by an earlier one in the same dispatch is skipped,
    /// and listeners added during dispatch first hear the next event.
    /// Returns how many listeners were called.
    pub fn dispatch(&self, event: &MouseEvent) -> usize {
        let snapshot: Vec<(u64, Listener)> = self.inner.borrow().listeners.clone();
        let mut called = 0;
        for (id, listener) in snapshot {
            if !self.is_registered(id) {
                continue;
            }
            // A listener that re-enters dispatch does not hear itself.
            if let Ok(mut f) = listener.try_borrow_mut() {
                f(event);
                called += 1;
            }
        }
        called
    }

    /// Number of live listeners.
    pub fn listener_count(&self) -> usize {
        self.inner.borrow().listeners.len()
    }

    fn is_registered(&self, id: u64) -> bool {
        self.inner
            .borrow()
            .listeners
            .iter()
            .any(|(other, _)| *other == id)
    }
}

impl fmt::Debug for PointerHub {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PointerHub")
            .field("listeners", &self.listener_count())
            .finish()
    }
}

/// Keeps a listener registered; deregisters on drop.
pub struct ListenerGuard {
    hub: Weak<RefCell<HubInner>>,
    id: u64,
}

impl ListenerGuard {
    /// Registration id, unique within its hub.
    pub fn id(&self) -> u64 {
        self.id
    }
}

impl fmt::Debug for ListenerGuard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ListenerGuard").field("id", &self.id).finish()
    }
}

impl Drop for ListenerGuard {
    fn drop(&mut self) {
        let Some(hub) = self.hub.upgrade() else {
            return;
        };
        // Take the closure out before releasing the borrow so its captures
        // drop without the registry locked.
        let removed = {
            let mut inner = hub.borrow_mut();
            let pos = inner.listeners.iter().position(|(id, _)| *id == self.id);
            pos.map(|pos| inner.listeners.remove(pos))
        };
        if removed.is_some() {
            izui_core::trace!(listener = self.id, "pointer listener removed");
        }
        drop(removed);
    }
}
