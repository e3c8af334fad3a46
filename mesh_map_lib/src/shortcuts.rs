//! Process-wide keyboard shortcuts.
//!
//! Listeners live on an [`InputSurface`] shared by the whole host. A view
//! registers through [`register_global_shortcuts`] and owns the returned
//! [`ShortcutSubscription`]; releasing (or dropping) the subscription
//! deregisters the listener.

use crate::route::{Router, ROOT_ROUTE};
use std::cell::{Cell, RefCell};
use std::collections::BTreeMap;
use std::rc::Rc;

pub const ESCAPE_KEY_CODE: u32 = 27;
pub const META_LEFT_KEY_CODE: u32 = 91;
pub const META_RIGHT_KEY_CODE: u32 = 93;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Escape,
    /// Either platform command key.
    Meta,
    Other(u32),
}

impl Key {
    pub fn from_code(code: u32) -> Self {
        match code {
            ESCAPE_KEY_CODE => Self::Escape,
            META_LEFT_KEY_CODE | META_RIGHT_KEY_CODE => Self::Meta,
            other => Self::Other(other),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyEvent {
    Down(Key),
    Up(Key),
}

pub type ListenerId = u64;
type Listener = Rc<dyn Fn(KeyEvent)>;

/// The global input surface key events are dispatched on.
#[derive(Default)]
pub struct InputSurface {
    listeners: RefCell<BTreeMap<ListenerId, Listener>>,
    next_id: Cell<ListenerId>,
}

impl InputSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_listener(&self, listener: impl Fn(KeyEvent) + 'static) -> ListenerId {
        let id = self.next_id.get();
        self.next_id.set(id + 1);
        self.listeners.borrow_mut().insert(id, Rc::new(listener));
        id
    }

    pub fn remove_listener(&self, id: ListenerId) -> bool {
        self.listeners.borrow_mut().remove(&id).is_some()
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.borrow().len()
    }

    pub fn dispatch(&self, event: KeyEvent) {
        // Snapshot so a listener may deregister while being called.
        let listeners: Vec<Listener> = self.listeners.borrow().values().cloned().collect();
        for listener in listeners {
            listener(event);
        }
    }
}

/// Ownership of a registered shortcut listener.
pub struct ShortcutSubscription {
    surface: Rc<InputSurface>,
    id: Option<ListenerId>,
}

impl ShortcutSubscription {
    pub fn is_active(&self) -> bool {
        self.id.is_some()
    }

    /// Deregister the listener. Idempotent.
    pub fn release(&mut self) {
        if let Some(id) = self.id.take() {
            self.surface.remove_listener(id);
            tracing::debug!(listener = id, "global shortcuts released");
        }
    }
}

impl Drop for ShortcutSubscription {
    fn drop(&mut self) {
        self.release();
    }
}

/// Escape navigates to the root route; holding a meta key arms
/// multi-select until it is released.
pub fn register_global_shortcuts(
    surface: &Rc<InputSurface>,
    multi_select: Rc<Cell<bool>>,
    router: Rc<dyn Router>,
) -> ShortcutSubscription {
    let id = surface.add_listener(move |event| match event {
        KeyEvent::Down(Key::Escape) => {
            if let Err(e) = router.push(ROOT_ROUTE) {
                tracing::warn!(error = %e, "escape navigation failed");
            }
        }
        KeyEvent::Down(Key::Meta) => multi_select.set(true),
        KeyEvent::Up(Key::Meta) => multi_select.set(false),
        _ => {}
    });
    tracing::debug!(listener = id, "global shortcuts registered");

    ShortcutSubscription {
        surface: Rc::clone(surface),
        id: Some(id),
    }
}
