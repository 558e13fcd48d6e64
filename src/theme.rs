//! Light/dark theme signal
//!
//! The page toggles a `dark` class on the root element. The host feeds those
//! mutations into a [`ThemeSignal`]; the backdrop subscribes and redraws on
//! change. Single-threaded (`Rc`), matching the browser event loop.

use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

/// Page colour scheme
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    /// Theme implied by a root element `class` attribute
    pub fn from_class_list(classes: &str) -> Self {
        if classes.split_whitespace().any(|c| c == "dark") {
            Theme::Dark
        } else {
            Theme::Light
        }
    }
}

type Listener = Box<dyn FnMut(Theme)>;

/// Current theme plus change listeners
pub struct ThemeSignal {
    current: Cell<Theme>,
    listeners: RefCell<Vec<(u64, Listener)>>,
    next_id: Cell<u64>,
}

impl ThemeSignal {
    pub fn new(initial: Theme) -> Rc<Self> {
        Rc::new(Self {
            current: Cell::new(initial),
            listeners: RefCell::new(Vec::new()),
            next_id: Cell::new(0),
        })
    }

    pub fn get(&self) -> Theme {
        self.current.get()
    }

    /// Store a new theme; listeners run only if it differs from the current one.
    /// Listeners must not subscribe or unsubscribe from inside the callback.
    pub fn set(&self, theme: Theme) -> bool {
        if self.current.replace(theme) == theme {
            return false;
        }
        log::debug!("Theme changed to {:?}", theme);
        for (_, listener) in self.listeners.borrow_mut().iter_mut() {
            listener(theme);
        }
        true
    }

    /// Register a listener; it stays attached until the returned handle drops
    pub fn subscribe(self: &Rc<Self>, listener: impl FnMut(Theme) + 'static) -> ThemeSubscription {
        let id = self.next_id.get();
        self.next_id.set(id + 1);
        self.listeners.borrow_mut().push((id, Box::new(listener)));
        ThemeSubscription {
            signal: Rc::downgrade(self),
            id,
        }
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.borrow().len()
    }

    fn unsubscribe(&self, id: u64) {
        self.listeners.borrow_mut().retain(|(lid, _)| *lid != id);
    }
}

/// Detaches its listener on drop
#[must_use = "dropping the subscription detaches the listener"]
pub struct ThemeSubscription {
    signal: Weak<ThemeSignal>,
    id: u64,
}

impl Drop for ThemeSubscription {
    fn drop(&mut self) {
        if let Some(signal) = self.signal.upgrade() {
            signal.unsubscribe(self.id);
        }
    }
}
