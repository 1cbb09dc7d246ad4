// SPDX-License-Identifier: MIT OR Apache-2.0

use core::cell::RefCell;
use core::fmt;
use std::rc::{Rc, Weak};

/// Handle that undoes a registration, either explicitly or when dropped
#[must_use = "dropping a Registration releases it immediately"]
pub struct Registration {
    release: Option<Box<dyn FnOnce()>>,
}

impl Registration {
    pub fn new(release: impl FnOnce() + 'static) -> Self {
        Self {
            release: Some(Box::new(release)),
        }
    }

    /// Release now
    pub fn deregister(mut self) {
        if let Some(release) = self.release.take() {
            release();
        }
    }

    /// Keep the registration for as long as its target lives
    pub fn forget(mut self) {
        self.release = None;
    }
}

impl Drop for Registration {
    fn drop(&mut self) {
        if let Some(release) = self.release.take() {
            release();
        }
    }
}

impl fmt::Debug for Registration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registration")
            .field("active", &self.release.is_some())
            .finish()
    }
}

type Listener = Rc<dyn Fn()>;

#[derive(Default)]
struct Listeners {
    next_id: u64,
    entries: Vec<(u64, Listener)>,
}

/// Broadcast source, such as window focus or a request to refit everything.
///
/// Clones share the same listeners.
#[derive(Clone, Default)]
pub struct Signal {
    listeners: Rc<RefCell<Listeners>>,
}

impl Signal {
    pub fn new() -> Self {
        Self::default()
    }

    /// Call `listener` on every emission until the returned registration is released
    pub fn subscribe(&self, listener: impl Fn() + 'static) -> Registration {
        let id = {
            let mut listeners = self.listeners.borrow_mut();
            let id = listeners.next_id;
            listeners.next_id += 1;
            listeners.entries.push((id, Rc::new(listener)));
            id
        };

        let weak: Weak<RefCell<Listeners>> = Rc::downgrade(&self.listeners);
        Registration::new(move || {
            if let Some(listeners) = weak.upgrade() {
                listeners
                    .borrow_mut()
                    .entries
                    .retain(|(entry_id, _)| *entry_id != id);
            }
        })
    }

    /// Call every listener subscribed at the time of the call
    pub fn emit(&self) {
        let listeners: Vec<Listener> = self
            .listeners
            .borrow()
            .entries
            .iter()
            .map(|(_, listener)| listener.clone())
            .collect();
        for listener in listeners {
            listener();
        }
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.borrow().entries.len()
    }
}

impl fmt::Debug for Signal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Signal")
            .field("listeners", &self.listener_count())
            .finish()
    }
}
