//! One settings instance shared between a chrome screen and any screen that
//! edits it, with synchronous change notification.

use crate::visibility::{SettingName, VisibilitySettings};
use std::cell::{Ref, RefCell, RefMut};
use std::rc::Rc;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SettingChange {
    pub name: SettingName,
    pub value: bool,
}

/// Identity of a registered observer, unique per [`SharedSettings`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SubscriptionId(u64);

type Observer = Rc<RefCell<dyn FnMut(&SettingChange)>>;

#[derive(Default)]
struct Subscribers {
    next_id: u64,
    list: Vec<(SubscriptionId, Observer)>,
}

/// Cheap to clone; every clone refers to the same settings and observers.
#[derive(Clone, Default)]
pub struct SharedSettings {
    state: Rc<RefCell<VisibilitySettings>>,
    subscribers: Rc<RefCell<Subscribers>>,
}

impl SharedSettings {
    pub fn new(settings: VisibilitySettings) -> Self {
        Self {
            state: Rc::new(RefCell::new(settings)),
            subscribers: Rc::default(),
        }
    }

    pub fn borrow(&self) -> Ref<'_, VisibilitySettings> {
        self.state.borrow()
    }

    /// Direct access without notification. Use [`SharedSettings::set`] for
    /// named flags so observers see the change.
    pub fn borrow_mut(&self) -> RefMut<'_, VisibilitySettings> {
        self.state.borrow_mut()
    }

    pub fn flag(&self, name: &str) -> Option<bool> {
        self.state.borrow().flag(name)
    }

    /// Set a flag by string name. Unknown names are ignored and return `false`.
    pub fn set_flag(&self, name: &str, value: bool) -> bool {
        match name.parse::<SettingName>() {
            Ok(name) => {
                self.set(name, value);
                true
            }
            Err(e) => {
                tracing::debug!("ignoring {e}");
                false
            }
        }
    }

    /// Write the flag, then notify observers in registration order before
    /// returning.
    pub fn set(&self, name: SettingName, value: bool) {
        self.state.borrow_mut().set_value(name, value);
        tracing::debug!(setting = %name, value, "setting changed");

        let change = SettingChange { name, value };
        let observers: Vec<Observer> = self
            .subscribers
            .borrow()
            .list
            .iter()
            .map(|(_, o)| o.clone())
            .collect();
        for observer in observers {
            match observer.try_borrow_mut() {
                Ok(mut f) => (&mut *f)(&change),
                Err(_) => tracing::warn!(setting = %name, "skipping re-entrant settings observer"),
            };
        }
    }

    pub fn subscribe<F>(&self, observer: F) -> SubscriptionId
    where
        F: FnMut(&SettingChange) + 'static,
    {
        let mut subs = self.subscribers.borrow_mut();
        subs.next_id += 1;
        let id = SubscriptionId(subs.next_id);
        let observer: Observer = Rc::new(RefCell::new(observer));
        subs.list.push((id, observer));
        id
    }

    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let mut subs = self.subscribers.borrow_mut();
        let before = subs.list.len();
        subs.list.retain(|(sid, _)| *sid != id);
        subs.list.len() != before
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscribers.borrow().list.len()
    }

    pub fn ptr_eq(&self, other: &SharedSettings) -> bool {
        Rc::ptr_eq(&self.state, &other.state)
    }
}
