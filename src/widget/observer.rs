//! Property change notification.
//!
//! Subscriptions are keyed by `(target widget, property)` and run in
//! registration order. Each subscription has an owner; removing the owner
//! from the tree cancels everything it owns, and destroying the target
//! drops everything registered on it.

use std::collections::HashMap;

use super::tree::{WidgetId, WidgetTree};

/// Observable widget properties.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Property {
    Size,
    Pos,
    Visible,
    Enabled,
    Transparent,
    Background,
    Alpha,
    /// Behavior-defined property, notified through [`WidgetTree::notify`].
    Custom(&'static str),
}

/// Returned by [`WidgetTree::on_change`]; pass to [`WidgetTree::cancel`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SubscriptionHandle(u64);

pub type Callback = Box<dyn FnMut(&mut WidgetTree, WidgetId)>;

struct Registration {
    target: WidgetId,
    property: Property,
    owner: WidgetId,
    /// `None` while the callback is running.
    callback: Option<Callback>,
}

#[derive(Default)]
pub(crate) struct ObserverRegistry {
    next_handle: u64,
    by_key: HashMap<(WidgetId, Property), Vec<SubscriptionHandle>>,
    registrations: HashMap<SubscriptionHandle, Registration>,
}

impl ObserverRegistry {
    pub(crate) fn subscribe(
        &mut self,
        target: WidgetId,
        property: Property,
        owner: WidgetId,
        callback: Callback,
    ) -> SubscriptionHandle {
        let handle = SubscriptionHandle(self.next_handle);
        self.next_handle += 1;
        self.by_key.entry((target, property)).or_default().push(handle);
        self.registrations.insert(
            handle,
            Registration {
                target,
                property,
                owner,
                callback: Some(callback),
            },
        );
        handle
    }

    pub(crate) fn cancel(&mut self, handle: SubscriptionHandle) -> bool {
        let Some(registration) = self.registrations.remove(&handle) else {
            return false;
        };
        let key = (registration.target, registration.property);
        if let Some(handles) = self.by_key.get_mut(&key) {
            handles.retain(|&h| h != handle);
            if handles.is_empty() {
                self.by_key.remove(&key);
            }
        }
        true
    }

    /// Cancel every subscription owned by `owner`; returns how many.
    pub(crate) fn cancel_owned_by(&mut self, owner: WidgetId) -> usize {
        let handles: Vec<_> = self
            .registrations
            .iter()
            .filter(|(_, r)| r.owner == owner)
            .map(|(&h, _)| h)
            .collect();
        handles.into_iter().filter(|&h| self.cancel(h)).count()
    }

    /// Drop every subscription registered on `target`.
    pub(crate) fn drop_target(&mut self, target: WidgetId) {
        let handles: Vec<_> = self
            .registrations
            .iter()
            .filter(|(_, r)| r.target == target)
            .map(|(&h, _)| h)
            .collect();
        for handle in handles {
            self.cancel(handle);
        }
    }

    pub(crate) fn handles(&self, target: WidgetId, property: Property) -> Vec<SubscriptionHandle> {
        self.by_key
            .get(&(target, property))
            .cloned()
            .unwrap_or_default()
    }

    pub(crate) fn take_callback(&mut self, handle: SubscriptionHandle) -> Option<Callback> {
        self.registrations.get_mut(&handle)?.callback.take()
    }

    /// Put a callback back unless it was cancelled while running.
    pub(crate) fn restore_callback(&mut self, handle: SubscriptionHandle, callback: Callback) {
        if let Some(registration) = self.registrations.get_mut(&handle) {
            registration.callback = Some(callback);
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.registrations.len()
    }
}
