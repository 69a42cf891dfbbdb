//! Property-change notification shared by the view-model components.
//!
//! Components own a [`Notifier`] and raise a [`PropertyChange`] after every real state
//! transition. Observers (typically the renderer) register callbacks per [`Property`]; callbacks
//! run synchronously, in registration order, before the mutating call returns. Callbacks receive
//! the new value and must not call back into the component that raised the change.

use std::sync::atomic::{AtomicU64, Ordering};

use hashlink::LinkedHashMap;

use crate::types::ContentMode;

/// Observable properties exposed at the renderer boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Property {
    CurrentIndex,
    PageCount,
    ContentMode,
    IsCommandPromptVisible,
    CommandPromptText,
}

impl Property {
    /// Stable property name, matching the binding names used by the view layer.
    pub fn name(self) -> &'static str {
        match self {
            Property::CurrentIndex => "CurrentIndex",
            Property::PageCount => "PageCount",
            Property::ContentMode => "CurrentMainContent",
            Property::IsCommandPromptVisible => "IsCommandPromptVisible",
            Property::CommandPromptText => "CommandPromptText",
        }
    }
}

/// New value carried alongside a change notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PropertyValue {
    Index(usize),
    Mode(ContentMode),
    Flag(bool),
    Text(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PropertyChange {
    pub property: Property,
    pub value: PropertyValue,
}

impl PropertyChange {
    pub fn new(property: Property, value: PropertyValue) -> Self {
        Self { property, value }
    }
}

/// Handle identifying a registered callback, used to unsubscribe.
///
/// Ids are unique across notifiers so components that route subscriptions to several
/// notifiers can unsubscribe without knowing which one holds the callback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ObserverId(u64);

static NEXT_OBSERVER_ID: AtomicU64 = AtomicU64::new(1);

type Callback = Box<dyn FnMut(&PropertyChange)>;

/// Maps each property to its ordered set of callbacks.
#[derive(Default)]
pub struct Notifier {
    observers: LinkedHashMap<Property, Vec<(ObserverId, Callback)>>,
}

impl std::fmt::Debug for Notifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let counts: Vec<(Property, usize)> =
            self.observers.iter().map(|(property, list)| (*property, list.len())).collect();
        f.debug_struct("Notifier").field("observers", &counts).finish()
    }
}

impl Notifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `callback` for changes of `property`.
    pub fn subscribe<F>(&mut self, property: Property, callback: F) -> ObserverId
    where
        F: FnMut(&PropertyChange) + 'static,
    {
        let id = ObserverId(NEXT_OBSERVER_ID.fetch_add(1, Ordering::Relaxed));
        self.observers.entry(property).or_insert_with(Vec::new).push((id, Box::new(callback)));
        id
    }

    /// Remove a callback. Returns false when the id was unknown.
    pub fn unsubscribe(&mut self, id: ObserverId) -> bool {
        for list in self.observers.values_mut() {
            if let Some(pos) = list.iter().position(|(observer, _)| *observer == id) {
                list.remove(pos);
                return true;
            }
        }
        false
    }

    pub fn observer_count(&self, property: Property) -> usize {
        self.observers.get(&property).map(Vec::len).unwrap_or(0)
    }

    /// Deliver a change to every callback registered for its property.
    pub fn raise(&mut self, change: PropertyChange) {
        tracing::trace!(
            property = change.property.name(),
            value = ?change.value,
            "property changed"
        );
        if let Some(list) = self.observers.get_mut(&change.property) {
            for (_, callback) in list.iter_mut() {
                callback(&change);
            }
        }
    }

    /// Drop every callback, used once the owner has been torn down.
    pub fn clear(&mut self) {
        self.observers.clear();
    }
}
