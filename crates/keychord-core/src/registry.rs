//! Storage for registered combination handlers.

use std::cell::Cell;
use std::collections::HashMap;
use std::rc::Rc;

use crate::chord::WILDCARD_KEY;
use crate::signal::{KeySignal, SignalPhase};

/// Callback invoked when a bound combination matches.
pub type ChordAction = Rc<dyn Fn(&KeySignal, &ChordContext)>;

/// Per-invocation context handed to a [`ChordAction`] alongside the raw
/// signal.
pub struct ChordContext {
    key: String,
    stopped: Cell<bool>,
}

impl ChordContext {
    pub(crate) fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            stopped: Cell::new(false),
        }
    }

    /// The combination this invocation matched, spelled the way it was
    /// registered (whitespace stripped, not normalized).
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Halt dispatch: no later handler runs for this signal.
    ///
    /// Inert when the handler was invoked through
    /// [`Keychord::trigger`](crate::Keychord::trigger).
    pub fn stop_propagation(&self) {
        self.stopped.set(true);
    }

    pub(crate) fn stopped(&self) -> bool {
        self.stopped.get()
    }
}

/// One registered handler under a normalized combination key.
#[derive(Clone)]
pub(crate) struct HandlerItem {
    pub(crate) action: ChordAction,
    pub(crate) order: i32,
    pub(crate) phase: SignalPhase,
    pub(crate) scope: String,
    pub(crate) key: String,
}

/// Handler lists per normalized combination, each kept sorted by ascending
/// order.
#[derive(Default)]
pub(crate) struct HandlerRegistry {
    handlers: HashMap<String, Vec<HandlerItem>>,
}

impl HandlerRegistry {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Append an entry under `normalized`, re-sorting that list by order.
    /// Entries with equal order keep their registration order.
    pub(crate) fn add(&mut self, normalized: &str, item: HandlerItem) {
        let items = self.handlers.entry(normalized.to_string()).or_default();
        items.push(item);
        items.sort_by_key(|item| item.order);
    }

    /// Remove every entry under `normalized` holding this exact action.
    pub(crate) fn remove_action(&mut self, normalized: &str, action: &ChordAction) {
        if let Some(items) = self.handlers.get_mut(normalized) {
            items.retain(|item| !Rc::ptr_eq(&item.action, action));
        }
    }

    /// Remove every entry under `normalized` registered in `scope`.
    pub(crate) fn remove_scope(&mut self, normalized: &str, scope: &str) {
        if let Some(items) = self.handlers.get_mut(normalized) {
            items.retain(|item| item.scope != scope);
        }
    }

    /// Drop every entry in every scope.
    pub(crate) fn clear(&mut self) {
        self.handlers.clear();
    }

    /// Snapshot of the entries under `normalized` followed by the wildcard
    /// bucket.
    pub(crate) fn matches(&self, normalized: &str) -> Vec<HandlerItem> {
        let mut items: Vec<HandlerItem> = self
            .handlers
            .get(normalized)
            .map(|items| items.to_vec())
            .unwrap_or_default();
        if let Some(wildcard) = self.handlers.get(WILDCARD_KEY) {
            items.extend(wildcard.iter().cloned());
        }
        items
    }

    /// Snapshot of the entries under `normalized` only, wildcard excluded.
    pub(crate) fn exact(&self, normalized: &str) -> Vec<HandlerItem> {
        self.handlers
            .get(normalized)
            .map(|items| items.to_vec())
            .unwrap_or_default()
    }
}
