//! The held-key set and the meta pending-release buffer.
//!
//! Some hosts suppress key-release events for keys pressed while the meta
//! key is held, which would leave those keys stuck down forever. The
//! tracker therefore buffers every key pressed during a meta hold (and
//! every key already down when meta arrives) and force-releases the buffer
//! when meta itself comes back up.

use std::cell::RefCell;
use std::rc::Rc;

use crate::chord::normalize_combination;

/// The set of canonical key values currently held down, in press order.
///
/// Clones share storage: the handle returned by
/// [`Keychord::held_keys`](crate::Keychord::held_keys) observes every later
/// press and release.
#[derive(Debug, Clone, Default)]
pub struct HeldKeys {
    keys: Rc<RefCell<Vec<String>>>,
    pending_release: Rc<RefCell<Vec<String>>>,
}

impl HeldKeys {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Record a press of `value`, buffering forced releases around meta.
    pub(crate) fn press(&self, value: &str) {
        let mut keys = self.keys.borrow_mut();
        let mut pending = self.pending_release.borrow_mut();

        if keys.iter().any(|key| key == "meta") && !pending.iter().any(|key| key == value) {
            pending.push(value.to_string());
        }
        if value == "meta" {
            for key in keys.iter() {
                if !pending.iter().any(|buffered| buffered == key) {
                    pending.push(key.clone());
                }
            }
        }
        if !keys.iter().any(|key| key == value) {
            keys.push(value.to_string());
        }
    }

    /// Record a release of `value`. Releasing meta also force-releases the
    /// buffered keys; the drained buffer is returned so the caller can log
    /// it.
    pub(crate) fn release(&self, value: &str) -> Vec<String> {
        let mut keys = self.keys.borrow_mut();
        keys.retain(|key| key != value);

        if value != "meta" {
            return Vec::new();
        }
        let mut pending = self.pending_release.borrow_mut();
        if pending.is_empty() {
            return Vec::new();
        }
        let flushed: Vec<String> = pending.drain(..).collect();
        for key in &flushed {
            keys.retain(|held| held != key);
        }
        flushed
    }

    /// Drop every held key. The pending buffer is left alone so a meta
    /// release arriving after a focus loss still cleans up.
    pub(crate) fn clear(&self) {
        self.keys.borrow_mut().clear();
    }

    /// Drop held keys and the pending buffer (watch teardown).
    pub(crate) fn reset(&self) {
        self.keys.borrow_mut().clear();
        self.pending_release.borrow_mut().clear();
    }

    /// The normalized combination for the current held set.
    pub(crate) fn combination(&self) -> String {
        normalize_combination(&self.keys.borrow().join("+"))
    }

    /// Whether `value` (already canonical) is held.
    pub fn contains(&self, value: &str) -> bool {
        self.keys.borrow().iter().any(|key| key == value)
    }

    /// Number of held keys.
    pub fn len(&self) -> usize {
        self.keys.borrow().len()
    }

    /// True when nothing is held.
    pub fn is_empty(&self) -> bool {
        self.keys.borrow().is_empty()
    }

    /// Snapshot of the held keys in press order.
    pub fn to_vec(&self) -> Vec<String> {
        self.keys.borrow().clone()
    }
}
