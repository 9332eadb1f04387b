//! The interface between the engine and host event sources.

use std::rc::Rc;

use crate::signal::SourceEvent;

/// Callback a source invokes for every event it emits.
pub type SourceListener = Rc<dyn Fn(&SourceEvent)>;

/// Identifies one listener registration on an [`EventSource`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

impl ListenerId {
    /// Wrap a raw counter value. Sources hand these out monotonically.
    pub fn new(raw: u64) -> Self {
        Self(raw)
    }
}

/// A host object that emits key signals and focus-loss notifications.
///
/// Implementations deliver events synchronously: every attached listener is
/// called to completion, in attach order, on the emitting thread. Methods
/// take `&self` so a source can be shared behind `Rc`.
pub trait EventSource {
    /// Attach a listener; it observes every subsequent event.
    fn add_listener(&self, listener: SourceListener) -> ListenerId;

    /// Detach a previously attached listener. Unknown ids are ignored.
    fn remove_listener(&self, id: ListenerId);
}
