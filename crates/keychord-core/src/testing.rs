//! In-memory event source for driving an engine by hand.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use crate::signal::{KeySignal, SignalTarget, SourceEvent};
use crate::source::{EventSource, ListenerId, SourceListener};

/// Scripted stand-in for a host event source.
///
/// Tests construct one, hand it to [`Keychord::new`], and emit key traffic
/// directly. Listeners run synchronously inside each emit call, so
/// assertions can follow immediately.
///
/// [`Keychord::new`]: crate::Keychord::new
///
/// # Example
///
/// ```rust,ignore
/// let source = Rc::new(ScriptedSource::new());
/// let chords = Keychord::new(source.clone());
/// chords.register("shift+a", |_, _| println!("matched"));
/// source.chord(&["ShiftLeft", "KeyA"]);
/// ```
#[derive(Default)]
pub struct ScriptedSource {
    listeners: RefCell<Vec<(ListenerId, SourceListener)>>,
    next_id: Cell<u64>,
}

impl ScriptedSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Deliver an event to every attached listener, in attach order.
    ///
    /// Listeners are snapshotted first, so a listener detaching itself
    /// mid-delivery does not disturb the iteration.
    pub fn emit(&self, event: SourceEvent) {
        let listeners: Vec<SourceListener> = self
            .listeners
            .borrow()
            .iter()
            .map(|(_, listener)| listener.clone())
            .collect();
        for listener in listeners {
            listener(&event);
        }
    }

    /// Press the physical key `code`.
    pub fn press(&self, code: &str) {
        self.emit(SourceEvent::Key(KeySignal::press(code)));
    }

    /// Release the physical key `code`.
    pub fn release(&self, code: &str) {
        self.emit(SourceEvent::Key(KeySignal::release(code)));
    }

    /// Press then release `code`.
    pub fn tap(&self, code: &str) {
        self.press(code);
        self.release(code);
    }

    /// Press every code in order, then release them in the same order.
    pub fn chord(&self, codes: &[&str]) {
        for code in codes {
            self.press(code);
        }
        for code in codes {
            self.release(code);
        }
    }

    /// Press `code` with the signal aimed at `target`.
    pub fn press_on(&self, code: &str, target: SignalTarget) {
        self.emit(SourceEvent::Key(KeySignal::press(code).with_target(target)));
    }

    /// Release `code` with the signal aimed at `target`.
    pub fn release_on(&self, code: &str, target: SignalTarget) {
        self.emit(SourceEvent::Key(KeySignal::release(code).with_target(target)));
    }

    /// Notify listeners that the watched surface lost focus.
    pub fn focus_lost(&self) {
        self.emit(SourceEvent::FocusLost);
    }

    /// Number of currently attached listeners.
    pub fn listener_count(&self) -> usize {
        self.listeners.borrow().len()
    }
}

impl EventSource for ScriptedSource {
    fn add_listener(&self, listener: SourceListener) -> ListenerId {
        let id = ListenerId::new(self.next_id.get());
        self.next_id.set(self.next_id.get() + 1);
        self.listeners.borrow_mut().push((id, listener));
        id
    }

    fn remove_listener(&self, id: ListenerId) {
        self.listeners.borrow_mut().retain(|(held, _)| *held != id);
    }
}
