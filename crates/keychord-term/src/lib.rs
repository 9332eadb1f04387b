//! Terminal event source for **keychord**, backed by crossterm.
//!
//! [`TerminalSource`] adapts [`crossterm::event::Event`]s into the key
//! signals the engine consumes. Feed it events from your own loop, or let
//! [`TerminalSource::pump`] read them directly.
//!
//! Terminals are uneven about keyboard reporting, so the adapter smooths
//! over two gaps:
//!
//! * **Modifiers.** Legacy terminals never report modifier keys as their
//!   own events, only as flags on other key events. The adapter tracks the
//!   flag state and synthesizes sided presses and releases (`"ShiftLeft"`,
//!   `"ControlLeft"`) as flags appear and disappear, so `"ctrl+s"` works
//!   everywhere. Terminals speaking the kitty keyboard protocol report
//!   modifier keys directly; those events pass through as-is.
//! * **Releases.** Legacy terminals never report key release. Until
//!   release reporting is observed or enabled, the adapter follows each
//!   forwarded key press with a synthetic release, so a key reads as a
//!   tap instead of sticking down forever. Call
//!   [`TerminalSource::enable_release_events`] to switch the terminal into
//!   real release reporting where supported.
//!
//! # Example
//!
//! ```rust,ignore
//! use keychord_core::Keychord;
//! use keychord_term::TerminalSource;
//! use std::rc::Rc;
//!
//! let source = Rc::new(TerminalSource::new());
//! let chords = Keychord::new(source.clone());
//!
//! chords.register("ctrl+q", {
//!     let source = source.clone();
//!     move |_, _| source.stop()
//! });
//!
//! crossterm::terminal::enable_raw_mode()?;
//! let _ = source.enable_release_events();
//! source.pump()?;
//! ```

use std::cell::{Cell, RefCell};
use std::io;

use crossterm::event::{
    Event, KeyCode, KeyEventKind, KeyModifiers, KeyboardEnhancementFlags,
    PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
};
use crossterm::execute;
use keychord_core::{
    EventSource, KeySignal, ListenerId, SignalPhase, SourceEvent, SourceListener,
};
use thiserror::Error;

mod codes;

pub use codes::signal_code;

/// Errors from terminal reads or the release-reporting handshake.
#[derive(Debug, Error)]
pub enum TermSourceError {
    /// IO error while reading events or toggling terminal flags.
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
    /// The terminal cannot report key release events.
    #[error("terminal does not report key release events")]
    ReleaseEventsUnsupported,
}

/// Sided physical codes synthesized from modifier flags. Flags carry no
/// side, so the left key stands in for both.
const FLAG_CODES: &[(KeyModifiers, &str)] = &[
    (KeyModifiers::SHIFT, "ShiftLeft"),
    (KeyModifiers::CONTROL, "ControlLeft"),
    (KeyModifiers::ALT, "AltLeft"),
    (KeyModifiers::SUPER, "MetaLeft"),
    (KeyModifiers::META, "MetaLeft"),
];

/// An [`EventSource`] fed by crossterm terminal events.
pub struct TerminalSource {
    listeners: RefCell<Vec<(ListenerId, SourceListener)>>,
    next_id: Cell<u64>,
    stopped: Cell<bool>,
    modifiers: Cell<KeyModifiers>,
    release_reporting: Cell<bool>,
}

impl TerminalSource {
    pub fn new() -> Self {
        Self {
            listeners: RefCell::new(Vec::new()),
            next_id: Cell::new(0),
            stopped: Cell::new(false),
            modifiers: Cell::new(KeyModifiers::empty()),
            release_reporting: Cell::new(false),
        }
    }

    /// Translate one crossterm event and deliver the resulting signals.
    /// Returns true when the event produced at least one signal.
    pub fn feed(&self, event: &Event) -> bool {
        match event {
            Event::Key(key) => self.feed_key(key),
            Event::FocusLost => {
                // Flag state is stale once focus is gone.
                self.modifiers.set(KeyModifiers::empty());
                self.broadcast(&SourceEvent::FocusLost);
                true
            }
            _ => false,
        }
    }

    fn feed_key(&self, key: &crossterm::event::KeyEvent) -> bool {
        if key.kind == KeyEventKind::Release {
            self.release_reporting.set(true);
        }

        let is_modifier_key = matches!(key.code, KeyCode::Modifier(_));
        let mut emitted = false;

        // Kitty-style modifier key events carry their own flag bit; diffing
        // those would dispatch the same press twice.
        if !is_modifier_key {
            emitted |= self.sync_modifier_flags(key.modifiers);
        } else {
            self.modifiers.set(key.modifiers);
        }

        let Some(code) = signal_code(key.code) else {
            return emitted;
        };
        let phase = match key.kind {
            KeyEventKind::Press | KeyEventKind::Repeat => SignalPhase::Press,
            KeyEventKind::Release => SignalPhase::Release,
        };
        self.broadcast(&SourceEvent::Key(KeySignal::new(code.clone(), phase)));

        // Without release reporting a key would stick down forever, so a
        // forwarded press reads as a tap. Modifier keys are exempt: their
        // releases arrive through flag clears instead.
        if phase == SignalPhase::Press && !is_modifier_key && !self.release_reporting.get() {
            self.broadcast(&SourceEvent::Key(KeySignal::release(code)));
        }
        true
    }

    // Emit presses for newly set flags and releases for newly cleared
    // ones, then remember the current state.
    fn sync_modifier_flags(&self, current: KeyModifiers) -> bool {
        let previous = self.modifiers.get();
        if current == previous {
            return false;
        }

        let mut pressed: Vec<&str> = Vec::new();
        let mut released: Vec<&str> = Vec::new();
        for &(flag, code) in FLAG_CODES {
            if current.contains(flag) && !previous.contains(flag) && !pressed.contains(&code) {
                pressed.push(code);
            }
            if !current.contains(flag) && previous.contains(flag) && !released.contains(&code) {
                released.push(code);
            }
        }
        self.modifiers.set(current);

        let emitted = !(pressed.is_empty() && released.is_empty());
        for code in released {
            self.broadcast(&SourceEvent::Key(KeySignal::release(code)));
        }
        for code in pressed {
            self.broadcast(&SourceEvent::Key(KeySignal::press(code)));
        }
        emitted
    }

    fn broadcast(&self, event: &SourceEvent) {
        let listeners: Vec<SourceListener> = self
            .listeners
            .borrow()
            .iter()
            .map(|(_, listener)| listener.clone())
            .collect();
        for listener in listeners {
            listener(event);
        }
    }

    /// Switch the terminal into real key-release reporting via the kitty
    /// keyboard protocol. Fails with
    /// [`TermSourceError::ReleaseEventsUnsupported`] on terminals without
    /// the protocol.
    pub fn enable_release_events(&self) -> Result<(), TermSourceError> {
        if !crossterm::terminal::supports_keyboard_enhancement()? {
            return Err(TermSourceError::ReleaseEventsUnsupported);
        }
        execute!(
            io::stdout(),
            PushKeyboardEnhancementFlags(KeyboardEnhancementFlags::REPORT_EVENT_TYPES)
        )?;
        self.release_reporting.set(true);
        Ok(())
    }

    /// Undo [`TerminalSource::enable_release_events`].
    pub fn disable_release_events(&self) -> Result<(), TermSourceError> {
        execute!(io::stdout(), PopKeyboardEnhancementFlags)?;
        self.release_reporting.set(false);
        Ok(())
    }

    /// Tell the adapter whether the terminal reports key releases, without
    /// touching the terminal. For hosts that run the kitty handshake
    /// themselves.
    pub fn set_release_reporting(&self, reporting: bool) {
        self.release_reporting.set(reporting);
    }

    /// Read and feed terminal events until [`TerminalSource::stop`] is
    /// called from a handler.
    pub fn pump(&self) -> Result<(), TermSourceError> {
        self.stopped.set(false);
        while !self.stopped.get() {
            let event = crossterm::event::read()?;
            self.feed(&event);
        }
        Ok(())
    }

    /// Make a running [`TerminalSource::pump`] return after the current
    /// event.
    pub fn stop(&self) {
        self.stopped.set(true);
    }

    /// Number of currently attached listeners.
    pub fn listener_count(&self) -> usize {
        self.listeners.borrow().len()
    }
}

impl Default for TerminalSource {
    fn default() -> Self {
        Self::new()
    }
}

impl EventSource for TerminalSource {
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
