//! Key signals as delivered by host event sources.

use std::cell::Cell;
use std::fmt;
use std::rc::Rc;

/// Which half of a keystroke a signal describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SignalPhase {
    /// The key went down.
    Press,
    /// The key came back up.
    Release,
}

impl fmt::Display for SignalPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SignalPhase::Press => write!(f, "press"),
            SignalPhase::Release => write!(f, "release"),
        }
    }
}

/// What held input focus when a signal fired.
///
/// Only the event filter looks at this. Hosts without focusable text
/// controls can leave everything at [`SignalTarget::Surface`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SignalTarget {
    /// The plain surface the engine watches.
    #[default]
    Surface,
    /// A single-line text input.
    TextInput,
    /// A multi-line text area.
    TextArea,
    /// A selection control.
    Select,
    /// Any other editable region.
    EditableText,
}

/// A raw key press or release from a host event source.
#[derive(Debug, Clone)]
pub struct KeySignal {
    /// Physical key code, e.g. `"KeyA"` or `"ShiftLeft"`. The active layout
    /// decides what value this produces.
    pub code: String,
    /// Press or release.
    pub phase: SignalPhase,
    /// What held focus when the signal fired.
    pub target: SignalTarget,
    /// True for signals fabricated by [`Keychord::trigger`].
    ///
    /// [`Keychord::trigger`]: crate::Keychord::trigger
    pub synthetic: bool,
    default_prevented: Cell<bool>,
}

impl KeySignal {
    /// A signal with an explicit phase, aimed at the plain surface.
    pub fn new(code: impl Into<String>, phase: SignalPhase) -> Self {
        Self {
            code: code.into(),
            phase,
            target: SignalTarget::Surface,
            synthetic: false,
            default_prevented: Cell::new(false),
        }
    }

    /// A press-phase signal for `code`.
    pub fn press(code: impl Into<String>) -> Self {
        Self::new(code, SignalPhase::Press)
    }

    /// A release-phase signal for `code`.
    pub fn release(code: impl Into<String>) -> Self {
        Self::new(code, SignalPhase::Release)
    }

    /// The same signal aimed at `target`.
    pub fn with_target(mut self, target: SignalTarget) -> Self {
        self.target = target;
        self
    }

    // The code-less press signal trigger() hands to handlers.
    pub(crate) fn synthetic() -> Self {
        Self {
            code: String::new(),
            phase: SignalPhase::Press,
            target: SignalTarget::Surface,
            synthetic: true,
            default_prevented: Cell::new(false),
        }
    }

    /// Mark the host's default reaction to this keystroke as suppressed.
    ///
    /// The engine sets this before invoking each matched handler; hosts that
    /// have a default reaction check it after delivering the signal.
    pub fn prevent_default(&self) {
        self.default_prevented.set(true);
    }

    /// Whether any matched handler suppressed the default reaction.
    pub fn default_prevented(&self) -> bool {
        self.default_prevented.get()
    }
}

/// Events an event source delivers to the engine.
#[derive(Debug, Clone)]
pub enum SourceEvent {
    /// A key press or release.
    Key(KeySignal),
    /// The watched surface lost input focus.
    FocusLost,
}

/// Predicate deciding whether the engine should consider a signal at all.
///
/// Rejected signals reach neither the held-key tracker nor any handler.
pub type EventFilter = Rc<dyn Fn(&KeySignal) -> bool>;

/// The default filter: ignore signals aimed at editable text controls.
pub fn default_input_filter(signal: &KeySignal) -> bool {
    !matches!(
        signal.target,
        SignalTarget::TextInput
            | SignalTarget::TextArea
            | SignalTarget::Select
            | SignalTarget::EditableText
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_filter_accepts_surface() {
        assert!(default_input_filter(&KeySignal::press("KeyA")));
    }

    #[test]
    fn default_filter_rejects_editable_targets() {
        for target in [
            SignalTarget::TextInput,
            SignalTarget::TextArea,
            SignalTarget::Select,
            SignalTarget::EditableText,
        ] {
            let signal = KeySignal::press("KeyA").with_target(target);
            assert!(!default_input_filter(&signal), "{target:?} should be filtered");
        }
    }

    #[test]
    fn prevent_default_is_sticky() {
        let signal = KeySignal::press("KeyA");
        assert!(!signal.default_prevented());
        signal.prevent_default();
        signal.prevent_default();
        assert!(signal.default_prevented());
    }

    #[test]
    fn phase_constructors() {
        assert_eq!(KeySignal::press("KeyA").phase, SignalPhase::Press);
        assert_eq!(KeySignal::release("KeyA").phase, SignalPhase::Release);
    }

    #[test]
    fn synthetic_signal_is_marked() {
        let signal = KeySignal::synthetic();
        assert!(signal.synthetic);
        assert_eq!(signal.phase, SignalPhase::Press);
        assert!(signal.code.is_empty());
    }

    #[test]
    fn phase_display() {
        assert_eq!(SignalPhase::Press.to_string(), "press");
        assert_eq!(SignalPhase::Release.to_string(), "release");
    }
}
