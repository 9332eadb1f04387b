//! Core engine for **keychord**, a keyboard-shortcut binding library.
//!
//! `keychord-core` turns a stream of raw key press/release signals into
//! calls to the handlers you bind against combinations like `"ctrl+s"` or
//! `"meta + shift + p"`. It tracks which keys are physically held, matches
//! the held set against registered combinations, and dispatches in scope
//! and priority order.
//!
//! # Key types
//!
//! | Type | Purpose |
//! |------|---------|
//! | [`Keychord`] | Engine facade: register bindings, watch a source, switch scopes |
//! | [`EventSource`] | Trait a host implements to feed signals to the engine |
//! | [`KeySignal`] | One raw press or release, carrying a physical key code |
//! | [`KeyboardLayout`] | Swappable table from physical code to canonical value |
//! | [`HeldKeys`] | Live view of the keys currently held down |
//! | [`Binding`] | Handle that removes one registration |
//! | [`ScriptedSource`](testing::ScriptedSource) | In-memory source for tests |
//!
//! # How a keystroke becomes a handler call
//!
//! 1. **signal** -- The [`EventSource`] delivers a [`KeySignal`] with a
//!    physical code such as `"KeyA"`.
//! 2. **filter** -- The event filter decides whether the engine should look
//!    at the signal at all; by default, signals aimed at editable text
//!    controls are ignored.
//! 3. **resolve** -- The active [`KeyboardLayout`] maps the code to a
//!    canonical value (`"a"`, `"shift"`, `"meta"`). Unmapped codes are
//!    dropped.
//! 4. **track** -- [`HeldKeys`] adds or removes the value, buffering forced
//!    releases around the meta key.
//! 5. **dispatch** -- The held set is normalized into one combination
//!    string and matched against the registry; handlers in the active
//!    scope run in ascending order until one stops propagation.
//!
//! # Quick example
//!
//! ```ignore
//! use keychord_core::{Keychord, testing::ScriptedSource};
//! use std::rc::Rc;
//!
//! let source = Rc::new(ScriptedSource::new());
//! let chords = Keychord::new(source.clone());
//!
//! chords.register("ctrl+s", |_, _| println!("save"));
//! chords.register_with_scope("meta+p", "palette", |_, ctx| {
//!     println!("matched {}", ctx.key());
//! });
//!
//! source.chord(&["ControlLeft", "KeyS"]); // prints "save"
//! ```

pub mod chord;
pub mod engine;
pub mod held;
pub mod layout;
pub mod layouts;
pub mod logger;
pub mod registry;
pub mod signal;
pub mod source;
pub mod testing;

pub use chord::{
    normalize_combination, normalize_combination_with, safe_split, split_combinations,
    MODIFIER_ORDER, WILDCARD_KEY,
};
pub use engine::{
    Binding, BindOptions, EngineOptions, Keychord, KeySpec, Watch, DEFAULT_SCOPE,
};
pub use held::HeldKeys;
pub use layout::{KeyboardLayout, LayoutKey};
pub use layouts::en_us;
pub use logger::{LogSink, Logger};
pub use registry::{ChordAction, ChordContext};
pub use signal::{
    default_input_filter, EventFilter, KeySignal, SignalPhase, SignalTarget, SourceEvent,
};
pub use source::{EventSource, ListenerId, SourceListener};
