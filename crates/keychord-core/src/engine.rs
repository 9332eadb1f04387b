//! The engine facade: registration, watching, scopes, and dispatch.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use crate::chord::{normalize_combination, split_combinations};
use crate::held::HeldKeys;
use crate::layout::KeyboardLayout;
use crate::layouts;
use crate::logger::Logger;
use crate::registry::{ChordAction, ChordContext, HandlerItem, HandlerRegistry};
use crate::signal::{default_input_filter, EventFilter, KeySignal, SignalPhase, SourceEvent};
use crate::source::{EventSource, ListenerId, SourceListener};

/// Scope every binding and dispatch starts out in.
pub const DEFAULT_SCOPE: &str = "default";

/// Construction options for [`Keychord`].
///
/// # Example
///
/// ```rust,ignore
/// let chords = Keychord::with_options(
///     source,
///     EngineOptions {
///         auto_watch: false,
///         ..Default::default()
///     },
/// );
/// ```
pub struct EngineOptions {
    /// Initial layout table. Defaults to the built-in US QWERTY table.
    pub layout: KeyboardLayout,
    /// Attach to the source implicitly on first registration. Defaults to
    /// true.
    pub auto_watch: bool,
    /// Let the caps-lock key join the held set and chords. Defaults to
    /// false.
    pub watch_caps: bool,
    /// Logging capability. Defaults to a quiet logger on the `"keychord"`
    /// channel.
    pub logger: Logger,
}

impl Default for EngineOptions {
    fn default() -> Self {
        Self {
            layout: layouts::en_us(),
            auto_watch: true,
            watch_caps: false,
            logger: Logger::new("keychord"),
        }
    }
}

/// Per-binding options for [`Keychord::register_with_options`].
#[derive(Debug, Clone)]
pub struct BindOptions {
    /// Scope the binding lives in. Defaults to [`DEFAULT_SCOPE`].
    pub scope: String,
    /// Position among same-combination bindings, dispatched in ascending
    /// order. Defaults to 0.
    pub order: i32,
    /// Signal phase the binding fires on. Defaults to press.
    pub phase: SignalPhase,
}

impl Default for BindOptions {
    fn default() -> Self {
        Self {
            scope: DEFAULT_SCOPE.to_string(),
            order: 0,
            phase: SignalPhase::Press,
        }
    }
}

/// A combination spec: one string or a list of strings, each holding one or
/// more comma-separated combinations.
pub struct KeySpec(String);

impl From<&str> for KeySpec {
    fn from(spec: &str) -> Self {
        Self(spec.to_string())
    }
}

impl From<String> for KeySpec {
    fn from(spec: String) -> Self {
        Self(spec)
    }
}

impl From<&[&str]> for KeySpec {
    fn from(specs: &[&str]) -> Self {
        Self(specs.join(","))
    }
}

impl<const N: usize> From<&[&str; N]> for KeySpec {
    fn from(specs: &[&str; N]) -> Self {
        Self(specs.join(","))
    }
}

impl From<Vec<&str>> for KeySpec {
    fn from(specs: Vec<&str>) -> Self {
        Self(specs.join(","))
    }
}

impl From<Vec<String>> for KeySpec {
    fn from(specs: Vec<String>) -> Self {
        Self(specs.join(","))
    }
}

struct EngineInner {
    source: Rc<dyn EventSource>,
    logger: Logger,
    auto_watch: bool,
    watch_caps: bool,
    layout: RefCell<KeyboardLayout>,
    filter: RefCell<EventFilter>,
    scope: RefCell<String>,
    held: HeldKeys,
    registry: RefCell<HandlerRegistry>,
    watch: RefCell<Option<ListenerId>>,
}

/// A key-combination engine bound to one event source.
///
/// `Keychord` is a cheap handle; clones share the same engine. It is
/// single-threaded by design: sources deliver events on the thread that
/// owns the engine, and handlers may call back into the engine freely.
///
/// Dropping every handle detaches nothing by itself, but any listener left
/// on the source goes inert once the engine is gone.
///
/// # Example
///
/// ```rust,ignore
/// let source = Rc::new(ScriptedSource::new());
/// let chords = Keychord::new(source.clone());
///
/// chords.register("ctrl+s", |_, _| save());
/// let binding = chords.register_with_scope("meta+p", "palette", |_, ctx| {
///     println!("matched {}", ctx.key());
/// });
///
/// source.chord(&["ControlLeft", "KeyS"]);
/// binding.unbind();
/// ```
#[derive(Clone)]
pub struct Keychord {
    inner: Rc<EngineInner>,
}

impl Keychord {
    /// An engine with default options watching `source`.
    pub fn new(source: Rc<dyn EventSource>) -> Self {
        Self::with_options(source, EngineOptions::default())
    }

    /// An engine with explicit [`EngineOptions`].
    pub fn with_options(source: Rc<dyn EventSource>, options: EngineOptions) -> Self {
        Self {
            inner: Rc::new(EngineInner {
                source,
                logger: options.logger,
                auto_watch: options.auto_watch,
                watch_caps: options.watch_caps,
                layout: RefCell::new(options.layout),
                filter: RefCell::new(Rc::new(default_input_filter)),
                scope: RefCell::new(DEFAULT_SCOPE.to_string()),
                held: HeldKeys::new(),
                registry: RefCell::new(HandlerRegistry::new()),
                watch: RefCell::new(None),
            }),
        }
    }

    /// Register `action` for a combination spec in the default scope, on
    /// the press phase, at order 0.
    ///
    /// Returns a [`Binding`] that removes exactly this registration.
    pub fn register<F>(&self, spec: impl Into<KeySpec>, action: F) -> Binding
    where
        F: Fn(&KeySignal, &ChordContext) + 'static,
    {
        self.bind(spec.into(), BindOptions::default(), Rc::new(action))
    }

    /// Register `action` under an explicit scope.
    pub fn register_with_scope<F>(
        &self,
        spec: impl Into<KeySpec>,
        scope: &str,
        action: F,
    ) -> Binding
    where
        F: Fn(&KeySignal, &ChordContext) + 'static,
    {
        let options = BindOptions {
            scope: scope.to_string(),
            ..BindOptions::default()
        };
        self.bind(spec.into(), options, Rc::new(action))
    }

    /// Register `action` with full [`BindOptions`].
    pub fn register_with_options<F>(
        &self,
        spec: impl Into<KeySpec>,
        options: BindOptions,
        action: F,
    ) -> Binding
    where
        F: Fn(&KeySignal, &ChordContext) + 'static,
    {
        self.bind(spec.into(), options, Rc::new(action))
    }

    // Canonical registration entry; every register variant funnels here.
    fn bind(&self, spec: KeySpec, options: BindOptions, action: ChordAction) -> Binding {
        let keys = split_combinations(&spec.0);

        {
            let mut registry = self.inner.registry.borrow_mut();
            for key in &keys {
                let normalized = normalize_combination(key);
                registry.add(
                    &normalized,
                    HandlerItem {
                        action: action.clone(),
                        order: options.order,
                        phase: options.phase,
                        scope: options.scope.clone(),
                        key: key.clone(),
                    },
                );
                self.inner.logger.debug(&format!(
                    "registered handler for {normalized} in scope {} with order {} on {}",
                    options.scope, options.order, options.phase
                ));
            }
        }

        if self.inner.auto_watch {
            self.ensure_watching();
        }

        Binding {
            keys,
            action,
            engine: Rc::downgrade(&self.inner),
        }
    }

    /// Attach the engine to its source. Idempotent: a second call while
    /// already watching changes nothing.
    ///
    /// Returns a [`Watch`] handle; stopping it detaches the engine and
    /// clears the held-key state.
    pub fn start_watching(&self) -> Watch {
        self.ensure_watching();
        Watch {
            engine: Rc::downgrade(&self.inner),
        }
    }

    fn ensure_watching(&self) {
        if self.inner.watch.borrow().is_some() {
            self.inner.logger.debug("already watching keys");
            return;
        }
        self.inner.logger.debug("watching keys");

        let engine = Rc::downgrade(&self.inner);
        let listener: SourceListener = Rc::new(move |event: &SourceEvent| {
            if let Some(inner) = engine.upgrade() {
                inner.handle_event(event);
            }
        });
        let id = self.inner.source.add_listener(listener);
        *self.inner.watch.borrow_mut() = Some(id);
    }

    /// Switch the active scope. Takes effect for the next dispatched
    /// signal, and for the remaining handlers of the current one.
    pub fn set_scope(&self, scope: &str) {
        *self.inner.scope.borrow_mut() = scope.to_string();
        self.inner.logger.debug(&format!("scope set to {scope}"));
    }

    /// The currently active scope.
    pub fn scope(&self) -> String {
        self.inner.scope.borrow().clone()
    }

    /// Live view of the held-key set. The returned handle shares storage
    /// with the engine and observes later presses and releases.
    pub fn held_keys(&self) -> HeldKeys {
        self.inner.held.clone()
    }

    /// Snapshot of the held canonical key values, in press order.
    pub fn pressed_key_strings(&self) -> Vec<String> {
        self.inner.held.to_vec()
    }

    /// Whether `key`, in any accepted spelling, is currently held.
    pub fn is_pressed(&self, key: &str) -> bool {
        self.inner.held.contains(&normalize_combination(key))
    }

    /// Swap the active layout table. Already-held keys keep the values
    /// they resolved to when pressed.
    pub fn set_layout(&self, layout: KeyboardLayout) {
        *self.inner.layout.borrow_mut() = layout;
        self.inner.logger.debug("keyboard layout changed");
    }

    /// The active layout table.
    pub fn layout(&self) -> KeyboardLayout {
        self.inner.layout.borrow().clone()
    }

    /// Forward verbosity to the engine's logger.
    pub fn set_verbose(&self, verbose: bool) {
        self.inner.logger.set_verbose(verbose);
    }

    /// Replace the signal filter. Signals the filter rejects reach neither
    /// the held-key tracker nor any handler.
    pub fn set_event_filter(&self, filter: impl Fn(&KeySignal) -> bool + 'static) {
        *self.inner.filter.borrow_mut() = Rc::new(filter);
        self.inner.logger.debug("event filter changed");
    }

    /// Invoke the handlers bound to `key` in the default scope, regardless
    /// of held keys or phase.
    ///
    /// The handlers receive a synthetic press signal; stop-propagation has
    /// no effect, and the wildcard bucket does not fire.
    pub fn trigger(&self, key: &str) {
        self.inner.trigger(key, DEFAULT_SCOPE);
    }

    /// [`Keychord::trigger`] with an explicit scope.
    pub fn trigger_in_scope(&self, key: &str, scope: &str) {
        self.inner.trigger(key, scope);
    }

    /// Remove every handler bound to `key` in the default scope.
    pub fn unbind(&self, key: &str) {
        self.unbind_in_scope(key, DEFAULT_SCOPE);
    }

    /// Remove every handler bound to `key` in `scope`. Other scopes keep
    /// their handlers for the same combination.
    pub fn unbind_in_scope(&self, key: &str, scope: &str) {
        let normalized = normalize_combination(key);
        self.inner
            .registry
            .borrow_mut()
            .remove_scope(&normalized, scope);
        self.inner
            .logger
            .debug(&format!("unbound {normalized} in scope {scope}"));
    }

    /// Remove every handler in every scope.
    pub fn unbind_all(&self) {
        self.inner.registry.borrow_mut().clear();
        self.inner.logger.debug("unbound all handlers");
    }
}

impl EngineInner {
    fn handle_event(&self, event: &SourceEvent) {
        match event {
            SourceEvent::Key(signal) => match signal.phase {
                SignalPhase::Press => self.handle_press(signal),
                SignalPhase::Release => self.handle_release(signal),
            },
            SourceEvent::FocusLost => self.handle_focus_lost(),
        }
    }

    fn handle_press(&self, signal: &KeySignal) {
        if !self.filter_allows(signal) {
            return;
        }
        let Some(value) = self.resolve(signal) else {
            return;
        };
        if value == "caps" && !self.watch_caps {
            return;
        }
        self.held.press(&value);
        self.dispatch(SignalPhase::Press, signal);
    }

    fn handle_release(&self, signal: &KeySignal) {
        if !self.filter_allows(signal) {
            return;
        }
        let Some(value) = self.resolve(signal) else {
            return;
        };
        // Release handlers see the full chord, so dispatch precedes removal.
        self.dispatch(SignalPhase::Release, signal);
        let flushed = self.held.release(&value);
        if !flushed.is_empty() {
            self.logger
                .debug(&format!("released {flushed:?} after meta came up"));
        }
    }

    fn handle_focus_lost(&self) {
        self.held.clear();
        self.logger.debug("cleared held keys on focus loss");
    }

    fn filter_allows(&self, signal: &KeySignal) -> bool {
        let filter = self.filter.borrow().clone();
        filter(signal)
    }

    // Layout lookup plus value normalization. None means the code is
    // unmapped and the signal is dropped.
    fn resolve(&self, signal: &KeySignal) -> Option<String> {
        let value = self
            .layout
            .borrow()
            .resolve(&signal.code)
            .map(normalize_combination);
        if value.is_none() {
            self.logger
                .debug(&format!("no layout key for {}", signal.code));
        }
        value
    }

    fn dispatch(&self, phase: SignalPhase, signal: &KeySignal) {
        let combination = self.held.combination();
        let items = self.registry.borrow().matches(&combination);

        self.logger.debug(&format!(
            "dispatching {combination} ({phase}) in scope {}",
            *self.scope.borrow()
        ));

        for item in items {
            // The scope is re-read per entry: a handler switching scopes
            // affects the rest of this dispatch.
            if item.phase != phase || item.scope != *self.scope.borrow() {
                continue;
            }
            signal.prevent_default();
            let context = ChordContext::new(item.key.clone());
            (item.action)(signal, &context);
            self.logger.debug(&format!(
                "invoked handler for {combination} ({phase}) in scope {}",
                item.scope
            ));
            if context.stopped() {
                break;
            }
        }
    }

    fn trigger(&self, key: &str, scope: &str) {
        let normalized = normalize_combination(key);
        let items = self.registry.borrow().exact(&normalized);

        self.logger
            .debug(&format!("triggering {normalized} in scope {scope}"));

        let signal = KeySignal::synthetic();
        for item in items {
            if item.scope == scope {
                let context = ChordContext::new(item.key.clone());
                (item.action)(&signal, &context);
                self.logger.debug(&format!(
                    "invoked triggered handler for {normalized} in scope {scope}"
                ));
            }
        }
    }

    fn stop_watching(&self) {
        let id = self.watch.borrow_mut().take();
        if let Some(id) = id {
            self.held.reset();
            self.source.remove_listener(id);
            self.logger.debug("stopped watching keys");
        }
    }
}

/// Handle for removing one registration.
///
/// Returned by the `register` family; covers every combination the spec
/// named. Unbinding twice is a no-op, as is unbinding after the engine is
/// gone.
pub struct Binding {
    keys: Vec<String>,
    action: ChordAction,
    engine: Weak<EngineInner>,
}

impl Binding {
    /// Remove this registration from every combination it covered.
    pub fn unbind(&self) {
        let Some(inner) = self.engine.upgrade() else {
            return;
        };
        let mut registry = inner.registry.borrow_mut();
        for key in &self.keys {
            let normalized = normalize_combination(key);
            registry.remove_action(&normalized, &self.action);
            inner
                .logger
                .debug(&format!("unregistered handler for {normalized}"));
        }
    }

    /// The combinations this binding covers, spelled as registered.
    pub fn keys(&self) -> &[String] {
        &self.keys
    }
}

/// Teardown handle returned by [`Keychord::start_watching`].
///
/// Dropping the handle does not stop the watch; only [`Watch::stop`] does.
/// Stopping twice is a no-op.
pub struct Watch {
    engine: Weak<EngineInner>,
}

impl Watch {
    /// Detach the engine from its source and clear the held-key state,
    /// including the meta pending-release buffer.
    pub fn stop(&self) {
        if let Some(inner) = self.engine.upgrade() {
            inner.stop_watching();
        }
    }
}
