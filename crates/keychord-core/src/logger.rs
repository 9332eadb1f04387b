//! Channel-tagged debug logging.

use std::cell::Cell;
use std::rc::Rc;

/// Sink receiving `(channel, message)` pairs from a [`Logger`].
pub type LogSink = Rc<dyn Fn(&str, &str)>;

/// A small logging capability the engine carries.
///
/// Quiet unless verbose is switched on. The default sink forwards to
/// [`tracing::debug!`]; tests swap in a recording sink instead.
pub struct Logger {
    channel: String,
    verbose: Cell<bool>,
    sink: LogSink,
}

impl Logger {
    /// A logger for `channel` emitting through [`tracing::debug!`].
    pub fn new(channel: impl Into<String>) -> Self {
        Self::with_sink(channel, |channel: &str, message: &str| {
            tracing::debug!(target: "keychord", "[{channel}] {message}");
        })
    }

    /// A logger with a custom sink.
    pub fn with_sink(channel: impl Into<String>, sink: impl Fn(&str, &str) + 'static) -> Self {
        Self {
            channel: channel.into(),
            verbose: Cell::new(false),
            sink: Rc::new(sink),
        }
    }

    /// Enable or disable output.
    pub fn set_verbose(&self, verbose: bool) {
        self.verbose.set(verbose);
    }

    /// Whether output is currently enabled.
    pub fn verbose(&self) -> bool {
        self.verbose.get()
    }

    /// The channel tag this logger emits under.
    pub fn channel(&self) -> &str {
        &self.channel
    }

    /// Emit `message` when verbose, drop it otherwise.
    pub fn debug(&self, message: &str) {
        if self.verbose.get() {
            (self.sink)(&self.channel, message);
        }
    }
}
