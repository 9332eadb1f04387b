//! **keychord** -- scoped, ordered keyboard-shortcut bindings.
//!
//! This is the umbrella crate that re-exports everything you need from a
//! single dependency:
//!
//! ```toml
//! [dependencies]
//! keychord = "0.1"
//! ```
//!
//! # Re-exports
//!
//! * All public items from [`keychord_core`] are available at the crate
//!   root ([`Keychord`], [`EngineOptions`], [`KeyboardLayout`],
//!   [`KeySignal`], the [`testing`] helpers, etc.).
//! * The [`term`] module re-exports everything from [`keychord_term`]
//!   (the crossterm-backed [`TerminalSource`](term::TerminalSource)).
//! * [`crossterm`] is re-exported so downstream crates do not need to
//!   depend on it directly.
//!
//! # Quick start
//!
//! ```ignore
//! use keychord::term::TerminalSource;
//! use keychord::Keychord;
//! use std::rc::Rc;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let source = Rc::new(TerminalSource::new());
//!     let chords = Keychord::new(source.clone());
//!
//!     chords.register("ctrl+s", |_, _| println!("saved"));
//!     chords.register("ctrl+q", {
//!         let source = source.clone();
//!         move |_, _| source.stop()
//!     });
//!
//!     keychord::crossterm::terminal::enable_raw_mode()?;
//!     let _ = source.enable_release_events();
//!     source.pump()?;
//!     keychord::crossterm::terminal::disable_raw_mode()?;
//!     Ok(())
//! }
//! ```

pub use keychord_core::*;
pub mod term {
    pub use keychord_term::*;
}

// Re-export crossterm for use in downstream crates
pub use crossterm;
