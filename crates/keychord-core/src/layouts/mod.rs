//! Built-in keyboard-layout tables.

mod en_us;

pub use en_us::en_us;
