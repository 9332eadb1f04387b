//! Keyboard-layout tables mapping physical key codes to canonical values.
//!
//! The engine never interprets a physical code (`"KeyA"`, `"ShiftLeft"`)
//! directly; the active [`KeyboardLayout`] decides what value the key
//! produces. Swapping the table at runtime retargets every binding without
//! re-registering anything.

use std::collections::HashMap;

/// One physical key's entry in a [`KeyboardLayout`].
///
/// Only `value` participates in chord matching today; the shifted and
/// alternate values describe what the key types so layouts can carry the
/// full picture of a physical key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LayoutKey {
    /// Value the key produces when pressed bare.
    pub value: String,
    /// Value produced with shift held, if the layout defines one.
    pub with_shift: Option<String>,
    /// Value produced with alt held, if the layout defines one.
    pub with_alt: Option<String>,
    /// Value produced with shift and alt held, if the layout defines one.
    pub with_shift_alt: Option<String>,
}

impl LayoutKey {
    /// An entry with only a bare value.
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            with_shift: None,
            with_alt: None,
            with_shift_alt: None,
        }
    }

    /// Set the shifted value.
    pub fn with_shift(mut self, value: impl Into<String>) -> Self {
        self.with_shift = Some(value.into());
        self
    }

    /// Set the alternate value.
    pub fn with_alt(mut self, value: impl Into<String>) -> Self {
        self.with_alt = Some(value.into());
        self
    }

    /// Set the shift-plus-alt value.
    pub fn with_shift_alt(mut self, value: impl Into<String>) -> Self {
        self.with_shift_alt = Some(value.into());
        self
    }
}

/// A table from physical key code to [`LayoutKey`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeyboardLayout {
    keys: HashMap<String, LayoutKey>,
}

impl KeyboardLayout {
    /// An empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace the entry for a physical key code.
    pub fn insert(&mut self, code: impl Into<String>, key: LayoutKey) {
        self.keys.insert(code.into(), key);
    }

    /// The bare value a physical code produces, if the code is mapped.
    ///
    /// An unmapped code is a no-op for the engine, not an error.
    pub fn resolve(&self, code: &str) -> Option<&str> {
        self.keys.get(code).map(|key| key.value.as_str())
    }

    /// The full entry for a physical code.
    pub fn get(&self, code: &str) -> Option<&LayoutKey> {
        self.keys.get(code)
    }

    /// Number of mapped codes.
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    /// True when no codes are mapped.
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// The mapped physical codes, in arbitrary order.
    pub fn codes(&self) -> impl Iterator<Item = &str> {
        self.keys.keys().map(String::as_str)
    }
}

impl<C: Into<String>> FromIterator<(C, LayoutKey)> for KeyboardLayout {
    fn from_iter<T: IntoIterator<Item = (C, LayoutKey)>>(iter: T) -> Self {
        let mut layout = KeyboardLayout::new();
        for (code, key) in iter {
            layout.insert(code, key);
        }
        layout
    }
}
