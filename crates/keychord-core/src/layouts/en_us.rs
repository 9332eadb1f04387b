//! US QWERTY layout.

use crate::layout::{KeyboardLayout, LayoutKey};

/// Named keys that do not follow a generated pattern. `ControlRight` is
/// deliberately absent: a right control key resolves to nothing under this
/// table.
const NAMED: &[(&str, &str)] = &[
    ("Backspace", "backspace"),
    ("Tab", "tab"),
    ("NumLock", "numlock"),
    ("Enter", "enter"),
    ("ShiftLeft", "shift"),
    ("ShiftRight", "shift"),
    ("ControlLeft", "ctrl"),
    ("AltLeft", "alt"),
    ("AltRight", "alt"),
    ("Escape", "escape"),
    ("Space", "space"),
    ("ArrowLeft", "left"),
    ("ArrowUp", "up"),
    ("ArrowRight", "right"),
    ("ArrowDown", "down"),
    ("Semicolon", ";"),
    ("Backquote", "`"),
    ("Equal", "="),
    ("Minus", "-"),
    ("MetaLeft", "meta"),
    ("MetaRight", "meta"),
    ("OSLeft", "meta"),
    ("BracketLeft", "["),
    ("BracketRight", "]"),
    ("Backslash", "\\"),
    ("Quote", "'"),
    ("Comma", ","),
    ("Period", "."),
    ("Slash", "/"),
    ("IntlRo", "/"),
    ("IntlBackslash", "\\"),
    ("CapsLock", "caps"),
];

/// The default US QWERTY table: letters, digits, numpad digits, `F1`-`F32`,
/// and the named keys above.
pub fn en_us() -> KeyboardLayout {
    let mut layout: KeyboardLayout = NAMED
        .iter()
        .map(|(code, value)| (*code, LayoutKey::new(*value)))
        .collect();

    for letter in 'a'..='z' {
        let code = format!("Key{}", letter.to_ascii_uppercase());
        layout.insert(code, LayoutKey::new(letter));
    }
    for digit in 0..=9u8 {
        layout.insert(format!("Digit{digit}"), LayoutKey::new(digit.to_string()));
        layout.insert(format!("Numpad{digit}"), LayoutKey::new(digit.to_string()));
    }
    for n in 1..=32u8 {
        layout.insert(format!("F{n}"), LayoutKey::new(format!("f{n}")));
    }

    layout
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn letters_resolve_lowercase() {
        let layout = en_us();
        assert_eq!(layout.resolve("KeyA"), Some("a"));
        assert_eq!(layout.resolve("KeyZ"), Some("z"));
    }

    #[test]
    fn digits_and_numpad_share_values() {
        let layout = en_us();
        assert_eq!(layout.resolve("Digit7"), Some("7"));
        assert_eq!(layout.resolve("Numpad7"), Some("7"));
    }

    #[test]
    fn function_keys_cover_f1_through_f32() {
        let layout = en_us();
        assert_eq!(layout.resolve("F1"), Some("f1"));
        assert_eq!(layout.resolve("F32"), Some("f32"));
        assert_eq!(layout.resolve("F33"), None);
    }

    #[test]
    fn both_shift_keys_resolve_to_shift() {
        let layout = en_us();
        assert_eq!(layout.resolve("ShiftLeft"), Some("shift"));
        assert_eq!(layout.resolve("ShiftRight"), Some("shift"));
    }

    #[test]
    fn meta_variants_resolve_to_meta() {
        let layout = en_us();
        assert_eq!(layout.resolve("MetaLeft"), Some("meta"));
        assert_eq!(layout.resolve("MetaRight"), Some("meta"));
        assert_eq!(layout.resolve("OSLeft"), Some("meta"));
    }

    #[test]
    fn only_the_left_control_key_is_mapped() {
        let layout = en_us();
        assert_eq!(layout.resolve("ControlLeft"), Some("ctrl"));
        assert_eq!(layout.resolve("ControlRight"), None);
    }

    #[test]
    fn alt_variants_resolve_to_alt() {
        let layout = en_us();
        assert_eq!(layout.resolve("AltLeft"), Some("alt"));
        assert_eq!(layout.resolve("AltRight"), Some("alt"));
    }

    #[test]
    fn no_two_codes_collide_on_the_letter_a() {
        let layout = en_us();
        let hits = layout
            .codes()
            .filter(|&code| layout.resolve(code) == Some("a"))
            .count();
        assert_eq!(hits, 1);
    }

    #[test]
    fn caps_lock_resolves_to_caps() {
        assert_eq!(en_us().resolve("CapsLock"), Some("caps"));
    }

    #[test]
    fn table_size_matches_key_groups() {
        // 32 named + 26 letters + 10 digits + 10 numpad + 32 function keys.
        assert_eq!(en_us().len(), 110);
    }
}
