//! Crossterm key codes mapped to physical key codes.

use crossterm::event::{KeyCode, ModifierKeyCode};

/// Map a crossterm [`KeyCode`] to the physical code the engine's layout
/// tables key on (`"KeyA"`, `"ShiftLeft"`, `"F5"`).
///
/// `None` means the key has no physical-code equivalent and the event is
/// dropped. Character codes are folded case-insensitively onto their key:
/// both `a` and `A` map to `"KeyA"`.
pub fn signal_code(code: KeyCode) -> Option<String> {
    let name = match code {
        KeyCode::Char(c) => return char_code(c),
        KeyCode::F(n) => return Some(format!("F{n}")),
        KeyCode::Modifier(modifier) => return modifier_code(modifier),
        KeyCode::Enter => "Enter",
        KeyCode::Tab => "Tab",
        // Shift-tab reports the same physical key.
        KeyCode::BackTab => "Tab",
        KeyCode::Backspace => "Backspace",
        KeyCode::Esc => "Escape",
        KeyCode::Left => "ArrowLeft",
        KeyCode::Right => "ArrowRight",
        KeyCode::Up => "ArrowUp",
        KeyCode::Down => "ArrowDown",
        KeyCode::Home => "Home",
        KeyCode::End => "End",
        KeyCode::PageUp => "PageUp",
        KeyCode::PageDown => "PageDown",
        KeyCode::Insert => "Insert",
        KeyCode::Delete => "Delete",
        KeyCode::CapsLock => "CapsLock",
        KeyCode::NumLock => "NumLock",
        _ => return None,
    };
    Some(name.to_string())
}

fn char_code(c: char) -> Option<String> {
    if c.is_ascii_alphabetic() {
        return Some(format!("Key{}", c.to_ascii_uppercase()));
    }
    if c.is_ascii_digit() {
        return Some(format!("Digit{c}"));
    }
    let name = match c {
        ' ' => "Space",
        ';' => "Semicolon",
        '`' => "Backquote",
        '=' => "Equal",
        '-' => "Minus",
        '[' => "BracketLeft",
        ']' => "BracketRight",
        '\\' => "Backslash",
        '\'' => "Quote",
        ',' => "Comma",
        '.' => "Period",
        '/' => "Slash",
        _ => return None,
    };
    Some(name.to_string())
}

// Sided modifier codes only arrive from terminals speaking the kitty
// keyboard protocol.
fn modifier_code(modifier: ModifierKeyCode) -> Option<String> {
    let name = match modifier {
        ModifierKeyCode::LeftShift => "ShiftLeft",
        ModifierKeyCode::RightShift => "ShiftRight",
        ModifierKeyCode::LeftControl => "ControlLeft",
        ModifierKeyCode::RightControl => "ControlRight",
        ModifierKeyCode::LeftAlt => "AltLeft",
        ModifierKeyCode::RightAlt => "AltRight",
        ModifierKeyCode::LeftSuper | ModifierKeyCode::LeftMeta => "MetaLeft",
        ModifierKeyCode::RightSuper | ModifierKeyCode::RightMeta => "MetaRight",
        _ => return None,
    };
    Some(name.to_string())
}
