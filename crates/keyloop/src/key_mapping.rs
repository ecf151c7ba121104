//! Translation between the hook backend, the injection backend and keyloop's
//! own key names.
//!
//! Keys neither side can name are dropped (`None`) rather than guessed.

use keyloop_core::{Key, MouseButton, NamedKey};

/// Hook key to keyloop key. Layout-dependent punctuation is mapped by its
/// US-layout character.
pub(crate) fn from_rdev(key: rdev::Key) -> Option<Key> {
    use rdev::Key as R;

    let named = match key {
        R::ShiftLeft => NamedKey::ShiftLeft,
        R::ShiftRight => NamedKey::ShiftRight,
        R::ControlLeft => NamedKey::ControlLeft,
        R::ControlRight => NamedKey::ControlRight,
        R::Alt => NamedKey::AltLeft,
        R::AltGr => NamedKey::AltRight,
        R::MetaLeft => NamedKey::MetaLeft,
        R::MetaRight => NamedKey::MetaRight,
        R::F1 => NamedKey::F1,
        R::F2 => NamedKey::F2,
        R::F3 => NamedKey::F3,
        R::F4 => NamedKey::F4,
        R::F5 => NamedKey::F5,
        R::F6 => NamedKey::F6,
        R::F7 => NamedKey::F7,
        R::F8 => NamedKey::F8,
        R::F9 => NamedKey::F9,
        R::F10 => NamedKey::F10,
        R::F11 => NamedKey::F11,
        R::F12 => NamedKey::F12,
        R::Return | R::KpReturn => NamedKey::Enter,
        R::Space => NamedKey::Space,
        R::Escape => NamedKey::Escape,
        R::Tab => NamedKey::Tab,
        R::Backspace => NamedKey::Backspace,
        R::Delete | R::KpDelete => NamedKey::Delete,
        R::Insert => NamedKey::Insert,
        R::UpArrow => NamedKey::Up,
        R::DownArrow => NamedKey::Down,
        R::LeftArrow => NamedKey::Left,
        R::RightArrow => NamedKey::Right,
        R::Home => NamedKey::Home,
        R::End => NamedKey::End,
        R::PageUp => NamedKey::PageUp,
        R::PageDown => NamedKey::PageDown,
        R::CapsLock => NamedKey::CapsLock,
        other => return char_of(other).map(Key::char),
    };

    Some(Key::Named(named))
}

fn char_of(key: rdev::Key) -> Option<char> {
    use rdev::Key as R;

    let c = match key {
        R::KeyA => 'a',
        R::KeyB => 'b',
        R::KeyC => 'c',
        R::KeyD => 'd',
        R::KeyE => 'e',
        R::KeyF => 'f',
        R::KeyG => 'g',
        R::KeyH => 'h',
        R::KeyI => 'i',
        R::KeyJ => 'j',
        R::KeyK => 'k',
        R::KeyL => 'l',
        R::KeyM => 'm',
        R::KeyN => 'n',
        R::KeyO => 'o',
        R::KeyP => 'p',
        R::KeyQ => 'q',
        R::KeyR => 'r',
        R::KeyS => 's',
        R::KeyT => 't',
        R::KeyU => 'u',
        R::KeyV => 'v',
        R::KeyW => 'w',
        R::KeyX => 'x',
        R::KeyY => 'y',
        R::KeyZ => 'z',
        R::Num0 | R::Kp0 => '0',
        R::Num1 | R::Kp1 => '1',
        R::Num2 | R::Kp2 => '2',
        R::Num3 | R::Kp3 => '3',
        R::Num4 | R::Kp4 => '4',
        R::Num5 | R::Kp5 => '5',
        R::Num6 | R::Kp6 => '6',
        R::Num7 | R::Kp7 => '7',
        R::Num8 | R::Kp8 => '8',
        R::Num9 | R::Kp9 => '9',
        R::Minus | R::KpMinus => '-',
        R::KpPlus => '+',
        R::KpMultiply => '*',
        R::KpDivide | R::Slash => '/',
        R::Equal => '=',
        R::LeftBracket => '[',
        R::RightBracket => ']',
        R::SemiColon => ';',
        R::Quote => '\'',
        R::BackSlash | R::IntlBackslash => '\\',
        R::Comma => ',',
        R::Dot => '.',
        R::BackQuote => '`',
        _ => return None,
    };

    Some(c)
}

/// Hook button to keyloop button. Extra buttons are not recorded.
pub(crate) fn button_from_rdev(button: rdev::Button) -> Option<MouseButton> {
    match button {
        rdev::Button::Left => Some(MouseButton::Left),
        rdev::Button::Right => Some(MouseButton::Right),
        rdev::Button::Middle => Some(MouseButton::Middle),
        rdev::Button::Unknown(_) => None,
    }
}

/// Keyloop key to injection key.
pub(crate) fn to_enigo(key: Key) -> Option<enigo::Key> {
    use enigo::Key as E;

    let named = match key {
        Key::Char(c) => return Some(E::Unicode(c)),
        Key::Named(named) => named,
    };

    let mapped = match named {
        NamedKey::ShiftLeft => E::LShift,
        NamedKey::ShiftRight => E::RShift,
        NamedKey::ControlLeft => E::LControl,
        NamedKey::ControlRight => E::RControl,
        // No cross-platform right alt; both sides inject the same key.
        NamedKey::AltLeft | NamedKey::AltRight => E::Alt,
        NamedKey::MetaLeft | NamedKey::MetaRight => E::Meta,
        NamedKey::F1 => E::F1,
        NamedKey::F2 => E::F2,
        NamedKey::F3 => E::F3,
        NamedKey::F4 => E::F4,
        NamedKey::F5 => E::F5,
        NamedKey::F6 => E::F6,
        NamedKey::F7 => E::F7,
        NamedKey::F8 => E::F8,
        NamedKey::F9 => E::F9,
        NamedKey::F10 => E::F10,
        NamedKey::F11 => E::F11,
        NamedKey::F12 => E::F12,
        NamedKey::Enter => E::Return,
        NamedKey::Space => E::Space,
        NamedKey::Escape => E::Escape,
        NamedKey::Tab => E::Tab,
        NamedKey::Backspace => E::Backspace,
        NamedKey::Delete => E::Delete,
        NamedKey::Insert => return insert_key(),
        NamedKey::Up => E::UpArrow,
        NamedKey::Down => E::DownArrow,
        NamedKey::Left => E::LeftArrow,
        NamedKey::Right => E::RightArrow,
        NamedKey::Home => E::Home,
        NamedKey::End => E::End,
        NamedKey::PageUp => E::PageUp,
        NamedKey::PageDown => E::PageDown,
        NamedKey::CapsLock => E::CapsLock,
    };

    Some(mapped)
}

#[cfg(not(target_os = "macos"))]
fn insert_key() -> Option<enigo::Key> {
    Some(enigo::Key::Insert)
}

#[cfg(target_os = "macos")]
fn insert_key() -> Option<enigo::Key> {
    None
}

/// Keyloop button to injection button.
pub(crate) fn button_to_enigo(button: MouseButton) -> enigo::Button {
    match button {
        MouseButton::Left => enigo::Button::Left,
        MouseButton::Right => enigo::Button::Right,
        MouseButton::Middle => enigo::Button::Middle,
    }
}
