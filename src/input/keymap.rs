//! Translation from evdev key codes to key identities
//!
//! A key's identity is either the printable character it produces on the
//! unshifted US layout, or a lower-case name in the conventional
//! hook-library vocabulary the normalizer expects ("shift_l", "alt_gr",
//! "cmd", "page_up", ...).

use evdev::KeyCode;

use crate::input::KeyPress;

/// Identify an evdev key code.
///
/// Returns `None` for codes outside the KEY_* namespace (mouse and misc
/// buttons share the KEY event type but carry no keyboard identity).
pub fn key_identity(code: u16) -> Option<KeyPress> {
    // evdev's Debug gives the canonical Linux name, e.g. "KEY_TAB".
    let linux_name = format!("{:?}", KeyCode(code));
    let name = linux_name.strip_prefix("KEY_")?;

    if let Some(character) = unshifted_char(name) {
        return Some(KeyPress::from_char(character));
    }
    Some(KeyPress::named(&key_name(name)))
}

/// Printable character for a key name on the unshifted US layout
fn unshifted_char(name: &str) -> Option<char> {
    // Letter and digit keys are named after their character.
    if name.len() == 1 {
        let c = name.chars().next()?;
        if c.is_ascii_alphanumeric() {
            return Some(c.to_ascii_lowercase());
        }
    }

    // Numpad digits.
    if let Some(digit) = name.strip_prefix("KP")
        && digit.len() == 1
        && digit.starts_with(|c: char| c.is_ascii_digit())
    {
        return digit.chars().next();
    }

    let character = match name {
        "MINUS" | "KPMINUS" => '-',
        "EQUAL" => '=',
        "LEFTBRACE" => '[',
        "RIGHTBRACE" => ']',
        "SEMICOLON" => ';',
        "APOSTROPHE" => '\'',
        "GRAVE" => '`',
        "BACKSLASH" => '\\',
        "COMMA" => ',',
        "DOT" | "KPDOT" => '.',
        "SLASH" | "KPSLASH" => '/',
        "KPASTERISK" => '*',
        "KPPLUS" => '+',
        "102ND" => '<',
        _ => return None,
    };
    Some(character)
}

/// Conventional lower-case name for a non-printable key
fn key_name(name: &str) -> String {
    let known = match name {
        "SPACE" => "space",
        "ENTER" | "KPENTER" => "enter",
        "BACKSPACE" => "backspace",
        "TAB" => "tab",
        "ESC" => "esc",
        "LEFTSHIFT" => "shift_l",
        "RIGHTSHIFT" => "shift_r",
        "LEFTCTRL" => "ctrl_l",
        "RIGHTCTRL" => "ctrl_r",
        "LEFTALT" => "alt_l",
        "RIGHTALT" => "alt_gr",
        "LEFTMETA" => "cmd",
        "RIGHTMETA" => "cmd_r",
        "COMPOSE" => "menu",
        "CAPSLOCK" => "caps_lock",
        "NUMLOCK" => "num_lock",
        "SCROLLLOCK" => "scroll_lock",
        "SYSRQ" => "print_screen",
        "PAUSE" => "pause",
        "UP" => "up",
        "DOWN" => "down",
        "LEFT" => "left",
        "RIGHT" => "right",
        "HOME" => "home",
        "END" => "end",
        "PAGEUP" => "page_up",
        "PAGEDOWN" => "page_down",
        "INSERT" => "insert",
        "DELETE" => "delete",
        // Everything else derives its name from the Linux code name
        // (KEY_MUTE -> "mute").
        other => return other.to_lowercase(),
    };
    known.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_letter_and_digit_keys() {
        assert_eq!(key_identity(30), Some(KeyPress::from_char('a'))); // KEY_A
        assert_eq!(key_identity(44), Some(KeyPress::from_char('z'))); // KEY_Z
        assert_eq!(key_identity(2), Some(KeyPress::from_char('1'))); // KEY_1
        assert_eq!(key_identity(11), Some(KeyPress::from_char('0'))); // KEY_0
    }

    #[test]
    fn test_punctuation_keys() {
        assert_eq!(key_identity(12), Some(KeyPress::from_char('-'))); // KEY_MINUS
        assert_eq!(key_identity(51), Some(KeyPress::from_char(','))); // KEY_COMMA
        assert_eq!(key_identity(53), Some(KeyPress::from_char('/'))); // KEY_SLASH
        assert_eq!(key_identity(40), Some(KeyPress::from_char('\''))); // KEY_APOSTROPHE
    }

    #[test]
    fn test_named_keys() {
        assert_eq!(key_identity(57), Some(KeyPress::named("space"))); // KEY_SPACE
        assert_eq!(key_identity(28), Some(KeyPress::named("enter"))); // KEY_ENTER
        assert_eq!(key_identity(14), Some(KeyPress::named("backspace"))); // KEY_BACKSPACE
        assert_eq!(key_identity(1), Some(KeyPress::named("esc"))); // KEY_ESC
        assert_eq!(key_identity(15), Some(KeyPress::named("tab"))); // KEY_TAB
    }

    #[test]
    fn test_modifier_names() {
        assert_eq!(key_identity(42), Some(KeyPress::named("shift_l"))); // KEY_LEFTSHIFT
        assert_eq!(key_identity(54), Some(KeyPress::named("shift_r"))); // KEY_RIGHTSHIFT
        assert_eq!(key_identity(29), Some(KeyPress::named("ctrl_l"))); // KEY_LEFTCTRL
        assert_eq!(key_identity(100), Some(KeyPress::named("alt_gr"))); // KEY_RIGHTALT
        assert_eq!(key_identity(125), Some(KeyPress::named("cmd"))); // KEY_LEFTMETA
        assert_eq!(key_identity(126), Some(KeyPress::named("cmd_r"))); // KEY_RIGHTMETA
    }

    #[test]
    fn test_function_keys() {
        assert_eq!(key_identity(59), Some(KeyPress::named("f1"))); // KEY_F1
        assert_eq!(key_identity(88), Some(KeyPress::named("f12"))); // KEY_F12
    }

    #[test]
    fn test_numpad() {
        assert_eq!(key_identity(79), Some(KeyPress::from_char('1'))); // KEY_KP1
        assert_eq!(key_identity(82), Some(KeyPress::from_char('0'))); // KEY_KP0
        assert_eq!(key_identity(96), Some(KeyPress::named("enter"))); // KEY_KPENTER
        assert_eq!(key_identity(98), Some(KeyPress::from_char('/'))); // KEY_KPSLASH
    }

    #[test]
    fn test_navigation_names() {
        assert_eq!(key_identity(104), Some(KeyPress::named("page_up"))); // KEY_PAGEUP
        assert_eq!(key_identity(102), Some(KeyPress::named("home"))); // KEY_HOME
        assert_eq!(key_identity(111), Some(KeyPress::named("delete"))); // KEY_DELETE
    }

    #[test]
    fn test_derived_fallback_names() {
        assert_eq!(key_identity(113), Some(KeyPress::named("mute"))); // KEY_MUTE
        assert_eq!(key_identity(114), Some(KeyPress::named("volumedown"))); // KEY_VOLUMEDOWN
    }

    #[test]
    fn test_button_codes_have_no_identity() {
        assert_eq!(key_identity(272), None); // BTN_LEFT
        assert_eq!(key_identity(330), None); // BTN_TOUCH
    }
}
