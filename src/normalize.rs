//! Input event normalization
//!
//! Maps a raw input event to the short symbol an overlay displays, or to
//! nothing at all. Pure string/char work, no I/O.

use std::cmp::Ordering;

use crate::input::{KeyPress, MouseButton, RawEvent};

/// Map a raw input event to its display symbol.
///
/// `None` means the event is not displayed: a key without identity, a
/// button release, or a zero scroll.
pub fn normalize(event: &RawEvent) -> Option<String> {
    match event {
        RawEvent::Key(key) => normalize_key(key),
        RawEvent::Button { button, pressed } => normalize_button(*button, *pressed),
        RawEvent::Scroll { delta } => normalize_scroll(*delta),
    }
}

fn normalize_key(key: &KeyPress) -> Option<String> {
    if let Some(character) = key.character {
        return Some(character.to_uppercase().to_string());
    }

    // Left/right variants collapse to the bare key ("shift_l" -> "shift");
    // anything smelling of cmd/win is the Super key.
    let name = key.name.as_deref()?;
    let token = if name.contains("cmd") || name.contains("win") {
        "Super"
    } else if let Some((head, _)) = name.split_once('_') {
        head
    } else {
        name
    };
    if token.is_empty() {
        return None;
    }

    if let Some(glyph) = special_glyph(&token.to_lowercase()) {
        return Some(glyph.to_string());
    }

    if token.chars().count() == 1 {
        Some(token.to_uppercase())
    } else {
        Some(capitalize(token))
    }
}

fn normalize_button(button: MouseButton, pressed: bool) -> Option<String> {
    if !pressed {
        return None;
    }

    let symbol = match button {
        MouseButton::Left => "LMB",
        MouseButton::Right => "RMB",
        MouseButton::Middle => "MMB",
        MouseButton::Other => "Mouse",
    };
    Some(symbol.to_string())
}

fn normalize_scroll(delta: i32) -> Option<String> {
    match delta.cmp(&0) {
        Ordering::Greater => Some("▲".to_string()),
        Ordering::Less => Some("▼".to_string()),
        Ordering::Equal => None,
    }
}

/// Fixed glyphs for well-known key tokens (lower-cased)
fn special_glyph(token: &str) -> Option<&'static str> {
    let glyph = match token {
        "space" => "␣",
        "enter" => "⏎",
        "backspace" => "⌫",
        "shift" => "⇧",
        "ctrl" => "⌃",
        "alt" => "⌥",
        "tab" => "⇥",
        "super" => "❖",
        "esc" => "Esc",
        _ => return None,
    };
    Some(glyph)
}

/// Capitalize a key token: first letter upper, rest lower
fn capitalize(token: &str) -> String {
    let mut chars = token.chars();
    match chars.next() {
        None => String::new(),
        Some(first) => first
            .to_uppercase()
            .chain(chars.as_str().to_lowercase().chars())
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key_char(character: char) -> RawEvent {
        RawEvent::Key(KeyPress::from_char(character))
    }

    fn key_named(name: &str) -> RawEvent {
        RawEvent::Key(KeyPress::named(name))
    }

    #[test]
    fn test_printable_characters_upper_cased() {
        assert_eq!(normalize(&key_char('a')).as_deref(), Some("A"));
        assert_eq!(normalize(&key_char('z')).as_deref(), Some("Z"));
        assert_eq!(normalize(&key_char('7')).as_deref(), Some("7"));
        assert_eq!(normalize(&key_char('@')).as_deref(), Some("@"));
    }

    #[test]
    fn test_special_key_glyphs() {
        assert_eq!(normalize(&key_named("space")).as_deref(), Some("␣"));
        assert_eq!(normalize(&key_named("enter")).as_deref(), Some("⏎"));
        assert_eq!(normalize(&key_named("backspace")).as_deref(), Some("⌫"));
        assert_eq!(normalize(&key_named("tab")).as_deref(), Some("⇥"));
        assert_eq!(normalize(&key_named("esc")).as_deref(), Some("Esc"));
    }

    #[test]
    fn test_glyph_lookup_is_case_insensitive() {
        assert_eq!(normalize(&key_named("Space")).as_deref(), Some("␣"));
        assert_eq!(normalize(&key_named("ESC")).as_deref(), Some("Esc"));
    }

    #[test]
    fn test_modifier_variants_collapse() {
        assert_eq!(normalize(&key_named("shift_l")).as_deref(), Some("⇧"));
        assert_eq!(normalize(&key_named("shift_r")).as_deref(), Some("⇧"));
        assert_eq!(normalize(&key_named("ctrl_r")).as_deref(), Some("⌃"));
        assert_eq!(normalize(&key_named("alt_gr")).as_deref(), Some("⌥"));
    }

    #[test]
    fn test_super_key_collapses_to_glyph() {
        assert_eq!(normalize(&key_named("cmd")).as_deref(), Some("❖"));
        assert_eq!(normalize(&key_named("cmd_r")).as_deref(), Some("❖"));
        assert_eq!(normalize(&key_named("win")).as_deref(), Some("❖"));
        assert_eq!(normalize(&key_named("super")).as_deref(), Some("❖"));
    }

    #[test]
    fn test_unmapped_names_capitalized() {
        assert_eq!(normalize(&key_named("f1")).as_deref(), Some("F1"));
        assert_eq!(normalize(&key_named("f12")).as_deref(), Some("F12"));
        assert_eq!(normalize(&key_named("delete")).as_deref(), Some("Delete"));
        assert_eq!(normalize(&key_named("HOME")).as_deref(), Some("Home"));
        // Only the part before the first underscore survives.
        assert_eq!(normalize(&key_named("page_up")).as_deref(), Some("Page"));
    }

    #[test]
    fn test_single_letter_names_upper_cased() {
        assert_eq!(normalize(&key_named("a")).as_deref(), Some("A"));
    }

    #[test]
    fn test_key_without_identity_suppressed() {
        assert_eq!(normalize(&RawEvent::Key(KeyPress::default())), None);
        assert_eq!(normalize(&key_named("")), None);
        assert_eq!(normalize(&key_named("_l")), None);
    }

    #[test]
    fn test_button_presses() {
        let press = |button| RawEvent::Button {
            button,
            pressed: true,
        };

        assert_eq!(normalize(&press(MouseButton::Left)).as_deref(), Some("LMB"));
        assert_eq!(normalize(&press(MouseButton::Right)).as_deref(), Some("RMB"));
        assert_eq!(normalize(&press(MouseButton::Middle)).as_deref(), Some("MMB"));
        assert_eq!(
            normalize(&press(MouseButton::Other)).as_deref(),
            Some("Mouse")
        );
    }

    #[test]
    fn test_button_releases_suppressed() {
        for button in [
            MouseButton::Left,
            MouseButton::Right,
            MouseButton::Middle,
            MouseButton::Other,
        ] {
            let release = RawEvent::Button {
                button,
                pressed: false,
            };
            assert_eq!(normalize(&release), None);
        }
    }

    #[test]
    fn test_scroll_direction() {
        assert_eq!(normalize(&RawEvent::Scroll { delta: 1 }).as_deref(), Some("▲"));
        assert_eq!(normalize(&RawEvent::Scroll { delta: 5 }).as_deref(), Some("▲"));
        assert_eq!(normalize(&RawEvent::Scroll { delta: -1 }).as_deref(), Some("▼"));
        assert_eq!(normalize(&RawEvent::Scroll { delta: 0 }), None);
    }
}
