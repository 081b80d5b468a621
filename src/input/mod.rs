//! Global input listening
//!
//! Backends translate OS input into the raw event vocabulary below;
//! the normalizer turns raw events into display symbols.

pub mod backend;
pub mod devices;
pub mod evdev;
pub mod keymap;

pub use backend::InputBackend;
pub use evdev::EvdevBackend;

/// Identity of a pressed key: a printable character, a lower-case key name,
/// or neither when the backend cannot identify the key
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeyPress {
    pub character: Option<char>,
    pub name: Option<String>,
}

impl KeyPress {
    /// Key producing a printable character
    pub fn from_char(character: char) -> Self {
        Self {
            character: Some(character),
            name: None,
        }
    }

    /// Non-printable key known by name
    pub fn named(name: &str) -> Self {
        Self {
            character: None,
            name: Some(name.to_string()),
        }
    }
}

/// Mouse button identity
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
    /// Side/extra/task buttons, displayed generically
    Other,
}

/// A raw input event as delivered by a backend, before normalization
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RawEvent {
    /// Key press (releases and autorepeat are not forwarded by backends)
    Key(KeyPress),
    /// Mouse button transition
    Button { button: MouseButton, pressed: bool },
    /// Vertical wheel motion, positive away from the user
    Scroll { delta: i32 },
}
