//! evdev input backend
//!
//! Listens on raw input devices via /dev/input, one detached thread per
//! device. Listen-only: events are observed, never grabbed, and the
//! applications being recorded receive input unmodified.
//!
//! Requires 'input' group membership to read raw input devices.

use anyhow::{Context, Result};
use evdev::{Device, EventType};
use std::thread::{self, JoinHandle};
use tracing::{error, info, trace};

use crate::constants::input;
use crate::input::devices;
use crate::input::keymap::key_identity;
use crate::input::{InputBackend, MouseButton, RawEvent};
use crate::normalize::normalize;
use crate::queue::InputQueue;

pub struct EvdevBackend;

impl InputBackend for EvdevBackend {
    fn spawn(queue: InputQueue) -> Result<Vec<JoinHandle<()>>> {
        spawn_listener_impl(queue)
    }

    fn is_available() -> bool {
        devices::check_permissions()
    }

    fn name() -> &'static str {
        "evdev"
    }
}

/// Spawn one listener thread per discovered keyboard/mouse device
fn spawn_listener_impl(queue: InputQueue) -> Result<Vec<JoinHandle<()>>> {
    let devices = devices::find_input_devices()?;

    let mut handles = Vec::new();

    for (device, device_path) in devices {
        let queue = queue.clone();

        let handle = thread::spawn(move || {
            info!(device = ?device.name(), path = %device_path.display(), "Input listener started");
            if let Err(e) = listen(device, queue) {
                // One dead listener (unplugged device, read error) must not
                // take the rest of the process with it.
                error!(path = %device_path.display(), error = %e, "Input listener error");
            }
            info!(path = %device_path.display(), "Input listener exited");
        });
        handles.push(handle);
    }

    Ok(handles)
}

/// Blocking read loop for a single device
fn listen(mut device: Device, queue: InputQueue) -> Result<()> {
    loop {
        for event in device.fetch_events().context("Failed to fetch events")? {
            let Some(raw) = translate(event.event_type(), event.code(), event.value()) else {
                continue;
            };
            trace!(event = ?raw, "Raw input event");

            if let Some(symbol) = normalize(&raw) {
                queue.push(symbol);
            }
        }
    }
}

/// Translate an evdev event into the raw event vocabulary.
///
/// Key presses forward only value 1 (releases are 0, autorepeat 2 - a held
/// key repeating at 30/s would otherwise swamp the 20/s display rate).
/// Mouse buttons forward both edges; the normalizer suppresses releases.
/// Hi-res wheel events duplicate every `REL_WHEEL` detent and are skipped.
fn translate(event_type: EventType, code: u16, value: i32) -> Option<RawEvent> {
    match event_type {
        EventType::KEY => {
            if let Some(button) = mouse_button(code) {
                let pressed = match value {
                    input::KEY_PRESS => true,
                    input::KEY_RELEASE => false,
                    _ => return None,
                };
                return Some(RawEvent::Button { button, pressed });
            }

            if value != input::KEY_PRESS {
                return None;
            }
            key_identity(code).map(RawEvent::Key)
        }
        EventType::RELATIVE if code == input::REL_WHEEL => {
            Some(RawEvent::Scroll { delta: value })
        }
        _ => None,
    }
}

/// Mouse button identity for codes in the BTN_* range
fn mouse_button(code: u16) -> Option<MouseButton> {
    match code {
        input::BTN_LEFT => Some(MouseButton::Left),
        input::BTN_RIGHT => Some(MouseButton::Right),
        input::BTN_MIDDLE => Some(MouseButton::Middle),
        code if (input::BTN_LEFT..=input::BTN_TASK).contains(&code) => Some(MouseButton::Other),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::KeyPress;

    #[test]
    fn test_key_press_forwarded() {
        assert_eq!(
            translate(EventType::KEY, 30, input::KEY_PRESS), // KEY_A
            Some(RawEvent::Key(KeyPress::from_char('a')))
        );
        assert_eq!(
            translate(EventType::KEY, 57, input::KEY_PRESS), // KEY_SPACE
            Some(RawEvent::Key(KeyPress::named("space")))
        );
    }

    #[test]
    fn test_key_release_and_autorepeat_skipped() {
        assert_eq!(translate(EventType::KEY, 30, input::KEY_RELEASE), None);
        assert_eq!(translate(EventType::KEY, 30, 2), None);
    }

    #[test]
    fn test_mouse_buttons_forward_both_edges() {
        assert_eq!(
            translate(EventType::KEY, input::BTN_LEFT, input::KEY_PRESS),
            Some(RawEvent::Button {
                button: MouseButton::Left,
                pressed: true
            })
        );
        assert_eq!(
            translate(EventType::KEY, input::BTN_RIGHT, input::KEY_RELEASE),
            Some(RawEvent::Button {
                button: MouseButton::Right,
                pressed: false
            })
        );
        assert_eq!(
            translate(EventType::KEY, input::BTN_MIDDLE, input::KEY_PRESS),
            Some(RawEvent::Button {
                button: MouseButton::Middle,
                pressed: true
            })
        );
    }

    #[test]
    fn test_side_buttons_are_other() {
        // BTN_SIDE = 0x113, BTN_EXTRA = 0x114
        assert_eq!(
            translate(EventType::KEY, 275, input::KEY_PRESS),
            Some(RawEvent::Button {
                button: MouseButton::Other,
                pressed: true
            })
        );
        assert_eq!(
            translate(EventType::KEY, 276, input::KEY_PRESS),
            Some(RawEvent::Button {
                button: MouseButton::Other,
                pressed: true
            })
        );
    }

    #[test]
    fn test_wheel_motion() {
        assert_eq!(
            translate(EventType::RELATIVE, input::REL_WHEEL, 1),
            Some(RawEvent::Scroll { delta: 1 })
        );
        assert_eq!(
            translate(EventType::RELATIVE, input::REL_WHEEL, -3),
            Some(RawEvent::Scroll { delta: -3 })
        );
    }

    #[test]
    fn test_hi_res_wheel_skipped() {
        assert_eq!(
            translate(EventType::RELATIVE, input::REL_WHEEL_HI_RES, 120),
            None
        );
    }

    #[test]
    fn test_other_relative_axes_skipped() {
        // REL_X / REL_Y pointer motion
        assert_eq!(translate(EventType::RELATIVE, 0, 5), None);
        assert_eq!(translate(EventType::RELATIVE, 1, -5), None);
    }

    #[test]
    fn test_unidentified_keys_skipped() {
        // BTN_TOUCH is in the KEY namespace but is neither a keyboard key
        // nor a mouse button we display.
        assert_eq!(translate(EventType::KEY, 330, input::KEY_PRESS), None);
    }
}
