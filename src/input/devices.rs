//! Input device discovery and permission diagnostics
//!
//! Scans /dev/input for keyboards and mice. Access requires membership in
//! the `input` group; the diagnostics here spell out the remedy because a
//! permission failure is the most common first-run problem.

use anyhow::{Context, Result};
use evdev::{Device, KeyCode};
use std::path::PathBuf;
use tracing::{error, info};

use crate::constants::{input, paths, permissions};

/// Scan /dev/input for devices worth listening to, with their paths
pub fn find_input_devices() -> Result<Vec<(Device, PathBuf)>> {
    info!(path = %paths::DEV_INPUT, "Scanning for input devices...");

    let mut devices = Vec::new();

    for entry in std::fs::read_dir(paths::DEV_INPUT).context(format!(
        "Failed to read {} - are you in the '{}' group?",
        paths::DEV_INPUT,
        permissions::INPUT_GROUP
    ))? {
        let entry = entry?;
        let path = entry.path();

        if let Ok(device) = Device::open(&path)
            && let Some(device_type) = classify_input_device(&device)
        {
            info!(
                device_path = %path.display(),
                name = ?device.name(),
                device_type = device_type,
                "Found input device"
            );
            devices.push((device, path));
        }
    }

    if devices.is_empty() {
        anyhow::bail!(
            "No input device found. Ensure you're in '{}' group:\n\
             {}\n\
             Then log out and back in.",
            permissions::INPUT_GROUP,
            permissions::ADD_TO_INPUT_GROUP
        )
    }

    info!(count = devices.len(), "Listening on input device(s)");

    Ok(devices)
}

/// Classify an input device as keyboard, mouse, or both.
/// Returns None if the device is neither.
fn classify_input_device(device: &Device) -> Option<&'static str> {
    if let Some(keys) = device.supported_keys() {
        // Keyboards advertise Tab, mice the left button.
        let is_keyboard = keys.contains(KeyCode(input::KEY_TAB));
        let is_mouse = keys.contains(KeyCode(input::BTN_LEFT));

        match (is_keyboard, is_mouse) {
            (true, true) => Some("keyboard+mouse"),
            (true, false) => Some("keyboard"),
            (false, true) => Some("mouse"),
            (false, false) => None,
        }
    } else {
        None
    }
}

/// Check if the user can read raw input devices
pub fn check_permissions() -> bool {
    std::fs::read_dir(paths::DEV_INPUT).is_ok()
}

/// Print actionable remedy when input device access is missing
pub fn print_permission_error() {
    error!(path = %paths::DEV_INPUT, "Cannot access input devices");
    error!(group = %permissions::INPUT_GROUP, "Reading input requires group membership");
    error!(command = %permissions::ADD_TO_INPUT_GROUP, "Add user to input group");
    error!("  Then log out and back in");
}

/// List stable device identifiers from /dev/input/by-id (for --list-devices)
pub fn list_input_devices() -> Result<Vec<(String, String)>> {
    let by_id_path = paths::DEV_INPUT_BY_ID;
    let mut devices = Vec::new();

    if !std::path::Path::new(by_id_path).exists() {
        return Ok(devices);
    }

    for entry in
        std::fs::read_dir(by_id_path).context(format!("Failed to read {} directory", by_id_path))?
    {
        let entry = entry?;
        let path = entry.path();

        if let Some(name) = path.file_name().and_then(|n| n.to_str())
            && name.contains("-event-")
            && let Ok(target) = std::fs::read_link(&path)
        {
            let absolute_path = if target.is_absolute() {
                target
            } else {
                std::path::Path::new(by_id_path)
                    .join(&target)
                    .canonicalize()?
            };

            if let Ok(device) = Device::open(&absolute_path)
                && classify_input_device(&device).is_some()
            {
                let friendly_name = name
                    .replace("-event-kbd", "")
                    .replace("-event-mouse", "")
                    .replace("_", " ")
                    .replace("-", " ");

                devices.push((name.to_string(), friendly_name));
            }
        }
    }

    devices.sort_by(|a, b| a.1.cmp(&b.1));

    Ok(devices)
}
