//! Settings loading with per-key fallback
//!
//! The config file is a JSON document with two sections, `Appearance` and
//! `Position`. Every key is optional and every key degrades independently:
//! a missing file, a malformed document, a missing section, or one
//! wrong-typed value each fall back to the documented default without
//! touching neighboring keys. Loading never fails and never aborts startup.

use serde::{Deserialize, Deserializer};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use crate::constants::{config, defaults};
use crate::geometry::Anchor;

/// Resolved application settings
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub appearance: Appearance,
    pub placement: Placement,
}

/// Label styling (`Appearance` section)
#[derive(Debug, Clone, PartialEq)]
pub struct Appearance {
    pub font_family: String,
    pub font_size: i32,
    pub text_color: String,
    pub bg_color: String,
    pub padding_x: i32,
    pub padding_y: i32,
    pub duration_ms: i64,
}

/// Overlay placement (`Position` section)
#[derive(Debug, Clone, PartialEq)]
pub struct Placement {
    pub anchor: Anchor,
    pub x_offset: i32,
    pub y_offset: i32,
}

impl Default for Appearance {
    fn default() -> Self {
        Self {
            font_family: defaults::appearance::FONT_FAMILY.to_string(),
            font_size: defaults::appearance::FONT_SIZE,
            text_color: defaults::appearance::TEXT_COLOR.to_string(),
            bg_color: defaults::appearance::BG_COLOR.to_string(),
            padding_x: defaults::appearance::PADDING_X,
            padding_y: defaults::appearance::PADDING_Y,
            duration_ms: defaults::appearance::DURATION_MS,
        }
    }
}

impl Default for Placement {
    fn default() -> Self {
        Self {
            anchor: Anchor::default(),
            x_offset: defaults::placement::X_OFFSET,
            y_offset: defaults::placement::Y_OFFSET,
        }
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            appearance: Appearance::default(),
            placement: Placement::default(),
        }
    }
}

/// Deserialize a value of any type, mapping failure to `None` instead of
/// poisoning the surrounding document. This is what gives per-key fallback:
/// `"font_size": "big"` yields `None` here and the default downstream.
fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: for<'a> Deserialize<'a>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(T::deserialize(value).ok())
}

/// Helper struct for lenient deserialization
#[derive(Debug, Default, Deserialize)]
struct SettingsHelper {
    #[serde(rename = "Appearance", default, deserialize_with = "lenient")]
    appearance: Option<AppearanceHelper>,
    #[serde(rename = "Position", default, deserialize_with = "lenient")]
    position: Option<PlacementHelper>,
}

#[derive(Debug, Default, Deserialize)]
struct AppearanceHelper {
    #[serde(default, deserialize_with = "lenient")]
    font_family: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    font_size: Option<i32>,
    #[serde(default, deserialize_with = "lenient")]
    text_color: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    bg_color: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    padding_x: Option<i32>,
    #[serde(default, deserialize_with = "lenient")]
    padding_y: Option<i32>,
    #[serde(default, deserialize_with = "lenient")]
    duration_ms: Option<i64>,
}

#[derive(Debug, Default, Deserialize)]
struct PlacementHelper {
    #[serde(default, deserialize_with = "lenient")]
    position: Option<Anchor>,
    #[serde(default, deserialize_with = "lenient")]
    x_offset: Option<i32>,
    #[serde(default, deserialize_with = "lenient")]
    y_offset: Option<i32>,
}

impl From<SettingsHelper> for Settings {
    fn from(helper: SettingsHelper) -> Self {
        let appearance = helper.appearance.unwrap_or_default();
        let position = helper.position.unwrap_or_default();

        Self {
            appearance: Appearance {
                font_family: appearance
                    .font_family
                    .unwrap_or_else(|| defaults::appearance::FONT_FAMILY.to_string()),
                font_size: appearance
                    .font_size
                    .unwrap_or(defaults::appearance::FONT_SIZE),
                text_color: appearance
                    .text_color
                    .unwrap_or_else(|| defaults::appearance::TEXT_COLOR.to_string()),
                bg_color: appearance
                    .bg_color
                    .unwrap_or_else(|| defaults::appearance::BG_COLOR.to_string()),
                padding_x: appearance
                    .padding_x
                    .unwrap_or(defaults::appearance::PADDING_X),
                padding_y: appearance
                    .padding_y
                    .unwrap_or(defaults::appearance::PADDING_Y),
                duration_ms: appearance
                    .duration_ms
                    .unwrap_or(defaults::appearance::DURATION_MS),
            },
            placement: Placement {
                anchor: position.position.unwrap_or_default(),
                x_offset: position.x_offset.unwrap_or(defaults::placement::X_OFFSET),
                y_offset: position.y_offset.unwrap_or(defaults::placement::Y_OFFSET),
            },
        }
    }
}

impl Settings {
    /// Default config file location under the XDG config directory
    pub fn default_path() -> PathBuf {
        let mut path = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
        path.push(config::APP_DIR);
        path.push(config::FILENAME);
        path
    }

    /// Load settings from a JSON file, falling back to defaults per key.
    ///
    /// This is deliberately infallible: the tool is useful with every value
    /// at its default, so a broken config file downgrades to warnings.
    pub fn load(path: &Path) -> Self {
        let contents = match fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(e) => {
                debug!(path = %path.display(), error = %e, "No config file, using defaults");
                return Self::default();
            }
        };

        match serde_json::from_str::<SettingsHelper>(&contents) {
            Ok(helper) => {
                debug!(path = %path.display(), "Loaded config file");
                helper.into()
            }
            Err(e) => {
                warn!(path = %path.display(), error = %e, "Failed to parse config file, using defaults");
                Self::default()
            }
        }
    }
}
