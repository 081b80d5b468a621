//! Application-wide constants
//!
//! This module contains all magic numbers and string literals used throughout
//! the application, providing a single source of truth for constant values.

/// X11 protocol constants
pub mod x11 {
    /// Override redirect flag for unmanaged windows
    pub const OVERRIDE_REDIRECT: u32 = 1;
}

/// Timing constants
pub mod timing {
    /// Interval between queue drain ticks in milliseconds.
    /// One symbol is shown per tick, so this also bounds the overlay
    /// creation rate (20 per second).
    pub const DRAIN_INTERVAL_MS: u64 = 50;
}

/// Input event constants (from evdev)
pub mod input {
    /// Key release event value
    pub const KEY_RELEASE: i32 = 0;

    /// Key press event value
    pub const KEY_PRESS: i32 = 1;

    /// Key code for Tab key - used to identify keyboard devices (from Linux input-event-codes.h)
    pub const KEY_TAB: u16 = 15;

    /// Button code for left mouse button - used to identify mouse devices (BTN_LEFT = 0x110)
    pub const BTN_LEFT: u16 = 272;

    /// Button code for right mouse button (BTN_RIGHT = 0x111)
    pub const BTN_RIGHT: u16 = 273;

    /// Button code for middle mouse button (BTN_MIDDLE = 0x112)
    pub const BTN_MIDDLE: u16 = 274;

    /// Last code in the mouse button range (BTN_TASK = 0x117)
    pub const BTN_TASK: u16 = 279;

    /// Relative axis code for vertical wheel motion (REL_WHEEL)
    pub const REL_WHEEL: u16 = 8;

    /// Relative axis code for hi-res wheel motion (REL_WHEEL_HI_RES);
    /// sent alongside every REL_WHEEL detent and therefore skipped
    pub const REL_WHEEL_HI_RES: u16 = 11;
}

/// System paths
pub mod paths {
    /// Input device directory
    pub const DEV_INPUT: &str = "/dev/input";

    /// Stable input device symlinks
    pub const DEV_INPUT_BY_ID: &str = "/dev/input/by-id";
}

/// User group permissions
pub mod permissions {
    /// Linux group name for input device access
    pub const INPUT_GROUP: &str = "input";

    /// Command to add user to input group
    pub const ADD_TO_INPUT_GROUP: &str = "sudo usermod -a -G input $USER";
}

/// Configuration paths and filenames
pub mod config {
    /// Application directory name under XDG config
    pub const APP_DIR: &str = "keyosd";

    /// Configuration filename
    pub const FILENAME: &str = "config.json";
}

/// Default configuration values
/// These are used for missing or unparseable config fields
pub mod defaults {
    /// Label appearance settings
    pub mod appearance {
        /// Default font family
        pub const FONT_FAMILY: &str = "Tajawal";

        /// Default font size in pixels
        pub const FONT_SIZE: i32 = 24;

        /// Default text color
        pub const TEXT_COLOR: &str = "white";

        /// Default label background color
        pub const BG_COLOR: &str = "#2E2E2E";

        /// Default horizontal padding around the label text in pixels
        pub const PADDING_X: i32 = 20;

        /// Default vertical padding around the label text in pixels
        pub const PADDING_Y: i32 = 10;

        /// Default overlay lifetime in milliseconds
        pub const DURATION_MS: i64 = 1500;

        /// Fallback TrueType fonts (tried in order)
        /// First available font will be selected
        pub const FONT_CANDIDATES: &[&str] = &[
            "DejaVu Sans",
            "Liberation Sans",
            "Noto Sans",
        ];
    }

    /// Overlay placement settings
    pub mod placement {
        /// Default horizontal offset from the anchor point in pixels
        pub const X_OFFSET: i32 = 0;

        /// Default vertical offset from the anchor point in pixels
        pub const Y_OFFSET: i32 = -150;
    }
}
