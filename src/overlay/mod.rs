//! Transient overlay windows
//!
//! Every symbol popped from the queue becomes one short-lived
//! override-redirect window: the label is rasterized, placed against the
//! configured anchor, shown, and destroyed once its deadline passes.

pub mod font;
pub mod window;

use std::time::{Duration, Instant};

use anyhow::Result;
use tracing::error;

use crate::color::Rgb;
use crate::config::Settings;
use crate::constants::defaults;
use crate::geometry::{Anchor, Dimensions, compute_position};
use crate::x11::OverlayContext;

pub use font::LabelRenderer;
pub use window::OverlayWindow;

/// Resolved display style: config strings parsed into usable values
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DisplayConfig {
    pub text_color: Rgb,
    pub bg_color: Rgb,
    pub padding_x: i32,
    pub padding_y: i32,
    pub duration: Duration,
    pub anchor: Anchor,
    pub x_offset: i32,
    pub y_offset: i32,
}

impl DisplayConfig {
    /// Parse colors and timing out of loaded settings.
    ///
    /// Unparseable colors fall back to the documented defaults with an
    /// error log; a negative duration behaves as zero (destroyed on the
    /// next drain tick).
    pub fn from_settings(settings: &Settings) -> Self {
        let text_color = Rgb::parse(&settings.appearance.text_color).unwrap_or_else(|| {
            error!(text_color = %settings.appearance.text_color, "Invalid text_color, using default");
            Rgb::parse(defaults::appearance::TEXT_COLOR).unwrap_or(Rgb::new(255, 255, 255))
        });

        let bg_color = Rgb::parse(&settings.appearance.bg_color).unwrap_or_else(|| {
            error!(bg_color = %settings.appearance.bg_color, "Invalid bg_color, using default");
            Rgb::parse(defaults::appearance::BG_COLOR).unwrap_or(Rgb::new(0x2E, 0x2E, 0x2E))
        });

        Self {
            text_color,
            bg_color,
            padding_x: settings.appearance.padding_x,
            padding_y: settings.appearance.padding_y,
            duration: Duration::from_millis(settings.appearance.duration_ms.max(0) as u64),
            anchor: settings.placement.anchor,
            x_offset: settings.placement.x_offset,
            y_offset: settings.placement.y_offset,
        }
    }
}

/// Render a symbol and realize it as a mapped overlay window.
///
/// Layout must happen before placement: the window dimensions are unknown
/// until the label is rasterized, and the anchor math needs them.
pub fn show_symbol<'a>(
    ctx: &OverlayContext<'a>,
    renderer: &LabelRenderer,
    config: &DisplayConfig,
    symbol: &str,
    now: Instant,
) -> Result<OverlayWindow<'a>> {
    let label = renderer.render_label(symbol, config);

    let screen = Dimensions::new(ctx.screen.width_in_pixels, ctx.screen.height_in_pixels);
    let position = compute_position(
        config.anchor,
        config.x_offset,
        config.y_offset,
        screen,
        label.dimensions,
    );

    OverlayWindow::create(ctx, &label, position, now + config.duration)
}
