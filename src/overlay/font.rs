//! Font resolution and label rasterization
//!
//! The configured family is resolved to a font file via fontconfig, with a
//! candidate fallback chain for systems without the configured font. Labels
//! are rasterized with fontdue and composited over the background color
//! into a BGRX buffer ready for an X11 pixmap upload.

use anyhow::{Context, Result};
use fontconfig::{Fontconfig, Pattern};
use fontdue::{Font, FontSettings};
use std::ffi::CString;
use std::fs;
use std::path::PathBuf;
use tracing::{debug, info, warn};

use crate::constants::defaults;
use crate::geometry::Dimensions;
use crate::overlay::DisplayConfig;

/// A rasterized label: background-filled pixels with the text composited in
pub struct Label {
    pub dimensions: Dimensions,
    /// Little-endian pixels: Blue, Green, Red, unused (BGRX)
    pub data: Vec<u8>,
}

/// Find the font file for a family name via fontconfig.
///
/// Fontconfig always substitutes *something*; a family mismatch means the
/// requested font is not installed, which callers treat as a miss.
fn find_font_path(family: &str) -> Result<PathBuf> {
    let fc = Fontconfig::new().context("Failed to initialize fontconfig")?;

    let mut pattern = Pattern::new(&fc);
    let family_cstr =
        CString::new(family).with_context(|| format!("Invalid family name: {}", family))?;
    pattern.add_string(fontconfig::FC_FAMILY, &family_cstr);

    let matched = pattern.font_match();

    if let Some(matched_family) = matched.get_string(fontconfig::FC_FAMILY)
        && !matched_family.eq_ignore_ascii_case(family)
    {
        warn!(
            requested = family,
            matched_family = matched_family,
            "Fontconfig returned different font family - requested font may not be installed"
        );
        return Err(anyhow::anyhow!(
            "Font '{}' not found - fontconfig returned family '{}' instead",
            family,
            matched_family
        ));
    }

    let file_path = matched
        .filename()
        .with_context(|| format!("No font file found for '{}'", family))?;

    let path = PathBuf::from(file_path);
    if !path.exists() {
        return Err(anyhow::anyhow!(
            "Font file path '{}' does not exist",
            path.display()
        ));
    }

    debug!(family = family, path = %path.display(), "Resolved font path");
    Ok(path)
}

/// Resolve the configured family, then the candidate list, then whatever
/// fontconfig aliases to `sans-serif`. Only a system with no usable
/// TrueType font at all fails.
fn resolve_font_path(family: &str) -> Result<PathBuf> {
    match find_font_path(family) {
        Ok(path) => return Ok(path),
        Err(e) => {
            warn!(family = family, error = %e, "Configured font unavailable, trying fallbacks");
        }
    }

    for candidate in defaults::appearance::FONT_CANDIDATES {
        if let Ok(path) = find_font_path(candidate) {
            info!(font = candidate, path = %path.display(), "Selected fallback font");
            return Ok(path);
        }
    }

    // Last resort: accept whatever the sans-serif alias resolves to.
    let fc = Fontconfig::new().context("Failed to initialize fontconfig")?;
    let mut pattern = Pattern::new(&fc);
    let alias = CString::new("sans-serif").context("Invalid alias name")?;
    pattern.add_string(fontconfig::FC_FAMILY, &alias);
    let matched = pattern.font_match();

    if let Some(file_path) = matched.filename() {
        let path = PathBuf::from(file_path);
        if path.exists() {
            info!(path = %path.display(), "Selected sans-serif alias font");
            return Ok(path);
        }
    }

    Err(anyhow::anyhow!(
        "No TrueType fonts found. Tried '{}', the candidates {:?}, \
         and the fontconfig 'sans-serif' alias.",
        family,
        defaults::appearance::FONT_CANDIDATES
    ))
}

/// Rasterizes display symbols with a single loaded TrueType font
pub struct LabelRenderer {
    font: Font,
    size: f32,
}

impl LabelRenderer {
    /// Resolve a family name to a font file and load it
    pub fn resolve(family: &str, font_size: i32) -> Result<Self> {
        // Layout copes with unreasonable sizes; fontdue does not.
        let size = font_size.max(1) as f32;

        let path = resolve_font_path(family)?;
        Self::from_path(path, size)
    }

    fn from_path(path: PathBuf, size: f32) -> Result<Self> {
        let font_data = fs::read(&path)
            .with_context(|| format!("Failed to read font file: {}", path.display()))?;

        let font = Font::from_bytes(font_data, FontSettings::default()).map_err(|e| {
            anyhow::anyhow!("Failed to parse font file '{}': {}", path.display(), e)
        })?;

        info!(path = %path.display(), size = size, "Loaded font");
        Ok(Self { font, size })
    }

    /// Rasterize a symbol over the background color with padding applied
    pub fn render_label(&self, text: &str, config: &DisplayConfig) -> Label {
        let mut glyphs = Vec::new();
        let mut pen_x = 0.0f32;
        let mut max_ascent = 0i32;
        let mut max_descent = 0i32;

        for ch in text.chars() {
            let (metrics, bitmap) = self.font.rasterize(ch, self.size);
            let ascent = metrics.height as i32 + metrics.ymin;
            let descent = -metrics.ymin;
            max_ascent = max_ascent.max(ascent);
            max_descent = max_descent.max(descent);
            glyphs.push((pen_x as i32, metrics, bitmap));
            pen_x += metrics.advance_width;
        }

        let text_width = pen_x.ceil() as i32;
        let text_height = max_ascent + max_descent;

        let dimensions =
            label_dimensions(text_width, text_height, config.padding_x, config.padding_y);
        let width = i32::from(dimensions.width);
        let height = i32::from(dimensions.height);

        // Fill with the background color (BGRX).
        let bg = config.bg_color;
        let fg = config.text_color;
        let mut data = Vec::with_capacity((width * height) as usize * 4);
        for _ in 0..width * height {
            data.extend_from_slice(&[bg.b, bg.g, bg.r, 0]);
        }

        for (x_offset, metrics, bitmap) in glyphs {
            let baseline_y = max_ascent - (metrics.height as i32 + metrics.ymin);

            for gy in 0..metrics.height {
                for gx in 0..metrics.width {
                    let px = config.padding_x + x_offset + gx as i32;
                    let py = config.padding_y + baseline_y + gy as i32;

                    if px < 0 || py < 0 || px >= width || py >= height {
                        continue;
                    }

                    let coverage = bitmap[gy * metrics.width + gx] as u32;
                    if coverage == 0 {
                        continue;
                    }

                    // pixel = (fg * coverage + bg * (255 - coverage)) / 255
                    let inverse = 255 - coverage;
                    let b = (fg.b as u32 * coverage + bg.b as u32 * inverse) / 255;
                    let g = (fg.g as u32 * coverage + bg.g as u32 * inverse) / 255;
                    let r = (fg.r as u32 * coverage + bg.r as u32 * inverse) / 255;

                    let idx = (py * width + px) as usize * 4;
                    data[idx] = b as u8;
                    data[idx + 1] = g as u8;
                    data[idx + 2] = r as u8;
                }
            }
        }

        Label { dimensions, data }
    }
}

/// Final window dimensions for a rendered text block.
///
/// Padding applies on both sides of each axis; the result is clamped to the
/// 1..=u16::MAX range the X server accepts (negative padding may otherwise
/// collapse a label to nothing).
fn label_dimensions(text_width: i32, text_height: i32, padding_x: i32, padding_y: i32) -> Dimensions {
    let width = (text_width + 2 * padding_x).clamp(1, i32::from(u16::MAX));
    let height = (text_height + 2 * padding_y).clamp(1, i32::from(u16::MAX));
    Dimensions::new(width as u16, height as u16)
}
