//! Color parsing for label styling
//!
//! Accepts the forms the configuration uses: X11 color names ("white",
//! "black", ...) and hex strings. Overlays are opaque, so an alpha channel
//! in 8-digit hex is accepted but discarded.

/// An 8-bit RGB color
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse a color name or hex string
    pub fn parse(value: &str) -> Option<Self> {
        named(value).or_else(|| parse_hex(value))
    }
}

/// Parse hex color string supporting multiple formats:
/// - 6 digits: RRGGBB
/// - 8 digits: AARRGGBB (alpha discarded)
/// - Optional '#' prefix supported but not required
fn parse_hex(hex: &str) -> Option<Rgb> {
    let hex = hex.strip_prefix('#').unwrap_or(hex);
    if hex.len() != 6 && hex.len() != 8 {
        return None;
    }
    let value = u32::from_str_radix(hex, 16).ok()?;

    Some(Rgb::new(
        ((value >> 16) & 0xFF) as u8,
        ((value >> 8) & 0xFF) as u8,
        (value & 0xFF) as u8,
    ))
}

/// Resolve a color name to its RGB value (X11 rgb.txt values)
fn named(name: &str) -> Option<Rgb> {
    let rgb = match name.to_ascii_lowercase().as_str() {
        "white" => Rgb::new(255, 255, 255),
        "black" => Rgb::new(0, 0, 0),
        "red" => Rgb::new(255, 0, 0),
        "green" => Rgb::new(0, 255, 0),
        "blue" => Rgb::new(0, 0, 255),
        "yellow" => Rgb::new(255, 255, 0),
        "cyan" => Rgb::new(0, 255, 255),
        "magenta" => Rgb::new(255, 0, 255),
        "gray" | "grey" => Rgb::new(190, 190, 190),
        "orange" => Rgb::new(255, 165, 0),
        _ => return None,
    };
    Some(rgb)
}
