// File: crates/multiline-core/src/theme.rs
// Summary: Colors and stroke presets for the line chart, light and dark.

use serde::{Deserialize, Serialize};

use crate::scene::BlendMode;

/// 8-bit RGBA color. Serialized as `#rrggbb` or `#rrggbbaa`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const fn from_argb(a: u8, r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a }
    }

    pub const fn from_rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    pub const TRANSPARENT: Color = Color::from_argb(0, 0, 0, 0);
    pub const BLACK: Color = Color::from_rgb(0, 0, 0);
    pub const WHITE: Color = Color::from_rgb(255, 255, 255);
    pub const STEELBLUE: Color = Color::from_rgb(0x46, 0x82, 0xb4);

    /// `#rrggbb` for opaque colors, `#rrggbbaa` otherwise.
    pub fn to_hex(&self) -> String {
        if self.a == 255 {
            format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
        } else {
            format!("#{:02x}{:02x}{:02x}{:02x}", self.r, self.g, self.b, self.a)
        }
    }

    /// Parse `#rgb`, `#rrggbb` or `#rrggbbaa`.
    pub fn parse_hex(s: &str) -> Option<Self> {
        let hex = s.trim().strip_prefix('#')?;
        if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return None;
        }
        let byte = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
        match hex.len() {
            3 => {
                let nib = |i: usize| u8::from_str_radix(&hex[i..i + 1], 16).ok().map(|v| v * 17);
                Some(Self::from_rgb(nib(0)?, nib(1)?, nib(2)?))
            }
            6 => Some(Self::from_rgb(byte(0)?, byte(2)?, byte(4)?)),
            8 => Some(Self::from_argb(byte(6)?, byte(0)?, byte(2)?, byte(4)?)),
            _ => None,
        }
    }
}

impl TryFrom<String> for Color {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Color::parse_hex(&value).ok_or_else(|| format!("`{value}` is not a #rgb/#rrggbb/#rrggbbaa color"))
    }
}

impl From<Color> for String {
    fn from(c: Color) -> Self {
        c.to_hex()
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Theme {
    pub name: String,
    pub background: Color,
    pub axis_line: Color,
    pub tick: Color,
    pub axis_label: Color,
    /// Series stroke at rest and for the highlighted series.
    pub line_stroke: Color,
    /// Stroke of every non-highlighted series while hovering.
    pub line_dimmed: Color,
    /// Compositing of series paths at rest, so overlaps build up visually.
    pub line_blend: BlendMode,
    pub line_width: f32,
    pub marker: Color,
    pub marker_label: Color,
    pub error_text: Color,
}

impl Theme {
    pub fn light() -> Self {
        Self {
            name: "light".to_string(),
            background: Color::WHITE,
            axis_line: Color::BLACK,
            tick: Color::BLACK,
            axis_label: Color::BLACK,
            line_stroke: Color::STEELBLUE,
            line_dimmed: Color::from_rgb(0xdd, 0xdd, 0xdd),
            line_blend: BlendMode::Multiply,
            line_width: 1.5,
            marker: Color::BLACK,
            marker_label: Color::BLACK,
            error_text: Color::from_rgb(0xb0, 0x20, 0x20),
        }
    }

    pub fn dark() -> Self {
        Self {
            name: "dark".to_string(),
            background: Color::from_rgb(18, 18, 20),
            axis_line: Color::from_rgb(180, 180, 190),
            tick: Color::from_rgb(150, 150, 160),
            axis_label: Color::from_rgb(235, 235, 245),
            line_stroke: Color::from_rgb(64, 160, 255),
            line_dimmed: Color::from_rgb(60, 60, 66),
            // Multiply would swallow lines on a near-black background.
            line_blend: BlendMode::Screen,
            line_width: 1.5,
            marker: Color::from_rgb(255, 230, 70),
            marker_label: Color::from_rgb(235, 235, 245),
            error_text: Color::from_rgb(220, 80, 80),
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::light()
    }
}

/// Return a list of built-in theme presets.
pub fn presets() -> Vec<Theme> {
    vec![Theme::light(), Theme::dark()]
}

/// Find a preset by its `name`, ignoring ASCII case.
pub fn find(name: &str) -> Option<Theme> {
    presets().into_iter().find(|t| t.name.eq_ignore_ascii_case(name))
}
