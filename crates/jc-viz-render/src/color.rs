//! RGB colors and the categorical palette used for spectrum series.

use serde::Deserialize;
use std::fmt;

/// An RGB color with alpha.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
    /// Opacity in [0, 1].
    pub a: f64,
}

impl Color {
    /// Opaque color from channels.
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    /// Parse `#rrggbb` (with or without the hash).
    pub fn hex(s: &str) -> Self {
        let s = s.strip_prefix('#').unwrap_or(s);
        let r = u8::from_str_radix(&s[0..2], 16).unwrap_or(0);
        let g = u8::from_str_radix(&s[2..4], 16).unwrap_or(0);
        let b = u8::from_str_radix(&s[4..6], 16).unwrap_or(0);
        Self { r, g, b, a: 1.0 }
    }

    /// Same color with a different alpha.
    pub const fn with_alpha(mut self, a: f64) -> Self {
        self.a = a;
        self
    }

    /// SVG fill/stroke attribute value.
    pub fn to_svg(&self) -> String {
        if (self.a - 1.0).abs() < 1e-6 {
            format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
        } else {
            format!("rgba({},{},{},{:.3})", self.r, self.g, self.b, self.a)
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_svg())
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::rgb(0, 0, 0)
    }
}

impl<'de> Deserialize<'de> for Color {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Ok(Color::hex(&s))
    }
}

/// Series colors, one per correlator order starting at N = 2.
pub const ORDER_PALETTE: &[&str] = &["#1f77b4", "#2ca02c", "#d62728", "#9467bd", "#8c564b"];

/// Color for a correlator order (N = 2 maps to the first entry).
pub fn order_color(order: u32) -> Color {
    let idx = order.saturating_sub(2) as usize % ORDER_PALETTE.len();
    Color::hex(ORDER_PALETTE[idx])
}
