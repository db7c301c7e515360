//! Rendering configuration.

use serde::Deserialize;

use crate::color::Color;

/// Top-level render configuration (programmatic or JSON).
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Figure size.
    pub figure: FigureConfig,
    /// Font sizes.
    pub font: FontConfig,
    /// Tick geometry.
    pub axes: AxesConfig,
    /// Y-axis display range; values below the lower bound are clamped.
    pub y_range: [f64; 2],
    /// Grid line color.
    pub grid_color: Color,
    /// Draw grid lines at major ticks.
    pub show_grid: bool,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            figure: FigureConfig::default(),
            font: FontConfig::default(),
            axes: AxesConfig::default(),
            y_range: [1e-7, 1.0],
            grid_color: Color::hex("#CBD5E1"),
            show_grid: true,
        }
    }
}

/// Figure size in points (1pt = 1/72").
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct FigureConfig {
    /// Width.
    pub width: f64,
    /// Height.
    pub height: f64,
}

impl Default for FigureConfig {
    fn default() -> Self {
        Self {
            width: 460.8,  // 6.4" * 72
            height: 345.6, // 4.8" * 72
        }
    }
}

/// Font sizes in points.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct FontConfig {
    /// Legend and general text.
    pub size: f64,
    /// Axis labels and title.
    pub label_size: f64,
    /// Tick labels.
    pub tick_size: f64,
}

impl Default for FontConfig {
    fn default() -> Self {
        Self { size: 10.0, label_size: 11.0, tick_size: 8.5 }
    }
}

/// Tick geometry.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AxesConfig {
    /// Major tick length.
    pub tick_length: f64,
    /// Minor tick length.
    pub minor_tick_length: f64,
}

impl Default for AxesConfig {
    fn default() -> Self {
        Self { tick_length: 5.0, minor_tick_length: 3.0 }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_reference_plot() {
        let c = RenderConfig::default();
        assert_eq!(c.y_range, [1e-7, 1.0]);
        assert!(c.show_grid);
    }

    #[test]
    fn partial_json_overrides() {
        let c: RenderConfig =
            serde_json::from_str(r#"{"figure": {"width": 600.0}, "show_grid": false}"#).unwrap();
        assert_eq!(c.figure.width, 600.0);
        assert_eq!(c.figure.height, FigureConfig::default().height);
        assert!(!c.show_grid);
    }
}
