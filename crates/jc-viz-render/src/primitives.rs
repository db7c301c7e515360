//! Drawing styles shared by the canvas and the plot code.

use crate::color::Color;

/// Fill + stroke style for shapes.
#[derive(Debug, Clone, Default)]
pub struct Style {
    /// Fill color, `None` for unfilled.
    pub fill: Option<Color>,
    /// Stroke color, `None` for unstroked.
    pub stroke: Option<Color>,
    /// Stroke width in points.
    pub stroke_width: f64,
}

impl Style {
    /// Filled, unstroked.
    pub fn filled(color: Color) -> Self {
        Self { fill: Some(color), stroke: None, stroke_width: 0.0 }
    }

    /// Stroked, unfilled.
    pub fn stroked(color: Color, width: f64) -> Self {
        Self { fill: None, stroke: Some(color), stroke_width: width }
    }
}

/// Line style.
#[derive(Debug, Clone)]
pub struct LineStyle {
    /// Stroke color.
    pub color: Color,
    /// Stroke width in points.
    pub width: f64,
    /// SVG dash pattern, `None` for solid.
    pub dash: Option<String>,
}

impl LineStyle {
    /// Solid line.
    pub fn solid(color: Color, width: f64) -> Self {
        Self { color, width, dash: None }
    }

    /// Dashed line.
    pub fn dashed(color: Color, width: f64) -> Self {
        Self { color, width, dash: Some("4 3".into()) }
    }
}

/// Horizontal text anchoring.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextAnchor {
    /// Anchor at the start of the text.
    #[default]
    Start,
    /// Anchor at the middle.
    Middle,
    /// Anchor at the end.
    End,
}

impl TextAnchor {
    /// SVG attribute value.
    pub fn as_str(&self) -> &str {
        match self {
            TextAnchor::Start => "start",
            TextAnchor::Middle => "middle",
            TextAnchor::End => "end",
        }
    }
}

/// Vertical text baseline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextBaseline {
    /// Default alphabetic baseline.
    #[default]
    Alphabetic,
    /// Vertically centered.
    Central,
    /// Hanging from the given y.
    Hanging,
}

impl TextBaseline {
    /// SVG attribute value.
    pub fn as_str(&self) -> &str {
        match self {
            TextBaseline::Alphabetic => "auto",
            TextBaseline::Central => "central",
            TextBaseline::Hanging => "hanging",
        }
    }
}

/// Text style.
#[derive(Debug, Clone)]
pub struct TextStyle {
    /// Font size in points.
    pub size: f64,
    /// Text color.
    pub color: Color,
    /// Horizontal anchor.
    pub anchor: TextAnchor,
    /// Vertical baseline.
    pub baseline: TextBaseline,
}

impl Default for TextStyle {
    fn default() -> Self {
        Self {
            size: 10.0,
            color: Color::rgb(0, 0, 0),
            anchor: TextAnchor::Start,
            baseline: TextBaseline::Alphabetic,
        }
    }
}

/// Marker style for data points.
#[derive(Debug, Clone)]
pub struct MarkerStyle {
    /// Radius in points.
    pub size: f64,
    /// Marker color.
    pub color: Color,
}

impl Default for MarkerStyle {
    fn default() -> Self {
        Self { size: 2.0, color: Color::rgb(0, 0, 0) }
    }
}
