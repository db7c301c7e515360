//! Immediate-mode SVG canvas. Coordinates in points (1pt = 1/72").

use std::fmt::Write as FmtWrite;

use crate::color::Color;
use crate::primitives::{LineStyle, MarkerStyle, Style, TextStyle};

/// Average glyph advance as a fraction of font size, used to approximate
/// text extents without shipping font metrics.
const GLYPH_ASPECT: f64 = 0.56;

/// An SVG canvas that accumulates markup as primitives are drawn.
pub struct Canvas {
    /// Canvas width in points.
    pub width: f64,
    /// Canvas height in points.
    pub height: f64,
    body: String,
    defs: String,
    open_groups: usize,
    next_clip_id: usize,
}

impl Canvas {
    /// Create an empty canvas.
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            body: String::with_capacity(16 * 1024),
            defs: String::new(),
            open_groups: 0,
            next_clip_id: 0,
        }
    }

    /// Straight line.
    pub fn line(&mut self, x1: f64, y1: f64, x2: f64, y2: f64, style: &LineStyle) {
        write!(
            self.body,
            r#"<line x1="{x1:.2}" y1="{y1:.2}" x2="{x2:.2}" y2="{y2:.2}""#
        )
        .unwrap();
        self.write_line_attrs(style);
        self.body.push_str(" />\n");
    }

    /// Open polyline through the given points.
    pub fn polyline(&mut self, points: &[(f64, f64)], style: &LineStyle) {
        if points.len() < 2 {
            return;
        }
        self.body.push_str("<polyline points=\"");
        for (i, (x, y)) in points.iter().enumerate() {
            if i > 0 {
                self.body.push(' ');
            }
            write!(self.body, "{x:.2},{y:.2}").unwrap();
        }
        self.body.push('"');
        self.body.push_str(" fill=\"none\"");
        self.write_line_attrs(style);
        self.body.push_str(" />\n");
    }

    /// Axis-aligned rectangle.
    pub fn rect(&mut self, x: f64, y: f64, w: f64, h: f64, style: &Style) {
        write!(
            self.body,
            r#"<rect x="{x:.2}" y="{y:.2}" width="{w:.2}" height="{h:.2}""#
        )
        .unwrap();
        self.write_style_attrs(style);
        self.body.push_str(" />\n");
    }

    /// Circle.
    pub fn circle(&mut self, cx: f64, cy: f64, r: f64, style: &Style) {
        write!(self.body, r#"<circle cx="{cx:.2}" cy="{cy:.2}" r="{r:.2}""#).unwrap();
        self.write_style_attrs(style);
        self.body.push_str(" />\n");
    }

    /// Text, optionally rotated about its anchor point.
    pub fn text(&mut self, x: f64, y: f64, content: &str, style: &TextStyle) {
        self.text_impl(x, y, content, style, None);
    }

    /// Rotated text (angle in degrees, counterclockwise negative).
    pub fn text_rotated(&mut self, x: f64, y: f64, content: &str, style: &TextStyle, angle: f64) {
        self.text_impl(x, y, content, style, Some(angle));
    }

    fn text_impl(
        &mut self,
        x: f64,
        y: f64,
        content: &str,
        style: &TextStyle,
        rotate: Option<f64>,
    ) {
        write!(self.body, r#"<text x="{x:.2}" y="{y:.2}""#).unwrap();
        write!(
            self.body,
            r#" font-family="Helvetica, Arial, sans-serif" font-size="{:.1}""#,
            style.size
        )
        .unwrap();
        write!(self.body, r#" fill="{}""#, style.color.to_svg()).unwrap();
        write!(self.body, r#" text-anchor="{}""#, style.anchor.as_str()).unwrap();
        write!(self.body, r#" dominant-baseline="{}""#, style.baseline.as_str()).unwrap();
        if let Some(angle) = rotate {
            write!(self.body, r#" transform="rotate({angle:.1},{x:.2},{y:.2})""#).unwrap();
        }
        self.body.push('>');
        for ch in content.chars() {
            match ch {
                '<' => self.body.push_str("&lt;"),
                '>' => self.body.push_str("&gt;"),
                '&' => self.body.push_str("&amp;"),
                '"' => self.body.push_str("&quot;"),
                _ => self.body.push(ch),
            }
        }
        self.body.push_str("</text>\n");
    }

    /// Vertical error bar with horizontal caps.
    pub fn error_bar(&mut self, x: f64, y_lo: f64, y_hi: f64, cap: f64, style: &LineStyle) {
        self.line(x, y_lo, x, y_hi, style);
        if cap > 0.0 {
            let half = cap / 2.0;
            self.line(x - half, y_lo, x + half, y_lo, style);
            self.line(x - half, y_hi, x + half, y_hi, style);
        }
    }

    /// Horizontal error bar with vertical caps.
    pub fn error_bar_h(&mut self, x_lo: f64, x_hi: f64, y: f64, cap: f64, style: &LineStyle) {
        self.line(x_lo, y, x_hi, y, style);
        if cap > 0.0 {
            let half = cap / 2.0;
            self.line(x_lo, y - half, x_lo, y + half, style);
            self.line(x_hi, y - half, x_hi, y + half, style);
        }
    }

    /// Filled circular data marker.
    pub fn marker(&mut self, x: f64, y: f64, marker: &MarkerStyle) {
        let style = Style {
            fill: Some(marker.color),
            stroke: Some(marker.color),
            stroke_width: 0.4,
        };
        self.circle(x, y, marker.size, &style);
    }

    /// Clip subsequent drawing to a rectangle until [`Canvas::pop_clip`].
    pub fn push_clip(&mut self, x: f64, y: f64, w: f64, h: f64) {
        let id = format!("clip{}", self.next_clip_id);
        self.next_clip_id += 1;
        write!(
            self.defs,
            r#"<clipPath id="{id}"><rect x="{x:.2}" y="{y:.2}" width="{w:.2}" height="{h:.2}" /></clipPath>"#
        )
        .unwrap();
        self.defs.push('\n');
        writeln!(self.body, r##"<g clip-path="url(#{id})">"##).unwrap();
        self.open_groups += 1;
    }

    /// Close the innermost clip group.
    pub fn pop_clip(&mut self) {
        if self.open_groups > 0 {
            self.body.push_str("</g>\n");
            self.open_groups -= 1;
        }
    }

    /// Approximate rendered width of `content` at the style's font size.
    pub fn measure_text(&self, content: &str, style: &TextStyle) -> f64 {
        content.chars().count() as f64 * style.size * GLYPH_ASPECT
    }

    /// Assemble the final SVG document.
    pub fn finish_svg(mut self) -> String {
        while self.open_groups > 0 {
            self.pop_clip();
        }
        let mut out = String::with_capacity(self.body.len() + 512);
        writeln!(
            out,
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}">"#,
            w = self.width,
            h = self.height,
        )
        .unwrap();
        if !self.defs.is_empty() {
            out.push_str("<defs>\n");
            out.push_str(&self.defs);
            out.push_str("</defs>\n");
        }
        writeln!(out, r#"<rect width="{}" height="{}" fill="white" />"#, self.width, self.height)
            .unwrap();
        out.push_str(&self.body);
        out.push_str("</svg>\n");
        out
    }

    fn write_style_attrs(&mut self, style: &Style) {
        match &style.fill {
            Some(fill) => write!(self.body, r#" fill="{}""#, fill.to_svg()).unwrap(),
            None => self.body.push_str(r#" fill="none""#),
        }
        if let Some(stroke) = &style.stroke {
            write!(self.body, r#" stroke="{}""#, stroke.to_svg()).unwrap();
            write!(self.body, r#" stroke-width="{:.2}""#, style.stroke_width).unwrap();
        }
    }

    fn write_line_attrs(&mut self, style: &LineStyle) {
        write!(self.body, r#" stroke="{}""#, style.color.to_svg()).unwrap();
        write!(self.body, r#" stroke-width="{:.2}""#, style.width).unwrap();
        if let Some(dash) = &style.dash {
            write!(self.body, r#" stroke-dasharray="{dash}""#).unwrap();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_canvas() {
        let svg = Canvas::new(100.0, 50.0).finish_svg();
        assert!(svg.contains("width=\"100\""));
        assert!(svg.contains("height=\"50\""));
        assert!(svg.contains("</svg>"));
    }

    #[test]
    fn rect_rendering() {
        let mut c = Canvas::new(200.0, 100.0);
        c.rect(10.0, 20.0, 50.0, 30.0, &Style::filled(Color::hex("#ff0000")));
        let svg = c.finish_svg();
        assert!(svg.contains(r##"fill="#ff0000""##));
        assert!(svg.contains("width=\"50.00\""));
    }

    #[test]
    fn text_is_escaped() {
        let mut c = Canvas::new(200.0, 100.0);
        c.text(10.0, 20.0, "a < b & c", &TextStyle::default());
        let svg = c.finish_svg();
        assert!(svg.contains("a &lt; b &amp; c"));
    }

    #[test]
    fn clip_groups_balance() {
        let mut c = Canvas::new(200.0, 100.0);
        c.push_clip(0.0, 0.0, 100.0, 100.0);
        c.line(0.0, 0.0, 10.0, 10.0, &LineStyle::solid(Color::rgb(0, 0, 0), 1.0));
        // finish_svg closes the group even without an explicit pop.
        let svg = c.finish_svg();
        assert_eq!(svg.matches("<g ").count(), svg.matches("</g>").count());
        assert!(svg.contains("clipPath"));
    }

    #[test]
    fn error_bar_draws_caps() {
        let mut c = Canvas::new(100.0, 100.0);
        c.error_bar(50.0, 10.0, 90.0, 4.0, &LineStyle::solid(Color::rgb(0, 0, 0), 1.0));
        let svg = c.finish_svg();
        assert_eq!(svg.matches("<line").count(), 3);
    }

    #[test]
    fn measure_scales_with_length_and_size() {
        let c = Canvas::new(100.0, 100.0);
        let s = TextStyle { size: 10.0, ..Default::default() };
        assert!(c.measure_text("wide text", &s) > c.measure_text("x", &s));
        let big = TextStyle { size: 20.0, ..Default::default() };
        assert!(c.measure_text("x", &big) > c.measure_text("x", &s));
    }
}
