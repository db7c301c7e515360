//! Plot area margins, frame/tick drawing, and the legend.

use crate::axis::LogAxis;
use crate::canvas::Canvas;
use crate::color::Color;
use crate::config::RenderConfig;
use crate::primitives::{LineStyle, MarkerStyle, Style, TextAnchor, TextBaseline, TextStyle};

/// Rectangular plot area within the canvas.
#[derive(Debug, Clone, Copy)]
pub struct PlotArea {
    /// Left edge.
    pub left: f64,
    /// Top edge.
    pub top: f64,
    /// Width.
    pub width: f64,
    /// Height.
    pub height: f64,
}

impl PlotArea {
    /// Right edge.
    pub fn right(&self) -> f64 {
        self.left + self.width
    }

    /// Bottom edge.
    pub fn bottom(&self) -> f64 {
        self.top + self.height
    }

    /// Compute margins from the axis tick labels and the config.
    pub fn auto(canvas: &Canvas, x_axis: &LogAxis, y_axis: &LogAxis, config: &RenderConfig) -> Self {
        let tick_style = TextStyle { size: config.font.tick_size, ..Default::default() };

        let max_tick_w = y_axis
            .tick_labels
            .iter()
            .map(|l| canvas.measure_text(l, &tick_style))
            .fold(0.0_f64, f64::max);
        let mut left = 14.0 + max_tick_w + 8.0;
        if !y_axis.label.is_empty() {
            left += config.font.label_size + 6.0;
        }

        let mut bottom = 14.0 + config.font.tick_size + 6.0;
        if !x_axis.label.is_empty() {
            bottom += config.font.label_size + 6.0;
        }

        // Room for the title line.
        let top = config.font.label_size * 1.4 + 14.0;
        let right = 14.0;

        let width = (canvas.width - left - right).max(50.0);
        let height = (canvas.height - top - bottom).max(50.0);
        Self { left, top, width, height }
    }
}

/// Draw the boxed frame, major/minor ticks (inward), grid and axis labels.
pub fn draw_axes(
    canvas: &mut Canvas,
    area: &PlotArea,
    x_axis: &LogAxis,
    y_axis: &LogAxis,
    config: &RenderConfig,
) {
    let frame_color = Color::rgb(0, 0, 0);
    let frame = LineStyle::solid(frame_color, 0.8);
    let tick = LineStyle::solid(frame_color, 0.6);
    let minor = LineStyle::solid(frame_color, 0.4);
    let tl = config.axes.tick_length;
    let mtl = config.axes.minor_tick_length;

    canvas.line(area.left, area.top, area.right(), area.top, &frame);
    canvas.line(area.left, area.bottom(), area.right(), area.bottom(), &frame);
    canvas.line(area.left, area.top, area.left, area.bottom(), &frame);
    canvas.line(area.right(), area.top, area.right(), area.bottom(), &frame);

    let grid = LineStyle {
        color: config.grid_color.with_alpha(0.55),
        width: 0.5,
        dash: Some("3 3".into()),
    };

    // X ticks.
    let x_label_style = TextStyle {
        size: config.font.tick_size,
        anchor: TextAnchor::Middle,
        baseline: TextBaseline::Hanging,
        ..Default::default()
    };
    for (i, &val) in x_axis.tick_positions.iter().enumerate() {
        let px = x_axis.data_to_pixel(val, area.left, area.right());
        if config.show_grid {
            canvas.line(px, area.top, px, area.bottom(), &grid);
        }
        canvas.line(px, area.bottom(), px, area.bottom() - tl, &tick);
        canvas.line(px, area.top, px, area.top + tl, &tick);
        canvas.text(px, area.bottom() + 3.0, &x_axis.tick_labels[i], &x_label_style);
    }
    for &val in &x_axis.minor_ticks {
        let px = x_axis.data_to_pixel(val, area.left, area.right());
        canvas.line(px, area.bottom(), px, area.bottom() - mtl, &minor);
        canvas.line(px, area.top, px, area.top + mtl, &minor);
    }

    // Y ticks.
    let y_label_style = TextStyle {
        size: config.font.tick_size,
        anchor: TextAnchor::End,
        baseline: TextBaseline::Central,
        ..Default::default()
    };
    for (i, &val) in y_axis.tick_positions.iter().enumerate() {
        let py = y_axis.data_to_pixel(val, area.bottom(), area.top);
        if config.show_grid {
            canvas.line(area.left, py, area.right(), py, &grid);
        }
        canvas.line(area.left, py, area.left + tl, py, &tick);
        canvas.line(area.right(), py, area.right() - tl, py, &tick);
        canvas.text(area.left - 4.0, py, &y_axis.tick_labels[i], &y_label_style);
    }
    for &val in &y_axis.minor_ticks {
        let py = y_axis.data_to_pixel(val, area.bottom(), area.top);
        canvas.line(area.left, py, area.left + mtl, py, &minor);
        canvas.line(area.right(), py, area.right() - mtl, py, &minor);
    }

    // Axis labels.
    let label_style = TextStyle {
        size: config.font.label_size,
        anchor: TextAnchor::Middle,
        ..Default::default()
    };
    if !x_axis.label.is_empty() {
        let y = area.bottom() + config.font.tick_size + 16.0;
        canvas.text(area.left + area.width / 2.0, y, &x_axis.label, &label_style);
    }
    if !y_axis.label.is_empty() {
        let x = area.left - 38.0;
        let y = area.top + area.height / 2.0;
        canvas.text_rotated(x, y, &y_axis.label, &label_style, -90.0);
    }
}

/// One legend row.
pub struct LegendEntry {
    /// Row label.
    pub label: String,
    /// Swatch color.
    pub color: Color,
}

/// Draw a marker legend anchored to the top-right of the plot area.
pub fn draw_legend(canvas: &mut Canvas, area: &PlotArea, entries: &[LegendEntry], font_size: f64) {
    if entries.is_empty() {
        return;
    }
    let row_height = font_size + 4.0;
    let swatch_w = 14.0;
    let gap = 6.0;
    let padding = 6.0;

    let text_style = TextStyle {
        size: font_size * 0.85,
        baseline: TextBaseline::Central,
        ..Default::default()
    };
    let max_w = entries
        .iter()
        .map(|e| canvas.measure_text(&e.label, &text_style))
        .fold(0.0_f64, f64::max);

    let legend_w = padding + swatch_w + gap + max_w + padding;
    let legend_h = padding + entries.len() as f64 * row_height + padding;
    let lx = area.right() - legend_w - 5.0;
    let ly = area.top + 5.0;

    canvas.rect(
        lx,
        ly,
        legend_w,
        legend_h,
        &Style { fill: Some(Color::rgb(255, 255, 255).with_alpha(0.9)), stroke: None,
            stroke_width: 0.0 },
    );

    for (i, entry) in entries.iter().enumerate() {
        let ey = ly + padding + i as f64 * row_height + row_height / 2.0;
        let sx = lx + padding;
        canvas.marker(
            sx + swatch_w / 2.0,
            ey,
            &MarkerStyle { color: entry.color, size: 2.5 },
        );
        canvas.text(sx + swatch_w + gap, ey, &entry.label, &text_style);
    }
}
