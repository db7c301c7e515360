//! The EEC spectrum plot: log-log markers with x/y error bars.

use jc_viz::EecSpectrumArtifact;

use crate::axis::LogAxis;
use crate::canvas::Canvas;
use crate::color::order_color;
use crate::config::RenderConfig;
use crate::layout::{draw_axes, draw_legend, LegendEntry, PlotArea};
use crate::primitives::{LineStyle, MarkerStyle, TextAnchor, TextStyle};
use crate::{RenderError, Result};

/// Render the spectrum artifact to an SVG string.
pub fn render(artifact: &EecSpectrumArtifact, config: &RenderConfig) -> Result<String> {
    let n = artifact.bin_centers.len();
    if n == 0 {
        return Err(RenderError::Artifact("spectrum has no bins".into()));
    }
    for (name, len) in [
        ("values", artifact.values.len()),
        ("errors", artifact.errors.len()),
        ("x_err_lo", artifact.x_err_lo.len()),
        ("x_err_hi", artifact.x_err_hi.len()),
    ] {
        if len != n {
            return Err(RenderError::Artifact(format!(
                "field '{name}' has {len} entries for {n} bins"
            )));
        }
    }
    if artifact.bin_edges.len() != n + 1 {
        return Err(RenderError::Artifact(format!(
            "field 'bin_edges' has {} entries for {n} bins",
            artifact.bin_edges.len()
        )));
    }

    let mut canvas = Canvas::new(config.figure.width, config.figure.height);

    let x_min = artifact.bin_edges[0];
    let x_max = *artifact.bin_edges.last().unwrap();
    let x_axis = LogAxis::new(x_min, x_max).with_label("\u{0394}R");
    let y_axis = LogAxis::new(config.y_range[0], config.y_range[1])
        .with_label("Normalized cross section");

    let area = PlotArea::auto(&canvas, &x_axis, &y_axis, config);

    // Title: correlator order and the cuts that produced the spectrum.
    let title = format!("{}-particle EEC ({})", artifact.order, artifact.cuts.summary());
    let title_style = TextStyle {
        size: config.font.label_size,
        anchor: TextAnchor::Middle,
        ..Default::default()
    };
    canvas.text(area.left + area.width / 2.0, area.top - 8.0, &title, &title_style);

    draw_axes(&mut canvas, &area, &x_axis, &y_axis, config);

    let color = order_color(artifact.order);
    let bar_style = LineStyle::solid(color, 1.0);
    let marker = MarkerStyle { color, size: 1.8 };
    let y_floor = config.y_range[0];

    canvas.push_clip(area.left, area.top, area.width, area.height);
    for i in 0..n {
        let value = artifact.values[i];
        // Zero and negative values have no position on a log axis.
        if value <= 0.0 {
            continue;
        }
        let cx = artifact.bin_centers[i];
        let px = x_axis.data_to_pixel(cx, area.left, area.right());
        let py = y_axis.data_to_pixel(value.max(y_floor), area.bottom(), area.top);

        // Horizontal bar spans the bin.
        let px_lo = x_axis.data_to_pixel(cx - artifact.x_err_lo[i], area.left, area.right());
        let px_hi = x_axis.data_to_pixel(cx + artifact.x_err_hi[i], area.left, area.right());
        canvas.error_bar_h(px_lo, px_hi, py, 3.0, &bar_style);

        // Vertical bar, clamped to the displayed range.
        let err = artifact.errors[i];
        if err > 0.0 {
            let y_lo = (value - err).max(y_floor);
            let y_hi = value + err;
            let py_lo = y_axis.data_to_pixel(y_lo, area.bottom(), area.top);
            let py_hi = y_axis.data_to_pixel(y_hi, area.bottom(), area.top);
            canvas.error_bar(px, py_lo, py_hi, 3.0, &bar_style);
        }

        canvas.marker(px, py, &marker);
    }
    canvas.pop_clip();

    draw_legend(
        &mut canvas,
        &area,
        &[LegendEntry { label: format!("N = {}", artifact.order), color }],
        config.font.size,
    );

    Ok(canvas.finish_svg())
}
