//! Logarithmic axis: decade ticks and data→pixel mapping.

/// A log axis over a fixed positive range.
#[derive(Debug, Clone)]
pub struct LogAxis {
    /// Lower bound (> 0).
    pub min: f64,
    /// Upper bound.
    pub max: f64,
    /// Axis label.
    pub label: String,
    /// Major tick positions (powers of ten inside the range).
    pub tick_positions: Vec<f64>,
    /// Major tick labels (`10ⁿ`).
    pub tick_labels: Vec<String>,
    /// Minor tick positions (2..9 per decade, inside the range).
    pub minor_ticks: Vec<f64>,
}

impl LogAxis {
    /// Build an axis over `[min, max]` with decade ticks.
    pub fn new(min: f64, max: f64) -> Self {
        let min = min.max(1e-300);
        let max = max.max(min * 10.0);
        // Epsilon guards keep exact powers of ten on the tick list despite
        // log10 rounding.
        let exp_lo = (min.log10() - 1e-9).ceil() as i32;
        let exp_hi = (max.log10() + 1e-9).floor() as i32;

        let mut ticks = Vec::new();
        let mut labels = Vec::new();
        for exp in exp_lo..=exp_hi {
            ticks.push(10.0_f64.powi(exp));
            labels.push(format!("10{}", superscript(exp)));
        }

        let mut minor = Vec::new();
        for exp in (exp_lo - 1)..=exp_hi {
            for m in 2..=9 {
                let v = m as f64 * 10.0_f64.powi(exp);
                if v > min && v < max {
                    minor.push(v);
                }
            }
        }

        Self { min, max, label: String::new(), tick_positions: ticks, tick_labels: labels,
            minor_ticks: minor }
    }

    /// Attach an axis label.
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    /// Map a data value to a pixel coordinate between `px_min` and `px_max`.
    pub fn data_to_pixel(&self, value: f64, px_min: f64, px_max: f64) -> f64 {
        let v = value.max(self.min * 1e-3);
        let frac = (v / self.min).ln() / (self.max / self.min).ln();
        px_min + frac * (px_max - px_min)
    }
}

fn superscript(n: i32) -> String {
    n.to_string()
        .chars()
        .map(|c| match c {
            '-' => '\u{207B}',
            '0' => '\u{2070}',
            '1' => '\u{00B9}',
            '2' => '\u{00B2}',
            '3' => '\u{00B3}',
            '4' => '\u{2074}',
            '5' => '\u{2075}',
            '6' => '\u{2076}',
            '7' => '\u{2077}',
            '8' => '\u{2078}',
            '9' => '\u{2079}',
            _ => c,
        })
        .collect()
}
