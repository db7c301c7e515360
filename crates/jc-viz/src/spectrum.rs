//! Plot-friendly artifact for the normalized EEC spectrum.

use serde::{Deserialize, Serialize};

use jc_core::{Error, JetCuts, Result};
use jc_eec::EecHistogram;

/// Plot-ready EEC spectrum: per-log-bin-width normalized values with
/// symmetric y errors and asymmetric x errors around the geometric bin
/// centers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EecSpectrumArtifact {
    /// Correlator order N.
    pub order: u32,
    /// Bin edges (length `n_bins + 1`).
    pub bin_edges: Vec<f64>,
    /// Geometric-mean bin centers (length `n_bins`).
    pub bin_centers: Vec<f64>,
    /// Histogram values divided by the log bin width.
    pub values: Vec<f64>,
    /// Error estimates divided by the log bin width.
    pub errors: Vec<f64>,
    /// Left x-error half-widths (`center - low_edge`).
    pub x_err_lo: Vec<f64>,
    /// Right x-error half-widths (`high_edge - center`).
    pub x_err_hi: Vec<f64>,
    /// Kinematic selection that produced the spectrum.
    pub cuts: JetCuts,
    /// Number of jets read from the input.
    pub n_jets_total: usize,
    /// Number of jets passing the selection.
    pub n_jets_selected: usize,
}

impl EecSpectrumArtifact {
    /// Build the artifact from a (typically already normalized) histogram.
    ///
    /// Values and errors are divided by each bin's logarithmic width
    /// `ln(hi) - ln(lo)`, the differential form conventionally drawn on a
    /// log-log axis. Flow bins are not part of the spectrum.
    pub fn from_histogram(
        hist: &EecHistogram,
        order: u32,
        cuts: JetCuts,
        n_jets_total: usize,
        n_jets_selected: usize,
    ) -> Result<Self> {
        let edges = hist.bin_edges();
        let centers = hist.bin_centers();
        let (raw_values, raw_errors) = hist.hist_errs(false);

        let mut values = Vec::with_capacity(raw_values.len());
        let mut errors = Vec::with_capacity(raw_errors.len());
        let mut x_err_lo = Vec::with_capacity(centers.len());
        let mut x_err_hi = Vec::with_capacity(centers.len());
        for i in 0..raw_values.len() {
            let width = edges[i + 1].ln() - edges[i].ln();
            if width <= 0.0 || !width.is_finite() {
                return Err(Error::Computation(format!(
                    "degenerate log bin width at bin {i}: edges ({}, {})",
                    edges[i],
                    edges[i + 1]
                )));
            }
            values.push(raw_values[i] / width);
            errors.push(raw_errors[i] / width);
            x_err_lo.push(centers[i] - edges[i]);
            x_err_hi.push(edges[i + 1] - centers[i]);
        }

        Ok(Self {
            order,
            bin_edges: edges.to_vec(),
            bin_centers: centers,
            values,
            errors,
            x_err_lo,
            x_err_hi,
            cuts,
            n_jets_total,
            n_jets_selected,
        })
    }
}
