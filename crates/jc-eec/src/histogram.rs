//! Log-binned correlation histogram with flow bins and per-bin errors.

use jc_core::{Error, Result};

/// Bin classification for a correlation value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinIndex {
    /// Below the first edge.
    Underflow,
    /// In-range bin.
    Bin(usize),
    /// At or above the last edge.
    Overflow,
}

/// A 1D histogram over log-uniform bins, tracking sums of weights, sums of
/// squared per-jet contributions, and under/overflow.
#[derive(Debug, Clone, PartialEq)]
pub struct EecHistogram {
    bin_edges: Vec<f64>,
    contents: Vec<f64>,
    sumw2: Vec<f64>,
    underflow: f64,
    overflow: f64,
    underflow_sumw2: f64,
    overflow_sumw2: f64,
    entries: u64,
}

impl EecHistogram {
    /// Create an empty histogram over the given edges (`n_bins + 1` values,
    /// strictly increasing, all positive).
    pub fn new(bin_edges: Vec<f64>) -> Result<Self> {
        if bin_edges.len() < 2 {
            return Err(Error::Validation("histogram needs at least one bin".into()));
        }
        if bin_edges[0] <= 0.0 {
            return Err(Error::Validation("log histogram edges must be positive".into()));
        }
        if bin_edges.windows(2).any(|w| w[1] <= w[0]) {
            return Err(Error::Validation("histogram edges must be strictly increasing".into()));
        }
        let n_bins = bin_edges.len() - 1;
        Ok(Self {
            bin_edges,
            contents: vec![0.0; n_bins],
            sumw2: vec![0.0; n_bins],
            underflow: 0.0,
            overflow: 0.0,
            underflow_sumw2: 0.0,
            overflow_sumw2: 0.0,
            entries: 0,
        })
    }

    /// Number of in-range bins.
    pub fn n_bins(&self) -> usize {
        self.contents.len()
    }

    /// Bin edges (`n_bins + 1` values).
    pub fn bin_edges(&self) -> &[f64] {
        &self.bin_edges
    }

    /// Geometric-mean bin centers.
    pub fn bin_centers(&self) -> Vec<f64> {
        self.bin_edges.windows(2).map(|w| (w[0] * w[1]).sqrt()).collect()
    }

    /// In-range bin contents.
    pub fn contents(&self) -> &[f64] {
        &self.contents
    }

    /// In-range sums of squared per-jet contributions.
    pub fn sumw2(&self) -> &[f64] {
        &self.sumw2
    }

    /// Underflow content.
    pub fn underflow(&self) -> f64 {
        self.underflow
    }

    /// Overflow content.
    pub fn overflow(&self) -> f64 {
        self.overflow
    }

    /// Total number of accumulated weights.
    pub fn entries(&self) -> u64 {
        self.entries
    }

    /// Locate a value on the log-uniform axis.
    ///
    /// The in-range interval is `[edges[0], edges[n])`; the index is
    /// computed directly from the log-uniform spacing.
    pub fn bin_index(&self, value: f64) -> BinIndex {
        let min = self.bin_edges[0];
        let max = *self.bin_edges.last().unwrap();
        if value < min {
            return BinIndex::Underflow;
        }
        if value >= max {
            return BinIndex::Overflow;
        }
        let n = self.n_bins() as f64;
        let frac = (value / min).ln() / (max / min).ln();
        let idx = ((frac * n) as usize).min(self.n_bins() - 1);
        BinIndex::Bin(idx)
    }

    /// Merge a per-jet contribution vector laid out as
    /// `[underflow, bin_0 .. bin_{n-1}, overflow]`.
    ///
    /// Contents accumulate linearly; each bin's squared contribution feeds
    /// sumw2, which is the per-jet error convention: the error on a bin is
    /// the quadrature sum of the individual jets' contributions to it.
    pub fn add_jet_contribution(&mut self, weights: &[f64], n_entries: u64) {
        debug_assert_eq!(weights.len(), self.n_bins() + 2);
        self.underflow += weights[0];
        self.underflow_sumw2 += weights[0] * weights[0];
        self.overflow += weights[weights.len() - 1];
        self.overflow_sumw2 += weights[weights.len() - 1] * weights[weights.len() - 1];
        for (i, &w) in weights[1..weights.len() - 1].iter().enumerate() {
            self.contents[i] += w;
            self.sumw2[i] += w * w;
        }
        self.entries += n_entries;
    }

    /// Add to the entry counter without touching contents.
    pub fn add_entries(&mut self, n: u64) {
        self.entries += n;
    }

    /// Total weight including under/overflow.
    pub fn sum(&self) -> f64 {
        self.contents.iter().sum::<f64>() + self.underflow + self.overflow
    }

    /// Multiply contents and flows by `factor` (sumw2 by `factor²`).
    pub fn scale(&mut self, factor: f64) {
        let f2 = factor * factor;
        for c in &mut self.contents {
            *c *= factor;
        }
        for s in &mut self.sumw2 {
            *s *= f2;
        }
        self.underflow *= factor;
        self.overflow *= factor;
        self.underflow_sumw2 *= f2;
        self.overflow_sumw2 *= f2;
    }

    /// Per-bin error estimates: `sqrt(sumw2)`.
    pub fn errors(&self) -> Vec<f64> {
        self.sumw2.iter().map(|s| s.sqrt()).collect()
    }

    /// Histogram values and errors.
    ///
    /// With `include_flows` the returned vectors gain a leading underflow
    /// and a trailing overflow entry. Reading is idempotent.
    pub fn hist_errs(&self, include_flows: bool) -> (Vec<f64>, Vec<f64>) {
        if include_flows {
            let mut hist = Vec::with_capacity(self.n_bins() + 2);
            hist.push(self.underflow);
            hist.extend_from_slice(&self.contents);
            hist.push(self.overflow);
            let mut errs = Vec::with_capacity(self.n_bins() + 2);
            errs.push(self.underflow_sumw2.sqrt());
            errs.extend(self.sumw2.iter().map(|s| s.sqrt()));
            errs.push(self.overflow_sumw2.sqrt());
            (hist, errs)
        } else {
            (self.contents.clone(), self.errors())
        }
    }
}
