//! Analysis configuration: kinematic cuts and correlator binning.
//!
//! Defaults reproduce the standard 100–120 GeV jet window with a 1 GeV
//! constituent threshold and a 100-bin log axis over (1e-5, 1).

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{Error, Result};

/// Kinematic selection windows. Jet windows are open intervals (strict
/// inequalities on both sides); the particle threshold is strict as well.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct JetCuts {
    /// Lower jet transverse-momentum bound (GeV), exclusive.
    pub min_jet_pt: f64,
    /// Upper jet transverse-momentum bound (GeV), exclusive.
    pub max_jet_pt: f64,
    /// Constituent transverse-momentum threshold (GeV); a particle is kept
    /// only if its pt is strictly above this value.
    pub min_particle_pt: f64,
    /// Lower jet pseudorapidity bound, exclusive.
    pub min_jet_eta: f64,
    /// Upper jet pseudorapidity bound, exclusive.
    pub max_jet_eta: f64,
}

impl Default for JetCuts {
    fn default() -> Self {
        Self {
            min_jet_pt: 100.0,
            max_jet_pt: 120.0,
            min_particle_pt: 1.0,
            min_jet_eta: -2.0,
            max_jet_eta: 2.0,
        }
    }
}

impl JetCuts {
    /// Check the windows are well-formed (lower bound below upper bound,
    /// all values finite).
    pub fn validate(&self) -> Result<()> {
        for (name, v) in [
            ("min_jet_pt", self.min_jet_pt),
            ("max_jet_pt", self.max_jet_pt),
            ("min_particle_pt", self.min_particle_pt),
            ("min_jet_eta", self.min_jet_eta),
            ("max_jet_eta", self.max_jet_eta),
        ] {
            if !v.is_finite() {
                return Err(Error::Validation(format!("cut '{name}' must be finite, got {v}")));
            }
        }
        if self.min_jet_pt >= self.max_jet_pt {
            return Err(Error::Validation(format!(
                "jet pt window is empty: ({}, {})",
                self.min_jet_pt, self.max_jet_pt
            )));
        }
        if self.min_jet_eta >= self.max_jet_eta {
            return Err(Error::Validation(format!(
                "jet eta window is empty: ({}, {})",
                self.min_jet_eta, self.max_jet_eta
            )));
        }
        Ok(())
    }

    /// Open-interval window test for one jet.
    pub fn keep_jet(&self, jet_pt: f64, jet_eta: f64) -> bool {
        jet_pt > self.min_jet_pt
            && jet_pt < self.max_jet_pt
            && jet_eta > self.min_jet_eta
            && jet_eta < self.max_jet_eta
    }

    /// One-line human summary, used in error messages and plot titles.
    pub fn summary(&self) -> String {
        format!(
            "jet_pt: {} - {}, particle_pt > {}, jet_eta: {} to {}",
            self.min_jet_pt, self.max_jet_pt, self.min_particle_pt, self.min_jet_eta,
            self.max_jet_eta
        )
    }
}

/// Correlator order and histogram axis.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EecConfig {
    /// Correlator order N (number of particles per correlation).
    pub order: u32,
    /// Number of histogram bins.
    pub n_bins: usize,
    /// Lower edge of the log-spaced axis (exclusive of zero).
    pub axis_min: f64,
    /// Upper edge of the log-spaced axis.
    pub axis_max: f64,
}

impl Default for EecConfig {
    fn default() -> Self {
        Self { order: 2, n_bins: 100, axis_min: 1e-5, axis_max: 1.0 }
    }
}

impl EecConfig {
    /// Check the binning is usable for a log axis.
    pub fn validate(&self) -> Result<()> {
        if self.order != 2 {
            return Err(Error::NotImplemented(format!(
                "correlator order {} (only the 2-point correlator is available)",
                self.order
            )));
        }
        if self.n_bins == 0 {
            return Err(Error::Validation("n_bins must be at least 1".into()));
        }
        if !(self.axis_min.is_finite() && self.axis_max.is_finite()) {
            return Err(Error::Validation("axis range must be finite".into()));
        }
        if self.axis_min <= 0.0 || self.axis_min >= self.axis_max {
            return Err(Error::Validation(format!(
                "log axis requires 0 < axis_min < axis_max, got ({}, {})",
                self.axis_min, self.axis_max
            )));
        }
        Ok(())
    }

    /// Log-uniform bin edges, length `n_bins + 1`.
    pub fn bin_edges(&self) -> Vec<f64> {
        let ratio = self.axis_max / self.axis_min;
        (0..=self.n_bins)
            .map(|k| self.axis_min * ratio.powf(k as f64 / self.n_bins as f64))
            .collect()
    }

    /// Geometric-mean bin centers, length `n_bins`.
    pub fn bin_centers(&self) -> Vec<f64> {
        let edges = self.bin_edges();
        edges.windows(2).map(|w| (w[0] * w[1]).sqrt()).collect()
    }
}

/// Full analysis configuration, JSON-loadable.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Kinematic selection.
    pub cuts: JetCuts,
    /// Correlator configuration.
    pub eec: EecConfig,
}

impl AnalysisConfig {
    /// Load a configuration from a JSON file.
    pub fn from_path(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        let config: AnalysisConfig = serde_json::from_str(&text)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate both sections.
    pub fn validate(&self) -> Result<()> {
        self.cuts.validate()?;
        self.eec.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_cuts_match_reference_analysis() {
        let cuts = JetCuts::default();
        assert_eq!(cuts.min_jet_pt, 100.0);
        assert_eq!(cuts.max_jet_pt, 120.0);
        assert_eq!(cuts.min_particle_pt, 1.0);
        assert_eq!(cuts.min_jet_eta, -2.0);
        assert_eq!(cuts.max_jet_eta, 2.0);
        assert!(cuts.validate().is_ok());
    }

    #[test]
    fn keep_jet_is_strict_on_every_boundary() {
        let cuts = JetCuts::default();
        assert!(cuts.keep_jet(110.0, 0.0));
        // Boundary values are excluded on all four edges.
        assert!(!cuts.keep_jet(100.0, 0.0));
        assert!(!cuts.keep_jet(120.0, 0.0));
        assert!(!cuts.keep_jet(110.0, -2.0));
        assert!(!cuts.keep_jet(110.0, 2.0));
    }

    #[test]
    fn empty_window_rejected() {
        let cuts = JetCuts { min_jet_pt: 120.0, max_jet_pt: 100.0, ..Default::default() };
        assert!(cuts.validate().is_err());
    }

    #[test]
    fn log_edges_span_axis() {
        let eec = EecConfig::default();
        let edges = eec.bin_edges();
        assert_eq!(edges.len(), 101);
        assert!((edges[0] - 1e-5).abs() < 1e-18);
        assert!((edges[100] - 1.0).abs() < 1e-12);
        // Log-uniform: constant ratio between consecutive edges.
        let r0 = edges[1] / edges[0];
        let r50 = edges[51] / edges[50];
        assert!((r0 - r50).abs() < 1e-9);
    }

    #[test]
    fn centers_are_geometric_means() {
        let eec = EecConfig { n_bins: 4, axis_min: 1e-2, axis_max: 1.0, ..Default::default() };
        let edges = eec.bin_edges();
        let centers = eec.bin_centers();
        assert_eq!(centers.len(), 4);
        for (i, c) in centers.iter().enumerate() {
            assert!(*c > edges[i] && *c < edges[i + 1]);
        }
    }

    #[test]
    fn higher_orders_not_implemented() {
        let eec = EecConfig { order: 3, ..Default::default() };
        assert!(matches!(eec.validate(), Err(Error::NotImplemented(_))));
    }

    #[test]
    fn config_json_roundtrip() {
        let config = AnalysisConfig::default();
        let text = serde_json::to_string(&config).unwrap();
        let back: AnalysisConfig = serde_json::from_str(&text).unwrap();
        assert_eq!(back, config);
    }

    #[test]
    fn partial_json_uses_defaults() {
        let config: AnalysisConfig =
            serde_json::from_str(r#"{"cuts": {"min_jet_pt": 80.0}}"#).unwrap();
        assert_eq!(config.cuts.min_jet_pt, 80.0);
        assert_eq!(config.cuts.max_jet_pt, 120.0);
        assert_eq!(config.eec.n_bins, 100);
    }
}
