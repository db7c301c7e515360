//! The 2-point longest-side Energy-Energy Correlator.

use std::f64::consts::PI;

use rayon::prelude::*;

use jc_core::{EecConfig, Error, Result};
use jc_data::{JetTensor, FIELDS};

use crate::histogram::{BinIndex, EecHistogram};

/// Jets per parallel work unit. Chunks are merged in order, so the
/// accumulated histogram is independent of the rayon thread count.
const JETS_PER_CHUNK: usize = 64;

/// Accumulates the 2-point EEC over padded jet tensors.
///
/// For every jet, each unordered pair of present particles (pt > 0)
/// contributes weight `2 · pt_i · pt_j` at their angular separation
/// `ΔR = sqrt(Δy² + Δφ²)` (Δφ wrapped to ±π), and each particle's
/// self-pairing contributes `pt_i²` at ΔR = 0, which lands in the
/// underflow of the log axis. A jet's total weight including flows is
/// therefore `(Σ pt)²`.
pub struct LongestSideEec {
    config: EecConfig,
    hist: EecHistogram,
}

impl LongestSideEec {
    /// Create a correlator with the given order and binning.
    pub fn new(config: EecConfig) -> Result<Self> {
        config.validate()?;
        let hist = EecHistogram::new(config.bin_edges())?;
        Ok(Self { config, hist })
    }

    /// The configuration in use.
    pub fn config(&self) -> &EecConfig {
        &self.config
    }

    /// The accumulated histogram.
    pub fn histogram(&self) -> &EecHistogram {
        &self.hist
    }

    /// Accumulate all jets of a tensor into the histogram.
    ///
    /// Blocking; internally parallel over jet chunks. May be called
    /// repeatedly to accumulate several tensors. An empty tensor is a
    /// no-op, leaving a zero histogram.
    pub fn compute(&mut self, jets: &JetTensor) {
        let n_jets = jets.n_jets();
        if n_jets == 0 {
            return;
        }

        let n_slots = self.hist.n_bins() + 2;
        let n_chunks = n_jets.div_ceil(JETS_PER_CHUNK);

        let partials: Vec<(Vec<f64>, u64)> = (0..n_chunks)
            .into_par_iter()
            .map(|chunk| {
                let start = chunk * JETS_PER_CHUNK;
                let end = (start + JETS_PER_CHUNK).min(n_jets);
                let mut acc = ChunkAccumulator::new(n_slots);
                for jet in start..end {
                    acc.fill_jet(&self.hist, jets, jet);
                }
                (acc.weights, acc.entries)
            })
            .collect();

        // Ordered merge keeps floating-point accumulation deterministic.
        for (weights, entries) in &partials {
            for jet_weights in weights.chunks_exact(n_slots) {
                self.hist.add_jet_contribution(jet_weights, 0);
            }
            self.hist.add_entries(*entries);
        }
    }

    /// Total accumulated weight including flow bins.
    pub fn sum(&self) -> f64 {
        self.hist.sum()
    }

    /// Multiply the histogram by `factor`.
    pub fn scale(&mut self, factor: f64) {
        self.hist.scale(factor);
    }

    /// Scale by the reciprocal of the total sum, making the histogram a
    /// normalized measure. Fails when nothing has been accumulated.
    pub fn normalize(&mut self) -> Result<()> {
        let total = self.sum();
        if total == 0.0 {
            return Err(Error::Computation(
                "cannot normalize an empty correlation histogram (sum is zero)".into(),
            ));
        }
        self.scale(1.0 / total);
        Ok(())
    }

    /// Histogram values and error estimates; see
    /// [`EecHistogram::hist_errs`].
    pub fn hist_errs(&self, include_flows: bool) -> (Vec<f64>, Vec<f64>) {
        self.hist.hist_errs(include_flows)
    }
}

/// Per-chunk scratch: one weight vector per jet, concatenated, so the
/// per-jet squared contributions can be folded into sumw2 at merge time.
struct ChunkAccumulator {
    weights: Vec<f64>,
    n_slots: usize,
    entries: u64,
}

impl ChunkAccumulator {
    fn new(n_slots: usize) -> Self {
        Self { weights: Vec::new(), n_slots, entries: 0 }
    }

    fn fill_jet(&mut self, hist: &EecHistogram, jets: &JetTensor, jet: usize) {
        let base = self.weights.len();
        self.weights.resize(base + self.n_slots, 0.0);
        let block = jets.jet(jet);

        // Present particles only: a zero-pt slot is padding or a
        // thresholded constituent and carries no weight either way.
        let present: Vec<&[f64]> = block
            .chunks_exact(FIELDS)
            .filter(|slot| slot[0] > 0.0)
            .collect();

        for (i, a) in present.iter().enumerate() {
            // Self-pairing at ΔR = 0: always underflow on a log axis.
            self.weights[base] += a[0] * a[0];
            self.entries += 1;
            for b in &present[i + 1..] {
                let dr = delta_r(a[1], a[2], b[1], b[2]);
                let w = 2.0 * a[0] * b[0];
                let slot = match hist.bin_index(dr) {
                    BinIndex::Underflow => base,
                    BinIndex::Bin(k) => base + 1 + k,
                    BinIndex::Overflow => base + self.n_slots - 1,
                };
                self.weights[slot] += w;
                self.entries += 1;
            }
        }
    }
}

/// Angular separation in the (rapidity, azimuth) plane, with the azimuthal
/// difference wrapped to [-π, π].
pub fn delta_r(y1: f64, phi1: f64, y2: f64, phi2: f64) -> f64 {
    let dy = y1 - y2;
    let mut dphi = (phi1 - phi2).abs();
    if dphi > PI {
        dphi = 2.0 * PI - dphi;
    }
    (dy * dy + dphi * dphi).sqrt()
}

#[cfg(test)]
mod tests {
    use super::*;
    use jc_data::JetTensor;

    fn two_particle_jet() -> JetTensor {
        // pt 3 at (0, 0) and pt 4 at (0.3, 0.4): ΔR = 0.5.
        JetTensor::from_raw(vec![3.0, 0.0, 0.0, 211.0, 4.0, 0.3, 0.4, -211.0], 1, 2).unwrap()
    }

    #[test]
    fn delta_r_wraps_phi() {
        assert!((delta_r(0.0, 0.1, 0.0, 2.0 * PI - 0.1) - 0.2).abs() < 1e-12);
        assert!((delta_r(0.0, 0.0, 0.3, 0.4) - 0.5).abs() < 1e-12);
        assert_eq!(delta_r(1.0, 2.0, 1.0, 2.0), 0.0);
    }

    #[test]
    fn two_particle_analytic_weights() {
        let mut eec = LongestSideEec::new(EecConfig::default()).unwrap();
        eec.compute(&two_particle_jet());

        let hist = eec.histogram();
        // Diagonals 3² + 4² land in underflow; the pair 2·3·4 in the bin at 0.5.
        assert!((hist.underflow() - 25.0).abs() < 1e-12);
        let (values, errs) = eec.hist_errs(false);
        let filled: Vec<usize> =
            values.iter().enumerate().filter(|(_, &v)| v != 0.0).map(|(i, _)| i).collect();
        assert_eq!(filled.len(), 1);
        let bin = filled[0];
        assert!((values[bin] - 24.0).abs() < 1e-12);
        // Single jet: the error equals the contribution.
        assert!((errs[bin] - 24.0).abs() < 1e-12);
        // ΔR = 0.5 sits inside the bin's edges.
        let edges = hist.bin_edges();
        assert!(edges[bin] <= 0.5 && 0.5 < edges[bin + 1]);
        // Per-jet closure: total including flows is (3 + 4)².
        assert!((eec.sum() - 49.0).abs() < 1e-12);
    }

    #[test]
    fn zero_pt_slots_are_ignored() {
        // Same jet padded to 4 slots; the zeros must not contribute.
        let mut data = vec![3.0, 0.0, 0.0, 211.0, 4.0, 0.3, 0.4, -211.0];
        data.extend_from_slice(&[0.0; 8]);
        let padded = JetTensor::from_raw(data, 1, 4).unwrap();

        let mut a = LongestSideEec::new(EecConfig::default()).unwrap();
        a.compute(&padded);
        let mut b = LongestSideEec::new(EecConfig::default()).unwrap();
        b.compute(&two_particle_jet());
        assert_eq!(a.hist_errs(true), b.hist_errs(true));
        assert_eq!(a.histogram().entries(), b.histogram().entries());
    }

    #[test]
    fn per_jet_weight_closure() {
        // 3 jets with different multiplicities; sum must be Σ_j (Σ pt)².
        let data = vec![
            // jet 0: pts 1, 2, 3 spread in rapidity
            1.0, 0.0, 0.0, 211.0, 2.0, 0.5, 0.0, 22.0, 3.0, 1.0, 0.0, 321.0,
            // jet 1: single particle
            5.0, 0.0, 1.0, 211.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0,
            // jet 2: empty
            0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0,
        ];
        let tensor = JetTensor::from_raw(data, 3, 3).unwrap();
        let mut eec = LongestSideEec::new(EecConfig::default()).unwrap();
        eec.compute(&tensor);
        let expected = (1.0_f64 + 2.0 + 3.0).powi(2) + 25.0;
        assert!((eec.sum() - expected).abs() < 1e-9);
    }

    #[test]
    fn separation_at_axis_max_overflows() {
        // ΔR exactly 1.0 = axis_max goes to overflow under [min, max).
        let tensor =
            JetTensor::from_raw(vec![1.0, 0.0, 0.0, 211.0, 1.0, 1.0, 0.0, 22.0], 1, 2).unwrap();
        let mut eec = LongestSideEec::new(EecConfig::default()).unwrap();
        eec.compute(&tensor);
        assert!((eec.histogram().overflow() - 2.0).abs() < 1e-12);
        let (values, _) = eec.hist_errs(false);
        assert!(values.iter().all(|&v| v == 0.0));
    }

    #[test]
    fn empty_tensor_leaves_zero_histogram() {
        let tensor = JetTensor::from_raw(vec![], 0, 0).unwrap();
        let mut eec = LongestSideEec::new(EecConfig::default()).unwrap();
        eec.compute(&tensor);
        assert_eq!(eec.sum(), 0.0);
        assert!(matches!(eec.normalize(), Err(Error::Computation(_))));
    }

    #[test]
    fn normalize_then_unit_scale_is_idempotent() {
        let mut eec = LongestSideEec::new(EecConfig::default()).unwrap();
        eec.compute(&two_particle_jet());
        eec.normalize().unwrap();
        assert!((eec.sum() - 1.0).abs() < 1e-12);
        let before = eec.hist_errs(true);
        eec.scale(1.0);
        assert_eq!(eec.hist_errs(true), before);
    }

    #[test]
    fn accumulation_is_deterministic() {
        // Enough jets to span several parallel chunks.
        let n_jets = 5 * JETS_PER_CHUNK + 7;
        let mut data = Vec::new();
        for j in 0..n_jets {
            let spread = 0.01 + (j % 97) as f64 * 0.004;
            data.extend_from_slice(&[1.5, 0.0, 0.0, 211.0]);
            data.extend_from_slice(&[2.5, spread, 0.0, 22.0]);
            data.extend_from_slice(&[0.5, 0.0, spread, -211.0]);
        }
        let tensor = JetTensor::from_raw(data, n_jets, 3).unwrap();

        let mut a = LongestSideEec::new(EecConfig::default()).unwrap();
        a.compute(&tensor);
        let mut b = LongestSideEec::new(EecConfig::default()).unwrap();
        b.compute(&tensor);
        assert_eq!(a.hist_errs(true), b.hist_errs(true));
        assert_eq!(a.sum().to_bits(), b.sum().to_bits());
    }

    #[test]
    fn errors_grow_in_quadrature_across_jets() {
        // Two identical jets: contents double, errors scale by sqrt(2).
        let mut one = LongestSideEec::new(EecConfig::default()).unwrap();
        one.compute(&two_particle_jet());
        let mut two = LongestSideEec::new(EecConfig::default()).unwrap();
        two.compute(&two_particle_jet());
        two.compute(&two_particle_jet());

        let (v1, e1) = one.hist_errs(false);
        let (v2, e2) = two.hist_errs(false);
        for i in 0..v1.len() {
            assert!((v2[i] - 2.0 * v1[i]).abs() < 1e-12);
            assert!((e2[i] - 2.0_f64.sqrt() * e1[i]).abs() < 1e-12);
        }
    }
}
