//! Seeded toy jet generator for demos and integration tests.

use std::f64::consts::PI;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::jagged::JaggedCol;
use crate::store::JetStore;

/// Particle-type codes sampled by the generator (charged pions, photons,
/// kaons, protons).
const PDG_CODES: [f64; 6] = [211.0, -211.0, 22.0, 321.0, -321.0, 2212.0];

/// Toy generator configuration.
#[derive(Debug, Clone, Copy)]
pub struct ToyConfig {
    /// Number of jets to generate.
    pub n_jets: usize,
    /// RNG seed; equal seeds produce equal stores.
    pub seed: u64,
}

impl Default for ToyConfig {
    fn default() -> Self {
        Self { n_jets: 500, seed: 42 }
    }
}

/// Generate a deterministic toy [`JetStore`].
///
/// Jet pt is uniform in 80–140 GeV and eta uniform in ±2.5, so a default
/// 100–120 GeV, |eta| < 2 selection keeps a healthy fraction. Constituents
/// share the jet pt through random fractions and are collimated around a
/// common jet axis in (rapidity, phi).
pub fn generate_toy_jets(config: ToyConfig) -> JetStore {
    let mut rng = StdRng::seed_from_u64(config.seed);

    let mut const_pt = Vec::with_capacity(config.n_jets);
    let mut const_rap = Vec::with_capacity(config.n_jets);
    let mut const_phi = Vec::with_capacity(config.n_jets);
    let mut const_pdg = Vec::with_capacity(config.n_jets);
    let mut jet_pt = Vec::with_capacity(config.n_jets);
    let mut jet_eta = Vec::with_capacity(config.n_jets);

    for _ in 0..config.n_jets {
        let pt: f64 = rng.gen_range(80.0..140.0);
        let eta: f64 = rng.gen_range(-2.5..2.5);
        let axis_phi: f64 = rng.gen_range(0.0..2.0 * PI);
        let n_const: usize = rng.gen_range(2..=40);

        // Random pt fractions summing to ~90% of the jet pt.
        let mut fractions: Vec<f64> = (0..n_const).map(|_| rng.gen_range(0.05..1.0)).collect();
        let total: f64 = fractions.iter().sum();
        for f in &mut fractions {
            *f *= 0.9 * pt / total;
        }

        let mut pts = Vec::with_capacity(n_const);
        let mut raps = Vec::with_capacity(n_const);
        let mut phis = Vec::with_capacity(n_const);
        let mut pdgs = Vec::with_capacity(n_const);
        for f in fractions {
            pts.push(f);
            raps.push(eta + rng.gen_range(-0.4..0.4));
            let mut p = axis_phi + rng.gen_range(-0.4..0.4);
            if p < 0.0 {
                p += 2.0 * PI;
            } else if p >= 2.0 * PI {
                p -= 2.0 * PI;
            }
            phis.push(p);
            pdgs.push(PDG_CODES[rng.gen_range(0..PDG_CODES.len())]);
        }

        const_pt.push(pts);
        const_rap.push(raps);
        const_phi.push(phis);
        const_pdg.push(pdgs);
        jet_pt.push(pt);
        jet_eta.push(eta);
    }

    // Columns are parallel by construction; new() cannot fail here.
    JetStore::new(
        JaggedCol::from_nested(&const_pt),
        JaggedCol::from_nested(&const_rap),
        JaggedCol::from_nested(&const_phi),
        JaggedCol::from_nested(&const_pdg),
        jet_pt,
        jet_eta,
    )
    .expect("toy columns are parallel by construction")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_seed_same_store() {
        let a = generate_toy_jets(ToyConfig { n_jets: 50, seed: 7 });
        let b = generate_toy_jets(ToyConfig { n_jets: 50, seed: 7 });
        assert_eq!(a, b);
    }

    #[test]
    fn different_seed_different_store() {
        let a = generate_toy_jets(ToyConfig { n_jets: 50, seed: 7 });
        let b = generate_toy_jets(ToyConfig { n_jets: 50, seed: 8 });
        assert_ne!(a, b);
    }

    #[test]
    fn kinematics_in_expected_ranges() {
        let store = generate_toy_jets(ToyConfig { n_jets: 200, seed: 1 });
        assert_eq!(store.n_jets(), 200);
        for (&pt, &eta) in store.jet_pt().iter().zip(store.jet_eta()) {
            assert!((80.0..140.0).contains(&pt));
            assert!((-2.5..2.5).contains(&eta));
        }
        for entry in store.phi().entries() {
            for &p in entry {
                assert!((0.0..2.0 * PI).contains(&p));
            }
        }
        // Some jets must fall inside the default selection window.
        let in_window = store
            .jet_pt()
            .iter()
            .zip(store.jet_eta())
            .filter(|(&pt, &eta)| pt > 100.0 && pt < 120.0 && eta.abs() < 2.0)
            .count();
        assert!(in_window > 0);
    }
}
