//! In-memory jet table: four jagged constituent columns + two jet scalars.

use jc_core::{Error, Result};

use crate::jagged::JaggedCol;

/// A validated set of parallel jet columns.
///
/// The four constituent columns are index-aligned: for every jet the i-th
/// value of each column belongs to the same particle. Construction rejects
/// any shape mismatch, so downstream code can index freely.
#[derive(Debug, Clone, PartialEq)]
pub struct JetStore {
    particle_pt: JaggedCol,
    rapidity: JaggedCol,
    phi: JaggedCol,
    pdg: JaggedCol,
    jet_pt: Vec<f64>,
    jet_eta: Vec<f64>,
}

impl JetStore {
    /// Assemble a store from its columns, validating shape consistency.
    pub fn new(
        particle_pt: JaggedCol,
        rapidity: JaggedCol,
        phi: JaggedCol,
        pdg: JaggedCol,
        jet_pt: Vec<f64>,
        jet_eta: Vec<f64>,
    ) -> Result<Self> {
        let n = particle_pt.n_entries();
        for (name, col) in
            [("rapidity", &rapidity), ("phi", &phi), ("pdg", &pdg)]
        {
            if !particle_pt.same_shape(col) {
                return Err(Error::Validation(format!(
                    "constituent column '{name}' is not aligned with particle pt \
                     ({} vs {} entries or differing per-jet lengths)",
                    col.n_entries(),
                    n
                )));
            }
        }
        for (name, len) in [("jet_pt", jet_pt.len()), ("jet_eta", jet_eta.len())] {
            if len != n {
                return Err(Error::Validation(format!(
                    "scalar column '{name}' has {len} entries, expected {n}"
                )));
            }
        }
        Ok(Self { particle_pt, rapidity, phi, pdg, jet_pt, jet_eta })
    }

    /// Number of jets.
    pub fn n_jets(&self) -> usize {
        self.particle_pt.n_entries()
    }

    /// Largest constituent multiplicity across all jets.
    pub fn max_particles(&self) -> usize {
        self.particle_pt.max_entry_len()
    }

    /// Constituent transverse momenta.
    pub fn particle_pt(&self) -> &JaggedCol {
        &self.particle_pt
    }

    /// Constituent rapidities.
    pub fn rapidity(&self) -> &JaggedCol {
        &self.rapidity
    }

    /// Constituent azimuthal angles.
    pub fn phi(&self) -> &JaggedCol {
        &self.phi
    }

    /// Constituent particle-type codes.
    pub fn pdg(&self) -> &JaggedCol {
        &self.pdg
    }

    /// Jet transverse momenta.
    pub fn jet_pt(&self) -> &[f64] {
        &self.jet_pt
    }

    /// Jet pseudorapidities.
    pub fn jet_eta(&self) -> &[f64] {
        &self.jet_eta
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn jagged(entries: &[Vec<f64>]) -> JaggedCol {
        JaggedCol::from_nested(entries)
    }

    #[test]
    fn aligned_columns_accepted() {
        let store = JetStore::new(
            jagged(&[vec![5.0, 2.0], vec![7.0]]),
            jagged(&[vec![0.1, -0.2], vec![0.3]]),
            jagged(&[vec![1.0, 2.0], vec![3.0]]),
            jagged(&[vec![211.0, -211.0], vec![22.0]]),
            vec![110.0, 95.0],
            vec![0.5, -1.0],
        )
        .unwrap();
        assert_eq!(store.n_jets(), 2);
        assert_eq!(store.max_particles(), 2);
    }

    #[test]
    fn misaligned_constituents_rejected() {
        let err = JetStore::new(
            jagged(&[vec![5.0, 2.0]]),
            jagged(&[vec![0.1]]),
            jagged(&[vec![1.0, 2.0]]),
            jagged(&[vec![211.0, -211.0]]),
            vec![110.0],
            vec![0.5],
        )
        .unwrap_err();
        assert!(err.to_string().contains("rapidity"));
    }

    #[test]
    fn scalar_length_mismatch_rejected() {
        let err = JetStore::new(
            jagged(&[vec![5.0]]),
            jagged(&[vec![0.1]]),
            jagged(&[vec![1.0]]),
            jagged(&[vec![211.0]]),
            vec![110.0, 99.0],
            vec![0.5],
        )
        .unwrap_err();
        assert!(err.to_string().contains("jet_pt"));
    }

    #[test]
    fn empty_store_is_valid() {
        let store = JetStore::new(
            JaggedCol::empty(),
            JaggedCol::empty(),
            JaggedCol::empty(),
            JaggedCol::empty(),
            vec![],
            vec![],
        )
        .unwrap();
        assert_eq!(store.n_jets(), 0);
        assert_eq!(store.max_particles(), 0);
    }
}
