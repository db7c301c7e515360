//! Ragged → rectangular conversion: the dense padded jet tensor.

use jc_core::{Error, Result};

use crate::store::JetStore;

/// Number of fields per particle slot: `(pt, rapidity, phi, pdg)`.
pub const FIELDS: usize = 4;

/// A dense row-major tensor of shape `(n_jets, max_particles, 4)`.
///
/// Trailing slots of jets with fewer than `max_particles` constituents are
/// all-zero, and so is any slot whose constituent failed the particle-pt
/// threshold. A slot with `pt == 0` is therefore "absent" by convention.
#[derive(Debug, Clone, PartialEq)]
pub struct JetTensor {
    data: Vec<f64>,
    n_jets: usize,
    max_particles: usize,
}

impl JetTensor {
    /// Build the padded tensor from a store.
    ///
    /// Two passes: the store already knows the maximum constituent count,
    /// so the tensor is allocated zero-filled at its final size and then
    /// filled jet by jet. A constituent is copied only when its pt is
    /// strictly above `min_particle_pt`; otherwise its slot keeps the four
    /// zeros from allocation.
    pub fn from_store(store: &JetStore, min_particle_pt: f64) -> Self {
        let n_jets = store.n_jets();
        let max_particles = store.max_particles();
        let mut data = vec![0.0; n_jets * max_particles * FIELDS];

        for jet in 0..n_jets {
            let pt = store.particle_pt().entry(jet);
            let rap = store.rapidity().entry(jet);
            let phi = store.phi().entry(jet);
            let pdg = store.pdg().entry(jet);
            let row = jet * max_particles * FIELDS;
            for particle in 0..pt.len() {
                if pt[particle] > min_particle_pt {
                    let slot = row + particle * FIELDS;
                    data[slot] = pt[particle];
                    data[slot + 1] = rap[particle];
                    data[slot + 2] = phi[particle];
                    data[slot + 3] = pdg[particle];
                }
            }
        }

        Self { data, n_jets, max_particles }
    }

    /// Assemble a tensor from raw row-major data (mainly for tests).
    pub fn from_raw(data: Vec<f64>, n_jets: usize, max_particles: usize) -> Result<Self> {
        if data.len() != n_jets * max_particles * FIELDS {
            return Err(Error::Validation(format!(
                "tensor data has {} values, expected {} ({n_jets} x {max_particles} x {FIELDS})",
                data.len(),
                n_jets * max_particles * FIELDS
            )));
        }
        Ok(Self { data, n_jets, max_particles })
    }

    /// Number of jets (first dimension).
    pub fn n_jets(&self) -> usize {
        self.n_jets
    }

    /// Number of particle slots per jet (second dimension).
    pub fn max_particles(&self) -> usize {
        self.max_particles
    }

    /// All values, row-major.
    pub fn as_slice(&self) -> &[f64] {
        &self.data
    }

    /// One jet's block of `max_particles * 4` values.
    pub fn jet(&self, jet: usize) -> &[f64] {
        let stride = self.max_particles * FIELDS;
        &self.data[jet * stride..(jet + 1) * stride]
    }

    /// One particle slot's `(pt, rapidity, phi, pdg)`.
    pub fn slot(&self, jet: usize, particle: usize) -> &[f64] {
        let start = (jet * self.max_particles + particle) * FIELDS;
        &self.data[start..start + FIELDS]
    }

    /// Order-preserving row selection.
    ///
    /// Keeps jet `j` iff `mask[j]`; the result has shape
    /// `(n_kept, max_particles, 4)`, which may be `(0, max_particles, 4)`.
    pub fn select_rows(&self, mask: &[bool]) -> Result<JetTensor> {
        if mask.len() != self.n_jets {
            return Err(Error::Validation(format!(
                "selection mask has {} entries for {} jets",
                mask.len(),
                self.n_jets
            )));
        }
        let stride = self.max_particles * FIELDS;
        let n_kept = mask.iter().filter(|&&keep| keep).count();
        let mut data = Vec::with_capacity(n_kept * stride);
        for (jet, &keep) in mask.iter().enumerate() {
            if keep {
                data.extend_from_slice(self.jet(jet));
            }
        }
        Ok(JetTensor { data, n_jets: n_kept, max_particles: self.max_particles })
    }
}
