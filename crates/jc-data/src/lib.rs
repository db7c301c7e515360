//! # jc-data
//!
//! Jet-constituent data handling for jetcorr.
//!
//! Reads per-jet constituent kinematics from Parquet files (jagged
//! `List<Float64>` branches plus scalar jet branches), converts the ragged
//! columns into a dense zero-padded tensor, and applies the kinematic jet
//! selection. The tensor layout is `(n_jets, max_particles, 4)` with fields
//! `(pt, rapidity, phi, pdg)` per particle slot.
//!
//! ## Example
//!
//! ```no_run
//! use jc_core::JetCuts;
//! use jc_data::{read_jet_parquet, selection_mask, JetTensor};
//!
//! let store = read_jet_parquet("jets.parquet".as_ref()).unwrap();
//! let cuts = JetCuts::default();
//! let tensor = JetTensor::from_store(&store, cuts.min_particle_pt);
//! let mask = selection_mask(store.jet_pt(), store.jet_eta(), &cuts).unwrap();
//! let selected = tensor.select_rows(&mask).unwrap();
//! println!("{} of {} jets selected", selected.n_jets(), tensor.n_jets());
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod jagged;
pub mod jet_parquet;
pub mod select;
pub mod store;
pub mod tensor;
pub mod toy;

pub use jagged::JaggedCol;
pub use jet_parquet::{read_jet_parquet, read_jet_parquet_bytes, write_jet_parquet,
    write_jet_parquet_bytes};
pub use select::selection_mask;
pub use store::JetStore;
pub use tensor::{JetTensor, FIELDS};
pub use toy::{generate_toy_jets, ToyConfig};
