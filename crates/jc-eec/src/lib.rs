//! # jc-eec
//!
//! The Energy-Energy Correlator engine.
//!
//! Consumes the padded jet tensor from `jc-data` and accumulates a
//! log-binned histogram of pairwise angular separations weighted by
//! transverse-momentum products, with per-jet error estimates. Work is
//! distributed over jets with rayon; chunked accumulation keeps the result
//! bit-identical across thread counts.
//!
//! ## Example
//!
//! ```
//! use jc_core::EecConfig;
//! use jc_data::JetTensor;
//! use jc_eec::LongestSideEec;
//!
//! // One jet, two particles: (pt, rapidity, phi, pdg) slots.
//! let tensor = JetTensor::from_raw(
//!     vec![3.0, 0.0, 0.0, 211.0, 4.0, 0.3, 0.4, -211.0],
//!     1,
//!     2,
//! )
//! .unwrap();
//!
//! let mut eec = LongestSideEec::new(EecConfig::default()).unwrap();
//! eec.compute(&tensor);
//! eec.normalize().unwrap();
//! let (hist, errs) = eec.hist_errs(false);
//! assert_eq!(hist.len(), 100);
//! assert_eq!(errs.len(), 100);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod correlator;
pub mod histogram;

pub use correlator::LongestSideEec;
pub use histogram::EecHistogram;
