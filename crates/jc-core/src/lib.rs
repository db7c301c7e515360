//! # jc-core
//!
//! Shared types for the jetcorr workspace: the error taxonomy and the
//! analysis configuration (kinematic cuts + correlator binning).

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod config;
pub mod error;

pub use config::{AnalysisConfig, EecConfig, JetCuts};
pub use error::{Error, Result};
