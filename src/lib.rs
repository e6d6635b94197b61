pub mod config;
pub mod coverage;
pub mod error;
pub mod formats;
pub mod handlers;
pub mod index;
pub mod storage;
pub mod types;

pub use config::Config;
pub use coverage::{CoverageEstimator, DensitySession};
pub use error::{Error, Result};
