//! tabprep - Tabular data preprocessing pipeline
//!
//! Loads a delimited dataset, separates features from a target label, splits
//! rows into train/test partitions with a seeded shuffle, imputes missing
//! values, scales numeric features, one-hot-encodes categorical features, and
//! persists the transformed outputs as CSV.
//!
//! All transform statistics are fit on the training partition only and then
//! applied unmodified to the test partition.
//!
//! # Modules
//! - [`io`] - Dataset loading and output persistence
//! - [`schema`] - Column classification by declared type
//! - [`split`] - Feature/target separation and the seeded train/test split
//! - [`preprocessing`] - Imputation, scaling, encoding, and their composition
//! - [`pipeline`] - The end-to-end forward pass

pub mod config;
pub mod error;
pub mod io;
pub mod pipeline;
pub mod preprocessing;
pub mod schema;
pub mod split;

pub use error::{Result, TabprepError};

/// Re-export commonly used types
pub mod prelude {
    pub use crate::config::PipelineConfig;
    pub use crate::error::{Result, TabprepError};
    pub use crate::pipeline::{run, PipelineReport};
    pub use crate::preprocessing::{ImputeStrategy, Preprocessor, ScalerType};
    pub use crate::split::{separate_target, train_test_split, TrainTestSplit};
}
