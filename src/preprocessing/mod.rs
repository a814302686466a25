//! Data preprocessing module
//!
//! Provides the two transform chains composed by the pipeline:
//! - Missing value imputation (mean, median, most frequent)
//! - Numeric feature scaling (standard, min-max)
//! - Categorical one-hot encoding with an ignore-unknown policy
//! - The composer concatenating both chains into one feature matrix

mod composer;
mod encoder;
mod imputer;
mod scaler;

pub use composer::Preprocessor;
pub use encoder::OneHotEncoder;
pub use imputer::{ImputeStrategy, ImputeValue, Imputer};
pub use scaler::{Scaler, ScalerType};
