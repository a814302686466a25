//! Pipeline configuration

use crate::preprocessing::{ImputeStrategy, ScalerType};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Configuration for a full preprocessing run.
///
/// Defaults carry the pipeline constants: `data.csv` input, `target` label
/// column, 80/20 split with seed 42, mean / most-frequent imputation and
/// standard scaling.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// Path to the input dataset (delimited text with a header row)
    pub input_path: PathBuf,

    /// Directory the four output files are written into
    pub output_dir: PathBuf,

    /// Name of the label column
    pub target_column: String,

    /// Fraction of rows assigned to the test partition
    pub test_fraction: f64,

    /// Random seed for the train/test shuffle
    pub seed: u64,

    /// Strategy for handling missing numeric values
    pub numeric_impute_strategy: ImputeStrategy,

    /// Strategy for handling missing categorical values
    pub categorical_impute_strategy: ImputeStrategy,

    /// Type of scaler to use for numeric features
    pub scaler_type: ScalerType,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            input_path: PathBuf::from("data.csv"),
            output_dir: PathBuf::from("."),
            target_column: "target".to_string(),
            test_fraction: 0.2,
            seed: 42,
            numeric_impute_strategy: ImputeStrategy::Mean,
            categorical_impute_strategy: ImputeStrategy::MostFrequent,
            scaler_type: ScalerType::Standard,
        }
    }
}

impl PipelineConfig {
    /// Create a new configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder method to set the input path
    pub fn with_input(mut self, path: impl Into<PathBuf>) -> Self {
        self.input_path = path.into();
        self
    }

    /// Builder method to set the output directory
    pub fn with_output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_dir = dir.into();
        self
    }

    /// Builder method to set the target column name
    pub fn with_target(mut self, name: impl Into<String>) -> Self {
        self.target_column = name.into();
        self
    }

    /// Builder method to set the test fraction
    pub fn with_test_fraction(mut self, fraction: f64) -> Self {
        self.test_fraction = fraction;
        self
    }

    /// Builder method to set the shuffle seed
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Builder method to set the numeric impute strategy
    pub fn with_numeric_impute(mut self, strategy: ImputeStrategy) -> Self {
        self.numeric_impute_strategy = strategy;
        self
    }

    /// Builder method to set the scaler type
    pub fn with_scaler(mut self, scaler_type: ScalerType) -> Self {
        self.scaler_type = scaler_type;
        self
    }

    /// Validate the configuration before a run
    pub fn validate(&self) -> crate::error::Result<()> {
        if !(0.0..1.0).contains(&self.test_fraction) {
            return Err(crate::error::TabprepError::InvalidParameter {
                name: "test_fraction".to_string(),
                value: self.test_fraction.to_string(),
                reason: "must be in [0, 1)".to_string(),
            });
        }
        if self.target_column.is_empty() {
            return Err(crate::error::TabprepError::ConfigError(
                "target column name is empty".to_string(),
            ));
        }
        Ok(())
    }
}
