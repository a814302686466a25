//! End-to-end preprocessing pipeline

use crate::config::PipelineConfig;
use crate::error::Result;
use crate::io::{DataLoader, DataSaver};
use crate::preprocessing::Preprocessor;
use crate::split::{separate_target, train_test_split};
use polars::prelude::*;
use serde::Serialize;
use std::collections::HashSet;
use std::path::Path;
use tracing::{info, warn};

/// Output file names, fixed by the pipeline contract
pub const X_TRAIN_FILE: &str = "X_train_preprocessed.csv";
pub const X_TEST_FILE: &str = "X_test_preprocessed.csv";
pub const Y_TRAIN_FILE: &str = "y_train.csv";
pub const Y_TEST_FILE: &str = "y_test.csv";

/// Summary of a completed pipeline run
#[derive(Debug, Clone, Serialize)]
pub struct PipelineReport {
    pub n_rows: usize,
    pub n_train_rows: usize,
    pub n_test_rows: usize,
    pub n_numeric_columns: usize,
    pub n_categorical_columns: usize,
    pub n_output_features: usize,
    /// Per-column category vocabulary sizes learned from the train partition
    pub vocabulary_sizes: Vec<(String, usize)>,
    /// Per-column count of categorical levels present in the full dataset but
    /// absent from the train partition (and therefore from the encoding)
    pub dropped_levels: Vec<(String, usize)>,
}

/// Run the full pipeline: load, separate target, split, fit on train,
/// transform both partitions, persist the four outputs.
///
/// A single deterministic forward pass; each stage completes before the next
/// begins and any failure terminates the run.
pub fn run(config: &PipelineConfig) -> Result<PipelineReport> {
    config.validate()?;

    let df = DataLoader::load_csv(&config.input_path)?;
    info!(
        rows = df.height(),
        cols = df.width(),
        path = %config.input_path.display(),
        "loaded dataset"
    );

    let (features, labels) = separate_target(&df, &config.target_column)?;

    let split = train_test_split(&features, &labels, config.test_fraction, config.seed)?;
    info!(
        train_rows = split.x_train.height(),
        test_rows = split.x_test.height(),
        seed = config.seed,
        "split dataset"
    );

    let mut preprocessor = Preprocessor::with_strategies(
        config.numeric_impute_strategy,
        config.categorical_impute_strategy,
        config.scaler_type,
    );
    preprocessor.fit(&split.x_train)?;

    let x_train = preprocessor.transform(&split.x_train)?;
    let x_test = preprocessor.transform(&split.x_test)?;
    info!(
        numeric = preprocessor.roles().numeric.len(),
        categorical = preprocessor.roles().categorical.len(),
        output_features = preprocessor.n_output_features(),
        "fitted preprocessor on train partition"
    );

    let dropped_levels = dropped_category_levels(&features, &preprocessor.vocabulary_sizes())?;
    for (col, dropped) in &dropped_levels {
        if *dropped > 0 {
            warn!(
                column = col.as_str(),
                dropped,
                "categorical levels absent from the train partition were dropped"
            );
        }
    }

    let out = config.output_dir.as_path();
    persist(&out.join(X_TRAIN_FILE), |p| {
        DataSaver::save_matrix(p, &x_train)
    })?;
    persist(&out.join(X_TEST_FILE), |p| {
        DataSaver::save_matrix(p, &x_test)
    })?;
    persist(&out.join(Y_TRAIN_FILE), |p| {
        DataSaver::save_labels(p, &split.y_train)
    })?;
    persist(&out.join(Y_TEST_FILE), |p| {
        DataSaver::save_labels(p, &split.y_test)
    })?;
    info!(dir = %out.display(), "wrote transformed outputs");

    Ok(PipelineReport {
        n_rows: df.height(),
        n_train_rows: split.x_train.height(),
        n_test_rows: split.x_test.height(),
        n_numeric_columns: preprocessor.roles().numeric.len(),
        n_categorical_columns: preprocessor.roles().categorical.len(),
        n_output_features: preprocessor.n_output_features(),
        vocabulary_sizes: preprocessor.vocabulary_sizes(),
        dropped_levels,
    })
}

/// Write one output file, warning when an existing file is overwritten
fn persist(path: &Path, write: impl FnOnce(&Path) -> Result<()>) -> Result<()> {
    if path.exists() {
        warn!(path = %path.display(), "overwriting existing output file");
    }
    write(path)
}

/// Compare full-dataset category sets against the fitted vocabularies to
/// count levels lost to the train/test split
fn dropped_category_levels(
    features: &DataFrame,
    vocabulary_sizes: &[(String, usize)],
) -> Result<Vec<(String, usize)>> {
    let mut dropped = Vec::with_capacity(vocabulary_sizes.len());

    for (col_name, vocab_size) in vocabulary_sizes {
        let series = features.column(col_name)?.as_materialized_series();
        let full_levels: HashSet<&str> = series.str()?.into_iter().flatten().collect();

        dropped.push((
            col_name.clone(),
            full_levels.len().saturating_sub(*vocab_size),
        ));
    }

    Ok(dropped)
}
