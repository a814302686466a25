//! Feature/target separation and the seeded train/test split

use crate::error::{Result, TabprepError};
use polars::prelude::*;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

/// The four aligned partitions produced by [`train_test_split`]
#[derive(Debug, Clone)]
pub struct TrainTestSplit {
    pub x_train: DataFrame,
    pub x_test: DataFrame,
    pub y_train: Series,
    pub y_test: Series,
}

/// Separate the label column from the feature table.
///
/// Returns the feature table (all columns except `target`) and the label
/// vector, aligned by row order. Fails if the named column is absent.
pub fn separate_target(df: &DataFrame, target: &str) -> Result<(DataFrame, Series)> {
    let labels = df
        .column(target)
        .map_err(|_| TabprepError::ColumnNotFound(target.to_string()))?
        .as_materialized_series()
        .clone();

    let features = df.drop(target)?;
    Ok((features, labels))
}

/// Deterministic random partition of rows into train and test subsets.
///
/// Row indices are shuffled with a seeded RNG; the first `ceil(n * fraction)`
/// shuffled indices form the test partition and the remainder the train
/// partition. Row correspondence between features and labels is preserved,
/// and the same seed and input order always yield the same partition.
pub fn train_test_split(
    features: &DataFrame,
    labels: &Series,
    test_fraction: f64,
    seed: u64,
) -> Result<TrainTestSplit> {
    let n = features.height();
    if labels.len() != n {
        return Err(TabprepError::ShapeError {
            expected: format!("{n} labels"),
            actual: format!("{} labels", labels.len()),
        });
    }
    if !(0.0..1.0).contains(&test_fraction) {
        return Err(TabprepError::InvalidParameter {
            name: "test_fraction".to_string(),
            value: test_fraction.to_string(),
            reason: "must be in [0, 1)".to_string(),
        });
    }

    let mut indices: Vec<u32> = (0..n as u32).collect();
    let mut rng = StdRng::seed_from_u64(seed);
    indices.shuffle(&mut rng);

    let test_size = (n as f64 * test_fraction).ceil() as usize;
    let (test_idx, train_idx) = indices.split_at(test_size);

    let train_ca = IdxCa::from_vec("idx".into(), train_idx.to_vec());
    let test_ca = IdxCa::from_vec("idx".into(), test_idx.to_vec());

    Ok(TrainTestSplit {
        x_train: features.take(&train_ca)?,
        x_test: features.take(&test_ca)?,
        y_train: labels.take(&train_ca)?,
        y_test: labels.take(&test_ca)?,
    })
}
