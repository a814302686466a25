//! One-hot encoding of categorical columns

use crate::error::{Result, TabprepError};
use polars::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// One-hot encoder with an ignore-unknown policy.
///
/// The per-column category vocabulary is learned during fit and sorted
/// lexicographically, so the expanded column layout is stable across runs.
/// Values unseen during fit encode as an all-zero indicator row instead of
/// raising an error.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OneHotEncoder {
    // (column name, sorted category vocabulary), in fit column order
    vocabularies: Vec<(String, Vec<String>)>,
    is_fitted: bool,
}

impl OneHotEncoder {
    /// Create a new encoder
    pub fn new() -> Self {
        Self {
            vocabularies: Vec::new(),
            is_fitted: false,
        }
    }

    /// Fit the encoder, learning each column's category vocabulary
    pub fn fit(&mut self, df: &DataFrame, columns: &[&str]) -> Result<&mut Self> {
        self.vocabularies.clear();
        for col_name in columns {
            let series = df
                .column(col_name)
                .map_err(|_| TabprepError::ColumnNotFound(col_name.to_string()))?
                .as_materialized_series();

            let ca = series.str()?;
            let categories: BTreeSet<String> = ca
                .into_iter()
                .flatten()
                .map(|s| s.to_string())
                .collect();

            self.vocabularies
                .push((col_name.to_string(), categories.into_iter().collect()));
        }

        self.is_fitted = true;
        Ok(self)
    }

    /// Transform the data, replacing each fitted column with its indicator
    /// columns. Unknown categories yield all-zero indicators.
    pub fn transform(&self, df: &DataFrame) -> Result<DataFrame> {
        if !self.is_fitted {
            return Err(TabprepError::NotFitted);
        }

        let mut result = df.clone();
        for (col_name, vocabulary) in &self.vocabularies {
            let series = df
                .column(col_name)
                .map_err(|_| TabprepError::ColumnNotFound(col_name.to_string()))?
                .as_materialized_series()
                .clone();
            let ca = series.str()?;

            for category in vocabulary {
                let values: Vec<f64> = ca
                    .into_iter()
                    .map(|v| if v == Some(category.as_str()) { 1.0 } else { 0.0 })
                    .collect();

                let indicator = Series::new(format!("{col_name}_{category}").into(), values);
                result = result.with_column(indicator)?.clone();
            }

            result = result.drop(col_name)?;
        }

        Ok(result)
    }

    /// Fit and transform in one step
    pub fn fit_transform(&mut self, df: &DataFrame, columns: &[&str]) -> Result<DataFrame> {
        self.fit(df, columns)?;
        self.transform(df)
    }

    /// Per-column vocabularies learned during fit, in fit column order
    pub fn vocabularies(&self) -> &[(String, Vec<String>)] {
        &self.vocabularies
    }

    /// Names of the indicator columns produced by transform, in output order
    pub fn output_columns(&self) -> Vec<String> {
        self.vocabularies
            .iter()
            .flat_map(|(col, vocab)| vocab.iter().map(move |cat| format!("{col}_{cat}")))
            .collect()
    }
}

impl Default for OneHotEncoder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cities_df() -> DataFrame {
        DataFrame::new(vec![Column::new(
            "city".into(),
            &["NYC", "LA", "NYC", "SF", "LA"],
        )])
        .unwrap()
    }

    #[test]
    fn test_onehot_expansion() {
        let df = cities_df();
        let mut encoder = OneHotEncoder::new();
        let result = encoder.fit_transform(&df, &["city"]).unwrap();

        // original column gone, one indicator per observed level
        assert!(result.column("city").is_err());
        assert_eq!(result.width(), 3);
        assert_eq!(
            encoder.output_columns(),
            vec!["city_LA", "city_NYC", "city_SF"]
        );
    }

    #[test]
    fn test_indicator_values() {
        let df = cities_df();
        let mut encoder = OneHotEncoder::new();
        let result = encoder.fit_transform(&df, &["city"]).unwrap();

        let nyc = result.column("city_NYC").unwrap().f64().unwrap();
        let values: Vec<f64> = nyc.into_no_null_iter().collect();
        assert_eq!(values, vec![1.0, 0.0, 1.0, 0.0, 0.0]);
    }

    #[test]
    fn test_unknown_category_encodes_all_zero() {
        let train = cities_df();
        let test =
            DataFrame::new(vec![Column::new("city".into(), &["Tokyo", "LA"])]).unwrap();

        let mut encoder = OneHotEncoder::new();
        encoder.fit(&train, &["city"]).unwrap();
        let result = encoder.transform(&test).unwrap();

        // Tokyo was never seen: its row is all zeros, and no column was added
        assert_eq!(result.width(), 3);
        let row: Vec<f64> = result
            .get_columns()
            .iter()
            .map(|c| c.f64().unwrap().get(0).unwrap())
            .collect();
        assert_eq!(row, vec![0.0, 0.0, 0.0]);
    }

    #[test]
    fn test_vocabulary_is_sorted() {
        let df = cities_df();
        let mut encoder = OneHotEncoder::new();
        encoder.fit(&df, &["city"]).unwrap();

        let (_, vocab) = &encoder.vocabularies()[0];
        assert_eq!(vocab, &vec!["LA", "NYC", "SF"]);
    }

    #[test]
    fn test_transform_before_fit_fails() {
        let encoder = OneHotEncoder::new();
        assert!(matches!(
            encoder.transform(&cities_df()),
            Err(TabprepError::NotFitted)
        ));
    }
}
