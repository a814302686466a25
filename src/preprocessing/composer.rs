//! Composed preprocessing: parallel numeric and categorical chains

use crate::error::{Result, TabprepError};
use crate::preprocessing::{ImputeStrategy, Imputer, OneHotEncoder, Scaler, ScalerType};
use crate::schema::{cast_numeric_to_f64, classify_columns, ColumnRoles};
use ndarray::Array2;
use polars::prelude::*;
use serde::{Deserialize, Serialize};

/// Fit-on-train preprocessing composer.
///
/// Runs two chains over a feature table: impute + scale for numeric columns
/// and impute + one-hot encode for categorical columns, then concatenates
/// both outputs into a single feature matrix with the numeric block first.
///
/// All fit statistics (means, scale parameters, category vocabularies) are
/// learned from the data passed to [`Preprocessor::fit`] and applied
/// unmodified by [`Preprocessor::transform`], so fitting on the training
/// partition and transforming the test partition cannot leak test statistics.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Preprocessor {
    numeric_impute_strategy: ImputeStrategy,
    categorical_impute_strategy: ImputeStrategy,
    scaler_type: ScalerType,
    roles: ColumnRoles,
    numeric_imputer: Option<Imputer>,
    categorical_imputer: Option<Imputer>,
    scaler: Option<Scaler>,
    encoder: Option<OneHotEncoder>,
    is_fitted: bool,
}

impl Preprocessor {
    /// Create a preprocessor with the default chains: mean imputation and
    /// standardization for numeric columns, most-frequent imputation and
    /// one-hot encoding for categorical columns.
    pub fn new() -> Self {
        Self::with_strategies(
            ImputeStrategy::Mean,
            ImputeStrategy::MostFrequent,
            ScalerType::Standard,
        )
    }

    /// Create a preprocessor with explicit strategies
    pub fn with_strategies(
        numeric_impute: ImputeStrategy,
        categorical_impute: ImputeStrategy,
        scaler_type: ScalerType,
    ) -> Self {
        Self {
            numeric_impute_strategy: numeric_impute,
            categorical_impute_strategy: categorical_impute,
            scaler_type,
            roles: ColumnRoles::default(),
            numeric_imputer: None,
            categorical_imputer: None,
            scaler: None,
            encoder: None,
            is_fitted: false,
        }
    }

    /// Fit both chains on the given (training) feature table
    pub fn fit(&mut self, df: &DataFrame) -> Result<&mut Self> {
        let df = cast_numeric_to_f64(df)?;
        self.roles = classify_columns(&df);

        if !self.roles.numeric.is_empty() {
            let cols: Vec<&str> = self.roles.numeric.iter().map(|s| s.as_str()).collect();

            let mut imputer = Imputer::new(self.numeric_impute_strategy);
            imputer.fit(&df, &cols)?;

            // scaler params come from imputed values, as transform will see them
            let imputed = imputer.transform(&df)?;
            let mut scaler = Scaler::new(self.scaler_type);
            scaler.fit(&imputed, &cols)?;

            self.numeric_imputer = Some(imputer);
            self.scaler = Some(scaler);
        }

        if !self.roles.categorical.is_empty() {
            let cols: Vec<&str> = self.roles.categorical.iter().map(|s| s.as_str()).collect();

            let mut imputer = Imputer::new(self.categorical_impute_strategy);
            imputer.fit(&df, &cols)?;

            let imputed = imputer.transform(&df)?;
            let mut encoder = OneHotEncoder::new();
            encoder.fit(&imputed, &cols)?;

            self.categorical_imputer = Some(imputer);
            self.encoder = Some(encoder);
        }

        self.is_fitted = true;
        Ok(self)
    }

    /// Transform a feature table into the combined feature matrix
    pub fn transform(&self, df: &DataFrame) -> Result<Array2<f64>> {
        if !self.is_fitted {
            return Err(TabprepError::NotFitted);
        }

        let mut result = cast_numeric_to_f64(df)?;

        if let Some(ref imputer) = self.numeric_imputer {
            result = imputer.transform(&result)?;
        }
        if let Some(ref imputer) = self.categorical_imputer {
            result = imputer.transform(&result)?;
        }
        if let Some(ref scaler) = self.scaler {
            result = scaler.transform(&result)?;
        }
        if let Some(ref encoder) = self.encoder {
            result = encoder.transform(&result)?;
        }

        columns_to_array2(&result, &self.output_columns())
    }

    /// Fit and transform in one step
    pub fn fit_transform(&mut self, df: &DataFrame) -> Result<Array2<f64>> {
        self.fit(df)?;
        self.transform(df)
    }

    /// Column partition detected during fit
    pub fn roles(&self) -> &ColumnRoles {
        &self.roles
    }

    /// Output column names in matrix order: numeric block, then one-hot block
    pub fn output_columns(&self) -> Vec<String> {
        let mut names = self.roles.numeric.clone();
        if let Some(ref encoder) = self.encoder {
            names.extend(encoder.output_columns());
        }
        names
    }

    /// Number of columns in the transformed feature matrix
    pub fn n_output_features(&self) -> usize {
        self.output_columns().len()
    }

    /// Per-column category vocabulary sizes learned during fit
    pub fn vocabulary_sizes(&self) -> Vec<(String, usize)> {
        self.encoder
            .as_ref()
            .map(|e| {
                e.vocabularies()
                    .iter()
                    .map(|(col, vocab)| (col.clone(), vocab.len()))
                    .collect()
            })
            .unwrap_or_default()
    }
}

impl Default for Preprocessor {
    fn default() -> Self {
        Self::new()
    }
}

/// Collect named Float64 columns of a DataFrame into a row-major matrix.
/// Nulls surface as NaN rather than being silently replaced.
fn columns_to_array2(df: &DataFrame, col_names: &[String]) -> Result<Array2<f64>> {
    let n_rows = df.height();
    let n_cols = col_names.len();

    let col_data: Vec<Vec<f64>> = col_names
        .iter()
        .map(|col_name| {
            let series = df
                .column(col_name)
                .map_err(|_| TabprepError::ColumnNotFound(col_name.clone()))?
                .as_materialized_series();
            let values: Vec<f64> = series
                .f64()?
                .into_iter()
                .map(|v| v.unwrap_or(f64::NAN))
                .collect();
            Ok(values)
        })
        .collect::<Result<Vec<Vec<f64>>>>()?;

    Ok(Array2::from_shape_fn((n_rows, n_cols), |(r, c)| {
        col_data[c][r]
    }))
}
