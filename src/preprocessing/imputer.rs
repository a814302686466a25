//! Missing value imputation

use crate::error::{Result, TabprepError};
use crate::schema::is_numeric_dtype;
use polars::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Strategy for imputing missing values
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ImputeStrategy {
    /// Replace with mean (numeric only)
    Mean,
    /// Replace with median (numeric only)
    Median,
    /// Replace with the most frequent value
    MostFrequent,
}

/// Fill value learned for a single column during fit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ImputeValue {
    Numeric(f64),
    Text(String),
}

/// Imputer for handling missing values.
///
/// Fill values are learned by [`Imputer::fit`] and held in fit column order,
/// so repeated transforms of the same data are identical.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Imputer {
    strategy: ImputeStrategy,
    fill_values: Vec<(String, ImputeValue)>,
    is_fitted: bool,
}

impl Imputer {
    /// Create a new imputer with the specified strategy
    pub fn new(strategy: ImputeStrategy) -> Self {
        Self {
            strategy,
            fill_values: Vec::new(),
            is_fitted: false,
        }
    }

    /// Fit the imputer to the data
    pub fn fit(&mut self, df: &DataFrame, columns: &[&str]) -> Result<&mut Self> {
        self.fill_values.clear();
        for col_name in columns {
            let series = df
                .column(col_name)
                .map_err(|_| TabprepError::ColumnNotFound(col_name.to_string()))?
                .as_materialized_series();

            let fill_value = self.compute_fill_value(series)?;
            self.fill_values.push((col_name.to_string(), fill_value));
        }

        self.is_fitted = true;
        Ok(self)
    }

    /// Transform the data by filling missing values with the fitted statistics
    pub fn transform(&self, df: &DataFrame) -> Result<DataFrame> {
        if !self.is_fitted {
            return Err(TabprepError::NotFitted);
        }

        let mut result = df.clone();
        for (col_name, fill_value) in &self.fill_values {
            if let Ok(col) = df.column(col_name) {
                let filled = Self::fill_series(col.as_materialized_series(), fill_value)?;
                result = result.with_column(filled)?.clone();
            }
        }

        Ok(result)
    }

    /// Fit and transform in one step
    pub fn fit_transform(&mut self, df: &DataFrame, columns: &[&str]) -> Result<DataFrame> {
        self.fit(df, columns)?;
        self.transform(df)
    }

    /// Fill values learned during fit, in fit column order
    pub fn fill_values(&self) -> &[(String, ImputeValue)] {
        &self.fill_values
    }

    fn compute_fill_value(&self, series: &Series) -> Result<ImputeValue> {
        match self.strategy {
            ImputeStrategy::Mean => {
                let mean = series.f64()?.mean().unwrap_or(0.0);
                Ok(ImputeValue::Numeric(mean))
            }
            ImputeStrategy::Median => {
                let median = series.f64()?.median().unwrap_or(0.0);
                Ok(ImputeValue::Numeric(median))
            }
            ImputeStrategy::MostFrequent => {
                if is_numeric_dtype(series.dtype()) {
                    Ok(ImputeValue::Numeric(Self::mode_numeric(series)?))
                } else {
                    Ok(ImputeValue::Text(Self::mode_string(series)?))
                }
            }
        }
    }

    /// Most frequent numeric value; ties break toward the smaller value
    fn mode_numeric(series: &Series) -> Result<f64> {
        let mut counts: HashMap<u64, usize> = HashMap::new();
        let ca = series.f64()?;
        for val in ca.into_no_null_iter() {
            *counts.entry(val.to_bits()).or_insert(0) += 1;
        }

        let mode = counts
            .into_iter()
            .map(|(bits, count)| (f64::from_bits(bits), count))
            .max_by(|a, b| a.1.cmp(&b.1).then(b.0.total_cmp(&a.0)))
            .map(|(v, _)| v)
            .unwrap_or(0.0);

        Ok(mode)
    }

    /// Most frequent string value; ties break toward the smaller value
    fn mode_string(series: &Series) -> Result<String> {
        let mut counts: HashMap<&str, usize> = HashMap::new();
        let ca = series.str()?;
        for val in ca.into_iter().flatten() {
            *counts.entry(val).or_insert(0) += 1;
        }

        let mode = counts
            .into_iter()
            .max_by(|a, b| a.1.cmp(&b.1).then(b.0.cmp(a.0)))
            .map(|(v, _)| v.to_string())
            .unwrap_or_default();

        Ok(mode)
    }

    fn fill_series(series: &Series, fill_value: &ImputeValue) -> Result<Series> {
        match fill_value {
            ImputeValue::Numeric(val) => {
                let filled: Float64Chunked = series
                    .f64()?
                    .into_iter()
                    .map(|opt| Some(opt.unwrap_or(*val)))
                    .collect();
                Ok(filled.with_name(series.name().clone()).into_series())
            }
            ImputeValue::Text(val) => {
                let filled: StringChunked = series
                    .str()?
                    .into_iter()
                    .map(|opt| Some(opt.unwrap_or(val.as_str()).to_string()))
                    .collect();
                Ok(filled.with_name(series.name().clone()).into_series())
            }
        }
    }
}
