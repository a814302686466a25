//! Column classification by declared storage type

use crate::error::Result;
use polars::prelude::*;
use serde::{Deserialize, Serialize};

/// Column data type for preprocessing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ColumnType {
    Numeric,
    Categorical,
}

/// Disjoint partition of a table's columns into numeric and categorical
/// sets, in original column order.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ColumnRoles {
    pub numeric: Vec<String>,
    pub categorical: Vec<String>,
}

impl ColumnRoles {
    pub fn is_empty(&self) -> bool {
        self.numeric.is_empty() && self.categorical.is_empty()
    }
}

/// Check if a dtype counts as numeric for preprocessing purposes
pub fn is_numeric_dtype(dtype: &DataType) -> bool {
    matches!(
        dtype,
        DataType::Int8
            | DataType::Int16
            | DataType::Int32
            | DataType::Int64
            | DataType::UInt8
            | DataType::UInt16
            | DataType::UInt32
            | DataType::UInt64
            | DataType::Float32
            | DataType::Float64
    )
}

/// Partition columns by declared storage type only.
///
/// Classification is never by semantic cardinality: a numeric-looking ID
/// column stays numeric. Columns of unsupported dtypes are treated as
/// categorical when they expose string data, otherwise skipped.
pub fn classify_columns(df: &DataFrame) -> ColumnRoles {
    let mut roles = ColumnRoles::default();

    for col in df.get_columns() {
        let name = col.name().to_string();
        match col.dtype() {
            dt if is_numeric_dtype(dt) => roles.numeric.push(name),
            DataType::String | DataType::Categorical(_, _) => roles.categorical.push(name),
            _ => {
                if col.as_materialized_series().str().is_ok() {
                    roles.categorical.push(name);
                }
            }
        }
    }

    roles
}

/// Cast all integer and Float32 columns to Float64 for consistent processing
pub fn cast_numeric_to_f64(df: &DataFrame) -> Result<DataFrame> {
    let mut result = df.clone();
    for col in df.get_columns() {
        let dtype = col.dtype();
        if is_numeric_dtype(dtype) && dtype != &DataType::Float64 {
            let casted = col.cast(&DataType::Float64)?;
            result = result.with_column(casted)?.clone();
        }
    }
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mixed_df() -> DataFrame {
        DataFrame::new(vec![
            Column::new("age".into(), &[25i64, 30, 35]),
            Column::new("score".into(), &[3.5f64, 4.0, 4.5]),
            Column::new("city".into(), &["NYC", "LA", "SF"]),
        ])
        .unwrap()
    }

    #[test]
    fn test_classify_columns() {
        let roles = classify_columns(&mixed_df());
        assert_eq!(roles.numeric, vec!["age", "score"]);
        assert_eq!(roles.categorical, vec!["city"]);
    }

    #[test]
    fn test_classification_ignores_cardinality() {
        // An ID-like integer column with all-distinct values is still numeric
        let df = DataFrame::new(vec![Column::new("id".into(), &[1i64, 2, 3, 4, 5])]).unwrap();
        let roles = classify_columns(&df);
        assert_eq!(roles.numeric, vec!["id"]);
        assert!(roles.categorical.is_empty());
    }

    #[test]
    fn test_cast_numeric_to_f64() {
        let df = cast_numeric_to_f64(&mixed_df()).unwrap();
        assert_eq!(df.column("age").unwrap().dtype(), &DataType::Float64);
        assert_eq!(df.column("city").unwrap().dtype(), &DataType::String);
    }
}
