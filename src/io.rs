//! Dataset loading and output persistence

use crate::error::{Result, TabprepError};
use ndarray::Array2;
use polars::prelude::*;
use std::fs::File;
use std::path::Path;

/// CSV dataset loader
pub struct DataLoader;

impl DataLoader {
    /// Load a delimited dataset with a header row, inferring column types
    /// from the first rows. Fatal if the file is missing or malformed.
    pub fn load_csv(path: &Path) -> Result<DataFrame> {
        let file = File::open(path).map_err(|e| {
            TabprepError::DataError(format!("cannot open {}: {e}", path.display()))
        })?;

        let df = CsvReadOptions::default()
            .with_has_header(true)
            .with_infer_schema_length(Some(100))
            .into_reader_with_file_handle(file)
            .finish()?;

        Ok(df)
    }
}

/// Writes transformed matrices and label vectors as CSV
pub struct DataSaver;

impl DataSaver {
    /// Write a feature matrix with a header row of positional indices and no
    /// row index column. An existing file at `path` is overwritten.
    pub fn save_matrix(path: &Path, matrix: &Array2<f64>) -> Result<()> {
        let columns: Vec<Column> = (0..matrix.ncols())
            .map(|j| Column::new(j.to_string().into(), matrix.column(j).to_vec()))
            .collect();

        let mut df = DataFrame::new(columns)?;
        Self::write_csv(path, &mut df)
    }

    /// Write a label vector under the positional header `0`
    pub fn save_labels(path: &Path, labels: &Series) -> Result<()> {
        let renamed = labels.clone().with_name("0".into());
        let mut df = DataFrame::new(vec![renamed.into()])?;
        Self::write_csv(path, &mut df)
    }

    fn write_csv(path: &Path, df: &mut DataFrame) -> Result<()> {
        let mut file = File::create(path).map_err(|e| {
            TabprepError::DataError(format!("cannot create {}: {e}", path.display()))
        })?;

        CsvWriter::new(&mut file).finish(df)?;
        Ok(())
    }
}
