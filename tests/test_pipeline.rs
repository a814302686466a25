//! Integration test: preprocessing pipeline end-to-end

use std::fmt::Write as _;
use std::path::Path;
use tabprep::config::PipelineConfig;
use tabprep::pipeline::{self, X_TEST_FILE, X_TRAIN_FILE, Y_TEST_FILE, Y_TRAIN_FILE};
use tabprep::preprocessing::ScalerType;
use tempfile::TempDir;

const GRADES: [&str; 3] = ["high", "low", "mid"];

/// 100 rows: one numeric column with 5 missing values, one categorical
/// column with 3 levels and 2 missing values, one binary target.
fn write_fixture(dir: &Path) -> std::path::PathBuf {
    let mut csv = String::from("value,grade,target\n");
    for i in 0..100 {
        let value = if [3, 17, 42, 65, 88].contains(&i) {
            String::new()
        } else {
            format!("{}.5", i)
        };
        let grade = if [10, 55].contains(&i) {
            ""
        } else {
            GRADES[i % 3]
        };
        writeln!(csv, "{value},{grade},{}", i % 2).unwrap();
    }

    let path = dir.join("data.csv");
    std::fs::write(&path, csv).unwrap();
    path
}

fn fixture_config(dir: &Path) -> PipelineConfig {
    PipelineConfig::default()
        .with_input(write_fixture(dir))
        .with_output_dir(dir)
}

fn read_rows(path: &Path) -> Vec<Vec<String>> {
    std::fs::read_to_string(path)
        .unwrap()
        .lines()
        .map(|l| l.split(',').map(|s| s.to_string()).collect())
        .collect()
}

#[test]
fn test_split_sizes_and_alignment() {
    let dir = TempDir::new().unwrap();
    let report = pipeline::run(&fixture_config(dir.path())).unwrap();

    assert_eq!(report.n_rows, 100);
    assert_eq!(report.n_train_rows, 80);
    assert_eq!(report.n_test_rows, 20);

    // header + data rows; feature and label files stay aligned
    let x_train = read_rows(&dir.path().join(X_TRAIN_FILE));
    let x_test = read_rows(&dir.path().join(X_TEST_FILE));
    let y_train = read_rows(&dir.path().join(Y_TRAIN_FILE));
    let y_test = read_rows(&dir.path().join(Y_TEST_FILE));

    assert_eq!(x_train.len(), 81);
    assert_eq!(x_test.len(), 21);
    assert_eq!(y_train.len(), x_train.len());
    assert_eq!(y_test.len(), x_test.len());
}

#[test]
fn test_output_headers_are_positional() {
    let dir = TempDir::new().unwrap();
    let report = pipeline::run(&fixture_config(dir.path())).unwrap();

    let x_train = read_rows(&dir.path().join(X_TRAIN_FILE));
    let expected: Vec<String> = (0..report.n_output_features)
        .map(|i| i.to_string())
        .collect();
    assert_eq!(x_train[0], expected);

    let y_train = read_rows(&dir.path().join(Y_TRAIN_FILE));
    assert_eq!(y_train[0], vec!["0"]);
}

#[test]
fn test_numeric_block_has_no_missing_values() {
    let dir = TempDir::new().unwrap();
    pipeline::run(&fixture_config(dir.path())).unwrap();

    for file in [X_TRAIN_FILE, X_TEST_FILE] {
        let rows = read_rows(&dir.path().join(file));
        for row in &rows[1..] {
            for field in row {
                let v: f64 = field.parse().expect("numeric field");
                assert!(v.is_finite());
            }
        }
    }
}

#[test]
fn test_onehot_column_count_matches_training_vocabulary() {
    let dir = TempDir::new().unwrap();
    let report = pipeline::run(&fixture_config(dir.path())).unwrap();

    assert_eq!(report.n_numeric_columns, 1);
    assert_eq!(report.n_categorical_columns, 1);

    let (col, vocab_size) = &report.vocabulary_sizes[0];
    assert_eq!(col, "grade");
    assert!(*vocab_size <= 3);
    assert_eq!(report.n_output_features, 1 + vocab_size);

    // levels observed in training plus levels dropped by the split cover
    // all 3 levels present in the dataset
    let (_, dropped) = &report.dropped_levels[0];
    assert_eq!(vocab_size + dropped, 3);
}

#[test]
fn test_standardized_train_column_has_zero_mean_unit_variance() {
    let dir = TempDir::new().unwrap();
    pipeline::run(&fixture_config(dir.path())).unwrap();

    let rows = read_rows(&dir.path().join(X_TRAIN_FILE));
    let values: Vec<f64> = rows[1..]
        .iter()
        .map(|row| row[0].parse().unwrap())
        .collect();

    let n = values.len() as f64;
    let mean = values.iter().sum::<f64>() / n;
    let var = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n;

    assert!(mean.abs() < 1e-9, "train mean was {mean}");
    assert!((var - 1.0).abs() < 1e-9, "train variance was {var}");
}

#[test]
fn test_reruns_are_byte_identical() {
    let dir_a = TempDir::new().unwrap();
    let dir_b = TempDir::new().unwrap();

    pipeline::run(&fixture_config(dir_a.path())).unwrap();
    pipeline::run(&fixture_config(dir_b.path())).unwrap();

    for file in [X_TRAIN_FILE, X_TEST_FILE, Y_TRAIN_FILE, Y_TEST_FILE] {
        let a = std::fs::read(dir_a.path().join(file)).unwrap();
        let b = std::fs::read(dir_b.path().join(file)).unwrap();
        assert_eq!(a, b, "{file} differed between runs");
    }
}

#[test]
fn test_existing_outputs_are_overwritten() {
    let dir = TempDir::new().unwrap();
    let config = fixture_config(dir.path());

    let stale = dir.path().join(X_TRAIN_FILE);
    std::fs::write(&stale, "stale").unwrap();

    pipeline::run(&config).unwrap();
    let content = std::fs::read_to_string(&stale).unwrap();
    assert!(!content.contains("stale"));
}

#[test]
fn test_missing_target_column_is_fatal() {
    let dir = TempDir::new().unwrap();
    let config = fixture_config(dir.path()).with_target("label");

    let err = pipeline::run(&config).unwrap_err();
    assert!(err.to_string().contains("label"));
}

#[test]
fn test_missing_input_file_is_fatal() {
    let dir = TempDir::new().unwrap();
    let config = PipelineConfig::default()
        .with_input(dir.path().join("absent.csv"))
        .with_output_dir(dir.path());

    assert!(pipeline::run(&config).is_err());
}

#[test]
fn test_minmax_scaler_variant() {
    let dir = TempDir::new().unwrap();
    let config = fixture_config(dir.path()).with_scaler(ScalerType::MinMax);
    pipeline::run(&config).unwrap();

    let rows = read_rows(&dir.path().join(X_TRAIN_FILE));
    for row in &rows[1..] {
        let v: f64 = row[0].parse().unwrap();
        assert!((0.0..=1.0).contains(&v));
    }
}
