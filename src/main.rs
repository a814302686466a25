//! tabprep - Main Entry Point
//!
//! Runs the preprocessing pipeline on `data.csv` in the working directory
//! with the fixed pipeline constants. No flags, no environment configuration.

use tabprep::config::PipelineConfig;
use tabprep::pipeline;
use tracing::info;

fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "tabprep=info".into()),
        )
        .init();

    let config = PipelineConfig::default();
    let report = pipeline::run(&config)?;

    info!(
        train_rows = report.n_train_rows,
        test_rows = report.n_test_rows,
        features = report.n_output_features,
        "data preprocessing pipeline completed successfully"
    );

    Ok(())
}
