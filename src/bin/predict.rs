//! Run batch predictions over a JSON file of patient records.
//!
//! Usage:
//!   cargo run --bin predict -- --input patients.json --model-path models/model.json
//!
//! The input file holds a JSON array of patient records with the same fields
//! as the /predict endpoint. Results are printed as JSON, one line per record.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use diabrisk::adapters::model::LogisticModel;
use diabrisk::application::PredictionService;
use diabrisk::PatientFeatures;

/// Predict diabetes risk for a batch of patient records.
#[derive(Parser, Debug)]
#[command(name = "predict")]
#[command(about = "Predict diabetes risk from a JSON file of patient records", long_about = None)]
struct Args {
    /// Path to the JSON file of patient records
    #[arg(short = 'i', long, value_name = "PATH")]
    input: PathBuf,

    /// Path to the model artifact
    #[arg(short = 'm', long, value_name = "PATH", default_value = "models/model.json")]
    model_path: PathBuf,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .init();

    let args = Args::parse();

    let content = std::fs::read_to_string(&args.input)
        .with_context(|| format!("failed to read {}", args.input.display()))?;
    let patients: Vec<PatientFeatures> =
        serde_json::from_str(&content).context("input must be a JSON array of patient records")?;

    let model = LogisticModel::load(&args.model_path)
        .with_context(|| format!("failed to load model from {}", args.model_path.display()))?;
    let service = PredictionService::new(Arc::new(model));

    let results = service.predict_many(&patients)?;

    for (i, outcome) in results.iter().enumerate() {
        match outcome {
            Ok(result) => println!(
                "{}",
                serde_json::json!({
                    "patient_id": i + 1,
                    "prediction": result.prediction,
                    "probability": result.probability,
                    "confidence": result.confidence,
                })
            ),
            Err(e) => println!(
                "{}",
                serde_json::json!({
                    "patient_id": i + 1,
                    "error": e,
                })
            ),
        }
    }

    Ok(())
}
