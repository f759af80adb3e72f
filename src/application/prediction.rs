//! Prediction service: Orchestrates the inference pipeline.
//!
//! Every request runs the same pure composition:
//! validate → scale → predict → classify.
//!
//! The service holds the loaded classifier behind an `Arc` and owns no other
//! state, so any number of requests may run it concurrently without locks.

use std::sync::Arc;

use crate::domain::{PatientFeatures, PredictionResult, ValidationError};
use crate::ports::{Classifier, ModelInfo};
use crate::DiabriskError;

/// Maximum number of records accepted in one batch call.
pub const MAX_BATCH_SIZE: usize = 100;

/// Service for running diabetes risk predictions.
pub struct PredictionService<C>
where
    C: Classifier,
{
    classifier: Arc<C>,
}

impl<C> PredictionService<C>
where
    C: Classifier,
{
    /// Create a new prediction service over a loaded classifier.
    pub fn new(classifier: Arc<C>) -> Self {
        Self { classifier }
    }

    /// Run the full pipeline for one patient.
    ///
    /// Performs:
    /// 1. Validate the clinical features
    /// 2. Apply the frozen scaling transform
    /// 3. Forward pass through the classifier
    /// 4. Classify the probability into decision and confidence band
    ///
    /// # Errors
    /// Returns a validation error with field-level detail for rejected input,
    /// or a model error if the forward pass degenerates.
    pub fn predict_one(&self, patient: &PatientFeatures) -> crate::Result<PredictionResult> {
        patient.validate()?;

        let scaled = self.classifier.scale(patient);
        let probability = self.classifier.predict(&scaled)?;
        let result = PredictionResult::from_probability(probability);

        tracing::debug!(
            "Prediction complete: prediction={}, probability={:.4}, confidence={}",
            result.prediction,
            result.probability,
            result.confidence
        );

        Ok(result)
    }

    /// Run the pipeline for a batch of patients, each record independently.
    ///
    /// Partial-failure policy: per-item reporting. An invalid record yields an
    /// error entry at its position; the remaining records are processed
    /// normally, in input order. Only batch-level violations (empty batch,
    /// more than `MAX_BATCH_SIZE` records) or a classifier fault fail the
    /// whole call.
    ///
    /// # Errors
    /// Returns `DiabriskError::Batch` for batch-level violations and
    /// `DiabriskError::Model` if the forward pass degenerates.
    pub fn predict_many(
        &self,
        patients: &[PatientFeatures],
    ) -> crate::Result<Vec<Result<PredictionResult, ValidationError>>> {
        if patients.is_empty() {
            return Err(DiabriskError::Batch("empty patient list".into()));
        }
        if patients.len() > MAX_BATCH_SIZE {
            return Err(DiabriskError::Batch(format!(
                "maximum {MAX_BATCH_SIZE} patients per request, got {}",
                patients.len()
            )));
        }

        let mut results = Vec::with_capacity(patients.len());
        for patient in patients {
            match patient.validate() {
                Ok(()) => {
                    let scaled = self.classifier.scale(patient);
                    let probability = self.classifier.predict(&scaled)?;
                    results.push(Ok(PredictionResult::from_probability(probability)));
                }
                Err(e) => results.push(Err(e)),
            }
        }

        let rejected = results.iter().filter(|r| r.is_err()).count();
        tracing::info!(
            "Batch prediction complete: {} records, {} rejected",
            results.len(),
            rejected
        );

        Ok(results)
    }

    /// Metadata about the loaded classifier.
    #[must_use]
    pub fn model_info(&self) -> ModelInfo {
        self.classifier.info()
    }
}
