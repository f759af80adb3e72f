//! Classifier port: Trait for the frozen binary classifier.
//!
//! This trait abstracts the model artifact (weights plus scaling parameters)
//! from the application logic. Implementations hold immutable state loaded
//! once at process start; every method is safe to call from concurrent
//! requests without coordination.

use serde::Serialize;

use crate::domain::{PatientFeatures, ScaledFeatures};

/// Errors raised by the model artifact.
#[derive(Debug, thiserror::Error)]
pub enum ModelError {
    /// The artifact could not be loaded at startup. Fatal: the process must
    /// not serve any request without a model.
    #[error("Model artifact unavailable: {0}")]
    Unavailable(String),

    /// The artifact loaded but its contents are inconsistent.
    #[error("Invalid model artifact: {0}")]
    InvalidArtifact(String),

    /// The forward pass produced a non-finite value. Treated as a defect in
    /// the artifact, never silently passed to callers.
    #[error("Forward pass produced a non-finite probability")]
    NonFiniteOutput,
}

/// Descriptive metadata about the loaded artifact.
#[derive(Debug, Clone, Serialize)]
pub struct ModelInfo {
    /// Human-readable model name
    pub name: String,

    /// Artifact version string
    pub version: String,

    /// Feature names in training-time order
    pub feature_names: Vec<String>,

    /// Decision threshold applied to the output probability
    pub threshold: f64,

    /// When the artifact was loaded into this process
    pub loaded_at: chrono::DateTime<chrono::Utc>,
}

/// Trait for the frozen classifier.
///
/// Implementations provide:
/// - The frozen training-time scaling transform
/// - The deterministic forward pass
/// - Artifact metadata for diagnostics
pub trait Classifier: Send + Sync {
    /// Apply the frozen per-field `(value - mean) / std` transform in the
    /// exact training-time field order. Pure function.
    fn scale(&self, features: &PatientFeatures) -> ScaledFeatures;

    /// Forward pass over scaled features; returns a probability in [0, 1].
    ///
    /// Local, deterministic computation. No retries, no timeout semantics.
    ///
    /// # Errors
    /// Returns `ModelError::NonFiniteOutput` if the computation degenerates.
    fn predict(&self, scaled: &ScaledFeatures) -> Result<f64, ModelError>;

    /// Metadata about the loaded artifact.
    fn info(&self) -> ModelInfo;
}
