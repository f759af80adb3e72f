//! # Diabrisk
//!
//! Diabetes risk prediction service over a pre-trained binary classifier.
//!
//! The design-bearing core is the prediction pipeline: it validates a clinical
//! feature vector, applies the frozen training-time standard scaling, runs the
//! logistic forward pass, and maps the resulting probability to a discrete
//! decision plus a qualitative confidence band.
//!
//! ## Architecture
//!
//! The crate follows Hexagonal Architecture:
//! - `domain`: Core business types (patient features, prediction results)
//! - `ports`: Trait definitions for external operations
//! - `adapters`: Concrete implementations (model artifact, HTTP surface)
//! - `application`: Use cases orchestrating domain and ports

pub mod adapters;
pub mod application;
pub mod domain;
pub mod ports;

pub use domain::{Confidence, PatientFeatures, PredictionResult};

/// Result type for Diabrisk operations
pub type Result<T> = std::result::Result<T, DiabriskError>;

/// Main error type for Diabrisk
#[derive(Debug, thiserror::Error)]
pub enum DiabriskError {
    #[error("Invalid patient data: {0}")]
    Validation(#[from] domain::ValidationError),

    #[error("Model error: {0}")]
    Model(#[from] ports::ModelError),

    #[error("Invalid batch: {0}")]
    Batch(String),
}
