//! Domain layer: Core business types and logic.
//!
//! This module contains pure Rust types with no external dependencies.
//! All types are serializable and implement strict validation.

mod patient;
mod prediction;

pub use patient::{
    FieldError, PatientFeatures, ScaledFeatures, ValidationError, FEATURE_COUNT, FEATURE_NAMES,
};
pub use prediction::{
    Confidence, PredictionResult, DECISION_THRESHOLD, HIGH_CONFIDENCE_MARGIN,
    MEDIUM_CONFIDENCE_MARGIN,
};
