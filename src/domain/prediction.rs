//! Prediction result types.
//!
//! Maps a classifier probability to a binary decision and a qualitative
//! confidence band. Both mappings are fixed policy, not learned parameters,
//! so the constants live here where tests can assert on them directly.

use serde::{Deserialize, Serialize};

/// Probability at or above which a patient is classified as diabetic.
pub const DECISION_THRESHOLD: f64 = 0.5;

/// Distance from the decision boundary beyond which confidence is High.
pub const HIGH_CONFIDENCE_MARGIN: f64 = 0.2;

/// Distance from the decision boundary beyond which confidence is Medium.
pub const MEDIUM_CONFIDENCE_MARGIN: f64 = 0.1;

/// Qualitative confidence band for a prediction.
///
/// Reflects distance between the predicted probability and the decision
/// boundary, NOT predictive accuracy: a probability near 0 or 1 is far from
/// the boundary and therefore "High" confidence, while a probability near 0.5
/// is "Low" regardless of how well the model is calibrated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Confidence {
    /// Probability in [0.4, 0.6]
    Low,
    /// Probability in [0.3, 0.4) or (0.6, 0.7]
    Medium,
    /// Probability in [0, 0.3) or (0.7, 1.0]
    High,
}

impl Confidence {
    /// Band a probability by its distance from the decision boundary.
    #[must_use]
    pub fn from_probability(probability: f64) -> Self {
        let distance = (probability - DECISION_THRESHOLD).abs();
        if distance > HIGH_CONFIDENCE_MARGIN {
            Self::High
        } else if distance > MEDIUM_CONFIDENCE_MARGIN {
            Self::Medium
        } else {
            Self::Low
        }
    }
}

impl std::fmt::Display for Confidence {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Low => write!(f, "Low"),
            Self::Medium => write!(f, "Medium"),
            Self::High => write!(f, "High"),
        }
    }
}

/// Result of one prediction, derived deterministically from the probability.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PredictionResult {
    /// Binary decision (0 = no diabetes, 1 = diabetes)
    pub prediction: u8,

    /// Raw model probability of diabetes (0.0 to 1.0)
    pub probability: f64,

    /// Confidence band for the decision
    pub confidence: Confidence,
}

impl PredictionResult {
    /// Classify a probability into a full prediction result.
    #[must_use]
    pub fn from_probability(probability: f64) -> Self {
        let prediction = u8::from(probability >= DECISION_THRESHOLD);
        Self {
            prediction,
            probability,
            confidence: Confidence::from_probability(probability),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decision_threshold() {
        assert_eq!(PredictionResult::from_probability(0.49).prediction, 0);
        // Prediction is 1 exactly at the threshold, not only above it.
        assert_eq!(PredictionResult::from_probability(0.5).prediction, 1);
        assert_eq!(PredictionResult::from_probability(0.51).prediction, 1);
    }

    #[test]
    fn test_confidence_band_interiors() {
        assert_eq!(Confidence::from_probability(0.0), Confidence::High);
        assert_eq!(Confidence::from_probability(0.15), Confidence::High);
        assert_eq!(Confidence::from_probability(0.35), Confidence::Medium);
        assert_eq!(Confidence::from_probability(0.45), Confidence::Low);
        assert_eq!(Confidence::from_probability(0.5), Confidence::Low);
        assert_eq!(Confidence::from_probability(0.55), Confidence::Low);
        assert_eq!(Confidence::from_probability(0.65), Confidence::Medium);
        assert_eq!(Confidence::from_probability(0.85), Confidence::High);
        assert_eq!(Confidence::from_probability(1.0), Confidence::High);
    }

    #[test]
    fn test_confidence_band_boundaries() {
        // Band edges belong to the band closer to the decision boundary.
        assert_eq!(Confidence::from_probability(0.3), Confidence::Medium);
        assert_eq!(Confidence::from_probability(0.4), Confidence::Low);
        assert_eq!(Confidence::from_probability(0.6), Confidence::Low);
        assert_eq!(Confidence::from_probability(0.7), Confidence::Medium);
    }

    #[test]
    fn test_confidence_serializes_as_plain_label() {
        let json = serde_json::to_string(&Confidence::Medium).unwrap();
        assert_eq!(json, "\"Medium\"");
    }

    #[test]
    fn test_result_is_deterministic() {
        let a = PredictionResult::from_probability(0.35);
        let b = PredictionResult::from_probability(0.35);
        assert_eq!(a, b);
        assert_eq!(a.prediction, 0);
        assert_eq!(a.confidence, Confidence::Medium);
    }
}
