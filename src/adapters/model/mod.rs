//! Model adapter: logistic regression artifact loaded from JSON.
//!
//! The artifact is exported by the training pipeline and contains the fitted
//! coefficients together with the standard-scaler statistics frozen at
//! training time. Everything is read-only after load; requests share one
//! instance behind an `Arc` with no locking.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::domain::{
    PatientFeatures, ScaledFeatures, DECISION_THRESHOLD, FEATURE_COUNT, FEATURE_NAMES,
};
use crate::ports::{Classifier, ModelError, ModelInfo};

/// Model parameters exported by the training pipeline.
///
/// Matches the JSON structure of `models/model.json`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelArtifact {
    pub name: String,
    pub version: String,
    pub feature_names: Vec<String>,
    pub coefficients: Vec<f64>,
    pub intercept: f64,
    pub scaler_mean: Vec<f64>,
    pub scaler_std: Vec<f64>,
}

/// Frozen logistic regression classifier.
#[derive(Debug)]
pub struct LogisticModel {
    artifact: ModelArtifact,
    loaded_at: chrono::DateTime<chrono::Utc>,
}

impl LogisticModel {
    /// Load the artifact from a JSON file and verify its consistency.
    ///
    /// # Errors
    /// Returns `ModelError::Unavailable` if the file cannot be read or parsed
    /// and `ModelError::InvalidArtifact` if its contents are inconsistent.
    pub fn load(path: &Path) -> Result<Self, ModelError> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            ModelError::Unavailable(format!("failed to read {}: {e}", path.display()))
        })?;
        let artifact: ModelArtifact = serde_json::from_str(&content).map_err(|e| {
            ModelError::Unavailable(format!("failed to parse {}: {e}", path.display()))
        })?;

        let model = Self::from_artifact(artifact)?;
        tracing::info!(
            "Loaded model '{}' v{} from {} ({} features)",
            model.artifact.name,
            model.artifact.version,
            path.display(),
            model.artifact.feature_names.len()
        );
        Ok(model)
    }

    /// Build a classifier from an in-memory artifact, verifying consistency.
    ///
    /// # Errors
    /// Returns `ModelError::InvalidArtifact` on any inconsistency.
    pub fn from_artifact(artifact: ModelArtifact) -> Result<Self, ModelError> {
        let n = artifact.feature_names.len();
        if n != FEATURE_COUNT {
            return Err(ModelError::InvalidArtifact(format!(
                "expected {FEATURE_COUNT} features, artifact has {n}"
            )));
        }
        if artifact.feature_names != FEATURE_NAMES {
            return Err(ModelError::InvalidArtifact(format!(
                "feature order mismatch: artifact order {:?} does not match expected {:?}",
                artifact.feature_names, FEATURE_NAMES
            )));
        }
        if artifact.coefficients.len() != n
            || artifact.scaler_mean.len() != n
            || artifact.scaler_std.len() != n
        {
            return Err(ModelError::InvalidArtifact(
                "parameter lengths do not match feature_names length".into(),
            ));
        }
        if !artifact.intercept.is_finite()
            || artifact.coefficients.iter().any(|c| !c.is_finite())
            || artifact.scaler_mean.iter().any(|m| !m.is_finite())
        {
            return Err(ModelError::InvalidArtifact(
                "non-finite parameter in artifact".into(),
            ));
        }
        if artifact.scaler_std.iter().any(|s| !s.is_finite() || *s <= 0.0) {
            return Err(ModelError::InvalidArtifact(
                "scaler_std entries must be finite and > 0".into(),
            ));
        }

        Ok(Self {
            artifact,
            loaded_at: chrono::Utc::now(),
        })
    }

    /// Invert the frozen scaling transform. Test/diagnostic helper:
    /// `inverse_scale(scale(x)) == x` up to floating point error.
    #[must_use]
    pub fn inverse_scale(&self, scaled: &ScaledFeatures) -> [f64; FEATURE_COUNT] {
        let mut out = [0.0; FEATURE_COUNT];
        for (i, z) in scaled.as_array().iter().enumerate() {
            out[i] = z * self.artifact.scaler_std[i] + self.artifact.scaler_mean[i];
        }
        out
    }
}

fn sigmoid(x: f64) -> f64 {
    1.0 / (1.0 + (-x).exp())
}

impl Classifier for LogisticModel {
    fn scale(&self, features: &PatientFeatures) -> ScaledFeatures {
        let raw = features.to_array();
        let mut scaled = [0.0; FEATURE_COUNT];
        for i in 0..FEATURE_COUNT {
            scaled[i] = (raw[i] - self.artifact.scaler_mean[i]) / self.artifact.scaler_std[i];
        }
        ScaledFeatures::new(scaled)
    }

    fn predict(&self, scaled: &ScaledFeatures) -> Result<f64, ModelError> {
        let mut logit = self.artifact.intercept;
        for (z, coef) in scaled.as_array().iter().zip(&self.artifact.coefficients) {
            logit += z * coef;
        }

        let probability = sigmoid(logit);
        if !probability.is_finite() {
            return Err(ModelError::NonFiniteOutput);
        }

        tracing::debug!("Forward pass: logit={logit:.4}, probability={probability:.4}");
        Ok(probability)
    }

    fn info(&self) -> ModelInfo {
        ModelInfo {
            name: self.artifact.name.clone(),
            version: self.artifact.version.clone(),
            feature_names: self.artifact.feature_names.clone(),
            threshold: DECISION_THRESHOLD,
            loaded_at: self.loaded_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn pima_feature_names() -> Vec<String> {
        FEATURE_NAMES.iter().map(|s| (*s).to_string()).collect()
    }

    fn identity_artifact() -> ModelArtifact {
        ModelArtifact {
            name: "test".into(),
            version: "0".into(),
            feature_names: pima_feature_names(),
            coefficients: vec![0.0; FEATURE_COUNT],
            intercept: 0.0,
            scaler_mean: vec![0.0; FEATURE_COUNT],
            scaler_std: vec![1.0; FEATURE_COUNT],
        }
    }

    fn reference_patient() -> PatientFeatures {
        PatientFeatures {
            pregnancies: 3.0,
            glucose: 117.0,
            blood_pressure: 72.0,
            skin_thickness: 29.0,
            insulin: 125.0,
            bmi: 32.3,
            diabetes_pedigree_function: 0.3725,
            age: 29.0,
        }
    }

    #[test]
    fn test_identity_scaler_maps_to_itself() {
        let model = LogisticModel::from_artifact(identity_artifact()).unwrap();
        let patient = reference_patient();
        let scaled = model.scale(&patient);
        assert_eq!(scaled.as_array(), &patient.to_array());
    }

    #[test]
    fn test_scale_is_order_preserving_and_invertible() {
        let mut artifact = identity_artifact();
        artifact.scaler_mean = vec![3.8, 120.9, 69.1, 20.5, 79.8, 32.0, 0.47, 33.2];
        artifact.scaler_std = vec![3.4, 32.0, 19.4, 16.0, 115.2, 7.9, 0.33, 11.8];
        let model = LogisticModel::from_artifact(artifact.clone()).unwrap();

        let patient = reference_patient();
        let raw = patient.to_array();
        let scaled = model.scale(&patient);

        // Each position is transformed with its own frozen statistics.
        for i in 0..FEATURE_COUNT {
            let expected = (raw[i] - artifact.scaler_mean[i]) / artifact.scaler_std[i];
            assert!((scaled.as_array()[i] - expected).abs() < 1e-12);
        }

        let recovered = model.inverse_scale(&scaled);
        for i in 0..FEATURE_COUNT {
            assert!((recovered[i] - raw[i]).abs() < 1e-9);
        }
    }

    #[test]
    fn test_zero_model_predicts_half() {
        let model = LogisticModel::from_artifact(identity_artifact()).unwrap();
        let scaled = model.scale(&reference_patient());
        let p = model.predict(&scaled).unwrap();
        assert!((p - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_probability_always_in_unit_interval() {
        let mut artifact = identity_artifact();
        artifact.coefficients = vec![5.0; FEATURE_COUNT];
        artifact.intercept = -3.0;
        let model = LogisticModel::from_artifact(artifact).unwrap();

        for glucose in [44.0, 100.0, 199.0] {
            let patient = PatientFeatures {
                glucose,
                ..reference_patient()
            };
            let p = model.predict(&model.scale(&patient)).unwrap();
            assert!((0.0..=1.0).contains(&p), "probability {p} out of [0,1]");
        }
    }

    #[test]
    fn test_length_mismatch_rejected() {
        let mut artifact = identity_artifact();
        artifact.coefficients = vec![0.0; FEATURE_COUNT - 1];
        assert!(matches!(
            LogisticModel::from_artifact(artifact),
            Err(ModelError::InvalidArtifact(_))
        ));
    }

    #[test]
    fn test_feature_order_mismatch_rejected() {
        let mut artifact = identity_artifact();
        artifact.feature_names.swap(0, 1);
        assert!(matches!(
            LogisticModel::from_artifact(artifact),
            Err(ModelError::InvalidArtifact(_))
        ));
    }

    #[test]
    fn test_zero_std_rejected() {
        let mut artifact = identity_artifact();
        artifact.scaler_std[2] = 0.0;
        assert!(matches!(
            LogisticModel::from_artifact(artifact),
            Err(ModelError::InvalidArtifact(_))
        ));
    }

    #[test]
    fn test_missing_file_is_unavailable() {
        let err = LogisticModel::load(Path::new("does/not/exist.json")).unwrap_err();
        assert!(matches!(err, ModelError::Unavailable(_)));
    }

    #[test]
    fn test_malformed_json_is_unavailable() {
        // Read and parse failures both surface as Unavailable; load never
        // leaks raw io/serde errors to callers.
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("model.json");
        std::fs::write(&path, "{ not json").unwrap();

        let err = LogisticModel::load(&path).unwrap_err();
        assert!(matches!(err, ModelError::Unavailable(_)));
    }

    #[test]
    fn test_load_round_trip_through_file() {
        let dir = tempfile::tempdir().unwrap();
        let path: PathBuf = dir.path().join("model.json");
        let json = serde_json::to_string(&identity_artifact()).unwrap();
        std::fs::write(&path, json).unwrap();

        let model = LogisticModel::load(&path).expect("artifact should load");
        assert_eq!(model.info().feature_names, pima_feature_names());
        assert!((model.info().threshold - DECISION_THRESHOLD).abs() < f64::EPSILON);
    }

    #[test]
    fn test_shipped_artifact_loads() {
        let model = LogisticModel::load(Path::new("models/model.json"))
            .expect("shipped artifact should load");
        assert_eq!(model.info().feature_names, pima_feature_names());
    }
}
