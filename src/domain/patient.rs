//! Patient data types for diabetes risk prediction.
//!
//! Features match the Pima Indians Diabetes dataset the classifier was
//! trained on. Field order is significant at the model boundary and is fixed
//! by `FEATURE_NAMES`; internally every field is named so a record can never
//! be silently reordered.

use std::ops::RangeInclusive;

use serde::{Deserialize, Serialize};

/// Number of clinical features the model consumes.
pub const FEATURE_COUNT: usize = 8;

/// Feature names in the training-time column order.
pub const FEATURE_NAMES: [&str; FEATURE_COUNT] = [
    "pregnancies",
    "glucose",
    "blood_pressure",
    "skin_thickness",
    "insulin",
    "bmi",
    "diabetes_pedigree_function",
    "age",
];

// Clinically plausible ranges, taken from the training cohort after
// imputation. Out-of-range values are rejected rather than clamped: silent
// clamping would misrepresent clinical risk.
const PREGNANCIES_RANGE: RangeInclusive<f64> = 0.0..=17.0;
const GLUCOSE_RANGE: RangeInclusive<f64> = 44.0..=199.0;
const BLOOD_PRESSURE_RANGE: RangeInclusive<f64> = 24.0..=122.0;
const SKIN_THICKNESS_RANGE: RangeInclusive<f64> = 7.0..=99.0;
const INSULIN_RANGE: RangeInclusive<f64> = 14.0..=846.0;
const BMI_RANGE: RangeInclusive<f64> = 18.2..=67.1;
const PEDIGREE_RANGE: RangeInclusive<f64> = 0.078..=2.42;
const AGE_RANGE: RangeInclusive<f64> = 21.0..=81.0;

/// Clinical features for one patient.
///
/// All 8 fields are required; serde rejects records with any field missing or
/// non-numeric. Order at the model boundary: pregnancies, glucose,
/// blood_pressure, skin_thickness, insulin, bmi, diabetes_pedigree_function,
/// age.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PatientFeatures {
    /// Number of pregnancies (count, 0-17)
    pub pregnancies: f64,

    /// Plasma glucose concentration in mg/dL (44-199)
    pub glucose: f64,

    /// Diastolic blood pressure in mmHg (24-122)
    pub blood_pressure: f64,

    /// Triceps skin fold thickness in mm (7-99)
    pub skin_thickness: f64,

    /// 2-hour serum insulin in µU/mL (14-846)
    pub insulin: f64,

    /// Body mass index in kg/m² (18.2-67.1)
    pub bmi: f64,

    /// Diabetes pedigree function, unitless (0.078-2.42)
    pub diabetes_pedigree_function: f64,

    /// Age in years (21-81)
    pub age: f64,
}

impl PatientFeatures {
    /// Convert features to the positional form the model consumes.
    /// Order matches `FEATURE_NAMES`.
    #[must_use]
    pub fn to_array(&self) -> [f64; FEATURE_COUNT] {
        [
            self.pregnancies,
            self.glucose,
            self.blood_pressure,
            self.skin_thickness,
            self.insulin,
            self.bmi,
            self.diabetes_pedigree_function,
            self.age,
        ]
    }

    /// Validate that all features are finite and within clinical ranges.
    ///
    /// Checks every field and reports all violations at once; a record is
    /// never partially accepted.
    ///
    /// # Errors
    /// Returns a `ValidationError` naming each offending field.
    pub fn validate(&self) -> Result<(), ValidationError> {
        let mut fields = Vec::new();

        check_range("pregnancies", self.pregnancies, &PREGNANCIES_RANGE, &mut fields);
        check_integer("pregnancies", self.pregnancies, &mut fields);
        check_range("glucose", self.glucose, &GLUCOSE_RANGE, &mut fields);
        check_range(
            "blood_pressure",
            self.blood_pressure,
            &BLOOD_PRESSURE_RANGE,
            &mut fields,
        );
        check_range(
            "skin_thickness",
            self.skin_thickness,
            &SKIN_THICKNESS_RANGE,
            &mut fields,
        );
        check_range("insulin", self.insulin, &INSULIN_RANGE, &mut fields);
        check_range("bmi", self.bmi, &BMI_RANGE, &mut fields);
        check_range(
            "diabetes_pedigree_function",
            self.diabetes_pedigree_function,
            &PEDIGREE_RANGE,
            &mut fields,
        );
        check_range("age", self.age, &AGE_RANGE, &mut fields);
        check_integer("age", self.age, &mut fields);

        if fields.is_empty() {
            Ok(())
        } else {
            Err(ValidationError { fields })
        }
    }
}

fn check_range(
    field: &'static str,
    value: f64,
    range: &RangeInclusive<f64>,
    out: &mut Vec<FieldError>,
) {
    if !value.is_finite() {
        out.push(FieldError {
            field,
            message: format!("{field} must be a finite number, got {value}"),
        });
    } else if !range.contains(&value) {
        out.push(FieldError {
            field,
            message: format!(
                "{field} {} out of range [{}, {}]",
                value,
                range.start(),
                range.end()
            ),
        });
    }
}

fn check_integer(field: &'static str, value: f64, out: &mut Vec<FieldError>) {
    if value.is_finite() && value.fract() != 0.0 {
        out.push(FieldError {
            field,
            message: format!("{field} must be a whole number, got {value}"),
        });
    }
}

/// A single rejected field with the reason for rejection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    /// Name of the offending field
    pub field: &'static str,

    /// Human-readable rejection reason
    pub message: String,
}

/// Structured validation failure naming every offending field.
///
/// Recoverable and surfaced to the caller; never fatal to the process.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationError {
    pub fields: Vec<FieldError>,
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut first = true;
        for e in &self.fields {
            if !first {
                write!(f, "; ")?;
            }
            write!(f, "{}", e.message)?;
            first = false;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationError {}

/// The 8 feature values after the frozen per-field standard scaling.
///
/// Produced only by a loaded model artifact; the transform parameters are
/// read-only after load and never recomputed at request time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScaledFeatures([f64; FEATURE_COUNT]);

impl ScaledFeatures {
    #[must_use]
    pub fn new(values: [f64; FEATURE_COUNT]) -> Self {
        Self(values)
    }

    #[must_use]
    pub fn as_array(&self) -> &[f64; FEATURE_COUNT] {
        &self.0
    }
}
