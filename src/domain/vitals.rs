//! Patient vitals input types for heart-disease risk prediction.
//!
//! A [`FeatureVector`] is the validated, ordered numeric representation of
//! one observation. It is built per request from raw (possibly string-typed)
//! input, is immutable, and is discarded when the request completes.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Canonical feature ordering. The classifier is trained against this exact
/// order; [`FeatureVector::to_vec`] must match it.
pub const FEATURE_NAMES: [&str; 6] = [
    "Age",
    "Sex",
    "Chest pain type",
    "Cholesterol",
    "BP",
    "Max HR",
];

/// External input keys accepted by [`FeatureVector::from_raw`].
const KEY_AGE: &str = "Age";
const KEY_SEX: &str = "Sex";
const KEY_CP: &str = "CP";
const KEY_CHOL: &str = "Chol";
const KEY_BP: &str = "BP";
const KEY_HR: &str = "HR";

/// Validation error for a single input field.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid field '{field}': {reason}")]
pub struct ValidationError {
    /// The offending input key.
    pub field: String,
    /// Human-readable reason (missing, non-numeric, out of range).
    pub reason: String,
}

impl ValidationError {
    fn new(field: &str, reason: impl Into<String>) -> Self {
        Self {
            field: field.to_string(),
            reason: reason.into(),
        }
    }
}

/// Validated vitals for one patient observation.
///
/// Out-of-range values are rejected at construction, never clamped; clamping
/// is exclusively an output concern of the rule engine.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FeatureVector {
    /// Age in years (0-120)
    pub age: i64,

    /// Sex: 0 = female, 1 = male
    pub sex: i64,

    /// Chest pain type code (1-4, where 4 is the severe code)
    pub chest_pain_type: i64,

    /// Serum cholesterol in mg/dL (>= 0)
    pub cholesterol: f64,

    /// Resting blood pressure in mmHg (>= 0)
    pub blood_pressure: f64,

    /// Maximum heart rate achieved in bpm (>= 0)
    pub max_heart_rate: f64,
}

impl FeatureVector {
    /// Build a validated vector from raw request input.
    ///
    /// Accepts the external keys `Age, Sex, CP, Chol, BP, HR`; each value may
    /// be a JSON number or a numeric string. Age, sex and chest pain type
    /// parse as integers, the remaining vitals as floats.
    ///
    /// # Errors
    /// Returns [`ValidationError`] naming the first offending field: missing,
    /// non-numeric, or outside its declared domain.
    pub fn from_raw(raw: &serde_json::Map<String, Value>) -> Result<Self, ValidationError> {
        let age = parse_int(raw, KEY_AGE)?;
        let sex = parse_int(raw, KEY_SEX)?;
        let chest_pain_type = parse_int(raw, KEY_CP)?;
        let cholesterol = parse_float(raw, KEY_CHOL)?;
        let blood_pressure = parse_float(raw, KEY_BP)?;
        let max_heart_rate = parse_float(raw, KEY_HR)?;

        Self::new(
            age,
            sex,
            chest_pain_type,
            cholesterol,
            blood_pressure,
            max_heart_rate,
        )
    }

    /// Construct from already-typed values, applying the domain checks.
    ///
    /// # Errors
    /// Returns [`ValidationError`] if any value fails its numeric domain.
    pub fn new(
        age: i64,
        sex: i64,
        chest_pain_type: i64,
        cholesterol: f64,
        blood_pressure: f64,
        max_heart_rate: f64,
    ) -> Result<Self, ValidationError> {
        if !(0..=120).contains(&age) {
            return Err(ValidationError::new(
                KEY_AGE,
                format!("age {age} out of range [0, 120]"),
            ));
        }
        if sex != 0 && sex != 1 {
            return Err(ValidationError::new(
                KEY_SEX,
                format!("sex {sex} must be 0 or 1"),
            ));
        }
        if !(1..=4).contains(&chest_pain_type) {
            return Err(ValidationError::new(
                KEY_CP,
                format!("chest pain type {chest_pain_type} out of range [1, 4]"),
            ));
        }
        if !cholesterol.is_finite() || cholesterol < 0.0 {
            return Err(ValidationError::new(
                KEY_CHOL,
                format!("cholesterol {cholesterol} must be >= 0"),
            ));
        }
        if !blood_pressure.is_finite() || blood_pressure < 0.0 {
            return Err(ValidationError::new(
                KEY_BP,
                format!("blood pressure {blood_pressure} must be >= 0"),
            ));
        }
        if !max_heart_rate.is_finite() || max_heart_rate < 0.0 {
            return Err(ValidationError::new(
                KEY_HR,
                format!("max heart rate {max_heart_rate} must be >= 0"),
            ));
        }

        Ok(Self {
            age,
            sex,
            chest_pain_type,
            cholesterol,
            blood_pressure,
            max_heart_rate,
        })
    }

    /// Convert to the canonical feature order for classifier input.
    /// Order matches [`FEATURE_NAMES`].
    #[must_use]
    pub fn to_vec(&self) -> [f64; 6] {
        [
            self.age as f64,
            self.sex as f64,
            self.chest_pain_type as f64,
            self.cholesterol,
            self.blood_pressure,
            self.max_heart_rate,
        ]
    }
}

fn get_value<'a>(
    raw: &'a serde_json::Map<String, Value>,
    key: &str,
) -> Result<&'a Value, ValidationError> {
    raw.get(key)
        .ok_or_else(|| ValidationError::new(key, "missing field"))
}

fn parse_int(raw: &serde_json::Map<String, Value>, key: &str) -> Result<i64, ValidationError> {
    match get_value(raw, key)? {
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().filter(|f| f.fract() == 0.0).map(|f| f as i64))
            .ok_or_else(|| ValidationError::new(key, format!("'{n}' is not an integer"))),
        Value::String(s) => s
            .trim()
            .parse::<i64>()
            .map_err(|_| ValidationError::new(key, format!("'{s}' is not an integer"))),
        other => Err(ValidationError::new(
            key,
            format!("expected a number, got {other}"),
        )),
    }
}

fn parse_float(raw: &serde_json::Map<String, Value>, key: &str) -> Result<f64, ValidationError> {
    match get_value(raw, key)? {
        Value::Number(n) => n
            .as_f64()
            .ok_or_else(|| ValidationError::new(key, format!("'{n}' is not a number"))),
        Value::String(s) => s
            .trim()
            .parse::<f64>()
            .map_err(|_| ValidationError::new(key, format!("'{s}' is not a number"))),
        other => Err(ValidationError::new(
            key,
            format!("expected a number, got {other}"),
        )),
    }
}
