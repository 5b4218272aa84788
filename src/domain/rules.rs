//! Clinical rule overlay.
//!
//! Converts a raw model probability plus raw vitals into the categorical
//! part of the assessment: per-vital level labels, the emergency override,
//! the clamped risk score, the status category, and contributing-factor
//! messages. Pure over a validated [`FeatureVector`]; it never fails.

use serde::{Deserialize, Serialize};

use crate::domain::assessment::{
    RiskSource, RiskStatus, VitalLevel, VitalReading, VitalsSummary,
};
use crate::domain::vitals::FeatureVector;

/// Displayed risk is pulled away from 0 and 100; a raw model output at the
/// extremes is treated as overconfident.
const RISK_FLOOR: f64 = 2.0;
const RISK_CEIL: f64 = 98.0;

// Per-vital label cut points (fixed, independent of risk thresholds).
const BP_HIGH: f64 = 140.0;
const BP_LOW: f64 = 90.0;
const HR_HIGH: f64 = 100.0;
const HR_LOW: f64 = 50.0;
const CHOL_HIGH: f64 = 240.0;

/// Status cut points over the risk percentage. Strictly-greater-than
/// semantics at both boundaries.
///
/// Dataset variants in this family disagree on the moderate cut point
/// (30 vs 40); the default follows the 30/70 variant and the value is
/// configuration, not a constant.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StatusThresholds {
    /// risk > high_risk => HIGH
    pub high_risk: f64,
    /// risk > moderate_risk => MODERATE
    pub moderate_risk: f64,
}

impl Default for StatusThresholds {
    fn default() -> Self {
        Self {
            high_risk: 70.0,
            moderate_risk: 30.0,
        }
    }
}

/// Triggers for the emergency override.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EmergencyThresholds {
    /// blood pressure strictly above this forces EMERGENCY
    pub bp_above: f64,
    /// heart rate strictly above this forces EMERGENCY
    pub hr_above: f64,
    /// heart rate strictly below this forces EMERGENCY
    pub hr_below: f64,
    /// chest pain code that forces EMERGENCY
    pub severe_chest_pain: i64,
}

impl Default for EmergencyThresholds {
    fn default() -> Self {
        Self {
            bp_above: 180.0,
            hr_above: 160.0,
            hr_below: 40.0,
            severe_chest_pain: 4,
        }
    }
}

/// Result of the rule overlay, before advice and timestamp are attached.
#[derive(Debug, Clone)]
pub struct RuleOutcome {
    pub risk_percent: f64,
    pub status: RiskStatus,
    pub is_emergency: bool,
    pub risk_source: RiskSource,
    pub messages: Vec<String>,
    pub vitals: VitalsSummary,
}

/// Deterministic threshold/emergency logic layered on top of the classifier.
#[derive(Debug, Clone, Copy)]
pub struct RuleEngine {
    thresholds: StatusThresholds,
    emergency: EmergencyThresholds,
}

impl RuleEngine {
    #[must_use]
    pub fn new(thresholds: StatusThresholds, emergency: EmergencyThresholds) -> Self {
        Self {
            thresholds,
            emergency,
        }
    }

    /// Evaluate one validated observation.
    ///
    /// `model_probability` is the classifier output in [0, 1], or `None`
    /// when running in no-model fallback mode.
    #[must_use]
    pub fn evaluate(&self, vector: &FeatureVector, model_probability: Option<f64>) -> RuleOutcome {
        let vitals = classify_vitals(vector);
        let is_emergency = self.is_emergency(vector);

        let (raw_percent, risk_source) = match model_probability {
            Some(p) => (p * 100.0, RiskSource::Model),
            None => (fallback_score(vector), RiskSource::Fallback),
        };
        let risk_percent = clamp_risk(raw_percent);

        // The override wins over the score-derived status; the numeric risk
        // is still reported for information.
        let status = if is_emergency {
            RiskStatus::Emergency
        } else if risk_percent > self.thresholds.high_risk {
            RiskStatus::High
        } else if risk_percent > self.thresholds.moderate_risk {
            RiskStatus::Moderate
        } else {
            RiskStatus::Healthy
        };

        let mut messages = vec![status.message().to_string()];
        if vitals.blood_pressure.level == VitalLevel::High {
            messages.push("High blood pressure detected. Reduce salt intake.".to_string());
        }
        if vector.cholesterol > CHOL_HIGH {
            messages.push(
                "High cholesterol detected. Eat more fiber to lower bad cholesterol.".to_string(),
            );
        }

        RuleOutcome {
            risk_percent,
            status,
            is_emergency,
            risk_source,
            messages,
            vitals,
        }
    }

    fn is_emergency(&self, v: &FeatureVector) -> bool {
        v.blood_pressure > self.emergency.bp_above
            || v.max_heart_rate > self.emergency.hr_above
            || v.max_heart_rate < self.emergency.hr_below
            || v.chest_pain_type == self.emergency.severe_chest_pain
    }
}

impl Default for RuleEngine {
    fn default() -> Self {
        Self::new(StatusThresholds::default(), EmergencyThresholds::default())
    }
}

/// Round to one decimal, then clamp into the displayed range.
fn clamp_risk(percent: f64) -> f64 {
    let rounded = (percent * 10.0).round() / 10.0;
    rounded.clamp(RISK_FLOOR, RISK_CEIL)
}

/// Last-resort linear estimate used only when no trained model is available.
/// The coefficients are hand-tuned, not statistically fit.
fn fallback_score(v: &FeatureVector) -> f64 {
    (v.age as f64) * 0.3 + v.cholesterol / 10.0 + v.blood_pressure / 5.0
        + (v.chest_pain_type as f64) * 10.0
        - v.max_heart_rate / 10.0
}

fn classify_vitals(v: &FeatureVector) -> VitalsSummary {
    let bp_level = if v.blood_pressure >= BP_HIGH {
        VitalLevel::High
    } else if v.blood_pressure < BP_LOW {
        VitalLevel::Low
    } else {
        VitalLevel::Normal
    };

    let hr_level = if v.max_heart_rate >= HR_HIGH {
        VitalLevel::High
    } else if v.max_heart_rate < HR_LOW {
        VitalLevel::Low
    } else {
        VitalLevel::Normal
    };

    let chol_level = if v.cholesterol >= CHOL_HIGH {
        VitalLevel::High
    } else {
        VitalLevel::Normal
    };

    VitalsSummary {
        blood_pressure: VitalReading::new(v.blood_pressure, bp_level),
        max_heart_rate: VitalReading::new(v.max_heart_rate, hr_level),
        cholesterol: VitalReading::new(v.cholesterol, chol_level),
    }
}
