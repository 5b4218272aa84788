//! Assessment result types.
//!
//! Represents the structured output of the risk inference pipeline: a
//! numeric risk score, a categorical status, an emergency flag, advisory
//! messages, and per-vital level labels.

use serde::{Deserialize, Serialize};

/// Categorical risk status for one assessment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum RiskStatus {
    /// Risk score at or below the moderate cut point
    Healthy,
    /// Risk score above the moderate cut point
    Moderate,
    /// Risk score above the high cut point
    High,
    /// Forced by the emergency override, independent of the risk score
    Emergency,
}

impl RiskStatus {
    /// Presentation hint for the front end; fixed status-to-hex mapping.
    #[must_use]
    pub fn color(&self) -> &'static str {
        match self {
            Self::Healthy => "#00b894",
            Self::Moderate => "#ffa502",
            Self::High => "#e17055",
            Self::Emergency => "#d63031",
        }
    }

    /// The headline message shown for this status.
    #[must_use]
    pub fn message(&self) -> &'static str {
        match self {
            Self::Healthy => {
                "Great job! Your heart vitals look good. Keep your healthy habits."
            }
            Self::Moderate => "CAUTION: Monitor your heart health closely.",
            Self::High => {
                "Your heart needs more care. Talk to a doctor about these numbers."
            }
            Self::Emergency => {
                "CRITICAL: Your vitals are at a dangerous level. Please seek medical help immediately."
            }
        }
    }
}

impl std::fmt::Display for RiskStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Healthy => write!(f, "HEALTHY"),
            Self::Moderate => write!(f, "MODERATE"),
            Self::High => write!(f, "HIGH"),
            Self::Emergency => write!(f, "EMERGENCY"),
        }
    }
}

/// Categorical label for a single raw vital, derived from fixed thresholds.
///
/// Reported alongside the overall status, never instead of it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum VitalLevel {
    Low,
    Normal,
    High,
}

impl std::fmt::Display for VitalLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Low => write!(f, "Low"),
            Self::Normal => write!(f, "Normal"),
            Self::High => write!(f, "High"),
        }
    }
}

/// One measured vital with its level label.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VitalReading {
    pub value: f64,
    pub level: VitalLevel,
}

impl VitalReading {
    #[must_use]
    pub fn new(value: f64, level: VitalLevel) -> Self {
        Self { value, level }
    }
}

impl std::fmt::Display for VitalReading {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.value, self.level)
    }
}

/// Per-vital level labels, always computed independently of the status.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VitalsSummary {
    pub blood_pressure: VitalReading,
    pub max_heart_rate: VitalReading,
    pub cholesterol: VitalReading,
}

/// Where the numeric risk score came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskSource {
    /// Probability produced by the trained classifier
    Model,
    /// Deterministic linear estimate; a last-resort value used only when no
    /// trained model is available, not a statistically fit model
    Fallback,
}

/// Complete structured assessment returned to the caller.
///
/// Created per request and not retained by the core; persistence, if any,
/// is an external collaborator's job.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RiskAssessment {
    /// Risk score in percent, one decimal, always within [2, 98]
    pub risk_percent: f64,

    /// Categorical status
    pub status: RiskStatus,

    /// Presentation hint derived one-to-one from `status`
    pub color: String,

    /// True iff the emergency override fired; implies `status == Emergency`
    pub is_emergency: bool,

    /// Whether the score is model-derived or the linear fallback
    pub risk_source: RiskSource,

    /// Status message followed by deterministic contributing-factor notes
    pub messages: Vec<String>,

    /// Advisory tips selected for this status
    pub advice: Vec<String>,

    /// Level labels for the measured vitals
    pub vitals: VitalsSummary,

    /// Time the assessment was produced
    pub timestamp: chrono::DateTime<chrono::Utc>,
}
