//! Domain layer: Core business types and logic.
//!
//! Pure types with strict validation, plus the deterministic rule overlay
//! and advice selection. Nothing in here touches the filesystem or a model.

mod advice;
mod assessment;
mod rules;
mod vitals;

pub use advice::AdviceGenerator;
pub use assessment::{
    RiskAssessment, RiskSource, RiskStatus, VitalLevel, VitalReading, VitalsSummary,
};
pub use rules::{EmergencyThresholds, RuleEngine, RuleOutcome, StatusThresholds};
pub use vitals::{FeatureVector, ValidationError, FEATURE_NAMES};
