//! Inference service: orchestrates one assessment request.
//!
//! Control flow is strictly linear per request: validate input, obtain the
//! cached model, compute the probability, apply the rule overlay, select
//! advice, stamp the time, assemble the result. Each request is independent;
//! the only shared state is the immutable model artifact.

use std::sync::{Arc, Mutex, PoisonError};

use serde_json::Value;

use crate::domain::{AdviceGenerator, FeatureVector, RiskAssessment, RuleEngine};
use crate::ports::{Classifier, ModelError, ModelProvider};
use crate::CardioError;

/// Service for producing risk assessments from raw vitals input.
pub struct InferenceService<P>
where
    P: ModelProvider,
{
    provider: Arc<P>,
    rules: RuleEngine,
    advice: Mutex<AdviceGenerator>,
}

impl<P> InferenceService<P>
where
    P: ModelProvider,
{
    /// Create a new inference service.
    pub fn new(provider: Arc<P>, rules: RuleEngine, advice: AdviceGenerator) -> Self {
        Self {
            provider,
            rules,
            advice: Mutex::new(advice),
        }
    }

    /// Run the full assessment pipeline on raw request input.
    ///
    /// When no trained model is available the deterministic linear fallback
    /// engages and the result is marked as non-model-derived; a training
    /// failure, by contrast, propagates as a typed error.
    ///
    /// # Errors
    /// [`CardioError::Validation`] for bad input, [`CardioError::Model`] for
    /// a failed training attempt.
    pub fn predict(
        &self,
        raw: &serde_json::Map<String, Value>,
    ) -> Result<RiskAssessment, CardioError> {
        let vector = FeatureVector::from_raw(raw)?;

        let probability = match self.provider.resolve() {
            Ok(model) => Some(model.probability_of_disease(&vector)),
            Err(ModelError::Unavailable) => {
                tracing::warn!("no model available, using deterministic fallback estimate");
                None
            }
            Err(e) => return Err(e.into()),
        };

        let outcome = self.rules.evaluate(&vector, probability);

        // A panic elsewhere only leaves stale RNG state behind, which is
        // safe to keep using.
        let advice = self
            .advice
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .advise_for(outcome.status, outcome.is_emergency);

        tracing::info!(
            risk = outcome.risk_percent,
            status = %outcome.status,
            emergency = outcome.is_emergency,
            source = ?outcome.risk_source,
            "assessment complete"
        );

        Ok(RiskAssessment {
            risk_percent: outcome.risk_percent,
            status: outcome.status,
            color: outcome.status.color().to_string(),
            is_emergency: outcome.is_emergency,
            risk_source: outcome.risk_source,
            messages: outcome.messages,
            advice,
            vitals: outcome.vitals,
            timestamp: chrono::Utc::now(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::FileModelProvider;
    use crate::domain::{RiskSource, RiskStatus, VitalLevel};
    use serde_json::json;

    const DATASET: &str = "\
age,sex,cp,trestbps,chol,thalach,num
63,1,4,160,320,100,2
41,0,1,118,182,172,0
58,1,4,155,300,105,3
39,0,2,120,190,170,0
66,1,3,150,310,98,1
35,0,1,115,175,175,0
60,1,4,158,305,102,4
44,0,2,122,195,165,0
";

    fn raw(v: Value) -> serde_json::Map<String, Value> {
        v.as_object().expect("test input must be an object").clone()
    }

    fn service_with_model(dir: &std::path::Path) -> InferenceService<FileModelProvider> {
        let dataset = dir.join("train.csv");
        std::fs::write(&dataset, DATASET).unwrap();
        let provider = FileModelProvider::new(dir.join("heart_model.json"), dataset);
        InferenceService::new(
            Arc::new(provider),
            RuleEngine::default(),
            AdviceGenerator::with_seed(42, 3),
        )
    }

    fn service_without_model(dir: &std::path::Path) -> InferenceService<FileModelProvider> {
        let provider =
            FileModelProvider::new(dir.join("heart_model.json"), dir.join("train.csv"));
        InferenceService::new(
            Arc::new(provider),
            RuleEngine::default(),
            AdviceGenerator::with_seed(42, 3),
        )
    }

    #[test]
    fn test_model_backed_assessment_is_well_formed() {
        let dir = tempfile::tempdir().expect("tempdir");
        let service = service_with_model(dir.path());

        let result = service
            .predict(&raw(json!({
                "Age": 45, "Sex": 1, "CP": 2, "Chol": 239, "BP": 130, "HR": 150
            })))
            .expect("should predict");

        assert!((2.0..=98.0).contains(&result.risk_percent));
        assert!(!result.is_emergency);
        assert_ne!(result.status, RiskStatus::Emergency);
        assert_eq!(result.risk_source, RiskSource::Model);
        assert_eq!(result.color, result.status.color());
        // 239 < 240: no cholesterol note.
        assert!(!result
            .messages
            .iter()
            .any(|m| m.to_lowercase().contains("cholesterol")));
        assert_eq!(result.advice.len(), 3);
    }

    #[test]
    fn test_emergency_input_forces_emergency_advice() {
        let dir = tempfile::tempdir().expect("tempdir");
        let service = service_with_model(dir.path());

        let result = service
            .predict(&raw(json!({
                "Age": 45, "Sex": 1, "CP": 2, "Chol": 200, "BP": 190, "HR": 120
            })))
            .expect("should predict");

        assert!(result.is_emergency);
        assert_eq!(result.status, RiskStatus::Emergency);
        assert_eq!(result.advice[0], "Sit down and try to remain calm.");
        assert_eq!(result.advice.len(), 4);
    }

    #[test]
    fn test_validation_error_short_circuits() {
        let dir = tempfile::tempdir().expect("tempdir");
        let service = service_with_model(dir.path());

        let err = service
            .predict(&raw(json!({
                "Age": 45, "Sex": 1, "CP": 2, "Chol": 239, "BP": 130
            })))
            .unwrap_err();

        match err {
            CardioError::Validation(e) => assert_eq!(e.field, "HR"),
            other => panic!("expected validation error, got {other}"),
        }
    }

    #[test]
    fn test_fallback_path_is_marked_and_well_formed() {
        let dir = tempfile::tempdir().expect("tempdir");
        let service = service_without_model(dir.path());

        let result = service
            .predict(&raw(json!({
                "Age": 45, "Sex": 1, "CP": 2, "Chol": 239, "BP": 130, "HR": 150
            })))
            .expect("fallback should still assess");

        assert_eq!(result.risk_source, RiskSource::Fallback);
        assert!((2.0..=98.0).contains(&result.risk_percent));
        assert_eq!(result.vitals.blood_pressure.level, VitalLevel::Normal);
        assert_eq!(result.vitals.max_heart_rate.level, VitalLevel::High);
        assert!(!result.messages.is_empty());
    }

    #[test]
    fn test_training_failure_surfaces_as_typed_error() {
        let dir = tempfile::tempdir().expect("tempdir");
        std::fs::write(dir.path().join("train.csv"), "Age,Sex\n1,2\n").unwrap();
        let service = service_without_model(dir.path());

        let err = service
            .predict(&raw(json!({
                "Age": 45, "Sex": 1, "CP": 2, "Chol": 239, "BP": 130, "HR": 150
            })))
            .unwrap_err();

        assert!(matches!(err, CardioError::Model(ModelError::Training(_))));
    }
}
