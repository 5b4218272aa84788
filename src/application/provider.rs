//! Model provider: load-or-train resolution of the process-wide artifact.

use std::path::PathBuf;
use std::sync::Arc;

use once_cell::sync::OnceCell;

use crate::adapters::{LogisticModel, TrainingDataset};
use crate::ports::{ModelError, ModelProvider};

/// Resolves the [`LogisticModel`] artifact from disk, training from the
/// configured dataset when no artifact exists yet.
///
/// The outcome is cached: concurrent first callers block on a single
/// resolution, later callers reuse it, and a failed training attempt is not
/// retried until the process restarts with a changed input.
pub struct FileModelProvider {
    artifact_path: PathBuf,
    dataset_path: PathBuf,
    state: OnceCell<Result<Arc<LogisticModel>, ModelError>>,
}

impl FileModelProvider {
    #[must_use]
    pub fn new(artifact_path: impl Into<PathBuf>, dataset_path: impl Into<PathBuf>) -> Self {
        Self {
            artifact_path: artifact_path.into(),
            dataset_path: dataset_path.into(),
            state: OnceCell::new(),
        }
    }

    fn resolve_once(&self) -> Result<Arc<LogisticModel>, ModelError> {
        // Fast path: a persisted artifact skips training entirely.
        if self.artifact_path.exists() {
            match LogisticModel::load(&self.artifact_path) {
                Ok(model) => {
                    tracing::info!(path = %self.artifact_path.display(), "loaded model artifact");
                    return Ok(Arc::new(model));
                }
                Err(e) => {
                    // Fail closed: an unreadable or schema-mismatched
                    // artifact is never used and never silently replaced.
                    tracing::warn!(
                        path = %self.artifact_path.display(),
                        error = %e,
                        "model artifact unusable"
                    );
                    return Err(ModelError::Unavailable);
                }
            }
        }

        if self.dataset_path.exists() {
            tracing::info!(
                path = %self.dataset_path.display(),
                "no artifact found, training from dataset"
            );
            let dataset = TrainingDataset::load(&self.dataset_path)?;
            let model = LogisticModel::train(&dataset);

            // Persist for faster future startups. A write failure is logged
            // and non-fatal; the in-memory model still serves this process.
            if let Err(e) = model.save(&self.artifact_path) {
                tracing::warn!(
                    path = %self.artifact_path.display(),
                    error = %e,
                    "failed to persist model artifact"
                );
            }
            return Ok(Arc::new(model));
        }

        Err(ModelError::Unavailable)
    }
}

impl ModelProvider for FileModelProvider {
    type Model = LogisticModel;

    fn resolve(&self) -> Result<Arc<LogisticModel>, ModelError> {
        self.state.get_or_init(|| self.resolve_once()).clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::FeatureVector;
    use crate::ports::Classifier;

    const DATASET: &str = "\
Age,Sex,Chest pain type,BP,Cholesterol,Max HR,Heart Disease
70,1,4,130,322,109,Presence
67,0,3,115,564,160,Absence
57,1,2,124,261,141,Presence
64,1,4,128,263,105,Absence
74,0,2,120,269,121,Absence
65,1,4,120,177,140,Presence
";

    fn sample_vector() -> FeatureVector {
        FeatureVector::new(60, 1, 3, 250.0, 130.0, 120.0).unwrap()
    }

    #[test]
    fn test_trains_and_persists_when_no_artifact() {
        let dir = tempfile::tempdir().expect("tempdir");
        let artifact = dir.path().join("heart_model.json");
        let dataset = dir.path().join("train.csv");
        std::fs::write(&dataset, DATASET).unwrap();

        let provider = FileModelProvider::new(&artifact, &dataset);
        let model = provider.resolve().expect("should train");
        assert!(artifact.exists(), "artifact should be persisted");

        // A fresh provider takes the load fast path and predicts identically.
        let reloaded = FileModelProvider::new(&artifact, dir.path().join("absent.csv"))
            .resolve()
            .expect("should load persisted artifact");
        let v = sample_vector();
        assert_eq!(
            model.probability_of_disease(&v),
            reloaded.probability_of_disease(&v)
        );
    }

    #[test]
    fn test_unavailable_when_neither_exists() {
        let dir = tempfile::tempdir().expect("tempdir");
        let provider = FileModelProvider::new(
            dir.path().join("heart_model.json"),
            dir.path().join("train.csv"),
        );
        assert!(matches!(
            provider.resolve().unwrap_err(),
            ModelError::Unavailable
        ));
    }

    #[test]
    fn test_malformed_dataset_fails_once_and_is_not_retried() {
        let dir = tempfile::tempdir().expect("tempdir");
        let artifact = dir.path().join("heart_model.json");
        let dataset = dir.path().join("train.csv");
        std::fs::write(&dataset, "Age,Sex\n1,2\n").unwrap();

        let provider = FileModelProvider::new(&artifact, &dataset);
        assert!(matches!(
            provider.resolve().unwrap_err(),
            ModelError::Training(_)
        ));

        // Fixing the file does not change the cached outcome for this
        // process; a restart is required.
        std::fs::write(&dataset, DATASET).unwrap();
        assert!(matches!(
            provider.resolve().unwrap_err(),
            ModelError::Training(_)
        ));
    }

    #[test]
    fn test_schema_mismatched_artifact_fails_closed() {
        let dir = tempfile::tempdir().expect("tempdir");
        let artifact = dir.path().join("heart_model.json");
        let dataset = dir.path().join("train.csv");
        std::fs::write(&dataset, DATASET).unwrap();

        // Train once, then corrupt the schema on disk.
        FileModelProvider::new(&artifact, &dataset)
            .resolve()
            .expect("initial training");
        let mut json: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&artifact).unwrap()).unwrap();
        json["feature_names"] = serde_json::json!(["a", "b", "c", "d", "e", "f"]);
        std::fs::write(&artifact, serde_json::to_string(&json).unwrap()).unwrap();

        // Even though the dataset is still present, the bad artifact is not
        // silently replaced by retraining.
        let provider = FileModelProvider::new(&artifact, &dataset);
        assert!(matches!(
            provider.resolve().unwrap_err(),
            ModelError::Unavailable
        ));
    }
}
