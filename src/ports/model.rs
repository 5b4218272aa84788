//! Model port: traits for the trained classifier and its provider.
//!
//! The rule overlay only needs a probability-of-disease contract; any binary
//! classifier satisfying it is interchangeable. The provider abstracts where
//! the artifact comes from (disk, training, a test double).

use std::sync::Arc;

use crate::adapters::TrainingError;
use crate::domain::FeatureVector;

/// Errors from model resolution.
#[derive(Debug, Clone, thiserror::Error)]
pub enum ModelError {
    #[error("no trained model available: no persisted artifact and no training dataset")]
    Unavailable,

    #[error("training failed: {0}")]
    Training(#[from] TrainingError),
}

/// A trained binary classifier.
///
/// Implementations are immutable after construction and therefore safe to
/// share read-only across concurrent requests.
pub trait Classifier: Send + Sync {
    /// Probability of the positive (disease-present) class, in [0, 1].
    fn probability_of_disease(&self, vector: &FeatureVector) -> f64;

    /// The feature ordering this classifier was trained against.
    fn feature_schema(&self) -> &[String];
}

/// Resolves the process-wide model artifact.
///
/// Resolution happens at most once per process lifetime; every call after
/// the first returns the cached outcome. A failed training attempt is not
/// retried automatically.
pub trait ModelProvider: Send + Sync {
    type Model: Classifier;

    /// Load or train the model artifact.
    ///
    /// # Errors
    /// [`ModelError::Unavailable`] when neither a persisted artifact nor a
    /// dataset exists (callers may engage the deterministic fallback), or
    /// [`ModelError::Training`] when the dataset is malformed.
    fn resolve(&self) -> Result<Arc<Self::Model>, ModelError>;
}
