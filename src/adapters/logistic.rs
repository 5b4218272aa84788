//! Logistic-regression model artifact.
//!
//! A standardized logistic classifier trained by full-batch gradient
//! descent. The training loop uses no randomness, so a given dataset always
//! produces the same artifact, and a persisted artifact reloaded in a fresh
//! process yields identical probabilities.
//!
//! The artifact embeds the feature-name ordering it was trained against;
//! loading verifies it so a schema mismatch fails closed instead of
//! silently mispredicting.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::adapters::TrainingDataset;
use crate::domain::{FeatureVector, FEATURE_NAMES};
use crate::ports::Classifier;

const LEARNING_RATE: f64 = 0.1;
const EPOCHS: usize = 500;

/// Artifact write failure. Logged and non-fatal: the freshly trained
/// in-memory model is still usable for the current process.
#[derive(Debug, thiserror::Error)]
pub enum PersistenceError {
    #[error("cannot write model artifact: {0}")]
    Io(#[from] std::io::Error),

    #[error("cannot serialize model artifact: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Artifact read failure. The provider treats any of these as "no usable
/// artifact" and fails closed.
#[derive(Debug, thiserror::Error)]
pub enum ArtifactError {
    #[error("cannot read model artifact: {0}")]
    Io(#[from] std::io::Error),

    #[error("model artifact is corrupt: {0}")]
    Corrupt(#[from] serde_json::Error),

    #[error("feature schema mismatch: expected {expected:?}, found {found:?}")]
    SchemaMismatch {
        expected: Vec<String>,
        found: Vec<String>,
    },
}

/// Trained classifier plus the feature schema it was trained against.
/// Immutable after construction.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogisticModel {
    feature_names: Vec<String>,
    /// Per-feature standardization mean
    means: Vec<f64>,
    /// Per-feature standardization deviation (1.0 for constant columns)
    stds: Vec<f64>,
    /// One weight per standardized feature
    weights: Vec<f64>,
    bias: f64,
    /// Number of observations the model was fit on
    samples: usize,
    trained_at: chrono::DateTime<chrono::Utc>,
}

impl LogisticModel {
    /// Fit a model on a schema-aligned dataset.
    ///
    /// Full-batch gradient descent over standardized features with a fixed
    /// learning rate and epoch count. Deterministic for a given dataset.
    #[must_use]
    pub fn train(dataset: &TrainingDataset) -> Self {
        let n = dataset.rows.len() as f64;
        let dim = FEATURE_NAMES.len();

        // Standardize so the fixed learning rate behaves across the very
        // different feature scales (age vs cholesterol).
        let mut means = vec![0.0; dim];
        for row in &dataset.rows {
            for (m, x) in means.iter_mut().zip(row.iter()) {
                *m += x;
            }
        }
        for m in &mut means {
            *m /= n;
        }

        let mut stds = vec![0.0; dim];
        for row in &dataset.rows {
            for ((s, m), x) in stds.iter_mut().zip(&means).zip(row.iter()) {
                *s += (x - m).powi(2);
            }
        }
        for s in &mut stds {
            *s = (*s / n).sqrt();
            if *s == 0.0 {
                *s = 1.0;
            }
        }

        let standardized: Vec<Vec<f64>> = dataset
            .rows
            .iter()
            .map(|row| {
                row.iter()
                    .zip(&means)
                    .zip(&stds)
                    .map(|((x, m), s)| (x - m) / s)
                    .collect()
            })
            .collect();

        let mut weights = vec![0.0; dim];
        let mut bias = 0.0;
        for _ in 0..EPOCHS {
            let mut grad_w = vec![0.0; dim];
            let mut grad_b = 0.0;
            for (row, &label) in standardized.iter().zip(&dataset.labels) {
                let z = bias
                    + weights
                        .iter()
                        .zip(row.iter())
                        .map(|(w, x)| w * x)
                        .sum::<f64>();
                let error = sigmoid(z) - f64::from(label);
                for (g, x) in grad_w.iter_mut().zip(row.iter()) {
                    *g += error * x;
                }
                grad_b += error;
            }
            for (w, g) in weights.iter_mut().zip(&grad_w) {
                *w -= LEARNING_RATE * g / n;
            }
            bias -= LEARNING_RATE * grad_b / n;
        }

        tracing::info!(
            samples = dataset.rows.len(),
            "trained logistic model on dataset"
        );

        Self {
            feature_names: FEATURE_NAMES.iter().map(ToString::to_string).collect(),
            means,
            stds,
            weights,
            bias,
            samples: dataset.rows.len(),
            trained_at: chrono::Utc::now(),
        }
    }

    /// Load a persisted artifact, verifying its embedded feature schema.
    ///
    /// # Errors
    /// Returns [`ArtifactError`] on unreadable or corrupt files, or when the
    /// embedded schema does not match [`FEATURE_NAMES`].
    pub fn load(path: &Path) -> Result<Self, ArtifactError> {
        let contents = fs::read_to_string(path)?;
        let model: Self = serde_json::from_str(&contents)?;

        if model.feature_names != FEATURE_NAMES {
            return Err(ArtifactError::SchemaMismatch {
                expected: FEATURE_NAMES.iter().map(ToString::to_string).collect(),
                found: model.feature_names,
            });
        }
        Ok(model)
    }

    /// Persist the artifact as JSON.
    ///
    /// Writes to a sibling temp file and renames into place, so a crash
    /// mid-write never leaves a corrupt artifact visible to the next start.
    ///
    /// # Errors
    /// Returns [`PersistenceError`] if the artifact cannot be written.
    pub fn save(&self, path: &Path) -> Result<(), PersistenceError> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let mut tmp = path.as_os_str().to_owned();
        tmp.push(".tmp");
        let tmp = std::path::PathBuf::from(tmp);

        fs::write(&tmp, serde_json::to_vec_pretty(self)?)?;
        fs::rename(&tmp, path)?;
        Ok(())
    }

    /// Number of observations the model was fit on.
    #[must_use]
    pub fn samples(&self) -> usize {
        self.samples
    }
}

impl Classifier for LogisticModel {
    fn probability_of_disease(&self, vector: &FeatureVector) -> f64 {
        let z = self.bias
            + vector
                .to_vec()
                .iter()
                .zip(&self.means)
                .zip(&self.stds)
                .zip(&self.weights)
                .map(|(((x, m), s), w)| w * (x - m) / s)
                .sum::<f64>();
        sigmoid(z)
    }

    fn feature_schema(&self) -> &[String] {
        &self.feature_names
    }
}

fn sigmoid(z: f64) -> f64 {
    1.0 / (1.0 + (-z).exp())
}
