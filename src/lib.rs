//! # Cardiograph
//!
//! Heart-disease risk inference engine: a trained binary classifier plus a
//! deterministic clinical rule overlay producing structured assessments.
//!
//! ## Architecture
//!
//! The crate follows Hexagonal Architecture:
//! - `domain`: validated vitals, the rule overlay, advice selection,
//!   assessment types
//! - `ports`: trait definitions for the classifier and its provider
//! - `adapters`: dataset loading and the logistic-regression artifact
//! - `application`: use cases orchestrating domain and ports
//!
//! The graphical front end and the persistence of past assessments are
//! external collaborators; this crate's boundary is [`InferenceService`]
//! and the [`domain::RiskAssessment`] it returns.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;

pub use application::{FileModelProvider, InferenceService};
pub use config::AppConfig;
pub use domain::{FeatureVector, RiskAssessment, RiskStatus};

/// Result type for cardiograph operations.
pub type Result<T> = std::result::Result<T, CardioError>;

/// Main error type for cardiograph.
///
/// A small closed set of inspectable kinds; nothing is caught and reduced
/// to free text.
#[derive(Debug, thiserror::Error)]
pub enum CardioError {
    #[error("invalid patient input: {0}")]
    Validation(#[from] domain::ValidationError),

    #[error("model resolution failed: {0}")]
    Model(#[from] ports::ModelError),

    #[error("configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("model artifact error: {0}")]
    Artifact(#[from] adapters::ArtifactError),

    #[error("model persistence error: {0}")]
    Persistence(#[from] adapters::PersistenceError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
