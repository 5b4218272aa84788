//! Adapters layer: Concrete implementations of ports.
//!
//! - `dataset`: CSV training-dataset loading and label mapping
//! - `logistic`: the trained logistic-regression artifact and its on-disk
//!   format

pub mod dataset;
pub mod logistic;

pub use dataset::{TrainingDataset, TrainingError};
pub use logistic::{ArtifactError, LogisticModel, PersistenceError};
