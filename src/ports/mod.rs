//! Ports layer: Trait definitions for external operations.
//!
//! Following Hexagonal Architecture, these traits define the boundary
//! between the inference pipeline and the classifier implementation.

mod model;

pub use model::{Classifier, ModelError, ModelProvider};
