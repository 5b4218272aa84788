//! Application layer: Use cases and services.
//!
//! Orchestrates domain logic with the model port to implement the
//! assessment pipeline.

mod inference;
mod provider;

pub use inference::InferenceService;
pub use provider::FileModelProvider;
