//! Trained scoring models.
//!
//! Training happens offline. This module only reads the exported artifact,
//! checks it matches the serving feature layout, and runs inference.

mod error;
mod metadata;
mod regression;
mod store;

pub use error::ModelError;
pub use metadata::ModelMetadata;
pub use regression::{Node, ScoringModel, Tree};
pub use store::{DEFAULT_MODEL_PATH, LoadedModel, ModelStore, ModelStoreConfig};
