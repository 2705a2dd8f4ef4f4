//! Loading trained models from disk.
//!
//! The training job writes `recommender.json` and a sibling
//! `recommender-meta.json`. Loads are cached by the modification times of
//! both files, so retraining takes effect on the next request without a
//! restart. A missing or unreadable model is reported as an error for the
//! caller to degrade on.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::SystemTime;

use moka::future::Cache as MokaCache;
use tracing::{debug, info};

use crate::recommend::FeatureScaling;

use super::error::ModelError;
use super::metadata::ModelMetadata;
use super::regression::ScoringModel;

/// Default location of the model artifact.
pub const DEFAULT_MODEL_PATH: &str = "models/recommender.json";

/// Cache key: modification times of (model, metadata).
type ModelKey = (SystemTime, Option<SystemTime>);

/// Configuration for the model store.
#[derive(Debug, Clone)]
pub struct ModelStoreConfig {
    /// Path to the model artifact.
    pub path: PathBuf,

    /// Reuse a loaded model until its files change.
    /// When off, every load reads the files again.
    pub cache_enabled: bool,

    /// Maximum number of cached model versions.
    pub max_capacity: u64,
}

impl ModelStoreConfig {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            cache_enabled: true,
            max_capacity: 4,
        }
    }

    pub fn with_cache(mut self, enabled: bool) -> Self {
        self.cache_enabled = enabled;
        self
    }

    /// Path of the metadata file next to the model.
    ///
    /// `models/recommender.json` → `models/recommender-meta.json`
    pub fn metadata_path(&self) -> PathBuf {
        let stem = self
            .path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("recommender");
        self.path.with_file_name(format!("{stem}-meta.json"))
    }
}

impl Default for ModelStoreConfig {
    fn default() -> Self {
        Self::new(DEFAULT_MODEL_PATH)
    }
}

/// A validated model with its training metadata.
#[derive(Debug, Clone, PartialEq)]
pub struct LoadedModel {
    pub model: ScoringModel,
    pub metadata: ModelMetadata,
}

impl LoadedModel {
    /// Validate and bundle a model with its metadata.
    pub fn new(model: ScoringModel, metadata: ModelMetadata) -> Result<Self, ModelError> {
        model.validate()?;
        metadata.validate()?;
        Ok(Self { model, metadata })
    }

    /// Feature scaling the model was trained with.
    pub fn scaling(&self) -> FeatureScaling {
        self.metadata.scaling()
    }
}

/// Reads models from disk, with an optional modification-time cache.
pub struct ModelStore {
    config: ModelStoreConfig,
    cache: MokaCache<ModelKey, Arc<LoadedModel>>,
}

impl ModelStore {
    pub fn new(config: ModelStoreConfig) -> Self {
        let cache = MokaCache::builder()
            .max_capacity(config.max_capacity)
            .build();

        Self { config, cache }
    }

    pub fn path(&self) -> &Path {
        &self.config.path
    }

    /// Load the current model.
    ///
    /// Returns [`ModelError::NotFound`] when no artifact exists. A missing
    /// metadata file is not an error: defaults apply.
    pub async fn load(&self) -> Result<Arc<LoadedModel>, ModelError> {
        let model_path = &self.config.path;
        let metadata_path = self.config.metadata_path();

        let model_mtime = match modified(model_path)? {
            Some(mtime) => mtime,
            None => return Err(ModelError::NotFound(model_path.clone())),
        };

        if !self.config.cache_enabled {
            return read_model(model_path, &metadata_path).map(Arc::new);
        }

        let key = (model_mtime, modified(&metadata_path)?);
        if let Some(cached) = self.cache.get(&key).await {
            return Ok(cached);
        }

        let loaded = Arc::new(read_model(model_path, &metadata_path)?);
        info!(path = %model_path.display(), "loaded scoring model");

        // Only the newest version is worth keeping.
        self.cache.invalidate_all();
        self.cache.insert(key, loaded.clone()).await;

        Ok(loaded)
    }

    /// Number of cached model versions.
    pub fn cached_versions(&self) -> u64 {
        self.cache.entry_count()
    }

    /// Drop any cached model.
    pub fn invalidate(&self) {
        self.cache.invalidate_all();
    }
}

/// Modification time of `path`, or `None` if it does not exist.
fn modified(path: &Path) -> Result<Option<SystemTime>, ModelError> {
    match std::fs::metadata(path) {
        Ok(meta) => meta.modified().map(Some).map_err(|source| ModelError::Io {
            path: path.to_path_buf(),
            source,
        }),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
        Err(source) => Err(ModelError::Io {
            path: path.to_path_buf(),
            source,
        }),
    }
}

fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T, ModelError> {
    let contents = std::fs::read_to_string(path).map_err(|source| {
        if source.kind() == ErrorKind::NotFound {
            ModelError::NotFound(path.to_path_buf())
        } else {
            ModelError::Io {
                path: path.to_path_buf(),
                source,
            }
        }
    })?;
    serde_json::from_str(&contents).map_err(|source| ModelError::Json {
        path: path.to_path_buf(),
        source,
    })
}

fn read_model(model_path: &Path, metadata_path: &Path) -> Result<LoadedModel, ModelError> {
    let model: ScoringModel = read_json(model_path)?;

    let metadata = match read_json::<ModelMetadata>(metadata_path) {
        Ok(metadata) => metadata,
        Err(ModelError::NotFound(_)) => {
            debug!(path = %metadata_path.display(), "no model metadata, using defaults");
            ModelMetadata::default()
        }
        Err(e) => return Err(e),
    };

    LoadedModel::new(model, metadata)
}
