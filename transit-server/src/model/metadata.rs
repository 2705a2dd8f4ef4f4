//! Training provenance stored next to a model artifact.

use std::collections::BTreeMap;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::domain::Mode;
use crate::recommend::{DEFAULT_COST_NORMALIZER, FEATURE_NAMES, FeatureScaling};

use super::error::ModelError;

/// Metadata written by the training job.
///
/// Every field is optional so that older metadata files still load.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ModelMetadata {
    /// Feature names, in the order the model expects them.
    #[serde(default)]
    pub features: Vec<String>,

    /// Mode name to model index, e.g. `{"Bus": 0}`.
    #[serde(default)]
    pub mode_mapping: BTreeMap<String, u8>,

    #[serde(default)]
    pub training_samples: Option<u64>,

    #[serde(default)]
    pub test_mse: Option<f64>,

    /// "real" or "synthetic".
    #[serde(default)]
    pub data_source: Option<String>,

    #[serde(default)]
    pub trained_at: Option<NaiveDateTime>,

    /// Divisor the training job applied to cost.
    #[serde(default)]
    pub cost_normalizer: Option<f64>,
}

impl ModelMetadata {
    /// Check the metadata agrees with the serving feature layout.
    ///
    /// Empty `features` or `mode_mapping` are accepted as "not recorded".
    pub fn validate(&self) -> Result<(), ModelError> {
        if !self.features.is_empty() && self.features != FEATURE_NAMES {
            return Err(ModelError::Invalid(format!(
                "model features {:?} do not match serving features {:?}",
                self.features, FEATURE_NAMES
            )));
        }

        for (name, index) in &self.mode_mapping {
            let mode: Mode = name
                .parse()
                .map_err(|e| ModelError::Invalid(format!("mode mapping: {e}")))?;
            if mode.index() != *index {
                return Err(ModelError::Invalid(format!(
                    "mode mapping puts {mode} at {index}, expected {}",
                    mode.index()
                )));
            }
        }

        if let Some(divisor) = self.cost_normalizer {
            if !divisor.is_finite() || divisor <= 0.0 {
                return Err(ModelError::Invalid(format!(
                    "cost normalizer must be positive, got {divisor}"
                )));
            }
        }

        Ok(())
    }

    /// Feature scaling the model was trained with.
    pub fn scaling(&self) -> FeatureScaling {
        FeatureScaling::new(self.cost_normalizer.unwrap_or(DEFAULT_COST_NORMALIZER))
    }
}
