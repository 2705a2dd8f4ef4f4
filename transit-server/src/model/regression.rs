//! Regression models that score a feature vector.
//!
//! Models are trained offline and exported as JSON. Two shapes are
//! supported: a random-forest style ensemble of binary regression trees, and
//! a plain linear model.

use serde::{Deserialize, Serialize};

use crate::recommend::{FEATURE_COUNT, FeatureVector};

use super::error::ModelError;

/// A node of a regression tree, stored in a flat array.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Node {
    Leaf {
        leaf: f64,
    },
    /// Go to `left` when `features[feature] <= threshold`, else `right`.
    Split {
        feature: usize,
        threshold: f64,
        left: usize,
        right: usize,
    },
}

/// A regression tree. Node 0 is the root.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tree {
    pub nodes: Vec<Node>,
}

impl Tree {
    fn validate(&self, tree_idx: usize) -> Result<(), ModelError> {
        if self.nodes.is_empty() {
            return Err(ModelError::Invalid(format!("tree {tree_idx} has no nodes")));
        }
        for (i, node) in self.nodes.iter().enumerate() {
            match node {
                Node::Leaf { leaf } if !leaf.is_finite() => {
                    return Err(ModelError::Invalid(format!(
                        "tree {tree_idx} node {i} has a non-finite leaf"
                    )));
                }
                Node::Leaf { .. } => {}
                Node::Split {
                    feature,
                    left,
                    right,
                    ..
                } => {
                    if *feature >= FEATURE_COUNT {
                        return Err(ModelError::Invalid(format!(
                            "tree {tree_idx} node {i} splits on feature {feature}"
                        )));
                    }
                    if *left >= self.nodes.len() || *right >= self.nodes.len() {
                        return Err(ModelError::Invalid(format!(
                            "tree {tree_idx} node {i} points outside the tree"
                        )));
                    }
                }
            }
        }
        Ok(())
    }

    /// Walk from the root to a leaf.
    ///
    /// A well-formed tree reaches a leaf in fewer steps than it has nodes;
    /// anything longer means the child links form a cycle.
    fn predict(&self, features: &FeatureVector) -> Result<f64, ModelError> {
        let mut idx = 0;
        for _ in 0..self.nodes.len() {
            match self.nodes.get(idx) {
                Some(Node::Leaf { leaf }) => return Ok(*leaf),
                Some(Node::Split {
                    feature,
                    threshold,
                    left,
                    right,
                }) => {
                    let value = features.get(*feature).ok_or_else(|| {
                        ModelError::Inference(format!("feature {feature} out of range"))
                    })?;
                    idx = if value <= *threshold { *left } else { *right };
                }
                None => {
                    return Err(ModelError::Inference(format!("node {idx} out of range")));
                }
            }
        }
        Err(ModelError::Inference("tree walk did not reach a leaf".into()))
    }
}

/// A trained scoring model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ScoringModel {
    /// Mean of the predictions of every tree.
    Forest { trees: Vec<Tree> },

    Linear {
        intercept: f64,
        coefficients: Vec<f64>,
    },
}

impl ScoringModel {
    /// Check the model is structurally usable with our feature layout.
    pub fn validate(&self) -> Result<(), ModelError> {
        match self {
            ScoringModel::Forest { trees } => {
                if trees.is_empty() {
                    return Err(ModelError::Invalid("forest has no trees".into()));
                }
                trees
                    .iter()
                    .enumerate()
                    .try_for_each(|(i, tree)| tree.validate(i))
            }
            ScoringModel::Linear {
                intercept,
                coefficients,
            } => {
                if coefficients.len() != FEATURE_COUNT {
                    return Err(ModelError::Invalid(format!(
                        "expected {FEATURE_COUNT} coefficients, got {}",
                        coefficients.len()
                    )));
                }
                if !intercept.is_finite() || coefficients.iter().any(|c| !c.is_finite()) {
                    return Err(ModelError::Invalid("non-finite linear weights".into()));
                }
                Ok(())
            }
        }
    }

    /// Score one feature vector.
    pub fn predict(&self, features: &FeatureVector) -> Result<f64, ModelError> {
        let score = match self {
            ScoringModel::Forest { trees } => {
                let mut sum = 0.0;
                for tree in trees {
                    sum += tree.predict(features)?;
                }
                sum / trees.len() as f64
            }
            ScoringModel::Linear {
                intercept,
                coefficients,
            } => {
                intercept
                    + coefficients
                        .iter()
                        .zip(features.as_slice())
                        .map(|(w, x)| w * x)
                        .sum::<f64>()
            }
        };

        if !score.is_finite() {
            return Err(ModelError::Inference(format!("score is {score}")));
        }
        Ok(score)
    }

    /// Score a batch. Fails as a whole if any vector fails.
    pub fn predict_batch(&self, batch: &[FeatureVector]) -> Result<Vec<f64>, ModelError> {
        batch.iter().map(|f| self.predict(f)).collect()
    }
}
