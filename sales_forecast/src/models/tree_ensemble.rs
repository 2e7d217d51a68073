//! Gradient-boosted regression trees
//!
//! Follows the usual boosted-tree dump convention: a split sends a row left
//! when its feature value is strictly below the threshold, and the ensemble
//! output is `base_score` plus the sum of every tree's leaf.

use crate::features::{Feature, FeatureRow};
use serde::{Deserialize, Serialize};

/// Deepest tree accepted from an artifact
const MAX_DEPTH: usize = 64;

/// A node of a regression tree
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TreeNode {
    Leaf {
        leaf: f64,
    },
    Split {
        feature: Feature,
        threshold: f64,
        left: Box<TreeNode>,
        right: Box<TreeNode>,
    },
}

impl TreeNode {
    /// Walk from this node to a leaf
    pub fn evaluate(&self, row: &FeatureRow) -> f64 {
        let mut node = self;
        loop {
            match node {
                TreeNode::Leaf { leaf } => return *leaf,
                TreeNode::Split {
                    feature,
                    threshold,
                    left,
                    right,
                } => {
                    node = if row.get(*feature) < *threshold {
                        &**left
                    } else {
                        &**right
                    };
                }
            }
        }
    }

    fn check(&self, depth: usize) -> Result<(), String> {
        if depth > MAX_DEPTH {
            return Err(format!("tree deeper than {} levels", MAX_DEPTH));
        }
        match self {
            TreeNode::Leaf { leaf } if !leaf.is_finite() => {
                Err(format!("non-finite leaf value {}", leaf))
            }
            TreeNode::Leaf { .. } => Ok(()),
            TreeNode::Split { threshold, .. } if !threshold.is_finite() => {
                Err(format!("non-finite split threshold {}", threshold))
            }
            TreeNode::Split { left, right, .. } => {
                left.check(depth + 1)?;
                right.check(depth + 1)
            }
        }
    }
}

/// Sum of boosted regression trees
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TreeEnsemble {
    #[serde(default)]
    pub base_score: f64,
    pub trees: Vec<TreeNode>,
}

impl TreeEnsemble {
    pub fn evaluate(&self, row: &FeatureRow) -> f64 {
        self.trees
            .iter()
            .fold(self.base_score, |acc, tree| acc + tree.evaluate(row))
    }

    /// Reject empty ensembles and non-finite parameters
    pub fn validate(&self) -> Result<(), String> {
        if self.trees.is_empty() {
            return Err("tree ensemble has no trees".to_string());
        }
        if !self.base_score.is_finite() {
            return Err(format!("non-finite base score {}", self.base_score));
        }
        for (i, tree) in self.trees.iter().enumerate() {
            tree.check(0).map_err(|e| format!("tree {}: {}", i, e))?;
        }
        Ok(())
    }
}
