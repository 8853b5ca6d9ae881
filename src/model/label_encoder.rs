//! Label encoder mapping class indices to engagement labels

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::path::Path;

use crate::{PlayStatsError, Result};

/// Ordered set of class labels; a label's position is its class index
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabelEncoder {
    classes: Vec<String>,
}

impl LabelEncoder {
    /// Build from labels already in class-index order
    pub fn new(classes: Vec<String>) -> Self {
        LabelEncoder { classes }
    }

    /// Fit on observed labels: classes are the sorted unique values
    pub fn fit<I, S>(labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let unique: BTreeSet<String> = labels
            .into_iter()
            .map(|l| l.as_ref().to_string())
            .collect();
        LabelEncoder {
            classes: unique.into_iter().collect(),
        }
    }

    pub fn classes(&self) -> &[String] {
        &self.classes
    }

    pub fn len(&self) -> usize {
        self.classes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }

    /// Label → class index
    pub fn transform(&self, label: &str) -> Result<usize> {
        self.classes
            .iter()
            .position(|c| c == label)
            .ok_or_else(|| PlayStatsError::UnknownLabel(label.to_string()))
    }

    /// Class indices → labels
    pub fn inverse_transform(&self, indices: &[usize]) -> Result<Vec<String>> {
        indices
            .iter()
            .map(|&i| self.decode(i).map(str::to_string))
            .collect()
    }

    /// Single class index → label
    pub fn decode(&self, index: usize) -> Result<&str> {
        self.classes
            .get(index)
            .map(String::as_str)
            .ok_or(PlayStatsError::UnknownClass {
                index,
                known: self.classes.len(),
            })
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }

    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let encoder: LabelEncoder =
            serde_json::from_str(&content).map_err(|e| PlayStatsError::Artifact {
                path: path.display().to_string(),
                message: e.to_string(),
            })?;
        if encoder.is_empty() {
            return Err(PlayStatsError::Artifact {
                path: path.display().to_string(),
                message: "label encoder has no classes".to_string(),
            });
        }
        Ok(encoder)
    }
}
