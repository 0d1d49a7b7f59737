//! Control/disease sample group selection

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use super::ExpressionMatrix;
use crate::error::{DgeError, Result};

/// Two groups of sample labels to compare.
/// Passed per analysis call; the order of labels inside a group is kept.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupSelection {
    /// Control (reference) sample labels
    pub control: Vec<String>,
    /// Disease (case) sample labels
    pub disease: Vec<String>,
}

/// Column indices of a validated selection
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedSelection {
    pub control: Vec<usize>,
    pub disease: Vec<usize>,
}

impl GroupSelection {
    /// Create a new selection from any string-like labels
    pub fn new<S: AsRef<str>>(control: &[S], disease: &[S]) -> Self {
        Self {
            control: control.iter().map(|s| s.as_ref().to_string()).collect(),
            disease: disease.iter().map(|s| s.as_ref().to_string()).collect(),
        }
    }

    /// Validate the selection against a matrix and resolve labels to column indices.
    ///
    /// Fails with `InvalidSelection` when a group is empty, a label repeats
    /// within a group, the groups overlap, or a label is not a matrix column.
    pub fn resolve(&self, matrix: &ExpressionMatrix) -> Result<ResolvedSelection> {
        if self.control.is_empty() || self.disease.is_empty() {
            let missing = match (self.control.is_empty(), self.disease.is_empty()) {
                (true, true) => "control and disease groups are",
                (true, false) => "control group is",
                _ => "disease group is",
            };
            return Err(DgeError::InvalidSelection {
                reason: format!("{} empty; select at least one sample for each group", missing),
            });
        }

        for (name, group) in [("control", &self.control), ("disease", &self.disease)] {
            let mut seen = HashSet::new();
            let repeated: Vec<&str> = group
                .iter()
                .filter(|s| !seen.insert(s.as_str()))
                .map(|s| s.as_str())
                .collect();
            if !repeated.is_empty() {
                return Err(DgeError::InvalidSelection {
                    reason: format!("{} group lists samples more than once: {:?}", name, repeated),
                });
            }
        }

        let control_set: HashSet<&str> = self.control.iter().map(|s| s.as_str()).collect();
        let overlap: Vec<&str> = self
            .disease
            .iter()
            .filter(|s| control_set.contains(s.as_str()))
            .map(|s| s.as_str())
            .collect();
        if !overlap.is_empty() {
            return Err(DgeError::InvalidSelection {
                reason: format!("samples selected as both control and disease: {:?}", overlap),
            });
        }

        let unknown: Vec<&str> = self
            .control
            .iter()
            .chain(self.disease.iter())
            .filter(|s| matrix.sample_index(s).is_none())
            .map(|s| s.as_str())
            .collect();
        if !unknown.is_empty() {
            return Err(DgeError::InvalidSelection {
                reason: format!("samples not present in the expression matrix: {:?}", unknown),
            });
        }

        let lookup = |labels: &[String]| -> Vec<usize> {
            labels.iter().filter_map(|s| matrix.sample_index(s)).collect()
        };

        Ok(ResolvedSelection {
            control: lookup(&self.control),
            disease: lookup(&self.disease),
        })
    }
}
