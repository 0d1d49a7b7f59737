//! Expression matrix representation for normalized expression data

use std::collections::{HashMap, HashSet};

use ndarray::{Array2, ArrayView1, ArrayView2, Axis};

use crate::error::{DgeError, Result};

/// Deduplicate gene names by appending _1, _2, etc. to repeats
fn deduplicate_names(names: Vec<String>) -> Vec<String> {
    let mut seen: HashMap<String, usize> = HashMap::new();
    for name in &names {
        *seen.entry(name.clone()).or_insert(0) += 1;
    }
    if !seen.values().any(|&c| c > 1) {
        return names;
    }

    seen.clear();
    let mut result = Vec::with_capacity(names.len());
    for name in names {
        let count = seen.entry(name.clone()).or_insert(0);
        *count += 1;
        if *count == 1 {
            result.push(name);
        } else {
            let new_name = format!("{}_{}", name, *count - 1);
            log::warn!("Duplicate gene name '{}' renamed to '{}'", name, new_name);
            result.push(new_name);
        }
    }
    result
}

/// A normalized expression matrix.
/// Rows are genes, columns are samples. Values are already normalized
/// upstream and may be any finite real number.
#[derive(Debug, Clone)]
pub struct ExpressionMatrix {
    /// Expression values (genes x samples)
    values: Array2<f64>,
    /// Gene identifiers, unique
    gene_ids: Vec<String>,
    /// Sample identifiers, unique
    sample_ids: Vec<String>,
}

impl ExpressionMatrix {
    /// Create a new expression matrix.
    ///
    /// A matrix with zero gene rows is valid. Sample IDs must be unique
    /// because groups are selected by label; duplicate gene IDs are renamed.
    pub fn new(values: Array2<f64>, gene_ids: Vec<String>, sample_ids: Vec<String>) -> Result<Self> {
        let (n_genes, n_samples) = values.dim();

        if gene_ids.len() != n_genes {
            return Err(DgeError::DimensionMismatch {
                expected: format!("{} gene IDs", n_genes),
                got: format!("{} gene IDs", gene_ids.len()),
            });
        }

        if sample_ids.len() != n_samples {
            return Err(DgeError::DimensionMismatch {
                expected: format!("{} sample IDs", n_samples),
                got: format!("{} sample IDs", sample_ids.len()),
            });
        }

        let mut seen = HashSet::new();
        for id in &sample_ids {
            if !seen.insert(id.as_str()) {
                return Err(DgeError::InvalidMatrix {
                    reason: format!("Duplicate sample ID '{}'", id),
                });
            }
        }

        if let Some(((gene_idx, sample_idx), _)) = values.indexed_iter().find(|(_, x)| !x.is_finite()) {
            return Err(DgeError::InvalidMatrix {
                reason: format!(
                    "Non-finite expression value for gene '{}' in sample '{}'",
                    gene_ids[gene_idx], sample_ids[sample_idx]
                ),
            });
        }

        let gene_ids = deduplicate_names(gene_ids);

        Ok(Self {
            values,
            gene_ids,
            sample_ids,
        })
    }

    /// Get the number of genes
    pub fn n_genes(&self) -> usize {
        self.values.nrows()
    }

    /// Get the number of samples
    pub fn n_samples(&self) -> usize {
        self.values.ncols()
    }

    /// Whether the matrix has no gene rows
    pub fn is_empty(&self) -> bool {
        self.n_genes() == 0
    }

    /// Get the expression values as a view
    pub fn values(&self) -> ArrayView2<'_, f64> {
        self.values.view()
    }

    /// Get gene IDs
    pub fn gene_ids(&self) -> &[String] {
        &self.gene_ids
    }

    /// Get sample IDs
    pub fn sample_ids(&self) -> &[String] {
        &self.sample_ids
    }

    /// Get values for a specific gene
    pub fn gene_values(&self, gene_idx: usize) -> ArrayView1<'_, f64> {
        self.values.row(gene_idx)
    }

    /// Get values of one gene restricted to the given sample columns
    pub fn gene_values_at(&self, gene_idx: usize, sample_indices: &[usize]) -> Vec<f64> {
        let row = self.values.row(gene_idx);
        sample_indices.iter().map(|&j| row[j]).collect()
    }

    /// Get gene index by ID
    pub fn gene_index(&self, gene_id: &str) -> Option<usize> {
        self.gene_ids.iter().position(|id| id == gene_id)
    }

    /// Get sample index by ID
    pub fn sample_index(&self, sample_id: &str) -> Option<usize> {
        self.sample_ids.iter().position(|id| id == sample_id)
    }

    /// Subset to specific genes, keeping all samples
    pub fn subset_genes(&self, gene_indices: &[usize]) -> Result<Self> {
        let new_values = self.values.select(Axis(0), gene_indices);
        let new_gene_ids: Vec<String> = gene_indices
            .iter()
            .map(|&i| self.gene_ids[i].clone())
            .collect();

        Self::new(new_values, new_gene_ids, self.sample_ids.clone())
    }
}
