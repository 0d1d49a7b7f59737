//! Principal component analysis of samples
//!
//! Samples are observations and genes are features. Each gene is centered
//! (no scaling) and the components are taken from the eigen-decomposition of
//! the samples x samples Gram matrix, which stays small when there are many
//! more genes than samples.

use nalgebra::{DMatrix, SymmetricEigen};
use ndarray::{Array1, Array2, Axis};

use crate::data::ExpressionMatrix;
use crate::error::{DgeError, Result};

/// Number of components reported by the PCA view
pub const DEFAULT_COMPONENTS: usize = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PcaParams {
    pub n_components: usize,
}

impl Default for PcaParams {
    fn default() -> Self {
        Self {
            n_components: DEFAULT_COMPONENTS,
        }
    }
}

#[derive(Debug, Clone)]
pub struct PcaResult {
    pub sample_ids: Vec<String>,
    /// Projected coordinates (samples x components)
    pub coordinates: Array2<f64>,
    /// Variance of each component (n - 1 denominator)
    pub explained_variance: Vec<f64>,
    /// Fraction of total variance captured by each component
    pub explained_variance_ratio: Vec<f64>,
}

/// Eigenvalues and eigenvectors (as columns) of a symmetric matrix, sorted by
/// decreasing eigenvalue.
pub fn symmetric_eigen(a: &Array2<f64>) -> (Vec<f64>, Array2<f64>) {
    let n = a.nrows();
    let m = DMatrix::from_fn(n, n, |i, j| a[[i, j]]);
    let eigen = SymmetricEigen::new(m);

    let mut order: Vec<usize> = (0..n).collect();
    order.sort_by(|&i, &j| eigen.eigenvalues[j].total_cmp(&eigen.eigenvalues[i]));

    let eigenvalues = order.iter().map(|&i| eigen.eigenvalues[i]).collect();
    let eigenvectors = Array2::from_shape_fn((n, n), |(row, c)| eigen.eigenvectors[(row, order[c])]);
    (eigenvalues, eigenvectors)
}

/// Project samples onto their first `params.n_components` principal components.
///
/// Each component's sign is fixed so that its largest-magnitude coordinate is
/// positive. Needs `1 <= n_components <= min(n_samples, n_genes)`.
pub fn pca(matrix: &ExpressionMatrix, params: &PcaParams) -> Result<PcaResult> {
    let n_samples = matrix.n_samples();
    let n_genes = matrix.n_genes();
    let k = params.n_components;

    if k == 0 || k > n_samples.min(n_genes) {
        return Err(DgeError::InvalidInput {
            reason: format!(
                "PCA with {} components needs at least {} samples and {} genes, got {} samples and {} genes",
                k, k, k, n_samples, n_genes
            ),
        });
    }

    // Samples as rows, genes as columns
    let x = matrix.values().t().to_owned();
    let means: Array1<f64> = x.mean_axis(Axis(0)).ok_or_else(|| DgeError::EmptyData {
        reason: "No samples for PCA".to_string(),
    })?;
    let centered = &x - &means.insert_axis(Axis(0));

    let gram = centered.dot(&centered.t());
    let (eigenvalues, eigenvectors) = symmetric_eigen(&gram);

    let denom = (n_samples as f64 - 1.0).max(1.0);
    let variances: Vec<f64> = eigenvalues.iter().map(|&l| l.max(0.0) / denom).collect();
    let total: f64 = variances.iter().sum();

    let mut coordinates = Array2::<f64>::zeros((n_samples, k));
    for c in 0..k {
        let scale = eigenvalues[c].max(0.0).sqrt();
        let mut column = eigenvectors.column(c).mapv(|u| u * scale);

        let pivot = column
            .iter()
            .copied()
            .max_by(|a, b| a.abs().total_cmp(&b.abs()))
            .unwrap_or(0.0);
        if pivot < 0.0 {
            column.mapv_inplace(|v| -v);
        }
        coordinates.column_mut(c).assign(&column);
    }

    let explained_variance: Vec<f64> = variances[..k].to_vec();
    let explained_variance_ratio = explained_variance.iter().map(|&v| v / total).collect();

    Ok(PcaResult {
        sample_ids: matrix.sample_ids().to_vec(),
        coordinates,
        explained_variance,
        explained_variance_ratio,
    })
}
