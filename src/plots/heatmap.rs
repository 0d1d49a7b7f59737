//! Heatmap data: significant genes, z-scored per row

use ndarray::{Array2, Axis};

use crate::data::ExpressionMatrix;
use crate::error::{DgeError, Result};
use crate::io::{DgeResultRow, DgeResultTable};
use crate::testing::{is_constant, mean, sample_variance};

/// Heatmap selection parameters
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HeatmapParams {
    /// Raw p-value cutoff (exclusive) for including a gene
    pub p_value_threshold: f64,
}

impl Default for HeatmapParams {
    fn default() -> Self {
        Self {
            p_value_threshold: 0.05,
        }
    }
}

/// Row-standardized expression of the selected genes over all samples
#[derive(Debug, Clone)]
pub struct HeatmapMatrix {
    pub gene_ids: Vec<String>,
    pub sample_ids: Vec<String>,
    /// Z-scores (genes x samples)
    pub z_scores: Array2<f64>,
}

/// Rows with raw p-value below `threshold`, in table order. NaN never passes.
pub fn significant_genes(table: &DgeResultTable, threshold: f64) -> Vec<&DgeResultRow> {
    table
        .rows()
        .iter()
        .filter(|row| row.is_significant(threshold))
        .collect()
}

/// Subtract each row's mean and divide by its sample standard deviation.
/// Rows with zero spread (or a single column) become NaN.
pub fn zscore_rows(values: &Array2<f64>) -> Array2<f64> {
    let mut out = values.clone();
    for mut row in out.axis_iter_mut(Axis(0)) {
        let data = row.to_vec();
        if data.len() < 2 || is_constant(&data) {
            row.fill(f64::NAN);
            continue;
        }
        let m = mean(&data);
        let sd = sample_variance(&data).sqrt();
        row.mapv_inplace(|x| (x - m) / sd);
    }
    out
}

/// Build the heatmap for genes with raw p-value below `params.p_value_threshold`.
///
/// Returns `Ok(None)` when no gene passes, meaning there is nothing to render.
pub fn heatmap_matrix(
    matrix: &ExpressionMatrix,
    table: &DgeResultTable,
    params: &HeatmapParams,
) -> Result<Option<HeatmapMatrix>> {
    let threshold = params.p_value_threshold;
    if !(threshold > 0.0 && threshold <= 1.0) {
        return Err(DgeError::InvalidInput {
            reason: format!("Heatmap p-value threshold must be in (0, 1], got {}", threshold),
        });
    }

    let selected = significant_genes(table, threshold);
    if selected.is_empty() {
        log::warn!(
            "No significant genes found for the heatmap at p < {}; try a higher threshold",
            threshold
        );
        return Ok(None);
    }

    let indices: Vec<usize> = selected
        .iter()
        .map(|row| {
            matrix.gene_index(&row.gene_id).ok_or_else(|| DgeError::InvalidInput {
                reason: format!("Gene '{}' from the results is not in the expression matrix", row.gene_id),
            })
        })
        .collect::<Result<_>>()?;

    let subset = matrix.subset_genes(&indices)?;
    log::info!("Heatmap of {} genes across {} samples", subset.n_genes(), subset.n_samples());

    Ok(Some(HeatmapMatrix {
        gene_ids: subset.gene_ids().to_vec(),
        sample_ids: subset.sample_ids().to_vec(),
        z_scores: zscore_rows(&subset.values().to_owned()),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    fn labels(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    fn table_with_pvalues(pvalues: &[f64]) -> DgeResultTable {
        let rows = pvalues
            .iter()
            .enumerate()
            .map(|(i, &p)| DgeResultRow {
                gene_id: format!("G{}", i),
                log2_fold_change: 0.0,
                t_statistic: f64::NAN,
                p_value: p,
                adjusted_p_value: p,
            })
            .collect();
        DgeResultTable::new(rows, vec![], vec![])
    }

    fn matrix() -> ExpressionMatrix {
        ExpressionMatrix::new(
            array![[1.0, 2.0, 3.0], [5.0, 5.0, 5.0], [2.0, 4.0, 9.0]],
            labels(&["G0", "G1", "G2"]),
            labels(&["C1", "D1", "D2"]),
        )
        .unwrap()
    }

    #[test]
    fn test_filter_positions() {
        let table = table_with_pvalues(&[0.01, 0.2, 0.04]);
        let genes: Vec<&str> = significant_genes(&table, 0.05)
            .iter()
            .map(|r| r.gene_id.as_str())
            .collect();
        assert_eq!(genes, vec!["G0", "G2"]);
    }

    #[test]
    fn test_heatmap_zscores() {
        let table = table_with_pvalues(&[0.01, 0.2, 0.04]);
        let heatmap = heatmap_matrix(&matrix(), &table, &HeatmapParams::default())
            .unwrap()
            .unwrap();

        assert_eq!(heatmap.gene_ids, labels(&["G0", "G2"]));
        assert_eq!(heatmap.sample_ids, labels(&["C1", "D1", "D2"]));
        // Row [1, 2, 3]: mean 2, sd 1
        assert_eq!(heatmap.z_scores.row(0).to_vec(), vec![-1.0, 0.0, 1.0]);
        for row in heatmap.z_scores.axis_iter(Axis(0)) {
            assert!(row.sum().abs() < 1e-12);
        }
    }

    #[test]
    fn test_constant_row_is_nan() {
        let z = zscore_rows(&array![[5.0, 5.0, 5.0]]);
        assert!(z.iter().all(|v| v.is_nan()));

        // 0.1 is not exact in binary, so the row mean is off by one ulp
        let z = zscore_rows(&array![[0.1, 0.1, 0.1], [1.0, 2.0, 3.0]]);
        assert!(z.row(0).iter().all(|v| v.is_nan()));
        assert_eq!(z.row(1).to_vec(), vec![-1.0, 0.0, 1.0]);

        let z = zscore_rows(&array![[4.0]]);
        assert!(z[[0, 0]].is_nan());
    }

    #[test]
    fn test_nothing_to_render() {
        let table = table_with_pvalues(&[0.5, f64::NAN, 0.2]);
        let result = heatmap_matrix(&matrix(), &table, &HeatmapParams::default()).unwrap();
        assert!(result.is_none());
    }

    #[test]
    fn test_threshold_and_unknown_gene_errors() {
        let table = table_with_pvalues(&[0.01]);
        let bad = HeatmapParams { p_value_threshold: 0.0 };
        assert!(matches!(
            heatmap_matrix(&matrix(), &table, &bad),
            Err(DgeError::InvalidInput { .. })
        ));

        let mut rows = table.rows().to_vec();
        rows[0].gene_id = "MISSING".to_string();
        let table = DgeResultTable::new(rows, vec![], vec![]);
        assert!(matches!(
            heatmap_matrix(&matrix(), &table, &HeatmapParams::default()),
            Err(DgeError::InvalidInput { .. })
        ));
    }
}
