//! Statistical testing for differential expression

mod fdr;
mod pvalue;
mod ttest;

pub use fdr::benjamini_hochberg;
pub use pvalue::calculate_pvalue_t;
pub use ttest::{is_constant, mean, sample_variance, students_t_test, TTestResult};

use log::{debug, info};
use rayon::prelude::*;

use crate::data::{ExpressionMatrix, GroupSelection};
use crate::error::Result;
use crate::io::{DgeResultRow, DgeResultTable};

/// log2(mean_disease / mean_control) with no special casing.
///
/// A zero control mean gives +inf for a positive disease mean and NaN for a
/// zero or negative one (`log2(-inf)` is NaN). Any negative ratio is NaN.
pub fn log2_fold_change(mean_control: f64, mean_disease: f64) -> f64 {
    (mean_disease / mean_control).log2()
}

/// Two-group differential expression over every gene of `matrix`.
///
/// Per gene: Student's t-test (control vs disease, pooled variance,
/// two-sided) and log2 fold change of the group means. Benjamini-Hochberg
/// correction runs once all raw p-values are known. Rows keep the matrix
/// gene order. The selection is validated before any computation; a matrix
/// with no genes yields an empty table.
pub fn compute_differential_expression<S: AsRef<str>>(
    matrix: &ExpressionMatrix,
    control_columns: &[S],
    disease_columns: &[S],
) -> Result<DgeResultTable> {
    let selection = GroupSelection::new(control_columns, disease_columns);
    differential_expression(matrix, &selection)
}

/// Same as [`compute_differential_expression`] for an existing selection
pub fn differential_expression(
    matrix: &ExpressionMatrix,
    selection: &GroupSelection,
) -> Result<DgeResultTable> {
    let resolved = selection.resolve(matrix)?;

    info!(
        "Testing {} genes: {} control vs {} disease samples",
        matrix.n_genes(),
        resolved.control.len(),
        resolved.disease.len()
    );

    let per_gene: Vec<(f64, f64, f64)> = (0..matrix.n_genes())
        .into_par_iter()
        .map(|g| {
            let control_values = matrix.gene_values_at(g, &resolved.control);
            let disease_values = matrix.gene_values_at(g, &resolved.disease);

            let test = students_t_test(&control_values, &disease_values);
            let lfc = log2_fold_change(mean(&control_values), mean(&disease_values));

            (lfc, test.statistic, test.pvalue)
        })
        .collect();

    let pvalues: Vec<f64> = per_gene.iter().map(|&(_, _, p)| p).collect();
    let padj = benjamini_hochberg(&pvalues);

    let n_degenerate = pvalues.iter().filter(|p| p.is_nan()).count();
    if n_degenerate > 0 {
        debug!("{} genes have an undefined p-value (too few samples or zero variance)", n_degenerate);
    }

    let rows = matrix
        .gene_ids()
        .iter()
        .zip(per_gene)
        .zip(padj)
        .map(|((gene_id, (lfc, stat, p)), adj)| DgeResultRow {
            gene_id: gene_id.clone(),
            log2_fold_change: lfc,
            t_statistic: stat,
            p_value: p,
            adjusted_p_value: adj,
        })
        .collect();

    Ok(DgeResultTable::new(
        rows,
        selection.control.clone(),
        selection.disease.clone(),
    ))
}
