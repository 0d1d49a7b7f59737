//! rust_dge: two-group differential gene expression analysis in Rust
//!
//! Takes an already-normalized gene x sample expression matrix and two sets
//! of sample labels (control and disease). For each gene it runs a pooled
//! variance Student's t-test and computes the log2 fold change of the group
//! means, then applies Benjamini-Hochberg correction across all genes. The
//! `plots` module derives volcano, heatmap and PCA tables from the result.
//!
//! # Example
//!
//! ```ignore
//! use rust_dge::prelude::*;
//!
//! let matrix = read_expression_matrix("expression.csv")?;
//! let table = compute_differential_expression(&matrix, &["C1", "C2"], &["D1", "D2"])?;
//! write_results("dge_results.csv", &table)?;
//!
//! let points = volcano_points(&table, &VolcanoThresholds::default());
//! ```

pub mod cli;
pub mod data;
pub mod error;
pub mod io;
pub mod plots;
pub mod testing;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::data::{ExpressionMatrix, GroupSelection, ResolvedSelection};
    pub use crate::error::{DgeError, Result};
    pub use crate::io::{
        read_expression_matrix, read_results, write_heatmap, write_pca, write_results,
        write_results_json, write_volcano, DgeResultRow, DgeResultTable, ResultsSummary,
    };
    pub use crate::plots::{
        heatmap_matrix, pca, significant_genes, volcano_points, volcano_summary, HeatmapMatrix,
        HeatmapParams, PcaParams, PcaResult, Regulation, VolcanoPoint, VolcanoThresholds,
    };
    pub use crate::testing::{
        benjamini_hochberg, compute_differential_expression, differential_expression,
        log2_fold_change, students_t_test,
    };
}
