//! Plot-ready data for the exploratory views
//!
//! Nothing here renders a chart: each view turns a result table (and, for
//! the heatmap and PCA, the expression matrix) into the table a plotting
//! front end draws from.

mod heatmap;
mod pca;
mod volcano;

pub use heatmap::{heatmap_matrix, significant_genes, zscore_rows, HeatmapMatrix, HeatmapParams};
pub use pca::{pca, symmetric_eigen, PcaParams, PcaResult, DEFAULT_COMPONENTS};
pub use volcano::{
    volcano_points, volcano_summary, Regulation, VolcanoPoint, VolcanoSummary, VolcanoThresholds,
};
