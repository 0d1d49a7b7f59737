//! Input/Output operations

mod csv;
mod plots;
mod results;

pub use self::csv::{
    read_expression_matrix, read_results, write_results, write_results_json, RESULTS_HEADER,
};
pub use self::plots::{write_heatmap, write_pca, write_volcano};
pub use results::{DgeResultRow, DgeResultTable, ResultsSummary};
