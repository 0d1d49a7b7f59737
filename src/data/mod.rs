//! Data structures for differential expression analysis

mod expression_matrix;
mod selection;

pub use expression_matrix::ExpressionMatrix;
pub use selection::{GroupSelection, ResolvedSelection};
