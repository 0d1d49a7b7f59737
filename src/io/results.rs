//! Differential expression results structure

use serde::{Deserialize, Serialize};

/// One gene's differential expression result
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DgeResultRow {
    /// Gene identifier
    pub gene_id: String,
    /// log2(mean disease / mean control); may be infinite or NaN
    pub log2_fold_change: f64,
    /// Student's t statistic (control minus disease); NaN when degenerate
    pub t_statistic: f64,
    /// Raw two-sided p-value; NaN when degenerate
    pub p_value: f64,
    /// Benjamini-Hochberg adjusted p-value
    pub adjusted_p_value: f64,
}

impl DgeResultRow {
    /// Raw p-value below `alpha`. NaN never passes.
    pub fn is_significant(&self, alpha: f64) -> bool {
        self.p_value < alpha
    }
}

/// Results from one two-group differential expression run.
/// Rows follow the gene order of the input matrix.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DgeResultTable {
    rows: Vec<DgeResultRow>,
    /// Control sample labels used for the run
    pub control: Vec<String>,
    /// Disease sample labels used for the run
    pub disease: Vec<String>,
}

impl DgeResultTable {
    pub fn new(rows: Vec<DgeResultRow>, control: Vec<String>, disease: Vec<String>) -> Self {
        Self { rows, control, disease }
    }

    /// Get the result rows in input gene order
    pub fn rows(&self) -> &[DgeResultRow] {
        &self.rows
    }

    /// Get number of genes
    pub fn n_genes(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn gene_ids(&self) -> Vec<&str> {
        self.rows.iter().map(|r| r.gene_id.as_str()).collect()
    }

    pub fn pvalues(&self) -> Vec<f64> {
        self.rows.iter().map(|r| r.p_value).collect()
    }

    /// Get genes with raw p-value below `alpha`
    pub fn significant_genes(&self, alpha: f64) -> Vec<&str> {
        self.rows
            .iter()
            .filter(|r| r.is_significant(alpha))
            .map(|r| r.gene_id.as_str())
            .collect()
    }

    /// Get up-regulated genes (significant, log2FC above `min_lfc`)
    pub fn upregulated_genes(&self, alpha: f64, min_lfc: f64) -> Vec<&str> {
        self.rows
            .iter()
            .filter(|r| r.is_significant(alpha) && r.log2_fold_change > min_lfc)
            .map(|r| r.gene_id.as_str())
            .collect()
    }

    /// Get down-regulated genes (significant, log2FC below `-min_lfc`)
    pub fn downregulated_genes(&self, alpha: f64, min_lfc: f64) -> Vec<&str> {
        self.rows
            .iter()
            .filter(|r| r.is_significant(alpha) && r.log2_fold_change < -min_lfc)
            .map(|r| r.gene_id.as_str())
            .collect()
    }

    /// Summary statistics
    pub fn summary(&self, alpha: f64) -> ResultsSummary {
        ResultsSummary {
            total_genes: self.n_genes(),
            genes_tested: self.rows.iter().filter(|r| r.p_value.is_finite()).count(),
            significant: self.significant_genes(alpha).len(),
            upregulated: self.upregulated_genes(alpha, 0.0).len(),
            downregulated: self.downregulated_genes(alpha, 0.0).len(),
            alpha,
        }
    }
}

/// Summary of a differential expression run
#[derive(Debug, Clone, PartialEq)]
pub struct ResultsSummary {
    pub total_genes: usize,
    pub genes_tested: usize,
    pub significant: usize,
    pub upregulated: usize,
    pub downregulated: usize,
    pub alpha: f64,
}

impl std::fmt::Display for ResultsSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "DGE Results Summary")?;
        writeln!(f, "===================")?;
        writeln!(f, "Total genes: {}", self.total_genes)?;
        writeln!(f, "Genes with a finite p-value: {}", self.genes_tested)?;
        writeln!(f, "Significant (p < {}): {}", self.alpha, self.significant)?;
        writeln!(f, "  Up-regulated: {}", self.upregulated)?;
        writeln!(f, "  Down-regulated: {}", self.downregulated)?;
        Ok(())
    }
}
