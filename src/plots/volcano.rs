//! Volcano plot data: fold change against raw-p significance

use serde::Serialize;

use crate::io::DgeResultTable;

/// Cutoffs used to color volcano points
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VolcanoThresholds {
    /// Raw p-value cutoff (exclusive)
    pub p_value: f64,
    /// Absolute log2 fold change cutoff (exclusive)
    pub log2_fold_change: f64,
}

impl Default for VolcanoThresholds {
    fn default() -> Self {
        Self {
            p_value: 0.05,
            log2_fold_change: 1.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Regulation {
    Upregulated,
    Downregulated,
    NotSignificant,
}

impl Regulation {
    /// Classify one gene. NaN p-values or fold changes are never significant.
    pub fn classify(p_value: f64, log2_fold_change: f64, thresholds: &VolcanoThresholds) -> Self {
        if p_value < thresholds.p_value && log2_fold_change > thresholds.log2_fold_change {
            Regulation::Upregulated
        } else if p_value < thresholds.p_value && log2_fold_change < -thresholds.log2_fold_change {
            Regulation::Downregulated
        } else {
            Regulation::NotSignificant
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Regulation::Upregulated => "up",
            Regulation::Downregulated => "down",
            Regulation::NotSignificant => "ns",
        }
    }
}

impl std::fmt::Display for Regulation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VolcanoPoint {
    pub gene_id: String,
    pub log2_fold_change: f64,
    /// -log10 of the raw p-value; NaN stays NaN and p = 0 gives +inf
    pub neg_log10_p: f64,
    pub regulation: Regulation,
}

/// Counts per volcano class
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct VolcanoSummary {
    pub upregulated: usize,
    pub downregulated: usize,
    pub not_significant: usize,
}

/// One point per result row, in table order
pub fn volcano_points(table: &DgeResultTable, thresholds: &VolcanoThresholds) -> Vec<VolcanoPoint> {
    table
        .rows()
        .iter()
        .map(|row| VolcanoPoint {
            gene_id: row.gene_id.clone(),
            log2_fold_change: row.log2_fold_change,
            neg_log10_p: -row.p_value.log10(),
            regulation: Regulation::classify(row.p_value, row.log2_fold_change, thresholds),
        })
        .collect()
}

pub fn volcano_summary(points: &[VolcanoPoint]) -> VolcanoSummary {
    points.iter().fold(VolcanoSummary::default(), |mut acc, p| {
        match p.regulation {
            Regulation::Upregulated => acc.upregulated += 1,
            Regulation::Downregulated => acc.downregulated += 1,
            Regulation::NotSignificant => acc.not_significant += 1,
        }
        acc
    })
}
