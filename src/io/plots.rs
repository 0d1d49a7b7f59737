//! Tab-separated output of plot tables

use std::path::Path;

use crate::error::Result;
use crate::plots::{HeatmapMatrix, PcaResult, VolcanoPoint};

fn tsv_writer<P: AsRef<Path>>(path: P) -> Result<csv::Writer<std::fs::File>> {
    Ok(csv::WriterBuilder::new().delimiter(b'\t').from_path(path)?)
}

/// Columns: gene_id, log2FoldChange, neg_log10_pvalue, regulation
pub fn write_volcano<P: AsRef<Path>>(path: P, points: &[VolcanoPoint]) -> Result<()> {
    let mut writer = tsv_writer(path)?;
    writer.write_record(["gene_id", "log2FoldChange", "neg_log10_pvalue", "regulation"])?;
    for point in points {
        writer.write_record([
            point.gene_id.clone(),
            point.log2_fold_change.to_string(),
            point.neg_log10_p.to_string(),
            point.regulation.to_string(),
        ])?;
    }
    writer.flush()?;
    Ok(())
}

/// Genes as rows, samples as columns, z-scores as cells
pub fn write_heatmap<P: AsRef<Path>>(path: P, heatmap: &HeatmapMatrix) -> Result<()> {
    let mut writer = tsv_writer(path)?;

    let mut header = vec!["gene_id".to_string()];
    header.extend(heatmap.sample_ids.iter().cloned());
    writer.write_record(&header)?;

    for (gene_id, row) in heatmap.gene_ids.iter().zip(heatmap.z_scores.rows()) {
        let mut record = vec![gene_id.clone()];
        record.extend(row.iter().map(|v| format!("{:.6}", v)));
        writer.write_record(&record)?;
    }
    writer.flush()?;
    Ok(())
}

/// One row per sample with PC coordinates. The header names carry the
/// percentage of variance explained, e.g. `PC1 (62.31%)`.
pub fn write_pca<P: AsRef<Path>>(path: P, result: &PcaResult) -> Result<()> {
    let mut writer = tsv_writer(path)?;

    let mut header = vec!["sample".to_string()];
    header.extend(
        result
            .explained_variance_ratio
            .iter()
            .enumerate()
            .map(|(i, r)| format!("PC{} ({:.2}%)", i + 1, r * 100.0)),
    );
    writer.write_record(&header)?;

    for (sample, coords) in result.sample_ids.iter().zip(result.coordinates.rows()) {
        let mut record = vec![sample.clone()];
        record.extend(coords.iter().map(|v| format!("{:.6}", v)));
        writer.write_record(&record)?;
    }
    writer.flush()?;
    Ok(())
}
