//! CSV reading and writing for expression matrices and result tables

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use ndarray::Array2;

use super::results::{DgeResultRow, DgeResultTable};
use crate::data::ExpressionMatrix;
use crate::error::{DgeError, Result};

/// Column names of a persisted result table, in order
pub const RESULTS_HEADER: [&str; 4] = ["Gene", "LogFC", "P_value", "Adj_P_value"];

/// Tab if the header line contains one, else comma
fn detect_delimiter(content: &str) -> u8 {
    let header_line = content.lines().next().unwrap_or("");
    if header_line.contains('\t') {
        b'\t'
    } else {
        b','
    }
}

fn parse_value(raw: &str, what: &str, gene: &str) -> Result<f64> {
    raw.trim().parse::<f64>().map_err(|_| DgeError::InvalidMatrix {
        reason: format!("Invalid {} '{}' for gene '{}'", what, raw, gene),
    })
}

/// Read an expression matrix from a CSV or TSV file.
///
/// Expected format: first row holds sample IDs (its first cell, the gene
/// column name, is ignored), first column holds gene IDs, all other cells
/// are numeric. The delimiter is detected from the header line.
pub fn read_expression_matrix<P: AsRef<Path>>(path: P) -> Result<ExpressionMatrix> {
    let content = std::fs::read_to_string(path)?;
    if content.trim().is_empty() {
        return Err(DgeError::EmptyData {
            reason: "Empty expression file".to_string(),
        });
    }

    let mut reader = csv::ReaderBuilder::new()
        .delimiter(detect_delimiter(&content))
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(content.as_bytes());

    let header = reader.headers()?.clone();
    if header.len() < 2 {
        return Err(DgeError::InvalidMatrix {
            reason: "Header needs a gene column and at least one sample column".to_string(),
        });
    }
    let sample_ids: Vec<String> = header.iter().skip(1).map(|s| s.to_string()).collect();
    let n_samples = sample_ids.len();

    let mut gene_ids: Vec<String> = Vec::new();
    let mut flat: Vec<f64> = Vec::new();

    for (line_idx, record) in reader.records().enumerate() {
        let record = record?;
        if record.len() != n_samples + 1 {
            return Err(DgeError::InvalidMatrix {
                reason: format!(
                    "Row {} has {} columns, expected {}",
                    line_idx + 2,
                    record.len(),
                    n_samples + 1
                ),
            });
        }

        let gene = record[0].to_string();
        for field in record.iter().skip(1) {
            flat.push(parse_value(field, "expression value", &gene)?);
        }
        gene_ids.push(gene);
    }

    if gene_ids.is_empty() {
        log::warn!("Expression file has a header but no gene rows");
    }

    let values = Array2::from_shape_vec((gene_ids.len(), n_samples), flat).map_err(|e| {
        DgeError::InvalidMatrix {
            reason: e.to_string(),
        }
    })?;

    ExpressionMatrix::new(values, gene_ids, sample_ids)
}

/// Write a result table as CSV with columns `Gene,LogFC,P_value,Adj_P_value`.
/// Non-finite values are written as `NaN`, `inf` or `-inf`.
pub fn write_results<P: AsRef<Path>>(path: P, table: &DgeResultTable) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)?;
    writer.write_record(RESULTS_HEADER)?;

    for row in table.rows() {
        writer.write_record([
            row.gene_id.clone(),
            row.log2_fold_change.to_string(),
            row.p_value.to_string(),
            row.adjusted_p_value.to_string(),
        ])?;
    }

    writer.flush()?;
    Ok(())
}

/// Read a result table written by [`write_results`].
///
/// The t statistic and the group labels are not part of the file; they come
/// back as NaN and empty lists.
pub fn read_results<P: AsRef<Path>>(path: P) -> Result<DgeResultTable> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_path(path)?;

    let header = reader.headers()?.clone();
    let columns: Vec<&str> = header.iter().collect();
    if columns != RESULTS_HEADER {
        return Err(DgeError::InvalidInput {
            reason: format!(
                "Results file header {:?} does not match {:?}",
                columns, RESULTS_HEADER
            ),
        });
    }

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record?;
        let gene = record[0].to_string();
        rows.push(DgeResultRow {
            log2_fold_change: parse_value(&record[1], "LogFC", &gene)?,
            t_statistic: f64::NAN,
            p_value: parse_value(&record[2], "P_value", &gene)?,
            adjusted_p_value: parse_value(&record[3], "Adj_P_value", &gene)?,
            gene_id: gene,
        });
    }

    Ok(DgeResultTable::new(rows, Vec::new(), Vec::new()))
}

/// Write a result table as pretty-printed JSON
pub fn write_results_json<P: AsRef<Path>>(path: P, table: &DgeResultTable) -> Result<()> {
    let mut writer = BufWriter::new(File::create(path)?);
    serde_json::to_writer_pretty(&mut writer, table)?;
    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_read_expression_matrix_tsv() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "gene_id\tC1\tC2\tD1").unwrap();
        writeln!(file, "gene1\t1.5\t2\t3.25").unwrap();
        writeln!(file).unwrap();
        writeln!(file, "gene2\t-0.5\t0\t7").unwrap();

        let matrix = read_expression_matrix(file.path()).unwrap();
        assert_eq!(matrix.n_genes(), 2);
        assert_eq!(matrix.sample_ids(), &["C1", "C2", "D1"]);
        assert_eq!(matrix.gene_values(1).to_vec(), vec![-0.5, 0.0, 7.0]);
    }

    #[test]
    fn test_read_expression_matrix_quoted_csv() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, ",\"C1\",\"D1\"").unwrap();
        writeln!(file, "\"BRCA1\",4,8").unwrap();

        let matrix = read_expression_matrix(file.path()).unwrap();
        assert_eq!(matrix.gene_ids(), &["BRCA1"]);
        assert_eq!(matrix.sample_ids(), &["C1", "D1"]);
    }

    #[test]
    fn test_read_expression_matrix_errors() {
        let mut ragged = NamedTempFile::new().unwrap();
        writeln!(ragged, "gene,C1,D1").unwrap();
        writeln!(ragged, "gene1,1").unwrap();
        assert!(matches!(
            read_expression_matrix(ragged.path()),
            Err(DgeError::InvalidMatrix { .. })
        ));

        let mut text = NamedTempFile::new().unwrap();
        writeln!(text, "gene,C1,D1").unwrap();
        writeln!(text, "gene1,1,high").unwrap();
        let err = read_expression_matrix(text.path()).unwrap_err();
        assert!(err.to_string().contains("high"));

        let empty = NamedTempFile::new().unwrap();
        assert!(matches!(
            read_expression_matrix(empty.path()),
            Err(DgeError::EmptyData { .. })
        ));
    }

    #[test]
    fn test_header_only_gives_empty_matrix() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "gene,C1,D1").unwrap();
        let matrix = read_expression_matrix(file.path()).unwrap();
        assert!(matrix.is_empty());
        assert_eq!(matrix.n_samples(), 2);
    }

    #[test]
    fn test_results_file_keeps_order_and_non_finite_values() {
        let rows = vec![
            DgeResultRow {
                gene_id: "G1".to_string(),
                log2_fold_change: 1.0,
                t_statistic: -3.0,
                p_value: 0.012345678901234,
                adjusted_p_value: 0.024691357802468,
            },
            DgeResultRow {
                gene_id: "G2".to_string(),
                log2_fold_change: f64::INFINITY,
                t_statistic: f64::NAN,
                p_value: f64::NAN,
                adjusted_p_value: f64::NAN,
            },
        ];
        let table = DgeResultTable::new(rows, vec!["C1".into()], vec!["D1".into()]);

        let file = NamedTempFile::new().unwrap();
        write_results(file.path(), &table).unwrap();

        let content = std::fs::read_to_string(file.path()).unwrap();
        assert!(content.starts_with("Gene,LogFC,P_value,Adj_P_value\n"));
        assert!(content.contains("G2,inf,NaN,NaN"));

        let back = read_results(file.path()).unwrap();
        assert_eq!(back.gene_ids(), vec!["G1", "G2"]);
        assert_eq!(back.rows()[0].p_value, 0.012345678901234);
        assert_eq!(back.rows()[1].log2_fold_change, f64::INFINITY);
        assert!(back.rows()[1].adjusted_p_value.is_nan());
    }

    #[test]
    fn test_read_results_rejects_foreign_header() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "gene_id,baseMean,pvalue").unwrap();
        assert!(matches!(read_results(file.path()), Err(DgeError::InvalidInput { .. })));
    }

    #[test]
    fn test_write_results_json() {
        let table = DgeResultTable::new(
            vec![DgeResultRow {
                gene_id: "G1".to_string(),
                log2_fold_change: 1.0,
                t_statistic: 2.0,
                p_value: 0.5,
                adjusted_p_value: 0.5,
            }],
            vec!["C1".into()],
            vec!["D1".into()],
        );
        let file = NamedTempFile::new().unwrap();
        write_results_json(file.path(), &table).unwrap();
        let value: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(file.path()).unwrap()).unwrap();
        assert_eq!(value["rows"][0]["gene_id"], "G1");
        assert_eq!(value["control"][0], "C1");
    }
}
