//! P-value adjustment for multiple testing correction

/// Apply Benjamini-Hochberg FDR correction to p-values.
///
/// Returns adjusted p-values in the input order. NaN p-values are left out
/// of the number of tests and of the ranking, and stay NaN in the output.
/// When no p-value is finite every adjusted value is NaN.
pub fn benjamini_hochberg(pvalues: &[f64]) -> Vec<f64> {
    let n = pvalues.len();
    if n == 0 {
        return vec![];
    }

    let mut indices: Vec<usize> = (0..n).filter(|&i| !pvalues[i].is_nan()).collect();
    let m = indices.len();
    if m == 0 {
        return vec![f64::NAN; n];
    }

    // Stable sort keeps ties in input order
    indices.sort_by(|&a, &b| pvalues[a].total_cmp(&pvalues[b]));

    let mut padj = vec![f64::NAN; n];
    let mut cummin = f64::INFINITY;

    for (rank0, &i) in indices.iter().enumerate().rev() {
        let rank = rank0 + 1;
        let adj = (pvalues[i] * m as f64 / rank as f64).min(1.0);
        cummin = cummin.min(adj);
        padj[i] = cummin;
    }

    padj
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bh_known_values() {
        // p.adjust(c(0.01, 0.04, 0.03, 0.02), "BH") = 0.04 0.04 0.04 0.04
        let padj = benjamini_hochberg(&[0.01, 0.04, 0.03, 0.02]);
        for adj in &padj {
            assert!((adj - 0.04).abs() < 1e-12);
        }

        // p.adjust(c(0.001, 0.01, 0.05, 0.5), "BH") = 0.004 0.02 0.0666.. 0.5
        let padj = benjamini_hochberg(&[0.001, 0.01, 0.05, 0.5]);
        assert!((padj[0] - 0.004).abs() < 1e-12);
        assert!((padj[1] - 0.02).abs() < 1e-12);
        assert!((padj[2] - 0.2 / 3.0).abs() < 1e-12);
        assert!((padj[3] - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_bh_not_below_raw() {
        let pvalues = vec![0.2, 0.01, 0.9, 0.04, 0.3];
        let padj = benjamini_hochberg(&pvalues);
        for (p, adj) in pvalues.iter().zip(padj.iter()) {
            assert!(*adj >= *p);
            assert!(*adj <= 1.0);
        }
    }

    #[test]
    fn test_bh_monotone_in_raw_order() {
        let pvalues = vec![0.3, 0.001, 0.07, 0.02, 0.6, 0.02, 0.0449];
        let padj = benjamini_hochberg(&pvalues);

        let mut order: Vec<usize> = (0..pvalues.len()).collect();
        order.sort_by(|&a, &b| pvalues[a].total_cmp(&pvalues[b]));
        for w in order.windows(2) {
            assert!(padj[w[0]] <= padj[w[1]]);
        }
    }

    #[test]
    fn test_bh_nan_excluded_from_m() {
        // NaN does not count as a test: same result as p.adjust(c(0.01, 0.03, 0.02), "BH")
        let padj = benjamini_hochberg(&[0.01, f64::NAN, 0.03, 0.02]);
        assert!((padj[0] - 0.03).abs() < 1e-12);
        assert!(padj[1].is_nan());
        assert!((padj[2] - 0.03).abs() < 1e-12);
        assert!((padj[3] - 0.03).abs() < 1e-12);
    }

    #[test]
    fn test_bh_all_nan_and_empty() {
        let padj = benjamini_hochberg(&[f64::NAN, f64::NAN]);
        assert!(padj.iter().all(|p| p.is_nan()));
        assert!(benjamini_hochberg(&[]).is_empty());
    }
}
