//! Independent two-sample Student's t-test (pooled variance)

use super::pvalue::calculate_pvalue_t;

/// Outcome of a two-sample t-test
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TTestResult {
    /// t statistic for `mean(a) - mean(b)`
    pub statistic: f64,
    /// Two-sided p-value
    pub pvalue: f64,
    /// Degrees of freedom, n_a + n_b - 2
    pub df: f64,
}

impl TTestResult {
    fn degenerate(df: f64) -> Self {
        Self {
            statistic: f64::NAN,
            pvalue: f64::NAN,
            df,
        }
    }
}

/// Arithmetic mean; NaN for an empty slice
pub fn mean(x: &[f64]) -> f64 {
    x.iter().sum::<f64>() / x.len() as f64
}

/// All values bitwise-equal to the first. Empty slices count as constant.
pub fn is_constant(x: &[f64]) -> bool {
    x.iter().all(|&v| v == x[0])
}

/// Sample variance with n - 1 denominator; NaN below two values.
/// Exactly zero for constant input, whatever rounding the mean carries.
pub fn sample_variance(x: &[f64]) -> f64 {
    if x.len() < 2 {
        return f64::NAN;
    }
    if is_constant(x) {
        return 0.0;
    }
    let m = mean(x);
    x.iter().map(|&v| (v - m).powi(2)).sum::<f64>() / (x.len() as f64 - 1.0)
}

/// Student's t-test for two independent samples, two-sided, equal variances.
///
/// The statistic is signed as `mean(a) - mean(b)`. Fewer than two values in
/// either sample, or constant values in both samples, give NaN statistic and
/// p-value instead of an error.
pub fn students_t_test(a: &[f64], b: &[f64]) -> TTestResult {
    let n_a = a.len() as f64;
    let n_b = b.len() as f64;
    let df = n_a + n_b - 2.0;

    if a.len() < 2 || b.len() < 2 {
        return TTestResult::degenerate(df);
    }

    if is_constant(a) && is_constant(b) {
        return TTestResult::degenerate(df);
    }

    let var_a = sample_variance(a);
    let var_b = sample_variance(b);

    let pooled = ((n_a - 1.0) * var_a + (n_b - 1.0) * var_b) / df;
    let se = (pooled * (1.0 / n_a + 1.0 / n_b)).sqrt();
    let statistic = (mean(a) - mean(b)) / se;

    TTestResult {
        statistic,
        pvalue: calculate_pvalue_t(statistic, df),
        df,
    }
}
