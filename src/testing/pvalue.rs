//! P-value calculation from test statistics

use statrs::distribution::{ContinuousCDF, StudentsT};

/// Two-sided p-value from a t-statistic with `df` degrees of freedom.
///
/// NaN statistics or non-positive degrees of freedom give NaN. An infinite
/// statistic gives 0.
pub fn calculate_pvalue_t(stat: f64, df: f64) -> f64 {
    if stat.is_nan() || !(df > 0.0) {
        return f64::NAN;
    }
    if stat.is_infinite() {
        return 0.0;
    }

    match StudentsT::new(0.0, 1.0, df) {
        Ok(t_dist) => (2.0 * t_dist.cdf(-stat.abs())).min(1.0),
        Err(_) => f64::NAN,
    }
}
