//! Statistics primitives shared by every pipeline stage.
//!
//! All functions are pure: no side effects, no retained state. Variance and
//! covariance use the population form (divide by N) throughout the crate.

use rust_decimal::{Decimal, RoundingStrategy};

use crate::error::StockvalError;
use crate::StockvalResult;

/// Round to `dp` decimal places, half away from zero.
pub fn round_dp(value: Decimal, dp: u32) -> Decimal {
    value.round_dp_with_strategy(dp, RoundingStrategy::MidpointAwayFromZero)
}

/// Arithmetic mean. Empty input is a usage error.
pub fn mean(values: &[Decimal]) -> StockvalResult<Decimal> {
    if values.is_empty() {
        return Err(StockvalError::InsufficientData(
            "mean of an empty series".into(),
        ));
    }
    let sum: Decimal = values.iter().sum();
    Ok(sum / Decimal::from(values.len()))
}

/// Population variance (divide by N, not N-1).
pub fn variance(values: &[Decimal]) -> StockvalResult<Decimal> {
    let m = mean(values)?;
    let sum: Decimal = values.iter().map(|v| (v - m) * (v - m)).sum();
    Ok(sum / Decimal::from(values.len()))
}

/// Population covariance of two equal-length series.
pub fn covariance(x: &[Decimal], y: &[Decimal]) -> StockvalResult<Decimal> {
    if x.len() != y.len() {
        return Err(StockvalError::InvalidConfiguration {
            field: "covariance".into(),
            reason: format!("series lengths differ ({} vs {})", x.len(), y.len()),
        });
    }
    let mean_x = mean(x)?;
    let mean_y = mean(y)?;
    let sum: Decimal = x
        .iter()
        .zip(y)
        .map(|(a, b)| (a - mean_x) * (b - mean_y))
        .sum();
    Ok(sum / Decimal::from(x.len()))
}

/// Median over the present observations. `None` when nothing is present.
pub fn median_ignoring_missing(values: &[Option<Decimal>]) -> Option<Decimal> {
    let mut present: Vec<Decimal> = values.iter().filter_map(|v| *v).collect();
    if present.is_empty() {
        return None;
    }
    present.sort();
    let n = present.len();
    if n % 2 == 1 {
        Some(present[n / 2])
    } else {
        Some((present[n / 2 - 1] + present[n / 2]) / Decimal::TWO)
    }
}

/// Validity gate: a series is usable as long as no more than half of its
/// observations are missing. Every median/CAGR aggregation checks this
/// first and yields `None` instead of computing over mostly-missing data.
pub fn is_data_valid(values: &[Option<Decimal>]) -> bool {
    let missing = values.iter().filter(|v| v.is_none()).count();
    missing * 2 <= values.len()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    #[test]
    fn test_mean() {
        let values = vec![dec!(1), dec!(2), dec!(3), dec!(4)];
        assert_eq!(mean(&values).unwrap(), dec!(2.5));
    }

    #[test]
    fn test_mean_empty_rejected() {
        assert!(mean(&[]).is_err());
    }

    #[test]
    fn test_population_variance() {
        // mean 3, squared deviations 4+1+0+1+4 = 10, /5 = 2
        let values = vec![dec!(1), dec!(2), dec!(3), dec!(4), dec!(5)];
        assert_eq!(variance(&values).unwrap(), dec!(2));
    }

    #[test]
    fn test_covariance_perfectly_correlated() {
        let x = vec![dec!(1), dec!(2), dec!(3)];
        let y = vec![dec!(2), dec!(4), dec!(6)];
        // cov(x, 2x) = 2 * var(x) = 2 * 2/3
        let expected = Decimal::TWO * variance(&x).unwrap();
        assert_eq!(covariance(&x, &y).unwrap(), expected);
    }

    #[test]
    fn test_covariance_length_mismatch_rejected() {
        let x = vec![dec!(1), dec!(2)];
        let y = vec![dec!(1)];
        assert!(covariance(&x, &y).is_err());
    }

    #[test]
    fn test_median_odd_count() {
        let values = vec![Some(dec!(3)), Some(dec!(1)), Some(dec!(2))];
        assert_eq!(median_ignoring_missing(&values), Some(dec!(2)));
    }

    #[test]
    fn test_median_even_count() {
        let values = vec![Some(dec!(4)), Some(dec!(1)), Some(dec!(3)), Some(dec!(2))];
        assert_eq!(median_ignoring_missing(&values), Some(dec!(2.5)));
    }

    #[test]
    fn test_median_singleton() {
        assert_eq!(median_ignoring_missing(&[Some(dec!(7))]), Some(dec!(7)));
    }

    #[test]
    fn test_median_skips_missing() {
        let values = vec![None, Some(dec!(10)), None, Some(dec!(20)), Some(dec!(30))];
        assert_eq!(median_ignoring_missing(&values), Some(dec!(20)));
    }

    #[test]
    fn test_median_all_missing() {
        assert_eq!(median_ignoring_missing(&[None, None]), None);
    }

    #[test]
    fn test_median_idempotent() {
        let values = vec![Some(dec!(4)), Some(dec!(1)), Some(dec!(3)), Some(dec!(2))];
        let median = median_ignoring_missing(&values).unwrap();
        assert_eq!(median_ignoring_missing(&[Some(median)]), Some(median));
    }

    #[test]
    fn test_validity_gate_half_missing_is_valid() {
        let values = vec![Some(dec!(1)), None, Some(dec!(2)), None];
        assert!(is_data_valid(&values));
    }

    #[test]
    fn test_validity_gate_majority_missing_is_invalid() {
        let values = vec![Some(dec!(1)), None, None];
        assert!(!is_data_valid(&values));
    }

    #[test]
    fn test_round_half_away_from_zero() {
        assert_eq!(round_dp(dec!(2.675), 2), dec!(2.68));
        assert_eq!(round_dp(dec!(-2.675), 2), dec!(-2.68));
        assert_eq!(round_dp(dec!(1.23456), 5), dec!(1.23456));
    }
}
