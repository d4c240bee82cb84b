//! Compound annual growth rates over sliding windows.
//!
//! For a period of P years, every window of width 1..P ending inside the
//! trailing anchor range contributes one CAGR. Degenerate windows stay in
//! the sequence as `None`; downstream medians filter them instead of
//! shrinking the window set.

use rust_decimal::{Decimal, MathematicalOps};

use crate::error::StockvalError;
use crate::stats::{self, round_dp};
use crate::types::{DataInterval, MetricSeries, Period};
use crate::StockvalResult;

/// Decimal places CAGR values are rounded to.
const CAGR_PRECISION: u32 = 5;

/// CAGR from a start and end value over `years`. `None` when either
/// endpoint is non-positive (sign flips and zero starts have no meaningful
/// growth rate) or `years` is 0.
pub fn cagr(start: Decimal, end: Decimal, years: u32) -> Option<Decimal> {
    if years == 0 || start.min(end) <= Decimal::ZERO {
        return None;
    }
    let ratio = end / start;
    if years == 1 {
        return Some(ratio - Decimal::ONE);
    }
    let root = Decimal::ONE / Decimal::from(years);
    Some(ratio.powd(root) - Decimal::ONE)
}

/// All sliding-window CAGRs of one metric for the given period, each
/// rounded to 5 decimal places.
///
/// The anchor count is the period's year count, except for the ten-year
/// case where it is one less (aligning with ten points of fiscal history).
/// Windows whose endpoints are missing yield `None`; a series too short to
/// host the window set at all is an error.
pub fn single_metric_cagrs(
    series: &MetricSeries,
    period: Period,
) -> StockvalResult<Vec<Option<Decimal>>> {
    let anchors = anchor_count(period);
    let len = series.len();
    if len < anchors + 1 {
        return Err(StockvalError::InsufficientData(format!(
            "{} data points needed for the {}-year window set, got {len}",
            anchors + 1,
            period.years(),
        )));
    }

    let values = series.values();
    let mut cagrs = Vec::new();
    let mut anchor_indices: Vec<usize> = (len - anchors..len).collect();

    for width in 1..=anchors {
        for &anchor in &anchor_indices {
            let start = values[anchor - 1];
            let end = values[anchor - 1 + width];
            let rate = match (start, end) {
                (Some(s), Some(e)) => cagr(s, e, width as u32).map(|r| round_dp(r, CAGR_PRECISION)),
                _ => None,
            };
            cagrs.push(rate);
        }
        anchor_indices.pop();
    }

    Ok(cagrs)
}

/// Validity-gated median of a CAGR sequence. `None` when more than half
/// the windows are undefined, or every window is.
pub fn median_cagr(cagrs: &[Option<Decimal>]) -> Option<Decimal> {
    if !stats::is_data_valid(cagrs) {
        return None;
    }
    stats::median_ignoring_missing(cagrs)
}

/// CAGRs of a benchmark price series: one price per year is sampled at
/// annual strides back from the latest observation, then the resampled
/// series runs through the same window enumeration as any metric.
pub fn benchmark_cagrs(
    prices: &[Decimal],
    interval: DataInterval,
    period: Period,
) -> StockvalResult<Vec<Option<Decimal>>> {
    let stride = match interval {
        DataInterval::OneDay => 252,
        DataInterval::OneMonth => 12,
        other => {
            return Err(StockvalError::InvalidConfiguration {
                field: "interval".into(),
                reason: format!(
                    "benchmark CAGR supports 1d or 1mo sampling, got {}",
                    other.label()
                ),
            })
        }
    };

    let years = period.years() as usize;
    let needed = years * stride + 1;
    if prices.len() < needed {
        return Err(StockvalError::InsufficientData(format!(
            "{needed} price points needed for a {years}-year benchmark CAGR, got {}",
            prices.len(),
        )));
    }

    let mut sampled = Vec::with_capacity(years + 1);
    let mut index = prices.len() - 1;
    sampled.push(prices[index]);
    for _ in 0..years {
        index -= stride;
        sampled.push(prices[index]);
    }
    sampled.reverse();

    single_metric_cagrs(&MetricSeries::from_values(sampled), period)
}

fn anchor_count(period: Period) -> usize {
    match period {
        Period::TenYears => period.years() as usize - 1,
        _ => period.years() as usize,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    #[test]
    fn test_cagr_doubling_in_one_year() {
        assert_eq!(cagr(dec!(100), dec!(200), 1), Some(dec!(1)));
    }

    #[test]
    fn test_cagr_two_year_root() {
        // 100 -> 400 over 2 years is 100% per year.
        let rate = cagr(dec!(100), dec!(400), 2).unwrap();
        assert_eq!(round_dp(rate, 5), dec!(1));
    }

    #[test]
    fn test_cagr_non_positive_start_undefined() {
        assert_eq!(cagr(dec!(0), dec!(200), 1), None);
        assert_eq!(cagr(dec!(-5), dec!(200), 1), None);
    }

    #[test]
    fn test_cagr_non_positive_end_undefined() {
        assert_eq!(cagr(dec!(100), dec!(-1), 1), None);
    }

    #[test]
    fn test_one_year_window_set() {
        // One anchor, one width: a single CAGR over the last two points.
        let series = MetricSeries::from_values(vec![dec!(50), dec!(100), dec!(150)]);
        let cagrs = single_metric_cagrs(&series, Period::OneYear).unwrap();
        assert_eq!(cagrs, vec![Some(dec!(0.5))]);
    }

    #[test]
    fn test_three_year_window_count() {
        // 3 anchors at width 1, 2 at width 2, 1 at width 3.
        let series =
            MetricSeries::from_values(vec![dec!(10), dec!(20), dec!(40), dec!(80), dec!(160)]);
        let cagrs = single_metric_cagrs(&series, Period::ThreeYears).unwrap();
        assert_eq!(cagrs.len(), 6);
        // Every value doubles per year, so every window's CAGR is 100%.
        for rate in cagrs {
            assert_eq!(rate, Some(dec!(1)));
        }
    }

    #[test]
    fn test_ten_year_window_count() {
        // Nine anchors: 9 + 8 + ... + 1 = 45 windows over 10 points.
        let series = MetricSeries::from_values((1..=10).map(Decimal::from).collect());
        let cagrs = single_metric_cagrs(&series, Period::TenYears).unwrap();
        assert_eq!(cagrs.len(), 45);
    }

    #[test]
    fn test_short_series_rejected() {
        let series = MetricSeries::from_values(vec![dec!(1), dec!(2), dec!(3)]);
        assert!(matches!(
            single_metric_cagrs(&series, Period::TenYears),
            Err(StockvalError::InsufficientData(_))
        ));
    }

    #[test]
    fn test_missing_endpoint_yields_undefined_window() {
        let series = MetricSeries::new(vec![
            Some(dec!(10)),
            None,
            Some(dec!(40)),
            Some(dec!(80)),
            Some(dec!(160)),
        ]);
        let cagrs = single_metric_cagrs(&series, Period::ThreeYears).unwrap();
        // Windows touching the missing point are None but stay in place.
        assert_eq!(cagrs.len(), 6);
        assert!(cagrs.iter().any(|c| c.is_none()));
        assert!(cagrs.iter().any(|c| c.is_some()));
    }

    #[test]
    fn test_sign_flip_yields_undefined_window() {
        let series =
            MetricSeries::from_values(vec![dec!(10), dec!(-20), dec!(40), dec!(80), dec!(160)]);
        let cagrs = single_metric_cagrs(&series, Period::ThreeYears).unwrap();
        assert_eq!(cagrs.len(), 6);
        assert!(cagrs.contains(&None));
    }

    #[test]
    fn test_median_cagr_gated_by_validity() {
        let mostly_missing = vec![None, None, None, Some(dec!(0.1))];
        assert_eq!(median_cagr(&mostly_missing), None);

        let mostly_present = vec![Some(dec!(0.1)), Some(dec!(0.3)), Some(dec!(0.2)), None];
        assert_eq!(median_cagr(&mostly_present), Some(dec!(0.2)));
    }

    #[test]
    fn test_benchmark_cagrs_monthly_stride() {
        // 25 monthly prices; the sampler picks indices 24, 12 and 0.
        let mut prices = vec![dec!(100); 25];
        prices[0] = dec!(100);
        prices[12] = dec!(150);
        prices[24] = dec!(225);
        let cagrs = benchmark_cagrs(&prices, DataInterval::OneMonth, Period::ThreeYears);
        // 25 points cannot host a three-year monthly window.
        assert!(cagrs.is_err());

        let cagrs = benchmark_cagrs(&prices, DataInterval::OneMonth, Period::OneYear).unwrap();
        assert_eq!(cagrs, vec![Some(dec!(0.5))]);
    }

    #[test]
    fn test_benchmark_cagrs_unsupported_interval() {
        let prices = vec![dec!(100); 300];
        assert!(benchmark_cagrs(&prices, DataInterval::OneWeek, Period::OneYear).is_err());
    }

    #[test]
    fn test_benchmark_cagrs_daily() {
        // 253 flat prices except a doubled endpoint.
        let mut prices = vec![dec!(100); 253];
        prices[252] = dec!(200);
        let cagrs = benchmark_cagrs(&prices, DataInterval::OneDay, Period::OneYear).unwrap();
        assert_eq!(cagrs, vec![Some(dec!(1))]);
    }
}
