//! Aggregation layer: per-period CAGR and median summaries of a metric,
//! and the margin-of-safety assessment of estimated intrinsic values.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::StockvalError;
use crate::growth::{median_cagr, single_metric_cagrs};
use crate::stats::{self, round_dp};
use crate::types::{Database, Metric, MetricSeries, Money, Percent, Period};
use crate::StockvalResult;

/// Decimal places of the per-period aggregates.
const AGGREGATE_PRECISION: u32 = 5;

/// One aggregate per supported window. `None` where the history is too
/// short or too sparse to support the window.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PeriodAggregates {
    pub one_year: Option<Decimal>,
    pub three_years: Option<Decimal>,
    pub ten_years: Option<Decimal>,
}

impl PeriodAggregates {
    fn from_fn(mut aggregate: impl FnMut(Period) -> Option<Decimal>) -> Self {
        PeriodAggregates {
            one_year: aggregate(Period::OneYear),
            three_years: aggregate(Period::ThreeYears),
            ten_years: aggregate(Period::TenYears),
        }
    }
}

/// Median CAGR of one metric per period. Capital expenditure is stored
/// with a negative sign and flipped before growth is derived.
pub fn generate_cagr_mapping(db: &Database, metric: Metric) -> StockvalResult<PeriodAggregates> {
    let series = lookup_series(db, metric)?;
    let series = if metric == Metric::CapEx {
        MetricSeries::new(series.values().iter().map(|v| v.map(|d| -d)).collect())
    } else {
        series.clone()
    };

    Ok(PeriodAggregates::from_fn(|period| {
        match single_metric_cagrs(&series, period) {
            Ok(cagrs) => median_cagr(&cagrs).map(|m| round_dp(m, AGGREGATE_PRECISION)),
            // History too short for this window; the aggregate stays
            // undefined rather than failing the whole mapping.
            Err(_) => None,
        }
    }))
}

/// Ignoring-missing median of one metric's trailing raw values per period.
pub fn generate_median_mapping(db: &Database, metric: Metric) -> StockvalResult<PeriodAggregates> {
    let series = lookup_series(db, metric)?;

    Ok(PeriodAggregates::from_fn(|period| {
        let window = series.trailing(period.years() as usize);
        if window.len() < period.years() as usize || !stats::is_data_valid(window) {
            return None;
        }
        stats::median_ignoring_missing(window).map(|m| round_dp(m, AGGREGATE_PRECISION))
    }))
}

/// Verdict of an intrinsic value against the current market price.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Verdict {
    Undervalued,
    Overvalued,
    Fair,
}

/// Assessment of one intrinsic-value estimate after the margin of safety.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Assessment {
    /// Discount-rate label the estimate belongs to.
    pub discount_rate: String,
    pub intrinsic_value: Money,
    /// Intrinsic value reduced by the margin of safety.
    pub value_after_margin: Money,
    pub current_price: Money,
    pub verdict: Verdict,
}

/// Compare each defined intrinsic value, less the margin of safety (%),
/// with the current price. Undefined estimates carry no verdict and are
/// skipped.
pub fn assess_intrinsic_values(
    intrinsic_values: &BTreeMap<String, Option<Money>>,
    margin_of_safety: Percent,
    current_price: Money,
) -> Vec<Assessment> {
    let margin_factor = Decimal::ONE - margin_of_safety / Decimal::ONE_HUNDRED;
    intrinsic_values
        .iter()
        .filter_map(|(label, value)| {
            let intrinsic_value = (*value)?;
            let value_after_margin = intrinsic_value * margin_factor;
            let verdict = if value_after_margin > current_price {
                Verdict::Undervalued
            } else if current_price > value_after_margin {
                Verdict::Overvalued
            } else {
                Verdict::Fair
            };
            Some(Assessment {
                discount_rate: label.clone(),
                intrinsic_value,
                value_after_margin,
                current_price,
                verdict,
            })
        })
        .collect()
}

fn lookup_series(db: &Database, metric: Metric) -> StockvalResult<&MetricSeries> {
    db.series(metric)
        .ok_or_else(|| StockvalError::LookupMiss(format!("no {} series in the database", metric.label())))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;
    use std::collections::HashMap;

    fn doubling_database() -> Database {
        let mut data = HashMap::new();
        // Doubles every year for 11 periods.
        let values: Vec<Decimal> = (0..11).map(|i| Decimal::from(1u64 << i)).collect();
        data.insert(Metric::Revenue, MetricSeries::from_values(values));
        Database::new("AAPL", "XNAS", data)
    }

    #[test]
    fn test_cagr_mapping_constant_growth() {
        let mapping = generate_cagr_mapping(&doubling_database(), Metric::Revenue).unwrap();
        assert_eq!(mapping.one_year, Some(dec!(1)));
        assert_eq!(mapping.three_years, Some(dec!(1)));
        assert_eq!(mapping.ten_years, Some(dec!(1)));
    }

    #[test]
    fn test_cagr_mapping_short_history() {
        let mut data = HashMap::new();
        data.insert(
            Metric::Revenue,
            MetricSeries::from_values(vec![dec!(100), dec!(150), dec!(225)]),
        );
        let db = Database::new("AAPL", "XNAS", data);
        let mapping = generate_cagr_mapping(&db, Metric::Revenue).unwrap();
        assert_eq!(mapping.one_year, Some(dec!(0.5)));
        // Three points cannot host the three- or ten-year window sets.
        assert_eq!(mapping.three_years, None);
        assert_eq!(mapping.ten_years, None);
    }

    #[test]
    fn test_cagr_mapping_flips_capex_sign() {
        let mut data = HashMap::new();
        // CapEx is stored negative; growth applies to its magnitude.
        data.insert(
            Metric::CapEx,
            MetricSeries::from_values(vec![dec!(-100), dec!(-120)]),
        );
        let db = Database::new("AAPL", "XNAS", data);
        let mapping = generate_cagr_mapping(&db, Metric::CapEx).unwrap();
        assert_eq!(mapping.one_year, Some(dec!(0.2)));
    }

    #[test]
    fn test_cagr_mapping_missing_metric() {
        assert!(matches!(
            generate_cagr_mapping(&doubling_database(), Metric::Eps),
            Err(StockvalError::LookupMiss(_))
        ));
    }

    #[test]
    fn test_median_mapping_windows() {
        let mut data = HashMap::new();
        data.insert(
            Metric::ReturnOnEquity,
            MetricSeries::from_values(vec![
                dec!(1),
                dec!(2),
                dec!(3),
                dec!(4),
                dec!(5),
                dec!(6),
                dec!(7),
                dec!(8),
                dec!(9),
                dec!(10),
            ]),
        );
        let db = Database::new("AAPL", "XNAS", data);
        let mapping = generate_median_mapping(&db, Metric::ReturnOnEquity).unwrap();
        assert_eq!(mapping.one_year, Some(dec!(10)));
        assert_eq!(mapping.three_years, Some(dec!(9)));
        assert_eq!(mapping.ten_years, Some(dec!(5.5)));
    }

    #[test]
    fn test_median_mapping_short_history() {
        let mut data = HashMap::new();
        data.insert(
            Metric::ReturnOnEquity,
            MetricSeries::from_values(vec![dec!(5), dec!(6)]),
        );
        let db = Database::new("AAPL", "XNAS", data);
        let mapping = generate_median_mapping(&db, Metric::ReturnOnEquity).unwrap();
        assert_eq!(mapping.one_year, Some(dec!(6)));
        assert_eq!(mapping.three_years, None);
        assert_eq!(mapping.ten_years, None);
    }

    #[test]
    fn test_assessment_verdicts() {
        let mut values = BTreeMap::new();
        values.insert("8.0%".to_string(), Some(dec!(150)));
        values.insert("10.0%".to_string(), Some(dec!(90)));
        values.insert("12.0%".to_string(), None);

        let assessments = assess_intrinsic_values(&values, dec!(20), dec!(100));
        assert_eq!(assessments.len(), 2);

        // 150 * 0.8 = 120 > 100: undervalued.
        let low_rate = assessments.iter().find(|a| a.discount_rate == "8.0%").unwrap();
        assert_eq!(low_rate.value_after_margin, dec!(120.0));
        assert_eq!(low_rate.verdict, Verdict::Undervalued);

        // 90 * 0.8 = 72 < 100: overvalued.
        let high_rate = assessments.iter().find(|a| a.discount_rate == "10.0%").unwrap();
        assert_eq!(high_rate.verdict, Verdict::Overvalued);
    }

    #[test]
    fn test_assessment_fair_at_equality() {
        let mut values = BTreeMap::new();
        values.insert("9.0%".to_string(), Some(dec!(100)));
        let assessments = assess_intrinsic_values(&values, dec!(0), dec!(100));
        assert_eq!(assessments[0].verdict, Verdict::Fair);
    }
}
