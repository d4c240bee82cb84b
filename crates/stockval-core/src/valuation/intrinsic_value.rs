//! Intrinsic value per share via the discounted-cash-flow model.
//!
//! The projection seeds from the median of the target metric's full
//! history, grows it at a flat assumed rate, discounts each projected year
//! at every candidate rate, and adds a perpetuity terminal value. One
//! intrinsic value per candidate rate; the whole mapping is re-derived on
//! every call.

use std::collections::BTreeMap;

use rust_decimal::{Decimal, MathematicalOps};
use serde::{Deserialize, Serialize};

use crate::error::StockvalError;
use crate::stats::{self, round_dp};
use crate::types::{with_metadata, ComputationOutput, Database, Metric, Money, Percent, Period};
use crate::StockvalResult;

/// Parameters for a DCF estimation run. All rates are percentages.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DcfParams {
    /// Cash-flow metric the projection is based on.
    pub metric: Metric,
    pub shares_outstanding: Decimal,
    /// Assumed annual growth over the prediction horizon.
    pub growth_rate: Percent,
    /// Perpetual growth beyond the horizon.
    pub terminal_growth_rate: Percent,
    pub prediction_period: Period,
    /// Candidate discount rates; one intrinsic value each. Must not be
    /// empty.
    pub discount_rates: Vec<Percent>,
}

/// Output of a DCF estimation run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IntrinsicValueOutput {
    /// Per-share intrinsic value keyed by formatted discount-rate label
    /// ("10.0%"). `None` marks a rate whose terminal value degenerates.
    pub intrinsic_values: BTreeMap<String, Option<Money>>,
    /// Median cash flow the projection was seeded with.
    pub seed_cash_flow: Money,
}

/// Run the DCF model once per candidate discount rate.
pub fn estimate_intrinsic_value(
    db: &Database,
    params: &DcfParams,
) -> StockvalResult<ComputationOutput<IntrinsicValueOutput>> {
    validate_params(params)?;

    let series = db.series(params.metric).ok_or_else(|| {
        StockvalError::LookupMiss(format!(
            "no {} series in the database",
            params.metric.label()
        ))
    })?;
    if !stats::is_data_valid(series.values()) {
        return Err(StockvalError::InsufficientData(format!(
            "{} history is mostly missing; cannot seed the projection",
            params.metric.label(),
        )));
    }
    let seed = stats::median_ignoring_missing(series.values()).ok_or_else(|| {
        StockvalError::InsufficientData(format!(
            "{} history is empty; cannot seed the projection",
            params.metric.label(),
        ))
    })?;

    let mut warnings: Vec<String> = Vec::new();
    let horizon = params.prediction_period.years();
    let growth_factor = Decimal::ONE + params.growth_rate / Decimal::ONE_HUNDRED;

    let mut intrinsic_values = BTreeMap::new();
    for &rate in &params.discount_rates {
        let label = format!("{rate:.1}%");
        let value = per_share_value(seed, growth_factor, rate, horizon, params);
        if value.is_none() {
            warnings.push(format!(
                "discount rate {label} equals the terminal growth rate; intrinsic value left undefined",
            ));
        }
        intrinsic_values.insert(label, value);
    }

    Ok(with_metadata(
        "Discounted cash flow over median-seeded projection",
        params,
        warnings,
        IntrinsicValueOutput {
            intrinsic_values,
            seed_cash_flow: seed,
        },
    ))
}

/// Terminal value: the projected flow one year past the horizon grown at
/// the terminal rate, capitalized at (dr - g_t) and discounted back.
/// `None` when the capitalization denominator is zero.
pub fn terminal_value(
    seed: Decimal,
    growth_rate: Percent,
    terminal_growth_rate: Percent,
    discount_rate: Percent,
    period: Period,
) -> Option<Decimal> {
    if discount_rate == terminal_growth_rate {
        return None;
    }
    let years = period.years() as i64 + 1;
    let growth_factor = Decimal::ONE + growth_rate / Decimal::ONE_HUNDRED;
    let numerator = seed
        * growth_factor.powi(years)
        * (Decimal::ONE + terminal_growth_rate / Decimal::ONE_HUNDRED);
    let denominator = (discount_rate - terminal_growth_rate) / Decimal::ONE_HUNDRED;
    let discount_back =
        (Decimal::ONE / (Decimal::ONE + discount_rate / Decimal::ONE_HUNDRED)).powi(years);
    Some(numerator / denominator * discount_back)
}

/// The growth assumption to feed the projection: the lowest of the
/// metric's own CAGR, return on equity, and (when available) the
/// benchmark's CAGR, each at 1 decimal place, floored at zero. An invalid
/// metric CAGR short-circuits to `None`.
pub fn optimal_growth_rate(
    metric_cagr: Option<Percent>,
    return_on_equity: Percent,
    benchmark_cagr: Option<Percent>,
) -> Option<Percent> {
    let mut chosen = round_dp(metric_cagr?, 1);
    if let Some(benchmark) = benchmark_cagr {
        let benchmark = round_dp(benchmark, 1);
        if chosen > benchmark {
            chosen = benchmark;
        }
    }
    let roe = round_dp(return_on_equity, 1);
    if chosen > roe {
        chosen = roe;
    }
    if chosen < Decimal::ZERO {
        chosen = Decimal::ZERO;
    }
    Some(chosen)
}

fn validate_params(params: &DcfParams) -> StockvalResult<()> {
    if params.discount_rates.is_empty() {
        return Err(StockvalError::InvalidConfiguration {
            field: "discount_rates".into(),
            reason: "at least one candidate discount rate is required".into(),
        });
    }
    if params
        .discount_rates
        .iter()
        .any(|r| *r <= Decimal::ZERO)
    {
        return Err(StockvalError::InvalidConfiguration {
            field: "discount_rates".into(),
            reason: "candidate discount rates must be positive".into(),
        });
    }
    if params.shares_outstanding <= Decimal::ZERO {
        return Err(StockvalError::InvalidConfiguration {
            field: "shares_outstanding".into(),
            reason: "share count must be positive".into(),
        });
    }
    Ok(())
}

fn per_share_value(
    seed: Decimal,
    growth_factor: Decimal,
    discount_rate: Percent,
    horizon: u32,
    params: &DcfParams,
) -> Option<Decimal> {
    let terminal = terminal_value(
        seed,
        params.growth_rate,
        params.terminal_growth_rate,
        discount_rate,
        params.prediction_period,
    )?;

    let discount_base = Decimal::ONE + discount_rate / Decimal::ONE_HUNDRED;
    let mut projected = seed;
    let mut discounted_sum = Decimal::ZERO;
    for year in 0..=horizon {
        projected *= growth_factor;
        discounted_sum += projected / discount_base.powi(year as i64);
    }

    Some(round_dp(
        (discounted_sum + terminal) / params.shares_outstanding,
        2,
    ))
}
