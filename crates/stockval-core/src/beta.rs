//! Beta estimation from aligned price series.
//!
//! Beta is the slope of the stock's cumulative return against the
//! benchmark's cumulative return: covariance / benchmark variance.
//! Cumulative rather than raw returns dampen single-period noise while
//! keeping the regression interpretation.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::StockvalError;
use crate::stats::{covariance, round_dp, variance};
use crate::types::{with_metadata, ComputationOutput, DataInterval, Period};
use crate::StockvalResult;

/// Trading days per year for daily sampling.
const TRADING_DAYS_PER_YEAR: usize = 252;
/// Months per year for monthly sampling.
const MONTHS_PER_YEAR: usize = 12;

/// Input for a beta estimation run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BetaInput {
    /// Stock prices, oldest first.
    pub stock_prices: Vec<Decimal>,
    /// Benchmark prices, oldest first, same sampling as the stock's.
    pub benchmark_prices: Vec<Decimal>,
    /// Sampling granularity of both series.
    pub interval: DataInterval,
    /// Estimation window.
    pub period: Period,
}

/// Output of a beta estimation run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BetaOutput {
    /// Estimated beta, 2 decimal places. `None` when the series were too
    /// short or the benchmark showed no variance.
    pub beta: Option<Decimal>,
    /// Trailing sample count the estimate is (or would be) based on.
    pub required_samples: usize,
}

/// Number of data points needed to estimate over `period` at `interval`.
/// One extra point on top of the return count, since returns are
/// period-over-period.
pub fn required_sample_count(interval: DataInterval, period: Period) -> StockvalResult<usize> {
    match interval {
        DataInterval::OneDay => Ok(period.years() as usize * TRADING_DAYS_PER_YEAR + 1),
        DataInterval::OneMonth => Ok(period.years() as usize * MONTHS_PER_YEAR + 1),
        other => Err(StockvalError::InvalidConfiguration {
            field: "interval".into(),
            reason: format!(
                "beta estimation supports 1d or 1mo sampling, got {}",
                other.label()
            ),
        }),
    }
}

/// Period-over-period simple returns; the first return is defined as 0.
pub fn simple_returns(prices: &[Decimal]) -> Vec<Decimal> {
    let mut returns = Vec::with_capacity(prices.len());
    returns.push(Decimal::ZERO);
    for window in prices.windows(2) {
        returns.push(window[1] / window[0] - Decimal::ONE);
    }
    returns
}

/// Running sum of returns, anchored at 0.
pub fn cumulative_returns(returns: &[Decimal]) -> Vec<Decimal> {
    let mut cumulative = Vec::with_capacity(returns.len());
    let mut acc = Decimal::ZERO;
    cumulative.push(acc);
    for r in &returns[1..] {
        acc += r;
        cumulative.push(acc);
    }
    cumulative
}

/// Estimate beta over the trailing window of both series.
///
/// Series shorter than the required sample count leave beta undefined with
/// a warning; so does a benchmark without variance. Non-positive prices in
/// the estimation window are a usage error.
pub fn estimate_beta(input: &BetaInput) -> StockvalResult<ComputationOutput<BetaOutput>> {
    let required = required_sample_count(input.interval, input.period)?;
    let mut warnings: Vec<String> = Vec::new();

    let beta = if input.stock_prices.len() < required || input.benchmark_prices.len() < required {
        warnings.push(format!(
            "need {required} data points per series, got {} stock / {} benchmark; beta left undefined",
            input.stock_prices.len(),
            input.benchmark_prices.len(),
        ));
        None
    } else {
        let stock = &input.stock_prices[input.stock_prices.len() - required..];
        let benchmark = &input.benchmark_prices[input.benchmark_prices.len() - required..];
        validate_prices(stock, "stock_prices")?;
        validate_prices(benchmark, "benchmark_prices")?;

        let cumulative_stock = cumulative_returns(&simple_returns(stock));
        let cumulative_benchmark = cumulative_returns(&simple_returns(benchmark));

        let benchmark_variance = variance(&cumulative_benchmark)?;
        if benchmark_variance.is_zero() {
            warnings.push("benchmark shows no variance; beta left undefined".into());
            None
        } else {
            let cov = covariance(&cumulative_stock, &cumulative_benchmark)?;
            Some(round_dp(cov / benchmark_variance, 2))
        }
    };

    Ok(with_metadata(
        "Beta via cumulative-return regression",
        input,
        warnings,
        BetaOutput {
            beta,
            required_samples: required,
        },
    ))
}

fn validate_prices(prices: &[Decimal], field: &str) -> StockvalResult<()> {
    if prices.iter().any(|p| *p <= Decimal::ZERO) {
        return Err(StockvalError::InvalidConfiguration {
            field: field.into(),
            reason: "prices must be positive".into(),
        });
    }
    Ok(())
}
