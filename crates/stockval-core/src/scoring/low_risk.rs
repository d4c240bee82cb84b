//! "High returns from low risk" composite: three independent checks on
//! beta, one-year momentum and trailing dividend yield, summed to 0-3.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::beta::{estimate_beta, BetaInput};
use crate::stats::round_dp;
use crate::types::{with_metadata, ComputationOutput, DataInterval, Period};
use crate::StockvalResult;

/// Trading days looked back for the momentum check.
const MOMENTUM_LOOKBACK: usize = 252;
/// Dividend payments summed for the trailing yield.
const DIVIDEND_OBSERVATIONS: usize = 4;

/// Input for the composite score: daily stock and benchmark prices plus
/// the dividend payment history, all oldest first.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LowRiskInput {
    pub stock_prices: Vec<Decimal>,
    pub benchmark_prices: Vec<Decimal>,
    pub dividends: Vec<Decimal>,
}

/// Component values and the composite score.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LowRiskOutput {
    pub one_year_beta: Option<Decimal>,
    pub one_year_momentum: Option<Decimal>,
    pub one_year_dividend_yield: Option<Decimal>,

    /// Beta below 1.0.
    pub low_beta: bool,
    /// Positive one-year momentum.
    pub positive_momentum: bool,
    /// Trailing yield of at least 3%.
    pub adequate_yield: bool,

    /// Total score (0-3).
    pub score: u8,
}

/// Compute the composite score. Undefined components (short price history,
/// too few dividend payments) fail their check and leave a warning.
pub fn calculate_low_risk_score(
    input: &LowRiskInput,
) -> StockvalResult<ComputationOutput<LowRiskOutput>> {
    let mut warnings: Vec<String> = Vec::new();

    let beta_run = estimate_beta(&BetaInput {
        stock_prices: input.stock_prices.clone(),
        benchmark_prices: input.benchmark_prices.clone(),
        interval: DataInterval::OneDay,
        period: Period::OneYear,
    })?;
    warnings.extend(beta_run.warnings);
    let one_year_beta = beta_run.result.beta;

    let one_year_momentum = momentum(&input.stock_prices, &mut warnings);
    let one_year_dividend_yield =
        dividend_yield(&input.stock_prices, &input.dividends, &mut warnings);

    let low_beta = matches!(one_year_beta, Some(beta) if beta < Decimal::ONE);
    let positive_momentum = matches!(one_year_momentum, Some(m) if m > Decimal::ZERO);
    let adequate_yield = matches!(one_year_dividend_yield, Some(y) if y >= dec!(0.03));

    let score = [low_beta, positive_momentum, adequate_yield]
        .iter()
        .filter(|&&passed| passed)
        .count() as u8;

    Ok(with_metadata(
        "Beta / momentum / dividend-yield composite",
        input,
        warnings,
        LowRiskOutput {
            one_year_beta,
            one_year_momentum,
            one_year_dividend_yield,
            low_beta,
            positive_momentum,
            adequate_yield,
            score,
        },
    ))
}

/// Price change over one trading year, 2 decimal places. Needs the current
/// price plus 252 history points.
fn momentum(prices: &[Decimal], warnings: &mut Vec<String>) -> Option<Decimal> {
    if prices.len() < MOMENTUM_LOOKBACK + 1 {
        warnings.push(format!(
            "need {} price points for one-year momentum, got {}",
            MOMENTUM_LOOKBACK + 1,
            prices.len(),
        ));
        return None;
    }
    let current = prices[prices.len() - 1];
    let year_ago = prices[prices.len() - 1 - MOMENTUM_LOOKBACK];
    if year_ago <= Decimal::ZERO {
        warnings.push("non-positive price a year ago; momentum left undefined".into());
        return None;
    }
    Some(round_dp(current / year_ago - Decimal::ONE, 2))
}

/// Sum of the four most recent dividend payments over the current price,
/// 5 decimal places.
fn dividend_yield(
    prices: &[Decimal],
    dividends: &[Decimal],
    warnings: &mut Vec<String>,
) -> Option<Decimal> {
    if dividends.len() < DIVIDEND_OBSERVATIONS {
        warnings.push(format!(
            "need {DIVIDEND_OBSERVATIONS} dividend payments for the trailing yield, got {}",
            dividends.len(),
        ));
        return None;
    }
    let current = match prices.last() {
        Some(p) if *p > Decimal::ZERO => *p,
        _ => {
            warnings.push("no positive current price; dividend yield left undefined".into());
            return None;
        }
    };
    let paid: Decimal = dividends[dividends.len() - DIVIDEND_OBSERVATIONS..]
        .iter()
        .sum();
    Some(round_dp(paid / current, 5))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    /// 253 daily prices drifting linearly from `start` by `step`.
    fn drifting_prices(start: Decimal, step: Decimal) -> Vec<Decimal> {
        (0..253)
            .map(|i| start + step * Decimal::from(i))
            .collect()
    }

    #[test]
    fn test_full_score() {
        // Stock drifts up half as fast as the benchmark: beta < 1,
        // momentum positive; dividends of 1 on a price near 125 clear 3%.
        let input = LowRiskInput {
            stock_prices: drifting_prices(dec!(100), dec!(0.1)),
            benchmark_prices: drifting_prices(dec!(100), dec!(0.2)),
            dividends: vec![dec!(1), dec!(1), dec!(1), dec!(1)],
        };
        let output = calculate_low_risk_score(&input).unwrap();
        let out = &output.result;
        assert!(out.low_beta);
        assert!(out.positive_momentum);
        assert!(out.adequate_yield);
        assert_eq!(out.score, 3);
    }

    #[test]
    fn test_one_of_three() {
        // Stock rises twice as fast as the benchmark: beta > 1. Momentum
        // positive. Dividends too small for 3%.
        let input = LowRiskInput {
            stock_prices: drifting_prices(dec!(100), dec!(0.2)),
            benchmark_prices: drifting_prices(dec!(100), dec!(0.1)),
            dividends: vec![dec!(0.1), dec!(0.1), dec!(0.1), dec!(0.1)],
        };
        let output = calculate_low_risk_score(&input).unwrap();
        let out = &output.result;
        assert!(!out.low_beta);
        assert!(out.positive_momentum);
        assert!(!out.adequate_yield);
        assert_eq!(out.score, 1);
    }

    #[test]
    fn test_momentum_value() {
        // 100 -> 125.2 over 252 steps of 0.1: momentum 25%.
        let input = LowRiskInput {
            stock_prices: drifting_prices(dec!(100), dec!(0.1)),
            benchmark_prices: drifting_prices(dec!(100), dec!(0.1)),
            dividends: vec![],
        };
        let output = calculate_low_risk_score(&input).unwrap();
        assert_eq!(output.result.one_year_momentum, Some(dec!(0.25)));
    }

    #[test]
    fn test_short_history_fails_momentum_and_beta() {
        let input = LowRiskInput {
            stock_prices: vec![dec!(100); 100],
            benchmark_prices: vec![dec!(100); 100],
            dividends: vec![dec!(1), dec!(1), dec!(1), dec!(1)],
        };
        let output = calculate_low_risk_score(&input).unwrap();
        let out = &output.result;
        assert_eq!(out.one_year_beta, None);
        assert_eq!(out.one_year_momentum, None);
        assert!(!out.low_beta);
        assert!(!out.positive_momentum);
        // Yield still resolves: 4 / 100 = 4%.
        assert_eq!(out.one_year_dividend_yield, Some(dec!(0.04)));
        assert_eq!(out.score, 1);
        assert!(output.warnings.len() >= 2);
    }

    #[test]
    fn test_too_few_dividends_fail_yield() {
        let input = LowRiskInput {
            stock_prices: drifting_prices(dec!(100), dec!(0.1)),
            benchmark_prices: drifting_prices(dec!(100), dec!(0.1)),
            dividends: vec![dec!(5), dec!(5), dec!(5)],
        };
        let output = calculate_low_risk_score(&input).unwrap();
        assert_eq!(output.result.one_year_dividend_yield, None);
        assert!(!output.result.adequate_yield);
    }

    #[test]
    fn test_yield_uses_latest_four_payments() {
        let input = LowRiskInput {
            stock_prices: vec![dec!(100); 300],
            benchmark_prices: vec![dec!(100); 300],
            dividends: vec![dec!(99), dec!(1), dec!(1), dec!(1), dec!(1)],
        };
        let output = calculate_low_risk_score(&input).unwrap();
        // 4 / 100, not 102 / 100.
        assert_eq!(output.result.one_year_dividend_yield, Some(dec!(0.04)));
    }

    #[test]
    fn test_yield_precision() {
        let input = LowRiskInput {
            stock_prices: vec![dec!(300); 300],
            benchmark_prices: vec![dec!(300); 300],
            dividends: vec![dec!(1), dec!(1), dec!(1), dec!(1)],
        };
        let output = calculate_low_risk_score(&input).unwrap();
        // 4 / 300 = 0.013333... -> 0.01333 at 5 decimal places.
        assert_eq!(output.result.one_year_dividend_yield, Some(dec!(0.01333)));
    }
}
