//! Discount-rate synthesis from capital structure and credit standing.
//!
//! Cost of equity: Ke = Rf + premium(region) * beta
//! After-tax cost of debt: Kd = (Rf + spread(interest coverage)) * (1 - tax/100)
//! Discount rate = Ke * equity ratio + Kd * debt ratio
//!
//! Any undefined input undefines the whole rate; a partial rate is never
//! emitted.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::reference::ReferenceTables;
use crate::stats::{self, round_dp};
use crate::types::{
    with_metadata, CapitalStructure, CompanyType, ComputationOutput, Database, Metric, Period,
    Region,
};
use crate::StockvalResult;

/// Parameters for a discount-rate estimation run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiscountRateParams {
    /// Risk-free rate, in the unit convention of the reference tables.
    pub risk_free_rate: Decimal,
    /// Beta of the asset against its benchmark.
    pub beta: Decimal,
    pub company_type: CompanyType,
    pub region: Region,
    /// Window for the capital-structure and credit-standing medians.
    pub period: Period,
}

/// Output of a discount-rate estimation run. Component values are echoed
/// so a caller can see which input undefined the result.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiscountRateOutput {
    pub discount_rate: Option<Decimal>,
    pub cost_of_equity: Option<Decimal>,
    pub cost_of_debt_after_tax: Option<Decimal>,
    pub capital_structure: Option<CapitalStructure>,
}

/// Estimate the discount rate for one asset, 2 decimal places.
pub fn estimate_discount_rate(
    db: &Database,
    params: &DiscountRateParams,
    tables: &ReferenceTables,
) -> StockvalResult<ComputationOutput<DiscountRateOutput>> {
    let mut warnings: Vec<String> = Vec::new();

    let cost_of_equity = equity_cost(params, tables, &mut warnings);
    let cost_of_debt_after_tax = debt_cost(db, params, tables, &mut warnings);
    let capital_structure = capital_structure(db, params.period, &mut warnings);

    let discount_rate = match (cost_of_equity, cost_of_debt_after_tax, &capital_structure) {
        (Some(ke), Some(kd), Some(weights)) => Some(round_dp(
            ke * weights.equity_ratio + kd * weights.debt_ratio,
            2,
        )),
        _ => None,
    };

    Ok(with_metadata(
        "Discount rate via weighted cost of equity and after-tax cost of debt",
        params,
        warnings,
        DiscountRateOutput {
            discount_rate,
            cost_of_equity,
            cost_of_debt_after_tax,
            capital_structure,
        },
    ))
}

/// Validity-gated median of a metric's trailing window. `None` when the
/// metric is absent, the history is shorter than the window, or the window
/// is mostly missing.
fn trailing_median(db: &Database, metric: Metric, period: Period) -> Option<Decimal> {
    let series = db.series(metric)?;
    let window = series.trailing(period.years() as usize);
    if window.len() < period.years() as usize || !stats::is_data_valid(window) {
        return None;
    }
    stats::median_ignoring_missing(window)
}

fn equity_cost(
    params: &DiscountRateParams,
    tables: &ReferenceTables,
    warnings: &mut Vec<String>,
) -> Option<Decimal> {
    match tables.premium_for(params.region) {
        Some(premium) => Some(params.risk_free_rate + premium * params.beta),
        None => {
            warnings.push(format!(
                "no equity risk premium for region {}; cost of equity left undefined",
                params.region.label(),
            ));
            None
        }
    }
}

fn debt_cost(
    db: &Database,
    params: &DiscountRateParams,
    tables: &ReferenceTables,
    warnings: &mut Vec<String>,
) -> Option<Decimal> {
    let median_tax_rate = trailing_median(db, Metric::TaxRate, params.period);
    if median_tax_rate.is_none() {
        warnings.push("no usable tax-rate history; cost of debt left undefined".into());
    }
    let median_interest_coverage = trailing_median(db, Metric::InterestCoverageRatio, params.period);
    if median_interest_coverage.is_none() {
        warnings.push("no usable interest-coverage history; cost of debt left undefined".into());
    }

    let spread = median_interest_coverage
        .and_then(|coverage| match tables.spread_for(params.company_type, coverage) {
            Some(spread) => Some(spread),
            None => {
                warnings.push(format!(
                    "no credit-spread bracket covers interest coverage {coverage}; cost of debt left undefined",
                ));
                None
            }
        });

    match (spread, median_tax_rate) {
        (Some(spread), Some(tax)) => {
            let before_tax = params.risk_free_rate + spread;
            Some(before_tax * (Decimal::ONE - tax / Decimal::ONE_HUNDRED))
        }
        _ => None,
    }
}

/// Median equity ratio over the period, normalized from percent to a
/// weight, with the debt ratio as its complement.
fn capital_structure(
    db: &Database,
    period: Period,
    warnings: &mut Vec<String>,
) -> Option<CapitalStructure> {
    match trailing_median(db, Metric::EquityRatio, period) {
        Some(median) => {
            let equity_ratio = round_dp(median / Decimal::ONE_HUNDRED, 2);
            Some(CapitalStructure {
                equity_ratio,
                debt_ratio: Decimal::ONE - equity_ratio,
            })
        }
        None => {
            warnings.push("no usable equity-ratio history; capital structure left undefined".into());
            None
        }
    }
}
