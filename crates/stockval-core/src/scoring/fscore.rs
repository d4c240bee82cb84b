//! Piotroski-style F-Score: nine binary year-over-year signals summed into
//! a 0-9 quality score.
//!
//! Each signal compares the latest fiscal period against the prior one (or
//! against zero). A missing datapoint on either side fails the signal; it
//! never aborts scoring.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::types::{Database, Metric};

/// Comparison operator a signal applies between its two values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Comparison {
    Less,
    Greater,
    LessOrEqual,
    GreaterOrEqual,
}

impl Comparison {
    pub fn eval(&self, first: Decimal, second: Decimal) -> bool {
        match self {
            Comparison::Less => first < second,
            Comparison::Greater => first > second,
            Comparison::LessOrEqual => first <= second,
            Comparison::GreaterOrEqual => first >= second,
        }
    }
}

/// Individual signal results and the composite score.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FScoreOutput {
    pub net_income_positive: bool,
    pub operating_cash_flow_positive: bool,
    pub cash_flow_exceeds_net_income: bool,
    pub return_on_assets_increasing: bool,
    pub debt_to_equity_decreasing: bool,
    pub current_ratio_increasing: bool,
    pub shares_not_increasing: bool,
    pub gross_margin_increasing: bool,
    pub asset_turnover_increasing: bool,

    /// Total score (0-9).
    pub f_score: u8,
    /// Classification: "Strong" (7-9), "Moderate" (4-6), "Weak" (0-3).
    pub strength: String,
}

/// Compute the F-Score from the latest two periods of the Database.
pub fn calculate_f_score(db: &Database) -> FScoreOutput {
    let net_income = datapoint(db, Metric::NetIncome, 1);
    let operating_cash_flow = datapoint(db, Metric::OperatingCashflow, 1);

    let net_income_positive = signal(net_income, Some(Decimal::ZERO), Comparison::Greater);
    let operating_cash_flow_positive =
        signal(operating_cash_flow, Some(Decimal::ZERO), Comparison::Greater);
    let cash_flow_exceeds_net_income = signal(operating_cash_flow, net_income, Comparison::Greater);
    let return_on_assets_increasing = year_over_year(db, Metric::ReturnOnAssets, Comparison::Greater);
    let debt_to_equity_decreasing = year_over_year(db, Metric::DebtToEquityRatio, Comparison::Less);
    let current_ratio_increasing = year_over_year(db, Metric::CurrentRatio, Comparison::Greater);
    let shares_not_increasing = year_over_year(db, Metric::OutstandingShares, Comparison::LessOrEqual);
    let gross_margin_increasing = year_over_year(db, Metric::GrossMargin, Comparison::Greater);
    let asset_turnover_increasing = year_over_year(db, Metric::AssetTurnover, Comparison::Greater);

    let signals = [
        net_income_positive,
        operating_cash_flow_positive,
        cash_flow_exceeds_net_income,
        return_on_assets_increasing,
        debt_to_equity_decreasing,
        current_ratio_increasing,
        shares_not_increasing,
        gross_margin_increasing,
        asset_turnover_increasing,
    ];
    let f_score = signals.iter().filter(|&&s| s).count() as u8;

    FScoreOutput {
        net_income_positive,
        operating_cash_flow_positive,
        cash_flow_exceeds_net_income,
        return_on_assets_increasing,
        debt_to_equity_decreasing,
        current_ratio_increasing,
        shares_not_increasing,
        gross_margin_increasing,
        asset_turnover_increasing,
        f_score,
        strength: classify(f_score),
    }
}

fn datapoint(db: &Database, metric: Metric, back: usize) -> Option<Decimal> {
    db.series(metric)?.latest(back)
}

/// Latest vs previous period of one metric. Missing either side fails.
fn year_over_year(db: &Database, metric: Metric, comparison: Comparison) -> bool {
    signal(
        datapoint(db, metric, 1),
        datapoint(db, metric, 2),
        comparison,
    )
}

fn signal(first: Option<Decimal>, second: Option<Decimal>, comparison: Comparison) -> bool {
    match (first, second) {
        (Some(a), Some(b)) => comparison.eval(a, b),
        _ => false,
    }
}

fn classify(score: u8) -> String {
    match score {
        7..=9 => "Strong".to_string(),
        4..=6 => "Moderate".to_string(),
        _ => "Weak".to_string(),
    }
}
