use clap::Args;
use rust_decimal::Decimal;
use serde_json::Value;

use stockval_core::scoring::fscore::calculate_f_score;
use stockval_core::scoring::low_risk::{calculate_low_risk_score, LowRiskInput};

use crate::input;

use super::{load_database, CliResult};

/// Arguments for the Piotroski F-Score
#[derive(Args)]
pub struct FScoreArgs {
    /// JSON file with the fundamental database (or pipe it on stdin)
    #[arg(long)]
    pub database: Option<String>,
}

/// Arguments for the high-returns/low-risk score
#[derive(Args)]
pub struct LowRiskArgs {
    /// JSON file with the stock's daily prices (array, oldest first)
    #[arg(long)]
    pub prices: String,

    /// JSON file with the benchmark's daily prices (array, oldest first)
    #[arg(long)]
    pub benchmark: String,

    /// JSON file with the dividend payment history (array, oldest first)
    #[arg(long)]
    pub dividends: String,
}

pub fn run_f_score(args: FScoreArgs) -> CliResult<Value> {
    let db = load_database(args.database.as_deref())?;
    let output = calculate_f_score(&db);
    Ok(serde_json::to_value(&output)?)
}

pub fn run_low_risk(args: LowRiskArgs) -> CliResult<Value> {
    let stock_prices: Vec<Decimal> = input::file::read_json(&args.prices)?;
    let benchmark_prices: Vec<Decimal> = input::file::read_json(&args.benchmark)?;
    let dividends: Vec<Decimal> = input::file::read_json(&args.dividends)?;

    let output = calculate_low_risk_score(&LowRiskInput {
        stock_prices,
        benchmark_prices,
        dividends,
    })?;
    Ok(serde_json::to_value(&output)?)
}
