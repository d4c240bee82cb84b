use clap::Args;
use rust_decimal::Decimal;
use serde_json::Value;

use stockval_core::beta::{estimate_beta, BetaInput};

use crate::input;

use super::{parse_interval, parse_period, CliResult};

/// Arguments for beta estimation
#[derive(Args)]
pub struct BetaArgs {
    /// JSON file with the stock's prices (array, oldest first)
    #[arg(long)]
    pub prices: String,

    /// JSON file with the benchmark's prices (array, oldest first)
    #[arg(long)]
    pub benchmark: String,

    /// Sampling interval of both series (1d or 1mo)
    #[arg(long, default_value = "1d")]
    pub interval: String,

    /// Estimation window in years (1, 3 or 10)
    #[arg(long, default_value = "1")]
    pub period: u32,
}

pub fn run_beta(args: BetaArgs) -> CliResult<Value> {
    let stock_prices: Vec<Decimal> = input::file::read_json(&args.prices)?;
    let benchmark_prices: Vec<Decimal> = input::file::read_json(&args.benchmark)?;

    let beta_input = BetaInput {
        stock_prices,
        benchmark_prices,
        interval: parse_interval(&args.interval)?,
        period: parse_period(args.period)?,
    };

    let output = estimate_beta(&beta_input)?;
    Ok(serde_json::to_value(&output)?)
}
