use clap::Args;
use rust_decimal::Decimal;
use serde_json::Value;

use stockval_core::reference::ReferenceTables;
use stockval_core::valuation::discount_rate::{estimate_discount_rate, DiscountRateParams};
use stockval_core::valuation::intrinsic_value::{estimate_intrinsic_value, DcfParams};
use stockval_core::Metric;

use crate::input;

use super::{load_database, parse_period, parse_variant, CliResult};

/// Damodaran-style credit-spread brackets and regional premiums bundled
/// with the binary; `--tables` overrides them.
const DEFAULT_TABLES: &str = include_str!("../tables/default_tables.json");

/// Arguments for discount-rate estimation
#[derive(Args)]
#[command(allow_hyphen_values = true)]
pub struct DiscountRateArgs {
    /// JSON file with the fundamental database (or pipe it on stdin)
    #[arg(long)]
    pub database: Option<String>,

    /// Risk-free rate, in the unit convention of the reference tables
    #[arg(long)]
    pub risk_free_rate: Decimal,

    /// Beta of the asset against its benchmark
    #[arg(long)]
    pub beta: Decimal,

    /// Company type: Financial or NonFinancial
    #[arg(long, default_value = "NonFinancial")]
    pub company_type: String,

    /// Region, e.g. NorthAmerica or WesternEurope
    #[arg(long)]
    pub region: String,

    /// Median window in years (1, 3 or 10)
    #[arg(long, default_value = "10")]
    pub period: u32,

    /// JSON file with reference tables (defaults to the bundled set)
    #[arg(long)]
    pub tables: Option<String>,
}

/// Arguments for DCF intrinsic-value estimation
#[derive(Args)]
pub struct IntrinsicValueArgs {
    /// JSON file with the fundamental database (or pipe it on stdin)
    #[arg(long)]
    pub database: Option<String>,

    /// Cash-flow metric the projection is based on
    #[arg(long, default_value = "FreeCashflow")]
    pub metric: String,

    /// Outstanding shares the total value is divided by
    #[arg(long)]
    pub shares: Decimal,

    /// Assumed annual growth rate in percent
    #[arg(long)]
    pub growth_rate: Decimal,

    /// Terminal growth rate in percent
    #[arg(long, default_value = "2")]
    pub terminal_growth_rate: Decimal,

    /// Prediction horizon in years (1, 3 or 10)
    #[arg(long, default_value = "10")]
    pub period: u32,

    /// Candidate discount rates in percent, comma separated
    #[arg(long, default_value = "6,7,8,9,10", value_delimiter = ',')]
    pub discount_rates: Vec<Decimal>,
}

pub fn run_discount_rate(args: DiscountRateArgs) -> CliResult<Value> {
    let db = load_database(args.database.as_deref())?;
    let tables = load_tables(args.tables.as_deref())?;

    let params = DiscountRateParams {
        risk_free_rate: args.risk_free_rate,
        beta: args.beta,
        company_type: parse_variant("company type", &args.company_type)?,
        region: parse_variant("region", &args.region)?,
        period: parse_period(args.period)?,
    };

    let output = estimate_discount_rate(&db, &params, &tables)?;
    Ok(serde_json::to_value(&output)?)
}

pub fn run_intrinsic_value(args: IntrinsicValueArgs) -> CliResult<Value> {
    let db = load_database(args.database.as_deref())?;

    let params = DcfParams {
        metric: parse_variant::<Metric>("metric", &args.metric)?,
        shares_outstanding: args.shares,
        growth_rate: args.growth_rate,
        terminal_growth_rate: args.terminal_growth_rate,
        prediction_period: parse_period(args.period)?,
        discount_rates: args.discount_rates,
    };

    let output = estimate_intrinsic_value(&db, &params)?;
    Ok(serde_json::to_value(&output)?)
}

fn load_tables(path: Option<&str>) -> CliResult<ReferenceTables> {
    match path {
        Some(path) => input::file::read_json(path),
        None => Ok(serde_json::from_str(DEFAULT_TABLES)?),
    }
}
