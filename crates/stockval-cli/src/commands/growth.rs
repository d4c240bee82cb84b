use clap::Args;
use serde_json::{json, Value};

use stockval_core::evaluation::{generate_cagr_mapping, generate_median_mapping};
use stockval_core::Metric;

use super::{load_database, parse_variant, CliResult};

/// Arguments for per-period growth and median summaries
#[derive(Args)]
pub struct GrowthArgs {
    /// JSON file with the fundamental database (or pipe it on stdin)
    #[arg(long)]
    pub database: Option<String>,

    /// Metric to summarize, e.g. Revenue or FreeCashflow
    #[arg(long)]
    pub metric: String,
}

pub fn run_growth(args: GrowthArgs) -> CliResult<Value> {
    let db = load_database(args.database.as_deref())?;
    let metric: Metric = parse_variant("metric", &args.metric)?;

    let cagr = generate_cagr_mapping(&db, metric)?;
    let median = generate_median_mapping(&db, metric)?;

    Ok(json!({
        "ticker": db.stock_ticker(),
        "metric": metric,
        "label": metric.label(),
        "cagr": cagr,
        "median": median,
    }))
}
