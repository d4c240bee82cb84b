use std::collections::BTreeMap;

use clap::Args;
use rust_decimal::Decimal;
use serde_json::Value;

use stockval_core::evaluation::assess_intrinsic_values;

use crate::input;

use super::CliResult;

/// Arguments for assessing intrinsic values against the market price
#[derive(Args)]
pub struct AssessArgs {
    /// JSON file with the intrinsic-value mapping produced by
    /// `intrinsic-value` (rate label to per-share value)
    #[arg(long)]
    pub values: Option<String>,

    /// Margin of safety in percent
    #[arg(long, default_value = "0")]
    pub margin_of_safety: Decimal,

    /// Current market price per share
    #[arg(long)]
    pub current_price: Decimal,
}

pub fn run_assess(args: AssessArgs) -> CliResult<Value> {
    let values: BTreeMap<String, Option<Decimal>> = if let Some(ref path) = args.values {
        input::file::read_json(path)?
    } else if let Some(piped) = input::stdin::read_stdin()? {
        // Accept either the bare mapping or the whole intrinsic-value
        // envelope piped straight through.
        let mapping = piped
            .pointer("/result/intrinsic_values")
            .cloned()
            .unwrap_or(piped);
        serde_json::from_value(mapping)?
    } else {
        return Err("--values is required (or pipe the intrinsic-value output on stdin)".into());
    };

    let assessments = assess_intrinsic_values(&values, args.margin_of_safety, args.current_price);
    Ok(serde_json::to_value(&assessments)?)
}
