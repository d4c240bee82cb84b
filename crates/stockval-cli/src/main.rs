mod commands;
mod input;
mod output;

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use std::process;

use commands::assess::AssessArgs;
use commands::beta::BetaArgs;
use commands::growth::GrowthArgs;
use commands::scoring::{FScoreArgs, LowRiskArgs};
use commands::valuation::{DiscountRateArgs, IntrinsicValueArgs};

/// Intrinsic-value estimation and quality scoring for equities
#[derive(Parser)]
#[command(
    name = "stockval",
    version,
    about = "Intrinsic-value estimation and quality scoring for equities",
    long_about = "Estimates an equity's intrinsic value and risk/quality scores from \
                  historical financial series with decimal precision. Supports beta \
                  estimation, CAGR summaries, discount-rate synthesis, DCF intrinsic \
                  values, the Piotroski F-Score, and the high-returns/low-risk score."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format
    #[arg(long, default_value = "json", global = true)]
    output: OutputFormat,
}

#[derive(Subcommand)]
enum Commands {
    /// Estimate beta from stock and benchmark price series
    Beta(BetaArgs),
    /// Per-period CAGR and median summaries of one metric
    Growth(GrowthArgs),
    /// Estimate the discount rate from capital structure and credit standing
    DiscountRate(DiscountRateArgs),
    /// Estimate intrinsic value per share via the DCF model
    IntrinsicValue(IntrinsicValueArgs),
    /// Calculate the Piotroski F-Score (0-9)
    FScore(FScoreArgs),
    /// Calculate the high-returns/low-risk score (0-3)
    LowRisk(LowRiskArgs),
    /// Compare intrinsic values against the current price
    Assess(AssessArgs),
    /// Print version information
    Version,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    Json,
    Table,
    Csv,
    Minimal,
}

fn main() {
    let cli = Cli::parse();

    let result: Result<serde_json::Value, Box<dyn std::error::Error>> = match cli.command {
        Commands::Beta(args) => commands::beta::run_beta(args),
        Commands::Growth(args) => commands::growth::run_growth(args),
        Commands::DiscountRate(args) => commands::valuation::run_discount_rate(args),
        Commands::IntrinsicValue(args) => commands::valuation::run_intrinsic_value(args),
        Commands::FScore(args) => commands::scoring::run_f_score(args),
        Commands::LowRisk(args) => commands::scoring::run_low_risk(args),
        Commands::Assess(args) => commands::assess::run_assess(args),
        Commands::Version => {
            println!("stockval {}", env!("CARGO_PKG_VERSION"));
            return;
        }
    };

    match result {
        Ok(value) => {
            output::format_output(&cli.output, &value);
            process::exit(0);
        }
        Err(e) => {
            eprintln!("{}: {}", "error".red().bold(), e);
            process::exit(1);
        }
    }
}
