pub mod assess;
pub mod beta;
pub mod growth;
pub mod scoring;
pub mod valuation;

use serde::de::DeserializeOwned;
use serde_json::Value;

use stockval_core::{Database, DataInterval, Period};

use crate::input;

type CliResult<T> = Result<T, Box<dyn std::error::Error>>;

/// Load the database from a file, or from piped stdin when no path was
/// given.
pub(crate) fn load_database(path: Option<&str>) -> CliResult<Database> {
    if let Some(path) = path {
        input::file::read_json(path)
    } else if let Some(value) = input::stdin::read_stdin()? {
        Ok(serde_json::from_value(value)?)
    } else {
        Err("--database is required (or pipe the database JSON on stdin)".into())
    }
}

/// Parse a closed-set value (metric, region, company type) by its
/// serialized variant name.
pub(crate) fn parse_variant<T: DeserializeOwned>(kind: &str, name: &str) -> CliResult<T> {
    serde_json::from_value(Value::String(name.to_string()))
        .map_err(|_| format!("unknown {kind} '{name}'").into())
}

pub(crate) fn parse_period(years: u32) -> CliResult<Period> {
    match years {
        1 => Ok(Period::OneYear),
        3 => Ok(Period::ThreeYears),
        10 => Ok(Period::TenYears),
        other => Err(format!("unsupported period '{other}'; use 1, 3 or 10 years").into()),
    }
}

pub(crate) fn parse_interval(label: &str) -> CliResult<DataInterval> {
    let interval = match label {
        "1m" => DataInterval::OneMinute,
        "2m" => DataInterval::TwoMinutes,
        "5m" => DataInterval::FiveMinutes,
        "15m" => DataInterval::FifteenMinutes,
        "30m" => DataInterval::ThirtyMinutes,
        "60m" => DataInterval::SixtyMinutes,
        "90m" => DataInterval::NinetyMinutes,
        "1h" => DataInterval::OneHour,
        "1d" => DataInterval::OneDay,
        "5d" => DataInterval::FiveDays,
        "1wk" => DataInterval::OneWeek,
        "1mo" => DataInterval::OneMonth,
        "3mo" => DataInterval::ThreeMonths,
        other => return Err(format!("unknown interval '{other}'").into()),
    };
    Ok(interval)
}
