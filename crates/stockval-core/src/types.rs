use std::collections::HashMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// All monetary values. Wraps Decimal to prevent accidental f64 usage.
pub type Money = Decimal;

/// Rates expressed as percentages (5 = 5%) unless a field says otherwise.
pub type Percent = Decimal;

/// Fundamental metrics a [`Database`] can carry, one historical series each.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Metric {
    Revenue,
    RevenueGrowth,
    OperatingIncome,
    OperatingIncomeGrowth,
    NetIncome,
    NetIncomeGrowth,
    Eps,
    EpsGrowth,
    Dividends,
    BookValuePerShare,
    OperatingCashflow,
    OperatingCashflowGrowth,
    FreeCashflow,
    FreeCashflowGrowth,
    CapEx,
    CapExToRevenue,
    PayoutRatio,
    InterestCoverageRatio,
    TaxRate,
    OperatingMargin,
    NetMargin,
    GrossMargin,
    ReturnOnEquity,
    ReturnOnAssets,
    ReturnOnInvestedCapital,
    FreeCashflowToRevenue,
    FreeCashflowToShares,
    CurrentRatio,
    EquityRatio,
    DebtRatio,
    DebtToEquityRatio,
    AssetTurnover,
    OutstandingShares,
    TotalEquity,
    TotalAssets,
}

impl Metric {
    /// Human-readable label with the unit notation used in reports.
    pub fn label(&self) -> &'static str {
        match self {
            Metric::Revenue => "Revenue (MM)",
            Metric::RevenueGrowth => "Revenue Growth (%)",
            Metric::OperatingIncome => "Operating Income (MM)",
            Metric::OperatingIncomeGrowth => "Operating Income Growth (%)",
            Metric::NetIncome => "Net Income (MM)",
            Metric::NetIncomeGrowth => "Net Income Growth (%)",
            Metric::Eps => "EPS",
            Metric::EpsGrowth => "EPS Growth (%)",
            Metric::Dividends => "Dividends",
            Metric::BookValuePerShare => "Book Value Per Share",
            Metric::OperatingCashflow => "Operating Cashflow (MM)",
            Metric::OperatingCashflowGrowth => "Operating Cashflow Growth (%)",
            Metric::FreeCashflow => "Free Cashflow (MM)",
            Metric::FreeCashflowGrowth => "Free Cashflow Growth (%)",
            Metric::CapEx => "Capital Expenditure (MM)",
            Metric::CapExToRevenue => "Capital Expenditure to Revenue (%)",
            Metric::PayoutRatio => "Payout Ratio (%)",
            Metric::InterestCoverageRatio => "Interest Coverage Ratio",
            Metric::TaxRate => "Tax Rate (%)",
            Metric::OperatingMargin => "Operating Margin (%)",
            Metric::NetMargin => "Net Margin (%)",
            Metric::GrossMargin => "Gross Margin (%)",
            Metric::ReturnOnEquity => "Return on Equity (%)",
            Metric::ReturnOnAssets => "Return on Assets (%)",
            Metric::ReturnOnInvestedCapital => "Return on Invested Capital (%)",
            Metric::FreeCashflowToRevenue => "Free Cashflow to Revenue (%)",
            Metric::FreeCashflowToShares => "Free Cashflow to Outstanding Shares (%)",
            Metric::CurrentRatio => "Current Ratio",
            Metric::EquityRatio => "Equity Ratio (%)",
            Metric::DebtRatio => "Debt Ratio (%)",
            Metric::DebtToEquityRatio => "Debt-To-Equity Ratio",
            Metric::AssetTurnover => "Asset Turnover",
            Metric::OutstandingShares => "Outstanding Shares (MM)",
            Metric::TotalEquity => "Total Equity (MM)",
            Metric::TotalAssets => "Total Assets (MM)",
        }
    }
}

/// Window length for CAGR and median computations. Closed set; the window
/// formulas are only defined for these three horizons.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Period {
    OneYear,
    ThreeYears,
    TenYears,
}

impl Period {
    pub const ALL: [Period; 3] = [Period::OneYear, Period::ThreeYears, Period::TenYears];

    pub fn years(&self) -> u32 {
        match self {
            Period::OneYear => 1,
            Period::ThreeYears => 3,
            Period::TenYears => 10,
        }
    }
}

/// Sampling granularity of a price series. The full provider catalogue is
/// accepted as configuration, but only one-day and one-month sampling take
/// part in sample-count formulas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DataInterval {
    OneMinute,
    TwoMinutes,
    FiveMinutes,
    FifteenMinutes,
    ThirtyMinutes,
    SixtyMinutes,
    NinetyMinutes,
    OneHour,
    OneDay,
    FiveDays,
    OneWeek,
    OneMonth,
    ThreeMonths,
}

impl DataInterval {
    /// Wire label as used by price-data providers.
    pub fn label(&self) -> &'static str {
        match self {
            DataInterval::OneMinute => "1m",
            DataInterval::TwoMinutes => "2m",
            DataInterval::FiveMinutes => "5m",
            DataInterval::FifteenMinutes => "15m",
            DataInterval::ThirtyMinutes => "30m",
            DataInterval::SixtyMinutes => "60m",
            DataInterval::NinetyMinutes => "90m",
            DataInterval::OneHour => "1h",
            DataInterval::OneDay => "1d",
            DataInterval::FiveDays => "5d",
            DataInterval::OneWeek => "1wk",
            DataInterval::OneMonth => "1mo",
            DataInterval::ThreeMonths => "3mo",
        }
    }
}

/// Region keying the equity-risk-premium reference table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Region {
    Africa,
    Asia,
    AustraliaAndNewZealand,
    Caribbean,
    CentralAndSouthAmerica,
    EasternEuropeAndRussia,
    MiddleEast,
    NorthAmerica,
    WesternEurope,
}

impl Region {
    pub fn label(&self) -> &'static str {
        match self {
            Region::Africa => "Africa",
            Region::Asia => "Asia",
            Region::AustraliaAndNewZealand => "Australia & New Zealand",
            Region::Caribbean => "Caribbean",
            Region::CentralAndSouthAmerica => "Central and South America",
            Region::EasternEuropeAndRussia => "Eastern Europe & Russia",
            Region::MiddleEast => "Middle East",
            Region::NorthAmerica => "North America",
            Region::WesternEurope => "Western Europe",
        }
    }
}

/// Company classification keying the credit-spread reference table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CompanyType {
    Financial,
    NonFinancial,
}

/// One metric's historical values, one per fiscal period, oldest first.
/// `None` marks a missing observation. Value object; never mutated after
/// construction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricSeries(Vec<Option<Decimal>>);

impl MetricSeries {
    pub fn new(values: Vec<Option<Decimal>>) -> Self {
        MetricSeries(values)
    }

    /// Series with every observation present.
    pub fn from_values(values: Vec<Decimal>) -> Self {
        MetricSeries(values.into_iter().map(Some).collect())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn values(&self) -> &[Option<Decimal>] {
        &self.0
    }

    /// The trailing `n` observations (the whole series when shorter).
    pub fn trailing(&self, n: usize) -> &[Option<Decimal>] {
        &self.0[self.0.len().saturating_sub(n)..]
    }

    /// Observation `back` periods from the end: `latest(1)` is the most
    /// recent one. `None` when out of range or missing.
    pub fn latest(&self, back: usize) -> Option<Decimal> {
        if back == 0 || back > self.0.len() {
            return None;
        }
        self.0[self.0.len() - back]
    }
}

impl From<Vec<Decimal>> for MetricSeries {
    fn from(values: Vec<Decimal>) -> Self {
        MetricSeries::from_values(values)
    }
}

/// Snapshot of one asset's fundamental history: metric identifier to
/// chronological series. Assembled by an external collaborator, consumed
/// read-only by every pipeline stage.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Database {
    stock_ticker: String,
    exchange_ticker: String,
    data: HashMap<Metric, MetricSeries>,
}

impl Database {
    pub fn new(
        stock_ticker: impl Into<String>,
        exchange_ticker: impl Into<String>,
        data: HashMap<Metric, MetricSeries>,
    ) -> Self {
        Database {
            stock_ticker: stock_ticker.into(),
            exchange_ticker: exchange_ticker.into(),
            data,
        }
    }

    pub fn stock_ticker(&self) -> &str {
        &self.stock_ticker
    }

    pub fn exchange_ticker(&self) -> &str {
        &self.exchange_ticker
    }

    pub fn series(&self, metric: Metric) -> Option<&MetricSeries> {
        self.data.get(&metric)
    }

    pub fn metrics(&self) -> impl Iterator<Item = Metric> + '_ {
        self.data.keys().copied()
    }
}

/// Equity/debt weighting derived from the median equity ratio.
/// Invariant: `equity_ratio + debt_ratio == 1`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CapitalStructure {
    pub equity_ratio: Decimal,
    pub debt_ratio: Decimal,
}

/// Standard computation output envelope.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComputationOutput<T: Serialize> {
    pub result: T,
    pub methodology: String,
    pub assumptions: serde_json::Value,
    pub warnings: Vec<String>,
    pub metadata: ComputationMetadata,
}

/// Metadata attached to every computation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComputationMetadata {
    pub version: String,
    pub precision: String,
}

/// Wrap a computation result with the standard envelope.
pub fn with_metadata<T: Serialize>(
    methodology: &str,
    assumptions: &impl Serialize,
    warnings: Vec<String>,
    result: T,
) -> ComputationOutput<T> {
    ComputationOutput {
        result,
        methodology: methodology.to_string(),
        assumptions: serde_json::to_value(assumptions).unwrap_or_default(),
        warnings,
        metadata: ComputationMetadata {
            version: env!("CARGO_PKG_VERSION").to_string(),
            precision: "rust_decimal_128bit".to_string(),
        },
    }
}
