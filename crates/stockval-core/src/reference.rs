//! Reference tables the pipeline consumes but never produces.
//!
//! Credit-spread brackets and regional equity-risk premiums are loaded by
//! an external reader (the CLI bundles a default set) and shared read-only
//! for the lifetime of a process. Lookup misses surface as `None` and
//! undefine whatever depends on them; nothing defaults to zero.

use std::collections::HashMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::types::{CompanyType, Region};

/// One credit-quality bracket: companies whose interest-coverage ratio
/// falls into `(lower, upper]` pay `spread` above the risk-free rate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpreadBracket {
    pub lower: Decimal,
    pub upper: Decimal,
    pub spread: Decimal,
}

/// Credit-spread brackets keyed by company type plus equity-risk premiums
/// keyed by region.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReferenceTables {
    /// Brackets in table order; assumed non-overlapping, first hit wins.
    pub credit_spreads: HashMap<CompanyType, Vec<SpreadBracket>>,
    pub equity_risk_premiums: HashMap<Region, Decimal>,
}

impl ReferenceTables {
    /// Spread for the bracket containing `interest_coverage`, checked in
    /// table order. Lower bound exclusive, upper bound inclusive.
    pub fn spread_for(
        &self,
        company_type: CompanyType,
        interest_coverage: Decimal,
    ) -> Option<Decimal> {
        self.credit_spreads
            .get(&company_type)?
            .iter()
            .find(|b| interest_coverage > b.lower && interest_coverage <= b.upper)
            .map(|b| b.spread)
    }

    /// Equity risk premium for `region`.
    pub fn premium_for(&self, region: Region) -> Option<Decimal> {
        self.equity_risk_premiums.get(&region).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn sample_tables() -> ReferenceTables {
        let mut credit_spreads = HashMap::new();
        credit_spreads.insert(
            CompanyType::NonFinancial,
            vec![
                SpreadBracket {
                    lower: dec!(-100000),
                    upper: dec!(2),
                    spread: dec!(0.1),
                },
                SpreadBracket {
                    lower: dec!(2),
                    upper: dec!(6),
                    spread: dec!(0.02),
                },
                SpreadBracket {
                    lower: dec!(6),
                    upper: dec!(100000),
                    spread: dec!(0.005),
                },
            ],
        );
        let mut equity_risk_premiums = HashMap::new();
        equity_risk_premiums.insert(Region::NorthAmerica, dec!(0.05));
        ReferenceTables {
            credit_spreads,
            equity_risk_premiums,
        }
    }

    #[test]
    fn test_bracket_bounds_exclusive_inclusive() {
        let tables = sample_tables();
        // Upper bound belongs to the bracket, lower does not.
        assert_eq!(
            tables.spread_for(CompanyType::NonFinancial, dec!(2)),
            Some(dec!(0.1))
        );
        assert_eq!(
            tables.spread_for(CompanyType::NonFinancial, dec!(2.0001)),
            Some(dec!(0.02))
        );
        assert_eq!(
            tables.spread_for(CompanyType::NonFinancial, dec!(6)),
            Some(dec!(0.02))
        );
    }

    #[test]
    fn test_missing_company_type_is_a_miss() {
        let tables = sample_tables();
        assert_eq!(tables.spread_for(CompanyType::Financial, dec!(5)), None);
    }

    #[test]
    fn test_missing_region_is_a_miss() {
        let tables = sample_tables();
        assert_eq!(tables.premium_for(Region::NorthAmerica), Some(dec!(0.05)));
        assert_eq!(tables.premium_for(Region::Caribbean), None);
    }

    #[test]
    fn test_tables_deserialize_from_json() {
        let json = r#"{
            "credit_spreads": {
                "NonFinancial": [
                    {"lower": "-100000", "upper": "4.5", "spread": "0.03"}
                ]
            },
            "equity_risk_premiums": {"WesternEurope": "0.057"}
        }"#;
        let tables: ReferenceTables = serde_json::from_str(json).unwrap();
        assert_eq!(
            tables.spread_for(CompanyType::NonFinancial, dec!(1)),
            Some(dec!(0.03))
        );
        assert_eq!(tables.premium_for(Region::WesternEurope), Some(dec!(0.057)));
    }
}
