//! Static economic comparison table
//!
//! Eight fixed rows: one US and one Global figure for each of the four
//! economic metrics. The table is never mutated at runtime.

use serde::Serialize;

use super::types::{Metric, Region};

/// One row of the comparison table
#[derive(Debug, Clone, Copy, Serialize, PartialEq)]
pub struct EconomicRecord {
    pub metric: Metric,
    pub region: Region,
    pub value: f64,
    pub unit: &'static str,
}

const TRILLIONS_USD: &str = "Trillions USD";
const BILLIONS_USD: &str = "Billions USD";
const INDEX_SCORE: &str = "Index Score";

static RECORDS: [EconomicRecord; 8] = [
    EconomicRecord { metric: Metric::Gdp, region: Region::Us, value: 25.0, unit: TRILLIONS_USD },
    EconomicRecord { metric: Metric::Gdp, region: Region::Global, value: 70.0, unit: TRILLIONS_USD },
    EconomicRecord { metric: Metric::ConsumerSpending, region: Region::Us, value: 17.5, unit: TRILLIONS_USD },
    EconomicRecord { metric: Metric::ConsumerSpending, region: Region::Global, value: 60.0, unit: TRILLIONS_USD },
    EconomicRecord { metric: Metric::Fdi, region: Region::Us, value: 285.0, unit: BILLIONS_USD },
    EconomicRecord { metric: Metric::Fdi, region: Region::Global, value: 1300.0, unit: BILLIONS_USD },
    EconomicRecord { metric: Metric::InnovationIndex, region: Region::Us, value: 61.3, unit: INDEX_SCORE },
    EconomicRecord { metric: Metric::InnovationIndex, region: Region::Global, value: 50.0, unit: INDEX_SCORE },
];

/// US and Global rows for one economic metric
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Comparison {
    pub us: &'static EconomicRecord,
    pub global: &'static EconomicRecord,
}

impl Comparison {
    /// Both rows share a unit; the US row is authoritative
    pub fn unit(&self) -> &'static str {
        self.us.unit
    }
}

/// Every row, in table order
pub fn all_records() -> &'static [EconomicRecord] {
    &RECORDS
}

/// Look up a single row
pub fn record(metric: Metric, region: Region) -> Option<&'static EconomicRecord> {
    RECORDS
        .iter()
        .find(|r| r.metric == metric && r.region == region)
}

/// Look up the comparison pair for a metric
///
/// Returns `None` only for `Metric::StockPrices`, which has no static rows.
pub fn comparison(metric: Metric) -> Option<Comparison> {
    let first = match metric {
        Metric::Gdp => 0,
        Metric::ConsumerSpending => 2,
        Metric::Fdi => 4,
        Metric::InnovationIndex => 6,
        Metric::StockPrices => return None,
    };
    Some(Comparison {
        us: &RECORDS[first],
        global: &RECORDS[first + 1],
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_one_row_per_region_per_metric() {
        for metric in Metric::all().iter().filter(|m| !m.is_stock()) {
            for region in [Region::Us, Region::Global] {
                let count = all_records()
                    .iter()
                    .filter(|r| r.metric == *metric && r.region == region)
                    .count();
                assert_eq!(count, 1, "{} / {}", metric, region);
            }
        }
        assert_eq!(all_records().len(), 8);
    }

    #[test]
    fn test_comparison_rows_line_up_with_table() {
        for metric in Metric::all().iter().filter(|m| !m.is_stock()) {
            let pair = comparison(*metric).unwrap();
            assert_eq!(Some(pair.us), record(*metric, Region::Us));
            assert_eq!(Some(pair.global), record(*metric, Region::Global));
        }
    }

    #[test]
    fn test_comparison_units_match() {
        for metric in Metric::all().iter().filter(|m| !m.is_stock()) {
            let pair = comparison(*metric).unwrap();
            assert_eq!(pair.us.unit, pair.global.unit);
        }
    }

    #[test]
    fn test_gdp_values() {
        let pair = comparison(Metric::Gdp).unwrap();
        assert_eq!(pair.us.value, 25.0);
        assert_eq!(pair.global.value, 70.0);
        assert_eq!(pair.unit(), "Trillions USD");
    }

    #[test]
    fn test_stock_prices_has_no_rows() {
        assert!(comparison(Metric::StockPrices).is_none());
    }
}
