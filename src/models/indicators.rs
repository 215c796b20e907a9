//! Raw indicator time series as returned by the market-data provider.

use chrono::NaiveDate;
use std::collections::BTreeMap;

/// Date-keyed simple moving average values for one symbol and period.
#[derive(Debug, Clone, Default)]
pub struct SmaSeries {
    pub values: BTreeMap<NaiveDate, f64>,
}

impl SmaSeries {
    pub fn new(values: BTreeMap<NaiveDate, f64>) -> Self {
        Self { values }
    }
}

/// Weekly RSI series plus the provider's "last refreshed" marker.
#[derive(Debug, Clone)]
pub struct RsiSeries {
    pub last_refreshed: NaiveDate,
    pub values: BTreeMap<NaiveDate, f64>,
}

impl RsiSeries {
    /// RSI value at the last-refreshed date, if the provider supplied it.
    pub fn latest(&self) -> Option<f64> {
        self.values.get(&self.last_refreshed).copied()
    }
}
