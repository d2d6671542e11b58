use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Sampling frequency of an economic series.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SeriesFrequency {
    Daily,
    Weekly,
    Monthly,
    Annual,
}

impl SeriesFrequency {
    /// Frequency code understood by FRED's observations endpoint.
    pub fn fred_code(&self) -> &'static str {
        match self {
            SeriesFrequency::Daily => "d",
            SeriesFrequency::Weekly => "w",
            SeriesFrequency::Monthly => "m",
            SeriesFrequency::Annual => "a",
        }
    }
}

/// Value of a single observation. Providers publish a sentinel (FRED uses
/// `"."`) for periods with no data yet.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ObservationValue {
    Value(Decimal),
    Missing,
}

impl ObservationValue {
    pub fn as_decimal(&self) -> Option<Decimal> {
        match self {
            ObservationValue::Value(v) => Some(*v),
            ObservationValue::Missing => None,
        }
    }
}

/// One dated point of an economic series.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Observation {
    pub date: NaiveDate,
    pub value: ObservationValue,
}
