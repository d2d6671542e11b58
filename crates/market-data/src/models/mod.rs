//! Market data models
//!
//! This module contains the data types returned by providers:
//! - `quote` - Batch quote rows (BatchQuote) and JSON number decoding
//! - `series` - Economic series observations (Observation, ObservationValue, SeriesFrequency)

mod quote;
mod series;

pub use quote::{decimal_from_json, BatchQuote};
pub use series::{Observation, ObservationValue, SeriesFrequency};
