use thiserror::Error;

/// Payloads that arrived intact but cannot be ingested.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum IngestionError {
    #[error("Response has no 'rates' field")]
    MissingRates,

    #[error("'rates' should be a mapping of currency to rate")]
    RatesNotAMapping,

    #[error("Rate for '{currency}' is not a number")]
    NonNumericRate { currency: String },

    #[error("Series '{series_id}' has no numeric observation")]
    NoUsableObservation { series_id: String },
}
