use async_trait::async_trait;
use chrono::{Duration, NaiveDate, Utc};
use keibo_market_data::{Observation, SeriesFrequency, SeriesProvider};
use log::warn;
use rust_decimal::Decimal;
use std::sync::Arc;

use super::ingestion_config::RetryPolicy;
use super::ingestion_errors::IngestionError;
use super::ingestion_model::IngestionReport;
use super::ingestion_traits::IngestionJob;
use super::retry::fetch_with_retry;
use crate::economic_indices::{EconomicIndexServiceTrait, EconomicIndexUpdate, IndexDeltas};
use crate::errors::Result;
use crate::utils::UpsertOutcome;

/// A series the index store tracks. The series code doubles as the index id.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeriesSpec {
    pub series_id: &'static str,
    pub frequency: SeriesFrequency,
    pub label: &'static str,
}

const fn spec(series_id: &'static str, frequency: SeriesFrequency, label: &'static str) -> SeriesSpec {
    SeriesSpec {
        series_id,
        frequency,
        label,
    }
}

/// Policy rates and consumer-price inflation for the supported currency zones.
pub const SERIES_CATALOG: &[SeriesSpec] = &[
    spec("FEDFUNDS", SeriesFrequency::Monthly, "US federal funds rate"),
    spec("ECBDFR", SeriesFrequency::Daily, "ECB deposit facility rate"),
    spec("CPIAUCSL", SeriesFrequency::Monthly, "US consumer price index"),
    spec("FPCPITOTLZGUSA", SeriesFrequency::Annual, "Inflation, United States"),
    spec("FPCPITOTLZGEMU", SeriesFrequency::Annual, "Inflation, Euro area"),
    spec("FPCPITOTLZGCHE", SeriesFrequency::Annual, "Inflation, Switzerland"),
    spec("FPCPITOTLZGGBR", SeriesFrequency::Annual, "Inflation, United Kingdom"),
    spec("FPCPITOTLZGJPN", SeriesFrequency::Annual, "Inflation, Japan"),
    spec("FPCPITOTLZGKOR", SeriesFrequency::Annual, "Inflation, South Korea"),
    spec("FPCPITOTLZGCHN", SeriesFrequency::Annual, "Inflation, China"),
    spec("FPCPITOTLZGCAN", SeriesFrequency::Annual, "Inflation, Canada"),
    spec("FPCPITOTLZGIND", SeriesFrequency::Annual, "Inflation, India"),
    spec("FPCPITOTLZGIDN", SeriesFrequency::Annual, "Inflation, Indonesia"),
];

#[derive(Clone, Copy)]
enum Horizon {
    Daily,
    Weekly,
    Monthly,
    Yearly,
    Decennial,
}

/// Periods back per horizon, in units of the series' own frequency.
fn horizons(frequency: SeriesFrequency) -> &'static [(usize, Horizon)] {
    match frequency {
        SeriesFrequency::Daily => &[
            (1, Horizon::Daily),
            (6, Horizon::Weekly),
            (29, Horizon::Monthly),
            (364, Horizon::Yearly),
        ],
        SeriesFrequency::Weekly => &[
            (1, Horizon::Weekly),
            (4, Horizon::Monthly),
            (52, Horizon::Yearly),
        ],
        SeriesFrequency::Monthly => &[(1, Horizon::Monthly), (12, Horizon::Yearly)],
        SeriesFrequency::Annual => &[(1, Horizon::Yearly), (10, Horizon::Decennial)],
    }
}

/// First date to request so the oldest horizon, plus two slots for
/// unpublished periods, still falls inside the window.
pub fn lookback_start(today: NaiveDate, frequency: SeriesFrequency) -> NaiveDate {
    let periods = horizons(frequency)
        .iter()
        .map(|(n, _)| *n as i64)
        .max()
        .unwrap_or(1)
        + 2;
    let days = match frequency {
        // Business-day calendar: five observations a week.
        SeriesFrequency::Daily => (periods * 7 + 4) / 5,
        SeriesFrequency::Weekly => periods * 7,
        SeriesFrequency::Monthly => periods * 31,
        SeriesFrequency::Annual => periods * 366,
    };
    today - Duration::days(days)
}

/// Latest value and deltas from newest-first observations.
///
/// Sentinels around the latest real value are skipped and counted in
/// `offset`: those before it and those between it and the next real value,
/// so `[latest, ".", m1, ..]` gives an offset of 1. A horizon N periods back
/// compares against position `offset + N` and is left out when that
/// observation is missing or a sentinel. Returns `None` when no observation
/// is numeric.
pub fn compute_deltas(
    observations: &[Observation],
    frequency: SeriesFrequency,
) -> Option<(Decimal, IndexDeltas)> {
    let is_real = |o: &Observation| o.value.as_decimal().is_some();
    let latest_at = observations.iter().position(is_real)?;
    let latest = observations[latest_at].value.as_decimal()?;
    let offset = observations[latest_at + 1..]
        .iter()
        .position(is_real)
        .map_or(latest_at, |gap| latest_at + gap);

    let mut deltas = IndexDeltas::default();
    for (periods, horizon) in horizons(frequency) {
        let Some(past) = observations
            .get(offset + periods)
            .and_then(|o| o.value.as_decimal())
        else {
            continue;
        };
        let delta = Some(latest - past);
        match horizon {
            Horizon::Daily => deltas.daily = delta,
            Horizon::Weekly => deltas.weekly = delta,
            Horizon::Monthly => deltas.monthly = delta,
            Horizon::Yearly => deltas.yearly = delta,
            Horizon::Decennial => deltas.decennial = delta,
        }
    }
    Some((latest, deltas))
}

/// Refreshes every series of the catalog, one after the other.
pub struct EconomicIndicesJob {
    provider: Arc<dyn SeriesProvider>,
    indices: Arc<dyn EconomicIndexServiceTrait>,
    retry: RetryPolicy,
    catalog: Vec<SeriesSpec>,
}

impl EconomicIndicesJob {
    pub fn new(
        provider: Arc<dyn SeriesProvider>,
        indices: Arc<dyn EconomicIndexServiceTrait>,
        retry: RetryPolicy,
    ) -> Self {
        Self::with_catalog(provider, indices, retry, SERIES_CATALOG.to_vec())
    }

    pub fn with_catalog(
        provider: Arc<dyn SeriesProvider>,
        indices: Arc<dyn EconomicIndexServiceTrait>,
        retry: RetryPolicy,
        catalog: Vec<SeriesSpec>,
    ) -> Self {
        Self {
            provider,
            indices,
            retry,
            catalog,
        }
    }

    /// Fetches one series over a lookback sized to its frequency and
    /// upserts the index keyed by the series code.
    pub async fn refresh_series(
        &self,
        series_id: &str,
        frequency: SeriesFrequency,
    ) -> Result<UpsertOutcome> {
        let start = lookback_start(Utc::now().date_naive(), frequency);
        let observations = fetch_with_retry(&self.retry, self.provider.id(), || {
            self.provider.observations(series_id, start, frequency)
        })
        .await?;

        let (value, deltas) = compute_deltas(&observations, frequency).ok_or_else(|| {
            IngestionError::NoUsableObservation {
                series_id: series_id.to_string(),
            }
        })?;

        self.indices
            .upsert_index(EconomicIndexUpdate {
                id: series_id.to_string(),
                value,
                deltas,
            })
            .await
    }
}

#[async_trait]
impl IngestionJob for EconomicIndicesJob {
    fn name(&self) -> &'static str {
        "economic_indices"
    }

    async fn run(&self) -> Result<IngestionReport> {
        let mut report = IngestionReport::new(self.name());
        for series in &self.catalog {
            match self.refresh_series(series.series_id, series.frequency).await {
                Ok(outcome) => report.record(outcome),
                Err(e) => {
                    warn!("Skipping {} ({}): {}", series.series_id, series.label, e);
                    report.skip();
                }
            }
        }
        Ok(report)
    }
}
