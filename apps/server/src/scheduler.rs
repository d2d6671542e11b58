//! Background scheduler for reference-data ingestion.
//!
//! Each feed runs on its own task and interval; a feed that fails waits for
//! its next tick and never holds up the others.

use std::sync::Arc;

use keibo_core::ingestion::{IngestionReport, ReferenceDataPipeline};
use tokio::time::{interval, Duration, MissedTickBehavior};
use tracing::{debug, info};

use crate::main_lib::AppState;

/// Initial delay before the first run (lets the server finish starting)
const INITIAL_DELAY_SECS: u64 = 60;

#[derive(Debug, Clone, Copy)]
enum Feed {
    CryptoPrices,
    FxRates,
    EconomicIndices,
}

impl Feed {
    const ALL: [Feed; 3] = [Feed::CryptoPrices, Feed::FxRates, Feed::EconomicIndices];

    fn name(self) -> &'static str {
        match self {
            Feed::CryptoPrices => "crypto prices",
            Feed::FxRates => "fx rates",
            Feed::EconomicIndices => "economic indices",
        }
    }

    fn period(self) -> Duration {
        match self {
            Feed::CryptoPrices => Duration::from_secs(60 * 60),
            Feed::FxRates => Duration::from_secs(4 * 60 * 60),
            Feed::EconomicIndices => Duration::from_secs(24 * 60 * 60),
        }
    }

    async fn refresh(self, pipeline: &ReferenceDataPipeline) -> Option<IngestionReport> {
        match self {
            Feed::CryptoPrices => pipeline.refresh_crypto_prices().await,
            Feed::FxRates => pipeline.refresh_fx_rates().await,
            Feed::EconomicIndices => pipeline.refresh_all_indices().await,
        }
    }
}

/// Starts one background task per feed.
pub fn start_ingestion_scheduler(state: Arc<AppState>) {
    for feed in Feed::ALL {
        let pipeline = state.pipeline.clone();
        tokio::spawn(async move {
            info!(
                "{} scheduler started ({:?} interval)",
                feed.name(),
                feed.period()
            );
            tokio::time::sleep(Duration::from_secs(INITIAL_DELAY_SECS)).await;

            // First tick is immediate, later ones are one period apart
            let mut ticker = interval(feed.period());
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

            loop {
                ticker.tick().await;
                if feed.refresh(&pipeline).await.is_none() {
                    debug!("{} will be retried on the next tick", feed.name());
                }
            }
        });
    }
}
