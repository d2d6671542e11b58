use keibo_market_data::{MarketDataError, RetryClass};
use log::warn;
use std::future::Future;

use super::ingestion_config::RetryPolicy;

/// Runs `fetch` until it succeeds, fails with a non-retryable error, or the
/// policy runs out of attempts.
pub async fn fetch_with_retry<T, F, Fut>(
    policy: &RetryPolicy,
    what: &str,
    mut fetch: F,
) -> Result<T, MarketDataError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, MarketDataError>>,
{
    let mut attempt = 1;
    loop {
        match fetch().await {
            Ok(value) => return Ok(value),
            Err(e)
                if e.retry_class() == RetryClass::WithBackoff
                    && attempt < policy.max_attempts =>
            {
                let delay = policy.delay_for(attempt);
                warn!(
                    "{} failed (attempt {}/{}): {}. Retrying in {:?}",
                    what, attempt, policy.max_attempts, e, delay
                );
                tokio::time::sleep(delay).await;
                attempt += 1;
            }
            Err(e) => return Err(e),
        }
    }
}
