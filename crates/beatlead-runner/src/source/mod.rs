//! Page-reading capability the pipeline is driven through.

mod browser;

pub use browser::BrowserSource;

use crate::config::RetryConfig;
use crate::Result;
use beatlead_contact::ProfileSnapshot;
use std::future::Future;
use std::time::Duration;
use tracing::warn;

/// Everything the pipeline needs from the web, one call per page.
///
/// Implementations own their session; the pipeline never sees a browser.
pub trait LeadSource {
    /// Channel display names of the first `limit` video results for `query`.
    fn channel_names(
        &mut self,
        query: &str,
        limit: usize,
    ) -> impl Future<Output = Result<Vec<String>>> + Send;

    /// Absolute profile URLs of artists whose tracks credit `producer`.
    fn profile_urls(&mut self, producer: &str)
        -> impl Future<Output = Result<Vec<String>>> + Send;

    /// Read one profile page. Elements that cannot be found are `None`.
    fn profile(&mut self, url: &str) -> impl Future<Output = Result<ProfileSnapshot>> + Send;
}

/// Run `op` until it succeeds or the retry policy runs out of attempts.
///
/// Without a policy `op` runs once. The error of the last attempt is returned.
pub(crate) async fn with_retry<T, F, Fut>(
    retry: Option<&RetryConfig>,
    what: &str,
    mut op: F,
) -> Result<T>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T>>,
{
    let attempts = retry.map(|r| r.attempts).unwrap_or(1).max(1);
    let delay_ms = retry.map(|r| r.delay_ms).unwrap_or(0);

    let mut attempt = 1;
    loop {
        match op().await {
            Ok(value) => return Ok(value),
            Err(e) if attempt < attempts => {
                warn!(
                    "{} failed (attempt {}/{}): {}",
                    what, attempt, attempts, e
                );
                if delay_ms > 0 {
                    tokio::time::sleep(Duration::from_millis(delay_ms)).await;
                }
                attempt += 1;
            }
            Err(e) => return Err(e),
        }
    }
}
