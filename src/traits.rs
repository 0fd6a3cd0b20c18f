//! Shared trait abstractions
//!
//! The catalog fetcher is the only network seam in the pipeline; the
//! orchestrator and service are generic over it so tests can drive them
//! with in-memory catalogs.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;

use crate::catalog::fetcher::CatalogPage;
use crate::Result;

/// One paginated round trip against the catalog.
///
/// Implementations must not retry; retries belong to the orchestrator.
#[async_trait]
pub trait CatalogFetcher: Send + Sync {
    /// Fetch page `page` (1-based) holding at most `page_size` assets.
    async fn fetch_page(&self, page: u32, page_size: u32) -> Result<CatalogPage>;
}

#[async_trait]
impl<T> CatalogFetcher for Arc<T>
where
    T: CatalogFetcher + ?Sized,
{
    async fn fetch_page(&self, page: u32, page_size: u32) -> Result<CatalogPage> {
        (**self).fetch_page(page, page_size).await
    }
}

/// Delay before retry number `retry_count` (0-based)
pub fn backoff_delay(base: Duration, retry_count: u32, exponential_backoff: bool) -> Duration {
    let multiplier = if exponential_backoff {
        2_u32.saturating_pow(retry_count)
    } else {
        1
    };
    base.saturating_mul(multiplier)
}
