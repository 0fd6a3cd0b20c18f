//! Drives a [`CatalogFetcher`] across every page of the catalog.
//!
//! Pages are requested strictly one after another: whether page `n + 1` is
//! requested at all depends on page `n` coming back non-empty. A failed
//! page ends the run early with whatever was already accumulated, and the
//! page ceiling bounds how much one run can pull into memory.

use serde::Serialize;

use super::fetcher::CatalogPage;
use super::model::Asset;
use super::run::RunToken;
use crate::core::config::FetchConfig;
use crate::traits::{backoff_delay, CatalogFetcher};
use crate::Result;

/// Why a fetch-all run stopped requesting pages.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "reason", rename_all = "snake_case")]
pub enum StopReason {
    /// Empty page, or the reported total was reached
    Complete,
    /// The page ceiling was hit; more assets may exist
    PageCeiling { max_pages: u32 },
    /// A page failed; earlier pages are kept
    Failed { page: u32, error: String },
    /// A newer run superseded this one; results were discarded
    Cancelled,
}

/// Result of a fetch-all run.
#[derive(Debug, Clone, PartialEq)]
pub struct FetchReport {
    pub assets: Vec<Asset>,
    /// Non-empty pages appended to `assets`
    pub pages_fetched: u32,
    /// Every request issued, including the terminating empty page and retries
    pub requests_issued: u32,
    pub stop: StopReason,
}

impl FetchReport {
    pub fn is_complete(&self) -> bool {
        self.stop == StopReason::Complete
    }

    /// The page ceiling cut the run short
    pub fn is_truncated(&self) -> bool {
        matches!(self.stop, StopReason::PageCeiling { .. })
    }

    /// A page failure cut the run short
    pub fn is_partial(&self) -> bool {
        matches!(self.stop, StopReason::Failed { .. })
    }

    pub fn is_cancelled(&self) -> bool {
        self.stop == StopReason::Cancelled
    }
}

pub struct CatalogOrchestrator<F> {
    fetcher: F,
    config: FetchConfig,
}

impl<F: CatalogFetcher> CatalogOrchestrator<F> {
    pub fn new(fetcher: F, config: FetchConfig) -> Self {
        Self { fetcher, config }
    }

    pub fn fetcher(&self) -> &F {
        &self.fetcher
    }

    pub fn config(&self) -> &FetchConfig {
        &self.config
    }

    /// Fetch every page and return the aggregated assets.
    ///
    /// Never fails: a page error yields the assets gathered before it.
    pub async fn fetch_all(&self) -> Vec<Asset> {
        self.run(&RunToken::detached()).await.assets
    }

    /// Fetch every page for the run identified by `token`.
    pub async fn run(&self, token: &RunToken) -> FetchReport {
        let mut assets: Vec<Asset> = Vec::new();
        let mut page: u32 = 1;
        let mut pages_fetched: u32 = 0;
        let mut requests_issued: u32 = 0;

        let stop = loop {
            if token.is_stale() {
                break StopReason::Cancelled;
            }

            if pages_fetched >= self.config.max_pages {
                log::warn!(
                    "Reached maximum page limit ({} pages, {} assets); remaining catalog assets were not fetched",
                    self.config.max_pages,
                    assets.len()
                );
                break StopReason::PageCeiling {
                    max_pages: self.config.max_pages,
                };
            }

            match self.fetch_with_retry(page, token, &mut requests_issued).await {
                Ok(result) if result.is_empty() => break StopReason::Complete,
                Ok(CatalogPage { items, total }) => {
                    assets.extend(items);
                    pages_fetched += 1;
                    page += 1;

                    if total.is_some_and(|total| assets.len() as u64 >= total) {
                        break StopReason::Complete;
                    }
                }
                Err(e) => {
                    log::error!("Error fetching page {}: {}", page, e);
                    break StopReason::Failed {
                        page,
                        error: e.to_string(),
                    };
                }
            }
        };

        // The last await may have outlived the run
        let stop = if token.is_stale() {
            StopReason::Cancelled
        } else {
            stop
        };

        if stop == StopReason::Cancelled {
            log::warn!(
                "catalog run {} superseded after {} pages; discarding {} assets",
                token.generation(),
                pages_fetched,
                assets.len()
            );
            assets.clear();
        } else {
            log::info!(
                "catalog run {} fetched {} assets in {} pages ({:?})",
                token.generation(),
                assets.len(),
                pages_fetched,
                stop
            );
        }

        FetchReport {
            assets,
            pages_fetched,
            requests_issued,
            stop,
        }
    }

    async fn fetch_with_retry(
        &self,
        page: u32,
        token: &RunToken,
        requests_issued: &mut u32,
    ) -> Result<CatalogPage> {
        let mut retry_count = 0;
        loop {
            *requests_issued += 1;
            match self.fetcher.fetch_page(page, self.config.page_size).await {
                Ok(result) => return Ok(result),
                Err(e)
                    if e.is_transient()
                        && retry_count < self.config.max_retries
                        && token.is_current() =>
                {
                    let delay = backoff_delay(
                        self.config.retry_delay,
                        retry_count,
                        self.config.exponential_backoff,
                    );
                    log::warn!(
                        "page {} failed on attempt {}: {}; retrying in {:?}",
                        page,
                        retry_count + 1,
                        e,
                        delay
                    );
                    retry_count += 1;
                    if !delay.is_zero() {
                        tokio::time::sleep(delay).await;
                    }
                }
                Err(e) => return Err(e),
            }
        }
    }
}
