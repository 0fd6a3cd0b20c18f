//! End-to-end loading: fetch every page, locate assets, build the view.

use crate::catalog::fetcher::GraphQlCatalogFetcher;
use crate::catalog::orchestrator::{CatalogOrchestrator, FetchReport};
use crate::catalog::run::{RunToken, RunTracker};
use crate::core::config::{AppConfig, FetchConfig, MapSettings, MetadataKeyConfig};
use crate::core::map::{FetchSummary, MapView};
use crate::location::pipeline::LocationPipeline;
use crate::traits::CatalogFetcher;
use crate::Result;

/// Result of one load.
#[derive(Debug, Clone, PartialEq)]
pub enum RunOutcome {
    Completed(MapView),
    /// A newer load started (or the load was cancelled) before this one finished
    Superseded { generation: u64 },
}

impl RunOutcome {
    pub fn view(&self) -> Option<&MapView> {
        match self {
            Self::Completed(view) => Some(view),
            Self::Superseded { .. } => None,
        }
    }

    pub fn into_view(self) -> Option<MapView> {
        match self {
            Self::Completed(view) => Some(view),
            Self::Superseded { .. } => None,
        }
    }
}

pub struct AssetMapService<F = GraphQlCatalogFetcher> {
    orchestrator: CatalogOrchestrator<F>,
    pipeline: LocationPipeline,
    settings: MapSettings,
    runs: RunTracker,
}

impl AssetMapService<GraphQlCatalogFetcher> {
    pub fn from_config(config: AppConfig) -> Result<Self> {
        let fetcher = GraphQlCatalogFetcher::new(&config.catalog)?;
        Ok(Self::new(
            fetcher,
            config.fetch,
            config.catalog.metadata_keys,
            config.map,
        ))
    }

    pub fn from_env() -> Result<Self> {
        Self::from_config(AppConfig::from_env()?)
    }
}

impl<F: CatalogFetcher> AssetMapService<F> {
    pub fn new(fetcher: F, fetch: FetchConfig, keys: MetadataKeyConfig, settings: MapSettings) -> Self {
        Self {
            orchestrator: CatalogOrchestrator::new(fetcher, fetch),
            pipeline: LocationPipeline::new(keys),
            settings,
            runs: RunTracker::new(),
        }
    }

    pub fn orchestrator(&self) -> &CatalogOrchestrator<F> {
        &self.orchestrator
    }

    pub fn pipeline(&self) -> &LocationPipeline {
        &self.pipeline
    }

    pub fn settings(&self) -> &MapSettings {
        &self.settings
    }

    /// Tracker whose `cancel`/`begin` supersede in-flight loads.
    pub fn runs(&self) -> &RunTracker {
        &self.runs
    }

    /// Start a new load, superseding any load still in flight.
    pub async fn load(&self) -> RunOutcome {
        let token = self.runs.begin();
        self.load_with(&token).await
    }

    pub async fn load_with(&self, token: &RunToken) -> RunOutcome {
        let report = self.orchestrator.run(token).await;
        if report.is_cancelled() || token.is_stale() {
            return RunOutcome::Superseded {
                generation: token.generation(),
            };
        }
        RunOutcome::Completed(self.build_view(&report))
    }

    fn build_view(&self, report: &FetchReport) -> MapView {
        let located = self.pipeline.extract_located(&report.assets);
        let summary = self.pipeline.summarize(&report.assets, &located);

        log::info!(
            "located {} of {} assets ({:?})",
            summary.located,
            summary.total_assets,
            summary.status
        );

        MapView::new(located, summary, FetchSummary::from(report), &self.settings)
    }
}
