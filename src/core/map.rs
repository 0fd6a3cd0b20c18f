//! The payload handed to the map renderer.
//!
//! Nothing here feeds back into the pipeline: the renderer receives the
//! located assets in order plus opaque display parameters.

use serde::Serialize;

use crate::catalog::orchestrator::{FetchReport, StopReason};
use crate::core::config::MapSettings;
use crate::core::geo::{mean_center, LatLng};
use crate::location::pipeline::{ExtractionSummary, LocatedAsset};
use crate::tiles::source::{MapStyle, TileSource};

/// How the catalog fetch behind a view ended.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FetchSummary {
    pub pages_fetched: u32,
    pub requests_issued: u32,
    pub stop: StopReason,
}

impl From<&FetchReport> for FetchSummary {
    fn from(report: &FetchReport) -> Self {
        Self {
            pages_fetched: report.pages_fetched,
            requests_issued: report.requests_issued,
            stop: report.stop.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MapView {
    pub title: String,
    pub description: String,
    pub assets: Vec<LocatedAsset>,
    /// Mean of all located positions, `(0, 0)` when there are none
    pub center: LatLng,
    pub zoom: f64,
    /// Viewport height in pixels
    pub height: u32,
    pub style: MapStyle,
    pub tile_url: String,
    pub attribution: String,
    pub show_asset_count: bool,
    pub summary: ExtractionSummary,
    pub fetch: FetchSummary,
}

impl MapView {
    pub fn new(
        assets: Vec<LocatedAsset>,
        summary: ExtractionSummary,
        fetch: FetchSummary,
        settings: &MapSettings,
    ) -> Self {
        let center = mean_center(assets.iter().map(LocatedAsset::position)).unwrap_or_default();

        Self {
            title: settings.title.clone(),
            description: settings.description.clone(),
            assets,
            center,
            zoom: settings.default_zoom,
            height: settings.map_height,
            style: settings.style,
            tile_url: settings.style.url_template().to_string(),
            attribution: settings.style.attribution().to_string(),
            show_asset_count: settings.show_asset_count,
            summary,
            fetch,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.assets.is_empty()
    }

    /// Message for an empty map, distinguishing an empty catalog from
    /// assets that carry no usable location
    pub fn empty_message(&self) -> Option<String> {
        use crate::location::pipeline::CatalogStatus;

        match self.summary.status {
            CatalogStatus::Located => None,
            CatalogStatus::EmptyCatalog => Some("The catalog contains no assets".to_string()),
            CatalogStatus::NoLocatedAssets => Some(format!(
                "No assets with location metadata found ({} assets checked)",
                self.summary.total_assets
            )),
        }
    }
}
