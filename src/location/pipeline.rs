use serde::ser::SerializeStruct;
use serde::{Serialize, Serializer};
use serde_json::Value;

use super::normalizer::extract_coordinates;
use crate::catalog::model::Asset;
use crate::core::config::MetadataKeyConfig;
use crate::core::geo::{validate_coordinates, LatLng};
use crate::{Error, Result};

/// An asset with a validated position.
///
/// Only constructible through [`LocatedAsset::new`], which range-checks
/// the coordinates.
#[derive(Debug, Clone, PartialEq)]
pub struct LocatedAsset {
    asset: Asset,
    position: LatLng,
}

impl LocatedAsset {
    pub fn new(asset: Asset, position: LatLng) -> Result<Self> {
        if !validate_coordinates(Some(position.lat), Some(position.lng)) {
            return Err(Error::InvalidCoordinates(format!(
                "asset {} ({}): lat={}, lon={}",
                asset.id, asset.title, position.lat, position.lng
            )));
        }
        Ok(Self { asset, position })
    }

    pub fn asset(&self) -> &Asset {
        &self.asset
    }

    pub fn id(&self) -> &str {
        &self.asset.id
    }

    pub fn title(&self) -> &str {
        &self.asset.title
    }

    pub fn preview_url(&self) -> Option<&str> {
        self.asset.preview_url.as_deref()
    }

    pub fn position(&self) -> LatLng {
        self.position
    }

    pub fn latitude(&self) -> f64 {
        self.position.lat
    }

    pub fn longitude(&self) -> f64 {
        self.position.lng
    }

    pub fn into_asset(self) -> Asset {
        self.asset
    }
}

impl Serialize for LocatedAsset {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("LocatedAsset", 5)?;
        state.serialize_field("id", &self.asset.id)?;
        state.serialize_field("title", &self.asset.title)?;
        state.serialize_field("previewUrl", &self.asset.preview_url)?;
        state.serialize_field("latitude", &self.position.lat)?;
        state.serialize_field("longitude", &self.position.lng)?;
        state.end()
    }
}

/// What a run produced, so callers can tell an empty catalog from one
/// whose assets carry no usable location.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CatalogStatus {
    EmptyCatalog,
    NoLocatedAssets,
    Located,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ExtractionSummary {
    pub total_assets: usize,
    pub located: usize,
    pub status: CatalogStatus,
}

impl ExtractionSummary {
    pub fn new(total_assets: usize, located: usize) -> Self {
        let status = if total_assets == 0 {
            CatalogStatus::EmptyCatalog
        } else if located == 0 {
            CatalogStatus::NoLocatedAssets
        } else {
            CatalogStatus::Located
        };
        Self {
            total_assets,
            located,
            status,
        }
    }

    pub fn unlocated(&self) -> usize {
        self.total_assets.saturating_sub(self.located)
    }
}

/// Normalizer plus validator over a whole asset list.
#[derive(Debug, Clone, Default)]
pub struct LocationPipeline {
    keys: MetadataKeyConfig,
}

impl LocationPipeline {
    pub fn new(keys: MetadataKeyConfig) -> Self {
        Self { keys }
    }

    pub fn keys(&self) -> &MetadataKeyConfig {
        &self.keys
    }

    /// Locate one asset; `None` when it has no usable position.
    pub fn locate(&self, asset: &Asset) -> Option<LocatedAsset> {
        let candidate = extract_coordinates(asset, &self.keys)?;

        match LocatedAsset::new(asset.clone(), candidate) {
            Ok(located) => Some(located),
            Err(_) => {
                log::warn!(
                    "Invalid coordinates for asset {}: lat={}, lon={}",
                    asset.title,
                    candidate.lat,
                    candidate.lng
                );
                None
            }
        }
    }

    /// Located assets in input order; assets without a usable position are skipped.
    pub fn extract_located(&self, assets: &[Asset]) -> Vec<LocatedAsset> {
        let located: Vec<LocatedAsset> = assets.iter().filter_map(|a| self.locate(a)).collect();
        log::debug!("located {} of {} assets", located.len(), assets.len());
        located
    }

    /// Like [`extract_located`](Self::extract_located) for an undecoded
    /// JSON list. Anything other than an array yields no assets; elements
    /// that do not decode as assets are skipped.
    pub fn extract_located_value(&self, value: &Value) -> Vec<LocatedAsset> {
        let Some(items) = value.as_array() else {
            log::error!("expected an array of assets, got {}", json_kind(value));
            return Vec::new();
        };

        let assets: Vec<Asset> = items
            .iter()
            .enumerate()
            .filter_map(|(index, item)| match serde_json::from_value(item.clone()) {
                Ok(asset) => Some(asset),
                Err(e) => {
                    log::debug!("skipping undecodable asset at index {}: {}", index, e);
                    None
                }
            })
            .collect();

        self.extract_located(&assets)
    }

    pub fn summarize(&self, assets: &[Asset], located: &[LocatedAsset]) -> ExtractionSummary {
        ExtractionSummary::new(assets.len(), located.len())
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
