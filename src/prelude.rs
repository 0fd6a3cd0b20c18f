//! Prelude module for common assetmap types and traits
//!
//! This module re-exports the most commonly used types, traits, and functions
//! for easy importing with `use assetmap::prelude::*;`

pub use crate::core::{
    config::{AppConfig, CatalogConfig, FetchConfig, MapSettings, MetadataKeyConfig},
    geo::{mean_center, validate_coordinates, LatLng},
    map::{FetchSummary, MapView},
};

pub use crate::catalog::{
    fetcher::{CatalogPage, GraphQlCatalogFetcher},
    model::{Asset, KeyedField, Metadata, PropertyDescriptor, TypedProperty},
    orchestrator::{CatalogOrchestrator, FetchReport, StopReason},
    query::QueryShape,
    run::{RunToken, RunTracker},
};

pub use crate::location::{
    normalizer::extract_coordinates,
    pipeline::{CatalogStatus, ExtractionSummary, LocatedAsset, LocationPipeline},
};

pub use crate::service::{AssetMapService, RunOutcome};
pub use crate::tiles::source::{MapStyle, TileSource};
pub use crate::traits::CatalogFetcher;

pub use crate::{AssetMapError, Error, Result};
