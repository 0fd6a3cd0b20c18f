//! # assetmap
//!
//! Pulls every asset out of a remote GraphQL catalog, reads geolocation
//! out of whatever custom-metadata shape the catalog returns, and hands a
//! clean list of located assets to a map renderer.
//!
//! The pipeline is split the same way data flows through it:
//!
//! - [`catalog`] fetches pages and aggregates them into a single run
//! - [`location`] normalizes metadata and validates coordinates
//! - [`service`] wires both together and produces a [`MapView`]

pub mod catalog;
pub mod core;
pub mod location;
pub mod prelude;
pub mod service;
pub mod tiles;
pub mod traits;
pub use crate::core::constants;

// Re-export public API
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

/// Result type used throughout the library
pub type Result<T> = std::result::Result<T, Error>;

/// Common error types
#[derive(Debug, thiserror::Error)]
pub enum AssetMapError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Transport error: HTTP status {status}")]
    Transport { status: u16 },

    #[error("GraphQL error: {0}")]
    Api(String),

    #[error("Schema error: {0}")]
    Schema(String),

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Invalid coordinates: {0}")]
    InvalidCoordinates(String),
}

impl AssetMapError {
    /// Whether retrying the same request could plausibly succeed.
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Network(_) => true,
            Self::Transport { status } => *status == 429 || (500..600).contains(status),
            _ => false,
        }
    }
}

/// Error type alias for convenience
pub type Error = AssetMapError;
