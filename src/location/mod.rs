//! Turns raw catalog assets into validated, located assets.

pub mod normalizer;
pub mod pipeline;

pub use normalizer::extract_coordinates;
pub use pipeline::{CatalogStatus, ExtractionSummary, LocatedAsset, LocationPipeline};
