//! Remote catalog access: wire model, GraphQL queries, page fetching and
//! the fetch-all run that aggregates pages.

pub mod fetcher;
pub mod model;
pub mod orchestrator;
pub mod query;
pub mod run;

pub use fetcher::{CatalogPage, GraphQlCatalogFetcher};
pub use model::{Asset, KeyedField, Metadata, PropertyDescriptor, TypedProperty};
pub use orchestrator::{CatalogOrchestrator, FetchReport, StopReason};
pub use query::QueryShape;
pub use run::{RunToken, RunTracker};
