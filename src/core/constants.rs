//! Core constants for catalog paging, metadata matching and map defaults.
//! Keeping them in a single place makes it easier to tweak pipeline-wide magic numbers.

/// Assets requested per GraphQL page.
pub const DEFAULT_PAGE_SIZE: u32 = 100;

/// Hard ceiling on successful page fetches in one run (10,000 assets at the default page size).
pub const MAX_PAGES: u32 = 100;

/// Base delay between retries of a transient page failure.
pub const DEFAULT_RETRY_DELAY_MS: u64 = 500;

/// Per-request timeout for catalog calls.
pub const REQUEST_TIMEOUT_SECS: u64 = 30;

pub const USER_AGENT: &str = concat!("assetmap/", env!("CARGO_PKG_VERSION"));

/// Metadata key names used when none are configured.
pub const DEFAULT_LATITUDE_KEY: &str = "latitude";
pub const DEFAULT_LONGITUDE_KEY: &str = "longitude";

/// Substrings that mark a typed-property name as latitude or longitude
/// when it does not equal the configured key.
pub const LATITUDE_NAME_HINTS: &[&str] = &["lat"];
pub const LONGITUDE_NAME_HINTS: &[&str] = &["lon", "lng"];

/// Inclusive coordinate bounds.
pub const MIN_LATITUDE: f64 = -90.0;
pub const MAX_LATITUDE: f64 = 90.0;
pub const MIN_LONGITUDE: f64 = -180.0;
pub const MAX_LONGITUDE: f64 = 180.0;

/// Rendering defaults handed to the map collaborator.
pub const DEFAULT_ZOOM: f64 = 3.0;
pub const MAX_ZOOM: f64 = 19.0;
pub const DEFAULT_MAP_HEIGHT: u32 = 500;
