//! Configuration for the catalog connection, paging behaviour and map rendering
//!
//! Everything is resolved once at startup and passed explicitly into the
//! fetcher, orchestrator and pipeline constructors. [`AppConfig::from_env`]
//! reads the process environment; [`AppConfig::from_lookup`] takes any
//! key lookup so tests never touch real environment variables.

use std::fmt;
use std::time::Duration;

use crate::constants::{
    DEFAULT_LATITUDE_KEY, DEFAULT_LONGITUDE_KEY, DEFAULT_MAP_HEIGHT, DEFAULT_PAGE_SIZE,
    DEFAULT_RETRY_DELAY_MS, DEFAULT_ZOOM, MAX_PAGES, MAX_ZOOM,
};
use crate::tiles::source::MapStyle;
use crate::{Error, Result};

pub const ENV_DOMAIN: &str = "FRONTIFY_DOMAIN";
pub const ENV_BEARER_TOKEN: &str = "FRONTIFY_BEARER_TOKEN";
pub const ENV_LIBRARY_ID: &str = "FRONTIFY_LIBRARY_ID";
pub const ENV_LATITUDE_KEY: &str = "LATITUDE_KEY";
pub const ENV_LONGITUDE_KEY: &str = "LONGITUDE_KEY";
pub const ENV_MAP_STYLE: &str = "MAP_STYLE";
pub const ENV_MAP_DEFAULT_ZOOM: &str = "MAP_DEFAULT_ZOOM";
pub const ENV_MAP_HEIGHT: &str = "MAP_HEIGHT";
pub const ENV_MAP_TITLE: &str = "MAP_TITLE";
pub const ENV_MAP_DESCRIPTION: &str = "MAP_DESCRIPTION";
pub const ENV_MAP_SHOW_ASSET_COUNT: &str = "MAP_SHOW_ASSET_COUNT";

/// Names of the metadata fields that carry latitude and longitude.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetadataKeyConfig {
    latitude: String,
    longitude: String,
}

impl MetadataKeyConfig {
    pub fn new(latitude: impl Into<String>, longitude: impl Into<String>) -> Self {
        Self {
            latitude: latitude.into(),
            longitude: longitude.into(),
        }
    }

    pub fn latitude(&self) -> &str {
        &self.latitude
    }

    pub fn longitude(&self) -> &str {
        &self.longitude
    }
}

impl Default for MetadataKeyConfig {
    fn default() -> Self {
        Self::new(DEFAULT_LATITUDE_KEY, DEFAULT_LONGITUDE_KEY)
    }
}

/// Connection settings for the remote catalog.
#[derive(Clone)]
pub struct CatalogConfig {
    pub domain: String,
    pub bearer_token: String,
    /// Scopes the query to one library; switches to the typed-property query shape.
    pub library_id: Option<String>,
    pub metadata_keys: MetadataKeyConfig,
}

impl CatalogConfig {
    /// Builds a config, failing if the domain or credential is empty.
    pub fn new(domain: impl Into<String>, bearer_token: impl Into<String>) -> Result<Self> {
        let domain = normalize_domain(&domain.into());
        let bearer_token = bearer_token.into().trim().to_string();

        if domain.is_empty() {
            return Err(Error::Config(format!("{} is required", ENV_DOMAIN)));
        }
        if bearer_token.is_empty() {
            return Err(Error::Config(format!("{} is required", ENV_BEARER_TOKEN)));
        }

        Ok(Self {
            domain,
            bearer_token,
            library_id: None,
            metadata_keys: MetadataKeyConfig::default(),
        })
    }

    pub fn with_library_id(mut self, library_id: impl Into<String>) -> Self {
        self.library_id = Some(library_id.into());
        self
    }

    pub fn with_metadata_keys(mut self, keys: MetadataKeyConfig) -> Self {
        self.metadata_keys = keys;
        self
    }

    pub fn from_env() -> Result<Self> {
        Self::from_lookup(env_lookup)
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| non_empty(lookup(key));

        let domain = get(ENV_DOMAIN)
            .ok_or_else(|| Error::Config(format!("{} is required", ENV_DOMAIN)))?;
        let token = get(ENV_BEARER_TOKEN)
            .ok_or_else(|| Error::Config(format!("{} is required", ENV_BEARER_TOKEN)))?;

        let keys = MetadataKeyConfig::new(
            get(ENV_LATITUDE_KEY).unwrap_or_else(|| DEFAULT_LATITUDE_KEY.to_string()),
            get(ENV_LONGITUDE_KEY).unwrap_or_else(|| DEFAULT_LONGITUDE_KEY.to_string()),
        );

        let mut config = Self::new(domain, token)?.with_metadata_keys(keys);
        config.library_id = get(ENV_LIBRARY_ID);
        Ok(config)
    }

    /// GraphQL endpoint for the configured domain
    pub fn endpoint(&self) -> String {
        format!("https://{}/graphql", self.domain)
    }
}

impl fmt::Debug for CatalogConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CatalogConfig")
            .field("domain", &self.domain)
            .field("bearer_token", &"<redacted>")
            .field("library_id", &self.library_id)
            .field("metadata_keys", &self.metadata_keys)
            .finish()
    }
}

/// Paging behaviour of one fetch-all run.
#[derive(Debug, Clone, PartialEq)]
pub struct FetchConfig {
    pub page_size: u32,
    /// Maximum number of successful page fetches before the run is truncated
    pub max_pages: u32,
    /// Extra attempts for a page that failed with a transient error
    pub max_retries: u32,
    pub retry_delay: Duration,
    pub exponential_backoff: bool,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
            max_pages: MAX_PAGES,
            max_retries: 0,
            retry_delay: Duration::from_millis(DEFAULT_RETRY_DELAY_MS),
            exponential_backoff: true,
        }
    }
}

impl FetchConfig {
    pub fn for_testing() -> Self {
        Self {
            retry_delay: Duration::ZERO,
            ..Self::default()
        }
    }

    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }
}

/// Rendering parameters passed through untouched to the map collaborator.
#[derive(Debug, Clone, PartialEq)]
pub struct MapSettings {
    pub title: String,
    pub description: String,
    pub default_zoom: f64,
    /// Viewport height in pixels
    pub map_height: u32,
    pub show_asset_count: bool,
    pub style: MapStyle,
}

impl Default for MapSettings {
    fn default() -> Self {
        Self {
            title: String::new(),
            description: String::new(),
            default_zoom: DEFAULT_ZOOM,
            map_height: DEFAULT_MAP_HEIGHT,
            show_asset_count: true,
            style: MapStyle::default(),
        }
    }
}

impl MapSettings {
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| non_empty(lookup(key));
        let mut settings = Self::default();

        if let Some(title) = get(ENV_MAP_TITLE) {
            settings.title = title;
        }
        if let Some(description) = get(ENV_MAP_DESCRIPTION) {
            settings.description = description;
        }
        if let Some(style) = get(ENV_MAP_STYLE) {
            settings.style = style.parse()?;
        }
        if let Some(zoom) = get(ENV_MAP_DEFAULT_ZOOM) {
            let zoom: f64 = zoom
                .parse()
                .map_err(|_| Error::Config(format!("{} must be a number, got {:?}", ENV_MAP_DEFAULT_ZOOM, zoom)))?;
            if !(0.0..=MAX_ZOOM).contains(&zoom) {
                return Err(Error::Config(format!(
                    "{} must be between 0 and {}, got {}",
                    ENV_MAP_DEFAULT_ZOOM, MAX_ZOOM, zoom
                )));
            }
            settings.default_zoom = zoom;
        }
        if let Some(height) = get(ENV_MAP_HEIGHT) {
            settings.map_height = match height.parse::<u32>() {
                Ok(h) if h > 0 => h,
                _ => {
                    return Err(Error::Config(format!(
                        "{} must be a positive integer, got {:?}",
                        ENV_MAP_HEIGHT, height
                    )))
                }
            };
        }
        if let Some(show) = get(ENV_MAP_SHOW_ASSET_COUNT) {
            settings.show_asset_count = parse_flag(ENV_MAP_SHOW_ASSET_COUNT, &show)?;
        }

        Ok(settings)
    }
}

/// Everything the service needs, resolved once.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub catalog: CatalogConfig,
    pub fetch: FetchConfig,
    pub map: MapSettings,
}

impl AppConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(env_lookup)
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        Ok(Self {
            catalog: CatalogConfig::from_lookup(&lookup)?,
            fetch: FetchConfig::default(),
            map: MapSettings::from_lookup(&lookup)?,
        })
    }
}

fn env_lookup(key: &str) -> Option<String> {
    std::env::var(key).ok()
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn normalize_domain(raw: &str) -> String {
    let trimmed = raw.trim();
    let without_scheme = trimmed
        .strip_prefix("https://")
        .or_else(|| trimmed.strip_prefix("http://"))
        .unwrap_or(trimmed);
    without_scheme.trim_end_matches('/').to_string()
}

fn parse_flag(key: &str, value: &str) -> Result<bool> {
    match value.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(Error::Config(format!("{} must be a boolean, got {:?}", key, value))),
    }
}
