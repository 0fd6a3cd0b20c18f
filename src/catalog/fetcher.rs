use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE};
use serde::Deserialize;
use serde_json::Value;

use super::model::Asset;
use super::query::QueryShape;
use crate::constants::{REQUEST_TIMEOUT_SECS, USER_AGENT};
use crate::core::config::CatalogConfig;
use crate::traits::CatalogFetcher;
use crate::{Error, Result};

/// One page of catalog assets.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CatalogPage {
    pub items: Vec<Asset>,
    /// Total asset count when the catalog reports it
    pub total: Option<u64>,
}

impl CatalogPage {
    pub fn new(items: Vec<Asset>) -> Self {
        Self { items, total: None }
    }

    pub fn with_total(mut self, total: u64) -> Self {
        self.total = Some(total);
        self
    }

    /// An empty page marks the end of the collection
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Fetches catalog pages from the GraphQL endpoint with a bearer credential.
#[derive(Debug, Clone)]
pub struct GraphQlCatalogFetcher {
    client: reqwest::Client,
    endpoint: String,
    bearer_token: String,
    shape: QueryShape,
}

impl GraphQlCatalogFetcher {
    pub fn new(config: &CatalogConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()?;
        Ok(Self::with_client(client, config))
    }

    /// Use a caller-provided client (shared pool, proxies, custom TLS)
    pub fn with_client(client: reqwest::Client, config: &CatalogConfig) -> Self {
        Self {
            client,
            endpoint: config.endpoint(),
            bearer_token: config.bearer_token.clone(),
            shape: QueryShape::from_library_id(config.library_id.as_deref()),
        }
    }

    /// Send requests to a full endpoint URL instead of `https://{domain}/graphql`
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub fn shape(&self) -> &QueryShape {
        &self.shape
    }
}

#[async_trait]
impl CatalogFetcher for GraphQlCatalogFetcher {
    async fn fetch_page(&self, page: u32, page_size: u32) -> Result<CatalogPage> {
        log::debug!("fetch catalog page {} (limit {})", page, page_size);

        let response = self
            .client
            .post(&self.endpoint)
            .header(CONTENT_TYPE, "application/json")
            .header(ACCEPT, "application/json")
            .header(AUTHORIZATION, format!("Bearer {}", self.bearer_token))
            .json(&self.shape.request_body(page, page_size))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::Transport {
                status: status.as_u16(),
            });
        }

        let body = response.text().await?;
        let parsed = parse_page_response(&self.shape, &body)?;
        log::debug!(
            "catalog page {} returned {} assets (total {:?})",
            page,
            parsed.items.len(),
            parsed.total
        );
        Ok(parsed)
    }
}

#[derive(Debug, Deserialize)]
struct GraphQlEnvelope {
    #[serde(default)]
    data: Option<Value>,
    #[serde(default)]
    errors: Option<Vec<GraphQlError>>,
}

#[derive(Debug, Deserialize)]
struct GraphQlError {
    #[serde(default)]
    message: String,
}

/// Decodes the body of a successful HTTP response into a page.
///
/// GraphQL-level errors take precedence over any partial `data`.
pub fn parse_page_response(shape: &QueryShape, body: &str) -> Result<CatalogPage> {
    let envelope: GraphQlEnvelope = serde_json::from_str(body)
        .map_err(|e| Error::Schema(format!("response is not valid JSON: {}", e)))?;

    if let Some(errors) = envelope.errors.filter(|errors| !errors.is_empty()) {
        let message = errors
            .iter()
            .map(|e| e.message.as_str())
            .collect::<Vec<_>>()
            .join(", ");
        return Err(Error::Api(message));
    }

    let pointer = shape.assets_pointer();
    let assets = envelope
        .data
        .as_ref()
        .and_then(|data| data.pointer(pointer))
        .filter(|assets| !assets.is_null())
        .ok_or_else(|| missing_path(shape, pointer))?;

    let items = assets
        .get("items")
        .filter(|items| items.is_array())
        .ok_or_else(|| missing_path(shape, &format!("{}/items", pointer)))?;

    let items: Vec<Asset> = serde_json::from_value(items.clone())
        .map_err(|e| Error::Schema(format!("malformed asset in data{}/items: {}", pointer, e)))?;
    let total = assets.get("total").and_then(Value::as_u64);

    Ok(CatalogPage { items, total })
}

fn missing_path(shape: &QueryShape, pointer: &str) -> Error {
    let hint = match shape {
        QueryShape::Library { .. } => " Check the library ID.",
        QueryShape::Account => "",
    };
    Error::Schema(format!("response has no data{}.{}", pointer, hint))
}
