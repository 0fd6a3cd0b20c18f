//! In-memory catalogs for driving the orchestrator and service without a network.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::Mutex;

use assetmap::prelude::*;
use async_trait::async_trait;

/// Serves a fixed list of assets page by page and records every request.
pub struct FakeCatalog {
    assets: Vec<Asset>,
    report_total: bool,
    /// Pages that fail, with the error to return, and how many times
    failures: Mutex<HashMap<u32, (u32, fn() -> Error)>>,
    /// Keep returning full pages past the end of `assets`
    endless: bool,
    /// Called on each request before it is answered
    on_request: Option<Box<dyn Fn(u32) + Send + Sync>>,
    pub requests: Mutex<Vec<u32>>,
}

impl FakeCatalog {
    pub fn new(assets: Vec<Asset>) -> Self {
        Self {
            assets,
            report_total: false,
            failures: Mutex::new(HashMap::new()),
            endless: false,
            on_request: None,
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn endless() -> Self {
        Self {
            endless: true,
            ..Self::new(Vec::new())
        }
    }

    pub fn reporting_total(mut self) -> Self {
        self.report_total = true;
        self
    }

    /// Make `page` fail `times` times with the error built by `error`.
    pub fn failing(self, page: u32, times: u32, error: fn() -> Error) -> Self {
        self.failures.lock().unwrap().insert(page, (times, error));
        self
    }

    pub fn on_request(mut self, hook: impl Fn(u32) + Send + Sync + 'static) -> Self {
        self.on_request = Some(Box::new(hook));
        self
    }

    pub fn requested_pages(&self) -> Vec<u32> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl CatalogFetcher for FakeCatalog {
    async fn fetch_page(&self, page: u32, page_size: u32) -> Result<CatalogPage> {
        self.requests.lock().unwrap().push(page);
        if let Some(hook) = &self.on_request {
            hook(page);
        }

        if let Some((remaining, error)) = self.failures.lock().unwrap().get_mut(&page) {
            if *remaining > 0 {
                *remaining -= 1;
                return Err(error());
            }
        }

        if self.endless {
            let items = (0..page_size)
                .map(|i| Asset::new(format!("{}-{}", page, i), "endless"))
                .collect();
            return Ok(CatalogPage::new(items));
        }

        let start = ((page - 1) * page_size) as usize;
        let items: Vec<Asset> = self
            .assets
            .iter()
            .skip(start)
            .take(page_size as usize)
            .cloned()
            .collect();

        let mut result = CatalogPage::new(items);
        if self.report_total {
            result = result.with_total(self.assets.len() as u64);
        }
        Ok(result)
    }
}

/// Assets `0..count`, every one carrying keyed coordinates.
pub fn located_assets(count: usize) -> Vec<Asset> {
    (0..count)
        .map(|i| {
            let lat = (i % 180) as f64 - 89.5;
            let lng = (i % 360) as f64 - 179.5;
            keyed_asset(&i.to_string(), &lat.to_string(), &lng.to_string())
        })
        .collect()
}

pub fn keyed_asset(id: &str, lat: &str, lng: &str) -> Asset {
    Asset::new(id, format!("Asset {}", id)).with_metadata(Metadata::Keyed(vec![
        KeyedField::new("latitude", lat),
        KeyedField::new("longitude", lng),
    ]))
}

pub fn ids(assets: &[Asset]) -> Vec<String> {
    assets.iter().map(|a| a.id.clone()).collect()
}
