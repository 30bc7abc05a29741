use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use shared::{
    error::ApiError,
    protocol::{ListProductsQuery, ProductPage},
};
use tracing::{debug, warn};
use url::Url;

pub mod config;
pub mod error;
pub mod page_fetch;
pub mod view;

pub use config::{load_settings, ClientSettings};
pub use error::CatalogError;
pub use page_fetch::{
    FetchFailure, FetchResult, IgnoreReason, PageEvent, PageFetchController, PageRequest,
    PageState, RequestId, Step,
};
pub use reqwest::StatusCode;
pub use view::{
    grid_columns, render_text, CardRenderer, GalleryBody, GalleryView, PagerView,
    PlainCardRenderer,
};

const PRODUCTS_PATH: &str = "products";

/// Source of paginated product listings.
#[async_trait]
pub trait ProductCatalog: Send + Sync {
    /// Fetches the 1-based `page` of the listing.
    async fn list_products(&self, page: u32) -> Result<ProductPage, CatalogError>;
}

/// `ProductCatalog` backed by `GET {base}/products?page=N`.
#[derive(Debug, Clone)]
pub struct HttpProductCatalog {
    http: Client,
    listing_url: Url,
}

impl HttpProductCatalog {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, CatalogError> {
        let listing_url = listing_url(base_url)?;
        let http = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(CatalogError::Transport)?;
        Ok(Self { http, listing_url })
    }

    pub fn from_settings(settings: &ClientSettings) -> Result<Self, CatalogError> {
        Self::new(
            &settings.catalog_url,
            Duration::from_secs(settings.request_timeout_secs),
        )
    }

    pub fn listing_url(&self) -> &Url {
        &self.listing_url
    }
}

#[async_trait]
impl ProductCatalog for HttpProductCatalog {
    async fn list_products(&self, page: u32) -> Result<ProductPage, CatalogError> {
        debug!(page, url = %self.listing_url, "requesting product page");
        let response = self
            .http
            .get(self.listing_url.clone())
            .query(&ListProductsQuery { page })
            .send()
            .await
            .map_err(CatalogError::Transport)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<ApiError>(&body)
                .map(|err| err.message)
                .unwrap_or_else(|_| status.to_string());
            warn!(page, %status, "catalog rejected product page request");
            return Err(CatalogError::Status { status, message });
        }

        let listing: ProductPage = response.json().await?;
        debug!(
            page,
            products = listing.products.len(),
            total_pages = listing.total_pages,
            "received product page"
        );
        Ok(listing)
    }
}

fn listing_url(base_url: &str) -> Result<Url, CatalogError> {
    let invalid = |reason: String| CatalogError::InvalidUrl {
        url: base_url.to_string(),
        reason,
    };

    let mut base = Url::parse(base_url.trim()).map_err(|err| invalid(err.to_string()))?;
    if base.cannot_be_a_base() {
        return Err(invalid("url cannot be used as a base".to_string()));
    }
    if !base.path().ends_with('/') {
        let path = format!("{}/", base.path());
        base.set_path(&path);
    }
    base.join(PRODUCTS_PATH)
        .map_err(|err| invalid(err.to_string()))
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
