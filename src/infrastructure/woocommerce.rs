use crate::domain::catalog::{Category, Product};
use crate::domain::order::{CreatedOrder, NewOrder};
use crate::domain::ports::{CatalogApi, OrderApi};
use crate::error::{PosError, Result};
use async_trait::async_trait;
use reqwest::{Client, Url};
use serde::de::DeserializeOwned;

/// REST adapter for a WooCommerce-style commerce backend.
///
/// Authenticates every request with the key/secret pair as query
/// parameters, the way the backend's read API expects. Failures are mapped
/// at this boundary; nothing above it sees a raw HTTP error.
#[derive(Clone)]
pub struct WooCommerceApi {
    client: Client,
    base_url: Url,
    consumer_key: String,
    consumer_secret: String,
}

impl WooCommerceApi {
    pub fn new(
        base_url: Url,
        consumer_key: impl Into<String>,
        consumer_secret: impl Into<String>,
    ) -> Self {
        Self {
            client: Client::new(),
            base_url,
            consumer_key: consumer_key.into(),
            consumer_secret: consumer_secret.into(),
        }
    }

    fn endpoint(&self, segments: &[&str]) -> Result<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| PosError::Validation("API base URL cannot hold a path".to_string()))?
            .pop_if_empty()
            .extend(segments);
        url.query_pairs_mut()
            .append_pair("consumer_key", &self.consumer_key)
            .append_pair("consumer_secret", &self.consumer_secret);
        Ok(url)
    }

    /// Fetches a JSON list. A non-list body is a contract violation, not a
    /// network problem.
    async fn get_list<T: DeserializeOwned>(&self, url: Url) -> Result<Vec<T>> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| PosError::Network(e.to_string()))?;
        if !response.status().is_success() {
            return Err(PosError::Network(format!(
                "backend returned {}",
                response.status()
            )));
        }
        let body: serde_json::Value = response
            .json()
            .await
            .map_err(|e| PosError::MalformedResponse(e.to_string()))?;
        if !body.is_array() {
            return Err(PosError::MalformedResponse(
                "expected a JSON list".to_string(),
            ));
        }
        serde_json::from_value(body).map_err(|e| PosError::MalformedResponse(e.to_string()))
    }
}

#[async_trait]
impl CatalogApi for WooCommerceApi {
    async fn categories(&self) -> Result<Vec<Category>> {
        let url = self.endpoint(&["products", "categories"])?;
        self.get_list(url).await
    }

    async fn products_page(&self, page: u32, per_page: u32) -> Result<Vec<Product>> {
        let mut url = self.endpoint(&["products"])?;
        url.query_pairs_mut()
            .append_pair("per_page", &per_page.to_string())
            .append_pair("page", &page.to_string());
        self.get_list(url).await
    }
}

#[async_trait]
impl OrderApi for WooCommerceApi {
    async fn create_order(&self, order: &NewOrder) -> Result<CreatedOrder> {
        let url = self.endpoint(&["orders"])?;
        let response = self
            .client
            .post(url)
            .json(order)
            .send()
            .await
            .map_err(|e| PosError::Network(e.to_string()))?;
        if !response.status().is_success() {
            return Err(PosError::Sync(format!(
                "order creation returned {}",
                response.status()
            )));
        }
        response
            .json()
            .await
            .map_err(|e| PosError::MalformedResponse(e.to_string()))
    }
}
