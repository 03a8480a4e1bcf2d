use crate::domain::catalog::{Category, Product};
use crate::domain::order::{CreatedOrder, NewOrder};
use crate::domain::ports::{CatalogApi, OrderApi};
use crate::error::{PosError, Result};
use async_trait::async_trait;
use serde::Deserialize;
use std::sync::Arc;
use tokio::sync::RwLock;

/// Catalog fixture as loaded from a JSON file for offline sessions.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CatalogFixture {
    #[serde(default)]
    pub categories: Vec<Category>,
    #[serde(default)]
    pub products: Vec<Product>,
}

/// In-memory commerce backend.
///
/// Serves the fixture catalog in pages and records created orders. Backs
/// the CLI's offline mode and the test suites; clones share the recorded
/// orders.
#[derive(Default, Clone)]
pub struct InMemoryBackend {
    categories: Vec<Category>,
    products: Vec<Product>,
    fail_categories: bool,
    fail_products_from: Option<u32>,
    fail_orders: bool,
    orders: Arc<RwLock<Vec<NewOrder>>>,
}

impl InMemoryBackend {
    pub fn new(categories: Vec<Category>, products: Vec<Product>) -> Self {
        Self {
            categories,
            products,
            ..Self::default()
        }
    }

    pub fn from_fixture(fixture: CatalogFixture) -> Self {
        Self::new(fixture.categories, fixture.products)
    }

    /// Makes the category request fail, for degradation tests.
    pub fn with_failing_categories(mut self) -> Self {
        self.fail_categories = true;
        self
    }

    /// Makes every product page from `page` on fail.
    pub fn with_failing_products_from(mut self, page: u32) -> Self {
        self.fail_products_from = Some(page);
        self
    }

    /// Makes order creation fail, for reconciliation tests.
    pub fn with_failing_orders(mut self) -> Self {
        self.fail_orders = true;
        self
    }

    /// The orders recorded so far, in creation order.
    pub async fn orders(&self) -> Vec<NewOrder> {
        self.orders.read().await.clone()
    }
}

#[async_trait]
impl CatalogApi for InMemoryBackend {
    async fn categories(&self) -> Result<Vec<Category>> {
        if self.fail_categories {
            return Err(PosError::Network("category endpoint unreachable".to_string()));
        }
        Ok(self.categories.clone())
    }

    async fn products_page(&self, page: u32, per_page: u32) -> Result<Vec<Product>> {
        if let Some(first_bad) = self.fail_products_from
            && page >= first_bad
        {
            return Err(PosError::Network(format!("product page {page} unreachable")));
        }
        let start = ((page - 1) * per_page) as usize;
        if start >= self.products.len() {
            return Ok(Vec::new());
        }
        let end = (start + per_page as usize).min(self.products.len());
        Ok(self.products[start..end].to_vec())
    }
}

#[async_trait]
impl OrderApi for InMemoryBackend {
    async fn create_order(&self, order: &NewOrder) -> Result<CreatedOrder> {
        if self.fail_orders {
            return Err(PosError::Sync("order endpoint unreachable".to_string()));
        }
        let mut orders = self.orders.write().await;
        orders.push(order.clone());
        Ok(CreatedOrder {
            id: orders.len() as u64,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn products(count: u64) -> Vec<Product> {
        (1..=count)
            .map(|id| Product {
                id,
                name: format!("product-{id}"),
                price: "1.00".to_string(),
                images: Vec::new(),
                categories: Vec::new(),
            })
            .collect()
    }

    #[tokio::test]
    async fn test_pages_slice_the_product_set() {
        let backend = InMemoryBackend::new(Vec::new(), products(250));

        let page1 = backend.products_page(1, 100).await.unwrap();
        let page3 = backend.products_page(3, 100).await.unwrap();
        let page4 = backend.products_page(4, 100).await.unwrap();

        assert_eq!(page1.len(), 100);
        assert_eq!(page1[0].id, 1);
        assert_eq!(page3.len(), 50);
        assert_eq!(page3[0].id, 201);
        assert!(page4.is_empty());
    }

    #[tokio::test]
    async fn test_failure_injection_starts_at_page() {
        let backend =
            InMemoryBackend::new(Vec::new(), products(250)).with_failing_products_from(2);

        assert!(backend.products_page(1, 100).await.is_ok());
        assert!(backend.products_page(2, 100).await.is_err());
    }

    #[tokio::test]
    async fn test_orders_are_shared_across_clones() {
        let backend = InMemoryBackend::new(Vec::new(), products(1));
        let observer = backend.clone();

        let order = NewOrder::from_cart(&crate::domain::cart::Cart::new());
        backend.create_order(&order).await.unwrap();

        assert_eq!(observer.orders().await.len(), 1);
    }
}
