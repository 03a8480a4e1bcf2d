use crate::domain::catalog::{Category, Product};
use crate::domain::order::{CreatedOrder, NewOrder};
use crate::error::Result;
use async_trait::async_trait;
use reqwest::Url;

/// Read side of the commerce backend.
#[async_trait]
pub trait CatalogApi: Send + Sync {
    async fn categories(&self) -> Result<Vec<Category>>;

    /// Fetches one product page. An empty page means the listing is
    /// exhausted.
    async fn products_page(&self, page: u32, per_page: u32) -> Result<Vec<Product>>;
}

/// Write side of the commerce backend.
#[async_trait]
pub trait OrderApi: Send + Sync {
    async fn create_order(&self, order: &NewOrder) -> Result<CreatedOrder>;
}

/// Hands session control to the external payment application.
///
/// Launching is fire-and-forget: a successful launch says nothing about the
/// payment outcome, which only ever arrives through a return URL.
pub trait PaymentLauncher: Send + Sync {
    fn launch(&self, link: &Url) -> Result<()>;
}

pub type CatalogApiBox = Box<dyn CatalogApi>;
pub type OrderApiBox = Box<dyn OrderApi>;
pub type PaymentLauncherBox = Box<dyn PaymentLauncher>;
