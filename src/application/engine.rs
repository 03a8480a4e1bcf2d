use crate::application::catalog::fetch_catalog;
use crate::config::CheckoutConfig;
use crate::domain::cart::Cart;
use crate::domain::catalog::{Catalog, Category, CategoryId, Product, filter_by_category};
use crate::domain::checkout::{
    self, HandoffRequest, PaymentStatus, ReturnSignal,
};
use crate::domain::order::{NewOrder, SyncOutcome};
use crate::domain::ports::{CatalogApiBox, OrderApiBox, PaymentLauncherBox};
use crate::error::{PosError, Result};
use reqwest::Url;

/// One terminal session.
///
/// Owns every piece of mutable session state and the ports behind it; all
/// mutation goes through these entry points. Cart state is independent of
/// catalog state, so a refresh can never drop cart contents.
pub struct PosEngine {
    catalog_api: CatalogApiBox,
    order_api: OrderApiBox,
    launcher: PaymentLauncherBox,
    config: CheckoutConfig,
    catalog: Catalog,
    selected_category: Option<CategoryId>,
    cart: Cart,
    status: PaymentStatus,
    sync: Option<SyncOutcome>,
    return_checked: bool,
}

impl PosEngine {
    pub fn new(
        catalog_api: CatalogApiBox,
        order_api: OrderApiBox,
        launcher: PaymentLauncherBox,
        config: CheckoutConfig,
    ) -> Self {
        Self {
            catalog_api,
            order_api,
            launcher,
            config,
            catalog: Catalog::default(),
            selected_category: None,
            cart: Cart::new(),
            status: PaymentStatus::Idle,
            sync: None,
            return_checked: false,
        }
    }

    /// Replaces the catalog wholesale; no incremental merge. Fetches are
    /// serialized by this method's exclusive borrow.
    pub async fn refresh_catalog(&mut self) {
        self.catalog = fetch_catalog(self.catalog_api.as_ref()).await;
    }

    pub fn select_category(&mut self, category: Option<CategoryId>) {
        self.selected_category = category;
    }

    /// The products visible under the current category selection.
    pub fn visible_products(&self) -> Vec<&Product> {
        filter_by_category(&self.catalog.products, self.selected_category)
    }

    pub fn categories(&self) -> &[Category] {
        &self.catalog.categories
    }

    /// Adds one unit of the product with `product_id` to the cart.
    pub fn add_to_cart(&mut self, product_id: u64) -> Result<()> {
        let product = self
            .catalog
            .products
            .iter()
            .find(|product| product.id == product_id)
            .ok_or_else(|| PosError::Validation(format!("unknown product id {product_id}")))?;
        self.cart.add(product)
    }

    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    pub fn status(&self) -> PaymentStatus {
        self.status
    }

    pub fn sync_outcome(&self) -> Option<&SyncOutcome> {
        self.sync.as_ref()
    }

    /// Starts a checkout: validates the cart, builds the deep link and hands
    /// control to the payment application.
    ///
    /// Fire-and-forget. The outcome only ever arrives through a later
    /// `handle_return`; local state stays untouched, so a session whose
    /// payment application never returns keeps its cart.
    pub fn start_checkout(&mut self) -> Result<Url> {
        let request = HandoffRequest::new(
            self.cart.total(),
            &self.config.currency,
            &self.config.return_origin,
        )?;
        let link = request.deep_link(&self.config.payment_scheme)?;
        tracing::info!(
            amount_minor = request.amount_minor,
            currency = %request.currency,
            "handing off to payment application"
        );
        self.launcher.launch(&link)?;
        Ok(link)
    }

    /// Reconciles a return from the payment application.
    ///
    /// Inspects the request URL's markers at most once per engine lifetime:
    /// a reload of the same URL leaves the cart, status and order sync
    /// alone. Returns the URL with the markers stripped, ready for the
    /// address surface.
    pub async fn handle_return(&mut self, request_url: &Url) -> Result<Url> {
        let cleaned = checkout::strip_return_markers(request_url);
        if self.return_checked {
            return Ok(cleaned);
        }
        self.return_checked = true;

        match checkout::return_signal(request_url) {
            Some(ReturnSignal::Success) => {
                self.status = PaymentStatus::Success;
                if self.cart.is_empty() {
                    tracing::warn!("success return with an empty cart; no order to sync");
                } else {
                    let order = NewOrder::from_cart(&self.cart);
                    self.cart.reset();
                    self.sync = Some(self.sync_order(order).await);
                }
            }
            Some(ReturnSignal::Failure) => {
                // Cart stays as-is so the operator can retry the checkout.
                self.status = PaymentStatus::Failed;
                tracing::info!("payment application reported failure");
            }
            None => {}
        }
        Ok(cleaned)
    }

    /// Posts the finalized order once. A failure is surfaced for manual
    /// reconciliation; the payment already succeeded, so the status is not
    /// demoted and the write is not retried.
    async fn sync_order(&self, order: NewOrder) -> SyncOutcome {
        match self.order_api.create_order(&order).await {
            Ok(created) => {
                tracing::info!(order_id = created.id, "order synced");
                SyncOutcome::Synced(created.id)
            }
            Err(err) => {
                tracing::error!("order sync failed after a successful payment: {err}");
                SyncOutcome::NeedsReconciliation(err.to_string())
            }
        }
    }

    /// Operator acknowledgement of a shown payment outcome ("back to POS").
    pub fn acknowledge_status(&mut self) {
        self.status = PaymentStatus::Idle;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::in_memory::InMemoryBackend;
    use crate::infrastructure::launcher::RecordingLauncher;
    use serde_json::json;

    fn sample_products() -> Vec<Product> {
        serde_json::from_value(json!([
            {"id": 101, "name": "espresso", "price": "2.50", "categories": [{"id": 1, "name": "drinks"}]},
            {"id": 102, "name": "brownie", "price": "3.00", "categories": [{"id": "2", "name": "food"}]},
        ]))
        .expect("valid products")
    }

    fn engine() -> PosEngine {
        let backend = InMemoryBackend::new(Vec::new(), sample_products());
        PosEngine::new(
            Box::new(backend.clone()),
            Box::new(backend),
            Box::new(RecordingLauncher::new()),
            CheckoutConfig::default(),
        )
    }

    #[tokio::test]
    async fn test_visible_products_follow_selection() {
        let mut engine = engine();
        engine.refresh_catalog().await;

        assert_eq!(engine.visible_products().len(), 2);
        engine.select_category(Some(CategoryId(2)));
        let visible: Vec<u64> = engine.visible_products().iter().map(|p| p.id).collect();
        assert_eq!(visible, vec![102]);
    }

    #[tokio::test]
    async fn test_add_to_cart_rejects_unknown_product() {
        let mut engine = engine();
        engine.refresh_catalog().await;

        let result = engine.add_to_cart(999);
        assert!(matches!(result, Err(PosError::Validation(_))));
        assert!(engine.cart().is_empty());
    }
}
