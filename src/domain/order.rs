use crate::domain::cart::Cart;
use serde::{Deserialize, Serialize};

const PAYMENT_METHOD: &str = "card_terminal";
const PAYMENT_METHOD_TITLE: &str = "Card payment terminal";

/// One aggregated order line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderLine {
    pub product_id: u64,
    pub quantity: u32,
}

/// Finalized-order payload for the backend's order-creation endpoint.
///
/// The order is marked paid up front: by the time this payload exists, the
/// payment application has already captured the money.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewOrder {
    pub payment_method: String,
    pub payment_method_title: String,
    pub set_paid: bool,
    pub line_items: Vec<OrderLine>,
}

impl NewOrder {
    /// Snapshots `cart` as a paid order.
    ///
    /// Repeated entries for one product collapse into a single line with the
    /// summed quantity; first-seen order is preserved.
    pub fn from_cart(cart: &Cart) -> Self {
        let mut line_items: Vec<OrderLine> = Vec::new();
        for item in cart.items() {
            if let Some(line) = line_items
                .iter_mut()
                .find(|line| line.product_id == item.product_id)
            {
                line.quantity += 1;
            } else {
                line_items.push(OrderLine {
                    product_id: item.product_id,
                    quantity: 1,
                });
            }
        }
        Self {
            payment_method: PAYMENT_METHOD.to_string(),
            payment_method_title: PAYMENT_METHOD_TITLE.to_string(),
            set_paid: true,
            line_items,
        }
    }
}

/// The backend's representation of a created order, reduced to what the
/// terminal reports back to the operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct CreatedOrder {
    pub id: u64,
}

/// Outcome of the post-payment order write.
///
/// Kept apart from `PaymentStatus`: a failed write after a captured payment
/// is a reconciliation problem, not a payment failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyncOutcome {
    Synced(u64),
    NeedsReconciliation(String),
}
