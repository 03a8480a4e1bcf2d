use crate::domain::catalog::Product;
use crate::error::{PosError, Result};
use rust_decimal::Decimal;

/// A single cart entry. Repeated adds of the same product append repeated
/// entries; aggregation into quantity lines happens at order time.
#[derive(Debug, Clone, PartialEq)]
pub struct CartItem {
    pub product_id: u64,
    pub name: String,
    pub price: Decimal,
}

/// The session's cart ledger.
///
/// The running total is adjusted incrementally on every add and equals the
/// sum of the item prices after every operation; it returns to zero only at
/// reset. Never negative.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Cart {
    items: Vec<CartItem>,
    total: Decimal,
}

impl Cart {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds one unit of `product`.
    ///
    /// The backend delivers prices as decimal strings. A price that does not
    /// parse as a non-negative decimal rejects the add with `InvalidPrice`
    /// and leaves the cart untouched, rather than charging zero.
    pub fn add(&mut self, product: &Product) -> Result<()> {
        let price: Decimal = product
            .price
            .trim()
            .parse()
            .map_err(|_| invalid_price(product))?;
        if price < Decimal::ZERO {
            return Err(invalid_price(product));
        }
        self.items.push(CartItem {
            product_id: product.id,
            name: product.name.clone(),
            price,
        });
        self.total += price;
        Ok(())
    }

    /// Clears all items and zeroes the total.
    ///
    /// Called after a confirmed successful payment; nothing else empties the
    /// cart.
    pub fn reset(&mut self) {
        self.items.clear();
        self.total = Decimal::ZERO;
    }

    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    pub fn total(&self) -> Decimal {
        self.total
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

fn invalid_price(product: &Product) -> PosError {
    PosError::InvalidPrice(format!(
        "product {} has unusable price {:?}",
        product.id, product.price
    ))
}
