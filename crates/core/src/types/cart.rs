//! Cart line item.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::Product;

/// One (product, quantity) pair in the cart.
///
/// Quantity is always positive; a quantity reaching zero removes the line
/// instead. The product is a snapshot, not a live catalog reference.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartLine {
    pub product: Product,
    pub quantity: u32,
}

impl CartLine {
    /// Create a new cart line.
    #[must_use]
    pub const fn new(product: Product, quantity: u32) -> Self {
        Self { product, quantity }
    }

    /// Line subtotal: `price × quantity`.
    #[must_use]
    pub fn line_total(&self) -> Decimal {
        self.product.price * Decimal::from(self.quantity)
    }

    /// Line discount: `max(0, original_price − price) × quantity`.
    #[must_use]
    pub fn line_discount(&self) -> Decimal {
        self.product.unit_discount() * Decimal::from(self.quantity)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ProductId;

    fn product(price: i64, original: Option<i64>) -> Product {
        Product {
            id: ProductId::new(1),
            name: "Test".to_string(),
            price: Decimal::from(price),
            original_price: original.map(Decimal::from),
            images: Vec::new(),
        }
    }

    #[test]
    fn line_total_scales_with_quantity() {
        let line = CartLine::new(product(1000, None), 3);
        assert_eq!(line.line_total(), Decimal::from(3000));
        assert_eq!(line.line_discount(), Decimal::ZERO);
    }

    #[test]
    fn line_discount_scales_with_quantity() {
        let line = CartLine::new(product(1000, Some(1500)), 2);
        assert_eq!(line.line_discount(), Decimal::from(1000));
    }
}
