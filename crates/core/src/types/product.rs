//! Catalog product as seen by the client.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::ProductId;

/// A catalog product.
///
/// Field names follow the gateway's camelCase JSON. `original_price` is the
/// pre-discount price when the product is on sale; the per-line discount is
/// `max(0, original_price - price)`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: ProductId,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub price: Decimal,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub original_price: Option<Decimal>,
    #[serde(default)]
    pub images: Vec<String>,
}

impl Product {
    /// Minimal stand-in for a product whose catalog lookup failed.
    ///
    /// Carries only the id; name, price, and images are empty. Used when a
    /// remote cart references a product the catalog no longer returns.
    #[must_use]
    pub fn placeholder(id: ProductId) -> Self {
        Self {
            id,
            name: String::new(),
            price: Decimal::ZERO,
            original_price: None,
            images: Vec::new(),
        }
    }

    /// The product's primary image URL, if it has one.
    #[must_use]
    pub fn primary_image(&self) -> Option<&str> {
        self.images.first().map(String::as_str)
    }

    /// Discount per unit: `max(0, original_price - price)`.
    #[must_use]
    pub fn unit_discount(&self) -> Decimal {
        self.original_price
            .map_or(Decimal::ZERO, |original| (original - self.price).max(Decimal::ZERO))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unit_discount_never_negative() {
        let mut product = Product::placeholder(ProductId::new(1));
        product.price = Decimal::from(100);

        assert_eq!(product.unit_discount(), Decimal::ZERO);

        product.original_price = Some(Decimal::from(150));
        assert_eq!(product.unit_discount(), Decimal::from(50));

        // original below current price clamps to zero
        product.original_price = Some(Decimal::from(80));
        assert_eq!(product.unit_discount(), Decimal::ZERO);
    }

    #[test]
    fn deserializes_camel_case() {
        let product: Product = serde_json::from_str(
            r#"{"id": 7, "name": "Clay Teapot", "price": "1000", "originalPrice": "1500"}"#,
        )
        .unwrap();
        assert_eq!(product.id, ProductId::new(7));
        assert_eq!(product.original_price, Some(Decimal::from(1500)));
        assert!(product.images.is_empty());
    }
}
