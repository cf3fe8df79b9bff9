//! Wire types for the gateway's REST responses.
//!
//! Kept separate from the domain types: the gateway's cart knows only
//! product ids and quantities, and the cart store resolves those against the
//! catalog before they become [`bazaar_core::CartLine`]s.

use serde::Deserialize;

use bazaar_core::ProductId;

/// The remote cart: `GET /cart/{userId}`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RemoteCart {
    #[serde(default)]
    pub items: Vec<RemoteCartItem>,
}

/// One remote cart entry.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoteCartItem {
    pub product_id: ProductId,
    #[serde(default)]
    pub quantity: u32,
}

impl RemoteCartItem {
    /// Effective quantity: the gateway occasionally omits or zeroes the
    /// field, which is read as a single unit.
    #[must_use]
    pub const fn effective_quantity(&self) -> u32 {
        if self.quantity == 0 { 1 } else { self.quantity }
    }
}

/// One wishlist entry: `GET /users/{userId}/wishlist`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WishlistItem {
    pub product_id: ProductId,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn remote_cart_defaults_to_empty() {
        let cart: RemoteCart = serde_json::from_str("{}").unwrap();
        assert!(cart.items.is_empty());
    }

    #[test]
    fn zero_quantity_reads_as_one() {
        let item: RemoteCartItem =
            serde_json::from_str(r#"{"productId": 3}"#).unwrap();
        assert_eq!(item.quantity, 0);
        assert_eq!(item.effective_quantity(), 1);
    }
}
