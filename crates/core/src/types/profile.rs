//! Stored user profile.

use serde::{Deserialize, Serialize};

use super::{Address, Email, Order, PaymentMethod, ProductId, UserId};

/// The authenticated user's profile as persisted in the session store.
///
/// Order history lives on the profile: the gateway's server-confirmed orders
/// are appended here after submission, and cancellations rewrite the entry
/// in place.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub id: UserId,
    pub email: Email,
    pub name: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub avatar: String,
    #[serde(default)]
    pub addresses: Vec<Address>,
    #[serde(default)]
    pub payment_methods: Vec<PaymentMethod>,
    #[serde(default)]
    pub orders: Vec<Order>,
    #[serde(default)]
    pub wishlist: Vec<ProductId>,
}

impl UserProfile {
    /// Create a profile with empty collections.
    #[must_use]
    pub fn new(id: UserId, email: Email, name: impl Into<String>) -> Self {
        Self {
            id,
            email,
            name: name.into(),
            phone: String::new(),
            avatar: String::new(),
            addresses: Vec::new(),
            payment_methods: Vec::new(),
            orders: Vec::new(),
            wishlist: Vec::new(),
        }
    }

    /// Whether the wishlist contains a product.
    #[must_use]
    pub fn has_wished(&self, product_id: ProductId) -> bool {
        self.wishlist.contains(&product_id)
    }
}
