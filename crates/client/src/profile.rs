//! Remote profile collections.
//!
//! Gateway CRUD for addresses, payment methods, and the wishlist. Every
//! read degrades to empty and every write to a boolean on gateway failure,
//! with a warning; callers keep working against whatever state the gateway
//! last confirmed.

use tracing::instrument;

use bazaar_core::{Address, AddressId, PaymentMethod, ProductId};

use crate::gateway::GatewayClient;
use crate::session::SessionContext;

/// Address, payment-method, and wishlist CRUD against the gateway.
///
/// All operations require a bound identity; anonymous sessions get the
/// neutral fallback immediately.
#[derive(Clone)]
pub struct ProfileService {
    gateway: GatewayClient,
}

impl ProfileService {
    /// Create a profile service over the given gateway.
    #[must_use]
    pub const fn new(gateway: GatewayClient) -> Self {
        Self { gateway }
    }

    /// List the user's addresses. Empty for anonymous sessions or on
    /// gateway failure.
    #[instrument(skip_all)]
    pub async fn addresses(&self, session: &SessionContext) -> Vec<Address> {
        let Some(user_id) = session.user_id() else {
            return Vec::new();
        };
        match self.gateway.addresses(user_id).await {
            Ok(addresses) => addresses,
            Err(e) => {
                tracing::warn!(%user_id, error = %e, "failed to fetch addresses");
                Vec::new()
            }
        }
    }

    /// Create an address, returning the gateway's stored copy.
    #[instrument(skip(self, session, address))]
    pub async fn add_address(
        &self,
        session: &SessionContext,
        address: &Address,
    ) -> Option<Address> {
        let user_id = session.user_id()?;
        match self.gateway.create_address(user_id, address).await {
            Ok(stored) => Some(stored),
            Err(e) => {
                tracing::warn!(%user_id, error = %e, "failed to create address");
                None
            }
        }
    }

    /// Delete an address. Returns whether the gateway confirmed.
    #[instrument(skip(self, session))]
    pub async fn delete_address(&self, session: &SessionContext, address_id: AddressId) -> bool {
        let Some(user_id) = session.user_id() else {
            return false;
        };
        match self.gateway.delete_address(user_id, address_id).await {
            Ok(()) => true,
            Err(e) => {
                tracing::warn!(%user_id, %address_id, error = %e, "failed to delete address");
                false
            }
        }
    }

    /// List the user's payment methods. Empty for anonymous sessions or on
    /// gateway failure.
    #[instrument(skip_all)]
    pub async fn payment_methods(&self, session: &SessionContext) -> Vec<PaymentMethod> {
        let Some(user_id) = session.user_id() else {
            return Vec::new();
        };
        match self.gateway.payment_methods(user_id).await {
            Ok(methods) => methods,
            Err(e) => {
                tracing::warn!(%user_id, error = %e, "failed to fetch payment methods");
                Vec::new()
            }
        }
    }

    /// Register a tokenized payment method.
    #[instrument(skip(self, session, token))]
    pub async fn add_payment_method(
        &self,
        session: &SessionContext,
        provider: &str,
        token: &str,
    ) -> Option<PaymentMethod> {
        let user_id = session.user_id()?;
        match self
            .gateway
            .create_payment_method(user_id, provider, token)
            .await
        {
            Ok(stored) => Some(stored),
            Err(e) => {
                tracing::warn!(%user_id, provider, error = %e, "failed to add payment method");
                None
            }
        }
    }

    /// The user's wishlist as product ids. Empty for anonymous sessions or
    /// on gateway failure.
    #[instrument(skip_all)]
    pub async fn wishlist(&self, session: &SessionContext) -> Vec<ProductId> {
        let Some(user_id) = session.user_id() else {
            return Vec::new();
        };
        match self.gateway.wishlist(user_id).await {
            Ok(items) => items.into_iter().map(|item| item.product_id).collect(),
            Err(e) => {
                tracing::warn!(%user_id, error = %e, "failed to fetch wishlist");
                Vec::new()
            }
        }
    }

    /// Add a product to the wishlist. Returns whether the gateway confirmed.
    #[instrument(skip(self, session))]
    pub async fn add_to_wishlist(&self, session: &SessionContext, product_id: ProductId) -> bool {
        let Some(user_id) = session.user_id() else {
            return false;
        };
        match self.gateway.add_to_wishlist(user_id, product_id).await {
            Ok(()) => true,
            Err(e) => {
                tracing::warn!(%user_id, %product_id, error = %e, "failed to add to wishlist");
                false
            }
        }
    }

    /// Remove a product from the wishlist. Returns whether the gateway
    /// confirmed.
    #[instrument(skip(self, session))]
    pub async fn remove_from_wishlist(
        &self,
        session: &SessionContext,
        product_id: ProductId,
    ) -> bool {
        let Some(user_id) = session.user_id() else {
            return false;
        };
        match self.gateway.remove_from_wishlist(user_id, product_id).await {
            Ok(()) => true,
            Err(e) => {
                tracing::warn!(%user_id, %product_id, error = %e, "failed to remove from wishlist");
                false
            }
        }
    }
}
