//! Cart store.
//!
//! Holds the authoritative (product, quantity) list for the current session.
//! Every mutation persists to the local store; when an identity is bound,
//! mutations are additionally mirrored to the remote cart best-effort, and a
//! login triggers [`CartStore::reconcile`]: push local lines, then let the
//! remote snapshot win wholesale.
//!
//! Remote failures never propagate out of the mutation methods; they are
//! logged and the local state stands in, per the storefront's
//! degrade-silently error model.

use rust_decimal::Decimal;
use tracing::instrument;

use bazaar_core::{CartLine, Product, ProductId, UserId};

use crate::gateway::GatewayClient;
use crate::session::SessionContext;
use crate::storage::{LocalStore, keys};

/// Outcome of a login-time reconciliation.
///
/// The push phase is best-effort; the report makes partial failure visible
/// to callers instead of hiding it behind an empty return.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SyncReport {
    /// Local lines successfully pushed to the remote cart.
    pub pushed: usize,
    /// Local lines whose push failed (ignored, remote wins anyway).
    pub push_failures: usize,
    /// Whether the post-push remote fetch succeeded. When false the local
    /// cart was reset to empty.
    pub refreshed: bool,
    /// Number of lines after reconciliation.
    pub lines: usize,
}

/// The session cart.
///
/// Mutations take `&mut self` and await every remote call before returning,
/// so remote completions can never interleave or arrive out of order for a
/// single store.
pub struct CartStore {
    lines: Vec<CartLine>,
    store: LocalStore,
    gateway: GatewayClient,
}

impl CartStore {
    /// Load the cart from the local store, starting empty if nothing (or
    /// nothing parseable) is persisted.
    #[must_use]
    pub fn load(store: LocalStore, gateway: GatewayClient) -> Self {
        let lines = store.get(keys::CART).unwrap_or_default();
        Self {
            lines,
            store,
            gateway,
        }
    }

    /// Current cart lines, in insertion order.
    #[must_use]
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    /// Whether the cart has no lines.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Whether the cart holds a line for `product_id`.
    #[must_use]
    pub fn contains(&self, product_id: ProductId) -> bool {
        self.lines.iter().any(|line| line.product.id == product_id)
    }

    /// Total quantity across all lines.
    #[must_use]
    pub fn total_quantity(&self) -> u32 {
        self.lines.iter().map(|line| line.quantity).sum()
    }

    /// Sum of `price × quantity` over all lines.
    #[must_use]
    pub fn subtotal(&self) -> Decimal {
        self.lines.iter().map(CartLine::line_total).sum()
    }

    /// Sum of `max(0, original_price − price) × quantity` over all lines.
    /// Always ≥ 0.
    #[must_use]
    pub fn total_discount(&self) -> Decimal {
        self.lines.iter().map(CartLine::line_discount).sum()
    }

    /// Add `quantity` of `product`, incrementing an existing line or
    /// appending a new one.
    ///
    /// Persists locally, then mirrors to the remote cart when an identity is
    /// bound. A remote failure is logged and swallowed; the local cart is
    /// already updated.
    #[instrument(skip(self, session, product), fields(product_id = %product.id))]
    pub async fn add_line(&mut self, session: &SessionContext, product: Product, quantity: u32) {
        if quantity == 0 {
            return;
        }

        let product_id = product.id;
        if let Some(line) = self.line_mut(product_id) {
            line.quantity += quantity;
        } else {
            self.lines.push(CartLine::new(product, quantity));
        }
        self.persist();

        if let Some(user_id) = session.user_id()
            && let Err(e) = self.gateway.add_cart_item(user_id, product_id, quantity).await
        {
            tracing::warn!(%product_id, error = %e, "failed to mirror cart add remotely");
        }
    }

    /// Remove the line for `product_id`.
    ///
    /// Identity bound: issues the remote delete, then replaces local state
    /// with the server's post-delete view. Anonymous: mutates the local list
    /// directly.
    #[instrument(skip(self, session), fields(product_id = %product_id))]
    pub async fn remove_line(&mut self, session: &SessionContext, product_id: ProductId) {
        if let Some(user_id) = session.user_id() {
            if let Err(e) = self.gateway.remove_cart_item(user_id, product_id).await {
                tracing::warn!(%product_id, error = %e, "remote cart delete failed");
            }
            self.refresh_from_remote(user_id).await;
            return;
        }

        self.lines.retain(|line| line.product.id != product_id);
        self.persist();
    }

    /// Set the quantity for `product_id`. A quantity of zero removes the
    /// line. Setting a quantity for a product not in the cart is a no-op.
    #[instrument(skip(self, session), fields(product_id = %product_id))]
    pub async fn set_quantity(
        &mut self,
        session: &SessionContext,
        product_id: ProductId,
        quantity: u32,
    ) {
        if quantity == 0 {
            self.remove_line(session, product_id).await;
            return;
        }

        if let Some(user_id) = session.user_id() {
            if let Err(e) = self
                .gateway
                .set_cart_item_quantity(user_id, product_id, quantity)
                .await
            {
                tracing::warn!(%product_id, error = %e, "remote quantity update failed");
            }
            self.refresh_from_remote(user_id).await;
            return;
        }

        if let Some(line) = self.line_mut(product_id) {
            line.quantity = quantity;
            self.persist();
        }
    }

    /// Empty the cart and persist.
    pub fn clear(&mut self) {
        self.lines.clear();
        self.persist();
    }

    /// Reconcile with the remote cart after the session transitions to
    /// authenticated.
    ///
    /// Pushes every local line sequentially (per-item failures are logged
    /// and counted, not retried), then fetches the remote cart and replaces
    /// local state with it. Last writer wins; after login the remote store
    /// is the source of truth, so a partial push still ends consistent once
    /// the fetch lands.
    ///
    /// Anonymous sessions get an empty report back unchanged.
    #[instrument(skip(self, session))]
    pub async fn reconcile(&mut self, session: &SessionContext) -> SyncReport {
        let Some(user_id) = session.user_id() else {
            return SyncReport::default();
        };

        let mut report = SyncReport::default();
        for line in &self.lines {
            match self
                .gateway
                .add_cart_item(user_id, line.product.id, line.quantity)
                .await
            {
                Ok(()) => report.pushed += 1,
                Err(e) => {
                    report.push_failures += 1;
                    tracing::warn!(
                        product_id = %line.product.id,
                        error = %e,
                        "failed to push local cart line, remote snapshot wins"
                    );
                }
            }
        }

        report.refreshed = self.refresh_from_remote(user_id).await;
        report.lines = self.lines.len();
        report
    }

    /// Replace local state with the remote cart.
    ///
    /// Each remote line's product id is resolved against the catalog; a
    /// failed lookup substitutes a placeholder product so the quantity is
    /// not dropped. A failed fetch resets the cart to empty - the remote
    /// store is authoritative once an identity is bound.
    async fn refresh_from_remote(&mut self, user_id: UserId) -> bool {
        let remote = match self.gateway.cart(user_id).await {
            Ok(remote) => remote,
            Err(e) => {
                tracing::warn!(%user_id, error = %e, "failed to fetch remote cart");
                self.lines.clear();
                self.persist();
                return false;
            }
        };

        let mut lines = Vec::with_capacity(remote.items.len());
        for item in &remote.items {
            let product = match self.gateway.product(item.product_id).await {
                Ok(product) => product,
                Err(e) => {
                    tracing::warn!(
                        product_id = %item.product_id,
                        error = %e,
                        "product lookup failed, substituting placeholder"
                    );
                    Product::placeholder(item.product_id)
                }
            };
            lines.push(CartLine::new(product, item.effective_quantity()));
        }

        self.lines = lines;
        self.persist();
        true
    }

    fn line_mut(&mut self, product_id: ProductId) -> Option<&mut CartLine> {
        self.lines
            .iter_mut()
            .find(|line| line.product.id == product_id)
    }

    fn persist(&self) {
        if let Err(e) = self.store.set(keys::CART, &self.lines) {
            tracing::warn!(error = %e, "failed to persist cart");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GatewayConfig;
    use std::time::Duration;
    use url::Url;

    fn gateway() -> GatewayClient {
        // Never contacted by anonymous-session paths.
        GatewayClient::new(&GatewayConfig {
            base_url: Url::parse("http://127.0.0.1:1").unwrap(),
            timeout: Duration::from_millis(100),
        })
    }

    fn store() -> (tempfile::TempDir, LocalStore) {
        let dir = tempfile::tempdir().unwrap();
        let store = LocalStore::open(dir.path()).unwrap();
        (dir, store)
    }

    fn product(id: i64, price: i64, original: Option<i64>) -> Product {
        Product {
            id: ProductId::new(id),
            name: format!("Product {id}"),
            price: Decimal::from(price),
            original_price: original.map(Decimal::from),
            images: Vec::new(),
        }
    }

    #[tokio::test]
    async fn add_increments_existing_line() {
        let (_dir, store) = store();
        let mut cart = CartStore::load(store, gateway());
        let session = SessionContext::anonymous();

        cart.add_line(&session, product(1, 1000, None), 1).await;
        cart.add_line(&session, product(1, 1000, None), 2).await;

        assert_eq!(cart.lines().len(), 1);
        assert_eq!(cart.total_quantity(), 3);
        assert_eq!(cart.subtotal(), Decimal::from(3000));
    }

    #[tokio::test]
    async fn subtotal_tracks_surviving_lines() {
        let (_dir, store) = store();
        let mut cart = CartStore::load(store, gateway());
        let session = SessionContext::anonymous();

        cart.add_line(&session, product(1, 1000, None), 2).await;
        cart.add_line(&session, product(2, 250, None), 4).await;
        cart.remove_line(&session, ProductId::new(1)).await;
        cart.set_quantity(&session, ProductId::new(2), 2).await;

        assert_eq!(cart.subtotal(), Decimal::from(500));
        assert_eq!(cart.total_quantity(), 2);
    }

    #[tokio::test]
    async fn set_quantity_zero_equals_remove() {
        let (_dir, store) = store();
        let mut cart = CartStore::load(store, gateway());
        let session = SessionContext::anonymous();

        cart.add_line(&session, product(1, 1000, None), 5).await;
        cart.set_quantity(&session, ProductId::new(1), 0).await;

        assert!(cart.is_empty());
        assert!(!cart.contains(ProductId::new(1)));
    }

    #[tokio::test]
    async fn discount_is_zero_without_original_prices() {
        let (_dir, store) = store();
        let mut cart = CartStore::load(store, gateway());
        let session = SessionContext::anonymous();

        cart.add_line(&session, product(1, 1000, None), 2).await;
        assert_eq!(cart.total_discount(), Decimal::ZERO);

        cart.add_line(&session, product(2, 1000, Some(1500)), 2).await;
        assert_eq!(cart.total_discount(), Decimal::from(1000));
    }

    #[tokio::test]
    async fn persists_across_reload() {
        let (_dir, store) = store();
        let session = SessionContext::anonymous();

        let mut cart = CartStore::load(store.clone(), gateway());
        cart.add_line(&session, product(1, 1000, None), 2).await;
        drop(cart);

        let cart = CartStore::load(store, gateway());
        assert_eq!(cart.total_quantity(), 2);
        assert_eq!(cart.subtotal(), Decimal::from(2000));
    }

    #[tokio::test]
    async fn clear_empties_and_persists() {
        let (_dir, store) = store();
        let session = SessionContext::anonymous();

        let mut cart = CartStore::load(store.clone(), gateway());
        cart.add_line(&session, product(1, 1000, None), 2).await;
        cart.clear();

        assert!(cart.is_empty());
        let reloaded = CartStore::load(store, gateway());
        assert!(reloaded.is_empty());
    }

    #[tokio::test]
    async fn reconcile_is_a_no_op_for_anonymous_sessions() {
        let (_dir, store) = store();
        let mut cart = CartStore::load(store, gateway());
        let session = SessionContext::anonymous();

        cart.add_line(&session, product(1, 1000, None), 1).await;
        let report = cart.reconcile(&session).await;

        assert_eq!(report, SyncReport::default());
        assert_eq!(cart.total_quantity(), 1);
    }

    #[tokio::test]
    async fn set_quantity_for_absent_product_is_a_no_op() {
        let (_dir, store) = store();
        let mut cart = CartStore::load(store, gateway());
        let session = SessionContext::anonymous();

        cart.set_quantity(&session, ProductId::new(9), 3).await;
        assert!(cart.is_empty());
    }
}
