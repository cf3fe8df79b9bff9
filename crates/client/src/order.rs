//! Order assembler.
//!
//! Snapshots the cart into an immutable order, computes the financial
//! totals, and persists the result: to the gateway when an identity is
//! bound, to the local order list otherwise. Also serves order history and
//! the one client-side status transition, user cancellation.

use chrono::{Days, Utc};
use rust_decimal::Decimal;
use tracing::instrument;

use bazaar_core::{
    Address, Order, OrderId, OrderItem, OrderStatus, PaymentMethod, UserProfile,
};

use crate::cart::CartStore;
use crate::gateway::{GatewayClient, GatewayError};
use crate::session::SessionContext;
use crate::storage::{LocalStore, keys};

/// Orders at or below this subtotal pay the flat shipping fee; strictly
/// above it ships free. Unit-less, same unit as product prices.
const FREE_SHIPPING_THRESHOLD: u32 = 50_000;
const FLAT_SHIPPING_FEE: u32 = 500;

/// Tax applied to the subtotal (18% GST).
const TAX_RATE_PERCENT: i64 = 18;

/// Days from order placement to estimated delivery.
const DELIVERY_DAYS: u64 = 7;

/// Builds, persists, and manages orders.
#[derive(Clone)]
pub struct OrderAssembler {
    store: LocalStore,
    gateway: GatewayClient,
}

impl OrderAssembler {
    /// Create an order assembler over the given store and gateway.
    #[must_use]
    pub const fn new(store: LocalStore, gateway: GatewayClient) -> Self {
        Self { store, gateway }
    }

    /// Create an order from the cart's current contents.
    ///
    /// Line items capture name, price, and image at order time. Totals:
    /// shipping is 0 above the free-shipping threshold (exclusive boundary),
    /// else the flat fee; tax is 18% of the subtotal; the cart discount is
    /// subtracted at the end.
    ///
    /// Identity bound: submits to the gateway, clears the cart, and appends
    /// the server-confirmed order to the stored profile's history (profile
    /// write failures are logged and swallowed). Anonymous: appends to the
    /// local order list and returns the locally constructed order.
    ///
    /// # Errors
    ///
    /// Returns `GatewayError` if the remote submission fails; the cart is
    /// left untouched in that case. The anonymous path does not fail.
    #[instrument(skip_all)]
    pub async fn create_order(
        &self,
        cart: &mut CartStore,
        session: &SessionContext,
        shipping_address: Address,
        payment_method: PaymentMethod,
    ) -> Result<Order, GatewayError> {
        let items: Vec<OrderItem> = cart
            .lines()
            .iter()
            .map(|line| OrderItem {
                product_id: line.product.id,
                product_name: line.product.name.clone(),
                product_image: line
                    .product
                    .primary_image()
                    .unwrap_or_default()
                    .to_string(),
                quantity: line.quantity,
                price: line.product.price,
                total: line.line_total(),
            })
            .collect();

        let subtotal = cart.subtotal();
        let shipping = shipping_fee(subtotal);
        let tax = subtotal * Decimal::new(TAX_RATE_PERCENT, 2);
        let discount = cart.total_discount();
        let total = subtotal + shipping + tax - discount;

        let placed_at = Utc::now();
        let estimated_delivery = placed_at
            .date_naive()
            .checked_add_days(Days::new(DELIVERY_DAYS))
            .unwrap_or_else(|| placed_at.date_naive());

        let order = Order {
            id: OrderId::from_timestamp_millis(placed_at.timestamp_millis()),
            placed_at,
            status: OrderStatus::Pending,
            items,
            subtotal,
            shipping,
            tax,
            discount,
            total,
            shipping_address,
            payment_method,
            tracking_number: String::new(),
            estimated_delivery,
        };

        if session.is_authenticated() {
            let confirmed = self.gateway.submit_order(&order).await?;
            cart.clear();
            self.append_to_profile_history(confirmed.clone());
            return Ok(confirmed);
        }

        let mut orders: Vec<Order> = self.store.get(keys::ORDERS).unwrap_or_default();
        orders.push(order.clone());
        if let Err(e) = self.store.set(keys::ORDERS, &orders) {
            tracing::warn!(order_id = %order.id, error = %e, "failed to persist local order");
        }
        cart.clear();
        Ok(order)
    }

    /// Order history: the stored profile's orders when an identity is
    /// bound, else the local list.
    #[must_use]
    pub fn list_orders(&self, session: &SessionContext) -> Vec<Order> {
        if session.is_authenticated() {
            return self
                .store
                .get::<UserProfile>(keys::USER)
                .map(|profile| profile.orders)
                .unwrap_or_default();
        }
        self.store.get(keys::ORDERS).unwrap_or_default()
    }

    /// Find an order by id in the profile history (when bound) or the local
    /// list.
    #[must_use]
    pub fn find_order(&self, session: &SessionContext, order_id: &OrderId) -> Option<Order> {
        if session.is_authenticated()
            && let Some(profile) = self.store.get::<UserProfile>(keys::USER)
            && let Some(order) = profile.orders.into_iter().find(|o| &o.id == order_id)
        {
            return Some(order);
        }

        self.store
            .get::<Vec<Order>>(keys::ORDERS)
            .unwrap_or_default()
            .into_iter()
            .find(|o| &o.id == order_id)
    }

    /// Cancel an order.
    ///
    /// Permitted only while the status is pending or confirmed; any other
    /// status leaves the order untouched and returns `false`. Checks the
    /// profile history first when an identity is bound, then the local
    /// list.
    #[instrument(skip(self, session), fields(order_id = %order_id))]
    pub fn cancel_order(&self, session: &SessionContext, order_id: &OrderId) -> bool {
        if session.is_authenticated() && self.cancel_in_profile(order_id) {
            return true;
        }
        self.cancel_in_local(order_id)
    }

    fn cancel_in_profile(&self, order_id: &OrderId) -> bool {
        let Some(mut profile) = self.store.get::<UserProfile>(keys::USER) else {
            return false;
        };
        let Some(order) = profile.orders.iter_mut().find(|o| &o.id == order_id) else {
            return false;
        };
        if !order.status.is_cancellable() {
            return false;
        }

        order.status = OrderStatus::Cancelled;
        match self.store.set(keys::USER, &profile) {
            Ok(()) => true,
            Err(e) => {
                tracing::warn!(%order_id, error = %e, "failed to persist cancellation");
                false
            }
        }
    }

    fn cancel_in_local(&self, order_id: &OrderId) -> bool {
        let mut orders: Vec<Order> = self.store.get(keys::ORDERS).unwrap_or_default();
        let Some(order) = orders.iter_mut().find(|o| &o.id == order_id) else {
            return false;
        };
        if !order.status.is_cancellable() {
            return false;
        }

        order.status = OrderStatus::Cancelled;
        match self.store.set(keys::ORDERS, &orders) {
            Ok(()) => true,
            Err(e) => {
                tracing::warn!(%order_id, error = %e, "failed to persist cancellation");
                false
            }
        }
    }

    /// Append a server-confirmed order to the stored profile's history.
    /// Best-effort: a missing profile or a write failure is logged, not
    /// surfaced.
    fn append_to_profile_history(&self, order: Order) {
        let Some(mut profile) = self.store.get::<UserProfile>(keys::USER) else {
            tracing::warn!(order_id = %order.id, "no stored profile to record order against");
            return;
        };
        let order_id = order.id.clone();
        profile.orders.push(order);
        if let Err(e) = self.store.set(keys::USER, &profile) {
            tracing::warn!(%order_id, error = %e, "failed to record order in profile history");
        }
    }
}

/// Shipping fee for a subtotal: free strictly above the threshold, the flat
/// fee at or below it.
fn shipping_fee(subtotal: Decimal) -> Decimal {
    if subtotal > Decimal::from(FREE_SHIPPING_THRESHOLD) {
        Decimal::ZERO
    } else {
        Decimal::from(FLAT_SHIPPING_FEE)
    }
}
