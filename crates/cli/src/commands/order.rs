//! Order commands.

use tracing::info;

use bazaar_client::{OrderAssembler, ProfileService};
use bazaar_core::OrderId;

use super::CliContext;

/// Place an order from the current cart.
///
/// Uses the default (or first) shipping address and payment method on file:
/// the stored profile for a bound session, falling back to the gateway's
/// profile collections.
///
/// # Errors
///
/// Returns an error if the cart is empty, no address or payment method is
/// on file, or the remote submission fails.
pub async fn place() -> Result<(), Box<dyn std::error::Error>> {
    let ctx = CliContext::load()?;
    let mut cart = ctx.cart();
    if cart.is_empty() {
        return Err("cart is empty".into());
    }

    let profile = ProfileService::new(ctx.gateway.clone());

    let mut addresses = ctx
        .auth
        .current_user()
        .map(|user| user.addresses)
        .unwrap_or_default();
    if addresses.is_empty() {
        addresses = profile.addresses(&ctx.session).await;
    }
    let address = pick_default(addresses, |a| a.is_default)
        .ok_or("no shipping address on file; add one first")?;

    let mut methods = ctx
        .auth
        .current_user()
        .map(|user| user.payment_methods)
        .unwrap_or_default();
    if methods.is_empty() {
        methods = profile.payment_methods(&ctx.session).await;
    }
    let payment = pick_default(methods, |m| m.is_default)
        .ok_or("no payment method on file; add one first")?;

    let assembler = OrderAssembler::new(ctx.store.clone(), ctx.gateway.clone());
    let order = assembler
        .create_order(&mut cart, &ctx.session, address, payment)
        .await?;

    info!("Placed order {} ({})", order.id, order.status);
    info!(
        "  Subtotal: {}  Shipping: {}  Tax: {}  Discount: {}  Total: {}",
        order.subtotal, order.shipping, order.tax, order.discount, order.total
    );
    info!("  Estimated delivery: {}", order.estimated_delivery);

    Ok(())
}

/// List order history.
///
/// # Errors
///
/// Returns an error if configuration cannot be loaded.
pub fn list() -> Result<(), Box<dyn std::error::Error>> {
    let ctx = CliContext::load()?;
    let assembler = OrderAssembler::new(ctx.store.clone(), ctx.gateway.clone());

    let orders = assembler.list_orders(&ctx.session);
    if orders.is_empty() {
        info!("No orders");
        return Ok(());
    }

    for order in orders {
        info!(
            "{}  {}  {} item(s)  total {}",
            order.id,
            order.status,
            order.item_count(),
            order.total
        );
    }

    Ok(())
}

/// Cancel an order by id.
///
/// # Errors
///
/// Returns an error if the order cannot be cancelled (unknown id or status
/// past confirmation).
pub fn cancel(order_id: &str) -> Result<(), Box<dyn std::error::Error>> {
    let ctx = CliContext::load()?;
    let assembler = OrderAssembler::new(ctx.store.clone(), ctx.gateway.clone());

    let order_id = OrderId::from(order_id);
    if assembler.cancel_order(&ctx.session, &order_id) {
        info!("Cancelled {order_id}");
        Ok(())
    } else {
        Err(format!("{order_id} cannot be cancelled (unknown, or already past confirmation)").into())
    }
}

fn pick_default<T: Clone>(items: Vec<T>, is_default: impl Fn(&T) -> bool) -> Option<T> {
    items
        .iter()
        .find(|item| is_default(item))
        .cloned()
        .or_else(|| items.into_iter().next())
}
