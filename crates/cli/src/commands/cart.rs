//! Cart commands.

use tracing::info;

use bazaar_core::ProductId;

use super::CliContext;

/// Add a product to the cart, resolving it through the catalog first.
///
/// # Errors
///
/// Returns an error if the product lookup fails; a failed remote mirror of
/// the add itself is logged and swallowed by the store.
pub async fn add(product_id: i64, quantity: u32) -> Result<(), Box<dyn std::error::Error>> {
    let ctx = CliContext::load()?;
    let product_id = ProductId::new(product_id);

    let product = ctx.gateway.product(product_id).await?;
    let name = product.name.clone();

    let mut cart = ctx.cart();
    cart.add_line(&ctx.session, product, quantity).await;

    info!("Added {quantity} x {name} to the cart");
    show_totals(&cart);

    Ok(())
}

/// Remove a product from the cart.
///
/// # Errors
///
/// Returns an error if configuration cannot be loaded.
pub async fn remove(product_id: i64) -> Result<(), Box<dyn std::error::Error>> {
    let ctx = CliContext::load()?;

    let mut cart = ctx.cart();
    cart.remove_line(&ctx.session, ProductId::new(product_id)).await;

    info!("Removed product {product_id}");
    show_totals(&cart);

    Ok(())
}

/// Set the quantity of a cart line; zero removes it.
///
/// # Errors
///
/// Returns an error if configuration cannot be loaded.
pub async fn set(product_id: i64, quantity: u32) -> Result<(), Box<dyn std::error::Error>> {
    let ctx = CliContext::load()?;

    let mut cart = ctx.cart();
    cart.set_quantity(&ctx.session, ProductId::new(product_id), quantity)
        .await;

    info!("Set product {product_id} quantity to {quantity}");
    show_totals(&cart);

    Ok(())
}

/// Show the cart contents and totals.
///
/// # Errors
///
/// Returns an error if configuration cannot be loaded.
pub fn show() -> Result<(), Box<dyn std::error::Error>> {
    let ctx = CliContext::load()?;
    let cart = ctx.cart();

    if cart.is_empty() {
        info!("Cart is empty");
        return Ok(());
    }

    for line in cart.lines() {
        info!(
            "  {} x {} @ {} = {}",
            line.quantity,
            if line.product.name.is_empty() {
                format!("product {}", line.product.id)
            } else {
                line.product.name.clone()
            },
            line.product.price,
            line.line_total()
        );
    }
    show_totals(&cart);

    Ok(())
}

/// Reconcile the cart with the remote store.
///
/// # Errors
///
/// Returns an error if configuration cannot be loaded or no session is
/// bound.
pub async fn sync() -> Result<(), Box<dyn std::error::Error>> {
    let ctx = CliContext::load()?;
    if !ctx.session.is_authenticated() {
        return Err("no session bound; run `bz-cli login` first".into());
    }

    let mut cart = ctx.cart();
    let report = cart.reconcile(&ctx.session).await;

    info!(
        "Synced: pushed {}, push failures {}, refreshed {}, {} line(s) now",
        report.pushed, report.push_failures, report.refreshed, report.lines
    );
    show_totals(&cart);

    Ok(())
}

fn show_totals(cart: &bazaar_client::CartStore) {
    info!(
        "Items: {}  Subtotal: {}  Discount: {}",
        cart.total_quantity(),
        cart.subtotal(),
        cart.total_discount()
    );
}
