//! API gateway REST client.
//!
//! Thin typed wrapper over the gateway's fixed REST contract. Catalog reads
//! are cached with `moka` (5-minute TTL); cart and order calls are never
//! cached, they touch mutable server state.

pub mod types;

use std::sync::Arc;
use std::time::Duration;

use moka::future::Cache;
use reqwest::{Method, StatusCode};
use serde::Serialize;
use serde::de::DeserializeOwned;
use thiserror::Error;
use tracing::{debug, instrument};

use bazaar_core::{Address, AddressId, Order, PaymentMethod, Product, ProductId, UserId};

use crate::config::GatewayConfig;
use types::{RemoteCart, WishlistItem};

/// How long catalog reads stay cached.
const PRODUCT_CACHE_TTL: Duration = Duration::from_secs(300);
const PRODUCT_CACHE_CAPACITY: u64 = 1000;

/// How much response body to include in error logs.
const LOGGED_BODY_LIMIT: usize = 500;

/// Errors that can occur when talking to the gateway.
#[derive(Debug, Error)]
pub enum GatewayError {
    /// HTTP request failed (connect, timeout, body read).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Gateway returned a non-success status.
    #[error("gateway returned {status} for {path}")]
    Status { status: StatusCode, path: String },

    /// Response body could not be parsed.
    #[error("response parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// Resource not found.
    #[error("not found: {0}")]
    NotFound(String),
}

/// Client for the Bazaar API gateway.
///
/// Cheaply cloneable via `Arc`; clones share the HTTP connection pool and
/// the product cache.
#[derive(Clone)]
pub struct GatewayClient {
    inner: Arc<GatewayClientInner>,
}

struct GatewayClientInner {
    client: reqwest::Client,
    base_url: String,
    timeout: Duration,
    products: Cache<i64, Product>,
}

impl GatewayClient {
    /// Create a new gateway client.
    #[must_use]
    pub fn new(config: &GatewayConfig) -> Self {
        let products = Cache::builder()
            .max_capacity(PRODUCT_CACHE_CAPACITY)
            .time_to_live(PRODUCT_CACHE_TTL)
            .build();

        Self {
            inner: Arc::new(GatewayClientInner {
                client: reqwest::Client::new(),
                base_url: config.base_url.as_str().trim_end_matches('/').to_string(),
                timeout: config.timeout,
                products,
            }),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{path}", self.inner.base_url)
    }

    /// Send a request and return the response body on success.
    ///
    /// Body is read as text before parsing so failures can be logged with
    /// context.
    async fn send(
        &self,
        method: Method,
        path: &str,
        query: &[(&str, String)],
        body: Option<&impl Serialize>,
    ) -> Result<String, GatewayError> {
        let mut request = self
            .inner
            .client
            .request(method, self.url(path))
            .timeout(self.inner.timeout);

        if !query.is_empty() {
            request = request.query(query);
        }
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().await?;
        let status = response.status();
        let text = response.text().await?;

        if !status.is_success() {
            tracing::error!(
                status = %status,
                path,
                body = %text.chars().take(LOGGED_BODY_LIMIT).collect::<String>(),
                "gateway returned non-success status"
            );
            if status == StatusCode::NOT_FOUND {
                return Err(GatewayError::NotFound(path.to_string()));
            }
            return Err(GatewayError::Status {
                status,
                path: path.to_string(),
            });
        }

        Ok(text)
    }

    /// Send a request and decode the JSON response.
    async fn fetch<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        query: &[(&str, String)],
        body: Option<&impl Serialize>,
    ) -> Result<T, GatewayError> {
        let text = self.send(method, path, query, body).await?;
        serde_json::from_str(&text).map_err(|e| {
            tracing::error!(
                path,
                error = %e,
                body = %text.chars().take(LOGGED_BODY_LIMIT).collect::<String>(),
                "failed to parse gateway response"
            );
            GatewayError::Parse(e)
        })
    }

    /// Send a request, discarding the response body.
    async fn execute(
        &self,
        method: Method,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<(), GatewayError> {
        self.send(method, path, query, None::<&()>).await?;
        Ok(())
    }

    // =========================================================================
    // Catalog
    // =========================================================================

    /// Look up a product by id. Cached for 5 minutes.
    ///
    /// # Errors
    ///
    /// Returns an error if the product is not found or the request fails.
    #[instrument(skip(self), fields(product_id = %product_id))]
    pub async fn product(&self, product_id: ProductId) -> Result<Product, GatewayError> {
        if let Some(product) = self.inner.products.get(&product_id.as_i64()).await {
            debug!("cache hit for product");
            return Ok(product);
        }

        let product: Product = self
            .fetch(
                Method::GET,
                &format!("api/products/{product_id}"),
                &[],
                None::<&()>,
            )
            .await?;

        self.inner
            .products
            .insert(product_id.as_i64(), product.clone())
            .await;

        Ok(product)
    }

    // =========================================================================
    // Cart (not cached - mutable state)
    // =========================================================================

    /// Fetch the remote cart for a user.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the body cannot be parsed.
    #[instrument(skip(self), fields(user_id = %user_id))]
    pub async fn cart(&self, user_id: UserId) -> Result<RemoteCart, GatewayError> {
        self.fetch(Method::GET, &format!("cart/{user_id}"), &[], None::<&()>)
            .await
    }

    /// Add (or increment) a cart line remotely.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    #[instrument(skip(self), fields(user_id = %user_id, product_id = %product_id))]
    pub async fn add_cart_item(
        &self,
        user_id: UserId,
        product_id: ProductId,
        quantity: u32,
    ) -> Result<(), GatewayError> {
        self.execute(
            Method::POST,
            &format!("cart/{user_id}/items"),
            &[
                ("productId", product_id.to_string()),
                ("quantity", quantity.to_string()),
            ],
        )
        .await
    }

    /// Set the quantity of a remote cart line.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    #[instrument(skip(self), fields(user_id = %user_id, product_id = %product_id))]
    pub async fn set_cart_item_quantity(
        &self,
        user_id: UserId,
        product_id: ProductId,
        quantity: u32,
    ) -> Result<(), GatewayError> {
        self.execute(
            Method::PUT,
            &format!("cart/{user_id}/items/{product_id}"),
            &[("quantity", quantity.to_string())],
        )
        .await
    }

    /// Remove a line from the remote cart.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    #[instrument(skip(self), fields(user_id = %user_id, product_id = %product_id))]
    pub async fn remove_cart_item(
        &self,
        user_id: UserId,
        product_id: ProductId,
    ) -> Result<(), GatewayError> {
        self.execute(
            Method::DELETE,
            &format!("cart/{user_id}/items/{product_id}"),
            &[],
        )
        .await
    }

    // =========================================================================
    // Orders
    // =========================================================================

    /// Submit an order for persistence.
    ///
    /// Returns the server-confirmed order, which may differ from the
    /// submitted one (e.g. backend-assigned tracking data).
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the body cannot be parsed.
    #[instrument(skip(self, order), fields(order_id = %order.id))]
    pub async fn submit_order(&self, order: &Order) -> Result<Order, GatewayError> {
        self.fetch(Method::POST, "api/orders/", &[], Some(order))
            .await
    }

    // =========================================================================
    // Profile collections
    // =========================================================================

    /// List a user's addresses.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the body cannot be parsed.
    #[instrument(skip(self), fields(user_id = %user_id))]
    pub async fn addresses(&self, user_id: UserId) -> Result<Vec<Address>, GatewayError> {
        self.fetch(
            Method::GET,
            &format!("users/{user_id}/addresses"),
            &[],
            None::<&()>,
        )
        .await
    }

    /// Create an address for a user.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the body cannot be parsed.
    #[instrument(skip(self, address), fields(user_id = %user_id))]
    pub async fn create_address(
        &self,
        user_id: UserId,
        address: &Address,
    ) -> Result<Address, GatewayError> {
        self.fetch(
            Method::POST,
            &format!("users/{user_id}/addresses"),
            &[],
            Some(address),
        )
        .await
    }

    /// Delete a user's address.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    #[instrument(skip(self), fields(user_id = %user_id, address_id = %address_id))]
    pub async fn delete_address(
        &self,
        user_id: UserId,
        address_id: AddressId,
    ) -> Result<(), GatewayError> {
        self.execute(
            Method::DELETE,
            &format!("users/{user_id}/addresses/{address_id}"),
            &[],
        )
        .await
    }

    /// List a user's payment methods.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the body cannot be parsed.
    #[instrument(skip(self), fields(user_id = %user_id))]
    pub async fn payment_methods(
        &self,
        user_id: UserId,
    ) -> Result<Vec<PaymentMethod>, GatewayError> {
        self.fetch(
            Method::GET,
            &format!("users/{user_id}/payments"),
            &[],
            None::<&()>,
        )
        .await
    }

    /// Register a tokenized payment method for a user.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the body cannot be parsed.
    #[instrument(skip(self, token), fields(user_id = %user_id, provider))]
    pub async fn create_payment_method(
        &self,
        user_id: UserId,
        provider: &str,
        token: &str,
    ) -> Result<PaymentMethod, GatewayError> {
        let body = serde_json::json!({ "provider": provider, "token": token });
        self.fetch(
            Method::POST,
            &format!("users/{user_id}/payments"),
            &[],
            Some(&body),
        )
        .await
    }

    /// List a user's wishlist.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the body cannot be parsed.
    #[instrument(skip(self), fields(user_id = %user_id))]
    pub async fn wishlist(&self, user_id: UserId) -> Result<Vec<WishlistItem>, GatewayError> {
        self.fetch(
            Method::GET,
            &format!("users/{user_id}/wishlist"),
            &[],
            None::<&()>,
        )
        .await
    }

    /// Add a product to a user's wishlist.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    #[instrument(skip(self), fields(user_id = %user_id, product_id = %product_id))]
    pub async fn add_to_wishlist(
        &self,
        user_id: UserId,
        product_id: ProductId,
    ) -> Result<(), GatewayError> {
        let body = serde_json::json!({ "productId": product_id });
        self.send(
            Method::POST,
            &format!("users/{user_id}/wishlist"),
            &[],
            Some(&body),
        )
        .await?;
        Ok(())
    }

    /// Remove a product from a user's wishlist.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    #[instrument(skip(self), fields(user_id = %user_id, product_id = %product_id))]
    pub async fn remove_from_wishlist(
        &self,
        user_id: UserId,
        product_id: ProductId,
    ) -> Result<(), GatewayError> {
        self.execute(
            Method::DELETE,
            &format!("users/{user_id}/wishlist/{product_id}"),
            &[],
        )
        .await
    }
}
