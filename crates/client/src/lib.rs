//! Bazaar storefront client layer.
//!
//! Cart, order, authentication, and profile services for the Bazaar
//! storefront. Every service talks to the remote API gateway when a user
//! identity is bound and falls back to a local JSON store otherwise, so the
//! storefront keeps working without a backend or a session.
//!
//! # Architecture
//!
//! - [`gateway`] - REST client for the API gateway (carts, orders, catalog,
//!   profile collections)
//! - [`storage`] - Local JSON store, the anonymous fallback for cart and
//!   order state
//! - [`session`] - Explicit session context carrying the bound identity
//! - [`cart`] - Cart store: local cache plus best-effort remote mirroring
//!   and the login-time reconciliation
//! - [`order`] - Order assembler: totals, submission, history, cancellation
//! - [`auth`] - Local session lifecycle (login/logout, stored profile)
//! - [`profile`] - Gateway CRUD for addresses, payment methods, wishlist
//!
//! # Example
//!
//! ```rust,ignore
//! use bazaar_client::{CartStore, ClientConfig, GatewayClient, LocalStore, OrderAssembler};
//!
//! let config = ClientConfig::from_env()?;
//! let gateway = GatewayClient::new(&config.gateway);
//! let store = LocalStore::open(&config.data_dir)?;
//!
//! let mut cart = CartStore::load(store.clone(), gateway.clone());
//! cart.add_line(&session, product, 1).await;
//!
//! let orders = OrderAssembler::new(store, gateway);
//! let order = orders.create_order(&mut cart, &session, address, payment).await?;
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod auth;
pub mod cart;
pub mod config;
pub mod gateway;
pub mod order;
pub mod profile;
pub mod session;
pub mod storage;

pub use auth::{AuthError, AuthService};
pub use cart::{CartStore, SyncReport};
pub use config::{ClientConfig, ConfigError, GatewayConfig};
pub use gateway::{GatewayClient, GatewayError};
pub use order::OrderAssembler;
pub use profile::ProfileService;
pub use session::{Identity, SessionContext};
pub use storage::{LocalStore, StorageError};
