//! Bazaar Core - Shared types library.
//!
//! This crate provides common types used across the Bazaar storefront client:
//! - `client` - Cart, order, and profile services over the API gateway
//! - `cli` - Command-line storefront tool
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no HTTP clients, no storage.
//! This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Type-safe IDs, order status, email, and the domain models
//!   (products, cart lines, orders, user profiles)

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
