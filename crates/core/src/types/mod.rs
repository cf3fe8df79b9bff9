//! Core types for the Bazaar storefront client.

mod cart;
mod email;
mod id;
mod order;
mod product;
mod profile;
mod status;

pub use cart::CartLine;
pub use email::{Email, EmailError};
pub use id::{AddressId, OrderId, PaymentMethodId, ProductId, UserId};
pub use order::{Address, Order, OrderItem, PaymentMethod};
pub use product::Product;
pub use profile::UserProfile;
pub use status::OrderStatus;
