//! Local session authentication.
//!
//! Manages the `token` and `user` entries in the local store and hands out
//! [`SessionContext`]s bound to the stored identity. The gateway has no
//! login endpoint; the session is established locally and the user id scopes
//! all remote calls. Profile mutations here are local-only; the remote
//! counterparts live in [`crate::profile`].

use chrono::Utc;
use secrecy::SecretString;
use thiserror::Error;
use tracing::instrument;

use bazaar_core::{
    Address, AddressId, Email, EmailError, PaymentMethod, PaymentMethodId, ProductId, UserId,
    UserProfile,
};

use crate::session::{Identity, SessionContext};
use crate::storage::{LocalStore, StorageError, keys};

/// The local session always binds this user id; real ids would come from a
/// gateway login endpoint, which the current contract does not expose.
const LOCAL_USER_ID: i64 = 1;

/// Authentication errors.
#[derive(Debug, Error)]
pub enum AuthError {
    /// Email failed validation.
    #[error("invalid email: {0}")]
    InvalidEmail(#[from] EmailError),

    /// Password was empty.
    #[error("password cannot be empty")]
    EmptyPassword,

    /// Session state could not be persisted.
    #[error("session storage failed: {0}")]
    Storage(#[from] StorageError),
}

/// Login, logout, and stored-profile management.
#[derive(Clone)]
pub struct AuthService {
    store: LocalStore,
}

impl AuthService {
    /// Create an auth service over the given store.
    #[must_use]
    pub const fn new(store: LocalStore) -> Self {
        Self { store }
    }

    /// Log in, establishing a local session.
    ///
    /// Persists a session token and a fresh profile (named after the email's
    /// local part) unless one is already stored for this address.
    ///
    /// # Errors
    ///
    /// Returns `AuthError` if the email is malformed, the password is empty,
    /// or the session cannot be persisted.
    #[instrument(skip_all)]
    pub fn login(&self, email: &str, password: &str) -> Result<UserProfile, AuthError> {
        let email = Email::parse(email)?;
        if password.is_empty() {
            return Err(AuthError::EmptyPassword);
        }

        let name = email.local_part().to_string();
        self.establish_session(email, name)
    }

    /// Register a new user. Locally this is a login with an explicit
    /// display name.
    ///
    /// # Errors
    ///
    /// Same conditions as [`Self::login`].
    #[instrument(skip_all)]
    pub fn register(
        &self,
        email: &str,
        password: &str,
        name: &str,
    ) -> Result<UserProfile, AuthError> {
        let email = Email::parse(email)?;
        if password.is_empty() {
            return Err(AuthError::EmptyPassword);
        }

        let name = if name.is_empty() {
            email.local_part().to_string()
        } else {
            name.to_string()
        };
        self.establish_session(email, name)
    }

    fn establish_session(&self, email: Email, name: String) -> Result<UserProfile, AuthError> {
        // Keep an existing profile for the same address so order history
        // survives re-login; anything else is replaced.
        let profile = match self.store.get::<UserProfile>(keys::USER) {
            Some(existing) if existing.email == email => existing,
            _ => UserProfile::new(UserId::new(LOCAL_USER_ID), email, name),
        };

        let token = format!("session.{}", Utc::now().timestamp_millis());
        self.store.set(keys::TOKEN, &token)?;
        self.store.set(keys::USER, &profile)?;

        Ok(profile)
    }

    /// Tear down the session: remove the stored token and profile.
    #[instrument(skip_all)]
    pub fn logout(&self) {
        if let Err(e) = self.store.remove(keys::TOKEN) {
            tracing::warn!(error = %e, "failed to remove session token");
        }
        if let Err(e) = self.store.remove(keys::USER) {
            tracing::warn!(error = %e, "failed to remove stored profile");
        }
    }

    /// Whether a session token is stored.
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.store.contains(keys::TOKEN)
    }

    /// The stored profile, if present and parseable.
    #[must_use]
    pub fn current_user(&self) -> Option<UserProfile> {
        self.store.get(keys::USER)
    }

    /// Build the session context from stored state.
    ///
    /// A token without a readable profile is a broken session and is torn
    /// down, yielding an anonymous context.
    #[must_use]
    pub fn session(&self) -> SessionContext {
        let token: Option<String> = self.store.get(keys::TOKEN);
        let Some(token) = token else {
            return SessionContext::anonymous();
        };

        match self.current_user() {
            Some(profile) => SessionContext::authenticated(Identity::new(
                profile.id,
                SecretString::from(token),
            )),
            None => {
                tracing::warn!("session token without readable profile, logging out");
                self.logout();
                SessionContext::anonymous()
            }
        }
    }

    /// Persist profile changes.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::Storage` if the write fails.
    pub fn update_user(&self, profile: &UserProfile) -> Result<(), AuthError> {
        self.store.set(keys::USER, profile)?;
        Ok(())
    }

    // =========================================================================
    // Local profile mutations
    // =========================================================================

    /// Add an address to the stored profile, assigning the next local id.
    /// No-op without a stored profile.
    pub fn add_address(&self, mut address: Address) {
        self.with_profile(|profile| {
            address.id = AddressId::new(profile.addresses.len() as i64 + 1);
            profile.addresses.push(address);
        });
    }

    /// Add a payment method to the stored profile, assigning the next local
    /// id. No-op without a stored profile.
    pub fn add_payment_method(&self, mut payment_method: PaymentMethod) {
        self.with_profile(|profile| {
            payment_method.id = PaymentMethodId::new(profile.payment_methods.len() as i64 + 1);
            profile.payment_methods.push(payment_method);
        });
    }

    /// Add a product to the stored profile's wishlist (deduplicated).
    pub fn add_to_wishlist(&self, product_id: ProductId) {
        self.with_profile(|profile| {
            if !profile.wishlist.contains(&product_id) {
                profile.wishlist.push(product_id);
            }
        });
    }

    /// Remove a product from the stored profile's wishlist.
    pub fn remove_from_wishlist(&self, product_id: ProductId) {
        self.with_profile(|profile| {
            profile.wishlist.retain(|id| *id != product_id);
        });
    }

    /// Whether the stored profile's wishlist contains a product.
    #[must_use]
    pub fn is_in_wishlist(&self, product_id: ProductId) -> bool {
        self.current_user()
            .is_some_and(|profile| profile.has_wished(product_id))
    }

    fn with_profile(&self, mutate: impl FnOnce(&mut UserProfile)) {
        let Some(mut profile) = self.current_user() else {
            return;
        };
        mutate(&mut profile);
        if let Err(e) = self.update_user(&profile) {
            tracing::warn!(error = %e, "failed to persist profile mutation");
        }
    }
}
