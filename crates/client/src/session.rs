//! Explicit session context.
//!
//! The source of truth for "who is acting": either a bound authenticated
//! identity or anonymous. Services take the context as an argument rather
//! than consulting ambient global state, so the scope of every operation is
//! visible at the call site. Created at session start, torn down at logout.

use secrecy::SecretString;

use bazaar_core::UserId;

/// An authenticated identity: the user id plus their session token.
#[derive(Debug, Clone)]
pub struct Identity {
    user_id: UserId,
    token: SecretString,
}

impl Identity {
    /// Bind an identity from a user id and session token.
    #[must_use]
    pub fn new(user_id: UserId, token: SecretString) -> Self {
        Self { user_id, token }
    }

    /// The authenticated user's id.
    #[must_use]
    pub const fn user_id(&self) -> UserId {
        self.user_id
    }

    /// The session token.
    #[must_use]
    pub const fn token(&self) -> &SecretString {
        &self.token
    }
}

/// The current session: anonymous, or bound to an authenticated identity.
#[derive(Debug, Clone, Default)]
pub struct SessionContext {
    identity: Option<Identity>,
}

impl SessionContext {
    /// A fresh anonymous session.
    #[must_use]
    pub const fn anonymous() -> Self {
        Self { identity: None }
    }

    /// A session bound to an authenticated identity.
    #[must_use]
    pub const fn authenticated(identity: Identity) -> Self {
        Self {
            identity: Some(identity),
        }
    }

    /// Bind an identity, e.g. after login.
    pub fn bind(&mut self, identity: Identity) {
        self.identity = Some(identity);
    }

    /// Drop the bound identity, e.g. at logout.
    pub fn clear(&mut self) {
        self.identity = None;
    }

    /// The bound identity, if any.
    #[must_use]
    pub const fn identity(&self) -> Option<&Identity> {
        self.identity.as_ref()
    }

    /// The bound user id, if any.
    #[must_use]
    pub fn user_id(&self) -> Option<UserId> {
        self.identity.as_ref().map(Identity::user_id)
    }

    /// Whether an identity is bound.
    #[must_use]
    pub const fn is_authenticated(&self) -> bool {
        self.identity.is_some()
    }
}
