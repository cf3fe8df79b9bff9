//! Validated email address newtype.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors from parsing an email address.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum EmailError {
    #[error("email cannot be empty")]
    Empty,
    #[error("email must contain exactly one @")]
    MissingAt,
    #[error("email local part cannot be empty")]
    EmptyLocal,
    #[error("email domain must contain a dot")]
    InvalidDomain,
}

/// A validated, lowercased email address.
///
/// Validation is intentionally shallow: well-formedness for login and
/// display, not full RFC 5321 parsing. The gateway is the authority on
/// whether an address actually exists.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Email(String);

impl Email {
    /// Parse and normalize an email address.
    ///
    /// # Errors
    ///
    /// Returns `EmailError` if the address is empty, has no `@`, an empty
    /// local part, or a domain without a dot.
    pub fn parse(raw: &str) -> Result<Self, EmailError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(EmailError::Empty);
        }

        let (local, domain) = trimmed.split_once('@').ok_or(EmailError::MissingAt)?;
        if local.is_empty() {
            return Err(EmailError::EmptyLocal);
        }
        if domain.contains('@') {
            return Err(EmailError::MissingAt);
        }
        if !domain.contains('.') || domain.starts_with('.') || domain.ends_with('.') {
            return Err(EmailError::InvalidDomain);
        }

        Ok(Self(trimmed.to_lowercase()))
    }

    /// The normalized address.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The part before the `@`, used as a default display name.
    #[must_use]
    pub fn local_part(&self) -> &str {
        self.0.split('@').next().unwrap_or(&self.0)
    }
}

impl std::fmt::Display for Email {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
