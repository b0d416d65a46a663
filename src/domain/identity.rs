//! Caller and role-holder identities.

use std::fmt;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// An authenticated principal: a pool creator, validator, or depositor.
///
/// The ledger never authenticates identities itself. Values are supplied by
/// the invocation boundary and only ever compared for equality against the
/// stored `validator` and `creator` fields.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, ToSchema)]
#[serde(transparent)]
pub struct Identity(String);

impl Identity {
    /// Wraps an identity string as supplied by the caller.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the identity as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Identity {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}
