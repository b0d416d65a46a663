//! Type-safe pool name.
//!
//! [`PoolName`] is a newtype wrapper around the caller-chosen identifier of
//! an escrow pool. Names are opaque: they are compared byte for byte and
//! never normalized, trimmed, or case-folded.

use std::fmt;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Unique, caller-chosen name of an escrow pool.
///
/// Assigned once at pool creation and immutable thereafter. Used as the
/// primary key in [`super::PoolRegistry`], event discriminator, and
/// WebSocket subscription target.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, ToSchema)]
#[serde(transparent)]
pub struct PoolName(String);

impl PoolName {
    /// Creates a `PoolName` from any string-like value.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// Returns the name as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns the raw bytes of the name.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        self.0.as_bytes()
    }
}

impl fmt::Display for PoolName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for PoolName {
    fn from(name: &str) -> Self {
        Self(name.to_string())
    }
}

impl From<String> for PoolName {
    fn from(name: String) -> Self {
        Self(name)
    }
}
