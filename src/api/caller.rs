//! Caller identity extraction.
//!
//! Authentication happens upstream (API gateway, signing proxy). By the
//! time a request reaches this service, the authenticated principal is
//! carried in the [`CALLER_HEADER`] header and taken at face value.

use axum::http::HeaderMap;

use crate::domain::Identity;
use crate::error::EscrowError;

/// Header carrying the authenticated caller identity.
pub const CALLER_HEADER: &str = "x-caller-identity";

/// Extracts the caller identity from request headers.
///
/// # Errors
///
/// Returns [`EscrowError::MissingCaller`] if the header is absent, not
/// valid ASCII, or blank.
pub fn caller_identity(headers: &HeaderMap) -> Result<Identity, EscrowError> {
    let raw = headers
        .get(CALLER_HEADER)
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .ok_or(EscrowError::MissingCaller)?;
    Ok(Identity::new(raw))
}
