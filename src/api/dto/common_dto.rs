//! Shared DTO types and helpers used across multiple endpoints.

use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::error::EscrowError;

/// Pagination query parameters for list endpoints.
#[derive(Debug, Clone, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct PaginationParams {
    /// Page number (1-indexed). Defaults to 1.
    #[serde(default = "default_page")]
    pub page: u32,
    /// Items per page (max 100). Defaults to 20.
    #[serde(default = "default_per_page")]
    pub per_page: u32,
}

/// Pagination metadata included in list responses.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct PaginationMeta {
    /// Current page number.
    pub page: u32,
    /// Items per page.
    pub per_page: u32,
    /// Total number of items.
    pub total: u32,
    /// Total number of pages.
    pub total_pages: u32,
}

fn default_page() -> u32 {
    1
}

fn default_per_page() -> u32 {
    20
}

impl PaginationParams {
    /// Clamps `page` to at least 1 and `per_page` to `1..=100`.
    #[must_use]
    pub fn clamped(&self) -> Self {
        Self {
            page: self.page.max(1),
            per_page: self.per_page.clamp(1, 100),
        }
    }

    /// Number of items to skip before the current page.
    #[must_use]
    pub fn offset(&self) -> usize {
        let page = self.page.max(1) - 1;
        (page as usize).saturating_mul(self.per_page as usize)
    }
}

impl Default for PaginationParams {
    fn default() -> Self {
        Self {
            page: default_page(),
            per_page: default_per_page(),
        }
    }
}

/// Parses a string-encoded u128 amount from a request body.
///
/// # Errors
///
/// Returns [`EscrowError::InvalidAmount`] if the value is not a decimal
/// unsigned integer.
pub fn parse_amount(field: &str, raw: &str) -> Result<u128, EscrowError> {
    raw.trim()
        .parse::<u128>()
        .map_err(|_| EscrowError::InvalidAmount(format!("{field}: {raw}")))
}

/// Trims an identifier from a request body and rejects it if blank.
///
/// Body identifiers are normalized the same way as the caller header, so a
/// stored validator always matches the header its holder sends.
///
/// # Errors
///
/// Returns [`EscrowError::InvalidRequest`] naming the offending field.
pub fn require_non_blank<'a>(field: &str, raw: &'a str) -> Result<&'a str, EscrowError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(EscrowError::InvalidRequest(format!("{field} must not be empty")));
    }
    Ok(trimmed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_amount_accepts_full_u128_range() {
        assert_eq!(parse_amount("amount", "0"), Ok(0));
        assert_eq!(
            parse_amount("amount", &u128::MAX.to_string()),
            Ok(u128::MAX)
        );
    }

    #[test]
    fn parse_amount_rejects_garbage() {
        for raw in ["", "-1", "1.5", "ten", "340282366920938463463374607431768211456"] {
            assert!(matches!(
                parse_amount("amount", raw),
                Err(EscrowError::InvalidAmount(_))
            ));
        }
    }

    #[test]
    fn pagination_clamps_and_offsets() {
        let params = PaginationParams {
            page: 0,
            per_page: 500,
        }
        .clamped();
        assert_eq!(params.page, 1);
        assert_eq!(params.per_page, 100);
        assert_eq!(params.offset(), 0);

        let third = PaginationParams {
            page: 3,
            per_page: 10,
        };
        assert_eq!(third.offset(), 20);
    }

    #[test]
    fn blank_identifiers_are_rejected() {
        assert!(require_non_blank("validator", "  ").is_err());
        assert_eq!(require_non_blank("validator", "V1"), Ok("V1"));
    }

    #[test]
    fn identifiers_are_trimmed() {
        assert_eq!(require_non_blank("validator", " V2 "), Ok("V2"));
        assert_eq!(require_non_blank("name", "\tp1\n"), Ok("p1"));
    }
}
