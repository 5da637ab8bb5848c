//! Pagination utilities
//!
//! Page and limit arrive as raw query-string text. Missing or non-numeric
//! values fall back to the defaults; a non-positive or oversized limit is
//! rejected.

use serde::Serialize;
use thiserror::Error;

/// Page used when the request does not name one
pub const DEFAULT_PAGE: i64 = 1;
/// Rows per page when the request does not name a limit
pub const DEFAULT_LIMIT: i64 = 10;
/// Largest accepted limit
pub const MAX_LIMIT: i64 = 1000;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PaginationError {
    #[error("Invalid limit: {0} (must be between 1 and 1000)")]
    InvalidLimit(i64),
}

/// Sanitized page request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    /// Current page number (1-indexed)
    pub page: i64,
    /// Rows per page
    pub limit: i64,
}

/// Pagination metadata returned with every listing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PaginationMeta {
    pub page: i64,
    pub limit: i64,
    pub total: i64,
    pub pages: i64,
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: DEFAULT_PAGE,
            limit: DEFAULT_LIMIT,
        }
    }
}

impl PageRequest {
    /// Coerce raw `page` / `limit` parameters
    ///
    /// # Examples
    /// ```
    /// use soundvault_api::pagination::PageRequest;
    ///
    /// let p = PageRequest::from_params(Some("2"), Some("25")).unwrap();
    /// assert_eq!(p.offset(), 25);
    ///
    /// // Garbage falls back to defaults
    /// let p = PageRequest::from_params(Some("abc"), None).unwrap();
    /// assert_eq!((p.page, p.limit), (1, 10));
    ///
    /// assert!(PageRequest::from_params(None, Some("0")).is_err());
    /// ```
    pub fn from_params(page: Option<&str>, limit: Option<&str>) -> Result<Self, PaginationError> {
        let page = page.and_then(parse_leading_int).unwrap_or(DEFAULT_PAGE);
        let limit = limit.and_then(parse_leading_int).unwrap_or(DEFAULT_LIMIT);

        if limit <= 0 || limit > MAX_LIMIT {
            return Err(PaginationError::InvalidLimit(limit));
        }

        Ok(Self {
            page: page.max(1),
            limit,
        })
    }

    /// Offset for SQL LIMIT/OFFSET query
    pub fn offset(&self) -> i64 {
        (self.page - 1).saturating_mul(self.limit)
    }

    /// Metadata for a result set of `total` rows
    pub fn metadata(&self, total: i64) -> PaginationMeta {
        PaginationMeta {
            page: self.page,
            limit: self.limit,
            total,
            pages: total_pages(total, self.limit),
        }
    }
}

/// `ceil(total / limit)`; `limit` must be positive
pub fn total_pages(total: i64, limit: i64) -> i64 {
    (total + limit - 1) / limit
}

/// Leading integer of a query value, `"10abc"` → 10, `"2.5"` → 2
fn parse_leading_int(raw: &str) -> Option<i64> {
    let trimmed = raw.trim();
    let digits_start = usize::from(trimmed.starts_with(['-', '+']));
    let digits_end = trimmed[digits_start..]
        .find(|c: char| !c.is_ascii_digit())
        .map_or(trimmed.len(), |i| i + digits_start);

    if digits_end == digits_start {
        return None;
    }
    trimmed[..digits_end].parse().ok()
}
