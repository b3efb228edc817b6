//! Limit/offset window for list queries.

use serde::Serialize;

/// Errors that can occur when parsing a [`Page`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum PageError {
    /// The value is not an integer.
    #[error("{field} must be an integer (got {value:?})")]
    NotAnInteger {
        /// Query parameter name.
        field: &'static str,
        /// Raw value from the query string.
        value: String,
    },
    /// The value is below zero.
    #[error("{field} must not be negative")]
    Negative {
        /// Query parameter name.
        field: &'static str,
    },
}

/// A `LIMIT`/`OFFSET` pair.
///
/// `None` binds SQL `NULL`: no limit, and offset zero.
///
/// ```
/// use customer_rest_core::Page;
///
/// let page = Page::parse(Some("10"), None).unwrap();
/// assert_eq!(page.limit, Some(10));
/// assert_eq!(page.offset, None);
///
/// assert!(Page::parse(Some("ten"), None).is_err());
/// assert!(Page::parse(None, Some("-1")).is_err());
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Page {
    /// Maximum number of rows to return.
    pub limit: Option<i64>,
    /// Number of rows to skip.
    pub offset: Option<i64>,
}

impl Page {
    /// Parse raw query-string values.
    ///
    /// # Errors
    ///
    /// Returns a [`PageError`] if either value is present but not a
    /// non-negative integer. An empty string counts as present.
    pub fn parse(limit: Option<&str>, offset: Option<&str>) -> Result<Self, PageError> {
        Ok(Self {
            limit: parse_field("limit", limit)?,
            offset: parse_field("offset", offset)?,
        })
    }
}

fn parse_field(field: &'static str, raw: Option<&str>) -> Result<Option<i64>, PageError> {
    let Some(raw) = raw else {
        return Ok(None);
    };

    let value = raw
        .trim()
        .parse::<i64>()
        .map_err(|_| PageError::NotAnInteger {
            field,
            value: raw.to_owned(),
        })?;

    if value < 0 {
        return Err(PageError::Negative { field });
    }

    Ok(Some(value))
}
