//! Numeric response header parsing.
//!
//! DockerHub's rate-limit headers carry a count optionally followed by a
//! policy suffix, e.g. `RateLimit-Limit: 100;w=21600`. Only the leading
//! count is meaningful here.

use reqwest::header::HeaderMap;
use std::num::ParseIntError;
use thiserror::Error;

#[cfg(test)]
mod tests;

/// Errors produced while reading a numeric header.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum HeaderError {
    /// The header is absent or empty
    #[error("Missing {0} header")]
    Missing(String),

    /// The header value contains bytes that are not visible ASCII
    #[error("{0} header is not valid text")]
    NotText(String),

    /// The leading segment is not a base-10 unsigned integer
    #[error(transparent)]
    Parse(#[from] ParseIntError),
}

/// Parses the leading numeric segment of the header named `key`.
///
/// The value is split on `;` and only the first segment is parsed. Negative
/// numbers are rejected.
///
/// # Examples
///
/// ```
/// use libhubstat::header::parse_numeric_header;
/// use reqwest::header::{HeaderMap, HeaderValue};
///
/// let mut headers = HeaderMap::new();
/// headers.insert("RateLimit-Limit", HeaderValue::from_static("100;w=21600"));
///
/// assert_eq!(parse_numeric_header(&headers, "RateLimit-Limit").unwrap(), 100);
/// ```
pub fn parse_numeric_header(headers: &HeaderMap, key: &str) -> Result<u64, HeaderError> {
    let value = match headers.get(key) {
        Some(value) => value
            .to_str()
            .map_err(|_| HeaderError::NotText(key.to_string()))?,
        None => "",
    };

    if value.is_empty() {
        return Err(HeaderError::Missing(key.to_string()));
    }

    // split always yields at least one segment
    let count = value.split(';').next().unwrap_or_default();
    Ok(count.parse::<u64>()?)
}
