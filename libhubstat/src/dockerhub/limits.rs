//! Rate-limit probe against the DockerHub registry.

use super::RateLimitStatus;
use super::token::Token;
use crate::client::{Client, drain};
use crate::error::{HubStatError, Result};
use crate::header::{HeaderError, parse_numeric_header};
use reqwest::{Method, StatusCode};
use tracing::{debug, warn};

/// Manifest of the probe repository. A HEAD on it reports quota without consuming a pull.
pub const RATE_LIMITS_URL: &str =
    "https://registry-1.docker.io/v2/ratelimitpreview/test/manifests/latest";

/// Header carrying the pull quota for the current window.
pub const LIMIT_HEADER: &str = "RateLimit-Limit";

/// Header carrying the pulls left in the current window.
pub const REMAINING_HEADER: &str = "RateLimit-Remaining";

/// Issues an authenticated HEAD on the probe manifest and reads both quota headers.
///
/// # Errors
///
/// - [`HubStatError::UpstreamRateLimit`] if the request cannot be sent or the
///   registry answers with anything other than 200
/// - [`HubStatError::UpstreamProtocol`] if either header is missing or not a
///   number; no partial status is ever returned
pub async fn fetch_rate_limits(
    client: &Client,
    rate_limits_url: &str,
    token: &Token,
) -> Result<RateLimitStatus> {
    let request = client
        .request(Method::HEAD, rate_limits_url)
        .bearer_auth(token.as_str());

    debug!(url = rate_limits_url, "requesting dockerhub rate limits");

    let response = client.execute(request).await.map_err(|e| {
        HubStatError::upstream_rate_limit_with_source("failed sending dockerhub limits request", e)
    })?;

    let status = response.status();
    if status != StatusCode::OK {
        drain(response).await;
        warn!(status = status.as_u16(), "dockerhub rate limit request rejected");
        return Err(HubStatError::upstream_rate_limit(
            "failed fetching dockerhub limits",
            Some(status.as_u16()),
        ));
    }

    let headers = response.headers();
    let limit = parse_numeric_header(headers, LIMIT_HEADER)
        .map_err(|e| header_error(LIMIT_HEADER, e))?;
    let remaining = parse_numeric_header(headers, REMAINING_HEADER)
        .map_err(|e| header_error(REMAINING_HEADER, e))?;

    Ok(RateLimitStatus { remaining, limit })
}

fn header_error(header: &str, error: HeaderError) -> HubStatError {
    warn!(header, error = %error, "dockerhub rate limit header unusable");
    HubStatError::upstream_protocol_with_source(
        format!("Failed fetching {} header", header),
        error,
    )
}
