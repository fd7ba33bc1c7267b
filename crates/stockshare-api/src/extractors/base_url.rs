//! Origin the caller reached the server through, used to build share URLs.

use axum::extract::FromRequestParts;
use axum::http::HeaderMap;
use axum::http::header::HOST;
use axum::http::request::Parts;

use stockshare_core::error::AppError;

use crate::error::ApiError;
use crate::state::AppState;

/// `scheme://host` for links handed back to the caller.
///
/// `share.public_base_url` wins when configured. Otherwise the scheme is the
/// first `X-Forwarded-Proto` value (default `http`) and the host is the
/// `Host` header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BaseUrl(pub String);

impl BaseUrl {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    fn from_headers(headers: &HeaderMap) -> Option<Self> {
        let host = headers
            .get(HOST)
            .and_then(|v| v.to_str().ok())
            .map(str::trim)
            .filter(|h| !h.is_empty())?;

        let scheme = headers
            .get("x-forwarded-proto")
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.split(',').next())
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .unwrap_or("http");

        Some(Self(format!("{scheme}://{host}")))
    }
}

impl FromRequestParts<AppState> for BaseUrl {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        if let Some(configured) = state
            .config
            .share
            .public_base_url
            .as_deref()
            .map(str::trim)
            .filter(|u| !u.is_empty())
        {
            return Ok(Self(configured.trim_end_matches('/').to_string()));
        }

        Self::from_headers(&parts.headers)
            .or_else(|| {
                // HTTP/2 requests carry the host in the URI authority.
                let authority = parts.uri.authority()?;
                let scheme = parts.uri.scheme_str().unwrap_or("http");
                Some(Self(format!("{scheme}://{authority}")))
            })
            .ok_or_else(|| AppError::validation("Missing Host header").into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn test_forwarded_proto_first_value_wins() {
        let mut headers = HeaderMap::new();
        headers.insert(HOST, HeaderValue::from_static("shop.example.com"));
        headers.insert(
            "x-forwarded-proto",
            HeaderValue::from_static("https, http"),
        );

        let base = BaseUrl::from_headers(&headers).unwrap();
        assert_eq!(base.as_str(), "https://shop.example.com");
    }

    #[test]
    fn test_defaults_to_http() {
        let mut headers = HeaderMap::new();
        headers.insert(HOST, HeaderValue::from_static("localhost:4000"));

        let base = BaseUrl::from_headers(&headers).unwrap();
        assert_eq!(base.as_str(), "http://localhost:4000");
    }

    #[test]
    fn test_missing_host_is_rejected() {
        assert!(BaseUrl::from_headers(&HeaderMap::new()).is_none());
    }
}
