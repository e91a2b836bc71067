//! Credentials attached to protected storefront requests.

use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION};
use tracing::warn;

pub trait AuthHeaderProvider: Send + Sync {
    /// Headers for the next request; empty when nobody is signed in.
    fn headers(&self) -> HeaderMap;

    fn is_logged_in(&self) -> bool;
}

/// Used when no session exists. Sends no credentials.
pub struct AnonymousAuth;

impl AuthHeaderProvider for AnonymousAuth {
    fn headers(&self) -> HeaderMap {
        HeaderMap::new()
    }

    fn is_logged_in(&self) -> bool {
        false
    }
}

/// Bearer token issued by the storefront login endpoint.
pub struct BearerTokenAuth {
    token: Option<String>,
}

impl BearerTokenAuth {
    pub fn new(token: impl Into<String>) -> Self {
        let token = token.into();
        let token = token.trim();
        Self {
            token: (!token.is_empty()).then(|| token.to_string()),
        }
    }

    pub fn from_optional(token: Option<String>) -> Self {
        token.map(Self::new).unwrap_or(Self { token: None })
    }
}

impl AuthHeaderProvider for BearerTokenAuth {
    fn headers(&self) -> HeaderMap {
        let mut headers = HeaderMap::new();
        let Some(token) = &self.token else {
            return headers;
        };

        match HeaderValue::from_str(&format!("Bearer {token}")) {
            Ok(mut value) => {
                value.set_sensitive(true);
                headers.insert(AUTHORIZATION, value);
            }
            Err(err) => warn!(error = %err, "auth token is not a valid header value; sending none"),
        }
        headers
    }

    fn is_logged_in(&self) -> bool {
        self.token.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bearer_token_sets_authorization_header() {
        let auth = BearerTokenAuth::new("abc.def");
        let headers = auth.headers();
        assert!(auth.is_logged_in());
        assert_eq!(
            headers.get(AUTHORIZATION).and_then(|v| v.to_str().ok()),
            Some("Bearer abc.def")
        );
    }

    #[test]
    fn blank_token_counts_as_logged_out() {
        let auth = BearerTokenAuth::new("   ");
        assert!(!auth.is_logged_in());
        assert!(auth.headers().is_empty());

        assert!(!BearerTokenAuth::from_optional(None).is_logged_in());
    }

    #[test]
    fn token_with_control_characters_is_dropped() {
        let auth = BearerTokenAuth::new("bad\ntoken");
        assert!(auth.headers().is_empty());
    }

    #[test]
    fn anonymous_sends_nothing() {
        assert!(AnonymousAuth.headers().is_empty());
        assert!(!AnonymousAuth.is_logged_in());
    }
}
