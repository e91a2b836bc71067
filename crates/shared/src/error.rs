use serde::{Deserialize, Serialize};

/// Error body returned by the storefront backend on non-2xx responses.
///
/// Every field is optional because proxies and older backend builds answer
/// with partial bodies or none at all.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ServerErrorBody {
    #[serde(default)]
    pub status: Option<u16>,
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

impl ServerErrorBody {
    pub fn parse(raw: &str) -> Option<Self> {
        serde_json::from_str(raw).ok()
    }

    /// Most specific human-readable text in the body, if any.
    pub fn detail(&self) -> Option<&str> {
        self.message
            .as_deref()
            .filter(|m| !m.trim().is_empty())
            .or_else(|| self.error.as_deref().filter(|e| !e.trim().is_empty()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prefers_message_over_error() {
        let body = ServerErrorBody::parse(
            r#"{"status":400,"error":"Bad Request","message":"quantity must be positive"}"#,
        )
        .expect("body");
        assert_eq!(body.status, Some(400));
        assert_eq!(body.detail(), Some("quantity must be positive"));
    }

    #[test]
    fn falls_back_to_error_when_message_blank() {
        let body = ServerErrorBody::parse(r#"{"error":"Unauthorized","message":"  "}"#)
            .expect("body");
        assert_eq!(body.detail(), Some("Unauthorized"));
    }

    #[test]
    fn non_json_body_is_not_an_error_body() {
        assert!(ServerErrorBody::parse("<html>502</html>").is_none());
    }
}
