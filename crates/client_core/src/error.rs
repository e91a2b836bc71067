use thiserror::Error;

/// Failure of a single storefront request.
///
/// Controllers collapse every variant into one user-facing message per
/// operation; the variants exist for logs and tests.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("invalid storefront url: {0}")]
    InvalidUrl(#[from] url::ParseError),
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("server answered {status}{}", detail_suffix(.detail))]
    Status { status: u16, detail: Option<String> },
    #[error("failed to decode response body: {0}")]
    Decode(#[from] serde_json::Error),
}

fn detail_suffix(detail: &Option<String>) -> String {
    detail
        .as_deref()
        .map(|detail| format!(": {detail}"))
        .unwrap_or_default()
}

impl StoreError {
    pub fn status(status: u16) -> Self {
        Self::Status {
            status,
            detail: None,
        }
    }

    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            Self::Transport(err) => err.status().map(|status| status.as_u16()),
            _ => None,
        }
    }
}
