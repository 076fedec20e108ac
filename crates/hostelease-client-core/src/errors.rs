use hostelease_shared::errors::{error_detail, flatten_error_text};
use reqwest::StatusCode;

/// Failure of a single request to the API
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// No response was received
    #[error("failed to send request")]
    Transport(#[source] reqwest::Error),
    /// The API answered with a non success status code
    #[error("{}", flatten_error_text(.body, &no_body_message(.status)))]
    Rejected { status: StatusCode, body: String },
    /// The API answered with success but the body was not what was expected
    #[error("failed to parse response body")]
    Decode(#[source] reqwest::Error),
}

fn no_body_message(status: &StatusCode) -> String {
    format!("request failed with status code: {status} and no body")
}

impl ApiError {
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            ApiError::Rejected { status, .. } => Some(*status),
            ApiError::Transport(e) | ApiError::Decode(e) => e.status(),
        }
    }

    /// Returns `true` if the API refused the credentials sent
    pub fn is_unauthorized(&self) -> bool {
        self.status() == Some(StatusCode::UNAUTHORIZED)
    }

    /// The `detail` field of the error body if the API sent one
    pub fn detail(&self) -> Option<String> {
        match self {
            ApiError::Rejected { body, .. } => {
                let value = serde_json::from_str(body).ok()?;
                error_detail(&value)
            }
            ApiError::Transport(_) | ApiError::Decode(_) => None,
        }
    }

    /// Message suitable for showing to the user, uses `fallback` if the API
    /// did not provide anything usable
    pub fn message_or(&self, fallback: &str) -> String {
        match self {
            ApiError::Rejected { body, .. } => flatten_error_text(body, fallback),
            ApiError::Transport(_) | ApiError::Decode(_) => fallback.to_string(),
        }
    }
}
