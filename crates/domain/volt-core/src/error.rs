/// Every failure a resource call can produce, normalized at the client boundary.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ApiError {
    #[error("network error: {0}")]
    Transport(String),
    #[error("request timed out: {0}")]
    Timeout(String),
    #[error("HTTP error! status: {status}{}", body_suffix(.body))]
    Status { status: u16, body: Option<String> },
    #[error("invalid response: {0}")]
    Decode(String),
    #[error("{0}")]
    Application(String),
    #[error("invalid request: {0}")]
    InvalidRequest(String),
}

fn body_suffix(body: &Option<String>) -> String {
    match body.as_deref().map(str::trim) {
        Some(text) if !text.is_empty() => format!(" - {text}"),
        _ => String::new(),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiErrorKind {
    Transport,
    Timeout,
    Status,
    Decode,
    Application,
    InvalidRequest,
}

impl ApiError {
    pub fn kind(&self) -> ApiErrorKind {
        match self {
            ApiError::Transport(_) => ApiErrorKind::Transport,
            ApiError::Timeout(_) => ApiErrorKind::Timeout,
            ApiError::Status { .. } => ApiErrorKind::Status,
            ApiError::Decode(_) => ApiErrorKind::Decode,
            ApiError::Application(_) => ApiErrorKind::Application,
            ApiError::InvalidRequest(_) => ApiErrorKind::InvalidRequest,
        }
    }

    /// User-facing text recorded in view state and notices.
    pub fn message(&self) -> String {
        self.to_string()
    }

    pub fn status(status: u16) -> Self {
        ApiError::Status { status, body: None }
    }

    pub fn application(message: Option<String>) -> Self {
        ApiError::Application(message.unwrap_or_else(|| "Request failed".to_string()))
    }
}

/// Outcome of one resource call. Never panics or escapes as anything else.
pub type ResourceResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_message_matches_client_format() {
        assert_eq!(ApiError::status(500).message(), "HTTP error! status: 500");
        let with_body = ApiError::Status {
            status: 404,
            body: Some("Station not found\n".into()),
        };
        assert_eq!(with_body.message(), "HTTP error! status: 404 - Station not found");
    }

    #[test]
    fn blank_body_is_not_appended() {
        let err = ApiError::Status {
            status: 502,
            body: Some("   ".into()),
        };
        assert_eq!(err.message(), "HTTP error! status: 502");
    }

    #[test]
    fn application_error_defaults_message() {
        assert_eq!(ApiError::application(None).message(), "Request failed");
        assert_eq!(
            ApiError::application(Some("Vehicle not found".into())).message(),
            "Vehicle not found"
        );
        assert_eq!(
            ApiError::application(None).kind(),
            ApiErrorKind::Application
        );
    }
}
