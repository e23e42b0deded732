use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("invalid file type: expected application/pdf, got {media_type}")]
    InvalidFileType { media_type: String },

    #[error("request failed: {0}")]
    Transport(String),

    #[error("server rejected the request: {}", .0.as_deref().unwrap_or("no message"))]
    Application(Option<String>),

    #[error("no file selected")]
    NoFileSelected,

    #[error("a document is already loaded")]
    AlreadyLoaded,

    #[error("no document loaded yet")]
    NotLoaded,

    #[error("question is empty")]
    EmptyQuestion,

    #[error("another request is still in flight")]
    Busy,

    #[error("no ingestion job id known")]
    NoJob,

    #[error("configuration error: {0}")]
    Config(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<reqwest::Error> for ClientError {
    fn from(err: reqwest::Error) -> Self {
        ClientError::Transport(err.to_string())
    }
}

impl ClientError {
    /// Text shown to the user for a failed request: the server's own message
    /// when it sent one, otherwise `fallback`.
    pub fn user_message(&self, fallback: &str) -> String {
        match self {
            ClientError::Application(Some(message)) if !message.is_empty() => message.clone(),
            _ => fallback.to_string(),
        }
    }

    /// Whether this error came back from a request rather than from a local check.
    pub fn is_request_failure(&self) -> bool {
        matches!(self, ClientError::Transport(_) | ClientError::Application(_))
    }
}

pub type Result<T> = std::result::Result<T, ClientError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_message_prefers_server_text() {
        let err = ClientError::Application(Some("PDF is encrypted".to_string()));
        assert_eq!(err.user_message("Failed to upload PDF"), "PDF is encrypted");
    }

    #[test]
    fn user_message_falls_back_for_transport_and_empty() {
        let transport = ClientError::Transport("connection refused".to_string());
        assert_eq!(transport.user_message("Failed to get answer"), "Failed to get answer");

        let silent = ClientError::Application(None);
        assert_eq!(silent.user_message("Failed to get answer"), "Failed to get answer");

        let blank = ClientError::Application(Some(String::new()));
        assert_eq!(blank.user_message("Failed to get answer"), "Failed to get answer");
    }

    #[test]
    fn only_network_errors_count_as_request_failures() {
        assert!(ClientError::Transport("x".into()).is_request_failure());
        assert!(ClientError::Application(None).is_request_failure());
        assert!(!ClientError::Busy.is_request_failure());
        assert!(!ClientError::InvalidFileType { media_type: "text/plain".into() }.is_request_failure());
    }
}
