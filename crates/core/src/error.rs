use thiserror::Error;

/// Result type for articlesearch operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for articlesearch operations
#[derive(Error, Debug)]
pub enum Error {
    /// Configuration related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// The search endpoint could not be reached or the transfer failed
    #[error("Network error: {0}")]
    Network(String),

    /// The response body was not a valid search response
    #[error("{}", decode_message(.status, .message))]
    Decode {
        /// HTTP status, recorded only when it was not a success
        status: Option<u16>,
        message: String,
    },

    /// The backend answered with an error object instead of results
    #[error("Search server error: {error}{}", details_suffix(.details))]
    Server {
        error: String,
        details: Option<String>,
    },

    /// The query input is not available
    #[error("Query input unavailable: {0}")]
    MissingInput(String),

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

fn decode_message(status: &Option<u16>, message: &str) -> String {
    match status {
        Some(code) => format!("Invalid search response (HTTP {code}): {message}"),
        None => format!("Invalid search response: {message}"),
    }
}

fn details_suffix(details: &Option<String>) -> String {
    match details.as_deref() {
        Some(d) if !d.is_empty() => format!(" ({d})"),
        _ => String::new(),
    }
}

impl Error {
    /// Creates a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Creates a network error
    pub fn network(msg: impl Into<String>) -> Self {
        Self::Network(msg.into())
    }

    /// Creates a decode error without an HTTP status
    pub fn decode(msg: impl Into<String>) -> Self {
        Self::Decode {
            status: None,
            message: msg.into(),
        }
    }

    /// Creates a server-reported error
    pub fn server(error: impl Into<String>, details: Option<String>) -> Self {
        Self::Server {
            error: error.into(),
            details,
        }
    }

    /// Creates a missing input error
    pub fn missing_input(msg: impl Into<String>) -> Self {
        Self::MissingInput(msg.into())
    }

    /// Creates an invalid input error
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }

    /// Attaches a non-success HTTP status to a decode error; other variants pass through
    pub fn with_http_status(self, status: u16) -> Self {
        match self {
            Self::Decode { message, .. } => Self::Decode {
                status: Some(status),
                message,
            },
            other => other,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_message_includes_status_when_present() {
        let err = Error::decode("expected value at line 1 column 1").with_http_status(502);
        assert_eq!(
            err.to_string(),
            "Invalid search response (HTTP 502): expected value at line 1 column 1"
        );

        let err = Error::decode("missing field `results`");
        assert_eq!(
            err.to_string(),
            "Invalid search response: missing field `results`"
        );
    }

    #[test]
    fn test_with_http_status_leaves_other_variants_alone() {
        let err = Error::network("connection refused").with_http_status(500);
        assert!(matches!(err, Error::Network(_)));
    }

    #[test]
    fn test_server_error_display() {
        let err = Error::server("Search system not initialized", Some("check logs".into()));
        assert_eq!(
            err.to_string(),
            "Search server error: Search system not initialized (check logs)"
        );

        let err = Error::server("boom", None);
        assert_eq!(err.to_string(), "Search server error: boom");
    }
}
