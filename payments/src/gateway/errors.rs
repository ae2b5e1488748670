use derive_more::{Display, Error};

/// Longest response body excerpt kept in an error message
const MAX_BODY_CHARS: usize = 300;

/// Plain tag of a [`GatewayError`], handy for matching without the message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum ErrorKind {
    Authentication,
    Authorization,
    NotFound,
    UpgradeRequired,
    TooManyRequests,
    Server,
    ServiceUnavailable,
    GatewayTimeout,
    Unexpected,
}

/// Failures reported by the payment gateway or on the way to it.
///
/// Business level declines are not errors, they come back as regular outcomes.
#[derive(Debug, Display, Error, PartialEq, Eq)]
pub enum GatewayError {
    #[display("{_0}")]
    Authentication(#[error(not(source))] String),
    #[display("{_0}")]
    Authorization(#[error(not(source))] String),
    #[display("{_0}")]
    NotFound(#[error(not(source))] String),
    #[display("{_0}")]
    UpgradeRequired(#[error(not(source))] String),
    #[display("{_0}")]
    TooManyRequests(#[error(not(source))] String),
    #[display("{_0}")]
    Server(#[error(not(source))] String),
    #[display("{_0}")]
    ServiceUnavailable(#[error(not(source))] String),
    #[display("{_0}")]
    GatewayTimeout(#[error(not(source))] String),
    #[display("{_0}")]
    Unexpected(#[error(not(source))] String),
}

impl GatewayError {
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        let message = message.into();
        match kind {
            ErrorKind::Authentication => GatewayError::Authentication(message),
            ErrorKind::Authorization => GatewayError::Authorization(message),
            ErrorKind::NotFound => GatewayError::NotFound(message),
            ErrorKind::UpgradeRequired => GatewayError::UpgradeRequired(message),
            ErrorKind::TooManyRequests => GatewayError::TooManyRequests(message),
            ErrorKind::Server => GatewayError::Server(message),
            ErrorKind::ServiceUnavailable => GatewayError::ServiceUnavailable(message),
            ErrorKind::GatewayTimeout => GatewayError::GatewayTimeout(message),
            ErrorKind::Unexpected => GatewayError::Unexpected(message),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            GatewayError::Authentication(_) => ErrorKind::Authentication,
            GatewayError::Authorization(_) => ErrorKind::Authorization,
            GatewayError::NotFound(_) => ErrorKind::NotFound,
            GatewayError::UpgradeRequired(_) => ErrorKind::UpgradeRequired,
            GatewayError::TooManyRequests(_) => ErrorKind::TooManyRequests,
            GatewayError::Server(_) => ErrorKind::Server,
            GatewayError::ServiceUnavailable(_) => ErrorKind::ServiceUnavailable,
            GatewayError::GatewayTimeout(_) => ErrorKind::GatewayTimeout,
            GatewayError::Unexpected(_) => ErrorKind::Unexpected,
        }
    }

    pub fn message(&self) -> &str {
        match self {
            GatewayError::Authentication(msg)
            | GatewayError::Authorization(msg)
            | GatewayError::NotFound(msg)
            | GatewayError::UpgradeRequired(msg)
            | GatewayError::TooManyRequests(msg)
            | GatewayError::Server(msg)
            | GatewayError::ServiceUnavailable(msg)
            | GatewayError::GatewayTimeout(msg)
            | GatewayError::Unexpected(msg) => msg,
        }
    }

    /// Same kind of error with a different message
    pub fn with_message(&self, message: impl Into<String>) -> Self {
        Self::new(self.kind(), message)
    }

    /// Maps a non successful HTTP status to an error kind
    pub fn from_status(status: u16, body: &str) -> Self {
        let kind = match status {
            401 => ErrorKind::Authentication,
            403 => ErrorKind::Authorization,
            404 => ErrorKind::NotFound,
            426 => ErrorKind::UpgradeRequired,
            429 => ErrorKind::TooManyRequests,
            500 => ErrorKind::Server,
            503 => ErrorKind::ServiceUnavailable,
            504 => ErrorKind::GatewayTimeout,
            _ => ErrorKind::Unexpected,
        };
        let body = body.trim();

        if body.is_empty() {
            return Self::new(kind, format!("braintree returned status {status}"));
        }
        if body.chars().count() > MAX_BODY_CHARS {
            let head: String = body.chars().take(MAX_BODY_CHARS).collect();
            return Self::new(kind, format!("braintree returned status {status}: {head}..."));
        }
        Self::new(kind, format!("braintree returned status {status}: {body}"))
    }

    /// Maps a GraphQL `errorClass`, `None` for validation errors which are not faults
    pub fn from_error_class(error_class: &str, message: &str) -> Option<Self> {
        let kind = match error_class {
            "VALIDATION" => return None,
            "AUTHENTICATION" => ErrorKind::Authentication,
            "AUTHORIZATION" => ErrorKind::Authorization,
            "NOT_FOUND" => ErrorKind::NotFound,
            "UNSUPPORTED_CLIENT" => ErrorKind::UpgradeRequired,
            "RESOURCE_LIMIT" => ErrorKind::TooManyRequests,
            "INTERNAL" => ErrorKind::Server,
            "SERVICE_AVAILABILITY" => ErrorKind::ServiceUnavailable,
            _ => ErrorKind::Unexpected,
        };

        Some(Self::new(kind, message))
    }
}

impl From<reqwest::Error> for GatewayError {
    fn from(err: reqwest::Error) -> Self {
        match err.status() {
            Some(status) => Self::from_status(status.as_u16(), ""),
            None => GatewayError::Unexpected(format!("request to braintree failed: {err}")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        let cases = [
            (401, ErrorKind::Authentication),
            (403, ErrorKind::Authorization),
            (404, ErrorKind::NotFound),
            (426, ErrorKind::UpgradeRequired),
            (429, ErrorKind::TooManyRequests),
            (500, ErrorKind::Server),
            (503, ErrorKind::ServiceUnavailable),
            (504, ErrorKind::GatewayTimeout),
            (418, ErrorKind::Unexpected),
            (502, ErrorKind::Unexpected),
        ];

        for (status, kind) in cases {
            assert_eq!(GatewayError::from_status(status, "").kind(), kind, "{status}");
        }
    }

    #[test]
    fn test_status_message_keeps_body() {
        let err = GatewayError::from_status(500, " boom ");

        assert_eq!(err.to_string(), "braintree returned status 500: boom");
    }

    #[test]
    fn test_status_message_truncates_long_body() {
        let page = format!("<html>{}</html>", "x".repeat(5_000));

        let err = GatewayError::from_status(500, &page);

        assert_eq!(err.kind(), ErrorKind::Server);
        assert!(err.message().ends_with("..."));
        assert!(err.message().chars().count() < MAX_BODY_CHARS + 50);
        assert!(!err.message().contains("</html>"));
    }

    #[test]
    fn test_error_class_mapping() {
        assert!(GatewayError::from_error_class("VALIDATION", "bad card").is_none());
        assert_eq!(
            GatewayError::from_error_class("AUTHENTICATION", "nope"),
            Some(GatewayError::Authentication("nope".into()))
        );
        assert_eq!(
            GatewayError::from_error_class("INTERNAL", "oops").map(|e| e.kind()),
            Some(ErrorKind::Server)
        );
        assert_eq!(
            GatewayError::from_error_class("SOMETHING_NEW", "?").map(|e| e.kind()),
            Some(ErrorKind::Unexpected)
        );
    }

    #[test]
    fn test_with_message_keeps_kind() {
        let err = GatewayError::NotFound("raw".into()).with_message("clarified");

        assert_eq!(err, GatewayError::NotFound("clarified".into()));
        assert_eq!(err.message(), "clarified");
    }
}
