//! Typed service errors shared by the asset and record stores.
//!
//! Every error is scoped to a single request; nothing here is fatal to the
//! process. The `ResponseError` impl maps each kind to an HTTP status and a
//! JSON body so handlers can propagate with `?`.

use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use serde_json::json;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ServiceError {
    /// Bad or missing input, correctable by the caller.
    #[error("{0}")]
    Validation(String),

    /// Upload exceeds the configured size cap.
    #[error("File exceeds the maximum allowed size of {limit} bytes")]
    PayloadTooLarge { limit: u64 },

    /// The named asset does not exist.
    #[error("File not found: {0}")]
    NotFound(String),

    /// Filesystem failure. `path` is kept relative so absolute paths never
    /// reach untrusted callers; the full cause stays available for logging.
    #[error("Storage failure during {op} on {path}")]
    StorageIo {
        op: &'static str,
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Malformed persisted document. Recovered locally by the record store
    /// and only surfaced if a caller bypasses that recovery.
    #[error("Failed to parse stored document: {0}")]
    Parse(String),
}

impl ResponseError for ServiceError {
    fn status_code(&self) -> StatusCode {
        match self {
            ServiceError::Validation(_) => StatusCode::BAD_REQUEST,
            ServiceError::PayloadTooLarge { .. } => StatusCode::PAYLOAD_TOO_LARGE,
            ServiceError::NotFound(_) => StatusCode::NOT_FOUND,
            ServiceError::StorageIo { .. } | ServiceError::Parse(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(json!({
            "success": false,
            "message": self.to_string(),
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(
            ServiceError::Validation("bad".into()).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ServiceError::PayloadTooLarge { limit: 16 }.status_code(),
            StatusCode::PAYLOAD_TOO_LARGE
        );
        assert_eq!(
            ServiceError::NotFound("a.png".into()).status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            ServiceError::Parse("oops".into()).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_storage_io_message_has_no_absolute_path() {
        let err = ServiceError::StorageIo {
            op: "write",
            path: "abc123.png".into(),
            source: std::io::Error::new(std::io::ErrorKind::Other, "disk full"),
        };
        let message = err.to_string();
        assert!(message.contains("write"));
        assert!(message.contains("abc123.png"));
        assert!(!message.contains('/'));
    }
}
