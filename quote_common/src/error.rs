//! Error types shared between the message service and the billboard.
//!
//! The `QuoteError` enum unifies the domain failures (missing quote, empty
//! source, failed upstream call) with the plumbing failures of both services
//! (I/O, JSON, storage, configuration, poisoned locks), allowing crates to
//! propagate a single error type. It also decides how each failure is rendered
//! as an HTTP response.
use std::io;
use std::sync::PoisonError;

use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use log::error;
use thiserror::Error;

/// Unified error type shared by both services.
#[derive(Error, Debug)]
pub enum QuoteError {
    /// No quote with the requested id exists in the source.
    #[error("Quote not found: {0}")]
    NotFound(i64),

    /// The source holds no quotes, so nothing can be picked.
    #[error("No quotes configured")]
    EmptySource,

    /// The downstream message service call failed, timed out, or returned
    /// something that is not a quote.
    #[error("Upstream error: {0}")]
    Upstream(String),

    /// Failure reported by the backing quote store.
    #[error("Storage error: {0}")]
    Storage(String),

    /// Invalid or unreadable configuration.
    #[error("Configuration error: {0}")]
    Config(String),

    /// I/O error originating from the standard library or sockets/files.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Failure while encoding/decoding JSON via serde_json.
    #[error("JSON serialization/deserialization error: {0}")]
    SerdeJson(#[from] serde_json::Error),

    /// Error indicating a poisoned mutex/lock was encountered.
    #[error("Mutex Lock Poisoned: {0}")]
    MutexLock(String),
}

impl<T> From<PoisonError<T>> for QuoteError {
    fn from(err: PoisonError<T>) -> Self {
        QuoteError::MutexLock(err.to_string())
    }
}

impl ResponseError for QuoteError {
    fn status_code(&self) -> StatusCode {
        match self {
            QuoteError::NotFound(_) => StatusCode::NOT_FOUND,
            QuoteError::Upstream(_) => StatusCode::BAD_GATEWAY,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// `NotFound` answers with an empty body; server errors are logged and
    /// answered with a short reason that never echoes internal details.
    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();
        match self {
            QuoteError::NotFound(_) => HttpResponse::build(status).finish(),
            _ => {
                error!("Request failed: {}", self);
                let reason = status.canonical_reason().unwrap_or("Server Error");
                HttpResponse::build(status).body(reason)
            }
        }
    }
}
