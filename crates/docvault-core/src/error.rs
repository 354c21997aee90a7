//! Unified application error types for DocVault.
//!
//! All crates map their internal errors into [`AppError`] for consistent
//! propagation through the ? operator. The kind set is closed: domain
//! kinds are returned as-is to the boundary for status-code mapping,
//! infrastructure kinds wrap an underlying cause for diagnostics while
//! presenting a stable message to callers.

use std::fmt;
use thiserror::Error;

/// Top-level error kind categorization used across the entire application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum ErrorKind {
    /// The supplied login is empty or otherwise unusable.
    InvalidLogin,
    /// The supplied password failed policy validation or did not match.
    InvalidPassword,
    /// A user with the requested login already exists.
    UserAlreadyExists,
    /// No user with the requested login or id exists.
    UserNotFound,
    /// The bearer token is malformed, unsigned, expired, or absent from
    /// the token ledger. Sub-causes are carried only in the source chain.
    InvalidToken,
    /// No document matched the requested id within the caller's grant set.
    NoDocuments,
    /// A store insert failed.
    InsertFailed,
    /// A store lookup failed.
    FindFailed,
    /// A store deletion failed.
    DeleteFailed,
    /// The operation exceeded its configured deadline.
    Timeout,
    /// A configuration error occurred.
    Configuration,
    /// An internal error occurred (hashing, signing, and similar).
    Internal,
}

impl ErrorKind {
    /// Whether this kind is a domain outcome (mapped to a client-facing
    /// status) rather than an infrastructure failure.
    pub fn is_domain(self) -> bool {
        matches!(
            self,
            Self::InvalidLogin
                | Self::InvalidPassword
                | Self::UserAlreadyExists
                | Self::UserNotFound
                | Self::InvalidToken
                | Self::NoDocuments
        )
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidLogin => write!(f, "INVALID_LOGIN"),
            Self::InvalidPassword => write!(f, "INVALID_PASSWORD"),
            Self::UserAlreadyExists => write!(f, "USER_ALREADY_EXISTS"),
            Self::UserNotFound => write!(f, "USER_NOT_FOUND"),
            Self::InvalidToken => write!(f, "INVALID_TOKEN"),
            Self::NoDocuments => write!(f, "NO_DOCUMENTS"),
            Self::InsertFailed => write!(f, "INSERT_FAILED"),
            Self::FindFailed => write!(f, "FIND_FAILED"),
            Self::DeleteFailed => write!(f, "DELETE_FAILED"),
            Self::Timeout => write!(f, "TIMEOUT"),
            Self::Configuration => write!(f, "CONFIGURATION"),
            Self::Internal => write!(f, "INTERNAL"),
        }
    }
}

/// The unified application error used throughout DocVault.
///
/// Errors are matched by [`ErrorKind`] tag rather than by identity or
/// downcasting. The optional source preserves the underlying store or
/// library error for logging at the boundary.
#[derive(Debug, Error)]
#[error("{kind}: {message}")]
pub struct AppError {
    /// The category of error.
    pub kind: ErrorKind,
    /// A human-readable error message.
    pub message: String,
    /// Optional underlying cause.
    #[source]
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl AppError {
    /// Create a new application error.
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            source: None,
        }
    }

    /// Create a new application error with an underlying cause.
    pub fn with_source(
        kind: ErrorKind,
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self {
            kind,
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create an invalid-login error.
    pub fn invalid_login(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::InvalidLogin, message)
    }

    /// Create an invalid-password error.
    pub fn invalid_password(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::InvalidPassword, message)
    }

    /// Create a user-already-exists error.
    pub fn user_already_exists(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::UserAlreadyExists, message)
    }

    /// Create a user-not-found error.
    pub fn user_not_found(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::UserNotFound, message)
    }

    /// Create an invalid-token error.
    pub fn invalid_token(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::InvalidToken, message)
    }

    /// Create a no-documents error.
    pub fn no_documents(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::NoDocuments, message)
    }

    /// Create a timeout error.
    pub fn timeout(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Timeout, message)
    }

    /// Create a configuration error.
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Configuration, message)
    }

    /// Create an internal error.
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Internal, message)
    }
}

impl Clone for AppError {
    fn clone(&self) -> Self {
        Self {
            kind: self.kind,
            message: self.message.clone(),
            source: None,
        }
    }
}

impl From<config::ConfigError> for AppError {
    fn from(err: config::ConfigError) -> Self {
        Self::with_source(
            ErrorKind::Configuration,
            format!("Configuration error: {err}"),
            err,
        )
    }
}
