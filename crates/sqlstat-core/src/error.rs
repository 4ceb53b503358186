//! Shared error type across sqlstat crates.

use thiserror::Error;

/// Stable error categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Caller passed an unusable argument; the call may be retried.
    InvalidArgument,
    /// A pool is already attached to this collector.
    AlreadyAttached,
    /// Look-up of a metric that was never registered.
    UnknownMetric,
    /// Same fully-qualified gauge name registered twice.
    DuplicateRegistration,
    /// Configuration rejected during parsing or validation.
    InvalidConfig,
}

impl ErrorKind {
    /// String representation used in logs.
    pub fn as_str(self) -> &'static str {
        match self {
            ErrorKind::InvalidArgument => "INVALID_ARGUMENT",
            ErrorKind::AlreadyAttached => "ALREADY_ATTACHED",
            ErrorKind::UnknownMetric => "UNKNOWN_METRIC",
            ErrorKind::DuplicateRegistration => "DUPLICATE_REGISTRATION",
            ErrorKind::InvalidConfig => "INVALID_CONFIG",
        }
    }
}

/// Shared result type.
pub type Result<T> = std::result::Result<T, SqlStatError>;

/// Unified error type used by core and collector.
#[derive(Debug, Error)]
pub enum SqlStatError {
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
    #[error("pool already attached")]
    AlreadyAttached,
    #[error("unknown metric: {0}")]
    UnknownMetric(String),
    #[error("duplicate registration: {0}")]
    DuplicateRegistration(String),
    #[error("invalid config: {0}")]
    InvalidConfig(String),
}

impl SqlStatError {
    /// Map the error to its stable category.
    pub fn kind(&self) -> ErrorKind {
        match self {
            SqlStatError::InvalidArgument(_) => ErrorKind::InvalidArgument,
            SqlStatError::AlreadyAttached => ErrorKind::AlreadyAttached,
            SqlStatError::UnknownMetric(_) => ErrorKind::UnknownMetric,
            SqlStatError::DuplicateRegistration(_) => ErrorKind::DuplicateRegistration,
            SqlStatError::InvalidConfig(_) => ErrorKind::InvalidConfig,
        }
    }

    /// Programmer errors that should be unreachable under correct wiring.
    pub fn is_invariant_violation(&self) -> bool {
        matches!(
            self.kind(),
            ErrorKind::UnknownMetric | ErrorKind::DuplicateRegistration
        )
    }
}
