use std::fmt;

use brandes_sparse::AlgebraError;

/// Machine-readable error codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    InvalidInput,
    OutOfMemory,
    EngineFailure,
}

impl ErrorCode {
    /// Stable code identifier (`E####`) for machine parsing.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::InvalidInput => "E1001",
            Self::OutOfMemory => "E2001",
            Self::EngineFailure => "E3001",
        }
    }

    /// Short human-facing summary for logs and terminal output.
    #[must_use]
    pub const fn message(self) -> &'static str {
        match self {
            Self::InvalidInput => "Invalid centrality input",
            Self::OutOfMemory => "Out of memory",
            Self::EngineFailure => "Sparse algebra failure",
        }
    }

    /// Optional remediation hint.
    #[must_use]
    pub const fn hint(self) -> Option<&'static str> {
        match self {
            Self::InvalidInput => {
                Some("Pass a square adjacency and a non-empty list of distinct in-range sources.")
            }
            Self::OutOfMemory => Some("Lower `batch_size` or sample fewer sources."),
            Self::EngineFailure => None,
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Errors returned by a centrality computation.
///
/// Every variant is terminal for the call that produced it; no partial
/// result is ever returned alongside an error.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BcError {
    /// Rejected before any algebra call.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// A primitive reported an error (allocation failure included).
    #[error(transparent)]
    Engine(#[from] AlgebraError),
}

impl BcError {
    pub(crate) fn invalid(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }

    /// Classify the error.
    #[must_use]
    pub const fn code(&self) -> ErrorCode {
        match self {
            Self::InvalidInput(_) => ErrorCode::InvalidInput,
            Self::Engine(AlgebraError::OutOfMemory { .. }) => ErrorCode::OutOfMemory,
            Self::Engine(_) => ErrorCode::EngineFailure,
        }
    }
}

pub type Result<T> = std::result::Result<T, BcError>;
