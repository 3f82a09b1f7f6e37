use serde::{Deserialize, Serialize};

use crate::store::StoreError;

pub type ResolverResult<T> = Result<T, ResolverError>;

/// Failure of a single resolver invocation.
///
/// Every variant is returned to the dispatcher as-is; resolvers never retry
/// or recover locally.
#[derive(Debug, thiserror::Error)]
pub enum ResolverError {
    #[error("invalid `{field}`: {reason}")]
    Validation { field: String, reason: String },
    #[error("storage failure: {0}")]
    Storage(#[source] StoreError),
    #[error("request cancelled")]
    Cancelled,
    #[error("not implemented: {operation}")]
    NotImplemented { operation: String },
}

impl ResolverError {
    pub fn validation(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Validation {
            field: field.into(),
            reason: reason.into(),
        }
    }

    pub fn not_implemented(operation: impl Into<String>) -> Self {
        Self::NotImplemented {
            operation: operation.into(),
        }
    }

    pub fn code(&self) -> ErrorCode {
        match self {
            Self::Validation { .. } => ErrorCode::ValidationError,
            Self::Storage(_) => ErrorCode::StorageError,
            Self::Cancelled => ErrorCode::Cancelled,
            Self::NotImplemented { .. } => ErrorCode::NotImplemented,
        }
    }
}

impl From<StoreError> for ResolverError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Cancelled => Self::Cancelled,
            other => Self::Storage(other),
        }
    }
}

/// Wire-level error code carried in structured operation errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    ValidationError,
    StorageError,
    Cancelled,
    NotImplemented,
}

impl ErrorCode {
    /// Map to the corresponding JSON-RPC 2.0 error code.
    ///
    /// Caller-correctable input → -32602 (Invalid params)
    /// Everything else          → -32603 (Internal error)
    pub fn json_rpc_code(&self) -> i32 {
        match self {
            Self::ValidationError => -32602,
            Self::StorageError | Self::Cancelled | Self::NotImplemented => -32603,
        }
    }
}
