use std::io;

use thiserror::Error;

// -----------------------------------------------------------------------------
// Error

/// Errors of a serialize or deserialize pass.
///
/// Every error aborts the whole top-level call. The stream is left at an
/// unspecified position, and decoded targets may be partially filled.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("`{type_path}` is not a primitive type")]
    UnsupportedPrimitiveType { type_path: &'static str },

    #[error("no serializer strategy handles `{type_path}`")]
    NoStrategyFound { type_path: &'static str },

    #[error("cannot resolve type `{type_path}`: {reason}")]
    TypeResolution {
        type_path: String,
        reason: &'static str,
    },

    #[error("reference id {id} was never remembered")]
    DanglingReference { id: u32 },

    #[error("cannot access member `{member}` of `{type_path}`")]
    MemberAccess {
        type_path: &'static str,
        member: &'static str,
    },

    #[error("`{type_path}` has no member named `{member}`")]
    UnknownMember {
        type_path: &'static str,
        member: String,
    },

    #[error("`{type_path}` has no variant with tag {index}")]
    UnknownVariant { type_path: &'static str, index: i32 },

    #[error("type mismatch: expected `{expected}`, found `{found}`")]
    TypeMismatch {
        expected: &'static str,
        found: &'static str,
    },

    #[error("shared object `{type_path}` is mutably borrowed")]
    SharedBorrow { type_path: &'static str },

    #[error("unexpected null for non-nullable `{type_path}`")]
    UnexpectedNull { type_path: &'static str },

    #[error("`{type_path}` expects {expected} elements, found {found}")]
    LengthMismatch {
        type_path: &'static str,
        expected: usize,
        found: usize,
    },

    #[error("invalid data: {0}")]
    InvalidData(String),

    #[error("nesting deeper than {limit} levels")]
    DepthLimitExceeded { limit: usize },
}

impl Error {
    #[cold]
    pub(crate) fn invalid_data(message: impl Into<String>) -> Self {
        Self::InvalidData(message.into())
    }
}

/// `Result` with [`Error`] as the error type.
pub type Result<T, E = Error> = core::result::Result<T, E>;
