//! Compiler error types

use std::fmt;

use thiserror::Error;

use crate::token::TokenKind;

/// A compilation error
///
/// Compilation stops at the first error; no bytecode is returned with it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompileError {
    /// The kind of error
    pub kind: CompileErrorKind,

    /// Zero-based position of the offending token in the stream
    pub index: usize,

    /// Optional hint for fixing the error
    pub hint: Option<String>,
}

impl CompileError {
    /// Create a new compile error
    #[must_use]
    pub fn new(kind: CompileErrorKind, index: usize) -> Self {
        Self {
            kind,
            index,
            hint: None,
        }
    }

    /// Add a hint to the error
    #[must_use]
    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }
}

impl fmt::Display for CompileError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (token {})", self.kind, self.index)?;
        if let Some(hint) = &self.hint {
            write!(f, "\n  hint: {hint}")?;
        }
        Ok(())
    }
}

impl std::error::Error for CompileError {}

/// The kind of compilation error
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CompileErrorKind {
    /// The token source reported a lexical error
    #[error("invalid token")]
    InvalidToken,

    /// The token source produced a kind the compiler does not handle
    #[error("unknown token {0}")]
    UnknownToken(TokenKind),

    /// A push payload is longer than the configured limit
    #[error("push of {len} bytes exceeds the limit of {limit} bytes")]
    PushTooLarge { len: usize, limit: u32 },
}

/// Result type for compilation operations
pub type CompileResult<T> = Result<T, CompileError>;

/// An error found while decoding compiled bytecode
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DecodeError {
    /// A PUSHDATA marker is not followed by its full length field
    #[error("truncated push length at offset {offset}")]
    TruncatedPrefix { offset: usize },

    /// A push announces more payload bytes than the script holds
    #[error("push at offset {offset} needs {expected} bytes, only {available} remain")]
    TruncatedPayload {
        offset: usize,
        expected: usize,
        available: usize,
    },
}
