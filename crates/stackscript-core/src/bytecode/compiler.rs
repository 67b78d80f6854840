//! Bytecode compiler - folds a token stream into script bytecode

use tracing::{debug, trace};

use crate::token::{Token, TokenKind, TokenSource};

use super::error::{CompileError, CompileErrorKind, CompileResult};
use super::number::{self, NumberEncoding};
use super::opcode::Opcode;
use super::script::Script;

/// Bytecode compiler
///
/// Holds only configuration; every call to [`Compiler::compile`] starts a
/// fresh output buffer, so one compiler can be shared between threads.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Compiler {
    /// Initial capacity of the output buffer
    capacity: usize,

    /// Longest data push accepted, in bytes
    push_limit: u32,
}

impl Default for Compiler {
    fn default() -> Self {
        Self::new()
    }
}

impl Compiler {
    /// Output capacity reserved up front unless configured otherwise
    pub const DEFAULT_CAPACITY: usize = 128;

    /// Create a new compiler with the default settings
    #[must_use]
    pub fn new() -> Self {
        Self {
            capacity: Self::DEFAULT_CAPACITY,
            push_limit: u32::MAX,
        }
    }

    /// Set the initial capacity of the output buffer
    #[must_use]
    pub fn with_capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity;
        self
    }

    /// Reject data and number pushes longer than `limit` bytes
    #[must_use]
    pub fn with_push_limit(mut self, limit: u32) -> Self {
        self.push_limit = limit;
        self
    }

    /// The longest push this compiler accepts
    #[must_use]
    pub fn push_limit(&self) -> u32 {
        self.push_limit
    }

    /// Compile a token stream into a script
    ///
    /// Tokens are read until `EndOfScript`. The first invalid or unknown
    /// token aborts compilation; no further tokens are read and the partial
    /// output is dropped.
    pub fn compile<S: TokenSource>(&self, mut source: S) -> CompileResult<Script> {
        let mut script = Script::with_capacity(self.capacity);
        let mut index = 0;

        loop {
            let token = source.next_token();
            trace!(index, kind = %token.kind(), "compiling token");

            match token {
                Token::EndOfScript => break,
                Token::Data(data) => self.push(&mut script, &data, index)?,
                Token::Number(n) => match number::encode(&n) {
                    NumberEncoding::Opcode(op) => script.write_op(op),
                    NumberEncoding::Push(bytes) => self.push(&mut script, &bytes, index)?,
                },
                Token::Operation(op) => script.write_op(op),
                Token::CodeSeparator => script.write_op(Opcode::CODESEPARATOR),
                Token::If => script.write_op(Opcode::IF),
                Token::NotIf => script.write_op(Opcode::NOTIF),
                Token::Else => script.write_op(Opcode::ELSE),
                Token::EndIf => script.write_op(Opcode::ENDIF),
                Token::Invalid => {
                    debug!(index, "invalid token, aborting compilation");
                    return Err(CompileError::new(CompileErrorKind::InvalidToken, index));
                }
                Token::Other(tag) => {
                    debug!(index, tag, "unknown token, aborting compilation");
                    return Err(CompileError::new(
                        CompileErrorKind::UnknownToken(TokenKind::Other(tag)),
                        index,
                    )
                    .with_hint("the token source produced a kind this compiler cannot encode"));
                }
            }

            index += 1;
        }

        debug!(tokens = index, bytes = script.len(), "compiled script");
        Ok(script)
    }

    fn push(&self, script: &mut Script, data: &[u8], index: usize) -> CompileResult<()> {
        let limit = self.push_limit;
        if u32::try_from(data.len()).map_or(true, |len| len > limit) {
            return Err(CompileError::new(
                CompileErrorKind::PushTooLarge {
                    len: data.len(),
                    limit,
                },
                index,
            ));
        }

        script
            .write_push(data)
            .map_err(|kind| CompileError::new(kind, index))
    }
}

/// Compile a token stream with the default compiler settings
pub fn compile<S: TokenSource>(source: S) -> CompileResult<Vec<u8>> {
    Compiler::new().compile(source).map(Script::into_bytes)
}
