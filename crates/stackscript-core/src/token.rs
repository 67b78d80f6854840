//! Token types consumed by the compiler
//!
//! Tokens come from an external lexer. Each token carries its own payload,
//! so there is no "current value" side channel to query after reading a
//! token.

use std::fmt;

use num_bigint::BigInt;

use crate::bytecode::Opcode;

/// A lexical token of a stack-machine script
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    /// Literal bytes to push
    Data(Vec<u8>),

    /// Literal integer to push
    Number(BigInt),

    /// An operation, copied into the output as-is
    Operation(Opcode),

    CodeSeparator,
    If,
    NotIf,
    Else,
    EndIf,

    /// The lexer could not make sense of its input
    Invalid,

    /// A token kind this compiler does not understand, by raw kind tag
    Other(u16),

    /// End of the token stream
    EndOfScript,
}

impl Token {
    /// Create a number token
    #[must_use]
    pub fn number(n: impl Into<BigInt>) -> Self {
        Token::Number(n.into())
    }

    /// Create a data token
    #[must_use]
    pub fn data(bytes: impl Into<Vec<u8>>) -> Self {
        Token::Data(bytes.into())
    }

    /// Create an operation token
    #[must_use]
    pub fn op(byte: u8) -> Self {
        Token::Operation(Opcode(byte))
    }

    /// The payload-free kind of this token
    #[must_use]
    pub fn kind(&self) -> TokenKind {
        match self {
            Token::Data(_) => TokenKind::Data,
            Token::Number(_) => TokenKind::Number,
            Token::Operation(_) => TokenKind::Operation,
            Token::CodeSeparator => TokenKind::CodeSeparator,
            Token::If => TokenKind::If,
            Token::NotIf => TokenKind::NotIf,
            Token::Else => TokenKind::Else,
            Token::EndIf => TokenKind::EndIf,
            Token::Invalid => TokenKind::Invalid,
            Token::Other(tag) => TokenKind::Other(*tag),
            Token::EndOfScript => TokenKind::EndOfScript,
        }
    }
}

/// The kind of a token, without its payload
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    Data,
    Number,
    Operation,
    CodeSeparator,
    If,
    NotIf,
    Else,
    EndIf,
    Invalid,
    Other(u16),
    EndOfScript,
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenKind::Data => write!(f, "DATA"),
            TokenKind::Number => write!(f, "NUMBER"),
            TokenKind::Operation => write!(f, "OPERATION"),
            TokenKind::CodeSeparator => write!(f, "CODESEPARATOR"),
            TokenKind::If => write!(f, "IF"),
            TokenKind::NotIf => write!(f, "NOTIF"),
            TokenKind::Else => write!(f, "ELSE"),
            TokenKind::EndIf => write!(f, "ENDIF"),
            TokenKind::Invalid => write!(f, "INVALID"),
            TokenKind::Other(tag) => write!(f, "TOKEN({tag})"),
            TokenKind::EndOfScript => write!(f, "ENDOFSCRIPT"),
        }
    }
}

/// A pull-based source of tokens
///
/// The compiler calls [`TokenSource::next_token`] until it sees
/// [`Token::EndOfScript`] or an error, and never calls it again after that.
pub trait TokenSource {
    /// Read the next token, or `EndOfScript` once the stream is exhausted
    fn next_token(&mut self) -> Token;
}

impl<I> TokenSource for I
where
    I: Iterator<Item = Token>,
{
    fn next_token(&mut self) -> Token {
        self.next().unwrap_or(Token::EndOfScript)
    }
}
