//! Stackscript Core - compiler for push-based stack-machine scripts
//!
//! This crate turns a stream of lexical tokens into Bitcoin-style script
//! bytecode:
//! - Token: The token types and the `TokenSource` pull interface
//! - Bytecode: Opcodes, the compiled `Script`, the compiler and a
//!   disassembler

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Token module - input of the compiler
pub mod token;

/// Bytecode module - encoding rules and compiler
pub mod bytecode;

/// Test utilities - helpers for testing compiled scripts
pub mod testutil;

/// Convenience re-export of the compile entry point
pub use bytecode::compile;

/// Convenience re-export of bytecode compiler
pub use bytecode::Compiler;

/// Convenience re-export of compiled script
pub use bytecode::Script;

/// Convenience re-export of token types
pub use token::{Token, TokenKind, TokenSource};
