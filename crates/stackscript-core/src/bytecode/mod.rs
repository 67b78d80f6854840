//! Bytecode module for stackscript
//!
//! This module provides:
//! - `Opcode`: Opaque opcode bytes and the values the compiler emits itself
//! - `Script`: An append-only sequence of compiled bytes
//! - `Compiler`: Token stream to bytecode compilation
//! - Number encoding and disassembler utilities

mod compiler;
mod debug;
mod error;
pub mod number;
mod opcode;
mod script;

pub use compiler::{compile, Compiler};
pub use debug::{disassemble_script, Instruction, Instructions};
pub use error::{CompileError, CompileErrorKind, CompileResult, DecodeError};
pub use number::NumberEncoding;
pub use opcode::Opcode;
pub use script::{PushPrefix, Script};
