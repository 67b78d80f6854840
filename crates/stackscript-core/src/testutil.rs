//! Test utilities for stackscript
//!
//! This module provides common helpers for testing compiled scripts,
//! including compilation shortcuts and structural checks on the output.

use crate::bytecode::{compile, Instruction, Instructions};
use crate::token::Token;

/// Result type for test helpers
pub type TestResult<T> = Result<T, String>;

/// Compile a list of tokens with the default compiler
///
/// # Errors
/// Returns error if compilation fails
pub fn compile_tokens(tokens: impl IntoIterator<Item = Token>) -> TestResult<Vec<u8>> {
    compile(tokens.into_iter()).map_err(|e| format!("Compile error: {e}"))
}

/// Compile a list of tokens and return the bytecode as lower-case hex
///
/// # Errors
/// Returns error if compilation fails
pub fn compile_hex(tokens: impl IntoIterator<Item = Token>) -> TestResult<String> {
    compile_tokens(tokens).map(hex::encode)
}

/// Decode bytecode and return the payload of every push, in order
///
/// # Errors
/// Returns error if the bytecode contains a malformed push
pub fn pushes(code: &[u8]) -> TestResult<Vec<Vec<u8>>> {
    let mut payloads = Vec::new();
    for item in Instructions::new(code) {
        let (_, instruction) = item.map_err(|e| format!("Decode error: {e}"))?;
        if let Instruction::Push { data, .. } = instruction {
            payloads.push(data.to_vec());
        }
    }
    Ok(payloads)
}

/// Check that every push prefix agrees with its payload
///
/// Returns the number of instructions in the script.
///
/// # Errors
/// Returns error if the bytecode contains a malformed push
pub fn instruction_count(code: &[u8]) -> TestResult<usize> {
    Instructions::new(code).try_fold(0, |count, item| {
        item.map(|_| count + 1)
            .map_err(|e| format!("Decode error: {e}"))
    })
}
