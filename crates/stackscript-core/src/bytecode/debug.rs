//! Bytecode disassembler for debugging

use std::fmt;

use super::error::DecodeError;
use super::opcode::Opcode;
use super::script::{read_u16_le, read_u32_le, PushPrefix, Script};

/// A decoded script instruction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Instruction<'a> {
    /// A data push and the prefix it was written with
    Push {
        prefix: PushPrefix,
        data: &'a [u8],
    },

    /// Any other opcode
    Op(Opcode),
}

/// Iterator over the instructions of a script
///
/// Yields each instruction with its byte offset. Stops after the first
/// decoding error.
#[derive(Debug, Clone)]
pub struct Instructions<'a> {
    code: &'a [u8],
    offset: usize,
    done: bool,
}

impl<'a> Instructions<'a> {
    /// Decode instructions from raw bytecode
    #[must_use]
    pub fn new(code: &'a [u8]) -> Self {
        Self {
            code,
            offset: 0,
            done: false,
        }
    }

    fn read_prefix(&self, byte: u8) -> Result<PushPrefix, DecodeError> {
        let start = self.offset + 1;
        let truncated = DecodeError::TruncatedPrefix {
            offset: self.offset,
        };
        let prefix = match Opcode(byte) {
            Opcode::PUSHDATA1 => {
                let len = self.code.get(start).ok_or(truncated)?;
                PushPrefix::PushData1(*len)
            }
            Opcode::PUSHDATA2 => {
                PushPrefix::PushData2(read_u16_le(self.code, start).ok_or(truncated)?)
            }
            Opcode::PUSHDATA4 => {
                PushPrefix::PushData4(read_u32_le(self.code, start).ok_or(truncated)?)
            }
            _ => PushPrefix::Direct(byte),
        };
        Ok(prefix)
    }

    fn decode_next(&mut self, byte: u8) -> Result<Instruction<'a>, DecodeError> {
        let op = Opcode(byte);
        if !op.is_push() {
            self.offset += 1;
            return Ok(Instruction::Op(op));
        }

        let prefix = self.read_prefix(byte)?;
        let start = self.offset + prefix.size();
        let expected = prefix.payload_len();
        let available = self.code.len() - start;
        if expected > available {
            return Err(DecodeError::TruncatedPayload {
                offset: self.offset,
                expected,
                available,
            });
        }

        let code = self.code;
        self.offset = start + expected;
        Ok(Instruction::Push {
            prefix,
            data: &code[start..start + expected],
        })
    }
}

impl<'a> Iterator for Instructions<'a> {
    type Item = Result<(usize, Instruction<'a>), DecodeError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        let offset = self.offset;
        let Some(&byte) = self.code.get(offset) else {
            self.done = true;
            return None;
        };

        let result = self.decode_next(byte);
        if result.is_err() {
            self.done = true;
        }
        Some(result.map(|instruction| (offset, instruction)))
    }
}

impl std::iter::FusedIterator for Instructions<'_> {}

impl Script {
    /// Decode the instructions of this script
    #[must_use]
    pub fn instructions(&self) -> Instructions<'_> {
        Instructions::new(self.code())
    }
}

/// A printable listing of a script
struct Disassembly<'a> {
    name: &'a str,
    code: &'a [u8],
}

impl fmt::Display for Disassembly<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "== {} ==", self.name)?;
        for item in Instructions::new(self.code) {
            match item {
                Ok((offset, instruction)) => {
                    write!(f, "{offset:04} ")?;
                    write_instruction(f, &instruction)?;
                    writeln!(f)?;
                }
                Err(err) => writeln!(f, "error: {err}")?,
            }
        }
        Ok(())
    }
}

fn write_instruction(f: &mut fmt::Formatter<'_>, instruction: &Instruction<'_>) -> fmt::Result {
    match instruction {
        Instruction::Op(op) => write!(f, "{op}"),
        Instruction::Push { prefix, data } => match prefix {
            PushPrefix::Direct(0) => write!(f, "{}", Opcode::ZERO),
            PushPrefix::Direct(len) => {
                write!(f, "{:16} {}", format!("OP_PUSHBYTES_{len}"), hex::encode(data))
            }
            PushPrefix::PushData1(_) => {
                write!(f, "{:16} {}", Opcode::PUSHDATA1, hex::encode(data))
            }
            PushPrefix::PushData2(_) => {
                write!(f, "{:16} {}", Opcode::PUSHDATA2, hex::encode(data))
            }
            PushPrefix::PushData4(_) => {
                write!(f, "{:16} {}", Opcode::PUSHDATA4, hex::encode(data))
            }
        },
    }
}

/// Disassemble a script to a string
///
/// Decoding stops at the first malformed push, which is reported on the
/// last line of the listing.
#[must_use]
pub fn disassemble_script(script: &Script, name: &str) -> String {
    Disassembly {
        name,
        code: script.code(),
    }
    .to_string()
}
