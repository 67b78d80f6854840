//! Compiled script - an append-only sequence of push and opcode bytes

use std::fmt;

use super::error::CompileErrorKind;
use super::opcode::Opcode;

/// Length prefix of a data push
///
/// Always the narrowest form that can hold the payload length.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PushPrefix {
    /// Length `0..=75` stored in the opcode byte itself
    Direct(u8),

    /// `OP_PUSHDATA1` followed by a one-byte length
    PushData1(u8),

    /// `OP_PUSHDATA2` followed by a two-byte little-endian length
    PushData2(u16),

    /// `OP_PUSHDATA4` followed by a four-byte little-endian length
    PushData4(u32),
}

impl PushPrefix {
    /// Select the prefix for a payload of `len` bytes
    ///
    /// Returns `None` if `len` does not fit in four bytes.
    #[must_use]
    pub fn for_len(len: usize) -> Option<Self> {
        if let Ok(short) = u8::try_from(len) {
            if short <= Opcode::MAX_DIRECT_PUSH {
                Some(PushPrefix::Direct(short))
            } else {
                Some(PushPrefix::PushData1(short))
            }
        } else if let Ok(medium) = u16::try_from(len) {
            Some(PushPrefix::PushData2(medium))
        } else {
            u32::try_from(len).ok().map(PushPrefix::PushData4)
        }
    }

    /// Number of bytes the prefix occupies
    #[must_use]
    pub const fn size(self) -> usize {
        match self {
            PushPrefix::Direct(_) => 1,
            PushPrefix::PushData1(_) => 2,
            PushPrefix::PushData2(_) => 3,
            PushPrefix::PushData4(_) => 5,
        }
    }

    /// Number of payload bytes announced by the prefix
    #[must_use]
    pub fn payload_len(self) -> usize {
        match self {
            PushPrefix::Direct(len) | PushPrefix::PushData1(len) => usize::from(len),
            PushPrefix::PushData2(len) => usize::from(len),
            PushPrefix::PushData4(len) => usize::try_from(len).unwrap_or(usize::MAX),
        }
    }

    fn write_to(self, code: &mut Vec<u8>) {
        match self {
            PushPrefix::Direct(len) => code.push(len),
            PushPrefix::PushData1(len) => {
                code.push(Opcode::PUSHDATA1.byte());
                code.push(len);
            }
            PushPrefix::PushData2(len) => {
                code.push(Opcode::PUSHDATA2.byte());
                code.extend_from_slice(&len.to_le_bytes());
            }
            PushPrefix::PushData4(len) => {
                code.push(Opcode::PUSHDATA4.byte());
                code.extend_from_slice(&len.to_le_bytes());
            }
        }
    }
}

/// Read a little-endian u16 at `offset`
pub(super) fn read_u16_le(code: &[u8], offset: usize) -> Option<u16> {
    let bytes = code.get(offset..offset.checked_add(2)?)?;
    Some(u16::from_le_bytes([bytes[0], bytes[1]]))
}

/// Read a little-endian u32 at `offset`
pub(super) fn read_u32_le(code: &[u8], offset: usize) -> Option<u32> {
    let bytes = code.get(offset..offset.checked_add(4)?)?;
    Some(u32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]))
}

/// A compiled script
///
/// Bytes are only ever appended; nothing already written is patched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Script {
    /// Raw bytecode
    code: Vec<u8>,
}

impl Script {
    /// Create a new empty script
    #[must_use]
    pub fn new() -> Self {
        Self { code: Vec::new() }
    }

    /// Create an empty script with room for `capacity` bytes
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            code: Vec::with_capacity(capacity),
        }
    }

    /// Returns the number of bytes in the script
    #[must_use]
    pub fn len(&self) -> usize {
        self.code.len()
    }

    /// Returns true if the script is empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.code.is_empty()
    }

    /// Returns the raw bytecode
    #[must_use]
    pub fn code(&self) -> &[u8] {
        &self.code
    }

    /// Consume the script and return its bytes
    #[must_use]
    pub fn into_bytes(self) -> Vec<u8> {
        self.code
    }

    /// Write a single byte to the script
    pub fn write_byte(&mut self, byte: u8) {
        self.code.push(byte);
    }

    /// Write an opcode to the script
    pub fn write_op(&mut self, op: Opcode) {
        self.write_byte(op.byte());
    }

    /// Write a data push using the minimal length prefix
    pub fn write_push(&mut self, data: &[u8]) -> Result<(), CompileErrorKind> {
        let prefix = PushPrefix::for_len(data.len()).ok_or(CompileErrorKind::PushTooLarge {
            len: data.len(),
            limit: u32::MAX,
        })?;

        self.code.reserve(prefix.size() + data.len());
        prefix.write_to(&mut self.code);
        self.code.extend_from_slice(data);
        Ok(())
    }
}

impl From<Vec<u8>> for Script {
    fn from(code: Vec<u8>) -> Self {
        Self { code }
    }
}

impl From<Script> for Vec<u8> {
    fn from(script: Script) -> Self {
        script.code
    }
}

impl AsRef<[u8]> for Script {
    fn as_ref(&self) -> &[u8] {
        &self.code
    }
}

impl fmt::Display for Script {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&hex::encode(&self.code))
    }
}
