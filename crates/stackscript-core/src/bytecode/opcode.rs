//! Opcode bytes for the stackscript virtual machine
//!
//! The compiler treats opcodes as opaque bytes: an `Operation` token's opcode
//! is copied into the output without inspection. The only values this module
//! names are the ones the compiler emits on its own (push markers, the small
//! integer opcodes and the control-flow markers).

use std::fmt;

/// An opaque script opcode
///
/// Any byte is a valid `Opcode`. The set of operations a VM understands is
/// owned by the VM, not by the compiler.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(transparent)]
pub struct Opcode(pub u8);

impl Opcode {
    // ===== Push Operations =====
    /// Push an empty byte string (numeric zero / false)
    pub const ZERO: Opcode = Opcode(0x00);

    /// Largest length that is encoded directly in the prefix byte
    pub const MAX_DIRECT_PUSH: u8 = 0x4b;

    /// Push data, length in the next byte
    pub const PUSHDATA1: Opcode = Opcode(0x4c);

    /// Push data, length in the next two bytes (little-endian)
    pub const PUSHDATA2: Opcode = Opcode(0x4d);

    /// Push data, length in the next four bytes (little-endian)
    pub const PUSHDATA4: Opcode = Opcode(0x4e);

    /// Push the number -1
    pub const NEGATE_ONE: Opcode = Opcode(0x4f);

    /// Push the number 1; `ONE + (n - 1)` pushes `n` for `n` in `1..=16`
    pub const ONE: Opcode = Opcode(0x51);

    /// Push the number 16
    pub const SIXTEEN: Opcode = Opcode(0x60);

    // ===== Control Flow =====
    /// Execute the following branch if the top of stack is true
    pub const IF: Opcode = Opcode(0x63);

    /// Execute the following branch if the top of stack is false
    pub const NOTIF: Opcode = Opcode(0x64);

    /// Switch to the alternative branch
    pub const ELSE: Opcode = Opcode(0x67);

    /// Close a conditional block
    pub const ENDIF: Opcode = Opcode(0x68);

    // ===== Signatures =====
    /// Mark the start of the script portion covered by signature checks
    pub const CODESEPARATOR: Opcode = Opcode(0xab);

    /// Get the raw byte value
    #[must_use]
    pub const fn byte(self) -> u8 {
        self.0
    }

    /// The fast-path opcode pushing `n`, for `n` in `1..=16`
    #[must_use]
    pub const fn small_int(n: u8) -> Option<Opcode> {
        if n >= 1 && n <= 16 {
            Some(Opcode(0x50 + n))
        } else {
            None
        }
    }

    /// Returns true if this byte starts a push (direct length or PUSHDATA marker)
    #[must_use]
    pub const fn is_push(self) -> bool {
        self.0 <= Self::PUSHDATA4.0
    }

    /// Mnemonic for the opcodes the compiler emits itself
    ///
    /// Operations passed through from tokens have no name here and are listed
    /// by their hex value.
    #[must_use]
    pub const fn name(self) -> Option<&'static str> {
        match self.0 {
            0x00 => Some("OP_0"),
            0x4c => Some("OP_PUSHDATA1"),
            0x4d => Some("OP_PUSHDATA2"),
            0x4e => Some("OP_PUSHDATA4"),
            0x4f => Some("OP_1NEGATE"),
            0x51 => Some("OP_1"),
            0x52 => Some("OP_2"),
            0x53 => Some("OP_3"),
            0x54 => Some("OP_4"),
            0x55 => Some("OP_5"),
            0x56 => Some("OP_6"),
            0x57 => Some("OP_7"),
            0x58 => Some("OP_8"),
            0x59 => Some("OP_9"),
            0x5a => Some("OP_10"),
            0x5b => Some("OP_11"),
            0x5c => Some("OP_12"),
            0x5d => Some("OP_13"),
            0x5e => Some("OP_14"),
            0x5f => Some("OP_15"),
            0x60 => Some("OP_16"),
            0x63 => Some("OP_IF"),
            0x64 => Some("OP_NOTIF"),
            0x67 => Some("OP_ELSE"),
            0x68 => Some("OP_ENDIF"),
            0xab => Some("OP_CODESEPARATOR"),
            _ => None,
        }
    }
}

impl From<u8> for Opcode {
    fn from(value: u8) -> Self {
        Opcode(value)
    }
}

impl From<Opcode> for u8 {
    fn from(op: Opcode) -> Self {
        op.0
    }
}

impl fmt::Display for Opcode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.name() {
            Some(name) => f.pad(name),
            None => f.pad(&format!("OP_0x{:02x}", self.0)),
        }
    }
}
