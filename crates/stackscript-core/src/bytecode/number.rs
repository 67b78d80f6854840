//! Script number encoding
//!
//! Numbers are written in their canonical minimal form: `-1`, `0` and
//! `1..=16` have dedicated opcodes, everything else is pushed as a
//! little-endian sign-magnitude byte string with the sign in the top bit of
//! the most significant byte.

use num_bigint::{BigInt, Sign};
use num_traits::{ToPrimitive, Zero};

use super::opcode::Opcode;

/// How a number is written into a script
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NumberEncoding {
    /// A single opcode that pushes the number
    Opcode(Opcode),

    /// Sign-magnitude bytes to be pushed as data
    Push(Vec<u8>),
}

/// Choose the canonical encoding of `n`
#[must_use]
pub fn encode(n: &BigInt) -> NumberEncoding {
    if n.is_zero() {
        return NumberEncoding::Opcode(Opcode::ZERO);
    }

    if n.to_i8() == Some(-1) {
        return NumberEncoding::Opcode(Opcode::NEGATE_ONE);
    }
    if let Some(op) = n.to_u8().and_then(Opcode::small_int) {
        return NumberEncoding::Opcode(op);
    }

    NumberEncoding::Push(to_sign_magnitude(n))
}

/// Minimal little-endian sign-magnitude bytes of `n`
///
/// Zero encodes as the empty byte string.
#[must_use]
pub fn to_sign_magnitude(n: &BigInt) -> Vec<u8> {
    if n.is_zero() {
        return Vec::new();
    }

    // Big-endian first so the sign bit lands on bytes[0]
    let mut bytes = n.magnitude().to_bytes_be();
    if bytes[0] & 0x80 != 0 {
        bytes.insert(0, 0x00);
    }
    if n.sign() == Sign::Minus {
        bytes[0] |= 0x80;
    }
    bytes.reverse();
    bytes
}

/// Read a little-endian sign-magnitude byte string back into a number
#[must_use]
pub fn decode(bytes: &[u8]) -> BigInt {
    let Some((&last, rest)) = bytes.split_last() else {
        return BigInt::zero();
    };

    let mut be: Vec<u8> = Vec::with_capacity(bytes.len());
    be.push(last & 0x7f);
    be.extend(rest.iter().rev());

    let sign = if last & 0x80 != 0 {
        Sign::Minus
    } else {
        Sign::Plus
    };
    BigInt::from_bytes_be(sign, &be)
}
