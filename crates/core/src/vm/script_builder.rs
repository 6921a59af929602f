//! Script builder for native invocation payloads.
//!
//! This module provides a way to programmatically construct the NeoVM
//! scripts that carry native contract calls and account verification.

use super::op_code::OpCode;
use crate::address::Address;
use num_bigint::BigInt;
use num_traits::{One, Signed, ToPrimitive, Zero};

/// Helps construct VM scripts programmatically.
#[derive(Debug, Default, Clone)]
pub struct ScriptBuilder {
    /// The script being built
    script: Vec<u8>,
}

impl ScriptBuilder {
    /// Creates a new script builder.
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self { script: Vec::new() }
    }

    /// Emits a single byte to the script.
    #[inline]
    pub fn emit(&mut self, op: u8) -> &mut Self {
        self.script.push(op);
        self
    }

    /// Emits an opcode to the script.
    #[inline]
    pub fn emit_opcode(&mut self, op: OpCode) -> &mut Self {
        self.script.push(op as u8);
        self
    }

    /// Emits a push operation with the given data.
    ///
    /// Short payloads use the length itself as the opcode; an empty payload
    /// therefore becomes `PUSH0`.
    pub fn emit_push_bytes(&mut self, data: &[u8]) -> &mut Self {
        let len = data.len();

        if len <= OpCode::MAX_DIRECT_PUSH {
            self.emit(len as u8);
        } else if len <= 0xFF {
            self.emit_opcode(OpCode::PUSHDATA1);
            self.emit(len as u8);
        } else if len <= 0xFFFF {
            self.emit_opcode(OpCode::PUSHDATA2);
            self.script.extend_from_slice(&(len as u16).to_le_bytes());
        } else {
            self.emit_opcode(OpCode::PUSHDATA4);
            self.script.extend_from_slice(&(len as u32).to_le_bytes());
        }
        self.script.extend_from_slice(data);

        self
    }

    /// Emits a push operation for an integer.
    ///
    /// -1 and 0..16 use dedicated opcodes; everything else is pushed as its
    /// minimal little-endian two's-complement bytes.
    pub fn emit_push_integer(&mut self, value: &BigInt) -> &mut Self {
        if value.is_zero() {
            return self.emit_opcode(OpCode::PUSH0);
        }
        if value.is_negative() && value.abs().is_one() {
            return self.emit_opcode(OpCode::PUSHM1);
        }
        if let Some(small) = value.to_u8().filter(|v| (1..16).contains(v)) {
            return self.emit(OpCode::PUSH1 as u8 - 1 + small);
        }

        self.emit_push_bytes(&value.to_signed_bytes_le())
    }

    /// Emits a push operation for the raw bytes of an address.
    #[inline]
    pub fn emit_push_address(&mut self, address: &Address) -> &mut Self {
        self.emit_push_bytes(address.as_bytes())
    }

    /// Emits a push operation for a string.
    #[inline]
    pub fn emit_push_string(&mut self, value: &str) -> &mut Self {
        self.emit_push_bytes(value.as_bytes())
    }

    /// Emits a call to the interop service `name`.
    pub fn emit_syscall(&mut self, name: &str) -> &mut Self {
        self.emit_opcode(OpCode::SYSCALL);
        self.emit_push_string(name)
    }

    /// Builds the verification script of a single public key.
    #[must_use]
    pub fn verification_script(public_key: &[u8]) -> Vec<u8> {
        let mut sb = Self::new();
        sb.emit_push_bytes(public_key);
        sb.emit_opcode(OpCode::CHECKSIG);
        sb.into_bytes()
    }

    /// Number of bytes emitted so far.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.script.len()
    }

    /// Whether nothing has been emitted yet.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.script.is_empty()
    }

    /// Returns a copy of the script.
    #[must_use]
    pub fn to_array(&self) -> Vec<u8> {
        self.script.clone()
    }

    /// Consumes the builder and returns the script.
    #[must_use]
    pub fn into_bytes(self) -> Vec<u8> {
        self.script
    }
}
