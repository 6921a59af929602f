//! NeoVM opcodes used by native contract invocation scripts.

use std::fmt;

/// The subset of NeoVM opcodes emitted when calling native contracts.
///
/// Direct pushes of 1 to 75 bytes (`PUSHBYTES1`..`PUSHBYTES75`) are not
/// listed: the opcode byte is the length itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum OpCode {
    /// Pushes an empty byte array (the integer zero).
    PUSH0 = 0x00,
    /// The next byte holds the number of bytes to push.
    PUSHDATA1 = 0x4C,
    /// The next two bytes hold the number of bytes to push.
    PUSHDATA2 = 0x4D,
    /// The next four bytes hold the number of bytes to push.
    PUSHDATA4 = 0x4E,
    /// Pushes the integer -1.
    PUSHM1 = 0x4F,
    /// Pushes the integer 1.
    PUSH1 = 0x51,
    /// Pushes the integer 16.
    PUSH16 = 0x60,
    /// Calls an interop service named by the operand.
    SYSCALL = 0x68,
    /// Copies the top of the alt stack onto the evaluation stack.
    DUPFROMALTSTACK = 0x6A,
    /// Moves the top item to the alt stack.
    TOALTSTACK = 0x6B,
    /// Moves the top of the alt stack back to the evaluation stack.
    FROMALTSTACK = 0x6C,
    /// Swaps the top two items.
    SWAP = 0x7C,
    /// Verifies a signature against a public key.
    CHECKSIG = 0xAC,
    /// Packs n items into an array.
    PACK = 0xC1,
    /// Creates a struct with n fields.
    NEWSTRUCT = 0xC6,
    /// Appends an item to an array or struct.
    APPEND = 0xC8,
}

impl OpCode {
    /// Number of bytes that can be pushed with the length as the opcode.
    pub const MAX_DIRECT_PUSH: usize = 0x4B;

    /// Converts a byte into one of the listed opcodes.
    #[must_use]
    pub const fn from_byte(byte: u8) -> Option<Self> {
        match byte {
            0x00 => Some(Self::PUSH0),
            0x4C => Some(Self::PUSHDATA1),
            0x4D => Some(Self::PUSHDATA2),
            0x4E => Some(Self::PUSHDATA4),
            0x4F => Some(Self::PUSHM1),
            0x51 => Some(Self::PUSH1),
            0x60 => Some(Self::PUSH16),
            0x68 => Some(Self::SYSCALL),
            0x6A => Some(Self::DUPFROMALTSTACK),
            0x6B => Some(Self::TOALTSTACK),
            0x6C => Some(Self::FROMALTSTACK),
            0x7C => Some(Self::SWAP),
            0xAC => Some(Self::CHECKSIG),
            0xC1 => Some(Self::PACK),
            0xC6 => Some(Self::NEWSTRUCT),
            0xC8 => Some(Self::APPEND),
            _ => None,
        }
    }

    /// Returns the small integer pushed by `PUSH1`..`PUSH16`, if `byte` is one of them.
    #[must_use]
    pub const fn small_integer(byte: u8) -> Option<u8> {
        if byte >= Self::PUSH1 as u8 && byte <= Self::PUSH16 as u8 {
            Some(byte - Self::PUSH1 as u8 + 1)
        } else {
            None
        }
    }
}

impl fmt::Display for OpCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}
