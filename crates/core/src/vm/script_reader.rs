//! Decoder for native invocation payloads.
//!
//! Runs the small subset of NeoVM that native invocation scripts use and
//! returns the arguments, method, contract and version that were left on
//! the evaluation stack when the native syscall was reached.

use super::op_code::OpCode;
use crate::address::Address;
use crate::error::{CoreError, CoreResult};
use crate::io::MemoryReader;
use num_bigint::BigInt;
use num_traits::{ToPrimitive, Zero};
use ont_config::NATIVE_INVOKE_SYSCALL;
use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

/// Maximum number of items on either stack.
const MAX_STACK_SIZE: usize = 2 * 1024;

/// Maximum number of fields in a struct or array.
const MAX_ARRAY_SIZE: usize = 1024;

/// Maximum length of an interop service name.
const MAX_SYSCALL_NAME: usize = 252;

/// Maximum nesting of structs and arrays.
const MAX_NESTING: usize = 16;

/// Maximum number of values produced while reading one script.
const MAX_DECODED_ITEMS: usize = 64 * 1024;

/// A value produced by a decoded script.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VmValue {
    /// A pushed byte array. `PUSH0` yields an empty array.
    Bytes(Vec<u8>),
    /// A value pushed by `PUSHM1` or `PUSH1`..`PUSH16`.
    Integer(BigInt),
    /// A struct assembled with `NEWSTRUCT` and `APPEND`.
    Struct(Vec<VmValue>),
    /// An array assembled with `PACK`.
    Array(Vec<VmValue>),
}

impl VmValue {
    /// Interprets the value as an integer. Byte arrays are read as
    /// little-endian two's complement, the empty array being zero.
    #[must_use]
    pub fn as_integer(&self) -> Option<BigInt> {
        match self {
            Self::Integer(value) => Some(value.clone()),
            Self::Bytes(bytes) => Some(BigInt::from_signed_bytes_le(bytes)),
            Self::Struct(_) | Self::Array(_) => None,
        }
    }

    /// Interprets the value as a byte array.
    #[must_use]
    pub fn as_bytes(&self) -> Option<Vec<u8>> {
        match self {
            Self::Bytes(bytes) => Some(bytes.clone()),
            Self::Integer(value) if value.is_zero() => Some(Vec::new()),
            Self::Integer(value) => Some(value.to_signed_bytes_le()),
            Self::Struct(_) | Self::Array(_) => None,
        }
    }

    /// Interprets the value as a 20-byte address.
    #[must_use]
    pub fn as_address(&self) -> Option<Address> {
        match self {
            Self::Bytes(bytes) => Address::from_bytes(bytes).ok(),
            _ => None,
        }
    }

    /// Items of a struct or array.
    #[must_use]
    pub fn as_items(&self) -> Option<&[VmValue]> {
        match self {
            Self::Struct(items) | Self::Array(items) => Some(items),
            Self::Bytes(_) | Self::Integer(_) => None,
        }
    }
}

impl fmt::Display for VmValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fn join(f: &mut fmt::Formatter<'_>, items: &[VmValue]) -> fmt::Result {
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    write!(f, ", ")?;
                }
                write!(f, "{item}")?;
            }
            Ok(())
        }

        match self {
            Self::Bytes(bytes) => write!(f, "0x{}", hex::encode(bytes)),
            Self::Integer(value) => write!(f, "{value}"),
            Self::Struct(items) => {
                write!(f, "{{")?;
                join(f, items)?;
                write!(f, "}}")
            }
            Self::Array(items) => {
                write!(f, "[")?;
                join(f, items)?;
                write!(f, "]")
            }
        }
    }
}

/// The parts of a native contract call recovered from its payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedInvocation {
    /// Target native contract.
    pub contract: Address,
    /// Native contract version byte.
    pub version: u8,
    /// Method name.
    pub method: String,
    /// The single argument value passed to the method.
    pub args: VmValue,
}

#[derive(Clone)]
enum Slot {
    Value(VmValue),
    Compound(Rc<RefCell<Compound>>),
}

struct Compound {
    is_struct: bool,
    depth: usize,
    items: Vec<Slot>,
}

impl VmValue {
    fn depth(&self) -> usize {
        match self {
            Self::Bytes(_) | Self::Integer(_) => 0,
            Self::Struct(items) | Self::Array(items) => {
                1 + items.iter().map(VmValue::depth).max().unwrap_or(0)
            }
        }
    }
}

impl Slot {
    fn compound(is_struct: bool, items: Vec<Slot>) -> CoreResult<Self> {
        let depth = 1 + items.iter().map(Slot::depth).max().unwrap_or(0);
        if depth > MAX_NESTING {
            return Err(CoreError::decode("structs and arrays are nested too deeply"));
        }
        Ok(Self::Compound(Rc::new(RefCell::new(Compound {
            is_struct,
            depth,
            items,
        }))))
    }

    fn depth(&self) -> usize {
        match self {
            Self::Value(value) => value.depth(),
            Self::Compound(compound) => compound.borrow().depth,
        }
    }

    /// Copies the slot out into a plain value.
    ///
    /// Compounds may be shared, so every produced value is charged to
    /// `budget` and the copy fails once it runs out.
    fn freeze(&self, depth: usize, budget: &mut usize) -> CoreResult<VmValue> {
        if *budget == 0 {
            return Err(CoreError::decode("decoded value is too large"));
        }
        *budget -= 1;

        match self {
            Self::Value(value) => Ok(value.clone()),
            Self::Compound(compound) => {
                if depth >= MAX_NESTING {
                    return Err(CoreError::decode("structs and arrays are nested too deeply"));
                }
                let compound = compound.borrow();
                let items = compound
                    .items
                    .iter()
                    .map(|item| item.freeze(depth + 1, budget))
                    .collect::<CoreResult<Vec<_>>>()?;
                Ok(if compound.is_struct {
                    VmValue::Struct(items)
                } else {
                    VmValue::Array(items)
                })
            }
        }
    }
}

/// Executes a native invocation payload without any chain state.
pub struct ScriptReader<'a> {
    reader: MemoryReader<'a>,
    stack: Vec<Slot>,
    alt_stack: Vec<Slot>,
    syscall: Option<String>,
    budget: usize,
}

impl<'a> ScriptReader<'a> {
    /// Creates a reader over `script`.
    pub fn new(script: &'a [u8]) -> Self {
        Self {
            reader: MemoryReader::new(script),
            stack: Vec::new(),
            alt_stack: Vec::new(),
            syscall: None,
            budget: MAX_DECODED_ITEMS,
        }
    }

    /// Runs the script and extracts the native invocation it performs.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::Decode` for truncated scripts, opcodes outside the
    /// native calling convention, stack underflows, or a script that does
    /// not end with the native invoke syscall.
    pub fn read_invocation(mut self) -> CoreResult<DecodedInvocation> {
        while !self.reader.is_empty() {
            if self.syscall.is_some() {
                return Err(CoreError::decode(format!(
                    "unexpected bytes after syscall at offset {}",
                    self.reader.position()
                )));
            }
            self.step()?;
        }

        match self.syscall.as_deref() {
            Some(NATIVE_INVOKE_SYSCALL) => {}
            Some(other) => {
                return Err(CoreError::decode(format!("unexpected syscall '{other}'")));
            }
            None => return Err(CoreError::decode("script does not invoke a native contract")),
        }

        let version = self
            .pop_value()?
            .as_integer()
            .and_then(|v| v.to_u8())
            .ok_or_else(|| CoreError::decode("invalid native contract version"))?;
        let contract = self
            .pop_value()?
            .as_address()
            .ok_or_else(|| CoreError::decode("invalid contract address"))?;
        let method_bytes = self
            .pop_value()?
            .as_bytes()
            .ok_or_else(|| CoreError::decode("invalid method name"))?;
        let method = String::from_utf8(method_bytes)
            .map_err(|e| CoreError::decode(format!("method name is not UTF-8: {e}")))?;
        let args = self.pop_value()?;

        if !self.stack.is_empty() || !self.alt_stack.is_empty() {
            return Err(CoreError::decode("unconsumed items left on the stack"));
        }

        Ok(DecodedInvocation {
            contract,
            version,
            method,
            args,
        })
    }

    fn step(&mut self) -> CoreResult<()> {
        let byte = self.reader.read_u8()?;

        if (1..=OpCode::MAX_DIRECT_PUSH as u8).contains(&byte) {
            let data = self.reader.read_bytes(byte as usize)?.to_vec();
            return self.push(Slot::Value(VmValue::Bytes(data)));
        }
        if let Some(n) = OpCode::small_integer(byte) {
            return self.push(Slot::Value(VmValue::Integer(BigInt::from(n))));
        }

        let op = OpCode::from_byte(byte).ok_or_else(|| {
            CoreError::decode(format!(
                "unsupported opcode 0x{byte:02x} at offset {}",
                self.reader.position() - 1
            ))
        })?;

        match op {
            OpCode::PUSH0 => self.push(Slot::Value(VmValue::Bytes(Vec::new()))),
            OpCode::PUSHDATA1 => {
                let len = self.reader.read_u8()? as usize;
                self.push_data(len)
            }
            OpCode::PUSHDATA2 => {
                let len = self.reader.read_u16()? as usize;
                self.push_data(len)
            }
            OpCode::PUSHDATA4 => {
                let len = self.reader.read_u32()? as usize;
                self.push_data(len)
            }
            OpCode::PUSHM1 => self.push(Slot::Value(VmValue::Integer(BigInt::from(-1)))),
            OpCode::PUSH1 => self.push(Slot::Value(VmValue::Integer(BigInt::from(1)))),
            OpCode::PUSH16 => self.push(Slot::Value(VmValue::Integer(BigInt::from(16)))),
            OpCode::SYSCALL => {
                let name = self.reader.read_var_bytes(MAX_SYSCALL_NAME)?;
                let name = std::str::from_utf8(name)
                    .map_err(|e| CoreError::decode(format!("syscall name is not UTF-8: {e}")))?;
                self.syscall = Some(name.to_string());
                Ok(())
            }
            OpCode::DUPFROMALTSTACK => {
                let top = self
                    .alt_stack
                    .last()
                    .cloned()
                    .ok_or_else(|| CoreError::decode("alt stack is empty"))?;
                self.push(top)
            }
            OpCode::TOALTSTACK => {
                let item = self.pop()?;
                if self.alt_stack.len() >= MAX_STACK_SIZE {
                    return Err(CoreError::decode("alt stack overflow"));
                }
                self.alt_stack.push(item);
                Ok(())
            }
            OpCode::FROMALTSTACK => {
                let item = self
                    .alt_stack
                    .pop()
                    .ok_or_else(|| CoreError::decode("alt stack is empty"))?;
                self.push(item)
            }
            OpCode::SWAP => {
                let len = self.stack.len();
                if len < 2 {
                    return Err(CoreError::decode("SWAP needs two items"));
                }
                self.stack.swap(len - 1, len - 2);
                Ok(())
            }
            OpCode::NEWSTRUCT => {
                let count = self.pop_count()?;
                let fields = vec![Slot::Value(VmValue::Bytes(Vec::new())); count];
                self.push(Slot::compound(true, fields)?)
            }
            OpCode::APPEND => {
                let item = self.pop()?;
                let target = self.pop()?;
                let Slot::Compound(target) = target else {
                    return Err(CoreError::decode("APPEND target is not a struct or array"));
                };
                // Appended by value so no item can contain itself.
                let item = item.freeze(0, &mut self.budget)?;
                let depth = item.depth() + 1;
                if depth > MAX_NESTING {
                    return Err(CoreError::decode("structs and arrays are nested too deeply"));
                }
                let mut target = target.borrow_mut();
                if target.items.len() >= MAX_ARRAY_SIZE {
                    return Err(CoreError::decode("struct is too large"));
                }
                target.depth = target.depth.max(depth);
                target.items.push(Slot::Value(item));
                Ok(())
            }
            OpCode::PACK => {
                let count = self.pop_count()?;
                if count > self.stack.len() {
                    return Err(CoreError::decode(format!(
                        "PACK of {count} items with {} on the stack",
                        self.stack.len()
                    )));
                }
                let mut items = Vec::with_capacity(count);
                for _ in 0..count {
                    items.push(self.pop()?);
                }
                self.push(Slot::compound(false, items)?)
            }
            OpCode::CHECKSIG => Err(CoreError::decode(
                "CHECKSIG found: this is a verification script, not an invocation",
            )),
        }
    }

    fn push_data(&mut self, len: usize) -> CoreResult<()> {
        let data = self.reader.read_bytes(len)?.to_vec();
        self.push(Slot::Value(VmValue::Bytes(data)))
    }

    fn push(&mut self, slot: Slot) -> CoreResult<()> {
        if self.stack.len() >= MAX_STACK_SIZE {
            return Err(CoreError::decode("evaluation stack overflow"));
        }
        self.stack.push(slot);
        Ok(())
    }

    fn pop(&mut self) -> CoreResult<Slot> {
        self.stack
            .pop()
            .ok_or_else(|| CoreError::decode("evaluation stack underflow"))
    }

    fn pop_value(&mut self) -> CoreResult<VmValue> {
        let slot = self.pop()?;
        slot.freeze(0, &mut self.budget)
    }

    fn pop_count(&mut self) -> CoreResult<usize> {
        let count = self
            .pop_value()?
            .as_integer()
            .and_then(|v| v.to_usize())
            .ok_or_else(|| CoreError::decode("invalid item count"))?;
        if count > MAX_ARRAY_SIZE {
            return Err(CoreError::decode(format!("item count {count} is too large")));
        }
        Ok(count)
    }
}

/// Decodes a native invocation payload.
///
/// # Errors
///
/// Returns `CoreError::Decode` if `payload` is not a well-formed native call.
pub fn decode_invocation(payload: &[u8]) -> CoreResult<DecodedInvocation> {
    ScriptReader::new(payload).read_invocation()
}
