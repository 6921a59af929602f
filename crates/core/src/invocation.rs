//! Native method table and invocation payload encoding.
//!
//! Every native asset method takes exactly one argument whose shape is fixed
//! by the method. [`InvocationArgs`] names those shapes explicitly and
//! [`NativeInvocationEncoder`] checks them against the method before
//! emitting the NeoVM script that carries the call.

use crate::address::Address;
use crate::error::{CoreError, CoreResult};
use crate::vm::{OpCode, ScriptBuilder};
use num_bigint::BigInt;
use num_traits::Signed;
use ont_config::NATIVE_INVOKE_SYSCALL;
use std::fmt;
use std::str::FromStr;

/// Type of a single field inside a struct argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// A 20-byte address.
    Address,
    /// A non-negative token amount.
    Amount,
}

/// Argument shape a native method accepts, with struct fields in ABI order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArgumentShape {
    /// No argument.
    Empty,
    /// A single address.
    Address,
    /// A single struct.
    Fields(&'static [(&'static str, FieldKind)]),
    /// A non-empty array of structs.
    Records(&'static [(&'static str, FieldKind)]),
}

const ALLOWANCE_FIELDS: &[(&str, FieldKind)] =
    &[("from", FieldKind::Address), ("to", FieldKind::Address)];

const TRANSFER_FIELDS: &[(&str, FieldKind)] = &[
    ("from", FieldKind::Address),
    ("to", FieldKind::Address),
    ("amount", FieldKind::Amount),
];

const TRANSFER_FROM_FIELDS: &[(&str, FieldKind)] = &[
    ("sender", FieldKind::Address),
    ("from", FieldKind::Address),
    ("to", FieldKind::Address),
    ("amount", FieldKind::Amount),
];

impl fmt::Display for ArgumentShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names = |fields: &[(&str, FieldKind)]| {
            fields
                .iter()
                .map(|(name, _)| *name)
                .collect::<Vec<_>>()
                .join(", ")
        };
        match self {
            Self::Empty => write!(f, "no arguments"),
            Self::Address => write!(f, "an address"),
            Self::Fields(fields) => write!(f, "fields {{{}}}", names(fields)),
            Self::Records(fields) => write!(f, "a list of records {{{}}}", names(fields)),
        }
    }
}

/// Methods exposed by the native asset contracts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NativeMethod {
    /// `name()`: the token's display name.
    Name,
    /// `symbol()`: the token's ticker.
    Symbol,
    /// `decimals()`: number of decimal places.
    Decimals,
    /// `balanceOf(address)`.
    BalanceOf,
    /// `allowance({from, to})`.
    Allowance,
    /// `transfer([{from, to, amount}])`.
    Transfer,
    /// `transferFrom({sender, from, to, amount})`.
    TransferFrom,
    /// `approve({from, to, amount})`.
    Approve,
}

impl NativeMethod {
    /// The method name as it appears in the payload.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Symbol => "symbol",
            Self::Decimals => "decimals",
            Self::BalanceOf => "balanceOf",
            Self::Allowance => "allowance",
            Self::Transfer => "transfer",
            Self::TransferFrom => "transferFrom",
            Self::Approve => "approve",
        }
    }

    /// Looks up a method by its exact payload name.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::Encoding` for names that are not native asset methods.
    pub fn from_name(name: &str) -> CoreResult<Self> {
        match name {
            "name" => Ok(Self::Name),
            "symbol" => Ok(Self::Symbol),
            "decimals" => Ok(Self::Decimals),
            "balanceOf" => Ok(Self::BalanceOf),
            "allowance" => Ok(Self::Allowance),
            "transfer" => Ok(Self::Transfer),
            "transferFrom" => Ok(Self::TransferFrom),
            "approve" => Ok(Self::Approve),
            other => Err(CoreError::encoding(format!("unknown native method '{other}'"))),
        }
    }

    /// The argument shape this method accepts.
    #[must_use]
    pub const fn shape(&self) -> ArgumentShape {
        match self {
            Self::Name | Self::Symbol | Self::Decimals => ArgumentShape::Empty,
            Self::BalanceOf => ArgumentShape::Address,
            Self::Allowance => ArgumentShape::Fields(ALLOWANCE_FIELDS),
            Self::Transfer => ArgumentShape::Records(TRANSFER_FIELDS),
            Self::TransferFrom => ArgumentShape::Fields(TRANSFER_FROM_FIELDS),
            Self::Approve => ArgumentShape::Fields(TRANSFER_FIELDS),
        }
    }

    /// Whether the method only reads state.
    #[must_use]
    pub const fn is_read_only(&self) -> bool {
        matches!(
            self,
            Self::Name | Self::Symbol | Self::Decimals | Self::BalanceOf | Self::Allowance
        )
    }

    /// Whether the method moves tokens, requiring strictly positive amounts.
    #[must_use]
    pub const fn is_transfer(&self) -> bool {
        matches!(self, Self::Transfer | Self::TransferFrom)
    }
}

impl FromStr for NativeMethod {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_name(s)
    }
}

impl fmt::Display for NativeMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A typed struct field value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    /// A 20-byte account or contract address.
    Address(Address),
    /// A token amount in the smallest unit.
    Amount(BigInt),
}

impl FieldValue {
    /// The kind of this value.
    #[must_use]
    pub const fn kind(&self) -> FieldKind {
        match self {
            Self::Address(_) => FieldKind::Address,
            Self::Amount(_) => FieldKind::Amount,
        }
    }
}

/// A named field of a struct argument.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamedField {
    /// Field name as listed in the method's ABI.
    pub name: String,
    /// Field value.
    pub value: FieldValue,
}

impl NamedField {
    /// Creates a field from a name and value.
    pub fn new(name: impl Into<String>, value: FieldValue) -> Self {
        Self {
            name: name.into(),
            value,
        }
    }

    /// Creates an address field.
    pub fn address(name: impl Into<String>, address: Address) -> Self {
        Self::new(name, FieldValue::Address(address))
    }

    /// Creates an amount field.
    pub fn amount(name: impl Into<String>, amount: impl Into<BigInt>) -> Self {
        Self::new(name, FieldValue::Amount(amount.into()))
    }
}

/// The argument passed to a native method.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InvocationArgs {
    /// No argument.
    Empty,
    /// Opaque bytes. Only an empty value is accepted, as no argument.
    RawBytes(Vec<u8>),
    /// A single address.
    Address(Address),
    /// One struct. Fields are matched to the ABI by name.
    NamedFields(Vec<NamedField>),
    /// A list of structs.
    RecordList(Vec<Vec<NamedField>>),
}

impl InvocationArgs {
    fn variant_name(&self) -> &'static str {
        match self {
            Self::Empty => "no arguments",
            Self::RawBytes(_) => "raw bytes",
            Self::Address(_) => "an address",
            Self::NamedFields(_) => "named fields",
            Self::RecordList(_) => "a record list",
        }
    }

    /// Every amount carried by the arguments.
    #[must_use]
    pub fn amounts(&self) -> Vec<&BigInt> {
        let fields: Box<dyn Iterator<Item = &NamedField> + '_> = match self {
            Self::NamedFields(fields) => Box::new(fields.iter()),
            Self::RecordList(records) => Box::new(records.iter().flatten()),
            Self::Empty | Self::RawBytes(_) | Self::Address(_) => return Vec::new(),
        };
        fields
            .filter_map(|field| match &field.value {
                FieldValue::Amount(amount) => Some(amount),
                FieldValue::Address(_) => None,
            })
            .collect()
    }
}

/// Turns a method call into the payload of an invoke transaction.
pub struct NativeInvocationEncoder;

impl NativeInvocationEncoder {
    /// Encodes `method(args)` on the native contract at `contract`.
    ///
    /// The output is deterministic: struct fields are always emitted in ABI
    /// order regardless of the order they were supplied in.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::Encoding` when `args` does not have the shape the
    /// method expects or carries a negative amount.
    pub fn encode(
        contract: &Address,
        version: u8,
        method: NativeMethod,
        args: &InvocationArgs,
    ) -> CoreResult<Vec<u8>> {
        let mut sb = ScriptBuilder::new();

        match (method.shape(), args) {
            (ArgumentShape::Empty, InvocationArgs::Empty) => {
                sb.emit_push_bytes(&[]);
            }
            (ArgumentShape::Empty, InvocationArgs::RawBytes(bytes)) if bytes.is_empty() => {
                sb.emit_push_bytes(&[]);
            }
            (ArgumentShape::Address, InvocationArgs::Address(address)) => {
                sb.emit_push_address(address);
            }
            (ArgumentShape::Fields(abi), InvocationArgs::NamedFields(fields)) => {
                emit_struct(&mut sb, method, abi, fields)?;
            }
            (ArgumentShape::Records(abi), InvocationArgs::RecordList(records)) => {
                if records.is_empty() {
                    return Err(CoreError::encoding(format!(
                        "{method} requires at least one record"
                    )));
                }
                for record in records.iter().rev() {
                    emit_struct(&mut sb, method, abi, record)?;
                }
                sb.emit_push_integer(&BigInt::from(records.len()))
                    .emit_opcode(OpCode::PACK);
            }
            (shape, args) => {
                return Err(CoreError::encoding(format!(
                    "{method} expects {shape}, got {}",
                    args.variant_name()
                )));
            }
        }

        sb.emit_push_string(method.name())
            .emit_push_address(contract)
            .emit_push_integer(&BigInt::from(version))
            .emit_syscall(NATIVE_INVOKE_SYSCALL);

        Ok(sb.into_bytes())
    }
}

/// Encodes `method(args)` on the native contract at `contract`.
///
/// # Errors
///
/// See [`NativeInvocationEncoder::encode`].
pub fn encode_native_invocation(
    contract: &Address,
    version: u8,
    method: NativeMethod,
    args: &InvocationArgs,
) -> CoreResult<Vec<u8>> {
    NativeInvocationEncoder::encode(contract, version, method, args)
}

fn emit_struct(
    sb: &mut ScriptBuilder,
    method: NativeMethod,
    abi: &[(&'static str, FieldKind)],
    fields: &[NamedField],
) -> CoreResult<()> {
    if fields.len() != abi.len() {
        return Err(CoreError::encoding(format!(
            "{method} expects {} fields, got {}",
            abi.len(),
            fields.len()
        )));
    }

    sb.emit_opcode(OpCode::PUSH0)
        .emit_opcode(OpCode::NEWSTRUCT)
        .emit_opcode(OpCode::TOALTSTACK);

    for (name, kind) in abi {
        let mut matching = fields.iter().filter(|field| field.name == *name);
        let field = matching
            .next()
            .ok_or_else(|| CoreError::encoding(format!("{method} is missing field '{name}'")))?;
        if matching.next().is_some() {
            return Err(CoreError::encoding(format!(
                "{method} has duplicate field '{name}'"
            )));
        }
        if field.value.kind() != *kind {
            return Err(CoreError::encoding(format!(
                "{method} field '{name}' must be {kind:?}, got {:?}",
                field.value.kind()
            )));
        }

        match &field.value {
            FieldValue::Address(address) => {
                sb.emit_push_address(address);
            }
            FieldValue::Amount(amount) => {
                if amount.is_negative() {
                    return Err(CoreError::encoding(format!(
                        "{method} field '{name}' is negative"
                    )));
                }
                sb.emit_push_integer(amount);
            }
        }

        sb.emit_opcode(OpCode::DUPFROMALTSTACK)
            .emit_opcode(OpCode::SWAP)
            .emit_opcode(OpCode::APPEND);
    }

    sb.emit_opcode(OpCode::FROMALTSTACK);
    Ok(())
}
