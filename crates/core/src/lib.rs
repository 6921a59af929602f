//! # Ontology Core
//!
//! Building blocks for calling the native asset contracts: addresses, the
//! NeoVM invocation encoding, transaction envelopes and signing.
//!
//! Nothing in this crate talks to the network. Transactions are built and
//! signed here and handed to a gateway by the caller.
//!
//! ## Example
//!
//! ```rust,no_run
//! use ont_core::{Asset, AssetTransactions, KeyPairAccount, SigningAccount, SigningCoordinator};
//! use num_bigint::BigInt;
//!
//! let sender = KeyPairAccount::generate();
//! let recipient = KeyPairAccount::generate().address();
//!
//! let builder = AssetTransactions::default();
//! let mut tx = builder
//!     .new_transfer(
//!         Asset::Ont,
//!         &sender.address(),
//!         &recipient,
//!         &BigInt::from(5),
//!         &sender.address(),
//!         20_000,
//!         500,
//!     )
//!     .unwrap();
//! SigningCoordinator::sign(&mut tx, &sender).unwrap();
//! println!("{}", tx.to_hex());
//! ```

#![warn(rustdoc::missing_crate_level_docs)]

pub mod account;
pub mod address;
pub mod asset;
pub mod asset_transactions;
pub mod error;
pub mod invocation;
pub mod io;
pub mod signing;
pub mod transaction;
pub mod transaction_factory;
pub mod vm;
pub mod witness;

pub use account::{KeyPairAccount, SigningAccount};
pub use address::Address;
pub use asset::{resolve_asset_address, Asset, AssetRegistry, ONG_CONTRACT, ONT_CONTRACT};
pub use asset_transactions::AssetTransactions;
pub use error::{CoreError, CoreResult};
pub use invocation::{
    encode_native_invocation, ArgumentShape, FieldKind, FieldValue, InvocationArgs, NamedField,
    NativeInvocationEncoder, NativeMethod,
};
pub use signing::SigningCoordinator;
pub use transaction::{Transaction, TxHash};
pub use transaction_factory::{validate_amount, validate_gas, TransactionFactory};
pub use vm::{decode_invocation, DecodedInvocation, VmValue};
pub use witness::Witness;
