//! NeoVM script construction and decoding for native contract calls.

pub mod op_code;
pub mod script_builder;
pub mod script_reader;

pub use op_code::OpCode;
pub use script_builder::ScriptBuilder;
pub use script_reader::{decode_invocation, DecodedInvocation, ScriptReader, VmValue};
