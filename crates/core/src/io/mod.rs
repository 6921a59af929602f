//! Binary encoding helpers for the transaction wire format.

pub mod binary_writer;
pub mod memory_reader;

pub use binary_writer::BinaryWriter;
pub use memory_reader::MemoryReader;
