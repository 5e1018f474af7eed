//! The structural contracts shared by every backend.
//!
//! A type descriptor drives a [`Writer`] with a properly nested series of
//! calls (`begin_object`, values, sequences, `end_object`) and reads the same
//! series back through a [`Reader`]. The text backend lives in
//! [`crate::writer`] and [`crate::reader`]; a binary backend implements the
//! same traits over a byte buffer.

use crate::{Error, PrimitiveType, PrimitiveValue, Result};

/// Sink side of the contract. Every `begin_*` must be paired with its `end_*`.
pub trait Writer {
    fn begin_object(&mut self, type_name: &str) -> Result<()>;

    fn end_object(&mut self) -> Result<()>;

    /// Opens a sequence of `len` elements. Text backends may ignore `len`.
    fn begin_sequence(&mut self, len: usize) -> Result<()>;

    fn end_sequence(&mut self) -> Result<()>;

    fn write_value(&mut self, value: &PrimitiveValue) -> Result<()>;

    /// Writes a fixed-arity, type-less group of values.
    fn write_tuple(&mut self, values: &[PrimitiveValue]) -> Result<()>;
}

/// Source side of the contract.
pub trait Reader {
    /// Consumes and returns the next type name.
    fn seek_object_name(&mut self) -> Result<String>;

    /// Returns the next type name without consuming anything.
    fn peek_object_name(&mut self) -> Result<String>;

    /// Opens an object scope. `type_name` is informational; see
    /// [`Reader::expect_object`] for a checked variant.
    fn begin_object(&mut self, type_name: &str) -> Result<()>;

    fn end_object(&mut self) -> Result<()>;

    /// Opens a sequence and returns how many elements it holds.
    fn begin_sequence(&mut self) -> Result<usize>;

    fn end_sequence(&mut self) -> Result<()>;

    fn read_value(&mut self, kind: PrimitiveType) -> Result<PrimitiveValue>;

    fn read_tuple(&mut self, kinds: &[PrimitiveType]) -> Result<Vec<PrimitiveValue>>;

    /// Consumes the next type name, checks it equals `type_name`, and opens
    /// the object.
    fn expect_object(&mut self, type_name: &str) -> Result<()> {
        let found = self.seek_object_name()?;
        if found != type_name {
            return Err(Error::type_mismatch(type_name, &found));
        }
        self.begin_object(type_name)
    }
}
