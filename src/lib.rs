//! # uniform_text
//!
//! The human-readable backend of a uniform serialization layer.
//!
//! ## What is it?
//!
//! Values that travel between actors are described once, field by field,
//! against a pair of structural contracts: a [`Writer`] that receives
//! `begin_object` / `write_value` / `begin_sequence` / ... calls, and a
//! [`Reader`] that answers the same calls in the same order. A binary
//! backend turns those calls into a compact wire encoding; this crate turns
//! them into text that a person can read in a log line or type into a test:
//!
//! ```text
//! pair ( 1, 2 )
//! msg ( "a\"b", point ( 3, 4 ), { 1, 2, 3 } )
//! ping
//! ```
//!
//! ## Key Features
//!
//! - **Lazy parentheses**: objects without content render as their bare name
//! - **Lenient reading**: spaces and commas are interchangeable separators
//! - **Name dispatch**: [`from_str`] peeks the outermost type name and looks it
//!   up in a [`Registry`]
//! - **Serde bridge**: any `Serialize`/`Deserialize` type can drive the
//!   contracts through [`ser`] and [`de`], and [`announce_serde!`] registers it
//! - **Fail fast**: every error aborts the whole call with a byte position
//!
//! ## Quick Start
//!
//! Add this to your `Cargo.toml`:
//!
//! ```toml
//! [dependencies]
//! uniform_text = "0.1"
//! serde = { version = "1.0", features = ["derive"] }
//! ```
//!
//! ### Round trip through the registry
//!
//! ```rust
//! use serde::{Deserialize, Serialize};
//! use uniform_text::{announce_serde, from_str, to_string, Registry};
//!
//! #[derive(Serialize, Deserialize, PartialEq, Debug)]
//! struct User {
//!     id: u32,
//!     name: String,
//!     active: bool,
//! }
//!
//! announce_serde!(User);
//!
//! let mut registry = Registry::new();
//! registry.announce::<User>();
//!
//! let user = User { id: 123, name: "Alice".to_string(), active: true };
//! let text = to_string(&user).unwrap();
//! assert_eq!(text, r#"User ( 123, "Alice", true )"#);
//!
//! let object = from_str(&registry, &text).unwrap();
//! assert_eq!(object.type_name(), "User");
//! assert_eq!(object.downcast::<User>().unwrap(), user);
//! ```
//!
//! ### Hand-written descriptors
//!
//! Types that do not use serde implement [`Uniform`] and [`Announce`]
//! directly; see [`registry`] for a complete example.
//!
//! ## Error Handling
//!
//! ```rust
//! use uniform_text::{from_str, Error, Registry};
//!
//! let registry = Registry::new();
//! match from_str(&registry, "unknown_type ( 1 )") {
//!     Err(Error::TypeNotRegistered { name }) => assert_eq!(name, "unknown_type"),
//!     other => panic!("unexpected: {:?}", other),
//! }
//! ```
//!
//! ## Logging
//!
//! The crate logs through the [`log`] facade: structural reader failures at
//! `trace`, registry overwrites and top-level dispatch at `debug`. Install
//! any logger to see them.
//!
//! ## Format Specification
//!
//! See the [`grammar`] module for the token grammar and the serde mapping.

pub mod contract;
pub mod de;
pub mod error;
pub mod grammar;
pub mod macros;
pub mod options;
pub mod primitive;
pub mod reader;
pub mod registry;
pub mod ser;
pub mod writer;

pub use contract::{Reader, Writer};
pub use error::{Error, Result};
pub use options::{SequenceClose, TextOptions};
pub use primitive::{PrimitiveType, PrimitiveValue};
pub use reader::TextReader;
pub use registry::{Announce, Object, Registry, Uniform, UniformTypeInfo};
pub use writer::TextWriter;

use std::io;
use std::sync::Arc;

/// Serialize any `T: Uniform` to its text form.
///
/// # Examples
///
/// ```rust
/// use uniform_text::{announce_serde, to_string};
/// use serde::{Deserialize, Serialize};
///
/// #[derive(Serialize, Deserialize)]
/// struct Point { x: i32, y: i32 }
/// announce_serde!(Point);
///
/// assert_eq!(to_string(&Point { x: 1, y: 2 }).unwrap(), "Point ( 1, 2 )");
/// ```
///
/// # Errors
///
/// Returns an error if the descriptor issues an unbalanced call sequence or
/// hits a value the format cannot express.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_string<T>(value: &T) -> Result<String>
where
    T: ?Sized + Uniform,
{
    to_string_with_options(value, TextOptions::default())
}

/// Serialize any `T: Uniform` to text with custom options.
///
/// # Examples
///
/// ```rust
/// use uniform_text::{to_string_with_options, PrimitiveValue, Result, TextOptions, Uniform, Writer};
///
/// struct Span(Vec<u8>, u8);
///
/// impl Uniform for Span {
///     fn write_to(&self, sink: &mut dyn Writer) -> Result<()> {
///         sink.begin_object("span")?;
///         sink.begin_sequence(self.0.len())?;
///         for b in &self.0 {
///             sink.write_value(&PrimitiveValue::U8(*b))?;
///         }
///         sink.end_sequence()?;
///         sink.write_value(&PrimitiveValue::U8(self.1))?;
///         sink.end_object()
///     }
/// }
///
/// let span = Span(vec![], 5);
/// assert_eq!(to_string_with_options(&span, TextOptions::new()).unwrap(), "span ( { }, 5 )");
/// assert_eq!(to_string_with_options(&span, TextOptions::legacy()).unwrap(), "span ( { }5 )");
/// ```
///
/// # Errors
///
/// Returns an error if the value cannot be serialized.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_string_with_options<T>(value: &T, options: TextOptions) -> Result<String>
where
    T: ?Sized + Uniform,
{
    let mut out = String::with_capacity(options.initial_capacity);
    let mut writer = TextWriter::with_options(&mut out, &options);
    value.write_to(&mut writer)?;
    if writer.depth() != 0 {
        return Err(Error::custom(format!(
            "{} object(s) left open after serialization",
            writer.depth()
        )));
    }
    Ok(out)
}

/// Serialize any `T: Uniform` to an `io::Write`.
///
/// # Errors
///
/// Returns an error if serialization fails or writing to the writer fails.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_writer<W, T>(writer: W, value: &T) -> Result<()>
where
    W: io::Write,
    T: ?Sized + Uniform,
{
    to_writer_with_options(writer, value, TextOptions::default())
}

/// Serialize any `T: Uniform` to an `io::Write` with custom options.
///
/// # Errors
///
/// Returns an error if serialization fails or writing to the writer fails.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_writer_with_options<W, T>(mut writer: W, value: &T, options: TextOptions) -> Result<()>
where
    W: io::Write,
    T: ?Sized + Uniform,
{
    let text = to_string_with_options(value, options)?;
    writer
        .write_all(text.as_bytes())
        .map_err(|e| Error::io(&e.to_string()))?;
    Ok(())
}

/// Deserialize a value of any announced type from text.
///
/// The outermost type name is peeked and looked up in `registry`; the
/// matching descriptor then reads the value. Text after the outermost
/// object is rejected.
///
/// # Examples
///
/// ```rust
/// use uniform_text::{from_str, Error, Registry};
///
/// let err = from_str(&Registry::new(), "pair ( 1, 2 )").unwrap_err();
/// assert_eq!(err, Error::type_not_registered("pair"));
/// ```
///
/// # Errors
///
/// Returns [`Error::TypeNotRegistered`] for an unknown name, and
/// [`Error::MalformedInput`] with a byte position for text that does not
/// follow the grammar.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_str(registry: &Registry, s: &str) -> Result<Object> {
    let mut reader = TextReader::new(s);
    let name = reader.peek_object_name()?;
    let info = registry
        .by_name(&name)
        .ok_or_else(|| Error::type_not_registered(&name))?;
    log::debug!("Dispatching text deserialization to {:?}", name);
    let value = info.deserialize(&mut reader)?;
    reader.finish()?;
    Ok(Object::from_parts(Arc::clone(info), value))
}

/// Deserialize a value of one known type, without a registry.
///
/// # Examples
///
/// ```rust
/// use serde::{Deserialize, Serialize};
/// use uniform_text::{announce_serde, from_str_as};
///
/// #[derive(Serialize, Deserialize, Debug, PartialEq)]
/// struct Pair(i32, i32);
/// announce_serde!(Pair);
///
/// assert_eq!(from_str_as::<Pair>("Pair ( 1, 2 )").unwrap(), Pair(1, 2));
/// assert!(from_str_as::<Pair>("Other ( 1, 2 )").is_err());
/// ```
///
/// # Errors
///
/// Returns [`Error::TypeNotRegistered`] if the text names a type other than
/// `T`, otherwise the same errors as [`from_str`].
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_str_as<T: Announce>(s: &str) -> Result<T> {
    let mut reader = TextReader::new(s);
    let name = reader.peek_object_name()?;
    if name != T::NAME {
        return Err(Error::type_not_registered(&name));
    }
    let value = T::read_from(&mut reader)?;
    reader.finish()?;
    Ok(value)
}

/// Deserialize from bytes of UTF-8 text.
///
/// # Errors
///
/// Returns an error if the bytes are not valid UTF-8, or for the same
/// reasons as [`from_str`].
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_slice(registry: &Registry, v: &[u8]) -> Result<Object> {
    let s = std::str::from_utf8(v).map_err(|e| Error::custom(e.to_string()))?;
    from_str(registry, s)
}

/// Deserialize from an I/O stream of text.
///
/// The stream is read to its end before parsing starts.
///
/// # Errors
///
/// Returns an error if reading fails, or for the same reasons as [`from_str`].
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_reader<R>(registry: &Registry, mut reader: R) -> Result<Object>
where
    R: io::Read,
{
    let mut string = String::new();
    reader
        .read_to_string(&mut string)
        .map_err(|e| Error::io(&e.to_string()))?;
    from_str(registry, &string)
}
