//! Error types for uniform text serialization and deserialization.
//!
//! Every failure is fatal to the call that produced it: there is no partial
//! value and no resynchronization. A reader that returned an error must be
//! dropped.
//!
//! ## Error Categories
//!
//! - **Malformed input**: unexpected character, missing or extra delimiter,
//!   unterminated value, trailing text after the outermost object, or a read
//!   inside an object that was opened without parentheses
//! - **Type not registered**: the outermost type name is unknown to the registry
//! - **Type mismatch**: a descriptor expected one type name and found another
//! - **Unsupported**: a value shape the grammar cannot express
//!
//! ## Examples
//!
//! ```rust
//! use uniform_text::{from_str, Error, Registry};
//!
//! let registry = Registry::new();
//! let err = from_str(&registry, "unknown_type ( 1 )").unwrap_err();
//! assert!(matches!(err, Error::TypeNotRegistered { .. }));
//! assert!(err.to_string().contains("unknown_type"));
//! ```

use std::fmt;
use thiserror::Error;

/// Represents all possible errors that can occur during uniform text (de)serialization.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// The source text does not follow the grammar.
    #[error("malformed string at byte {position}: {reason}")]
    MalformedInput { reason: String, position: usize },

    /// The outermost type name has no registry entry.
    #[error("type not registered: {name}")]
    TypeNotRegistered { name: String },

    /// A descriptor asked for one type name but the text carries another.
    #[error("type mismatch: expected {expected}, found {found}")]
    TypeMismatch { expected: String, found: String },

    /// The value cannot be expressed in this format.
    #[error("unsupported: {0}")]
    Unsupported(String),

    /// IO error during reading or writing
    #[error("IO error: {0}")]
    Io(String),

    /// Custom error
    #[error("error: {0}")]
    Custom(String),
}

impl Error {
    /// Creates a malformed-input error at the given byte offset.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use uniform_text::Error;
    ///
    /// let err = Error::malformed(7, "expected ')' found end of input");
    /// assert_eq!(err.position(), Some(7));
    /// assert!(err.to_string().contains("byte 7"));
    /// ```
    pub fn malformed(position: usize, reason: impl Into<String>) -> Self {
        Error::MalformedInput {
            reason: reason.into(),
            position,
        }
    }

    pub fn type_not_registered(name: &str) -> Self {
        Error::TypeNotRegistered {
            name: name.to_string(),
        }
    }

    pub fn type_mismatch(expected: &str, found: &str) -> Self {
        Error::TypeMismatch {
            expected: expected.to_string(),
            found: found.to_string(),
        }
    }

    /// Creates an unsupported error for shapes the grammar has no token for.
    pub fn unsupported(msg: &str) -> Self {
        Error::Unsupported(msg.to_string())
    }

    /// Creates a custom error with a display message.
    pub fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Custom(msg.to_string())
    }

    /// Creates an I/O error for reading/writing failures.
    pub fn io(msg: &str) -> Self {
        Error::Io(msg.to_string())
    }

    /// Returns `true` if the source text itself was at fault.
    #[must_use]
    pub fn is_malformed(&self) -> bool {
        matches!(self, Error::MalformedInput { .. })
    }

    /// Byte offset of the offending character, for malformed input.
    #[must_use]
    pub fn position(&self) -> Option<usize> {
        match self {
            Error::MalformedInput { position, .. } => Some(*position),
            _ => None,
        }
    }
}

impl serde::ser::Error for Error {
    fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Custom(msg.to_string())
    }
}

impl serde::de::Error for Error {
    fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Custom(msg.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_malformed_display_names_position() {
        let err = Error::malformed(12, "expected '(' found '}'");
        assert_eq!(
            err.to_string(),
            "malformed string at byte 12: expected '(' found '}'"
        );
        assert!(err.is_malformed());
    }

    #[test]
    fn test_type_not_registered_has_no_position() {
        let err = Error::type_not_registered("msg");
        assert_eq!(err.position(), None);
        assert!(!err.is_malformed());
        assert_eq!(err.to_string(), "type not registered: msg");
    }

    #[test]
    fn test_serde_custom_errors() {
        let ser = <Error as serde::ser::Error>::custom("bad field");
        let de = <Error as serde::de::Error>::custom("bad field");
        assert_eq!(ser, de);
        assert_eq!(ser, Error::Custom("bad field".to_string()));
    }
}
