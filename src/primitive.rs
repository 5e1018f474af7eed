//! Primitive values carried by the Writer/Reader contracts.
//!
//! The kind set is closed: every operation over a [`PrimitiveValue`] is an
//! exhaustive `match` on its tag.
//!
//! ## Core Types
//!
//! - [`PrimitiveType`]: the tag alone, used by readers to say what to expect
//! - [`PrimitiveValue`]: tag plus payload
//!
//! ## Examples
//!
//! ```rust
//! use uniform_text::{PrimitiveType, PrimitiveValue};
//! use std::convert::TryFrom;
//!
//! let value = PrimitiveValue::from(42i32);
//! assert_eq!(value.kind(), PrimitiveType::I32);
//! assert_eq!(value.to_string(), "42");
//!
//! let parsed = PrimitiveValue::parse(PrimitiveType::I32, "42").unwrap();
//! assert_eq!(i32::try_from(parsed).unwrap(), 42);
//! ```
//!
//! UTF-16 and UTF-32 strings are part of the kind set but have no text form:
//! they render as nothing and read back empty.

use std::fmt;

/// The tag of a [`PrimitiveValue`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PrimitiveType {
    Bool,
    I8,
    I16,
    I32,
    I64,
    U8,
    U16,
    U32,
    U64,
    F32,
    F64,
    Char,
    U8String,
    U16String,
    U32String,
}

impl PrimitiveType {
    /// Every kind, in declaration order.
    pub const ALL: [PrimitiveType; 15] = [
        PrimitiveType::Bool,
        PrimitiveType::I8,
        PrimitiveType::I16,
        PrimitiveType::I32,
        PrimitiveType::I64,
        PrimitiveType::U8,
        PrimitiveType::U16,
        PrimitiveType::U32,
        PrimitiveType::U64,
        PrimitiveType::F32,
        PrimitiveType::F64,
        PrimitiveType::Char,
        PrimitiveType::U8String,
        PrimitiveType::U16String,
        PrimitiveType::U32String,
    ];

    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            PrimitiveType::Bool => "bool",
            PrimitiveType::I8 => "i8",
            PrimitiveType::I16 => "i16",
            PrimitiveType::I32 => "i32",
            PrimitiveType::I64 => "i64",
            PrimitiveType::U8 => "u8",
            PrimitiveType::U16 => "u16",
            PrimitiveType::U32 => "u32",
            PrimitiveType::U64 => "u64",
            PrimitiveType::F32 => "f32",
            PrimitiveType::F64 => "f64",
            PrimitiveType::Char => "char",
            PrimitiveType::U8String => "u8string",
            PrimitiveType::U16String => "u16string",
            PrimitiveType::U32String => "u32string",
        }
    }

    /// Returns `true` for the kinds this codec can write and read back.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use uniform_text::PrimitiveType;
    ///
    /// assert!(PrimitiveType::U8String.is_text_supported());
    /// assert!(!PrimitiveType::U16String.is_text_supported());
    /// ```
    #[inline]
    #[must_use]
    pub const fn is_text_supported(&self) -> bool {
        !matches!(self, PrimitiveType::U16String | PrimitiveType::U32String)
    }
}

impl fmt::Display for PrimitiveType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A tagged primitive. The payload always matches the tag.
///
/// # Examples
///
/// ```rust
/// use uniform_text::{PrimitiveType, PrimitiveValue};
///
/// let text = PrimitiveValue::from("hello");
/// assert_eq!(text.kind(), PrimitiveType::U8String);
/// assert_eq!(text.as_str(), Some("hello"));
/// ```
#[derive(Clone, Debug, PartialEq)]
pub enum PrimitiveValue {
    Bool(bool),
    I8(i8),
    I16(i16),
    I32(i32),
    I64(i64),
    U8(u8),
    U16(u16),
    U32(u32),
    U64(u64),
    F32(f32),
    F64(f64),
    Char(char),
    U8String(String),
    U16String(Vec<u16>),
    U32String(Vec<u32>),
}

impl PrimitiveValue {
    #[must_use]
    pub const fn kind(&self) -> PrimitiveType {
        match self {
            PrimitiveValue::Bool(_) => PrimitiveType::Bool,
            PrimitiveValue::I8(_) => PrimitiveType::I8,
            PrimitiveValue::I16(_) => PrimitiveType::I16,
            PrimitiveValue::I32(_) => PrimitiveType::I32,
            PrimitiveValue::I64(_) => PrimitiveType::I64,
            PrimitiveValue::U8(_) => PrimitiveType::U8,
            PrimitiveValue::U16(_) => PrimitiveType::U16,
            PrimitiveValue::U32(_) => PrimitiveType::U32,
            PrimitiveValue::U64(_) => PrimitiveType::U64,
            PrimitiveValue::F32(_) => PrimitiveType::F32,
            PrimitiveValue::F64(_) => PrimitiveType::F64,
            PrimitiveValue::Char(_) => PrimitiveType::Char,
            PrimitiveValue::U8String(_) => PrimitiveType::U8String,
            PrimitiveValue::U16String(_) => PrimitiveType::U16String,
            PrimitiveValue::U32String(_) => PrimitiveType::U32String,
        }
    }

    /// The zero value of `kind`: `false`, `0`, `'\0'` or an empty string.
    #[must_use]
    pub fn default_for(kind: PrimitiveType) -> Self {
        match kind {
            PrimitiveType::Bool => PrimitiveValue::Bool(false),
            PrimitiveType::I8 => PrimitiveValue::I8(0),
            PrimitiveType::I16 => PrimitiveValue::I16(0),
            PrimitiveType::I32 => PrimitiveValue::I32(0),
            PrimitiveType::I64 => PrimitiveValue::I64(0),
            PrimitiveType::U8 => PrimitiveValue::U8(0),
            PrimitiveType::U16 => PrimitiveValue::U16(0),
            PrimitiveType::U32 => PrimitiveValue::U32(0),
            PrimitiveType::U64 => PrimitiveValue::U64(0),
            PrimitiveType::F32 => PrimitiveValue::F32(0.0),
            PrimitiveType::F64 => PrimitiveValue::F64(0.0),
            PrimitiveType::Char => PrimitiveValue::Char('\0'),
            PrimitiveType::U8String => PrimitiveValue::U8String(String::new()),
            PrimitiveType::U16String => PrimitiveValue::U16String(Vec::new()),
            PrimitiveType::U32String => PrimitiveValue::U32String(Vec::new()),
        }
    }

    /// Parses an unescaped token into a value of `kind`.
    ///
    /// Numeric kinds use Rust's native `str::parse`; booleans accept
    /// `true`/`false` and `1`/`0`; chars need exactly one character; UTF-8
    /// strings are taken verbatim. The UTF-16/32 kinds ignore the token and
    /// come back empty. Returns `None` when the token is not a valid literal.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use uniform_text::{PrimitiveType, PrimitiveValue};
    ///
    /// assert_eq!(
    ///     PrimitiveValue::parse(PrimitiveType::Bool, "1"),
    ///     Some(PrimitiveValue::Bool(true))
    /// );
    /// assert_eq!(PrimitiveValue::parse(PrimitiveType::U8, "256"), None);
    /// ```
    #[must_use]
    pub fn parse(kind: PrimitiveType, token: &str) -> Option<Self> {
        let value = match kind {
            PrimitiveType::Bool => match token {
                "true" | "1" => PrimitiveValue::Bool(true),
                "false" | "0" => PrimitiveValue::Bool(false),
                _ => return None,
            },
            PrimitiveType::I8 => PrimitiveValue::I8(token.parse().ok()?),
            PrimitiveType::I16 => PrimitiveValue::I16(token.parse().ok()?),
            PrimitiveType::I32 => PrimitiveValue::I32(token.parse().ok()?),
            PrimitiveType::I64 => PrimitiveValue::I64(token.parse().ok()?),
            PrimitiveType::U8 => PrimitiveValue::U8(token.parse().ok()?),
            PrimitiveType::U16 => PrimitiveValue::U16(token.parse().ok()?),
            PrimitiveType::U32 => PrimitiveValue::U32(token.parse().ok()?),
            PrimitiveType::U64 => PrimitiveValue::U64(token.parse().ok()?),
            PrimitiveType::F32 => PrimitiveValue::F32(token.parse().ok()?),
            PrimitiveType::F64 => PrimitiveValue::F64(token.parse().ok()?),
            PrimitiveType::Char => {
                let mut chars = token.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) => PrimitiveValue::Char(c),
                    _ => return None,
                }
            }
            PrimitiveType::U8String => PrimitiveValue::U8String(token.to_string()),
            PrimitiveType::U16String | PrimitiveType::U32String => {
                PrimitiveValue::default_for(kind)
            }
        };
        Some(value)
    }

    #[inline]
    #[must_use]
    pub const fn is_string(&self) -> bool {
        matches!(self, PrimitiveValue::U8String(_))
    }

    #[must_use]
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            PrimitiveValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            PrimitiveValue::U8String(s) => Some(s),
            _ => None,
        }
    }

    /// Widens any signed or unsigned integer that fits into an `i64`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use uniform_text::PrimitiveValue;
    ///
    /// assert_eq!(PrimitiveValue::U16(7).as_i64(), Some(7));
    /// assert_eq!(PrimitiveValue::U64(u64::MAX).as_i64(), None);
    /// assert_eq!(PrimitiveValue::F64(1.0).as_i64(), None);
    /// ```
    #[must_use]
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            PrimitiveValue::I8(v) => Some(i64::from(*v)),
            PrimitiveValue::I16(v) => Some(i64::from(*v)),
            PrimitiveValue::I32(v) => Some(i64::from(*v)),
            PrimitiveValue::I64(v) => Some(*v),
            PrimitiveValue::U8(v) => Some(i64::from(*v)),
            PrimitiveValue::U16(v) => Some(i64::from(*v)),
            PrimitiveValue::U32(v) => Some(i64::from(*v)),
            PrimitiveValue::U64(v) => i64::try_from(*v).ok(),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            PrimitiveValue::F32(v) => Some(f64::from(*v)),
            PrimitiveValue::F64(v) => Some(*v),
            _ => None,
        }
    }
}

/// Native text form. Strings are printed raw; quoting belongs to the writer.
impl fmt::Display for PrimitiveValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PrimitiveValue::Bool(v) => write!(f, "{}", v),
            PrimitiveValue::I8(v) => write!(f, "{}", v),
            PrimitiveValue::I16(v) => write!(f, "{}", v),
            PrimitiveValue::I32(v) => write!(f, "{}", v),
            PrimitiveValue::I64(v) => write!(f, "{}", v),
            PrimitiveValue::U8(v) => write!(f, "{}", v),
            PrimitiveValue::U16(v) => write!(f, "{}", v),
            PrimitiveValue::U32(v) => write!(f, "{}", v),
            PrimitiveValue::U64(v) => write!(f, "{}", v),
            PrimitiveValue::F32(v) => write!(f, "{}", v),
            PrimitiveValue::F64(v) => write!(f, "{}", v),
            PrimitiveValue::Char(v) => write!(f, "{}", v),
            PrimitiveValue::U8String(v) => f.write_str(v),
            PrimitiveValue::U16String(_) | PrimitiveValue::U32String(_) => Ok(()),
        }
    }
}

macro_rules! primitive_conversions {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(
            impl From<$ty> for PrimitiveValue {
                fn from(value: $ty) -> Self {
                    PrimitiveValue::$variant(value)
                }
            }

            impl TryFrom<PrimitiveValue> for $ty {
                type Error = crate::Error;

                fn try_from(value: PrimitiveValue) -> crate::Result<Self> {
                    match value {
                        PrimitiveValue::$variant(v) => Ok(v),
                        other => Err(crate::Error::type_mismatch(
                            PrimitiveType::$variant.as_str(),
                            other.kind().as_str(),
                        )),
                    }
                }
            }
        )*
    };
}

primitive_conversions! {
    bool => Bool,
    i8 => I8,
    i16 => I16,
    i32 => I32,
    i64 => I64,
    u8 => U8,
    u16 => U16,
    u32 => U32,
    u64 => U64,
    f32 => F32,
    f64 => F64,
    char => Char,
    String => U8String,
}

impl From<&str> for PrimitiveValue {
    fn from(value: &str) -> Self {
        PrimitiveValue::U8String(value.to_string())
    }
}
