//! Text serialization.
//!
//! [`TextWriter`] implements the [`Writer`] contract over a borrowed
//! `String`. Output looks like:
//!
//! ```text
//! pair ( 1, 2 )
//! msg ( "a\"b", point ( 3, 4 ), { 1, 2, 3 } )
//! empty
//! ```
//!
//! Opening parentheses are emitted lazily: an object that never receives
//! content renders as its bare type name.
//!
//! ## Direct Writer Usage
//!
//! ```rust
//! use uniform_text::{PrimitiveValue, TextWriter, Writer};
//!
//! let mut out = String::new();
//! let mut writer = TextWriter::new(&mut out);
//! writer.begin_object("pair").unwrap();
//! writer.write_value(&PrimitiveValue::I32(1)).unwrap();
//! writer.write_value(&PrimitiveValue::I32(2)).unwrap();
//! writer.end_object().unwrap();
//! assert_eq!(out, "pair ( 1, 2 )");
//! ```

use crate::{Error, PrimitiveValue, Result, SequenceClose, TextOptions, Writer};

/// Content state of one open object.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Scope {
    /// Type name written, `(` still owed.
    Pending,
    /// `(` written.
    Open,
}

/// The text backend of the [`Writer`] contract.
///
/// Bound to exactly one top-level serialization; the sink is borrowed, not owned.
pub struct TextWriter<'a> {
    out: &'a mut String,
    scopes: Vec<Scope>,
    after_value: bool,
    sequence_close: SequenceClose,
}

impl<'a> TextWriter<'a> {
    pub fn new(out: &'a mut String) -> Self {
        Self::with_options(out, &TextOptions::default())
    }

    pub fn with_options(out: &'a mut String, options: &TextOptions) -> Self {
        TextWriter {
            out,
            scopes: Vec::new(),
            after_value: false,
            sequence_close: options.sequence_close,
        }
    }

    /// Number of objects currently open.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.scopes.len()
    }

    /// Emits whatever separator or deferred `(` the next token needs.
    fn prepare_token(&mut self) {
        if self.after_value {
            self.out.push_str(", ");
            self.after_value = false;
        } else if let Some(scope) = self.scopes.last_mut() {
            if *scope == Scope::Pending {
                self.out.push_str(" ( ");
                *scope = Scope::Open;
            }
        }
    }

    fn close_group(&mut self) {
        self.out.push_str(if self.after_value { " }" } else { "}" });
        if self.sequence_close == SequenceClose::Separated {
            self.after_value = true;
        }
    }

    #[inline]
    fn needs_quotes(c: char) -> bool {
        matches!(c, '(' | ')' | '{' | '}' | ' ' | ',' | '"')
    }

    fn write_quoted(&mut self, s: &str) {
        self.out.push('"');
        for ch in s.chars() {
            match ch {
                '"' => self.out.push_str("\\\""),
                _ => self.out.push(ch),
            }
        }
        self.out.push('"');
    }
}

impl Writer for TextWriter<'_> {
    fn begin_object(&mut self, type_name: &str) -> Result<()> {
        if type_name.is_empty() || type_name.chars().any(Self::needs_quotes) {
            return Err(Error::unsupported(&format!(
                "type name {:?} is empty or contains a delimiter",
                type_name
            )));
        }
        self.prepare_token();
        self.out.push_str(type_name);
        self.scopes.push(Scope::Pending);
        Ok(())
    }

    fn end_object(&mut self) -> Result<()> {
        match self.scopes.pop() {
            Some(Scope::Pending) => {}
            Some(Scope::Open) => {
                self.out.push_str(if self.after_value { " )" } else { ")" });
            }
            None => return Err(Error::custom("end_object without an open object")),
        }
        self.after_value = true;
        Ok(())
    }

    fn begin_sequence(&mut self, _len: usize) -> Result<()> {
        self.prepare_token();
        self.out.push_str("{ ");
        Ok(())
    }

    fn end_sequence(&mut self) -> Result<()> {
        self.close_group();
        Ok(())
    }

    fn write_value(&mut self, value: &PrimitiveValue) -> Result<()> {
        self.prepare_token();
        match value {
            PrimitiveValue::U8String(s) => self.write_quoted(s),
            PrimitiveValue::Char(c) if Self::needs_quotes(*c) => {
                let mut buf = [0u8; 4];
                self.write_quoted(c.encode_utf8(&mut buf));
            }
            // No text form for wide strings.
            PrimitiveValue::U16String(_) | PrimitiveValue::U32String(_) => {}
            other => self.out.push_str(&other.to_string()),
        }
        self.after_value = true;
        Ok(())
    }

    fn write_tuple(&mut self, values: &[PrimitiveValue]) -> Result<()> {
        self.prepare_token();
        self.out.push_str(" {");
        for value in values {
            self.write_value(value)?;
        }
        self.close_group();
        Ok(())
    }
}
