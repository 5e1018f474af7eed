//! Text deserialization.
//!
//! [`TextReader`] implements the [`Reader`] contract over a borrowed `&str`.
//! It is a cursor, not a parser: the caller (a type descriptor) already
//! knows which kinds to expect and asks for them one token at a time.
//!
//! Spaces and commas are interchangeable separators outside quoted strings.
//! Each open object records whether its `(` was actually present; content
//! reads inside an object opened without one are rejected.
//!
//! ## Usage
//!
//! ```rust
//! use uniform_text::{PrimitiveType, PrimitiveValue, Reader, TextReader};
//!
//! let mut reader = TextReader::new("pair ( 1, 2 )");
//! assert_eq!(reader.peek_object_name().unwrap(), "pair");
//! reader.expect_object("pair").unwrap();
//! assert_eq!(reader.read_value(PrimitiveType::I32).unwrap(), PrimitiveValue::I32(1));
//! assert_eq!(reader.read_value(PrimitiveType::I32).unwrap(), PrimitiveValue::I32(2));
//! reader.end_object().unwrap();
//! ```

use crate::{Error, PrimitiveType, PrimitiveValue, Reader, Result};

/// Whether an object scope declared content with `(`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Opener {
    Parenthesis,
    Bare,
}

/// The text backend of the [`Reader`] contract.
///
/// Bound to exactly one top-level deserialization. After any error the
/// cursor state is unspecified and the reader must be dropped.
pub struct TextReader<'a> {
    input: &'a str,
    position: usize,
    open_objects: usize,
    scopes: Vec<Opener>,
}

#[inline]
fn is_delimiter(b: u8) -> bool {
    matches!(b, b'(' | b')' | b'{' | b'}' | b' ' | b',')
}

impl<'a> TextReader<'a> {
    pub fn new(input: &'a str) -> Self {
        TextReader {
            input,
            position: 0,
            open_objects: 0,
            scopes: Vec::new(),
        }
    }

    /// Byte offset of the cursor.
    #[must_use]
    pub fn position(&self) -> usize {
        self.position
    }

    /// Number of objects currently open.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.open_objects
    }

    /// Checks that every object was closed and nothing but separators remains.
    pub fn finish(&mut self) -> Result<()> {
        if self.open_objects != 0 {
            let reason = format!("{} object(s) left open", self.open_objects);
            return Err(self.malformed_at(self.position, reason));
        }
        self.skip_separators();
        if self.at_end() {
            Ok(())
        } else {
            let reason = format!("expected end of string, found {}", self.describe_current());
            Err(self.malformed_at(self.position, reason))
        }
    }

    fn peek_byte(&self) -> Option<u8> {
        self.input.as_bytes().get(self.position).copied()
    }

    fn at_end(&self) -> bool {
        self.position >= self.input.len()
    }

    fn describe_current(&self) -> String {
        match self.input[self.position..].chars().next() {
            Some(c) => format!("'{}'", c),
            None => "end of input".to_string(),
        }
    }

    fn malformed_at(&self, position: usize, reason: String) -> Error {
        log::trace!("malformed input at byte {}: {}", position, reason);
        Error::malformed(position, reason)
    }

    fn skip_separators(&mut self) {
        while let Some(b' ' | b',') = self.peek_byte() {
            self.position += 1;
        }
    }

    fn consume(&mut self, expected: char) -> Result<()> {
        self.skip_separators();
        if self.peek_byte() == Some(expected as u8) {
            self.position += 1;
            Ok(())
        } else {
            let reason = format!("expected '{}' found {}", expected, self.describe_current());
            Err(self.malformed_at(self.position, reason))
        }
    }

    fn try_consume(&mut self, candidate: char) -> bool {
        self.skip_separators();
        if self.peek_byte() == Some(candidate as u8) {
            self.position += 1;
            true
        } else {
            false
        }
    }

    /// Index of the next delimiter at or after `from`, or the input length.
    fn scan_to_delimiter(&self, from: usize) -> usize {
        self.input.as_bytes()[from..]
            .iter()
            .position(|&b| is_delimiter(b))
            .map_or(self.input.len(), |offset| from + offset)
    }

    /// Index of the first `"` at or after `from` that does not follow a backslash.
    /// `from` is just past an opening quote.
    fn find_closing_quote(&self, from: usize) -> Option<usize> {
        let mut last = b'"';
        for (offset, &b) in self.input.as_bytes()[from..].iter().enumerate() {
            if b == b'"' && last != b'\\' {
                return Some(from + offset);
            }
            last = b;
        }
        None
    }

    /// Counts the elements between the cursor and the matching `}`.
    ///
    /// An element starts at the first byte at the sequence's own level that
    /// follows a separator, the opening `{`, or a closed nested group. The
    /// last case covers the legacy close, which writes `{ }{ }` with no
    /// comma between siblings. A `(` belongs to the name before it.
    fn count_elements(&self) -> Result<usize> {
        let bytes = self.input.as_bytes();
        let mut depth = 0usize;
        let mut count = 0usize;
        let mut at_start = true;
        let mut i = self.position;
        while i < bytes.len() {
            match bytes[i] {
                b'}' if depth == 0 => return Ok(count),
                b' ' | b',' => at_start |= depth == 0,
                b'(' => depth += 1,
                b')' | b'}' => {
                    depth = depth.saturating_sub(1);
                    at_start |= depth == 0;
                }
                b => {
                    if depth == 0 && at_start {
                        count += 1;
                        at_start = false;
                    }
                    if b == b'{' {
                        depth += 1;
                    } else if b == b'"' {
                        match self.find_closing_quote(i + 1) {
                            Some(end) => i = end,
                            None => break,
                        }
                    }
                }
            }
            i += 1;
        }
        Err(self.malformed_at(self.position, "unterminated sequence".to_string()))
    }

    fn integrity_check(&self) -> Result<()> {
        match self.scopes.last() {
            None => Err(self.malformed_at(self.position, "missing begin_object()".to_string())),
            Some(Opener::Bare) => Err(self.malformed_at(
                self.position,
                "expected left parenthesis after begin_object call or void value".to_string(),
            )),
            Some(Opener::Parenthesis) => Ok(()),
        }
    }
}

impl Reader for TextReader<'_> {
    fn seek_object_name(&mut self) -> Result<String> {
        self.skip_separators();
        let start = self.position;
        let end = self.scan_to_delimiter(start);
        if end == start {
            let reason = format!("could not find a type name, found {}", self.describe_current());
            return Err(self.malformed_at(start, reason));
        }
        self.position = end;
        Ok(self.input[start..end].to_string())
    }

    fn peek_object_name(&mut self) -> Result<String> {
        let saved = self.position;
        let name = self.seek_object_name()?;
        self.position = saved;
        Ok(name)
    }

    fn begin_object(&mut self, _type_name: &str) -> Result<()> {
        self.open_objects += 1;
        self.skip_separators();
        let opener = if self.try_consume('(') {
            Opener::Parenthesis
        } else {
            Opener::Bare
        };
        self.scopes.push(opener);
        debug_assert_eq!(self.scopes.len(), self.open_objects);
        Ok(())
    }

    fn end_object(&mut self) -> Result<()> {
        match self.scopes.pop() {
            None => {
                return Err(self.malformed_at(self.position, "missing begin_object()".to_string()))
            }
            Some(Opener::Parenthesis) => self.consume(')')?,
            Some(Opener::Bare) => {}
        }
        self.open_objects -= 1;
        debug_assert_eq!(self.scopes.len(), self.open_objects);
        if self.open_objects == 0 {
            self.skip_separators();
            if !self.at_end() {
                let reason = format!("expected end of string, found {}", self.describe_current());
                return Err(self.malformed_at(self.position, reason));
            }
        }
        Ok(())
    }

    fn begin_sequence(&mut self) -> Result<usize> {
        self.integrity_check()?;
        self.consume('{')?;
        self.count_elements()
    }

    fn end_sequence(&mut self) -> Result<()> {
        self.consume('}')
    }

    fn read_value(&mut self, kind: PrimitiveType) -> Result<PrimitiveValue> {
        self.integrity_check()?;
        self.skip_separators();
        let start = self.position;
        let quotable = matches!(kind, PrimitiveType::U8String | PrimitiveType::Char);
        let token = if quotable && self.peek_byte() == Some(b'"') {
            let end = self
                .find_closing_quote(start + 1)
                .ok_or_else(|| self.malformed_at(start, "unterminated value".to_string()))?;
            self.position = end + 1;
            self.input[start + 1..end].replace("\\\"", "\"")
        } else {
            let end = self.scan_to_delimiter(start);
            if end == self.input.len() {
                return Err(self.malformed_at(start, "unterminated value".to_string()));
            }
            self.position = end;
            self.input[start..end].to_string()
        };
        PrimitiveValue::parse(kind, &token).ok_or_else(|| {
            self.malformed_at(start, format!("invalid {} literal '{}'", kind, token))
        })
    }

    fn read_tuple(&mut self, kinds: &[PrimitiveType]) -> Result<Vec<PrimitiveValue>> {
        self.integrity_check()?;
        self.consume('{')?;
        let values = kinds
            .iter()
            .map(|&kind| self.read_value(kind))
            .collect::<Result<Vec<_>>>()?;
        self.consume('}')?;
        Ok(values)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_peek_leaves_position_unchanged() {
        let mut reader = TextReader::new("  msg ( 1 )");
        assert_eq!(reader.peek_object_name().unwrap(), "msg");
        assert_eq!(reader.position(), 0);
        assert_eq!(reader.seek_object_name().unwrap(), "msg");
        assert_eq!(reader.position(), 5);
    }

    #[test]
    fn test_seek_without_name_fails() {
        let mut reader = TextReader::new(" ( 1 )");
        let err = reader.seek_object_name().unwrap_err();
        assert!(err.to_string().contains("could not find a type name"));
        assert_eq!(err.position(), Some(1));
    }

    #[test]
    fn test_sequence_cardinality() {
        let mut reader = TextReader::new("list ( { 1, 2, 3 } )");
        reader.expect_object("list").unwrap();
        assert_eq!(reader.begin_sequence().unwrap(), 3);
        for expected in 1..=3 {
            assert_eq!(
                reader.read_value(PrimitiveType::I32).unwrap(),
                PrimitiveValue::I32(expected)
            );
        }
        reader.end_sequence().unwrap();
        reader.end_object().unwrap();
    }

    #[test]
    fn test_empty_sequence_has_no_elements() {
        let mut reader = TextReader::new("list ( { } )");
        reader.expect_object("list").unwrap();
        assert_eq!(reader.begin_sequence().unwrap(), 0);
        reader.end_sequence().unwrap();
        reader.end_object().unwrap();
    }

    #[test]
    fn test_sequence_count_ignores_quoted_and_nested_commas() {
        let mut reader = TextReader::new(r#"s ( { "a, b", p ( 1, 2 ), "}" } )"#);
        reader.expect_object("s").unwrap();
        assert_eq!(reader.begin_sequence().unwrap(), 3);
    }

    #[test]
    fn test_sequence_count_without_commas_between_groups() {
        let mut reader = TextReader::new(r#"s ( { { }{ } p ( 1 )"x" } )"#);
        reader.expect_object("s").unwrap();
        assert_eq!(reader.begin_sequence().unwrap(), 4);
    }

    #[test]
    fn test_unterminated_sequence() {
        let mut reader = TextReader::new("s ( { 1, 2");
        reader.expect_object("s").unwrap();
        let err = reader.begin_sequence().unwrap_err();
        assert!(err.to_string().contains("unterminated sequence"));
    }

    #[test]
    fn test_quoted_string_unescape() {
        let mut reader = TextReader::new(r#"msg ( "a\"b", "" )"#);
        reader.expect_object("msg").unwrap();
        assert_eq!(
            reader.read_value(PrimitiveType::U8String).unwrap(),
            PrimitiveValue::from("a\"b")
        );
        assert_eq!(
            reader.read_value(PrimitiveType::U8String).unwrap(),
            PrimitiveValue::from("")
        );
        reader.end_object().unwrap();
    }

    #[test]
    fn test_unquoted_string_is_verbatim() {
        let mut reader = TextReader::new("msg ( hello )");
        reader.expect_object("msg").unwrap();
        assert_eq!(
            reader.read_value(PrimitiveType::U8String).unwrap(),
            PrimitiveValue::from("hello")
        );
    }

    #[test]
    fn test_unterminated_quoted_string() {
        let mut reader = TextReader::new(r#"msg ( "abc )"#);
        reader.expect_object("msg").unwrap();
        let err = reader.read_value(PrimitiveType::U8String).unwrap_err();
        assert!(err.to_string().contains("unterminated value"));
        assert_eq!(err.position(), Some(6));
    }

    #[test]
    fn test_missing_close_paren() {
        let mut reader = TextReader::new("pair ( 1, 2");
        reader.expect_object("pair").unwrap();
        reader.read_value(PrimitiveType::I32).unwrap();
        assert!(reader.read_value(PrimitiveType::I32).unwrap_err().is_malformed());
    }

    #[test]
    fn test_end_object_requires_paren() {
        let mut reader = TextReader::new("pair ( 1 ");
        reader.expect_object("pair").unwrap();
        reader.read_value(PrimitiveType::I32).unwrap();
        let err = reader.end_object().unwrap_err();
        assert!(err.to_string().contains("expected ')' found end of input"));
    }

    #[test]
    fn test_bare_object_rejects_content_reads() {
        let mut reader = TextReader::new("empty");
        reader.expect_object("empty").unwrap();
        let err = reader.read_value(PrimitiveType::I32).unwrap_err();
        assert!(err.to_string().contains("expected left parenthesis"));
    }

    #[test]
    fn test_bare_object_closes_cleanly() {
        let mut reader = TextReader::new("empty");
        reader.expect_object("empty").unwrap();
        reader.end_object().unwrap();
        assert_eq!(reader.depth(), 0);
    }

    #[test]
    fn test_trailing_text_rejected() {
        let mut reader = TextReader::new("a ( 1 ) b");
        reader.expect_object("a").unwrap();
        reader.read_value(PrimitiveType::I32).unwrap();
        let err = reader.end_object().unwrap_err();
        assert!(err.to_string().contains("expected end of string"));
    }

    #[test]
    fn test_finish() {
        let mut reader = TextReader::new("a ( 1 ) ");
        reader.expect_object("a").unwrap();
        assert!(reader.finish().unwrap_err().to_string().contains("left open"));
        reader.read_value(PrimitiveType::I32).unwrap();
        reader.end_object().unwrap();
        reader.finish().unwrap();
    }

    #[test]
    fn test_end_object_without_begin() {
        let mut reader = TextReader::new(")");
        let err = reader.end_object().unwrap_err();
        assert!(err.to_string().contains("missing begin_object()"));
    }

    #[test]
    fn test_read_without_scope_fails() {
        let mut reader = TextReader::new("1 )");
        assert!(reader.read_value(PrimitiveType::I32).is_err());
        assert!(reader.begin_sequence().is_err());
    }

    #[test]
    fn test_read_tuple() {
        let mut reader = TextReader::new("t (  {1, false } )");
        reader.expect_object("t").unwrap();
        let values = reader
            .read_tuple(&[PrimitiveType::I32, PrimitiveType::Bool])
            .unwrap();
        assert_eq!(
            values,
            vec![PrimitiveValue::I32(1), PrimitiveValue::Bool(false)]
        );
        reader.end_object().unwrap();
    }

    #[test]
    fn test_invalid_literal_names_kind() {
        let mut reader = TextReader::new("n ( 300 )");
        reader.expect_object("n").unwrap();
        let err = reader.read_value(PrimitiveType::U8).unwrap_err();
        assert!(err.to_string().contains("invalid u8 literal '300'"));
    }

    #[test]
    fn test_expect_object_checks_name() {
        let mut reader = TextReader::new("pair ( 1 )");
        assert_eq!(
            reader.expect_object("point").unwrap_err(),
            Error::type_mismatch("point", "pair")
        );
    }

    #[test]
    fn test_quoted_char() {
        let mut reader = TextReader::new(r#"c ( ",", x, "\"" )"#);
        reader.expect_object("c").unwrap();
        assert_eq!(
            reader.read_value(PrimitiveType::Char).unwrap(),
            PrimitiveValue::Char(',')
        );
        assert_eq!(
            reader.read_value(PrimitiveType::Char).unwrap(),
            PrimitiveValue::Char('x')
        );
        assert_eq!(
            reader.read_value(PrimitiveType::Char).unwrap(),
            PrimitiveValue::Char('"')
        );
        reader.end_object().unwrap();
    }
}
