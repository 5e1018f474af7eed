//! Uniform text grammar
//!
//! This module documents the text form produced by [`crate::TextWriter`] and
//! accepted by [`crate::TextReader`]. It has no items.
//!
//! # Overview
//!
//! The text form is a debugging and inspection aid for values that normally
//! travel in a binary encoding. It is not self-describing: the reader is
//! always told which kind of token to expect by the type descriptor driving
//! it, so the same characters may mean different things for different
//! descriptors.
//!
//! # Tokens
//!
//! ```text
//! document  := object
//! object    := NAME
//!            | NAME " ( " content " )"
//! content   := item (", " item)*
//! item      := object | sequence | tuple | value
//! sequence  := "{ " [item (", " item)*] " }"
//! tuple     := " {" value (", " value)* " }"
//! value     := BARE | QUOTED
//! ```
//!
//! `NAME` and `BARE` are runs of characters other than the six delimiters
//! `(` `)` `{` `}` space and comma. `QUOTED` is a double-quoted run where a
//! `"` preceded by a backslash is part of the content.
//!
//! Type names are never quoted. The writer rejects an empty name, or one
//! containing a delimiter or `"`, as unsupported, so a serde rename such as
//! `#[serde(rename = "my msg")]` fails at serialization time.
//!
//! ## Separators
//!
//! Outside quoted strings, spaces and commas are interchangeable and any
//! run of them separates tokens. The reader never requires the exact
//! spacing the writer produces:
//!
//! ```text
//! pair ( 1, 2 )
//! pair(1 2)
//! pair ,( 1,,2 )
//! ```
//!
//! all read back as the same two-field object.
//!
//! ## Objects
//!
//! The opening parenthesis is written only once the object receives
//! content. An object with no fields renders as its bare name:
//!
//! ```text
//! unit
//! outer ( inner ( 7 ), unit )
//! ```
//!
//! A bare object accepts no content reads; reading a value or sequence
//! inside one is a malformed-input error.
//!
//! ## Primitive values
//!
//! | Kind | Written as | Example |
//! |------|------------|---------|
//! | bool | `true` / `false` (`1` / `0` also read) | `true` |
//! | integers | decimal | `-42` |
//! | floats | shortest round-trip decimal, `inf`, `NaN` | `2.5` |
//! | char | the character, quoted if it is a delimiter or `"` | `x`, `","` |
//! | u8string | always quoted, `"` escaped as `\"` | `"a\"b"` |
//! | u16string, u32string | nothing | |
//!
//! Only `\"` is an escape sequence. Every other backslash is literal, so a
//! string ending in a backslash does not survive a round trip.
//!
//! Wide strings have no text form. The writer emits an empty token and the
//! reader yields an empty value. The read still consumes the next token, so
//! a sibling written after a wide string is lost with it:
//!
//! ```text
//! w ( , 5 )
//! ```
//!
//! Here reading a wide string takes `5`, and the following read finds `)`.
//!
//! ## Sequences and tuples
//!
//! A sequence announces no length; the reader counts its elements by
//! scanning ahead to the matching `}`, skipping quoted strings and nested
//! groups. `{ }` holds zero elements.
//!
//! ```text
//! list ( { 1, 2, 3 } )
//! list ( { } )
//! ```
//!
//! A tuple is a fixed-arity group of primitives. Its opening brace carries
//! a leading space and no trailing one:
//!
//! ```text
//! t (  {1, false } )
//! ```
//!
//! ## Closing a group
//!
//! With [`crate::SequenceClose::Separated`] (the default) a value following
//! a closed sequence or tuple gets the usual `, ` separator. With
//! [`crate::SequenceClose::Legacy`] it does not, matching older producers:
//!
//! ```text
//! s ( { }, 5 )
//! s ( { }5 )
//! ```
//!
//! The reader accepts both. Element counting starts a new element after a
//! closed group even without a comma, so legacy `{ { }{ } }` holds two.
//!
//! # Serde mapping
//!
//! | Rust | Text |
//! |------|------|
//! | `struct Point { x: i32, y: i32 }` | `Point ( 1, 2 )` |
//! | `struct Meters(f64)` | `Meters ( 1.5 )` |
//! | `struct Marker;` | `Marker` |
//! | `Shape::Circle(2.0)` | `Circle ( 2 )` |
//! | `Option::<u8>::None` / `Some(3)` | `None` / `Some ( 3 )` |
//! | `()` | `unit` |
//! | `Vec<u8>` / `&[u8]` | `{ 1, 2 }` |
//! | `(i8, bool)` | ` {-1, true }` |
//! | `(u8, Point)` | `{ 7, Point ( 5, 6 ) }` |
//!
//! Field names are not written. Maps and 128-bit integers are rejected.
