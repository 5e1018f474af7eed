//! Serde deserialization from the [`Reader`] contract.
//!
//! [`Deserializer`] is the mirror image of [`crate::ser::Serializer`]: it
//! knows from the target type which token comes next and asks the reader
//! for exactly that. The format is not self-describing, so
//! `deserialize_any`, maps and ignored values are not supported.
//!
//! ## Usage
//!
//! ```rust
//! use serde::Deserialize;
//! use uniform_text::{de, TextReader};
//!
//! #[derive(Deserialize, Debug, PartialEq)]
//! struct Point { x: i32, y: i32 }
//!
//! let mut reader = TextReader::new("Point ( 1, 2 )");
//! let point: Point = de::deserialize_from(&mut reader).unwrap();
//! assert_eq!(point, Point { x: 1, y: 2 });
//! ```

use crate::{Error, PrimitiveType, PrimitiveValue, Reader, Result};
use serde::de::value::StringDeserializer;
use serde::de::{self, DeserializeOwned, IntoDeserializer};

/// Deserializes a `T` from `source`.
pub fn deserialize_from<T>(source: &mut dyn Reader) -> Result<T>
where
    T: DeserializeOwned,
{
    let mut deserializer = Deserializer::new(source);
    T::deserialize(&mut deserializer)
}

/// A serde deserializer that pulls from a [`Reader`].
pub struct Deserializer<'r> {
    source: &'r mut dyn Reader,
}

impl<'r> Deserializer<'r> {
    pub fn new(source: &'r mut dyn Reader) -> Self {
        Deserializer { source }
    }

    fn read(&mut self, kind: PrimitiveType) -> Result<PrimitiveValue> {
        self.source.read_value(kind)
    }

    fn empty_object(&mut self, name: &str) -> Result<()> {
        self.source.expect_object(name)?;
        self.source.end_object()
    }
}

macro_rules! deserialize_primitive {
    ($($method:ident => $kind:ident, $ty:ty, $visit:ident;)*) => {
        $(
            fn $method<V>(self, visitor: V) -> Result<V::Value>
            where
                V: de::Visitor<'de>,
            {
                let value = self.read(PrimitiveType::$kind)?;
                visitor.$visit(<$ty>::try_from(value)?)
            }
        )*
    };
}

impl<'de, 'a, 'r> de::Deserializer<'de> for &'a mut Deserializer<'r> {
    type Error = Error;

    fn deserialize_any<V>(self, _visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        Err(Error::unsupported(
            "uniform text is not self-describing; the target type must drive deserialization",
        ))
    }

    deserialize_primitive! {
        deserialize_bool => Bool, bool, visit_bool;
        deserialize_i8 => I8, i8, visit_i8;
        deserialize_i16 => I16, i16, visit_i16;
        deserialize_i32 => I32, i32, visit_i32;
        deserialize_i64 => I64, i64, visit_i64;
        deserialize_u8 => U8, u8, visit_u8;
        deserialize_u16 => U16, u16, visit_u16;
        deserialize_u32 => U32, u32, visit_u32;
        deserialize_u64 => U64, u64, visit_u64;
        deserialize_f32 => F32, f32, visit_f32;
        deserialize_f64 => F64, f64, visit_f64;
        deserialize_char => Char, char, visit_char;
        deserialize_string => U8String, String, visit_string;
    }

    fn deserialize_i128<V>(self, _visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        Err(Error::unsupported("128-bit integers have no primitive kind"))
    }

    fn deserialize_u128<V>(self, _visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        Err(Error::unsupported("128-bit integers have no primitive kind"))
    }

    fn deserialize_str<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        de::Deserializer::deserialize_string(self, visitor)
    }

    fn deserialize_bytes<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        de::Deserializer::deserialize_byte_buf(self, visitor)
    }

    fn deserialize_byte_buf<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        let len = self.source.begin_sequence()?;
        let mut bytes = Vec::with_capacity(len);
        for _ in 0..len {
            bytes.push(u8::try_from(self.read(PrimitiveType::U8)?)?);
        }
        self.source.end_sequence()?;
        visitor.visit_byte_buf(bytes)
    }

    fn deserialize_option<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        let name = self.source.peek_object_name()?;
        match name.as_str() {
            "None" => {
                self.empty_object("None")?;
                visitor.visit_none()
            }
            "Some" => {
                self.source.expect_object("Some")?;
                let value = visitor.visit_some(&mut *self)?;
                self.source.end_object()?;
                Ok(value)
            }
            _ => Err(Error::type_mismatch("None or Some", &name)),
        }
    }

    fn deserialize_unit<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        self.empty_object("unit")?;
        visitor.visit_unit()
    }

    fn deserialize_unit_struct<V>(self, name: &'static str, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        self.empty_object(name)?;
        visitor.visit_unit()
    }

    fn deserialize_newtype_struct<V>(self, name: &'static str, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        self.source.expect_object(name)?;
        let value = visitor.visit_newtype_struct(&mut *self)?;
        self.source.end_object()?;
        Ok(value)
    }

    fn deserialize_seq<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        let len = self.source.begin_sequence()?;
        let value = visitor.visit_seq(Positional::new(self, len))?;
        self.source.end_sequence()?;
        Ok(value)
    }

    fn deserialize_tuple<V>(self, len: usize, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        let found = self.source.begin_sequence()?;
        if found != len {
            return Err(de::Error::invalid_length(found, &visitor));
        }
        let value = visitor.visit_seq(Positional::new(self, len))?;
        self.source.end_sequence()?;
        Ok(value)
    }

    fn deserialize_tuple_struct<V>(
        self,
        name: &'static str,
        len: usize,
        visitor: V,
    ) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        self.source.expect_object(name)?;
        let value = visitor.visit_seq(Positional::new(self, len))?;
        self.source.end_object()?;
        Ok(value)
    }

    fn deserialize_map<V>(self, _visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        Err(Error::unsupported("maps have no uniform text representation"))
    }

    fn deserialize_struct<V>(
        self,
        name: &'static str,
        fields: &'static [&'static str],
        visitor: V,
    ) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        self.source.expect_object(name)?;
        let value = visitor.visit_seq(Positional::new(self, fields.len()))?;
        self.source.end_object()?;
        Ok(value)
    }

    fn deserialize_enum<V>(
        self,
        _name: &'static str,
        _variants: &'static [&'static str],
        visitor: V,
    ) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        let variant = self.source.peek_object_name()?;
        visitor.visit_enum(Variant { de: self, variant })
    }

    fn deserialize_identifier<V>(self, _visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        Err(Error::unsupported("identifiers are only read as enum variant names"))
    }

    fn deserialize_ignored_any<V>(self, _visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        Err(Error::unsupported("values cannot be skipped without their type"))
    }
}

/// Hands out a fixed number of elements in order.
struct Positional<'a, 'r> {
    de: &'a mut Deserializer<'r>,
    remaining: usize,
}

impl<'a, 'r> Positional<'a, 'r> {
    fn new(de: &'a mut Deserializer<'r>, len: usize) -> Self {
        Positional { de, remaining: len }
    }
}

impl<'de> de::SeqAccess<'de> for Positional<'_, '_> {
    type Error = Error;

    fn next_element_seed<T>(&mut self, seed: T) -> Result<Option<T::Value>>
    where
        T: de::DeserializeSeed<'de>,
    {
        if self.remaining == 0 {
            return Ok(None);
        }
        self.remaining -= 1;
        seed.deserialize(&mut *self.de).map(Some)
    }

    fn size_hint(&self) -> Option<usize> {
        Some(self.remaining)
    }
}

/// An enum value whose variant name has been peeked but not consumed.
struct Variant<'a, 'r> {
    de: &'a mut Deserializer<'r>,
    variant: String,
}

impl<'de, 'a, 'r> de::EnumAccess<'de> for Variant<'a, 'r> {
    type Error = Error;
    type Variant = Self;

    fn variant_seed<V>(self, seed: V) -> Result<(V::Value, Self::Variant)>
    where
        V: de::DeserializeSeed<'de>,
    {
        let name: StringDeserializer<Error> = self.variant.clone().into_deserializer();
        let value = seed.deserialize(name)?;
        Ok((value, self))
    }
}

impl<'de> de::VariantAccess<'de> for Variant<'_, '_> {
    type Error = Error;

    fn unit_variant(self) -> Result<()> {
        self.de.empty_object(&self.variant)
    }

    fn newtype_variant_seed<T>(self, seed: T) -> Result<T::Value>
    where
        T: de::DeserializeSeed<'de>,
    {
        self.de.source.expect_object(&self.variant)?;
        let value = seed.deserialize(&mut *self.de)?;
        self.de.source.end_object()?;
        Ok(value)
    }

    fn tuple_variant<V>(self, len: usize, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        self.de.source.expect_object(&self.variant)?;
        let value = visitor.visit_seq(Positional::new(&mut *self.de, len))?;
        self.de.source.end_object()?;
        Ok(value)
    }

    fn struct_variant<V>(self, fields: &'static [&'static str], visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        self.tuple_variant(fields.len(), visitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::TextReader;
    use serde::Deserialize;
    use std::collections::BTreeMap;

    fn parse<T: DeserializeOwned>(input: &str) -> Result<T> {
        deserialize_from(&mut TextReader::new(input))
    }

    #[derive(Deserialize, Debug, PartialEq)]
    struct Point {
        x: i32,
        y: i32,
    }

    #[derive(Deserialize, Debug, PartialEq)]
    struct Marker;

    #[derive(Deserialize, Debug, PartialEq)]
    struct Meters(f64);

    #[derive(Deserialize, Debug, PartialEq)]
    enum Shape {
        Empty,
        Circle(f32),
        Rect { w: u16, h: u16 },
        Line(Point, Point),
    }

    #[derive(Deserialize, Debug, PartialEq)]
    struct Holder {
        shape: Shape,
    }

    #[derive(Deserialize, Debug, PartialEq)]
    struct Envelope {
        tag: Option<String>,
        ids: Vec<u32>,
        pair: (i8, bool),
        mixed: (u8, Point),
        shape: Shape,
    }

    #[test]
    fn test_struct() {
        assert_eq!(parse::<Point>("Point ( 1, -2 )").unwrap(), Point { x: 1, y: -2 });
    }

    #[test]
    fn test_unit_and_newtype_structs() {
        assert_eq!(parse::<Marker>("Marker").unwrap(), Marker);
        assert_eq!(parse::<Meters>("Meters ( 1.5 )").unwrap(), Meters(1.5));
    }

    #[test]
    fn test_enum_variants() {
        let cases = [
            ("Holder ( Empty )", Shape::Empty),
            ("Holder ( Circle ( 2 ) )", Shape::Circle(2.0)),
            ("Holder ( Rect ( 3, 4 ) )", Shape::Rect { w: 3, h: 4 }),
            (
                "Holder ( Line ( Point ( 0, 0 ), Point ( 1, 1 ) ) )",
                Shape::Line(Point { x: 0, y: 0 }, Point { x: 1, y: 1 }),
            ),
        ];
        for (input, shape) in cases {
            assert_eq!(parse::<Holder>(input).unwrap(), Holder { shape });
        }
    }

    #[test]
    fn test_unknown_variant() {
        assert!(parse::<Holder>("Holder ( Square ( 1 ) )").is_err());
    }

    #[test]
    fn test_nested_envelope() {
        let input =
            r#"Envelope ( Some ( "hi" ), { 1, 2 },  {-1, true }, { 7, Point ( 5, 6 ) }, Empty )"#;
        assert_eq!(
            parse::<Envelope>(input).unwrap(),
            Envelope {
                tag: Some("hi".to_string()),
                ids: vec![1, 2],
                pair: (-1, true),
                mixed: (7, Point { x: 5, y: 6 }),
                shape: Shape::Empty,
            }
        );
    }

    #[test]
    fn test_none_and_empty_sequence() {
        let input = "Envelope ( None, { },  {0, false }, { 0, Point ( 0, 0 ) }, Empty )";
        let envelope = parse::<Envelope>(input).unwrap();
        assert_eq!(envelope.tag, None);
        assert!(envelope.ids.is_empty());
    }

    #[test]
    fn test_tuple_length_mismatch() {
        let input = "Envelope ( None, { },  {0, false, 1 }, { 0, Point ( 0, 0 ) }, Empty )";
        assert!(parse::<Envelope>(input).is_err());
    }

    #[test]
    fn test_wrong_type_name() {
        assert_eq!(
            parse::<Point>("Pair ( 1, 2 )").unwrap_err(),
            Error::type_mismatch("Point", "Pair")
        );
    }

    #[test]
    fn test_out_of_range_is_malformed() {
        #[derive(Deserialize, Debug)]
        struct Small {
            #[allow(dead_code)]
            v: u8,
        }
        assert!(parse::<Small>("Small ( 256 )").unwrap_err().is_malformed());
    }

    #[test]
    fn test_unsupported_targets() {
        assert!(matches!(
            parse::<BTreeMap<String, i32>>("m ( )"),
            Err(Error::Unsupported(_))
        ));
    }
}
