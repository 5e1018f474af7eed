//! Serde serialization onto the [`Writer`] contract.
//!
//! [`Serializer`] maps the serde data model onto objects, sequences, tuples
//! and primitive values, so any `T: Serialize` can be written by any
//! backend:
//!
//! - **Structs** (named, tuple, newtype, unit): an object named after the
//!   Rust type, fields in declaration order
//! - **Enum variants**: an object named after the variant
//! - **Option**: `None` or `Some ( value )`
//! - **Sequences and byte strings**: `{ a, b, c }`
//! - **Tuples**: ` {a, b }` when every element is a primitive, otherwise a sequence
//!
//! Fields are positional, so `#[serde(skip_serializing_if)]` is rejected.
//! Maps and 128-bit integers have no representation.
//!
//! ## Usage
//!
//! ```rust
//! use serde::Serialize;
//! use uniform_text::{ser, TextWriter};
//!
//! #[derive(Serialize)]
//! struct Point { x: i32, y: i32 }
//!
//! let mut out = String::new();
//! ser::serialize_into(&mut TextWriter::new(&mut out), &Point { x: 1, y: 2 }).unwrap();
//! assert_eq!(out, "Point ( 1, 2 )");
//! ```

use crate::{Error, PrimitiveValue, Result, Writer};
use serde::{ser, Serialize};

/// Serializes `value` through `sink`.
pub fn serialize_into<T>(sink: &mut dyn Writer, value: &T) -> Result<()>
where
    T: ?Sized + Serialize,
{
    let mut serializer = Serializer::new(sink);
    value.serialize(&mut serializer)
}

/// A serde serializer that drives a [`Writer`].
pub struct Serializer<'w> {
    sink: &'w mut dyn Writer,
}

impl<'w> Serializer<'w> {
    pub fn new(sink: &'w mut dyn Writer) -> Self {
        Serializer { sink }
    }

    fn write(&mut self, value: PrimitiveValue) -> Result<()> {
        self.sink.write_value(&value)
    }

    fn empty_object(&mut self, name: &str) -> Result<()> {
        self.sink.begin_object(name)?;
        self.sink.end_object()
    }
}

impl<'a, 'w> ser::Serializer for &'a mut Serializer<'w> {
    type Ok = ();
    type Error = Error;

    type SerializeSeq = SeqSerializer<'a, 'w>;
    type SerializeTuple = TupleSerializer<'a, 'w>;
    type SerializeTupleStruct = ObjectSerializer<'a, 'w>;
    type SerializeTupleVariant = ObjectSerializer<'a, 'w>;
    type SerializeMap = ser::Impossible<(), Error>;
    type SerializeStruct = ObjectSerializer<'a, 'w>;
    type SerializeStructVariant = ObjectSerializer<'a, 'w>;

    fn serialize_bool(self, v: bool) -> Result<Self::Ok> {
        self.write(PrimitiveValue::Bool(v))
    }

    fn serialize_i8(self, v: i8) -> Result<Self::Ok> {
        self.write(PrimitiveValue::I8(v))
    }

    fn serialize_i16(self, v: i16) -> Result<Self::Ok> {
        self.write(PrimitiveValue::I16(v))
    }

    fn serialize_i32(self, v: i32) -> Result<Self::Ok> {
        self.write(PrimitiveValue::I32(v))
    }

    fn serialize_i64(self, v: i64) -> Result<Self::Ok> {
        self.write(PrimitiveValue::I64(v))
    }

    fn serialize_u8(self, v: u8) -> Result<Self::Ok> {
        self.write(PrimitiveValue::U8(v))
    }

    fn serialize_u16(self, v: u16) -> Result<Self::Ok> {
        self.write(PrimitiveValue::U16(v))
    }

    fn serialize_u32(self, v: u32) -> Result<Self::Ok> {
        self.write(PrimitiveValue::U32(v))
    }

    fn serialize_u64(self, v: u64) -> Result<Self::Ok> {
        self.write(PrimitiveValue::U64(v))
    }

    fn serialize_i128(self, _v: i128) -> Result<Self::Ok> {
        Err(Error::unsupported("128-bit integers have no primitive kind"))
    }

    fn serialize_u128(self, _v: u128) -> Result<Self::Ok> {
        Err(Error::unsupported("128-bit integers have no primitive kind"))
    }

    fn serialize_f32(self, v: f32) -> Result<Self::Ok> {
        self.write(PrimitiveValue::F32(v))
    }

    fn serialize_f64(self, v: f64) -> Result<Self::Ok> {
        self.write(PrimitiveValue::F64(v))
    }

    fn serialize_char(self, v: char) -> Result<Self::Ok> {
        self.write(PrimitiveValue::Char(v))
    }

    fn serialize_str(self, v: &str) -> Result<Self::Ok> {
        self.write(PrimitiveValue::U8String(v.to_string()))
    }

    fn serialize_bytes(self, v: &[u8]) -> Result<Self::Ok> {
        self.sink.begin_sequence(v.len())?;
        for byte in v {
            self.sink.write_value(&PrimitiveValue::U8(*byte))?;
        }
        self.sink.end_sequence()
    }

    fn serialize_none(self) -> Result<Self::Ok> {
        self.empty_object("None")
    }

    fn serialize_some<T>(self, value: &T) -> Result<Self::Ok>
    where
        T: ?Sized + Serialize,
    {
        self.sink.begin_object("Some")?;
        value.serialize(&mut *self)?;
        self.sink.end_object()
    }

    fn serialize_unit(self) -> Result<Self::Ok> {
        self.empty_object("unit")
    }

    fn serialize_unit_struct(self, name: &'static str) -> Result<Self::Ok> {
        self.empty_object(name)
    }

    fn serialize_unit_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
    ) -> Result<Self::Ok> {
        self.empty_object(variant)
    }

    fn serialize_newtype_struct<T>(self, name: &'static str, value: &T) -> Result<Self::Ok>
    where
        T: ?Sized + Serialize,
    {
        self.sink.begin_object(name)?;
        value.serialize(&mut *self)?;
        self.sink.end_object()
    }

    fn serialize_newtype_variant<T>(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        value: &T,
    ) -> Result<Self::Ok>
    where
        T: ?Sized + Serialize,
    {
        self.sink.begin_object(variant)?;
        value.serialize(&mut *self)?;
        self.sink.end_object()
    }

    fn serialize_seq(self, len: Option<usize>) -> Result<Self::SerializeSeq> {
        self.sink.begin_sequence(len.unwrap_or(0))?;
        Ok(SeqSerializer { ser: self })
    }

    fn serialize_tuple(self, len: usize) -> Result<Self::SerializeTuple> {
        Ok(TupleSerializer {
            ser: self,
            len,
            mode: TupleMode::Buffered(Vec::with_capacity(len)),
        })
    }

    fn serialize_tuple_struct(
        self,
        name: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeTupleStruct> {
        self.sink.begin_object(name)?;
        Ok(ObjectSerializer { ser: self })
    }

    fn serialize_tuple_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeTupleVariant> {
        self.sink.begin_object(variant)?;
        Ok(ObjectSerializer { ser: self })
    }

    fn serialize_map(self, _len: Option<usize>) -> Result<Self::SerializeMap> {
        Err(Error::unsupported("maps have no uniform text representation"))
    }

    fn serialize_struct(self, name: &'static str, _len: usize) -> Result<Self::SerializeStruct> {
        self.sink.begin_object(name)?;
        Ok(ObjectSerializer { ser: self })
    }

    fn serialize_struct_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeStructVariant> {
        self.sink.begin_object(variant)?;
        Ok(ObjectSerializer { ser: self })
    }
}

pub struct SeqSerializer<'a, 'w> {
    ser: &'a mut Serializer<'w>,
}

impl ser::SerializeSeq for SeqSerializer<'_, '_> {
    type Ok = ();
    type Error = Error;

    fn serialize_element<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        value.serialize(&mut *self.ser)
    }

    fn end(self) -> Result<Self::Ok> {
        self.ser.sink.end_sequence()
    }
}

enum TupleMode {
    /// Every element so far was a primitive; nothing written yet.
    Buffered(Vec<PrimitiveValue>),
    /// A compound element showed up; writing a sequence instead.
    Streaming,
}

pub struct TupleSerializer<'a, 'w> {
    ser: &'a mut Serializer<'w>,
    len: usize,
    mode: TupleMode,
}

impl ser::SerializeTuple for TupleSerializer<'_, '_> {
    type Ok = ();
    type Error = Error;

    fn serialize_element<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        if let TupleMode::Buffered(values) = &mut self.mode {
            if let Ok(primitive) = value.serialize(PrimitiveSerializer) {
                values.push(primitive);
                return Ok(());
            }
            let buffered = std::mem::take(values);
            self.ser.sink.begin_sequence(self.len)?;
            for primitive in &buffered {
                self.ser.sink.write_value(primitive)?;
            }
            self.mode = TupleMode::Streaming;
        }
        value.serialize(&mut *self.ser)
    }

    fn end(self) -> Result<Self::Ok> {
        match self.mode {
            TupleMode::Buffered(values) => self.ser.sink.write_tuple(&values),
            TupleMode::Streaming => self.ser.sink.end_sequence(),
        }
    }
}

/// Writes positional fields and closes the object on `end`.
pub struct ObjectSerializer<'a, 'w> {
    ser: &'a mut Serializer<'w>,
}

impl ObjectSerializer<'_, '_> {
    fn field<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        value.serialize(&mut *self.ser)
    }

    fn close(self) -> Result<()> {
        self.ser.sink.end_object()
    }
}

impl ser::SerializeTupleStruct for ObjectSerializer<'_, '_> {
    type Ok = ();
    type Error = Error;

    fn serialize_field<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.field(value)
    }

    fn end(self) -> Result<Self::Ok> {
        self.close()
    }
}

impl ser::SerializeTupleVariant for ObjectSerializer<'_, '_> {
    type Ok = ();
    type Error = Error;

    fn serialize_field<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.field(value)
    }

    fn end(self) -> Result<Self::Ok> {
        self.close()
    }
}

impl ser::SerializeStruct for ObjectSerializer<'_, '_> {
    type Ok = ();
    type Error = Error;

    fn serialize_field<T>(&mut self, _key: &'static str, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.field(value)
    }

    fn skip_field(&mut self, key: &'static str) -> Result<()> {
        Err(Error::unsupported(&format!(
            "field {:?} was skipped; uniform text fields are positional",
            key
        )))
    }

    fn end(self) -> Result<Self::Ok> {
        self.close()
    }
}

impl ser::SerializeStructVariant for ObjectSerializer<'_, '_> {
    type Ok = ();
    type Error = Error;

    fn serialize_field<T>(&mut self, _key: &'static str, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.field(value)
    }

    fn skip_field(&mut self, key: &'static str) -> Result<()> {
        Err(Error::unsupported(&format!(
            "field {:?} was skipped; uniform text fields are positional",
            key
        )))
    }

    fn end(self) -> Result<Self::Ok> {
        self.close()
    }
}

/// Converts a bare primitive into a [`PrimitiveValue`]; anything else is an error.
struct PrimitiveSerializer;

fn not_primitive<T>() -> Result<T> {
    Err(Error::unsupported("not a primitive value"))
}

impl ser::Serializer for PrimitiveSerializer {
    type Ok = PrimitiveValue;
    type Error = Error;

    type SerializeSeq = ser::Impossible<PrimitiveValue, Error>;
    type SerializeTuple = ser::Impossible<PrimitiveValue, Error>;
    type SerializeTupleStruct = ser::Impossible<PrimitiveValue, Error>;
    type SerializeTupleVariant = ser::Impossible<PrimitiveValue, Error>;
    type SerializeMap = ser::Impossible<PrimitiveValue, Error>;
    type SerializeStruct = ser::Impossible<PrimitiveValue, Error>;
    type SerializeStructVariant = ser::Impossible<PrimitiveValue, Error>;

    fn serialize_bool(self, v: bool) -> Result<PrimitiveValue> {
        Ok(PrimitiveValue::Bool(v))
    }

    fn serialize_i8(self, v: i8) -> Result<PrimitiveValue> {
        Ok(PrimitiveValue::I8(v))
    }

    fn serialize_i16(self, v: i16) -> Result<PrimitiveValue> {
        Ok(PrimitiveValue::I16(v))
    }

    fn serialize_i32(self, v: i32) -> Result<PrimitiveValue> {
        Ok(PrimitiveValue::I32(v))
    }

    fn serialize_i64(self, v: i64) -> Result<PrimitiveValue> {
        Ok(PrimitiveValue::I64(v))
    }

    fn serialize_u8(self, v: u8) -> Result<PrimitiveValue> {
        Ok(PrimitiveValue::U8(v))
    }

    fn serialize_u16(self, v: u16) -> Result<PrimitiveValue> {
        Ok(PrimitiveValue::U16(v))
    }

    fn serialize_u32(self, v: u32) -> Result<PrimitiveValue> {
        Ok(PrimitiveValue::U32(v))
    }

    fn serialize_u64(self, v: u64) -> Result<PrimitiveValue> {
        Ok(PrimitiveValue::U64(v))
    }

    fn serialize_f32(self, v: f32) -> Result<PrimitiveValue> {
        Ok(PrimitiveValue::F32(v))
    }

    fn serialize_f64(self, v: f64) -> Result<PrimitiveValue> {
        Ok(PrimitiveValue::F64(v))
    }

    fn serialize_char(self, v: char) -> Result<PrimitiveValue> {
        Ok(PrimitiveValue::Char(v))
    }

    fn serialize_str(self, v: &str) -> Result<PrimitiveValue> {
        Ok(PrimitiveValue::U8String(v.to_string()))
    }

    fn serialize_bytes(self, _v: &[u8]) -> Result<PrimitiveValue> {
        not_primitive()
    }

    fn serialize_none(self) -> Result<PrimitiveValue> {
        not_primitive()
    }

    fn serialize_some<T>(self, _value: &T) -> Result<PrimitiveValue>
    where
        T: ?Sized + Serialize,
    {
        not_primitive()
    }

    fn serialize_unit(self) -> Result<PrimitiveValue> {
        not_primitive()
    }

    fn serialize_unit_struct(self, _name: &'static str) -> Result<PrimitiveValue> {
        not_primitive()
    }

    fn serialize_unit_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        _variant: &'static str,
    ) -> Result<PrimitiveValue> {
        not_primitive()
    }

    fn serialize_newtype_struct<T>(self, _name: &'static str, _value: &T) -> Result<PrimitiveValue>
    where
        T: ?Sized + Serialize,
    {
        not_primitive()
    }

    fn serialize_newtype_variant<T>(
        self,
        _name: &'static str,
        _variant_index: u32,
        _variant: &'static str,
        _value: &T,
    ) -> Result<PrimitiveValue>
    where
        T: ?Sized + Serialize,
    {
        not_primitive()
    }

    fn serialize_seq(self, _len: Option<usize>) -> Result<Self::SerializeSeq> {
        not_primitive()
    }

    fn serialize_tuple(self, _len: usize) -> Result<Self::SerializeTuple> {
        not_primitive()
    }

    fn serialize_tuple_struct(
        self,
        _name: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeTupleStruct> {
        not_primitive()
    }

    fn serialize_tuple_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        _variant: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeTupleVariant> {
        not_primitive()
    }

    fn serialize_map(self, _len: Option<usize>) -> Result<Self::SerializeMap> {
        not_primitive()
    }

    fn serialize_struct(self, _name: &'static str, _len: usize) -> Result<Self::SerializeStruct> {
        not_primitive()
    }

    fn serialize_struct_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        _variant: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeStructVariant> {
        not_primitive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::TextWriter;
    use std::collections::BTreeMap;

    fn render<T: ?Sized + Serialize>(value: &T) -> Result<String> {
        let mut out = String::new();
        serialize_into(&mut TextWriter::new(&mut out), value)?;
        Ok(out)
    }

    #[derive(Serialize)]
    struct Point {
        x: i32,
        y: i32,
    }

    #[derive(Serialize)]
    struct Marker;

    #[derive(Serialize)]
    struct Meters(f64);

    #[derive(Serialize)]
    enum Shape {
        Empty,
        Circle(f32),
        Rect { w: u16, h: u16 },
        Line(Point, Point),
    }

    #[derive(Serialize)]
    struct Envelope {
        tag: Option<String>,
        ids: Vec<u32>,
        pair: (i8, bool),
        mixed: (u8, Point),
        shape: Shape,
    }

    #[test]
    fn test_struct_fields_are_positional() {
        assert_eq!(render(&Point { x: 1, y: -2 }).unwrap(), "Point ( 1, -2 )");
    }

    #[test]
    fn test_unit_and_newtype_structs() {
        assert_eq!(render(&Marker).unwrap(), "Marker");
        assert_eq!(render(&Meters(1.5)).unwrap(), "Meters ( 1.5 )");
    }

    #[test]
    fn test_enum_variants_are_objects() {
        assert_eq!(render(&Shape::Empty).unwrap(), "Empty");
        assert_eq!(render(&Shape::Circle(2.0)).unwrap(), "Circle ( 2 )");
        assert_eq!(render(&Shape::Rect { w: 3, h: 4 }).unwrap(), "Rect ( 3, 4 )");
        assert_eq!(
            render(&Shape::Line(Point { x: 0, y: 0 }, Point { x: 1, y: 1 })).unwrap(),
            "Line ( Point ( 0, 0 ), Point ( 1, 1 ) )"
        );
    }

    #[test]
    fn test_nested_envelope() {
        let envelope = Envelope {
            tag: Some("hi".to_string()),
            ids: vec![1, 2],
            pair: (-1, true),
            mixed: (7, Point { x: 5, y: 6 }),
            shape: Shape::Empty,
        };
        assert_eq!(
            render(&envelope).unwrap(),
            r#"Envelope ( Some ( "hi" ), { 1, 2 },  {-1, true }, { 7, Point ( 5, 6 ) }, Empty )"#
        );
    }

    #[test]
    fn test_none_is_bare_object() {
        let envelope = Envelope {
            tag: None,
            ids: vec![],
            pair: (0, false),
            mixed: (0, Point { x: 0, y: 0 }),
            shape: Shape::Empty,
        };
        assert!(render(&envelope).unwrap().starts_with("Envelope ( None, { }, "));
    }

    #[test]
    fn test_maps_are_unsupported() {
        let mut map = BTreeMap::new();
        map.insert("k", 1);
        assert!(matches!(render(&map), Err(Error::Unsupported(_))));
    }

    #[test]
    fn test_skipped_fields_are_rejected() {
        #[derive(Serialize)]
        struct Sparse {
            #[serde(skip_serializing_if = "Option::is_none")]
            maybe: Option<u8>,
        }
        assert!(matches!(
            render(&Sparse { maybe: None }),
            Err(Error::Unsupported(_))
        ));
    }
}
