//! Uniform type registry.
//!
//! Maps type names to descriptors that drive a [`Writer`] or [`Reader`]
//! field by field. A value becomes serializable by implementing
//! [`Uniform`]; it becomes deserializable by name once it implements
//! [`Announce`] and is added to a [`Registry`].
//!
//! ## Examples
//!
//! ```rust
//! use uniform_text::{
//!     from_str, to_string, Announce, PrimitiveType, Reader, Registry, Result, Uniform, Writer,
//! };
//! use std::convert::TryFrom;
//!
//! #[derive(Debug, PartialEq)]
//! struct Pair(i32, i32);
//!
//! impl Uniform for Pair {
//!     fn write_to(&self, sink: &mut dyn Writer) -> Result<()> {
//!         sink.begin_object(Self::NAME)?;
//!         sink.write_value(&self.0.into())?;
//!         sink.write_value(&self.1.into())?;
//!         sink.end_object()
//!     }
//! }
//!
//! impl Announce for Pair {
//!     const NAME: &'static str = "pair";
//!
//!     fn read_from(source: &mut dyn Reader) -> Result<Self> {
//!         source.expect_object(Self::NAME)?;
//!         let a = i32::try_from(source.read_value(PrimitiveType::I32)?)?;
//!         let b = i32::try_from(source.read_value(PrimitiveType::I32)?)?;
//!         source.end_object()?;
//!         Ok(Pair(a, b))
//!     }
//! }
//!
//! let mut registry = Registry::new();
//! registry.announce::<Pair>();
//!
//! let text = to_string(&Pair(1, 2)).unwrap();
//! assert_eq!(text, "pair ( 1, 2 )");
//!
//! let object = from_str(&registry, &text).unwrap();
//! assert_eq!(object.downcast_ref::<Pair>(), Some(&Pair(1, 2)));
//! ```

use crate::{Error, Reader, Result, Writer};
use indexmap::IndexMap;
use std::any::{Any, TypeId};
use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;

/// A value that can describe itself to a [`Writer`].
pub trait Uniform {
    fn write_to(&self, sink: &mut dyn Writer) -> Result<()>;
}

/// A [`Uniform`] type that can also be rebuilt from a [`Reader`] and looked
/// up by name.
pub trait Announce: Uniform + Any + Send + Sync + Sized {
    /// The type name written before the object's content.
    const NAME: &'static str;

    fn read_from(source: &mut dyn Reader) -> Result<Self>;
}

/// Type-erased descriptor stored in a [`Registry`].
pub trait UniformTypeInfo: Send + Sync {
    fn name(&self) -> &str;

    /// `TypeId` of the values this descriptor handles.
    fn value_type_id(&self) -> TypeId;

    fn serialize(&self, value: &dyn Any, sink: &mut dyn Writer) -> Result<()>;

    fn deserialize(&self, source: &mut dyn Reader) -> Result<Box<dyn Any + Send + Sync>>;
}

struct Announced<T>(PhantomData<fn() -> T>);

impl<T: Announce> UniformTypeInfo for Announced<T> {
    fn name(&self) -> &str {
        T::NAME
    }

    fn value_type_id(&self) -> TypeId {
        TypeId::of::<T>()
    }

    fn serialize(&self, value: &dyn Any, sink: &mut dyn Writer) -> Result<()> {
        match value.downcast_ref::<T>() {
            Some(value) => value.write_to(sink),
            None => Err(Error::type_mismatch(T::NAME, "a value of another type")),
        }
    }

    fn deserialize(&self, source: &mut dyn Reader) -> Result<Box<dyn Any + Send + Sync>> {
        Ok(Box::new(T::read_from(source)?))
    }
}

/// Name and type lookup for announced types, in announcement order.
#[derive(Clone, Default)]
pub struct Registry {
    by_name: IndexMap<String, Arc<dyn UniformTypeInfo>>,
    by_type: IndexMap<TypeId, Arc<dyn UniformTypeInfo>>,
}

impl Registry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Announces `T` under [`Announce::NAME`], returning `self` for chaining.
    ///
    /// # Warning
    /// A second announcement under the same name replaces the first; the
    /// overwrite is only reported at debug log level.
    pub fn announce<T: Announce>(&mut self) -> &mut Self {
        self.announce_info(Arc::new(Announced::<T>(PhantomData)))
    }

    /// Announces a hand-built descriptor.
    pub fn announce_info(&mut self, info: Arc<dyn UniformTypeInfo>) -> &mut Self {
        let name = info.name().to_string();
        self.by_type.insert(info.value_type_id(), Arc::clone(&info));
        if self.by_name.insert(name.clone(), info).is_some() {
            log::debug!("Overwriting existing announcement for type name {:?}", name);
        }
        self
    }

    #[must_use]
    pub fn by_name(&self, name: &str) -> Option<&Arc<dyn UniformTypeInfo>> {
        self.by_name.get(name)
    }

    #[must_use]
    pub fn by_type<T: Any>(&self) -> Option<&Arc<dyn UniformTypeInfo>> {
        self.by_type.get(&TypeId::of::<T>())
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.by_name.contains_key(name)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.by_name.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.by_name.is_empty()
    }

    /// Announced type names, in announcement order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.by_name.keys().map(String::as_str)
    }
}

impl fmt::Debug for Registry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.names()).finish()
    }
}

/// A type-erased value paired with the descriptor that knows how to write it.
pub struct Object {
    info: Arc<dyn UniformTypeInfo>,
    value: Box<dyn Any + Send + Sync>,
}

impl Object {
    /// Wraps a value of an announced type.
    pub fn new<T: Announce>(value: T) -> Self {
        Object {
            info: Arc::new(Announced::<T>(PhantomData)),
            value: Box::new(value),
        }
    }

    pub(crate) fn from_parts(
        info: Arc<dyn UniformTypeInfo>,
        value: Box<dyn Any + Send + Sync>,
    ) -> Self {
        Object { info, value }
    }

    #[must_use]
    pub fn type_name(&self) -> &str {
        self.info.name()
    }

    #[must_use]
    pub fn type_info(&self) -> &Arc<dyn UniformTypeInfo> {
        &self.info
    }

    #[must_use]
    pub fn is<T: Any>(&self) -> bool {
        self.value.is::<T>()
    }

    #[must_use]
    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        self.value.downcast_ref::<T>()
    }

    /// Unwraps the value, or hands the object back if it holds another type.
    pub fn downcast<T: Any>(self) -> std::result::Result<T, Object> {
        let Object { info, value } = self;
        match value.downcast::<T>() {
            Ok(value) => Ok(*value),
            Err(value) => Err(Object { info, value }),
        }
    }
}

impl Uniform for Object {
    fn write_to(&self, sink: &mut dyn Writer) -> Result<()> {
        let value: &dyn Any = &*self.value;
        self.info.serialize(value, sink)
    }
}

impl fmt::Debug for Object {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Object")
            .field("type_name", &self.type_name())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{PrimitiveType, PrimitiveValue};

    #[derive(Debug, PartialEq)]
    struct Ping;

    impl Uniform for Ping {
        fn write_to(&self, sink: &mut dyn Writer) -> Result<()> {
            sink.begin_object(Self::NAME)?;
            sink.end_object()
        }
    }

    impl Announce for Ping {
        const NAME: &'static str = "ping";

        fn read_from(source: &mut dyn Reader) -> Result<Self> {
            source.expect_object(Self::NAME)?;
            source.end_object()?;
            Ok(Ping)
        }
    }

    #[derive(Debug, PartialEq)]
    struct Count(u32);

    impl Uniform for Count {
        fn write_to(&self, sink: &mut dyn Writer) -> Result<()> {
            sink.begin_object(Self::NAME)?;
            sink.write_value(&PrimitiveValue::U32(self.0))?;
            sink.end_object()
        }
    }

    impl Announce for Count {
        const NAME: &'static str = "count";

        fn read_from(source: &mut dyn Reader) -> Result<Self> {
            source.expect_object(Self::NAME)?;
            let n = u32::try_from(source.read_value(PrimitiveType::U32)?)?;
            source.end_object()?;
            Ok(Count(n))
        }
    }

    #[test]
    fn test_announce_and_lookup() {
        let mut registry = Registry::new();
        registry.announce::<Ping>().announce::<Count>();

        assert_eq!(registry.len(), 2);
        assert!(registry.contains("ping"));
        assert!(!registry.contains("pong"));
        assert_eq!(registry.names().collect::<Vec<_>>(), vec!["ping", "count"]);
        assert_eq!(registry.by_type::<Count>().map(|info| info.name()), Some("count"));
        assert!(registry.by_type::<String>().is_none());
        assert_eq!(format!("{:?}", registry), r#"{"ping", "count"}"#);
    }

    #[test]
    fn test_reannounce_replaces() {
        let mut registry = Registry::new();
        registry.announce::<Ping>().announce::<Ping>();
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_object_downcast() {
        let object = Object::new(Count(3));
        assert_eq!(object.type_name(), "count");
        assert!(object.is::<Count>());
        assert!(!object.is::<Ping>());

        let object = object.downcast::<Ping>().unwrap_err();
        assert_eq!(object.downcast::<Count>().unwrap(), Count(3));
    }

    #[test]
    fn test_object_writes_through_descriptor() {
        let mut out = String::new();
        let mut writer = crate::TextWriter::new(&mut out);
        Object::new(Count(9)).write_to(&mut writer).unwrap();
        assert_eq!(out, "count ( 9 )");
    }

    #[test]
    fn test_descriptor_rejects_foreign_value() {
        let info = Announced::<Count>(PhantomData);
        let mut out = String::new();
        let mut writer = crate::TextWriter::new(&mut out);
        let err = info.serialize(&Ping, &mut writer).unwrap_err();
        assert!(matches!(err, Error::TypeMismatch { .. }));
    }
}
