/// Implements [`Uniform`](crate::Uniform) and [`Announce`](crate::Announce)
/// for a serde type, so it can be added to a [`Registry`](crate::Registry).
///
/// The announced name must be the name serde writes for the type: the bare
/// type name by default, or whatever `#[serde(rename = "...")]` says.
///
/// ```rust
/// use serde::{Deserialize, Serialize};
/// use uniform_text::{announce_serde, from_str, to_string, Registry};
///
/// #[derive(Serialize, Deserialize, Debug, PartialEq)]
/// struct Point { x: i32, y: i32 }
///
/// #[derive(Serialize, Deserialize, Debug, PartialEq)]
/// #[serde(rename = "ping")]
/// struct Ping;
///
/// announce_serde!(Point);
/// announce_serde!(Ping => "ping");
///
/// let mut registry = Registry::new();
/// registry.announce::<Point>().announce::<Ping>();
///
/// assert_eq!(to_string(&Ping).unwrap(), "ping");
/// let object = from_str(&registry, "Point ( 3, 4 )").unwrap();
/// assert_eq!(object.downcast_ref::<Point>(), Some(&Point { x: 3, y: 4 }));
/// ```
#[macro_export]
macro_rules! announce_serde {
    ($ty:ident) => {
        $crate::announce_serde!($ty => stringify!($ty));
    };

    ($ty:ty => $name:expr) => {
        impl $crate::Uniform for $ty {
            fn write_to(&self, sink: &mut dyn $crate::Writer) -> $crate::Result<()> {
                $crate::ser::serialize_into(sink, self)
            }
        }

        impl $crate::Announce for $ty {
            const NAME: &'static str = $name;

            fn read_from(source: &mut dyn $crate::Reader) -> $crate::Result<Self> {
                $crate::de::deserialize_from(source)
            }
        }
    };
}

#[cfg(test)]
mod tests {
    use crate::{Announce, Registry, TextReader, TextWriter, Uniform};
    use serde::{Deserialize, Serialize};

    #[derive(Serialize, Deserialize, Debug, PartialEq)]
    struct Heartbeat {
        seq: u64,
        origin: String,
    }

    #[derive(Serialize, Deserialize, Debug, PartialEq)]
    #[serde(rename = "exit_msg")]
    struct ExitMsg(u32);

    announce_serde!(Heartbeat);
    announce_serde!(ExitMsg => "exit_msg");

    #[test]
    fn test_names() {
        assert_eq!(Heartbeat::NAME, "Heartbeat");
        assert_eq!(ExitMsg::NAME, "exit_msg");
    }

    #[test]
    fn test_write_and_read_through_traits() {
        let beat = Heartbeat {
            seq: 9,
            origin: "node 1".to_string(),
        };
        let mut out = String::new();
        beat.write_to(&mut TextWriter::new(&mut out)).unwrap();
        assert_eq!(out, r#"Heartbeat ( 9, "node 1" )"#);

        let back = Heartbeat::read_from(&mut TextReader::new(&out)).unwrap();
        assert_eq!(back, beat);
    }

    #[test]
    fn test_registry_lookup() {
        let mut registry = Registry::new();
        registry.announce::<Heartbeat>().announce::<ExitMsg>();

        let object = crate::from_str(&registry, "exit_msg ( 3 )").unwrap();
        assert_eq!(object.type_name(), "exit_msg");
        assert_eq!(object.downcast::<ExitMsg>().unwrap(), ExitMsg(3));
    }
}
