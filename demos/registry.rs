//! Dispatching on the type name through a registry.
//!
//! Run with: RUST_LOG=debug cargo run --example registry

use uniform_text::{
    from_str, to_string, Announce, Error, PrimitiveType, PrimitiveValue, Reader, Registry, Result,
    Uniform, Writer,
};

/// Hand-written descriptor: a link between two actors.
#[derive(Debug, PartialEq)]
struct Link {
    from: u64,
    to: u64,
    monitored: bool,
}

impl Uniform for Link {
    fn write_to(&self, sink: &mut dyn Writer) -> Result<()> {
        sink.begin_object(Self::NAME)?;
        sink.write_tuple(&[
            PrimitiveValue::U64(self.from),
            PrimitiveValue::U64(self.to),
        ])?;
        sink.write_value(&self.monitored.into())?;
        sink.end_object()
    }
}

impl Announce for Link {
    const NAME: &'static str = "link";

    fn read_from(source: &mut dyn Reader) -> Result<Self> {
        source.expect_object(Self::NAME)?;
        let ends = source.read_tuple(&[PrimitiveType::U64, PrimitiveType::U64])?;
        let [from, to]: [PrimitiveValue; 2] = ends
            .try_into()
            .map_err(|_| Error::custom("link needs exactly two ends"))?;
        let monitored = bool::try_from(source.read_value(PrimitiveType::Bool)?)?;
        source.end_object()?;
        Ok(Link {
            from: u64::try_from(from)?,
            to: u64::try_from(to)?,
            monitored,
        })
    }
}

#[derive(Debug, PartialEq)]
struct Exit;

impl Uniform for Exit {
    fn write_to(&self, sink: &mut dyn Writer) -> Result<()> {
        sink.begin_object(Self::NAME)?;
        sink.end_object()
    }
}

impl Announce for Exit {
    const NAME: &'static str = "exit";

    fn read_from(source: &mut dyn Reader) -> Result<Self> {
        source.expect_object(Self::NAME)?;
        source.end_object()?;
        Ok(Exit)
    }
}

fn main() -> std::result::Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let mut registry = Registry::new();
    registry.announce::<Link>().announce::<Exit>();
    println!("Announced: {:?}\n", registry);

    let link = Link {
        from: 1,
        to: 2,
        monitored: true,
    };
    for text in [to_string(&link)?, to_string(&Exit)?] {
        let object = from_str(&registry, &text)?;
        println!("{:<28} -> {}", text, object.type_name());
    }

    for bad in ["spawn ( 1 )", "link ( {1, 2 }, true", "exit ( 1 )"] {
        match from_str(&registry, bad) {
            Ok(object) => println!("{:<28} -> unexpectedly parsed {:?}", bad, object),
            Err(e) => println!("{:<28} -> {}", bad, e),
        }
    }

    Ok(())
}
