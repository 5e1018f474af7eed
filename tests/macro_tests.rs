use serde::{Deserialize, Serialize};
use uniform_text::{announce_serde, from_str, to_string, Announce, Registry};

#[derive(Serialize, Deserialize, Debug, PartialEq)]
struct Spawn {
    actor: String,
    args: Vec<i64>,
    priority: u8,
}

#[derive(Serialize, Deserialize, Debug, PartialEq)]
#[serde(rename = "down_msg")]
struct DownMsg {
    source: u64,
    reason: Reason,
}

#[derive(Serialize, Deserialize, Debug, PartialEq)]
enum Reason {
    Normal,
    Kill,
    UserDefined(u32),
}

#[derive(Serialize, Deserialize, Debug, PartialEq)]
struct Tick;

announce_serde!(Spawn);
announce_serde!(DownMsg => "down_msg");
announce_serde!(Tick);

fn registry() -> Registry {
    let mut registry = Registry::new();
    registry
        .announce::<Spawn>()
        .announce::<DownMsg>()
        .announce::<Tick>();
    registry
}

#[test]
fn test_announce_serde_default_name() {
    assert_eq!(Spawn::NAME, "Spawn");
    assert_eq!(Tick::NAME, "Tick");
}

#[test]
fn test_announce_serde_explicit_name() {
    assert_eq!(DownMsg::NAME, "down_msg");
    let msg = DownMsg {
        source: 17,
        reason: Reason::UserDefined(3),
    };
    let text = to_string(&msg).unwrap();
    assert_eq!(text, "down_msg ( 17, UserDefined ( 3 ) )");

    let object = from_str(&registry(), &text).unwrap();
    assert_eq!(object.downcast::<DownMsg>().unwrap(), msg);
}

#[test]
fn test_announce_serde_round_trips() {
    let spawn = Spawn {
        actor: "worker pool".to_string(),
        args: vec![-1, 0, 1],
        priority: 3,
    };
    let text = to_string(&spawn).unwrap();
    assert_eq!(text, r#"Spawn ( "worker pool", { -1, 0, 1 }, 3 )"#);
    let object = from_str(&registry(), &text).unwrap();
    assert_eq!(object.downcast_ref::<Spawn>(), Some(&spawn));

    assert_eq!(to_string(&Tick).unwrap(), "Tick");
    assert!(from_str(&registry(), "Tick").unwrap().is::<Tick>());
}

#[test]
fn test_unit_variant_inside_object() {
    let msg = DownMsg {
        source: 1,
        reason: Reason::Kill,
    };
    let text = to_string(&msg).unwrap();
    assert_eq!(text, "down_msg ( 1, Kill )");
    let object = from_str(&registry(), &text).unwrap();
    assert_eq!(
        object.downcast_ref::<DownMsg>().map(|m| &m.reason),
        Some(&Reason::Kill)
    );
    assert_ne!(Reason::Normal, Reason::Kill);
}
