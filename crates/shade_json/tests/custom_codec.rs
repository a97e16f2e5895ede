//! Types coded through serde are written as raw payloads.

extern crate alloc;

use alloc::rc::Rc;
use alloc::string::String;
use alloc::vec::Vec;

use serde::{Deserialize, Serialize};
use shade_json::ErrorKind;
use shade_reflect::derive::Reflect;

#[derive(Reflect, Serialize, Deserialize, Debug, Default, Clone, PartialEq)]
#[reflect(serde, default)]
enum Level {
    #[default]
    Low,
    High,
    Custom(u8),
}

#[derive(Reflect, Serialize, Deserialize, Debug, Default, Clone, PartialEq)]
#[reflect(serde, default)]
struct Meters(f32);

#[derive(Reflect, Debug, PartialEq)]
struct Reading {
    level: Level,
    history: Vec<Level>,
    distance: Rc<Meters>,
    note: String,
}

#[derive(Reflect)]
#[reflect(opaque)]
#[allow(dead_code)]
struct Handle(u32);

#[derive(Reflect)]
#[allow(dead_code)]
struct Holder {
    handle: Handle,
}

#[test]
fn raw_payloads_round_trip() {
    let reading = Reading {
        level: Level::High,
        history: vec![Level::Low, Level::Custom(3)],
        distance: Rc::new(Meters(2.5)),
        note: "ok".into(),
    };

    let text = shade_json::to_string(&reading).unwrap();
    assert_eq!(
        text,
        concat!(
            r#"{"value":{"level":"High","history":["Low",{"Custom":3}],"#,
            r#""distance":{"pointer":1,"value":2.5},"note":"ok"}}"#
        )
    );

    let back: Reading = shade_json::from_str(&text).unwrap();
    assert_eq!(back, reading);
}

#[test]
fn codec_failures_carry_the_path() {
    let text = r#"{"value":{"level":"Middle","history":[],"distance":{"value":null},"note":""}}"#;
    let err = shade_json::from_str::<Reading>(text).unwrap_err();
    assert!(matches!(err.kind(), ErrorKind::CustomCodeFailure { .. }));
    assert!(err.to_string().starts_with("at $.level: custom codec for"), "{err}");
}

#[test]
fn opaque_without_codec_is_unsupported() {
    let err = shade_json::to_string(&Holder { handle: Handle(1) }).unwrap_err();
    assert!(matches!(err.kind(), ErrorKind::UnsupportedKind { .. }));
    assert!(err.to_string().starts_with("at $.handle: unsupported type"), "{err}");
}
