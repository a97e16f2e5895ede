//! Pointer identity: deduplication, cross-document sharing and cycles.

extern crate alloc;

use alloc::rc::Rc;
use alloc::string::String;
use alloc::sync::Arc;
use core::cell::OnceCell;

use shade_json::{Decoder, Encoder, ErrorKind};
use shade_reflect::derive::Reflect;

#[derive(Reflect)]
struct First {
    a: Rc<i64>,
    b: Rc<i64>,
}

#[derive(Reflect)]
struct Second {
    c: Rc<i64>,
}

#[derive(Reflect)]
struct Four {
    p: Rc<String>,
    q: Rc<String>,
    r: Rc<String>,
    s: Rc<String>,
}

#[derive(Reflect, Default)]
#[reflect(default)]
struct Link {
    name: String,
    next: Option<Rc<Link>>,
}

#[derive(Reflect)]
struct Node {
    name: String,
    next: OnceCell<Rc<Node>>,
}

#[derive(Reflect, Debug, PartialEq)]
struct Holder {
    inner: Option<Rc<Option<Vec<u8>>>>,
}

#[derive(Reflect, Debug)]
struct Mixed {
    local: Rc<i64>,
    shared: Arc<i64>,
}

#[test]
fn shared_across_documents() {
    let a = Rc::new(1_i64);
    let b = Rc::new(2_i64);
    let first = First {
        a: a.clone(),
        b: b.clone(),
    };
    let second = Second { c: b.clone() };

    let mut encoder = Encoder::new();
    let text1 = encoder.encode(&first).unwrap();
    let text2 = encoder.encode(&second).unwrap();
    assert_eq!(
        text1,
        r#"{"value":{"a":{"pointer":1,"value":1},"b":{"pointer":2,"value":2}}}"#
    );
    assert_eq!(text2, r#"{"value":{"c":{"pointer":2,"value":2}}}"#);

    let mut decoder = Decoder::new();
    let decoded1: First = decoder.decode(&text1).unwrap();
    let decoded2: Second = decoder.decode(&text2).unwrap();
    assert_eq!((*decoded1.a, *decoded1.b, *decoded2.c), (1, 2, 2));
    assert!(Rc::ptr_eq(&decoded1.b, &decoded2.c));
    assert!(!Rc::ptr_eq(&decoded1.a, &decoded1.b));
    assert!(!Rc::ptr_eq(&decoded1.b, &b));

    // A fresh decoder starts a fresh identity table.
    let lone: Second = Decoder::new().decode(&text2).unwrap();
    assert!(!Rc::ptr_eq(&lone.c, &decoded2.c));
}

#[test]
fn fields_keep_their_partition() {
    let x = Rc::new(String::from("x"));
    let y = Rc::new(String::from("y"));
    let four = Four {
        p: x.clone(),
        q: y.clone(),
        r: x,
        s: y,
    };

    let text = shade_json::to_string(&four).unwrap();
    assert_eq!(
        text,
        concat!(
            r#"{"value":{"p":{"pointer":1,"value":"x"},"q":{"pointer":2,"value":"y"},"#,
            r#""r":{"pointer":1,"value":"x"},"s":{"pointer":2,"value":"y"}}}"#
        )
    );

    let back: Four = shade_json::from_str(&text).unwrap();
    assert!(Rc::ptr_eq(&back.p, &back.r));
    assert!(Rc::ptr_eq(&back.q, &back.s));
    assert!(!Rc::ptr_eq(&back.p, &back.q));
    assert_eq!((back.p.as_str(), back.q.as_str()), ("x", "y"));
}

#[test]
fn chain_round_trip() {
    let c = Rc::new(Link {
        name: "c".into(),
        next: None,
    });
    let b = Rc::new(Link {
        name: "b".into(),
        next: Some(c),
    });
    let a = Rc::new(Link {
        name: "a".into(),
        next: Some(b),
    });

    let text = shade_json::to_string(&a).unwrap();
    assert_eq!(
        text,
        concat!(
            r#"{"value":{"pointer":3,"value":{"name":"a","next":{"pointer":2,"value":"#,
            r#"{"name":"b","next":{"pointer":1,"value":{"name":"c","next":{"value":null}}}}}}}}"#
        )
    );

    let back: Rc<Link> = shade_json::from_str(&text).unwrap();
    let names: Vec<&str> =
        core::iter::successors(Some(&*back), |link| link.next.as_deref())
            .map(|link| link.name.as_str())
            .collect();
    assert_eq!(names, ["a", "b", "c"]);
}

#[test]
fn cycles_are_rejected() {
    let a = Rc::new(Node {
        name: "a".into(),
        next: OnceCell::new(),
    });
    let b = Rc::new(Node {
        name: "b".into(),
        next: OnceCell::new(),
    });
    assert!(a.next.set(b.clone()).is_ok());
    assert!(b.next.set(a.clone()).is_ok());

    let err = shade_json::to_string(&a).unwrap_err();
    assert!(matches!(err.kind(), ErrorKind::CycleDetected { .. }));
    assert!(
        err.to_string().starts_with("at $*.next*.next: cycle detected through"),
        "{err}"
    );
}

#[test]
fn three_node_ring_is_rejected() {
    let nodes: Vec<Rc<Node>> = ["a", "b", "c"]
        .into_iter()
        .map(|name| {
            Rc::new(Node {
                name: name.into(),
                next: OnceCell::new(),
            })
        })
        .collect();
    for (index, node) in nodes.iter().enumerate() {
        let next = nodes[(index + 1) % nodes.len()].clone();
        assert!(node.next.set(next).is_ok());
    }

    let err = shade_json::to_string(&nodes[0]).unwrap_err();
    assert!(matches!(err.kind(), ErrorKind::CycleDetected { .. }));
    assert!(
        err.to_string()
            .starts_with("at $*.next*.next*.next: cycle detected through"),
        "{err}"
    );
}

#[test]
fn pointees_encoding_to_null() {
    let empty = Rc::new(None::<Vec<u8>>);
    let text = shade_json::to_string(&empty).unwrap();
    assert_eq!(text, r#"{"value":{"pointer":1,"value":null}}"#);
    let back: Rc<Option<Vec<u8>>> = shade_json::from_str(&text).unwrap();
    assert_eq!(*back, None);

    let holder = Holder {
        inner: Some(Rc::new(None)),
    };
    let text = shade_json::to_string(&holder).unwrap();
    assert_eq!(text, r#"{"value":{"inner":{"pointer":1,"value":null}}}"#);
    let back: Holder = shade_json::from_str(&text).unwrap();
    assert_eq!(back, holder);

    let nil = Holder { inner: None };
    let back: Holder = shade_json::from_str(&shade_json::to_string(&nil).unwrap()).unwrap();
    assert_eq!(back, nil);
}

#[test]
fn failed_documents_leave_no_bindings() {
    let mut decoder = Decoder::new();
    let bad = r#"{"value":{"a":{"pointer":1,"value":1},"b":{"pointer":2,"value":"two"}}}"#;
    assert!(decoder.decode::<First>(bad).is_err());

    let good = r#"{"value":{"c":{"pointer":1,"value":3}}}"#;
    let second: Second = decoder.decode(good).unwrap();
    assert_eq!(*second.c, 3);
}

#[test]
fn pointer_families_do_not_mix() {
    let text = concat!(
        r#"{"value":{"local":{"pointer":1,"value":5},"#,
        r#""shared":{"pointer":1,"value":5}}}"#
    );
    let err = shade_json::from_str::<Mixed>(text).unwrap_err();
    assert!(matches!(err.kind(), ErrorKind::TypeMismatch { .. }));
    assert!(err.to_string().starts_with("at $.shared: "), "{err}");
}

#[test]
fn null_pointers() {
    let text = shade_json::to_string(&None::<Rc<i64>>).unwrap();
    assert_eq!(text, r#"{"value":{"value":null}}"#);
    let back: Option<Rc<i64>> = shade_json::from_str(&text).unwrap();
    assert!(back.is_none());

    let err = shade_json::from_str::<Rc<i64>>(&text).unwrap_err();
    assert!(matches!(err.kind(), ErrorKind::TypeMismatch { .. }));
}
