use pluck_lang::Native;
use pluck_lang::decode::{DecodeError, decode};
use serde::Deserialize;

fn source() -> Native {
    Native::map([
        (
            "user",
            Native::map([
                ("name", Native::from("alice")),
                ("age", Native::Int(34)),
                (
                    "address",
                    Native::map([
                        ("city", Native::from("utrecht")),
                        ("zip", Native::from("3511")),
                    ]),
                ),
            ]),
        ),
        (
            "scores",
            Native::seq([Native::Int(8), Native::Int(9), Native::Int(10)]),
        ),
    ])
}

#[derive(Debug, Deserialize, PartialEq)]
struct Address {
    city: String,
    zip: String,
}

#[derive(Debug, Deserialize, PartialEq)]
struct Profile {
    name: String,
    age: i64,
    best: i64,
    address: Address,
    scores: Vec<i64>,
}

#[test]
fn decodes_one_query_per_field() {
    let profile: Profile = decode(
        &[
            ("name", "$.user.name"),
            ("age", "$.user.age"),
            ("best", "$.scores[2]"),
            ("address", "$.user.address"),
            ("scores", "$.scores"),
        ],
        &source(),
    )
    .unwrap();

    assert_eq!(
        profile,
        Profile {
            name: "alice".into(),
            age: 34,
            best: 10,
            address: Address {
                city: "utrecht".into(),
                zip: "3511".into(),
            },
            scores: vec![8, 9, 10],
        }
    );
}

#[derive(Debug, Deserialize, PartialEq, Default)]
struct Sparse {
    name: String,
    #[serde(default)]
    nickname: String,
}

#[test]
fn unmapped_fields_fall_back_to_defaults() {
    let sparse: Sparse = decode(&[("name", "$.user.name")], &source()).unwrap();
    assert_eq!(sparse.name, "alice");
    assert_eq!(sparse.nickname, "");
}

#[test]
fn failing_query_names_the_field() {
    let err = decode::<Profile>(&[("name", "$.user.missing")], &source()).unwrap_err();
    match err {
        DecodeError::Query { field, .. } => assert_eq!(field, "name"),
        other => panic!("expected Query error, got {:?}", other),
    }
}

#[test]
fn type_mismatch_names_the_field() {
    #[derive(Debug, Deserialize)]
    struct Wrong {
        #[allow(dead_code)]
        age: i64,
    }

    // a string queried into an integer field must name that field
    let err = decode::<Wrong>(&[("age", "$.user.name")], &source()).unwrap_err();
    match err {
        DecodeError::Deserialize { field, .. } => assert_eq!(field, "age"),
        other => panic!("expected Deserialize error, got {:?}", other),
    }
}

#[test]
fn nested_type_mismatch_names_the_path() {
    #[derive(Debug, Deserialize)]
    struct WrongAddress {
        #[allow(dead_code)]
        zip: i64,
    }

    #[derive(Debug, Deserialize)]
    struct Wrong {
        #[allow(dead_code)]
        address: WrongAddress,
    }

    let err = decode::<Wrong>(&[("address", "$.user.address")], &source()).unwrap_err();
    match err {
        DecodeError::Deserialize { field, .. } => assert_eq!(field, "address.zip"),
        other => panic!("expected Deserialize error, got {:?}", other),
    }
}

#[test]
fn callable_results_are_rejected() {
    let src = Native::map([("f", Native::func(|_| Ok(Native::Int(1))))]);
    let err = decode::<Sparse>(&[("name", "$.f")], &src).unwrap_err();
    assert!(matches!(err, DecodeError::NotRepresentable { .. }));
}
