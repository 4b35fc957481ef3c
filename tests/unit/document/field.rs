use super::*;
use serde_json::json;

#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
struct Probe {
    num: Field<f64>,
    flag: Field<Flag>,
    #[serde(deserialize_with = "lenient_seq")]
    items: Field<Vec<Item>>,
}

#[derive(Debug, Default, PartialEq, serde::Deserialize)]
#[serde(default)]
struct Item {
    n: Field<f64>,
}

#[test]
fn absent_and_null_are_missing() {
    let p: Probe = serde_json::from_value(json!({ "num": null })).unwrap();
    assert!(p.num.is_missing());
    assert!(p.flag.is_missing());
    assert!(p.items.is_missing());
}

#[test]
fn wrong_type_is_kept_as_invalid() {
    let p: Probe = serde_json::from_value(json!({ "num": "fast", "items": 3 })).unwrap();
    assert_eq!(p.num, Field::Invalid(json!("fast")));
    assert!(p.items.is_invalid());
    assert_eq!(p.num.get(), None);
}

#[test]
fn integers_are_valid_floats() {
    let p: Probe = serde_json::from_value(json!({ "num": 30 })).unwrap();
    assert_eq!(p.num.value(), Some(30.0));
}

#[test]
fn flag_accepts_numbers_and_bools() {
    for (raw, want) in [(json!(1), true), (json!(0), false), (json!(true), true), (json!(2), true)] {
        let p: Probe = serde_json::from_value(json!({ "flag": raw })).unwrap();
        assert_eq!(p.flag.value(), Some(Flag(want)));
    }
}

#[test]
fn lenient_seq_keeps_positions() {
    let p: Probe =
        serde_json::from_value(json!({ "items": [{ "n": 1 }, "junk", { "n": "x" }] })).unwrap();
    let items = p.items.get().unwrap();
    assert_eq!(items.len(), 3);
    assert_eq!(items[0].n.value(), Some(1.0));
    assert_eq!(items[1], Item::default());
    assert!(items[2].n.is_invalid());
}

#[test]
fn version_accepts_string_or_number() {
    let v: Field<Version> = Field::from_json(json!("5.7.4"));
    assert_eq!(v.get().map(|v| v.0.as_str()), Some("5.7.4"));
    let v: Field<Version> = Field::from_json(json!(5));
    assert_eq!(v.get().map(|v| v.0.as_str()), Some("5"));
    let v: Field<Version> = Field::from_json(json!([5]));
    assert!(v.is_invalid());
}
