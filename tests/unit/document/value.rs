use super::*;
use serde_json::json;

#[test]
fn classifies_numeric_shapes() {
    assert_eq!(KeyValue::from_json(json!(50)), KeyValue::Scalar(50.0));
    assert_eq!(
        KeyValue::from_json(json!([0, 5.5])),
        KeyValue::Vector(vec![0.0, 5.5])
    );
    assert_eq!(
        KeyValue::from_json(json!([1, "x"])),
        KeyValue::Other(json!([1, "x"]))
    );
    assert_eq!(KeyValue::from_json(json!("red")), KeyValue::Other(json!("red")));
}

#[test]
fn shape_mismatch_never_matches() {
    let scalar = KeyValue::Scalar(5.0);
    let vector = KeyValue::Vector(vec![5.0]);
    assert!(!scalar.matches(&vector, 1.0));
    assert!(!KeyValue::Vector(vec![0.0, 0.0]).matches(&KeyValue::Vector(vec![0.0]), 1.0));
}

#[test]
fn non_numeric_values_use_exact_equality() {
    let a = KeyValue::Other(json!({ "x": 1 }));
    assert!(a.matches(&a.clone(), 0.0));
    assert!(!a.matches(&KeyValue::Other(json!({ "x": 2 })), 100.0));
}

#[test]
fn rotation_unwraps_single_element_vectors() {
    let a = KeyValue::Vector(vec![0.0]);
    let b = KeyValue::Scalar(360.0);
    assert!(a.rotation_matches(&b, 0.01));
    assert!(!KeyValue::Scalar(10.0).rotation_matches(&KeyValue::Vector(vec![190.0]), 0.01));
    assert!(KeyValue::Vector(vec![]).rotation_matches(&KeyValue::Scalar(720.0), 0.01));
}

#[test]
fn rotation_reads_first_component_of_longer_vectors() {
    let a = KeyValue::Vector(vec![0.0, 0.0]);
    assert_eq!(KeyValue::Vector(vec![90.0, 5.0]).as_degrees(), Some(90.0));
    assert!(a.rotation_matches(&a.clone(), 0.01));
    assert!(a.rotation_matches(&KeyValue::Vector(vec![360.004, 0.0]), 0.01));
    assert!(!a.rotation_matches(&KeyValue::Vector(vec![180.0, 0.0]), 0.01));
    assert!(!KeyValue::Other(json!("x")).rotation_matches(&KeyValue::Scalar(0.0), 0.01));
}

#[test]
fn display_is_compact() {
    assert_eq!(KeyValue::Vector(vec![0.0, 5.0]).to_string(), "[0, 5]");
    assert_eq!(KeyValue::Scalar(12.5).to_string(), "12.5");
    assert_eq!(KeyValue::Other(json!("a")).to_string(), "\"a\"");
}
