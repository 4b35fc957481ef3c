use super::*;
use serde_json::json;

fn base() -> serde_json::Value {
    json!({
        "v": "5.7.4",
        "fr": 30,
        "ip": 0,
        "op": 90,
        "w": 512,
        "h": 512,
        "layers": [{ "nm": "Logo", "ty": 2, "refId": "img_0" }],
        "assets": [{ "id": "img_0", "w": 512, "h": 512, "u": "images/", "p": "img_0.png", "e": 0 }]
    })
}

fn doc(v: serde_json::Value) -> AnimationDocument {
    serde_json::from_value(v).unwrap()
}

#[test]
fn clean_document_passes_without_warnings() {
    let r = validate_structure(&doc(base()));
    assert!(r.passes, "{:?}", r.errors);
    assert!(r.warnings.is_empty(), "{:?}", r.warnings);
    assert_eq!(r.details["duration_seconds"], json!(3.0));
    assert_eq!(r.details["num_layers"], json!(1));
    assert_eq!(r.details["dimensions"], json!([512.0, 512.0]));
}

#[test]
fn missing_layers_fails_and_names_the_field() {
    let mut v = base();
    v.as_object_mut().unwrap().remove("layers");
    let r = validate_structure(&doc(v));
    assert!(!r.passes);
    assert_eq!(r.errors.len(), 1);
    assert!(r.errors[0].contains("layers"));
    assert!(r.warnings.is_empty());
    assert!(!r.details.contains_key("num_layers"));
}

#[test]
fn empty_layers_fails() {
    let mut v = base();
    v["layers"] = json!([]);
    let r = validate_structure(&doc(v));
    assert!(!r.passes);
    assert!(r.errors.iter().any(|e| e.contains("No layers found")));
}

#[test]
fn invalid_required_field_stops_validation() {
    let mut v = base();
    v["fr"] = json!("fast");
    let r = validate_structure(&doc(v));
    assert!(!r.passes);
    assert_eq!(r.errors, vec!["Invalid required properties: fr".to_owned()]);
}

#[test]
fn advisory_thresholds_only_warn() {
    let mut v = base();
    v["fr"] = json!(10);
    v["op"] = json!(200);
    v["w"] = json!(64);
    v["h"] = json!(4096);
    v["layers"] = json!((0..51).map(|i| json!({ "nm": format!("l{i}") })).collect::<Vec<_>>());
    let r = validate_structure(&doc(v));
    assert!(r.passes);
    let joined = r.warnings.join("\n");
    assert!(joined.contains("Low frame rate (10 fps)"));
    assert!(joined.contains("Long animation (20.0s)"));
    assert!(joined.contains("Small dimensions (64x4096)"));
    assert!(joined.contains("Large dimensions (64x4096)"));
    assert!(joined.contains("Many layers (51)"));
}

#[test]
fn short_and_high_rate_animation_warns() {
    let mut v = base();
    v["fr"] = json!(240);
    v["op"] = json!(120);
    let r = validate_structure(&doc(v));
    assert!(r.passes);
    assert!(r.warnings.iter().any(|w| w.contains("Very high frame rate")));
    assert!(r.warnings.iter().any(|w| w.contains("Very short animation (0.5s)")));
}

#[test]
fn reversed_timeline_is_an_error() {
    let mut v = base();
    v["ip"] = json!(90);
    v["op"] = json!(0);
    let r = validate_structure(&doc(v));
    assert!(!r.passes);
    assert!(r.errors[0].contains("precedes in point"));
}

#[test]
fn large_file_warns() {
    let mut v = base();
    v["padding"] = json!("x".repeat(600 * 1024));
    let d = AnimationDocument::from_json_str(&v.to_string()).unwrap();
    let r = validate_structure(&d);
    assert!(r.passes);
    assert!(r.warnings.iter().any(|w| w.contains("Large file size")));
}

#[test]
fn custom_limits_apply() {
    let limits = StructureLimits {
        max_layers: 0,
        ..StructureLimits::default()
    };
    let r = validate_structure_with(&doc(base()), &limits);
    assert!(r.warnings.iter().any(|w| w.contains("Many layers (1)")));
}

#[test]
fn document_validation_merges_asset_findings() {
    let mut v = base();
    v["layers"] = json!([{ "refId": "img_0" }, { "refId": "img_0" }]);
    v["assets"] = json!([{ "id": "img_0", "e": 1, "p": format!("data:image/png;base64,{}", "A".repeat(204_800)) }]);
    let r = validate_document(&doc(v));
    assert!(!r.passes);
    assert!(r.errors.iter().any(|e| e.contains("Duplicate asset references")));
    assert!(r.warnings.iter().any(|w| w.contains("Large embedded image")));
    assert_eq!(r.details["embedded_assets"], json!(1));
}

#[test]
fn document_validation_stops_at_the_gate() {
    let r = validate_document(&doc(json!({ "assets": [{ "id": "a", "e": 1, "p": "x.png" }] })));
    assert!(!r.passes);
    assert_eq!(r.errors.len(), 1);
    assert!(r.warnings.is_empty());
}

#[test]
fn external_notes_land_in_details() {
    let r = validate_document(&doc(base()));
    assert!(r.passes);
    assert_eq!(r.details["external_assets"], json!(1));
    assert!(r.details.contains_key("asset_notes"));
}
