use super::*;
use serde_json::json;

#[test]
fn strips_root_metadata_only() {
    let v = json!({
        "v": "5.7.4",
        "meta": { "g": "tool" },
        "generator": "x",
        "layers": [{ "nm": "a", "meta": 1 }]
    });
    let out = optimize(v, &OptimizeOptions::default());
    assert!(out.get("meta").is_none());
    assert!(out.get("generator").is_none());
    assert_eq!(out["layers"][0]["meta"], json!(1));
}

#[test]
fn keeps_metadata_when_asked() {
    let opts = OptimizeOptions {
        remove_metadata: false,
        ..OptimizeOptions::default()
    };
    let out = optimize(json!({ "meta": { "g": "tool" } }), &opts);
    assert_eq!(out["meta"]["g"], json!("tool"));
}

#[test]
fn rounds_floats_and_leaves_integers() {
    let out = optimize(
        json!({ "p": [12.34567, 0.005, 7], "big": 123456789012u64, "r": 89.999 }),
        &OptimizeOptions::default(),
    );
    assert_eq!(out["p"], json!([12.35, 0.01, 7]));
    assert_eq!(out["big"], json!(123456789012u64));
    assert_eq!(out["r"], json!(90));
}

#[test]
fn custom_precision() {
    let opts = OptimizeOptions {
        decimal_places: 0,
        ..OptimizeOptions::default()
    };
    assert_eq!(optimize(json!([1.6, -2.4]), &opts), json!([2, -2]));
}

#[test]
fn prunes_empty_members_but_keeps_falsy_scalars() {
    let out = optimize(
        json!({
            "a": {},
            "b": [],
            "c": null,
            "d": false,
            "e": 0,
            "f": "",
            "nested": { "only_null": null },
            "list": [null, {}, [], 1]
        }),
        &OptimizeOptions::default(),
    );
    assert_eq!(
        out,
        json!({ "d": false, "e": 0, "f": "", "list": [{}, [], 1] })
    );
}

#[test]
fn optimize_bytes_minifies_and_reports_savings() {
    let src = br#"{
        "v": "5.7.4",
        "fr": 30.0000001,
        "meta": { "a": "b" },
        "layers": []
    }"#;
    let (out, stats) = optimize_bytes(src, &OptimizeOptions::default()).unwrap();
    let text = String::from_utf8(out).unwrap();
    assert_eq!(text, r#"{"fr":30,"v":"5.7.4"}"#);
    assert_eq!(stats.original_bytes, src.len() as u64);
    assert_eq!(stats.optimized_bytes, text.len() as u64);
    assert!(stats.reduction_percent() > 50.0);
}

#[test]
fn optimize_bytes_rejects_bad_json() {
    let err = optimize_bytes(b"{nope", &OptimizeOptions::default()).unwrap_err();
    assert!(matches!(err, VerifyError::Decode(_)));
}

#[test]
fn empty_input_has_zero_reduction() {
    assert_eq!(OptimizeStats::default().reduction_percent(), 0.0);
}
