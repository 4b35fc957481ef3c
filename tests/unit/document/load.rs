use super::*;

#[test]
fn records_byte_length() {
    let src = r#"{ "v": "5.7.4", "fr": 30, "layers": [] }"#;
    let doc = AnimationDocument::from_json_str(src).unwrap();
    assert_eq!(doc.byte_len(), Some(src.len() as u64));
    assert_eq!(doc.version(), Some("5.7.4"));
}

#[test]
fn undecodable_input_is_a_decode_error() {
    let err = AnimationDocument::from_json_str("{ not json").unwrap_err();
    assert!(matches!(err, VerifyError::Decode(_)));
}

#[test]
fn non_object_root_is_rejected() {
    let err = AnimationDocument::from_json_str("[1, 2, 3]").unwrap_err();
    assert!(err.to_string().contains("root must be a JSON object"));
}

#[test]
fn missing_file_is_a_load_error() {
    let err = AnimationDocument::from_path("target/definitely/missing.json").unwrap_err();
    assert!(matches!(err, VerifyError::Load(_)));
}

#[test]
fn wrong_field_types_still_decode() {
    let doc = AnimationDocument::from_json_str(
        r#"{ "fr": "x", "layers": { "oops": true }, "assets": 7 }"#,
    )
    .unwrap();
    assert!(doc.fr.is_invalid());
    assert!(doc.layers.is_invalid());
    assert!(doc.layers().is_empty());
    assert!(doc.assets().is_empty());
}
