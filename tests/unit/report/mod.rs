use super::*;

#[test]
fn errors_fail_warnings_do_not() {
    let mut r = ValidationReport::new();
    r.warn("slow");
    assert!(r.passes);
    r.error("broken");
    assert!(!r.passes);
    assert_eq!(r.errors, vec!["broken".to_owned()]);
}

#[test]
fn merge_combines_verdicts() {
    let mut a = ValidationReport::new();
    a.detail("num_layers", 3);
    let mut b = ValidationReport::new();
    b.error("dup");
    b.detail("num_assets", 1);
    a.merge(b);
    assert!(!a.passes);
    assert_eq!(a.details.len(), 2);
    assert_eq!(a.details["num_layers"], serde_json::json!(3));
}
