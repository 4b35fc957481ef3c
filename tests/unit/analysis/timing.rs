use super::*;
use serde_json::json;

#[test]
fn classifies_patterns() {
    assert_eq!(infer_timing(&[0.0, 0.0, 0.0]), TimingPattern::Simultaneous);
    assert_eq!(infer_timing(&[0.0, 10.0, 20.0]), TimingPattern::Staggered);
    assert_eq!(infer_timing(&[0.0, 5.0, 2.0]), TimingPattern::Irregular);
    assert_eq!(infer_timing(&[0.0, 5.0, 5.0]), TimingPattern::Irregular);
}

#[test]
fn degenerate_inputs_are_simultaneous() {
    assert_eq!(infer_timing(&[]), TimingPattern::Simultaneous);
    assert_eq!(infer_timing(&[12.0]), TimingPattern::Simultaneous);
}

#[test]
fn start_frames_fall_back_to_layer_in_point() {
    let doc: AnimationDocument = serde_json::from_value(json!({
        "layers": [{ "st": 0 }, { "ip": 10 }, { "st": 20, "ip": 99 }, {}]
    }))
    .unwrap();
    assert_eq!(start_frames(&doc), vec![0.0, 10.0, 20.0, 0.0]);
}
