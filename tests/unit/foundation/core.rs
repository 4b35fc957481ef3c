use super::*;

#[test]
fn duration_is_zero_for_non_positive_frame_rate() {
    assert_eq!(duration_secs(0.0, 60.0, 0.0), 0.0);
    assert_eq!(duration_secs(0.0, 60.0, -24.0), 0.0);
    assert_eq!(duration_secs(0.0, 60.0, 30.0), 2.0);
    assert_eq!(duration_secs(30.0, 60.0, 30.0), 1.0);
}

#[test]
fn base64_estimate_rounds_up() {
    assert_eq!(base64_decoded_len(1368), 1026);
    assert_eq!(base64_decoded_len(0), 0);
    assert_eq!(base64_decoded_len(1), 1);
    assert_eq!(base64_decoded_len(5), 4);
}

#[test]
fn kb_conversion() {
    assert_eq!(bytes_to_kb(2048), 2.0);
    assert_eq!(bytes_to_kb(512), 0.5);
}

#[test]
fn integral_numbers_print_without_fraction() {
    assert_eq!(fmt_num(5.0), "5");
    assert_eq!(fmt_num(-360.0), "-360");
    assert_eq!(fmt_num(0.25), "0.25");
}
