use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(VerifyError::load("x").to_string().contains("load error:"));
    assert!(VerifyError::decode("x").to_string().contains("decode error:"));
    assert!(
        VerifyError::serde("x")
            .to_string()
            .contains("serialization error:")
    );
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = VerifyError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}
