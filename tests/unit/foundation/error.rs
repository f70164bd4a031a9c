use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        WestleyError::validation("x")
            .to_string()
            .contains("validation error:")
    );
    assert!(
        WestleyError::sink("x")
            .to_string()
            .contains("markup sink error:")
    );
    assert!(
        WestleyError::serde("x")
            .to_string()
            .contains("serialization error:")
    );
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = WestleyError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}

#[test]
fn json_errors_map_to_serde() {
    let err: WestleyError = serde_json::from_str::<u32>("nope").unwrap_err().into();
    assert!(matches!(err, WestleyError::Serde(_)));
}
