use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        BlobscapeError::validation("x")
            .to_string()
            .contains("validation error:")
    );
    assert!(BlobscapeError::render("x").to_string().contains("render error:"));
    assert!(
        BlobscapeError::serde("x")
            .to_string()
            .contains("serialization error:")
    );
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("surface gone");
    let err = BlobscapeError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("surface gone"));
}
