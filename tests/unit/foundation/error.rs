use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        TryOnError::permission_denied("x")
            .to_string()
            .contains("permission denied:")
    );
    assert!(
        TryOnError::device_unavailable("x")
            .to_string()
            .contains("device unavailable:")
    );
    assert!(
        TryOnError::snapshot_unavailable("x")
            .to_string()
            .contains("snapshot unavailable:")
    );
    assert!(
        TryOnError::validation("x")
            .to_string()
            .contains("validation error:")
    );
    assert!(
        TryOnError::evaluation("x")
            .to_string()
            .contains("evaluation error:")
    );
}

#[test]
fn only_camera_failures_count_as_acquisition_failures() {
    assert!(TryOnError::permission_denied("x").is_acquisition_failure());
    assert!(TryOnError::device_unavailable("x").is_acquisition_failure());
    assert!(!TryOnError::snapshot_unavailable("x").is_acquisition_failure());
    assert!(!TryOnError::validation("x").is_acquisition_failure());
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = TryOnError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}
