use super::*;

#[test]
fn test_config_error_display() {
    let error = Error::Config("Missing field 'manifest'".to_string());
    assert_eq!(
        error.to_string(),
        "Configuration error: Missing field 'manifest'"
    );
}

#[test]
fn test_invalid_arguments_error_display() {
    let error = Error::InvalidArguments("a module name or --all is required".to_string());
    assert_eq!(
        error.to_string(),
        "Invalid arguments: a module name or --all is required"
    );
}

#[test]
fn test_composition_error_is_transparent() {
    let error: Error = CompositionError::UnknownFragment {
        name: "native-image".to_string(),
    }
    .into();

    assert_eq!(error.to_string(), "Unknown fragment: 'native-image'");
    assert!(matches!(error, Error::Composition(_)));
}

#[test]
fn test_validation_failed_display() {
    let error = Error::ValidationFailed { error_count: 3 };
    assert_eq!(
        error.to_string(),
        "Workspace validation failed with 3 error(s)"
    );
}

#[test]
fn test_unstable_dependencies_display() {
    let error = Error::UnstableDependencies { count: 1 };
    assert_eq!(error.to_string(), "Found 1 unstable dependency version(s)");
}

#[test]
fn test_error_is_send_sync() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<Error>();
}
