//! Tests for configuration fragments.

use super::*;

#[test]
fn test_builder_collects_settings() {
    let fragment = ConfigFragment::new("spring-boot-application")
        .with_description("Spring Boot web application")
        .with_scalar("bp_jvm_version", "24")
        .with_list("dependencies", ["spring-boot-starter-web", "spring-boot-starter-actuator"])
        .with_plugin("org.springframework.boot")
        .with_plugin("io.spring.dependency-management");

    assert_eq!(fragment.name(), "spring-boot-application");
    assert_eq!(fragment.description(), Some("Spring Boot web application"));
    assert_eq!(
        fragment.scalar_options().get("bp_jvm_version"),
        Some(&OptionValue::from("24"))
    );
    assert_eq!(fragment.list_options()["dependencies"].len(), 2);
    assert_eq!(fragment.plugin_refs().len(), 2);
    assert!(!fragment.is_empty());
}

#[test]
fn test_with_list_appends_to_existing_key() {
    let fragment = ConfigFragment::new("f")
        .with_list("deps", ["a"])
        .with_list("deps", ["b"]);

    assert_eq!(
        fragment.list_options()["deps"],
        vec![OptionValue::from("a"), OptionValue::from("b")]
    );
}

#[test]
fn test_with_scalar_replaces_value() {
    let fragment = ConfigFragment::new("f")
        .with_scalar("x", 1)
        .with_scalar("x", 2);

    assert_eq!(fragment.scalar_options()["x"], OptionValue::from(2));
}

#[test]
fn test_empty_fragment() {
    assert!(ConfigFragment::new("empty").is_empty());
}

#[test]
fn test_validate_accepts_well_formed_fragment() {
    let fragment = ConfigFragment::new("code-formatting").with_plugin("com.diffplug.spotless");
    assert!(fragment.validate().is_ok());
}

#[test]
fn test_validate_rejects_empty_name() {
    let err = ConfigFragment::new("").validate().unwrap_err();
    assert!(matches!(err, CompositionError::InvalidFragment { .. }));
}

#[test]
fn test_validate_rejects_blank_name() {
    let err = ConfigFragment::new("   ").validate().unwrap_err();
    assert!(matches!(err, CompositionError::InvalidFragment { .. }));
}

#[test]
fn test_validate_rejects_padded_name() {
    let err = ConfigFragment::new(" app ").validate().unwrap_err();
    match err {
        CompositionError::InvalidFragment { reason, .. } => {
            assert!(reason.contains("whitespace"));
        }
        _ => panic!("Expected InvalidFragment"),
    }
}

#[test]
fn test_validate_rejects_empty_keys_and_plugins() {
    let scalar = ConfigFragment::new("f").with_scalar("", 1);
    let list = ConfigFragment::new("f").with_list("", ["a"]);
    let plugin = ConfigFragment::new("f").with_plugin("");

    assert!(scalar.validate().is_err());
    assert!(list.validate().is_err());
    assert!(plugin.validate().is_err());
}

#[test]
fn test_deserialize_from_toml() {
    let toml = r#"
        name = "quality-assurance"
        plugins = ["org.jetbrains.kotlinx.kover"]

        [scalars]
        "kover.html.on_check" = false

        [lists]
        reports = ["html", "xml"]
    "#;

    let fragment: ConfigFragment = toml::from_str(toml).expect("Failed to parse");

    assert_eq!(fragment.name(), "quality-assurance");
    assert!(fragment.plugin_refs().contains("org.jetbrains.kotlinx.kover"));
    assert_eq!(
        fragment.scalar_options()["kover.html.on_check"],
        OptionValue::from(false)
    );
    assert_eq!(fragment.list_options()["reports"].len(), 2);
}

#[test]
fn test_deserialize_minimal_fragment() {
    let fragment: ConfigFragment = toml::from_str("name = \"bare\"").expect("Failed to parse");
    assert!(fragment.is_empty());
    assert_eq!(fragment.description(), None);
}

#[test]
fn test_validate_rejects_non_finite_floats() {
    let nan_list = ConfigFragment::new("app").with_list("l", [f64::NAN, f64::NAN]);
    let infinite_scalar = ConfigFragment::new("app").with_scalar("cvss", f64::INFINITY);

    match nan_list.validate() {
        Err(CompositionError::InvalidFragment { name, reason }) => {
            assert_eq!(name, "app");
            assert!(reason.contains("'l'"));
        }
        other => panic!("Expected InvalidFragment, got {:?}", other),
    }
    assert!(matches!(
        infinite_scalar.validate(),
        Err(CompositionError::InvalidFragment { .. })
    ));
    assert!(ConfigFragment::new("app")
        .with_scalar("cvss", 7.0)
        .validate()
        .is_ok());
}

#[test]
fn test_deserialize_rejects_misspelled_keys() {
    let misspelled_plugins = "name = \"f\"\nplugin = [\"idea\"]";
    let misspelled_scalars = "name = \"f\"\n[scalar]\nx = 1";

    assert!(toml::from_str::<ConfigFragment>(misspelled_plugins).is_err());
    assert!(toml::from_str::<ConfigFragment>(misspelled_scalars).is_err());
}
