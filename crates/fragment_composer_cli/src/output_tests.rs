use super::*;
use fragment_composer::{Composer, ConfigFragment};

fn project(name: &str) -> Project {
    let kotlin = ConfigFragment::new("kotlin-library")
        .with_plugin("org.jetbrains.kotlin.jvm")
        .with_scalar("jvm_toolchain", 24)
        .with_list("implementation", ["org.jetbrains.kotlin:kotlin-reflect"]);
    let overrides = ConfigFragment::new(name).with_scalar("pull_policy", "IF_NOT_PRESENT");

    Composer::new()
        .compose(&[&kotlin], &overrides)
        .expect("composition should succeed")
}

#[test]
fn test_format_project_toml() {
    let output = format_project(&project("domain"), "toml").expect("toml output");

    let parsed: toml::Value = toml::from_str(&output).expect("output should be valid TOML");
    assert_eq!(parsed["name"].as_str(), Some("domain"));
    assert_eq!(parsed["scalars"]["jvm_toolchain"].as_integer(), Some(24));
}

#[test]
fn test_format_project_json() {
    let output = format_project(&project("domain"), "json").expect("json output");

    let parsed: serde_json::Value = serde_json::from_str(&output).expect("valid JSON");
    assert_eq!(parsed["name"], "domain");
    assert_eq!(parsed["plugins"][0], "org.jetbrains.kotlin.jvm");
}

#[test]
fn test_format_project_pretty_mentions_sources() {
    let output = format_project(&project("app"), "pretty").expect("pretty output");

    assert!(output.contains("app"));
    assert!(output.contains("kotlin-library"));
    assert!(output.contains("jvm_toolchain"));
    assert!(output.contains("module override"));
    assert!(output.contains("\"IF_NOT_PRESENT\""));
}

#[test]
fn test_format_project_invalid_format() {
    let result = format_project(&project("app"), "yaml");

    if let Err(Error::InvalidArguments(msg)) = result {
        assert!(msg.contains("yaml"));
    } else {
        panic!("Expected InvalidArguments error");
    }
}

#[test]
fn test_format_projects_toml_is_one_document() {
    let projects = vec![project("api"), project("domain")];

    let output = format_projects(&projects, "toml").expect("toml output");

    let parsed: toml::Value = toml::from_str(&output).expect("output should be valid TOML");
    let tables = parsed["projects"].as_array().expect("projects array");
    assert_eq!(tables.len(), 2);
    assert_eq!(tables[0]["name"].as_str(), Some("api"));
    assert_eq!(tables[1]["name"].as_str(), Some("domain"));
}

#[test]
fn test_format_projects_json_is_array() {
    let projects = vec![project("api"), project("domain")];

    let output = format_projects(&projects, "json").expect("json output");

    let parsed: serde_json::Value = serde_json::from_str(&output).expect("valid JSON");
    assert_eq!(parsed.as_array().map(|a| a.len()), Some(2));
}

#[test]
fn test_format_projects_invalid_format() {
    assert!(matches!(
        format_projects(&[], "xml"),
        Err(Error::InvalidArguments(_))
    ));
}
