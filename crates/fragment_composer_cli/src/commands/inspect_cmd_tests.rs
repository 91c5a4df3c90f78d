//! Tests for the list, validate and audit commands.

use super::*;
use fragment_composer::{CompositionError, WorkspaceManifest};

const MANIFEST: &str = r#"
[workspace]
name = "shop"

[[fragments]]
name = "kotlin-library"
description = "Kotlin JVM conventions"
plugins = ["org.jetbrains.kotlin.jvm"]
[fragments.lists]
implementation = ["org.jetbrains.kotlin:kotlin-reflect:2.2.0"]

[[fragments]]
name = "preview-client"
[fragments.lists]
implementation = ["io.example:client:3.0.0-RC1"]

[[modules]]
name = "domain"
fragments = ["kotlin-library"]

[[modules]]
name = "app"
fragments = ["kotlin-library"]
[[modules.conditional]]
property = "preview"
fragments = ["preview-client"]
"#;

fn workspace_from(content: &str) -> Workspace {
    let manifest = WorkspaceManifest::from_toml_str(content).expect("manifest");
    Workspace::from_manifest(manifest, None).expect("workspace")
}

fn workspace() -> Workspace {
    workspace_from(MANIFEST)
}

#[test]
fn test_workspace_listing() {
    let listing = workspace_listing(&workspace());

    assert_eq!(listing.workspace, "shop");
    let fragment_names: Vec<&str> = listing.fragments.iter().map(|f| f.name.as_str()).collect();
    assert_eq!(fragment_names, vec!["kotlin-library", "preview-client"]);
    assert_eq!(
        listing.fragments[0].description.as_deref(),
        Some("Kotlin JVM conventions")
    );
    assert_eq!(listing.fragments[0].plugins, 1);
    assert_eq!(listing.fragments[0].lists, 1);

    let module_names: Vec<&str> = listing.modules.iter().map(|m| m.name.as_str()).collect();
    assert_eq!(module_names, vec!["domain", "app"]);
    assert_eq!(
        listing.modules[1].conditional,
        vec![ConditionalSummary {
            property: "preview".to_string(),
            fragments: vec!["preview-client".to_string()],
        }]
    );
}

#[test]
fn test_list_output_json() {
    let output = list_output(&workspace(), "json").expect("json listing");

    let parsed: serde_json::Value = serde_json::from_str(&output).expect("valid JSON");
    assert_eq!(parsed["workspace"], "shop");
    assert_eq!(parsed["modules"][0]["name"], "domain");
}

#[test]
fn test_list_output_pretty() {
    let output = list_output(&workspace(), "pretty").expect("pretty listing");

    assert!(output.contains("shop"));
    assert!(output.contains("kotlin-library"));
    assert!(output.contains("-Ppreview"));
}

#[test]
fn test_list_output_invalid_format() {
    assert!(matches!(
        list_output(&workspace(), "toml"),
        Err(Error::InvalidArguments(_))
    ));
}

#[test]
fn test_validate_output_valid_workspace() {
    let (output, result) = validate_output(&workspace(), "pretty").expect("validation report");

    assert!(result.is_valid());
    assert!(output.contains("VALID"));
}

#[test]
fn test_validate_output_reports_errors() {
    let broken = workspace_from(
        r#"
        [workspace]
        name = "broken"
        [[modules]]
        name = "app"
        fragments = ["spring-boot-application"]
        "#,
    );

    let (output, result) = validate_output(&broken, "json").expect("validation report");

    assert!(!result.is_valid());
    let parsed: serde_json::Value = serde_json::from_str(&output).expect("valid JSON");
    assert_eq!(parsed["errors"][0]["field_path"], "modules.app.fragments");
    assert_eq!(parsed["errors"][0]["error_type"], "UnknownFragment");
}

#[test]
fn test_audit_stable_module() {
    let (output, report) = audit_output(
        &workspace(),
        "app",
        &ActivationProperties::new(),
        "pretty",
    )
    .expect("audit");

    assert!(report.unstable.is_empty());
    assert!(output.contains("stable"));
}

#[test]
fn test_audit_finds_unstable_version_when_activated() {
    let properties: ActivationProperties = ["preview"].into_iter().collect();

    let (output, report) =
        audit_output(&workspace(), "app", &properties, "json").expect("audit");

    assert_eq!(report.module, "app");
    assert_eq!(report.unstable.len(), 1);
    assert_eq!(report.unstable[0].list_key, "implementation");
    assert_eq!(
        report.unstable[0].coordinate.to_string(),
        "io.example:client:3.0.0-RC1"
    );

    let parsed: serde_json::Value = serde_json::from_str(&output).expect("valid JSON");
    assert_eq!(parsed["module"], "app");
}

#[test]
fn test_audit_unknown_module() {
    let result = audit_output(
        &workspace(),
        "billing",
        &ActivationProperties::new(),
        "pretty",
    );

    assert!(matches!(
        result,
        Err(Error::Composition(CompositionError::UnknownModule { .. }))
    ));
}
