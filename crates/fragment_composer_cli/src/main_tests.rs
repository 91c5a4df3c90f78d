use super::*;
use clap::CommandFactory;

#[test]
fn test_cli_definition_is_consistent() {
    Cli::command().debug_assert();
}

#[test]
fn test_parse_compose_with_properties() {
    let cli = Cli::try_parse_from([
        "fragment-composer",
        "compose",
        "app",
        "-P",
        "native",
        "--property",
        "ci",
        "--format",
        "json",
        "--manifest",
        "build/workspace.toml",
    ])
    .expect("arguments should parse");

    match cli.command {
        Commands::Compose(args) => {
            assert_eq!(args.module.as_deref(), Some("app"));
            assert!(!args.all);
            assert_eq!(args.properties, vec!["native".to_string(), "ci".to_string()]);
            assert_eq!(args.format.as_deref(), Some("json"));
            assert_eq!(
                args.workspace.manifest.as_deref(),
                Some("build/workspace.toml")
            );
        }
        other => panic!("Expected Compose command, got {:?}", other),
    }
}

#[test]
fn test_parse_compose_all() {
    let cli = Cli::try_parse_from(["fragment-composer", "compose", "--all"])
        .expect("arguments should parse");

    match cli.command {
        Commands::Compose(args) => {
            assert!(args.all);
            assert_eq!(args.module, None);
        }
        other => panic!("Expected Compose command, got {:?}", other),
    }
}

#[test]
fn test_compose_requires_module_or_all() {
    assert!(Cli::try_parse_from(["fragment-composer", "compose"]).is_err());
    assert!(Cli::try_parse_from(["fragment-composer", "compose", "app", "--all"]).is_err());
}

#[test]
fn test_parse_audit() {
    let cli = Cli::try_parse_from(["fragment-composer", "audit", "persistence", "-P", "native"])
        .expect("arguments should parse");

    match cli.command {
        Commands::Audit(args) => {
            assert_eq!(args.module, "persistence");
            assert_eq!(args.properties, vec!["native".to_string()]);
            assert_eq!(args.format, "pretty");
        }
        other => panic!("Expected Audit command, got {:?}", other),
    }
}

#[test]
fn test_parse_config_set() {
    let cli = Cli::try_parse_from([
        "fragment-composer",
        "config",
        "set",
        "output.format",
        "json",
    ])
    .expect("arguments should parse");

    assert!(matches!(
        cli.command,
        Commands::Config(ConfigCommands::Set { ref key, ref value, path: None })
            if key == "output.format" && value == "json"
    ));
}

#[test]
fn test_version_command_succeeds() {
    assert!(run(&Commands::Version).is_ok());
}
