use clap::{Parser, Subcommand};
use fragment_composer_cli::commands::{
    compose_cmd::{self, ComposeArgs},
    config_cmd::{self, ConfigCommands},
    inspect_cmd::{self, AuditArgs, ListArgs, ValidateArgs},
};
use fragment_composer_cli::errors::Error;
use tracing::error;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[cfg(test)]
#[path = "main_tests.rs"]
mod tests;

/// fragment-composer: Compose module configuration from shared fragments
#[derive(Parser, Debug)]
#[command(name = "fragment-composer")]
#[command(about = "Compose module configuration from shared fragments", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Compose a module (or all modules) and print the effective configuration
    Compose(ComposeArgs),

    /// List the fragments and modules of the workspace
    List(ListArgs),

    /// Validate the workspace manifest and fragment references
    Validate(ValidateArgs),

    /// Report pre-release dependency versions of a composed module
    Audit(AuditArgs),

    /// Manage the composer.toml configuration file
    #[command(subcommand)]
    Config(ConfigCommands),

    /// Show the CLI version
    Version,
}

fn run(command: &Commands) -> Result<(), Error> {
    match command {
        Commands::Compose(args) => compose_cmd::execute(args),
        Commands::List(args) => inspect_cmd::execute_list(args),
        Commands::Validate(args) => inspect_cmd::execute_validate(args),
        Commands::Audit(args) => inspect_cmd::execute_audit(args),
        Commands::Config(cmd) => config_cmd::execute(cmd),
        Commands::Version => {
            println!(
                "fragment-composer version {}",
                option_env!("FRAGMENT_COMPOSER_VERSION").unwrap_or(env!("CARGO_PKG_VERSION"))
            );
            Ok(())
        }
    }
}

fn main() {
    // Logs go to stderr so stdout carries only command output
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::from_env("FRAGMENT_COMPOSER_LOG"))
        .init();

    let cli = Cli::parse();
    if let Err(e) = run(&cli.command) {
        error!("Error: {e}");
        std::process::exit(1);
    }
}
