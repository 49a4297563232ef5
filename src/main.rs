//! gosm CLI - organization secrets migrator
//!
//! Usage: gosm <COMMAND>
//!
//! Commands:
//!   dump      Write a workflow that dumps the organization's secrets
//!   render    Print the dump workflow for the given names
//!   classify  Show how plain YAML tokens are typed

mod commands;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use gosm::config::Config;
use gosm::presentation::cli::{Cli, Commands};
use gosm::presentation::output::print_config_warnings;

use commands::{cmd_classify, cmd_dump, cmd_render, DumpArgs};

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(err) = run(cli) {
        eprintln!("[ERROR] {err:#}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let (config, warnings) =
        Config::load_or_default(cli.config.as_deref()).context("Failed to load configuration")?;
    print_config_warnings(&warnings);

    match cli.command {
        Commands::Dump {
            org,
            workflow_file,
            secrets,
            strict,
            template,
        } => cmd_dump(
            DumpArgs {
                org,
                workflow_file,
                secrets,
                strict,
                template,
            },
            &config,
            cli.json,
            cli.verbose,
        ),
        Commands::Render {
            secrets,
            format,
            template,
        } => cmd_render(secrets, format, template.as_deref(), &config, cli.json),
        Commands::Classify { tokens } => cmd_classify(&tokens, cli.json),
    }
}

/// Logs go to stderr. `RUST_LOG` wins over the `-v` count.
fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("warn,gosm={level}")));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
