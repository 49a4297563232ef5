//! CLI Argument Parsing
//!
//! Global flags (`--json`, `--verbose`, `--config`) are inherited by all
//! subcommands.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(clap::ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RenderFormat {
    /// Workflow text
    #[default]
    Yaml,
    /// Document tree as JSON
    Json,
}

/// gosm - organization secrets migrator
#[derive(Parser, Debug)]
#[command(name = "gosm")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Emit NDJSON events instead of text
    #[arg(long, global = true)]
    pub json: bool,

    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Config file (default: ./gosm.toml, then ~/.config/gosm/config.toml)
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Write a workflow that dumps the organization's secrets as artifacts
    Dump {
        /// Organization whose secrets are listed
        #[arg(long)]
        org: Option<String>,

        /// Where to write the workflow (falls back to [dump] workflow_file)
        #[arg(short = 'w', long, value_name = "PATH")]
        workflow_file: Option<PathBuf>,

        /// Secret names to dump instead of listing the organization
        #[arg(short, long = "secret", value_name = "NAME")]
        secrets: Vec<String>,

        /// Fail when the template has no `Generate Dump` step
        #[arg(long)]
        strict: bool,

        /// Template file replacing the built-in workflow
        #[arg(long, value_name = "PATH")]
        template: Option<PathBuf>,
    },

    /// Print the dump workflow for the given names
    Render {
        /// Secret names to inject
        #[arg(short, long = "secret", value_name = "NAME")]
        secrets: Vec<String>,

        /// Output format
        #[arg(long, value_enum, default_value_t = RenderFormat::Yaml)]
        format: RenderFormat,

        /// Template file replacing the built-in workflow
        #[arg(long, value_name = "PATH")]
        template: Option<PathBuf>,
    },

    /// Show how plain YAML tokens are typed
    Classify {
        /// Tokens to classify
        #[arg(required = true, value_name = "TOKEN", allow_hyphen_values = true)]
        tokens: Vec<String>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parse_dump() {
        let cli = Cli::try_parse_from([
            "gosm",
            "dump",
            "--org",
            "acme",
            "-w",
            ".github/workflows/dump.yml",
        ])
        .unwrap();

        if let Commands::Dump {
            org,
            workflow_file,
            secrets,
            strict,
            template,
        } = cli.command
        {
            assert_eq!(org.as_deref(), Some("acme"));
            assert_eq!(
                workflow_file,
                Some(PathBuf::from(".github/workflows/dump.yml"))
            );
            assert!(secrets.is_empty());
            assert!(!strict);
            assert_eq!(template, None);
        } else {
            panic!("Expected Dump command");
        }
    }

    #[test]
    fn test_cli_parse_repeated_secrets() {
        let cli =
            Cli::try_parse_from(["gosm", "render", "-s", "FOO", "--secret", "BAR"]).unwrap();
        if let Commands::Render {
            secrets, format, ..
        } = cli.command
        {
            assert_eq!(secrets, vec!["FOO", "BAR"]);
            assert_eq!(format, RenderFormat::Yaml);
        } else {
            panic!("Expected Render command");
        }
    }

    #[test]
    fn test_cli_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from([
            "gosm", "render", "--json", "-vv", "--config", "gosm.toml", "--format", "json",
        ])
        .unwrap();
        assert!(cli.json);
        assert_eq!(cli.verbose, 2);
        assert_eq!(cli.config, Some(PathBuf::from("gosm.toml")));
        assert!(matches!(
            cli.command,
            Commands::Render {
                format: RenderFormat::Json,
                ..
            }
        ));
    }

    #[test]
    fn test_cli_classify_accepts_negative_numbers() {
        let cli = Cli::try_parse_from(["gosm", "classify", "-1:30", "on"]).unwrap();
        if let Commands::Classify { tokens } = cli.command {
            assert_eq!(tokens, vec!["-1:30", "on"]);
        } else {
            panic!("Expected Classify command");
        }
    }

    #[test]
    fn test_cli_classify_requires_a_token() {
        assert!(Cli::try_parse_from(["gosm", "classify"]).is_err());
    }
}
