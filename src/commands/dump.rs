use std::io;
use std::path::PathBuf;

use anyhow::{Context, Result};

use gosm::application::DumpOptions;
use gosm::config::Config;
use gosm::presentation::factory::create_dump_use_case;
use gosm::presentation::output::{create_renderer, emit, OutputFormat};

use super::read_template;

/// Arguments of `gosm dump`
#[derive(Debug, Clone, Default)]
pub struct DumpArgs {
    pub org: Option<String>,
    pub workflow_file: Option<PathBuf>,
    pub secrets: Vec<String>,
    pub strict: bool,
    pub template: Option<PathBuf>,
}

pub fn cmd_dump(args: DumpArgs, config: &Config, json: bool, verbose: u8) -> Result<()> {
    if json {
        emit(serde_json::json!({
            "event": "start",
            "command": "dump",
            "version": env!("CARGO_PKG_VERSION"),
        }))?;
    }

    let options = DumpOptions::new()
        .with_org(args.org)
        .with_workflow_file(args.workflow_file.or_else(|| config.dump.workflow_file.clone()))
        .with_secrets(args.secrets)
        .with_strict(args.strict || config.dump.strict_injection)
        .with_template(read_template(args.template.as_deref())?);

    let needs_listing = options.secrets.is_empty() && options.org.is_some();
    let use_case = create_dump_use_case(config, needs_listing)?;
    let result = use_case
        .execute(&options)
        .context("Failed to generate dump workflow")?;

    let renderer = create_renderer(OutputFormat::from_json_flag(json), verbose);
    renderer.render(&result, &mut io::stdout().lock())?;
    Ok(())
}
