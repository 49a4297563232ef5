use std::io::{self, Write};
use std::path::Path;

use anyhow::Result;

use gosm::application::DumpOptions;
use gosm::config::Config;
use gosm::presentation::cli::RenderFormat;
use gosm::presentation::factory::create_dump_use_case;
use gosm::presentation::output::emit;

use super::read_template;

pub fn cmd_render(
    secrets: Vec<String>,
    format: RenderFormat,
    template: Option<&Path>,
    config: &Config,
    json: bool,
) -> Result<()> {
    let options = DumpOptions::new()
        .with_secrets(secrets)
        .with_strict(config.dump.strict_injection)
        .with_template(read_template(template)?);

    let result = create_dump_use_case(config, false)?.render(&options)?;

    if json {
        emit(serde_json::json!({
            "event": "start",
            "command": "render",
        }))?;
        let mut event = serde_json::json!({
            "event": "complete",
            "command": "render",
            "secrets": result.secrets,
            "injected_steps": result.injected_steps,
        });
        event["workflow"] = match format {
            RenderFormat::Yaml => serde_json::Value::String(result.workflow),
            RenderFormat::Json => serde_json::to_value(&result.document)?,
        };
        emit(event)?;
        return Ok(());
    }

    let mut out = io::stdout().lock();
    match format {
        RenderFormat::Yaml => out.write_all(result.workflow.as_bytes())?,
        RenderFormat::Json => {
            serde_json::to_writer_pretty(&mut out, &result.document)?;
            writeln!(out)?;
        }
    }
    Ok(())
}
