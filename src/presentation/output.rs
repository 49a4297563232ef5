//! Output Rendering
//!
//! Text for humans, NDJSON events (one JSON object per line) for scripts.

use std::io::{self, Write};

use crate::application::DumpResult;
use crate::config::ConfigWarning;
use crate::transcoder::Classification;

/// Output format for rendering
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// Human-readable text output
    #[default]
    Text,
    /// NDJSON events for scripting
    Json,
}

impl OutputFormat {
    pub fn from_json_flag(json: bool) -> Self {
        if json {
            OutputFormat::Json
        } else {
            OutputFormat::Text
        }
    }
}

/// Write a single NDJSON event (one JSON object per line).
pub fn write_event(out: &mut impl Write, event: &serde_json::Value) -> io::Result<()> {
    let line = serde_json::to_string(event).unwrap_or_else(|_| "{}".to_string());
    out.write_all(line.as_bytes())?;
    out.write_all(b"\n")?;
    Ok(())
}

/// Convenience helper that writes raw JSON value to stdout.
pub fn emit(event: serde_json::Value) -> io::Result<()> {
    let mut out = io::stdout().lock();
    write_event(&mut out, &event)
}

/// Print config warnings to stderr so stdout stays machine-readable
pub fn print_config_warnings(warnings: &[ConfigWarning]) {
    for warning in warnings {
        eprintln!("[WARN] {}", warning);
    }
}

/// Trait for rendering dump results
pub trait DumpResultRenderer {
    fn render(&self, result: &DumpResult, out: &mut dyn Write) -> io::Result<()>;
}

/// Text renderer for dump results
#[derive(Debug, Default)]
pub struct TextRenderer {
    /// Verbosity level; above zero the secret names are listed
    pub verbose: u8,
}

impl DumpResultRenderer for TextRenderer {
    fn render(&self, result: &DumpResult, out: &mut dyn Write) -> io::Result<()> {
        match &result.workflow_file {
            Some(path) => writeln!(out, "[OK] Dump workflow written to {}", path.display())?,
            None => writeln!(out, "[OK] Dump workflow rendered")?,
        }
        writeln!(out)?;
        writeln!(
            out,
            "  {} secrets from {}",
            result.secret_count(),
            result.source
        )?;
        writeln!(out, "  {} dump step(s) updated", result.injected_steps)?;

        if self.verbose > 0 && !result.secrets.is_empty() {
            writeln!(out, "  Secrets ({}):", result.secret_count())?;
            for name in &result.secrets {
                writeln!(out, "    -> {}", name)?;
            }
        }

        if result.injected_steps == 0 {
            writeln!(out)?;
            writeln!(out, "  [!] the template has no step named 'Generate Dump'")?;
        }
        Ok(())
    }
}

/// NDJSON renderer for dump results
pub struct JsonRenderer;

impl DumpResultRenderer for JsonRenderer {
    fn render(&self, result: &DumpResult, out: &mut dyn Write) -> io::Result<()> {
        let mut event = serde_json::json!({
            "event": "complete",
            "command": "dump",
            "success": true,
        });
        if let (Some(map), Ok(serde_json::Value::Object(fields))) =
            (event.as_object_mut(), serde_json::to_value(result))
        {
            map.extend(fields);
        }

        let line = serde_json::to_string(&event).unwrap_or_else(|_| "{}".to_string());
        writeln!(out, "{}", line)
    }
}

/// Create a renderer based on format
pub fn create_renderer(format: OutputFormat, verbose: u8) -> Box<dyn DumpResultRenderer> {
    match format {
        OutputFormat::Text => Box::new(TextRenderer { verbose }),
        OutputFormat::Json => Box::new(JsonRenderer),
    }
}

/// `classify` output for one token
pub fn classification_event(token: &str, classification: &Classification) -> serde_json::Value {
    serde_json::json!({
        "event": "classification",
        "token": token,
        "type": classification.value.type_name(),
        "value": classification.value.to_string(),
        "rule": classification.rule.to_string(),
    })
}

/// One aligned text line per token: `token  type  value  (rule)`
pub fn classification_line(token: &str, classification: &Classification) -> String {
    format!(
        "{:<20} {:<10} {:<24} ({})",
        format!("{:?}", token),
        classification.value.type_name(),
        classification.value.to_string(),
        classification.rule
    )
}
