//! Subcommand handlers
//!
//! Each `cmd_*` turns parsed arguments plus the loaded [`Config`] into a use
//! case call and prints the outcome as text or NDJSON events.

mod classify;
mod dump;
mod render;

pub use classify::cmd_classify;
pub use dump::{cmd_dump, DumpArgs};
pub use render::cmd_render;

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};

/// Read a `--template` override
fn read_template(path: Option<&Path>) -> Result<Option<String>> {
    path.map(|path| {
        fs::read_to_string(path)
            .with_context(|| format!("Failed to read template {}", path.display()))
    })
    .transpose()
}
