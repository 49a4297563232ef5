//! Configuration module for gosm
//!
//! Configuration hierarchy:
//! 1. CLI flags (highest priority)
//! 2. Environment variables (GOSM_*)
//! 3. Config file (`--config`, `./gosm.toml`, or ~/.config/gosm/config.toml)
//! 4. Built-in defaults (lowest priority)

mod loader;
mod types;

pub use loader::{ConfigWarning, PROJECT_CONFIG_FILE};
pub use types::{Config, DumpConfig, GithubConfig};
