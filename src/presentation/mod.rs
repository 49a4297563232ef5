//! Presentation Layer
//!
//! This layer handles:
//! - CLI argument parsing (via clap)
//! - Creating use cases with infrastructure dependencies
//! - Output formatting (text/NDJSON)
//!
//! ## Structure
//!
//! - `cli` - Command line definition
//! - `factory` - Creates use cases with proper dependencies (dependency injection)
//! - `output` - Output rendering abstractions

pub mod cli;
pub mod factory;
pub mod output;

pub use cli::{Cli, Commands, RenderFormat};
pub use factory::create_dump_use_case;
pub use output::{create_renderer, OutputFormat};
