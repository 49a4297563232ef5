//! Dump Use Case
//!
//! Produces the workflow that, when run, writes each organization secret
//! to `secrets_dump/<NAME>.txt` and uploads the directory as an artifact.
//!
//! This module handles:
//! - Resolving secret names (explicit list or organization listing)
//! - Rendering the workflow through the transcoder
//! - Writing the workflow file

mod options;
mod result;
mod use_case;

pub use options::DumpOptions;
pub use result::{DumpResult, SecretSource};
pub use use_case::DumpUseCase;

#[cfg(test)]
mod tests;
