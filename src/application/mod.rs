//! Application Layer
//!
//! Use cases that orchestrate the domain ports and the transcoder.

pub mod dump;

pub use dump::{DumpOptions, DumpResult, DumpUseCase, SecretSource};
