//! gosm - organization secrets migrator
//!
//! gosm generates a GitHub Actions workflow that exports an organization's
//! secrets as build artifacts. The heart of the crate is the workflow
//! [`transcoder`]: a YAML loader with its own scalar classifier, a document
//! model, an entry injector and a serializer whose output keeps the `on:`
//! trigger key and every injected `${{secrets.NAME}}` reference verbatim.

pub mod application;
pub mod config;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod presentation;
pub mod transcoder;

// Re-exports for convenience
pub use application::{DumpOptions, DumpResult, DumpUseCase, SecretSource};
pub use config::Config;
pub use domain::value_objects::SecretName;
pub use error::{GosmError, GosmResult};
pub use transcoder::{
    generate_dump_workflow, load, serialize, Classifier, Document, MissingTargetPolicy, Node,
    ScalarValue, Transcoder, TranscoderOptions,
};
