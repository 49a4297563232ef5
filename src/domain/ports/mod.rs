//! Domain Ports (Interfaces)
//!
//! These traits define the boundaries of the domain layer.
//! Infrastructure layer provides concrete implementations.

pub mod secrets_api;
pub mod workflow_writer;

pub use secrets_api::SecretsApi;
pub use workflow_writer::WorkflowWriter;
