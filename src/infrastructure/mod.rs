//! Infrastructure Layer
//!
//! Concrete implementations of the domain ports.
//!
//! - `github` - GitHub REST client (SecretsApi)
//! - `fs` - Local workflow writer (WorkflowWriter)

pub mod fs;
pub mod github;

pub use fs::LocalWorkflowWriter;
pub use github::{GithubClient, GithubClientConfig};
