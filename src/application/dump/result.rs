//! Dump result types

use std::path::PathBuf;

use serde::Serialize;

use crate::domain::value_objects::SecretName;
use crate::transcoder::Document;

/// Where the secret names came from
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "org", rename_all = "snake_case")]
pub enum SecretSource {
    /// Names given on the command line
    Explicit,
    /// Names listed from an organization
    Organization(String),
}

impl std::fmt::Display for SecretSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SecretSource::Explicit => write!(f, "command line"),
            SecretSource::Organization(org) => write!(f, "organization '{}'", org),
        }
    }
}

/// Result of rendering (and optionally writing) a dump workflow
#[derive(Debug, Clone, Serialize)]
pub struct DumpResult {
    pub source: SecretSource,
    pub secrets: Vec<SecretName>,
    /// Number of `Generate Dump` steps that received entries
    pub injected_steps: usize,
    /// Written file (None when only rendered)
    pub workflow_file: Option<PathBuf>,
    #[serde(skip)]
    pub workflow: String,
    #[serde(skip)]
    pub document: Document,
}

impl DumpResult {
    pub fn secret_count(&self) -> usize {
        self.secrets.len()
    }

    pub fn was_written(&self) -> bool {
        self.workflow_file.is_some()
    }
}
