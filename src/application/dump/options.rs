//! Dump options

use std::path::PathBuf;

use crate::transcoder::MissingTargetPolicy;

/// Options for the dump and render commands
#[derive(Debug, Clone, Default)]
pub struct DumpOptions {
    /// Organization whose secrets are listed when no explicit names are given
    pub org: Option<String>,
    /// Destination of the rendered workflow
    pub workflow_file: Option<PathBuf>,
    /// Explicit secret names (skip the organization listing)
    pub secrets: Vec<String>,
    /// Behaviour when the template has no `Generate Dump` step
    pub policy: MissingTargetPolicy,
    /// Template text replacing the built-in workflow
    pub template: Option<String>,
}

impl DumpOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_org(mut self, org: Option<String>) -> Self {
        self.org = org;
        self
    }

    pub fn with_workflow_file(mut self, path: Option<PathBuf>) -> Self {
        self.workflow_file = path;
        self
    }

    pub fn with_secrets(mut self, secrets: Vec<String>) -> Self {
        self.secrets = secrets;
        self
    }

    /// Fail instead of warning when no injection target exists
    pub fn with_strict(mut self, strict: bool) -> Self {
        self.policy = if strict {
            MissingTargetPolicy::Fail
        } else {
            MissingTargetPolicy::Ignore
        };
        self
    }

    pub fn with_template(mut self, template: Option<String>) -> Self {
        self.template = template;
        self
    }
}
