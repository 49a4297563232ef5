//! Dump Use Case
//!
//! Resolves the secret names, renders the dump workflow and writes it.

use crate::domain::ports::{SecretsApi, WorkflowWriter};
use crate::domain::value_objects::SecretName;
use crate::error::{GosmError, GosmResult};
use crate::transcoder::{Transcoder, TranscoderOptions};

use super::options::DumpOptions;
use super::result::{DumpResult, SecretSource};

/// Dump use case - builds the workflow that exports organization secrets
pub struct DumpUseCase<A, W>
where
    A: SecretsApi,
    W: WorkflowWriter,
{
    pub(super) api: Option<A>,
    pub(super) writer: W,
}

impl<A, W> DumpUseCase<A, W>
where
    A: SecretsApi,
    W: WorkflowWriter,
{
    /// `api` may be None when every run passes explicit names
    pub fn new(api: Option<A>, writer: W) -> Self {
        Self { api, writer }
    }

    /// Explicit names win; otherwise the organization listing is used.
    /// With neither, the name list is empty.
    pub fn resolve_secrets(&self, options: &DumpOptions) -> GosmResult<(Vec<SecretName>, SecretSource)> {
        if !options.secrets.is_empty() {
            let names = options
                .secrets
                .iter()
                .map(|raw| SecretName::new(raw))
                .collect::<GosmResult<Vec<_>>>()?;
            return Ok((names, SecretSource::Explicit));
        }

        match (&options.org, &self.api) {
            (Some(org), Some(api)) => {
                let names = api.list_secret_names(org)?;
                Ok((names, SecretSource::Organization(org.clone())))
            }
            (Some(org), None) => Err(GosmError::Usage(format!(
                "listing secrets of '{}' requires a GitHub client",
                org
            ))),
            (None, _) => Ok((Vec::new(), SecretSource::Explicit)),
        }
    }

    /// Render the workflow without writing it
    pub fn render(&self, options: &DumpOptions) -> GosmResult<DumpResult> {
        let (secrets, source) = self.resolve_secrets(options)?;
        if secrets.is_empty() {
            tracing::warn!(%source, "no secrets to dump, the workflow will export nothing");
        }

        let transcoder = Transcoder::new(TranscoderOptions {
            policy: options.policy,
            template: options.template.clone(),
        });
        let rendered = transcoder.render(&secrets)?;

        Ok(DumpResult {
            source,
            secrets,
            injected_steps: rendered.report.matched_steps,
            workflow_file: None,
            workflow: rendered.workflow,
            document: rendered.document,
        })
    }

    /// Render the workflow and write it to `options.workflow_file`
    pub fn execute(&self, options: &DumpOptions) -> GosmResult<DumpResult> {
        let path = options
            .workflow_file
            .clone()
            .ok_or_else(|| GosmError::Usage("a workflow file path is required".to_string()))?;
        if options.secrets.is_empty() && options.org.is_none() {
            return Err(GosmError::Usage(
                "provide the source organization or at least one secret name".to_string(),
            ));
        }

        let mut result = self.render(options)?;
        self.writer.write(&path, &result.workflow)?;
        tracing::info!(
            path = %path.display(),
            secrets = result.secret_count(),
            "dump workflow written"
        );

        result.workflow_file = Some(path);
        Ok(result)
    }
}
