//! Secret entry injection
//!
//! Finds every step named [`SENTINEL_STEP`] under `jobs.*.steps` and fills
//! its `env` mapping with one `scdmp_<NAME>: ${{secrets.<NAME>}}` entry per
//! secret, then drops the [`PLACEHOLDER_KEY`] entry the template carries.

use super::document::{Document, Mapping, Node};
use crate::error::{GosmError, GosmResult};

/// Name of the step that receives the injected entries
pub const SENTINEL_STEP: &str = "Generate Dump";

/// Template entry that keeps the `env` mapping non-empty before injection
pub const PLACEHOLDER_KEY: &str = "PLACEHOLDER";

/// Prefix the dump script uses to recognise injected variables
pub const ENTRY_PREFIX: &str = "scdmp_";

/// What to do when the template has no sentinel step
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum MissingTargetPolicy {
    /// Leave the document untouched and log a warning
    #[default]
    Ignore,
    /// Fail with [`GosmError::MissingInjectionTarget`]
    Fail,
}

/// Outcome of one injection pass
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InjectionReport {
    /// Number of sentinel steps that received entries
    pub matched_steps: usize,
    /// Distinct entry keys written per step
    pub entries: Vec<String>,
}

impl InjectionReport {
    pub fn is_empty(&self) -> bool {
        self.matched_steps == 0
    }
}

/// Env entry key for a secret name
pub fn entry_key(name: &str) -> String {
    format!("{}{}", ENTRY_PREFIX, name)
}

/// Secret reference expression for a secret name
pub fn secret_reference(name: &str) -> String {
    format!("${{{{secrets.{}}}}}", name.trim())
}

#[derive(Debug, Clone, Copy, Default)]
pub struct Injector {
    policy: MissingTargetPolicy,
}

impl Injector {
    pub fn new(policy: MissingTargetPolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> MissingTargetPolicy {
        self.policy
    }

    pub fn inject<S: AsRef<str>>(&self, doc: &mut Document, names: &[S]) -> GosmResult<InjectionReport> {
        let mut report = InjectionReport::default();

        if let Some(jobs) = doc.root_mut().get_mut("jobs").and_then(Node::as_mapping_mut) {
            for (job_name, job) in jobs.iter_mut() {
                let Some(steps) = job
                    .as_mapping_mut()
                    .and_then(|job| job.get_mut("steps"))
                    .and_then(Node::as_sequence_mut)
                else {
                    continue;
                };

                for step in steps.iter_mut().filter_map(Node::as_mapping_mut) {
                    if step.get("name").and_then(Node::as_str) != Some(SENTINEL_STEP) {
                        continue;
                    }
                    let keys = fill_env(step, names);
                    tracing::debug!(job = job_name, entries = keys.len(), "injected secret entries");
                    report.matched_steps += 1;
                    report.entries = keys;
                }
            }
        }

        if report.is_empty() {
            match self.policy {
                MissingTargetPolicy::Ignore => {
                    tracing::warn!(step = SENTINEL_STEP, "no injection target in template, workflow left unchanged");
                }
                MissingTargetPolicy::Fail => {
                    return Err(GosmError::MissingInjectionTarget {
                        step: SENTINEL_STEP.to_string(),
                    });
                }
            }
        }

        Ok(report)
    }
}

fn fill_env<S: AsRef<str>>(step: &mut Mapping, names: &[S]) -> Vec<String> {
    let env_is_mapping = step.get("env").is_some_and(|env| env.as_mapping().is_some());
    if !env_is_mapping {
        step.insert("env", Node::Mapping(Mapping::new()));
    }
    let Some(env) = step.get_mut("env").and_then(Node::as_mapping_mut) else {
        return Vec::new();
    };

    let mut keys: Vec<String> = Vec::new();
    for name in names {
        let name = name.as_ref();
        let key = entry_key(name);
        env.insert(key.clone(), Node::string(secret_reference(name)));
        if !keys.contains(&key) {
            keys.push(key);
        }
    }
    env.remove(PLACEHOLDER_KEY);

    keys
}
