//! Workflow transcoder
//!
//! Template text → [`loader`] (with a [`Classifier`]) → [`Document`] →
//! [`injector`] → [`serializer`] → workflow text.
//!
//! Every render builds its own classifier, so memoized tokens and interned
//! atoms never outlive one invocation.

pub mod classifier;
pub mod document;
pub mod injector;
pub mod loader;
pub mod serializer;
pub mod template;

pub use classifier::{Atom, Classification, Classifier, RuleKind, ScalarValue};
pub use document::{Document, Mapping, Node};
pub use injector::{InjectionReport, Injector, MissingTargetPolicy};
pub use loader::{load, Loader};
pub use serializer::{normalize_uppercase_keys, serialize, serialize_stream, Serializer};
pub use template::DUMP_WORKFLOW_TEMPLATE;

use crate::error::GosmResult;

/// Options for [`Transcoder`]
#[derive(Debug, Clone, Default)]
pub struct TranscoderOptions {
    pub policy: MissingTargetPolicy,
    /// Template text replacing [`DUMP_WORKFLOW_TEMPLATE`]
    pub template: Option<String>,
}

/// Result of one render
#[derive(Debug, Clone)]
pub struct Rendered {
    pub workflow: String,
    pub document: Document,
    pub report: InjectionReport,
}

#[derive(Debug, Clone, Default)]
pub struct Transcoder {
    options: TranscoderOptions,
}

impl Transcoder {
    pub fn new(options: TranscoderOptions) -> Self {
        Self { options }
    }

    pub fn template(&self) -> &str {
        self.options
            .template
            .as_deref()
            .unwrap_or(DUMP_WORKFLOW_TEMPLATE)
    }

    /// Load the template and inject `names` into it
    pub fn render<S: AsRef<str>>(&self, names: &[S]) -> GosmResult<Rendered> {
        let mut classifier = Classifier::new();

        let mut document = Loader::new(&mut classifier).load(self.template())?;
        let report = Injector::new(self.options.policy).inject(&mut document, names)?;
        let workflow = Serializer::new(&mut classifier).serialize(&document);

        tracing::info!(
            secrets = names.len(),
            matched_steps = report.matched_steps,
            bytes = workflow.len(),
            "rendered dump workflow"
        );

        Ok(Rendered {
            workflow,
            document,
            report,
        })
    }
}

/// Render the built-in dump workflow for `names`
pub fn generate_dump_workflow<S: AsRef<str>>(names: &[S]) -> GosmResult<String> {
    Transcoder::default().render(names).map(|rendered| rendered.workflow)
}
