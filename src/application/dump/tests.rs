//! Dump Use Case Tests

use super::*;
use crate::domain::ports::{SecretsApi, WorkflowWriter};
use crate::domain::value_objects::SecretName;
use crate::error::{GosmError, GosmResult};
use crate::transcoder::Node;
use std::cell::RefCell;
use std::path::{Path, PathBuf};

// Mock implementations for testing

#[derive(Default)]
struct MockSecretsApi {
    names: Vec<String>,
    calls: RefCell<Vec<String>>,
}

impl MockSecretsApi {
    fn with_names(names: &[&str]) -> Self {
        Self {
            names: names.iter().map(|n| n.to_string()).collect(),
            calls: RefCell::default(),
        }
    }
}

impl SecretsApi for MockSecretsApi {
    fn list_secret_names(&self, org: &str) -> GosmResult<Vec<SecretName>> {
        self.calls.borrow_mut().push(org.to_string());
        self.names.iter().map(|n| SecretName::new(n)).collect()
    }
}

#[derive(Default)]
struct MockWorkflowWriter {
    files: RefCell<Vec<(PathBuf, String)>>,
}

impl WorkflowWriter for MockWorkflowWriter {
    fn write(&self, path: &Path, content: &str) -> GosmResult<()> {
        self.files
            .borrow_mut()
            .push((path.to_path_buf(), content.to_string()));
        Ok(())
    }
}

fn use_case(names: &[&str]) -> DumpUseCase<MockSecretsApi, MockWorkflowWriter> {
    DumpUseCase::new(
        Some(MockSecretsApi::with_names(names)),
        MockWorkflowWriter::default(),
    )
}

#[test]
fn explicit_secrets_skip_the_listing() {
    let uc = use_case(&["LISTED"]);
    let options = DumpOptions::new()
        .with_org(Some("acme".to_string()))
        .with_secrets(vec!["FOO".to_string(), " BAR ".to_string()]);

    let (names, source) = uc.resolve_secrets(&options).unwrap();

    assert_eq!(source, SecretSource::Explicit);
    assert_eq!(
        names.iter().map(SecretName::as_str).collect::<Vec<_>>(),
        vec!["FOO", "BAR"]
    );
    assert!(uc.api.as_ref().unwrap().calls.borrow().is_empty());
}

#[test]
fn organization_listing_is_used_without_explicit_names() {
    let uc = use_case(&["GIST_ID", "DEPLOY_TOKEN"]);
    let options = DumpOptions::new().with_org(Some("acme".to_string()));

    let (names, source) = uc.resolve_secrets(&options).unwrap();

    assert_eq!(source, SecretSource::Organization("acme".to_string()));
    assert_eq!(names.len(), 2);
    assert_eq!(*uc.api.as_ref().unwrap().calls.borrow(), vec!["acme"]);
}

#[test]
fn org_without_client_is_a_usage_error() {
    let uc: DumpUseCase<MockSecretsApi, _> = DumpUseCase::new(None, MockWorkflowWriter::default());
    let options = DumpOptions::new().with_org(Some("acme".to_string()));

    assert!(matches!(uc.resolve_secrets(&options), Err(GosmError::Usage(_))));
}

#[test]
fn invalid_explicit_name_is_rejected() {
    let uc = use_case(&[]);
    let options = DumpOptions::new().with_secrets(vec!["GITHUB_TOKEN".to_string()]);

    assert!(matches!(
        uc.render(&options),
        Err(GosmError::InvalidSecretName { .. })
    ));
}

#[test]
fn render_does_not_write() {
    let uc = use_case(&[]);
    let options = DumpOptions::new().with_secrets(vec!["TOKEN_A".to_string()]);

    let result = uc.render(&options).unwrap();

    assert!(!result.was_written());
    assert_eq!(result.injected_steps, 1);
    assert!(result
        .workflow
        .contains("scdmp_TOKEN_A: \"${{secrets.TOKEN_A}}\""));
    assert!(uc.writer.files.borrow().is_empty());
}

#[test]
fn execute_writes_rendered_workflow() {
    let uc = use_case(&["FOO", "BAR"]);
    let options = DumpOptions::new()
        .with_org(Some("acme".to_string()))
        .with_workflow_file(Some(PathBuf::from(".github/workflows/dump.yml")));

    let result = uc.execute(&options).unwrap();

    let files = uc.writer.files.borrow();
    assert_eq!(files.len(), 1);
    assert_eq!(files[0].0, PathBuf::from(".github/workflows/dump.yml"));
    assert_eq!(files[0].1, result.workflow);
    assert_eq!(
        result.workflow_file.as_deref(),
        Some(Path::new(".github/workflows/dump.yml"))
    );
    let env = result
        .document
        .get(&["jobs", "run", "steps", "2", "env"])
        .and_then(Node::as_mapping)
        .unwrap();
    assert_eq!(env.keys().collect::<Vec<_>>(), vec!["scdmp_FOO", "scdmp_BAR"]);
}

#[test]
fn execute_requires_a_destination_and_a_source() {
    let uc = use_case(&[]);

    let no_path = DumpOptions::new().with_secrets(vec!["FOO".to_string()]);
    assert!(matches!(uc.execute(&no_path), Err(GosmError::Usage(_))));

    let no_source = DumpOptions::new().with_workflow_file(Some(PathBuf::from("dump.yml")));
    assert!(matches!(uc.execute(&no_source), Err(GosmError::Usage(_))));
}

#[test]
fn strict_option_fails_on_template_without_target() {
    let uc = use_case(&[]);
    let options = DumpOptions::new()
        .with_secrets(vec!["FOO".to_string()])
        .with_template(Some("name: custom\njobs: {}\n".to_string()))
        .with_strict(true);

    assert!(matches!(
        uc.render(&options),
        Err(GosmError::MissingInjectionTarget { .. })
    ));
}

#[test]
fn result_serializes_for_json_output() {
    let uc = use_case(&["FOO"]);
    let options = DumpOptions::new().with_org(Some("acme".to_string()));

    let json = serde_json::to_value(uc.render(&options).unwrap()).unwrap();

    assert_eq!(json["source"]["kind"], "organization");
    assert_eq!(json["source"]["org"], "acme");
    assert_eq!(json["secrets"][0], "FOO");
    assert!(json.get("workflow").is_none());
}
