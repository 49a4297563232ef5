//! Cross-checks rendered workflows against an independent YAML parser.
//!
//! `serde_yaml_ng` resolves scalars with the YAML 1.2 core schema, which is
//! what the Actions runner sees. The trigger key, secret references and
//! version strings must come through as strings.

use gosm::transcoder::DUMP_WORKFLOW_TEMPLATE;
use gosm::{generate_dump_workflow, serialize, Classifier, ScalarValue};
use serde_yaml_ng::Value;

fn parse(text: &str) -> Value {
    serde_yaml_ng::from_str(text).unwrap_or_else(|err| panic!("{err}\n{text}"))
}

#[test]
fn test_rendered_workflow_parses_to_expected_structure() {
    let workflow = generate_dump_workflow(&["FOO", "BAR"]).unwrap();
    let doc = parse(&workflow);

    assert_eq!(doc["name"], Value::from("Dump Secrets"));
    assert!(doc.get("on").is_some(), "missing 'on' key:\n{workflow}");
    assert!(doc["on"].get("workflow_dispatch").is_some());

    let steps = doc["jobs"]["run"]["steps"].as_sequence().unwrap();
    assert_eq!(steps.len(), 4);

    let env = steps[2]["env"].as_mapping().unwrap();
    assert_eq!(env.len(), 2);
    assert_eq!(env["scdmp_FOO"], Value::from("${{secrets.FOO}}"));
    assert_eq!(env["scdmp_BAR"], Value::from("${{secrets.BAR}}"));
    assert!(env.get("PLACEHOLDER").is_none());

    assert_eq!(steps[1]["with"]["ruby-version"], Value::from("3.2.0"));
    assert_eq!(steps[1]["with"]["bundler-cache"], Value::from(true));
    assert_eq!(steps[3]["with"]["retention-days"], Value::from(1));
    assert_eq!(steps[2]["shell"], Value::from("ruby {0}"));
}

#[test]
fn test_run_script_survives_verbatim() {
    let template = parse(DUMP_WORKFLOW_TEMPLATE);
    let rendered = parse(&generate_dump_workflow(&["FOO"]).unwrap());

    let script = rendered["jobs"]["run"]["steps"][2]["run"].as_str().unwrap();
    assert_eq!(
        Some(script),
        template["jobs"]["run"]["steps"][2]["run"].as_str()
    );
    assert!(script.contains("secret_name = k.sub(\"scdmp_\", \"\")"));
}

#[test]
fn test_quoted_ambiguous_strings_stay_strings() {
    let mut classifier = Classifier::new();
    let tokens = ["1:30", "0x1F", "2001-12-14", "on", "null", "1_000", "-.inf", ":sym"];
    let mut root = gosm::transcoder::Mapping::new();
    for (i, token) in tokens.iter().enumerate() {
        assert!(
            !matches!(classifier.classify(token), ScalarValue::Str(_)),
            "{token} should resolve to a non-string"
        );
        root.insert(format!("k{i}"), gosm::Node::string(*token));
    }

    let text = serialize(&gosm::Document::new(root));
    let doc = parse(&text);

    for (i, token) in tokens.iter().enumerate() {
        assert_eq!(doc[format!("k{i}").as_str()], Value::from(*token), "{text}");
    }
}
