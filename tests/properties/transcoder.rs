//! Property tests for loading, injecting and serializing workflows.

use proptest::prelude::*;

use gosm::transcoder::{Mapping, Node, ScalarValue, Transcoder};
use gosm::{generate_dump_workflow, load, serialize, Document};

/// Includes all-uppercase keys such as `GITHUB_TOKEN`
fn key() -> impl Strategy<Value = String> {
    proptest::string::string_regex("[A-Za-z_][A-Za-z0-9_]{0,7}").unwrap()
}

/// Single-line text including the characters that force quoting
fn text() -> impl Strategy<Value = String> {
    proptest::string::string_regex("[ -~]{0,20}").unwrap()
}

fn scalar() -> impl Strategy<Value = Node> {
    prop_oneof![
        text().prop_map(Node::string),
        any::<i64>().prop_map(|n| Node::Scalar(ScalarValue::Int(n))),
        any::<bool>().prop_map(|b| Node::Scalar(ScalarValue::Bool(b))),
        Just(Node::null()),
    ]
}

fn node() -> impl Strategy<Value = Node> {
    scalar().prop_recursive(3, 24, 4, |inner| {
        prop_oneof![
            proptest::collection::vec(inner.clone(), 0..4).prop_map(Node::Sequence),
            proptest::collection::btree_map(key(), inner, 1..4)
                .prop_map(|entries| Node::Mapping(entries.into_iter().collect())),
        ]
    })
}

fn document() -> impl Strategy<Value = Document> {
    proptest::collection::btree_map(key(), node(), 1..6)
        .prop_map(|entries| Document::new(entries.into_iter().collect::<Mapping>()))
}

fn secret_name() -> impl Strategy<Value = String> {
    proptest::string::string_regex("[A-FH-Z_][A-Z0-9_]{0,12}").unwrap()
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 96,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: `load` never panics on arbitrary input.
    #[test]
    fn property_load_never_panics(text in "(?s).{0,256}") {
        let _ = load(&text);
    }

    /// PROPERTY: `load` never panics on YAML-shaped input.
    #[test]
    fn property_load_never_panics_on_yaml_like_lines(
        lines in proptest::collection::vec("[ ]{0,6}(- )?[a-z]{0,4}(: )?[-a-z0-9 '\"|>\\[\\]{},:#]{0,12}", 0..12)
    ) {
        let _ = load(&lines.join("\n"));
    }

    /// PROPERTY: serialized documents load back unchanged.
    #[test]
    fn property_serialize_load_round_trip(doc in document()) {
        let text = serialize(&doc);
        let reloaded = load(&text);
        prop_assert!(reloaded.is_ok(), "failed to reload:\n{}\n{:?}", text, reloaded);
        prop_assert_eq!(reloaded.unwrap(), doc, "text:\n{}", text);
    }

    /// PROPERTY: every name becomes one env entry and the placeholder is gone.
    #[test]
    fn property_every_name_is_injected(
        names in proptest::collection::btree_set(secret_name(), 0..8)
    ) {
        let names: Vec<String> = names.into_iter().collect();
        let rendered = Transcoder::default().render(&names).unwrap();

        let env = rendered
            .document
            .get(&["jobs", "run", "steps", "2", "env"])
            .and_then(Node::as_mapping)
            .unwrap();
        let keys: Vec<&str> = env.keys().collect();
        let expected: Vec<String> = names.iter().map(|n| format!("scdmp_{}", n)).collect();
        prop_assert_eq!(keys, expected.iter().map(String::as_str).collect::<Vec<_>>());

        for name in &names {
            let line = format!("scdmp_{}: \"${{{{secrets.{}}}}}\"", name, name);
            prop_assert!(rendered.workflow.lines().any(|l| l.trim_start() == line));
        }
        prop_assert!(!rendered.workflow.contains("PLACEHOLDER"));
    }

    /// PROPERTY: the rendered workflow always reloads to the injected document.
    #[test]
    fn property_rendered_workflow_reloads(
        names in proptest::collection::vec(secret_name(), 0..6)
    ) {
        let workflow = generate_dump_workflow(&names).unwrap();
        let reloaded = load(&workflow).unwrap();
        prop_assert!(reloaded.root().contains_key("on"));
        prop_assert_eq!(
            reloaded.get(&["on", "workflow_dispatch"]),
            Some(&Node::null())
        );
    }
}
