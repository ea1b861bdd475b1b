// Checking several documents in one run.
use std::sync::Arc;

use taglint_core::config::TaglintConfig;
use taglint_enforce::check::{check_documents, registry_from_config};
use taglint_parsers::comment_tags::CommentTagParser;
use taglint_parsers::walker::{load_all, GraphWalker};

use crate::common::generators::ring_document;
use crate::common::{create_project, CLEAN_DOC, VIOLATING_DOC};

fn check_tree(root: &std::path::Path) -> taglint_enforce::types::CheckResult {
    let config = TaglintConfig::load(root);
    let paths = GraphWalker::new(root).walk();
    let extractor = Arc::new(CommentTagParser::new(config.tag_prefixes.iter().cloned()));
    let registry = Arc::new(registry_from_config(&config));
    check_documents(load_all(&paths), &config, extractor, registry)
}

#[test]
fn test_mixed_tree() {
    let ring = ring_document(20, 5);
    let (_dir, root) = create_project(&[
        ("a_clean.json", CLEAN_DOC),
        ("b_violating.json", VIOLATING_DOC),
        ("c_ring.json", &ring),
    ]);
    let result = check_tree(&root);
    assert_eq!(result.status, "violations");
    assert_eq!(result.files_analyzed.len(), 3);
    assert!(result.failures.is_empty());

    let per_file = |name: &str| {
        result
            .diagnostics
            .iter()
            .filter(|d| d.file.ends_with(name))
            .count()
    };
    assert_eq!(per_file("a_clean.json"), 0);
    assert_eq!(per_file("b_violating.json"), 1);
    assert_eq!(per_file("c_ring.json"), 20);
}

#[test]
fn test_config_disables_requiredness() {
    let (_dir, root) = create_project(&[
        ("b_violating.json", VIOLATING_DOC),
        ("taglint.json", r#"{"rules": {"requiredness": false}}"#),
    ]);
    let result = check_tree(&root);
    assert_eq!(result.status, "ok");
    assert_eq!(result.files_analyzed.len(), 1);
}

#[test]
fn test_config_enables_stability_and_overrides() {
    let doc = r#"{
      "types": [
        {"name": "apps.Spec", "kind": "struct", "members": [
          {"name": "Mode", "type": "string", "comments": ["+k8s:optional", "+k8s:immutable"]},
          {"name": "Size", "type": "int", "comments": ["+k8s:optional", "+k8s:neq=0"]}
        ]}
      ]
    }"#;
    let (_dir, root) = create_project(&[
        ("spec.json", doc),
        (
            "taglint.json",
            r#"{"stability_enforced_types": ["apps.Spec"], "stability_overrides": {"k8s:immutable": "stable"}}"#,
        ),
    ]);
    let result = check_tree(&root);
    assert_eq!(result.status, "violations");
    let messages: Vec<&str> = result.diagnostics.iter().map(|d| d.message.as_str()).collect();
    assert_eq!(
        messages,
        vec![r#"tag "k8s:neq" with stability level "Alpha" cannot be used in Stable validation"#]
    );
}

#[test]
fn test_custom_prefix() {
    let doc = r#"{
      "types": [
        {"name": "apps.Spec", "kind": "struct", "members": [
          {"name": "Count", "type": "apps.IntPtr", "comments": ["+acme:minimum=0"]}
        ]},
        {"name": "apps.IntPtr", "kind": "pointer", "elem": "int"}
      ]
    }"#;
    let (_dir, root) = create_project(&[("spec.json", doc)]);
    // With the default prefix the acme tag is just a comment.
    assert_eq!(check_tree(&root).status, "ok");
}

#[test]
fn test_broken_document_is_an_error() {
    let (_dir, root) = create_project(&[
        ("a.json", "{\"types\": ["),
        ("b.json", VIOLATING_DOC),
    ]);
    let result = check_tree(&root);
    assert_eq!(result.status, "error");
    assert_eq!(result.exit_code(), 2);
    assert_eq!(result.failures.len(), 1);
    assert!(result.failures[0].file.ends_with("a.json"));
    assert_eq!(result.diagnostics.len(), 1);
}
