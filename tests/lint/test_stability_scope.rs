// Stability gating only applies to the types it is enabled for.
use std::collections::HashSet;
use std::sync::Arc;

use taglint_core::types::TypeId;
use taglint_enforce::engine::Linter;
use taglint_enforce::registry::StaticRegistry;
use taglint_enforce::rules::{lint_rules, stability};
use taglint_parsers::comment_tags::CommentTagParser;

use crate::common::GraphBuilder;

fn stability_messages(b: &GraphBuilder, root: TypeId, enabled: &[&str]) -> Vec<String> {
    let extractor = Arc::new(CommentTagParser::default());
    let enabled: HashSet<String> = enabled.iter().map(|s| s.to_string()).collect();
    let rules = lint_rules(enabled, extractor.clone(), Arc::new(StaticRegistry::builtin()));
    let mut linter = Linter::new(&b.graph, extractor, rules);
    linter
        .lint(root)
        .iter()
        .filter(|d| d.rule == stability::RULE_NAME)
        .map(|d| d.to_string())
        .collect()
}

fn graph() -> (GraphBuilder, TypeId) {
    let mut b = GraphBuilder::new();
    let string = b.scalar("string", &[]);
    let status = b.structure(
        "apps.Status",
        &[],
        &[("Phase", string, &["+k8s:optional", "+k8s:immutable"])],
    );
    let spec = b.structure(
        "apps.Spec",
        &[],
        &[
            ("Mode", string, &["+k8s:optional", "+k8s:beta=+k8s:forbidden"]),
            ("Status", status, &["+k8s:optional"]),
        ],
    );
    (b, spec)
}

#[test]
fn test_disabled_when_no_types_enabled() {
    let (b, spec) = graph();
    assert!(stability_messages(&b, spec, &[]).is_empty());
}

#[test]
fn test_enabled_type_checks_its_own_fields_only() {
    let (b, spec) = graph();
    assert_eq!(
        stability_messages(&b, spec, &["apps.Spec"]),
        vec![r#"field Mode: tag "k8s:forbidden" with stability level "Alpha" cannot be used in Beta validation"#]
    );
}

#[test]
fn test_each_enabled_type_is_checked() {
    let (b, spec) = graph();
    assert_eq!(
        stability_messages(&b, spec, &["apps.Spec", "apps.Status"]),
        // Diagnostics come back in declaration order of the owning type.
        vec![
            r#"field Phase: tag "k8s:immutable" with stability level "Beta" cannot be used in Stable validation"#,
            r#"field Mode: tag "k8s:forbidden" with stability level "Alpha" cannot be used in Beta validation"#,
        ]
    );
}
