// Lint passes over cyclic graphs terminate and agree from every entry point.
use std::sync::Arc;

use taglint_core::document::GraphDocument;
use taglint_enforce::engine::Linter;
use taglint_enforce::registry::StaticRegistry;
use taglint_enforce::rules::required_and_optional;
use taglint_parsers::comment_tags::CommentTagParser;

use crate::common::generators::ring_document;
use crate::common::GraphBuilder;

fn requiredness_linter(graph: &taglint_core::types::TypeGraph) -> Linter<'_> {
    let extractor = Arc::new(CommentTagParser::default());
    let rules = vec![required_and_optional(
        extractor.clone(),
        Arc::new(StaticRegistry::builtin()),
    )];
    Linter::new(graph, extractor, rules)
}

#[test]
fn test_ring_without_validation_is_clean() {
    let loaded = GraphDocument::from_json(&ring_document(50, 0))
        .unwrap()
        .into_graph()
        .unwrap();
    let outcome = requiredness_linter(&loaded.graph).lint_all(&loaded.roots);
    assert!(outcome.is_clean(), "{:?}", outcome.diagnostics);
}

#[test]
fn test_ring_with_one_validated_struct_flags_every_link() {
    let loaded = GraphDocument::from_json(&ring_document(50, 50))
        .unwrap()
        .into_graph()
        .unwrap();
    let outcome = requiredness_linter(&loaded.graph).lint_all(&loaded.roots);
    assert!(outcome.error.is_none());
    // Every Next field reaches ring.S0's validation around the ring.
    assert_eq!(outcome.diagnostic_count(), 50);
    assert!(outcome.iter().all(|d| d.field.as_deref() == Some("Next")));
}

#[test]
fn test_entry_point_does_not_change_the_answer() {
    let mut b = GraphBuilder::new();
    let a = b.scalar("cyc.A", &[]);
    let c = b.scalar("cyc.B", &["+k8s:immutable"]);
    let to_a = b.pointer("cyc.PtrA", a);
    let to_b = b.pointer("cyc.PtrB", c);
    b.close_struct(a, &[("ToB", to_b, &[])]);
    b.close_struct(c, &[("ToA", to_a, &[])]);

    for roots in [[a, c], [c, a]] {
        let outcome = requiredness_linter(&b.graph).lint_all(&roots);
        let mut fields: Vec<String> = outcome
            .iter()
            .map(|d| format!("{}.{}", d.type_name, d.field.clone().unwrap_or_default()))
            .collect();
        fields.sort();
        assert_eq!(fields, vec!["cyc.A.ToB", "cyc.B.ToA"], "roots: {roots:?}");
    }
}
