// Requiredness policy over realistic API shapes.
use std::sync::Arc;

use taglint_enforce::engine::Linter;
use taglint_enforce::registry::StaticRegistry;
use taglint_enforce::rules::lint_rules;
use taglint_parsers::comment_tags::CommentTagParser;

use crate::common::GraphBuilder;

fn lint(b: &GraphBuilder, roots: &[taglint_core::types::TypeId]) -> Vec<String> {
    let extractor = Arc::new(CommentTagParser::default());
    let rules = lint_rules(
        Default::default(),
        extractor.clone(),
        Arc::new(StaticRegistry::builtin()),
    );
    let mut linter = Linter::new(&b.graph, extractor, rules);
    let outcome = linter.lint_all(roots);
    assert!(outcome.error.is_none(), "unexpected error: {:?}", outcome.error);
    outcome
        .iter()
        .map(|d| format!("{}: {}", d.type_name, d))
        .collect()
}

#[test]
fn test_deployment_like_spec() {
    let mut b = GraphBuilder::new();
    let int32 = b.scalar("int32", &[]);
    let string = b.scalar("string", &[]);
    let replicas = b.pointer("apps.Int32Ptr", int32);
    let selector_labels = b.map("apps.Labels", string, string);
    let template = b.structure(
        "apps.PodTemplate",
        &[],
        &[("Name", string, &["+k8s:required", "+k8s:maxLength=253"])],
    );
    let template_ptr = b.pointer("apps.PodTemplatePtr", template);
    let spec = b.structure(
        "apps.DeploymentSpec",
        &[],
        &[
            ("Replicas", replicas, &["+k8s:minimum=0"]),
            (
                "Selector",
                selector_labels,
                &["+k8s:optional", "+k8s:eachKey=+k8s:format=k8s-label-key"],
            ),
            ("Template", template, &[]),
            ("Override", template_ptr, &[]),
        ],
    );

    let got = lint(&b, &[spec]);
    assert_eq!(
        got,
        vec![
            "apps.DeploymentSpec: field Replicas: field with validation must have +k8s:optional, +k8s:required or +k8s:forbidden",
            "apps.DeploymentSpec: field Override: field with validation must have +k8s:optional, +k8s:required or +k8s:forbidden",
        ]
    );
}

#[test]
fn test_conditional_requiredness_satisfies_rule() {
    let mut b = GraphBuilder::new();
    let int = b.scalar("int", &[]);
    let ptr = b.pointer("apps.IntPtr", int);
    let spec = b.structure(
        "apps.Spec",
        &[],
        &[("Count", ptr, &[r#"+k8s:alpha(since:"1.35")=+k8s:optional"#, "+k8s:minimum=1"])],
    );
    assert!(lint(&b, &[spec]).is_empty());
}

#[test]
fn test_diagnostics_land_on_owning_struct() {
    let mut b = GraphBuilder::new();
    let string = b.scalar("string", &[]);
    let names = b.slice("apps.Names", string);
    let inner = b.structure("apps.Inner", &[], &[("Names", names, &["+k8s:maxItems=4"])]);
    let outer = b.structure("apps.Outer", &[], &[("Inner", inner, &["+k8s:optional"])]);

    let got = lint(&b, &[outer]);
    assert_eq!(got.len(), 1);
    assert!(got[0].starts_with("apps.Inner: field Names:"), "{got:?}");
}
