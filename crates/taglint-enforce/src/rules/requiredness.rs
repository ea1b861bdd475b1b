use std::sync::Arc;

use taglint_core::types::TypeKind;
use taglint_parsers::extractor::TagExtractor;

use crate::registry::StabilityRegistry;
use crate::rule::LintRule;
use crate::rules::tag_query::{has_any_validation_tag, has_requiredness_tag};
use crate::transitive::TransitiveValidation;

pub const RULE_NAME: &str = "required-and-optional";

pub const MISSING_REQUIREDNESS: &str =
    "field with validation must have +k8s:optional, +k8s:required or +k8s:forbidden";

/// Fields that carry validation, directly or anywhere in their type graph,
/// must say whether they may be absent.
///
/// Fields whose type resolves to a non-pointer struct are exempt: the
/// struct's own fields carry their requiredness.
pub fn required_and_optional(
    extractor: Arc<dyn TagExtractor>,
    registry: Arc<dyn StabilityRegistry>,
) -> LintRule {
    let mut transitive = TransitiveValidation::new(extractor, registry.clone());

    LintRule::new(RULE_NAME, move |ctx, tags| {
        // Only fields are checked, never the struct itself.
        let Some(container) = ctx.container_node() else {
            return Ok(None);
        };
        if container.kind() != TypeKind::Struct || container.id == ctx.target {
            return Ok(None);
        }

        let underlying = ctx.graph.resolve_alias(ctx.target);
        if ctx.graph.node(underlying).kind() == TypeKind::Struct {
            return Ok(None);
        }

        if has_requiredness_tag(tags) {
            return Ok(None);
        }

        let direct = has_any_validation_tag(tags, registry.as_ref());
        let reachable = transitive.check(ctx.graph, ctx.target).found;

        if direct || reachable {
            return Ok(Some(MISSING_REQUIREDNESS.to_string()));
        }
        Ok(None)
    })
}
