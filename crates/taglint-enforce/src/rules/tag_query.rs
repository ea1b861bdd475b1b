use taglint_core::tags::{Tag, OPTIONAL, REQUIREDNESS_TAGS};

use crate::registry::StabilityRegistry;

/// True if a tag named `name` appears anywhere in any chain.
pub fn has_tag(tags: &[Tag], name: &str) -> bool {
    tags.iter().any(|tag| tag.chain().any(|t| t.name == name))
}

/// True if the tags declare `optional`, `required`, or `forbidden`, possibly
/// behind a wrapper such as `+k8s:alpha=+k8s:optional`.
pub fn has_requiredness_tag(tags: &[Tag]) -> bool {
    REQUIREDNESS_TAGS.iter().any(|name| has_tag(tags, name))
}

/// True if any tag is a registered validation tag.
///
/// `optional` alone does not count. `alpha` / `beta` count only through
/// their payload.
pub fn has_any_validation_tag(tags: &[Tag], registry: &dyn StabilityRegistry) -> bool {
    tags.iter().any(|tag| is_validation(tag, registry))
}

fn is_validation(tag: &Tag, registry: &dyn StabilityRegistry) -> bool {
    if tag.name == OPTIONAL {
        return false;
    }
    if tag.is_stability_wrapper() {
        return tag.value_tag().is_some_and(|inner| is_validation(inner, registry));
    }
    registry.stability(&tag.name).is_ok()
}
