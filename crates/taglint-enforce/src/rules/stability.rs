use std::collections::HashSet;
use std::sync::Arc;

use taglint_core::tags::{StabilityLevel, Tag, ALPHA, BETA};

use crate::registry::StabilityRegistry;
use crate::rule::{filtered, LintRule, RuleOutcome};

pub const RULE_NAME: &str = "validation-stability";

/// Tags may not be less stable than their context: bare tags must be Stable,
/// tags under `+k8s:beta` at least Beta, and anything goes under `+k8s:alpha`.
///
/// Only runs for `enabled` types; see [`filtered`].
pub fn validation_stability(
    enabled: HashSet<String>,
    registry: Arc<dyn StabilityRegistry>,
) -> LintRule {
    filtered(
        enabled,
        LintRule::new(RULE_NAME, move |_, tags| {
            check_tags(tags, registry.as_ref())
        }),
    )
}

fn check_tags(tags: &[Tag], registry: &dyn StabilityRegistry) -> RuleOutcome {
    for tag in tags {
        let context = match tag.name.as_str() {
            ALPHA => StabilityLevel::Alpha,
            BETA => StabilityLevel::Beta,
            _ => {
                if let Ok(level) = registry.stability(&tag.name) {
                    if level != StabilityLevel::Stable {
                        return Ok(Some(violation(tag, level, StabilityLevel::Stable)));
                    }
                }
                StabilityLevel::Stable
            }
        };

        if let Some(inner) = tag.value_tag() {
            let outcome = check_tag_stability(inner, context, registry)?;
            if outcome.is_some() {
                return Ok(outcome);
            }
        }
    }
    Ok(None)
}

fn check_tag_stability(
    tag: &Tag,
    context: StabilityLevel,
    registry: &dyn StabilityRegistry,
) -> RuleOutcome {
    if context == StabilityLevel::Alpha {
        return Ok(None);
    }

    if let Ok(level) = registry.stability(&tag.name) {
        let allowed = match context {
            StabilityLevel::Beta => level >= StabilityLevel::Beta,
            _ => level == StabilityLevel::Stable,
        };
        if !allowed {
            return Ok(Some(violation(tag, level, context)));
        }
    }

    match tag.value_tag() {
        Some(inner) => check_tag_stability(inner, context, registry),
        None => Ok(None),
    }
}

fn violation(tag: &Tag, level: StabilityLevel, context: StabilityLevel) -> String {
    format!(
        "tag {:?} with stability level {:?} cannot be used in {} validation",
        tag.name,
        level.as_str(),
        context
    )
}
