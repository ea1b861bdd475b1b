//! The built-in policy rules and rule-set constructors.

use std::collections::HashSet;
use std::sync::Arc;

use taglint_core::config::TaglintConfig;
use taglint_parsers::extractor::TagExtractor;

use crate::registry::StabilityRegistry;
use crate::rule::LintRule;

pub mod placement;
pub mod requiredness;
pub mod stability;
pub mod tag_query;

pub use placement::alpha_beta_prefix;
pub use requiredness::required_and_optional;
pub use stability::validation_stability;

/// The default rule set, in evaluation order.
///
/// `enabled_types` scopes the stability rule; empty disables it.
pub fn lint_rules(
    enabled_types: HashSet<String>,
    extractor: Arc<dyn TagExtractor>,
    registry: Arc<dyn StabilityRegistry>,
) -> Vec<LintRule> {
    vec![
        alpha_beta_prefix(),
        validation_stability(enabled_types, registry.clone()),
        required_and_optional(extractor, registry),
    ]
}

/// The default rule set minus whatever the config switches off.
pub fn rules_from_config(
    config: &TaglintConfig,
    extractor: Arc<dyn TagExtractor>,
    registry: Arc<dyn StabilityRegistry>,
) -> Vec<LintRule> {
    let mut rules = Vec::new();
    if config.rules.placement {
        rules.push(alpha_beta_prefix());
    }
    if config.rules.stability {
        let enabled = config.stability_enforced_types.iter().cloned().collect();
        rules.push(validation_stability(enabled, registry.clone()));
    }
    if config.rules.requiredness {
        rules.push(required_and_optional(extractor, registry));
    }
    rules
}

#[cfg(test)]
#[path = "rules_tests.rs"]
mod tests;
