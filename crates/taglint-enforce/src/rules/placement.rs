use taglint_core::tags::Tag;

use crate::rule::{LintRule, RuleOutcome};

pub const RULE_NAME: &str = "alpha-beta-prefix";

/// `+k8s:alpha` and `+k8s:beta` gate the validation they carry, so they must
/// head a chain and must carry a tag payload.
pub fn alpha_beta_prefix() -> LintRule {
    LintRule::new(RULE_NAME, |_, tags| {
        for tag in tags {
            let outcome = check_alpha_beta_usage(tag, true)?;
            if outcome.is_some() {
                return Ok(outcome);
            }
        }
        Ok(None)
    })
}

fn check_alpha_beta_usage(tag: &Tag, is_root: bool) -> RuleOutcome {
    if tag.is_stability_wrapper() {
        if !is_root {
            return Ok(Some(format!("tag {:?} can't be used in between", tag.name)));
        }
        if tag.value_tag().is_none() {
            return Ok(Some(format!(
                "tag {:?} requires a validation tag as its value payload",
                tag.name
            )));
        }
    }

    match tag.value_tag() {
        Some(inner) => check_alpha_beta_usage(inner, false),
        None => Ok(None),
    }
}
