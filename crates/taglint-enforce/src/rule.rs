use std::collections::HashSet;

use taglint_core::tags::Tag;
use taglint_core::types::{TypeGraph, TypeId, TypeNode};
use taglint_parsers::extractor::ExtractError;

/// What a rule sees for one invocation.
///
/// `container` is the enclosing struct when a field is being checked, and
/// `None` when the type's own comment lines are being checked.
#[derive(Clone, Copy)]
pub struct RuleContext<'g> {
    pub graph: &'g TypeGraph,
    pub container: Option<TypeId>,
    pub target: TypeId,
}

impl<'g> RuleContext<'g> {
    pub fn new(graph: &'g TypeGraph, container: Option<TypeId>, target: TypeId) -> Self {
        Self {
            graph,
            container,
            target,
        }
    }

    pub fn target_node(&self) -> &'g TypeNode {
        self.graph.node(self.target)
    }

    pub fn container_node(&self) -> Option<&'g TypeNode> {
        self.container.map(|id| self.graph.node(id))
    }
}

/// `Ok(None)` passes, `Ok(Some(msg))` is a policy violation, `Err` aborts the pass.
pub type RuleOutcome = Result<Option<String>, RuleError>;

pub type RuleFn = dyn FnMut(&RuleContext<'_>, &[Tag]) -> RuleOutcome + Send;

/// A named policy check.
///
/// Rules may keep private memo state in their closure; that state lives as
/// long as the rule, so a rule set must not be shared between graphs.
pub struct LintRule {
    name: &'static str,
    check: Box<RuleFn>,
}

impl LintRule {
    pub fn new(
        name: &'static str,
        check: impl FnMut(&RuleContext<'_>, &[Tag]) -> RuleOutcome + Send + 'static,
    ) -> Self {
        Self {
            name,
            check: Box::new(check),
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn check(&mut self, ctx: &RuleContext<'_>, tags: &[Tag]) -> RuleOutcome {
        (self.check)(ctx, tags)
    }
}

impl std::fmt::Debug for LintRule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LintRule").field("name", &self.name).finish()
    }
}

/// Hard failures raised by a rule.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RuleError {
    /// Raised by custom rules to abort the pass. The built-in rules never return it.
    #[error("{0}")]
    Failed(String),

    #[error(transparent)]
    Extract(#[from] ExtractError),
}

/// Restrict `rule` to types named in `enabled`.
///
/// The enclosing struct decides when a field is checked; otherwise the type
/// itself does. An empty set turns the rule into a no-op.
pub fn filtered(enabled: HashSet<String>, mut rule: LintRule) -> LintRule {
    let name = rule.name;
    if enabled.is_empty() {
        return LintRule::new(name, |_, _| Ok(None));
    }
    LintRule::new(name, move |ctx, tags| {
        let scope = ctx.container_node().unwrap_or_else(|| ctx.target_node());
        if !enabled.contains(&scope.name.to_string()) {
            return Ok(None);
        }
        rule.check(ctx, tags)
    })
}
