use std::collections::{BTreeMap, HashSet};
use std::sync::Arc;

use taglint_core::types::{TypeGraph, TypeId, TypeShape};
use taglint_parsers::extractor::{ExtractContext, TagExtractor};

use crate::rule::{LintRule, RuleContext};
use crate::types::{Diagnostic, Finding, LintError, LintOutcome};

/// Walks one type graph and applies an ordered rule set to every declaration.
///
/// A linter is bound to one graph for its whole life: rules carry memo state
/// keyed by `TypeId`, which means nothing in another graph.
pub struct Linter<'g> {
    graph: &'g TypeGraph,
    extractor: Arc<dyn TagExtractor>,
    rules: Vec<LintRule>,
    linted: HashSet<TypeId>,
    diagnostics: BTreeMap<TypeId, Vec<Diagnostic>>,
}

impl<'g> Linter<'g> {
    pub fn new(
        graph: &'g TypeGraph,
        extractor: Arc<dyn TagExtractor>,
        rules: Vec<LintRule>,
    ) -> Self {
        Self {
            graph,
            extractor,
            rules,
            linted: HashSet::new(),
            diagnostics: BTreeMap::new(),
        }
    }

    /// Lint everything reachable from `root`.
    pub fn lint(&mut self, root: TypeId) -> LintOutcome {
        self.lint_all(&[root])
    }

    /// Lint everything reachable from any of `roots` in one pass.
    ///
    /// Each call starts a fresh pass, so repeating it yields the same diagnostics.
    pub fn lint_all(&mut self, roots: &[TypeId]) -> LintOutcome {
        self.linted.clear();
        self.diagnostics.clear();

        let mut error = None;
        for &root in roots {
            if let Err(e) = self.lint_type(root) {
                tracing::debug!(
                    root = %self.graph.node(root).name,
                    error = %e,
                    "lint pass aborted"
                );
                error = Some(e);
                break;
            }
        }

        LintOutcome {
            diagnostics: std::mem::take(&mut self.diagnostics),
            error,
        }
    }

    fn lint_type(&mut self, id: TypeId) -> Result<(), LintError> {
        if !self.linted.insert(id) {
            return Ok(());
        }
        let graph = self.graph;
        let node = graph.node(id);
        tracing::debug!(ty = %node.name, kind = %node.kind(), "linting type");

        if !node.comment_lines.is_empty() {
            self.check_node(id, None, None, id, &node.comment_lines)?;
        }

        match &node.shape {
            TypeShape::Scalar => {}
            TypeShape::Alias { underlying } => self.lint_type(*underlying)?,
            TypeShape::Struct { members } => {
                for member in members {
                    self.check_node(
                        id,
                        Some(member.name.as_str()),
                        Some(id),
                        member.ty,
                        &member.comment_lines,
                    )?;
                    self.lint_type(member.ty)?;
                }
            }
            TypeShape::Pointer { elem }
            | TypeShape::Slice { elem }
            | TypeShape::Array { elem, .. } => self.lint_type(*elem)?,
            TypeShape::Map { key, elem } => {
                self.lint_type(*key)?;
                self.lint_type(*elem)?;
            }
        }
        Ok(())
    }

    /// Run the rules and record findings under `owner`, keeping findings from
    /// rules that ran before a failing one.
    fn check_node(
        &mut self,
        owner: TypeId,
        field: Option<&str>,
        container: Option<TypeId>,
        target: TypeId,
        lines: &[String],
    ) -> Result<(), LintError> {
        let mut findings = Vec::new();
        let result = self.apply_rules(container, target, field, lines, &mut findings);
        for finding in findings {
            self.record(owner, field, finding);
        }
        result
    }

    /// Extract tags from `lines` and run every rule against them, in order.
    ///
    /// `container` is the enclosing struct when `lines` belong to a field.
    /// Stops at the first rule that fails.
    pub fn lint_comments(
        &mut self,
        container: Option<TypeId>,
        target: TypeId,
        lines: &[String],
    ) -> Result<Vec<Finding>, LintError> {
        let mut findings = Vec::new();
        self.apply_rules(container, target, None, lines, &mut findings)?;
        Ok(findings)
    }

    fn apply_rules(
        &mut self,
        container: Option<TypeId>,
        target: TypeId,
        field: Option<&str>,
        lines: &[String],
        findings: &mut Vec<Finding>,
    ) -> Result<(), LintError> {
        let scope = self.scope(container, target, field);
        let tags = self
            .extractor
            .extract(&ExtractContext::new(scope.clone()), lines)?;

        let ctx = RuleContext::new(self.graph, container, target);
        for rule in &mut self.rules {
            match rule.check(&ctx, &tags) {
                Ok(Some(message)) => findings.push(Finding {
                    rule: rule.name(),
                    message,
                }),
                Ok(None) => {}
                Err(source) => {
                    return Err(LintError::Rule {
                        rule: rule.name(),
                        scope,
                        source,
                    })
                }
            }
        }
        Ok(())
    }

    fn scope(&self, container: Option<TypeId>, target: TypeId, field: Option<&str>) -> String {
        match (container, field) {
            (Some(owner), Some(field)) => format!("{}.{}", self.graph.node(owner).name, field),
            _ => self.graph.node(target).name.to_string(),
        }
    }

    fn record(&mut self, owner: TypeId, field: Option<&str>, finding: Finding) {
        let diagnostic = Diagnostic {
            type_id: owner,
            type_name: self.graph.node(owner).name.to_string(),
            field: field.map(str::to_string),
            rule: finding.rule.to_string(),
            message: finding.message,
        };
        self.diagnostics.entry(owner).or_default().push(diagnostic);
    }
}

#[cfg(test)]
#[path = "engine_tests.rs"]
mod tests;
