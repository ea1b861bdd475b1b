//! Whole-run checking: lint every loaded graph and fold the outcomes into one report.

use std::path::PathBuf;
use std::sync::Arc;

use rayon::prelude::*;
use taglint_core::config::TaglintConfig;
use taglint_core::document::LoadedGraph;
use taglint_core::types::GraphError;
use taglint_parsers::extractor::TagExtractor;

use crate::engine::Linter;
use crate::registry::{StabilityRegistry, StaticRegistry};
use crate::rules::rules_from_config;
use crate::types::{CheckResult, DiagnosticRecord, Failure, TagInfo, TagsResult};

/// The builtin registry with the config's overrides applied.
pub fn registry_from_config(config: &TaglintConfig) -> StaticRegistry {
    StaticRegistry::builtin().with_overrides(&config.stability_overrides)
}

/// Lint each document independently and merge the results in input order.
///
/// Every graph gets its own rule set, since rule memo state is keyed by
/// graph-local ids. A document that failed to load, or whose pass aborted,
/// becomes a failure; diagnostics found before an abort are still reported.
pub fn check_documents(
    docs: Vec<(PathBuf, Result<LoadedGraph, GraphError>)>,
    config: &TaglintConfig,
    extractor: Arc<dyn TagExtractor>,
    registry: Arc<dyn StabilityRegistry>,
) -> CheckResult {
    let per_file: Vec<(String, Vec<DiagnosticRecord>, Option<Failure>)> = docs
        .into_par_iter()
        .map(|(path, loaded)| {
            let file = path.display().to_string();
            match loaded {
                Ok(loaded) => {
                    check_graph(&file, &loaded, config, extractor.clone(), registry.clone())
                }
                Err(e) => {
                    tracing::warn!(file = %file, error = %e, "failed to load type graph");
                    let failure = Failure {
                        file: file.clone(),
                        message: e.to_string(),
                    };
                    (file, Vec::new(), Some(failure))
                }
            }
        })
        .collect();

    let mut files_analyzed = Vec::with_capacity(per_file.len());
    let mut diagnostics = Vec::new();
    let mut failures = Vec::new();
    for (file, records, failure) in per_file {
        files_analyzed.push(file);
        diagnostics.extend(records);
        failures.extend(failure);
    }

    let status = if !failures.is_empty() {
        "error"
    } else if !diagnostics.is_empty() {
        "violations"
    } else {
        "ok"
    };

    CheckResult {
        version: env!("CARGO_PKG_VERSION").to_string(),
        command: "check".to_string(),
        status: status.to_string(),
        files_analyzed,
        diagnostics,
        failures,
    }
}

fn check_graph(
    file: &str,
    loaded: &LoadedGraph,
    config: &TaglintConfig,
    extractor: Arc<dyn TagExtractor>,
    registry: Arc<dyn StabilityRegistry>,
) -> (String, Vec<DiagnosticRecord>, Option<Failure>) {
    let rules = rules_from_config(config, extractor.clone(), registry);
    let mut linter = Linter::new(&loaded.graph, extractor, rules);
    let outcome = linter.lint_all(&loaded.roots);

    tracing::debug!(
        file,
        types = loaded.graph.len(),
        diagnostics = outcome.diagnostic_count(),
        "linted type graph"
    );

    let records = outcome
        .iter()
        .map(|d| DiagnosticRecord {
            file: file.to_string(),
            type_name: d.type_name.clone(),
            field: d.field.clone(),
            rule: d.rule.clone(),
            message: d.message.clone(),
        })
        .collect();
    let failure = outcome.error.map(|e| Failure {
        file: file.to_string(),
        message: e.to_string(),
    });
    (file.to_string(), records, failure)
}

/// Every registered tag with its stability level, sorted by name.
pub fn tags_result(registry: &StaticRegistry) -> TagsResult {
    TagsResult {
        version: env!("CARGO_PKG_VERSION").to_string(),
        command: "tags".to_string(),
        tags: registry
            .entries()
            .map(|(name, stability)| TagInfo {
                name: name.to_string(),
                stability,
            })
            .collect(),
    }
}
