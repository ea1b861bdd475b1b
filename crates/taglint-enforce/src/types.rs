use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use taglint_core::tags::StabilityLevel;
use taglint_core::types::TypeId;
use taglint_parsers::extractor::ExtractError;

use crate::rule::RuleError;

/// One rule's verdict on one block of comment lines.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Finding {
    pub rule: &'static str,
    pub message: String,
}

/// A policy violation attached to a type.
///
/// Field violations are attached to the enclosing struct and name the field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    pub type_id: TypeId,
    pub type_name: String,
    pub field: Option<String>,
    pub rule: String,
    pub message: String,
}

impl std::fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.field {
            Some(field) => write!(f, "field {}: {}", field, self.message),
            None => f.write_str(&self.message),
        }
    }
}

/// Fatal engine failures. These abort a lint pass; they are never diagnostics.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LintError {
    #[error("extracting tags: {0}")]
    Extract(#[from] ExtractError),

    #[error("rule {rule} failed on {scope}: {source}")]
    Rule {
        rule: &'static str,
        scope: String,
        #[source]
        source: RuleError,
    },
}

/// Everything one lint pass produced.
///
/// When `error` is set the pass stopped early; `diagnostics` still holds what
/// was found before the failure.
#[derive(Debug, Default)]
pub struct LintOutcome {
    pub diagnostics: BTreeMap<TypeId, Vec<Diagnostic>>,
    pub error: Option<LintError>,
}

impl LintOutcome {
    pub fn is_clean(&self) -> bool {
        self.error.is_none() && self.diagnostics.is_empty()
    }

    pub fn diagnostic_count(&self) -> usize {
        self.diagnostics.values().map(Vec::len).sum()
    }

    /// Diagnostics for one type, in the order they were found.
    pub fn for_type(&self, id: TypeId) -> &[Diagnostic] {
        self.diagnostics.get(&id).map_or(&[], Vec::as_slice)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics.values().flatten()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckResult {
    pub version: String,
    pub command: String,
    pub status: String, // "ok" | "violations" | "error"
    pub files_analyzed: Vec<String>,
    pub diagnostics: Vec<DiagnosticRecord>,
    pub failures: Vec<Failure>,
}

impl CheckResult {
    pub fn exit_code(&self) -> i32 {
        match self.status.as_str() {
            "ok" => 0,
            "violations" => 1,
            _ => 2,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiagnosticRecord {
    pub file: String,
    pub type_name: String,
    pub field: Option<String>,
    pub rule: String,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Failure {
    pub file: String,
    pub message: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TagsResult {
    pub version: String,
    pub command: String,
    pub tags: Vec<TagInfo>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TagInfo {
    pub name: String,
    pub stability: StabilityLevel,
}
