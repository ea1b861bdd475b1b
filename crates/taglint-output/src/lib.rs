//! Output formatters for taglint command results.
//!
//! Provides two output modes:
//! - **JSON** (`--json`): Machine-readable structured output
//! - **Human** (default): One line per diagnostic plus a summary

pub mod human;
pub mod json;

use taglint_enforce::types::{CheckResult, TagsResult};

pub trait OutputFormatter {
    fn format_check(&self, result: &CheckResult) -> String;
    fn format_tags(&self, result: &TagsResult) -> String;
}
