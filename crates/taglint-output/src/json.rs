use crate::OutputFormatter;
use taglint_enforce::types::{CheckResult, TagsResult};

pub struct JsonFormatter;

impl OutputFormatter for JsonFormatter {
    fn format_check(&self, result: &CheckResult) -> String {
        serde_json::to_string_pretty(result).unwrap_or_default()
    }
    fn format_tags(&self, result: &TagsResult) -> String {
        serde_json::to_string_pretty(result).unwrap_or_default()
    }
}
