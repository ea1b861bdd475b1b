use crate::OutputFormatter;
use taglint_enforce::types::{CheckResult, DiagnosticRecord, TagsResult};

pub struct HumanFormatter;

impl OutputFormatter for HumanFormatter {
    fn format_check(&self, result: &CheckResult) -> String {
        if result.diagnostics.is_empty() && result.failures.is_empty() {
            return String::new(); // Clean check = empty stdout
        }

        let mut out = String::new();

        for d in &result.diagnostics {
            out.push_str(&format_diagnostic(d));
        }
        for f in &result.failures {
            out.push_str(&format!("{}: error: {}\n", f.file, f.message));
        }

        out.push_str(&format!(
            "\n{} diagnostic(s), {} failure(s) in {} file(s)\n",
            result.diagnostics.len(),
            result.failures.len(),
            result.files_analyzed.len(),
        ));

        out
    }

    fn format_tags(&self, result: &TagsResult) -> String {
        let width = result.tags.iter().map(|t| t.name.len()).max().unwrap_or(0);
        let mut out = String::new();
        for t in &result.tags {
            out.push_str(&format!("{:<width$}  {}\n", t.name, t.stability, width = width));
        }
        out
    }
}

fn format_diagnostic(d: &DiagnosticRecord) -> String {
    match &d.field {
        Some(field) => format!(
            "{}: {}: field {}: {} [{}]\n",
            d.file, d.type_name, field, d.message, d.rule
        ),
        None => format!("{}: {}: {} [{}]\n", d.file, d.type_name, d.message, d.rule),
    }
}
