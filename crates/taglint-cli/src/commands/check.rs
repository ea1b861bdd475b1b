use std::path::{Path, PathBuf};
use std::sync::Arc;

use taglint_core::config::TaglintConfig;
use taglint_enforce::check::{check_documents, registry_from_config};
use taglint_output::OutputFormatter;
use taglint_parsers::comment_tags::CommentTagParser;
use taglint_parsers::walker::{load_all, GraphWalker};

/// Run `taglint check [PATHS...]` and return the process exit code.
pub fn run(
    formatter: &dyn OutputFormatter,
    verbose: bool,
    paths: Vec<PathBuf>,
    enabled_types: Vec<String>,
    config_dir: Option<PathBuf>,
) -> i32 {
    let config_dir = match config_dir.map_or_else(std::env::current_dir, Ok) {
        Ok(p) => p,
        Err(e) => {
            eprintln!("taglint check: failed to get current directory: {}", e);
            return 2;
        }
    };
    let config = load_config(&config_dir, enabled_types);

    let roots = if paths.is_empty() {
        vec![PathBuf::from(".")]
    } else {
        paths
    };
    let documents = match collect_documents(&roots) {
        Ok(docs) => docs,
        Err(missing) => {
            eprintln!("taglint check: no such file or directory: {}", missing.display());
            return 2;
        }
    };
    if documents.is_empty() {
        tracing::warn!("no type graph documents found");
    }

    let extractor = Arc::new(CommentTagParser::new(config.tag_prefixes.iter().cloned()));
    let registry = Arc::new(registry_from_config(&config));
    let result = check_documents(load_all(&documents), &config, extractor, registry);

    if verbose {
        eprintln!(
            "taglint check: {} file(s), {} diagnostic(s), {} failure(s)",
            result.files_analyzed.len(),
            result.diagnostics.len(),
            result.failures.len(),
        );
    }

    let output = formatter.format_check(&result);
    if !output.is_empty() {
        println!("{}", output);
    }
    result.exit_code()
}

/// Config from `dir`, with command-line stability types added to the configured ones.
pub(crate) fn load_config(dir: &Path, enabled_types: Vec<String>) -> TaglintConfig {
    let mut config = TaglintConfig::load(dir);
    for ty in enabled_types {
        if !config.stability_enforced_types.contains(&ty) {
            config.stability_enforced_types.push(ty);
        }
    }
    config
}

/// Expand each root into its documents, keeping root order and dropping repeats.
///
/// Returns the first root that does not exist.
pub(crate) fn collect_documents(roots: &[PathBuf]) -> Result<Vec<PathBuf>, PathBuf> {
    let mut seen = std::collections::HashSet::new();
    let mut documents = Vec::new();
    for root in roots {
        if !root.exists() {
            return Err(root.clone());
        }
        for path in GraphWalker::new(root).walk() {
            if seen.insert(path.clone()) {
                documents.push(path);
            }
        }
    }
    Ok(documents)
}
