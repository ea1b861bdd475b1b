use std::path::{Path, PathBuf};

use ignore::WalkBuilder;
use rayon::prelude::*;
use taglint_core::document::{load_graph, LoadedGraph};
use taglint_core::types::GraphError;

pub const IGNORE_FILE: &str = ".taglintignore";

/// Finds type graph documents (`*.json`) under a root.
pub struct GraphWalker {
    root: PathBuf,
}

impl GraphWalker {
    pub fn new(root: &Path) -> Self {
        Self {
            root: root.to_path_buf(),
        }
    }

    /// Documents under the root, sorted by path. A file root is returned as-is.
    pub fn walk(&self) -> Vec<PathBuf> {
        if self.root.is_file() {
            return vec![self.root.clone()];
        }

        let walker = WalkBuilder::new(&self.root)
            .hidden(true)
            .git_ignore(true)
            .git_global(false)
            .git_exclude(true)
            .add_custom_ignore_filename(IGNORE_FILE)
            .build();

        let mut entries = Vec::new();
        for result in walker {
            let entry = match result {
                Ok(e) => e,
                Err(e) => {
                    tracing::warn!(error = %e, "skipping unreadable entry");
                    continue;
                }
            };

            if !entry.file_type().is_some_and(|ft| ft.is_file()) {
                continue;
            }

            let path = entry.into_path();
            if is_graph_document(&path) {
                entries.push(path);
            }
        }

        entries.sort();
        entries
    }
}

fn is_graph_document(path: &Path) -> bool {
    path.extension().is_some_and(|ext| ext == "json")
        && path.file_name().is_some_and(|name| name != taglint_core::config::CONFIG_FILE)
}

/// Load every document in parallel. Output order matches `paths`.
pub fn load_all(paths: &[PathBuf]) -> Vec<(PathBuf, Result<LoadedGraph, GraphError>)> {
    paths
        .par_iter()
        .map(|path| {
            let loaded = load_graph(path);
            if let Err(e) = &loaded {
                tracing::warn!(path = %path.display(), error = %e, "failed to load graph document");
            }
            (path.clone(), loaded)
        })
        .collect()
}
