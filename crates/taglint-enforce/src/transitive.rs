//! Cycle-safe "does anything reachable from this type carry validation?"
//!
//! Each node is in one of three states: absent (never visited), in progress
//! (on the current call stack), or resolved. Meeting an in-progress node is a
//! back edge: it answers `false` and reports the cycle. A `true` answer is
//! always final and cached. A `false` answer that depended on a back edge is
//! not cached, so a later query from another entry point recomputes it.

use std::collections::HashMap;
use std::sync::Arc;

use taglint_core::types::{TypeGraph, TypeId, TypeShape};
use taglint_parsers::extractor::{ExtractContext, TagExtractor};

use crate::registry::StabilityRegistry;
use crate::rules::tag_query::has_any_validation_tag;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CacheState {
    InProgress,
    Resolved(bool),
}

/// Result of one query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Probe {
    pub found: bool,
    /// A back edge was cut while computing this answer.
    pub cycle: bool,
}

impl Probe {
    /// Fold a child's answer in. A child's cycle only matters when it found nothing.
    fn absorb(&mut self, child: Probe) {
        if child.found {
            self.found = true;
        } else if child.cycle {
            self.cycle = true;
        }
    }
}

pub struct TransitiveValidation {
    extractor: Arc<dyn TagExtractor>,
    registry: Arc<dyn StabilityRegistry>,
    cache: HashMap<TypeId, CacheState>,
}

impl TransitiveValidation {
    pub fn new(extractor: Arc<dyn TagExtractor>, registry: Arc<dyn StabilityRegistry>) -> Self {
        Self {
            extractor,
            registry,
            cache: HashMap::new(),
        }
    }

    /// The cached answer for `id`, if one has been resolved.
    pub fn cached(&self, id: TypeId) -> Option<bool> {
        match self.cache.get(&id) {
            Some(CacheState::Resolved(found)) => Some(*found),
            _ => None,
        }
    }

    pub fn check(&mut self, graph: &TypeGraph, id: TypeId) -> Probe {
        match self.cache.get(&id) {
            Some(CacheState::Resolved(found)) => {
                return Probe {
                    found: *found,
                    cycle: false,
                }
            }
            Some(CacheState::InProgress) => {
                return Probe {
                    found: false,
                    cycle: true,
                }
            }
            None => {}
        }

        self.cache.insert(id, CacheState::InProgress);
        let node = graph.node(id);
        let scope = node.name.to_string();
        let mut probe = Probe {
            found: self.lines_have_validation(&scope, &node.comment_lines),
            cycle: false,
        };

        match &node.shape {
            TypeShape::Scalar => {}
            TypeShape::Alias { underlying } => {
                let child = self.check(graph, *underlying);
                probe.absorb(child);
            }
            TypeShape::Struct { members } => {
                for member in members {
                    let member_scope = format!("{}.{}", scope, member.name);
                    if self.lines_have_validation(&member_scope, &member.comment_lines) {
                        probe.found = true;
                    }
                    let child = self.check(graph, member.ty);
                    probe.absorb(child);
                }
            }
            TypeShape::Pointer { elem }
            | TypeShape::Slice { elem }
            | TypeShape::Array { elem, .. } => {
                let child = self.check(graph, *elem);
                probe.absorb(child);
            }
            TypeShape::Map { key, elem } => {
                let child = self.check(graph, *key);
                probe.absorb(child);
                let child = self.check(graph, *elem);
                probe.absorb(child);
            }
        }

        if probe.found || !probe.cycle {
            self.cache.insert(id, CacheState::Resolved(probe.found));
        } else {
            self.cache.remove(&id);
        }
        probe
    }

    /// Extraction failures count as "no validation here".
    fn lines_have_validation(&self, scope: &str, lines: &[String]) -> bool {
        if lines.is_empty() {
            return false;
        }
        match self.extractor.extract(&ExtractContext::new(scope), lines) {
            Ok(tags) => has_any_validation_tag(&tags, self.registry.as_ref()),
            Err(e) => {
                tracing::debug!(scope, error = %e, "ignoring unextractable tags");
                false
            }
        }
    }
}

#[cfg(test)]
#[path = "transitive_tests.rs"]
mod tests;
