
use std::fs;
use std::path::PathBuf;
use std::process::Command;

use taglint_core::types::{Member, TypeGraph, TypeId, TypeName, TypeShape};
use tempfile::TempDir;

/// Small helper for building type graphs by hand.
#[allow(dead_code)]
#[derive(Default)]
pub struct GraphBuilder {
    pub graph: TypeGraph,
}

#[allow(dead_code)]
impl GraphBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn scalar(&mut self, name: &str, comments: &[&str]) -> TypeId {
        self.decl(name, TypeShape::Scalar, comments)
    }

    pub fn pointer(&mut self, name: &str, elem: TypeId) -> TypeId {
        self.decl(name, TypeShape::Pointer { elem }, &[])
    }

    pub fn slice(&mut self, name: &str, elem: TypeId) -> TypeId {
        self.decl(name, TypeShape::Slice { elem }, &[])
    }

    pub fn map(&mut self, name: &str, key: TypeId, elem: TypeId) -> TypeId {
        self.decl(name, TypeShape::Map { key, elem }, &[])
    }

    pub fn alias(&mut self, name: &str, underlying: TypeId) -> TypeId {
        self.decl(name, TypeShape::Alias { underlying }, &[])
    }

    /// `fields` is `(name, type, comment lines)`.
    pub fn structure(
        &mut self,
        name: &str,
        comments: &[&str],
        fields: &[(&str, TypeId, &[&str])],
    ) -> TypeId {
        self.decl(name, TypeShape::Struct { members: members(fields) }, comments)
    }

    /// Give a forward-declared placeholder its struct shape, closing a cycle.
    pub fn close_struct(&mut self, id: TypeId, fields: &[(&str, TypeId, &[&str])]) {
        self.graph
            .set_shape(id, TypeShape::Struct { members: members(fields) })
            .unwrap();
    }

    pub fn decl(&mut self, name: &str, shape: TypeShape, comments: &[&str]) -> TypeId {
        self.graph.insert(
            TypeName::parse(name),
            shape,
            comments.iter().map(|c| c.to_string()),
        )
    }
}

fn members(fields: &[(&str, TypeId, &[&str])]) -> Vec<Member> {
    fields
        .iter()
        .map(|(name, ty, comments)| Member::new(*name, *ty).with_comments(comments.iter().copied()))
        .collect()
}

/// Get path to compiled taglint binary.
///
/// Builds the binary if it doesn't exist yet.
#[allow(dead_code)]
pub fn taglint_bin() -> PathBuf {
    let mut path = std::env::current_exe().unwrap();
    path.pop(); // remove test binary name
    path.pop(); // remove 'deps'
    path.push("taglint");
    if !path.exists() {
        let status = Command::new("cargo")
            .args(["build", "-p", "taglint-cli"])
            .status()
            .expect("Failed to build taglint");
        assert!(status.success(), "Failed to build taglint binary");
    }
    path
}

/// Create a project directory from a set of files.
///
/// Each entry in `files` is `(relative_path, content)`.
/// Returns (TempDir, project_root). Hold the TempDir to keep the directory alive.
#[allow(dead_code)]
pub fn create_project(files: &[(&str, &str)]) -> (TempDir, PathBuf) {
    let dir = TempDir::new().unwrap();
    let root = dir.path();

    for (path, content) in files {
        let full_path = root.join(path);
        if let Some(parent) = full_path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(&full_path, content).unwrap();
    }

    let project_root = root.to_path_buf();
    (dir, project_root)
}

/// A document whose only field carries validation but no requiredness tag.
#[allow(dead_code)]
pub const VIOLATING_DOC: &str = r#"{
  "types": [
    {"name": "apps.Spec", "kind": "struct", "members": [
      {"name": "Replicas", "type": "apps.IntPtr", "comments": ["+k8s:minimum=0"]}
    ]},
    {"name": "apps.IntPtr", "kind": "pointer", "elem": "int32"}
  ]
}"#;

/// The same shape as [`VIOLATING_DOC`], with the field marked optional.
#[allow(dead_code)]
pub const CLEAN_DOC: &str = r#"{
  "types": [
    {"name": "apps.Spec", "kind": "struct", "members": [
      {"name": "Replicas", "type": "apps.IntPtr", "comments": ["+k8s:optional", "+k8s:minimum=0"]}
    ]},
    {"name": "apps.IntPtr", "kind": "pointer", "elem": "int32"}
  ]
}"#;
