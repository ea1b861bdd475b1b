//! JSON type graph documents.
//!
//! A document lists declarations by qualified name. References may point
//! forward, backward, or at the declaring type itself, so loading happens in
//! two passes: every name gets an id first, then shapes are wired up.

use std::collections::HashMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::types::{GraphError, Member, TypeGraph, TypeId, TypeKind, TypeName, TypeShape};

/// Builtin scalar names that documents may reference without declaring.
pub const BUILTIN_SCALARS: &[&str] = &[
    "bool", "string", "byte", "rune", "int", "int8", "int16", "int32", "int64", "uint",
    "uint8", "uint16", "uint32", "uint64", "uintptr", "float32", "float64", "complex64",
    "complex128", "any", "error",
];

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GraphDocument {
    /// Types to start linting from. Empty means every declared type.
    #[serde(default)]
    pub roots: Vec<String>,
    pub types: Vec<TypeDecl>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TypeDecl {
    pub name: String,
    pub kind: String,
    #[serde(default)]
    pub comments: Vec<String>,
    #[serde(default)]
    pub members: Vec<MemberDecl>,
    #[serde(default)]
    pub elem: Option<String>,
    #[serde(default)]
    pub key: Option<String>,
    #[serde(default)]
    pub underlying: Option<String>,
    #[serde(default)]
    pub len: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MemberDecl {
    pub name: String,
    #[serde(rename = "type")]
    pub ty: String,
    #[serde(default)]
    pub comments: Vec<String>,
}

/// A loaded graph plus the roots the document asked for.
#[derive(Debug, Clone)]
pub struct LoadedGraph {
    pub graph: TypeGraph,
    pub roots: Vec<TypeId>,
}

impl GraphDocument {
    pub fn from_json(content: &str) -> Result<Self, GraphError> {
        Ok(serde_json::from_str(content)?)
    }

    pub fn read(path: &Path) -> Result<Self, GraphError> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| GraphError::Decode(format!("{}: {}", path.display(), e)))?;
        Self::from_json(&content)
    }

    /// Build the arena graph described by this document.
    pub fn into_graph(self) -> Result<LoadedGraph, GraphError> {
        let mut graph = TypeGraph::new();
        let mut ids: HashMap<String, TypeId> = HashMap::new();

        for decl in &self.types {
            if ids.contains_key(&decl.name) {
                return Err(GraphError::DuplicateType(decl.name.clone()));
            }
            let id = graph.insert(
                TypeName::parse(&decl.name),
                TypeShape::Scalar,
                decl.comments.iter().cloned(),
            );
            ids.insert(decl.name.clone(), id);
        }

        let declared: Vec<TypeId> = self.types.iter().map(|d| ids[&d.name]).collect();

        for decl in &self.types {
            let kind: TypeKind = decl.kind.parse()?;
            let shape = build_shape(&mut graph, &mut ids, decl, kind)?;
            graph.set_shape(ids[&decl.name], shape)?;
        }

        let roots = if self.roots.is_empty() {
            declared
        } else {
            self.roots
                .iter()
                .map(|r| {
                    ids.get(r)
                        .copied()
                        .ok_or_else(|| GraphError::UnknownType(r.clone()))
                })
                .collect::<Result<Vec<_>, _>>()?
        };

        tracing::debug!(types = graph.len(), roots = roots.len(), "loaded type graph");
        Ok(LoadedGraph { graph, roots })
    }
}

/// Convenience: read and build in one step.
pub fn load_graph(path: &Path) -> Result<LoadedGraph, GraphError> {
    GraphDocument::read(path)?.into_graph()
}

fn build_shape(
    graph: &mut TypeGraph,
    ids: &mut HashMap<String, TypeId>,
    decl: &TypeDecl,
    kind: TypeKind,
) -> Result<TypeShape, GraphError> {
    let required = |field: &'static str, value: &Option<String>| -> Result<String, GraphError> {
        value.clone().ok_or_else(|| GraphError::MissingField {
            name: decl.name.clone(),
            kind,
            field,
        })
    };

    let shape = match kind {
        TypeKind::Scalar => TypeShape::Scalar,
        TypeKind::Struct => {
            let mut members = Vec::with_capacity(decl.members.len());
            for m in &decl.members {
                let ty = resolve(graph, ids, &m.ty)?;
                members.push(Member::new(&m.name, ty).with_comments(m.comments.iter().cloned()));
            }
            TypeShape::Struct { members }
        }
        TypeKind::Pointer => TypeShape::Pointer {
            elem: resolve(graph, ids, &required("elem", &decl.elem)?)?,
        },
        TypeKind::Slice => TypeShape::Slice {
            elem: resolve(graph, ids, &required("elem", &decl.elem)?)?,
        },
        TypeKind::Array => TypeShape::Array {
            elem: resolve(graph, ids, &required("elem", &decl.elem)?)?,
            len: decl.len.unwrap_or(0),
        },
        TypeKind::Map => TypeShape::Map {
            key: resolve(graph, ids, &required("key", &decl.key)?)?,
            elem: resolve(graph, ids, &required("elem", &decl.elem)?)?,
        },
        TypeKind::Alias => TypeShape::Alias {
            underlying: resolve(graph, ids, &required("underlying", &decl.underlying)?)?,
        },
    };
    Ok(shape)
}

fn resolve(
    graph: &mut TypeGraph,
    ids: &mut HashMap<String, TypeId>,
    name: &str,
) -> Result<TypeId, GraphError> {
    if let Some(id) = ids.get(name) {
        return Ok(*id);
    }
    if BUILTIN_SCALARS.contains(&name) {
        let id = graph.insert(TypeName::new("", name), TypeShape::Scalar, Vec::<String>::new());
        ids.insert(name.to_string(), id);
        return Ok(id);
    }
    Err(GraphError::UnknownType(name.to_string()))
}
