use std::collections::HashSet;

use serde::{Deserialize, Serialize};

/// Stable identity of a declaration inside a [`TypeGraph`].
///
/// Two structurally identical declarations inserted separately get distinct ids,
/// so caches keyed by `TypeId` never conflate them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct TypeId(u32);

impl TypeId {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl std::fmt::Display for TypeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Fully qualified declaration name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TypeName {
    pub package: String,
    pub name: String,
}

impl TypeName {
    pub fn new(package: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            package: package.into(),
            name: name.into(),
        }
    }

    /// Split `k8s.io/api/core/v1.Pod` into package and name at the last dot.
    pub fn parse(qualified: &str) -> Self {
        match qualified.rsplit_once('.') {
            Some((package, name)) => Self::new(package, name),
            None => Self::new("", qualified),
        }
    }
}

impl std::fmt::Display for TypeName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.package.is_empty() {
            f.write_str(&self.name)
        } else {
            write!(f, "{}.{}", self.package, self.name)
        }
    }
}

/// Kind discriminant of a [`TypeShape`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TypeKind {
    Scalar,
    Struct,
    Pointer,
    Slice,
    Array,
    Map,
    Alias,
}

impl TypeKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            TypeKind::Scalar => "scalar",
            TypeKind::Struct => "struct",
            TypeKind::Pointer => "pointer",
            TypeKind::Slice => "slice",
            TypeKind::Array => "array",
            TypeKind::Map => "map",
            TypeKind::Alias => "alias",
        }
    }
}

impl std::fmt::Display for TypeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for TypeKind {
    type Err = GraphError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "scalar" | "builtin" => Ok(TypeKind::Scalar),
            "struct" => Ok(TypeKind::Struct),
            "pointer" => Ok(TypeKind::Pointer),
            "slice" => Ok(TypeKind::Slice),
            "array" => Ok(TypeKind::Array),
            "map" => Ok(TypeKind::Map),
            "alias" => Ok(TypeKind::Alias),
            other => Err(GraphError::InvalidKind(other.to_string())),
        }
    }
}

/// A struct field: its name, its own comment lines, and its declared type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Member {
    pub name: String,
    pub comment_lines: Vec<String>,
    pub ty: TypeId,
}

impl Member {
    pub fn new(name: impl Into<String>, ty: TypeId) -> Self {
        Self {
            name: name.into(),
            comment_lines: Vec::new(),
            ty,
        }
    }

    pub fn with_comments<S: Into<String>>(mut self, lines: impl IntoIterator<Item = S>) -> Self {
        self.comment_lines = lines.into_iter().map(Into::into).collect();
        self
    }
}

/// Kind-specific children of a declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeShape {
    Scalar,
    Struct { members: Vec<Member> },
    Pointer { elem: TypeId },
    Slice { elem: TypeId },
    Array { elem: TypeId, len: u64 },
    Map { key: TypeId, elem: TypeId },
    Alias { underlying: TypeId },
}

impl TypeShape {
    pub fn kind(&self) -> TypeKind {
        match self {
            TypeShape::Scalar => TypeKind::Scalar,
            TypeShape::Struct { .. } => TypeKind::Struct,
            TypeShape::Pointer { .. } => TypeKind::Pointer,
            TypeShape::Slice { .. } => TypeKind::Slice,
            TypeShape::Array { .. } => TypeKind::Array,
            TypeShape::Map { .. } => TypeKind::Map,
            TypeShape::Alias { .. } => TypeKind::Alias,
        }
    }
}

/// One declaration in the graph.
#[derive(Debug, Clone)]
pub struct TypeNode {
    pub id: TypeId,
    pub name: TypeName,
    pub comment_lines: Vec<String>,
    pub shape: TypeShape,
}

impl TypeNode {
    pub fn kind(&self) -> TypeKind {
        self.shape.kind()
    }

    pub fn members(&self) -> &[Member] {
        match &self.shape {
            TypeShape::Struct { members } => members,
            _ => &[],
        }
    }
}

/// Arena of type declarations. Edges are `TypeId`s, so cycles are plain data.
///
/// The graph is built once by a loader and then only read; the lint engine
/// borrows it immutably for the whole pass.
#[derive(Debug, Clone, Default)]
pub struct TypeGraph {
    nodes: Vec<TypeNode>,
}

impl TypeGraph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert<S: Into<String>>(
        &mut self,
        name: TypeName,
        shape: TypeShape,
        comment_lines: impl IntoIterator<Item = S>,
    ) -> TypeId {
        let id = TypeId(self.nodes.len() as u32);
        self.nodes.push(TypeNode {
            id,
            name,
            comment_lines: comment_lines.into_iter().map(Into::into).collect(),
            shape,
        });
        id
    }

    /// Replace a node's shape. Used to close cycles: declare first, wire children after.
    pub fn set_shape(&mut self, id: TypeId, shape: TypeShape) -> Result<(), GraphError> {
        let node = self
            .nodes
            .get_mut(id.index())
            .ok_or(GraphError::DanglingId(id))?;
        node.shape = shape;
        Ok(())
    }

    /// Replace a node's comment lines.
    pub fn set_comments<S: Into<String>>(
        &mut self,
        id: TypeId,
        lines: impl IntoIterator<Item = S>,
    ) -> Result<(), GraphError> {
        let node = self
            .nodes
            .get_mut(id.index())
            .ok_or(GraphError::DanglingId(id))?;
        node.comment_lines = lines.into_iter().map(Into::into).collect();
        Ok(())
    }

    /// Look up a node. Ids are only minted by this graph, so a miss is a caller bug.
    pub fn node(&self, id: TypeId) -> &TypeNode {
        &self.nodes[id.index()]
    }

    pub fn get(&self, id: TypeId) -> Option<&TypeNode> {
        self.nodes.get(id.index())
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &TypeNode> {
        self.nodes.iter()
    }

    /// Find the first node whose rendered name matches `qualified`.
    pub fn find(&self, qualified: &str) -> Option<TypeId> {
        self.nodes
            .iter()
            .find(|n| n.name.to_string() == qualified)
            .map(|n| n.id)
    }

    /// Follow an alias chain down to the first non-alias node.
    ///
    /// A cyclic alias chain stops at the node that would repeat.
    pub fn resolve_alias(&self, id: TypeId) -> TypeId {
        let mut seen = HashSet::new();
        let mut current = id;
        while let TypeShape::Alias { underlying } = self.node(current).shape {
            if !seen.insert(current) {
                break;
            }
            current = underlying;
        }
        current
    }

    /// Structural successors in declaration order: alias underlying, member
    /// types, element, or key then element.
    pub fn children(&self, id: TypeId) -> Vec<TypeId> {
        match &self.node(id).shape {
            TypeShape::Scalar => Vec::new(),
            TypeShape::Struct { members } => members.iter().map(|m| m.ty).collect(),
            TypeShape::Pointer { elem }
            | TypeShape::Slice { elem }
            | TypeShape::Array { elem, .. } => vec![*elem],
            TypeShape::Map { key, elem } => vec![*key, *elem],
            TypeShape::Alias { underlying } => vec![*underlying],
        }
    }
}

/// Errors raised while building or loading a type graph.
#[derive(Debug, thiserror::Error)]
pub enum GraphError {
    #[error("Unknown type reference: {0}")]
    UnknownType(String),

    #[error("Duplicate type declaration: {0}")]
    DuplicateType(String),

    #[error("Invalid type kind: {0}")]
    InvalidKind(String),

    #[error("Type {name} of kind {kind} is missing field '{field}'")]
    MissingField {
        name: String,
        kind: TypeKind,
        field: &'static str,
    },

    #[error("Type id {0} does not belong to this graph")]
    DanglingId(TypeId),

    #[error("Malformed graph document: {0}")]
    Decode(String),
}

impl From<serde_json::Error> for GraphError {
    fn from(e: serde_json::Error) -> Self {
        GraphError::Decode(e.to_string())
    }
}
