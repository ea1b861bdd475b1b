use serde::{Deserialize, Serialize};

/// Wrapper marking the payload as alpha-gated validation.
pub const ALPHA: &str = "k8s:alpha";
/// Wrapper marking the payload as beta-gated validation.
pub const BETA: &str = "k8s:beta";
pub const OPTIONAL: &str = "k8s:optional";
pub const REQUIRED: &str = "k8s:required";
pub const FORBIDDEN: &str = "k8s:forbidden";

/// Tags that declare whether a field may be absent.
pub const REQUIREDNESS_TAGS: [&str; 3] = [OPTIONAL, REQUIRED, FORBIDDEN];

/// One annotation extracted from a declaration's comment lines.
///
/// An annotation carries at most one payload. When the payload is itself a
/// tag the annotations form a chain (`+k8s:alpha=+k8s:item=+k8s:required`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tag {
    pub name: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub args: Vec<TagArg>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payload: Option<TagPayload>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TagPayload {
    Literal(String),
    Tag(Box<Tag>),
}

/// An argument inside `+k8s:name(...)`. Positional arguments have no name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TagArg {
    pub name: Option<String>,
    pub value: TagArgValue,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TagArgValue {
    String(String),
    Int(i64),
    Bool(bool),
    Ident(String),
}

impl Tag {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            args: Vec::new(),
            payload: None,
        }
    }

    pub fn with_value_tag(mut self, tag: Tag) -> Self {
        self.payload = Some(TagPayload::Tag(Box::new(tag)));
        self
    }

    pub fn with_literal(mut self, value: impl Into<String>) -> Self {
        self.payload = Some(TagPayload::Literal(value.into()));
        self
    }

    pub fn with_arg(mut self, name: Option<&str>, value: TagArgValue) -> Self {
        self.args.push(TagArg {
            name: name.map(str::to_string),
            value,
        });
        self
    }

    /// The nested annotation carried as payload, if any.
    pub fn value_tag(&self) -> Option<&Tag> {
        match &self.payload {
            Some(TagPayload::Tag(tag)) => Some(tag),
            _ => None,
        }
    }

    pub fn literal(&self) -> Option<&str> {
        match &self.payload {
            Some(TagPayload::Literal(value)) => Some(value),
            _ => None,
        }
    }

    /// Walk the chain starting at this tag.
    pub fn chain(&self) -> impl Iterator<Item = &Tag> {
        std::iter::successors(Some(self), |t| t.value_tag())
    }

    pub fn is_stability_wrapper(&self) -> bool {
        self.name == ALPHA || self.name == BETA
    }
}

/// Maturity of a validation tag. `Stable > Beta > Alpha`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StabilityLevel {
    Alpha,
    Beta,
    Stable,
}

impl StabilityLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            StabilityLevel::Alpha => "Alpha",
            StabilityLevel::Beta => "Beta",
            StabilityLevel::Stable => "Stable",
        }
    }
}

impl std::fmt::Display for StabilityLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for StabilityLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "alpha" => Ok(StabilityLevel::Alpha),
            "beta" => Ok(StabilityLevel::Beta),
            "stable" => Ok(StabilityLevel::Stable),
            _ => Err(format!("unknown stability level: {s}")),
        }
    }
}
