use std::collections::BTreeMap;

use taglint_core::tags::StabilityLevel;

/// Classifies a tag name into a stability level.
pub trait StabilityRegistry: Send + Sync {
    /// `Err(RegistryError::NotFound)` means the tag is not a validation tag
    /// and carries no stability constraint.
    fn stability(&self, name: &str) -> Result<StabilityLevel, RegistryError>;
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RegistryError {
    #[error("tag {0:?} is not registered")]
    NotFound(String),
}

const BUILTIN: &[(&str, StabilityLevel)] = &[
    ("k8s:optional", StabilityLevel::Stable),
    ("k8s:required", StabilityLevel::Stable),
    ("k8s:forbidden", StabilityLevel::Alpha),
    ("k8s:minimum", StabilityLevel::Stable),
    ("k8s:maxLength", StabilityLevel::Stable),
    ("k8s:maxItems", StabilityLevel::Stable),
    ("k8s:format", StabilityLevel::Stable),
    ("k8s:enum", StabilityLevel::Stable),
    ("k8s:listType", StabilityLevel::Stable),
    ("k8s:listMapKey", StabilityLevel::Stable),
    ("k8s:item", StabilityLevel::Stable),
    ("k8s:eachKey", StabilityLevel::Stable),
    ("k8s:eachVal", StabilityLevel::Stable),
    ("k8s:subfield", StabilityLevel::Stable),
    ("k8s:immutable", StabilityLevel::Beta),
    ("k8s:unionMember", StabilityLevel::Beta),
    ("k8s:unionDiscriminator", StabilityLevel::Beta),
    ("k8s:zeroOrOneOfMember", StabilityLevel::Beta),
    ("k8s:ifEnabled", StabilityLevel::Beta),
    ("k8s:ifDisabled", StabilityLevel::Beta),
    ("k8s:update", StabilityLevel::Alpha),
    ("k8s:neq", StabilityLevel::Alpha),
];

/// Table-backed registry.
#[derive(Debug, Clone, Default)]
pub struct StaticRegistry {
    levels: BTreeMap<String, StabilityLevel>,
}

impl StaticRegistry {
    /// An empty registry: every lookup is `NotFound`.
    pub fn new() -> Self {
        Self::default()
    }

    /// The declarative validation tags shipped with taglint.
    pub fn builtin() -> Self {
        Self {
            levels: BUILTIN
                .iter()
                .map(|(name, level)| (name.to_string(), *level))
                .collect(),
        }
    }

    pub fn register(&mut self, name: impl Into<String>, level: StabilityLevel) {
        self.levels.insert(name.into(), level);
    }

    /// Layer configured overrides on top of the current table.
    pub fn with_overrides<'a>(
        mut self,
        overrides: impl IntoIterator<Item = (&'a String, &'a StabilityLevel)>,
    ) -> Self {
        for (name, level) in overrides {
            self.levels.insert(name.clone(), *level);
        }
        self
    }

    /// All entries sorted by tag name.
    pub fn entries(&self) -> impl Iterator<Item = (&str, StabilityLevel)> {
        self.levels.iter().map(|(n, l)| (n.as_str(), *l))
    }
}

impl StabilityRegistry for StaticRegistry {
    fn stability(&self, name: &str) -> Result<StabilityLevel, RegistryError> {
        self.levels
            .get(name)
            .copied()
            .ok_or_else(|| RegistryError::NotFound(name.to_string()))
    }
}
