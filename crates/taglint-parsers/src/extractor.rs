use taglint_core::tags::Tag;

/// Turns a declaration's raw comment lines into its annotation chain list.
///
/// Implementors must be `Send + Sync` so one extractor can serve linters
/// running on different graphs in parallel.
pub trait TagExtractor: Send + Sync {
    /// Extract every recognized tag from `lines`, in line order.
    fn extract(&self, ctx: &ExtractContext, lines: &[String]) -> Result<Vec<Tag>, ExtractError>;
}

/// Where a block of comment lines came from. Only used in error messages.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtractContext {
    pub scope: String,
}

impl ExtractContext {
    pub fn new(scope: impl Into<String>) -> Self {
        Self {
            scope: scope.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ExtractError {
    #[error("{scope}: malformed tag `{line}`: {reason}")]
    Malformed {
        scope: String,
        line: String,
        reason: String,
    },
}
