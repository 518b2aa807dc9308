//! Error types for the solver contract analyzer
//!
//! The analyzer itself is total: a missing entry point or a missing return is
//! carried as a [`Diagnostic`](crate::analyzer::Diagnostic) next to the
//! (empty) result. These variants exist for callers that prefer `?` over
//! inspecting diagnostics, via
//! [`Extraction::into_result`](crate::analyzer::Extraction::into_result).

/// Solver contract error types
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// No `def <entry_point>(...)` header anywhere in the script
    #[error("No `{name}` function found in the file")]
    MissingEntryPoint { name: String },

    /// Entry point found, but no `return` with an expression in its body
    #[error("No `return` statement found in the `{name}` function")]
    MissingReturn { name: String },

    /// Report could not be rendered as JSON
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Serialization(err.to_string())
    }
}

/// Result type alias for analyzer operations
pub type Result<T> = std::result::Result<T, Error>;
