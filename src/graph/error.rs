//! Error type for the graph query layer

use thiserror::Error;

/// Failures surfaced by graph operations.
///
/// Store failures carry the underlying error text so operators can see what
/// went wrong from the HTTP response alone.
#[derive(Debug, Error)]
pub enum GraphError {
    /// The graph store could not be reached or the query failed
    #[error("{context}: {cause:#}")]
    StoreUnavailable { context: String, cause: anyhow::Error },

    /// A caller-supplied parameter is outside its documented range
    #[error("{0}")]
    Validation(String),

    /// A directly requested entity does not exist
    #[error("{0}")]
    NotFound(String),

    /// A stored record lacks a required identity field
    #[error("malformed record: {0}")]
    MalformedRecord(String),
}

impl GraphError {
    pub fn store(context: impl Into<String>, cause: anyhow::Error) -> Self {
        Self::StoreUnavailable {
            context: context.into(),
            cause,
        }
    }
}

/// Attach an endpoint-level context to store results
pub(crate) trait StoreResultExt<T> {
    fn store_context(self, context: &str) -> Result<T, GraphError>;
}

impl<T> StoreResultExt<T> for anyhow::Result<T> {
    fn store_context(self, context: &str) -> Result<T, GraphError> {
        self.map_err(|e| GraphError::store(context, e))
    }
}
