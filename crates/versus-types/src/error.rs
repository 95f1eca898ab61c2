use thiserror::Error;

/// Malformed identifiers, rejected before any store access.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IdError {
    #[error("invalid {kind} id: '{value}'")]
    InvalidUuid { kind: &'static str, value: String },

    #[error("invalid external id: '{0}' (expected a positive integer)")]
    InvalidExternalId(String),
}

/// Errors from repository operations (used by trait definitions in versus-core).
#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("database connection error")]
    Connection,

    #[error("query error: {0}")]
    Query(String),

    #[error("entity not found")]
    NotFound,

    #[error("conflict: {0}")]
    Conflict(String),
}

/// Errors from the remote content provider.
#[derive(Debug, Error)]
pub enum ContentError {
    #[error("content provider request failed: {0}")]
    Request(String),

    #[error("content provider timed out")]
    Timeout,

    #[error("content provider returned status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("could not decode content provider response: {0}")]
    Decode(String),
}

/// Errors surfaced by the taste pipeline and the services around it.
///
/// Store and provider failures abort the whole computation as `Upstream`;
/// no partial result is ever returned alongside one of these.
#[derive(Debug, Error)]
pub enum TasteError {
    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: String },

    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("upstream failure: {0}")]
    Upstream(String),

    #[error("conflict: {0}")]
    Conflict(String),
}

impl TasteError {
    pub fn not_found(entity: &'static str, id: impl ToString) -> Self {
        TasteError::NotFound {
            entity,
            id: id.to_string(),
        }
    }
}

impl From<IdError> for TasteError {
    fn from(e: IdError) -> Self {
        TasteError::InvalidArgument(e.to_string())
    }
}

impl From<RepositoryError> for TasteError {
    fn from(e: RepositoryError) -> Self {
        match e {
            RepositoryError::Conflict(msg) => TasteError::Conflict(msg),
            RepositoryError::NotFound => TasteError::not_found("record", "unknown"),
            other => TasteError::Upstream(other.to_string()),
        }
    }
}

impl From<ContentError> for TasteError {
    fn from(e: ContentError) -> Self {
        TasteError::Upstream(e.to_string())
    }
}
