//! Repository trait definitions (ports).
//!
//! These traits define the storage interface that the infrastructure layer
//! (versus-infra) implements. The core crate never depends on any
//! specific storage technology.

pub mod choice;
pub mod item;
pub mod user;

/// Sort order for list queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    Asc,
    #[default]
    Desc,
}
