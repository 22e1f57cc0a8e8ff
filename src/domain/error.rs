//! Domain-level errors (no external dependencies)

use thiserror::Error;

/// Domain errors represent violations of the hierarchy's structural rules.
/// Dangling references are tolerated and never reported here.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("cycle detected in group hierarchy at group {group_id}")]
    CyclicHierarchy { group_id: i64 },

    #[error("duplicate group id: {0}")]
    DuplicateGroupId(i64),
}

/// Result type for tree operations.
pub type DomainResult<T> = Result<T, DomainError>;
