use async_trait::async_trait;
use thiserror::Error;

use crate::domain::team::{NewTeam, Team, TeamPatch};

/// Classified store failure
///
/// Every persistence error crosses the store boundary as one of these
/// variants; no raw driver error ever reaches a handler. The adapter rolls
/// back before reporting.
#[derive(Debug, Error)]
pub enum StoreError {
    /// A unique-key constraint was violated (duplicate identifier or field)
    #[error("Duplicate entry error: {0}")]
    Duplicate(String),

    /// A foreign-key constraint was violated (insert/update of a dangling
    /// reference, or delete of a still-referenced row)
    #[error("Foreign Key constraint failed: {0}")]
    ForeignKey(String),

    /// The store could not be reached or the connection was lost
    #[error("Database connection failed")]
    Unavailable(String),

    /// Any other store failure
    #[error("Database operation failed: {0}")]
    Internal(String),
}

/// Outcome of an update mutation after zero-rows-affected resolution
///
/// A zero-rows-affected update is ambiguous between a missing row and a row
/// already in the requested state; implementations must disambiguate with an
/// existence probe rather than guess.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateOutcome {
    /// At least one row changed
    Updated,
    /// The row exists but the supplied values equal the current values.
    /// A success, not an error.
    NoChange,
    /// No row with the target id exists
    NotFound,
}

/// Outcome of a delete mutation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteOutcome {
    /// The row was removed
    Deleted,
    /// No row with the target id exists
    NotFound,
}

/// Repository trait for the Team resource
///
/// Defines the persistence contract the HTTP handlers depend on.
/// Implementations own statement construction, rows-affected
/// interpretation, and the existence probe.
#[async_trait]
pub trait TeamRepository: Send + Sync {
    /// Insert a new team, returning the stored record with its assigned id
    async fn insert(&self, new_team: NewTeam) -> Result<Team, StoreError>;

    /// List all teams
    async fn list(&self) -> Result<Vec<Team>, StoreError>;

    /// Find a team by its id
    async fn find_by_id(&self, id: i64) -> Result<Option<Team>, StoreError>;

    /// Apply a field-level partial update, resolving the ambiguous
    /// zero-rows-affected case via an existence probe
    async fn update(&self, id: i64, patch: TeamPatch) -> Result<UpdateOutcome, StoreError>;

    /// Delete a team by id. A foreign-key refusal surfaces as
    /// `StoreError::ForeignKey`, not as an outcome variant.
    async fn delete(&self, id: i64) -> Result<DeleteOutcome, StoreError>;
}
