// Repository ports (persistence contracts)
// Adapters in the infrastructure layer implement these interfaces

pub mod team_repository;

pub use team_repository::{DeleteOutcome, StoreError, TeamRepository, UpdateOutcome};
