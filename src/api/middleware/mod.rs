// Request guards applied before handlers run

pub mod auth;

pub use auth::MutationGuard;
