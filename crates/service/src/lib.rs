//! Service layer: auth and listing workflows on top of `models` and `common`.
//! - Separates business logic from data access through repository traits.
//! - Ships SeaORM-backed and in-memory repository implementations.
//! - Provides clear error types and documented interfaces.

pub mod errors;
pub mod auth;
pub mod posts;
pub mod esports;
#[cfg(test)]
pub mod test_support;
