//! Store trait definitions for the domain layer.
//!
//! Implementations live in `crate::infrastructure::persistence`:
//! a PostgreSQL store and an in-memory store. Mock implementations are
//! generated with `mockall` for unit tests.

pub mod link_repository;

pub use link_repository::LinkRepository;

#[cfg(test)]
pub use link_repository::MockLinkRepository;
