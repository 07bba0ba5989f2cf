//! Link store implementations.
//!
//! - [`PgLinkRepository`] - PostgreSQL via SQLx, uniqueness enforced by the schema
//! - [`InMemoryLinkRepository`] - Process-local store with the same uniqueness rule

pub mod memory_link_repository;
pub mod pg_link_repository;

pub use memory_link_repository::InMemoryLinkRepository;
pub use pg_link_repository::PgLinkRepository;
