//! Infrastructure layer for external integrations.
//!
//! - [`persistence`] - Link store implementations (PostgreSQL, in-memory)

pub mod persistence;
