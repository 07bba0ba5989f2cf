//! Domain layer: the link entity and the store contract.
//!
//! - [`entities`] - Core data structures
//! - [`repositories`] - Store trait implemented by the infrastructure layer
//!
//! The domain layer has no dependency on HTTP or on a concrete database.

pub mod entities;
pub mod repositories;
