//! Application layer services implementing business logic.
//!
//! Services consume the store trait and expose the operations HTTP handlers
//! and the admin CLI call.
//!
//! # Available Services
//!
//! - [`services::link_service::LinkService`] - Allocation, visit accounting, listing, deletion

pub mod services;
