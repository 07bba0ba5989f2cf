//! Core domain entities.
//!
//! - [`Link`] - A persisted short code to URL mapping with visit counters
//! - [`NewLink`] - Insert payload for a link

pub mod link;

pub use link::{Link, NewLink};
