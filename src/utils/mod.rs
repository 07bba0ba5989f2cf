//! Helpers shared by the service and HTTP layers.
//!
//! - [`code_generator`] - Short code generation, format check, reserved segments
//! - [`url_validator`] - Destination URL check
//! - [`request_origin`] - Base origin for absolute short URLs

pub mod code_generator;
pub mod request_origin;
pub mod url_validator;
