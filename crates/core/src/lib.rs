//! Cinelog domain core.
//!
//! Domain types, the error taxonomy, pagination math, and input validation
//! rules shared by the server crates and the HTTP client. This crate has no
//! database or transport dependencies so both sides of the wire can depend
//! on it.

pub mod entry;
pub mod error;
pub mod pagination;
pub mod types;
pub mod validation;
