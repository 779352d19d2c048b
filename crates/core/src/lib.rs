//! Shared domain types for the mjstudio backend.
//!
//! Pure definitions with no I/O: job requests and their validation
//! rules, upload filename policy, and the error type the service
//! layers build on.

pub mod error;
pub mod job;
pub mod types;
pub mod upload;
