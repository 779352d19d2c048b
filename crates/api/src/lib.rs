//! HTTP API for the mjstudio image service.
//!
//! Exposes router construction and shared state so integration tests
//! can drive the full middleware stack in-process.

pub mod cache;
pub mod config;
pub mod error;
pub mod handlers;
pub mod router;
pub mod routes;
pub mod state;
