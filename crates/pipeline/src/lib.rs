//! Job orchestration.
//!
//! Ties the pieces of one rendering job together: validate the
//! request, submit it to the remote task API, poll until terminal,
//! persist the result document, and hand the document back to the
//! caller. Everything remote or stateful sits behind the `TaskApi`
//! and `ResultStore` seams so the flow is testable with doubles.

pub mod error;
pub mod runner;
pub mod store;
