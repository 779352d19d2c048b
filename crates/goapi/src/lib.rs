//! Client library for a GoAPI-style Midjourney rendering service.
//!
//! Provides typed submission payload builders, response parsing and
//! task-status classification, a [`reqwest`]-based HTTP client, and a
//! bounded, cancellable poller that drives submitted tasks to a
//! terminal state.

pub mod api;
pub mod client;
pub mod poll;
pub mod submit;
pub mod task;
