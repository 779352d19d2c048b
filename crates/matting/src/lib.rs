//! Background removal for still images.
//!
//! Exposes the [`remover::BackgroundRemover`] trait the HTTP layer
//! consumes plus a dependency-free baseline implementation,
//! [`chroma::ChromaMatte`]. Heavier model-based removers can slot in
//! behind the same trait without touching callers.

pub mod chroma;
pub mod remover;
