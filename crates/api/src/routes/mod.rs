//! HTTP route definitions.
//!
//! Route tree:
//!
//! ```text
//! /health                GET   liveness plus database status
//! /remove-background     POST  strip the background from an image
//! /upload-image          POST  store an uploaded image
//! /get-uploads           GET   list stored uploads
//! /generate-image        POST  run a generation job to completion
//! /get-images            GET   list persisted generation results
//! /upscale               POST  upscale one image of an earlier task
//! /inpaint               POST  regenerate a masked region of an earlier task
//! /outpaint              POST  extend an earlier task's image outward
//! ```

pub mod health;

use axum::routing::{get, post};
use axum::Router;

use crate::handlers;
use crate::state::AppState;

/// Application routes, mounted at the root. The flat paths are the
/// public contract existing clients already depend on.
pub fn app_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/remove-background",
            post(handlers::matting::remove_background),
        )
        .route("/upload-image", post(handlers::uploads::upload_image))
        .route("/get-uploads", get(handlers::uploads::get_uploads))
        .route("/generate-image", post(handlers::images::generate_image))
        .route("/get-images", get(handlers::images::get_images))
        .route("/upscale", post(handlers::images::upscale))
        .route("/inpaint", post(handlers::images::inpaint))
        .route("/outpaint", post(handlers::images::outpaint))
}
