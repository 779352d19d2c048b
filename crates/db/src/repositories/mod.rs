//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async methods that
//! accept `&DbPool` as the first argument.

pub mod generated_image_repo;
pub mod upload_repo;

pub use generated_image_repo::GeneratedImageRepo;
pub use upload_repo::UploadRepo;
