//! Row structs for the two service tables.
//!
//! Each submodule holds a `FromRow` + `Serialize` entity matching the
//! database row, shaped so serializing it reproduces the legacy wire
//! format (ids appear as `_id`).

pub mod generated_image;
pub mod upload;

pub use generated_image::GeneratedImage;
pub use upload::{CreateUpload, UploadRecord};
