//! The background-removal seam.

use image::{DynamicImage, RgbaImage};

/// Errors from a background-removal pass.
#[derive(Debug, thiserror::Error)]
pub enum MattingError {
    /// The input has no pixels to work with.
    #[error("image has no pixels")]
    EmptyImage,
}

/// A background remover turns an image into an RGBA matte where
/// background pixels are transparent and the subject keeps its color.
///
/// Implementations must be cheap to share; callers hold them behind
/// `Arc<dyn BackgroundRemover>` and may invoke them from blocking
/// worker threads.
pub trait BackgroundRemover: Send + Sync {
    /// Produce the matted RGBA output for `image`.
    fn remove(&self, image: &DynamicImage) -> Result<RgbaImage, MattingError>;
}
