//! Request handlers grouped by resource.

pub mod images;
pub mod matting;
pub mod uploads;
