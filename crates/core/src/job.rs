//! Image job requests.
//!
//! One variant per rendering operation the backend can submit to the
//! remote task API. Constructors fill in the documented defaults for
//! optional fields; [`JobRequest::validate`] enforces the required
//! ones before anything leaves the process.

use crate::error::CoreError;

/// Default frame index for upscale jobs.
pub const DEFAULT_UPSCALE_INDEX: &str = "1";

/// Default zoom factor for outpaint jobs.
pub const DEFAULT_ZOOM_RATIO: &str = "1";

/// Default canvas shape for outpaint jobs.
pub const DEFAULT_ASPECT_RATIO: &str = "1:1";

/// The four rendering operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JobKind {
    Generate,
    Upscale,
    Inpaint,
    Outpaint,
}

impl JobKind {
    pub fn as_str(self) -> &'static str {
        match self {
            JobKind::Generate => "generate",
            JobKind::Upscale => "upscale",
            JobKind::Inpaint => "inpaint",
            JobKind::Outpaint => "outpaint",
        }
    }
}

impl std::fmt::Display for JobKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A validated-on-demand request for one rendering job.
///
/// Field meanings follow the remote task API: `origin_task_id` names a
/// previously finished task to derive from, `index` selects one frame
/// of a four-frame grid, `mask` is a base64 PNG marking the region to
/// repaint.
///
/// # Examples
///
/// ```
/// use mjstudio_core::job::{JobRequest, DEFAULT_ZOOM_RATIO};
///
/// let job = JobRequest::outpaint("task-1", None, None, None);
/// assert!(job.validate().is_ok());
/// if let JobRequest::Outpaint { zoom_ratio, .. } = &job {
///     assert_eq!(zoom_ratio, DEFAULT_ZOOM_RATIO);
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JobRequest {
    Generate {
        prompt: String,
    },
    Upscale {
        origin_task_id: String,
        index: String,
    },
    Inpaint {
        origin_task_id: String,
        prompt: String,
        mask: String,
    },
    Outpaint {
        origin_task_id: String,
        zoom_ratio: String,
        aspect_ratio: String,
        prompt: String,
    },
}

impl JobRequest {
    /// Text-to-image generation from a prompt.
    pub fn generate(prompt: impl Into<String>) -> Self {
        JobRequest::Generate {
            prompt: prompt.into(),
        }
    }

    /// Upscale one frame of a finished grid. `index` defaults to
    /// [`DEFAULT_UPSCALE_INDEX`] when absent.
    pub fn upscale(origin_task_id: impl Into<String>, index: Option<String>) -> Self {
        JobRequest::Upscale {
            origin_task_id: origin_task_id.into(),
            index: index.unwrap_or_else(|| DEFAULT_UPSCALE_INDEX.to_string()),
        }
    }

    /// Repaint a masked region of a finished image.
    pub fn inpaint(
        origin_task_id: impl Into<String>,
        prompt: impl Into<String>,
        mask: impl Into<String>,
    ) -> Self {
        JobRequest::Inpaint {
            origin_task_id: origin_task_id.into(),
            prompt: prompt.into(),
            mask: mask.into(),
        }
    }

    /// Extend a finished image outward. Absent options fall back to
    /// [`DEFAULT_ZOOM_RATIO`], [`DEFAULT_ASPECT_RATIO`], and an empty
    /// prompt.
    pub fn outpaint(
        origin_task_id: impl Into<String>,
        zoom_ratio: Option<String>,
        aspect_ratio: Option<String>,
        prompt: Option<String>,
    ) -> Self {
        JobRequest::Outpaint {
            origin_task_id: origin_task_id.into(),
            zoom_ratio: zoom_ratio.unwrap_or_else(|| DEFAULT_ZOOM_RATIO.to_string()),
            aspect_ratio: aspect_ratio.unwrap_or_else(|| DEFAULT_ASPECT_RATIO.to_string()),
            prompt: prompt.unwrap_or_default(),
        }
    }

    pub fn kind(&self) -> JobKind {
        match self {
            JobRequest::Generate { .. } => JobKind::Generate,
            JobRequest::Upscale { .. } => JobKind::Upscale,
            JobRequest::Inpaint { .. } => JobKind::Inpaint,
            JobRequest::Outpaint { .. } => JobKind::Outpaint,
        }
    }

    /// Check that every required field is present and non-empty.
    ///
    /// Returns [`CoreError::Validation`] naming the first offending
    /// field. Optional fields are never checked; constructors already
    /// defaulted them.
    pub fn validate(&self) -> Result<(), CoreError> {
        match self {
            JobRequest::Generate { prompt } => {
                require("prompt", prompt)?;
            }
            JobRequest::Upscale { origin_task_id, .. } => {
                require("origin_task_id", origin_task_id)?;
            }
            JobRequest::Inpaint {
                origin_task_id,
                prompt,
                mask,
            } => {
                require("origin_task_id", origin_task_id)?;
                require("prompt", prompt)?;
                require("mask", mask)?;
            }
            JobRequest::Outpaint { origin_task_id, .. } => {
                require("origin_task_id", origin_task_id)?;
            }
        }
        Ok(())
    }
}

fn require(field: &str, value: &str) -> Result<(), CoreError> {
    if value.trim().is_empty() {
        return Err(CoreError::Validation(format!("{field} must not be empty")));
    }
    Ok(())
}
