//! Chroma-distance matting baseline.
//!
//! Estimates the background color by averaging the border ring of the
//! image, then keys every pixel's alpha off its RGB distance to that
//! estimate. Crude next to a segmentation model, but fully local,
//! deterministic, and good enough for product shots on a plain
//! backdrop.

use image::{DynamicImage, Rgba, RgbaImage};

use crate::remover::{BackgroundRemover, MattingError};

/// Background remover keyed on distance to the border color.
#[derive(Debug, Clone)]
pub struct ChromaMatte {
    /// RGB distance below which a pixel is fully background.
    pub threshold: f32,
    /// Width of the ramp from fully transparent to fully opaque.
    pub feather: f32,
    /// Thickness in pixels of the border ring sampled for the
    /// background estimate.
    pub border: u32,
}

impl Default for ChromaMatte {
    fn default() -> Self {
        Self {
            threshold: 30.0,
            feather: 20.0,
            border: 2,
        }
    }
}

impl ChromaMatte {
    /// Average RGB of the border ring. Images thinner than two border
    /// widths degenerate to averaging every pixel.
    fn estimate_background(&self, image: &RgbaImage) -> [f32; 3] {
        let (width, height) = image.dimensions();
        let border = self.border.max(1);

        let mut sum = [0f64; 3];
        let mut count = 0u64;
        for (x, y, pixel) in image.enumerate_pixels() {
            let on_ring = x < border
                || y < border
                || x >= width.saturating_sub(border)
                || y >= height.saturating_sub(border);
            if on_ring {
                sum[0] += f64::from(pixel[0]);
                sum[1] += f64::from(pixel[1]);
                sum[2] += f64::from(pixel[2]);
                count += 1;
            }
        }

        // count > 0: callers reject empty images first.
        [
            (sum[0] / count as f64) as f32,
            (sum[1] / count as f64) as f32,
            (sum[2] / count as f64) as f32,
        ]
    }

    /// Matte weight in `0..=255` for a pixel at `distance` from the
    /// background estimate.
    fn matte_weight(&self, distance: f32) -> u8 {
        if distance <= self.threshold {
            return 0;
        }
        if self.feather <= 0.0 || distance >= self.threshold + self.feather {
            return 255;
        }
        ((distance - self.threshold) / self.feather * 255.0) as u8
    }
}

impl BackgroundRemover for ChromaMatte {
    fn remove(&self, image: &DynamicImage) -> Result<RgbaImage, MattingError> {
        let rgba = image.to_rgba8();
        let (width, height) = rgba.dimensions();
        if width == 0 || height == 0 {
            return Err(MattingError::EmptyImage);
        }

        let background = self.estimate_background(&rgba);
        tracing::debug!(
            width,
            height,
            r = background[0],
            g = background[1],
            b = background[2],
            "Estimated background color",
        );

        let mut output = RgbaImage::new(width, height);
        for (x, y, pixel) in rgba.enumerate_pixels() {
            let distance = rgb_distance(pixel, background);
            let weight = self.matte_weight(distance);
            // Scale the existing alpha so transparent input stays
            // transparent.
            let alpha = (f32::from(pixel[3]) * f32::from(weight) / 255.0).round() as u8;
            output.put_pixel(x, y, Rgba([pixel[0], pixel[1], pixel[2], alpha]));
        }

        Ok(output)
    }
}

fn rgb_distance(pixel: &Rgba<u8>, background: [f32; 3]) -> f32 {
    let dr = f32::from(pixel[0]) - background[0];
    let dg = f32::from(pixel[1]) - background[1];
    let db = f32::from(pixel[2]) - background[2];
    (dr * dr + dg * dg + db * db).sqrt()
}
