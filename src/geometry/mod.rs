//! Anchor-to-box geometry.
//!
//! Predictions carry a normalized center and extent; `decode_box` scales
//! them to pixel-space corners. Corners are not clamped to the image, so a
//! box near the border may extend past `[0, width] x [0, height]`.

use crate::prediction::Prediction;
use crate::util::{DetPostError, DetPostResult};

pub mod iou;

/// Image dimensions in pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ImageSize {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl ImageSize {
    /// Creates an image size.
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Checks that both dimensions are positive.
    pub fn validate(&self) -> DetPostResult<()> {
        if self.width == 0 || self.height == 0 {
            return Err(DetPostError::InvalidImageSize {
                width: self.width as usize,
                height: self.height as usize,
            });
        }
        Ok(())
    }
}

/// Axis-aligned box corners in pixel coordinates.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DecodedBox {
    pub x1: f32,
    pub y1: f32,
    pub x2: f32,
    pub y2: f32,
}

impl DecodedBox {
    /// Area with inclusive pixel indices: `(x2 - x1 + 1) * (y2 - y1 + 1)`.
    pub fn inclusive_area(&self) -> f32 {
        (self.x2 - self.x1 + 1.0) * (self.y2 - self.y1 + 1.0)
    }

    /// Returns the corners as `[x1, y1, x2, y2]`.
    pub fn to_array(&self) -> [f32; 4] {
        [self.x1, self.y1, self.x2, self.y2]
    }
}

/// Converts a prediction's center/extent box to pixel-space corners.
pub fn decode_box(prediction: &Prediction, image: ImageSize) -> DecodedBox {
    let img_w = image.width as f32;
    let img_h = image.height as f32;
    let half_w = prediction.width / 2.0;
    let half_h = prediction.height / 2.0;
    DecodedBox {
        x1: (prediction.x - half_w) * img_w,
        y1: (prediction.y - half_h) * img_h,
        x2: (prediction.x + half_w) * img_w,
        y2: (prediction.y + half_h) * img_h,
    }
}
