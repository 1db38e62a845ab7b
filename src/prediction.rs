//! Per-anchor detection candidates.

use crate::geometry::{decode_box, DecodedBox, ImageSize};

/// One anchor's decoded detection candidate.
///
/// Coordinates are normalized to `[0, 1]` and describe the box center and
/// full extents. A zero `width` or `height` marks a degenerate box meaning
/// "no object".
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Prediction {
    /// Normalized center x.
    pub x: f32,
    /// Normalized center y.
    pub y: f32,
    /// Normalized box width.
    pub width: f32,
    /// Normalized box height.
    pub height: f32,
    /// Objectness score.
    pub confidence: f32,
    /// Per-category scores; empty when the model has no class head.
    pub class_confidences: Vec<f32>,
}

impl Prediction {
    /// Creates a prediction from its box, objectness, and class scores.
    pub fn new(
        x: f32,
        y: f32,
        width: f32,
        height: f32,
        confidence: f32,
        class_confidences: Vec<f32>,
    ) -> Self {
        Self {
            x,
            y,
            width,
            height,
            confidence,
            class_confidences,
        }
    }

    /// Returns true when the box has zero (or negative) width or height.
    pub fn is_degenerate(&self) -> bool {
        !(self.width > 0.0 && self.height > 0.0)
    }

    /// Decodes the box into pixel-space corners for `image`.
    pub fn to_box(&self, image: ImageSize) -> DecodedBox {
        decode_box(self, image)
    }
}
