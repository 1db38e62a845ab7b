//! Intersection-over-union on decoded boxes.
//!
//! Areas follow the inclusive pixel-index convention: a box spanning
//! `x1..=x2` covers `x2 - x1 + 1` pixels. Thresholds calibrated against
//! deployed models depend on this, so the `+ 1` terms must stay.

use crate::geometry::{decode_box, DecodedBox, ImageSize};
use crate::prediction::Prediction;

/// Computes the IoU of two predictions after decoding them for `image`.
///
/// The result is symmetric in its arguments. When the union is zero the
/// quotient is `NaN` or infinite and is returned as is; the suppressor only
/// drops a candidate for an IoU strictly above its threshold, so such values
/// never cause suppression.
pub fn iou(a: &Prediction, b: &Prediction, image: ImageSize) -> f32 {
    box_iou(&decode_box(a, image), &decode_box(b, image))
}

/// Computes the IoU of two already decoded boxes.
pub fn box_iou(a: &DecodedBox, b: &DecodedBox) -> f32 {
    let x1 = a.x1.max(b.x1);
    let y1 = a.y1.max(b.y1);
    let x2 = a.x2.min(b.x2);
    let y2 = a.y2.min(b.y2);

    let intersection = (x2 - x1 + 1.0).max(0.0) * (y2 - y1 + 1.0).max(0.0);
    let union = a.inclusive_area() + b.inclusive_area() - intersection;
    intersection / union
}
