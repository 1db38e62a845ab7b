//! Greedy IoU-based non-maximum suppression.

use crate::candidate::order::{filter_confident, sort_by_confidence_desc};
use crate::geometry::iou::box_iou;
use crate::geometry::{decode_box, DecodedBox, ImageSize};
use crate::prediction::Prediction;
use crate::trace::{trace_event, trace_span};
use crate::util::math::is_unit_interval;
use crate::util::{DetPostError, DetPostResult};

/// Thresholds and image size for one suppression pass.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct NmsParams {
    /// Minimum objectness for a prediction to be considered.
    pub confidence_threshold: f32,
    /// Candidates whose IoU with a kept box exceeds this are dropped.
    pub iou_threshold: f32,
    /// Image the normalized boxes are decoded against.
    pub image: ImageSize,
}

impl Default for NmsParams {
    fn default() -> Self {
        Self {
            confidence_threshold: 0.5,
            iou_threshold: 0.5,
            image: ImageSize::new(416, 416),
        }
    }
}

impl NmsParams {
    /// Checks thresholds and image dimensions.
    pub fn validate(&self) -> DetPostResult<()> {
        if !is_unit_interval(self.confidence_threshold) {
            return Err(DetPostError::InvalidThreshold {
                name: "confidence_threshold",
                value: self.confidence_threshold,
            });
        }
        if !is_unit_interval(self.iou_threshold) {
            return Err(DetPostError::InvalidThreshold {
                name: "iou_threshold",
                value: self.iou_threshold,
            });
        }
        self.image.validate()
    }
}

/// Filters, ranks, and greedily deduplicates predictions.
///
/// Predictions below `confidence_threshold` or with a zero width or height
/// are dropped first. The rest are stably sorted by descending confidence;
/// each is kept unless its IoU with an already kept prediction is strictly
/// greater than `iou_threshold`. The result is in descending confidence.
pub fn non_maximum_suppression(predictions: &[Prediction], params: NmsParams) -> Vec<Prediction> {
    let _span = trace_span!("nms", input = predictions.len()).entered();

    let mut candidates = filter_confident(predictions, params.confidence_threshold);
    sort_by_confidence_desc(&mut candidates);
    trace_event!("nms_candidates", candidates = candidates.len());

    let mut kept: Vec<Prediction> = Vec::new();
    let mut kept_boxes: Vec<DecodedBox> = Vec::new();

    'outer: for candidate in candidates {
        let candidate_box = decode_box(&candidate, params.image);
        for kept_box in kept_boxes.iter() {
            // NaN never compares greater, so an undefined IoU keeps the box.
            if box_iou(kept_box, &candidate_box) > params.iou_threshold {
                continue 'outer;
            }
        }
        kept_boxes.push(candidate_box);
        kept.push(candidate);
    }

    trace_event!("nms_kept", kept = kept.len());
    kept
}
