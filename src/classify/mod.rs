//! Class extraction for suppressed detections.
//!
//! Each prediction contributes at most one class index: the position of its
//! highest class score, provided that score reaches the threshold. Ties go
//! to the lowest index.

use crate::prediction::Prediction;
use crate::util::math::argmax_first;

/// Returns the best class index and score of a prediction.
///
/// `None` when the prediction has no class scores.
pub fn best_class(prediction: &Prediction) -> Option<(usize, f32)> {
    argmax_first(&prediction.class_confidences)
}

fn qualifying_class(prediction: &Prediction, confidence_threshold: f32) -> Option<(usize, f32)> {
    best_class(prediction).filter(|&(_, score)| score >= confidence_threshold)
}

/// Extracts one class index per qualifying prediction, in input order.
///
/// Predictions without class scores, or whose best score is below
/// `confidence_threshold`, are omitted rather than given a placeholder.
pub fn detection_classes(predictions: &[Prediction], confidence_threshold: f32) -> Vec<usize> {
    predictions
        .iter()
        .filter_map(|p| qualifying_class(p, confidence_threshold))
        .map(|(idx, _)| idx)
        .collect()
}

/// A surviving prediction paired with its class, if one qualified.
#[derive(Clone, Debug, PartialEq)]
pub struct Detection {
    pub prediction: Prediction,
    pub class_id: Option<usize>,
    pub class_confidence: Option<f32>,
}

/// Pairs each prediction with the class [`detection_classes`] would report.
pub fn label_detections(predictions: Vec<Prediction>, confidence_threshold: f32) -> Vec<Detection> {
    predictions
        .into_iter()
        .map(|prediction| {
            let class = qualifying_class(&prediction, confidence_threshold);
            Detection {
                class_id: class.map(|(idx, _)| idx),
                class_confidence: class.map(|(_, score)| score),
                prediction,
            }
        })
        .collect()
}

/// Returns true when `class_id` appears among the extracted classes.
pub fn contains_class(class_ids: &[usize], class_id: usize) -> bool {
    class_ids.contains(&class_id)
}
