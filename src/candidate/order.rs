//! Confidence filtering and ranking of predictions.

use std::cmp::Ordering;

use crate::prediction::Prediction;

fn confidence_cmp_desc(a: &Prediction, b: &Prediction) -> Ordering {
    b.confidence.total_cmp(&a.confidence)
}

/// Returns true when a prediction may enter suppression.
///
/// Requires `confidence >= threshold` and a strictly positive width and
/// height. `NaN` confidences never pass.
pub fn is_confident(prediction: &Prediction, confidence_threshold: f32) -> bool {
    prediction.confidence >= confidence_threshold && !prediction.is_degenerate()
}

/// Keeps the confident, non-degenerate predictions in input order.
pub fn filter_confident<'a, I>(predictions: I, confidence_threshold: f32) -> Vec<Prediction>
where
    I: IntoIterator<Item = &'a Prediction>,
{
    predictions
        .into_iter()
        .filter(|p| is_confident(p, confidence_threshold))
        .cloned()
        .collect()
}

/// Sorts predictions by descending confidence.
///
/// The sort is stable: equal confidences keep their relative input order.
pub fn sort_by_confidence_desc(predictions: &mut [Prediction]) {
    predictions.sort_by(confidence_cmp_desc);
}
