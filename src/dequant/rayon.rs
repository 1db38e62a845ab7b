//! Anchor-parallel dequantization (feature-gated).
//!
//! Records are independent, so each one is decoded on the rayon pool and the
//! results are collected back in buffer order.

use crate::dequant::{decode_record, Dequantization};
use crate::prediction::Prediction;
use crate::tensor::QuantizedOutput;
use crate::trace::{trace_event, trace_span};
use rayon::prelude::*;

/// Parallel counterpart of [`crate::dequant::decode_predictions`].
///
/// Produces an identical vector, in the same order.
pub fn decode_predictions_par(
    output: QuantizedOutput<'_>,
    policy: Dequantization,
) -> Vec<Prediction> {
    let _span = trace_span!("decode_predictions_par", anchors = output.num_anchors()).entered();
    let record_len = output.layout().record_len();
    let predictions: Vec<Prediction> = output
        .as_slice()
        .par_chunks_exact(record_len)
        .map(|record| decode_record(record, policy))
        .collect();
    trace_event!("decoded", predictions = predictions.len());
    predictions
}
