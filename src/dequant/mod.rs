//! Dequantization of raw detector output into predictions.
//!
//! Two policies are supported and must be chosen explicitly; they are not
//! numerically equivalent and cannot be told apart from the data:
//! fixed normalization `v / 255` and affine `scale * (v - zero_point)`.
//! Decoding performs no filtering or validation of the resulting values.

use crate::prediction::Prediction;
use crate::tensor::{QuantizedOutput, BOX_FIELDS};
use crate::trace::{trace_event, trace_span};
use crate::util::{DetPostError, DetPostResult};

#[cfg(feature = "rayon")]
pub mod rayon;

/// Affine quantization parameters reported by the inference engine.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Quantization {
    pub scale: f32,
    pub zero_point: i32,
}

impl Quantization {
    /// Creates affine quantization parameters.
    pub fn new(scale: f32, zero_point: i32) -> Self {
        Self { scale, zero_point }
    }
}

impl From<(f32, i32)> for Quantization {
    fn from((scale, zero_point): (f32, i32)) -> Self {
        Self { scale, zero_point }
    }
}

/// Mapping from 8-bit quantized values to floats.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Dequantization {
    /// Fixed linear scaling `v / 255.0`.
    Normalized,
    /// Affine dequantization `scale * (v - zero_point)`.
    Affine(Quantization),
}

impl Dequantization {
    /// Shorthand for [`Dequantization::Affine`].
    pub fn affine(scale: f32, zero_point: i32) -> Self {
        Self::Affine(Quantization::new(scale, zero_point))
    }

    /// Rejects affine parameters that cannot produce finite, distinct values.
    pub fn validate(&self) -> DetPostResult<()> {
        match self {
            Self::Normalized => Ok(()),
            Self::Affine(q) => {
                if !q.scale.is_finite() {
                    return Err(DetPostError::InvalidQuantization {
                        reason: "scale must be finite",
                    });
                }
                if q.scale == 0.0 {
                    return Err(DetPostError::InvalidQuantization {
                        reason: "scale must be non-zero",
                    });
                }
                Ok(())
            }
        }
    }

    /// Maps one raw value to a float.
    #[inline]
    pub fn apply(&self, value: u8) -> f32 {
        dequantize(value, *self)
    }
}

/// Maps one raw quantized value to a float under `policy`.
#[inline]
pub fn dequantize(value: u8, policy: Dequantization) -> f32 {
    match policy {
        Dequantization::Normalized => f32::from(value) / 255.0,
        Dequantization::Affine(q) => q.scale * (f32::from(value) - q.zero_point as f32),
    }
}

/// Decodes a single anchor record laid out as
/// `x, y, width, height, confidence, class_confidence[..]`.
pub(crate) fn decode_record(record: &[u8], policy: Dequantization) -> Prediction {
    let value = |idx: usize| dequantize(record[idx], policy);
    Prediction {
        x: value(0),
        y: value(1),
        width: value(2),
        height: value(3),
        confidence: value(4),
        class_confidences: record[BOX_FIELDS..]
            .iter()
            .map(|&v| dequantize(v, policy))
            .collect(),
    }
}

/// Decodes every anchor record of `output` into a prediction, in order.
///
/// Produces exactly `output.num_anchors()` predictions, each with
/// `output.layout().num_classes` class scores.
pub fn decode_predictions(output: QuantizedOutput<'_>, policy: Dequantization) -> Vec<Prediction> {
    let _span = trace_span!("decode_predictions", anchors = output.num_anchors()).entered();
    let predictions: Vec<Prediction> = output
        .records()
        .map(|record| decode_record(record, policy))
        .collect();
    trace_event!("decoded", predictions = predictions.len());
    predictions
}
