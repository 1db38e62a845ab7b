//! One inference cycle of post-processing: dequantize, suppress, classify.
//!
//! `Postprocessor` holds only its validated configuration; every call to
//! [`Postprocessor::run`] starts from the raw buffer it is given and keeps no
//! state afterwards.

use crate::candidate::nms::{non_maximum_suppression, NmsParams};
use crate::classify::{detection_classes, label_detections, Detection};
use crate::dequant::{decode_predictions, Dequantization};
use crate::geometry::ImageSize;
use crate::prediction::Prediction;
use crate::tensor::{OutputLayout, QuantizedOutput};
use crate::trace::{trace_event, trace_span};
use crate::util::DetPostResult;

/// Configuration for a full post-processing pass.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PostprocessConfig {
    /// Minimum objectness for suppression and minimum class score for labels.
    pub confidence_threshold: f32,
    /// IoU above which a lower-ranked box is suppressed.
    pub iou_threshold: f32,
    /// Model input size the normalized boxes refer to.
    pub image: ImageSize,
    /// Number of class scores per anchor record.
    pub num_classes: usize,
    /// Policy mapping raw bytes to floats.
    pub dequantization: Dequantization,
    /// Decode anchors on the rayon pool (requires the `rayon` feature).
    pub parallel: bool,
}

impl Default for PostprocessConfig {
    fn default() -> Self {
        Self {
            confidence_threshold: 0.5,
            iou_threshold: 0.5,
            image: ImageSize::new(416, 416),
            num_classes: 3,
            dequantization: Dequantization::Normalized,
            parallel: false,
        }
    }
}

impl PostprocessConfig {
    /// Checks thresholds, image size, and quantization parameters.
    pub fn validate(&self) -> DetPostResult<()> {
        self.nms_params().validate()?;
        self.dequantization.validate()
    }

    /// Returns the record layout implied by `num_classes`.
    pub fn layout(&self) -> OutputLayout {
        OutputLayout::new(self.num_classes)
    }

    /// Returns the suppression parameters of this configuration.
    pub fn nms_params(&self) -> NmsParams {
        NmsParams {
            confidence_threshold: self.confidence_threshold,
            iou_threshold: self.iou_threshold,
            image: self.image,
        }
    }
}

/// Runs the post-processing stages on raw detector output.
#[derive(Clone, Debug)]
pub struct Postprocessor {
    config: PostprocessConfig,
}

impl Postprocessor {
    /// Creates a postprocessor after validating `config`.
    pub fn new(config: PostprocessConfig) -> DetPostResult<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Returns the active configuration.
    pub fn config(&self) -> &PostprocessConfig {
        &self.config
    }

    /// Dequantizes `raw` into one prediction per anchor.
    pub fn decode(&self, raw: &[u8]) -> DetPostResult<Vec<Prediction>> {
        let output = QuantizedOutput::new(raw, self.config.layout())?;
        Ok(self.decode_output(output))
    }

    fn decode_output(&self, output: QuantizedOutput<'_>) -> Vec<Prediction> {
        #[cfg(feature = "rayon")]
        if self.config.parallel {
            return crate::dequant::rayon::decode_predictions_par(
                output,
                self.config.dequantization,
            );
        }
        decode_predictions(output, self.config.dequantization)
    }

    /// Returns the predictions that survive suppression, by descending confidence.
    pub fn predictions(&self, raw: &[u8]) -> DetPostResult<Vec<Prediction>> {
        let decoded = self.decode(raw)?;
        Ok(non_maximum_suppression(&decoded, self.config.nms_params()))
    }

    /// Runs the full cycle and pairs each survivor with its class.
    pub fn run(&self, raw: &[u8]) -> DetPostResult<Vec<Detection>> {
        let _span = trace_span!("postprocess", bytes = raw.len()).entered();
        let survivors = self.predictions(raw)?;
        let detections = label_detections(survivors, self.config.confidence_threshold);
        trace_event!(
            "postprocess_done",
            detections = detections.len(),
            labeled = detections.iter().filter(|d| d.class_id.is_some()).count()
        );
        Ok(detections)
    }

    /// Runs the full cycle and returns only the extracted class indices.
    pub fn classes(&self, raw: &[u8]) -> DetPostResult<Vec<usize>> {
        let survivors = self.predictions(raw)?;
        Ok(detection_classes(&survivors, self.config.confidence_threshold))
    }
}
