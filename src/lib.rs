//! detpost turns quantized object-detector output into labeled detections.
//!
//! The pipeline runs once per inference cycle and keeps no state between
//! calls: raw bytes are dequantized into per-anchor [`Prediction`]s,
//! deduplicated with greedy IoU non-maximum suppression, and reduced to class
//! indices. Anchor decoding can run on rayon with the `rayon` feature.

mod candidate;
pub mod classify;
pub mod color;
pub mod dequant;
pub mod geometry;
pub mod lowlevel;
pub mod pipeline;
pub mod prediction;
pub mod tensor;
mod trace;
pub mod util;

pub use classify::{best_class, contains_class, detection_classes, label_detections, Detection};
pub use dequant::{decode_predictions, Dequantization, Quantization};
pub use geometry::iou::iou;
pub use geometry::{DecodedBox, ImageSize};
pub use pipeline::{PostprocessConfig, Postprocessor};
pub use prediction::Prediction;
pub use tensor::{OutputLayout, QuantizedOutput};
pub use util::{DetPostError, DetPostResult};

pub use candidate::nms::{non_maximum_suppression, NmsParams};

#[cfg(feature = "rayon")]
pub use dequant::rayon::decode_predictions_par;

#[cfg(feature = "image-io")]
pub use color::io::rgb565_to_rgb_image;
