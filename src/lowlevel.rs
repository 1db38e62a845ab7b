//! Individual post-processing stages for custom pipelines.
//!
//! These expose the filter, sort, and box helpers the high-level
//! `Postprocessor` composes. Most users should call `Postprocessor::run`
//! or the stage functions re-exported at the crate root.

pub use crate::candidate::order::{filter_confident, is_confident, sort_by_confidence_desc};
pub use crate::dequant::dequantize;
pub use crate::geometry::iou::box_iou;
pub use crate::geometry::{decode_box, DecodedBox};
pub use crate::tensor::BOX_FIELDS;
