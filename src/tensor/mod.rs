//! Borrowed views over the raw quantized detector output.
//!
//! The detector emits one fixed-length record per anchor, laid out back to
//! back in a flat `u8` buffer:
//! `x, y, width, height, confidence, class_confidence[0..C)`.
//! `QuantizedOutput` validates the buffer length against the record length
//! once so that the decoding stages can index records without further checks.

use crate::util::{DetPostError, DetPostResult};

/// Number of box and objectness fields preceding the class scores.
pub const BOX_FIELDS: usize = 5;

/// Per-anchor record layout of a detector output tensor.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct OutputLayout {
    /// Number of class scores at the end of each record.
    pub num_classes: usize,
}

impl OutputLayout {
    /// Creates a layout for a model with `num_classes` categories.
    pub fn new(num_classes: usize) -> Self {
        Self { num_classes }
    }

    /// Returns the number of values per anchor record, `5 + num_classes`.
    pub fn record_len(&self) -> usize {
        BOX_FIELDS + self.num_classes
    }
}

/// Borrowed quantized output buffer split into anchor records.
#[derive(Clone, Copy, Debug)]
pub struct QuantizedOutput<'a> {
    data: &'a [u8],
    layout: OutputLayout,
    num_anchors: usize,
}

impl<'a> QuantizedOutput<'a> {
    /// Creates a view and infers the anchor count from the buffer length.
    pub fn new(data: &'a [u8], layout: OutputLayout) -> DetPostResult<Self> {
        let record_len = layout.record_len();
        if data.len() % record_len != 0 {
            return Err(DetPostError::LengthMismatch {
                len: data.len(),
                record_len,
            });
        }
        Ok(Self {
            data,
            layout,
            num_anchors: data.len() / record_len,
        })
    }

    /// Creates a view that must hold exactly `num_anchors` records.
    pub fn with_anchors(
        data: &'a [u8],
        num_anchors: usize,
        layout: OutputLayout,
    ) -> DetPostResult<Self> {
        let view = Self::new(data, layout)?;
        if view.num_anchors != num_anchors {
            return Err(DetPostError::AnchorCountMismatch {
                expected: num_anchors,
                got: view.num_anchors,
            });
        }
        Ok(view)
    }

    /// Returns the record layout.
    pub fn layout(&self) -> OutputLayout {
        self.layout
    }

    /// Returns the number of anchor records.
    pub fn num_anchors(&self) -> usize {
        self.num_anchors
    }

    /// Returns true when the buffer holds no records.
    pub fn is_empty(&self) -> bool {
        self.num_anchors == 0
    }

    /// Returns the backing buffer.
    pub fn as_slice(&self) -> &'a [u8] {
        self.data
    }

    /// Returns the record for anchor `idx`, or `None` if out of range.
    pub fn record(&self, idx: usize) -> Option<&'a [u8]> {
        if idx >= self.num_anchors {
            return None;
        }
        let record_len = self.layout.record_len();
        let start = idx.checked_mul(record_len)?;
        self.data.get(start..start + record_len)
    }

    /// Iterates over anchor records in buffer order.
    pub fn records(&self) -> std::slice::ChunksExact<'a, u8> {
        self.data.chunks_exact(self.layout.record_len())
    }
}

#[cfg(test)]
mod tests {
    use super::{OutputLayout, QuantizedOutput};
    use crate::util::DetPostError;

    #[test]
    fn record_len_counts_box_fields() {
        assert_eq!(OutputLayout::new(0).record_len(), 5);
        assert_eq!(OutputLayout::new(3).record_len(), 8);
    }

    #[test]
    fn records_split_buffer_in_order() {
        let data: Vec<u8> = (0u8..16).collect();
        let view = QuantizedOutput::new(&data, OutputLayout::new(3)).unwrap();
        assert_eq!(view.num_anchors(), 2);
        assert_eq!(view.record(1).unwrap(), &data[8..16]);
        assert!(view.record(2).is_none());
        assert_eq!(view.records().count(), 2);
    }

    #[test]
    fn partial_record_is_rejected() {
        let data = [0u8; 9];
        let err = QuantizedOutput::new(&data, OutputLayout::new(3)).unwrap_err();
        assert_eq!(
            err,
            DetPostError::LengthMismatch {
                len: 9,
                record_len: 8
            }
        );
    }
}
