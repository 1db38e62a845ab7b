//! Error types for detpost.

use thiserror::Error;

/// Result alias for detpost operations.
pub type DetPostResult<T> = std::result::Result<T, DetPostError>;

/// Errors reported for invalid caller input.
///
/// The post-processing stages themselves never fail; every variant describes
/// a buffer, layout, or parameter the caller handed in.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum DetPostError {
    /// The raw buffer length is not a whole number of anchor records.
    #[error("buffer length {len} is not a multiple of the record length {record_len}")]
    LengthMismatch { len: usize, record_len: usize },
    /// The buffer holds a different number of anchors than declared.
    #[error("expected {expected} anchor records, buffer holds {got}")]
    AnchorCountMismatch { expected: usize, got: usize },
    /// A buffer is shorter than its declared dimensions require.
    #[error("buffer too small: needed {needed} bytes, got {got}")]
    BufferTooSmall { needed: usize, got: usize },
    /// Image dimensions must be positive.
    #[error("invalid image size {width}x{height}")]
    InvalidImageSize { width: usize, height: usize },
    /// A threshold is non-finite or outside `[0, 1]`.
    #[error("invalid {name}: {value}")]
    InvalidThreshold { name: &'static str, value: f32 },
    /// Quantization parameters cannot produce meaningful values.
    #[error("invalid quantization: {reason}")]
    InvalidQuantization { reason: &'static str },
    /// Image encoding or decoding failed.
    #[error("image io error: {reason}")]
    ImageIo { reason: String },
}
