//! Conversion into `image` crate buffers.
//!
//! Available when the `image-io` feature is enabled.

use crate::color::rgb565_to_rgb888;
use crate::util::{DetPostError, DetPostResult};

/// Converts an RGB565 frame into an owned `image::RgbImage`.
pub fn rgb565_to_rgb_image(src: &[u8], width: u32, height: u32) -> DetPostResult<image::RgbImage> {
    let rgb = rgb565_to_rgb888(src, width as usize, height as usize)?;
    image::RgbImage::from_raw(width, height, rgb).ok_or_else(|| DetPostError::ImageIo {
        reason: format!("buffer does not fit a {width}x{height} rgb image"),
    })
}
