//! RGB565 to RGB888 conversion for sensor frames.
//!
//! Camera sensors deliver 16-bit pixels high byte first. Each channel is
//! widened to 8 bits by replicating its top bits into the new low bits, so
//! full-scale values map to 255.

use crate::util::{DetPostError, DetPostResult};

#[cfg(feature = "image-io")]
pub mod io;

/// Converts one big-endian RGB565 pixel to RGB888.
#[inline]
pub fn rgb565_pixel_to_rgb888(hi: u8, lo: u8) -> [u8; 3] {
    let r5 = (hi & 0xF8) >> 3;
    let g6 = ((hi & 0x07) << 3) | ((lo & 0xE0) >> 5);
    let b5 = lo & 0x1F;
    [
        (r5 << 3) | (r5 >> 2),
        (g6 << 2) | (g6 >> 4),
        (b5 << 3) | (b5 >> 2),
    ]
}

/// Converts a `width x height` RGB565 frame to packed RGB888.
///
/// Trailing bytes beyond `width * height * 2` are ignored.
pub fn rgb565_to_rgb888(src: &[u8], width: usize, height: usize) -> DetPostResult<Vec<u8>> {
    if width == 0 || height == 0 {
        return Err(DetPostError::InvalidImageSize { width, height });
    }
    let pixels = width
        .checked_mul(height)
        .ok_or(DetPostError::InvalidImageSize { width, height })?;
    let needed = pixels
        .checked_mul(2)
        .ok_or(DetPostError::InvalidImageSize { width, height })?;
    if src.len() < needed {
        return Err(DetPostError::BufferTooSmall {
            needed,
            got: src.len(),
        });
    }

    let mut out = Vec::with_capacity(pixels * 3);
    for px in src[..needed].chunks_exact(2) {
        out.extend_from_slice(&rgb565_pixel_to_rgb888(px[0], px[1]));
    }
    Ok(out)
}
