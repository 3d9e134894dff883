//! Placeholder image
//!
//! The protocol expects a render in the response, but this server never
//! renders: it answers every accepted request with a black PNG of the
//! requested dimensions.

use std::io::Cursor;

use image::{ImageFormat, RgbImage};

/// Encode a black RGB PNG of the given size
pub fn placeholder_png(width: u32, height: u32) -> Result<Vec<u8>, image::ImageError> {
    let img = RgbImage::new(width, height);
    let mut buffer = Cursor::new(Vec::new());
    img.write_to(&mut buffer, ImageFormat::Png)?;
    Ok(buffer.into_inner())
}
