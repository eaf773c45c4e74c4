//! Natural image dimensions

use crate::utils::Result;
use std::io::Cursor;

/// Intrinsic size of a decoded image
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NaturalSize {
    pub width: u32,
    pub height: u32,
}

impl NaturalSize {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Width over height. Degenerate zero-height images are treated as one
    /// pixel tall.
    pub fn aspect_ratio(&self) -> f32 {
        self.width as f32 / self.height.max(1) as f32
    }
}

/// Read the dimensions of an encoded image without decoding its pixels
pub fn decode_dimensions(bytes: &[u8]) -> Result<NaturalSize> {
    let reader = image::ImageReader::new(Cursor::new(bytes)).with_guessed_format()?;
    let (width, height) = reader.into_dimensions()?;
    Ok(NaturalSize::new(width, height))
}
