use std::num::NonZeroU32;

use image::RgbImage;

use crate::{PixelBuffer, PixelBufferError};

impl TryFrom<RgbImage> for PixelBuffer {
    type Error = PixelBufferError;

    /// Fails if the image has zero width or height.
    fn try_from(image: RgbImage) -> Result<Self, Self::Error> {
        let width = NonZeroU32::new(image.width()).ok_or(PixelBufferError::InvalidBufferSize)?;
        let height = NonZeroU32::new(image.height()).ok_or(PixelBufferError::InvalidBufferSize)?;
        PixelBuffer::from_vec_u8(width, height, image.into_raw())
    }
}

impl From<&PixelBuffer> for RgbImage {
    fn from(buffer: &PixelBuffer) -> Self {
        let (width, height) = (buffer.width(), buffer.height());
        let mut image = RgbImage::new(width, height);
        for (dst, src) in image.pixels_mut().zip(buffer.pixels()) {
            dst.0 = src.components();
        }
        image
    }
}

impl From<PixelBuffer> for RgbImage {
    fn from(buffer: PixelBuffer) -> Self {
        Self::from(&buffer)
    }
}
