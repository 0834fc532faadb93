use std::num::NonZeroU32;

use crate::pixels::Pixel;
use crate::PixelBufferError;

/// Owned RGB image with pixels stored in row-major scanline order.
///
/// Dimensions are fixed at construction and the count of pixels
/// is always equal to `width * height`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelBuffer {
    width: NonZeroU32,
    height: NonZeroU32,
    pixels: Vec<Pixel>,
}

impl PixelBuffer {
    /// Create a black image with given dimensions.
    pub fn new(width: NonZeroU32, height: NonZeroU32) -> Self {
        let pixels_count = width.get() as usize * height.get() as usize;
        Self {
            width,
            height,
            pixels: vec![Pixel::BLACK; pixels_count],
        }
    }

    /// Create an image from vector with pixels.
    pub fn from_pixels(
        width: NonZeroU32,
        height: NonZeroU32,
        pixels: Vec<Pixel>,
    ) -> Result<Self, PixelBufferError> {
        let pixels_count = width.get() as usize * height.get() as usize;
        if pixels.len() != pixels_count {
            return Err(PixelBufferError::InvalidBufferSize);
        }
        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    /// Create an image from buffer with raw RGB components.
    pub fn from_vec_u8(
        width: NonZeroU32,
        height: NonZeroU32,
        buffer: Vec<u8>,
    ) -> Result<Self, PixelBufferError> {
        Self::from_slice_u8(width, height, &buffer)
    }

    /// Create an image by copying raw RGB components from the slice.
    pub fn from_slice_u8(
        width: NonZeroU32,
        height: NonZeroU32,
        buffer: &[u8],
    ) -> Result<Self, PixelBufferError> {
        let pixels_count = width.get() as usize * height.get() as usize;
        if buffer.len() != pixels_count * Pixel::COMPONENTS {
            return Err(PixelBufferError::InvalidBufferSize);
        }
        let pixels = buffer
            .chunks_exact(Pixel::COMPONENTS)
            .map(|c| Pixel::new(c[0], c[1], c[2]))
            .collect();
        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.width.get()
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height.get()
    }

    #[inline]
    pub fn pixels_count(&self) -> usize {
        self.pixels.len()
    }

    #[inline]
    pub fn pixels(&self) -> &[Pixel] {
        &self.pixels
    }

    #[inline]
    pub fn pixels_mut(&mut self) -> &mut [Pixel] {
        &mut self.pixels
    }

    /// Returns pixel with given coordinates or `None`
    /// if coordinates are out of the image boundaries.
    #[inline]
    pub fn get_pixel(&self, x: u32, y: u32) -> Option<Pixel> {
        if x >= self.width() || y >= self.height() {
            return None;
        }
        let index = y as usize * self.width() as usize + x as usize;
        self.pixels.get(index).copied()
    }

    /// Create an image with the same dimensions and black pixels.
    pub(crate) fn new_like(&self) -> Self {
        Self::new(self.width, self.height)
    }

    /// Buffer with raw RGB components of pixels.
    pub fn to_vec_u8(&self) -> Vec<u8> {
        let mut buffer = Vec::with_capacity(self.pixels.len() * Pixel::COMPONENTS);
        for pixel in self.pixels.iter() {
            buffer.extend_from_slice(&pixel.components());
        }
        buffer
    }
}
