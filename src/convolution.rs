use crate::kernel::ConvolutionKernel;
use crate::pixels::Pixel;
use crate::threading::WorkRange;
use crate::{FilterError, PixelBuffer};

/// Computes the kernel output for one range of pixels of the source image.
///
/// Workers of the same image share read-only access to the source image
/// and each one writes only into its own part of the destination buffer.
#[derive(Debug, Clone, Copy)]
pub struct ConvolutionWorker<'a> {
    kernel: &'a ConvolutionKernel,
    src_image: &'a PixelBuffer,
    range: WorkRange,
}

impl<'a> ConvolutionWorker<'a> {
    pub fn new(
        kernel: &'a ConvolutionKernel,
        src_image: &'a PixelBuffer,
        range: WorkRange,
    ) -> Result<Self, FilterError> {
        let pixels_count = src_image.pixels_count();
        match range.start.checked_add(range.size) {
            Some(end) if end <= pixels_count => Ok(Self {
                kernel,
                src_image,
                range,
            }),
            _ => Err(FilterError::InvalidWorkRange {
                start: range.start,
                size: range.size,
                pixels_count,
            }),
        }
    }

    #[inline]
    pub fn range(&self) -> WorkRange {
        self.range
    }

    /// Write filtered pixels of the range into `dst_pixels`.
    ///
    /// `dst_pixels[0]` corresponds to the pixel with index `range.start`.
    pub fn run(&self, dst_pixels: &mut [Pixel]) -> Result<(), FilterError> {
        if dst_pixels.len() != self.range.size {
            return Err(FilterError::InvalidWorkRange {
                start: self.range.start,
                size: dst_pixels.len(),
                pixels_count: self.src_image.pixels_count(),
            });
        }
        let width = self.src_image.width() as usize;
        for (i, dst_pixel) in self.range.indexes().zip(dst_pixels.iter_mut()) {
            let x = (i % width) as u32;
            let y = (i / width) as u32;
            *dst_pixel = self.kernel.apply(self.src_image, x, y);
        }
        Ok(())
    }
}
