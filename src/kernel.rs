//! The 3x3 convolution kernel used for edge detection.
use crate::pixels::Pixel;
use crate::PixelBuffer;

/// Fixed 3x3 matrix of signed weights, stored in row-major order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConvolutionKernel {
    weights: [[i32; 3]; 3],
}

/// The Laplacian 3x3 kernel.
pub const LAPLACIAN_3X3: ConvolutionKernel = ConvolutionKernel {
    weights: [[-1, -1, -1], [-1, 8, -1], [-1, -1, -1]],
};

impl ConvolutionKernel {
    /// Width and height of the kernel.
    pub const SIZE: u32 = 3;

    /// Weight of the tap in column `fx` and row `fy`.
    ///
    /// # Panics
    ///
    /// If `fx` or `fy` is not less than [ConvolutionKernel::SIZE].
    #[inline]
    pub fn weight(&self, fx: u32, fy: u32) -> i32 {
        self.weights[fy as usize][fx as usize]
    }

    /// Compute the filtered value of the pixel with given coordinates.
    ///
    /// The kernel origin is placed on the pixel. Taps that fall outside
    /// of the image contribute nothing, as if the image were surrounded
    /// by black pixels.
    pub fn apply(&self, image: &PixelBuffer, x: u32, y: u32) -> Pixel {
        let width = image.width() as i64;
        let height = image.height() as i64;
        let pixels = image.pixels();

        let mut red = 0i32;
        let mut green = 0i32;
        let mut blue = 0i32;

        for fy in 0..Self::SIZE {
            let ny = y as i64 + fy as i64 - 1;
            if ny < 0 || ny >= height {
                continue;
            }
            for fx in 0..Self::SIZE {
                let nx = x as i64 + fx as i64 - 1;
                if nx < 0 || nx >= width {
                    continue;
                }
                let weight = self.weight(fx, fy);
                let neighbor = pixels[(ny * width + nx) as usize];
                red += neighbor.r as i32 * weight;
                green += neighbor.g as i32 * weight;
                blue += neighbor.b as i32 * weight;
            }
        }

        Pixel::new(clamp_channel(red), clamp_channel(green), clamp_channel(blue))
    }
}

impl Default for ConvolutionKernel {
    fn default() -> Self {
        LAPLACIAN_3X3
    }
}

/// Truncate values smaller than zero to zero and larger than 255 to 255.
#[inline(always)]
pub fn clamp_channel(v: i32) -> u8 {
    v.clamp(0, u8::MAX as i32) as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn laplacian_weights_sum_to_zero() {
        let mut sum = 0;
        for fy in 0..ConvolutionKernel::SIZE {
            for fx in 0..ConvolutionKernel::SIZE {
                sum += LAPLACIAN_3X3.weight(fx, fy);
            }
        }
        assert_eq!(sum, 0);
        assert_eq!(LAPLACIAN_3X3.weight(1, 1), 8);
        assert_eq!(LAPLACIAN_3X3.weight(0, 2), -1);
    }

    #[test]
    fn clamp_channel_truncates() {
        assert_eq!(clamp_channel(-1275), 0);
        assert_eq!(clamp_channel(-1), 0);
        assert_eq!(clamp_channel(0), 0);
        assert_eq!(clamp_channel(128), 128);
        assert_eq!(clamp_channel(255), 255);
        assert_eq!(clamp_channel(256), 255);
        assert_eq!(clamp_channel(2040), 255);
    }
}
