use std::num::NonZeroU32;
use std::path::{Path, PathBuf};

use laplacian_filter::{ppm, Pixel, PixelBuffer};

pub fn non_zero_u32(v: u32) -> NonZeroU32 {
    NonZeroU32::new(v).unwrap()
}

/// Create an image where every pixel is computed from its coordinates.
pub fn image_from_fn(width: u32, height: u32, f: impl Fn(u32, u32) -> Pixel) -> PixelBuffer {
    let mut pixels = Vec::with_capacity((width * height) as usize);
    for y in 0..height {
        for x in 0..width {
            pixels.push(f(x, y));
        }
    }
    PixelBuffer::from_pixels(non_zero_u32(width), non_zero_u32(height), pixels).unwrap()
}

pub fn filled_image(width: u32, height: u32, pixel: Pixel) -> PixelBuffer {
    image_from_fn(width, height, |_, _| pixel)
}

/// Image with a noisy pattern which produces edges all over it.
pub fn pattern_image(width: u32, height: u32) -> PixelBuffer {
    image_from_fn(width, height, |x, y| {
        let v = x.wrapping_mul(7919) ^ y.wrapping_mul(104_729);
        Pixel::new((v % 251) as u8, (v / 3 % 256) as u8, ((x + y) * 17 % 256) as u8)
    })
}

/// Straightforward single-threaded version of the Laplacian filter
/// written with 2D coordinates.
pub fn reference_laplacian(image: &PixelBuffer) -> PixelBuffer {
    const KERNEL: [[i32; 3]; 3] = [[-1, -1, -1], [-1, 8, -1], [-1, -1, -1]];
    image_from_fn(image.width(), image.height(), |x, y| {
        let mut sums = [0i32; 3];
        for (fy, row) in KERNEL.iter().enumerate() {
            for (fx, &weight) in row.iter().enumerate() {
                let nx = x as i64 + fx as i64 - 1;
                let ny = y as i64 + fy as i64 - 1;
                if nx < 0 || ny < 0 {
                    continue;
                }
                if let Some(neighbor) = image.get_pixel(nx as u32, ny as u32) {
                    for (sum, c) in sums.iter_mut().zip(neighbor.components()) {
                        *sum += weight * c as i32;
                    }
                }
            }
        }
        let [r, g, b] = sums.map(|s| s.clamp(0, 255) as u8);
        Pixel::new(r, g, b)
    })
}

pub fn save_ppm(image: &PixelBuffer, dir: &Path, name: &str) -> PathBuf {
    let path = dir.join(name);
    ppm::write_image(image, &path).unwrap();
    path
}
