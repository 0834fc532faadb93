//! Contains the pixel type used by [PixelBuffer](crate::PixelBuffer).

/// RGB pixel with 8-bit components.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[repr(C)]
pub struct Pixel {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Pixel {
    /// Count of components in one pixel.
    pub const COMPONENTS: usize = 3;

    pub const BLACK: Self = Self::new(0, 0, 0);
    pub const WHITE: Self = Self::new(255, 255, 255);

    #[inline]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    #[inline]
    pub const fn gray(v: u8) -> Self {
        Self::new(v, v, v)
    }

    #[inline]
    pub fn components(&self) -> [u8; 3] {
        [self.r, self.g, self.b]
    }
}
