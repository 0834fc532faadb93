//! Reading and writing of binary PPM (`P6`) images.
//!
//! Header of a file looks like:
//!
//! ```text
//! P6
//! # any number of comment lines
//! 200 300
//! 255
//! ```
//!
//! and is followed by `width * height` RGB triples in scanline order.
use std::fs::File;
use std::io::{BufWriter, Write};
use std::num::NonZeroU32;
use std::path::Path;

use crate::pixels::Pixel;
use crate::{PixelBuffer, PpmError, ReadImageError, WriteImageError};

pub const MAGIC: &str = "P6";
pub const MAX_COLOR_VALUE: u8 = 255;

/// Read and decode the image from a file.
pub fn read_image(path: impl AsRef<Path>) -> Result<PixelBuffer, ReadImageError> {
    let path = path.as_ref();
    std::fs::read(path)
        .map_err(PpmError::from)
        .and_then(|data| decode(&data))
        .map_err(|source| ReadImageError {
            path: path.to_path_buf(),
            source,
        })
}

/// Encode the image and write it into a file.
pub fn write_image(image: &PixelBuffer, path: impl AsRef<Path>) -> Result<(), WriteImageError> {
    let path = path.as_ref();
    let write = || -> Result<(), PpmError> {
        let mut writer = BufWriter::new(File::create(path)?);
        encode(image, &mut writer)?;
        writer.flush()?;
        Ok(())
    };
    write().map_err(|source| WriteImageError {
        path: path.to_path_buf(),
        source,
    })
}

/// Write the header and pixels of the image.
pub fn encode(image: &PixelBuffer, mut writer: impl Write) -> Result<(), PpmError> {
    write!(
        writer,
        "{}\n{} {}\n{}\n",
        MAGIC,
        image.width(),
        image.height(),
        MAX_COLOR_VALUE
    )?;
    writer.write_all(&image.to_vec_u8())?;
    Ok(())
}

/// Decode the image from content of a PPM file.
pub fn decode(data: &[u8]) -> Result<PixelBuffer, PpmError> {
    let mut header = HeaderReader { data, pos: 0 };

    // Magic number must be the very first bytes of the file.
    let magic = header.word();
    if magic != MAGIC.as_bytes() {
        return Err(PpmError::InvalidFormat {
            expected: MAGIC,
            found: String::from_utf8_lossy(magic).into_owned(),
        });
    }

    let width = header.dimension()?;
    let height = header.dimension()?;

    let max_value = header.token();
    if max_value != MAX_COLOR_VALUE.to_string().as_bytes() {
        return Err(PpmError::InvalidMaxValue {
            expected: MAX_COLOR_VALUE,
            found: String::from_utf8_lossy(max_value).into_owned(),
        });
    }
    // Single whitespace character separates the header from pixels.
    let pixels_data = data.get(header.pos + 1..).unwrap_or_default();

    let expected = (width.get() as usize)
        .checked_mul(height.get() as usize)
        .and_then(|count| count.checked_mul(Pixel::COMPONENTS))
        .ok_or(PpmError::InvalidDimensions)?;
    if pixels_data.len() < expected {
        return Err(PpmError::TruncatedPixels {
            expected,
            found: pixels_data.len(),
        });
    }

    PixelBuffer::from_slice_u8(width, height, &pixels_data[..expected])
        .map_err(|_| PpmError::InvalidDimensions)
}

struct HeaderReader<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> HeaderReader<'a> {
    /// Skip whitespaces and comments, then return the next token.
    fn token(&mut self) -> &'a [u8] {
        loop {
            match self.data.get(self.pos) {
                Some(c) if c.is_ascii_whitespace() => self.pos += 1,
                Some(b'#') => {
                    while let Some(&c) = self.data.get(self.pos) {
                        self.pos += 1;
                        if c == b'\n' {
                            break;
                        }
                    }
                }
                _ => break,
            }
        }
        self.word()
    }

    /// Return bytes up to the next whitespace or comment.
    fn word(&mut self) -> &'a [u8] {
        let data = self.data;
        let start = self.pos;
        while let Some(c) = data.get(self.pos) {
            if c.is_ascii_whitespace() || *c == b'#' {
                break;
            }
            self.pos += 1;
        }
        &data[start..self.pos]
    }

    fn dimension(&mut self) -> Result<NonZeroU32, PpmError> {
        std::str::from_utf8(self.token())
            .ok()
            .and_then(|s| s.parse().ok())
            .ok_or(PpmError::InvalidDimensions)
    }
}
