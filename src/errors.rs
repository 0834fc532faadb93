use std::io;
use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum PixelBufferError {
    #[error("Size of buffer is not equal to width * height pixels")]
    InvalidBufferSize,
}

/// Errors of decoding and encoding the binary PPM format.
#[derive(Error, Debug)]
pub enum PpmError {
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error("Invalid image format (expected {expected:?}, found {found:?})")]
    InvalidFormat {
        expected: &'static str,
        found: String,
    },
    #[error("Invalid image size (width, height)")]
    InvalidDimensions,
    #[error("Invalid max color value (expected {expected}, found {found:?})")]
    InvalidMaxValue { expected: u8, found: String },
    #[error("Unable to read pixel data (expected {expected} bytes, found {found})")]
    TruncatedPixels { expected: usize, found: usize },
}

#[derive(Error, Debug)]
#[error("Failed to read image from {path:?}")]
pub struct ReadImageError {
    pub path: PathBuf,
    #[source]
    pub source: PpmError,
}

#[derive(Error, Debug)]
#[error("Failed to write image into {path:?}")]
pub struct WriteImageError {
    pub path: PathBuf,
    #[source]
    pub source: PpmError,
}

#[derive(Error, Debug)]
pub enum FilterError {
    #[error("Unable to create worker threads")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
    #[error("Work range [{start}, {start}+{size}) doesn't match to image of {pixels_count} pixels")]
    InvalidWorkRange {
        start: usize,
        size: usize,
        pixels_count: usize,
    },
}

/// Reason of failure of one image in a batch.
#[derive(Error, Debug)]
pub enum ImageError {
    #[error(transparent)]
    Read(#[from] ReadImageError),
    #[error("Failed to filter image")]
    Filter(#[from] FilterError),
    #[error(transparent)]
    Write(#[from] WriteImageError),
}

#[derive(Error, Debug)]
pub enum BatchError {
    #[error("List of images is empty")]
    EmptyBatch,
    #[error("Failed to process image #{position} ({path:?})")]
    Image {
        position: usize,
        path: PathBuf,
        #[source]
        source: ImageError,
    },
}
