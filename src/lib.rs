#![doc = include_str!("../README.md")]
//!
//! ## Feature flags
#![doc = document_features::document_features!()]

pub use batch::{
    process_images, BatchCoordinator, BatchOptions, BatchReport, ElapsedTotal, ErrorPolicy,
    ImageFailure, ImageReport, OutputNaming,
};
pub use convolution::ConvolutionWorker;
pub use errors::*;
pub use filter::{FilterEngine, Filtered};
pub use kernel::{clamp_channel, ConvolutionKernel, LAPLACIAN_3X3};
pub use pixels::Pixel;
pub use threading::{partition, WorkRange, WorkerCount};

pub use crate::image::PixelBuffer;

mod batch;
mod convolution;
mod errors;
mod filter;
mod image;
#[cfg(feature = "image")]
mod image_crate;
mod kernel;
pub mod pixels;
pub mod ppm;
mod threading;
