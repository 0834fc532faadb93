use std::time::{Duration, Instant};

use log::debug;
use rayon::prelude::*;
use rayon::ThreadPoolBuilder;

use crate::convolution::ConvolutionWorker;
use crate::kernel::{ConvolutionKernel, LAPLACIAN_3X3};
use crate::threading::{partition, split_for_workers, WorkerCount};
use crate::{FilterError, PixelBuffer};

/// Result of filtering one image.
#[derive(Debug, Clone)]
pub struct Filtered {
    pub image: PixelBuffer,
    /// Wall-clock duration of the parallel convolution phase.
    pub elapsed: Duration,
}

/// Applies the Laplacian kernel to an image using a fixed count of worker threads.
#[derive(Debug, Clone, Copy, Default)]
pub struct FilterEngine {
    kernel: ConvolutionKernel,
    worker_count: WorkerCount,
}

impl FilterEngine {
    pub fn new(worker_count: WorkerCount) -> Self {
        Self {
            kernel: LAPLACIAN_3X3,
            worker_count,
        }
    }

    #[inline]
    pub fn worker_count(&self) -> WorkerCount {
        self.worker_count
    }

    /// Filter the source image and return a new image with the same dimensions.
    ///
    /// Every worker computes an equal share of pixels, the last one also takes
    /// the rest of the work. The result is returned only after all
    /// workers have finished.
    pub fn filter(&self, src_image: &PixelBuffer) -> Result<Filtered, FilterError> {
        let pixels_count = src_image.pixels_count();
        let mut dst_image = src_image.new_like();

        let ranges = partition(pixels_count, self.worker_count);
        let workers = ranges
            .iter()
            .map(|&range| ConvolutionWorker::new(&self.kernel, src_image, range))
            .collect::<Result<Vec<_>, _>>()?;
        let dst_parts = split_for_workers(dst_image.pixels_mut(), &ranges).map_err(|range| {
            FilterError::InvalidWorkRange {
                start: range.start,
                size: range.size,
                pixels_count,
            }
        })?;

        debug!(
            "Filter image {}x{} with {} workers",
            src_image.width(),
            src_image.height(),
            self.worker_count
        );

        let start_time = Instant::now();
        let pool = ThreadPoolBuilder::new()
            .num_threads(self.worker_count.get())
            .thread_name(|i| format!("laplacian-worker-{i}"))
            .build()?;
        pool.install(|| {
            workers
                .into_par_iter()
                .zip(dst_parts)
                .with_max_len(1)
                .try_for_each(|(worker, dst_pixels)| worker.run(dst_pixels))
        })?;
        let elapsed = start_time.elapsed();

        debug!("Image has been filtered in {:.6} s", elapsed.as_secs_f64());
        Ok(Filtered {
            image: dst_image,
            elapsed,
        })
    }
}
