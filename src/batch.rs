use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};
use std::time::Duration;

use log::{debug, info};
use rayon::prelude::*;

use crate::filter::FilterEngine;
use crate::threading::WorkerCount;
use crate::{ppm, BatchError, ImageError};

/// Running total of time spent on filtering images.
///
/// It is shared between tasks of a batch, every update is done
/// inside a single critical section.
#[derive(Debug, Default)]
pub struct ElapsedTotal {
    total: Mutex<Duration>,
}

impl ElapsedTotal {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&self, elapsed: Duration) {
        let mut total = self.total.lock().unwrap_or_else(PoisonError::into_inner);
        *total += elapsed;
    }

    pub fn get(&self) -> Duration {
        *self.total.lock().unwrap_or_else(PoisonError::into_inner)
    }

}

/// Template of names of result files: `{prefix}{position}.{extension}`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputNaming {
    pub prefix: String,
    pub extension: String,
}

impl Default for OutputNaming {
    fn default() -> Self {
        Self {
            prefix: "laplacian".to_owned(),
            extension: "ppm".to_owned(),
        }
    }
}

impl OutputNaming {
    /// Name of result file for the image with given 1-based position.
    pub fn file_name(&self, position: usize) -> String {
        debug_assert!(position > 0, "positions of images start from 1");
        format!("{}{}.{}", self.prefix, position, self.extension)
    }
}

/// What to do with the rest of a batch if one of images has failed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ErrorPolicy {
    /// Stop the batch and return the error.
    #[default]
    Abort,
    /// Process remaining images and report all failures.
    Continue,
}

/// Options of [BatchCoordinator].
#[derive(Debug, Clone)]
pub struct BatchOptions {
    pub worker_count: WorkerCount,
    pub output_dir: PathBuf,
    pub naming: OutputNaming,
    pub error_policy: ErrorPolicy,
}

impl Default for BatchOptions {
    fn default() -> Self {
        Self {
            worker_count: WorkerCount::default(),
            output_dir: PathBuf::from("."),
            naming: OutputNaming::default(),
            error_policy: ErrorPolicy::default(),
        }
    }
}

impl BatchOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set count of workers used to filter every image.
    ///
    /// By default, 4 workers are used.
    pub fn worker_count(mut self, worker_count: WorkerCount) -> Self {
        self.worker_count = worker_count;
        self
    }

    /// Set directory for result images.
    ///
    /// By default, results are saved into current directory.
    pub fn output_dir(mut self, output_dir: impl Into<PathBuf>) -> Self {
        self.output_dir = output_dir.into();
        self
    }

    pub fn naming(mut self, naming: OutputNaming) -> Self {
        self.naming = naming;
        self
    }

    /// Set behaviour on failure of an image.
    ///
    /// By default, the whole batch is aborted.
    pub fn error_policy(mut self, error_policy: ErrorPolicy) -> Self {
        self.error_policy = error_policy;
        self
    }
}

#[derive(Debug, Clone)]
pub struct ImageReport {
    /// 1-based position of the image in the batch.
    pub position: usize,
    pub source: PathBuf,
    pub output: PathBuf,
    pub width: u32,
    pub height: u32,
    pub elapsed: Duration,
}

#[derive(Debug)]
pub struct ImageFailure {
    pub position: usize,
    pub source: PathBuf,
    /// Time of filtering if the image failed after it had been filtered.
    /// This time is included into [BatchReport::total_elapsed].
    pub elapsed: Option<Duration>,
    pub error: ImageError,
}

#[derive(Debug)]
pub struct BatchReport {
    /// Reports of successfully processed images ordered by position.
    pub images: Vec<ImageReport>,
    /// Always empty if [ErrorPolicy::Abort] is used.
    pub failures: Vec<ImageFailure>,
    pub total_elapsed: Duration,
}

impl BatchReport {
    pub fn total_elapsed_secs(&self) -> f64 {
        self.total_elapsed.as_secs_f64()
    }

    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Filters a batch of PPM files concurrently, one task per image.
#[derive(Debug, Clone, Default)]
pub struct BatchCoordinator {
    options: BatchOptions,
}

impl BatchCoordinator {
    pub fn new(options: BatchOptions) -> Self {
        Self { options }
    }

    #[inline]
    pub fn options(&self) -> &BatchOptions {
        &self.options
    }

    /// Read, filter and save every image.
    ///
    /// The result of the image with 1-based position `i` is saved into
    /// the file with name built by [OutputNaming::file_name].
    pub fn process_images<P>(&self, paths: &[P]) -> Result<BatchReport, BatchError>
    where
        P: AsRef<Path> + Sync,
    {
        if paths.is_empty() {
            return Err(BatchError::EmptyBatch);
        }
        let engine = FilterEngine::new(self.options.worker_count);
        let total = ElapsedTotal::new();

        let tasks = paths.par_iter().enumerate();

        let (images, failures) = match self.options.error_policy {
            ErrorPolicy::Abort => {
                let images = tasks
                    .map(|(i, path)| {
                        let position = i + 1;
                        let path: &Path = path.as_ref();
                        self.process_image(&engine, &total, position, path)
                            .map_err(|failure| BatchError::Image {
                                position,
                                path: failure.source,
                                source: failure.error,
                            })
                    })
                    .collect::<Result<Vec<_>, _>>()?;
                (images, Vec::new())
            }
            ErrorPolicy::Continue => {
                let results: Vec<_> = tasks
                    .map(|(i, path)| {
                        let position = i + 1;
                        let path: &Path = path.as_ref();
                        self.process_image(&engine, &total, position, path)
                    })
                    .collect();
                let mut images = Vec::with_capacity(results.len());
                let mut failures = Vec::new();
                for result in results {
                    match result {
                        Ok(report) => images.push(report),
                        Err(failure) => failures.push(failure),
                    }
                }
                (images, failures)
            }
        };

        let total_elapsed = total.get();
        info!(
            "Processed {} of {} images in {:.4} s",
            images.len(),
            paths.len(),
            total_elapsed.as_secs_f64()
        );
        Ok(BatchReport {
            images,
            failures,
            total_elapsed,
        })
    }

    fn process_image(
        &self,
        engine: &FilterEngine,
        total: &ElapsedTotal,
        position: usize,
        path: &Path,
    ) -> Result<ImageReport, ImageFailure> {
        let failure = |elapsed: Option<Duration>, error: ImageError| ImageFailure {
            position,
            source: path.to_path_buf(),
            elapsed,
            error,
        };

        debug!("Reading image #{position}: {path:?}");
        let src_image = ppm::read_image(path).map_err(|err| failure(None, err.into()))?;
        let (width, height) = (src_image.width(), src_image.height());
        debug!("Image #{position} read successfully. Width: {width}, Height: {height}");

        let filtered = engine
            .filter(&src_image)
            .map_err(|err| failure(None, err.into()))?;
        drop(src_image);
        total.add(filtered.elapsed);

        let output = self
            .options
            .output_dir
            .join(self.options.naming.file_name(position));
        debug!("Writing filtered image #{position} to {output:?}");
        ppm::write_image(&filtered.image, &output)
            .map_err(|err| failure(Some(filtered.elapsed), err.into()))?;

        info!(
            "{path:?} -> {output:?} ({width}x{height}, {:.4} s)",
            filtered.elapsed.as_secs_f64()
        );
        Ok(ImageReport {
            position,
            source: path.to_path_buf(),
            output,
            width,
            height,
            elapsed: filtered.elapsed,
        })
    }
}

/// Filter images with default options and return total filtering time in seconds.
pub fn process_images<P>(paths: &[P]) -> Result<f64, BatchError>
where
    P: AsRef<Path> + Sync,
{
    BatchCoordinator::default()
        .process_images(paths)
        .map(|report| report.total_elapsed_secs())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn output_file_names() {
        let naming = OutputNaming::default();
        assert_eq!(naming.file_name(1), "laplacian1.ppm");
        assert_eq!(naming.file_name(3), "laplacian3.ppm");
        assert_eq!(naming.file_name(12), "laplacian12.ppm");

        let naming = OutputNaming {
            prefix: "edges_".to_owned(),
            extension: "pnm".to_owned(),
        };
        assert_eq!(naming.file_name(7), "edges_7.pnm");
    }

    #[test]
    fn elapsed_total_accumulates_concurrent_updates() {
        let total = ElapsedTotal::new();
        (0..1000u64)
            .into_par_iter()
            .for_each(|i| total.add(Duration::from_micros(i)));
        assert_eq!(total.get(), Duration::from_micros((0..1000).sum()));
    }
}
