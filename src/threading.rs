use std::fmt;
use std::num::NonZeroUsize;
use std::ops::Range;
use std::str::FromStr;

use crate::pixels::Pixel;

/// Count of workers used to filter one image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct WorkerCount(NonZeroUsize);

impl WorkerCount {
    pub const DEFAULT: Self = match NonZeroUsize::new(4) {
        Some(v) => Self(v),
        None => unreachable!(),
    };

    /// Returns `None` if `count` is zero.
    pub fn new(count: usize) -> Option<Self> {
        NonZeroUsize::new(count).map(Self)
    }

    #[inline]
    pub fn get(&self) -> usize {
        self.0.get()
    }
}

impl Default for WorkerCount {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl From<NonZeroUsize> for WorkerCount {
    fn from(count: NonZeroUsize) -> Self {
        Self(count)
    }
}

impl FromStr for WorkerCount {
    type Err = <NonZeroUsize as FromStr>::Err;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse().map(Self)
    }
}

impl fmt::Display for WorkerCount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Half-open range `[start, start + size)` of flattened pixel indexes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct WorkRange {
    pub start: usize,
    pub size: usize,
}

impl WorkRange {
    #[inline]
    pub fn end(&self) -> usize {
        self.start + self.size
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    #[inline]
    pub fn indexes(&self) -> Range<usize> {
        self.start..self.end()
    }
}

/// Split `total_pixels` into `worker_count` contiguous ranges.
///
/// Every worker gets `total_pixels / worker_count` pixels, the last one
/// also takes the rest of the division. If there are fewer pixels than
/// workers, all of them go to the last worker.
pub fn partition(total_pixels: usize, worker_count: WorkerCount) -> Vec<WorkRange> {
    let count = worker_count.get();
    let base = total_pixels / count;
    let remainder = total_pixels % count;
    (0..count)
        .map(|i| WorkRange {
            start: i * base,
            size: if i == count - 1 { base + remainder } else { base },
        })
        .collect()
}

/// Split the destination buffer into mutable parts matching to given ranges.
///
/// Returns the first range that breaks the contiguity, or the uncovered
/// tail of the buffer, as an error.
pub(crate) fn split_for_workers<'a>(
    mut pixels: &'a mut [Pixel],
    ranges: &[WorkRange],
) -> Result<Vec<&'a mut [Pixel]>, WorkRange> {
    let mut parts = Vec::with_capacity(ranges.len());
    let mut offset = 0;
    for &range in ranges {
        if range.start != offset || range.size > pixels.len() {
            return Err(range);
        }
        let (part, rest) = pixels.split_at_mut(range.size);
        parts.push(part);
        pixels = rest;
        offset = range.end();
    }
    if !pixels.is_empty() {
        return Err(WorkRange {
            start: offset,
            size: pixels.len(),
        });
    }
    Ok(parts)
}
