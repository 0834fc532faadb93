use itertools::Itertools;
use laplacian_filter as lf;

fn worker_count(v: usize) -> lf::WorkerCount {
    lf::WorkerCount::new(v).unwrap()
}

fn assert_exact_partition(total_pixels: usize, workers: usize) {
    let ranges = lf::partition(total_pixels, worker_count(workers));
    assert_eq!(ranges.len(), workers, "total={total_pixels} workers={workers}");
    assert_eq!(ranges[0].start, 0);
    for (left, right) in ranges.iter().tuple_windows() {
        assert_eq!(
            left.end(),
            right.start,
            "gap or overlap: total={total_pixels} workers={workers}"
        );
    }
    assert_eq!(ranges.last().unwrap().end(), total_pixels);
    let covered: usize = ranges.iter().map(|r| r.size).sum();
    assert_eq!(covered, total_pixels);
}

#[test]
fn ranges_cover_all_pixels_without_overlap() {
    for total_pixels in (0..=64).chain([99, 1000, 1001, 1023, 65_537]) {
        for workers in 1..=9 {
            assert_exact_partition(total_pixels, workers);
        }
    }
}

#[test]
fn last_worker_takes_remainder() {
    let ranges = lf::partition(10, worker_count(4));
    let sizes = ranges.iter().map(|r| (r.start, r.size)).collect_vec();
    assert_eq!(sizes, vec![(0, 2), (2, 2), (4, 2), (6, 4)]);
}

#[test]
fn fewer_pixels_than_workers() {
    let ranges = lf::partition(3, worker_count(4));
    assert!(ranges[..3].iter().all(|r| r.is_empty()));
    assert_eq!(ranges[3], lf::WorkRange { start: 0, size: 3 });

    let ranges = lf::partition(0, worker_count(2));
    assert!(ranges.iter().all(|r| r.is_empty()));
}

#[test]
fn single_worker_takes_everything() {
    let ranges = lf::partition(12, worker_count(1));
    assert_eq!(ranges, vec![lf::WorkRange { start: 0, size: 12 }]);
}

#[test]
fn worker_count_parsing() {
    assert_eq!(lf::WorkerCount::default().get(), 4);
    assert_eq!("8".parse::<lf::WorkerCount>().unwrap().get(), 8);
    assert!("0".parse::<lf::WorkerCount>().is_err());
    assert!("-1".parse::<lf::WorkerCount>().is_err());
    assert!(lf::WorkerCount::new(0).is_none());
}
