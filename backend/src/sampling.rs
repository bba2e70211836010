use shared::Coordinate;

/// Reduce `path` to at most `target` coordinates, keeping the first and last.
///
/// Samples are spread uniformly over *indices*, not over arc length: long
/// straight segments described by few source points end up under-sampled
/// while dense polyline stretches are over-sampled. Downstream statistics are
/// calibrated against this density profile, so it is intentionally kept.
///
/// `target < 2` cannot preserve both endpoints; it yields the first
/// coordinate (or nothing for `0`) rather than dividing by zero.
pub fn sample_path(path: &[Coordinate], target: usize) -> Vec<Coordinate> {
    if path.len() <= target {
        return path.to_vec();
    }
    match target {
        0 => return Vec::new(),
        1 => return vec![path[0]],
        _ => {}
    }

    let interval = (path.len() - 1) as f64 / (target - 1) as f64;
    (0..target)
        .map(|i| {
            let idx = (i as f64 * interval).round() as usize;
            path[idx.min(path.len() - 1)]
        })
        .collect()
}
