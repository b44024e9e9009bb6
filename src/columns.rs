use tracing::trace;

use crate::rows::Row;
use crate::stats::median;

pub const KMEANS_MAX_ITERATIONS: usize = 20;

/// Widest row length, i.e. the presumed column count.
#[must_use]
pub fn estimate_column_count(rows: &[Row]) -> usize {
    rows.iter().map(Vec::len).max().unwrap_or(0)
}

/// Index of the center closest to `value`. Ties keep the lowest index.
pub(crate) fn nearest_center(centers: &[f64], value: f64) -> usize {
    let mut best = 0;
    let mut best_distance = f64::INFINITY;
    for (index, center) in centers.iter().enumerate() {
        let distance = (value - center).abs();
        if distance < best_distance {
            best = index;
            best_distance = distance;
        }
    }
    best
}

#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_precision_loss,
    clippy::cast_sign_loss
)]
fn seed_centers(sorted: &[f64], k: usize) -> Vec<f64> {
    let last = sorted.len() - 1;
    let span = k.saturating_sub(1).max(1);
    (0..k)
        .map(|i| {
            let t = i as f64 / span as f64;
            let index = (t * last as f64) as usize;
            sorted[index.min(last)]
        })
        .collect()
}

/// One-dimensional k-means that updates each cluster to the median of its
/// members. Seeds are evenly spaced quantiles of the sorted points.
///
/// Returns `k` centers in ascending order (duplicates possible), or nothing
/// when there are no points or `k` is zero.
#[must_use]
pub fn kmeans_1d(points: &[f64], k: usize, max_iterations: usize) -> Vec<f64> {
    if points.is_empty() || k == 0 {
        return Vec::new();
    }

    let mut sorted = points.to_vec();
    sorted.sort_by(f64::total_cmp);
    let mut centers = seed_centers(&sorted, k);

    for iteration in 0..max_iterations {
        let mut buckets = vec![Vec::new(); k];
        for &point in &sorted {
            buckets[nearest_center(&centers, point)].push(point);
        }

        let mut changed = false;
        for (center, bucket) in centers.iter_mut().zip(&buckets) {
            if bucket.is_empty() {
                continue;
            }
            let updated = median(bucket);
            if updated != *center {
                *center = updated;
                changed = true;
            }
        }

        if !changed {
            trace!(iteration, k, "k-means converged");
            break;
        }
    }

    centers.sort_by(f64::total_cmp);
    centers
}

/// Column centers for the given rows: strictly increasing, one per column.
#[must_use]
pub fn column_centers(rows: &[Row], k: usize) -> Vec<f64> {
    let points = rows
        .iter()
        .flat_map(|row| row.iter().map(|word| word.rect.mid_x()))
        .collect::<Vec<_>>();

    let mut centers = kmeans_1d(&points, k, KMEANS_MAX_ITERATIONS);
    centers.dedup();
    centers
}
