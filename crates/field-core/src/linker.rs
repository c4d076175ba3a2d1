//! Proximity links between planar particles.
//!
//! A pair is linked when its squared distance is strictly below the
//! threshold `(width / d) * (height / d)`. Small populations use the plain
//! pairwise scan; larger ones bucket particles into a cell grid whose side is
//! the threshold distance, which yields the same pairs.

use crate::planar::Particle;
use crate::viewport::Viewport;
use fnv::FnvHashMap;
use smallvec::SmallVec;

/// Two linked particles by index, with their squared distance.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Link {
    pub a: usize,
    pub b: usize,
    pub dist_sq: f64,
}

/// Squared-distance threshold for a viewport; 0 (no links) when degenerate.
#[inline]
pub fn link_threshold(viewport: Viewport, divisor: f64) -> f64 {
    if viewport.is_degenerate() {
        return 0.0;
    }
    (viewport.width / divisor) * (viewport.height / divisor)
}

/// Line opacity before the global alpha factor, clamped to [0, 1].
#[inline]
pub fn link_opacity(dist_sq: f64, falloff: f64) -> f64 {
    (1.0 - dist_sq / falloff).clamp(0.0, 1.0)
}

/// Fill `out` with every linked pair `a < b`, ordered by `(a, b)`.
pub fn collect_links(points: &[Particle], threshold: f64, grid_min_points: usize, out: &mut Vec<Link>) {
    if threshold <= 0.0 || points.len() < 2 {
        return;
    }
    if points.len() >= grid_min_points {
        grid_links(points, threshold, out);
    } else {
        pairwise_links(points, threshold, out);
    }
}

/// O(n²) scan over unordered pairs. Self-pairs are skipped.
pub fn pairwise_links(points: &[Particle], threshold: f64, out: &mut Vec<Link>) {
    for a in 0..points.len() {
        let pa = points[a].position;
        for (b, pb) in points.iter().enumerate().skip(a + 1) {
            let dist_sq = pa.distance_squared(pb.position);
            if dist_sq < threshold {
                out.push(Link { a, b, dist_sq });
            }
        }
    }
}

type Cell = (i64, i64);

// Widens the cell side past the rounded square root so a pair just inside the
// threshold can never land two cells apart.
const CELL_SIDE_SLACK: f64 = 1.0 + 1e-9;

#[inline]
fn cell_of(x: f64, y: f64, side: f64) -> Cell {
    ((x / side).floor() as i64, (y / side).floor() as i64)
}

/// Cell-grid scan. Any linked pair is closer than one cell side, so it sits
/// in the same or an adjacent cell. `threshold` must be positive.
pub fn grid_links(points: &[Particle], threshold: f64, out: &mut Vec<Link>) {
    let side = threshold.sqrt() * CELL_SIDE_SLACK;
    let mut cells: FnvHashMap<Cell, SmallVec<[usize; 8]>> = FnvHashMap::default();
    for (i, p) in points.iter().enumerate() {
        cells
            .entry(cell_of(p.position.x, p.position.y, side))
            .or_default()
            .push(i);
    }

    let start = out.len();
    for (a, pa) in points.iter().enumerate() {
        let (cx, cy) = cell_of(pa.position.x, pa.position.y, side);
        for dx in -1i64..=1 {
            for dy in -1i64..=1 {
                let key = (cx.wrapping_add(dx), cy.wrapping_add(dy));
                let Some(bucket) = cells.get(&key) else {
                    continue;
                };
                for &b in bucket.iter().filter(|&&b| b > a) {
                    let dist_sq = pa.position.distance_squared(points[b].position);
                    if dist_sq < threshold {
                        out.push(Link { a, b, dist_sq });
                    }
                }
            }
        }
    }
    out[start..].sort_unstable_by_key(|l| (l.a, l.b));
}
