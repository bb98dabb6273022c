//! Density clustering (DBSCAN) over marker pixels.
//!
//! Pixels live on an integer lattice, so neighborhoods are answered from a
//! dense index grid over the bounding box and a precomputed disc of offsets
//! instead of a spatial tree.

use std::collections::VecDeque;

use log::debug;
use passchart_core::MarkerPixel;

const EMPTY: u32 = u32::MAX;

/// DBSCAN labels, one per input pixel; `None` is noise.
///
/// A pixel is a core pixel when at least `min_samples` pixels (itself
/// included) lie within `eps`. Clusters are numbered in input order of
/// their first core pixel.
pub fn dbscan(pixels: &[MarkerPixel], eps: f64, min_samples: usize) -> Vec<Option<usize>> {
    let mut labels = vec![None; pixels.len()];
    if pixels.is_empty() {
        return labels;
    }

    let grid = IndexGrid::new(pixels);
    let disc = disc_offsets(eps);
    let neighbors = |i: usize| grid.neighbors(pixels[i], &disc);

    let mut visited = vec![false; pixels.len()];
    let mut next_label = 0usize;

    for seed in 0..pixels.len() {
        if visited[seed] {
            continue;
        }
        visited[seed] = true;
        let seed_neighbors = neighbors(seed);
        if seed_neighbors.len() < min_samples {
            continue;
        }

        let label = next_label;
        next_label += 1;
        labels[seed] = Some(label);

        let mut queue: VecDeque<usize> = seed_neighbors.into();
        while let Some(j) = queue.pop_front() {
            if labels[j].is_none() {
                labels[j] = Some(label);
            }
            if visited[j] {
                continue;
            }
            visited[j] = true;
            let nj = neighbors(j);
            if nj.len() >= min_samples {
                queue.extend(nj);
            }
        }
    }

    labels
}

/// Keep the pixels of the `n` largest clusters; fall back to all pixels
/// when no cluster forms.
pub fn keep_densest(pixels: &[MarkerPixel], n: usize, eps: f64) -> Vec<MarkerPixel> {
    if n == 0 || pixels.is_empty() {
        return pixels.to_vec();
    }
    let labels = dbscan(pixels, eps, n);
    let cluster_count = labels.iter().flatten().max().map_or(0, |&m| m + 1);
    if cluster_count == 0 {
        debug!("density filter found no cluster among {} pixels", pixels.len());
        return pixels.to_vec();
    }

    let mut sizes = vec![0usize; cluster_count];
    for l in labels.iter().flatten() {
        sizes[*l] += 1;
    }
    let mut order: Vec<usize> = (0..cluster_count).collect();
    // Stable: equal sizes keep discovery order.
    order.sort_by(|&a, &b| sizes[b].cmp(&sizes[a]));
    let mut keep = vec![false; cluster_count];
    for &c in order.iter().take(n) {
        keep[c] = true;
    }

    let kept: Vec<MarkerPixel> = pixels
        .iter()
        .zip(&labels)
        .filter(|(_, l)| l.is_some_and(|c| keep[c]))
        .map(|(p, _)| *p)
        .collect();
    debug!(
        "density filter kept {} of {} pixels in {} of {} clusters",
        kept.len(),
        pixels.len(),
        cluster_count.min(n),
        cluster_count
    );
    kept
}

fn disc_offsets(eps: f64) -> Vec<(i64, i64)> {
    let r = eps.max(0.0).floor() as i64;
    let eps2 = eps * eps;
    let mut out = Vec::new();
    for dr in -r..=r {
        for dc in -r..=r {
            if (dr * dr + dc * dc) as f64 <= eps2 {
                out.push((dr, dc));
            }
        }
    }
    out
}

/// Pixel index by position over the bounding box.
struct IndexGrid {
    row0: i64,
    col0: i64,
    rows: i64,
    cols: i64,
    cells: Vec<u32>,
}

impl IndexGrid {
    fn new(pixels: &[MarkerPixel]) -> Self {
        let row0 = pixels.iter().map(|p| p.row).min().unwrap_or(0) as i64;
        let col0 = pixels.iter().map(|p| p.col).min().unwrap_or(0) as i64;
        let rows = pixels.iter().map(|p| p.row).max().unwrap_or(0) as i64 - row0 + 1;
        let cols = pixels.iter().map(|p| p.col).max().unwrap_or(0) as i64 - col0 + 1;
        let mut cells = vec![EMPTY; (rows * cols) as usize];
        for (i, p) in pixels.iter().enumerate() {
            let idx = (p.row as i64 - row0) * cols + (p.col as i64 - col0);
            cells[idx as usize] = i as u32;
        }
        Self {
            row0,
            col0,
            rows,
            cols,
            cells,
        }
    }

    fn neighbors(&self, p: MarkerPixel, disc: &[(i64, i64)]) -> Vec<usize> {
        let r = p.row as i64 - self.row0;
        let c = p.col as i64 - self.col0;
        disc.iter()
            .filter_map(|&(dr, dc)| {
                let (rr, cc) = (r + dr, c + dc);
                if rr < 0 || cc < 0 || rr >= self.rows || cc >= self.cols {
                    return None;
                }
                let v = self.cells[(rr * self.cols + cc) as usize];
                (v != EMPTY).then_some(v as usize)
            })
            .collect()
    }
}
