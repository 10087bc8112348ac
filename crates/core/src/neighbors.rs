//! Four-nearest-neighbor search under periodic boundary conditions.
//!
//! For every atom in a frame, finds the four nearest other atoms by
//! minimum-image distance and returns the displacement vectors pointing to
//! them. This is the O(N^2) geometry pass behind the tetrahedral order
//! parameter.

use crate::pbc::minimum_image_delta;
use crate::util::norm;
use rayon::prelude::*;
use std::cmp::Ordering;

/// Number of neighbors defining the tetrahedral environment.
pub const N_NEIGHBORS: usize = 4;

/// All-pairs minimum-image distance matrix, stored row-major as a flat
/// `n * n` vector. Symmetric with a zero diagonal.
pub fn distance_matrix(coords: &[[f64; 3]], box_size: &[f64; 3]) -> Vec<f64> {
    let n = coords.len();
    let mut dist = vec![0.0f64; n * n];
    for i in 0..n {
        for j in (i + 1)..n {
            let delta = minimum_image_delta(&coords[i], &coords[j], box_size);
            let d = norm(&delta);
            dist[i * n + j] = d;
            dist[j * n + i] = d;
        }
    }
    dist
}

/// Order neighbor candidates by distance, breaking ties by lower atom
/// index so selection is deterministic.
#[inline]
fn by_distance(a: &(f64, usize), b: &(f64, usize)) -> Ordering {
    a.0.partial_cmp(&b.0)
        .unwrap_or(Ordering::Equal)
        .then_with(|| a.1.cmp(&b.1))
}

/// Find the four nearest neighbors of every atom and the minimum-image
/// displacement vectors pointing to them.
///
/// Returns one `[dx, dy, dz]` quadruple per atom, ordered by increasing
/// distance, ties broken by lower atom index.
///
/// # Arguments
/// * `coords` - One frame of positions
/// * `box_size` - Orthorhombic box extents for the frame
///
/// # Errors
/// Fails when the frame holds fewer than five atoms or contains non-finite
/// coordinates.
pub fn four_nearest_vectors(
    coords: &[[f64; 3]],
    box_size: &[f64; 3],
) -> Result<Vec<[[f64; 3]; N_NEIGHBORS]>, String> {
    let n = coords.len();
    if n < N_NEIGHBORS + 1 {
        return Err(format!(
            "Need at least {} atoms for a {}-neighbor search, got {}",
            N_NEIGHBORS + 1,
            N_NEIGHBORS,
            n
        ));
    }
    if let Some(i) = coords
        .iter()
        .position(|c| c.iter().any(|v| !v.is_finite()))
    {
        return Err(format!("Atom {} has non-finite coordinates", i));
    }

    let dist = distance_matrix(coords, box_size);

    // Parallel over atoms only; each thread reuses one candidate buffer.
    let vectors: Vec<[[f64; 3]; N_NEIGHBORS]> = (0..n)
        .into_par_iter()
        .map_init(
            || Vec::with_capacity(n - 1),
            |candidates: &mut Vec<(f64, usize)>, i| {
                candidates.clear();
                let row = &dist[i * n..(i + 1) * n];
                candidates.extend(
                    row.iter()
                        .copied()
                        .enumerate()
                        .filter(|&(j, _)| j != i)
                        .map(|(j, d)| (d, j)),
                );

                // Partial selection of the four smallest, then a final sort
                // of those four so the output order is deterministic.
                candidates.select_nth_unstable_by(N_NEIGHBORS - 1, by_distance);
                candidates.truncate(N_NEIGHBORS);
                candidates.sort_unstable_by(by_distance);

                let mut vecs = [[0.0f64; 3]; N_NEIGHBORS];
                for (slot, &(_, j)) in candidates.iter().enumerate() {
                    vecs[slot] = minimum_image_delta(&coords[i], &coords[j], box_size);
                }
                vecs
            },
        )
        .collect();

    Ok(vectors)
}
