//! Orientational tetrahedral order parameter.
//!
//! For each atom of the center species, measures how closely its four
//! nearest neighbors approximate a perfect tetrahedron:
//!
//! ```text
//! q = 1 - 3/8 * sum over pairs (k,l) of (cos phi_kl + 1/3)^2
//! ```
//!
//! q is 1 for a perfect tetrahedral arrangement and goes negative for
//! strongly non-tetrahedral geometry. Per-frame results accumulate into an
//! owned histogram.

use crate::histogram::OrderHistogram;
use crate::output::write_histogram;
use rayon::prelude::*;
use rwo_core::neighbors::{four_nearest_vectors, N_NEIGHBORS};
use rwo_core::trajectory::Trajectory;
use rwo_core::util::cos_angle;
use std::path::{Path, PathBuf};

/// Default histogram resolution.
pub const DEFAULT_BINS: usize = 100;

/// Tetrahedral order statistic for one atom's four neighbor vectors.
///
/// Sums `(cos phi + 1/3)^2` over the six unordered pairs among the four
/// displacement vectors. The statistic is permutation-invariant over the
/// vectors, so neighbor ordering affects reproducibility of diagnostics
/// only, never the value. The pair sum is non-negative, hence q never
/// exceeds 1.
///
/// # Errors
/// Fails if any displacement vector has zero length (coincident atoms).
pub fn tetrahedral_q(neighbors: &[[f64; 3]; N_NEIGHBORS]) -> Result<f64, String> {
    let mut sum = 0.0;
    for k in 0..N_NEIGHBORS - 1 {
        for l in (k + 1)..N_NEIGHBORS {
            let cos_phi = cos_angle(&neighbors[k], &neighbors[l])?;
            let term = cos_phi + 1.0 / 3.0;
            sum += term * term;
        }
    }
    Ok(1.0 - 3.0 / 8.0 * sum)
}

/// Orientational tetrahedral order analysis over a trajectory.
///
/// Owns the accumulating histogram; repeated [`compute`](Self::compute)
/// calls keep adding to it.
pub struct Orientational {
    center: String,
    bins: usize,
    file_prefix: String,
    histogram: OrderHistogram,
}

impl Orientational {
    /// Set up the analysis.
    ///
    /// # Arguments
    /// * `trajectory` - Used here only to derive the output file prefix
    /// * `center` - Species label of the atoms whose environment is
    ///   characterized (e.g. the water oxygen name)
    /// * `bins` - Histogram resolution ([`DEFAULT_BINS`] when in doubt)
    pub fn new(trajectory: &Trajectory, center: impl Into<String>, bins: usize) -> Self {
        Self {
            center: center.into(),
            bins,
            file_prefix: trajectory.file_prefix(),
            histogram: OrderHistogram::new(bins),
        }
    }

    /// Compute the order parameter over the trajectory.
    ///
    /// Processes frames `0, stride, 2*stride, ...`; frames not selected by
    /// the stride are skipped entirely. Selected frames are processed in
    /// parallel into per-frame partial histograms which are then merged in
    /// frame order, so counts are exact regardless of scheduling.
    ///
    /// # Errors
    /// Geometry and statistic errors carry frame and atom context and abort
    /// the run; they indicate malformed trajectory data.
    pub fn compute(&mut self, trajectory: &Trajectory, stride: usize) -> Result<(), String> {
        let stride = stride.max(1);
        let selected: Vec<usize> = (0..trajectory.n_frames()).step_by(stride).collect();

        log::info!(
            "Computing orientational order over {} of {} frames (stride {}), center species '{}'",
            selected.len(),
            trajectory.n_frames(),
            stride,
            self.center,
        );

        let partials: Vec<OrderHistogram> = selected
            .par_iter()
            .map(|&frame| frame_histogram(trajectory, frame, &self.center, self.bins))
            .collect::<Result<Vec<_>, String>>()?;

        for partial in &partials {
            self.histogram.merge(partial);
        }

        log::info!(
            "Histogram now holds {} binned samples ({} dropped with q <= 0)",
            self.histogram.total(),
            self.histogram.dropped(),
        );
        Ok(())
    }

    /// The accumulated histogram.
    pub fn histogram(&self) -> &OrderHistogram {
        &self.histogram
    }

    /// Output file prefix derived from the trajectory filename.
    pub fn file_prefix(&self) -> &str {
        &self.file_prefix
    }

    /// Name of the output file: `<prefix>OTO.dat`.
    pub fn output_name(&self) -> String {
        format!("{}OTO.dat", self.file_prefix)
    }

    /// Write the histogram to `<prefix>OTO.dat` inside `dir` and return the
    /// path written. I/O failures are surfaced to the caller.
    pub fn write_output(&self, dir: impl AsRef<Path>) -> Result<PathBuf, String> {
        let path = dir.as_ref().join(self.output_name());
        write_histogram(&path, &self.histogram)?;
        Ok(path)
    }
}

/// Histogram contribution of a single frame.
fn frame_histogram(
    trajectory: &Trajectory,
    frame: usize,
    center: &str,
    bins: usize,
) -> Result<OrderHistogram, String> {
    let coords = trajectory.frame_coords(frame);
    let box_size = trajectory.frame_box(frame);
    let vectors =
        four_nearest_vectors(coords, box_size).map_err(|e| format!("Frame {}: {}", frame, e))?;

    let names = trajectory.frame_atom_names(frame);
    let mut hist = OrderHistogram::new(bins);
    for (atom, vecs) in vectors.iter().enumerate() {
        if names[atom] != center {
            continue;
        }
        let q = tetrahedral_q(vecs)
            .map_err(|e| format!("Frame {}, atom {}: {}", frame, atom, e))?;
        hist.record(q);
    }

    log::debug!(
        "Frame {}: {} samples binned, {} dropped",
        frame,
        hist.total(),
        hist.dropped(),
    );
    Ok(hist)
}
