//! In-memory trajectory data with a fixed accessor contract.
//!
//! Trajectory loading and format parsing are out of scope here; analyses
//! consume coordinates, box dimensions, and atom names that the caller has
//! already materialized (e.g. from Python tooling).

use std::path::Path;

/// An already-loaded molecular dynamics trajectory.
///
/// Invariants, enforced at construction:
/// - `coords`, `box_size`, and `atom_names` have one entry per frame;
/// - every frame holds the same number of atoms, aligned by index;
/// - box extents are strictly positive on every axis.
#[derive(Debug, Clone)]
pub struct Trajectory {
    filename: String,
    coords: Vec<Vec<[f64; 3]>>,
    box_size: Vec<[f64; 3]>,
    atom_names: Vec<Vec<String>>,
}

impl Trajectory {
    /// Build a trajectory from per-frame data.
    ///
    /// # Arguments
    /// * `filename` - Source file name, used only to derive output prefixes
    /// * `coords` - Frames of `[n_atoms]` positions
    /// * `box_size` - Orthorhombic box `[x, y, z]` per frame
    /// * `atom_names` - Species labels per frame, aligned with `coords`
    pub fn new(
        filename: impl Into<String>,
        coords: Vec<Vec<[f64; 3]>>,
        box_size: Vec<[f64; 3]>,
        atom_names: Vec<Vec<String>>,
    ) -> Result<Self, String> {
        let n_frames = coords.len();
        if n_frames == 0 {
            return Err("Trajectory must contain at least one frame".to_string());
        }
        if box_size.len() != n_frames {
            return Err(format!(
                "Number of box dimensions ({}) must match number of frames ({})",
                box_size.len(),
                n_frames
            ));
        }
        if atom_names.len() != n_frames {
            return Err(format!(
                "Number of atom name lists ({}) must match number of frames ({})",
                atom_names.len(),
                n_frames
            ));
        }

        let n_atoms = coords[0].len();
        for (frame, positions) in coords.iter().enumerate() {
            if positions.len() != n_atoms {
                return Err(format!(
                    "Frame {} has {} atoms, expected {}",
                    frame,
                    positions.len(),
                    n_atoms
                ));
            }
            if atom_names[frame].len() != n_atoms {
                return Err(format!(
                    "Frame {} has {} atom names for {} atoms",
                    frame,
                    atom_names[frame].len(),
                    n_atoms
                ));
            }
        }
        for (frame, extents) in box_size.iter().enumerate() {
            if extents.iter().any(|&v| v <= 0.0) {
                return Err(format!(
                    "Frame {} has non-positive box extents {:?}",
                    frame, extents
                ));
            }
        }

        Ok(Self {
            filename: filename.into(),
            coords,
            box_size,
            atom_names,
        })
    }

    /// Build a trajectory whose atom names do not change between frames.
    pub fn with_static_names(
        filename: impl Into<String>,
        coords: Vec<Vec<[f64; 3]>>,
        box_size: Vec<[f64; 3]>,
        atom_names: Vec<String>,
    ) -> Result<Self, String> {
        let n_frames = coords.len();
        Self::new(filename, coords, box_size, vec![atom_names; n_frames])
    }

    pub fn n_frames(&self) -> usize {
        self.coords.len()
    }

    pub fn n_atoms(&self) -> usize {
        self.coords[0].len()
    }

    pub fn filename(&self) -> &str {
        &self.filename
    }

    /// Positions for one frame.
    pub fn frame_coords(&self, frame: usize) -> &[[f64; 3]] {
        &self.coords[frame]
    }

    /// Box extents for one frame.
    pub fn frame_box(&self, frame: usize) -> &[f64; 3] {
        &self.box_size[frame]
    }

    /// Species labels for one frame.
    pub fn frame_atom_names(&self, frame: usize) -> &[String] {
        &self.atom_names[frame]
    }

    /// Output file prefix: the trajectory basename without directory or
    /// extension.
    pub fn file_prefix(&self) -> String {
        Path::new(&self.filename)
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.filename.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_frames() -> (Vec<Vec<[f64; 3]>>, Vec<[f64; 3]>) {
        let frame: Vec<[f64; 3]> = vec![[0.0, 0.0, 0.0], [1.0, 0.0, 0.0]];
        (vec![frame.clone(), frame], vec![[10.0; 3], [10.0; 3]])
    }

    #[test]
    fn test_valid_construction() {
        let (coords, boxes) = two_frames();
        let names = vec!["O".to_string(), "H".to_string()];
        let traj = Trajectory::with_static_names("water.xyz", coords, boxes, names).unwrap();
        assert_eq!(traj.n_frames(), 2);
        assert_eq!(traj.n_atoms(), 2);
        assert_eq!(traj.frame_atom_names(1)[0], "O");
    }

    #[test]
    fn test_rejects_empty_trajectory() {
        let err = Trajectory::new("x.xyz", vec![], vec![], vec![]).unwrap_err();
        assert!(err.contains("at least one frame"));
    }

    #[test]
    fn test_rejects_mismatched_box_count() {
        let (coords, _) = two_frames();
        let names = vec!["O".to_string(), "H".to_string()];
        let err =
            Trajectory::with_static_names("x.xyz", coords, vec![[10.0; 3]], names).unwrap_err();
        assert!(err.contains("box dimensions"));
    }

    #[test]
    fn test_rejects_varying_atom_count() {
        let coords = vec![
            vec![[0.0; 3], [1.0, 0.0, 0.0]],
            vec![[0.0; 3], [1.0, 0.0, 0.0], [2.0, 0.0, 0.0]],
        ];
        let boxes = vec![[10.0; 3], [10.0; 3]];
        let names = vec![
            vec!["O".to_string(), "H".to_string()],
            vec!["O".to_string(), "H".to_string(), "H".to_string()],
        ];
        let err = Trajectory::new("x.xyz", coords, boxes, names).unwrap_err();
        assert!(err.contains("expected 2"));
    }

    #[test]
    fn test_rejects_name_length_mismatch() {
        let (coords, boxes) = two_frames();
        let names = vec![vec!["O".to_string()], vec!["O".to_string()]];
        let err = Trajectory::new("x.xyz", coords, boxes, names).unwrap_err();
        assert!(err.contains("atom names"));
    }

    #[test]
    fn test_rejects_non_positive_box() {
        let (coords, _) = two_frames();
        let boxes = vec![[10.0; 3], [10.0, 0.0, 10.0]];
        let names = vec!["O".to_string(), "H".to_string()];
        let err = Trajectory::with_static_names("x.xyz", coords, boxes, names).unwrap_err();
        assert!(err.contains("non-positive box"));
    }

    #[test]
    fn test_file_prefix_strips_directory_and_extension() {
        let (coords, boxes) = two_frames();
        let names = vec!["O".to_string(), "H".to_string()];
        let traj =
            Trajectory::with_static_names("data/runs/water_300K.xyz", coords, boxes, names)
                .unwrap();
        assert_eq!(traj.file_prefix(), "water_300K");
    }
}
