//! Python bindings for the orientational tetrahedral order analysis.

use numpy::{IntoPyArray, PyArray1, PyReadonlyArray2, PyReadonlyArray3};
use pyo3::exceptions::{PyIOError, PyValueError};
use pyo3::prelude::*;

use rwo_core::trajectory::Trajectory;
use rwo_order::orientational::Orientational;

// ============================================================================
// Helpers: numpy views to trajectory storage
// ============================================================================

fn array3_to_frames(arr: &ndarray::ArrayView3<f64>) -> Vec<Vec<[f64; 3]>> {
    let n_frames = arr.shape()[0];
    let n_atoms = arr.shape()[1];
    let mut frames = Vec::with_capacity(n_frames);
    for i in 0..n_frames {
        let mut frame = Vec::with_capacity(n_atoms);
        for j in 0..n_atoms {
            frame.push([arr[[i, j, 0]], arr[[i, j, 1]], arr[[i, j, 2]]]);
        }
        frames.push(frame);
    }
    frames
}

fn array2_to_boxes(arr: &ndarray::ArrayView2<f64>) -> Vec<[f64; 3]> {
    let n = arr.shape()[0];
    (0..n)
        .map(|i| [arr[[i, 0]], arr[[i, 1]], arr[[i, 2]]])
        .collect()
}

fn build_trajectory(
    coords: &PyReadonlyArray3<f64>,
    box_size: &PyReadonlyArray2<f64>,
    atom_names: Vec<String>,
    filename: &str,
) -> PyResult<Trajectory> {
    let coords_arr = coords.as_array();
    let box_arr = box_size.as_array();
    if coords_arr.shape()[2] != 3 {
        return Err(PyValueError::new_err(
            "coords must have shape (n_frames, n_atoms, 3)",
        ));
    }
    if box_arr.shape()[1] != 3 {
        return Err(PyValueError::new_err(
            "box_size must have shape (n_frames, 3)",
        ));
    }
    Trajectory::with_static_names(
        filename,
        array3_to_frames(&coords_arr),
        array2_to_boxes(&box_arr),
        atom_names,
    )
    .map_err(PyValueError::new_err)
}

// ============================================================================
// ORIENTATIONAL TETRAHEDRAL ORDER
// ============================================================================

/// Compute the order histogram and return it as (q_values, counts) arrays.
#[pyfunction]
#[pyo3(
    name = "orientational_order",
    signature = (coords, box_size, atom_names, center, bins=100, stride=1)
)]
fn orientational_order_py<'py>(
    py: Python<'py>,
    coords: PyReadonlyArray3<'py, f64>,
    box_size: PyReadonlyArray2<'py, f64>,
    atom_names: Vec<String>,
    center: String,
    bins: usize,
    stride: usize,
) -> PyResult<(Bound<'py, PyArray1<f64>>, Bound<'py, PyArray1<u64>>)> {
    let trajectory = build_trajectory(&coords, &box_size, atom_names, "trajectory")?;
    let mut analysis = Orientational::new(&trajectory, center, bins);
    analysis
        .compute(&trajectory, stride)
        .map_err(PyValueError::new_err)?;

    let (q_values, counts): (Vec<f64>, Vec<u64>) = analysis.histogram().rows().unzip();
    Ok((
        q_values.into_pyarray_bound(py),
        counts.into_pyarray_bound(py),
    ))
}

/// Compute the order histogram and write `<prefix>OTO.dat`, returning the
/// path written.
#[pyfunction]
#[pyo3(
    name = "orientational_order_to_file",
    signature = (coords, box_size, atom_names, center, filename, bins=100, stride=1, output_dir=".")
)]
fn orientational_order_to_file_py(
    coords: PyReadonlyArray3<f64>,
    box_size: PyReadonlyArray2<f64>,
    atom_names: Vec<String>,
    center: String,
    filename: String,
    bins: usize,
    stride: usize,
    output_dir: &str,
) -> PyResult<String> {
    let trajectory = build_trajectory(&coords, &box_size, atom_names, &filename)?;
    let mut analysis = Orientational::new(&trajectory, center, bins);
    analysis
        .compute(&trajectory, stride)
        .map_err(PyValueError::new_err)?;
    let path = analysis
        .write_output(output_dir)
        .map_err(PyIOError::new_err)?;
    Ok(path.to_string_lossy().into_owned())
}

// ============================================================================
// MODULE DEFINITION
// ============================================================================

#[pymodule]
fn rust_water_order(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_function(wrap_pyfunction!(orientational_order_py, m)?)?;
    m.add_function(wrap_pyfunction!(orientational_order_to_file_py, m)?)?;
    Ok(())
}
