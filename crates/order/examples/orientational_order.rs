//! Orientational tetrahedral order example.
//!
//! Builds a synthetic water-oxygen trajectory (a jittered cubic lattice in
//! a periodic box), runs the order parameter analysis, prints a histogram
//! summary, and writes the `<prefix>OTO.dat` output file.
//!
//! # Usage
//!
//! ```bash
//! cargo run --example orientational_order -- --side 6 --frames 20 --bins 100 --stride 1
//! ```

use rwo_core::trajectory::Trajectory;
use rwo_order::orientational::{Orientational, DEFAULT_BINS};

fn main() {
    // -------------------------------------------------------------------------
    // 1. Parse command-line arguments
    // -------------------------------------------------------------------------
    let args: Vec<String> = std::env::args().collect();
    let (side, frames, bins, stride) = parse_args(&args);

    let n_atoms = side * side * side;
    println!("Orientational Tetrahedral Order");
    println!("================================");
    println!("Atoms per frame: {} ({}^3 lattice)", n_atoms, side);
    println!("Frames: {} (stride {})", frames, stride);
    println!("Histogram bins: {}", bins);
    println!();

    // -------------------------------------------------------------------------
    // 2. Build the synthetic trajectory
    // -------------------------------------------------------------------------
    let spacing = 3.1; // roughly the O-O spacing of liquid water, in Angstroms
    let mut coords = Vec::with_capacity(frames);
    let mut boxes = Vec::with_capacity(frames);
    for frame in 0..frames {
        let (frame_coords, box_size) = build_lattice_frame(side, spacing, frame as f64 * 0.37);
        coords.push(frame_coords);
        boxes.push(box_size);
    }
    let names: Vec<String> = (0..n_atoms).map(|_| "O".to_string()).collect();
    let trajectory = Trajectory::with_static_names("synthetic_water.xyz", coords, boxes, names)
        .expect("Failed to build trajectory");

    // -------------------------------------------------------------------------
    // 3. Run the analysis
    // -------------------------------------------------------------------------
    let mut analysis = Orientational::new(&trajectory, "O", bins);
    analysis
        .compute(&trajectory, stride)
        .expect("Order parameter computation failed");

    let hist = analysis.histogram();
    println!(
        "Binned {} samples, dropped {} with q <= 0",
        hist.total(),
        hist.dropped()
    );

    // -------------------------------------------------------------------------
    // 4. Print the populated part of the histogram
    // -------------------------------------------------------------------------
    println!("\n{:<10} {:>10}", "Q", "count");
    println!("{}", "-".repeat(21));
    for (q, count) in hist.rows() {
        if count > 0 {
            println!("{:<10.3} {:>10}", q, count);
        }
    }

    // -------------------------------------------------------------------------
    // 5. Write the output file
    // -------------------------------------------------------------------------
    let path = analysis
        .write_output(".")
        .expect("Failed to write histogram");
    println!("\nWrote {}", path.display());
}

/// Jittered cubic lattice filling a periodic box; `phase` varies the
/// jitter between frames.
fn build_lattice_frame(n_side: usize, spacing: f64, phase: f64) -> (Vec<[f64; 3]>, [f64; 3]) {
    let mut coords = Vec::with_capacity(n_side * n_side * n_side);
    let jitter = 0.15 * spacing;
    for ix in 0..n_side {
        for iy in 0..n_side {
            for iz in 0..n_side {
                let t = (ix * n_side * n_side + iy * n_side + iz) as f64 + phase;
                coords.push([
                    ix as f64 * spacing + jitter * (t * 0.7).sin(),
                    iy as f64 * spacing + jitter * (t * 1.3).sin(),
                    iz as f64 * spacing + jitter * (t * 2.1).sin(),
                ]);
            }
        }
    }
    let edge = n_side as f64 * spacing;
    (coords, [edge, edge, edge])
}

/// Parse optional `--side`, `--frames`, `--bins`, `--stride` flags.
fn parse_args(args: &[String]) -> (usize, usize, usize, usize) {
    let mut side = 6usize;
    let mut frames = 20usize;
    let mut bins = DEFAULT_BINS;
    let mut stride = 1usize;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--side" => {
                side = args[i + 1].parse().expect("Invalid --side value");
                i += 2;
            }
            "--frames" => {
                frames = args[i + 1].parse().expect("Invalid --frames value");
                i += 2;
            }
            "--bins" => {
                bins = args[i + 1].parse().expect("Invalid --bins value");
                i += 2;
            }
            "--stride" => {
                stride = args[i + 1].parse().expect("Invalid --stride value");
                i += 2;
            }
            "--help" | "-h" => {
                eprintln!(
                    "Usage: orientational_order [--side N] [--frames N] [--bins N] [--stride N]"
                );
                std::process::exit(0);
            }
            _ => {
                eprintln!("Unknown argument: {}", args[i]);
                std::process::exit(1);
            }
        }
    }

    if side < 2 {
        eprintln!("--side must be at least 2 (need 5+ atoms per frame)");
        std::process::exit(1);
    }
    (side, frames, bins, stride)
}
