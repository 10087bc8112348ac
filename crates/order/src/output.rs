//! Plain-text output for the order histogram.

use crate::histogram::OrderHistogram;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Header comment written at the top of every histogram file.
const HEADER: &str = "#OTO generated by rust-water-order";

/// Write a histogram as `<q_value> <count>` rows.
///
/// One comment line, one `Q  count` column-header line, then `bins + 1`
/// rows with `q_value = bin_index / bins` computed per row rather than by
/// repeated addition, so the column carries no accumulated rounding error.
pub fn write_histogram(path: &Path, histogram: &OrderHistogram) -> Result<(), String> {
    let file = File::create(path)
        .map_err(|e| format!("Failed to create {}: {}", path.display(), e))?;
    let mut writer = BufWriter::new(file);
    let write_err = |e: std::io::Error| format!("Failed to write {}: {}", path.display(), e);

    writeln!(writer, "{}", HEADER).map_err(write_err)?;
    writeln!(writer, "Q  count").map_err(write_err)?;
    for (q, count) in histogram.rows() {
        writeln!(writer, "{} {}", q, count).map_err(write_err)?;
    }
    writer.flush().map_err(write_err)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn temp_path(name: &str) -> std::path::PathBuf {
        std::env::temp_dir().join(format!("rwo_output_test_{}_{}", std::process::id(), name))
    }

    #[test]
    fn test_file_layout() {
        let mut hist = OrderHistogram::new(4);
        hist.record(0.5);
        hist.record(1.0);

        let path = temp_path("layout.dat");
        write_histogram(&path, &hist).unwrap();
        let contents = fs::read_to_string(&path).unwrap();
        fs::remove_file(&path).unwrap();

        let lines: Vec<&str> = contents.lines().collect();
        assert_eq!(lines.len(), 2 + 5);
        assert!(lines[0].starts_with('#'));
        assert_eq!(lines[1], "Q  count");
        assert_eq!(lines[2], "0 0");
        assert_eq!(lines[4], "0.5 1");
        assert_eq!(lines[6], "1 1");
    }

    #[test]
    fn test_round_trip_preserves_rows() {
        let mut hist = OrderHistogram::new(100);
        for &q in &[0.97, 0.97, 0.62, 0.305, 1.0, 0.004] {
            hist.record(q);
        }

        let path = temp_path("roundtrip.dat");
        write_histogram(&path, &hist).unwrap();
        let contents = fs::read_to_string(&path).unwrap();
        fs::remove_file(&path).unwrap();

        let parsed: Vec<(f64, u64)> = contents
            .lines()
            .skip(2)
            .map(|line| {
                let mut fields = line.split_whitespace();
                let q: f64 = fields.next().unwrap().parse().unwrap();
                let count: u64 = fields.next().unwrap().parse().unwrap();
                (q, count)
            })
            .collect();

        let expected: Vec<(f64, u64)> = hist.rows().collect();
        assert_eq!(parsed.len(), expected.len());
        for ((pq, pc), (eq, ec)) in parsed.iter().zip(expected.iter()) {
            assert_eq!(pq, eq, "q values must survive the round trip exactly");
            assert_eq!(pc, ec);
        }
        let total: u64 = parsed.iter().map(|&(_, c)| c).sum();
        assert_eq!(total, hist.total());
    }

    #[test]
    fn test_unwritable_path_is_an_error() {
        let hist = OrderHistogram::new(10);
        let path = Path::new("/nonexistent_dir_rwo/out.dat");
        let err = write_histogram(path, &hist).unwrap_err();
        assert!(err.contains("Failed to create"));
    }
}
