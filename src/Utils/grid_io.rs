//! Plain text numeric arrays: one grid row per line, values separated by whitespace.
//! This is the only persistence format of the crate; files written here load directly
//! into numpy (`np.loadtxt`) or gnuplot for plotting and animation.
use nalgebra::DMatrix;
use std::fmt::Write as _;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum GridIoError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("{path:?}, line {line}: cannot parse '{token}' as a number")]
    Parse {
        path: PathBuf,
        line: usize,
        token: String,
    },
    #[error("{path:?}, line {line}: expected {expected} values, found {found}")]
    Ragged {
        path: PathBuf,
        line: usize,
        expected: usize,
        found: usize,
    },
    #[error("{0:?} contains no data")]
    Empty(PathBuf),
}

/// Formats a grid as text, row 0 first.
pub fn grid_to_string(grid: &DMatrix<f64>) -> String {
    let mut out = String::new();
    for row in grid.row_iter() {
        let line: Vec<String> = row.iter().map(|v| v.to_string()).collect();
        let _ = writeln!(out, "{}", line.join(" "));
    }
    out
}

pub fn save_grid<P: AsRef<Path>>(path: P, grid: &DMatrix<f64>) -> Result<(), GridIoError> {
    fs::write(path, grid_to_string(grid))?;
    Ok(())
}

/// Reads a whitespace separated table. Blank lines and lines starting with '#' are skipped.
pub fn load_grid<P: AsRef<Path>>(path: P) -> Result<DMatrix<f64>, GridIoError> {
    let path = path.as_ref();
    let content = fs::read_to_string(path)?;
    let mut data: Vec<f64> = Vec::new();
    let mut ncols: Option<usize> = None;
    let mut nrows = 0;
    for (idx, line) in content.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let mut found = 0;
        for token in line.split_whitespace() {
            let value = token.parse::<f64>().map_err(|_| GridIoError::Parse {
                path: path.to_path_buf(),
                line: idx + 1,
                token: token.to_string(),
            })?;
            data.push(value);
            found += 1;
        }
        match ncols {
            None => ncols = Some(found),
            Some(expected) if expected != found => {
                return Err(GridIoError::Ragged {
                    path: path.to_path_buf(),
                    line: idx + 1,
                    expected,
                    found,
                });
            }
            Some(_) => {}
        }
        nrows += 1;
    }
    match ncols {
        Some(ncols) => Ok(DMatrix::from_row_slice(nrows, ncols, &data)),
        None => Err(GridIoError::Empty(path.to_path_buf())),
    }
}

/// Writes every frame to `dir/frame_00000.txt`, `dir/frame_00001.txt`, ...
pub fn save_history<P: AsRef<Path>>(
    dir: P,
    frames: &[DMatrix<f64>],
) -> Result<Vec<PathBuf>, GridIoError> {
    let dir = dir.as_ref();
    fs::create_dir_all(dir)?;
    let mut written = Vec::with_capacity(frames.len());
    for (step, frame) in frames.iter().enumerate() {
        let path = dir.join(format!("frame_{:05}.txt", step));
        save_grid(&path, frame)?;
        written.push(path);
    }
    Ok(written)
}
