use crate::Utils::grid_io::{GridIoError, load_grid};
use log::{info, warn};
use prettytable::{Table, row};
use regex::Regex;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;
use thiserror::Error;

/// reduced temperatures of the simulated state points
pub const TEMPERATURES: [f64; 4] = [0.5, 1.0, 1.5, 2.0];
/// reduced densities of the simulated state points
pub const DENSITIES: [f64; 4] = [0.1, 0.4, 0.7, 1.0];
/// animation files in order of preference
const ANIMATION_FILES: [&str; 2] = ["output.mp4", "untitled.mpg"];

#[derive(Debug, Error)]
pub enum MdError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Data table error: {0}")]
    Table(#[from] GridIoError),
    #[error("State point folder {0:?} not found")]
    MissingFolder(PathBuf),
    #[error("{path:?} has {available} columns, column {column} requested")]
    MissingColumn {
        path: PathBuf,
        column: usize,
        available: usize,
    },
    #[error("State point index {0} is out of range 0..16")]
    IndexOutOfRange(usize),
}

/// Point of the (T*, ρ*) phase diagram
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StatePoint {
    pub temperature: f64,
    pub density: f64,
}

impl StatePoint {
    pub fn new(temperature: f64, density: f64) -> Self {
        Self {
            temperature,
            density,
        }
    }

    /// Index runs row by row: density changes fastest, temperature slowest.
    pub fn from_index(index: usize) -> Result<Self, MdError> {
        if index >= TEMPERATURES.len() * DENSITIES.len() {
            return Err(MdError::IndexOutOfRange(index));
        }
        Ok(Self::new(
            TEMPERATURES[index / DENSITIES.len()],
            DENSITIES[index % DENSITIES.len()],
        ))
    }

    /// all 16 simulated state points in index order
    pub fn all() -> Vec<StatePoint> {
        TEMPERATURES
            .iter()
            .flat_map(|t| DENSITIES.iter().map(move |rho| StatePoint::new(*t, *rho)))
            .collect()
    }

    /// "T05_r01" for T* = 0.5, ρ* = 0.1
    pub fn folder_name(&self) -> String {
        let compact = |value: f64| format!("{:.1}", value).replace('.', "");
        format!("T{}_r{}", compact(self.temperature), compact(self.density))
    }

    /// Inverse of [`StatePoint::folder_name`]; the last digit of each number is the first decimal.
    pub fn parse_folder_name(name: &str) -> Option<StatePoint> {
        static FOLDER_RE: OnceLock<Option<Regex>> = OnceLock::new();
        let re = FOLDER_RE
            .get_or_init(|| Regex::new(r"^T(\d{2,})_r(\d{2,})$").ok())
            .as_ref()?;
        let caps = re.captures(name)?;
        let decode = |digits: &str| digits.parse::<u32>().ok().map(|v| v as f64 / 10.0);
        Some(StatePoint::new(decode(&caps[1])?, decode(&caps[2])?))
    }
}

impl fmt::Display for StatePoint {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "T* = {:.1}, rho* = {:.1}", self.temperature, self.density)
    }
}

/// Observables stored in `output.txt`, by column
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Observable {
    PotentialEnergy,
    KineticEnergy,
    TotalEnergy,
    EnergyDrift,
    Temperature,
    Pressure,
}

impl Observable {
    pub const ALL: [Observable; 6] = [
        Observable::PotentialEnergy,
        Observable::KineticEnergy,
        Observable::TotalEnergy,
        Observable::EnergyDrift,
        Observable::Temperature,
        Observable::Pressure,
    ];

    /// zero based column in `output.txt`
    pub fn column(&self) -> usize {
        match self {
            Observable::PotentialEnergy => 2,
            Observable::KineticEnergy => 3,
            Observable::TotalEnergy => 4,
            Observable::EnergyDrift => 5,
            Observable::Temperature => 6,
            Observable::Pressure => 7,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Observable::PotentialEnergy => "Potential Energy",
            Observable::KineticEnergy => "Kinetic Energy",
            Observable::TotalEnergy => "Total Energy",
            Observable::EnergyDrift => "Energy Drift",
            Observable::Temperature => "Temperature",
            Observable::Pressure => "Pressure",
        }
    }
}

/// Summary of one observable time series
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SeriesStats {
    pub steps: usize,
    pub mean: f64,
    pub min: f64,
    pub max: f64,
    pub last: f64,
}

impl SeriesStats {
    pub fn from_series(series: &[f64]) -> Option<Self> {
        let last = *series.last()?;
        let sum: f64 = series.iter().sum();
        Some(Self {
            steps: series.len(),
            mean: sum / series.len() as f64,
            min: series.iter().copied().fold(f64::INFINITY, f64::min),
            max: series.iter().copied().fold(f64::NEG_INFINITY, f64::max),
            last,
        })
    }
}

/// Data folder of one state point
#[derive(Debug, Clone)]
pub struct MdDataset {
    pub state: StatePoint,
    pub folder: PathBuf,
}

impl MdDataset {
    pub fn open<P: AsRef<Path>>(root: P, state: StatePoint) -> Result<Self, MdError> {
        let folder = root.as_ref().join(state.folder_name());
        if !folder.is_dir() {
            return Err(MdError::MissingFolder(folder));
        }
        info!("folder used = {:?}", folder);
        Ok(Self { state, folder })
    }

    pub fn output_path(&self) -> PathBuf {
        self.folder.join("output.txt")
    }

    pub fn rdf_path(&self) -> PathBuf {
        self.folder.join("rdf.txt")
    }

    /// pre-rendered g(r) plot
    pub fn rdf_image_path(&self) -> PathBuf {
        self.folder.join("rdf.png")
    }

    /// first animation file present in the folder
    pub fn animation_path(&self) -> Option<PathBuf> {
        ANIMATION_FILES
            .iter()
            .map(|name| self.folder.join(name))
            .find(|path| path.is_file())
    }

    /// Time series of one observable, one value per recorded step
    pub fn observable(&self, observable: Observable) -> Result<Vec<f64>, MdError> {
        let path = self.output_path();
        let table = load_grid(&path)?;
        let column = observable.column();
        if column >= table.ncols() {
            return Err(MdError::MissingColumn {
                path,
                column,
                available: table.ncols(),
            });
        }
        Ok(table.column(column).iter().copied().collect())
    }

    /// Radial distribution function as (r, g(r)) pairs
    pub fn rdf(&self) -> Result<Vec<(f64, f64)>, MdError> {
        let path = self.rdf_path();
        let table = load_grid(&path)?;
        if table.ncols() < 2 {
            return Err(MdError::MissingColumn {
                path,
                column: 1,
                available: table.ncols(),
            });
        }
        Ok(table
            .row_iter()
            .map(|row| (row[0], row[1]))
            .collect())
    }

    pub fn pretty_print_observables(&self) -> Result<(), MdError> {
        let mut table = Table::new();
        table.add_row(row!["Observable", "steps", "mean", "min", "max", "last"]);
        for observable in Observable::ALL {
            match self.observable(observable) {
                Ok(series) => {
                    if let Some(stats) = SeriesStats::from_series(&series) {
                        table.add_row(row![
                            observable.label(),
                            stats.steps,
                            format!("{:.4e}", stats.mean),
                            format!("{:.4e}", stats.min),
                            format!("{:.4e}", stats.max),
                            format!("{:.4e}", stats.last)
                        ]);
                    }
                }
                Err(MdError::MissingColumn { .. }) => {
                    warn!("{} is not present in {:?}", observable.label(), self.output_path());
                }
                Err(e) => return Err(e),
            }
        }
        println!("{}", self.state);
        table.printstd();
        Ok(())
    }
}

/// State points under `root` that have a data folder, sorted by (T*, ρ*).
pub fn discover<P: AsRef<Path>>(root: P) -> Result<Vec<StatePoint>, MdError> {
    let mut found = Vec::new();
    for entry in fs::read_dir(root.as_ref())? {
        let entry = entry?;
        if !entry.path().is_dir() {
            continue;
        }
        let name = entry.file_name();
        if let Some(state) = StatePoint::parse_folder_name(&name.to_string_lossy()) {
            found.push(state);
        }
    }
    found.sort_by(|a, b| {
        a.temperature
            .total_cmp(&b.temperature)
            .then(a.density.total_cmp(&b.density))
    });
    Ok(found)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use tempfile::tempdir;

    fn write_dataset(root: &Path, state: StatePoint) -> PathBuf {
        let folder = root.join(state.folder_name());
        fs::create_dir_all(&folder).unwrap();
        fs::write(
            folder.join("output.txt"),
            "0 0.0 -5.0 1.5 -3.5 0.0 1.0 0.8\n1 0.1 -5.2 1.6 -3.6 0.01 1.1 0.9\n2 0.2 -5.4 1.8 -3.6 0.02 1.2 1.0\n",
        )
        .unwrap();
        fs::write(folder.join("rdf.txt"), "0.5 0.0\n1.0 2.7\n1.5 1.1\n").unwrap();
        folder
    }

    #[test]
    fn test_state_point_index() {
        let first = StatePoint::from_index(0).unwrap();
        assert_eq!(first, StatePoint::new(0.5, 0.1));
        let state = StatePoint::from_index(6).unwrap();
        assert_eq!(state, StatePoint::new(1.0, 0.7));
        assert_eq!(StatePoint::from_index(15).unwrap(), StatePoint::new(2.0, 1.0));
        assert!(matches!(StatePoint::from_index(16), Err(MdError::IndexOutOfRange(16))));
        assert_eq!(StatePoint::all().len(), 16);
        assert_eq!(StatePoint::all()[6], state);
    }

    #[test]
    fn test_folder_names() {
        assert_eq!(StatePoint::new(0.5, 0.1).folder_name(), "T05_r01");
        assert_eq!(StatePoint::new(2.0, 1.0).folder_name(), "T20_r10");
        assert_eq!(StatePoint::new(1.5, 0.7).folder_name(), "T15_r07");

        let parsed = StatePoint::parse_folder_name("T15_r07").unwrap();
        assert_relative_eq!(parsed.temperature, 1.5);
        assert_relative_eq!(parsed.density, 0.7);
        assert!(StatePoint::parse_folder_name("T1_r07").is_none());
        assert!(StatePoint::parse_folder_name("rdf.txt").is_none());
    }

    #[test]
    fn test_dataset_loading() {
        let root = tempdir().unwrap();
        let state = StatePoint::new(0.5, 0.1);
        let folder = write_dataset(root.path(), state);

        let dataset = MdDataset::open(root.path(), state).unwrap();
        let energy = dataset.observable(Observable::PotentialEnergy).unwrap();
        assert_eq!(energy, vec![-5.0, -5.2, -5.4]);
        let pressure = dataset.observable(Observable::Pressure).unwrap();
        assert_eq!(pressure, vec![0.8, 0.9, 1.0]);

        let rdf = dataset.rdf().unwrap();
        assert_eq!(rdf, vec![(0.5, 0.0), (1.0, 2.7), (1.5, 1.1)]);

        assert_eq!(dataset.animation_path(), None);
        fs::write(folder.join("untitled.mpg"), b"").unwrap();
        assert_eq!(dataset.animation_path(), Some(folder.join("untitled.mpg")));
        fs::write(folder.join("output.mp4"), b"").unwrap();
        assert_eq!(dataset.animation_path(), Some(folder.join("output.mp4")));
        assert_eq!(dataset.rdf_image_path(), folder.join("rdf.png"));
        assert!(dataset.pretty_print_observables().is_ok());
    }

    #[test]
    fn test_missing_data() {
        let root = tempdir().unwrap();
        let state = StatePoint::new(1.0, 0.4);
        assert!(matches!(
            MdDataset::open(root.path(), state),
            Err(MdError::MissingFolder(_))
        ));

        let folder = root.path().join(state.folder_name());
        fs::create_dir_all(&folder).unwrap();
        fs::write(folder.join("output.txt"), "0 0.0 -5.0\n").unwrap();
        let dataset = MdDataset::open(root.path(), state).unwrap();
        assert!(matches!(
            dataset.observable(Observable::Temperature),
            Err(MdError::MissingColumn {
                column: 6,
                available: 3,
                ..
            })
        ));
        assert!(matches!(dataset.rdf(), Err(MdError::Table(_))));
    }

    #[test]
    fn test_discover() {
        let root = tempdir().unwrap();
        write_dataset(root.path(), StatePoint::new(2.0, 0.1));
        write_dataset(root.path(), StatePoint::new(0.5, 0.4));
        write_dataset(root.path(), StatePoint::new(0.5, 0.1));
        fs::create_dir_all(root.path().join("images")).unwrap();
        fs::write(root.path().join("T10_r10"), b"not a folder").unwrap();

        let found = discover(root.path()).unwrap();
        let names: Vec<String> = found.iter().map(StatePoint::folder_name).collect();
        assert_eq!(names, vec!["T05_r01", "T05_r04", "T20_r01"]);
    }

    #[test]
    fn test_series_stats() {
        let stats = SeriesStats::from_series(&[1.0, 3.0, 2.0]).unwrap();
        assert_eq!(stats.steps, 3);
        assert_relative_eq!(stats.mean, 2.0);
        assert_eq!(stats.min, 1.0);
        assert_eq!(stats.max, 3.0);
        assert_eq!(stats.last, 2.0);
        assert!(SeriesStats::from_series(&[]).is_none());
    }
}
