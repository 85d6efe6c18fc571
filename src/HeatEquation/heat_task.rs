//! # Heat equation task
//!
//! Configuration record and driver for a complete FTCS run: grid geometry, physical
//! constants and boundary selection come from a [`HeatConfig`] (defaults reproduce a
//! 1 cm x 1 cm plate at 20 C heated by a 100 C bath), the time step is derived from a
//! fixed Courant number and the result is a [`HeatSolution`] holding the full time history.
//!
//! ## Task file
//! ```json
//! {
//!   "alpha": 0.0001,
//!   "nt": 500,
//!   "Tb": 100.0,
//!   "T0": 20.0,
//!   "Lx": 0.01,
//!   "Ly": 0.01,
//!   "nx": 41,
//!   "ny": 41,
//!   "neumann": "ne",
//!   "no_neumann": false
//! }
//! ```
//! Missing keys fall back to the defaults.
use super::boundary::BoundarySpec;
use super::explicit_2d::{HeatError, TimeHistory, explicit_step};
use crate::Utils::grid_io::{save_grid, save_history};
use log::{info, warn};
use nalgebra::{DMatrix, DVector};
use prettytable::{Cell, Row, Table};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Courant number used to pick the time step: dt = COURANT * min(dx, dy)² / α
pub const COURANT: f64 = 0.25;

/// Validated description of one heat equation run.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
#[allow(non_snake_case)]
pub struct HeatConfig {
    /// Thermal diffusivity (m²/s)
    pub alpha: f64,
    /// Number of time steps
    pub nt: usize,
    /// Bath temperature on Dirichlet edges (C)
    pub Tb: f64,
    /// Initial plate temperature (C)
    pub T0: f64,
    /// Plate length along x (m)
    pub Lx: f64,
    /// Plate length along y (m)
    pub Ly: f64,
    /// Grid points along x
    pub nx: usize,
    /// Grid points along y
    pub ny: usize,
    /// Neumann edges as tag string, any combination of "n", "s", "e", "w"
    pub neumann: String,
    /// Drop all Neumann conditions regardless of `neumann`
    pub no_neumann: bool,
}

impl Default for HeatConfig {
    fn default() -> Self {
        Self {
            alpha: 1e-4,
            nt: 500,
            Tb: 100.0,
            T0: 20.0,
            Lx: 0.01,
            Ly: 0.01,
            nx: 41,
            ny: 41,
            neumann: "ne".to_string(),
            no_neumann: false,
        }
    }
}

impl HeatConfig {
    pub fn validate(&self) -> Result<(), HeatError> {
        let invalid = |msg: String| Err(HeatError::InvalidConfiguration(msg));
        if self.nx < 3 || self.ny < 3 {
            return invalid(format!(
                "grid must have at least 3 points per axis, got nx = {}, ny = {}",
                self.nx, self.ny
            ));
        }
        if self.nt == 0 {
            return invalid("number of time steps nt must be positive".to_string());
        }
        for (name, value) in [("alpha", self.alpha), ("Lx", self.Lx), ("Ly", self.Ly)] {
            if !value.is_finite() || value <= 0.0 {
                return invalid(format!("{} must be positive and finite, got {}", name, value));
            }
        }
        for (name, value) in [("Tb", self.Tb), ("T0", self.T0)] {
            if !value.is_finite() {
                return invalid(format!("{} must be finite, got {}", name, value));
            }
        }
        self.boundary_spec()?;
        Ok(())
    }

    /// Neumann edges selected by the configuration
    pub fn boundary_spec(&self) -> Result<BoundarySpec, HeatError> {
        if self.no_neumann {
            return Ok(BoundarySpec::none());
        }
        BoundarySpec::parse(&self.neumann)
    }

    /// grid spacing along x; a degenerate axis (nx < 2) spans the whole plate
    pub fn dx(&self) -> f64 {
        self.Lx / intervals(self.nx)
    }

    pub fn dy(&self) -> f64 {
        self.Ly / intervals(self.ny)
    }

    /// grid positions along x, `nx` points from 0 to Lx
    pub fn x_coords(&self) -> DVector<f64> {
        linspace(self.Lx, self.nx)
    }

    /// grid positions along y, `ny` points from 0 to Ly
    pub fn y_coords(&self) -> DVector<f64> {
        linspace(self.Ly, self.ny)
    }

    /// Largest stable time step for the finest axis
    pub fn time_step(&self) -> f64 {
        COURANT * self.dx().min(self.dy()).powi(2) / self.alpha
    }

    /// (σx, σy) for the configured time step
    pub fn sigmas(&self) -> (f64, f64) {
        let dt = self.time_step();
        (
            self.alpha * dt / self.dx().powi(2),
            self.alpha * dt / self.dy().powi(2),
        )
    }

    /// Uniform plate at `T0` with every Dirichlet edge clamped to `Tb`
    pub fn initial_field(&self) -> Result<DMatrix<f64>, HeatError> {
        let mut field = DMatrix::from_element(self.ny, self.nx, self.T0);
        self.boundary_spec()?.set_dirichlet(&mut field, self.Tb);
        Ok(field)
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, HeatError> {
        let content = fs::read_to_string(path.as_ref())?;
        let config: HeatConfig = serde_json::from_str(&content)?;
        config.validate()?;
        info!("heat task loaded from {:?}", path.as_ref());
        Ok(config)
    }

    pub fn to_file<P: AsRef<Path>>(&self, path: P) -> Result<(), HeatError> {
        let content = serde_json::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }
}

fn intervals(n: usize) -> f64 {
    n.saturating_sub(1).max(1) as f64
}

fn linspace(length: f64, n: usize) -> DVector<f64> {
    if n < 2 {
        return DVector::zeros(n);
    }
    DVector::from_fn(n, |i, _| length * i as f64 / (n - 1) as f64)
}

/// Writes a heat task template with default values.
pub fn create_template<P: AsRef<Path>>(path: P) -> Result<(), HeatError> {
    HeatConfig::default().to_file(path)
}

/// Result of a heat equation run
#[derive(Debug, Clone)]
pub struct HeatSolution {
    /// grid positions along x (m)
    pub x: DVector<f64>,
    /// grid positions along y (m)
    pub y: DVector<f64>,
    /// time step (s)
    pub dt: f64,
    pub sigma_x: f64,
    pub sigma_y: f64,
    pub history: TimeHistory,
}

impl HeatSolution {
    /// physical time of frame `step`
    pub fn time_of_frame(&self, step: usize) -> f64 {
        (step + 1) as f64 * self.dt
    }
}

/// Heat equation problem: configuration, boundary selection and solution.
/// The boundary selection is owned by the task and kept in step with the
/// configuration's tag string.
#[derive(Debug, Clone)]
pub struct HeatTask {
    config: HeatConfig,
    boundary: BoundarySpec,
    solution: Option<HeatSolution>,
}

impl HeatTask {
    pub fn new(config: HeatConfig) -> Result<Self, HeatError> {
        config.validate()?;
        let boundary = config.boundary_spec()?;
        Ok(Self {
            config,
            boundary,
            solution: None,
        })
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, HeatError> {
        Self::new(HeatConfig::from_file(path)?)
    }

    pub fn config(&self) -> &HeatConfig {
        &self.config
    }

    pub fn boundary(&self) -> &BoundarySpec {
        &self.boundary
    }

    pub fn solution(&self) -> Option<&HeatSolution> {
        self.solution.as_ref()
    }

    /// Replaces the Neumann edges. The configuration tags follow and any previous
    /// solution is dropped.
    pub fn set_boundary(&mut self, boundary: BoundarySpec) {
        self.config.neumann = boundary.tags();
        self.config.no_neumann = false;
        self.boundary = boundary;
        self.solution = None;
    }

    /// Builds the initial field, derives dt and σ and runs the FTCS stepper.
    pub fn solve(&mut self) -> Result<&HeatSolution, HeatError> {
        let c = &self.config;
        let mut initial = DMatrix::from_element(c.ny, c.nx, c.T0);
        self.boundary.set_dirichlet(&mut initial, c.Tb);
        let dt = self.config.time_step();
        let (sigma_x, sigma_y) = self.config.sigmas();
        info!(
            "solving heat equation: dt = {:e} s, sigma_x = {}, sigma_y = {}",
            dt, sigma_x, sigma_y
        );
        let history = explicit_step(&initial, self.config.nt, sigma_x, sigma_y, &self.boundary)?;
        let solution = HeatSolution {
            x: self.config.x_coords(),
            y: self.config.y_coords(),
            dt,
            sigma_x,
            sigma_y,
            history,
        };
        let solution = self.solution.insert(solution);
        Ok(&*solution)
    }

    /// Saves the coordinates and every frame as plain text arrays into `dir`.
    pub fn save_results<P: AsRef<Path>>(&self, dir: P) -> Result<Vec<PathBuf>, HeatError> {
        let Some(solution) = &self.solution else {
            warn!("nothing to save: heat task has not been solved");
            return Ok(Vec::new());
        };
        let dir = dir.as_ref();
        fs::create_dir_all(dir)?;
        let x = DMatrix::from_row_slice(1, solution.x.len(), solution.x.as_slice());
        let y = DMatrix::from_row_slice(1, solution.y.len(), solution.y.as_slice());
        save_grid(dir.join("x.txt"), &x)?;
        save_grid(dir.join("y.txt"), &y)?;
        let written = save_history(dir, solution.history.frames())?;
        info!("{} frames written to {:?}", written.len(), dir);
        Ok(written)
    }

    pub fn pretty_print_task(&self) {
        let c = &self.config;
        let mut table = Table::new();
        table.add_row(Row::new(vec![Cell::new("Parameter"), Cell::new("Value")]));
        let rows = [
            ("alpha, m2/s", format!("{:e}", c.alpha)),
            ("nt", c.nt.to_string()),
            ("Tb, C", c.Tb.to_string()),
            ("T0, C", c.T0.to_string()),
            ("Lx x Ly, m", format!("{} x {}", c.Lx, c.Ly)),
            ("nx x ny", format!("{} x {}", c.nx, c.ny)),
            ("dt, s", format!("{:e}", c.time_step())),
            ("boundaries", self.boundary.to_string()),
        ];
        for (name, value) in rows {
            table.add_row(Row::new(vec![Cell::new(name), Cell::new(&value)]));
        }
        table.printstd();
    }

    pub fn pretty_print_solution(&self) {
        let Some(solution) = &self.solution else {
            println!("heat task has not been solved yet");
            return;
        };
        let history = &solution.history;
        let mut table = Table::new();
        table.add_row(Row::new(vec![
            Cell::new("frames"),
            Cell::new("t end, s"),
            Cell::new("T min, C"),
            Cell::new("T max, C"),
            Cell::new("mean T (last), C"),
        ]));
        let mean_last = history.last().map(|f| f.mean()).unwrap_or(f64::NAN);
        table.add_row(Row::new(vec![
            Cell::new(&history.len().to_string()),
            Cell::new(&format!("{:e}", solution.time_of_frame(history.len().saturating_sub(1)))),
            Cell::new(&format!("{:.3}", history.min().unwrap_or(f64::NAN))),
            Cell::new(&format!("{:.3}", history.max().unwrap_or(f64::NAN))),
            Cell::new(&format!("{:.3}", mean_last)),
        ]));
        table.printstd();
    }
}
