//! # Laplace-Poisson task
//!
//! Configuration record and driver for one relaxation run on an (N+1)x(N+1) lattice.
//!
//! ## Task file
//! ```json
//! {
//!   "target": 1e-8,
//!   "V": 100.0,
//!   "N": 50,
//!   "Q": 100.0,
//!   "profile": "Flat",
//!   "max_iterations": 1000000
//! }
//! ```
//! `profile` is one of "Flat", "Capacitor", "Sinusoidal". Missing keys take the defaults.
use super::jacobi::{DEFAULT_MAX_ITERATIONS, LaplaceError, RelaxSolution, relax};
use super::potential::{BoundaryProfile, initial_potential, point_charge};
use crate::Utils::grid_io::save_grid;
use log::{info, warn};
use nalgebra::{DMatrix, DVector};
use prettytable::{Table, row};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
#[allow(non_snake_case)]
pub struct PoissonConfig {
    /// target relative L2 norm
    pub target: f64,
    /// grid voltage (V)
    pub V: f64,
    /// lattice has N+1 points per axis
    pub N: usize,
    /// default charge value
    pub Q: f64,
    pub profile: BoundaryProfile,
    /// `None` falls back to the library default cap
    pub max_iterations: Option<usize>,
}

impl Default for PoissonConfig {
    fn default() -> Self {
        Self {
            target: 1e-8,
            V: 100.0,
            N: 50,
            Q: 100.0,
            profile: BoundaryProfile::Flat,
            max_iterations: Some(DEFAULT_MAX_ITERATIONS),
        }
    }
}

impl PoissonConfig {
    pub fn validate(&self) -> Result<(), LaplaceError> {
        let invalid = |msg: String| Err(LaplaceError::InvalidConfiguration(msg));
        if self.N < 2 {
            return invalid(format!("N must be at least 2, got {}", self.N));
        }
        if !self.target.is_finite() || self.target <= 0.0 {
            return invalid(format!(
                "target precision must be positive and finite, got {}",
                self.target
            ));
        }
        if !self.V.is_finite() || !self.Q.is_finite() {
            return invalid(format!(
                "V and Q must be finite, got V = {}, Q = {}",
                self.V, self.Q
            ));
        }
        if self.max_iterations == Some(0) {
            return invalid("max_iterations must be positive".to_string());
        }
        Ok(())
    }

    pub fn initial_potential(&self) -> DMatrix<f64> {
        initial_potential(self.N, self.V, self.profile)
    }

    /// Single charge `Q` in the middle of the lattice
    pub fn default_source(&self) -> DMatrix<f64> {
        point_charge(self.N, self.Q)
    }

    /// lattice coordinates 0..=N
    pub fn coords(&self) -> DVector<f64> {
        DVector::from_fn(self.N + 1, |i, _| i as f64)
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, LaplaceError> {
        let content = fs::read_to_string(path.as_ref())?;
        let config: PoissonConfig = serde_json::from_str(&content)?;
        config.validate()?;
        info!("Laplace-Poisson task loaded from {:?}", path.as_ref());
        Ok(config)
    }

    pub fn to_file<P: AsRef<Path>>(&self, path: P) -> Result<(), LaplaceError> {
        let content = serde_json::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }
}

/// Writes a Laplace-Poisson task template with default values.
pub fn create_template<P: AsRef<Path>>(path: P) -> Result<(), LaplaceError> {
    PoissonConfig::default().to_file(path)
}

#[derive(Debug, Clone)]
pub struct PoissonTask {
    pub config: PoissonConfig,
    pub solution: Option<RelaxSolution>,
}

impl PoissonTask {
    pub fn new(config: PoissonConfig) -> Result<Self, LaplaceError> {
        config.validate()?;
        Ok(Self {
            config,
            solution: None,
        })
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, LaplaceError> {
        Self::new(PoissonConfig::from_file(path)?)
    }

    /// Solves with the default point charge in the middle of the lattice.
    pub fn solve(&mut self) -> Result<&RelaxSolution, LaplaceError> {
        let source = self.config.default_source();
        self.solve_with_source(&source)
    }

    /// Solves with a caller supplied source, e.g. the field of a finished `ChargePainter`.
    pub fn solve_with_source(
        &mut self,
        source: &DMatrix<f64>,
    ) -> Result<&RelaxSolution, LaplaceError> {
        let phi = self.config.initial_potential();
        info!(
            "solving Laplace-Poisson: {}x{} lattice, {} walls, target {:e}",
            phi.nrows(),
            phi.ncols(),
            self.config.profile.as_str(),
            self.config.target
        );
        let solution = relax(&phi, source, self.config.target, self.config.max_iterations)?;
        let solution = self.solution.insert(solution);
        Ok(&*solution)
    }

    /// Saves the potential as a plain text array.
    pub fn save_results<P: AsRef<Path>>(&self, path: P) -> Result<(), LaplaceError> {
        match &self.solution {
            Some(solution) => {
                save_grid(path.as_ref(), &solution.field)?;
                info!("potential written to {:?}", path.as_ref());
            }
            None => warn!("nothing to save: Laplace-Poisson task has not been solved"),
        }
        Ok(())
    }

    pub fn pretty_print_task(&self) {
        let c = &self.config;
        let mut table = Table::new();
        table.add_row(row!["Parameter", "Value"]);
        table.add_row(row!["N", c.N]);
        table.add_row(row!["V", c.V]);
        table.add_row(row!["Q", c.Q]);
        table.add_row(row!["profile", c.profile.as_str()]);
        table.add_row(row!["target", format!("{:e}", c.target)]);
        let cap = c.max_iterations.unwrap_or(DEFAULT_MAX_ITERATIONS);
        table.add_row(row!["max iterations", cap]);
        table.printstd();
    }

    pub fn pretty_print_solution(&self) {
        let Some(solution) = &self.solution else {
            println!("Laplace-Poisson task has not been solved yet");
            return;
        };
        let field = &solution.field;
        let mut table = Table::new();
        table.add_row(row!["iterations", "norm", "phi min", "phi max", "phi centre"]);
        let centre = field[(field.nrows() / 2, field.ncols() / 2)];
        let min = field.iter().copied().fold(f64::INFINITY, f64::min);
        let max = field.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        table.add_row(row![
            solution.iterations,
            format!("{:e}", solution.residual),
            format!("{:.4}", min),
            format!("{:.4}", max),
            format!("{:.4}", centre)
        ]);
        table.printstd();
    }
}
