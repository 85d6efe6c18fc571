//! # Jacobi relaxation for the Laplace-Poisson equation
//!
//! Every interior cell is replaced by the average of its four neighbours plus a
//! quarter of the source term
//! ```text
//! P_new[i,j] = 0.25·(P_old[i,j+1] + P_old[i,j-1] + P_old[i+1,j] + P_old[i-1,j] + S[i,j])
//! ```
//! Border cells are never written, so whatever the initial field carries on its border
//! (uniform potential, capacitor plates, a sinusoidal wall) acts as a Dirichlet condition.
//!
//! Iteration stops when the relative L2 difference between successive iterates
//! ```text
//! norm = sqrt( Σ(P_new - P_old)² / Σ P_old² )
//! ```
//! drops to the target or the iteration cap is reached, in which case
//! [`LaplaceError::NotConverged`] is returned.
use crate::Utils::grid_io::GridIoError;
use log::{debug, info, warn};
use nalgebra::DMatrix;
use thiserror::Error;

/// Iteration cap used when the caller does not supply one
pub const DEFAULT_MAX_ITERATIONS: usize = 1_000_000;

#[derive(Debug, Error)]
pub enum LaplaceError {
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),
    #[error("Invalid grid: {0}")]
    InvalidGrid(String),
    #[error("Source field is {charge_shape:?} but the potential is {field_shape:?}")]
    ShapeMismatch {
        field_shape: (usize, usize),
        charge_shape: (usize, usize),
    },
    #[error("Cell ({row}, {col}) is outside the {nrows}x{ncols} grid")]
    OutOfBounds {
        row: usize,
        col: usize,
        nrows: usize,
        ncols: usize,
    },
    #[error("Jacobi iteration did not converge within {iterations} iterations (last norm {residual:e})")]
    NotConverged { iterations: usize, residual: f64 },
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Task file error: {0}")]
    Serde(#[from] serde_json::Error),
    #[error("Export error: {0}")]
    Export(#[from] GridIoError),
}

/// Relative L2 norm of the difference between two iterates.
///
/// When `p_old` is identically zero the ratio is undefined: an unchanged all-zero
/// iterate is a fixed point and gives 0 (converged), any change gives +∞.
/// Both iterates must have the same shape.
pub fn relative_l2_diff(p_new: &DMatrix<f64>, p_old: &DMatrix<f64>) -> f64 {
    debug_assert_eq!(p_new.shape(), p_old.shape(), "iterates differ in shape");
    let change: f64 = p_new
        .iter()
        .zip(p_old.iter())
        .map(|(new, old)| (new - old).powi(2))
        .sum();
    let magnitude = p_old.norm_squared();
    if magnitude == 0.0 {
        if change == 0.0 { 0.0 } else { f64::INFINITY }
    } else {
        (change / magnitude).sqrt()
    }
}

/// Working state of one relaxation run: current and previous iterate, last norm and
/// the number of sweeps done so far.
#[derive(Debug, Clone)]
pub struct ConvergenceState<'a> {
    field: DMatrix<f64>,
    previous: DMatrix<f64>,
    source: &'a DMatrix<f64>,
    norm: f64,
    iteration: usize,
}

impl<'a> ConvergenceState<'a> {
    /// Validates the shapes and values; no sweep is done yet, the norm starts at +∞.
    pub fn new(initial: DMatrix<f64>, source: &'a DMatrix<f64>) -> Result<Self, LaplaceError> {
        check_fields(&initial, source)?;
        let previous = initial.clone();
        Ok(Self {
            field: initial,
            previous,
            source,
            norm: f64::INFINITY,
            iteration: 0,
        })
    }

    /// One Jacobi sweep over the interior. Returns the new relative L2 norm.
    pub fn iterate(&mut self) -> f64 {
        self.previous.copy_from(&self.field);
        let (nrows, ncols) = self.field.shape();
        let p = &self.previous;
        let s = self.source;
        for j in 1..ncols - 1 {
            for i in 1..nrows - 1 {
                self.field[(i, j)] = 0.25
                    * (p[(i, j + 1)] + p[(i, j - 1)] + p[(i + 1, j)] + p[(i - 1, j)] + s[(i, j)]);
            }
        }
        self.norm = relative_l2_diff(&self.field, &self.previous);
        self.iteration += 1;
        self.norm
    }

    pub fn is_converged(&self, target: f64) -> bool {
        self.norm <= target
    }

    pub fn field(&self) -> &DMatrix<f64> {
        &self.field
    }

    pub fn previous(&self) -> &DMatrix<f64> {
        &self.previous
    }

    pub fn norm(&self) -> f64 {
        self.norm
    }

    pub fn iteration(&self) -> usize {
        self.iteration
    }

    pub fn into_field(self) -> DMatrix<f64> {
        self.field
    }
}

fn check_fields(field: &DMatrix<f64>, source: &DMatrix<f64>) -> Result<(), LaplaceError> {
    let (nrows, ncols) = field.shape();
    if nrows < 3 || ncols < 3 {
        return Err(LaplaceError::InvalidGrid(format!(
            "potential must be at least 3x3, got {}x{}",
            nrows, ncols
        )));
    }
    if source.shape() != field.shape() {
        return Err(LaplaceError::ShapeMismatch {
            field_shape: field.shape(),
            charge_shape: source.shape(),
        });
    }
    if field.iter().chain(source.iter()).any(|v| !v.is_finite()) {
        return Err(LaplaceError::InvalidGrid(
            "potential and source must contain finite values only".to_string(),
        ));
    }
    Ok(())
}

/// Converged potential
#[derive(Debug, Clone)]
pub struct RelaxSolution {
    pub field: DMatrix<f64>,
    /// number of Jacobi sweeps done
    pub iterations: usize,
    /// relative L2 norm of the last sweep
    pub residual: f64,
}

/// Relaxes `initial_field` with the fixed `source_field` until the relative L2 norm is
/// at most `target_epsilon`.
///
/// # Arguments
/// * `initial_field` - potential at least 3x3, its border is kept fixed
/// * `source_field` - additive source (charge) of the same shape
/// * `target_epsilon` - convergence target, finite and non-negative
/// * `max_iterations` - cap on the number of sweeps, `None` for [`DEFAULT_MAX_ITERATIONS`]
///
/// # Errors
/// * [`LaplaceError::NotConverged`] when the cap is reached first
/// * [`LaplaceError::InvalidConfiguration`] for a negative/non-finite target or a zero cap
/// * [`LaplaceError::InvalidGrid`], [`LaplaceError::ShapeMismatch`] for bad inputs
pub fn relax(
    initial_field: &DMatrix<f64>,
    source_field: &DMatrix<f64>,
    target_epsilon: f64,
    max_iterations: Option<usize>,
) -> Result<RelaxSolution, LaplaceError> {
    if !target_epsilon.is_finite() || target_epsilon < 0.0 {
        return Err(LaplaceError::InvalidConfiguration(format!(
            "convergence target must be finite and non-negative, got {}",
            target_epsilon
        )));
    }
    let cap = max_iterations.unwrap_or(DEFAULT_MAX_ITERATIONS);
    if cap == 0 {
        return Err(LaplaceError::InvalidConfiguration(
            "iteration cap must be positive".to_string(),
        ));
    }
    let mut state = ConvergenceState::new(initial_field.clone(), source_field)?;
    debug!(
        "Jacobi run: grid {:?}, target {:e}, cap {}",
        initial_field.shape(),
        target_epsilon,
        cap
    );
    while !state.is_converged(target_epsilon) {
        if state.iteration() >= cap {
            warn!(
                "Jacobi iteration stopped at the cap of {} sweeps, norm = {:e}",
                cap,
                state.norm()
            );
            return Err(LaplaceError::NotConverged {
                iterations: state.iteration(),
                residual: state.norm(),
            });
        }
        state.iterate();
    }
    info!(
        "Jacobi converged in {} iterations, norm = {:e}",
        state.iteration(),
        state.norm()
    );
    Ok(RelaxSolution {
        iterations: state.iteration(),
        residual: state.norm(),
        field: state.into_field(),
    })
}
