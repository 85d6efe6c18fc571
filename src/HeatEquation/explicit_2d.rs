//! # Explicit (FTCS) stepper for the 2D heat equation
//!
//! Advances a temperature field `T(y, x)` with the Forward-Time Central-Space scheme
//! ```text
//! T[i,j] <- T[i,j] + σx·(T[i,j+1] - 2T[i,j] + T[i,j-1]) + σy·(T[i+1,j] - 2T[i,j] + T[i-1,j])
//! ```
//! where `σx = α·dt/dx²` and `σy = α·dt/dy²`. Only interior cells are updated by the
//! stencil; after every step the Neumann edges of the [`BoundarySpec`] are refreshed.
//! Dirichlet edges keep whatever value the initial field carries.
//!
//! The scheme is stable only for `σx + σy <= 0.5`; coefficients outside that range are
//! rejected with [`HeatError::Unstable`] instead of producing a diverging history.
use super::boundary::BoundarySpec;
use crate::Utils::grid_io::GridIoError;
use log::{debug, info};
use nalgebra::DMatrix;
use thiserror::Error;

/// Upper bound of σx + σy for the explicit 2D scheme
pub const STABILITY_LIMIT: f64 = 0.5;
/// slack for coefficients derived in floating point right at the limit
const STABILITY_TOLERANCE: f64 = 1e-12;

#[derive(Debug, Error)]
pub enum HeatError {
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),
    #[error("Invalid grid: {0}")]
    InvalidGrid(String),
    #[error(
        "Unstable FTCS coefficients: sigma_x = {sigma_x}, sigma_y = {sigma_y}, sigma_x + sigma_y must not exceed {limit}"
    )]
    Unstable {
        sigma_x: f64,
        sigma_y: f64,
        limit: f64,
    },
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Task file error: {0}")]
    Serde(#[from] serde_json::Error),
    #[error("Export error: {0}")]
    Export(#[from] GridIoError),
}

/// Ordered sequence of grid snapshots, frame `n` is the state after `n + 1` steps.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TimeHistory {
    frames: Vec<DMatrix<f64>>,
}

impl TimeHistory {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            frames: Vec::with_capacity(capacity),
        }
    }

    pub fn push(&mut self, frame: DMatrix<f64>) {
        self.frames.push(frame);
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    pub fn frame(&self, step: usize) -> Option<&DMatrix<f64>> {
        self.frames.get(step)
    }

    pub fn last(&self) -> Option<&DMatrix<f64>> {
        self.frames.last()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, DMatrix<f64>> {
        self.frames.iter()
    }

    pub fn frames(&self) -> &[DMatrix<f64>] {
        &self.frames
    }

    /// smallest value over all frames, used for a fixed colour scale
    pub fn min(&self) -> Option<f64> {
        self.frames
            .iter()
            .flat_map(|frame| frame.iter().copied())
            .reduce(f64::min)
    }

    /// largest value over all frames
    pub fn max(&self) -> Option<f64> {
        self.frames
            .iter()
            .flat_map(|frame| frame.iter().copied())
            .reduce(f64::max)
    }
}

impl<'a> IntoIterator for &'a TimeHistory {
    type Item = &'a DMatrix<f64>;
    type IntoIter = std::slice::Iter<'a, DMatrix<f64>>;

    fn into_iter(self) -> Self::IntoIter {
        self.frames.iter()
    }
}

/// Checks the FTCS coefficients against the stability bound.
pub fn check_stability(sigma_x: f64, sigma_y: f64) -> Result<(), HeatError> {
    let unstable = || HeatError::Unstable {
        sigma_x,
        sigma_y,
        limit: STABILITY_LIMIT,
    };
    if !sigma_x.is_finite() || !sigma_y.is_finite() || sigma_x < 0.0 || sigma_y < 0.0 {
        return Err(unstable());
    }
    if sigma_x + sigma_y > STABILITY_LIMIT + STABILITY_TOLERANCE {
        return Err(unstable());
    }
    Ok(())
}

fn check_grid(field: &DMatrix<f64>) -> Result<(), HeatError> {
    let (ny, nx) = field.shape();
    if ny < 2 || nx < 2 {
        return Err(HeatError::InvalidGrid(format!(
            "temperature field must be at least 2x2, got {}x{}",
            ny, nx
        )));
    }
    if let Some(idx) = field.iter().position(|v| !v.is_finite()) {
        // nalgebra storage is column major
        return Err(HeatError::InvalidGrid(format!(
            "non-finite temperature at row {}, column {}",
            idx % ny,
            idx / ny
        )));
    }
    Ok(())
}

/// One FTCS step. `previous` is scratch space of the same shape and receives the
/// state before the step, so the stencil never reads cells it has already written.
pub fn ftcs_step(
    field: &mut DMatrix<f64>,
    previous: &mut DMatrix<f64>,
    sigma_x: f64,
    sigma_y: f64,
    boundary: &BoundarySpec,
) {
    previous.copy_from(field);
    let (ny, nx) = field.shape();
    let p = &*previous;
    for j in 1..nx.saturating_sub(1) {
        for i in 1..ny.saturating_sub(1) {
            let centre = p[(i, j)];
            field[(i, j)] = centre
                + sigma_x * (p[(i, j + 1)] - 2.0 * centre + p[(i, j - 1)])
                + sigma_y * (p[(i + 1, j)] - 2.0 * centre + p[(i - 1, j)]);
        }
    }
    boundary.apply_neumann(field);
}

/// Runs `step_count` explicit steps from `initial_field` and returns every intermediate state.
///
/// # Arguments
/// * `initial_field` - ny x nx temperature field, Dirichlet edges already set
/// * `step_count` - number of steps; zero gives an empty history
/// * `sigma_x`, `sigma_y` - `α·dt/dx²`, `α·dt/dy²`
/// * `boundary` - Neumann edges
///
/// # Errors
/// * [`HeatError::Unstable`] when `σx + σy > 0.5` or a coefficient is negative/non-finite
/// * [`HeatError::InvalidGrid`] for grids smaller than 2x2 or non-finite values
pub fn explicit_step(
    initial_field: &DMatrix<f64>,
    step_count: usize,
    sigma_x: f64,
    sigma_y: f64,
    boundary: &BoundarySpec,
) -> Result<TimeHistory, HeatError> {
    check_stability(sigma_x, sigma_y)?;
    check_grid(initial_field)?;
    let (ny, nx) = initial_field.shape();
    debug!(
        "FTCS run: grid {}x{}, {} steps, sigma_x = {}, sigma_y = {}, boundaries [{}]",
        ny, nx, step_count, sigma_x, sigma_y, boundary
    );

    let mut field = initial_field.clone();
    let mut previous = DMatrix::zeros(ny, nx);
    let mut history = TimeHistory::with_capacity(step_count);
    for _ in 0..step_count {
        ftcs_step(&mut field, &mut previous, sigma_x, sigma_y, boundary);
        history.push(field.clone());
    }
    info!("FTCS finished: {} steps on a {}x{} grid", step_count, ny, nx);
    Ok(history)
}
