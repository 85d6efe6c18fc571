//! Initial potentials and source (charge) fields on an (N+1)x(N+1) lattice.
use super::jacobi::LaplaceError;
use nalgebra::DMatrix;
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

/// Border pattern of the starting potential
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum BoundaryProfile {
    /// the whole lattice at `V`
    #[default]
    Flat,
    /// zero potential, west wall at `+V`, east wall at `-V`
    Capacitor,
    /// zero potential, east wall `0.5·V·sin(1.5π·i/N)`
    Sinusoidal,
}

impl BoundaryProfile {
    pub const ALL: [BoundaryProfile; 3] = [
        BoundaryProfile::Flat,
        BoundaryProfile::Capacitor,
        BoundaryProfile::Sinusoidal,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            BoundaryProfile::Flat => "flat",
            BoundaryProfile::Capacitor => "capacitor",
            BoundaryProfile::Sinusoidal => "sinusoidal",
        }
    }

    /// Case-insensitive lookup by `as_str` name
    pub fn from_name(name: &str) -> Option<Self> {
        let name = name.trim();
        Self::ALL
            .into_iter()
            .find(|profile| profile.as_str().eq_ignore_ascii_case(name))
    }
}

/// Starting potential for an (n+1)x(n+1) lattice.
pub fn initial_potential(n: usize, v: f64, profile: BoundaryProfile) -> DMatrix<f64> {
    let size = n + 1;
    match profile {
        BoundaryProfile::Flat => DMatrix::from_element(size, size, v),
        BoundaryProfile::Capacitor => {
            let mut phi = DMatrix::zeros(size, size);
            phi.column_mut(size - 1).fill(-v);
            phi.column_mut(0).fill(v);
            phi
        }
        BoundaryProfile::Sinusoidal => {
            let mut phi = DMatrix::zeros(size, size);
            let last = n.max(1) as f64;
            for i in 0..size {
                phi[(i, size - 1)] = 0.5 * v * (1.5 * PI * i as f64 / last).sin();
            }
            phi
        }
    }
}

/// Empty source with a single charge `q` in the middle of the lattice.
pub fn point_charge(n: usize, q: f64) -> DMatrix<f64> {
    let mut charge = DMatrix::zeros(n + 1, n + 1);
    charge[(n / 2, n / 2)] = q;
    charge
}

/// What a paint event writes into a cell
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stroke {
    /// `+Q`
    Positive,
    /// `0`
    Erase,
    /// `-Q`
    Negative,
}

/// Builds a charge field cell by cell, e.g. from mouse or terminal input. The field is
/// only handed out by [`ChargePainter::finish`], after painting has ended.
#[derive(Debug, Clone)]
pub struct ChargePainter {
    field: DMatrix<f64>,
    charge: f64,
}

impl ChargePainter {
    /// Empty (n+1)x(n+1) field painted with charges of magnitude `q`
    pub fn new(n: usize, q: f64) -> Self {
        Self {
            field: DMatrix::zeros(n + 1, n + 1),
            charge: q,
        }
    }

    pub fn paint(&mut self, row: usize, col: usize, stroke: Stroke) -> Result<(), LaplaceError> {
        let (nrows, ncols) = self.field.shape();
        if row >= nrows || col >= ncols {
            return Err(LaplaceError::OutOfBounds {
                row,
                col,
                nrows,
                ncols,
            });
        }
        self.field[(row, col)] = match stroke {
            Stroke::Positive => self.charge,
            Stroke::Erase => 0.0,
            Stroke::Negative => -self.charge,
        };
        Ok(())
    }

    pub fn charge_at(&self, row: usize, col: usize) -> Option<f64> {
        self.field.get((row, col)).copied()
    }

    /// net charge painted so far
    pub fn total_charge(&self) -> f64 {
        self.field.sum()
    }

    pub fn finish(self) -> DMatrix<f64> {
        self.field
    }
}
