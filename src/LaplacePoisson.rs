//! # Laplace-Poisson Module
//!
//! Electrostatic potential on a square lattice
//! ```text
//! ∇²φ = -ρ
//! ```
//! solved with Jacobi relaxation. The discrete source term `S` in the stencil plays the
//! role of `ρ·h²`, so a point charge `Q` is simply `S[i,j] = Q`.
//!
//! ## Structure
//!
//! - `jacobi`: the solver `relax`, `ConvergenceState`, the relative L2 norm and `LaplaceError`
//! - `potential`: starting potentials (flat, capacitor, sinusoidal wall), point charge and
//!   the `ChargePainter` for hand-built charge fields
//! - `poisson_task`: `PoissonConfig` task record and the `PoissonTask` driver
pub mod jacobi;
mod laplace_poisson_tests;
pub mod poisson_task;
pub mod potential;
