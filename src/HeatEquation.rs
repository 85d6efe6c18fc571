//! # 2D Heat Equation Module
//!
//! Transient heat conduction in a rectangular plate
//! ```text
//! ∂T/∂t = α (∂²T/∂x² + ∂²T/∂y²)
//! ```
//! solved with the explicit Forward-Time Central-Space (FTCS) scheme.
//!
//! ## Nomenclature
//!
//! | Symbol | Description | Units |
//! |--------|-------------|-------|
//! | `α` | Thermal diffusivity | m²/s |
//! | `Lx`, `Ly` | Plate size | m |
//! | `nx`, `ny` | Grid points per axis | - |
//! | `dx`, `dy` | Grid spacing `L/(n-1)` | m |
//! | `dt` | Time step `0.25·min(dx, dy)²/α` | s |
//! | `σx`, `σy` | `α·dt/dx²`, `α·dt/dy²` | - |
//! | `Tb` | Bath temperature on Dirichlet edges | C |
//! | `T0` | Initial plate temperature | C |
//!
//! ## Boundary Conditions
//!
//! - Dirichlet (default): the edge is clamped to `Tb`
//! - Neumann (zero gradient): `∂T/∂n = 0`, the edge copies its interior neighbour line
//!
//! ## Structure
//!
//! - `boundary`: `Edge`, `BoundarySpec`
//! - `explicit_2d`: the stepper `explicit_step`, `TimeHistory`, `HeatError`
//! - `heat_task`: `HeatConfig` task record and the `HeatTask` driver
pub mod boundary;
pub mod explicit_2d;
pub mod heat_task;
