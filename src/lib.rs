#[allow(non_snake_case)]
pub mod Examples;
#[allow(non_snake_case)]
pub mod HeatEquation;
#[allow(non_snake_case)]
pub mod LaplacePoisson;
#[allow(non_snake_case)]
pub mod MolecularDynamics;
#[allow(non_snake_case)]
pub mod Utils;
pub mod cli;
