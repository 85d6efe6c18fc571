//! # Molecular Dynamics data browser
//!
//! Access to pre-computed Lennard-Jones simulations laid out on a 4x4 grid of state points
//! (reduced temperature T*, reduced density ρ*) of the phase diagram. Each state point has
//! its own folder, e.g. `data/T05_r01`, holding
//! - `output.txt`: per-step observables (potential, kinetic, total energy, drift, temperature, pressure)
//! - `rdf.txt`: radial distribution function, columns `r g(r)`
//! - `output.mp4` or `untitled.mpg`: pre-rendered animation
//!
//! Only the numeric data is loaded here; plotting and video playback are left to external tools.
pub mod phase_diagram;
