//! # Boundary conditions for the 2D heat equation
//!
//! Every edge of the rectangular grid is either Dirichlet (fixed temperature,
//! written once before stepping) or Neumann (zero gradient, the boundary line is
//! a copy of the adjacent interior line after every step).
//!
//! ## Grid orientation
//! | Edge | Cells | Copied from |
//! |------|-------|-------------|
//! | North | last row | row `ny - 2` |
//! | East | last column | column `nx - 2` |
//! | South | row 0 | row 1 |
//! | West | column 0 | column 1 |
//!
//! Edges are always processed in the order north, east, south, west, so corner
//! cells are owned by whichever edge comes last in that order.
//!
//! ## Usage
//! ```rust, ignore
//! let bc: BoundarySpec = "ne".parse()?;
//! bc.set_dirichlet(&mut field, 100.0);
//! bc.apply_neumann(&mut field);
//! ```
use super::explicit_2d::HeatError;
use nalgebra::DMatrix;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

/// Edge of the rectangular grid. Variant order is the order boundaries are applied in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Edge {
    North,
    East,
    South,
    West,
}

impl Edge {
    /// All edges in application order
    pub const ALL: [Edge; 4] = [Edge::North, Edge::East, Edge::South, Edge::West];

    /// one-letter tag used in task files: 'n', 'e', 's', 'w'
    pub fn tag(&self) -> char {
        match self {
            Edge::North => 'n',
            Edge::East => 'e',
            Edge::South => 's',
            Edge::West => 'w',
        }
    }

    pub fn from_tag(tag: char) -> Option<Edge> {
        match tag.to_ascii_lowercase() {
            'n' => Some(Edge::North),
            'e' => Some(Edge::East),
            's' => Some(Edge::South),
            'w' => Some(Edge::West),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Edge::North => "north",
            Edge::East => "east",
            Edge::South => "south",
            Edge::West => "west",
        }
    }
}

/// Set of edges carrying a zero-gradient (Neumann) condition. All other edges are Dirichlet.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BoundarySpec {
    neumann: BTreeSet<Edge>,
}

impl BoundarySpec {
    /// All four edges Dirichlet
    pub fn none() -> Self {
        Self::default()
    }

    /// All four edges Neumann
    pub fn all_neumann() -> Self {
        Self::from_edges(Edge::ALL)
    }

    pub fn from_edges<I: IntoIterator<Item = Edge>>(edges: I) -> Self {
        Self {
            neumann: edges.into_iter().collect(),
        }
    }

    /// Parses a compact tag string like "ne" or "swe". Whitespace is ignored, the
    /// empty string means no Neumann edges.
    pub fn parse(tags: &str) -> Result<Self, HeatError> {
        let mut neumann = BTreeSet::new();
        for c in tags.chars().filter(|c| !c.is_whitespace()) {
            let edge = Edge::from_tag(c).ok_or_else(|| {
                HeatError::InvalidConfiguration(format!(
                    "unknown boundary tag '{}' in \"{}\": expected any combination of n, s, e, w",
                    c, tags
                ))
            })?;
            neumann.insert(edge);
        }
        Ok(Self { neumann })
    }

    pub fn is_neumann(&self, edge: Edge) -> bool {
        self.neumann.contains(&edge)
    }

    pub fn is_dirichlet(&self, edge: Edge) -> bool {
        !self.is_neumann(edge)
    }

    /// Neumann edges in application order
    pub fn neumann_edges(&self) -> impl Iterator<Item = Edge> + '_ {
        self.neumann.iter().copied()
    }

    pub fn dirichlet_edges(&self) -> impl Iterator<Item = Edge> + '_ {
        Edge::ALL.into_iter().filter(|edge| self.is_dirichlet(*edge))
    }

    /// Writes `value` on every Dirichlet edge (north, east, south, west).
    pub fn set_dirichlet(&self, field: &mut DMatrix<f64>, value: f64) {
        let (ny, nx) = field.shape();
        if ny == 0 || nx == 0 {
            return;
        }
        for edge in self.dirichlet_edges() {
            match edge {
                Edge::North => field.row_mut(ny - 1).fill(value),
                Edge::East => field.column_mut(nx - 1).fill(value),
                Edge::South => field.row_mut(0).fill(value),
                Edge::West => field.column_mut(0).fill(value),
            }
        }
    }

    /// Copies the adjacent interior line onto every Neumann edge (zero gradient).
    pub fn apply_neumann(&self, field: &mut DMatrix<f64>) {
        let (ny, nx) = field.shape();
        if ny < 2 || nx < 2 {
            return;
        }
        for edge in self.neumann_edges() {
            match edge {
                Edge::North => {
                    let inner = field.row(ny - 2).clone_owned();
                    field.row_mut(ny - 1).copy_from(&inner);
                }
                Edge::East => {
                    let inner = field.column(nx - 2).clone_owned();
                    field.column_mut(nx - 1).copy_from(&inner);
                }
                Edge::South => {
                    let inner = field.row(1).clone_owned();
                    field.row_mut(0).copy_from(&inner);
                }
                Edge::West => {
                    let inner = field.column(1).clone_owned();
                    field.column_mut(0).copy_from(&inner);
                }
            }
        }
    }

    /// Compact tag string, inverse of [`BoundarySpec::parse`]
    pub fn tags(&self) -> String {
        self.neumann.iter().map(Edge::tag).collect()
    }
}

impl FromStr for BoundarySpec {
    type Err = HeatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        BoundarySpec::parse(s)
    }
}

impl fmt::Display for BoundarySpec {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let describe = |edge: Edge| {
            let kind = if self.is_neumann(edge) {
                "Neumann"
            } else {
                "Dirichlet"
            };
            format!("{}: {}", edge.as_str(), kind)
        };
        let parts: Vec<String> = Edge::ALL.into_iter().map(describe).collect();
        write!(f, "{}", parts.join(", "))
    }
}
