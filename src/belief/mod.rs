//! # Belief Module
//!
//! This module provides the belief representation for an agent that does not
//! know where it is. A belief is a probability mass function over the cells
//! of the grid, updated by Bayes' rule from sensor readings and pushed through
//! the movement kernel after every move.
//!
//! ## Core Concepts
//!
//! - **Belief**: probability of the agent standing on each cell
//! - **Measurement update**: reweight by observation likelihood and renormalise
//! - **Prediction**: convolve the belief with the transition model
//! - **Impossible**: the explicit outcome of an update that leaves no mass anywhere
//!
//! ## Available Components
//!
//! - `Belief`: grid PMF with entropy and KL divergence
//! - `UpdateOutcome`: tagged result of a measurement update
//! - `BeliefFilter`: the `update` / `predict` pair over a `GridModel`

pub mod filter;

pub use filter::BeliefFilter;

use ndarray::{Array2, ArrayView2};
use serde::{Deserialize, Serialize};

use crate::error::{ExplorerError, Result};
use crate::types::Position;

/// Tolerance used when validating that a grid sums to one
pub const MASS_TOLERANCE: f64 = 1e-9;

/// Probability distribution over the agent's own position
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawBelief")]
pub struct Belief {
    /// Probabilities indexed `[[x, y]]`
    grid: Array2<f64>,
}

/// Unchecked wire form; deserialization goes through [`Belief::from_grid`]
#[derive(Deserialize)]
struct RawBelief {
    grid: Array2<f64>,
}

impl TryFrom<RawBelief> for Belief {
    type Error = ExplorerError;

    fn try_from(raw: RawBelief) -> Result<Self> {
        Belief::from_grid(raw.grid)
    }
}

fn check_distribution(grid: &Array2<f64>) -> Result<()> {
    if grid.is_empty() {
        return Err(ExplorerError::invalid_belief("grid has no cells"));
    }
    if let Some(bad) = grid.iter().find(|p| !p.is_finite() || **p < 0.0) {
        return Err(ExplorerError::invalid_belief(format!(
            "cell probability {} is not a non-negative number",
            bad
        )));
    }
    let total = grid.sum();
    if (total - 1.0).abs() > MASS_TOLERANCE {
        return Err(ExplorerError::invalid_belief(format!(
            "total mass is {}, expected 1",
            total
        )));
    }
    Ok(())
}

impl Belief {
    /// Uniform belief, `1 / (width * height)` on every cell
    pub fn uniform(width: usize, height: usize) -> Self {
        let cells = (width * height).max(1);
        Self {
            grid: Array2::from_elem((width, height), 1.0 / cells as f64),
        }
    }

    /// All mass on a single cell
    pub fn point_mass(width: usize, height: usize, position: Position) -> Result<Self> {
        if position.x >= width || position.y >= height {
            return Err(ExplorerError::model(format!(
                "{} is outside a {}x{} grid",
                position, width, height
            )));
        }
        let mut grid = Array2::zeros((width, height));
        grid[[position.x, position.y]] = 1.0;
        Ok(Self { grid })
    }

    /// Wrap an existing grid, checking that it is a probability mass function
    pub fn from_grid(grid: Array2<f64>) -> Result<Self> {
        check_distribution(&grid)?;
        Ok(Self { grid })
    }

    /// Check that the cells are non-negative and sum to one
    pub fn validate(&self) -> Result<()> {
        check_distribution(&self.grid)
    }

    /// Normalise non-negative weights. `None` when there is no mass to normalise.
    pub(crate) fn normalized(mut grid: Array2<f64>) -> Option<Self> {
        let total = grid.sum();
        if total > 0.0 && total.is_finite() {
            grid /= total;
            Some(Self { grid })
        } else {
            None
        }
    }

    pub fn width(&self) -> usize {
        self.grid.dim().0
    }

    pub fn height(&self) -> usize {
        self.grid.dim().1
    }

    /// Probability assigned to `position`; zero off the grid
    pub fn probability(&self, position: Position) -> f64 {
        self.grid
            .get([position.x, position.y])
            .copied()
            .unwrap_or(0.0)
    }

    /// Read-only view of the underlying grid, indexed `[[x, y]]`
    pub fn grid(&self) -> ArrayView2<'_, f64> {
        self.grid.view()
    }

    pub fn total_mass(&self) -> f64 {
        self.grid.sum()
    }

    /// Cells with their probability, x-major
    pub fn iter(&self) -> impl Iterator<Item = (Position, f64)> + '_ {
        self.grid
            .indexed_iter()
            .map(|((x, y), &p)| (Position::new(x, y), p))
    }

    /// Most probable cell; the first one in x-major order on ties
    pub fn most_likely(&self) -> Position {
        let mut best = (Position::new(0, 0), f64::NEG_INFINITY);
        for (position, p) in self.iter() {
            if p > best.1 {
                best = (position, p);
            }
        }
        best.0
    }

    /// Shannon entropy in bits. Cells with zero mass contribute nothing.
    pub fn entropy(&self) -> f64 {
        let sum: f64 = self
            .grid
            .iter()
            .filter(|&&p| p > 0.0)
            .map(|&p| p * p.log2())
            .sum();
        (-sum).max(0.0)
    }

    /// Kullback-Leibler divergence `D_KL(self || prior)` in nats.
    ///
    /// Only cells where both distributions are strictly positive are summed.
    pub fn kl_divergence(&self, prior: &Belief) -> f64 {
        self.grid
            .iter()
            .zip(prior.grid.iter())
            .filter(|(&p, &q)| p > 0.0 && q > 0.0)
            .map(|(&p, &q)| p * (p / q).ln())
            .sum()
    }
}

/// Result of a measurement update
#[derive(Clone, Debug, PartialEq)]
pub enum UpdateOutcome {
    /// The normalised posterior
    Updated(Belief),
    /// No cell could have produced the observation; the posterior has no mass
    Impossible,
}

impl UpdateOutcome {
    pub fn is_impossible(&self) -> bool {
        matches!(self, UpdateOutcome::Impossible)
    }

    pub fn belief(&self) -> Option<&Belief> {
        match self {
            UpdateOutcome::Updated(belief) => Some(belief),
            UpdateOutcome::Impossible => None,
        }
    }

    pub fn into_belief(self) -> Option<Belief> {
        match self {
            UpdateOutcome::Updated(belief) => Some(belief),
            UpdateOutcome::Impossible => None,
        }
    }
}
