//! # World Module
//!
//! The static grid model every strategy plans against, and the contract for
//! the world that actually holds the agent's true position.
//!
//! ## Core Concepts
//!
//! - **Grid Model**: map labels, target, movement kernel, noisy sensor model and reward
//! - **World**: produces real observations and advances the true position
//!
//! ## Available Components
//!
//! - `GridModel`: immutable map and probabilistic queries
//! - `World` trait: the core-to-world contract used by sessions
//! - `SimulatedWorld`: seedable in-process implementation of `World`

pub mod model;
pub mod simulated;

pub use model::{GridModel, DEFAULT_OBSERVATION_ACCURACY};
pub use simulated::SimulatedWorld;

use crate::types::{Direction, Observation, Position};

/// Environment holding the agent's true position.
///
/// Observations must be drawn from the same distribution that
/// [`GridModel::observation_probability`] describes, and movement must follow
/// [`GridModel::step`].
pub trait World {
    /// Model the world is generated from
    fn model(&self) -> &GridModel;

    /// Noisy reading of the cell next to the agent in `sensor_action`'s direction
    fn true_observation(&mut self, sensor_action: Direction) -> Observation;

    /// Move the agent, clamping at the edge of the map
    fn commit_movement(&mut self, action: Direction);

    /// True position of the agent
    fn position(&self) -> Position;

    /// Whether the agent stands on the target
    fn has_reached_target(&self) -> bool {
        self.position() == self.model().target()
    }
}
