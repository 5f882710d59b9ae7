use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::sync::Arc;

use super::{GridModel, World};
use crate::error::{ExplorerError, Result};
use crate::types::{Direction, Observation, Position};

/// Default seed for simulated worlds
pub const DEFAULT_WORLD_SEED: u64 = 0xfade_face;

/// In-process world driven by a seedable generator
pub struct SimulatedWorld {
    model: Arc<GridModel>,
    position: Position,
    rng: StdRng,
}

impl SimulatedWorld {
    pub fn new(model: Arc<GridModel>, start: Position, seed: u64) -> Result<Self> {
        if !model.contains(start) {
            return Err(ExplorerError::configuration(format!(
                "start position {} is outside the {}x{} map",
                start,
                model.width(),
                model.height()
            )));
        }
        Ok(Self {
            model,
            position: start,
            rng: StdRng::seed_from_u64(seed),
        })
    }

    /// Sample a reading for an agent at `position`.
    ///
    /// The true label comes back with probability `p`; otherwise one of the
    /// two wrong labels, `(label + 1) mod 3` or `(label + 2) mod 3`, each with
    /// probability `(1 - p) / 2`.
    fn sample_observation(&mut self, position: Position, sensor_action: Direction) -> Observation {
        let truth = self.model.examined_label(position, sensor_action);
        let accuracy = self.model.observation_accuracy();
        let r: f64 = self.rng.gen();

        if r < accuracy {
            truth
        } else if r < accuracy + (1.0 - accuracy) / 2.0 {
            truth.shifted(1)
        } else {
            truth.shifted(2)
        }
    }
}

impl World for SimulatedWorld {
    fn model(&self) -> &GridModel {
        &self.model
    }

    fn true_observation(&mut self, sensor_action: Direction) -> Observation {
        self.sample_observation(self.position, sensor_action)
    }

    fn commit_movement(&mut self, action: Direction) {
        self.position = self.model.step(self.position, action);
    }

    fn position(&self) -> Position {
        self.position
    }
}
