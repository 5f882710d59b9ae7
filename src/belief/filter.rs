use ndarray::Array2;

use super::{Belief, UpdateOutcome};
use crate::error::{ExplorerError, Result};
use crate::types::{Direction, Observation, Position};
use crate::world::GridModel;

/// Discrete Bayes filter over a [`GridModel`].
///
/// Stateless: both operations take a belief and hand back a new one, so
/// planners can evaluate hypothetical readings and throw the results away.
#[derive(Clone, Copy, Debug)]
pub struct BeliefFilter<'m> {
    model: &'m GridModel,
}

impl<'m> BeliefFilter<'m> {
    pub fn new(model: &'m GridModel) -> Self {
        Self { model }
    }

    pub fn model(&self) -> &'m GridModel {
        self.model
    }

    /// Check that `belief` covers exactly the model's grid
    pub fn check_shape(&self, belief: &Belief) -> Result<()> {
        if belief.width() != self.model.width() || belief.height() != self.model.height() {
            return Err(ExplorerError::model(format!(
                "belief is {}x{} but the map is {}x{}",
                belief.width(),
                belief.height(),
                self.model.width(),
                self.model.height()
            )));
        }
        Ok(())
    }

    /// Measurement update: weight every cell by the likelihood of `observation`
    /// and renormalise. Returns [`UpdateOutcome::Impossible`] when no mass is left.
    pub fn update(
        &self,
        belief: &Belief,
        sensor_action: Direction,
        observation: Observation,
    ) -> UpdateOutcome {
        let weighted = Array2::from_shape_fn(belief.grid.dim(), |(x, y)| {
            belief.grid[[x, y]]
                * self
                    .model
                    .observation_probability(observation, sensor_action, Position::new(x, y))
        });

        match Belief::normalized(weighted) {
            Some(posterior) => UpdateOutcome::Updated(posterior),
            None => UpdateOutcome::Impossible,
        }
    }

    /// Prediction step: push the belief through the movement kernel for `action`.
    ///
    /// `new(x, y) = sum over (px, py) of prior(px, py) * T(x, y | px, py, action)`,
    /// renormalised.
    pub fn predict(&self, belief: &Belief, action: Direction) -> Belief {
        let mut next = Array2::zeros(belief.grid.dim());
        for ((x, y), cell) in next.indexed_iter_mut() {
            let to = Position::new(x, y);
            *cell = belief
                .iter()
                .map(|(from, p)| p * self.model.transition_probability(to, from, action))
                .sum::<f64>();
        }

        // The kernel conserves mass, so only an empty prior can fail here
        Belief::normalized(next.clone()).unwrap_or(Belief { grid: next })
    }

    /// Probability of reading `observation` after looking towards
    /// `sensor_action`, marginalised over the belief: `P(y | a)`.
    pub fn observation_marginal(
        &self,
        belief: &Belief,
        sensor_action: Direction,
        observation: Observation,
    ) -> f64 {
        belief
            .iter()
            .map(|(position, p)| {
                self.model
                    .observation_probability(observation, sensor_action, position)
                    * p
            })
            .sum()
    }
}
