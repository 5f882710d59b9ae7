use std::sync::Arc;

use super::lookahead::{argmax_first, best_manipulation, ActionValue};
use super::PlanningStrategy;
use crate::belief::{Belief, BeliefFilter, UpdateOutcome};
use crate::types::{CellLabel, Direction, SensorReading};
use crate::world::GridModel;

/// Looks where the belief entropy is expected to drop the most, then moves
/// like [`super::ExhaustivePlanner`].
pub struct EntropyMinimizer {
    model: Arc<GridModel>,
}

impl EntropyMinimizer {
    pub fn new(model: Arc<GridModel>) -> Self {
        Self { model }
    }

    /// `H(belief) - H(posterior)` for one hypothetical reading; 0 when the
    /// reading is impossible.
    pub fn entropy_reduction(
        &self,
        belief: &Belief,
        sensor_action: Direction,
        observation: CellLabel,
    ) -> f64 {
        let filter = BeliefFilter::new(&self.model);
        match filter.update(belief, sensor_action, observation) {
            UpdateOutcome::Updated(posterior) => belief.entropy() - posterior.entropy(),
            UpdateOutcome::Impossible => 0.0,
        }
    }

    /// Entropy reduction averaged over readings, weighted by `P(y | a)`
    pub fn expected_entropy_reduction(&self, belief: &Belief, sensor_action: Direction) -> f64 {
        let filter = BeliefFilter::new(&self.model);
        CellLabel::ALL
            .iter()
            .map(|&observation| {
                filter.observation_marginal(belief, sensor_action, observation)
                    * self.entropy_reduction(belief, sensor_action, observation)
            })
            .sum()
    }
}

impl PlanningStrategy for EntropyMinimizer {
    fn name(&self) -> &'static str {
        "entropy"
    }

    fn choose_sensor_action(&mut self, belief: &Belief) -> Direction {
        let candidates = Direction::ALL
            .iter()
            .map(|&a| (a, self.expected_entropy_reduction(belief, a)));
        let best = argmax_first(candidates).unwrap_or(ActionValue {
            action: Direction::ALL[0],
            value: f64::NEG_INFINITY,
        });
        log::debug!(
            "(entropy) looking {} (expected reduction {} bits, entropy now {})",
            best.action,
            best.value,
            belief.entropy()
        );
        best.action
    }

    fn choose_manipulation_action(
        &mut self,
        belief: &Belief,
        _reading: &SensorReading,
    ) -> Direction {
        let best = best_manipulation(&self.model, belief);
        log::debug!("(entropy) moving {} (value {})", best.action, best.value);
        best.action
    }
}
