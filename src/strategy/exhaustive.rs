use std::sync::Arc;

use super::lookahead::{argmax_first, best_manipulation, ActionValue};
use super::PlanningStrategy;
use crate::belief::{Belief, BeliefFilter, UpdateOutcome};
use crate::types::{CellLabel, Direction, SensorReading};
use crate::world::GridModel;

/// One-step expectimax, recomputed from scratch on every call.
///
/// For each sensor action `a` the score is
/// `sum over y of P(y | a) * V(a, y)`, where `V(a, y)` is the value of the
/// best manipulation action once the belief has been updated with `(a, y)`.
/// Readings that would leave the belief impossible are left out of the sum.
pub struct ExhaustivePlanner {
    model: Arc<GridModel>,
}

impl ExhaustivePlanner {
    pub fn new(model: Arc<GridModel>) -> Self {
        Self { model }
    }

    /// Value of the best manipulation action after hypothetically reading
    /// `observation`; `-inf` if the reading is impossible under `belief`.
    pub fn best_action_value(
        &self,
        belief: &Belief,
        sensor_action: Direction,
        observation: CellLabel,
    ) -> f64 {
        let filter = BeliefFilter::new(&self.model);
        match filter.update(belief, sensor_action, observation) {
            UpdateOutcome::Updated(posterior) => best_manipulation(&self.model, &posterior).value,
            UpdateOutcome::Impossible => f64::NEG_INFINITY,
        }
    }

    /// Expected value of looking towards `sensor_action`
    pub fn sensor_value(&self, belief: &Belief, sensor_action: Direction) -> f64 {
        let filter = BeliefFilter::new(&self.model);
        let mut total = 0.0;
        for observation in CellLabel::ALL {
            let value = self.best_action_value(belief, sensor_action, observation);
            if value == f64::NEG_INFINITY {
                continue;
            }
            total += filter.observation_marginal(belief, sensor_action, observation) * value;
        }
        total
    }
}

impl PlanningStrategy for ExhaustivePlanner {
    fn name(&self) -> &'static str {
        "exhaustive"
    }

    fn choose_sensor_action(&mut self, belief: &Belief) -> Direction {
        let candidates = Direction::ALL
            .iter()
            .map(|&a| (a, self.sensor_value(belief, a)));
        let best = argmax_first(candidates).unwrap_or(ActionValue {
            action: Direction::ALL[0],
            value: f64::NEG_INFINITY,
        });
        log::debug!("(exhaustive) looking {} (value {})", best.action, best.value);
        best.action
    }

    fn choose_manipulation_action(
        &mut self,
        belief: &Belief,
        _reading: &SensorReading,
    ) -> Direction {
        let best = best_manipulation(&self.model, belief);
        log::debug!("(exhaustive) moving {} (value {})", best.action, best.value);
        best.action
    }
}
