use std::sync::Arc;

use super::lookahead::{argmax_first, best_manipulation, ActionValue};
use super::PlanningStrategy;
use crate::belief::{Belief, BeliefFilter, UpdateOutcome};
use crate::types::{CellLabel, Direction, SensorReading};
use crate::world::GridModel;

/// Looks where the reading is expected to be most surprising, then moves like
/// [`super::ExhaustivePlanner`].
///
/// Surprise is Bayesian surprise: `D_KL(posterior || prior)`. It tracks the
/// entropy drop closely but is not the same quantity.
pub struct SurpriseMaximizer {
    model: Arc<GridModel>,
}

impl SurpriseMaximizer {
    pub fn new(model: Arc<GridModel>) -> Self {
        Self { model }
    }

    /// KL divergence of the hypothetical posterior from `belief`, or `None`
    /// when the reading is impossible.
    pub fn surprise(
        &self,
        belief: &Belief,
        sensor_action: Direction,
        observation: CellLabel,
    ) -> Option<f64> {
        let filter = BeliefFilter::new(&self.model);
        match filter.update(belief, sensor_action, observation) {
            UpdateOutcome::Updated(posterior) => Some(posterior.kl_divergence(belief)),
            UpdateOutcome::Impossible => None,
        }
    }

    /// Surprise averaged over readings, weighted by `P(y | a)`
    pub fn expected_surprise(&self, belief: &Belief, sensor_action: Direction) -> f64 {
        let filter = BeliefFilter::new(&self.model);
        CellLabel::ALL
            .iter()
            .filter_map(|&observation| {
                self.surprise(belief, sensor_action, observation).map(|kl| {
                    filter.observation_marginal(belief, sensor_action, observation) * kl
                })
            })
            .sum()
    }
}

impl PlanningStrategy for SurpriseMaximizer {
    fn name(&self) -> &'static str {
        "surprise"
    }

    fn choose_sensor_action(&mut self, belief: &Belief) -> Direction {
        let candidates = Direction::ALL
            .iter()
            .map(|&a| (a, self.expected_surprise(belief, a)));
        let best = argmax_first(candidates).unwrap_or(ActionValue {
            action: Direction::ALL[0],
            value: f64::NEG_INFINITY,
        });
        log::debug!(
            "(surprise) looking {} (expected surprise {})",
            best.action,
            best.value
        );
        best.action
    }

    fn choose_manipulation_action(
        &mut self,
        belief: &Belief,
        _reading: &SensorReading,
    ) -> Direction {
        let best = best_manipulation(&self.model, belief);
        log::debug!("(surprise) moving {} (value {})", best.action, best.value);
        best.action
    }
}
