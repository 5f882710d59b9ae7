use std::sync::Arc;

use super::lookahead::best_manipulation;
use super::PlanningStrategy;
use crate::belief::Belief;
use crate::types::{Direction, SensorReading};
use crate::world::GridModel;

/// Baseline that always looks the way it last moved (north before the first
/// move) and otherwise moves like [`super::ExhaustivePlanner`].
pub struct HeadingStrategy {
    model: Arc<GridModel>,
    heading: Direction,
}

impl HeadingStrategy {
    pub fn new(model: Arc<GridModel>) -> Self {
        Self {
            model,
            heading: Direction::North,
        }
    }

    pub fn heading(&self) -> Direction {
        self.heading
    }
}

impl PlanningStrategy for HeadingStrategy {
    fn name(&self) -> &'static str {
        "heading"
    }

    fn choose_sensor_action(&mut self, _belief: &Belief) -> Direction {
        log::debug!("(heading) looking {}", self.heading);
        self.heading
    }

    fn choose_manipulation_action(
        &mut self,
        belief: &Belief,
        _reading: &SensorReading,
    ) -> Direction {
        let best = best_manipulation(&self.model, belief);
        log::debug!("(heading) moving {} (value {})", best.action, best.value);
        self.heading = best.action;
        best.action
    }
}
