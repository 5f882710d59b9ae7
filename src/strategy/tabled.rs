use std::sync::Arc;

use super::lookahead::{argmax_first, best_manipulation, ActionValue};
use super::PlanningStrategy;
use crate::belief::{Belief, BeliefFilter, UpdateOutcome};
use crate::types::{CellLabel, Direction, SensorReading};
use crate::world::GridModel;

/// Precomputed outcome of one `(sensor action, observation)` pair
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TableEntry {
    /// `P(y | a)` under the belief the table was built from
    pub likelihood: f64,
    /// Best manipulation action after the reading; `None` if the reading is impossible
    pub best: Option<ActionValue>,
}

impl TableEntry {
    /// Value of the best action, `-inf` for impossible readings
    pub fn value(&self) -> f64 {
        self.best.map_or(f64::NEG_INFINITY, |best| best.value)
    }
}

/// Best manipulation action and its value for every sensor action and observation
#[derive(Clone, Debug, PartialEq)]
pub struct ActionValueTable {
    /// Indexed by `sensor.index() * 3 + observation.index()`
    entries: Vec<TableEntry>,
}

impl ActionValueTable {
    /// Evaluate every `(a, y)` pair against `belief`
    pub fn build(model: &GridModel, belief: &Belief) -> Self {
        let filter = BeliefFilter::new(model);
        let mut entries = vec![
            TableEntry {
                likelihood: 0.0,
                best: None,
            };
            Direction::ALL.len() * CellLabel::ALL.len()
        ];

        for sensor_action in Direction::ALL {
            for observation in CellLabel::ALL {
                let best = match filter.update(belief, sensor_action, observation) {
                    UpdateOutcome::Updated(posterior) => Some(best_manipulation(model, &posterior)),
                    UpdateOutcome::Impossible => None,
                };
                entries[Self::slot(sensor_action, observation)] = TableEntry {
                    likelihood: filter.observation_marginal(belief, sensor_action, observation),
                    best,
                };
            }
        }

        Self { entries }
    }

    fn slot(sensor_action: Direction, observation: CellLabel) -> usize {
        sensor_action.index() * CellLabel::ALL.len() + observation.index()
    }

    pub fn entry(&self, sensor_action: Direction, observation: CellLabel) -> &TableEntry {
        &self.entries[Self::slot(sensor_action, observation)]
    }

    /// Expected value of looking towards `sensor_action`, skipping impossible readings
    pub fn sensor_value(&self, sensor_action: Direction) -> f64 {
        let mut total = 0.0;
        for observation in CellLabel::ALL {
            let entry = self.entry(sensor_action, observation);
            let value = entry.value();
            if value == f64::NEG_INFINITY {
                continue;
            }
            total += entry.likelihood * value;
        }
        total
    }
}

/// Same decisions as [`super::ExhaustivePlanner`], computed once per turn.
///
/// The table is rebuilt before every sensor decision. After the reading
/// arrives the manipulation action is a lookup into it.
pub struct TabledPlanner {
    model: Arc<GridModel>,
    table: Option<ActionValueTable>,
}

impl TabledPlanner {
    pub fn new(model: Arc<GridModel>) -> Self {
        Self { model, table: None }
    }

    /// Table built for the current turn, if a sensor action has been chosen
    pub fn table(&self) -> Option<&ActionValueTable> {
        self.table.as_ref()
    }
}

impl PlanningStrategy for TabledPlanner {
    fn name(&self) -> &'static str {
        "tabled"
    }

    fn choose_sensor_action(&mut self, belief: &Belief) -> Direction {
        let table = ActionValueTable::build(&self.model, belief);
        let candidates = Direction::ALL
            .iter()
            .map(|&a| (a, table.sensor_value(a)));
        let best = argmax_first(candidates).unwrap_or(ActionValue {
            action: Direction::ALL[0],
            value: f64::NEG_INFINITY,
        });
        log::debug!("(tabled) looking {} (value {})", best.action, best.value);
        self.table = Some(table);
        best.action
    }

    fn choose_manipulation_action(
        &mut self,
        belief: &Belief,
        reading: &SensorReading,
    ) -> Direction {
        let cached = self
            .table
            .as_ref()
            .and_then(|table| table.entry(reading.action, reading.observation).best);

        let best = match cached {
            Some(best) => best,
            None => {
                // No usable entry: the reading was impossible or no table was built
                log::debug!("(tabled) no table entry for {:?}, planning afresh", reading);
                best_manipulation(&self.model, belief)
            }
        };
        log::debug!("(tabled) moving {} (value {})", best.action, best.value);
        best.action
    }
}
