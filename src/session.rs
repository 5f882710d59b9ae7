//! Per-agent turn state machine.
//!
//! A turn is driven by exactly four external calls, in order:
//! request a sensor action, supply the observation, request a manipulation
//! action, confirm the move. Calls made out of order are rejected.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

use crate::belief::{Belief, BeliefFilter, UpdateOutcome};
use crate::error::{ExplorerError, Result};
use crate::strategy::PlanningStrategy;
use crate::types::{Direction, Observation, SensorReading};
use crate::world::GridModel;

/// Where a session is within its turn
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TurnPhase {
    AwaitingSensorAction,
    AwaitingObservation,
    AwaitingManipulationAction,
    AwaitingTransition,
    /// The agent reached the target
    Finished,
}

impl fmt::Display for TurnPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

/// How a supplied observation was handled
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ObservationOutcome {
    /// The belief now includes the reading
    Incorporated,
    /// No cell could have produced the reading; the belief was left unchanged
    Impossible,
}

/// One agent's belief, strategy and turn bookkeeping
pub struct AgentSession {
    model: Arc<GridModel>,
    strategy: Box<dyn PlanningStrategy>,
    belief: Belief,
    phase: TurnPhase,
    last_sensor_action: Option<Direction>,
    last_observation: Option<Observation>,
    last_manipulation_action: Option<Direction>,
    turns: usize,
    impossible_observations: usize,
}

impl AgentSession {
    /// Start with a uniform belief over the whole map
    pub fn new(model: Arc<GridModel>, strategy: Box<dyn PlanningStrategy>) -> Self {
        let belief = Belief::uniform(model.width(), model.height());
        Self {
            model,
            strategy,
            belief,
            phase: TurnPhase::AwaitingSensorAction,
            last_sensor_action: None,
            last_observation: None,
            last_manipulation_action: None,
            turns: 0,
            impossible_observations: 0,
        }
    }

    /// Start from a given belief, which must cover the map exactly and be a
    /// probability mass function
    pub fn with_belief(
        model: Arc<GridModel>,
        strategy: Box<dyn PlanningStrategy>,
        belief: Belief,
    ) -> Result<Self> {
        BeliefFilter::new(&model).check_shape(&belief)?;
        belief.validate()?;
        let mut session = Self::new(model, strategy);
        session.belief = belief;
        Ok(session)
    }

    fn expect_phase(&self, expected: TurnPhase) -> Result<()> {
        if self.phase != expected {
            return Err(ExplorerError::out_of_turn(
                expected.to_string(),
                self.phase.to_string(),
            ));
        }
        Ok(())
    }

    /// Close the session before any turn if the agent already stands on the
    /// target. Only valid between turns.
    pub fn confirm_start(&mut self, reached_target: bool) -> Result<TurnPhase> {
        self.expect_phase(TurnPhase::AwaitingSensorAction)?;
        if reached_target {
            self.phase = TurnPhase::Finished;
        }
        Ok(self.phase)
    }

    /// Ask the strategy where to look
    pub fn request_sensor_action(&mut self) -> Result<Direction> {
        self.expect_phase(TurnPhase::AwaitingSensorAction)?;
        let action = self.strategy.choose_sensor_action(&self.belief);
        self.last_sensor_action = Some(action);
        self.last_observation = None;
        self.phase = TurnPhase::AwaitingObservation;
        Ok(action)
    }

    /// Feed the reading for the sensor action just chosen
    pub fn supply_observation(&mut self, observation: Observation) -> Result<ObservationOutcome> {
        self.expect_phase(TurnPhase::AwaitingObservation)?;
        let sensor_action = self
            .last_sensor_action
            .ok_or_else(|| ExplorerError::model("observation supplied without a sensor action"))?;

        let filter = BeliefFilter::new(&self.model);
        let outcome = match filter.update(&self.belief, sensor_action, observation) {
            UpdateOutcome::Updated(posterior) => {
                self.belief = posterior;
                ObservationOutcome::Incorporated
            }
            UpdateOutcome::Impossible => {
                log::warn!(
                    "({}) reading {} looking {} is impossible under the current belief; keeping it",
                    self.strategy.name(),
                    observation,
                    sensor_action
                );
                self.impossible_observations += 1;
                ObservationOutcome::Impossible
            }
        };

        self.last_observation = Some(observation);
        self.phase = TurnPhase::AwaitingManipulationAction;
        Ok(outcome)
    }

    /// Ask the strategy where to move and commit the belief through the
    /// transition model
    pub fn request_manipulation_action(&mut self) -> Result<Direction> {
        self.expect_phase(TurnPhase::AwaitingManipulationAction)?;
        let reading = match (self.last_sensor_action, self.last_observation) {
            (Some(action), Some(observation)) => SensorReading::new(action, observation),
            _ => {
                return Err(ExplorerError::model(
                    "manipulation requested before a reading was supplied",
                ))
            }
        };

        let action = self.strategy.choose_manipulation_action(&self.belief, &reading);
        self.belief = BeliefFilter::new(&self.model).predict(&self.belief, action);
        self.last_manipulation_action = Some(action);
        self.turns += 1;
        self.phase = TurnPhase::AwaitingTransition;
        Ok(action)
    }

    /// Close the turn once the world has applied the move
    pub fn confirm_transition(&mut self, reached_target: bool) -> Result<TurnPhase> {
        self.expect_phase(TurnPhase::AwaitingTransition)?;
        self.phase = if reached_target {
            TurnPhase::Finished
        } else {
            TurnPhase::AwaitingSensorAction
        };
        Ok(self.phase)
    }

    /// Snapshot of the current belief
    pub fn current_belief(&self) -> Belief {
        self.belief.clone()
    }

    /// Borrowed read-only view of the current belief
    pub fn belief(&self) -> &Belief {
        &self.belief
    }

    pub fn model(&self) -> &GridModel {
        &self.model
    }

    pub fn phase(&self) -> TurnPhase {
        self.phase
    }

    pub fn is_finished(&self) -> bool {
        self.phase == TurnPhase::Finished
    }

    pub fn last_sensor_action(&self) -> Option<Direction> {
        self.last_sensor_action
    }

    pub fn last_observation(&self) -> Option<Observation> {
        self.last_observation
    }

    pub fn last_manipulation_action(&self) -> Option<Direction> {
        self.last_manipulation_action
    }

    /// Completed manipulation steps
    pub fn turns(&self) -> usize {
        self.turns
    }

    /// Readings that were impossible under the belief at the time
    pub fn impossible_observations(&self) -> usize {
        self.impossible_observations
    }

    pub fn strategy_name(&self) -> &'static str {
        self.strategy.name()
    }
}
