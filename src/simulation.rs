//! Episode driver joining one session to one world.

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::session::AgentSession;
use crate::types::{Direction, Position};
use crate::world::World;

/// What happened during one episode
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EpisodeReport {
    pub strategy: String,
    /// Manipulation steps taken
    pub steps: usize,
    pub reached_target: bool,
    /// True positions, starting position first
    pub positions: Vec<Position>,
    pub sensor_actions: Vec<Direction>,
    pub manipulation_actions: Vec<Direction>,
    /// Belief entropy in bits after each step
    pub entropy: Vec<f64>,
    /// Probability the belief put on the true position after each step
    pub true_position_probability: Vec<f64>,
    pub impossible_observations: usize,
}

impl EpisodeReport {
    fn new(strategy: &str, start: Position) -> Self {
        Self {
            strategy: strategy.to_string(),
            steps: 0,
            reached_target: false,
            positions: vec![start],
            sensor_actions: Vec::new(),
            manipulation_actions: Vec::new(),
            entropy: Vec::new(),
            true_position_probability: Vec::new(),
            impossible_observations: 0,
        }
    }

    pub fn final_position(&self) -> Option<Position> {
        self.positions.last().copied()
    }
}

/// Run turns until the world reports the target or `max_steps` moves were made.
///
/// An agent that starts on the target takes no steps.
pub fn run_episode<W: World + ?Sized>(
    session: &mut AgentSession,
    world: &mut W,
    max_steps: usize,
) -> Result<EpisodeReport> {
    let mut report = EpisodeReport::new(session.strategy_name(), world.position());
    report.reached_target = world.has_reached_target();
    if report.reached_target {
        session.confirm_start(true)?;
    }

    while !report.reached_target && report.steps < max_steps {
        let look = session.request_sensor_action()?;
        let observation = world.true_observation(look);
        session.supply_observation(observation)?;

        let action = session.request_manipulation_action()?;
        world.commit_movement(action);
        report.reached_target = world.has_reached_target();
        session.confirm_transition(report.reached_target)?;

        let position = world.position();
        report.steps += 1;
        report.positions.push(position);
        report.sensor_actions.push(look);
        report.manipulation_actions.push(action);
        report.entropy.push(session.belief().entropy());
        report
            .true_position_probability
            .push(session.belief().probability(position));
    }

    report.impossible_observations = session.impossible_observations();
    log::info!(
        "({}) episode ended after {} steps at {}; target reached: {}",
        report.strategy,
        report.steps,
        world.position(),
        report.reached_target
    );
    Ok(report)
}
