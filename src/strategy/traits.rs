use crate::belief::Belief;
use crate::types::{Direction, SensorReading};

/// Trait for sensing and acting policies over a position belief.
///
/// A strategy never owns the belief. The session hands it the current
/// belief at each decision point and commits the belief updates itself.
pub trait PlanningStrategy: Send {
    /// Short display name
    fn name(&self) -> &'static str;

    /// Pick where to look, given the belief before the reading
    fn choose_sensor_action(&mut self, belief: &Belief) -> Direction;

    /// Pick where to move, given the belief after `reading` was incorporated
    fn choose_manipulation_action(&mut self, belief: &Belief, reading: &SensorReading)
        -> Direction;
}
