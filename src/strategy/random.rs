use rand::rngs::StdRng;
use rand::SeedableRng;

use super::PlanningStrategy;
use crate::belief::Belief;
use crate::types::{Direction, SensorReading};

/// Default seed for the random baseline
pub const DEFAULT_RANDOM_SEED: u64 = 0xface;

/// Baseline that looks and moves uniformly at random.
///
/// The session still keeps its belief up to date so the baseline can be
/// compared with the planners on the same statistics.
pub struct RandomStrategy {
    rng: StdRng,
}

impl RandomStrategy {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Default for RandomStrategy {
    fn default() -> Self {
        Self::new(DEFAULT_RANDOM_SEED)
    }
}

impl PlanningStrategy for RandomStrategy {
    fn name(&self) -> &'static str {
        "random"
    }

    fn choose_sensor_action(&mut self, _belief: &Belief) -> Direction {
        let action = Direction::sample(&mut self.rng);
        log::debug!("(random) looking {}", action);
        action
    }

    fn choose_manipulation_action(
        &mut self,
        _belief: &Belief,
        _reading: &SensorReading,
    ) -> Direction {
        let action = Direction::sample(&mut self.rng);
        log::debug!("(random) moving {}", action);
        action
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::CellLabel;

    #[test]
    fn test_same_seed_same_choices() {
        let belief = Belief::uniform(3, 3);
        let reading = SensorReading::new(Direction::North, CellLabel::Empty);
        let mut a = RandomStrategy::new(9);
        let mut b = RandomStrategy::new(9);
        for _ in 0..20 {
            assert_eq!(a.choose_sensor_action(&belief), b.choose_sensor_action(&belief));
            assert_eq!(
                a.choose_manipulation_action(&belief, &reading),
                b.choose_manipulation_action(&belief, &reading)
            );
        }
    }
}
