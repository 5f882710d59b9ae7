//! # Planning Strategies Module
//!
//! Policies that decide where an agent looks and where it moves, given its
//! belief about its own position.
//!
//! ## Available Strategies
//!
//! - **RandomStrategy**: looks and moves uniformly at random (baseline)
//! - **ExhaustivePlanner**: one-step expectimax over readings and moves,
//!   recomputed on every call; the reference implementation
//! - **TabledPlanner**: the same policy with the per-reading values cached in
//!   an `ActionValueTable` once per turn
//! - **EntropyMinimizer**: looks where the expected entropy drop is largest
//! - **SurpriseMaximizer**: looks where the expected Bayesian surprise is largest
//! - **HeadingStrategy**: looks the way it last moved (baseline)
//!
//! Every strategy except the random baseline moves with the same one-step
//! lookahead over the reward function.
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use belief_explorer::belief::Belief;
//! use belief_explorer::strategy::StrategyKind;
//! use belief_explorer::world::GridModel;
//!
//! let model = Arc::new(GridModel::from_rows(&["....", ".#..", "...T"], 0.95).unwrap());
//! let mut planner = StrategyKind::Tabled.build(model);
//! let look = planner.choose_sensor_action(&Belief::uniform(4, 3));
//! ```

pub mod entropy;
pub mod exhaustive;
pub mod heading;
pub mod lookahead;
pub mod random;
pub mod surprise;
pub mod tabled;
pub mod traits;

pub use entropy::EntropyMinimizer;
pub use exhaustive::ExhaustivePlanner;
pub use heading::HeadingStrategy;
pub use lookahead::ActionValue;
pub use random::{RandomStrategy, DEFAULT_RANDOM_SEED};
pub use surprise::SurpriseMaximizer;
pub use tabled::{ActionValueTable, TableEntry, TabledPlanner};
pub use traits::PlanningStrategy;

use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

use crate::world::GridModel;

fn default_random_seed() -> u64 {
    DEFAULT_RANDOM_SEED
}

/// Closed set of strategies, selectable from configuration
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum StrategyKind {
    Random {
        #[serde(default = "default_random_seed")]
        seed: u64,
    },
    Exhaustive,
    Tabled,
    Entropy,
    Surprise,
    Heading,
}

impl StrategyKind {
    /// One of each, with the random baseline on its default seed
    pub fn all() -> Vec<StrategyKind> {
        vec![
            StrategyKind::Random {
                seed: DEFAULT_RANDOM_SEED,
            },
            StrategyKind::Exhaustive,
            StrategyKind::Tabled,
            StrategyKind::Entropy,
            StrategyKind::Surprise,
            StrategyKind::Heading,
        ]
    }

    pub fn name(&self) -> &'static str {
        match self {
            StrategyKind::Random { .. } => "random",
            StrategyKind::Exhaustive => "exhaustive",
            StrategyKind::Tabled => "tabled",
            StrategyKind::Entropy => "entropy",
            StrategyKind::Surprise => "surprise",
            StrategyKind::Heading => "heading",
        }
    }

    /// Instantiate the strategy against a shared model
    pub fn build(&self, model: Arc<GridModel>) -> Box<dyn PlanningStrategy> {
        match self {
            StrategyKind::Random { seed } => Box::new(RandomStrategy::new(*seed)),
            StrategyKind::Exhaustive => Box::new(ExhaustivePlanner::new(model)),
            StrategyKind::Tabled => Box::new(TabledPlanner::new(model)),
            StrategyKind::Entropy => Box::new(EntropyMinimizer::new(model)),
            StrategyKind::Surprise => Box::new(SurpriseMaximizer::new(model)),
            StrategyKind::Heading => Box::new(HeadingStrategy::new(model)),
        }
    }
}

impl fmt::Display for StrategyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
