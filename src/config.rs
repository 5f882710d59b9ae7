//! JSON configuration for a single explorer run.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::sync::Arc;

use crate::builders::AgentSessionBuilder;
use crate::error::{ExplorerError, Result};
use crate::session::AgentSession;
use crate::strategy::StrategyKind;
use crate::types::Position;
use crate::world::simulated::DEFAULT_WORLD_SEED;
use crate::world::{GridModel, SimulatedWorld, DEFAULT_OBSERVATION_ACCURACY};

fn default_observation_accuracy() -> f64 {
    DEFAULT_OBSERVATION_ACCURACY
}

fn default_strategy() -> StrategyKind {
    StrategyKind::Tabled
}

fn default_max_steps() -> usize {
    100
}

fn default_world_seed() -> u64 {
    DEFAULT_WORLD_SEED
}

/// Map, start, strategy and budget for one run
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ExplorerConfig {
    /// ASCII rows, north first (see [`GridModel::from_rows`])
    pub map: Vec<String>,
    #[serde(default = "default_observation_accuracy")]
    pub observation_accuracy: f64,
    pub start: Position,
    #[serde(default = "default_strategy")]
    pub strategy: StrategyKind,
    #[serde(default = "default_max_steps")]
    pub max_steps: usize,
    #[serde(default = "default_world_seed")]
    pub world_seed: u64,
}

impl ExplorerConfig {
    /// Parse and validate a JSON document
    pub fn from_json_str(text: &str) -> Result<Self> {
        let config: ExplorerConfig = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a JSON file
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let text = fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }

    pub fn to_json_string(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        fs::write(path, self.to_json_string()?)?;
        Ok(())
    }

    pub fn grid_model(&self) -> Result<GridModel> {
        GridModel::from_rows(self.map.as_slice(), self.observation_accuracy)
    }

    pub fn validate(&self) -> Result<()> {
        let model = self.grid_model()?;
        if !model.contains(self.start) {
            return Err(ExplorerError::configuration(format!(
                "start {} is outside the {}x{} map",
                self.start,
                model.width(),
                model.height()
            )));
        }
        if self.max_steps == 0 {
            return Err(ExplorerError::configuration("max_steps must be greater than 0"));
        }
        Ok(())
    }

    /// Simulated world starting at `start`
    pub fn build_world(&self, model: Arc<GridModel>) -> Result<SimulatedWorld> {
        SimulatedWorld::new(model, self.start, self.world_seed)
    }

    /// Session running the configured strategy
    pub fn build_session(&self, model: Arc<GridModel>) -> Result<AgentSession> {
        AgentSessionBuilder::new()
            .model(model)
            .strategy(self.strategy.clone())
            .build()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::world::World;

    const SAMPLE: &str = r#"{
        "map": [".....", ".....", "..#..", ".....", "....T"],
        "start": { "x": 0, "y": 0 },
        "strategy": { "kind": "entropy" }
    }"#;

    #[test]
    fn test_defaults_are_filled_in() {
        let config = ExplorerConfig::from_json_str(SAMPLE).unwrap();
        assert_eq!(config.observation_accuracy, DEFAULT_OBSERVATION_ACCURACY);
        assert_eq!(config.strategy, StrategyKind::Entropy);
        assert_eq!(config.max_steps, 100);
        assert_eq!(config.world_seed, DEFAULT_WORLD_SEED);
        assert_eq!(config.grid_model().unwrap().target(), Position::new(4, 4));
    }

    #[test]
    fn test_invalid_configs() {
        let no_target = r#"{ "map": ["..", ".."], "start": { "x": 0, "y": 0 } }"#;
        assert!(matches!(
            ExplorerConfig::from_json_str(no_target),
            Err(ExplorerError::Configuration { .. })
        ));

        let bad_start = r#"{ "map": ["..", ".T"], "start": { "x": 3, "y": 0 } }"#;
        assert!(ExplorerConfig::from_json_str(bad_start).is_err());

        let zero_budget = r#"{ "map": ["..", ".T"], "start": { "x": 0, "y": 0 }, "max_steps": 0 }"#;
        assert!(ExplorerConfig::from_json_str(zero_budget).is_err());

        assert!(matches!(
            ExplorerConfig::from_json_str("not json"),
            Err(ExplorerError::Serialization(_))
        ));
    }

    #[test]
    fn test_builds_world_and_session() {
        let config = ExplorerConfig::from_json_str(SAMPLE).unwrap();
        let model = Arc::new(config.grid_model().unwrap());
        let world = config.build_world(model.clone()).unwrap();
        assert_eq!(world.position(), Position::new(0, 0));
        let session = config.build_session(model).unwrap();
        assert_eq!(session.strategy_name(), "entropy");
    }
}
