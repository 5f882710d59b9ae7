use std::sync::Arc;

use crate::belief::Belief;
use crate::error::{ExplorerError, Result};
use crate::session::AgentSession;
use crate::strategy::StrategyKind;
use crate::world::GridModel;

/// Builder for AgentSession
pub struct AgentSessionBuilder {
    model: Option<Arc<GridModel>>,
    strategy: StrategyKind,
    initial_belief: Option<Belief>,
}

impl AgentSessionBuilder {
    /// Create a new session builder; the strategy defaults to the tabled planner
    pub fn new() -> Self {
        AgentSessionBuilder {
            model: None,
            strategy: StrategyKind::Tabled,
            initial_belief: None,
        }
    }

    /// Set the shared grid model
    pub fn model(mut self, model: Arc<GridModel>) -> Self {
        self.model = Some(model);
        self
    }

    /// Set the planning strategy
    pub fn strategy(mut self, strategy: StrategyKind) -> Self {
        self.strategy = strategy;
        self
    }

    /// Start from this belief instead of a uniform one
    pub fn initial_belief(mut self, belief: Belief) -> Self {
        self.initial_belief = Some(belief);
        self
    }

    /// Build the session
    pub fn build(self) -> Result<AgentSession> {
        let model = self
            .model
            .ok_or_else(|| ExplorerError::configuration("model not specified"))?;
        let strategy = self.strategy.build(model.clone());

        match self.initial_belief {
            Some(belief) => AgentSession::with_belief(model, strategy, belief),
            None => Ok(AgentSession::new(model, strategy)),
        }
    }
}

impl Default for AgentSessionBuilder {
    fn default() -> Self {
        Self::new()
    }
}
