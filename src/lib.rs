//! # Belief Explorer - Active Sensing on a Labelled Grid
//!
//! An agent lives on a rectangular grid but does not know where it is. Each
//! turn it picks a direction to look, receives a noisy reading of the
//! neighbouring cell's label, picks a direction to move, and keeps a discrete
//! Bayesian belief over its own position. The aim is to reach the single
//! TARGET cell.
//!
//! ## Key Features
//!
//! - **Grid Model**: ASCII or builder-defined maps, a deterministic clamped
//!   movement kernel and a symmetric noisy sensor
//! - **Belief Filter**: exact Bayes update and prediction over every cell
//! - **Strategies**: random baseline, one-step expectimax (recomputed or
//!   tabled), entropy minimization and Bayesian surprise maximization
//! - **Sessions**: a per-agent turn state machine that rejects calls made out of order
//! - **Simulation**: a seedable world and an episode driver
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use belief_explorer::builders::AgentSessionBuilder;
//! use belief_explorer::simulation::run_episode;
//! use belief_explorer::strategy::StrategyKind;
//! use belief_explorer::types::Position;
//! use belief_explorer::world::{GridModel, SimulatedWorld};
//!
//! let model = Arc::new(
//!     GridModel::from_rows(&[".....", ".....", "..#..", ".....", "....T"], 0.99).unwrap(),
//! );
//! let mut session = AgentSessionBuilder::new()
//!     .model(model.clone())
//!     .strategy(StrategyKind::Tabled)
//!     .build()
//!     .unwrap();
//! let mut world = SimulatedWorld::new(model, Position::new(0, 0), 0xfade_face).unwrap();
//!
//! let report = run_episode(&mut session, &mut world, 100).unwrap();
//! println!("reached target: {} in {} steps", report.reached_target, report.steps);
//! ```
//!
//! ## Module Organization
//!
//! - [`types`] - Directions, cell labels, positions and sensor readings
//! - [`error`] - Error types and result handling
//! - [`world`] - The grid model and the world contract
//! - [`belief`] - Position beliefs and the Bayes filter
//! - [`strategy`] - Sensing and movement policies
//! - [`session`] - Per-agent turn state machine
//! - [`builders`] - Builder patterns for models and sessions
//! - [`config`] - JSON run configuration
//! - [`simulation`] - Episode driver

pub mod belief;
pub mod builders;
pub mod config;
pub mod error;
pub mod session;
pub mod simulation;
pub mod strategy;
pub mod types;
pub mod world;
