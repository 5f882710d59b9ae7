/***
# Strategy Race

* Runs every planning strategy on the same map and world seeds
* Reports how often each one reaches the target and how many steps it needs
* Pass a JSON config path to race on its map, start and accuracy instead

    RUST_LOG=debug cargo run --example strategy_race -- explorer.json
***/

use belief_explorer::{
    belief::Belief,
    config::ExplorerConfig,
    error::Result,
    simulation::run_episode,
    strategy::StrategyKind,
    types::Position,
    world::{GridModel, SimulatedWorld},
};
use std::sync::Arc;

const EPISODES: u64 = 20;

fn default_config() -> ExplorerConfig {
    ExplorerConfig {
        map: [".......", ".#...#.", "...#...", ".#.....", "......T"]
            .iter()
            .map(|row| row.to_string())
            .collect(),
        observation_accuracy: 0.9,
        start: Position::new(0, 0),
        strategy: StrategyKind::Tabled,
        max_steps: 100,
        world_seed: 0xfade_face,
    }
}

/// Seeds near `u64::MAX` wrap around instead of overflowing
fn episode_seed(base: u64, episode: u64) -> u64 {
    base.wrapping_add(episode)
}

fn render(model: &GridModel, belief: &Belief) -> String {
    let mut out = String::new();
    for y in 0..model.height() {
        for x in 0..model.width() {
            let p = belief.probability(Position::new(x, y));
            out.push_str(&format!("{:5.2}", p));
        }
        out.push('\n');
    }
    out
}

fn main() -> Result<()> {
    env_logger::init();

    let config = match std::env::args().nth(1) {
        Some(path) => ExplorerConfig::from_json_file(path)?,
        None => default_config(),
    };
    let model = Arc::new(config.grid_model()?);

    println!("=== Strategy Race ===\n");
    for row in model.to_rows() {
        println!("  {}", row);
    }
    println!(
        "\nstart {}, target {}, accuracy {}\n",
        config.start,
        model.target(),
        model.observation_accuracy()
    );

    for kind in StrategyKind::all() {
        let mut reached = 0;
        let mut total_steps = 0;
        let mut impossible = 0;
        let mut last_belief = None;

        for episode in 0..EPISODES {
            let mut session = ExplorerConfig {
                strategy: kind.clone(),
                ..config.clone()
            }
            .build_session(model.clone())?;
            let seed = episode_seed(config.world_seed, episode);
            let mut world = SimulatedWorld::new(model.clone(), config.start, seed)?;
            let report = run_episode(&mut session, &mut world, config.max_steps)?;

            if report.reached_target {
                reached += 1;
                total_steps += report.steps;
            }
            impossible += report.impossible_observations;
            last_belief = Some(session.current_belief());
        }

        let mean_steps = if reached > 0 {
            format!("{:.1}", total_steps as f64 / reached as f64)
        } else {
            "-".to_string()
        };
        println!(
            "{:<12} reached {:>2}/{}  mean steps {:>6}  impossible readings {}",
            kind.name(),
            reached,
            EPISODES,
            mean_steps,
            impossible
        );
        if let Some(belief) = last_belief {
            print!("{}", render(&model, &belief));
            println!();
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_episode_seed_wraps() {
        assert_eq!(episode_seed(u64::MAX, 0), u64::MAX);
        assert_eq!(episode_seed(u64::MAX, 1), 0);
        assert_eq!(episode_seed(u64::MAX - 1, EPISODES - 1), EPISODES - 3);
        assert_eq!(episode_seed(0xfade_face, 3), 0xfade_face + 3);
    }
}
