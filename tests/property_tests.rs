#[cfg(test)]
mod property_tests {
    use belief_explorer::belief::{Belief, BeliefFilter};
    use belief_explorer::strategy::{
        ActionValueTable, ExhaustivePlanner, PlanningStrategy, TabledPlanner,
    };
    use belief_explorer::types::{CellLabel, Direction, Position, SensorReading};
    use belief_explorer::world::GridModel;
    use ndarray::Array2;
    use proptest::prelude::*;
    use std::sync::Arc;

    const MAP: [&str; 5] = [".....", ".#...", "..#..", "...#.", "....T"];

    fn model(accuracy: f64) -> Arc<GridModel> {
        Arc::new(GridModel::from_rows(&MAP, accuracy).unwrap())
    }

    // Strategy for generating random 5x5 beliefs, some cells exactly zero
    fn belief_strategy() -> impl Strategy<Value = Belief> {
        prop::collection::vec(prop_oneof![1 => Just(0.0f64), 3 => 0.0f64..1.0], 25)
            .prop_filter("needs some mass", |weights| weights.iter().sum::<f64>() > 1e-3)
            .prop_map(|weights| {
                let total: f64 = weights.iter().sum();
                let grid = Array2::from_shape_vec((5, 5), weights)
                    .unwrap()
                    .mapv(|w| w / total);
                Belief::from_grid(grid).unwrap()
            })
    }

    fn direction_strategy() -> impl Strategy<Value = Direction> {
        (0usize..4).prop_map(|i| Direction::from_index(i).unwrap())
    }

    fn label_strategy() -> impl Strategy<Value = CellLabel> {
        (0usize..3).prop_map(|i| CellLabel::from_index(i).unwrap())
    }

    proptest! {
        #[test]
        fn test_observation_probabilities_sum_to_one(
            accuracy in 0.0f64..=1.0,
            x in 0usize..5,
            y in 0usize..5,
            sensor in direction_strategy(),
        ) {
            let model = model(accuracy);
            let total: f64 = CellLabel::ALL
                .iter()
                .map(|label| model.observation_probability(*label, sensor, Position::new(x, y)))
                .sum();
            prop_assert!((total - 1.0).abs() < 1e-12);
        }

        #[test]
        fn test_filter_keeps_beliefs_normalized(
            belief in belief_strategy(),
            accuracy in 0.5f64..=1.0,
            sensor in direction_strategy(),
            observation in label_strategy(),
            action in direction_strategy(),
        ) {
            let model = model(accuracy);
            let filter = BeliefFilter::new(&model);

            let predicted = filter.predict(&belief, action);
            prop_assert!((predicted.total_mass() - 1.0).abs() < 1e-9);
            prop_assert!(predicted.iter().all(|(_, p)| p >= 0.0));

            if let Some(posterior) = filter.update(&belief, sensor, observation).into_belief() {
                prop_assert!((posterior.total_mass() - 1.0).abs() < 1e-9);
                prop_assert!(posterior.iter().all(|(_, p)| p >= 0.0));
            } else {
                prop_assert_eq!(filter.observation_marginal(&belief, sensor, observation), 0.0);
            }
        }

        #[test]
        fn test_observation_marginals_sum_to_one(
            belief in belief_strategy(),
            accuracy in 0.0f64..=1.0,
            sensor in direction_strategy(),
        ) {
            let model = model(accuracy);
            let filter = BeliefFilter::new(&model);
            let total: f64 = CellLabel::ALL
                .iter()
                .map(|label| filter.observation_marginal(&belief, sensor, *label))
                .sum();
            prop_assert!((total - 1.0).abs() < 1e-9);
        }

        #[test]
        fn test_entropy_bounds(belief in belief_strategy()) {
            let entropy = belief.entropy();
            prop_assert!(entropy >= 0.0);
            prop_assert!(entropy <= 25f64.log2() + 1e-9);
        }

        #[test]
        fn test_kl_divergence_is_non_negative(
            belief in belief_strategy(),
            sensor in direction_strategy(),
            observation in label_strategy(),
        ) {
            prop_assert!(belief.kl_divergence(&belief).abs() < 1e-12);

            let model = model(0.9);
            let filter = BeliefFilter::new(&model);
            if let Some(posterior) = filter.update(&belief, sensor, observation).into_belief() {
                prop_assert!(posterior.kl_divergence(&belief) >= -1e-12);
            }
        }
    }

    // Per-cell expectimax written out directly from the model, sharing no
    // code with the filter or the planners
    fn reference_sensor_value(model: &GridModel, belief: &Belief, sensor: Direction) -> f64 {
        let mut total = 0.0;
        for observation in CellLabel::ALL {
            let joint: Vec<(Position, f64)> = model
                .positions()
                .map(|x| {
                    let likelihood = model.observation_probability(observation, sensor, x);
                    (x, likelihood * belief.probability(x))
                })
                .collect();
            let marginal: f64 = joint.iter().map(|(_, w)| w).sum();
            if marginal == 0.0 {
                continue;
            }
            let best = Direction::ALL
                .iter()
                .map(|&action| {
                    joint
                        .iter()
                        .map(|(x, w)| w / marginal * model.reward(model.step(*x, action)))
                        .sum::<f64>()
                })
                .fold(f64::NEG_INFINITY, f64::max);
            total += marginal * best;
        }
        total
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(128))]

        #[test]
        fn test_exhaustive_matches_per_cell_reference(
            belief in belief_strategy(),
            accuracy in 0.0f64..=1.0,
        ) {
            let model = model(accuracy);
            let mut exhaustive = ExhaustivePlanner::new(model.clone());

            let reference: Vec<f64> = Direction::ALL
                .iter()
                .map(|&sensor| reference_sensor_value(&model, &belief, sensor))
                .collect();
            for (sensor, expected) in Direction::ALL.iter().zip(&reference) {
                let value = exhaustive.sensor_value(&belief, *sensor);
                prop_assert!((value - expected).abs() < 1e-9, "{}: {} vs {}", sensor, value, expected);
            }

            let best = reference.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
            let look = exhaustive.choose_sensor_action(&belief);
            let slot = Direction::ALL.iter().position(|d| *d == look).unwrap();
            prop_assert!(reference[slot] >= best - 1e-9);
        }

        #[test]
        fn test_tabled_matches_exhaustive(
            belief in belief_strategy(),
            accuracy in 0.5f64..=1.0,
            observation in label_strategy(),
        ) {
            let model = model(accuracy);
            let filter = BeliefFilter::new(&model);
            let mut exhaustive = ExhaustivePlanner::new(model.clone());
            let mut tabled = TabledPlanner::new(model.clone());

            let table = ActionValueTable::build(&model, &belief);
            for sensor in Direction::ALL {
                prop_assert_eq!(
                    table.sensor_value(sensor).to_bits(),
                    exhaustive.sensor_value(&belief, sensor).to_bits()
                );
            }

            let look = exhaustive.choose_sensor_action(&belief);
            prop_assert_eq!(tabled.choose_sensor_action(&belief), look);

            let posterior = filter
                .update(&belief, look, observation)
                .into_belief()
                .unwrap_or_else(|| belief.clone());
            let reading = SensorReading::new(look, observation);
            prop_assert_eq!(
                tabled.choose_manipulation_action(&posterior, &reading),
                exhaustive.choose_manipulation_action(&posterior, &reading)
            );
        }
    }
}
