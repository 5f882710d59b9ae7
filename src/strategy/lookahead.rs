//! One-step lookahead shared by the planners.

use crate::belief::Belief;
use crate::types::Direction;
use crate::world::GridModel;

/// An action with the score it was chosen by
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ActionValue {
    pub action: Direction,
    pub value: f64,
}

/// First candidate with the strictly greatest score.
///
/// Candidates scoring `NaN` or `-inf` never win; `None` if nothing beats `-inf`.
pub fn argmax_first<I>(candidates: I) -> Option<ActionValue>
where
    I: IntoIterator<Item = (Direction, f64)>,
{
    let mut best: Option<ActionValue> = None;
    let mut best_value = f64::NEG_INFINITY;
    for (action, value) in candidates {
        log::trace!("candidate {} scores {}", action, value);
        if value > best_value {
            best_value = value;
            best = Some(ActionValue { action, value });
        }
    }
    best
}

/// Expected reward of the state reached by taking `action` under `belief`:
///
/// `sum over new of [ sum over old of belief(old) * T(new | old, action) ] * reward(new)`
pub fn expected_reward(model: &GridModel, belief: &Belief, action: Direction) -> f64 {
    model
        .positions()
        .map(|to| {
            let reach: f64 = belief
                .iter()
                .map(|(from, p)| p * model.transition_probability(to, from, action))
                .sum();
            reach * model.reward(to)
        })
        .sum()
}

/// Manipulation action maximising [`expected_reward`]; ties go to the
/// earliest direction in [`Direction::ALL`].
pub fn best_manipulation(model: &GridModel, belief: &Belief) -> ActionValue {
    let candidates = Direction::ALL
        .iter()
        .map(|&action| (action, expected_reward(model, belief, action)));

    // Rewards are finite, so some candidate always beats -inf
    argmax_first(candidates).unwrap_or(ActionValue {
        action: Direction::ALL[0],
        value: f64::NEG_INFINITY,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Position;

    #[test]
    fn test_argmax_first_breaks_ties_by_order() {
        let best = argmax_first(vec![
            (Direction::North, 1.0),
            (Direction::South, 2.0),
            (Direction::West, 2.0),
            (Direction::East, -1.0),
        ])
        .unwrap();
        assert_eq!(best.action, Direction::South);
        assert_eq!(best.value, 2.0);
    }

    #[test]
    fn test_argmax_first_ignores_nan_and_neg_infinity() {
        assert!(argmax_first(vec![(Direction::North, f64::NEG_INFINITY)]).is_none());
        let best = argmax_first(vec![
            (Direction::North, f64::NAN),
            (Direction::South, -3.0),
        ])
        .unwrap();
        assert_eq!(best.action, Direction::South);
    }

    #[test]
    fn test_expected_reward_for_known_position() {
        let model = GridModel::from_rows(&["...", "...", "..T"], 0.9).unwrap();
        let belief = Belief::point_mass(3, 3, Position::new(0, 0)).unwrap();

        assert_eq!(expected_reward(&model, &belief, Direction::East), -3.0);
        assert_eq!(expected_reward(&model, &belief, Direction::South), -3.0);
        assert_eq!(expected_reward(&model, &belief, Direction::North), -4.0);

        let best = best_manipulation(&model, &belief);
        assert_eq!(best.action, Direction::South);
        assert_eq!(best.value, -3.0);
    }

    #[test]
    fn test_single_cell_grid_terminates() {
        let model = GridModel::from_rows(&["T"], 0.9).unwrap();
        let belief = Belief::uniform(1, 1);
        let best = best_manipulation(&model, &belief);
        assert_eq!(best.action, Direction::North);
        assert_eq!(best.value, 0.0);
    }
}
