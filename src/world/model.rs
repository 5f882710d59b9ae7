use ndarray::Array2;

use crate::error::{ExplorerError, Result};
use crate::types::{CellLabel, Direction, Observation, Position};

/// Default probability that the sensor reports the true label
pub const DEFAULT_OBSERVATION_ACCURACY: f64 = 0.99;

/// Static map, target location and the probabilistic queries over them.
///
/// The model is immutable once built and is shared read-only by every
/// session running on the same map.
#[derive(Clone, Debug, PartialEq)]
pub struct GridModel {
    /// Labels indexed `[[x, y]]`
    cells: Array2<CellLabel>,
    target: Position,
    observation_accuracy: f64,
}

impl GridModel {
    /// Build a model from a label grid of shape `(width, height)`.
    ///
    /// Exactly one cell must be [`CellLabel::Target`].
    pub fn new(cells: Array2<CellLabel>, observation_accuracy: f64) -> Result<Self> {
        let (width, height) = cells.dim();
        if width == 0 || height == 0 {
            return Err(ExplorerError::configuration("map must have at least one cell"));
        }
        if !(0.0..=1.0).contains(&observation_accuracy) || observation_accuracy.is_nan() {
            return Err(ExplorerError::configuration(format!(
                "observation accuracy {} is not a probability",
                observation_accuracy
            )));
        }

        let mut targets = cells
            .indexed_iter()
            .filter(|(_, label)| **label == CellLabel::Target)
            .map(|((x, y), _)| Position::new(x, y));
        let target = targets
            .next()
            .ok_or_else(|| ExplorerError::configuration("map has no TARGET cell"))?;
        let extra = targets.count();
        if extra > 0 {
            return Err(ExplorerError::configuration(format!(
                "map has {} TARGET cells, expected exactly one",
                extra + 1
            )));
        }

        Ok(GridModel {
            cells,
            target,
            observation_accuracy,
        })
    }

    /// Parse an ASCII map. One string per row, north (y = 0) first.
    /// `.` is EMPTY, `#` is BLOCKED and `T` is TARGET.
    pub fn from_rows<S: AsRef<str>>(rows: &[S], observation_accuracy: f64) -> Result<Self> {
        let height = rows.len();
        let width = rows.first().map(|row| row.as_ref().chars().count()).unwrap_or(0);
        let mut cells = Array2::from_elem((width, height), CellLabel::Empty);

        for (y, row) in rows.iter().enumerate() {
            let row = row.as_ref();
            if row.chars().count() != width {
                return Err(ExplorerError::configuration(format!(
                    "row {} has {} cells, expected {}",
                    y,
                    row.chars().count(),
                    width
                )));
            }
            for (x, symbol) in row.chars().enumerate() {
                cells[[x, y]] = CellLabel::from_symbol(symbol)?;
            }
        }

        GridModel::new(cells, observation_accuracy)
    }

    pub fn width(&self) -> usize {
        self.cells.dim().0
    }

    pub fn height(&self) -> usize {
        self.cells.dim().1
    }

    /// Number of cells in the map
    pub fn num_cells(&self) -> usize {
        self.cells.len()
    }

    pub fn target(&self) -> Position {
        self.target
    }

    pub fn observation_accuracy(&self) -> f64 {
        self.observation_accuracy
    }

    pub fn contains(&self, position: Position) -> bool {
        position.x < self.width() && position.y < self.height()
    }

    /// Label of a cell on the map
    pub fn label(&self, position: Position) -> Result<CellLabel> {
        self.cells
            .get([position.x, position.y])
            .copied()
            .ok_or_else(|| ExplorerError::model(format!("{} is outside the map", position)))
    }

    /// Iterate every position in x-major order
    pub fn positions(&self) -> impl Iterator<Item = Position> + '_ {
        self.cells.indexed_iter().map(|((x, y), _)| Position::new(x, y))
    }

    /// Label the sensor would see with a perfect reading: the cell one step
    /// beyond `position` in `direction`, or BLOCKED past the edge of the map.
    pub fn examined_label(&self, position: Position, direction: Direction) -> CellLabel {
        position
            .neighbor(direction, self.width(), self.height())
            .map(|cell| self.cells[[cell.x, cell.y]])
            .unwrap_or(CellLabel::Blocked)
    }

    /// Where a move from `from` in `direction` ends. Moves into the edge of
    /// the map leave the agent in place.
    pub fn step(&self, from: Position, direction: Direction) -> Position {
        from.neighbor(direction, self.width(), self.height()).unwrap_or(from)
    }

    /// Deterministic movement kernel: 1 if `action` takes `from` to `to`, else 0
    pub fn transition_probability(&self, to: Position, from: Position, action: Direction) -> f64 {
        if self.step(from, action) == to {
            1.0
        } else {
            0.0
        }
    }

    /// Likelihood of the sensor reporting `observed` when the agent at
    /// `position` looks towards `sensor_action`.
    ///
    /// Sums to 1 over the three labels for any fixed action and position.
    pub fn observation_probability(
        &self,
        observed: Observation,
        sensor_action: Direction,
        position: Position,
    ) -> f64 {
        if observed == self.examined_label(position, sensor_action) {
            self.observation_accuracy
        } else {
            (1.0 - self.observation_accuracy) / 2.0
        }
    }

    /// Negative Manhattan distance to the target
    pub fn reward(&self, position: Position) -> f64 {
        -(position.manhattan_distance(self.target) as f64)
    }

    /// ASCII rendering in the format accepted by [`GridModel::from_rows`]
    pub fn to_rows(&self) -> Vec<String> {
        (0..self.height())
            .map(|y| {
                (0..self.width())
                    .map(|x| self.cells[[x, y]].symbol())
                    .collect()
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_map() -> GridModel {
        GridModel::from_rows(&["...", ".#.", "..T"], 0.9).unwrap()
    }

    #[test]
    fn test_from_rows_layout() {
        let model = sample_map();
        assert_eq!(model.width(), 3);
        assert_eq!(model.height(), 3);
        assert_eq!(model.target(), Position::new(2, 2));
        assert_eq!(model.label(Position::new(1, 1)).unwrap(), CellLabel::Blocked);
        assert_eq!(model.to_rows(), vec!["...", ".#.", "..T"]);
    }

    #[test]
    fn test_target_count_is_validated() {
        let none = GridModel::from_rows(&["...", "..."], 0.9);
        assert!(matches!(none, Err(ExplorerError::Configuration { .. })));

        let two = GridModel::from_rows(&["T..", "..T"], 0.9);
        assert!(matches!(two, Err(ExplorerError::Configuration { .. })));
    }

    #[test]
    fn test_malformed_maps() {
        assert!(GridModel::from_rows(&["..T", ".."], 0.9).is_err());
        assert!(GridModel::from_rows::<&str>(&[], 0.9).is_err());
        assert!(GridModel::from_rows(&["..T"], 1.5).is_err());
        assert!(GridModel::from_rows(&["..T"], f64::NAN).is_err());
    }

    #[test]
    fn test_transition_is_deterministic_with_clamping() {
        let model = sample_map();
        let corner = Position::new(0, 0);

        assert_eq!(model.transition_probability(corner, corner, Direction::North), 1.0);
        assert_eq!(model.transition_probability(corner, corner, Direction::West), 1.0);
        assert_eq!(
            model.transition_probability(Position::new(1, 0), corner, Direction::East),
            1.0
        );
        assert_eq!(model.transition_probability(corner, corner, Direction::East), 0.0);

        for from in model.positions() {
            for action in Direction::ALL {
                let total: f64 = model
                    .positions()
                    .map(|to| model.transition_probability(to, from, action))
                    .sum();
                assert_eq!(total, 1.0);
            }
        }
    }

    #[test]
    fn test_blocked_cells_do_not_obstruct_movement() {
        let model = sample_map();
        assert_eq!(
            model.step(Position::new(0, 1), Direction::East),
            Position::new(1, 1)
        );
    }

    #[test]
    fn test_off_map_reads_as_blocked() {
        let model = sample_map();
        let corner = Position::new(0, 0);
        assert_eq!(model.examined_label(corner, Direction::North), CellLabel::Blocked);
        assert_eq!(model.observation_probability(CellLabel::Blocked, Direction::North, corner), 0.9);
        assert!(
            (model.observation_probability(CellLabel::Empty, Direction::North, corner) - 0.05).abs()
                < 1e-12
        );
    }

    #[test]
    fn test_observation_probabilities_sum_to_one() {
        let model = sample_map();
        for position in model.positions() {
            for action in Direction::ALL {
                let total: f64 = CellLabel::ALL
                    .iter()
                    .map(|&obs| model.observation_probability(obs, action, position))
                    .sum();
                assert!((total - 1.0).abs() < 1e-12);
            }
        }
    }

    #[test]
    fn test_reward_is_negative_manhattan_distance() {
        let model = sample_map();
        assert_eq!(model.reward(Position::new(2, 2)), 0.0);
        assert_eq!(model.reward(Position::new(0, 0)), -4.0);
        assert_eq!(model.reward(Position::new(2, 0)), -2.0);
    }

    #[test]
    fn test_label_outside_map() {
        let model = sample_map();
        assert!(matches!(
            model.label(Position::new(3, 0)),
            Err(ExplorerError::Model { .. })
        ));
    }
}
