use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{ExplorerError, Result};

/// One of the four compass directions.
///
/// The same vocabulary is used for sensor actions (where to look) and
/// manipulation actions (where to move).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    North,
    South,
    East,
    West,
}

impl Direction {
    /// Candidate order used by every planner. Ties go to the earliest entry.
    pub const ALL: [Direction; 4] = [
        Direction::North,
        Direction::South,
        Direction::West,
        Direction::East,
    ];

    /// Numeric code of the direction
    pub fn index(self) -> usize {
        match self {
            Direction::North => 0,
            Direction::South => 1,
            Direction::East => 2,
            Direction::West => 3,
        }
    }

    /// Inverse of [`Direction::index`]. Fails fast on unknown codes.
    pub fn from_index(index: usize) -> Result<Self> {
        match index {
            0 => Ok(Direction::North),
            1 => Ok(Direction::South),
            2 => Ok(Direction::East),
            3 => Ok(Direction::West),
            other => Err(ExplorerError::model(format!(
                "unknown direction code {}",
                other
            ))),
        }
    }

    /// Unit offset `(dx, dy)`; north is towards y = 0
    pub fn offset(self) -> (isize, isize) {
        match self {
            Direction::North => (0, -1),
            Direction::South => (0, 1),
            Direction::East => (1, 0),
            Direction::West => (-1, 0),
        }
    }

    /// Sample a direction uniformly
    pub fn sample<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Direction::ALL[rng.gen_range(0..Direction::ALL.len())]
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Direction::North => "NORTH",
            Direction::South => "SOUTH",
            Direction::East => "EAST",
            Direction::West => "WEST",
        };
        f.write_str(name)
    }
}

/// Label of a map cell
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CellLabel {
    Empty,
    Blocked,
    Target,
}

/// What the sensor reports about the examined cell. It may be wrong.
pub type Observation = CellLabel;

impl CellLabel {
    /// Enumeration order for observations
    pub const ALL: [CellLabel; 3] = [CellLabel::Empty, CellLabel::Blocked, CellLabel::Target];

    pub fn index(self) -> usize {
        match self {
            CellLabel::Empty => 0,
            CellLabel::Blocked => 1,
            CellLabel::Target => 2,
        }
    }

    pub fn from_index(index: usize) -> Result<Self> {
        match index {
            0 => Ok(CellLabel::Empty),
            1 => Ok(CellLabel::Blocked),
            2 => Ok(CellLabel::Target),
            other => Err(ExplorerError::model(format!(
                "unknown cell label code {}",
                other
            ))),
        }
    }

    /// The label `k` steps further along the cycle EMPTY -> BLOCKED -> TARGET -> EMPTY
    pub fn shifted(self, k: usize) -> Self {
        CellLabel::ALL[(self.index() + k) % CellLabel::ALL.len()]
    }

    /// ASCII map character
    pub fn symbol(self) -> char {
        match self {
            CellLabel::Empty => '.',
            CellLabel::Blocked => '#',
            CellLabel::Target => 'T',
        }
    }

    pub fn from_symbol(symbol: char) -> Result<Self> {
        match symbol {
            '.' => Ok(CellLabel::Empty),
            '#' => Ok(CellLabel::Blocked),
            'T' => Ok(CellLabel::Target),
            other => Err(ExplorerError::configuration(format!(
                "unknown map character '{}'",
                other
            ))),
        }
    }
}

impl fmt::Display for CellLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            CellLabel::Empty => "EMPTY",
            CellLabel::Blocked => "BLOCKED",
            CellLabel::Target => "TARGET",
        };
        f.write_str(name)
    }
}

/// Grid coordinates. `x` grows east, `y` grows south.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    pub x: usize,
    pub y: usize,
}

impl Position {
    pub fn new(x: usize, y: usize) -> Self {
        Position { x, y }
    }

    /// Neighbour one step in `direction`, if it stays inside a `width` x `height` grid
    pub fn neighbor(self, direction: Direction, width: usize, height: usize) -> Option<Position> {
        let (dx, dy) = direction.offset();
        let x = self.x.checked_add_signed(dx)?;
        let y = self.y.checked_add_signed(dy)?;
        if x < width && y < height {
            Some(Position { x, y })
        } else {
            None
        }
    }

    pub fn manhattan_distance(self, other: Position) -> usize {
        self.x.abs_diff(other.x) + self.y.abs_diff(other.y)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// A sensor action together with the observation it produced
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SensorReading {
    pub action: Direction,
    pub observation: Observation,
}

impl SensorReading {
    pub fn new(action: Direction, observation: Observation) -> Self {
        SensorReading { action, observation }
    }
}
