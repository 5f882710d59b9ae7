use ndarray::Array2;

use crate::error::{ExplorerError, Result};
use crate::types::{CellLabel, Position};
use crate::world::{GridModel, DEFAULT_OBSERVATION_ACCURACY};

/// Builder for GridModel
pub struct GridModelBuilder {
    width: Option<usize>,
    height: Option<usize>,
    blocked: Vec<Position>,
    target: Option<Position>,
    observation_accuracy: f64,
}

impl GridModelBuilder {
    /// Create a new grid model builder
    pub fn new() -> Self {
        GridModelBuilder {
            width: None,
            height: None,
            blocked: Vec::new(),
            target: None,
            observation_accuracy: DEFAULT_OBSERVATION_ACCURACY,
        }
    }

    /// Set the map dimensions
    pub fn dimensions(mut self, width: usize, height: usize) -> Self {
        self.width = Some(width);
        self.height = Some(height);
        self
    }

    /// Mark a cell as blocked
    pub fn blocked(mut self, x: usize, y: usize) -> Self {
        self.blocked.push(Position::new(x, y));
        self
    }

    /// Set the target cell
    pub fn target(mut self, x: usize, y: usize) -> Self {
        self.target = Some(Position::new(x, y));
        self
    }

    /// Probability that the sensor reports the true label
    pub fn observation_accuracy(mut self, accuracy: f64) -> Self {
        self.observation_accuracy = accuracy;
        self
    }

    /// Build the grid model
    pub fn build(self) -> Result<GridModel> {
        let (width, height) = match (self.width, self.height) {
            (Some(w), Some(h)) => (w, h),
            _ => {
                return Err(ExplorerError::configuration("dimensions not specified"));
            }
        };
        let target = self
            .target
            .ok_or_else(|| ExplorerError::configuration("target not specified"))?;

        let mut cells = Array2::from_elem((width, height), CellLabel::Empty);
        for position in &self.blocked {
            let cell = cells.get_mut([position.x, position.y]).ok_or_else(|| {
                ExplorerError::configuration(format!(
                    "blocked cell {} is outside the {}x{} map",
                    position, width, height
                ))
            })?;
            *cell = CellLabel::Blocked;
        }

        let cell = cells.get_mut([target.x, target.y]).ok_or_else(|| {
            ExplorerError::configuration(format!(
                "target {} is outside the {}x{} map",
                target, width, height
            ))
        })?;
        *cell = CellLabel::Target;

        GridModel::new(cells, self.observation_accuracy)
    }
}

impl Default for GridModelBuilder {
    fn default() -> Self {
        Self::new()
    }
}
