mod cell;
mod point;

pub use cell::{round25, CellKey, DECIMAL_PLACES, GRID_STEPS_PER_DEGREE};
pub use point::{JitteredPoint, Point};
