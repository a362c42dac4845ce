#![doc = "geojitter public API"]
pub mod cli;
pub mod commands;
mod io;
mod jitter;
mod types;

#[doc(inline)]
pub use types::{round25, CellKey, JitteredPoint, Point, DECIMAL_PLACES, GRID_STEPS_PER_DEGREE};

#[doc(inline)]
pub use jitter::{adjust_for_latitude, disk_offset, jitter_point, ClaimedSet, JitterConfig, JitterEngine, JitterStats};

#[doc(inline)]
pub use io::{open_input, read_input, read_points, write_csv, write_geojson, PointReader, Sink};
