//! Collision-free jittering of points onto the coordinate grid.

mod claimed;
mod engine;
mod sample;

pub use claimed::ClaimedSet;
pub use engine::{jitter_point, JitterConfig, JitterEngine, JitterStats};
pub use sample::{adjust_for_latitude, disk_offset};
