//! World module
//!
//! Tiles, maps and levels - the spatial substrate the simulation
//! plays out on.

pub mod level;
pub mod map;
pub mod tile;

pub use level::{Level, LevelId};
pub use map::{Map, TORCH_RADIUS};
pub use tile::{Position, Tile};
