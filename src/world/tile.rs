//! Tiles and positions
//!
//! The grid cells of a level map and the coordinates that index them.

use serde::{Deserialize, Serialize};

use crate::entities::actor::ActorId;

/// A coordinate on a level map.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Straight-line distance, the measure used by monster sight and
    /// area effects.
    pub fn euclidean_distance(&self, other: &Position) -> f64 {
        let dx = (self.x - other.x) as f64;
        let dy = (self.y - other.y) as f64;
        (dx * dx + dy * dy).sqrt()
    }

    pub fn offset(&self, dx: i32, dy: i32) -> Position {
        Position::new(self.x + dx, self.y + dy)
    }
}

/// A single map cell. Tiles own the list of actors standing on them;
/// actor movement keeps that list and the actor's own location in sync.
#[derive(Debug, Clone, Default)]
pub struct Tile {
    /// Blocked tiles cannot be entered and are excluded from area
    /// effects.
    pub blocked: bool,
    /// Whether the player currently sees this tile.
    pub visible: bool,
    /// Actors standing on this tile, in arrival order.
    pub actors: Vec<ActorId>,
}

impl Tile {
    pub fn floor() -> Self {
        Self::default()
    }

    pub fn wall() -> Self {
        Self {
            blocked: true,
            ..Self::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        self.actors.is_empty()
    }

    pub(crate) fn add_actor(&mut self, id: ActorId) {
        if !self.actors.contains(&id) {
            self.actors.push(id);
        }
    }

    pub(crate) fn remove_actor(&mut self, id: ActorId) {
        self.actors.retain(|&a| a != id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn distance_is_euclidean() {
        let a = Position::new(0, 0);
        let b = Position::new(3, 4);
        assert!((a.euclidean_distance(&b) - 5.0).abs() < f64::EPSILON);
    }

    #[test]
    fn tile_occupancy_is_a_set() {
        let mut tile = Tile::floor();
        let id = ActorId(0);
        tile.add_actor(id);
        tile.add_actor(id);
        assert_eq!(tile.actors.len(), 1);
        tile.remove_actor(id);
        assert!(tile.is_empty());
    }
}
