//! Map data structure
//!
//! The 2D tile grid a level plays out on. The simulation core only
//! depends on the queries below; generators and field-of-view live in
//! the presentation layers and feed richer maps through the same
//! surface.

use rand::Rng;

use super::tile::{Position, Tile};

/// How far the player sees. Stands in for the external field-of-view
/// computation.
pub const TORCH_RADIUS: i32 = 10;

/// A level's tile grid.
#[derive(Debug, Clone)]
pub struct Map {
    pub width: i32,
    pub height: i32,
    tiles: Vec<Tile>,
}

impl Map {
    /// Create an open map of floor tiles.
    pub fn new(width: i32, height: i32) -> Self {
        let tiles = vec![Tile::floor(); (width * height) as usize];
        Self {
            width,
            height,
            tiles,
        }
    }

    #[inline]
    fn xy_to_idx(&self, x: i32, y: i32) -> usize {
        (y * self.width + x) as usize
    }

    #[inline]
    pub fn in_bounds(&self, x: i32, y: i32) -> bool {
        x >= 0 && x < self.width && y >= 0 && y < self.height
    }

    pub fn tile(&self, pos: Position) -> Option<&Tile> {
        if self.in_bounds(pos.x, pos.y) {
            Some(&self.tiles[self.xy_to_idx(pos.x, pos.y)])
        } else {
            None
        }
    }

    pub fn tile_mut(&mut self, pos: Position) -> Option<&mut Tile> {
        if self.in_bounds(pos.x, pos.y) {
            let idx = self.xy_to_idx(pos.x, pos.y);
            Some(&mut self.tiles[idx])
        } else {
            None
        }
    }

    pub fn is_blocked(&self, pos: Position) -> bool {
        self.tile(pos).map_or(true, |t| t.blocked)
    }

    pub fn set_blocked(&mut self, pos: Position, blocked: bool) {
        if let Some(tile) = self.tile_mut(pos) {
            tile.blocked = blocked;
        }
    }

    /// Clamp a coordinate pair into the map bounds.
    pub fn clamp(&self, pos: Position) -> Position {
        Position::new(
            pos.x.clamp(0, self.width - 1),
            pos.y.clamp(0, self.height - 1),
        )
    }

    /// Tiles within `radius` of the center, in row-major order.
    ///
    /// `full_circle` selects the whole disc; otherwise only the outer
    /// ring. `exclude_blocked` drops blocked tiles from the result.
    pub fn circle_tiles(
        &self,
        center_x: i32,
        center_y: i32,
        radius: i32,
        full_circle: bool,
        exclude_blocked: bool,
    ) -> Vec<Position> {
        let center = Position::new(center_x, center_y);
        let mut result = Vec::new();
        for y in center_y - radius..=center_y + radius {
            for x in center_x - radius..=center_x + radius {
                if !self.in_bounds(x, y) {
                    continue;
                }
                let pos = Position::new(x, y);
                let distance = pos.euclidean_distance(&center);
                let inside = if full_circle {
                    distance <= radius as f64
                } else {
                    distance <= radius as f64 && distance > (radius - 1) as f64
                };
                if !inside {
                    continue;
                }
                if exclude_blocked && self.is_blocked(pos) {
                    continue;
                }
                result.push(pos);
            }
        }
        result
    }

    /// A random unblocked tile with nothing standing on it.
    pub fn random_empty_tile(&self, rng: &mut impl Rng) -> Option<Position> {
        let empties: Vec<Position> = (0..self.height)
            .flat_map(|y| (0..self.width).map(move |x| Position::new(x, y)))
            .filter(|&pos| {
                self.tile(pos)
                    .map(|t| !t.blocked && t.is_empty())
                    .unwrap_or(false)
            })
            .collect();
        if empties.is_empty() {
            None
        } else {
            Some(empties[rng.gen_range(0..empties.len())])
        }
    }

    /// Refresh tile visibility around the player position. A simple
    /// torch-radius disc; a real line-of-sight computation can overwrite
    /// the same flags from outside the core.
    pub fn update_field_of_view(&mut self, x: i32, y: i32) {
        let center = Position::new(x, y);
        for ty in 0..self.height {
            for tx in 0..self.width {
                let pos = Position::new(tx, ty);
                let idx = self.xy_to_idx(tx, ty);
                self.tiles[idx].visible =
                    pos.euclidean_distance(&center) <= TORCH_RADIUS as f64;
            }
        }
    }

    pub fn is_visible(&self, pos: Position) -> bool {
        self.tile(pos).map_or(false, |t| t.visible)
    }
}
