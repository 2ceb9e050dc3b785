//! World/grid mapping and walkability queries.
//!
//! The maze lives on a grid with a 2.0-unit cell pitch and cell centers at
//! even world coordinates; anything outside the grid counts as solid, so the
//! boundary needs no wall cells of its own.
use raylib::prelude::Vector2;

use crate::core::maze::MazeLayout;

/// Cell pitch in world units.
pub const CELL: f32 = 2.0;

/// World position -> (row, col). Negative world coordinates land on negative
/// indices, which every query treats as solid.
#[inline]
pub fn grid_index(pos: Vector2) -> (isize, isize) {
    let row = ((pos.y + 1.0) / CELL).floor() as isize;
    let col = ((pos.x + 1.0) / CELL).floor() as isize;
    (row, col)
}

/// Center of a grid cell in world coordinates.
#[inline]
pub fn grid_position(index: (usize, usize)) -> Vector2 {
    Vector2::new(index.1 as f32 * CELL, index.0 as f32 * CELL)
}

/// Candidate position for a step of `distance`: offset by
/// `distance + |bounding|` AGAINST the direction vector. The whole movement
/// model steps against its direction input (camera-relative controls depend
/// on this sign), so the collision probe has to as well.
#[inline]
pub fn step_target(pos: Vector2, distance: f32, direction: Vector2, bounding: f32) -> Vector2 {
    let reach = distance + bounding.abs();
    Vector2::new(pos.x - direction.x * reach, pos.y - direction.y * reach)
}

/// Would a step of `distance` against `direction` land somewhere solid?
pub fn would_collide(
    maze: &MazeLayout,
    pos: Vector2,
    distance: f32,
    direction: Vector2,
    bounding: f32,
) -> bool {
    !maze.is_walkable_world(step_target(pos, distance, direction, bounding))
}
