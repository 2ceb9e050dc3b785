//! Shared movement and pose logic for the player and the patrollers.
use raylib::prelude::Vector2;

use crate::core::collision;
use crate::core::maze::MazeLayout;

/// Half-width buffer on movement checks so bodies don't clip wall corners.
pub const BOUNDING_RADIUS: f32 = 0.25;

// displacement below this (per axis) counts as standing still
const MOVE_EPSILON: f32 = 0.005;
const LIMB_SWING_MAX: f32 = 45.0;
const LIMB_SWING_SPEED: f32 = 100.0;

/// Motion state shared by every walking body: continuous position, a facing
/// angle smoothed toward the walk direction, and the limb swing that drives
/// the body animation.
pub struct Agent {
    /// World position (x, z).
    pub pos: Vector2,
    pub previous_pos: Vector2,
    /// Facing yaw in degrees.
    pub rotation: f32,
    /// Fraction of the remaining turn applied per tick (exponential smoothing).
    pub rotation_speed: f32,
    /// Leg swing angle in degrees; arms follow at 0.6x.
    pub limb_rotation: f32,
    previous_rotation: f32,
    previous_target_rotation: f32,
    previous_limb_rotation: f32,
    limb_target: f32,
}

impl Agent {
    pub fn new(pos: Vector2, rotation_speed: f32) -> Self {
        Self {
            pos,
            previous_pos: pos,
            rotation: 180.0,
            rotation_speed,
            limb_rotation: 0.0,
            previous_rotation: 180.0,
            previous_target_rotation: 180.0,
            previous_limb_rotation: 0.0,
            limb_target: LIMB_SWING_MAX,
        }
    }

    pub fn would_collide(
        &self,
        maze: &MazeLayout,
        distance: f32,
        direction: Vector2,
        bounding: f32,
    ) -> bool {
        collision::would_collide(maze, self.pos, distance, direction, bounding)
    }

    /// Step `distance` against `direction`. A blocked target refuses the
    /// whole step; there is no sliding and no partial movement.
    pub fn try_move(&mut self, maze: &MazeLayout, distance: f32, direction: Vector2) {
        if !self.would_collide(maze, distance, direction, BOUNDING_RADIUS) {
            self.pos.x -= direction.x * distance;
            self.pos.y -= direction.y * distance;
        }
    }

    /// Per-tick pose update, driven by the displacement since the previous
    /// tick: pick a target facing from the walk direction (standing still
    /// keeps the old target), swing the limbs in proportion to the distance
    /// covered, then ease the facing toward the target.
    pub fn update_pose(&mut self) {
        let dx = self.pos.x - self.previous_pos.x;
        let dz = self.pos.y - self.previous_pos.y;
        let target_rotation;
        if dx.abs() > MOVE_EPSILON || dz.abs() > MOVE_EPSILON {
            target_rotation = -(-dz).atan2(-dx).to_degrees();
            if self.limb_target == 0.0 {
                self.limb_target = LIMB_SWING_MAX;
            }
            if self.limb_rotation >= LIMB_SWING_MAX {
                self.limb_target = -LIMB_SWING_MAX;
            }
            if self.limb_rotation <= -LIMB_SWING_MAX {
                self.limb_target = LIMB_SWING_MAX;
            }
            let step = (dx * dx + dz * dz).sqrt();
            self.limb_rotation = self.previous_limb_rotation
                + LIMB_SWING_SPEED * self.limb_target / LIMB_SWING_MAX * step;
        } else {
            target_rotation = self.previous_target_rotation;
            self.limb_target = 0.0;
            self.limb_rotation = self.previous_limb_rotation;
        }

        // take the short way around; without this a 350° turn spins the body
        if target_rotation - self.previous_rotation > 180.0 {
            self.previous_rotation += 360.0;
        }
        if target_rotation - self.previous_rotation < -180.0 {
            self.previous_rotation -= 360.0;
        }
        self.rotation =
            self.previous_rotation + self.rotation_speed * (target_rotation - self.previous_rotation);

        self.previous_pos = self.pos;
        self.previous_rotation = self.rotation;
        self.previous_limb_rotation = self.limb_rotation;
        self.previous_target_rotation = target_rotation;
    }
}

/// Per-tick player step length; sprint doubles it. The sub-linear exponent
/// keeps slow frames from teleporting anyone.
pub fn move_distance_player(dt: f32, sprint: bool) -> f32 {
    if sprint { 2.0 * dt.powf(0.74) } else { dt.powf(0.74) }
}

/// Per-tick patroller step length.
pub fn move_distance_enemy(dt: f32) -> f32 {
    0.6 * dt.powf(0.74)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::maze::MazeLayout;

    fn open_maze() -> MazeLayout {
        MazeLayout::from_grid(vec![vec![true; 7]; 7])
    }

    #[test]
    fn move_steps_against_direction_by_exact_distance() {
        let maze = open_maze();
        let mut agent = Agent::new(Vector2::new(6.0, 6.0), 0.2);
        agent.try_move(&maze, 0.5, Vector2::new(0.0, 1.0));
        assert!((agent.pos.x - 6.0).abs() < 1e-6);
        assert!((agent.pos.y - 5.5).abs() < 1e-6);
    }

    #[test]
    fn move_into_wall_is_refused_entirely() {
        let mut grid = vec![vec![true; 7]; 7];
        grid[3][4] = false;
        let maze = MazeLayout::from_grid(grid);
        let mut agent = Agent::new(crate::core::collision::grid_position((3, 3)), 0.2);
        let before = agent.pos;
        // stepping against (-1, 0) heads toward +x, straight at the wall
        agent.try_move(&maze, 1.0, Vector2::new(-1.0, 0.0));
        assert_eq!(agent.pos, before);
    }

    #[test]
    fn move_outside_grid_is_refused() {
        let maze = open_maze();
        let mut agent = Agent::new(Vector2::new(0.0, 0.0), 0.2);
        let before = agent.pos;
        agent.try_move(&maze, 1.0, Vector2::new(1.0, 0.0));
        assert_eq!(agent.pos, before);
    }

    #[test]
    fn facing_eases_toward_walk_direction() {
        let maze = open_maze();
        let mut agent = Agent::new(Vector2::new(6.0, 6.0), 0.2);
        agent.try_move(&maze, 0.5, Vector2::new(0.0, 1.0));
        agent.update_pose();
        // one tick covers rotation_speed of the turn, not all of it
        assert!((agent.rotation - 180.0).abs() > 1e-3);
        let full_turn = -(0.5f32).atan2(0.0).to_degrees();
        assert!((agent.rotation - full_turn).abs() > 1e-3);
    }

    #[test]
    fn facing_converges_when_walking_one_way() {
        let maze = open_maze();
        let mut agent = Agent::new(Vector2::new(12.0, 6.0), 0.2);
        for _ in 0..200 {
            agent.try_move(&maze, 0.02, Vector2::new(1.0, 0.0));
            agent.update_pose();
        }
        // walking toward -x: target = -atan2(0, +eps) = 0 wrapped from 180
        let normalized = agent.rotation.rem_euclid(360.0);
        assert!(
            normalized < 5.0 || normalized > 355.0,
            "facing did not settle: {normalized}"
        );
    }

    #[test]
    fn standing_still_keeps_the_previous_target() {
        let mut agent = Agent::new(Vector2::new(6.0, 6.0), 0.2);
        for _ in 0..5 {
            agent.update_pose();
        }
        assert!((agent.rotation - 180.0).abs() < 1e-4);
        assert!((agent.limb_rotation - 0.0).abs() < 1e-4);
    }

    #[test]
    fn limbs_swing_while_moving() {
        let maze = open_maze();
        let mut agent = Agent::new(Vector2::new(6.0, 6.0), 0.2);
        agent.try_move(&maze, 0.3, Vector2::new(0.0, 1.0));
        agent.update_pose();
        assert!(agent.limb_rotation > 0.0);
    }

    #[test]
    fn speed_curves() {
        let dt = 1.0 / 45.0;
        assert!(move_distance_player(dt, true) > move_distance_player(dt, false));
        assert!((move_distance_player(dt, true) - 2.0 * move_distance_player(dt, false)).abs() < 1e-6);
        assert!(move_distance_enemy(dt) < move_distance_player(dt, false));
    }
}
