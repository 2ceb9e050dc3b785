//! Patrolling enemies: random-walk wandering plus a swept vision cone.
use log::warn;
use rand::Rng;
use raylib::prelude::Vector2;

use crate::core::agent::{Agent, BOUNDING_RADIUS, move_distance_enemy};
use crate::core::maze::MazeLayout;
use crate::core::player::Player;
use crate::core::vision;

pub const VISION_SLICES: usize = 10;
pub const ENEMY_FOV: f32 = 60.0;
pub const ENEMY_SIGHT: f32 = 4.0;

// probe length used when checking whether the current heading walks into a wall
const PATROL_PROBE: f32 = 0.3;
// resample budget before an enclosed patroller gives up and stands still
const UNSTICK_ATTEMPTS: usize = 32;

/// One angular sub-sector of the cone, traced independently each tick.
pub struct VisionSlice {
    /// Offset from the agent's facing, degrees.
    pub angle_offset: f32,
    /// Distance reported by the last trace; only sizes the rendered cone.
    pub distance: f32,
}

pub struct Enemy {
    pub agent: Agent,
    /// Current wander heading, one of {-1,0,1}².
    pub walk_direction: (i32, i32),
    pub slices: Vec<VisionSlice>,
    /// Full cone width in degrees, split evenly over the slices.
    pub fov: f32,
    pub sight: f32,
    /// Cone render height, jittered so overlapping cones don't z-fight.
    pub slice_height: f32,
    warned_unwired: bool,
}

impl Enemy {
    pub fn new(spawn: Vector2, rotation_speed: f32, rng: &mut impl Rng) -> Self {
        let fov = ENEMY_FOV;
        let per_slice = fov / VISION_SLICES as f32;
        let mut slices = Vec::with_capacity(VISION_SLICES);
        for i in 0..VISION_SLICES {
            slices.push(VisionSlice {
                angle_offset: fov / 2.0 - per_slice / 2.0 - per_slice * i as f32,
                distance: ENEMY_SIGHT,
            });
        }
        Self {
            agent: Agent::new(spawn, rotation_speed),
            walk_direction: (rng.gen_range(-1..=1), rng.gen_range(-1..=1)),
            slices,
            fov,
            sight: ENEMY_SIGHT,
            slice_height: 0.5 + rng.gen_range(-0.01..0.01),
            warned_unwired: false,
        }
    }

    /// One simulation tick: wander, step, sweep the cone.  Returns whether
    /// any slice sampled the player this tick.
    pub fn update(
        &mut self,
        maze: &MazeLayout,
        player: Option<&Player>,
        dt: f32,
        rng: &mut impl Rng,
    ) -> bool {
        if rng.gen_range(0.0..1.0f32) > 0.99 {
            self.walk_direction = wander_direction(rng);
        }

        // the current heading walks into a wall: keep drawing until one
        // doesn't, bounded so a fully enclosed patroller ends up stuck
        // (0,0) instead of spinning forever
        let mut attempts = 0;
        while self
            .agent
            .would_collide(maze, PATROL_PROBE, direction_vector(self.walk_direction), BOUNDING_RADIUS)
        {
            if attempts >= UNSTICK_ATTEMPTS {
                self.walk_direction = (0, 0);
                break;
            }
            self.walk_direction = wander_direction(rng);
            attempts += 1;
        }

        self.agent
            .try_move(maze, move_distance_enemy(dt), direction_vector(self.walk_direction));

        let spotted = self.trace_vision_cone(maze, player);
        self.agent.update_pose();
        spotted
    }

    /// Sweep every slice, recording distances for the renderer and watching
    /// for the player along the way.
    fn trace_vision_cone(&mut self, maze: &MazeLayout, player: Option<&Player>) -> bool {
        if player.is_none() && !self.warned_unwired {
            warn!("enemy has no player wired up; it will never spot anyone");
            self.warned_unwired = true;
        }
        let mut spotted = false;
        for slice in &mut self.slices {
            let angle = self.agent.rotation + slice.angle_offset;
            let (distance, hit) =
                vision::trace_slice(maze, self.agent.pos, angle, self.sight, player);
            slice.distance = distance;
            spotted |= hit;
        }
        spotted
    }
}

#[inline]
fn direction_vector(d: (i32, i32)) -> Vector2 {
    Vector2::new(d.0 as f32, d.1 as f32)
}

/// Uniform draw from {-1,0,1}²; a zero vector is usually nudged onto the
/// z axis so patrollers don't freeze in place.
fn wander_direction(rng: &mut impl Rng) -> (i32, i32) {
    let mut direction = (rng.gen_range(-1..=1), rng.gen_range(-1..=1));
    if direction == (0, 0) && rng.gen_range(0.0..1.0f32) < 0.9 {
        direction.1 = if rng.gen_range(0..2) == 0 { -1 } else { 1 };
    }
    direction
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::collision::grid_position;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn slice_offsets_span_the_fov_symmetrically() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let enemy = Enemy::new(Vector2::new(0.0, 0.0), 0.1, &mut rng);
        assert_eq!(enemy.fov, 60.0);
        assert_eq!(enemy.slices.len(), VISION_SLICES);
        assert_eq!(enemy.slices[0].angle_offset, 27.0);
        assert_eq!(enemy.slices[9].angle_offset, -27.0);
        let sum: f32 = enemy.slices.iter().map(|s| s.angle_offset).sum();
        assert!(sum.abs() < 1e-4);
    }

    #[test]
    fn wander_direction_stays_in_range() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        for _ in 0..500 {
            let (dx, dz) = wander_direction(&mut rng);
            assert!((-1..=1).contains(&dx));
            assert!((-1..=1).contains(&dz));
        }
    }

    #[test]
    fn enclosed_enemy_goes_stuck_instead_of_hanging() {
        // degenerate: the patroller's own cell is solid, so every heading
        // (including standing still) probes into a wall
        let maze = MazeLayout::from_grid(vec![vec![false; 5]; 5]);
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let mut enemy = Enemy::new(grid_position((2, 2)), 0.1, &mut rng);
        let before = enemy.agent.pos;
        for _ in 0..50 {
            enemy.update(&maze, None, 1.0 / 45.0, &mut rng);
        }
        assert_eq!(enemy.walk_direction, (0, 0));
        assert_eq!(enemy.agent.pos, before);
    }

    #[test]
    fn patroller_spots_a_player_dead_ahead() {
        // fresh patrollers face 180°, which sweeps samples toward +x; one
        // cell down the corridor the player sits inside the center slices
        let maze = MazeLayout::from_grid(vec![vec![true; 5]]);
        let mut rng = ChaCha8Rng::seed_from_u64(11);
        let mut enemy = Enemy::new(Vector2::new(0.0, 0.0), 0.5, &mut rng);
        let player = Player::new(Vector2::new(1.0, 0.0));
        let spotted = enemy.update(&maze, Some(&player), 1.0 / 45.0, &mut rng);
        assert!(spotted, "center slices missed a player one unit ahead");
    }

    #[test]
    fn slice_distances_clamp_to_sight() {
        let maze = MazeLayout::from_grid(vec![vec![true; 9]; 9]);
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        let mut enemy = Enemy::new(grid_position((4, 4)), 0.1, &mut rng);
        enemy.update(&maze, None, 1.0 / 45.0, &mut rng);
        for slice in &enemy.slices {
            assert!(slice.distance <= ENEMY_SIGHT);
            assert!(slice.distance > 0.0);
        }
    }
}
