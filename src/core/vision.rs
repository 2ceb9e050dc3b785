//! Cone-of-sight raymarching against the maze grid.
use raylib::prelude::Vector2;

use crate::core::collision;
use crate::core::maze::MazeLayout;
use crate::core::player::Player;

// samples per world unit along a trace
const STEP_DIVISION: f32 = 10.0;
// thin probe radius so a trace can hug walls the body could not
const TRACE_BOUNDING: f32 = 0.1;

/// March one vision slice from `origin` along the heading `angle_deg`.
///
/// Returns the distance that sizes the rendered cone, and whether the player
/// stood on any sample point. Spotting is a side effect of the walk and is
/// independent of the return value: it can fire mid-trace even when a wall
/// blocks the ray further out. A blocked trace reports `(step + 3) / 10`
/// (padding the cone slightly into the wall, capped at `max_distance`); an
/// unobstructed one reports `max_distance`.
pub fn trace_slice(
    maze: &MazeLayout,
    origin: Vector2,
    angle_deg: f32,
    max_distance: f32,
    player: Option<&Player>,
) -> (f32, bool) {
    let rad = angle_deg.to_radians();
    let direction = Vector2::new(rad.cos(), -rad.sin());
    let mut spotted = false;
    let steps = (max_distance * STEP_DIVISION) as i32;
    for step in 0..steps {
        let d = step as f32 / STEP_DIVISION;
        if let Some(p) = player {
            if p.is_here(collision::step_target(origin, d, direction, 0.0)) {
                spotted = true;
            }
        }
        if collision::would_collide(maze, origin, d, direction, TRACE_BOUNDING) {
            let padded = (step + 3) as f32 / STEP_DIVISION;
            return (padded.min(max_distance), spotted);
        }
    }
    (max_distance, spotted)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::maze::MazeLayout;

    // one open row: a corridor of `cols` cells along +x
    fn corridor(cols: usize) -> MazeLayout {
        MazeLayout::from_grid(vec![vec![true; cols]])
    }

    #[test]
    fn unobstructed_trace_reports_max_distance() {
        let maze = corridor(5);
        // heading 180° walks the sample point toward +x
        let (d, spotted) = trace_slice(&maze, Vector2::new(0.0, 0.0), 180.0, 4.0, None);
        assert_eq!(d, 4.0);
        assert!(!spotted);
    }

    #[test]
    fn blocked_trace_reports_padded_step_distance() {
        let mut grid = vec![vec![true; 5]];
        grid[0][1] = false;
        let maze = MazeLayout::from_grid(grid);
        // origin near the cell edge: the probe (step/10 + 0.1) crosses into
        // the wall cell at step 2
        let (d, _) = trace_slice(&maze, Vector2::new(0.7, 0.0), 180.0, 4.0, None);
        assert_eq!(d, (2.0 + 3.0) / 10.0);
    }

    #[test]
    fn player_on_a_sample_point_is_spotted_despite_wall_beyond() {
        let mut grid = vec![vec![true; 5]];
        grid[0][2] = false; // wall past the player on the same ray
        let maze = MazeLayout::from_grid(grid);
        let player = Player::new(Vector2::new(2.0, 0.0));
        let (d, spotted) = trace_slice(&maze, Vector2::new(0.0, 0.0), 180.0, 4.0, Some(&player));
        assert!(spotted);
        assert!(d < 4.0);
    }

    #[test]
    fn player_out_of_cone_path_is_not_spotted() {
        let maze = corridor(5);
        let player = Player::new(Vector2::new(2.0, -1.5));
        let (_, spotted) = trace_slice(&maze, Vector2::new(0.0, 0.0), 180.0, 4.0, Some(&player));
        assert!(!spotted);
    }

    #[test]
    fn no_player_wired_never_spots() {
        let maze = corridor(5);
        let (_, spotted) = trace_slice(&maze, Vector2::new(0.0, 0.0), 180.0, 4.0, None);
        assert!(!spotted);
    }
}
