//! 3D pass: maze geometry, agent bodies, vision cones, follow camera, HUD.
use raylib::ffi;
use raylib::prelude::*;

use crate::core::collision;
use crate::core::enemy::Enemy;
use crate::core::game::Game;
use crate::core::player::Player;
use crate::render::scene::{self, Renderable, SceneTree, Shape};
use crate::render::textures::{TextureHandle, TextureManager};

const WALL_COLOR: Color = Color::new(38, 38, 38, 255);
const WALL_EDGE_COLOR: Color = Color::new(64, 64, 64, 255);
const GROUND_COLOR: Color = Color::new(128, 128, 128, 255);
const PLAYER_COLOR: Color = Color::new(40, 40, 230, 255);
// spotted players go translucent-dark, like a blown cover
const PLAYER_SEEN_COLOR: Color = Color::new(0, 0, 0, 128);
const ENEMY_COLOR: Color = Color::new(230, 30, 30, 255);
const CONE_COLOR: Color = Color::new(255, 0, 0, 102);
const ENTRANCE_COLOR: Color = Color::new(255, 0, 0, 255);
const EXIT_COLOR: Color = Color::new(0, 255, 0, 255);

// base half-width of a full-length cone slice
const CONE_WIDTH: f32 = 0.21;

impl Renderable for Player {
    fn render_transform(&self) -> (Vector3, Vector3, Vector3) {
        (
            Vector3::new(self.agent.pos.x, -0.5, self.agent.pos.y),
            Vector3::new(0.0, self.agent.rotation, 0.0),
            Vector3::one(),
        )
    }

    fn is_active(&self) -> bool {
        true
    }
}

impl Renderable for Enemy {
    fn render_transform(&self) -> (Vector3, Vector3, Vector3) {
        (
            Vector3::new(self.agent.pos.x, -0.5, self.agent.pos.y),
            Vector3::new(0.0, self.agent.rotation, 0.0),
            Vector3::one(),
        )
    }

    fn is_active(&self) -> bool {
        true
    }
}

/// Overhead camera glued to the player, tilted just off vertical.
pub fn follow_camera(player_pos: Vector2) -> Camera3D {
    Camera3D::perspective(
        Vector3::new(player_pos.x, 12.0, player_pos.y + 1.05),
        Vector3::new(player_pos.x, 0.0, player_pos.y),
        Vector3::new(0.0, 0.0, -1.0),
        60.0,
    )
}

/// Everything inside the 3D mode: maze, key, bodies, cones.
pub fn render_world(
    d: &mut impl RaylibDraw3D,
    game: &Game,
    texman: &TextureManager,
    key_tex: TextureHandle,
    camera: Camera3D,
) {
    draw_maze(d, game);
    draw_key(d, game, texman, key_tex, camera);
    draw_bodies(d, game);
    draw_vision_cones(d, game);
}

fn draw_maze(d: &mut impl RaylibDraw3D, game: &Game) {
    let maze = &game.maze;
    for (r, row) in maze.grid.iter().enumerate() {
        for (c, &open) in row.iter().enumerate() {
            let x = c as f32 * collision::CELL;
            let z = r as f32 * collision::CELL;
            if open {
                d.draw_plane(Vector3::new(x, -1.0, z), Vector2::new(2.0, 2.0), GROUND_COLOR);
            } else {
                d.draw_cube(Vector3::new(x, 0.0, z), 2.0, 2.0, 2.0, WALL_COLOR);
                d.draw_cube_wires(Vector3::new(x, 0.0, z), 2.0, 2.0, 2.0, WALL_EDGE_COLOR);
            }
        }
    }

    // boundary walls; the maze's implicit solid edge, made visible
    let rows = maze.rows as f32;
    let cols = maze.cols as f32;
    let mid_z = rows - 1.0;
    let side_len = 2.0 * (rows + 1.0);
    d.draw_cube(Vector3::new(-1.5, 0.5, mid_z), 1.0, 2.8, side_len, WALL_COLOR);
    d.draw_cube(Vector3::new(2.0 * cols - 0.5, 0.5, mid_z), 1.0, 2.8, side_len, WALL_COLOR);
    for c in 0..maze.cols {
        let x = c as f32 * collision::CELL;
        d.draw_cube(Vector3::new(x, 0.5, -1.5), 2.0, 2.8, 1.0, WALL_COLOR);
        d.draw_cube(Vector3::new(x, 0.5, 2.0 * rows - 0.5), 2.0, 2.8, 1.0, WALL_COLOR);
    }

    // doors on the start row: red in, green out
    let door_z = 2.0 * maze.start.0 as f32;
    d.draw_cube(Vector3::new(-1.0, -0.2, door_z), 0.2, 1.6, 1.6, ENTRANCE_COLOR);
    d.draw_cube(Vector3::new(2.0 * cols - 1.0, -0.2, door_z), 0.2, 1.6, 1.6, EXIT_COLOR);
    d.draw_cube(Vector3::new(2.0 * cols - 2.0, -1.0, door_z), 1.6, 0.2, 1.6, EXIT_COLOR);
}

fn draw_key(
    d: &mut impl RaylibDraw3D,
    game: &Game,
    texman: &TextureManager,
    key_tex: TextureHandle,
    camera: Camera3D,
) {
    if game.player.got_key {
        return;
    }
    let cell = collision::grid_position(game.maze.key_cell);
    let pos = Vector3::new(cell.x, 0.0, cell.y);
    match texman.get(key_tex) {
        Some(tex) => d.draw_billboard(camera, tex, pos, 0.8, Color::WHITE),
        None => d.draw_sphere(pos, 0.25, Color::GOLD),
    }
}

/// Compose every body into one scene tree, then draw the flattened cubes
/// under their world matrices via the rlgl stack.
fn draw_bodies(d: &mut impl RaylibDraw3D, game: &Game) {
    let mut tree = SceneTree::new();
    let player_color = if game.player.seen { PLAYER_SEEN_COLOR } else { PLAYER_COLOR };
    add_posed_body(&mut tree, &game.player, game.player.agent.limb_rotation, player_color);
    for enemy in &game.enemies {
        add_posed_body(&mut tree, enemy, enemy.agent.limb_rotation, ENEMY_COLOR);
    }

    for (id, world) in tree.flatten() {
        if let Shape::Cube(color) = tree.get(id).shape {
            unsafe {
                ffi::rlPushMatrix();
                ffi::rlMultMatrixf(world.as_array().as_ptr());
            }
            d.draw_cube(Vector3::zero(), 2.0, 2.0, 2.0, color);
            unsafe {
                ffi::rlPopMatrix();
            }
        }
    }
}

fn add_posed_body(tree: &mut SceneTree, entity: &impl Renderable, limb: f32, color: Color) {
    if !entity.is_active() {
        return;
    }
    let (pos, rot, _) = entity.render_transform();
    let rig = scene::add_person(tree, color);
    scene::pose_person(tree, &rig, Vector2::new(pos.x, pos.z), rot.y, limb);
}

/// Translucent fan of triangles per enemy, each slice stretched to the
/// distance its last trace reported.
fn draw_vision_cones(d: &mut impl RaylibDraw3D, game: &Game) {
    for enemy in &game.enemies {
        let origin = enemy.agent.pos;
        // the body root sits at y -0.5; slices float at their jittered height
        let y = enemy.slice_height - 0.5;
        for slice in &enemy.slices {
            let angle = (enemy.agent.rotation + slice.angle_offset).to_radians();
            let dir = Vector2::new(angle.cos(), -angle.sin());
            // slices stretch the same way traces sample: against the heading
            let base_x = origin.x - dir.x * slice.distance;
            let base_z = origin.y - dir.y * slice.distance;
            let half_w = slice.distance / enemy.sight * CONE_WIDTH;
            let perp = Vector2::new(-dir.y, dir.x);
            let tip = Vector3::new(origin.x, y, origin.y);
            let a = Vector3::new(base_x + perp.x * half_w, y, base_z + perp.y * half_w);
            let b = Vector3::new(base_x - perp.x * half_w, y, base_z - perp.y * half_w);
            d.draw_triangle3D(tip, a, b, CONE_COLOR);
            d.draw_triangle3D(tip, b, a, CONE_COLOR);
        }
    }
}

/// Flat overlay on top of the 3D pass.
pub fn render_hud(d: &mut impl RaylibDraw, game: &Game, fps: u32, sprinting: bool) {
    d.draw_text(
        &format!(
            "map {}/{}/difficulty {}",
            game.round, game.maze.name, game.round_difficulty
        ),
        10,
        10,
        20,
        Color::WHITE,
    );
    d.draw_text(&format!("FPS: {fps}"), 10, 40, 20, Color::WHITE);
    if sprinting {
        d.draw_text("SPRINT", 10, 70, 20, Color::RED);
    }
    if game.player.got_key {
        d.draw_text("KEY FOUND", 10, 100, 20, Color::GOLD);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bodies_render_at_the_agent_position() {
        let game = Game::new(1, Some(42));
        let (pos, rot, scale) = game.player.render_transform();
        assert_eq!(pos.x, game.player.agent.pos.x);
        assert_eq!(pos.z, game.player.agent.pos.y);
        assert_eq!(pos.y, -0.5);
        assert_eq!(rot.y, game.player.agent.rotation);
        assert_eq!(scale, Vector3::one());
        assert!(game.player.is_active());
    }

    #[test]
    fn camera_tracks_the_player_from_above() {
        let camera = follow_camera(Vector2::new(6.0, 4.0));
        assert_eq!(camera.target.x, 6.0);
        assert_eq!(camera.target.z, 4.0);
        assert!(camera.position.y > 10.0);
    }
}
