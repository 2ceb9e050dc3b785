// main.rs
use raylib::prelude::*;

use corporate_espionage::audio_manager::AudioManager;
use corporate_espionage::core::game::Game;
use corporate_espionage::core::process_events::poll_input;
use corporate_espionage::render::render3d::{follow_camera, render_hud, render_world};
use corporate_espionage::render::textures::TextureManager;

fn main() {
    env_logger::init();

    // ------- SETTINGS -------
    let window_width = 1280;
    let window_height = 800;
    let target_fps = 45;
    // how much harder each cleared round gets
    let difficulty_step = 1;
    // ------------------------

    let (mut rl, thread) = raylib::init()
        .size(window_width, window_height)
        .title("CORPORATE ESPIONAGE: THE GAME")
        .build();
    rl.set_target_fps(target_fps);
    // ESC restarts the round instead of closing the window
    rl.set_exit_key(None);

    let mut texman = TextureManager::new();
    let key_tex = texman.load_any(&mut rl, &thread, &["assets/UI/key.png", "assets/key.png"]);

    let mut audio = AudioManager::new();
    match audio.as_mut() {
        Some(a) => a.load_auto(),
        None => log::warn!("no audio output; playing silent"),
    }

    let mut game = Game::new(difficulty_step, None);

    while !rl.window_should_close() {
        let input = poll_input(&rl);
        let dt = rl.get_frame_time();

        game.tick(dt, &input);
        for cue in game.drain_cues() {
            if let Some(a) = audio.as_mut() {
                a.handle_cue(cue);
            }
        }

        let camera = follow_camera(game.player.agent.pos);
        let fps = rl.get_fps();

        let mut d = rl.begin_drawing(&thread);
        d.clear_background(Color::new(77, 77, 77, 255));
        {
            let mut d3 = d.begin_mode3D(camera);
            render_world(&mut d3, &game, &texman, key_tex, camera);
        }
        render_hud(&mut d, &game, fps, input.sprint);
    }
}
