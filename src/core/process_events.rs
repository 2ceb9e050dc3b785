//! Input handling: raylib key state -> per-tick movement intents.
use raylib::prelude::*;

use crate::core::game::InputState;

/// Sample the keyboard into one tick's worth of intents. WASD moves,
/// shift sprints, ESC asks for a fresh round.
pub fn poll_input(rl: &RaylibHandle) -> InputState {
    InputState {
        forward: rl.is_key_down(KeyboardKey::KEY_W),
        back: rl.is_key_down(KeyboardKey::KEY_S),
        left: rl.is_key_down(KeyboardKey::KEY_A),
        right: rl.is_key_down(KeyboardKey::KEY_D),
        sprint: rl.is_key_down(KeyboardKey::KEY_LEFT_SHIFT)
            || rl.is_key_down(KeyboardKey::KEY_RIGHT_SHIFT),
        reset: rl.is_key_pressed(KeyboardKey::KEY_ESCAPE),
    }
}
