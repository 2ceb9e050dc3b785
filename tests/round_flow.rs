use corporate_espionage::core::collision;
use corporate_espionage::core::game::{AudioCue, Game, InputState};
use corporate_espionage::core::maze::MazeLayout;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use raylib::prelude::Vector2;

const DT: f32 = 1.0 / 45.0;

#[test]
fn seed_42_layout_meets_the_invariants() {
    let mut rng = ChaCha8Rng::seed_from_u64(42);
    let maze = MazeLayout::generate(7, 15, &mut rng);
    assert!(maze.grid[maze.start.0][maze.start.1]);
    assert!(maze.grid[maze.end.0][maze.end.1]);
    for c in 0..maze.cols {
        assert!(maze.grid[maze.start.0][c]);
    }
    assert_ne!(maze.key_cell, maze.start);
    assert_ne!(maze.key_cell, maze.end);
}

#[test]
fn difficulty_one_round_is_7x15_with_one_enemy() {
    let game = Game::new(1, Some(42));
    assert_eq!((game.maze.rows, game.maze.cols), (7, 15));
    assert_eq!(game.enemies.len(), 1);
}

#[test]
fn difficulty_two_round_is_9x19_with_three_enemies() {
    let mut game = Game::new(1, Some(42));
    game.round_difficulty = 2;
    game.start_round();
    assert_eq!((game.maze.rows, game.maze.cols), (9, 19));
    assert_eq!(game.enemies.len(), 3);
}

#[test]
fn a_round_plays_through_key_and_exit() {
    let mut game = Game::new(1, Some(42));
    game.drain_cues();
    game.enemies.clear(); // scripted walkthrough, nobody watching

    // grab the key
    game.player.agent.pos = collision::grid_position(game.maze.key_cell);
    game.tick(DT, &InputState::default());
    assert!(game.player.got_key);
    assert_eq!(game.round, 1);

    // step onto the exit door
    game.player.agent.pos = Vector2::new(
        4.0 * game.maze.end.1 as f32 + 1.0,
        2.0 * game.maze.end.0 as f32,
    );
    game.tick(DT, &InputState::default());

    assert_eq!(game.round, 2);
    assert_eq!(game.round_difficulty, 2);
    assert_eq!((game.maze.rows, game.maze.cols), (9, 19));
    assert_eq!(game.enemies.len(), 3);
    let cues = game.drain_cues();
    assert!(cues.contains(&AudioCue::RoundSuccess));
    assert!(cues.contains(&AudioCue::RoundStart));
    // fresh round, fresh player
    assert!(!game.player.got_key);
    assert!(!game.player.seen);
}

#[test]
fn getting_spotted_restarts_without_raising_difficulty() {
    let mut game = Game::new(1, Some(42));
    game.drain_cues();
    game.player.spotted();
    game.tick(DT, &InputState::default());
    assert_eq!(game.round, 2);
    assert_eq!(game.round_difficulty, 1);
    assert!(game.drain_cues().contains(&AudioCue::RoundFailed));
}

#[test]
fn simulation_soaks_without_breaking_its_bounds() {
    let mut game = Game::new(1, Some(123));
    for _ in 0..600 {
        game.tick(DT, &InputState::default());
    }
    assert!(game.round_running);
    assert_eq!(game.round_difficulty, 1);
    assert_eq!(game.enemies.len(), 1);
    // wandering never escapes the implicitly solid boundary
    let max_x = 2.0 * game.maze.cols as f32;
    let max_z = 2.0 * game.maze.rows as f32;
    for enemy in &game.enemies {
        assert!(enemy.agent.pos.x > -2.0 && enemy.agent.pos.x < max_x + 1.0);
        assert!(enemy.agent.pos.y > -2.0 && enemy.agent.pos.y < max_z + 1.0);
        for slice in &enemy.slices {
            assert!(slice.distance > 0.0 && slice.distance <= enemy.sight);
        }
    }
}

#[test]
fn two_seeded_games_replay_identically() {
    let mut a = Game::new(1, Some(7));
    let mut b = Game::new(1, Some(7));
    let input = InputState { forward: true, ..Default::default() };
    for _ in 0..120 {
        a.tick(DT, &input);
        b.tick(DT, &input);
    }
    assert_eq!(a.round, b.round);
    assert_eq!(a.player.agent.pos, b.player.agent.pos);
    for (ea, eb) in a.enemies.iter().zip(&b.enemies) {
        assert_eq!(ea.agent.pos, eb.agent.pos);
        assert_eq!(ea.walk_direction, eb.walk_direction);
    }
}
