//! Round lifecycle and the per-tick simulation step.
use log::info;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use raylib::prelude::Vector2;

use crate::core::agent::move_distance_player;
use crate::core::collision;
use crate::core::enemy::Enemy;
use crate::core::maze::{MazeLayout, enemy_count_for, grid_size_for};
use crate::core::player::Player;

const SPAWN_RETRIES: usize = 1000;

/// Discrete movement intents for one tick, plus the round-reset signal.
#[derive(Clone, Copy, Default)]
pub struct InputState {
    pub forward: bool,
    pub back: bool,
    pub left: bool,
    pub right: bool,
    pub sprint: bool,
    pub reset: bool,
}

/// Named cue events the game emits; playback belongs to whoever drains them.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AudioCue {
    RoundStart,
    RoundFailed,
    RoundSuccess,
}

/// One running game: the current round's maze and agents, plus the knobs
/// that carry across rounds. All per-round state is rebuilt from scratch by
/// `start_round` and dropped wholesale when the round ends.
pub struct Game {
    /// How much the difficulty climbs per cleared round.
    difficulty_step: u32,
    pub round: u32,
    pub round_difficulty: u32,
    pub round_running: bool,
    pub maze: MazeLayout,
    pub player: Player,
    pub enemies: Vec<Enemy>,
    cues: Vec<AudioCue>,
    rng: ChaCha8Rng,
}

impl Game {
    /// Build a game and start round 1 at difficulty 1. A seed pins every
    /// maze and patrol decision for replays and tests.
    pub fn new(difficulty_step: u32, seed: Option<u64>) -> Self {
        let mut rng = match seed {
            Some(s) => ChaCha8Rng::seed_from_u64(s),
            None => ChaCha8Rng::from_entropy(),
        };
        let (maze, player, enemies) = build_round(1, &mut rng);
        info!(
            "round 1 started: '{}', {}x{}, {} enemies",
            maze.name,
            maze.rows,
            maze.cols,
            enemies.len()
        );
        Self {
            difficulty_step,
            round: 1,
            round_difficulty: 1,
            round_running: true,
            maze,
            player,
            enemies,
            cues: vec![AudioCue::RoundStart],
            rng,
        }
    }

    /// Generate the next round at the current difficulty. The previous
    /// round's maze and agents are dropped here, never reused.
    pub fn start_round(&mut self) {
        let (maze, player, enemies) = build_round(self.round_difficulty, &mut self.rng);
        self.round += 1;
        info!(
            "round {} started: '{}', {}x{}, {} enemies",
            self.round,
            maze.name,
            maze.rows,
            maze.cols,
            enemies.len()
        );
        self.maze = maze;
        self.player = player;
        self.enemies = enemies;
        self.round_running = true;
        self.cues.push(AudioCue::RoundStart);
    }

    pub fn end_round(&mut self) {
        self.round_running = false;
    }

    /// One simulation tick. The player moves first; every enemy then reads
    /// the same player position for the whole tick; round transitions come
    /// last.
    pub fn tick(&mut self, dt: f32, input: &InputState) {
        if !self.round_running {
            return;
        }
        if input.reset {
            self.end_round();
            self.start_round();
            return;
        }

        let step = move_distance_player(dt, input.sprint);
        if input.forward {
            self.player.agent.try_move(&self.maze, step, Vector2::new(0.0, 1.0));
        }
        if input.back {
            self.player.agent.try_move(&self.maze, step, Vector2::new(0.0, -1.0));
        }
        if input.left {
            self.player.agent.try_move(&self.maze, step, Vector2::new(1.0, 0.0));
        }
        if input.right {
            self.player.agent.try_move(&self.maze, step, Vector2::new(-1.0, 0.0));
        }
        self.player.agent.update_pose();

        let mut spotted = false;
        for enemy in self.enemies.iter_mut() {
            spotted |= enemy.update(&self.maze, Some(&self.player), dt, &mut self.rng);
        }
        if spotted {
            self.player.spotted();
        }

        if self.player.seen {
            info!("player spotted; round {} failed", self.round);
            self.cues.push(AudioCue::RoundFailed);
            self.end_round();
            self.start_round();
            return;
        }

        let key_pos = collision::grid_position(self.maze.key_cell);
        if !self.player.got_key
            && (self.player.agent.pos.x - key_pos.x).abs() < 1.0
            && (self.player.agent.pos.y - key_pos.y).abs() < 1.0
        {
            self.player.got_key = true;
        }

        // the exit sits on the far door; its x comes from the end column
        // (see DESIGN.md on why that column is what it is)
        let exit_x = 4.0 * self.maze.end.1 as f32 + 1.0;
        let exit_z = 2.0 * self.maze.end.0 as f32;
        if self.player.got_key
            && (self.player.agent.pos.x - exit_x).abs() < 0.5
            && (self.player.agent.pos.y - exit_z).abs() < 0.5
        {
            info!("round {} cleared", self.round);
            self.cues.push(AudioCue::RoundSuccess);
            self.round_difficulty += self.difficulty_step;
            self.end_round();
            self.start_round();
        }
    }

    /// Hand out and clear the cue events queued since the last drain.
    pub fn drain_cues(&mut self) -> Vec<AudioCue> {
        std::mem::take(&mut self.cues)
    }
}

fn build_round(difficulty: u32, rng: &mut ChaCha8Rng) -> (MazeLayout, Player, Vec<Enemy>) {
    let (rows, cols) = grid_size_for(difficulty);
    let maze = MazeLayout::generate(rows, cols, rng);
    let player = Player::new(collision::grid_position(maze.start));
    let enemy_turn_speed = (difficulty as f32 + 1.0) / 20.0;
    let enemies = (0..enemy_count_for(difficulty))
        .map(|_| {
            let cell = spawn_cell(&maze, rng);
            Enemy::new(collision::grid_position(cell), enemy_turn_speed, rng)
        })
        .collect();
    (maze, player, enemies)
}

/// Random walkable cell that is neither start nor end, with the same
/// bounded-retry shape as key placement.
fn spawn_cell(maze: &MazeLayout, rng: &mut impl Rng) -> (usize, usize) {
    for _ in 0..SPAWN_RETRIES {
        let cell = (rng.gen_range(0..maze.rows), rng.gen_range(0..maze.cols));
        if cell != maze.start && cell != maze.end && maze.grid[cell.0][cell.1] {
            return cell;
        }
    }
    for (r, row) in maze.grid.iter().enumerate() {
        for (c, &open) in row.iter().enumerate() {
            if open && (r, c) != maze.start && (r, c) != maze.end {
                return (r, c);
            }
        }
    }
    maze.start
}
