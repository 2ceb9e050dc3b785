//! Player state: the agent everyone is trying to spot.
use raylib::prelude::Vector2;

use crate::core::agent::Agent;

// how close a probe point has to be to count as "at the player"
const HERE_EPSILON: f32 = 0.1;

const PLAYER_ROTATION_SPEED: f32 = 0.2;

pub struct Player {
    pub agent: Agent,
    /// Latched by any vision trace that samples the player; only a round
    /// reset clears it.
    pub seen: bool,
    pub got_key: bool,
}

impl Player {
    pub fn new(start_pos: Vector2) -> Self {
        Self {
            agent: Agent::new(start_pos, PLAYER_ROTATION_SPEED),
            seen: false,
            got_key: false,
        }
    }

    /// Is this world point effectively the player's position?
    pub fn is_here(&self, point: Vector2) -> bool {
        let dx = self.agent.pos.x - point.x;
        let dz = self.agent.pos.y - point.y;
        (dx * dx + dz * dz).sqrt() < HERE_EPSILON
    }

    pub fn spotted(&mut self) {
        self.seen = true;
    }
}
