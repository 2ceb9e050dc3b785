//! Core game types and logic (data, simulation, input).
//!
//! Re-exports:
//! - `maze`: Grid maze generation and layout queries
//! - `collision`: World/grid mapping and walkability
//! - `agent`: Shared movement and pose logic
//! - `player`: Player state and the detection flag
//! - `enemy`: Patrolling enemies and their vision cones
//! - `vision`: Cone-slice raymarching
//! - `game`: Round lifecycle and the per-tick step
//! - `process_events`: Input handling

pub mod agent;
pub mod collision;
pub mod enemy;
pub mod game;
pub mod maze;
pub mod player;
pub mod process_events;
pub mod vision;
