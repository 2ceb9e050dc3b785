//! CORPORATE ESPIONAGE: THE GAME
//!
//! A small real-time stealth-maze game: sneak through a freshly dug maze,
//! grab the key, and reach the exit without crossing a patroller's vision
//! cone. The simulation lives in [`core`], presentation in [`render`] and
//! [`audio_manager`]; `main.rs` just wires them into a frame loop.

pub mod audio_manager;
pub mod core;
pub mod render;
