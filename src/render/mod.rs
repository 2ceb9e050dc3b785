//! Rendering utilities and the 3D pass.
//!
//! Re-exports:
//! - `scene`: Arena transform tree and composed bodies
//! - `textures`: Filename-interned texture manager
//! - `render3d`: Maze/body/cone drawing, camera and HUD

pub mod render3d;
pub mod scene;
pub mod textures;
