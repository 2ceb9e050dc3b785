//! Texture manager: filename-interned loads with stable handles.
use std::collections::HashMap;

use log::warn;
use raylib::prelude::*;

/// Stable handle into the manager; the same path always maps to the same
/// handle, loaded or not.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TextureHandle(usize);

#[derive(Default)]
pub struct TextureManager {
    by_path: HashMap<String, TextureHandle>,
    textures: Vec<Option<Texture2D>>,
}

impl TextureManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load (or re-resolve) a texture by path. A missing file still gets a
    /// handle; drawing code falls back on procedural shapes for those.
    pub fn load(&mut self, rl: &mut RaylibHandle, thread: &RaylibThread, path: &str) -> TextureHandle {
        let (handle, fresh) = self.intern(path);
        if fresh {
            let tex = Image::load_image(path)
                .ok()
                .and_then(|img| rl.load_texture_from_image(thread, &img).ok());
            if tex.is_none() {
                warn!("texture '{path}' missing; drawing will fall back");
            }
            self.textures[handle.0] = tex;
        }
        handle
    }

    /// First candidate that actually loads; with none loadable, the first
    /// candidate's (empty) handle so callers still get something stable.
    pub fn load_any(
        &mut self,
        rl: &mut RaylibHandle,
        thread: &RaylibThread,
        candidates: &[&str],
    ) -> TextureHandle {
        for path in candidates {
            let handle = self.load(rl, thread, path);
            if self.get(handle).is_some() {
                return handle;
            }
        }
        self.load(rl, thread, candidates[0])
    }

    pub fn get(&self, handle: TextureHandle) -> Option<&Texture2D> {
        self.textures.get(handle.0).and_then(Option::as_ref)
    }

    fn intern(&mut self, path: &str) -> (TextureHandle, bool) {
        if let Some(&handle) = self.by_path.get(path) {
            return (handle, false);
        }
        let handle = TextureHandle(self.textures.len());
        self.textures.push(None);
        self.by_path.insert(path.to_string(), handle);
        (handle, true)
    }
}
