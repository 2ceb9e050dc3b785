//! Cue playback (rodio). Assets are optional: a missing file or output
//! device degrades to silence, never to an error.
use std::{fs::File, io::BufReader, io::Cursor, io::Read, sync::Arc};

use log::warn;
use rand::Rng;
use rodio::{Decoder, OutputStream, OutputStreamHandle, Sink};

use crate::core::game::AudioCue;

fn load_bytes(path: &str) -> Option<Vec<u8>> {
    let mut f = File::open(path).ok()?;
    let mut buf = Vec::new();
    f.read_to_end(&mut buf).ok()?;
    Some(buf)
}

fn load_bytes_any(paths: &[&str]) -> Option<Vec<u8>> {
    for p in paths {
        if let Some(b) = load_bytes(p) {
            return Some(b);
        }
    }
    None
}

pub struct AudioManager {
    _stream: OutputStream,
    handle: OutputStreamHandle,
    theme_sink: Option<Sink>,
    sfx_sink: Sink,
    theme: Option<Arc<Vec<u8>>>,
    success: Option<Arc<Vec<u8>>>,
    failures: Vec<Arc<Vec<u8>>>,
}

impl AudioManager {
    pub fn new() -> Option<Self> {
        let (_stream, handle) = OutputStream::try_default().ok()?;
        let sfx_sink = Sink::try_new(&handle).ok()?;
        Some(Self {
            _stream,
            handle,
            theme_sink: None,
            sfx_sink,
            theme: None,
            success: None,
            failures: Vec::new(),
        })
    }

    pub fn load_auto(&mut self) {
        self.theme = load_bytes_any(&[
            "assets/music/theme.wav",
            "assets/music/theme.ogg",
        ])
        .map(Arc::new);
        self.success = load_bytes_any(&[
            "assets/music/succes.wav",
            "assets/music/success.wav",
        ])
        .map(Arc::new);
        for path in [
            "assets/music/failed-001.wav",
            "assets/music/failed-002.wav",
            "assets/music/failed-003.wav",
            "assets/music/failed-004.wav",
        ] {
            if let Some(b) = load_bytes(path) {
                self.failures.push(Arc::new(b));
            }
        }
        if self.theme.is_none() {
            warn!("no theme music found; rounds will be silent");
        }
    }

    /// React to one cue event from the game.
    pub fn handle_cue(&mut self, cue: AudioCue) {
        match cue {
            AudioCue::RoundStart => {
                self.stop_theme();
                self.start_theme();
            }
            AudioCue::RoundFailed => {
                self.stop_theme();
                if !self.failures.is_empty() {
                    let pick = rand::thread_rng().gen_range(0..self.failures.len());
                    self.play_one_shot(Some(self.failures[pick].clone()));
                }
            }
            AudioCue::RoundSuccess => {
                self.stop_theme();
                self.play_one_shot(self.success.clone());
            }
        }
    }

    fn start_theme(&mut self) {
        if let Some(bytes) = self.theme.clone() {
            if let Ok(dec) = Decoder::new_looped(Cursor::new(bytes.as_ref().clone())) {
                if let Ok(sink) = Sink::try_new(&self.handle) {
                    sink.append(dec);
                    sink.set_volume(0.35);
                    self.theme_sink = Some(sink);
                }
            }
        }
    }

    fn stop_theme(&mut self) {
        if let Some(sink) = self.theme_sink.take() {
            sink.stop();
        }
    }

    fn play_one_shot(&self, data: Option<Arc<Vec<u8>>>) {
        if let Some(d) = data {
            if let Ok(dec) = Decoder::new(BufReader::new(Cursor::new(d.as_ref().clone()))) {
                self.sfx_sink.append(dec);
            }
        }
    }
}
