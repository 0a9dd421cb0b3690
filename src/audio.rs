//! Audio
//!
//! The simulation names sounds with `Sound`; playback itself belongs to the
//! host. `AudioManager` applies volume settings and mute before forwarding
//! to whatever backend the host provides.

use crate::settings::Settings;

/// Sound effects and music the game triggers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Sound {
    /// Background loop
    Music,
    /// Laser fired
    Shoot,
    /// Fan threw a tool
    Tool,
    /// Coin collected
    Collect,
    /// Coin shot by mistake
    Error,
    /// Agent8 hit by a tool
    Die,
}

impl Sound {
    /// Asset key understood by the host
    pub fn key(&self) -> &'static str {
        match self {
            Sound::Music => "music",
            Sound::Shoot => "shoot",
            Sound::Tool => "tool",
            Sound::Collect => "collect",
            Sound::Error => "error",
            Sound::Die => "die",
        }
    }

    pub fn is_music(&self) -> bool {
        matches!(self, Sound::Music)
    }
}

/// What the simulation asks of audio
pub trait Audio {
    fn play_sound(&mut self, sound: Sound);
    fn start_looping_sound(&mut self, sound: Sound);
    fn stop_looping_sound(&mut self, sound: Sound);
}

/// Raw playback provided by the host
pub trait AudioBackend {
    fn play(&mut self, key: &str, volume: f32);
    fn start_loop(&mut self, key: &str, volume: f32);
    fn stop_loop(&mut self, key: &str);
}

/// Audio manager for the game
pub struct AudioManager<B> {
    backend: B,
    master_volume: f32,
    sfx_volume: f32,
    music_volume: f32,
    muted: bool,
}

impl<B: AudioBackend> AudioManager<B> {
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            master_volume: 0.8,
            sfx_volume: 1.0,
            music_volume: 0.7,
            muted: false,
        }
    }

    pub fn with_settings(backend: B, settings: &Settings) -> Self {
        let mut audio = Self::new(backend);
        audio.apply_settings(settings);
        audio
    }

    pub fn apply_settings(&mut self, settings: &Settings) {
        self.set_master_volume(settings.master_volume);
        self.set_sfx_volume(settings.sfx_volume);
        self.set_music_volume(settings.music_volume);
        self.set_muted(settings.muted);
    }

    /// Set master volume (0.0 - 1.0)
    pub fn set_master_volume(&mut self, vol: f32) {
        self.master_volume = vol.clamp(0.0, 1.0);
    }

    /// Set SFX volume (0.0 - 1.0)
    pub fn set_sfx_volume(&mut self, vol: f32) {
        self.sfx_volume = vol.clamp(0.0, 1.0);
    }

    /// Set music volume (0.0 - 1.0)
    pub fn set_music_volume(&mut self, vol: f32) {
        self.music_volume = vol.clamp(0.0, 1.0);
    }

    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }

    /// Get effective volume
    fn effective_volume(&self, sound: Sound) -> f32 {
        if self.muted {
            0.0
        } else if sound.is_music() {
            self.master_volume * self.music_volume
        } else {
            self.master_volume * self.sfx_volume
        }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }
}

impl<B: AudioBackend> Audio for AudioManager<B> {
    fn play_sound(&mut self, sound: Sound) {
        let vol = self.effective_volume(sound);
        if vol <= 0.0 {
            return;
        }
        self.backend.play(sound.key(), vol);
    }

    fn start_looping_sound(&mut self, sound: Sound) {
        // Loops start even when muted so unmuting mid-run is not silent
        let vol = self.effective_volume(sound);
        self.backend.start_loop(sound.key(), vol);
    }

    fn stop_looping_sound(&mut self, sound: Sound) {
        self.backend.stop_loop(sound.key());
    }
}

/// Backend that remembers every call (headless runs and tests)
#[derive(Debug, Clone, Default)]
pub struct RecordingBackend {
    pub played: Vec<(String, f32)>,
    pub loops: Vec<String>,
    pub stopped: Vec<String>,
}

impl RecordingBackend {
    /// How many times `sound` was played as a one-shot
    pub fn count(&self, sound: Sound) -> usize {
        self.played.iter().filter(|(k, _)| k == sound.key()).count()
    }

    pub fn is_looping(&self, sound: Sound) -> bool {
        self.loops.iter().any(|k| k == sound.key())
    }
}

impl AudioBackend for RecordingBackend {
    fn play(&mut self, key: &str, volume: f32) {
        log::trace!("play {key} at {volume:.2}");
        self.played.push((key.to_owned(), volume));
    }

    fn start_loop(&mut self, key: &str, _volume: f32) {
        if !self.loops.iter().any(|k| k == key) {
            self.loops.push(key.to_owned());
        }
    }

    fn stop_loop(&mut self, key: &str) {
        self.loops.retain(|k| k != key);
        self.stopped.push(key.to_owned());
    }
}
