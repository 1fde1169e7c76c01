//! Sound-effect side channel
//!
//! The simulation raises [`GameEvent`]s; this module maps them to effects and
//! hands them to a backend. Playback is fire-and-forget.

use std::io::Write;

use crate::settings::Settings;
use crate::sim::GameEvent;

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEffect {
    /// Bullet fired
    Shoot,
    /// Bullet hit the monster
    MonsterKilled,
    /// Star collected
    StarCollected,
    /// Shield collected
    ShieldCollected,
    /// Game over
    GameOver,
}

impl SoundEffect {
    /// Mix level relative to the other effects
    pub fn base_volume(self) -> f32 {
        match self {
            SoundEffect::Shoot => 0.8,
            SoundEffect::MonsterKilled => 0.7,
            SoundEffect::StarCollected => 0.8,
            SoundEffect::ShieldCollected => 0.8,
            SoundEffect::GameOver => 0.3,
        }
    }
}

impl From<GameEvent> for SoundEffect {
    fn from(event: GameEvent) -> Self {
        match event {
            GameEvent::Shot => SoundEffect::Shoot,
            GameEvent::MonsterKilled => SoundEffect::MonsterKilled,
            GameEvent::StarCollected => SoundEffect::StarCollected,
            GameEvent::ShieldCollected => SoundEffect::ShieldCollected,
            GameEvent::GameOver => SoundEffect::GameOver,
        }
    }
}

/// Something that can make a noise
pub trait SoundBackend {
    fn play(&mut self, effect: SoundEffect, gain: f32);
}

/// Backend that discards everything
#[derive(Debug, Default)]
pub struct Silent;

impl SoundBackend for Silent {
    fn play(&mut self, _effect: SoundEffect, _gain: f32) {}
}

/// Rings the terminal bell for effects loud enough to matter
#[derive(Debug)]
pub struct TerminalBell {
    threshold: f32,
}

impl Default for TerminalBell {
    fn default() -> Self {
        Self { threshold: 0.5 }
    }
}

impl SoundBackend for TerminalBell {
    fn play(&mut self, effect: SoundEffect, gain: f32) {
        if gain < self.threshold {
            log::trace!("{:?} below bell threshold", effect);
            return;
        }
        let mut out = std::io::stdout();
        // Bell failures never reach the game loop
        if out.write_all(b"\x07").and_then(|_| out.flush()).is_err() {
            log::debug!("Terminal bell unavailable");
        }
    }
}

/// Audio manager for the game
pub struct AudioManager {
    backend: Box<dyn SoundBackend>,
    master_volume: f32,
    sfx_volume: f32,
    muted: bool,
}

impl Default for AudioManager {
    fn default() -> Self {
        Self::new(Box::new(Silent))
    }
}

impl AudioManager {
    pub fn new(backend: Box<dyn SoundBackend>) -> Self {
        Self {
            backend,
            master_volume: 0.8,
            sfx_volume: 1.0,
            muted: false,
        }
    }

    /// Take volume and mute from the player's settings
    pub fn with_settings(backend: Box<dyn SoundBackend>, settings: &Settings) -> Self {
        let mut audio = Self::new(backend);
        audio.master_volume = settings.master_volume.clamp(0.0, 1.0);
        audio.sfx_volume = settings.sfx_volume.clamp(0.0, 1.0);
        audio.muted = settings.muted;
        audio
    }

    pub fn is_muted(&self) -> bool {
        self.muted
    }

    /// Final gain for an effect
    pub fn gain(&self, effect: SoundEffect) -> f32 {
        if self.muted {
            0.0
        } else {
            effect.base_volume() * self.master_volume * self.sfx_volume
        }
    }

    pub fn play(&mut self, effect: SoundEffect) {
        let gain = self.gain(effect);
        if gain <= 0.0 {
            return;
        }
        self.backend.play(effect, gain);
    }

    /// Play the effect for every event raised this frame
    pub fn play_events(&mut self, events: &[GameEvent]) {
        for &event in events {
            self.play(event.into());
        }
    }
}
