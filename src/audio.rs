//! Audio system
//!
//! The simulation only emits `GameEvent`s. This module turns them into short
//! procedural tones and hands those to whatever backend the frontend provides.
//! A looping music track follows the game phase.

use crate::settings::Settings;
use crate::sim::{GameEvent, GamePhase};

/// Crossfade between music tracks, in milliseconds
pub const MUSIC_FADE_MS: u32 = 500;

/// Music sits at a third of the music volume under the effects
const MUSIC_GAIN: f32 = 1.0 / 3.0;

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEffect {
    /// Ball hits paddle
    PaddleHit,
    /// Ball hits wall
    WallHit,
    /// Someone scored
    Score,
    /// Round finished in storytime or fun mode
    RoundWon,
    /// Match over
    GameOver,
    /// Power-up collected
    PowerCollect,
    /// Power-up effect wore off
    PowerExpire,
    /// Storytime letter collected
    LetterCollect,
}

impl SoundEffect {
    /// Sound for a simulation event, if it has one
    pub fn for_event(event: &GameEvent) -> Option<Self> {
        match event {
            GameEvent::WallHit => Some(SoundEffect::WallHit),
            GameEvent::PaddleHit { .. } => Some(SoundEffect::PaddleHit),
            GameEvent::Scored { .. } => Some(SoundEffect::Score),
            GameEvent::RoundComplete { .. } => Some(SoundEffect::RoundWon),
            GameEvent::MatchComplete { .. } => Some(SoundEffect::GameOver),
            GameEvent::PowerCollected { .. } => Some(SoundEffect::PowerCollect),
            GameEvent::PowerExpired { .. } => Some(SoundEffect::PowerExpire),
            GameEvent::LetterCollected { .. } => Some(SoundEffect::LetterCollect),
            GameEvent::PowerRespawned { .. } => None,
        }
    }

    /// Per-effect mix level; walls are quieter than paddles
    pub fn gain(self) -> f32 {
        match self {
            SoundEffect::WallHit => 0.25,
            SoundEffect::PaddleHit | SoundEffect::Score => 0.5,
            SoundEffect::PowerCollect | SoundEffect::PowerExpire | SoundEffect::LetterCollect => {
                0.4
            }
            SoundEffect::RoundWon | SoundEffect::GameOver => 0.6,
        }
    }

    pub fn tone(self) -> Tone {
        match self {
            SoundEffect::PaddleHit => Tone::new(440.0, 330.0, 0.06),
            SoundEffect::WallHit => Tone::new(220.0, 200.0, 0.04),
            SoundEffect::Score => Tone::new(660.0, 880.0, 0.2),
            SoundEffect::RoundWon => Tone::new(523.0, 1046.0, 0.4),
            SoundEffect::GameOver => Tone::new(392.0, 131.0, 0.8),
            SoundEffect::PowerCollect => Tone::new(600.0, 1200.0, 0.15),
            SoundEffect::PowerExpire => Tone::new(1200.0, 600.0, 0.15),
            SoundEffect::LetterCollect => Tone::new(880.0, 990.0, 0.1),
        }
    }
}

/// A frequency sweep
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tone {
    pub freq_start: f32,
    pub freq_end: f32,
    /// Seconds
    pub duration: f32,
}

impl Tone {
    pub const fn new(freq_start: f32, freq_end: f32, duration: f32) -> Self {
        Self {
            freq_start,
            freq_end,
            duration,
        }
    }
}

/// Looping background tracks
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MusicTrack {
    /// During a match
    Background,
    /// While paused
    Pause,
    /// Outside a match: before the first mode and after game over
    OnHold,
}

impl MusicTrack {
    pub fn for_phase(phase: GamePhase) -> Self {
        match phase {
            GamePhase::Playing
            | GamePhase::AiPlaying
            | GamePhase::StorytimePlaying
            | GamePhase::FunPlaying => MusicTrack::Background,
            GamePhase::Paused => MusicTrack::Pause,
            GamePhase::Idle | GamePhase::GameOver => MusicTrack::OnHold,
        }
    }

    pub fn asset(self) -> &'static str {
        match self {
            MusicTrack::Background => "background.wav",
            MusicTrack::Pause => "pause.wav",
            MusicTrack::OnHold => "onhold.wav",
        }
    }
}

/// Device-side playback. Implementations must not block the frame loop.
pub trait AudioBackend {
    fn play(&mut self, effect: SoundEffect, tone: Tone, volume: f32);

    /// Fade out whatever is looping and fade `track` in
    fn change_music(&mut self, track: MusicTrack, fade_ms: u32, volume: f32);

    fn set_music_volume(&mut self, volume: f32);
}

/// Backend that only logs, for headless runs
#[derive(Debug, Default)]
pub struct LogBackend;

impl AudioBackend for LogBackend {
    fn play(&mut self, effect: SoundEffect, tone: Tone, volume: f32) {
        log::debug!(
            "♪ {:?} {:.0}->{:.0} Hz, {:.2}s at {:.2}",
            effect,
            tone.freq_start,
            tone.freq_end,
            tone.duration,
            volume
        );
    }

    fn change_music(&mut self, track: MusicTrack, fade_ms: u32, volume: f32) {
        log::debug!("Music -> {} ({fade_ms} ms fade) at {volume:.2}", track.asset());
    }

    fn set_music_volume(&mut self, volume: f32) {
        log::debug!("Music volume {volume:.2}");
    }
}

/// Audio manager for the game
pub struct AudioManager {
    backend: Option<Box<dyn AudioBackend>>,
    master_volume: f32,
    sfx_volume: f32,
    music_volume: f32,
    muted: bool,
    /// Track currently looping
    music: Option<MusicTrack>,
}

impl Default for AudioManager {
    fn default() -> Self {
        Self::new(None)
    }
}

impl AudioManager {
    pub fn new(backend: Option<Box<dyn AudioBackend>>) -> Self {
        if backend.is_none() {
            log::warn!("No audio backend - audio disabled");
        }
        Self {
            backend,
            master_volume: 0.8,
            sfx_volume: 1.0,
            music_volume: 0.7,
            muted: false,
            music: None,
        }
    }

    pub fn from_settings(settings: &Settings, backend: Option<Box<dyn AudioBackend>>) -> Self {
        let mut audio = Self::new(backend);
        audio.set_master_volume(settings.master_volume);
        audio.set_sfx_volume(settings.sfx_volume);
        audio.set_music_volume(settings.music_volume);
        audio.set_muted(settings.muted);
        audio
    }

    pub fn is_enabled(&self) -> bool {
        self.backend.is_some()
    }

    /// Set master volume (0.0 - 1.0)
    pub fn set_master_volume(&mut self, vol: f32) {
        self.master_volume = vol.clamp(0.0, 1.0);
        self.refresh_music_volume();
    }

    /// Set SFX volume (0.0 - 1.0)
    pub fn set_sfx_volume(&mut self, vol: f32) {
        self.sfx_volume = vol.clamp(0.0, 1.0);
    }

    /// Set music volume (0.0 - 1.0)
    pub fn set_music_volume(&mut self, vol: f32) {
        self.music_volume = vol.clamp(0.0, 1.0);
        self.refresh_music_volume();
    }

    /// Mute/unmute all audio
    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
        self.refresh_music_volume();
    }

    fn effective_volume(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            self.master_volume * self.sfx_volume
        }
    }

    pub fn effective_music_volume(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            self.master_volume * self.music_volume * MUSIC_GAIN
        }
    }

    pub fn current_music(&self) -> Option<MusicTrack> {
        self.music
    }

    fn refresh_music_volume(&mut self) {
        if self.music.is_none() {
            return;
        }
        let vol = self.effective_music_volume();
        if let Some(backend) = self.backend.as_mut() {
            backend.set_music_volume(vol);
        }
    }

    /// Switch to the track for `phase`; a no-op when it is already playing
    pub fn sync_music(&mut self, phase: GamePhase) {
        let track = MusicTrack::for_phase(phase);
        if self.music == Some(track) {
            return;
        }
        self.music = Some(track);
        let vol = self.effective_music_volume();
        if let Some(backend) = self.backend.as_mut() {
            backend.change_music(track, MUSIC_FADE_MS, vol);
        }
    }

    /// Play a sound effect
    pub fn play(&mut self, effect: SoundEffect) {
        let vol = self.effective_volume() * effect.gain();
        if vol <= 0.0 {
            return;
        }
        let Some(backend) = self.backend.as_mut() else {
            return;
        };
        backend.play(effect, effect.tone(), vol);
    }

    /// Play the sound for every event that has one
    pub fn handle_events(&mut self, events: &[GameEvent]) {
        for effect in events.iter().filter_map(SoundEffect::for_event) {
            self.play(effect);
        }
    }
}
