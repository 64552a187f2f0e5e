//! Sound cues
//!
//! The simulation never plays sound itself. Each frame's [`FrameEvents`] are
//! mapped to short square-wave beeps and handed to whatever [`Beeper`] the
//! host provides (a Web Audio oscillator, a native audio device, a test
//! recorder).

use serde::{Deserialize, Serialize};

use crate::sim::{FrameEvents, GameEvent};

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SoundEffect {
    /// Ball hits paddle
    PaddleHit,
    /// Ball hits a field edge
    EdgeBounce,
    /// Point scored
    Score,
    /// Match won
    Win,
}

/// One beep: a tone, how long it lasts and how loud it is
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BeepCue {
    pub frequency_hz: f32,
    pub duration_secs: f32,
    /// Gain (0.0 - 1.0)
    pub volume: f32,
}

impl SoundEffect {
    pub fn for_event(event: GameEvent) -> Self {
        match event {
            GameEvent::PaddleHit(_) => SoundEffect::PaddleHit,
            GameEvent::EdgeBounce => SoundEffect::EdgeBounce,
            GameEvent::Score(_) => SoundEffect::Score,
            GameEvent::Win(_) => SoundEffect::Win,
        }
    }

    pub fn cue(self) -> BeepCue {
        let (frequency_hz, duration_secs, volume) = match self {
            // Solid mid tone
            SoundEffect::PaddleHit => (460.0, 0.06, 0.6),
            // Lower, shorter, quieter blip
            SoundEffect::EdgeBounce => (230.0, 0.04, 0.3),
            // Long low tone; the win reuses it
            SoundEffect::Score | SoundEffect::Win => (490.0, 0.26, 0.6),
        };
        BeepCue {
            frequency_hz,
            duration_secs,
            volume,
        }
    }
}

/// Audio sink supplied by the host
pub trait Beeper {
    fn beep(&mut self, cue: BeepCue);
}

/// Audio manager: volume and mute in front of a [`Beeper`]
pub struct AudioManager<B: Beeper> {
    sink: B,
    volume: f32,
    muted: bool,
}

impl<B: Beeper> AudioManager<B> {
    pub fn new(sink: B) -> Self {
        Self {
            sink,
            volume: 0.8,
            muted: false,
        }
    }

    /// Set volume (0.0 - 1.0)
    pub fn set_volume(&mut self, vol: f32) {
        self.volume = vol.clamp(0.0, 1.0);
    }

    pub fn volume(&self) -> f32 {
        self.volume
    }

    /// Mute/unmute all audio
    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }

    pub fn is_muted(&self) -> bool {
        self.muted
    }

    /// Effective gain applied on top of each cue's own volume
    fn effective_volume(&self) -> f32 {
        if self.muted { 0.0 } else { self.volume }
    }

    /// Play the beeps for one frame's events at the current volume
    pub fn play(&mut self, events: &FrameEvents) {
        let vol = self.effective_volume();
        if vol <= 0.0 {
            return;
        }
        for event in events.iter() {
            let cue = SoundEffect::for_event(event).cue();
            self.sink.beep(BeepCue {
                volume: cue.volume * vol,
                ..cue
            });
        }
    }

    pub fn sink(&self) -> &B {
        &self.sink
    }
}

/// Emit one beep per event, in event order
pub fn play_events(events: &FrameEvents, beeper: &mut impl Beeper) {
    for event in events.iter() {
        beeper.beep(SoundEffect::for_event(event).cue());
    }
}
