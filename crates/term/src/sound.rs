//! Sound cue sinks.
//!
//! Playback is fire-and-forget: a sink never reports failure back to the game.

use std::io::{self, Write};

use tracing::{debug, trace};

use crate::types::Sound;

pub trait SoundSink {
    fn play(&mut self, sound: Sound);
}

/// Discards every cue.
#[derive(Debug, Default, Clone, Copy)]
pub struct MuteSink;

impl SoundSink for MuteSink {
    fn play(&mut self, _sound: Sound) {}
}

/// Rings the terminal bell for the cues it is configured with.
///
/// Ringing on every move would be noise, so by default only line clears and
/// game over ring.
pub struct BellSink<W: Write> {
    out: W,
    cues: &'static [Sound],
}

impl BellSink<io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write> BellSink<W> {
    pub const DEFAULT_CUES: &'static [Sound] = &[Sound::LineClear, Sound::GameOver];

    pub fn new(out: W) -> Self {
        Self {
            out,
            cues: Self::DEFAULT_CUES,
        }
    }

    pub fn with_cues(mut self, cues: &'static [Sound]) -> Self {
        self.cues = cues;
        self
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> SoundSink for BellSink<W> {
    fn play(&mut self, sound: Sound) {
        if !self.cues.contains(&sound) {
            return;
        }
        if let Err(err) = self.out.write_all(b"\x07").and_then(|_| self.out.flush()) {
            trace!(sound = sound.id(), %err, "bell failed");
        }
    }
}

/// Records cues in the log instead of playing them.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogSink;

impl SoundSink for LogSink {
    fn play(&mut self, sound: Sound) {
        debug!(sound = sound.id(), "play");
    }
}

impl<T: SoundSink + ?Sized> SoundSink for Box<T> {
    fn play(&mut self, sound: Sound) {
        (**self).play(sound);
    }
}
