//! Fire-and-forget UI tone contracts.
//!
//! Tones are synthesized by the host (Web Audio in the browser); the runtime only names which
//! cue to play and at what volume. Playback never reports failure back to the caller.

use std::{cell::RefCell, rc::Rc};

use serde::{Deserialize, Serialize};

/// Oscillator shape used to synthesize a [`Tone`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ToneWaveform {
    /// Pure sine wave.
    Sine,
    /// Softer triangle wave.
    Triangle,
    /// Harsh square wave, used for error cues.
    Square,
}

/// Named UI sound cues.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Tone {
    /// An app window opened.
    Open,
    /// An app window closed.
    Close,
    /// An app window was minimized into the dock.
    Minimize,
    /// A rejected action, e.g. a wrong password.
    Error,
    /// The session unlocked.
    Unlock,
    /// A notification banner appeared.
    Notification,
    /// The machine finished powering on.
    Startup,
}

impl Tone {
    /// Oscillator frequency in hertz.
    pub const fn frequency_hz(self) -> f32 {
        match self {
            Self::Open => 660.0,
            Self::Close => 440.0,
            Self::Minimize => 520.0,
            Self::Error => 180.0,
            Self::Unlock => 880.0,
            Self::Notification => 990.0,
            Self::Startup => 261.63,
        }
    }

    /// Playback duration in milliseconds.
    pub const fn duration_ms(self) -> u32 {
        match self {
            Self::Open | Self::Close | Self::Minimize => 90,
            Self::Error => 220,
            Self::Unlock => 140,
            Self::Notification => 160,
            Self::Startup => 900,
        }
    }

    /// Oscillator shape.
    pub const fn waveform(self) -> ToneWaveform {
        match self {
            Self::Error => ToneWaveform::Square,
            Self::Startup | Self::Notification => ToneWaveform::Triangle,
            _ => ToneWaveform::Sine,
        }
    }
}

/// Converts a 0–100 volume setting into a Web Audio gain value.
///
/// Gain is kept well below unity; UI cues should never be loud.
pub fn volume_to_gain(volume: u8) -> f32 {
    f32::from(volume.min(100)) / 100.0 * 0.25
}

/// Host service for synthesized UI tones.
pub trait SoundService {
    /// Starts playback of `tone` at `volume` (0–100) and returns immediately.
    fn play(&self, tone: Tone, volume: u8);
}

#[derive(Debug, Clone, Copy, Default)]
/// Silent sound service for unsupported targets.
pub struct NoopSoundService;

impl SoundService for NoopSoundService {
    fn play(&self, _tone: Tone, _volume: u8) {}
}

#[derive(Debug, Clone, Default)]
/// Sound service that records requested cues instead of playing them.
pub struct RecordingSoundService {
    played: Rc<RefCell<Vec<Tone>>>,
}

impl RecordingSoundService {
    /// Returns the cues requested so far, oldest first.
    pub fn played(&self) -> Vec<Tone> {
        self.played.borrow().clone()
    }
}

impl SoundService for RecordingSoundService {
    fn play(&self, tone: Tone, volume: u8) {
        if volume > 0 {
            self.played.borrow_mut().push(tone);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_cue_is_low_and_square() {
        assert!(Tone::Error.frequency_hz() < Tone::Open.frequency_hz());
        assert_eq!(Tone::Error.waveform(), ToneWaveform::Square);
    }

    #[test]
    fn volume_gain_is_clamped() {
        assert_eq!(volume_to_gain(0), 0.0);
        assert_eq!(volume_to_gain(100), volume_to_gain(250));
        assert!(volume_to_gain(100) <= 0.25);
    }

    #[test]
    fn recording_service_skips_muted_playback() {
        let sound = RecordingSoundService::default();
        let sound_obj: &dyn SoundService = &sound;
        sound_obj.play(Tone::Open, 60);
        sound_obj.play(Tone::Close, 0);
        sound_obj.play(Tone::Unlock, 10);
        assert_eq!(sound.played(), vec![Tone::Open, Tone::Unlock]);
    }
}
