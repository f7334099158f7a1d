//! Web Audio tone synthesis for UI cues.

use platform_host::{SoundService, Tone};

#[derive(Debug, Clone, Copy, Default)]
/// Sound service that synthesizes each [`Tone`] with a single oscillator and a decaying gain.
///
/// Playback errors (no audio device, autoplay policy) are swallowed: cues are cosmetic.
pub struct WebSoundService;

impl SoundService for WebSoundService {
    fn play(&self, tone: Tone, volume: u8) {
        if volume == 0 {
            return;
        }

        #[cfg(target_arch = "wasm32")]
        {
            if let Err(err) = play_tone(tone, volume) {
                web_sys::console::debug_1(&err);
            }
        }

        #[cfg(not(target_arch = "wasm32"))]
        {
            let _ = tone;
        }
    }
}

#[cfg(target_arch = "wasm32")]
thread_local! {
    static AUDIO_CONTEXT: std::cell::RefCell<Option<web_sys::AudioContext>> =
        const { std::cell::RefCell::new(None) };
}

#[cfg(target_arch = "wasm32")]
fn shared_context() -> Result<web_sys::AudioContext, wasm_bindgen::JsValue> {
    AUDIO_CONTEXT.with(|slot| {
        if let Some(ctx) = slot.borrow().as_ref() {
            return Ok(ctx.clone());
        }
        let ctx = web_sys::AudioContext::new()?;
        *slot.borrow_mut() = Some(ctx.clone());
        Ok(ctx)
    })
}

#[cfg(target_arch = "wasm32")]
fn play_tone(tone: Tone, volume: u8) -> Result<(), wasm_bindgen::JsValue> {
    use platform_host::{volume_to_gain, ToneWaveform};
    use web_sys::OscillatorType;

    let ctx = shared_context()?;
    let oscillator = ctx.create_oscillator()?;
    oscillator.set_type(match tone.waveform() {
        ToneWaveform::Sine => OscillatorType::Sine,
        ToneWaveform::Triangle => OscillatorType::Triangle,
        ToneWaveform::Square => OscillatorType::Square,
    });
    oscillator.frequency().set_value(tone.frequency_hz());

    let gain = ctx.create_gain()?;
    let now = ctx.current_time();
    let end = now + f64::from(tone.duration_ms()) / 1000.0;
    gain.gain().set_value_at_time(volume_to_gain(volume), now)?;
    gain.gain().exponential_ramp_to_value_at_time(0.0001, end)?;

    oscillator.connect_with_audio_node(&gain)?;
    gain.connect_with_audio_node(&ctx.destination())?;
    oscillator.start()?;
    oscillator.stop_with_when(end)?;
    Ok(())
}
