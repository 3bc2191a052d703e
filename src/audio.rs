//! Audio system using Web Audio API
//!
//! Both cues are a single oscillator stepping through a few pitches under a
//! decaying gain envelope. The tone tables are plain data so they can be
//! checked without a browser.

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEffect {
    /// Answer cleared at least one drop
    Correct,
    /// Answer matched nothing, or a drop escaped
    Wrong,
}

/// Oscillator waveform, mirrors the Web Audio types we use
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Waveform {
    Sine,
    Square,
}

/// One oscillator cue: pitch steps and a gain envelope
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tone {
    pub waveform: Waveform,
    /// (offset seconds, frequency Hz), first entry at 0.0
    pub steps: &'static [(f64, f32)],
    /// Starting gain before the volume scale
    pub peak_gain: f32,
    /// Gain ramps exponentially to `END_GAIN` over this many seconds
    pub duration: f64,
}

/// Exponential ramps cannot reach zero
pub const END_GAIN: f32 = 0.01;

/// C5, E5, G5 rising
const CORRECT_TONE: Tone = Tone {
    waveform: Waveform::Sine,
    steps: &[(0.0, 523.25), (0.1, 659.25), (0.2, 783.99)],
    peak_gain: 0.15,
    duration: 0.3,
};

/// G4 down to G3
const WRONG_TONE: Tone = Tone {
    waveform: Waveform::Square,
    steps: &[(0.0, 392.0), (0.15, 196.0)],
    peak_gain: 0.1,
    duration: 0.25,
};

impl SoundEffect {
    pub fn tone(&self) -> &'static Tone {
        match self {
            SoundEffect::Correct => &CORRECT_TONE,
            SoundEffect::Wrong => &WRONG_TONE,
        }
    }
}

#[cfg(target_arch = "wasm32")]
pub use web::AudioManager;

#[cfg(target_arch = "wasm32")]
mod web {
    use web_sys::{AudioContext, AudioContextState, GainNode, OscillatorNode, OscillatorType};

    use super::{END_GAIN, SoundEffect, Tone, Waveform};
    use crate::settings::Settings;

    /// Audio manager for the game
    pub struct AudioManager {
        ctx: Option<AudioContext>,
        volume: f32,
    }

    impl AudioManager {
        pub fn new(settings: &Settings) -> Self {
            // May fail outside a secure context
            let ctx = AudioContext::new().ok();
            if ctx.is_none() {
                log::warn!("Failed to create AudioContext - audio disabled");
            }
            Self {
                ctx,
                volume: settings.effective_volume(),
            }
        }

        /// Play a sound effect
        pub fn play(&self, effect: SoundEffect) {
            if self.volume <= 0.0 {
                return;
            }
            let Some(ctx) = &self.ctx else { return };

            // Browsers keep the context suspended until a user gesture
            if ctx.state() == AudioContextState::Suspended {
                let _ = ctx.resume();
            }

            self.play_tone(ctx, effect.tone());
        }

        fn play_tone(&self, ctx: &AudioContext, tone: &Tone) {
            let Some(&(_, first)) = tone.steps.first() else {
                return;
            };
            let Some((osc, gain)) = create_osc(ctx, first, tone.waveform) else {
                return;
            };
            let t = ctx.current_time();

            for &(offset, freq) in tone.steps {
                osc.frequency().set_value_at_time(freq, t + offset).ok();
            }
            let peak = (tone.peak_gain * self.volume).max(END_GAIN);
            gain.gain().set_value_at_time(peak, t).ok();
            gain.gain()
                .exponential_ramp_to_value_at_time(END_GAIN, t + tone.duration)
                .ok();

            osc.start_with_when(t).ok();
            osc.stop_with_when(t + tone.duration).ok();
        }
    }

    /// Create an oscillator routed through its own gain node
    fn create_osc(
        ctx: &AudioContext,
        freq: f32,
        waveform: Waveform,
    ) -> Option<(OscillatorNode, GainNode)> {
        let osc = ctx.create_oscillator().ok()?;
        let gain = ctx.create_gain().ok()?;

        osc.set_type(match waveform {
            Waveform::Sine => OscillatorType::Sine,
            Waveform::Square => OscillatorType::Square,
        });
        osc.frequency().set_value(freq);
        osc.connect_with_audio_node(&gain).ok()?;
        gain.connect_with_audio_node(&ctx.destination()).ok()?;

        Some((osc, gain))
    }
}
