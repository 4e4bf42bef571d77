//! Audio feedback via Web Audio
//!
//! One procedural effect: a short filtered noise burst per accepted swing,
//! synthesized on the fly, no sample files. If the AudioContext cannot be
//! created the feature is disabled and gameplay continues silently.

#[cfg(target_arch = "wasm32")]
use web_sys::{AudioContext, AudioContextState, BiquadFilterType};

/// Length of the slap burst in seconds
#[allow(dead_code)]
const SLAP_DURATION: f32 = 0.08;

pub struct AudioManager {
    enabled: bool,
    #[cfg(target_arch = "wasm32")]
    ctx: Option<AudioContext>,
}

impl Default for AudioManager {
    fn default() -> Self {
        Self::new()
    }
}

impl AudioManager {
    #[cfg(target_arch = "wasm32")]
    pub fn new() -> Self {
        let ctx = AudioContext::new().ok();
        if ctx.is_none() {
            log::warn!("Failed to create AudioContext - audio disabled");
        }
        Self { enabled: true, ctx }
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn new() -> Self {
        Self { enabled: true }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Flip the user toggle; returns the new state.
    pub fn toggle(&mut self) -> bool {
        self.enabled = !self.enabled;
        if self.enabled {
            self.unlock();
        }
        self.enabled
    }

    /// Resume the context after a user gesture (autoplay policy).
    #[cfg(target_arch = "wasm32")]
    pub fn unlock(&self) {
        if let Some(ctx) = &self.ctx {
            if ctx.state() == AudioContextState::Suspended {
                let _ = ctx.resume();
            }
        }
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn unlock(&self) {}

    /// Fire the slap burst; no-op when disabled or unavailable.
    #[cfg(target_arch = "wasm32")]
    pub fn play_slap(&self) {
        if !self.enabled {
            return;
        }
        let Some(ctx) = &self.ctx else { return };
        if ctx.state() == AudioContextState::Suspended {
            let _ = ctx.resume();
        }
        if Self::play_slap_on(ctx).is_none() {
            log::warn!("Slap playback failed");
        }
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn play_slap(&self) {}

    /// White noise with a fast decay envelope, high-passed so it reads as a
    /// plastic slap rather than a thud.
    #[cfg(target_arch = "wasm32")]
    fn play_slap_on(ctx: &AudioContext) -> Option<()> {
        let sample_rate = ctx.sample_rate();
        let frames = (SLAP_DURATION * sample_rate) as u32;
        let buffer = ctx.create_buffer(1, frames, sample_rate).ok()?;

        let mut data = vec![0.0f32; frames as usize];
        for (i, sample) in data.iter_mut().enumerate() {
            let t = i as f32 / frames as f32;
            let envelope = (-20.0 * t).exp();
            *sample = (js_sys::Math::random() as f32 * 2.0 - 1.0) * envelope;
        }
        buffer.copy_to_channel(&mut data, 0).ok()?;

        let source = ctx.create_buffer_source().ok()?;
        source.set_buffer(Some(&buffer));
        let filter = ctx.create_biquad_filter().ok()?;
        filter.set_type(BiquadFilterType::Highpass);
        filter.frequency().set_value(600.0);
        let gain = ctx.create_gain().ok()?;
        gain.gain().set_value(0.5);

        source.connect_with_audio_node(&filter).ok()?;
        filter.connect_with_audio_node(&gain).ok()?;
        gain.connect_with_audio_node(&ctx.destination()).ok()?;
        source.start().ok()?;
        Some(())
    }
}
