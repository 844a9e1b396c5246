//! Audio cues
//!
//! Simulation events map to fire-and-forget sound effects. On the web they
//! are synthesized with the Web Audio API, so no sound files are needed.

#[cfg(target_arch = "wasm32")]
use web_sys::{AudioContext, GainNode, OscillatorNode, OscillatorType};

use crate::sim::GameEvent;

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEffect {
    /// Upward impulse
    Jump,
    /// Unshielded bomb hit
    Hit,
    /// Gem collected
    Gem,
    /// Shield power-up collected
    Shield,
    /// Health power-up collected
    Health,
    /// Round ended
    GameOver,
}

impl SoundEffect {
    /// The cue for a simulation event
    pub fn for_event(event: &GameEvent) -> Self {
        match event {
            GameEvent::Jump => SoundEffect::Jump,
            GameEvent::BombHit { .. } => SoundEffect::Hit,
            GameEvent::GemCollected { .. } => SoundEffect::Gem,
            GameEvent::ShieldCollected => SoundEffect::Shield,
            GameEvent::HealthCollected => SoundEffect::Health,
            GameEvent::GameOver => SoundEffect::GameOver,
        }
    }
}

/// Audio manager for the game
#[cfg(target_arch = "wasm32")]
pub struct AudioManager {
    ctx: Option<AudioContext>,
    volume: f32,
}

#[cfg(target_arch = "wasm32")]
impl AudioManager {
    pub fn new(settings: &crate::Settings) -> Self {
        // Try to create audio context (may fail if not in secure context)
        let ctx = AudioContext::new().ok();
        if ctx.is_none() {
            log::warn!("Failed to create AudioContext - audio disabled");
        }
        Self {
            ctx,
            volume: settings.effective_volume(),
        }
    }

    /// Apply changed preferences
    pub fn apply_settings(&mut self, settings: &crate::Settings) {
        self.volume = settings.effective_volume();
    }

    /// Play a sound effect
    pub fn play(&self, effect: SoundEffect) {
        let vol = self.volume;
        if vol <= 0.0 {
            return;
        }

        let Some(ctx) = &self.ctx else { return };

        // Resume context if suspended (browsers require user gesture)
        if ctx.state() == web_sys::AudioContextState::Suspended {
            let _ = ctx.resume();
        }

        match effect {
            SoundEffect::Jump => self.play_sweep(ctx, vol * 0.3, 220.0, 660.0, 0.15),
            SoundEffect::Hit => self.play_sweep(ctx, vol * 0.6, 180.0, 50.0, 0.25),
            SoundEffect::Gem => self.play_arpeggio(ctx, vol * 0.25, &[800.0, 1000.0, 1300.0], 0.06),
            SoundEffect::Shield => self.play_arpeggio(ctx, vol * 0.25, &[400.0, 600.0, 900.0], 0.08),
            SoundEffect::Health => self.play_arpeggio(ctx, vol * 0.25, &[500.0, 700.0, 700.0], 0.1),
            SoundEffect::GameOver => {
                self.play_arpeggio(ctx, vol * 0.3, &[400.0, 350.0, 300.0, 200.0], 0.2)
            }
        }
    }

    /// Create an oscillator with gain envelope
    fn create_osc(
        &self,
        ctx: &AudioContext,
        freq: f32,
        osc_type: OscillatorType,
    ) -> Option<(OscillatorNode, GainNode)> {
        let osc = ctx.create_oscillator().ok()?;
        let gain = ctx.create_gain().ok()?;

        osc.set_type(osc_type);
        osc.frequency().set_value(freq);
        osc.connect_with_audio_node(&gain).ok()?;
        gain.connect_with_audio_node(&ctx.destination()).ok()?;

        Some((osc, gain))
    }

    /// Single tone gliding from `from` to `to` Hz
    fn play_sweep(&self, ctx: &AudioContext, vol: f32, from: f32, to: f32, secs: f64) {
        let Some((osc, gain)) = self.create_osc(ctx, from, OscillatorType::Triangle) else {
            return;
        };
        let t = ctx.current_time();

        gain.gain().set_value_at_time(vol, t).ok();
        gain.gain()
            .exponential_ramp_to_value_at_time(0.01, t + secs)
            .ok();
        osc.frequency().set_value_at_time(from, t).ok();
        osc.frequency()
            .exponential_ramp_to_value_at_time(to, t + secs)
            .ok();

        osc.start().ok();
        osc.stop_with_when(t + secs + 0.05).ok();
    }

    /// Short notes played one after another
    fn play_arpeggio(&self, ctx: &AudioContext, vol: f32, freqs: &[f32], step: f64) {
        for (i, freq) in freqs.iter().enumerate() {
            let delay = i as f64 * step;
            if let Some((osc, gain)) = self.create_osc(ctx, *freq, OscillatorType::Sine) {
                let t = ctx.current_time() + delay;
                gain.gain().set_value_at_time(vol, t).ok();
                gain.gain()
                    .exponential_ramp_to_value_at_time(0.01, t + step * 1.5)
                    .ok();
                osc.start_with_when(t).ok();
                osc.stop_with_when(t + step * 2.0).ok();
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_event_has_a_cue() {
        let cases = [
            (GameEvent::Jump, SoundEffect::Jump),
            (GameEvent::BombHit { health: 25 }, SoundEffect::Hit),
            (GameEvent::GemCollected { value: 10 }, SoundEffect::Gem),
            (GameEvent::ShieldCollected, SoundEffect::Shield),
            (GameEvent::HealthCollected, SoundEffect::Health),
            (GameEvent::GameOver, SoundEffect::GameOver),
        ];
        for (event, effect) in cases {
            assert_eq!(SoundEffect::for_event(&event), effect);
        }
    }
}
