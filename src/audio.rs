//! Audio cues
//!
//! Procedurally generated sound effects - no external files needed!
//! The game only knows the `CuePlayer` capability; which implementation
//! backs it is decided once at startup.

use crate::settings::Settings;
use crate::sim::GameEvent;

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cue {
    /// Falling object caught
    Catch,
    /// Run ended
    GameOver,
}

impl Cue {
    /// Cue for a simulation event, if it has one
    pub fn for_event(event: &GameEvent) -> Option<Cue> {
        match event {
            GameEvent::Caught { .. } => Some(Cue::Catch),
            GameEvent::GameOver { .. } => Some(Cue::GameOver),
            GameEvent::Missed { .. } | GameEvent::Restarted => None,
        }
    }
}

/// Fire-and-forget sound output. Implementations swallow their own failures.
pub trait CuePlayer {
    fn play_cue(&self, cue: Cue);

    /// Temporarily silence output (e.g. window blurred)
    fn set_muted(&mut self, _muted: bool) {}
}

/// Plays nothing
#[derive(Debug, Default, Clone, Copy)]
pub struct SilentCues;

impl CuePlayer for SilentCues {
    fn play_cue(&self, cue: Cue) {
        log::trace!("Silent cue {:?}", cue);
    }
}

/// Play the cues for a batch of events; returns how many were triggered
pub fn play_event_cues(events: &[GameEvent], player: &dyn CuePlayer) -> usize {
    let mut played = 0;
    for cue in events.iter().filter_map(Cue::for_event) {
        player.play_cue(cue);
        played += 1;
    }
    played
}

/// Pick the audio backend for this run
pub fn select_cue_player(settings: &Settings) -> Box<dyn CuePlayer> {
    if settings.effective_volume() <= 0.0 {
        log::info!("Audio muted - using silent cues");
        return Box::new(SilentCues);
    }

    #[cfg(target_arch = "wasm32")]
    {
        match web::WebAudioCues::new(settings.effective_volume()) {
            Some(cues) => return Box::new(cues),
            None => log::warn!("Failed to create AudioContext - audio disabled"),
        }
    }

    #[cfg(not(target_arch = "wasm32"))]
    {
        log::info!("No native audio backend - using silent cues");
    }

    Box::new(SilentCues)
}

#[cfg(target_arch = "wasm32")]
pub use web::WebAudioCues;

#[cfg(target_arch = "wasm32")]
mod web {
    use web_sys::{AudioContext, GainNode, OscillatorNode, OscillatorType};

    use super::{Cue, CuePlayer};

    /// Web Audio oscillator cues
    pub struct WebAudioCues {
        ctx: AudioContext,
        volume: f32,
        muted: bool,
    }

    impl WebAudioCues {
        /// None when the browser refuses an audio context
        pub fn new(volume: f32) -> Option<Self> {
            let ctx = AudioContext::new().ok()?;
            Some(Self {
                ctx,
                volume,
                muted: false,
            })
        }

        /// Create an oscillator with gain envelope
        fn create_osc(&self, freq: f32, osc_type: OscillatorType) -> Option<(OscillatorNode, GainNode)> {
            let osc = self.ctx.create_oscillator().ok()?;
            let gain = self.ctx.create_gain().ok()?;

            osc.set_type(osc_type);
            osc.frequency().set_value(freq);
            osc.connect_with_audio_node(&gain).ok()?;
            gain.connect_with_audio_node(&self.ctx.destination()).ok()?;

            Some((osc, gain))
        }

        /// Catch - quick rising two-note chirp
        fn play_catch(&self, vol: f32) {
            for (i, freq) in [660.0, 990.0].iter().enumerate() {
                let delay = i as f64 * 0.06;
                if let Some((osc, gain)) = self.create_osc(*freq, OscillatorType::Sine) {
                    let t = self.ctx.current_time() + delay;
                    gain.gain().set_value_at_time(vol * 0.3, t).ok();
                    gain.gain()
                        .exponential_ramp_to_value_at_time(0.01, t + 0.12)
                        .ok();
                    osc.start_with_when(t).ok();
                    osc.stop_with_when(t + 0.15).ok();
                }
            }
        }

        /// Game over - sad descending
        fn play_game_over(&self, vol: f32) {
            for (i, freq) in [400.0, 350.0, 300.0, 200.0].iter().enumerate() {
                let delay = i as f64 * 0.2;
                if let Some((osc, gain)) = self.create_osc(*freq, OscillatorType::Triangle) {
                    let t = self.ctx.current_time() + delay;
                    gain.gain().set_value_at_time(vol * 0.3, t).ok();
                    gain.gain()
                        .exponential_ramp_to_value_at_time(0.01, t + 0.3)
                        .ok();
                    osc.start_with_when(t).ok();
                    osc.stop_with_when(t + 0.4).ok();
                }
            }
        }
    }

    impl CuePlayer for WebAudioCues {
        fn play_cue(&self, cue: Cue) {
            if self.muted || self.volume <= 0.0 {
                return;
            }

            // Resume context if suspended (browsers require user gesture)
            if self.ctx.state() == web_sys::AudioContextState::Suspended {
                let _ = self.ctx.resume();
            }

            match cue {
                Cue::Catch => self.play_catch(self.volume),
                Cue::GameOver => self.play_game_over(self.volume),
            }
        }

        fn set_muted(&mut self, muted: bool) {
            self.muted = muted;
        }
    }
}
