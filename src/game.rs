//! Host-side game driver
//!
//! Owns the session and its collaborators and runs one host frame at a
//! time: input, fixed-step simulation, audio cues, then the scene. Both the
//! browser build and the native demo drive this.

use crate::audio::{self, CuePlayer};
use crate::input::{Action, InputState};
use crate::platform::FrameClock;
use crate::renderer::{Scene, draw_frame};
use crate::settings::Settings;
use crate::sim::{GameEvent, GameState, LoopControl, tick};
use crate::tuning::GameConfig;

pub struct Game {
    pub state: GameState,
    pub settings: Settings,
    pub input: InputState,
    pub scene: Scene,
    clock: FrameClock,
    cues: Box<dyn CuePlayer>,
    /// Events drained during the most recent host frame
    events: Vec<GameEvent>,
    running: bool,
}

impl Game {
    pub fn new(
        config: GameConfig,
        settings: Settings,
        cues: Box<dyn CuePlayer>,
        seed: u64,
        now_ms: f64,
    ) -> Self {
        let clock = FrameClock::new(&config);
        let scene = Scene::new(&config);
        Self {
            state: GameState::new(config, seed, now_ms as u64),
            settings,
            input: InputState::default(),
            scene,
            clock,
            cues,
            events: Vec::new(),
            running: true,
        }
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// What the simulation reported during the last `frame` call
    pub fn events(&self) -> &[GameEvent] {
        &self.events
    }

    /// Route a raw key-down through the bindings
    pub fn key_down(&mut self, key: &str) -> bool {
        match self.settings.key_bindings.action_for(key) {
            Some(action) => {
                self.input.key_down(action);
                true
            }
            None => false,
        }
    }

    pub fn key_up(&mut self, key: &str) {
        if let Some(action) = self.settings.key_bindings.action_for(key) {
            self.input.key_up(action);
        }
    }

    /// Window focus changed
    pub fn set_focused(&mut self, focused: bool) {
        if !focused {
            self.input.release_all();
            self.clock.resync();
        }
        if self.settings.mute_on_blur {
            self.cues.set_muted(!focused);
        }
    }

    /// Run one host frame at `now_ms`; the scene holds the result afterwards.
    pub fn frame(&mut self, now_ms: f64) -> LoopControl {
        if !self.running {
            return LoopControl::Quit;
        }

        self.events.clear();
        let steps = self.clock.advance(now_ms);
        for _ in 0..steps {
            let input = self.input.take_tick_input(now_ms as u64);
            if tick(&mut self.state, &input) == LoopControl::Quit {
                self.running = false;
                return LoopControl::Quit;
            }
        }

        self.events = self.state.drain_events();
        audio::play_event_cues(&self.events, self.cues.as_ref());
        for event in &self.events {
            if let GameEvent::GameOver { score } = event {
                log::info!("Run over after {} frames, score {}", self.state.frame, score);
            }
        }

        self.scene.clear();
        draw_frame(&self.state, &mut self.scene);
        LoopControl::Continue
    }

    /// Press and immediately release an action (used by the demo driver)
    pub fn tap(&mut self, action: Action) {
        self.input.key_down(action);
        self.input.key_up(action);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::SilentCues;
    use crate::sim::FallingObject;
    use glam::Vec2;

    fn game() -> Game {
        Game::new(
            GameConfig::default(),
            Settings::default(),
            Box::new(SilentCues),
            5,
            0.0,
        )
    }

    #[test]
    fn test_frame_draws_hud() {
        let mut game = game();
        assert_eq!(game.frame(0.0), LoopControl::Continue);
        assert_eq!(game.state.frame, 1);
        assert_eq!(game.scene.texts[0].text, "Score: 0");
    }

    #[test]
    fn test_escape_quits() {
        let mut game = game();
        game.frame(0.0);
        assert!(game.key_down("Escape"));
        assert_eq!(game.frame(20.0), LoopControl::Quit);
        assert!(!game.is_running());
        assert_eq!(game.frame(40.0), LoopControl::Quit);
    }

    #[test]
    fn test_game_over_reported_once_across_idle_frames() {
        let mut game = game();
        game.frame(0.0);
        for _ in 0..6 {
            let id = game.state.next_entity_id();
            game.state.objects.push(FallingObject::new(
                id,
                Vec2::new(0.0, 595.0),
                Vec2::new(40.0, 60.0),
                7,
            ));
        }

        game.frame(20.0);
        assert!(game.state.is_over());
        assert!(game.events().contains(&GameEvent::GameOver { score: 0 }));

        // Same timestamp again: no simulation step, nothing new to report
        game.frame(20.0);
        assert!(game.state.is_over());
        assert!(game.events().is_empty());
    }

    #[test]
    fn test_unbound_keys_ignored() {
        let mut game = game();
        assert!(!game.key_down("F13"));
    }

    #[test]
    fn test_blur_releases_held_keys() {
        let mut game = game();
        game.frame(0.0);
        let start = game.state.player.body.pos.x;
        game.key_down("ArrowRight");
        game.set_focused(false);
        game.frame(20.0);
        assert_eq!(game.state.player.body.pos.x, start);
    }
}
