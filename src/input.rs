//! Keyboard bindings and per-frame input collection
//!
//! Hosts feed raw key names (DOM `KeyboardEvent.key` strings) in; the
//! simulation only ever sees a `TickInput`.

use serde::{Deserialize, Serialize};

use crate::sim::TickInput;

/// Logical game actions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Action {
    MoveLeft,
    MoveRight,
    Restart,
    Quit,
    /// Toggle demo mode
    ToggleIdle,
}

/// Key names bound to each action
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct KeyBindings {
    pub move_left: Vec<String>,
    pub move_right: Vec<String>,
    pub restart: Vec<String>,
    pub quit: Vec<String>,
    pub toggle_idle: Vec<String>,
}

impl Default for KeyBindings {
    fn default() -> Self {
        let keys = |names: &[&str]| names.iter().map(|s| s.to_string()).collect();
        Self {
            move_left: keys(&["ArrowLeft"]),
            move_right: keys(&["ArrowRight"]),
            restart: keys(&["Enter"]),
            quit: keys(&["Escape"]),
            toggle_idle: keys(&["i", "I"]),
        }
    }
}

impl KeyBindings {
    /// Action bound to `key`, if any
    pub fn action_for(&self, key: &str) -> Option<Action> {
        let table = [
            (&self.move_left, Action::MoveLeft),
            (&self.move_right, Action::MoveRight),
            (&self.restart, Action::Restart),
            (&self.quit, Action::Quit),
            (&self.toggle_idle, Action::ToggleIdle),
        ];
        table
            .into_iter()
            .find(|(keys, _)| keys.iter().any(|k| k == key))
            .map(|(_, action)| action)
    }
}

/// Held keys plus one-shot requests latched until the next frame
#[derive(Debug, Clone, Default)]
pub struct InputState {
    left_held: bool,
    right_held: bool,
    restart: bool,
    quit: bool,
    idle_mode: bool,
}

impl InputState {
    pub fn key_down(&mut self, action: Action) {
        match action {
            Action::MoveLeft => self.left_held = true,
            Action::MoveRight => self.right_held = true,
            Action::Restart => self.restart = true,
            Action::Quit => self.quit = true,
            Action::ToggleIdle => {
                self.idle_mode = !self.idle_mode;
                log::info!("Idle mode: {}", self.idle_mode);
            }
        }
    }

    pub fn key_up(&mut self, action: Action) {
        match action {
            Action::MoveLeft => self.left_held = false,
            Action::MoveRight => self.right_held = false,
            _ => {}
        }
    }

    /// Forget held keys (window lost focus, key-up events will never arrive)
    pub fn release_all(&mut self) {
        self.left_held = false;
        self.right_held = false;
    }

    pub fn idle_mode(&self) -> bool {
        self.idle_mode
    }

    /// Snapshot for one tick. One-shot requests are consumed.
    pub fn take_tick_input(&mut self, now_ms: u64) -> TickInput {
        let input = TickInput {
            left: self.left_held,
            right: self.right_held,
            restart: self.restart,
            quit: self.quit,
            idle_mode: self.idle_mode,
            now_ms,
        };
        self.restart = false;
        self.quit = false;
        input
    }
}
