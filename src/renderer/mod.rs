//! Rendering
//!
//! The simulation is drawn through the `Renderer` trait. `draw_frame` fixes
//! the per-frame order; `Scene` tessellates it into vertices and HUD text,
//! and `RenderState` uploads those with WebGPU.

pub mod pipeline;
pub mod scene;
pub mod shapes;
pub mod vertex;

pub use pipeline::RenderState;
pub use scene::{Scene, TextItem};

use glam::Vec2;

use crate::sim::{Aabb, GameState};

/// Which placeholder art to draw for an entity
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sprite {
    Player,
    FallingObject,
}

/// HUD font sizes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextSize {
    Small,
    Medium,
    Large,
}

impl TextSize {
    /// Font size in logical pixels
    pub fn px(&self) -> f32 {
        match self {
            TextSize::Small => 24.0,
            TextSize::Medium => 36.0,
            TextSize::Large => 48.0,
        }
    }
}

/// Horizontal anchoring of a text position
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextAlign {
    /// Position is the top-left corner
    Left,
    /// Position is the center of the text box
    Center,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextStyle {
    pub size: TextSize,
    pub align: TextAlign,
}

impl TextStyle {
    pub const fn new(size: TextSize, align: TextAlign) -> Self {
        Self { size, align }
    }
}

/// Draw target for one frame
pub trait Renderer {
    fn draw_background(&mut self);
    fn draw_entity(&mut self, sprite: Sprite, bounds: Aabb);
    fn draw_text(&mut self, text: &str, pos: Vec2, style: TextStyle);
    /// Full-screen tint; `opacity` in 0-1
    fn draw_overlay(&mut self, color: [f32; 3], opacity: f32);
}

/// Game over dimming
const OVERLAY_COLOR: [f32; 3] = [0.0, 0.0, 0.0];
const OVERLAY_OPACITY: f32 = 128.0 / 255.0;

/// Compose a frame: background, entities, HUD, then the game over screen
pub fn draw_frame<R: Renderer + ?Sized>(state: &GameState, renderer: &mut R) {
    let screen = state.config().screen_size();
    let hud = TextStyle::new(TextSize::Small, TextAlign::Left);

    renderer.draw_background();

    renderer.draw_entity(Sprite::Player, state.player.rect());
    for obj in &state.objects {
        renderer.draw_entity(Sprite::FallingObject, obj.rect());
    }

    renderer.draw_text(&format!("Score: {}", state.score), Vec2::new(10.0, 10.0), hud);
    renderer.draw_text(
        &format!("Missed: {}/{}", state.missed, state.max_missed()),
        Vec2::new(10.0, 40.0),
        hud,
    );

    if state.is_over() {
        let mid = screen / 2.0;
        renderer.draw_overlay(OVERLAY_COLOR, OVERLAY_OPACITY);
        renderer.draw_text(
            "GAME OVER",
            Vec2::new(mid.x, mid.y - 50.0),
            TextStyle::new(TextSize::Large, TextAlign::Center),
        );
        renderer.draw_text(
            &format!("Final Score: {}", state.score),
            Vec2::new(mid.x, mid.y + 20.0),
            TextStyle::new(TextSize::Medium, TextAlign::Center),
        );
        renderer.draw_text(
            "Press ENTER to play again or ESC to quit",
            Vec2::new(mid.x, mid.y + 80.0),
            TextStyle::new(TextSize::Small, TextAlign::Center),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::{FallingObject, GamePhase};
    use crate::tuning::GameConfig;

    /// Records calls in order
    #[derive(Default)]
    struct Recorder {
        calls: Vec<String>,
    }

    impl Renderer for Recorder {
        fn draw_background(&mut self) {
            self.calls.push("background".into());
        }

        fn draw_entity(&mut self, sprite: Sprite, _bounds: Aabb) {
            self.calls.push(format!("entity:{sprite:?}"));
        }

        fn draw_text(&mut self, text: &str, _pos: Vec2, _style: TextStyle) {
            self.calls.push(format!("text:{text}"));
        }

        fn draw_overlay(&mut self, _color: [f32; 3], _opacity: f32) {
            self.calls.push("overlay".into());
        }
    }

    fn state_with_one_object() -> GameState {
        let mut state = GameState::new(GameConfig::default(), 1, 0);
        let id = state.next_entity_id();
        state.objects.push(FallingObject::new(
            id,
            Vec2::new(10.0, 10.0),
            Vec2::new(40.0, 60.0),
            3,
        ));
        state
    }

    #[test]
    fn test_playing_frame_order() {
        let state = state_with_one_object();
        let mut rec = Recorder::default();
        draw_frame(&state, &mut rec);
        assert_eq!(
            rec.calls,
            vec![
                "background",
                "entity:Player",
                "entity:FallingObject",
                "text:Score: 0",
                "text:Missed: 0/6",
            ]
        );
    }

    #[test]
    fn test_game_over_frame_adds_overlay_and_three_lines() {
        let mut state = state_with_one_object();
        state.score = 4;
        state.missed = 6;
        state.phase = GamePhase::GameOver;
        let mut rec = Recorder::default();
        draw_frame(&state, &mut rec);
        assert_eq!(
            rec.calls[5..],
            [
                "overlay",
                "text:GAME OVER",
                "text:Final Score: 4",
                "text:Press ENTER to play again or ESC to quit",
            ]
        );
    }
}
