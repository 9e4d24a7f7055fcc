//! CPU-side frame builder
//!
//! Collects the vertices and HUD text for one frame in logical screen
//! pixels. The brick wall is tessellated once and reused.

use glam::Vec2;

use super::shapes;
use super::vertex::Vertex;
use super::{Renderer, Sprite, TextStyle};
use crate::sim::Aabb;
use crate::tuning::GameConfig;

/// A positioned line of HUD text
#[derive(Debug, Clone, PartialEq)]
pub struct TextItem {
    pub text: String,
    pub pos: Vec2,
    pub style: TextStyle,
}

pub struct Scene {
    screen: Vec2,
    background: Vec<Vertex>,
    pub vertices: Vec<Vertex>,
    pub texts: Vec<TextItem>,
}

impl Scene {
    pub fn new(config: &GameConfig) -> Self {
        let screen = config.screen_size();
        Self {
            screen,
            background: shapes::brick_wall(screen),
            vertices: Vec::new(),
            texts: Vec::new(),
        }
    }

    /// Logical screen size the vertices are expressed in
    pub fn screen(&self) -> Vec2 {
        self.screen
    }

    /// Drop last frame's contents
    pub fn clear(&mut self) {
        self.vertices.clear();
        self.texts.clear();
    }
}

impl Renderer for Scene {
    fn draw_background(&mut self) {
        self.vertices.extend_from_slice(&self.background);
    }

    fn draw_entity(&mut self, sprite: Sprite, bounds: Aabb) {
        let art = match sprite {
            Sprite::Player => shapes::minion(bounds),
            Sprite::FallingObject => shapes::banana(bounds),
        };
        self.vertices.extend(art);
    }

    fn draw_text(&mut self, text: &str, pos: Vec2, style: TextStyle) {
        self.texts.push(TextItem {
            text: text.to_string(),
            pos,
            style,
        });
    }

    fn draw_overlay(&mut self, color: [f32; 3], opacity: f32) {
        let [r, g, b] = color;
        self.vertices.extend(shapes::rect(
            Vec2::ZERO,
            self.screen,
            [r, g, b, opacity.clamp(0.0, 1.0)],
        ));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::draw_frame;
    use crate::sim::{GamePhase, GameState};

    #[test]
    fn test_frame_fills_scene_and_clears() {
        let config = GameConfig::default();
        let mut scene = Scene::new(&config);
        let state = GameState::new(config, 3, 0);

        draw_frame(&state, &mut scene);
        assert!(scene.vertices.len() > scene.background.len());
        assert_eq!(scene.texts.len(), 2);
        assert_eq!(scene.texts[0].text, "Score: 0");

        scene.clear();
        assert!(scene.vertices.is_empty());
        assert!(scene.texts.is_empty());
    }

    #[test]
    fn test_overlay_is_translucent_full_screen() {
        let config = GameConfig::default();
        let mut scene = Scene::new(&config);
        let mut state = GameState::new(config, 3, 0);
        state.phase = GamePhase::GameOver;

        draw_frame(&state, &mut scene);
        let overlay_color = scene
            .vertices
            .iter()
            .map(|v| v.color)
            .find(|c| c[3] < 1.0)
            .expect("overlay drawn");
        assert!((overlay_color[3] - 128.0 / 255.0).abs() < 1e-6);
        assert_eq!(scene.texts.len(), 5);
    }
}
