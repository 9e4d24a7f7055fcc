//! Data-driven game balance
//!
//! `params` holds the stock values; `GameConfig` is the immutable context
//! built once at startup and handed to the simulation and the renderer.

use anyhow::{Context, Result, ensure};
use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Stock tuning values
pub mod params {
    /// Logical screen size in pixels
    pub const SCREEN_WIDTH: f32 = 800.0;
    pub const SCREEN_HEIGHT: f32 = 600.0;
    /// Distance between the player's feet and the bottom of the screen
    pub const GROUND_OFFSET: f32 = 20.0;

    /// Player defaults
    pub const PLAYER_WIDTH: f32 = 80.0;
    pub const PLAYER_HEIGHT: f32 = 100.0;
    /// Pixels per frame while a direction key is held
    pub const PLAYER_SPEED: f32 = 8.0;
    /// Growth factor increment per catch
    pub const GROWTH_STEP: f32 = 0.05;

    /// Falling object defaults
    pub const OBJECT_WIDTH: f32 = 40.0;
    pub const OBJECT_HEIGHT: f32 = 60.0;
    /// Spawn height range (above the visible area)
    pub const SPAWN_Y_MIN: i32 = -100;
    pub const SPAWN_Y_MAX: i32 = -40;
    /// Descent speed range in pixels per frame (inclusive)
    pub const DESCENT_SPEED_MIN: u32 = 3;
    pub const DESCENT_SPEED_MAX: u32 = 7;

    /// Spawn pacing in milliseconds
    pub const SPAWN_DELAY_INITIAL_MS: u64 = 1500;
    pub const SPAWN_DELAY_STEP_MS: u64 = 10;
    pub const SPAWN_DELAY_FLOOR_MS: u64 = 500;

    /// Misses allowed before the run ends
    pub const MAX_MISSED: u32 = 6;

    /// Simulation frames per second (velocities are per frame)
    pub const FRAME_RATE: u32 = 60;
    /// Maximum substeps per host frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 4;
}

/// Immutable game configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub screen_width: f32,
    pub screen_height: f32,
    pub ground_offset: f32,
    pub player_width: f32,
    pub player_height: f32,
    pub player_speed: f32,
    pub growth_step: f32,
    pub object_width: f32,
    pub object_height: f32,
    pub spawn_y_min: i32,
    pub spawn_y_max: i32,
    pub descent_speed_min: u32,
    pub descent_speed_max: u32,
    pub spawn_delay_initial_ms: u64,
    pub spawn_delay_step_ms: u64,
    pub spawn_delay_floor_ms: u64,
    pub max_missed: u32,
    pub frame_rate: u32,
    pub max_substeps: u32,
}

impl Default for GameConfig {
    fn default() -> Self {
        use params::*;
        Self {
            screen_width: SCREEN_WIDTH,
            screen_height: SCREEN_HEIGHT,
            ground_offset: GROUND_OFFSET,
            player_width: PLAYER_WIDTH,
            player_height: PLAYER_HEIGHT,
            player_speed: PLAYER_SPEED,
            growth_step: GROWTH_STEP,
            object_width: OBJECT_WIDTH,
            object_height: OBJECT_HEIGHT,
            spawn_y_min: SPAWN_Y_MIN,
            spawn_y_max: SPAWN_Y_MAX,
            descent_speed_min: DESCENT_SPEED_MIN,
            descent_speed_max: DESCENT_SPEED_MAX,
            spawn_delay_initial_ms: SPAWN_DELAY_INITIAL_MS,
            spawn_delay_step_ms: SPAWN_DELAY_STEP_MS,
            spawn_delay_floor_ms: SPAWN_DELAY_FLOOR_MS,
            max_missed: MAX_MISSED,
            frame_rate: FRAME_RATE,
            max_substeps: MAX_SUBSTEPS,
        }
    }
}

impl GameConfig {
    /// Parse a JSON override document; absent fields keep their defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        let value: serde_json::Value = serde_json::from_str(json).context("malformed game config")?;
        // Derived visitors would also take a positional array
        ensure!(value.is_object(), "game config must be a JSON object");
        let config: Self = serde_json::from_value(value).context("malformed game config")?;
        config.validate()?;
        Ok(config)
    }

    /// Reject geometry and ranges the simulation cannot run with
    pub fn validate(&self) -> Result<()> {
        ensure!(
            self.screen_width > 0.0 && self.screen_height > 0.0,
            "screen must have a non-zero size, got {}x{}",
            self.screen_width,
            self.screen_height
        );
        ensure!(
            self.ground_offset >= 0.0 && self.ground_offset < self.screen_height,
            "ground offset {} must lie inside the screen",
            self.ground_offset
        );
        ensure!(
            self.player_width > 0.0 && self.player_height > 0.0,
            "player must have a non-zero size"
        );
        ensure!(
            self.player_width <= self.screen_width
                && self.player_height <= self.screen_height - self.ground_offset,
            "player {}x{} does not fit on screen",
            self.player_width,
            self.player_height
        );
        ensure!(
            self.object_width > 0.0 && self.object_height > 0.0,
            "falling objects must have a non-zero size"
        );
        ensure!(
            self.object_width <= self.screen_width,
            "falling object width {} exceeds screen width {}",
            self.object_width,
            self.screen_width
        );
        ensure!(
            self.spawn_y_min <= self.spawn_y_max,
            "spawn height range {}..={} is empty",
            self.spawn_y_min,
            self.spawn_y_max
        );
        ensure!(
            self.descent_speed_min > 0 && self.descent_speed_min <= self.descent_speed_max,
            "descent speed range {}..={} is invalid",
            self.descent_speed_min,
            self.descent_speed_max
        );
        ensure!(
            self.spawn_delay_floor_ms <= self.spawn_delay_initial_ms,
            "spawn delay floor {}ms exceeds initial delay {}ms",
            self.spawn_delay_floor_ms,
            self.spawn_delay_initial_ms
        );
        ensure!(self.max_missed > 0, "max_missed must be at least 1");
        ensure!(self.growth_step >= 0.0, "growth step must not shrink the player");
        ensure!(
            self.frame_rate > 0 && self.max_substeps > 0,
            "frame rate and substep cap must be positive"
        );
        Ok(())
    }

    /// Logical screen size
    pub fn screen_size(&self) -> Vec2 {
        Vec2::new(self.screen_width, self.screen_height)
    }

    /// Y coordinate the player's lower edge is pinned to
    pub fn ground_line(&self) -> f32 {
        self.screen_height - self.ground_offset
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        let config = GameConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.ground_line(), 580.0);
        assert_eq!(config.screen_size(), Vec2::new(800.0, 600.0));
    }

    #[test]
    fn test_partial_override_keeps_defaults() {
        let config = GameConfig::from_json(r#"{ "max_missed": 3, "screen_width": 1024 }"#)
            .expect("valid override");
        assert_eq!(config.max_missed, 3);
        assert_eq!(config.screen_width, 1024.0);
        assert_eq!(config.screen_height, params::SCREEN_HEIGHT);
        assert_eq!(config.spawn_delay_initial_ms, params::SPAWN_DELAY_INITIAL_MS);
    }

    #[test]
    fn test_zero_sized_screen_rejected() {
        let err = GameConfig::from_json(r#"{ "screen_width": 0 }"#).unwrap_err();
        assert!(err.to_string().contains("non-zero size"));
    }

    #[test]
    fn test_inverted_ranges_rejected() {
        let config = GameConfig {
            descent_speed_min: 8,
            descent_speed_max: 3,
            ..Default::default()
        };
        assert!(config.validate().is_err());

        let config = GameConfig {
            spawn_y_min: 0,
            spawn_y_max: -10,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_malformed_json_has_context() {
        let err = GameConfig::from_json("{ not json").unwrap_err();
        assert!(format!("{err:#}").contains("malformed game config"));
    }

    #[test]
    fn test_array_document_rejected() {
        let err = GameConfig::from_json("[800, 600]").unwrap_err();
        assert!(err.to_string().contains("JSON object"));
    }
}
