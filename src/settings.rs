//! Player preferences
//!
//! Built once at startup (defaults, optionally overridden from JSON) and
//! kept in memory for the run.

use anyhow::{Context, Result, ensure};
use serde::{Deserialize, Serialize};

use crate::input::KeyBindings;

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Audio ===
    /// Master volume (0.0 - 1.0)
    pub master_volume: f32,
    /// Sound effects volume (0.0 - 1.0)
    pub sfx_volume: f32,
    /// Disable all audio
    pub muted: bool,
    /// Mute when window loses focus
    pub mute_on_blur: bool,

    // === Controls ===
    pub key_bindings: KeyBindings,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            master_volume: 0.8,
            sfx_volume: 0.7,
            muted: false,
            mute_on_blur: true,
            key_bindings: KeyBindings::default(),
        }
    }
}

impl Settings {
    /// Parse a JSON override document; absent fields keep their defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        let value: serde_json::Value = serde_json::from_str(json).context("malformed settings")?;
        ensure!(value.is_object(), "settings must be a JSON object");
        let mut settings: Self = serde_json::from_value(value).context("malformed settings")?;
        settings.master_volume = settings.master_volume.clamp(0.0, 1.0);
        settings.sfx_volume = settings.sfx_volume.clamp(0.0, 1.0);
        Ok(settings)
    }

    /// Volume a cue should play at (0 when muted)
    pub fn effective_volume(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            self.master_volume * self.sfx_volume
        }
    }
}
