//! Game state and core simulation types
//!
//! Everything one session needs lives in `GameState`; the host owns it and
//! hands it to `tick` once per frame.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::entity::{Aabb, Entity};
use super::spawner::Spawner;
use crate::tuning::GameConfig;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Objects fall, the player moves
    Playing,
    /// Too many misses; waiting for restart or quit
    GameOver,
}

/// Something the host should react to (audio cues, logging)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    /// A falling object was caught; `score` is the new total
    Caught { id: u32, score: u32 },
    /// A falling object left the screen; `missed` is the new total
    Missed { id: u32, missed: u32 },
    /// Miss threshold reached
    GameOver { score: u32 },
    /// Session was reset after a game over
    Restarted,
}

/// The player character
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub body: Entity,
    /// Size at growth factor 1.0
    pub base_size: Vec2,
    /// Horizontal pixels per frame
    pub speed: f32,
    /// 1.0 + growth_step * catches
    pub growth_factor: f32,
    pub growth_step: f32,
    pub catches: u32,
    arena_width: f32,
    ground_line: f32,
}

impl Player {
    /// Fresh player standing centered on the ground line
    pub fn new(config: &GameConfig) -> Self {
        let base_size = Vec2::new(config.player_width, config.player_height);
        let ground_line = config.ground_line();
        let pos = Vec2::new(
            (config.screen_width / 2.0).floor() - base_size.x / 2.0,
            ground_line - base_size.y,
        );
        let mut player = Self {
            body: Entity::new(pos, base_size),
            base_size,
            speed: config.player_speed,
            growth_factor: 1.0,
            growth_step: config.growth_step,
            catches: 0,
            arena_width: config.screen_width,
            ground_line,
        };
        player.clamp_to_screen();
        player
    }

    pub fn rect(&self) -> Aabb {
        self.body.rect()
    }

    pub fn move_left(&mut self) {
        self.steer(true, false);
    }

    pub fn move_right(&mut self) {
        self.steer(false, true);
    }

    /// Apply one frame of held-key movement. Both keys held cancel out.
    pub fn steer(&mut self, left: bool, right: bool) {
        let dir = f32::from(u8::from(right)) - f32::from(u8::from(left));
        self.body.vel = Vec2::new(dir * self.speed, 0.0);
        self.body.advance();
        self.clamp_to_screen();
    }

    /// Catch reward: scale up around the current center, feet stay on the ground.
    pub fn grow(&mut self) {
        let center = self.rect().center();
        self.catches += 1;
        self.growth_factor = 1.0 + self.growth_step * self.catches as f32;
        self.body.size = self.base_size * self.growth_factor;
        self.body.pos.x = center.x - self.body.size.x / 2.0;
        self.clamp_to_screen();
    }

    fn clamp_to_screen(&mut self) {
        // A player wider than the screen is pinned to the left edge
        let max_x = (self.arena_width - self.body.size.x).max(0.0);
        self.body.pos.x = self.body.pos.x.clamp(0.0, max_x);
        self.body.pos.y = self.ground_line - self.body.size.y;
    }
}

/// A falling collectible
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FallingObject {
    pub id: u32,
    pub body: Entity,
    /// Pixels per frame
    pub descent_speed: u32,
}

impl FallingObject {
    pub fn new(id: u32, pos: Vec2, size: Vec2, descent_speed: u32) -> Self {
        let mut body = Entity::new(pos, size);
        body.vel = Vec2::new(0.0, descent_speed as f32);
        Self {
            id,
            body,
            descent_speed,
        }
    }

    pub fn rect(&self) -> Aabb {
        self.body.rect()
    }

    /// Fall one frame. Returns true once the object is fully below the screen.
    pub fn update(&mut self, screen_height: f32) -> bool {
        self.body.advance();
        self.rect().top() > screen_height
    }
}

/// Complete session state
#[derive(Debug, Clone)]
pub struct GameState {
    config: GameConfig,
    /// Run seed for reproducibility
    pub seed: u64,
    pub rng: Pcg32,
    pub phase: GamePhase,
    pub score: u32,
    pub missed: u32,
    /// Simulation frame counter for the current session
    pub frame: u64,
    pub spawner: Spawner,
    pub player: Player,
    /// Live falling objects, order irrelevant
    pub objects: Vec<FallingObject>,
    /// Events produced since the host last drained them
    pub events: Vec<GameEvent>,
    next_id: u32,
}

impl GameState {
    /// Create a new session; `now_ms` seeds the spawn clock
    pub fn new(config: GameConfig, seed: u64, now_ms: u64) -> Self {
        let player = Player::new(&config);
        let spawner = Spawner::new(&config, now_ms);
        Self {
            config,
            seed,
            rng: Pcg32::seed_from_u64(seed),
            phase: GamePhase::Playing,
            score: 0,
            missed: 0,
            frame: 0,
            spawner,
            player,
            objects: Vec::new(),
            events: Vec::new(),
            next_id: 1,
        }
    }

    /// Restore every session field to its starting value.
    ///
    /// The RNG keeps streaming so consecutive sessions differ.
    pub fn reset(&mut self, now_ms: u64) {
        self.phase = GamePhase::Playing;
        self.score = 0;
        self.missed = 0;
        self.frame = 0;
        self.spawner = Spawner::new(&self.config, now_ms);
        self.player = Player::new(&self.config);
        self.objects.clear();
        self.next_id = 1;
        self.events.push(GameEvent::Restarted);
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn max_missed(&self) -> u32 {
        self.config.max_missed
    }

    pub fn is_over(&self) -> bool {
        self.phase == GamePhase::GameOver
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Run the spawner at `now_ms`; returns the new object's ID if one was created
    pub fn maybe_spawn(&mut self, now_ms: u64) -> Option<u32> {
        let id = self.next_id;
        let obj = self
            .spawner
            .maybe_spawn(now_ms, id, &mut self.rng, &self.config)?;
        self.next_id += 1;
        self.objects.push(obj);
        Some(id)
    }

    /// Take the pending events, leaving the queue empty
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}
