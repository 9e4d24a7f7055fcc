//! Time-gated falling object factory
//!
//! Each spawn shortens the delay before the next one, down to a floor.

use glam::Vec2;
use rand::Rng;

use super::state::FallingObject;
use crate::tuning::GameConfig;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Spawner {
    /// Current minimum interval between spawns
    pub delay_ms: u64,
    /// Timestamp of the most recent spawn (or session start)
    pub last_spawn_ms: u64,
    step_ms: u64,
    floor_ms: u64,
}

impl Spawner {
    pub fn new(config: &GameConfig, now_ms: u64) -> Self {
        Self {
            delay_ms: config.spawn_delay_initial_ms,
            last_spawn_ms: now_ms,
            step_ms: config.spawn_delay_step_ms,
            floor_ms: config.spawn_delay_floor_ms,
        }
    }

    /// Returns true (and advances the schedule) when a spawn is due at `now_ms`
    pub fn ready(&mut self, now_ms: u64) -> bool {
        if now_ms.saturating_sub(self.last_spawn_ms) <= self.delay_ms {
            return false;
        }
        self.last_spawn_ms = now_ms;
        self.delay_ms = self
            .delay_ms
            .saturating_sub(self.step_ms)
            .max(self.floor_ms);
        true
    }

    /// Create a new falling object if the delay has elapsed
    pub fn maybe_spawn<R: Rng>(
        &mut self,
        now_ms: u64,
        id: u32,
        rng: &mut R,
        config: &GameConfig,
    ) -> Option<FallingObject> {
        if !self.ready(now_ms) {
            return None;
        }
        Some(random_object(id, rng, config))
    }
}

/// Random column, staggered height above the screen, random speed
pub fn random_object<R: Rng>(id: u32, rng: &mut R, config: &GameConfig) -> FallingObject {
    let max_x = (config.screen_width - config.object_width).floor().max(0.0) as i32;
    let x = rng.random_range(0..=max_x) as f32;
    let y = rng.random_range(config.spawn_y_min..=config.spawn_y_max) as f32;
    let speed = rng.random_range(config.descent_speed_min..=config.descent_speed_max);
    FallingObject::new(
        id,
        Vec2::new(x, y),
        Vec2::new(config.object_width, config.object_height),
        speed,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_spawn_waits_for_delay() {
        let config = GameConfig::default();
        let mut spawner = Spawner::new(&config, 1_000);
        let mut rng = Pcg32::seed_from_u64(1);

        // Exactly the delay is not enough
        assert!(spawner.maybe_spawn(2_500, 1, &mut rng, &config).is_none());
        assert!(spawner.maybe_spawn(2_501, 1, &mut rng, &config).is_some());
        assert_eq!(spawner.last_spawn_ms, 2_501);
        assert_eq!(spawner.delay_ms, 1_490);

        // Immediately after a spawn nothing is due
        assert!(spawner.maybe_spawn(2_600, 2, &mut rng, &config).is_none());
    }

    #[test]
    fn test_delay_floor() {
        let config = GameConfig::default();
        let mut spawner = Spawner::new(&config, 0);
        let mut now = 0;
        for _ in 0..500 {
            now += spawner.delay_ms + 1;
            assert!(spawner.ready(now));
        }
        assert_eq!(spawner.delay_ms, config.spawn_delay_floor_ms);
    }

    #[test]
    fn test_objects_within_ranges() {
        let config = GameConfig::default();
        let mut rng = Pcg32::seed_from_u64(42);
        for id in 0..1_000 {
            let obj = random_object(id, &mut rng, &config);
            let rect = obj.rect();
            assert!(rect.left() >= 0.0);
            assert!(rect.right() <= config.screen_width);
            assert!((-100.0..=-40.0).contains(&rect.top()));
            assert!((3..=7).contains(&obj.descent_speed));
            assert_eq!(obj.body.vel, Vec2::new(0.0, obj.descent_speed as f32));
        }
    }

    proptest! {
        #[test]
        fn prop_delay_after_k_spawns(k in 0u64..300) {
            let config = GameConfig::default();
            let mut spawner = Spawner::new(&config, 0);
            let mut now = 0;
            let mut previous = spawner.delay_ms;
            for _ in 0..k {
                now += spawner.delay_ms + 1;
                prop_assert!(spawner.ready(now));
                prop_assert!(spawner.delay_ms <= previous);
                previous = spawner.delay_ms;
            }
            let expected = config
                .spawn_delay_initial_ms
                .saturating_sub(config.spawn_delay_step_ms * k)
                .max(config.spawn_delay_floor_ms);
            prop_assert_eq!(spawner.delay_ms, expected);
        }
    }
}
