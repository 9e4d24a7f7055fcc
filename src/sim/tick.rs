//! Fixed timestep simulation tick
//!
//! One call advances the session by one frame: spawn, move, fall, catch,
//! then the game over check.

use super::collision::resolve_catches;
use super::state::{GameEvent, GamePhase, GameState};

/// Input commands for a single tick
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TickInput {
    /// Left movement key held
    pub left: bool,
    /// Right movement key held
    pub right: bool,
    /// Restart requested this frame (honoured only after game over)
    pub restart: bool,
    /// Quit requested this frame
    pub quit: bool,
    /// Idle/demo mode - autopilot steers the player
    pub idle_mode: bool,
    /// Monotonic host clock in milliseconds
    pub now_ms: u64,
}

/// Whether the host loop should keep running
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopControl {
    Continue,
    Quit,
}

/// Advance the game state by one frame
pub fn tick(state: &mut GameState, input: &TickInput) -> LoopControl {
    if input.quit {
        log::info!("Quit requested (score {})", state.score);
        return LoopControl::Quit;
    }

    if state.phase == GamePhase::GameOver {
        if input.restart {
            state.reset(input.now_ms);
            log::info!("Session restarted");
        }
        return LoopControl::Continue;
    }

    let (left, right) = if input.idle_mode {
        idle_steer(state)
    } else {
        (input.left, input.right)
    };

    state.frame += 1;

    // Spawn
    if let Some(id) = state.maybe_spawn(input.now_ms) {
        log::trace!("Spawned object {} (next delay {}ms)", id, state.spawner.delay_ms);
    }

    // Player
    state.player.steer(left, right);

    // Falling objects
    let screen_height = state.config().screen_height;
    let mut missed_ids = Vec::new();
    state.objects.retain_mut(|obj| {
        if obj.update(screen_height) {
            missed_ids.push(obj.id);
            false
        } else {
            true
        }
    });
    for id in missed_ids {
        state.missed += 1;
        state.events.push(GameEvent::Missed {
            id,
            missed: state.missed,
        });
        log::debug!("Missed object {} ({}/{})", id, state.missed, state.max_missed());
    }

    // Catches
    resolve_catches(state);

    // Game over check
    if state.missed >= state.max_missed() {
        state.phase = GamePhase::GameOver;
        state.events.push(GameEvent::GameOver { score: state.score });
        log::info!("Game over - final score {}", state.score);
    }

    LoopControl::Continue
}

/// Autopilot: chase the object closest to the ground
fn idle_steer(state: &GameState) -> (bool, bool) {
    let Some(target) = state
        .objects
        .iter()
        .max_by(|a, b| {
            a.rect()
                .bottom()
                .partial_cmp(&b.rect().bottom())
                .unwrap_or(std::cmp::Ordering::Equal)
        })
    else {
        return (false, false);
    };

    let player_x = state.player.rect().center().x;
    let target_x = target.rect().center().x;
    let dead_zone = state.player.speed / 2.0;
    (player_x > target_x + dead_zone, player_x < target_x - dead_zone)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::FallingObject;
    use crate::tuning::GameConfig;
    use glam::Vec2;

    fn frame(now_ms: u64) -> TickInput {
        TickInput {
            now_ms,
            ..Default::default()
        }
    }

    #[test]
    fn test_first_spawn_after_delay() {
        let mut state = GameState::new(GameConfig::default(), 12345, 0);
        tick(&mut state, &frame(1_000));
        assert!(state.objects.is_empty());

        tick(&mut state, &frame(1_501));
        assert_eq!(state.objects.len(), 1);
        assert_eq!(state.spawner.delay_ms, 1_490);
        assert_eq!(state.objects[0].id, 1);
    }

    #[test]
    fn test_miss_removes_and_counts() {
        let mut state = GameState::new(GameConfig::default(), 1, 0);
        let id = state.next_entity_id();
        state.objects.push(FallingObject::new(
            id,
            Vec2::new(100.0, 601.0),
            Vec2::new(40.0, 60.0),
            3,
        ));

        tick(&mut state, &frame(1));

        assert!(state.objects.is_empty());
        assert_eq!(state.missed, 1);
        assert_eq!(state.events, vec![GameEvent::Missed { id, missed: 1 }]);
        assert_eq!(state.phase, GamePhase::Playing);
    }

    #[test]
    fn test_held_keys_move_player() {
        let mut state = GameState::new(GameConfig::default(), 1, 0);
        let start = state.player.body.pos.x;
        let input = TickInput {
            left: true,
            now_ms: 1,
            ..Default::default()
        };
        tick(&mut state, &input);
        assert_eq!(state.player.body.pos.x, start - 8.0);
    }

    #[test]
    fn test_game_over_stops_updates() {
        let config = GameConfig {
            max_missed: 1,
            ..Default::default()
        };
        let mut state = GameState::new(config, 1, 0);
        let id = state.next_entity_id();
        state.objects.push(FallingObject::new(
            id,
            Vec2::new(0.0, 700.0),
            Vec2::new(40.0, 60.0),
            3,
        ));
        let id = state.next_entity_id();
        state.objects.push(FallingObject::new(
            id,
            Vec2::new(0.0, 0.0),
            Vec2::new(40.0, 60.0),
            3,
        ));

        tick(&mut state, &frame(1));
        assert!(state.is_over());
        let frozen = state.objects.clone();
        let frame_count = state.frame;

        // Long after the spawn delay, nothing moves or spawns
        tick(&mut state, &frame(10_000));
        assert_eq!(state.objects, frozen);
        assert_eq!(state.frame, frame_count);
    }

    #[test]
    fn test_restart_only_after_game_over() {
        let mut state = GameState::new(GameConfig::default(), 1, 0);
        state.score = 3;
        let input = TickInput {
            restart: true,
            now_ms: 1,
            ..Default::default()
        };
        tick(&mut state, &input);
        assert_eq!(state.score, 3);

        state.phase = GamePhase::GameOver;
        tick(&mut state, &input);
        assert_eq!(state.score, 0);
        assert_eq!(state.phase, GamePhase::Playing);
    }

    #[test]
    fn test_quit_from_either_phase() {
        let mut state = GameState::new(GameConfig::default(), 1, 0);
        let quit = TickInput {
            quit: true,
            ..Default::default()
        };
        assert_eq!(tick(&mut state, &quit), LoopControl::Quit);
        state.phase = GamePhase::GameOver;
        assert_eq!(tick(&mut state, &quit), LoopControl::Quit);
    }

    #[test]
    fn test_idle_mode_chases_lowest_object() {
        let mut state = GameState::new(GameConfig::default(), 1, 0);
        let id = state.next_entity_id();
        state.objects.push(FallingObject::new(
            id,
            Vec2::new(700.0, 100.0),
            Vec2::new(40.0, 60.0),
            3,
        ));
        let id = state.next_entity_id();
        state.objects.push(FallingObject::new(
            id,
            Vec2::new(10.0, 0.0),
            Vec2::new(40.0, 60.0),
            3,
        ));
        assert_eq!(idle_steer(&state), (false, true));
    }

    #[test]
    fn test_determinism() {
        let mut state1 = GameState::new(GameConfig::default(), 99999, 0);
        let mut state2 = GameState::new(GameConfig::default(), 99999, 0);

        for i in 0..600u64 {
            let input = TickInput {
                left: i % 7 == 0,
                right: i % 3 == 0,
                now_ms: i * 16,
                ..Default::default()
            };
            tick(&mut state1, &input);
            tick(&mut state2, &input);
        }

        assert_eq!(state1.score, state2.score);
        assert_eq!(state1.missed, state2.missed);
        assert_eq!(state1.objects, state2.objects);
        assert_eq!(state1.player, state2.player);
    }
}
