//! Catch detection and scoring
//!
//! Every falling object overlapping the player this frame is consumed:
//! one point, one growth step and one `Caught` event each.

use super::entity::Aabb;
use super::state::{FallingObject, GameEvent, GameState};

/// IDs of the objects whose boxes overlap `player`
pub fn detect_catches(player: &Aabb, objects: &[FallingObject]) -> Vec<u32> {
    objects
        .iter()
        .filter(|obj| obj.rect().overlaps(player))
        .map(|obj| obj.id)
        .collect()
}

/// Remove caught objects and apply their rewards. Returns the catch count.
///
/// All hits are judged against the player's box as it was before this
/// frame's growth.
pub fn resolve_catches(state: &mut GameState) -> u32 {
    let player = state.player.rect();
    let caught = detect_catches(&player, &state.objects);
    if caught.is_empty() {
        return 0;
    }

    state.objects.retain(|obj| !caught.contains(&obj.id));
    for &id in &caught {
        state.score += 1;
        state.player.grow();
        state.events.push(GameEvent::Caught {
            id,
            score: state.score,
        });
        log::debug!(
            "Caught object {} (score {}, growth {:.2})",
            id,
            state.score,
            state.player.growth_factor
        );
    }

    caught.len() as u32
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tuning::GameConfig;
    use glam::Vec2;

    fn banana(state: &mut GameState, x: f32, y: f32) -> u32 {
        let id = state.next_entity_id();
        state
            .objects
            .push(FallingObject::new(id, Vec2::new(x, y), Vec2::new(40.0, 60.0), 3));
        id
    }

    fn state_with_player_at(x: f32) -> GameState {
        let mut state = GameState::new(GameConfig::default(), 1, 0);
        state.player.body.pos.x = x;
        state
    }

    #[test]
    fn test_catch_scores_and_grows() {
        // Player box (380, 480, 80, 100)
        let mut state = state_with_player_at(380.0);
        assert_eq!(state.player.rect().top(), 480.0);
        let id = banana(&mut state, 390.0, 500.0);

        assert_eq!(resolve_catches(&mut state), 1);
        assert!(state.objects.is_empty());
        assert_eq!(state.score, 1);
        assert!((state.player.growth_factor - 1.05).abs() < 1e-6);
        assert_eq!(state.events, vec![GameEvent::Caught { id, score: 1 }]);
    }

    #[test]
    fn test_multiple_catches_in_one_frame() {
        let mut state = state_with_player_at(380.0);
        banana(&mut state, 370.0, 470.0);
        banana(&mut state, 420.0, 520.0);
        let far = banana(&mut state, 10.0, 500.0);

        assert_eq!(resolve_catches(&mut state), 2);
        assert_eq!(state.score, 2);
        assert_eq!(state.player.catches, 2);
        assert!((state.player.growth_factor - 1.10).abs() < 1e-6);
        assert_eq!(state.objects.len(), 1);
        assert_eq!(state.objects[0].id, far);
    }

    #[test]
    fn test_no_overlap_no_catch() {
        let mut state = state_with_player_at(380.0);
        // Above the player's head, touching edge only
        banana(&mut state, 390.0, 420.0);

        assert_eq!(resolve_catches(&mut state), 0);
        assert_eq!(state.score, 0);
        assert_eq!(state.objects.len(), 1);
        assert!(state.events.is_empty());
    }

    #[test]
    fn test_detect_matches_exact_overlap_set() {
        let player = Aabb::from_pos_size(Vec2::new(100.0, 100.0), Vec2::new(50.0, 50.0));
        let objects = vec![
            FallingObject::new(1, Vec2::new(140.0, 140.0), Vec2::new(20.0, 20.0), 3),
            FallingObject::new(2, Vec2::new(150.0, 120.0), Vec2::new(20.0, 20.0), 3),
            FallingObject::new(3, Vec2::new(80.0, 80.0), Vec2::new(21.0, 21.0), 3),
            FallingObject::new(4, Vec2::new(80.0, 80.0), Vec2::new(20.0, 20.0), 3),
        ];
        assert_eq!(detect_catches(&player, &objects), vec![1, 3]);
    }
}
