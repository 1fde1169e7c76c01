//! Demo-mode steering
//!
//! Keeps the player above the nearest cloud below it and fires whenever the
//! monster is straight overhead. Good enough for attract mode and soak tests.

use super::entity::Entity;
use super::state::GameState;
use super::tick::Steer;

/// How far off-centre the player may drift before steering kicks in
const DEAD_ZONE: i32 = 12;

/// Pick a direction for the next frame
pub fn steer(state: &GameState) -> Steer {
    let player = state.player.rect();
    let target = state
        .clouds
        .iter()
        .filter(|c| c.rect.top() >= player.bottom() - 4 && c.rect.top() < state.config.play_height)
        .min_by_key(|c| c.rect.top() - player.bottom());

    let Some(cloud) = target else {
        return Steer::Stop;
    };

    let offset = cloud.rect.center_x() - player.center_x();
    if offset > DEAD_ZONE {
        Steer::Right
    } else if offset < -DEAD_ZONE {
        Steer::Left
    } else {
        Steer::Stop
    }
}

/// Fire when the monster is on screen above the player and lined up
pub fn should_fire(state: &GameState) -> bool {
    let player = state.player.rect();
    let monster = state.monster.rect();
    monster.bottom() > 0
        && monster.bottom() < player.top()
        && monster.left() < player.center_x()
        && player.center_x() < monster.right()
        && state.bullets.is_empty()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameConfig;

    #[test]
    fn test_steers_toward_cloud_below() {
        let mut state = GameState::new(GameConfig::default(), 9);
        state.player.rect.set_center_x(100);
        state.player.rect.set_bottom(300);
        for cloud in &mut state.clouds {
            cloud.rect.set_top(-100);
        }
        state.clouds[0].rect.set_top(350);
        state.clouds[0].rect.set_left(250);
        assert_eq!(steer(&state), Steer::Right);

        state.clouds[0].rect.set_left(0);
        assert_eq!(steer(&state), Steer::Left);

        state.clouds[0].rect.set_center_x(105);
        assert_eq!(steer(&state), Steer::Stop);
    }

    #[test]
    fn test_fires_at_monster_overhead() {
        let mut state = GameState::new(GameConfig::default(), 9);
        state.player.rect.set_center_x(200);
        state.player.rect.set_bottom(500);
        state.monster.rect.set_center_x(200);
        state.monster.rect.set_bottom(200);
        assert!(should_fire(&state));

        state.monster.rect.set_bottom(-50);
        assert!(!should_fire(&state));
    }
}
