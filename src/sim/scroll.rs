//! World scrolling
//!
//! The player's screen position never climbs past the trigger line; instead,
//! landing on a high cloud scrolls the whole world down, which reads as the
//! player ascending. The same pass decides which cloud (if any) the player is
//! standing on.

use super::cloud::Cloud;
use super::entity::Entity;
use super::player::Player;
use crate::config::GameConfig;

/// Decide this frame's scroll delta and update the player's landing threshold.
///
/// Returns `None` when no decision is made (the player is rising, or falling
/// with no cloud underneath); entities then keep the delta they last received.
pub fn coordinate(player: &mut Player, clouds: &[Cloud], config: &GameConfig) -> Option<i32> {
    if player.vy <= 0 {
        return None;
    }

    let player_rect = player.rect();
    let mut cloud_height: Option<i32> = None;

    for cloud in clouds.iter().filter(|c| c.rect.intersects(&player_rect)) {
        if player_rect.bottom() > cloud.rect.top() {
            let center = cloud.rect.center_y();
            if player_rect.bottom() <= center {
                player.ground = center;
            }
            cloud_height = Some(match cloud_height {
                Some(height) => height.min(cloud.rect.top()),
                None => cloud.rect.top(),
            });
        }
    }

    match cloud_height {
        Some(height) if height < config.scroll_trigger_line => Some(config.scroll_speed),
        Some(_) => Some(0),
        None => {
            player.ground = config.free_fall_ground();
            None
        }
    }
}
