//! The jumping player
//!
//! The player bounces automatically: gravity pulls it down until the next step
//! would cross its landing threshold (`ground`), at which point the vertical
//! velocity resets to the jump impulse.

use serde::{Deserialize, Serialize};

use super::entity::{Entity, Rect};
use crate::config::GameConfig;

/// Which way the sprite faces (cosmetic only)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Facing {
    #[default]
    Left,
    Right,
}

/// Sprite variant to draw for the player
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerSprite {
    pub facing: Facing,
    pub shielded: bool,
}

/// Vertical motion phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlayerState {
    Rising,
    Falling,
    Dead,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub rect: Rect,
    /// Horizontal velocity (pixels per frame)
    pub dx: i32,
    /// Vertical velocity (pixels per frame, positive is down)
    pub vy: i32,
    /// Bottom edge the player may not fall past
    pub ground: i32,
    pub facing: Facing,
    alive: bool,
    immune: bool,
    immunity_counter: u32,
}

impl Player {
    /// Player at its session start position
    pub fn new(config: &GameConfig) -> Self {
        Self::at(
            config,
            config.play_height - config.fall_margin,
            config.play_width / 2,
            config.play_height - config.player_start_lift,
        )
    }

    /// Player with an explicit landing threshold and position
    pub fn at(config: &GameConfig, ground: i32, center_x: i32, bottom: i32) -> Self {
        let mut rect = Rect::sized(config.sizes.player);
        rect.set_center_x(center_x);
        rect.set_bottom(bottom);
        Self {
            rect,
            dx: 0,
            vy: config.jump_velocity,
            ground,
            facing: Facing::Left,
            alive: true,
            immune: false,
            immunity_counter: 0,
        }
    }

    pub fn is_alive(&self) -> bool {
        self.alive
    }

    pub fn is_immune(&self) -> bool {
        self.immune
    }

    pub fn immunity_counter(&self) -> u32 {
        self.immunity_counter
    }

    pub fn state(&self) -> PlayerState {
        if !self.alive {
            PlayerState::Dead
        } else if self.vy < 0 {
            PlayerState::Rising
        } else {
            PlayerState::Falling
        }
    }

    pub fn sprite(&self) -> PlayerSprite {
        PlayerSprite {
            facing: self.facing,
            shielded: self.immune,
        }
    }

    /// Set horizontal velocity; a non-zero value also turns the sprite
    pub fn change_direction(&mut self, dx: i32) {
        self.dx = dx;
        if dx > 0 {
            self.facing = Facing::Right;
        } else if dx < 0 {
            self.facing = Facing::Left;
        }
    }

    /// Grant (or revoke) monster immunity, restarting the timer
    pub fn set_immunity(&mut self, immune: bool) {
        self.immune = immune;
        self.immunity_counter = 0;
    }

    /// Death is permanent for the session
    pub fn kill(&mut self) {
        if self.alive {
            log::debug!("Player killed at bottom={}", self.rect.bottom());
        }
        self.alive = false;
    }

    /// Advance physics by one frame
    pub fn update(&mut self, config: &GameConfig) {
        if !self.alive {
            return;
        }

        if self.rect.bottom() >= config.play_height {
            self.kill();
            return;
        }

        let next_bottom = self.rect.bottom() + self.vy;
        if next_bottom <= self.ground {
            self.rect.set_bottom(next_bottom);
            self.vy += config.gravity;
        } else {
            self.vy = config.jump_velocity;
        }

        self.rect.pos.x += self.dx;
        if self.rect.center_x() < 0 {
            self.rect.set_center_x(config.play_width);
        } else if self.rect.center_x() > config.play_width {
            self.rect.set_center_x(0);
        }

        if self.immune {
            self.immunity_counter += 1;
            if self.immunity_counter >= config.immunity_frames {
                self.immunity_counter = 0;
                self.immune = false;
            }
        }
    }
}

impl Entity for Player {
    fn rect(&self) -> Rect {
        self.rect
    }

    fn visible(&self) -> bool {
        self.alive
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_spawn_position() {
        let config = GameConfig::default();
        let player = Player::new(&config);
        assert_eq!(player.rect.center_x(), 210);
        assert_eq!(player.rect.bottom(), 590);
        assert_eq!(player.ground, 620);
        assert_eq!(player.vy, -23);
        assert_eq!(player.state(), PlayerState::Rising);
    }

    #[test]
    fn test_bounce_when_ground_blocks() {
        let config = GameConfig::default();
        let mut player = Player::at(&config, 400, 200, 395);
        player.vy = 10;
        player.update(&config);
        assert_eq!(player.vy, -23);
        assert_eq!(player.rect.bottom(), 395);

        player.update(&config);
        assert_eq!(player.rect.bottom(), 372);
        assert_eq!(player.vy, -21);
    }

    #[test]
    fn test_landing_exactly_on_ground_moves() {
        let config = GameConfig::default();
        let mut player = Player::at(&config, 400, 200, 395);
        player.vy = 5;
        player.update(&config);
        assert_eq!(player.rect.bottom(), 400);
        assert_eq!(player.vy, 7);
    }

    #[test]
    fn test_dies_below_view() {
        let config = GameConfig::default();
        let mut player = Player::at(&config, 700, 200, 640);
        player.update(&config);
        assert!(!player.is_alive());
        assert_eq!(player.state(), PlayerState::Dead);

        // Dead players stay put
        let before = player.rect;
        player.update(&config);
        assert_eq!(player.rect, before);
        assert!(!player.is_alive());
    }

    #[test]
    fn test_horizontal_wrap() {
        let config = GameConfig::default();
        let mut player = Player::at(&config, 620, 5, 300);
        player.change_direction(-10);
        player.update(&config);
        assert_eq!(player.rect.center_x(), 420);
        assert_eq!(player.facing, Facing::Left);

        player.change_direction(10);
        player.update(&config);
        assert_eq!(player.rect.center_x(), 0);
        assert_eq!(player.facing, Facing::Right);
    }

    #[test]
    fn test_dx_applies_while_bouncing() {
        let config = GameConfig::default();
        let mut player = Player::at(&config, 400, 200, 400);
        player.vy = 4;
        player.change_direction(10);
        player.update(&config);
        assert_eq!(player.vy, -23);
        assert_eq!(player.rect.center_x(), 210);
    }

    #[test]
    fn test_stop_keeps_facing() {
        let config = GameConfig::default();
        let mut player = Player::new(&config);
        player.change_direction(10);
        player.change_direction(0);
        assert_eq!(player.dx, 0);
        assert_eq!(player.facing, Facing::Right);
    }

    #[test]
    fn test_immunity_lasts_300_frames() {
        let config = GameConfig::default();
        let mut player = Player::at(&config, 400, 200, 300);
        player.change_direction(10);
        player.set_immunity(true);
        assert_eq!(
            player.sprite(),
            PlayerSprite {
                facing: Facing::Right,
                shielded: true
            }
        );

        for _ in 0..299 {
            player.update(&config);
        }
        assert!(player.is_immune());

        player.update(&config);
        assert!(!player.is_immune());
        assert!(!player.sprite().shielded);
        assert_eq!(player.sprite().facing, Facing::Right);
    }

    #[test]
    fn test_reimmunity_resets_timer() {
        let config = GameConfig::default();
        let mut player = Player::at(&config, 400, 200, 300);
        player.set_immunity(true);
        for _ in 0..200 {
            player.update(&config);
        }
        player.set_immunity(true);
        assert_eq!(player.immunity_counter(), 0);
        for _ in 0..299 {
            player.update(&config);
        }
        assert!(player.is_immune());
    }

    proptest! {
        #[test]
        fn prop_velocity_is_bounce_or_gravity(
            bottom in 0i32..639,
            ground in 0i32..700,
            vy in -23i32..40,
            dx in prop::sample::select(vec![-10, 0, 10]),
        ) {
            let config = GameConfig::default();
            let mut player = Player::at(&config, ground, 200, bottom);
            player.vy = vy;
            player.change_direction(dx);
            player.update(&config);
            prop_assert!(player.vy == -23 || player.vy == vy + 2);
        }

        #[test]
        fn prop_center_stays_in_play_width(start in 0i32..=420, frames in 1usize..200) {
            let config = GameConfig::default();
            let mut player = Player::at(&config, 400, start, 350);
            player.change_direction(10);
            for _ in 0..frames {
                player.update(&config);
                prop_assert!((0..=420).contains(&player.rect.center_x()));
            }
        }
    }
}
