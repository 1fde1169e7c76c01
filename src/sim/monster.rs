//! The patrolling monster and the bullets that can shoot it

use serde::{Deserialize, Serialize};

use super::entity::{
    random_bottom, random_left, Entity, FrameCycle, Rect, Recycle, Scrolling, SimRng,
};
use crate::config::GameConfig;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Monster {
    pub rect: Rect,
    animation: FrameCycle,
    scroll: i32,
}

impl Monster {
    /// Monster waiting somewhere above the opening screen
    pub fn new(config: &GameConfig, rng: &mut SimRng) -> Self {
        let mut rect = Rect::sized(config.sizes.monster);
        rect.set_left(random_left(rng, config.play_width, rect.width()));
        rect.set_bottom(random_bottom(rng, config.spawns.monster_initial));
        Self {
            rect,
            animation: FrameCycle::default(),
            scroll: 0,
        }
    }

    /// Monster at a fixed spot (title screen)
    pub fn showcase(config: &GameConfig, center_x: i32, bottom: i32) -> Self {
        let mut rect = Rect::sized(config.sizes.monster);
        rect.set_center_x(center_x);
        rect.set_bottom(bottom);
        Self {
            rect,
            animation: FrameCycle::default(),
            scroll: 0,
        }
    }

    /// Animation frame (0 is the rest pose, then 1..=3 loop)
    pub fn frame(&self) -> u8 {
        self.animation.frame()
    }
}

impl Entity for Monster {
    fn rect(&self) -> Rect {
        self.rect
    }
}

impl Scrolling for Monster {
    fn apply_scroll(&mut self, delta: i32) {
        self.scroll = delta;
    }

    fn scroll(&self) -> i32 {
        self.scroll
    }

    fn update(&mut self, config: &GameConfig, rng: &mut SimRng) {
        self.animation.advance(config.animation_cadence);

        if self.rect.left() < config.play_width {
            self.rect.pos.x += config.monster_drift;
        } else {
            self.rect.set_right(0);
        }

        self.rect.pos.y += self.scroll;
        if self.below_view(config) {
            self.respawn(config, rng);
        }
    }
}

impl Recycle for Monster {
    fn respawn(&mut self, config: &GameConfig, rng: &mut SimRng) {
        self.rect
            .set_bottom(random_bottom(rng, config.spawns.monster_respawn));
        self.rect
            .set_left(random_left(rng, config.play_width, self.rect.width()));
        log::debug!("Monster respawned at bottom={}", self.rect.bottom());
    }
}

/// A shot fired straight up from the player's feet
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Bullet {
    pub rect: Rect,
}

impl Bullet {
    pub fn new(config: &GameConfig, center_x: i32, bottom: i32) -> Self {
        let mut rect = Rect::sized(config.sizes.bullet);
        rect.set_center_x(center_x);
        rect.set_bottom(bottom);
        Self { rect }
    }

    /// Move up one frame; returns false once the bullet has left the top
    pub fn update(&mut self, config: &GameConfig) -> bool {
        self.rect.pos.y -= config.bullet_speed;
        self.rect.bottom() >= 0
    }
}

impl Entity for Bullet {
    fn rect(&self) -> Rect {
        self.rect
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::SeedableRng;

    #[test]
    fn test_initial_placement_above_view() {
        let config = GameConfig::default();
        let mut rng = SimRng::seed_from_u64(3);
        for _ in 0..200 {
            let monster = Monster::new(&config, &mut rng);
            assert!(config.spawns.monster_initial.contains(monster.rect.bottom()));
            assert!(monster.rect.left() >= 0);
            assert!(monster.rect.right() <= config.play_width);
            assert_eq!(monster.frame(), 0);
        }
    }

    #[test]
    fn test_drifts_right_and_wraps() {
        let config = GameConfig::default();
        let mut rng = SimRng::seed_from_u64(3);
        let mut monster = Monster::showcase(&config, 100, 300);
        let left = monster.rect.left();
        monster.update(&config, &mut rng);
        assert_eq!(monster.rect.left(), left + 1);

        monster.rect.set_left(config.play_width);
        monster.update(&config, &mut rng);
        assert_eq!(monster.rect.right(), 0);
    }

    #[test]
    fn test_scrolls_with_world() {
        let config = GameConfig::default();
        let mut rng = SimRng::seed_from_u64(3);
        let mut monster = Monster::showcase(&config, 100, 300);
        monster.apply_scroll(8);
        monster.update(&config, &mut rng);
        assert_eq!(monster.rect.bottom(), 308);
    }

    #[test]
    fn test_recycles_after_leaving_bottom() {
        let config = GameConfig::default();
        let mut rng = SimRng::seed_from_u64(3);
        let mut monster = Monster::showcase(&config, 100, 300);
        monster.rect.set_top(config.play_height);
        monster.apply_scroll(8);
        monster.update(&config, &mut rng);
        assert!(config.spawns.monster_respawn.contains(monster.rect.bottom()));
    }

    #[test]
    fn test_bullet_flies_until_off_top() {
        let config = GameConfig::default();
        let mut bullet = Bullet::new(&config, 200, 100);
        assert_eq!(bullet.rect.center_x(), 200);
        assert!(bullet.update(&config));
        assert_eq!(bullet.rect.bottom(), 70);
        assert!(bullet.update(&config));
        assert!(bullet.update(&config));
        assert_eq!(bullet.rect.bottom(), 10);
        assert!(!bullet.update(&config));
    }

    proptest! {
        #[test]
        fn prop_double_respawn_stays_above_view(seed in any::<u64>()) {
            let config = GameConfig::default();
            let mut rng = SimRng::seed_from_u64(seed);
            let mut monster = Monster::new(&config, &mut rng);
            monster.rect.set_top(config.play_height + 1);
            prop_assert!(monster.below_view(&config));

            for _ in 0..2 {
                monster.respawn(&config, &mut rng);
                prop_assert!(config.spawns.monster_respawn.contains(monster.rect.bottom()));
                prop_assert!(monster.rect.bottom() <= -2000);
                prop_assert!(monster.rect.bottom() >= -10000);
                prop_assert!(monster.rect.left() >= 0);
                prop_assert!(monster.rect.left() <= config.play_width - monster.rect.width());
                prop_assert!(!monster.below_view(&config));
            }
        }
    }
}
