//! Collectibles: score stars and shield power-ups
//!
//! Both drift down with the world and reappear far above the view once
//! collected or missed. They share the positional contract but nothing else.

use serde::{Deserialize, Serialize};

use super::entity::{
    random_bottom, random_left, Entity, FrameCycle, Rect, Recycle, Scrolling, SimRng,
};
use crate::config::GameConfig;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Star {
    pub rect: Rect,
    animation: FrameCycle,
    scroll: i32,
}

impl Star {
    pub fn new(config: &GameConfig, rng: &mut SimRng) -> Self {
        let mut star = Self {
            rect: Rect::sized(config.sizes.star),
            animation: FrameCycle::default(),
            scroll: 0,
        };
        star.respawn(config, rng);
        star
    }

    /// Star at a fixed spot (title screen)
    pub fn showcase(config: &GameConfig, center_x: i32, bottom: i32) -> Self {
        let mut rect = Rect::sized(config.sizes.star);
        rect.set_center_x(center_x);
        rect.set_bottom(bottom);
        Self {
            rect,
            animation: FrameCycle::default(),
            scroll: 0,
        }
    }

    pub fn frame(&self) -> u8 {
        self.animation.frame()
    }
}

impl Entity for Star {
    fn rect(&self) -> Rect {
        self.rect
    }
}

impl Scrolling for Star {
    fn apply_scroll(&mut self, delta: i32) {
        self.scroll = delta;
    }

    fn scroll(&self) -> i32 {
        self.scroll
    }

    fn update(&mut self, config: &GameConfig, rng: &mut SimRng) {
        self.animation.advance(config.animation_cadence);
        self.rect.pos.y += self.scroll;
        if self.below_view(config) {
            self.respawn(config, rng);
        }
    }
}

impl Recycle for Star {
    fn respawn(&mut self, config: &GameConfig, rng: &mut SimRng) {
        self.rect.set_bottom(random_bottom(rng, config.spawns.star));
        self.rect
            .set_left(random_left(rng, config.play_width, self.rect.width()));
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Shield {
    pub rect: Rect,
    scroll: i32,
}

impl Shield {
    pub fn new(config: &GameConfig, rng: &mut SimRng) -> Self {
        let mut rect = Rect::sized(config.sizes.shield);
        rect.set_left(random_left(rng, config.play_width, rect.width()));
        rect.set_bottom(random_bottom(rng, config.spawns.shield_initial));
        Self { rect, scroll: 0 }
    }
}

impl Entity for Shield {
    fn rect(&self) -> Rect {
        self.rect
    }
}

impl Scrolling for Shield {
    fn apply_scroll(&mut self, delta: i32) {
        self.scroll = delta;
    }

    fn scroll(&self) -> i32 {
        self.scroll
    }

    fn update(&mut self, config: &GameConfig, rng: &mut SimRng) {
        self.rect.pos.y += self.scroll;
        if self.below_view(config) {
            self.respawn(config, rng);
        }
    }
}

impl Recycle for Shield {
    fn respawn(&mut self, config: &GameConfig, rng: &mut SimRng) {
        self.rect
            .set_bottom(random_bottom(rng, config.spawns.shield_respawn));
        self.rect
            .set_left(random_left(rng, config.play_width, self.rect.width()));
    }
}
