//! Attract-screen scene: a player bouncing on a landmark cloud next to an
//! animated star and monster. Nothing scrolls and nothing collides.

use rand::SeedableRng;

use super::cloud::Cloud;
use super::entity::{Scrolling, SimRng};
use super::monster::Monster;
use super::pickup::Star;
use super::player::Player;
use crate::config::GameConfig;

/// Layout slot of the title-screen cloud
pub const SHOWCASE_CLOUD_SLOT: usize = 13;

#[derive(Debug, Clone)]
pub struct Showcase {
    pub config: GameConfig,
    rng: SimRng,
    pub player: Player,
    pub cloud: Cloud,
    pub star: Option<Star>,
    pub monster: Option<Monster>,
}

impl Showcase {
    /// Title-screen scene (with star and monster)
    pub fn title(config: &GameConfig, seed: u64) -> Self {
        let mut scene = Self::score_screen(config, seed);
        scene.star = Some(Star::showcase(config, 310, 300));
        scene.monster = Some(Monster::showcase(config, 80, 355));
        scene
    }

    /// Score-screen scene (player and cloud only)
    pub fn score_screen(config: &GameConfig, seed: u64) -> Self {
        let mut rng = SimRng::seed_from_u64(seed);
        let cloud = Cloud::new(SHOWCASE_CLOUD_SLOT, config, &mut rng);
        Self {
            config: config.clone(),
            player: Player::at(config, 550, 300, 550),
            cloud,
            star: None,
            monster: None,
            rng,
        }
    }

    pub fn update(&mut self) {
        self.player.update(&self.config);
        if let Some(star) = &mut self.star {
            star.update(&self.config, &mut self.rng);
        }
        if let Some(monster) = &mut self.monster {
            monster.update(&self.config, &mut self.rng);
        }
    }
}
