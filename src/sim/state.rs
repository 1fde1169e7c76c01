//! Game state and session lifecycle
//!
//! Everything a frame reads or writes lives in [`GameState`]; renderers read
//! it directly and the tick function is the only writer.

use rand::SeedableRng;
use serde::{Deserialize, Serialize};

use super::cloud::{Cloud, Sky};
use super::entity::{Scrolling, SimRng};
use super::monster::{Bullet, Monster};
use super::pickup::{Shield, Star};
use super::player::Player;
use crate::config::GameConfig;
use crate::consts::SESSION_CLOUDS;

/// Current phase of a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Active gameplay
    Playing,
    /// Player fell off the bottom or touched the monster
    GameOver,
}

/// Something happened this frame that the outside world may react to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    /// A bullet was fired
    Shot,
    /// A bullet hit the monster
    MonsterKilled,
    /// Star collected (score bonus)
    StarCollected,
    /// Shield collected (temporary immunity)
    ShieldCollected,
    /// The session just ended
    GameOver,
}

/// Complete state of one play session
#[derive(Debug, Clone)]
pub struct GameState {
    pub config: GameConfig,
    /// Run seed for reproducibility
    pub seed: u64,
    pub(crate) rng: SimRng,
    pub phase: GamePhase,
    /// Simulation tick counter
    pub time_ticks: u64,
    pub score: u64,
    /// Scroll delta most recently broadcast to the world
    pub scroll: i32,
    /// Shield protection as seen by the monster check
    pub shield_active: bool,
    /// The player asked to leave (distinct from game over)
    pub quit_requested: bool,

    pub player: Player,
    pub sky: Sky,
    pub clouds: Vec<Cloud>,
    pub monster: Monster,
    pub star: Star,
    pub shield: Shield,
    pub bullets: Vec<Bullet>,

    /// Events raised during the latest tick
    pub events: Vec<GameEvent>,
}

impl GameState {
    /// Start a new session
    pub fn new(config: GameConfig, seed: u64) -> Self {
        let mut rng = SimRng::seed_from_u64(seed);
        let clouds = (0..SESSION_CLOUDS)
            .map(|slot| Cloud::new(slot, &config, &mut rng))
            .collect();
        let monster = Monster::new(&config, &mut rng);
        let star = Star::new(&config, &mut rng);
        let shield = Shield::new(&config, &mut rng);

        log::info!("New session (seed {})", seed);

        Self {
            player: Player::new(&config),
            sky: Sky::new(&config),
            clouds,
            monster,
            star,
            shield,
            bullets: Vec::new(),
            config,
            seed,
            rng,
            phase: GamePhase::Playing,
            time_ticks: 0,
            score: 0,
            scroll: 0,
            shield_active: false,
            quit_requested: false,
            events: Vec::new(),
        }
    }

    pub fn is_over(&self) -> bool {
        self.phase == GamePhase::GameOver
    }

    /// Visit every entity that moves with the world
    pub fn for_each_scrolling(&mut self, mut f: impl FnMut(&mut dyn Scrolling)) {
        f(&mut self.sky);
        for cloud in &mut self.clouds {
            f(cloud);
        }
        f(&mut self.monster);
        f(&mut self.star);
        f(&mut self.shield);
    }

    /// Send the frame's scroll delta to the whole world
    pub fn broadcast_scroll(&mut self, delta: i32) {
        self.scroll = delta;
        self.for_each_scrolling(|entity| entity.apply_scroll(delta));
    }

    /// Advance every world entity by one frame, recycling as needed
    pub fn update_world(&mut self) {
        let Self {
            config,
            rng,
            sky,
            clouds,
            monster,
            star,
            shield,
            bullets,
            ..
        } = self;
        let config = &*config;

        sky.update(config, rng);
        for cloud in clouds.iter_mut() {
            cloud.update(config, rng);
        }
        monster.update(config, rng);
        star.update(config, rng);
        shield.update(config, rng);
        bullets.retain_mut(|bullet| bullet.update(config));
    }

    /// Add to the score; the score only ever grows
    pub fn add_score(&mut self, points: u64) {
        self.score = self.score.saturating_add(points);
    }

    /// Fire a bullet from the player's feet
    pub fn spawn_bullet(&mut self) {
        let rect = self.player.rect;
        self.bullets
            .push(Bullet::new(&self.config, rect.center_x(), rect.bottom()));
        self.events.push(GameEvent::Shot);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_session_layout() {
        let state = GameState::new(GameConfig::default(), 12345);
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.clouds.len(), 13);
        assert_eq!(state.score, 0);
        assert!(state.bullets.is_empty());
        assert!(state.player.is_alive());
        assert!(state.monster.rect.top() < 0);
        assert!(state.star.rect.top() < 0);
        assert!(state.shield.rect.top() < 0);
    }

    #[test]
    fn test_same_seed_same_layout() {
        let a = GameState::new(GameConfig::default(), 7);
        let b = GameState::new(GameConfig::default(), 7);
        for (ca, cb) in a.clouds.iter().zip(&b.clouds) {
            assert_eq!(ca.rect, cb.rect);
            assert_eq!(ca.variant, cb.variant);
        }
        assert_eq!(a.monster.rect, b.monster.rect);
    }

    #[test]
    fn test_broadcast_reaches_every_scrolling_entity() {
        let mut state = GameState::new(GameConfig::default(), 1);
        state.broadcast_scroll(8);
        let mut seen = 0;
        state.for_each_scrolling(|entity| {
            assert_eq!(entity.scroll(), 8);
            seen += 1;
        });
        assert_eq!(seen, 13 + 4);
        assert_eq!(state.scroll, 8);
    }

    #[test]
    fn test_spawn_bullet_at_player_feet() {
        let mut state = GameState::new(GameConfig::default(), 1);
        state.spawn_bullet();
        assert_eq!(state.bullets.len(), 1);
        assert_eq!(state.bullets[0].rect.bottom(), state.player.rect.bottom());
        assert_eq!(state.bullets[0].rect.center_x(), state.player.rect.center_x());
        assert_eq!(state.events, [GameEvent::Shot]);
    }
}
