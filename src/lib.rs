//! Cloud Jumper - an endless vertical cloud-hopping arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, scrolling, collisions, game state)
//! - `config`: Tunable game constants and play-area size
//! - `platform`: Input translation and frame pacing
//! - `renderer`: Terminal rendering
//! - `highscores`: Persisted best score
//! - `audio`: Sound-effect side channel

pub mod audio;
pub mod config;
pub mod highscores;
pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use config::{ConfigError, GameConfig};
pub use highscores::HighScore;
pub use settings::{GlyphSet, Settings};

/// Default game constants, all per frame at `FPS`
pub mod consts {
    /// Fixed simulation cadence (frames per second)
    pub const FPS: u32 = 30;

    /// Play area in pixels
    pub const PLAY_WIDTH: i32 = 420;
    pub const PLAY_HEIGHT: i32 = 640;

    /// Downward acceleration added to the player's velocity each frame
    pub const GRAVITY: i32 = 2;
    /// Vertical velocity after a bounce
    pub const JUMP_VELOCITY: i32 = -23;
    /// Horizontal player speed while a direction key is held
    pub const MOVE_SPEED: i32 = 10;
    /// World scroll per frame while the player climbs
    pub const SCROLL_SPEED: i32 = 8;
    /// Landing on a cloud whose top is above this line scrolls the world
    pub const SCROLL_TRIGGER_LINE: i32 = 500;
    /// Shield duration (10 seconds)
    pub const IMMUNITY_FRAMES: u32 = 300;
    /// Bonus for collecting a star
    pub const STAR_BONUS: u64 = 500;
    /// Upward bullet speed
    pub const BULLET_SPEED: i32 = 30;
    /// Sideways monster drift
    pub const MONSTER_DRIFT: i32 = 1;
    /// Updates between animation frame changes
    pub const ANIMATION_CADENCE: u32 = 3;

    /// Player spawns this far above the bottom of the play area
    pub const PLAYER_START_LIFT: i32 = 50;
    /// Free-fall ground sits this far below the play area
    pub const FALL_MARGIN: i32 = 20;

    /// Number of cloud slots used during a session (slot 13 is title-screen only)
    pub const SESSION_CLOUDS: usize = 13;
    /// Cloud sprite variants (1..=CLOUD_VARIANTS)
    pub const CLOUD_VARIANTS: u8 = 5;

    /// Post-game pause before the score screen (milliseconds)
    pub const GAME_OVER_PAUSE_MS: u64 = 2000;
}
