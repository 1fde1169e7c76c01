//! Game configuration
//!
//! Every tunable number the simulation uses lives in [`GameConfig`]. The
//! defaults reproduce the classic feel at 30 frames per second; a JSON file can
//! override any subset of fields.

use std::fmt;
use std::path::Path;

use glam::IVec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Errors produced while loading or validating a configuration
#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(serde_json::Error),
    Invalid(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "failed to read config: {}", e),
            ConfigError::Parse(e) => write!(f, "failed to parse config: {}", e),
            ConfigError::Invalid(msg) => write!(f, "invalid config: {}", msg),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Io(e) => Some(e),
            ConfigError::Parse(e) => Some(e),
            ConfigError::Invalid(_) => None,
        }
    }
}

impl From<std::io::Error> for ConfigError {
    fn from(e: std::io::Error) -> Self {
        ConfigError::Io(e)
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(e: serde_json::Error) -> Self {
        ConfigError::Parse(e)
    }
}

/// Inclusive range for the bottom edge of an entity placed above the view
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpawnRange {
    pub min_bottom: i32,
    pub max_bottom: i32,
}

impl SpawnRange {
    pub const fn new(min_bottom: i32, max_bottom: i32) -> Self {
        Self {
            min_bottom,
            max_bottom,
        }
    }

    pub fn contains(&self, bottom: i32) -> bool {
        bottom >= self.min_bottom && bottom <= self.max_bottom
    }
}

/// Sprite sizes in pixels (width, height)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpriteSizes {
    pub player: IVec2,
    pub cloud: IVec2,
    pub monster: IVec2,
    pub star: IVec2,
    pub shield: IVec2,
    pub bullet: IVec2,
    pub sky: IVec2,
}

impl Default for SpriteSizes {
    fn default() -> Self {
        Self {
            player: IVec2::new(60, 60),
            cloud: IVec2::new(100, 30),
            monster: IVec2::new(80, 60),
            star: IVec2::new(50, 50),
            shield: IVec2::new(80, 80),
            bullet: IVec2::new(10, 10),
            sky: IVec2::new(PLAY_WIDTH, PLAY_HEIGHT * 3),
        }
    }
}

/// Where recycled entities reappear above the view
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpawnRanges {
    pub monster_initial: SpawnRange,
    pub monster_respawn: SpawnRange,
    pub star: SpawnRange,
    pub shield_initial: SpawnRange,
    pub shield_respawn: SpawnRange,
}

impl Default for SpawnRanges {
    fn default() -> Self {
        Self {
            monster_initial: SpawnRange::new(-5000, -1000),
            monster_respawn: SpawnRange::new(-10000, -2000),
            star: SpawnRange::new(-3000, -500),
            shield_initial: SpawnRange::new(-3000, -800),
            shield_respawn: SpawnRange::new(-6000, -1000),
        }
    }
}

/// All simulation constants plus the play-area size
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub play_width: i32,
    pub play_height: i32,
    pub fps: u32,

    pub gravity: i32,
    pub jump_velocity: i32,
    pub move_speed: i32,
    pub scroll_speed: i32,
    pub scroll_trigger_line: i32,
    pub immunity_frames: u32,
    pub star_bonus: u64,
    pub bullet_speed: i32,
    pub monster_drift: i32,
    pub animation_cadence: u32,

    pub player_start_lift: i32,
    pub fall_margin: i32,

    pub sizes: SpriteSizes,
    pub spawns: SpawnRanges,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            play_width: PLAY_WIDTH,
            play_height: PLAY_HEIGHT,
            fps: FPS,

            gravity: GRAVITY,
            jump_velocity: JUMP_VELOCITY,
            move_speed: MOVE_SPEED,
            scroll_speed: SCROLL_SPEED,
            scroll_trigger_line: SCROLL_TRIGGER_LINE,
            immunity_frames: IMMUNITY_FRAMES,
            star_bonus: STAR_BONUS,
            bullet_speed: BULLET_SPEED,
            monster_drift: MONSTER_DRIFT,
            animation_cadence: ANIMATION_CADENCE,

            player_start_lift: PLAYER_START_LIFT,
            fall_margin: FALL_MARGIN,

            sizes: SpriteSizes::default(),
            spawns: SpawnRanges::default(),
        }
    }
}

impl GameConfig {
    /// Load a configuration from a JSON file.
    ///
    /// A missing file yields the defaults; any other failure is an error.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let json = match std::fs::read_to_string(path) {
            Ok(json) => json,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                log::info!("No config at {}, using defaults", path.display());
                return Ok(Self::default());
            }
            Err(e) => return Err(e.into()),
        };
        let config = Self::from_json(&json)?;
        log::info!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Parse and validate a JSON configuration
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject configurations the simulation cannot run with
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.fps == 0 {
            return Err(ConfigError::Invalid("fps must be positive".into()));
        }
        if self.play_width <= 0 || self.play_height <= 0 {
            return Err(ConfigError::Invalid(format!(
                "play area {}x{} must be positive",
                self.play_width, self.play_height
            )));
        }
        if self.animation_cadence == 0 {
            return Err(ConfigError::Invalid(
                "animation_cadence must be positive".into(),
            ));
        }

        let sizes = [
            ("player", self.sizes.player),
            ("cloud", self.sizes.cloud),
            ("monster", self.sizes.monster),
            ("star", self.sizes.star),
            ("shield", self.sizes.shield),
            ("bullet", self.sizes.bullet),
            ("sky", self.sizes.sky),
        ];
        for (name, size) in sizes {
            if size.x <= 0 || size.y <= 0 {
                return Err(ConfigError::Invalid(format!("{} size must be positive", name)));
            }
            if name != "sky" && size.x >= self.play_width {
                return Err(ConfigError::Invalid(format!(
                    "{} is wider than the play area",
                    name
                )));
            }
        }

        let ranges = [
            ("monster_initial", self.spawns.monster_initial),
            ("monster_respawn", self.spawns.monster_respawn),
            ("star", self.spawns.star),
            ("shield_initial", self.spawns.shield_initial),
            ("shield_respawn", self.spawns.shield_respawn),
        ];
        for (name, range) in ranges {
            if range.min_bottom > range.max_bottom {
                return Err(ConfigError::Invalid(format!("{} spawn range is empty", name)));
            }
            if range.max_bottom > 0 {
                return Err(ConfigError::Invalid(format!(
                    "{} spawn range must lie above the view",
                    name
                )));
            }
        }

        Ok(())
    }

    /// Rescale the per-frame constants for a different cadence.
    ///
    /// Speeds scale with the frame period and gravity with its square, so a
    /// bounce covers the same height over the same wall-clock time. Physics is
    /// whole pixels per frame: a cadence that would need fractional speeds or
    /// gravity is rejected rather than rounded. Frame counts scale with the
    /// frame rate and are rounded.
    pub fn scaled_to_fps(&self, fps: u32) -> Result<Self, ConfigError> {
        if fps == 0 {
            return Err(ConfigError::Invalid("fps must be positive".into()));
        }
        let (from, to) = (self.fps.max(1) as i64, fps as i64);
        let exact = |name: &str, value: i32, num: i64, den: i64| -> Result<i32, ConfigError> {
            let scaled = value as i64 * num;
            if scaled % den != 0 {
                return Err(ConfigError::Invalid(format!(
                    "{} {} does not scale to whole pixels at {} fps",
                    name, value, fps
                )));
            }
            i32::try_from(scaled / den)
                .map_err(|_| ConfigError::Invalid(format!("{} overflows at {} fps", name, fps)))
        };
        let frames = |n: u32| -> u32 {
            ((n as u64 * to as u64 + from as u64 / 2) / from as u64).max(1) as u32
        };

        let scaled = Self {
            fps,
            gravity: exact("gravity", self.gravity, from * from, to * to)?,
            jump_velocity: exact("jump_velocity", self.jump_velocity, from, to)?,
            move_speed: exact("move_speed", self.move_speed, from, to)?,
            scroll_speed: exact("scroll_speed", self.scroll_speed, from, to)?,
            bullet_speed: exact("bullet_speed", self.bullet_speed, from, to)?,
            monster_drift: exact("monster_drift", self.monster_drift, from, to)?,
            immunity_frames: frames(self.immunity_frames),
            animation_cadence: frames(self.animation_cadence),
            ..self.clone()
        };
        log::info!("Scaled config from {} to {} fps", self.fps, fps);
        Ok(scaled)
    }

    /// Landing threshold used while the player falls with no cloud beneath
    pub fn free_fall_ground(&self) -> i32 {
        self.play_height + self.fall_margin
    }
}
