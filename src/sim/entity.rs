//! Shared positional contract for everything that moves on screen
//!
//! Coordinates are screen pixels with y growing downward: the visible area
//! spans `0..play_height`, and negative tops are above the view.

use glam::IVec2;
use rand::Rng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::config::{GameConfig, SpawnRange};

/// RNG used by every entity (seeded per session for determinism)
pub type SimRng = Pcg32;

/// Axis-aligned rectangle (top-left corner plus size)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub pos: IVec2,
    pub size: IVec2,
}

impl Rect {
    pub fn new(left: i32, top: i32, width: i32, height: i32) -> Self {
        Self {
            pos: IVec2::new(left, top),
            size: IVec2::new(width, height),
        }
    }

    /// Rectangle of the given size with its top-left at the origin
    pub fn sized(size: IVec2) -> Self {
        Self {
            pos: IVec2::ZERO,
            size,
        }
    }

    #[inline]
    pub fn left(&self) -> i32 {
        self.pos.x
    }

    #[inline]
    pub fn top(&self) -> i32 {
        self.pos.y
    }

    #[inline]
    pub fn right(&self) -> i32 {
        self.pos.x + self.size.x
    }

    #[inline]
    pub fn bottom(&self) -> i32 {
        self.pos.y + self.size.y
    }

    #[inline]
    pub fn width(&self) -> i32 {
        self.size.x
    }

    #[inline]
    pub fn height(&self) -> i32 {
        self.size.y
    }

    #[inline]
    pub fn center_x(&self) -> i32 {
        self.pos.x + self.size.x / 2
    }

    #[inline]
    pub fn center_y(&self) -> i32 {
        self.pos.y + self.size.y / 2
    }

    pub fn set_left(&mut self, left: i32) {
        self.pos.x = left;
    }

    pub fn set_right(&mut self, right: i32) {
        self.pos.x = right - self.size.x;
    }

    pub fn set_top(&mut self, top: i32) {
        self.pos.y = top;
    }

    pub fn set_bottom(&mut self, bottom: i32) {
        self.pos.y = bottom - self.size.y;
    }

    pub fn set_center_x(&mut self, center_x: i32) {
        self.pos.x = center_x - self.size.x / 2;
    }

    /// Strict overlap test: rectangles that only share an edge do not intersect
    pub fn intersects(&self, other: &Rect) -> bool {
        self.left() < other.right()
            && other.left() < self.right()
            && self.top() < other.bottom()
            && other.top() < self.bottom()
    }
}

/// Anything with a position that can be drawn
pub trait Entity {
    fn rect(&self) -> Rect;

    fn visible(&self) -> bool {
        true
    }
}

/// Entities that move with the world while it scrolls
pub trait Scrolling: Entity {
    /// Store the delta to apply on the next update
    fn apply_scroll(&mut self, delta: i32);

    /// Delta most recently received
    fn scroll(&self) -> i32;

    /// Advance one frame
    fn update(&mut self, config: &GameConfig, rng: &mut SimRng);
}

/// Scrolling entities that reappear above the view instead of being destroyed
pub trait Recycle: Scrolling {
    fn respawn(&mut self, config: &GameConfig, rng: &mut SimRng);

    /// True once the top edge has left the bottom of the view
    fn below_view(&self, config: &GameConfig) -> bool {
        self.rect().top() > config.play_height
    }
}

/// Random left edge keeping an entity of `width` inside the play area
pub fn random_left(rng: &mut SimRng, play_width: i32, width: i32) -> i32 {
    let span = (play_width - width).max(1);
    rng.random_range(0..span)
}

/// Random bottom edge within a spawn range
pub fn random_bottom(rng: &mut SimRng, range: SpawnRange) -> i32 {
    rng.random_range(range.min_bottom..=range.max_bottom)
}

/// Last frame of the animation loop; frame 0 is a rest pose never returned to
pub const LAST_CYCLE_FRAME: u8 = 3;

/// Sprite animation that loops frames 1..=3 every `cadence` updates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FrameCycle {
    frame: u8,
    counter: u32,
}

impl FrameCycle {
    pub fn frame(&self) -> u8 {
        self.frame
    }

    pub fn advance(&mut self, cadence: u32) {
        if self.counter >= cadence {
            self.frame = if self.frame < LAST_CYCLE_FRAME {
                self.frame + 1
            } else {
                1
            };
            self.counter = 0;
        }
        self.counter += 1;
    }
}
