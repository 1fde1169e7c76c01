//! Clouds (the platforms) and the sky backdrop behind them

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::entity::{random_left, Entity, Rect, Recycle, Scrolling, SimRng};
use crate::config::GameConfig;
use crate::consts::CLOUD_VARIANTS;

/// Initial top edge for each layout slot
pub const SLOT_TOPS: [i32; 14] = [0, 40, 80, 120, 160, 200, 250, 310, 360, 400, 450, 500, 590, 530];

/// Fixed starting x for landmark slots, guaranteeing a climbable first screen
fn landmark_left(slot: usize, config: &GameConfig) -> Option<i32> {
    match slot {
        7 => Some(40),
        11 | 12 => Some(config.play_width / 2 - 45),
        13 => Some(260),
        _ => None,
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Cloud {
    pub rect: Rect,
    /// Sprite variant (1..=5)
    pub variant: u8,
    pub slot: usize,
    scroll: i32,
}

impl Cloud {
    /// Create the cloud for a layout slot (0..=13)
    pub fn new(slot: usize, config: &GameConfig, rng: &mut SimRng) -> Self {
        let slot = slot.min(SLOT_TOPS.len() - 1);
        let mut rect = Rect::sized(config.sizes.cloud);
        rect.set_top(SLOT_TOPS[slot]);
        let left = landmark_left(slot, config)
            .unwrap_or_else(|| random_left(rng, config.play_width, rect.width()));
        rect.set_left(left);
        Self {
            rect,
            variant: rng.random_range(1..=CLOUD_VARIANTS),
            slot,
            scroll: 0,
        }
    }

    /// Whether this slot starts at a fixed position
    pub fn is_landmark(&self) -> bool {
        matches!(self.slot, 7 | 11 | 12 | 13)
    }
}

impl Entity for Cloud {
    fn rect(&self) -> Rect {
        self.rect
    }
}

impl Scrolling for Cloud {
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

impl Recycle for Cloud {
    fn respawn(&mut self, config: &GameConfig, rng: &mut SimRng) {
        self.rect.set_bottom(0);
        self.rect
            .set_left(random_left(rng, config.play_width, self.rect.width()));
    }
}

/// Tall background image that scrolls with the world and re-anchors to the
/// bottom of the view once its top edge comes into view
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Sky {
    pub rect: Rect,
    scroll: i32,
}

impl Sky {
    pub fn new(config: &GameConfig) -> Self {
        let mut rect = Rect::sized(config.sizes.sky);
        rect.set_bottom(config.play_height);
        Self { rect, scroll: 0 }
    }
}

impl Entity for Sky {
    fn rect(&self) -> Rect {
        self.rect
    }
}

impl Scrolling for Sky {
    fn apply_scroll(&mut self, delta: i32) {
        self.scroll = delta;
    }

    fn scroll(&self) -> i32 {
        self.scroll
    }

    fn update(&mut self, config: &GameConfig, _rng: &mut SimRng) {
        if self.rect.top() >= 0 {
            self.rect.set_bottom(config.play_height);
        } else {
            self.rect.pos.y += self.scroll;
        }
    }
}
