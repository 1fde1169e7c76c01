//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Fixed entity update order
//! - No rendering or platform dependencies

pub mod autopilot;
pub mod cloud;
pub mod collision;
pub mod entity;
pub mod monster;
pub mod pickup;
pub mod player;
pub mod scroll;
pub mod showcase;
pub mod state;
pub mod tick;

pub use cloud::{Cloud, Sky, SLOT_TOPS};
pub use entity::{Entity, FrameCycle, Rect, Recycle, Scrolling, SimRng};
pub use monster::{Bullet, Monster};
pub use pickup::{Shield, Star};
pub use player::{Facing, Player, PlayerSprite, PlayerState};
pub use showcase::Showcase;
pub use state::{GameEvent, GamePhase, GameState};
pub use tick::{Steer, TickInput, tick};
