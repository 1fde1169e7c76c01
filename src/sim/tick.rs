//! Fixed timestep simulation tick
//!
//! One call advances the session by exactly one frame in a fixed order:
//! input, player physics, scrolling, world update, collisions, end check.

use super::autopilot;
use super::collision;
use super::scroll;
use super::state::{GameEvent, GamePhase, GameState};

/// Horizontal steering command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Steer {
    Left,
    Right,
    Stop,
}

impl Steer {
    /// Horizontal velocity for this command
    pub fn dx(self, speed: i32) -> i32 {
        match self {
            Steer::Left => -speed,
            Steer::Right => speed,
            Steer::Stop => 0,
        }
    }
}

/// Input commands for a single tick (deterministic)
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// New steering command, if the direction changed this frame
    pub steer: Option<Steer>,
    /// Fire a bullet (edge-triggered)
    pub fire: bool,
    /// Leave the session
    pub quit: bool,
    /// Demo mode - the autopilot plays
    pub autopilot: bool,
}

/// Advance the game state by one frame
pub fn tick(state: &mut GameState, input: &TickInput) {
    state.events.clear();

    if input.quit {
        if !state.quit_requested {
            log::info!("Quit requested at score {}", state.score);
        }
        state.quit_requested = true;
        return;
    }

    if state.phase == GamePhase::GameOver {
        return;
    }

    state.time_ticks += 1;

    let (steer, fire) = if input.autopilot {
        (Some(autopilot::steer(state)), autopilot::should_fire(state))
    } else {
        (input.steer, input.fire)
    };

    if let Some(steer) = steer {
        let dx = steer.dx(state.config.move_speed);
        state.player.change_direction(dx);
    }
    if fire {
        state.spawn_bullet();
    }

    state.player.update(&state.config);

    if let Some(delta) = scroll::coordinate(&mut state.player, &state.clouds, &state.config) {
        state.broadcast_scroll(delta);
    }
    state.update_world();

    if state.scroll > 0 {
        let points = state.scroll as u64;
        state.add_score(points);
    }

    collision::resolve(state);

    if !state.player.is_alive() {
        state.phase = GamePhase::GameOver;
        state.events.push(GameEvent::GameOver);
        log::info!(
            "Game over after {} ticks, score {}",
            state.time_ticks,
            state.score
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameConfig;

    #[test]
    fn test_first_tick_moves_player_up() {
        let mut state = GameState::new(GameConfig::default(), 12345);
        tick(&mut state, &TickInput::default());
        assert_eq!(state.time_ticks, 1);
        assert_eq!(state.player.rect.bottom(), 567);
        assert_eq!(state.player.vy, -21);
        assert_eq!(state.phase, GamePhase::Playing);
    }

    #[test]
    fn test_steering_sets_dx() {
        let mut state = GameState::new(GameConfig::default(), 1);
        let input = TickInput {
            steer: Some(Steer::Right),
            ..Default::default()
        };
        tick(&mut state, &input);
        assert_eq!(state.player.dx, 10);
        assert_eq!(state.player.rect.center_x(), 220);

        // No new command keeps the last direction
        tick(&mut state, &TickInput::default());
        assert_eq!(state.player.rect.center_x(), 230);

        let stop = TickInput {
            steer: Some(Steer::Stop),
            ..Default::default()
        };
        tick(&mut state, &stop);
        assert_eq!(state.player.dx, 0);
        assert_eq!(state.player.rect.center_x(), 230);
    }

    #[test]
    fn test_fire_spawns_bullet_and_event() {
        let mut state = GameState::new(GameConfig::default(), 1);
        let input = TickInput {
            fire: true,
            ..Default::default()
        };
        tick(&mut state, &input);
        assert_eq!(state.bullets.len(), 1);
        assert!(state.events.contains(&GameEvent::Shot));

        tick(&mut state, &TickInput::default());
        assert!(state.events.is_empty());
    }

    #[test]
    fn test_quit_is_not_game_over() {
        let mut state = GameState::new(GameConfig::default(), 1);
        let input = TickInput {
            quit: true,
            ..Default::default()
        };
        tick(&mut state, &input);
        assert!(state.quit_requested);
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.time_ticks, 0);
    }

    #[test]
    fn test_falling_off_ends_game_once() {
        let mut state = GameState::new(GameConfig::default(), 1);
        state.player.rect.set_bottom(state.config.play_height);
        tick(&mut state, &TickInput::default());
        assert_eq!(state.phase, GamePhase::GameOver);
        assert_eq!(state.events, [GameEvent::GameOver]);

        let ticks = state.time_ticks;
        tick(&mut state, &TickInput::default());
        assert_eq!(state.time_ticks, ticks);
        assert!(state.events.is_empty());
    }

    #[test]
    fn test_determinism() {
        let mut a = GameState::new(GameConfig::default(), 99999);
        let mut b = GameState::new(GameConfig::default(), 99999);
        let inputs = [
            TickInput {
                steer: Some(Steer::Left),
                ..Default::default()
            },
            TickInput {
                fire: true,
                ..Default::default()
            },
            TickInput {
                steer: Some(Steer::Stop),
                ..Default::default()
            },
            TickInput::default(),
        ];
        for _ in 0..50 {
            for input in &inputs {
                tick(&mut a, input);
                tick(&mut b, input);
            }
        }
        assert_eq!(a.time_ticks, b.time_ticks);
        assert_eq!(a.score, b.score);
        assert_eq!(a.player.rect, b.player.rect);
        assert_eq!(a.monster.rect, b.monster.rect);
        assert_eq!(a.phase, b.phase);
    }
}
