//! Keyboard input to tick commands
//!
//! Backend-agnostic: the binary maps its terminal events to [`InputEvent`]s and
//! collects one [`TickInput`] per frame. Direction follows the last key event,
//! releasing either direction key stops the player, and fire triggers on the
//! press edge only.
//!
//! Terminals that never report key releases are supported by treating a
//! direction as released once no press or repeat has been seen for a while
//! (see [`HoldWindow`]).

use crate::sim::{Steer, TickInput};

/// Keys the game understands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Left,
    Right,
    Fire,
    Quit,
    Instructions,
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    Press(Key),
    Repeat(Key),
    Release(Key),
}

/// Initial auto-repeat delay to wait out, generous enough for slow keyboards
const FIRST_REPEAT_MS: u64 = 650;
/// Gap allowed between auto-repeats once they have started
const REPEAT_MS: u64 = 130;

/// Frames a held direction survives without key events, on terminals that
/// cannot report releases
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HoldWindow {
    /// Before the first auto-repeat arrives
    pub first_repeat: u64,
    /// Between later auto-repeats
    pub repeat: u64,
}

impl HoldWindow {
    pub fn for_fps(fps: u32) -> Self {
        let frames = |ms: u64| (ms * fps.max(1) as u64).div_ceil(1000);
        Self {
            first_repeat: frames(FIRST_REPEAT_MS),
            repeat: frames(REPEAT_MS),
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct Held {
    key: Key,
    /// Frame of the last press or repeat
    seen: u64,
    repeating: bool,
}

/// Collects input events between ticks
#[derive(Debug, Clone)]
pub struct InputTranslator {
    pending: TickInput,
    held: Option<Held>,
    hold_window: Option<HoldWindow>,
    frame: u64,
    autopilot: bool,
}

impl Default for InputTranslator {
    fn default() -> Self {
        Self::new(None)
    }
}

impl InputTranslator {
    /// `hold_window` is only needed when the terminal cannot report releases
    pub fn new(hold_window: Option<HoldWindow>) -> Self {
        Self {
            pending: TickInput::default(),
            held: None,
            hold_window,
            frame: 0,
            autopilot: false,
        }
    }

    pub fn set_autopilot(&mut self, autopilot: bool) {
        self.autopilot = autopilot;
    }

    pub fn handle(&mut self, event: InputEvent) {
        match event {
            InputEvent::Press(key) => match key {
                Key::Left => self.press_direction(key, Steer::Left),
                Key::Right => self.press_direction(key, Steer::Right),
                Key::Fire => self.pending.fire = true,
                Key::Quit => self.pending.quit = true,
                Key::Instructions | Key::Other => {}
            },
            InputEvent::Repeat(key) => {
                self.refresh(key);
            }
            InputEvent::Release(key) => {
                if matches!(key, Key::Left | Key::Right) {
                    self.release_direction();
                }
            }
        }
    }

    fn press_direction(&mut self, key: Key, steer: Steer) {
        // Without release reporting, auto-repeats arrive as presses
        if self.refresh(key) {
            return;
        }
        self.held = Some(Held {
            key,
            seen: self.frame,
            repeating: false,
        });
        self.pending.steer = Some(steer);
    }

    /// Mark the held direction as still down; false when `key` is not held
    fn refresh(&mut self, key: Key) -> bool {
        match &mut self.held {
            Some(held) if held.key == key => {
                held.seen = self.frame;
                held.repeating = true;
                true
            }
            _ => false,
        }
    }

    fn release_direction(&mut self) {
        self.held = None;
        self.pending.steer = Some(Steer::Stop);
    }

    /// Finish the frame and return the commands for the next tick
    pub fn take(&mut self) -> TickInput {
        if let (Some(window), Some(held)) = (self.hold_window, self.held) {
            let limit = if held.repeating {
                window.repeat
            } else {
                window.first_repeat
            };
            if self.frame.saturating_sub(held.seen) > limit {
                self.release_direction();
            }
        }
        self.frame += 1;

        let mut input = std::mem::take(&mut self.pending);
        input.autopilot = self.autopilot;
        input
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_last_direction_wins() {
        let mut input = InputTranslator::default();
        input.handle(InputEvent::Press(Key::Left));
        input.handle(InputEvent::Press(Key::Right));
        assert_eq!(input.take().steer, Some(Steer::Right));
        assert_eq!(input.take().steer, None);
    }

    #[test]
    fn test_release_stops() {
        let mut input = InputTranslator::default();
        input.handle(InputEvent::Press(Key::Left));
        input.take();
        input.handle(InputEvent::Release(Key::Left));
        assert_eq!(input.take().steer, Some(Steer::Stop));
    }

    #[test]
    fn test_any_direction_release_stops() {
        let mut input = InputTranslator::default();
        input.handle(InputEvent::Press(Key::Left));
        input.handle(InputEvent::Press(Key::Right));
        assert_eq!(input.take().steer, Some(Steer::Right));
        input.handle(InputEvent::Release(Key::Left));
        assert_eq!(input.take().steer, Some(Steer::Stop));
    }

    #[test]
    fn test_fire_is_edge_triggered() {
        let mut input = InputTranslator::default();
        input.handle(InputEvent::Press(Key::Fire));
        input.handle(InputEvent::Repeat(Key::Fire));
        assert!(input.take().fire);
        input.handle(InputEvent::Repeat(Key::Fire));
        assert!(!input.take().fire);
    }

    #[test]
    fn test_unknown_keys_ignored() {
        let mut input = InputTranslator::default();
        input.handle(InputEvent::Press(Key::Other));
        input.handle(InputEvent::Release(Key::Other));
        let tick = input.take();
        assert_eq!(tick.steer, None);
        assert!(!tick.fire && !tick.quit);
    }

    #[test]
    fn test_quit_flag() {
        let mut input = InputTranslator::default();
        input.handle(InputEvent::Press(Key::Quit));
        assert!(input.take().quit);
    }

    #[test]
    fn test_hold_window_synthesizes_release() {
        let mut input = InputTranslator::new(Some(HoldWindow {
            first_repeat: 2,
            repeat: 2,
        }));
        input.handle(InputEvent::Press(Key::Right));
        assert_eq!(input.take().steer, Some(Steer::Right));
        input.handle(InputEvent::Repeat(Key::Right));
        assert_eq!(input.take().steer, None);
        assert_eq!(input.take().steer, None);
        assert_eq!(input.take().steer, None);
        assert_eq!(input.take().steer, Some(Steer::Stop));
    }

    #[test]
    fn test_hold_window_at_30_fps() {
        assert_eq!(
            HoldWindow::for_fps(30),
            HoldWindow {
                first_repeat: 20,
                repeat: 4
            }
        );
        assert_eq!(HoldWindow::for_fps(60).first_repeat, 39);
    }

    #[test]
    fn test_held_direction_outlasts_initial_repeat_delay() {
        let mut input = InputTranslator::new(Some(HoldWindow::for_fps(30)));
        input.handle(InputEvent::Press(Key::Left));
        assert_eq!(input.take().steer, Some(Steer::Left));

        // 600 ms before the terminal starts repeating
        for _ in 0..17 {
            assert_eq!(input.take().steer, None);
        }

        // Repeats come through as presses and only keep the key alive
        input.handle(InputEvent::Press(Key::Left));
        assert_eq!(input.take().steer, None);
        for _ in 0..4 {
            assert_eq!(input.take().steer, None);
        }
        assert_eq!(input.take().steer, Some(Steer::Stop));
    }

    #[test]
    fn test_unrepeated_press_expires_after_first_window() {
        let mut input = InputTranslator::new(Some(HoldWindow::for_fps(30)));
        input.handle(InputEvent::Press(Key::Right));
        assert_eq!(input.take().steer, Some(Steer::Right));
        for _ in 0..20 {
            assert_eq!(input.take().steer, None);
        }
        assert_eq!(input.take().steer, Some(Steer::Stop));
    }

    #[test]
    fn test_autopilot_flag_carried() {
        let mut input = InputTranslator::default();
        input.set_autopilot(true);
        assert!(input.take().autopilot);
    }
}
