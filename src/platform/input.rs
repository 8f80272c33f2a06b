//! Keyboard input
//!
//! The simulation only ever asks "is this key held right now". Platform event
//! handlers feed [`KeyboardState`]; [`poll`] snapshots it into a tick input
//! once per frame.

use crate::sim::TickInput;

/// Logical keys the game reacts to while playing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    MoveUp,
    MoveDown,
    Fire,
}

impl Key {
    /// Map a DOM `KeyboardEvent.key` value to a logical key
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "ArrowUp" | "w" | "W" => Some(Key::MoveUp),
            "ArrowDown" | "s" | "S" => Some(Key::MoveDown),
            " " | "Spacebar" => Some(Key::Fire),
            _ => None,
        }
    }
}

/// Anything that can answer held-key queries without blocking
pub trait InputSource {
    fn is_held(&self, key: Key) -> bool;

    /// Window closed or process asked to stop
    fn quit_requested(&self) -> bool {
        false
    }
}

/// Held-key table maintained from key down/up events
#[derive(Debug, Clone, Default)]
pub struct KeyboardState {
    up: bool,
    down: bool,
    fire: bool,
    quit: bool,
}

impl KeyboardState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, key: Key, held: bool) {
        match key {
            Key::MoveUp => self.up = held,
            Key::MoveDown => self.down = held,
            Key::Fire => self.fire = held,
        }
    }

    /// Feed a raw key event. Returns true if the key is one the game uses.
    pub fn handle_key(&mut self, name: &str, pressed: bool) -> bool {
        match Key::from_name(name) {
            Some(key) => {
                self.set(key, pressed);
                true
            }
            None => false,
        }
    }

    /// Release everything (focus lost, so key-up events will never arrive)
    pub fn release_all(&mut self) {
        self.up = false;
        self.down = false;
        self.fire = false;
    }

    pub fn request_quit(&mut self) {
        self.quit = true;
    }
}

impl InputSource for KeyboardState {
    fn is_held(&self, key: Key) -> bool {
        match key {
            Key::MoveUp => self.up,
            Key::MoveDown => self.down,
            Key::Fire => self.fire,
        }
    }

    fn quit_requested(&self) -> bool {
        self.quit
    }
}

/// Copy the current held-key state into `input`, leaving its one-shot and
/// mode flags alone
pub fn poll<S: InputSource + ?Sized>(source: &S, input: &mut TickInput) {
    input.move_up = source.is_held(Key::MoveUp);
    input.move_down = source.is_held(Key::MoveDown);
    input.fire = source.is_held(Key::Fire);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_events_update_held_state() {
        let mut keys = KeyboardState::new();
        assert!(keys.handle_key("ArrowUp", true));
        assert!(keys.handle_key(" ", true));
        assert!(!keys.handle_key("q", true));
        assert!(keys.is_held(Key::MoveUp));
        assert!(keys.is_held(Key::Fire));
        assert!(!keys.is_held(Key::MoveDown));

        keys.handle_key("ArrowUp", false);
        assert!(!keys.is_held(Key::MoveUp));
    }

    #[test]
    fn test_release_all() {
        let mut keys = KeyboardState::new();
        keys.set(Key::MoveDown, true);
        keys.set(Key::Fire, true);
        keys.release_all();
        assert!(!keys.is_held(Key::MoveDown));
        assert!(!keys.is_held(Key::Fire));
        assert!(!keys.quit_requested());
        keys.request_quit();
        assert!(keys.quit_requested());
    }

    #[test]
    fn test_poll_keeps_mode_flags() {
        let mut keys = KeyboardState::new();
        keys.set(Key::MoveDown, true);
        let mut input = TickInput {
            idle_mode: true,
            pause: true,
            move_up: true,
            ..Default::default()
        };
        poll(&keys, &mut input);
        assert!(!input.move_up);
        assert!(input.move_down);
        assert!(!input.fire);
        assert!(input.idle_mode);
        assert!(input.pause);
    }
}
