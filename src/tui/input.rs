// Key repeat handling
//
// Terminals differ in whether they report key releases. Action keys fire
// once per press (with a debounce for terminals that only send presses);
// navigation keys fire on press and then repeat while held.

use crossterm::event::KeyCode;
use std::collections::HashMap;
use std::time::{Duration, Instant};

/// Minimum gap between two triggers of an action key held down
const ACTION_DEBOUNCE: Duration = Duration::from_millis(150);

/// Defines how a key should behave when pressed/held
#[derive(Debug, Clone, Copy)]
pub enum KeyBehavior {
    /// Trigger once per press: filters, sort, language, quit
    StateChange,

    /// Trigger on press, then repeat after initial delay: list navigation
    Repeatable {
        initial_delay: Duration,
        repeat_interval: Duration,
    },
}

impl KeyBehavior {
    pub fn navigation() -> Self {
        Self::Repeatable {
            initial_delay: Duration::from_millis(400),
            repeat_interval: Duration::from_millis(50),
        }
    }
}

#[derive(Debug, Default)]
struct KeyState {
    /// Set while the key is held (cleared on release)
    pressed_at: Option<Instant>,
    last_triggered: Option<Instant>,
}

/// Input handler that manages key behaviors
pub struct InputHandler {
    key_states: HashMap<KeyCode, KeyState>,
    key_behaviors: HashMap<KeyCode, KeyBehavior>,
}

impl InputHandler {
    pub fn new() -> Self {
        Self {
            key_states: HashMap::new(),
            key_behaviors: HashMap::new(),
        }
    }

    /// Configure multiple keys with the same behavior
    pub fn configure_keys(&mut self, keys: &[KeyCode], behavior: KeyBehavior) {
        for key in keys {
            self.key_behaviors.insert(*key, behavior);
        }
    }

    /// Handle a key press event
    /// Returns true if the action should be triggered
    pub fn handle_key_press(&mut self, key: KeyCode) -> bool {
        self.handle_key_press_at(key, Instant::now())
    }

    fn handle_key_press_at(&mut self, key: KeyCode, now: Instant) -> bool {
        let behavior = self
            .key_behaviors
            .get(&key)
            .copied()
            .unwrap_or(KeyBehavior::StateChange);
        let state = self.key_states.entry(key).or_default();

        let (Some(pressed_at), Some(last)) = (state.pressed_at, state.last_triggered) else {
            state.pressed_at = Some(now);
            state.last_triggered = Some(now);
            return true;
        };

        let fire = match behavior {
            KeyBehavior::StateChange => now.duration_since(last) >= ACTION_DEBOUNCE,
            KeyBehavior::Repeatable {
                initial_delay,
                repeat_interval,
            } => {
                now.duration_since(pressed_at) >= initial_delay
                    && now.duration_since(last) >= repeat_interval
            }
        };
        if fire {
            state.last_triggered = Some(now);
        }
        fire
    }

    /// Handle a key release event
    pub fn handle_key_release(&mut self, key: KeyCode) {
        if let Some(state) = self.key_states.get_mut(&key) {
            *state = KeyState::default();
        }
    }

    /// Key configuration for the character browser
    pub fn with_default_config() -> Self {
        let mut handler = Self::new();

        handler.configure_keys(
            &[
                KeyCode::Up,
                KeyCode::Down,
                KeyCode::PageUp,
                KeyCode::PageDown,
                KeyCode::Char('j'),
                KeyCode::Char('k'),
            ],
            KeyBehavior::navigation(),
        );

        // Everything else defaults to StateChange
        handler
    }
}

impl Default for InputHandler {
    fn default() -> Self {
        Self::with_default_config()
    }
}
