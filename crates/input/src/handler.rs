//! Button sampler producing one validated intent set per tick.
//!
//! Supports terminals that do not emit key release events by using a timeout.

use std::time::{Duration, Instant};

use crossterm::event::KeyCode;

use crate::map::{button_for_key, Button};
use crate::types::Intents;

/// Raw held state of the four buttons.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ButtonState {
    pub left: bool,
    pub right: bool,
    pub down: bool,
    pub rotate: bool,
}

impl ButtonState {
    fn directional_count(&self) -> u8 {
        self.left as u8 + self.right as u8 + self.down as u8
    }
}

/// Turn held buttons into intents.
///
/// At most one directional button may be active; any other combination is
/// suppressed entirely. Rotate is independent and passed in as an edge
/// (`rotate_pressed`), so holding it does not spin the piece.
pub fn validate(held: ButtonState, rotate_pressed: bool) -> Intents {
    if held.directional_count() > 1 {
        return Intents::NONE;
    }
    Intents {
        rotate: rotate_pressed,
        left: held.left,
        right: held.right,
        soft_drop: held.down,
    }
}

// In terminals without key-release events, a short timeout prevents a single tap
// from turning into a sustained "held" state.
const DEFAULT_KEY_RELEASE_TIMEOUT_MS: u64 = 150;

/// Tracks key state between ticks.
#[derive(Debug, Clone)]
pub struct IntentSampler {
    held: ButtonState,
    /// Rotate went down since the last sample.
    rotate_pending: bool,
    /// Last press of a directional key (drives auto-release).
    last_key_time: Instant,
    key_release_timeout: Duration,
    /// Set once the terminal has delivered any release event.
    release_events: bool,
}

impl IntentSampler {
    pub fn new() -> Self {
        Self {
            held: ButtonState::default(),
            rotate_pending: false,
            last_key_time: Instant::now(),
            key_release_timeout: Duration::from_millis(DEFAULT_KEY_RELEASE_TIMEOUT_MS),
            release_events: false,
        }
    }

    pub fn with_key_release_timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.key_release_timeout = Duration::from_millis(timeout_ms);
        self
    }

    pub fn key_release_timeout(&self) -> Duration {
        self.key_release_timeout
    }

    pub fn held(&self) -> ButtonState {
        self.held
    }

    pub fn handle_key_press(&mut self, code: KeyCode) {
        let Some(button) = button_for_key(code) else {
            return;
        };

        if button == Button::Rotate {
            if !self.held.rotate {
                self.rotate_pending = true;
            }
            self.held.rotate = true;
            if !self.release_events {
                // No release will come; treat every press as a tap.
                self.held.rotate = false;
            }
            return;
        }

        self.last_key_time = Instant::now();
        if !self.release_events {
            // Without release events a new key means the previous one stopped repeating.
            self.held.left = false;
            self.held.right = false;
            self.held.down = false;
        }
        match button {
            Button::Left => self.held.left = true,
            Button::Right => self.held.right = true,
            Button::Down => self.held.down = true,
            Button::Rotate => {}
        }
    }

    pub fn handle_key_release(&mut self, code: KeyCode) {
        self.release_events = true;
        match button_for_key(code) {
            Some(Button::Left) => self.held.left = false,
            Some(Button::Right) => self.held.right = false,
            Some(Button::Down) => self.held.down = false,
            Some(Button::Rotate) => self.held.rotate = false,
            None => {}
        }
    }

    /// Produce the intents for the coming tick.
    pub fn sample(&mut self) -> Intents {
        if !self.release_events && self.last_key_time.elapsed() > self.key_release_timeout {
            self.held.left = false;
            self.held.right = false;
            self.held.down = false;
        }

        let intents = validate(self.held, self.rotate_pending);
        self.rotate_pending = false;
        intents
    }

    pub fn reset(&mut self) {
        self.held = ButtonState::default();
        self.rotate_pending = false;
        self.last_key_time = Instant::now();
    }
}

impl Default for IntentSampler {
    fn default() -> Self {
        Self::new()
    }
}
