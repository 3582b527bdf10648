//! Double-buffered input resolver.
//!
//! Two fixed snapshot sets live in an arena; `current` is an index into it.
//! Raw events for a tick land in the current set, the simulation reads both
//! sets through an [`InputFrame`], and [`InputResolver::swap`] flips the index
//! so the finished tick becomes `previous`.

use crossterm::event::KeyCode;
use log::{debug, trace};

use crate::controller::{ControllerSnapshot, InputFrame};
use crate::map::map_key;
use crate::pad::{apply_level, normalize_stick, set_ended_down, Directions, PadState, BUTTON_BITS};
use crate::types::{KEYBOARD_SLOT, MAX_CONTROLLERS, STICK_DEADZONE, STICK_DIRECTION_THRESHOLD};

/// One snapshot per controller slot
pub type SnapshotSet = [ControllerSnapshot; MAX_CONTROLLERS];

/// A raw key edge from the host
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyTransition {
    pub slot: usize,
    pub key: KeyCode,
    pub is_down: bool,
    /// Host clock counter at delivery
    pub timestamp: u64,
}

impl KeyTransition {
    /// Keyboard-slot event
    pub fn keyboard(key: KeyCode, is_down: bool, timestamp: u64) -> Self {
        Self {
            slot: KEYBOARD_SLOT,
            key,
            is_down,
            timestamp,
        }
    }
}

/// Analog tuning for pad slots
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InputConfig {
    pub stick_deadzone: i16,
    pub direction_threshold: f32,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            stick_deadzone: STICK_DEADZONE,
            direction_threshold: STICK_DIRECTION_THRESHOLD,
        }
    }
}

#[derive(Debug, Clone)]
pub struct InputResolver {
    buffers: [SnapshotSet; 2],
    current: usize,
    config: InputConfig,
}

impl InputResolver {
    pub fn new() -> Self {
        Self::with_config(InputConfig::default())
    }

    pub fn with_config(config: InputConfig) -> Self {
        let mut keyboard = ControllerSnapshot::new();
        keyboard.is_connected = true;

        let mut set = [ControllerSnapshot::new(); MAX_CONTROLLERS];
        set[KEYBOARD_SLOT] = keyboard;

        Self {
            buffers: [set, set],
            current: 0,
            config,
        }
    }

    pub fn config(&self) -> InputConfig {
        self.config
    }

    pub fn current(&self) -> &SnapshotSet {
        &self.buffers[self.current]
    }

    pub fn previous(&self) -> &SnapshotSet {
        &self.buffers[self.current ^ 1]
    }

    /// Both buffers, for the simulation step
    pub fn frame(&self) -> InputFrame<'_> {
        InputFrame {
            previous: self.previous(),
            current: self.current(),
        }
    }

    fn split(&mut self) -> (&SnapshotSet, &mut SnapshotSet) {
        let [first, second] = &mut self.buffers;
        if self.current == 0 {
            (&*second, first)
        } else {
            (&*first, second)
        }
    }

    /// Apply one key edge to the current buffer. Returns false for unmapped
    /// keys and out-of-range slots.
    pub fn process_key(&mut self, event: &KeyTransition) -> bool {
        let Some(button) = map_key(event.key) else {
            return false;
        };
        if event.slot >= MAX_CONTROLLERS {
            debug!("dropping key event for slot {}", event.slot);
            return false;
        }

        let state = self.buffers[self.current][event.slot].button_mut(button);
        set_ended_down(state, event.is_down);
        trace!(
            "slot {} {} {} at {}",
            event.slot,
            button.as_str(),
            if event.is_down { "down" } else { "up" },
            event.timestamp
        );
        true
    }

    /// Apply one pad poll to `slot`.
    ///
    /// A disconnected pad only has its connection flag cleared; its buttons
    /// are left as they were.
    pub fn process_pad(&mut self, slot: usize, pad: &PadState) {
        if slot == KEYBOARD_SLOT || slot >= MAX_CONTROLLERS {
            debug!("ignoring pad poll for slot {}", slot);
            return;
        }

        let config = self.config;
        let snapshot = &mut self.buffers[self.current][slot];

        if !pad.connected {
            if snapshot.is_connected {
                debug!("controller {} disconnected", slot);
            }
            snapshot.is_connected = false;
            return;
        }
        if !snapshot.is_connected {
            debug!("controller {} connected", slot);
        }
        snapshot.is_connected = true;

        snapshot.stick_x = normalize_stick(pad.stick_x_raw, config.stick_deadzone);
        snapshot.stick_y = normalize_stick(pad.stick_y_raw, config.stick_deadzone);
        if snapshot.stick_x != 0.0 || snapshot.stick_y != 0.0 {
            snapshot.is_analog = true;
        }

        let directions = match Directions::from_dpad(pad.digital_bits) {
            Some(dpad) => {
                snapshot.is_analog = false;
                dpad
            }
            None => Directions::from_stick(
                snapshot.stick_x,
                snapshot.stick_y,
                config.direction_threshold,
            ),
        };

        for (button, is_down) in directions.levels() {
            apply_level(snapshot.button_mut(button), is_down);
        }
        for (button, bits) in BUTTON_BITS {
            apply_level(snapshot.button_mut(button), pad.digital_bits & bits != 0);
        }
    }

    /// Ingest everything delivered since the last tick. `pads[i]` feeds slot
    /// `i + 1`.
    pub fn ingest(&mut self, keys: &[KeyTransition], pads: &[PadState]) -> InputFrame<'_> {
        for event in keys {
            self.process_key(event);
        }
        for (i, pad) in pads.iter().enumerate() {
            self.process_pad(i + 1, pad);
        }
        self.frame()
    }

    /// End the tick: current becomes previous, and the new current starts from
    /// the carried-over levels.
    pub fn swap(&mut self) {
        self.current ^= 1;
        let (previous, current) = self.split();
        for (next, done) in current.iter_mut().zip(previous.iter()) {
            *next = done.carried();
        }
    }
}

impl Default for InputResolver {
    fn default() -> Self {
        Self::new()
    }
}
