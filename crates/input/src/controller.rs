//! Controller snapshots and edge queries over two consecutive snapshots.

use arrayvec::ArrayVec;

use crate::types::{ButtonState, LogicalButton, BUTTON_COUNT, MAX_CONTROLLERS};

/// Logical state of one controller slot for one tick
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ControllerSnapshot {
    buttons: [ButtonState; BUTTON_COUNT],
    /// Normalized left stick, `[-1, 1]`, positive x = right, positive y = up
    pub stick_x: f32,
    pub stick_y: f32,
    pub is_connected: bool,
    /// Last directional input came from the stick rather than the D-pad
    pub is_analog: bool,
}

impl ControllerSnapshot {
    pub const fn new() -> Self {
        Self {
            buttons: [ButtonState::new(); BUTTON_COUNT],
            stick_x: 0.0,
            stick_y: 0.0,
            is_connected: false,
            is_analog: false,
        }
    }

    pub fn button(&self, button: LogicalButton) -> ButtonState {
        self.buttons[button.index()]
    }

    pub(crate) fn button_mut(&mut self, button: LogicalButton) -> &mut ButtonState {
        &mut self.buttons[button.index()]
    }

    /// State a fresh tick starts from: levels, debounce and connection carry
    /// over; transition counts and stick axes reset.
    pub(crate) fn carried(&self) -> Self {
        let mut next = *self;
        for state in &mut next.buttons {
            state.half_transition_count = 0;
        }
        next.stick_x = 0.0;
        next.stick_y = 0.0;
        next
    }
}

impl Default for ControllerSnapshot {
    fn default() -> Self {
        Self::new()
    }
}

/// One button seen across the previous and current snapshot
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ButtonEdge {
    pub previous: ButtonState,
    pub current: ButtonState,
}

impl ButtonEdge {
    /// Went down this tick, including a tap that also released within it
    pub fn pressed(&self) -> bool {
        (self.current.ended_down && !self.previous.ended_down)
            || self.current.half_transition_count > 1
    }

    pub fn released(&self) -> bool {
        (!self.current.ended_down && self.previous.ended_down)
            || self.current.half_transition_count > 1
    }

    pub fn held(&self) -> bool {
        self.current.ended_down
    }
}

/// Read-only view of both input buffers for one tick
#[derive(Debug, Clone, Copy)]
pub struct InputFrame<'a> {
    pub previous: &'a [ControllerSnapshot; MAX_CONTROLLERS],
    pub current: &'a [ControllerSnapshot; MAX_CONTROLLERS],
}

impl<'a> InputFrame<'a> {
    pub fn edge(&self, slot: usize, button: LogicalButton) -> ButtonEdge {
        ButtonEdge {
            previous: self.previous[slot].button(button),
            current: self.current[slot].button(button),
        }
    }

    fn connected_slots(&self) -> impl Iterator<Item = usize> + 'a {
        let current = self.current;
        (0..MAX_CONTROLLERS).filter(move |&slot| current[slot].is_connected)
    }

    /// Pressed on any connected controller
    pub fn any_pressed(&self, button: LogicalButton) -> bool {
        self.connected_slots()
            .any(|slot| self.edge(slot, button).pressed())
    }

    /// Held on any connected controller
    pub fn any_held(&self, button: LogicalButton) -> bool {
        self.connected_slots()
            .any(|slot| self.edge(slot, button).held())
    }

    /// Every button pressed this tick on any connected controller, in table order
    pub fn pressed_buttons(&self) -> ArrayVec<LogicalButton, BUTTON_COUNT> {
        LogicalButton::ALL
            .iter()
            .copied()
            .filter(|&button| self.any_pressed(button))
            .collect()
    }
}
