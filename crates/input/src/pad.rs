//! Gamepad polling state, stick deadzone and level-to-edge debounce.
//!
//! Pads report levels, not edges: each tick delivers which buttons are down
//! right now. Presses are turned into single transitions by the
//! `allow_press` latch on [`ButtonState`].

use crate::types::{ButtonState, LogicalButton};

pub const DPAD_UP: u16 = 0x0001;
pub const DPAD_DOWN: u16 = 0x0002;
pub const DPAD_LEFT: u16 = 0x0004;
pub const DPAD_RIGHT: u16 = 0x0008;
pub const START: u16 = 0x0010;
pub const BACK: u16 = 0x0020;
pub const LEFT_SHOULDER: u16 = 0x0100;
pub const RIGHT_SHOULDER: u16 = 0x0200;
pub const A: u16 = 0x1000;
pub const B: u16 = 0x2000;
pub const X: u16 = 0x4000;
pub const Y: u16 = 0x8000;

const DPAD_MASK: u16 = DPAD_UP | DPAD_DOWN | DPAD_LEFT | DPAD_RIGHT;

/// Non-directional buttons and the pad bits that drive them
pub(crate) const BUTTON_BITS: [(LogicalButton, u16); 6] = [
    (LogicalButton::RotateCw, A | Y),
    (LogicalButton::RotateCcw, B | X),
    (LogicalButton::Start, START),
    (LogicalButton::Back, BACK),
    (LogicalButton::LeftShoulder, LEFT_SHOULDER),
    (LogicalButton::RightShoulder, RIGHT_SHOULDER),
];

/// One pad poll, as delivered by the device layer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PadState {
    pub connected: bool,
    pub digital_bits: u16,
    pub stick_x_raw: i16,
    pub stick_y_raw: i16,
}

impl PadState {
    pub const DISCONNECTED: PadState = PadState {
        connected: false,
        digital_bits: 0,
        stick_x_raw: 0,
        stick_y_raw: 0,
    };
}

/// Map a raw axis value into `[-1, 1]`.
///
/// Values within `deadzone` of centre read as 0; the remaining band is
/// rescaled linearly so output starts just above 0 at the deadzone edge and
/// reaches ±1 at full deflection.
pub fn normalize_stick(raw: i16, deadzone: i16) -> f32 {
    let deadzone = deadzone.max(0) as f32;
    let raw = raw as f32;
    if raw < -deadzone {
        (raw + deadzone) / (32768.0 - deadzone)
    } else if raw > deadzone {
        (raw - deadzone) / (32767.0 - deadzone)
    } else {
        0.0
    }
}

/// Directions requested this tick: up, down, left, right
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub(crate) struct Directions {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
}

impl Directions {
    pub fn from_dpad(bits: u16) -> Option<Self> {
        if bits & DPAD_MASK == 0 {
            return None;
        }
        Some(Self {
            up: bits & DPAD_UP != 0,
            down: bits & DPAD_DOWN != 0,
            left: bits & DPAD_LEFT != 0,
            right: bits & DPAD_RIGHT != 0,
        })
    }

    pub fn from_stick(x: f32, y: f32, threshold: f32) -> Self {
        Self {
            up: y > threshold,
            down: y < -threshold,
            left: x < -threshold,
            right: x > threshold,
        }
    }

    pub fn levels(self) -> [(LogicalButton, bool); 4] {
        [
            (LogicalButton::MoveUp, self.up),
            (LogicalButton::MoveDown, self.down),
            (LogicalButton::MoveLeft, self.left),
            (LogicalButton::MoveRight, self.right),
        ]
    }
}

/// Record `ended_down`, counting the flip if it changed
#[inline]
pub(crate) fn set_ended_down(state: &mut ButtonState, is_down: bool) {
    if state.ended_down != is_down {
        state.ended_down = is_down;
        state.half_transition_count += 1;
    }
}

/// Apply a polled level with the press-once latch
pub(crate) fn apply_level(state: &mut ButtonState, is_down: bool) {
    if is_down {
        if state.allow_press {
            set_ended_down(state, true);
            state.allow_press = false;
        }
    } else {
        set_ended_down(state, false);
        state.allow_press = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::STICK_DEADZONE;

    #[test]
    fn test_deadzone_edge_reads_zero() {
        assert_eq!(normalize_stick(STICK_DEADZONE, STICK_DEADZONE), 0.0);
        assert_eq!(normalize_stick(-STICK_DEADZONE, STICK_DEADZONE), 0.0);
        assert_eq!(normalize_stick(0, STICK_DEADZONE), 0.0);
    }

    #[test]
    fn test_just_past_deadzone_is_small_and_positive() {
        let small = normalize_stick(STICK_DEADZONE + 1, STICK_DEADZONE);
        let full = normalize_stick(i16::MAX, STICK_DEADZONE);
        assert!(small > 0.0);
        assert!(small < full);
        assert_eq!(full, 1.0);
    }

    #[test]
    fn test_full_negative_deflection_is_minus_one() {
        assert_eq!(normalize_stick(i16::MIN, STICK_DEADZONE), -1.0);
    }

    #[test]
    fn test_rescale_is_linear() {
        let dz = 1000;
        let quarter = normalize_stick(dz + (32767 - dz) / 4, dz);
        let half = normalize_stick(dz + (32767 - dz) / 2, dz);
        assert!((half - 2.0 * quarter).abs() < 1e-3);
    }

    #[test]
    fn test_dpad_directions() {
        assert_eq!(Directions::from_dpad(START), None);
        let dirs = Directions::from_dpad(DPAD_LEFT | A).unwrap();
        assert!(dirs.left);
        assert!(!dirs.right && !dirs.up && !dirs.down);
    }

    #[test]
    fn test_stick_directions_need_threshold() {
        let dirs = Directions::from_stick(0.5, -0.51, 0.5);
        assert!(!dirs.right);
        assert!(dirs.down);
    }

    #[test]
    fn test_apply_level_presses_once_while_held() {
        let mut state = ButtonState::new();

        apply_level(&mut state, true);
        assert!(state.ended_down);
        assert_eq!(state.half_transition_count, 1);
        assert!(!state.allow_press);

        apply_level(&mut state, true);
        assert_eq!(state.half_transition_count, 1);

        apply_level(&mut state, false);
        assert!(!state.ended_down);
        assert!(state.allow_press);
        assert_eq!(state.half_transition_count, 2);
    }
}
