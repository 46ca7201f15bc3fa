//! Per-joystick button and axis state.
//!
//! Every joystick the host reports gets its own pressed-button set and axis
//! table. The tracker also remembers which joystick was touched last, so a
//! host with several controllers connected can tell which one is in use.

use rustc_hash::{FxHashMap, FxHashSet};
use serde::{Deserialize, Serialize};

/// Host-assigned joystick identifier.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct JoystickId(pub u32);

impl JoystickId {
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    #[must_use]
    pub const fn index(self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for JoystickId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Joystick {}", self.0)
    }
}

/// Zero `value` if it lies inside the deadzone, clamping it to [-1, 1].
#[must_use]
pub fn apply_deadzone(value: f32, deadzone: f32) -> f32 {
    let value = value.clamp(-1.0, 1.0);
    if value.abs() < deadzone {
        0.0
    } else {
        value
    }
}

#[derive(Clone, Debug, Default)]
struct JoystickState {
    buttons: FxHashSet<u32>,
    /// Axis values after the deadzone; zero entries are dropped.
    axes: FxHashMap<u32, f32>,
    /// Frame of the last button press or live axis movement.
    last_used: Option<u64>,
}

/// Tracks all known joysticks.
#[derive(Clone, Debug, Default)]
pub struct JoystickTracker {
    joysticks: FxHashMap<JoystickId, JoystickState>,
    frame: u64,
}

impl JoystickTracker {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a joystick. Joysticks are also registered implicitly by
    /// their first event.
    pub fn connect(&mut self, id: JoystickId) {
        self.joysticks.entry(id).or_default();
    }

    /// Forget a joystick and everything it held. Returns whether it was known.
    pub fn disconnect(&mut self, id: JoystickId) -> bool {
        self.joysticks.remove(&id).is_some()
    }

    #[must_use]
    pub fn is_connected(&self, id: JoystickId) -> bool {
        self.joysticks.contains_key(&id)
    }

    /// Number of known joysticks.
    #[must_use]
    pub fn count(&self) -> usize {
        self.joysticks.len()
    }

    /// More than one joystick is known; the host may want the player to
    /// choose one.
    #[must_use]
    pub fn multiple_joysticks(&self) -> bool {
        self.joysticks.len() > 1
    }

    /// The joystick used most recently.
    ///
    /// Joysticks used in the same frame resolve to the lowest id, as does a
    /// set of joysticks none of which has been used yet.
    #[must_use]
    pub fn active_joystick(&self) -> Option<JoystickId> {
        self.joysticks
            .iter()
            .map(|(id, state)| (state.last_used, *id))
            .max_by(|a, b| a.0.cmp(&b.0).then(b.1.cmp(&a.1)))
            .map(|(_, id)| id)
    }

    /// Record a button press. Returns `false` if it was already held.
    pub fn button_down(&mut self, id: JoystickId, button: u32) -> bool {
        let frame = self.frame;
        let state = self.joysticks.entry(id).or_default();
        state.last_used = Some(frame);
        state.buttons.insert(button)
    }

    /// Record a button release. Returns `false` if it was not held.
    pub fn button_up(&mut self, id: JoystickId, button: u32) -> bool {
        self.joysticks
            .get_mut(&id)
            .is_some_and(|state| state.buttons.remove(&button))
    }

    #[must_use]
    pub fn is_pressed(&self, id: JoystickId, button: u32) -> bool {
        self.joysticks
            .get(&id)
            .is_some_and(|state| state.buttons.contains(&button))
    }

    /// Held buttons of one joystick.
    pub fn pressed_buttons(&self, id: JoystickId) -> impl Iterator<Item = u32> + '_ {
        self.joysticks
            .get(&id)
            .into_iter()
            .flat_map(|state| state.buttons.iter().copied())
    }

    /// Whether `button` is held on any joystick.
    #[must_use]
    pub fn is_pressed_anywhere(&self, button: u32) -> bool {
        self.joysticks.values().any(|state| state.buttons.contains(&button))
    }

    /// Record an axis position. Returns the value after the deadzone.
    pub fn set_axis(&mut self, id: JoystickId, axis: u32, value: f32, deadzone: f32) -> f32 {
        let frame = self.frame;
        let value = apply_deadzone(value, deadzone);
        let state = self.joysticks.entry(id).or_default();
        if value == 0.0 {
            state.axes.remove(&axis);
        } else {
            state.axes.insert(axis, value);
            state.last_used = Some(frame);
        }
        value
    }

    /// Axis value after the deadzone (zero if unknown).
    #[must_use]
    pub fn axis(&self, id: JoystickId, axis: u32) -> f32 {
        self.joysticks
            .get(&id)
            .and_then(|state| state.axes.get(&axis))
            .copied()
            .unwrap_or(0.0)
    }

    /// Every live (non-zero) axis across all joysticks.
    pub fn live_axes(&self) -> impl Iterator<Item = (JoystickId, u32, f32)> + '_ {
        self.joysticks.iter().flat_map(|(id, state)| {
            state.axes.iter().map(move |(axis, value)| (*id, *axis, *value))
        })
    }

    /// Any button held or axis outside the deadzone.
    #[must_use]
    pub fn is_engaged(&self) -> bool {
        self.joysticks
            .values()
            .any(|state| !state.buttons.is_empty() || !state.axes.is_empty())
    }

    /// Advance the frame counter used for recency.
    pub fn end_frame(&mut self) {
        self.frame += 1;
    }
}
