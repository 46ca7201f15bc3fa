//! Semantic actions and the device bindings that trigger them.
//!
//! Bindings map an [`InputSource`] (a key, a mouse button or a joystick
//! button) to an [`Action`], and a joystick axis to an [`AxisRole`]. Codes
//! without a binding are unknown: the aggregator ignores them entirely.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use super::codes::{axis, button, key, mouse};
use crate::core::Vec2;
use crate::selection::StepDirection;

/// What the player asked for.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Action {
    /// Pick the selected piece, or put the picked one.
    Confirm,
    StepNext,
    StepPrevious,
    PanLeft,
    PanRight,
    PanUp,
    PanDown,
    ZoomIn,
    ZoomOut,
    Screenshot,
    /// Start a new game.
    Reset,
    ToggleMusic,
    VolumeUp,
    VolumeDown,
    Exit,
}

impl Action {
    /// Fires once per press, however long the source is held.
    #[must_use]
    pub const fn is_one_shot(self) -> bool {
        matches!(
            self,
            Action::Confirm
                | Action::Screenshot
                | Action::Reset
                | Action::ToggleMusic
                | Action::VolumeUp
                | Action::VolumeDown
                | Action::Exit
        )
    }

    /// Direction of a step action.
    ///
    /// When both directions are requested in one frame, the smallest
    /// direction wins, so `StepNext` beats `StepPrevious`.
    #[must_use]
    pub const fn step_direction(self) -> Option<StepDirection> {
        match self {
            Action::StepNext => Some(StepDirection::Next),
            Action::StepPrevious => Some(StepDirection::Previous),
            _ => None,
        }
    }

    /// Unit rotation and zoom intent of a held camera action.
    #[must_use]
    pub const fn camera_intent(self) -> Option<(Vec2, f32)> {
        match self {
            Action::PanLeft => Some((Vec2::new(-1.0, 0.0), 0.0)),
            Action::PanRight => Some((Vec2::new(1.0, 0.0), 0.0)),
            Action::PanUp => Some((Vec2::new(0.0, 1.0), 0.0)),
            Action::PanDown => Some((Vec2::new(0.0, -1.0), 0.0)),
            Action::ZoomIn => Some((Vec2::ZERO, 1.0)),
            Action::ZoomOut => Some((Vec2::ZERO, -1.0)),
            _ => None,
        }
    }
}

/// A bindable device input.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum InputSource {
    Key(u32),
    Mouse(u32),
    /// Button on any joystick.
    JoystickButton(u32),
}

/// What an analog axis controls.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AxisRole {
    /// Horizontal camera rotation.
    Yaw,
    /// Vertical camera rotation.
    Pitch,
    Zoom,
}

/// Device-to-action mapping.
///
/// `Default` gives the standard layout: arrows or WASD pan, Tab/E and Q step,
/// Space, Return or the left mouse button confirm, and the right mouse
/// button drags the camera. Game controllers confirm with A, step with the
/// shoulder buttons and pan with the d-pad or the left stick.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(from = "BindingsRepr", into = "BindingsRepr")]
pub struct Bindings {
    actions: FxHashMap<InputSource, Action>,
    axes: FxHashMap<u32, AxisRole>,
    drag_button: Option<u32>,
}

impl Default for Bindings {
    fn default() -> Self {
        use Action::*;

        let keys = [
            (key::SPACE, Confirm),
            (key::RETURN, Confirm),
            (key::TAB, StepNext),
            (key::E, StepNext),
            (key::Q, StepPrevious),
            (key::LEFT, PanLeft),
            (key::A, PanLeft),
            (key::RIGHT, PanRight),
            (key::D, PanRight),
            (key::UP, PanUp),
            (key::W, PanUp),
            (key::DOWN, PanDown),
            (key::S, PanDown),
            (key::P, Screenshot),
            (key::R, Reset),
            (key::M, ToggleMusic),
            (key::PLUS, VolumeUp),
            (key::EQUALS, VolumeUp),
            (key::KP_PLUS, VolumeUp),
            (key::MINUS, VolumeDown),
            (key::KP_MINUS, VolumeDown),
            (key::ESCAPE, Exit),
        ];
        let buttons = [
            (button::A, Confirm),
            (button::RIGHT_SHOULDER, StepNext),
            (button::LEFT_SHOULDER, StepPrevious),
            (button::DPAD_LEFT, PanLeft),
            (button::DPAD_RIGHT, PanRight),
            (button::DPAD_UP, PanUp),
            (button::DPAD_DOWN, PanDown),
            (button::X, ZoomIn),
            (button::B, ZoomOut),
            (button::Y, Screenshot),
            (button::BACK, ToggleMusic),
            (button::START, Reset),
        ];

        let mut bindings = Self::empty()
            .with_action(InputSource::Mouse(mouse::LEFT), Confirm)
            .with_drag_button(Some(mouse::RIGHT))
            .with_axis(axis::LEFT_X, AxisRole::Yaw)
            .with_axis(axis::LEFT_Y, AxisRole::Pitch)
            .with_axis(axis::RIGHT_Y, AxisRole::Zoom);
        for (code, action) in keys {
            bindings.actions.insert(InputSource::Key(code), action);
        }
        for (code, action) in buttons {
            bindings.actions.insert(InputSource::JoystickButton(code), action);
        }
        bindings
    }
}

impl Bindings {
    /// Standard layout.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// No bindings at all.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            actions: FxHashMap::default(),
            axes: FxHashMap::default(),
            drag_button: None,
        }
    }

    /// Bind `source` to `action`, replacing any previous binding.
    #[must_use]
    pub fn with_action(mut self, source: InputSource, action: Action) -> Self {
        self.actions.insert(source, action);
        self
    }

    /// Bind joystick axis `axis` to `role`.
    #[must_use]
    pub fn with_axis(mut self, axis: u32, role: AxisRole) -> Self {
        self.axes.insert(axis, role);
        self
    }

    /// Mouse button that turns mouse movement into camera rotation.
    #[must_use]
    pub fn with_drag_button(mut self, button: Option<u32>) -> Self {
        self.drag_button = button;
        self
    }

    /// Remove the binding of `source`, returning the action it had.
    pub fn unbind(&mut self, source: InputSource) -> Option<Action> {
        self.actions.remove(&source)
    }

    #[must_use]
    pub fn action(&self, source: InputSource) -> Option<Action> {
        self.actions.get(&source).copied()
    }

    #[must_use]
    pub fn axis(&self, axis: u32) -> Option<AxisRole> {
        self.axes.get(&axis).copied()
    }

    #[must_use]
    pub fn drag_button(&self) -> Option<u32> {
        self.drag_button
    }

    /// Whether the aggregator should track `source` at all.
    #[must_use]
    pub fn is_known(&self, source: InputSource) -> bool {
        self.actions.contains_key(&source)
            || matches!(source, InputSource::Mouse(b) if self.drag_button == Some(b))
    }

    /// All sources bound to `action`.
    pub fn sources_for(&self, action: Action) -> impl Iterator<Item = InputSource> + '_ {
        self.actions
            .iter()
            .filter(move |(_, a)| **a == action)
            .map(|(source, _)| *source)
    }
}

/// Serialized form: JSON object keys must be strings, so the maps travel as
/// sorted lists of pairs.
#[derive(Serialize, Deserialize)]
struct BindingsRepr {
    actions: Vec<(InputSource, Action)>,
    axes: Vec<(u32, AxisRole)>,
    drag_button: Option<u32>,
}

impl From<BindingsRepr> for Bindings {
    fn from(repr: BindingsRepr) -> Self {
        Self {
            actions: repr.actions.into_iter().collect(),
            axes: repr.axes.into_iter().collect(),
            drag_button: repr.drag_button,
        }
    }
}

impl From<Bindings> for BindingsRepr {
    fn from(bindings: Bindings) -> Self {
        let mut actions: Vec<_> = bindings.actions.into_iter().collect();
        actions.sort_unstable();
        let mut axes: Vec<_> = bindings.axes.into_iter().collect();
        axes.sort_unstable_by_key(|(axis, _)| *axis);
        Self {
            actions,
            axes,
            drag_button: bindings.drag_button,
        }
    }
}
