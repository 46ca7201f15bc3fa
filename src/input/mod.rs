//! Device input: bindings, joystick tracking and the per-frame aggregator.
//!
//! The host feeds raw events in; the aggregator decides what they mean:
//! - One-shot actions (confirm, screenshot, reset, music, exit)
//! - Debounced step selection
//! - Smoothed camera movement from keys, sticks and the mouse
//! - Idle detection, which pauses proximity selection

pub mod aggregator;
pub mod bindings;
pub mod codes;
pub mod joystick;
pub mod smoothing;

pub use aggregator::{FrameReport, InputAggregator, InputState};
pub use bindings::{Action, AxisRole, Bindings, InputSource};
pub use joystick::{apply_deadzone, JoystickId, JoystickTracker};
pub use smoothing::CameraIntent;
