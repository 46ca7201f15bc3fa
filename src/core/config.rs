//! Configuration types.
//!
//! The host builds these at startup (or loads them from its own settings
//! files; both derive serde) and hands them to [`Quatter`](crate::Quatter):
//! - `InputConfig`: timing thresholds, camera feel, device bindings
//! - `TableConfig`: physical layout of the board and the resting pieces
//!
//! Defaults match the original tuning of the game.

use serde::{Deserialize, Serialize};

use crate::input::Bindings;

/// Seconds without qualifying input before the aggregator goes idle.
pub const IDLE_THRESHOLD: f32 = 5.0;

/// Minimum seconds between two step-selection actions.
pub const STEP_INTERVAL: f32 = 0.23;

/// Analog axis magnitude (on a [-1, 1] scale) below which input reads as zero.
pub const DEADZONE: f32 = 0.34;

/// Music gain change per volume action.
pub const VOLUME_STEP: f32 = 0.1;

/// Input interpretation settings.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InputConfig {
    /// Seconds of inactivity before entering idle.
    pub idle_threshold: f32,

    /// Minimum seconds between repeated step actions.
    pub step_interval: f32,

    /// Axis deadzone.
    pub deadzone: f32,

    /// Music gain delta per volume action.
    pub volume_step: f32,

    /// Exponential smoothing rate for camera intent (per second).
    ///
    /// Higher values follow raw input more closely.
    pub camera_smoothing: f32,

    /// Camera rotation per second at full pan input.
    pub pan_speed: f32,

    /// Camera zoom per second at full zoom input.
    pub zoom_speed: f32,

    /// Rotation per unit of mouse movement while dragging.
    pub mouse_sensitivity: f32,

    /// Device-to-action mapping.
    pub bindings: Bindings,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            idle_threshold: IDLE_THRESHOLD,
            step_interval: STEP_INTERVAL,
            deadzone: DEADZONE,
            volume_step: VOLUME_STEP,
            camera_smoothing: 8.0,
            pan_speed: 1.0,
            zoom_speed: 1.0,
            mouse_sensitivity: 0.1,
            bindings: Bindings::default(),
        }
    }
}

impl InputConfig {
    /// Create a configuration with default tuning and bindings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the idle threshold.
    #[must_use]
    pub fn with_idle_threshold(mut self, seconds: f32) -> Self {
        assert!(seconds > 0.0, "Idle threshold must be positive");
        self.idle_threshold = seconds;
        self
    }

    /// Set the step debounce interval.
    #[must_use]
    pub fn with_step_interval(mut self, seconds: f32) -> Self {
        assert!(seconds >= 0.0, "Step interval must not be negative");
        self.step_interval = seconds;
        self
    }

    /// Set the axis deadzone.
    #[must_use]
    pub fn with_deadzone(mut self, deadzone: f32) -> Self {
        assert!((0.0..1.0).contains(&deadzone), "Deadzone must be in [0, 1)");
        self.deadzone = deadzone;
        self
    }

    /// Set the camera smoothing rate.
    #[must_use]
    pub fn with_camera_smoothing(mut self, rate: f32) -> Self {
        self.camera_smoothing = rate;
        self
    }

    /// Replace the bindings.
    #[must_use]
    pub fn with_bindings(mut self, bindings: Bindings) -> Self {
        self.bindings = bindings;
        self
    }
}

/// Physical table layout, in host world units.
///
/// The board is centred on the origin in the XZ plane. Free pieces rest in
/// two 2x4 blocks left and right of the board (solid pieces left, hollow
/// pieces right).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TableConfig {
    /// Seed for the resting-position jitter.
    pub seed: u64,

    /// Edge length of one board square.
    pub square_size: f32,

    /// Distance between neighbouring resting pieces.
    pub piece_spacing: f32,

    /// Gap between the board edge and the nearest resting column.
    pub margin: f32,

    /// Maximum random offset of a resting piece on x and z.
    pub jitter: f32,
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            seed: 0,
            square_size: 1.0,
            piece_spacing: 1.0,
            margin: 1.0,
            jitter: 0.05,
        }
    }
}

impl TableConfig {
    /// Create a layout with default dimensions.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the jitter seed.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Set the jitter magnitude.
    #[must_use]
    pub fn with_jitter(mut self, jitter: f32) -> Self {
        self.jitter = jitter;
        self
    }

    /// Set the board square size.
    #[must_use]
    pub fn with_square_size(mut self, size: f32) -> Self {
        assert!(size > 0.0, "Square size must be positive");
        self.square_size = size;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::{codes, Action, InputSource};

    #[test]
    fn test_input_defaults() {
        let config = InputConfig::new();
        assert_eq!(config.idle_threshold, 5.0);
        assert_eq!(config.step_interval, 0.23);
        assert_eq!(config.deadzone, 0.34);
        assert_eq!(config.volume_step, 0.1);
        assert_eq!(
            config.bindings.action(InputSource::Key(codes::key::SPACE)),
            Some(Action::Confirm)
        );
    }

    #[test]
    fn test_input_builder() {
        let config = InputConfig::new()
            .with_idle_threshold(2.0)
            .with_step_interval(0.5)
            .with_deadzone(0.2)
            .with_camera_smoothing(4.0);

        assert_eq!(config.idle_threshold, 2.0);
        assert_eq!(config.step_interval, 0.5);
        assert_eq!(config.deadzone, 0.2);
        assert_eq!(config.camera_smoothing, 4.0);
    }

    #[test]
    #[should_panic(expected = "Deadzone must be in [0, 1)")]
    fn test_deadzone_out_of_range() {
        let _ = InputConfig::new().with_deadzone(1.5);
    }

    #[test]
    fn test_input_config_serde() {
        let config = InputConfig::new().with_idle_threshold(3.0);
        let json = serde_json::to_string(&config).unwrap();
        let restored: InputConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(config, restored);
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let config: TableConfig = serde_json::from_str(r#"{ "seed": 9 }"#).unwrap();
        assert_eq!(config.seed, 9);
        assert_eq!(config.jitter, 0.05);
        assert_eq!(config.square_size, 1.0);
    }

    #[test]
    fn test_table_builder() {
        let config = TableConfig::new()
            .with_seed(4)
            .with_jitter(0.0)
            .with_square_size(2.0);
        assert_eq!(config.seed, 4);
        assert_eq!(config.jitter, 0.0);
        assert_eq!(config.square_size, 2.0);
    }
}
