//! Turns raw device events into game actions.
//!
//! ## Frame model
//!
//! The host forwards each device event to one of the `on_*` handlers as it
//! arrives, then calls [`InputAggregator::update`] once per frame. Handlers
//! only record state; everything time-dependent happens in `update`:
//!
//! 1. Idle bookkeeping
//! 2. One-shot actions queued by this frame's presses (confirm, screenshot...)
//! 3. Debounced step actions, for presses since the last update and for
//!    step inputs still held
//! 4. Camera intent from held pan/zoom inputs, axes, mouse drag and wheel
//! 5. Proximity selection, unless idle
//!
//! Codes without a binding are ignored: they are not recorded and do not
//! count as activity.

use rustc_hash::FxHashSet;
use smallvec::SmallVec;
use tracing::{debug, trace};

use super::bindings::{Action, AxisRole, InputSource};
use super::joystick::{JoystickId, JoystickTracker};
use super::smoothing::CameraIntent;
use crate::core::{InputConfig, Vec2, Vec3};
use crate::game::Game;
use crate::host::Host;
use crate::rules::Transition;
use crate::selection::StepDirection;

/// Everything the aggregator knows about the devices.
#[derive(Clone, Debug, Default)]
pub struct InputState {
    keys: FxHashSet<u32>,
    mouse_buttons: FxHashSet<u32>,
    joysticks: JoystickTracker,
    idle: bool,
    /// Seconds since the last qualifying input.
    idle_time: f32,
    /// Seconds since the last step action.
    since_step: f32,
    intent: CameraIntent,
}

impl InputState {
    #[must_use]
    pub fn is_idle(&self) -> bool {
        self.idle
    }

    #[must_use]
    pub fn idle_time(&self) -> f32 {
        self.idle_time
    }

    #[must_use]
    pub fn since_step(&self) -> f32 {
        self.since_step
    }

    #[must_use]
    pub fn is_key_pressed(&self, code: u32) -> bool {
        self.keys.contains(&code)
    }

    #[must_use]
    pub fn is_mouse_pressed(&self, code: u32) -> bool {
        self.mouse_buttons.contains(&code)
    }

    #[must_use]
    pub fn joysticks(&self) -> &JoystickTracker {
        &self.joysticks
    }

    /// Smoothed camera intent.
    #[must_use]
    pub fn intent(&self) -> CameraIntent {
        self.intent
    }

    fn is_holding(&self) -> bool {
        !self.keys.is_empty() || !self.mouse_buttons.is_empty() || self.joysticks.is_engaged()
    }
}

/// What one call to [`InputAggregator::update`] did.
#[derive(Clone, Debug, Default)]
pub struct FrameReport {
    /// Phase transitions caused by this frame's actions, in order.
    pub transitions: SmallVec<[Transition; 2]>,
    /// The aggregator went idle this frame.
    pub entered_idle: bool,
    /// The player moved the camera this frame.
    pub camera_moved: bool,
}

/// Device input interpreter.
#[derive(Clone, Debug)]
pub struct InputAggregator {
    config: InputConfig,
    state: InputState,
    /// One-shot actions pressed since the last update.
    pending: SmallVec<[Action; 4]>,
    /// Step pressed since the last update, even if already released.
    step_request: Option<StepDirection>,
    mouse_delta: Vec2,
    wheel_delta: f32,
}

impl Default for InputAggregator {
    fn default() -> Self {
        Self::new(InputConfig::default())
    }
}

impl InputAggregator {
    #[must_use]
    pub fn new(config: InputConfig) -> Self {
        let state = InputState {
            // The first step press acts at once.
            since_step: config.step_interval,
            ..InputState::default()
        };
        Self {
            config,
            state,
            pending: SmallVec::new(),
            step_request: None,
            mouse_delta: Vec2::ZERO,
            wheel_delta: 0.0,
        }
    }

    #[must_use]
    pub fn config(&self) -> &InputConfig {
        &self.config
    }

    #[must_use]
    pub fn state(&self) -> &InputState {
        &self.state
    }

    #[must_use]
    pub fn is_idle(&self) -> bool {
        self.state.idle
    }

    #[must_use]
    pub fn active_joystick(&self) -> Option<JoystickId> {
        self.state.joysticks.active_joystick()
    }

    #[must_use]
    pub fn multiple_joysticks(&self) -> bool {
        self.state.joysticks.multiple_joysticks()
    }

    // === Handlers ===

    pub fn on_key_down(&mut self, code: u32) {
        let source = InputSource::Key(code);
        if !self.recognize(source) {
            return;
        }
        if self.state.keys.insert(code) {
            self.press(source);
        }
    }

    pub fn on_key_up(&mut self, code: u32) {
        self.state.keys.remove(&code);
    }

    pub fn on_mouse_button_down(&mut self, code: u32) {
        let source = InputSource::Mouse(code);
        if !self.recognize(source) {
            return;
        }
        if self.state.mouse_buttons.insert(code) {
            self.press(source);
        }
    }

    pub fn on_mouse_button_up(&mut self, code: u32) {
        self.state.mouse_buttons.remove(&code);
    }

    /// Relative mouse motion. Rotates the camera while the drag button is held.
    pub fn on_mouse_move(&mut self, delta: Vec2) {
        if delta == Vec2::ZERO {
            return;
        }
        self.touch();
        let dragging = self
            .config
            .bindings
            .drag_button()
            .is_some_and(|button| self.state.mouse_buttons.contains(&button));
        if dragging {
            self.mouse_delta += delta;
        }
    }

    pub fn on_mouse_wheel(&mut self, delta: f32) {
        if delta == 0.0 {
            return;
        }
        self.touch();
        self.wheel_delta += delta;
    }

    pub fn on_joystick_button_down(&mut self, joystick: JoystickId, code: u32) {
        let source = InputSource::JoystickButton(code);
        if !self.recognize(source) {
            return;
        }
        if self.state.joysticks.button_down(joystick, code) {
            self.press(source);
        }
    }

    pub fn on_joystick_button_up(&mut self, joystick: JoystickId, code: u32) {
        self.state.joysticks.button_up(joystick, code);
    }

    /// Axis position in [-1, 1]. Values inside the deadzone read as zero.
    pub fn on_axis_move(&mut self, joystick: JoystickId, axis: u32, value: f32) {
        if self.config.bindings.axis(axis).is_none() {
            trace!(%joystick, axis, "unbound axis ignored");
            return;
        }
        let value = self
            .state
            .joysticks
            .set_axis(joystick, axis, value, self.config.deadzone);
        if value != 0.0 {
            self.touch();
        }
    }

    pub fn on_joystick_connected(&mut self, joystick: JoystickId) {
        self.state.joysticks.connect(joystick);
        debug!(%joystick, count = self.state.joysticks.count(), "joystick connected");
    }

    pub fn on_joystick_disconnected(&mut self, joystick: JoystickId) {
        if self.state.joysticks.disconnect(joystick) {
            debug!(%joystick, "joystick disconnected");
        }
    }

    // === Frame ===

    /// Advance by `elapsed` seconds and act on the recorded input.
    pub fn update(
        &mut self,
        elapsed: f32,
        camera: Vec3,
        game: &mut Game,
        host: &mut impl Host,
    ) -> FrameReport {
        let dt = elapsed.max(0.0);
        let mut report = FrameReport::default();

        // Held inputs keep the idle timer at zero.
        if self.state.is_holding() {
            self.touch();
        } else {
            self.state.idle_time += dt;
        }
        if !self.state.idle && self.state.idle_time >= self.config.idle_threshold {
            self.state.idle = true;
            self.state.intent.reset();
            report.entered_idle = true;
            debug!(idle_time = self.state.idle_time, "input idle");
        }

        self.state.since_step += dt;

        let pending = std::mem::take(&mut self.pending);
        for action in pending {
            if let Some(transition) = self.fire(action, camera, game, host) {
                report.transitions.push(transition);
            }
        }

        let held = self.held_actions();

        // A request the debounce swallows is dropped, like a held repeat.
        let direction = self
            .step_request
            .take()
            .into_iter()
            .chain(held.iter().filter_map(|a| a.step_direction()))
            .min();
        if let Some(direction) = direction {
            if self.state.since_step >= self.config.step_interval {
                self.state.since_step = 0.0;
                trace!(?direction, "step");
                game.step(direction, camera, host);
            }
        }

        report.camera_moved = self.move_camera(&held, dt, host);
        if report.camera_moved {
            game.follow_camera();
        }

        if !self.state.idle {
            game.track_camera(camera, host);
        }

        self.state.joysticks.end_frame();
        report
    }

    /// Clear timers, smoothing and queued actions. Held inputs stay recorded
    /// so their releases still match.
    pub fn reset(&mut self) {
        self.state.idle = false;
        self.state.idle_time = 0.0;
        self.state.since_step = self.config.step_interval;
        self.state.intent.reset();
        self.pending.clear();
        self.step_request = None;
        self.mouse_delta = Vec2::ZERO;
        self.wheel_delta = 0.0;
    }

    fn recognize(&self, source: InputSource) -> bool {
        let known = self.config.bindings.is_known(source);
        if !known {
            trace!(?source, "unbound input ignored");
        }
        known
    }

    /// A bound source went down.
    fn press(&mut self, source: InputSource) {
        self.touch();
        if let Some(action) = self.config.bindings.action(source) {
            if action.is_one_shot() {
                self.pending.push(action);
            } else if let Some(direction) = action.step_direction() {
                self.step_request = Some(match self.step_request {
                    Some(earlier) => earlier.min(direction),
                    None => direction,
                });
            }
        }
    }

    /// Qualifying input: back to zero idle time, leaving idle if needed.
    fn touch(&mut self) {
        self.state.idle_time = 0.0;
        if self.state.idle {
            self.state.idle = false;
            debug!("input active");
        }
    }

    fn fire(
        &mut self,
        action: Action,
        camera: Vec3,
        game: &mut Game,
        host: &mut impl Host,
    ) -> Option<Transition> {
        debug!(?action, "action");
        match action {
            Action::Confirm => match game.confirm(camera, host) {
                Ok(transition) => return transition,
                Err(err) => debug!(%err, "confirm rejected"),
            },
            Action::Screenshot => host.request_screenshot(),
            Action::Reset => {
                game.reset(host);
                self.state.intent.reset();
            }
            Action::ToggleMusic => host.request_music_toggle(),
            Action::VolumeUp => host.request_music_gain(self.config.volume_step),
            Action::VolumeDown => host.request_music_gain(-self.config.volume_step),
            Action::Exit => host.request_exit(),
            // Continuous actions never queue.
            _ => {}
        }
        None
    }

    fn held_actions(&self) -> SmallVec<[Action; 8]> {
        let bindings = &self.config.bindings;
        let keys = self.state.keys.iter().map(|&c| InputSource::Key(c));
        let mouse = self.state.mouse_buttons.iter().map(|&c| InputSource::Mouse(c));
        let mut held: SmallVec<[Action; 8]> = keys
            .chain(mouse)
            .filter_map(|source| bindings.action(source))
            .collect();
        held.extend(
            [
                Action::StepNext,
                Action::StepPrevious,
                Action::PanLeft,
                Action::PanRight,
                Action::PanUp,
                Action::PanDown,
                Action::ZoomIn,
                Action::ZoomOut,
            ]
            .into_iter()
            .filter(|action| {
                bindings.sources_for(*action).any(|source| match source {
                    InputSource::JoystickButton(code) => {
                        self.state.joysticks.is_pressed_anywhere(code)
                    }
                    _ => false,
                })
            }),
        );
        held
    }

    /// Feed held input into the smoothed intent and ask the host to move the
    /// camera. Returns whether the player asked for movement this frame.
    fn move_camera(&mut self, held: &[Action], dt: f32, host: &mut impl Host) -> bool {
        let mut target = CameraIntent::default();
        for (rotation, zoom) in held.iter().filter_map(|a| a.camera_intent()) {
            target.rotation += rotation;
            target.zoom += zoom;
        }
        for (_, axis, value) in self.state.joysticks.live_axes() {
            match self.config.bindings.axis(axis) {
                Some(AxisRole::Yaw) => target.rotation.x += value,
                // Stick up reads negative.
                Some(AxisRole::Pitch) => target.rotation.y -= value,
                Some(AxisRole::Zoom) => target.zoom -= value,
                None => {}
            }
        }
        target.rotation = Vec2::new(
            target.rotation.x.clamp(-1.0, 1.0),
            target.rotation.y.clamp(-1.0, 1.0),
        );
        target.zoom = target.zoom.clamp(-1.0, 1.0);

        let requested =
            !target.is_zero() || self.mouse_delta != Vec2::ZERO || self.wheel_delta != 0.0;

        if !self.state.idle {
            self.state
                .intent
                .update(target, self.config.camera_smoothing, dt);
        }

        let intent = self.state.intent;
        let rotation = intent.rotation * (self.config.pan_speed * dt)
            + self.mouse_delta * self.config.mouse_sensitivity;
        let zoom = intent.zoom * self.config.zoom_speed * dt + self.wheel_delta;
        self.mouse_delta = Vec2::ZERO;
        self.wheel_delta = 0.0;

        if rotation != Vec2::ZERO || zoom != 0.0 {
            host.request_camera_move(rotation, zoom);
        }
        requested
    }
}
