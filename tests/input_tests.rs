//! Input aggregator tests.
//!
//! These tests verify device handling independent of game outcomes:
//! - Idle detection and what counts as activity
//! - Step debouncing
//! - Joystick grouping, deadzone and disambiguation
//! - Custom bindings and configuration

use proptest::prelude::*;

use quatter::input::codes::{axis, button, key, mouse};
use quatter::{
    Action, AxisRole, Bindings, CommandBuffer, Game, HostCommand, InputAggregator, InputConfig,
    InputSource, JoystickId, PieceId, StepDirection, TableConfig, Vec2, Vec3,
};

fn setup(config: InputConfig) -> (InputAggregator, Game, CommandBuffer) {
    (
        InputAggregator::new(config),
        Game::new(TableConfig::new().with_jitter(0.0)),
        CommandBuffer::new(),
    )
}

fn count(host: &CommandBuffer, command: &HostCommand) -> usize {
    host.commands().iter().filter(|c| *c == command).count()
}

// =============================================================================
// Idle detection
// =============================================================================

proptest! {
    #[test]
    fn prop_idle_only_after_threshold(frames in prop::collection::vec(0.001f32..0.5, 1..100)) {
        let (mut input, mut game, mut host) = setup(InputConfig::default());
        let mut elapsed = 0.0f32;

        for dt in frames {
            input.update(dt, Vec3::ZERO, &mut game, &mut host);
            elapsed += dt;
            if elapsed < 4.99 {
                prop_assert!(!input.is_idle());
            }
            if elapsed > 5.01 {
                prop_assert!(input.is_idle());
            }
        }
    }

    #[test]
    fn prop_activity_resets_idle(split in 0.1f32..4.9) {
        let (mut input, mut game, mut host) = setup(InputConfig::default());
        input.update(split, Vec3::ZERO, &mut game, &mut host);
        input.on_key_down(key::LEFT);
        input.on_key_up(key::LEFT);
        input.update(4.8, Vec3::ZERO, &mut game, &mut host);
        prop_assert!(!input.is_idle());
    }
}

#[test]
fn test_idle_threshold_is_inclusive() {
    let config = InputConfig::new().with_idle_threshold(2.0);
    let (mut input, mut game, mut host) = setup(config);

    input.update(1.5, Vec3::ZERO, &mut game, &mut host);
    assert!(!input.is_idle());
    input.update(0.5, Vec3::ZERO, &mut game, &mut host);
    assert!(input.is_idle());
}

#[test]
fn test_idle_resets_camera_smoothing() {
    let (mut input, mut game, mut host) = setup(InputConfig::default());
    input.on_key_down(key::RIGHT);
    input.update(0.1, Vec3::ZERO, &mut game, &mut host);
    input.on_key_up(key::RIGHT);
    assert!(!input.state().intent().is_zero());

    input.update(5.0, Vec3::ZERO, &mut game, &mut host);
    assert!(input.is_idle());
    assert!(input.state().intent().is_zero());
}

#[test]
fn test_activity_sources() {
    let (mut input, mut game, mut host) = setup(InputConfig::default());

    let wake: [&dyn Fn(&mut InputAggregator); 4] = [
        &|i: &mut InputAggregator| i.on_mouse_move(Vec2::new(1.0, 0.0)),
        &|i: &mut InputAggregator| i.on_mouse_wheel(-1.0),
        &|i: &mut InputAggregator| i.on_joystick_button_down(JoystickId::new(0), button::A),
        &|i: &mut InputAggregator| i.on_axis_move(JoystickId::new(0), axis::LEFT_Y, -0.8),
    ];
    for event in wake {
        input.update(5.0, Vec3::ZERO, &mut game, &mut host);
        assert!(input.is_idle());
        event(&mut input);
        assert!(!input.is_idle());
        input.on_joystick_button_up(JoystickId::new(0), button::A);
        input.on_axis_move(JoystickId::new(0), axis::LEFT_Y, 0.0);
    }
}

#[test]
fn test_idle_suppresses_proximity_but_not_actions() {
    let (mut input, mut game, mut host) = setup(InputConfig::default());
    input.update(5.0, Vec3::ZERO, &mut game, &mut host);
    assert_eq!(game.table().selected(), None);

    // Screenshot from an idle state still fires, and wakes the aggregator.
    input.on_key_down(key::P);
    input.update(0.1, Vec3::ZERO, &mut game, &mut host);
    assert_eq!(count(&host, &HostCommand::Screenshot), 1);
    assert!(!input.is_idle());
}

// =============================================================================
// Step debouncing
// =============================================================================

#[test]
fn test_held_step_repeats_at_interval() {
    let (mut input, mut game, mut host) = setup(InputConfig::default());
    input.on_key_down(key::E);

    let mut steps = 0;
    let mut last = game.selection().selected();
    for _ in 0..60 {
        input.update(1.0 / 60.0, Vec3::ZERO, &mut game, &mut host);
        if game.selection().selected() != last {
            steps += 1;
            last = game.selection().selected();
        }
    }
    // One second held: immediate step plus one every 0.23s.
    assert_eq!(steps, 5);
}

#[test]
fn test_fast_taps_are_debounced() {
    let (mut input, mut game, mut host) = setup(InputConfig::default());
    let mut selections = Vec::new();
    for _ in 0..6 {
        input.on_key_down(key::Q);
        input.update(0.05, Vec3::ZERO, &mut game, &mut host);
        input.on_key_up(key::Q);
        selections.push(game.selection().selected());
    }
    selections.dedup();
    // Taps 0.05s apart: the first steps at once, the next one to pass the
    // 0.23s gate is the sixth.
    assert_eq!(selections.len(), 2);
}

#[test]
fn test_tap_released_before_update_still_steps() {
    let (mut input, mut game, mut host) = setup(InputConfig::default());
    let start = PieceId::new(5).unwrap();
    game.select_piece(start, &mut host).unwrap();

    input.on_key_down(key::E);
    input.on_key_up(key::E);
    input.update(0.5, Vec3::ZERO, &mut game, &mut host);
    assert_ne!(game.selection().selected(), Some(start));

    // A tap inside the debounce window is dropped, like a held repeat.
    let stepped = game.selection().selected();
    input.on_key_down(key::E);
    input.on_key_up(key::E);
    input.update(0.1, Vec3::ZERO, &mut game, &mut host);
    input.on_key_down(key::E);
    input.on_key_up(key::E);
    input.update(0.01, Vec3::ZERO, &mut game, &mut host);
    assert_eq!(game.selection().selected(), stepped);
}

#[test]
fn test_step_direction_from_bindings() {
    assert_eq!(Action::StepNext.step_direction(), Some(StepDirection::Next));
    let bindings = Bindings::default();
    assert_eq!(bindings.action(InputSource::Key(key::Q)), Some(Action::StepPrevious));
    assert_eq!(
        bindings.action(InputSource::JoystickButton(button::RIGHT_SHOULDER)),
        Some(Action::StepNext)
    );
}

// =============================================================================
// Joysticks
// =============================================================================

#[test]
fn test_joystick_buttons_grouped() {
    let (mut input, _, _) = setup(InputConfig::default());
    let first = JoystickId::new(0);
    let second = JoystickId::new(1);

    input.on_joystick_button_down(first, button::A);
    input.on_joystick_button_down(second, button::B);

    let joysticks = input.state().joysticks();
    assert!(joysticks.is_pressed(first, button::A));
    assert!(!joysticks.is_pressed(first, button::B));
    assert!(joysticks.is_pressed(second, button::B));
    assert_eq!(joysticks.count(), 2);
    assert!(input.multiple_joysticks());
}

#[test]
fn test_unbound_joystick_input_ignored() {
    let (mut input, mut game, mut host) = setup(InputConfig::default());
    input.update(3.0, Vec3::ZERO, &mut game, &mut host);

    input.on_joystick_button_down(JoystickId::new(0), button::GUIDE);
    input.on_axis_move(JoystickId::new(0), axis::RIGHT_X, 1.0);

    assert_eq!(input.state().idle_time(), 3.0);
    assert_eq!(input.state().joysticks().count(), 0);
}

#[test]
fn test_active_joystick_follows_last_use() {
    let (mut input, mut game, mut host) = setup(InputConfig::default());
    input.on_joystick_connected(JoystickId::new(0));
    input.on_joystick_connected(JoystickId::new(1));
    assert_eq!(input.active_joystick(), Some(JoystickId::new(0)));

    input.on_joystick_button_down(JoystickId::new(1), button::X);
    input.update(0.1, Vec3::ZERO, &mut game, &mut host);
    assert_eq!(input.active_joystick(), Some(JoystickId::new(1)));

    input.on_axis_move(JoystickId::new(0), axis::LEFT_X, 0.5);
    input.update(0.1, Vec3::ZERO, &mut game, &mut host);
    assert_eq!(input.active_joystick(), Some(JoystickId::new(0)));

    input.on_joystick_disconnected(JoystickId::new(0));
    assert!(!input.multiple_joysticks());
    assert_eq!(input.active_joystick(), Some(JoystickId::new(1)));
}

#[test]
fn test_stick_inside_deadzone_does_not_move_camera() {
    let (mut input, mut game, mut host) = setup(InputConfig::default());
    input.on_axis_move(JoystickId::new(0), axis::LEFT_X, 0.3);
    input.update(0.1, Vec3::ZERO, &mut game, &mut host);
    assert!(!host
        .commands()
        .iter()
        .any(|c| matches!(c, HostCommand::CameraMove { .. })));
}

// =============================================================================
// Configuration
// =============================================================================

#[test]
fn test_custom_bindings() {
    let bindings = Bindings::empty()
        .with_action(InputSource::Key(key::RETURN), Action::Screenshot)
        .with_action(InputSource::Mouse(mouse::MIDDLE), Action::ToggleMusic)
        .with_axis(axis::RIGHT_Y, AxisRole::Zoom);
    let (mut input, mut game, mut host) = setup(InputConfig::new().with_bindings(bindings));

    input.on_key_down(key::RETURN);
    input.on_key_down(key::SPACE);
    input.on_mouse_button_down(mouse::MIDDLE);
    input.on_axis_move(JoystickId::new(0), axis::RIGHT_Y, -1.0);
    input.update(0.1, Vec3::ZERO, &mut game, &mut host);

    assert_eq!(count(&host, &HostCommand::Screenshot), 1);
    assert_eq!(count(&host, &HostCommand::MusicToggle), 1);
    assert!(!input.state().is_key_pressed(key::SPACE));
    assert!(host
        .commands()
        .iter()
        .any(|c| matches!(c, HostCommand::CameraMove { zoom, .. } if *zoom > 0.0)));
}

#[test]
fn test_volume_step_config() {
    let config = InputConfig {
        volume_step: 0.25,
        ..InputConfig::default()
    };
    let (mut input, mut game, mut host) = setup(config);
    input.on_key_down(key::KP_PLUS);
    input.update(0.1, Vec3::ZERO, &mut game, &mut host);
    input.on_key_up(key::KP_PLUS);
    input.on_key_down(key::KP_MINUS);
    input.update(0.1, Vec3::ZERO, &mut game, &mut host);

    assert_eq!(count(&host, &HostCommand::MusicGain(0.25)), 1);
    assert_eq!(count(&host, &HostCommand::MusicGain(-0.25)), 1);
}

#[test]
fn test_config_from_json() {
    let config: InputConfig =
        serde_json::from_str(r#"{ "idle_threshold": 10.0, "deadzone": 0.2 }"#).unwrap();
    assert_eq!(config.idle_threshold, 10.0);
    assert_eq!(config.deadzone, 0.2);
    assert_eq!(config.step_interval, 0.23);
    assert_eq!(config.bindings, Bindings::default());
}
