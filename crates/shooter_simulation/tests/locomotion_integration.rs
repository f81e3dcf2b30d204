//! Locomotion integration: stance, camera, animation blend через SimulationPlugin

use std::time::Duration;

use bevy::prelude::*;
use bevy::time::TimeUpdateStrategy;
use shooter_simulation::combat::{ReloadAnimationFinished, ReloadStarted};
use shooter_simulation::input::LookSource;
use shooter_simulation::movement::{ControllerRotation, JumpRequested};
use shooter_simulation::*;

const TICK: Duration = Duration::from_micros(16_667);

fn create_app() -> (App, Entity) {
    let mut app = create_headless_app(1);
    app.add_plugins(SimulationPlugin)
        .insert_resource(TimeUpdateStrategy::ManualDuration(TICK));

    let config = ShooterConfig::default();
    let shooter = spawn_shooter(&mut app.world_mut().commands(), &config, Transform::default());
    app.update();

    (app, shooter)
}

fn events<E: Event + Clone>(app: &App) -> Vec<E> {
    app.world()
        .resource::<Events<E>>()
        .iter_current_update_events()
        .cloned()
        .collect()
}

fn act(app: &mut App, shooter: Entity, action: ShooterAction) {
    app.world_mut().send_event(ActionIntent::new(shooter, action));
    app.update();
}

fn blend(app: &App, shooter: Entity) -> AnimationBlend {
    *app.world().get::<AnimationBlend>(shooter).expect("blend")
}

#[test]
fn test_idle_grounded_is_hip() {
    let (mut app, shooter) = create_app();
    app.update();

    let blend = blend(&app, shooter);
    assert_eq!(blend.offset_state, OffsetState::Hip);
    assert_eq!(blend.recoil_weight, 0.5);
    assert!(!blend.turning_in_place);
}

#[test]
fn test_aiming_zooms_and_switches_offset_state() {
    let (mut app, shooter) = create_app();
    act(&mut app, shooter, ShooterAction::AimPressed);

    assert_eq!(blend(&app, shooter).offset_state, OffsetState::Aiming);
    assert_eq!(blend(&app, shooter).recoil_weight, 1.0);

    for _ in 0..120 {
        app.update();
    }
    let rig = app.world().get::<CameraRig>(shooter).expect("rig");
    assert_eq!(rig.current_fov, 35.0);
    assert_eq!(rig.base_turn_rate, 20.0);

    let spread = app.world().get::<CrosshairSpread>(shooter).expect("spread");
    assert!((spread.multiplier - (0.5 - 0.6)).abs() < 1e-4);
}

#[test]
fn test_crouch_then_jump_only_stands_up() {
    let (mut app, shooter) = create_app();

    act(&mut app, shooter, ShooterAction::CrouchPressed);
    let stance = *app.world().get::<Stance>(shooter).expect("stance");
    assert!(stance.is_crouching());
    assert_eq!(stance.max_walk_speed, 350.0);
    assert_eq!(blend(&app, shooter).recoil_weight, 0.1);

    act(&mut app, shooter, ShooterAction::Jump);
    assert!(events::<JumpRequested>(&app).is_empty());
    assert!(!app.world().get::<Stance>(shooter).expect("stance").is_crouching());

    act(&mut app, shooter, ShooterAction::Jump);
    assert_eq!(events::<JumpRequested>(&app), vec![JumpRequested { entity: shooter }]);
}

#[test]
fn test_crouch_ignored_while_falling() {
    let (mut app, shooter) = create_app();
    app.world_mut()
        .get_mut::<CharacterMotion>(shooter)
        .expect("motion")
        .is_falling = true;

    act(&mut app, shooter, ShooterAction::CrouchPressed);
    assert!(!app.world().get::<Stance>(shooter).expect("stance").is_crouching());
    assert_eq!(blend(&app, shooter).offset_state, OffsetState::InAir);
}

#[test]
fn test_capsule_shrinks_while_crouched() {
    let (mut app, shooter) = create_app();
    act(&mut app, shooter, ShooterAction::CrouchPressed);

    for _ in 0..240 {
        app.update();
    }
    let stance = app.world().get::<Stance>(shooter).expect("stance");
    assert_eq!(stance.capsule_half_height, 44.0);
    assert!((stance.mesh_offset - 44.0).abs() < 1e-2);
}

#[test]
fn test_sprint_adds_speed_until_released() {
    let (mut app, shooter) = create_app();
    act(&mut app, shooter, ShooterAction::SprintStart);
    assert_eq!(
        app.world().get::<Stance>(shooter).expect("stance").max_walk_speed,
        1850.0
    );

    act(&mut app, shooter, ShooterAction::SprintEnd);
    assert_eq!(
        app.world().get::<Stance>(shooter).expect("stance").max_walk_speed,
        650.0
    );
}

#[test]
fn test_standing_turn_accumulates_root_yaw_offset() {
    let (mut app, shooter) = create_app();
    app.update();

    app.world_mut()
        .get_mut::<CharacterMotion>(shooter)
        .expect("motion")
        .actor_yaw = 40.0;
    app.update();
    assert!((blend(&app, shooter).root_yaw_offset + 40.0).abs() < 1e-3);

    // Начали идти → offset сброшен
    app.world_mut()
        .get_mut::<CharacterMotion>(shooter)
        .expect("motion")
        .velocity = Vec3::new(0.0, 0.0, -200.0);
    app.update();
    assert_eq!(blend(&app, shooter).root_yaw_offset, 0.0);
}

#[test]
fn test_reloading_offset_state_follows_combat() {
    let (mut app, shooter) = create_app();
    act(&mut app, shooter, ShooterAction::FirePressed);
    act(&mut app, shooter, ShooterAction::FireReleased);
    for _ in 0..20 {
        app.update();
    }

    act(&mut app, shooter, ShooterAction::ReloadPressed);
    assert_eq!(events::<ReloadStarted>(&app).len(), 1);
    let during = blend(&app, shooter);
    assert_eq!(during.offset_state, OffsetState::Reloading);
    assert_eq!(during.combat_state, CombatState::Reloading);
    assert_eq!(during.recoil_weight, 1.0);

    app.world_mut().send_event(ReloadAnimationFinished { shooter });
    app.update();
    assert_eq!(blend(&app, shooter).offset_state, OffsetState::Hip);
}

#[test]
fn test_look_input_scaled_by_aiming() {
    let (mut app, shooter) = create_app();

    app.world_mut().send_event(LookInput {
        entity: shooter,
        source: LookSource::Mouse,
        yaw: 10.0,
        pitch: -5.0,
    });
    app.update();
    assert_eq!(
        events::<ControllerRotation>(&app),
        vec![ControllerRotation { entity: shooter, yaw: 10.0, pitch: -5.0 }]
    );

    act(&mut app, shooter, ShooterAction::AimPressed);
    app.world_mut().send_event(LookInput {
        entity: shooter,
        source: LookSource::Mouse,
        yaw: 10.0,
        pitch: -5.0,
    });
    app.update();
    let rotation = events::<ControllerRotation>(&app);
    assert_eq!(rotation.len(), 1);
    assert!((rotation[0].yaw - 2.0).abs() < 1e-5);
    assert!((rotation[0].pitch + 1.0).abs() < 1e-5);
}
