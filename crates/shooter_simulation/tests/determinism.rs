//! Тесты детерминизма
//!
//! Одинаковый seed → идентичные броски оружия и crosshair/blend траектории

use std::time::Duration;

use bevy::prelude::*;
use bevy::time::TimeUpdateStrategy;
use bevy_rapier3d::prelude::ExternalImpulse;
use shooter_simulation::items::DropWeaponRequested;
use shooter_simulation::{
    create_headless_app, spawn_shooter, world_snapshot, ActionIntent, AnimationBlend,
    CharacterMotion, CrosshairSpread, ShooterAction, ShooterConfig, SimulationPlugin,
};

const TICK: Duration = Duration::from_micros(16_667);
const SHOOTER_COUNT: usize = 8;

fn create_app(seed: u64) -> (App, Vec<Entity>) {
    let mut app = create_headless_app(seed);
    app.add_plugins(SimulationPlugin)
        .insert_resource(TimeUpdateStrategy::ManualDuration(TICK));

    let config = ShooterConfig::default();
    let shooters = (0..SHOOTER_COUNT)
        .map(|i| {
            let transform = Transform::from_xyz(i as f32 * 200.0, 0.0, 0.0)
                .with_rotation(Quat::from_rotation_y(i as f32 * 0.4));
            spawn_shooter(&mut app.world_mut().commands(), &config, transform)
        })
        .collect();
    app.update();

    (app, shooters)
}

/// Все стрелки одновременно выбрасывают оружие (yaw jitter из RNG)
fn run_throws(seed: u64) -> Vec<u8> {
    let (mut app, shooters) = create_app(seed);

    for shooter in &shooters {
        app.world_mut().send_event(DropWeaponRequested { shooter: *shooter });
    }
    app.update();

    world_snapshot::<ExternalImpulse>(app.world_mut())
}

/// Стрелки двигаются, поворачиваются, стреляют очередями
fn run_combat(seed: u64, ticks: usize) -> Vec<u8> {
    let (mut app, shooters) = create_app(seed);

    for tick in 0..ticks {
        for (i, shooter) in shooters.iter().enumerate() {
            if (tick + i) % 45 == 0 {
                app.world_mut()
                    .send_event(ActionIntent::new(*shooter, ShooterAction::FirePressed));
            }
            if (tick + i) % 45 == 20 {
                app.world_mut()
                    .send_event(ActionIntent::new(*shooter, ShooterAction::FireReleased));
            }

            if let Some(mut motion) = app.world_mut().get_mut::<CharacterMotion>(*shooter) {
                motion.actor_yaw = ((tick * (i + 1)) % 360) as f32 - 180.0;
                motion.velocity = if (tick / 60 + i) % 2 == 0 {
                    Vec3::new(100.0 * i as f32, 0.0, -300.0)
                } else {
                    Vec3::ZERO
                };
            }
        }
        app.update();
    }

    let mut snapshot = world_snapshot::<CrosshairSpread>(app.world_mut());
    snapshot.extend(world_snapshot::<AnimationBlend>(app.world_mut()));
    snapshot
}

#[test]
fn test_throws_same_seed() {
    let first = run_throws(12345);
    let second = run_throws(12345);

    assert!(!first.is_empty());
    assert_eq!(
        first, second,
        "Броски с одинаковым seed (12345) дали разные impulses!"
    );
}

#[test]
fn test_throws_differ_between_seeds() {
    assert_ne!(run_throws(1), run_throws(2));
}

#[test]
fn test_combat_determinism_multiple_runs() {
    const SEED: u64 = 42;
    const TICK_COUNT: usize = 600;

    // Запускаем 3 раза - все должны быть идентичны
    let snapshots: Vec<_> = (0..3).map(|_| run_combat(SEED, TICK_COUNT)).collect();

    for (i, snapshot) in snapshots.iter().enumerate().skip(1) {
        assert_eq!(
            snapshots[0], *snapshot,
            "Прогон {} дал результат отличный от прогона 0",
            i
        );
    }
}
