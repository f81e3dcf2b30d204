//! Бросок оружия при drop/swap
//!
//! ECS задаёт только RigidBody + ExternalImpulse, дальше работает rapier (host plugin).

use bevy::prelude::*;
use bevy_rapier3d::prelude::*;
use rand::Rng;

use super::components::{ItemKind, WorldItem};
use crate::combat::Weapon;
use crate::config::ItemConfig;
use crate::DeterministicRng;

/// Impulse броска
///
/// Right-вектор (только yaw от `origin_rotation`) наклоняется на `throw_roll_degrees`
/// вокруг forward, затем поворачивается по yaw на `yaw_jitter_degrees`.
pub fn throw_impulse(origin_rotation: Quat, yaw_jitter_degrees: f32, config: &ItemConfig) -> Vec3 {
    let (yaw, _, _) = origin_rotation.to_euler(EulerRot::YXZ);
    let flat = Quat::from_rotation_y(yaw);
    let forward = flat * Vec3::NEG_Z;
    let right = flat * Vec3::X;

    let rolled = Quat::from_axis_angle(forward, config.throw_roll_degrees.to_radians()) * right;
    let direction = Quat::from_rotation_y(yaw_jitter_degrees.to_radians()) * rolled;
    direction * config.throw_impulse
}

/// Spawn выброшенного оружия как Falling world item
pub fn spawn_thrown_weapon(
    commands: &mut Commands,
    weapon: Weapon,
    origin: &Transform,
    rng: &mut DeterministicRng,
    config: &ItemConfig,
) -> Entity {
    let jitter = config.throw_yaw_jitter_degrees.abs();
    let yaw_jitter = if jitter > 0.0 {
        rng.rng.gen_range(-jitter..=jitter)
    } else {
        0.0
    };

    let (yaw, _, _) = origin.rotation.to_euler(EulerRot::YXZ);
    let impulse = throw_impulse(origin.rotation, yaw_jitter, config);

    crate::logger::log(&format!(
        "🗑️ Throwing {:?} (ammo {}), yaw jitter {:.1}°",
        weapon.kind,
        weapon.ammo(),
        yaw_jitter
    ));

    commands
        .spawn((
            WorldItem::falling(ItemKind::Weapon(weapon), config),
            Transform::from_translation(origin.translation).with_rotation(Quat::from_rotation_y(yaw)),
            RigidBody::Dynamic,
            ExternalImpulse {
                impulse,
                torque_impulse: Vec3::ZERO,
            },
        ))
        .id()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_throw_goes_right_and_up() {
        let config = ItemConfig::default();
        let impulse = throw_impulse(Quat::IDENTITY, 0.0, &config);

        assert!((impulse.length() - 20_000.0).abs() < 1.0);
        assert!(impulse.x > 0.0);
        assert!(impulse.y > 0.0);
        assert!(impulse.z.abs() < 1.0);
        // Наклон 20° от горизонтали
        let elevation = (impulse.y / impulse.length()).asin().to_degrees();
        assert!((elevation - 20.0).abs() < 1e-2);
    }

    #[test]
    fn test_throw_jitter_rotates_around_up() {
        let config = ItemConfig::default();
        let base = throw_impulse(Quat::IDENTITY, 0.0, &config);
        let jittered = throw_impulse(Quat::IDENTITY, 30.0, &config);

        assert!((jittered.length() - base.length()).abs() < 1.0);
        assert!((jittered.y - base.y).abs() < 1.0);
        assert!(jittered.z < 0.0);
    }

    #[test]
    fn test_throw_ignores_origin_pitch() {
        let config = ItemConfig::default();
        let flat = throw_impulse(Quat::from_rotation_y(0.5), 0.0, &config);
        let pitched = throw_impulse(
            Quat::from_euler(EulerRot::YXZ, 0.5, 0.7, 0.0),
            0.0,
            &config,
        );
        assert!((flat - pitched).length() < 1.0);
    }
}
