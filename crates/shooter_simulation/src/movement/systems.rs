//! Movement / camera systems

use bevy::prelude::*;

use super::camera::CameraRig;
use super::events::{ControllerRotation, JumpRequested};
use super::motion::CharacterMotion;
use super::stance::Stance;
use crate::combat::CombatController;
use crate::config::ShooterConfig;
use crate::input::{ActionIntent, LookInput, LookSource, ShooterAction};

/// System: crouch / jump / sprint
pub fn process_movement_actions(
    mut intents: EventReader<ActionIntent>,
    mut characters: Query<(&mut Stance, &CharacterMotion)>,
    config: Res<ShooterConfig>,
    mut jumps: EventWriter<JumpRequested>,
) {
    let movement = &config.movement;

    for intent in intents.read() {
        let Ok((mut stance, motion)) = characters.get_mut(intent.entity) else {
            continue;
        };

        match intent.action {
            ShooterAction::CrouchPressed => {
                if stance.toggle_crouch(motion.is_falling, movement) {
                    crate::logger::log(&format!(
                        "{:?} crouch → {}",
                        intent.entity,
                        stance.is_crouching()
                    ));
                }
            }
            ShooterAction::Jump => {
                if stance.jump(movement) {
                    jumps.write(JumpRequested {
                        entity: intent.entity,
                    });
                }
            }
            ShooterAction::SprintStart => stance.start_sprint(movement),
            ShooterAction::SprintEnd => stance.end_sprint(movement),
            _ => {}
        }
    }
}

/// System: look input → controller rotation (rates зависят от aiming)
pub fn process_look_input(
    mut looks: EventReader<LookInput>,
    rigs: Query<(&CameraRig, &CombatController)>,
    config: Res<ShooterConfig>,
    time: Res<Time>,
    mut rotations: EventWriter<ControllerRotation>,
) {
    let delta = time.delta_secs();

    for look in looks.read() {
        let Ok((rig, controller)) = rigs.get(look.entity) else {
            continue;
        };
        let aiming = controller.is_aiming();

        let (yaw, pitch) = match look.source {
            LookSource::Gamepad => (
                rig.turn_at_rate(look.yaw, delta),
                rig.look_up_at_rate(look.pitch, delta),
            ),
            LookSource::Mouse => (
                CameraRig::turn(look.yaw, aiming, &config.camera),
                CameraRig::look_up(look.pitch, aiming, &config.camera),
            ),
        };

        rotations.write(ControllerRotation {
            entity: look.entity,
            yaw,
            pitch,
        });
    }
}

/// System: FOV zoom + look rates
pub fn update_camera_zoom(
    mut rigs: Query<(&mut CameraRig, &CombatController)>,
    config: Res<ShooterConfig>,
    time: Res<Time>,
) {
    let delta = time.delta_secs();

    for (mut rig, controller) in rigs.iter_mut() {
        let aiming = controller.is_aiming();
        rig.interp_zoom(aiming, delta, &config.camera);
        rig.set_look_rates(aiming, &config.camera);
    }
}

/// System: сглаживание capsule half-height
pub fn interp_capsule_half_height(
    mut stances: Query<&mut Stance>,
    config: Res<ShooterConfig>,
    time: Res<Time>,
) {
    let delta = time.delta_secs();

    for mut stance in stances.iter_mut() {
        stance.interp_capsule_half_height(delta, &config.movement);
    }
}
