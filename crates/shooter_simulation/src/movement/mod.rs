//! Movement domain - stance, camera rig, host motion state
//!
//! Содержит:
//! - CharacterMotion (velocity / air / yaw от host'а)
//! - Stance (crouch, sprint, capsule half-height)
//! - CameraRig (FOV zoom, look rates)
//! - JumpRequested, ControllerRotation (events для host'а)

use bevy::prelude::*;

use crate::SimulationSet;

pub mod camera;
pub mod events;
pub mod motion;
pub mod stance;
pub mod systems;

pub use camera::CameraRig;
pub use events::*;
pub use motion::CharacterMotion;
pub use stance::Stance;
pub use systems::*;

/// Movement Plugin
///
/// Actions (crouch/jump/sprint, look) → затем производные значения
/// (FOV, look rates, capsule).
pub struct MovementPlugin;

impl Plugin for MovementPlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<JumpRequested>()
            .add_event::<ControllerRotation>()
            .register_type::<CharacterMotion>()
            .register_type::<Stance>()
            .register_type::<CameraRig>();

        app.add_systems(
            Update,
            (
                (process_movement_actions, process_look_input).in_set(SimulationSet::Actions),
                update_camera_zoom.in_set(SimulationSet::CameraUpdate),
                interp_capsule_half_height.in_set(SimulationSet::CapsuleUpdate),
            ),
        );
    }
}
