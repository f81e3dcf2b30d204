//! Animation domain - blend параметры для host animation graph
//!
//! ECS: turn-in-place root offset, lean, aim offset state, recoil weight.
//! Host: выполнение animation graph, curve values ("Turning", "Rotation").

use bevy::prelude::*;

use crate::combat::CombatController;
use crate::config::ShooterConfig;
use crate::movement::{CharacterMotion, Stance};
use crate::SimulationSet;

pub mod blend;


pub use blend::{
    advance_blend, recoil_weight, AnimationBlend, BlendHistory, LocomotionSnapshot, OffsetState,
};

/// Curve values turn-in-place анимации (host пишет каждый кадр)
#[derive(Component, Debug, Clone, Copy, Default, PartialEq, Reflect)]
#[reflect(Component)]
pub struct TurnCurves {
    pub turning: f32,
    pub rotation: f32,
}

/// System: пересчёт AnimationBlend (последний в tick'е)
pub fn update_animation_blend(
    mut characters: Query<(
        &mut AnimationBlend,
        &mut BlendHistory,
        &CharacterMotion,
        &CombatController,
        &Stance,
        Option<&TurnCurves>,
    )>,
    config: Res<ShooterConfig>,
    time: Res<Time>,
) {
    let delta = time.delta_secs();

    for (mut blend, mut history, motion, controller, stance, curves) in characters.iter_mut() {
        let curves = curves.copied().unwrap_or_default();
        let snapshot = LocomotionSnapshot {
            velocity: motion.velocity,
            in_air: motion.is_falling,
            accelerating: motion.is_accelerating,
            actor_yaw: motion.actor_yaw,
            aim_yaw: motion.aim_yaw,
            aim_pitch: motion.aim_pitch,
            aiming: controller.is_aiming(),
            crouching: stance.is_crouching(),
            combat_state: controller.state(),
            turning_curve: curves.turning,
            rotation_curve: curves.rotation,
        };

        let (next_blend, next_history) = advance_blend(&history, &snapshot, delta, &config.animation);
        *blend = next_blend;
        *history = next_history;
    }
}

/// Animation Plugin
pub struct AnimationPlugin;

impl Plugin for AnimationPlugin {
    fn build(&self, app: &mut App) {
        app.register_type::<AnimationBlend>()
            .register_type::<BlendHistory>()
            .register_type::<OffsetState>()
            .register_type::<TurnCurves>()
            .add_systems(
                Update,
                update_animation_blend.in_set(SimulationSet::AnimationBlend),
            );
    }
}
