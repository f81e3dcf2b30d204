//! Shooter - персонаж игрока
//!
//! Маркер + required components: spawn одного `Shooter` даёт полный набор
//! (combat, crosshair, stance, camera, items, animation blend).

use bevy::prelude::*;

use crate::animation::{AnimationBlend, BlendHistory, TurnCurves};
use crate::combat::CombatController;
use crate::config::ShooterConfig;
use crate::crosshair::CrosshairSpread;
use crate::items::{CrosshairTrace, ItemTracker};
use crate::movement::{CameraRig, CharacterMotion, Stance};

#[derive(Component, Debug, Default, Clone, Copy, Reflect)]
#[reflect(Component)]
#[require(
    Transform,
    CombatController,
    CrosshairSpread,
    CharacterMotion,
    Stance,
    CameraRig,
    ItemTracker,
    CrosshairTrace,
    TurnCurves,
    AnimationBlend,
    BlendHistory
)]
pub struct Shooter;

/// Spawn стрелка с default weapon и стартовым запасом из конфига
pub fn spawn_shooter(commands: &mut Commands, config: &ShooterConfig, transform: Transform) -> Entity {
    let controller = CombatController::from_config(&config.combat);
    let weapon_kind = controller.equipped_weapon().map(|weapon| weapon.kind);

    let entity = commands
        .spawn((
            Shooter,
            transform,
            controller,
            Stance::standing(&config.movement),
            CameraRig::from_config(&config.camera),
        ))
        .id();

    crate::logger::log_info(&format!(
        "🔫 Shooter {:?} spawned with {:?}",
        entity, weapon_kind
    ));

    entity
}
