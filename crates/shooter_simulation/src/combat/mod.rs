//! Combat domain: оружие в руках, запас патронов, fire/reload state machine
//!
//! ECS ответственность:
//! - CombatController state (Unoccupied / FireTimerInProgress / Reloading)
//! - Magazine + carried ammo, fire-rate timer
//! - Events: WeaponFired, ReloadStarted, ReloadCompleted
//!
//! Host ответственность:
//! - Reload montage, muzzle flash, звук, beam trace
//! - Animation notifies: ReloadAnimationFinished, ClipGrabbed, ClipReleased

use bevy::prelude::*;

use crate::SimulationSet;

pub mod ammo;
pub mod controller;
pub mod events;
pub mod systems;
pub mod weapon;


// Re-export основных типов
pub use ammo::{AmmoInventory, AmmoKind};
pub use controller::{
    AutoFireOutcome, CombatController, CombatState, DroppedWeapon, FireOutcome, ReloadTransfer,
};
pub use events::*;
pub use systems::{process_animation_notifies, process_combat_actions, tick_combat_timers};
pub use weapon::{weapon_trace_end, Weapon, WeaponKind};

/// Combat Plugin
///
/// Порядок внутри tick'а (через `SimulationSet`):
/// 1. tick_combat_timers - fire-rate timer, shot window, auto-fire / auto-reload
/// 2. process_combat_actions - fire / aim / reload кнопки
/// 3. process_animation_notifies - finish reload, grab / release clip
pub struct CombatPlugin;

impl Plugin for CombatPlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<WeaponFired>()
            .add_event::<DryFired>()
            .add_event::<ReloadStarted>()
            .add_event::<ReloadCompleted>()
            .add_event::<ReloadCancelled>()
            .add_event::<WeaponEquipped>()
            .add_event::<WeaponDropped>()
            .add_event::<ReloadAnimationFinished>()
            .add_event::<ClipGrabbed>()
            .add_event::<ClipReleased>()
            .register_type::<CombatState>()
            .register_type::<WeaponKind>()
            .register_type::<AmmoKind>();

        app.add_systems(
            Update,
            (
                tick_combat_timers.in_set(SimulationSet::CombatTimers),
                process_combat_actions.in_set(SimulationSet::Actions),
                process_animation_notifies.in_set(SimulationSet::AnimationNotifies),
            ),
        );
    }
}
