//! Items domain - предметы в мире, подбор, бросок оружия
//!
//! ECS ответственность:
//! - WorldItem lifecycle (Pickup → EquipInterping → подобран, Falling → Pickup)
//! - ItemTracker: overlap counter + trace-for-items
//! - Ownership transfer оружия между миром и CombatController
//!
//! Host ответственность:
//! - Area overlap → ItemOverlapChanged
//! - Crosshair ray cast → CrosshairTrace
//! - Pickup widget, звуки, rapier physics step

use bevy::prelude::*;

use crate::SimulationSet;

pub mod components;
pub mod events;
pub mod systems;
pub mod throw;

pub use components::{
    CrosshairTrace, ItemKind, ItemProgress, ItemState, ItemTracker, WidgetChanges, WorldItem,
};
pub use events::*;
pub use systems::*;
pub use throw::{spawn_thrown_weapon, throw_impulse};

/// Items Plugin
///
/// Порядок:
/// 1. overlaps / select / drop (Actions)
/// 2. trace_for_items - после crosshair
/// 3. update_item_lifecycle - после capsule, до animation blend
pub struct ItemsPlugin;

impl Plugin for ItemsPlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<ItemOverlapChanged>()
            .add_event::<DropWeaponRequested>()
            .add_event::<PickupWidgetVisibility>()
            .add_event::<ItemPickedUp>()
            .register_type::<ItemState>();

        app.add_systems(
            Update,
            (
                (process_item_overlaps, process_select_actions, process_drop_requests)
                    .chain()
                    .in_set(SimulationSet::Actions),
                trace_for_items.in_set(SimulationSet::ItemTrace),
                update_item_lifecycle.in_set(SimulationSet::ItemLifecycle),
            ),
        );
    }
}
