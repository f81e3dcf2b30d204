//! Item events

use bevy::prelude::*;

use super::components::ItemKind;

/// Host → sim: area overlap начался (+1) / закончился (-1)
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct ItemOverlapChanged {
    pub shooter: Entity,
    pub amount: i32,
}

/// Host → sim: выбросить оружие из рук
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct DropWeaponRequested {
    pub shooter: Entity,
}

/// Sim → host: показать / спрятать pickup widget предмета
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct PickupWidgetVisibility {
    pub item: Entity,
    pub visible: bool,
}

/// Sim → host: предмет подобран (entity уже despawn)
#[derive(Event, Debug, Clone, PartialEq)]
pub struct ItemPickedUp {
    pub shooter: Entity,
    pub item: Entity,
    pub kind: ItemKind,
}
