//! Combat events
//!
//! Sim → host: что проиграть (звук, muzzle flash, montage section).
//! Host → sim: animation notifies (reload закончился, рука взяла магазин).

use bevy::prelude::*;

use super::ammo::AmmoKind;
use super::controller::ReloadTransfer;
use super::weapon::{Weapon, WeaponKind};

// ============================================================================
// Sim → host
// ============================================================================

/// Выстрел произведён (патрон списан)
///
/// Host: звук, muzzle flash, hip-fire montage, beam trace.
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct WeaponFired {
    pub shooter: Entity,
    pub weapon_kind: WeaponKind,
    pub ammo_remaining: u32,
}

/// Попытка выстрела с пустым магазином (crosshair всё равно дёрнулся)
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct DryFired {
    pub shooter: Entity,
}

/// Reload начат, host проигрывает `reload_section` reload montage
#[derive(Event, Debug, Clone, PartialEq)]
pub struct ReloadStarted {
    pub shooter: Entity,
    pub reload_section: String,
}

/// Патроны перенесены в магазин
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct ReloadCompleted {
    pub shooter: Entity,
    pub ammo_kind: AmmoKind,
    pub transfer: ReloadTransfer,
}

/// Reload прерван (оружие выпущено из рук)
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct ReloadCancelled {
    pub shooter: Entity,
}

/// Оружие взято в руки (host attach к hand socket)
#[derive(Event, Debug, Clone, PartialEq)]
pub struct WeaponEquipped {
    pub shooter: Entity,
    pub weapon: Weapon,
}

/// Оружие выпущено из рук → world item `item` (Falling)
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct WeaponDropped {
    pub shooter: Entity,
    pub item: Entity,
}

// ============================================================================
// Host → sim (animation notifies)
// ============================================================================

/// Reload montage дошёл до конца
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct ReloadAnimationFinished {
    pub shooter: Entity,
}

/// Notify: рука взяла магазин
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct ClipGrabbed {
    pub shooter: Entity,
}

/// Notify: магазин вставлен обратно
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct ClipReleased {
    pub shooter: Entity,
}
