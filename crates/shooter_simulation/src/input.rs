//! Input actions (host → ECS)
//!
//! Host биндит устройства сам и шлёт zero-argument триггеры.
//! Look input идёт отдельным event'ом (нужны значения осей).

use bevy::prelude::*;

/// Action trigger без аргументов
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Reflect)]
pub enum ShooterAction {
    FirePressed,
    FireReleased,
    AimPressed,
    AimReleased,
    ReloadPressed,
    CrouchPressed,
    Jump,
    SprintStart,
    SprintEnd,
    /// Interact: подобрать предмет под прицелом
    SelectPressed,
    SelectReleased,
}

/// Event: персонаж `entity` получил action
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct ActionIntent {
    pub entity: Entity,
    pub action: ShooterAction,
}

impl ActionIntent {
    pub fn new(entity: Entity, action: ShooterAction) -> Self {
        Self { entity, action }
    }
}

/// Откуда пришли значения осей
#[derive(Debug, Clone, Copy, PartialEq, Eq, Reflect)]
pub enum LookSource {
    /// Нормализованные оси [-1, 1], умножаются на rate × dt
    Gamepad,
    /// Сырой mouse delta, умножается на sensitivity scale
    Mouse,
}

/// Event: look/turn ввод
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct LookInput {
    pub entity: Entity,
    pub source: LookSource,
    pub yaw: f32,
    pub pitch: f32,
}
