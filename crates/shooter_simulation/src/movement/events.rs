//! Movement events (sim → host)

use bevy::prelude::*;

/// Event: host должен выполнить прыжок
///
/// Не генерируется, если jump только поднял персонажа из приседа.
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct JumpRequested {
    pub entity: Entity,
}

/// Event: добавить к controller rotation (градусы)
///
/// Результат LookInput после look rates / mouse scale.
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct ControllerRotation {
    pub entity: Entity,
    pub yaw: f32,
    pub pitch: f32,
}
