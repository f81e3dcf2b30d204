//! CharacterMotion - физическое состояние персонажа от host'а
//!
//! Host (character movement + camera controller) пишет каждый кадр
//! до `Update`. ECS только читает.

use bevy::prelude::*;

use crate::math::{horizontal_speed, yaw_from_direction};

/// Скорость, воздух, ориентация актёра и прицела
///
/// Все углы в градусах.
#[derive(Component, Debug, Clone, Copy, Default, PartialEq, Reflect)]
#[reflect(Component)]
pub struct CharacterMotion {
    pub velocity: Vec3,
    pub is_falling: bool,
    /// Есть ли ненулевое input acceleration
    pub is_accelerating: bool,
    /// Yaw актёра (root)
    pub actor_yaw: f32,
    /// Yaw / pitch base aim rotation (камера)
    pub aim_yaw: f32,
    pub aim_pitch: f32,
}

impl CharacterMotion {
    /// Горизонтальная скорость (вертикаль не учитывается)
    pub fn speed(&self) -> f32 {
        horizontal_speed(self.velocity)
    }

    /// Yaw направления движения (None если стоим)
    pub fn movement_yaw(&self) -> Option<f32> {
        yaw_from_direction(self.velocity)
    }
}
