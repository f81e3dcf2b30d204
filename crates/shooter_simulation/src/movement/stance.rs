//! Stance: crouch / sprint / capsule height
//!
//! Walk speed и ground friction всегда выводятся из (crouching, sprinting),
//! поэтому порядок crouch/sprint переключений не накапливает ошибку.

use bevy::prelude::*;

use crate::config::MovementConfig;
use crate::math::interp_to;

#[derive(Component, Debug, Clone, Copy, PartialEq, Reflect)]
#[reflect(Component)]
pub struct Stance {
    crouching: bool,
    sprinting: bool,

    /// Для host character movement
    pub max_walk_speed: f32,
    pub ground_friction: f32,

    /// Текущая (сглаженная) half-height капсулы
    pub capsule_half_height: f32,

    /// Накопленный вертикальный offset меша (компенсирует изменение капсулы)
    pub mesh_offset: f32,
}

impl Default for Stance {
    fn default() -> Self {
        Self::standing(&MovementConfig::default())
    }
}

impl Stance {
    pub fn standing(config: &MovementConfig) -> Self {
        Self {
            crouching: false,
            sprinting: false,
            max_walk_speed: config.base_movement_speed,
            ground_friction: config.base_ground_friction,
            capsule_half_height: config.standing_capsule_half_height,
            mesh_offset: 0.0,
        }
    }

    pub fn is_crouching(&self) -> bool {
        self.crouching
    }

    pub fn is_sprinting(&self) -> bool {
        self.sprinting
    }

    /// Crouch toggle. В падении игнорируется.
    pub fn toggle_crouch(&mut self, is_falling: bool, config: &MovementConfig) -> bool {
        if is_falling {
            return false;
        }
        self.crouching = !self.crouching;
        self.apply_movement_params(config);
        true
    }

    /// Jump. Из приседа - только встаём, прыжка нет.
    ///
    /// Возвращает true если host должен прыгнуть.
    pub fn jump(&mut self, config: &MovementConfig) -> bool {
        if self.crouching {
            self.crouching = false;
            self.apply_movement_params(config);
            return false;
        }
        true
    }

    pub fn start_sprint(&mut self, config: &MovementConfig) {
        self.sprinting = true;
        self.apply_movement_params(config);
    }

    pub fn end_sprint(&mut self, config: &MovementConfig) {
        self.sprinting = false;
        self.apply_movement_params(config);
    }

    fn apply_movement_params(&mut self, config: &MovementConfig) {
        let (speed, friction) = if self.crouching {
            (config.crouch_movement_speed, config.crouching_ground_friction)
        } else {
            (config.base_movement_speed, config.base_ground_friction)
        };

        self.max_walk_speed = if self.sprinting {
            speed + config.sprint_speed
        } else {
            speed
        };
        self.ground_friction = friction;
    }

    pub fn target_capsule_half_height(&self, config: &MovementConfig) -> f32 {
        if self.crouching {
            config.crouching_capsule_half_height
        } else {
            config.standing_capsule_half_height
        }
    }

    /// Один шаг сглаживания капсулы, возвращает изменение half-height
    ///
    /// Меш смещается на `-delta`, чтобы ноги оставались на земле.
    pub fn interp_capsule_half_height(&mut self, delta_time: f32, config: &MovementConfig) -> f32 {
        let target = self.target_capsule_half_height(config);
        let next = interp_to(
            self.capsule_half_height,
            target,
            delta_time,
            config.capsule_interp_speed,
        );

        let delta = next - self.capsule_half_height;
        self.mesh_offset -= delta;
        self.capsule_half_height = next;
        delta
    }
}
