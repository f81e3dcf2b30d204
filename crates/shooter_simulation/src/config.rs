//! Tuning конфигурация симуляции
//!
//! `ShooterConfig` - bevy Resource. Defaults = боевые значения игры,
//! TOML может переопределить любое подмножество ключей.
//!
//! ```toml
//! [combat]
//! automatic_fire_rate = 0.08
//!
//! [crosshair]
//! aim_target = 0.5
//! ```

use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

use crate::combat::WeaponKind;

/// Ошибки загрузки конфигурации
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid config value: {0}")]
    Invalid(String),
}

/// Вся tuning конфигурация персонажа-стрелка
#[derive(Resource, Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShooterConfig {
    pub combat: CombatConfig,
    pub crosshair: CrosshairConfig,
    pub camera: CameraConfig,
    pub movement: MovementConfig,
    pub animation: AnimationConfig,
    pub items: ItemConfig,
}

impl ShooterConfig {
    /// Парсинг + валидация
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        let config: ShooterConfig = toml::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Отсекает значения, ломающие таймеры, clamp'ы и интерполяцию
    pub fn validate(&self) -> Result<(), ConfigError> {
        // Timer::from_seconds, gen_range и f32::clamp паникуют на inf/NaN
        let finite = [
            ("crosshair.base_spread", self.crosshair.base_spread),
            ("crosshair.in_air_target", self.crosshair.in_air_target),
            ("crosshair.aim_target", self.crosshair.aim_target),
            ("crosshair.shooting_target", self.crosshair.shooting_target),
            ("camera.hip_turn_rate", self.camera.hip_turn_rate),
            ("camera.hip_look_up_rate", self.camera.hip_look_up_rate),
            ("camera.aiming_turn_rate", self.camera.aiming_turn_rate),
            ("camera.aiming_look_up_rate", self.camera.aiming_look_up_rate),
            ("camera.interp_distance", self.camera.interp_distance),
            ("camera.interp_elevation", self.camera.interp_elevation),
            ("movement.base_movement_speed", self.movement.base_movement_speed),
            ("movement.crouch_movement_speed", self.movement.crouch_movement_speed),
            ("movement.sprint_speed", self.movement.sprint_speed),
            ("movement.base_ground_friction", self.movement.base_ground_friction),
            ("movement.crouching_ground_friction", self.movement.crouching_ground_friction),
            ("items.throw_roll_degrees", self.items.throw_roll_degrees),
        ];
        for (name, value) in finite {
            if !value.is_finite() {
                return Err(ConfigError::Invalid(format!("{name} must be finite, got {value}")));
            }
        }

        let positive = [
            ("combat.automatic_fire_rate", self.combat.automatic_fire_rate),
            ("combat.shoot_time_duration", self.combat.shoot_time_duration),
            ("crosshair.walk_speed_range", self.crosshair.walk_speed_range),
            ("camera.default_fov", self.camera.default_fov),
            ("camera.zoomed_fov", self.camera.zoomed_fov),
            ("movement.standing_capsule_half_height", self.movement.standing_capsule_half_height),
            ("movement.crouching_capsule_half_height", self.movement.crouching_capsule_half_height),
            ("items.item_interp_time", self.items.item_interp_time),
            ("items.throw_weapon_time", self.items.throw_weapon_time),
        ];
        for (name, value) in positive {
            if !(value.is_finite() && value > 0.0) {
                return Err(ConfigError::Invalid(format!("{name} must be finite and > 0, got {value}")));
            }
        }

        let non_negative = [
            ("crosshair.velocity_interp_speed", self.crosshair.velocity_interp_speed),
            ("crosshair.in_air_rise_speed", self.crosshair.in_air_rise_speed),
            ("crosshair.in_air_fall_speed", self.crosshair.in_air_fall_speed),
            ("crosshair.aim_interp_speed", self.crosshair.aim_interp_speed),
            ("crosshair.shooting_interp_speed", self.crosshair.shooting_interp_speed),
            ("camera.zoom_interp_speed", self.camera.zoom_interp_speed),
            ("movement.capsule_interp_speed", self.movement.capsule_interp_speed),
            ("animation.lean_interp_speed", self.animation.lean_interp_speed),
            ("animation.max_lean", self.animation.max_lean),
            ("animation.max_root_yaw_offset", self.animation.max_root_yaw_offset),
            ("items.throw_impulse", self.items.throw_impulse),
            ("items.throw_yaw_jitter_degrees", self.items.throw_yaw_jitter_degrees),
        ];
        for (name, value) in non_negative {
            if !(value.is_finite() && value >= 0.0) {
                return Err(ConfigError::Invalid(format!("{name} must be finite and >= 0, got {value}")));
            }
        }

        let mouse_scales = [
            ("camera.mouse_hip_turn_rate", self.camera.mouse_hip_turn_rate),
            ("camera.mouse_hip_look_up_rate", self.camera.mouse_hip_look_up_rate),
            ("camera.mouse_aiming_turn_rate", self.camera.mouse_aiming_turn_rate),
            ("camera.mouse_aiming_look_up_rate", self.camera.mouse_aiming_look_up_rate),
        ];
        for (name, value) in mouse_scales {
            if !(0.0..=1.0).contains(&value) {
                return Err(ConfigError::Invalid(format!("{name} must be within [0, 1], got {value}")));
            }
        }

        Ok(())
    }
}

/// Fire/reload + стартовый запас
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CombatConfig {
    /// Пауза между автоматическими выстрелами (секунды)
    pub automatic_fire_rate: f32,
    /// Окно "только что выстрелил" для crosshair (секунды)
    pub shoot_time_duration: f32,
    pub starting_9mm_ammo: u32,
    pub starting_ar_ammo: u32,
    /// Оружие в руках при spawn
    pub default_weapon: WeaponKind,
}

impl Default for CombatConfig {
    fn default() -> Self {
        Self {
            automatic_fire_rate: 0.1,
            shoot_time_duration: 0.05,
            starting_9mm_ammo: 85,
            starting_ar_ammo: 123,
            default_weapon: WeaponKind::SubmachineGun,
        }
    }
}

/// Crosshair spread targets + interp speeds (1/сек)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CrosshairConfig {
    pub base_spread: f32,
    /// Скорость, при которой velocity factor = 1
    pub walk_speed_range: f32,
    pub velocity_interp_speed: f32,
    pub in_air_target: f32,
    pub in_air_rise_speed: f32,
    pub in_air_fall_speed: f32,
    pub aim_target: f32,
    pub aim_interp_speed: f32,
    pub shooting_target: f32,
    pub shooting_interp_speed: f32,
}

impl Default for CrosshairConfig {
    fn default() -> Self {
        Self {
            base_spread: 0.5,
            walk_speed_range: 600.0,
            velocity_interp_speed: 30.0,
            in_air_target: 2.25,
            in_air_rise_speed: 2.25,
            in_air_fall_speed: 30.0,
            aim_target: 0.6,
            aim_interp_speed: 30.0,
            shooting_target: 0.3,
            shooting_interp_speed: 60.0,
        }
    }
}

/// Camera zoom + look sensitivity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    pub default_fov: f32,
    pub zoomed_fov: f32,
    pub zoom_interp_speed: f32,

    /// Gamepad rates (градусы/сек)
    pub hip_turn_rate: f32,
    pub hip_look_up_rate: f32,
    pub aiming_turn_rate: f32,
    pub aiming_look_up_rate: f32,

    /// Mouse scale factors [0, 1]
    pub mouse_hip_turn_rate: f32,
    pub mouse_hip_look_up_rate: f32,
    pub mouse_aiming_turn_rate: f32,
    pub mouse_aiming_look_up_rate: f32,

    /// Точка перед камерой, куда летит подбираемый предмет
    pub interp_distance: f32,
    pub interp_elevation: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            default_fov: 90.0,
            zoomed_fov: 35.0,
            zoom_interp_speed: 20.0,
            hip_turn_rate: 90.0,
            hip_look_up_rate: 90.0,
            aiming_turn_rate: 20.0,
            aiming_look_up_rate: 20.0,
            mouse_hip_turn_rate: 1.0,
            mouse_hip_look_up_rate: 1.0,
            mouse_aiming_turn_rate: 0.2,
            mouse_aiming_look_up_rate: 0.2,
            interp_distance: 250.0,
            interp_elevation: 65.0,
        }
    }
}

/// Stance: скорости, capsule, friction
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MovementConfig {
    pub base_movement_speed: f32,
    pub crouch_movement_speed: f32,
    /// Прибавка к walk speed пока зажат sprint
    pub sprint_speed: f32,
    pub standing_capsule_half_height: f32,
    pub crouching_capsule_half_height: f32,
    pub capsule_interp_speed: f32,
    pub base_ground_friction: f32,
    pub crouching_ground_friction: f32,
}

impl Default for MovementConfig {
    fn default() -> Self {
        Self {
            base_movement_speed: 650.0,
            crouch_movement_speed: 350.0,
            sprint_speed: 1200.0,
            standing_capsule_half_height: 88.0,
            crouching_capsule_half_height: 44.0,
            capsule_interp_speed: 20.0,
            base_ground_friction: 2.0,
            crouching_ground_friction: 100.0,
        }
    }
}

/// Turn-in-place + lean
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnimationConfig {
    pub lean_interp_speed: f32,
    /// Clamp lean yaw delta (градусы/сек)
    pub max_lean: f32,
    /// Clamp root yaw offset во время turn-in-place (градусы)
    pub max_root_yaw_offset: f32,
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self {
            lean_interp_speed: 6.0,
            max_lean: 90.0,
            max_root_yaw_offset: 90.0,
        }
    }
}

/// Pickup / throw
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ItemConfig {
    /// Длительность полёта предмета к камере при подборе (секунды)
    pub item_interp_time: f32,
    /// Сколько брошенное оружие падает до Pickup state (секунды)
    pub throw_weapon_time: f32,
    pub throw_impulse: f32,
    /// Наклон вектора броска вокруг forward (градусы)
    pub throw_roll_degrees: f32,
    /// Случайный yaw броска в [-jitter, jitter] (градусы)
    pub throw_yaw_jitter_degrees: f32,
}

impl Default for ItemConfig {
    fn default() -> Self {
        Self {
            item_interp_time: 0.7,
            throw_weapon_time: 0.7,
            throw_impulse: 20_000.0,
            throw_roll_degrees: -20.0,
            throw_yaw_jitter_degrees: 30.0,
        }
    }
}
