//! CameraRig: FOV zoom, look rates, mouse sensitivity
//!
//! Host пишет позицию/ориентацию камеры, ECS считает FOV и масштабирует look input.

use bevy::prelude::*;

use crate::config::CameraConfig;
use crate::math::interp_to;

#[derive(Component, Debug, Clone, Copy, PartialEq, Reflect)]
#[reflect(Component)]
pub struct CameraRig {
    /// Сглаженный FOV (градусы)
    pub current_fov: f32,

    /// Gamepad rates (градусы/сек), зависят от aiming
    pub base_turn_rate: f32,
    pub base_look_up_rate: f32,

    // Host-written
    pub camera_position: Vec3,
    pub camera_forward: Vec3,
}

impl Default for CameraRig {
    fn default() -> Self {
        Self::from_config(&CameraConfig::default())
    }
}

impl CameraRig {
    pub fn from_config(config: &CameraConfig) -> Self {
        Self {
            current_fov: config.default_fov,
            base_turn_rate: config.hip_turn_rate,
            base_look_up_rate: config.hip_look_up_rate,
            camera_position: Vec3::ZERO,
            camera_forward: Vec3::NEG_Z,
        }
    }

    /// FOV → zoomed при прицеливании, иначе default
    pub fn interp_zoom(&mut self, aiming: bool, delta_time: f32, config: &CameraConfig) {
        let target = if aiming {
            config.zoomed_fov
        } else {
            config.default_fov
        };
        self.current_fov = interp_to(self.current_fov, target, delta_time, config.zoom_interp_speed);
    }

    pub fn set_look_rates(&mut self, aiming: bool, config: &CameraConfig) {
        if aiming {
            self.base_turn_rate = config.aiming_turn_rate;
            self.base_look_up_rate = config.aiming_look_up_rate;
        } else {
            self.base_turn_rate = config.hip_turn_rate;
            self.base_look_up_rate = config.hip_look_up_rate;
        }
    }

    /// Gamepad: `rate` в [-1, 1] → yaw в градусах за этот tick
    pub fn turn_at_rate(&self, rate: f32, delta_time: f32) -> f32 {
        rate * self.base_turn_rate * delta_time
    }

    pub fn look_up_at_rate(&self, rate: f32, delta_time: f32) -> f32 {
        rate * self.base_look_up_rate * delta_time
    }

    /// Mouse: delta × sensitivity scale
    pub fn turn(value: f32, aiming: bool, config: &CameraConfig) -> f32 {
        let scale = if aiming {
            config.mouse_aiming_turn_rate
        } else {
            config.mouse_hip_turn_rate
        };
        value * scale
    }

    pub fn look_up(value: f32, aiming: bool, config: &CameraConfig) -> f32 {
        let scale = if aiming {
            config.mouse_aiming_look_up_rate
        } else {
            config.mouse_hip_look_up_rate
        };
        value * scale
    }

    /// Точка перед камерой, куда интерполируется подбираемый предмет
    ///
    /// Elevation - по мировой вертикали, не по up камеры.
    pub fn interp_target_location(&self, config: &CameraConfig) -> Vec3 {
        self.camera_position
            + self.camera_forward * config.interp_distance
            + Vec3::Y * config.interp_elevation
    }
}
