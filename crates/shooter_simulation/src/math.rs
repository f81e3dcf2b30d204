//! Interpolation + angle helpers (framerate-independent smoothing)
//!
//! Все yaw/pitch в градусах. Forward в bevy = -Z, yaw вращает вокруг +Y.

use bevy::prelude::*;

/// Distance ниже которой interp сразу возвращает target
const INTERP_SNAP_DISTANCE_SQ: f32 = 1.0e-8;

/// Exponential approach к target: `current + (target - current) * clamp(speed * dt, 0, 1)`
///
/// - speed <= 0 → мгновенно target
/// - dt <= 0 → current без изменений
/// - никогда не перелетает target (коэффициент ≤ 1)
pub fn interp_to(current: f32, target: f32, delta_time: f32, interp_speed: f32) -> f32 {
    if interp_speed <= 0.0 {
        return target;
    }

    let distance = target - current;
    if distance * distance < INTERP_SNAP_DISTANCE_SQ {
        return target;
    }

    let alpha = (delta_time * interp_speed).clamp(0.0, 1.0);
    current + distance * alpha
}

/// Линейный map `value` из `input` диапазона в `output`, с clamp на концах
pub fn map_range_clamped(input: (f32, f32), output: (f32, f32), value: f32) -> f32 {
    let span = input.1 - input.0;
    if span.abs() <= f32::EPSILON {
        return if value >= input.1 { output.1 } else { output.0 };
    }

    let t = ((value - input.0) / span).clamp(0.0, 1.0);
    output.0 + (output.1 - output.0) * t
}

/// Нормализует угол в (-180, 180]
pub fn normalize_degrees(angle: f32) -> f32 {
    let mut wrapped = angle % 360.0;
    if wrapped > 180.0 {
        wrapped -= 360.0;
    } else if wrapped <= -180.0 {
        wrapped += 360.0;
    }
    wrapped
}

/// Кратчайшая разница `to - from` (градусы)
pub fn delta_degrees(to: f32, from: f32) -> f32 {
    normalize_degrees(to - from)
}

/// Yaw горизонтального направления (None для нулевого вектора)
pub fn yaw_from_direction(direction: Vec3) -> Option<f32> {
    let flat = Vec3::new(direction.x, 0.0, direction.z);
    if flat.length_squared() <= f32::EPSILON {
        return None;
    }
    Some((-flat.x).atan2(-flat.z).to_degrees())
}

/// Горизонтальная скорость (Y отбрасывается)
pub fn horizontal_speed(velocity: Vec3) -> f32 {
    Vec3::new(velocity.x, 0.0, velocity.z).length()
}
